//! 固定形态诊断
//!
//! 字段固定、各自带专用 `print` 的叶子种类：内联汇编、资源上限、
//! 调试元数据版本、采样/PGO 档案、指令选择回退、misexpect、
//! 不支持构造，以及代理内嵌子诊断的 MIR 解析诊断。
//!
//! 所有渲染文本都是稳定契约，测试按字面断言。

use std::fmt;

use crate::diagnostic::location::DiagnosticLocation;
use crate::diagnostic::{DiagnosticInfo, DiagnosticKind, Severity, WithLocation};
use crate::ir::{Function, Instruction, IrModule, MdOperand};

/// 从指令的 "srcloc" 元数据首操作数恢复源 cookie
///
/// 元数据缺失、为空或首操作数不是整数常量时得 0。
fn srcloc_cookie(inst: &Instruction) -> u64 {
    inst.metadata("srcloc")
        .and_then(|node| node.operands().first())
        .and_then(|op| match op {
            MdOperand::ConstInt(v) => Some(*v),
            _ => None,
        })
        .unwrap_or(0)
}

/// 内联汇编报告的诊断
#[derive(Debug, Clone)]
pub struct InlineAsmDiagnostic<'ir> {
    severity: Severity,
    msg: String,
    instr: Option<&'ir Instruction>,
    loc_cookie: u64,
}

impl<'ir> InlineAsmDiagnostic<'ir> {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            msg: msg.into(),
            instr: None,
            loc_cookie: 0,
        }
    }

    /// 从触发指令构造，并尝试恢复源 cookie
    pub fn on_instruction(
        inst: &'ir Instruction,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            msg: msg.into(),
            instr: Some(inst),
            loc_cookie: srcloc_cookie(inst),
        }
    }

    pub fn with_severity(
        mut self,
        severity: Severity,
    ) -> Self {
        self.severity = severity;
        self
    }

    pub fn loc_cookie(&self) -> u64 {
        self.loc_cookie
    }

    pub fn instruction(&self) -> Option<&'ir Instruction> {
        self.instr
    }
}

impl DiagnosticInfo for InlineAsmDiagnostic<'_> {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::InlineAsm
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        write!(out, "{}", self.msg)?;
        if self.loc_cookie != 0 {
            write!(out, " at line {}", self.loc_cookie)?;
        }
        Ok(())
    }
}

/// 资源上限超限
#[derive(Debug, Clone)]
pub struct ResourceLimitDiagnostic<'ir> {
    severity: Severity,
    func: &'ir Function,
    loc: DiagnosticLocation,
    resource_name: String,
    resource_size: u64,
    resource_limit: u64,
}

impl<'ir> ResourceLimitDiagnostic<'ir> {
    pub fn new(
        func: &'ir Function,
        resource_name: impl Into<String>,
        resource_size: u64,
        resource_limit: u64,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            func,
            loc: DiagnosticLocation::from_subprogram(func.subprogram()),
            resource_name: resource_name.into(),
            resource_size,
            resource_limit,
        }
    }

    pub fn with_severity(
        mut self,
        severity: Severity,
    ) -> Self {
        self.severity = severity;
        self
    }
}

impl DiagnosticInfo for ResourceLimitDiagnostic<'_> {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::ResourceLimit
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        write!(out, "{} limit", self.resource_name)?;
        if self.resource_limit != 0 {
            write!(out, " of {}", self.resource_limit)?;
        }
        write!(
            out,
            " exceeded ({}) in {}",
            self.resource_size,
            self.func.name()
        )
    }
}

impl WithLocation for ResourceLimitDiagnostic<'_> {
    fn function(&self) -> &Function {
        self.func
    }

    fn location(&self) -> &DiagnosticLocation {
        &self.loc
    }
}

/// 调试元数据版本不匹配（被忽略时发出）
#[derive(Debug, Clone)]
pub struct DebugMetadataVersionDiagnostic<'ir> {
    module: &'ir IrModule,
    metadata_version: u32,
}

impl<'ir> DebugMetadataVersionDiagnostic<'ir> {
    pub fn new(
        module: &'ir IrModule,
        metadata_version: u32,
    ) -> Self {
        Self {
            module,
            metadata_version,
        }
    }
}

impl DiagnosticInfo for DebugMetadataVersionDiagnostic<'_> {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::DebugMetadataVersion
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        write!(
            out,
            "ignoring debug info with an invalid version ({}) in {}",
            self.metadata_version,
            self.module.identifier()
        )
    }
}

/// 无效调试信息被丢弃
#[derive(Debug, Clone)]
pub struct InvalidDebugInfoDiagnostic<'ir> {
    module: &'ir IrModule,
}

impl<'ir> InvalidDebugInfoDiagnostic<'ir> {
    pub fn new(module: &'ir IrModule) -> Self {
        Self { module }
    }
}

impl DiagnosticInfo for InvalidDebugInfoDiagnostic<'_> {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::IgnoringInvalidDebugMetadata
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        write!(
            out,
            "ignoring invalid debug info in {}",
            self.module.identifier()
        )
    }
}

/// 采样档案相关消息
#[derive(Debug, Clone)]
pub struct SampleProfileDiagnostic {
    severity: Severity,
    file_name: Option<String>,
    line: u32,
    msg: String,
}

impl SampleProfileDiagnostic {
    pub fn new(
        file_name: Option<String>,
        line: u32,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            file_name,
            line,
            msg: msg.into(),
        }
    }

    pub fn with_severity(
        mut self,
        severity: Severity,
    ) -> Self {
        self.severity = severity;
        self
    }
}

impl DiagnosticInfo for SampleProfileDiagnostic {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::SampleProfile
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        if let Some(file) = &self.file_name {
            write!(out, "{}", file)?;
            if self.line > 0 {
                write!(out, ":{}", self.line)?;
            }
            write!(out, ": ")?;
        }
        write!(out, "{}", self.msg)
    }
}

/// PGO 档案相关消息
#[derive(Debug, Clone)]
pub struct PgoProfileDiagnostic {
    severity: Severity,
    file_name: Option<String>,
    msg: String,
}

impl PgoProfileDiagnostic {
    pub fn new(
        file_name: Option<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            file_name,
            msg: msg.into(),
        }
    }

    pub fn with_severity(
        mut self,
        severity: Severity,
    ) -> Self {
        self.severity = severity;
        self
    }
}

impl DiagnosticInfo for PgoProfileDiagnostic {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::PgoProfile
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        if let Some(file) = &self.file_name {
            write!(out, "{}: ", file)?;
        }
        write!(out, "{}", self.msg)
    }
}

/// 目标不支持的构造
#[derive(Debug, Clone)]
pub struct UnsupportedDiagnostic<'ir> {
    func: &'ir Function,
    loc: DiagnosticLocation,
    msg: String,
}

impl<'ir> UnsupportedDiagnostic<'ir> {
    pub fn new(
        func: &'ir Function,
        msg: impl Into<String>,
        loc: DiagnosticLocation,
    ) -> Self {
        Self {
            func,
            loc,
            msg: msg.into(),
        }
    }
}

impl DiagnosticInfo for UnsupportedDiagnostic<'_> {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::Unsupported
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        writeln!(
            out,
            "{}: in function {} {}: {}",
            self.location_str(),
            self.func.name(),
            self.func.fn_type(),
            self.msg
        )
    }
}

impl WithLocation for UnsupportedDiagnostic<'_> {
    fn function(&self) -> &Function {
        self.func
    }

    fn location(&self) -> &DiagnosticLocation {
        &self.loc
    }
}

/// 指令选择走了回退路径
#[derive(Debug, Clone)]
pub struct IselFallbackDiagnostic<'ir> {
    func: &'ir Function,
}

impl<'ir> IselFallbackDiagnostic<'ir> {
    pub fn new(func: &'ir Function) -> Self {
        Self { func }
    }
}

impl DiagnosticInfo for IselFallbackDiagnostic<'_> {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::IselFallback
    }

    fn severity(&self) -> Severity {
        Severity::Remark
    }

    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        write!(
            out,
            "Instruction selection used fallback path for {}",
            self.func.name()
        )
    }
}

/// 分支预期标注与档案数据不符
#[derive(Debug, Clone)]
pub struct MisExpectDiagnostic<'ir> {
    func: &'ir Function,
    loc: DiagnosticLocation,
    msg: String,
}

impl<'ir> MisExpectDiagnostic<'ir> {
    /// 位置取指令自身的调试位置
    pub fn on_instruction(
        func: &'ir Function,
        inst: &Instruction,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            func,
            loc: DiagnosticLocation::from_debug_loc(inst.debug_loc()),
            msg: msg.into(),
        }
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl DiagnosticInfo for MisExpectDiagnostic<'_> {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::MisExpect
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        write!(out, "{}: {}", self.location_str(), self.msg)
    }
}

impl WithLocation for MisExpectDiagnostic<'_> {
    fn function(&self) -> &Function {
        self.func
    }

    fn location(&self) -> &DiagnosticLocation {
        &self.loc
    }
}

/// 源码管理器风格的子诊断（文件/行/列 + 级别 + 消息）
#[derive(Debug, Clone)]
pub struct SmDiagnostic {
    pub filename: String,
    pub line: u32,
    pub column: u32,
    pub severity: Severity,
    pub message: String,
}

impl SmDiagnostic {
    pub fn new(
        filename: impl Into<String>,
        line: u32,
        column: u32,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
            severity,
            message: message.into(),
        }
    }

    pub fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        if !self.filename.is_empty() {
            write!(out, "{}:{}:{}: ", self.filename, self.line, self.column)?;
        }
        write!(out, "{}: {}", self.severity, self.message)
    }
}

/// MIR 解析诊断：逐字代理内嵌子诊断的 `print`
#[derive(Debug, Clone)]
pub struct MirParserDiagnostic {
    diag: SmDiagnostic,
}

impl MirParserDiagnostic {
    pub fn new(diag: SmDiagnostic) -> Self {
        Self { diag }
    }
}

impl DiagnosticInfo for MirParserDiagnostic {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::MirParser
    }

    fn severity(&self) -> Severity {
        self.diag.severity
    }

    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        self.diag.print(out)
    }
}
