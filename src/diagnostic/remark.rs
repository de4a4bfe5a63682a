//! 优化备注族
//!
//! Passed / Missed / Analysis / Failure 四类备注共享同一记录形态：
//! pass 名、备注名、有序参数表、verbose 标志与 extra-args 分割点。
//! 是否发射由 [`DiagnosticHandler`] 按 pass 名门控。

use std::fmt;

use smallvec::SmallVec;

use crate::diagnostic::argument::Argument;
use crate::diagnostic::filter::DiagnosticHandler;
use crate::diagnostic::location::DiagnosticLocation;
use crate::diagnostic::{DiagnosticInfo, DiagnosticKind, Severity, WithLocation};
use crate::ir::{BasicBlock, Function, Instruction};

/// 备注类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemarkKind {
    /// 转换已应用
    Passed,
    /// 转换本可应用但被放弃
    Missed,
    /// 面向用户的分析结论
    Analysis,
    /// 转换尝试后失败
    Failure,
}

/// 备注锚定的 IR 构造
#[derive(Debug, Clone, Copy)]
pub enum CodeRegion<'ir> {
    Block(&'ir BasicBlock),
    Instruction(&'ir Instruction),
}

/// 插入后把备注标记为 verbose 的标记类型
#[derive(Debug, Clone, Copy)]
pub struct SetIsVerbose;

/// 把当前参数个数记为 extra-args 分割点的标记类型
///
/// 后插入的参数不进入 `msg()`；重复插入以最后一次为准。
#[derive(Debug, Clone, Copy)]
pub struct SetExtraArgs;

/// `insert` 可接受的条目
pub trait RemarkEntry {
    fn insert_into(
        self,
        remark: &mut RemarkState,
    );
}

impl RemarkEntry for &str {
    fn insert_into(
        self,
        remark: &mut RemarkState,
    ) {
        remark.args.push(Argument {
            key: "String".to_string(),
            value: self.to_string(),
            loc: None,
        });
    }
}

impl RemarkEntry for String {
    fn insert_into(
        self,
        remark: &mut RemarkState,
    ) {
        remark.args.push(Argument {
            key: "String".to_string(),
            value: self,
            loc: None,
        });
    }
}

impl RemarkEntry for Argument {
    fn insert_into(
        self,
        remark: &mut RemarkState,
    ) {
        remark.args.push(self);
    }
}

impl RemarkEntry for SetIsVerbose {
    fn insert_into(
        self,
        remark: &mut RemarkState,
    ) {
        remark.is_verbose = true;
    }
}

impl RemarkEntry for SetExtraArgs {
    fn insert_into(
        self,
        remark: &mut RemarkState,
    ) {
        remark.first_extra_arg_index = Some(remark.args.len());
    }
}

/// `insert` 作用的可变部分，与借用 IR 的字段分离
#[derive(Debug, Clone, Default)]
pub struct RemarkState {
    args: SmallVec<[Argument; 4]>,
    is_verbose: bool,
    first_extra_arg_index: Option<usize>,
}

/// 一条优化备注
#[derive(Debug, Clone)]
pub struct OptimizationRemark<'ir> {
    kind: RemarkKind,
    severity: Severity,
    pass_name: String,
    remark_name: String,
    func: &'ir Function,
    loc: DiagnosticLocation,
    code_region: Option<CodeRegion<'ir>>,
    hotness: Option<u64>,
    state: RemarkState,
}

impl<'ir> OptimizationRemark<'ir> {
    /// Analysis 备注的哨兵 pass 名：无条件发射
    pub const ALWAYS_PRINT: &'static str = "";

    fn default_severity(kind: RemarkKind) -> Severity {
        match kind {
            RemarkKind::Failure => Severity::Warning,
            _ => Severity::Remark,
        }
    }

    /// 显式位置 + 代码区域构造
    pub fn new(
        kind: RemarkKind,
        pass_name: impl Into<String>,
        remark_name: impl Into<String>,
        func: &'ir Function,
        loc: DiagnosticLocation,
        code_region: Option<CodeRegion<'ir>>,
    ) -> Self {
        Self {
            kind,
            severity: Self::default_severity(kind),
            pass_name: pass_name.into(),
            remark_name: remark_name.into(),
            func,
            loc,
            code_region,
            hotness: None,
            state: RemarkState::default(),
        }
    }

    /// 从单条指令构造：位置取指令自身的调试位置
    ///
    /// IR 模型没有子到父的指针，所属函数由调用方显式给出。
    pub fn on_instruction(
        kind: RemarkKind,
        pass_name: impl Into<String>,
        remark_name: impl Into<String>,
        func: &'ir Function,
        inst: &'ir Instruction,
    ) -> Self {
        Self::new(
            kind,
            pass_name,
            remark_name,
            func,
            DiagnosticLocation::from_debug_loc(inst.debug_loc()),
            Some(CodeRegion::Instruction(inst)),
        )
    }

    /// 对整个函数的 Passed 备注：位置取 subprogram，区域取首个基本块
    pub fn on_function(
        pass_name: impl Into<String>,
        remark_name: impl Into<String>,
        func: &'ir Function,
    ) -> Self {
        Self::new(
            RemarkKind::Passed,
            pass_name,
            remark_name,
            func,
            DiagnosticLocation::from_subprogram(func.subprogram()),
            func.entry_block().map(CodeRegion::Block),
        )
    }

    /// 流式插入：字符串、预构建参数或标记
    pub fn insert(
        mut self,
        entry: impl RemarkEntry,
    ) -> Self {
        entry.insert_into(&mut self.state);
        self
    }

    /// 捕获一个键值参数（[`Argument::new`] 的便捷入口）
    pub fn arg<'a>(
        self,
        key: impl Into<String>,
        value: impl Into<crate::diagnostic::argument::ArgValue<'a>>,
    ) -> Self {
        self.insert(Argument::new(key, value))
    }

    pub fn with_hotness(
        mut self,
        hotness: Option<u64>,
    ) -> Self {
        self.hotness = hotness;
        self
    }

    pub fn remark_kind(&self) -> RemarkKind {
        self.kind
    }

    pub fn pass_name(&self) -> &str {
        &self.pass_name
    }

    pub fn remark_name(&self) -> &str {
        &self.remark_name
    }

    pub fn code_region(&self) -> Option<&CodeRegion<'ir>> {
        self.code_region.as_ref()
    }

    pub fn hotness(&self) -> Option<u64> {
        self.hotness
    }

    pub fn is_verbose(&self) -> bool {
        self.state.is_verbose
    }

    pub fn args(&self) -> &[Argument] {
        &self.state.args
    }

    /// Analysis 备注的无条件发射哨兵
    pub fn should_always_print(&self) -> bool {
        self.kind == RemarkKind::Analysis && self.pass_name == Self::ALWAYS_PRINT
    }

    /// 发射前的门控：按备注类别咨询处理器注册表
    ///
    /// Failure 忽略 pass 过滤器，仅当级别为 Warning 时启用。
    pub fn is_enabled(
        &self,
        handler: &dyn DiagnosticHandler,
    ) -> bool {
        match self.kind {
            RemarkKind::Passed => handler.is_passed_opt_remark_enabled(&self.pass_name),
            RemarkKind::Missed => handler.is_missed_opt_remark_enabled(&self.pass_name),
            RemarkKind::Analysis => {
                handler.is_analysis_remark_enabled(&self.pass_name) || self.should_always_print()
            }
            RemarkKind::Failure => self.severity == Severity::Warning,
        }
    }

    /// 拼接分割点之前所有参数的文本值
    pub fn msg(&self) -> String {
        let end = self
            .state
            .first_extra_arg_index
            .unwrap_or(self.state.args.len());
        let mut s = String::new();
        for arg in &self.state.args[..end] {
            s.push_str(&arg.value);
        }
        s
    }
}

impl DiagnosticInfo for OptimizationRemark<'_> {
    fn kind(&self) -> DiagnosticKind {
        match self.kind {
            RemarkKind::Passed => DiagnosticKind::OptimizationRemark,
            RemarkKind::Missed => DiagnosticKind::OptimizationRemarkMissed,
            RemarkKind::Analysis => DiagnosticKind::OptimizationRemarkAnalysis,
            RemarkKind::Failure => DiagnosticKind::OptimizationFailure,
        }
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        write!(out, "{}: {}", self.location_str(), self.msg())?;
        if let Some(hotness) = self.hotness {
            write!(out, " (hotness: {})", hotness)?;
        }
        Ok(())
    }
}

impl WithLocation for OptimizationRemark<'_> {
    fn function(&self) -> &Function {
        self.func
    }

    fn location(&self) -> &DiagnosticLocation {
        &self.loc
    }
}
