//! 统一后端诊断模型
//!
//! 编译器 Pass 产生的类型化诊断记录：错误、警告、优化备注和
//! 调用约定违规。每条记录携带结构化上下文（源位置、相关函数/
//! 指令/类型、严重级别、键值参数），并能把自己渲染为面向人的文本。
//!
//! # 模块结构
//!
//! - [`location`] - 源位置解析 (DiagnosticLocation)
//! - [`argument`] - 参数捕获 (Argument, ArgValue)
//! - [`remark`] - 优化备注族 (OptimizationRemark)
//! - [`info`] - 固定形态诊断 (inline-asm, resource-limit, ...)
//! - [`barebone`] - barebonecc 调用约定诊断族
//! - [`filter`] - 备注启用查询接口与正则过滤器
//! - [`emitter`] - 文本 / JSON 渲染
//!
//! # 控制流
//!
//! Pass 构造诊断值，（对备注）先查询 [`remark::OptimizationRemark::is_enabled`]，
//! 再交给分发方；分发方接受后调用 [`DiagnosticInfo::print`] 写入输出槽。
//! 诊断在产生它的 Pass 返回前被同步消费，从不保留。

pub mod argument;
pub mod barebone;
pub mod emitter;
pub mod filter;
pub mod info;
pub mod location;
pub mod remark;

pub use argument::{ArgValue, Argument};
pub use barebone::{BareboneCcDiagnostic, BareboneCcKind};
pub use emitter::{EmitterConfig, JsonEmitter, TextEmitter};
pub use filter::{DiagnosticHandler, FilterError, RemarkFilter};
pub use info::{
    DebugMetadataVersionDiagnostic, InlineAsmDiagnostic, InvalidDebugInfoDiagnostic,
    IselFallbackDiagnostic, MirParserDiagnostic, MisExpectDiagnostic, PgoProfileDiagnostic,
    ResourceLimitDiagnostic, SampleProfileDiagnostic, SmDiagnostic, UnsupportedDiagnostic,
};
pub use location::DiagnosticLocation;
pub use remark::{OptimizationRemark, RemarkKind, SetExtraArgs, SetIsVerbose};

use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::ir::Function;

/// 诊断严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Note,
    Remark,
    Warning,
    Error,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Remark => write!(f, "remark"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// 诊断种类标签
///
/// 构造时设定一次，是下游消费者恢复具体形态的唯一分发键。
/// `Plugin` 尾部留给进程内扩展通过 [`next_available_plugin_kind`]
/// 铸造不冲突的新标签。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    InlineAsm,
    ResourceLimit,
    DebugMetadataVersion,
    IgnoringInvalidDebugMetadata,
    SampleProfile,
    PgoProfile,
    OptimizationRemark,
    OptimizationRemarkMissed,
    OptimizationRemarkAnalysis,
    OptimizationFailure,
    MirParser,
    IselFallback,
    MisExpect,
    Unsupported,
    BareboneCc,
    Plugin(i32),
}

/// 内建种类占用的编号上界；插件编号从这里往上分配
pub const FIRST_PLUGIN_KIND: i32 = 1000;

static PLUGIN_KIND_ID: AtomicI32 = AtomicI32::new(FIRST_PLUGIN_KIND);

/// Mint a fresh plugin diagnostic kind id (process-wide, thread-safe)
pub fn next_available_plugin_kind() -> i32 {
    PLUGIN_KIND_ID.fetch_add(1, Ordering::Relaxed) + 1
}

/// 诊断记录的公共契约：种类标签、严重级别和多态 `print`
///
/// `print` 只借用输出槽到调用结束；渲染文本是本子系统唯一的
/// 可观测产物。
pub trait DiagnosticInfo {
    fn kind(&self) -> DiagnosticKind;

    fn severity(&self) -> Severity;

    /// Render the human-facing message into `out`
    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result;

    /// Convenience wrapper rendering into a fresh `String`
    fn print_to_string(&self) -> String {
        let mut s = String::new();
        // String 上的 fmt::Write 不会失败
        let _ = self.print(&mut s);
        s
    }
}

/// 带位置诊断的公共部分：所属函数 + 源位置
pub trait WithLocation: DiagnosticInfo {
    fn function(&self) -> &Function;

    fn location(&self) -> &DiagnosticLocation;

    fn is_location_available(&self) -> bool {
        self.location().is_available()
    }

    /// `"<relativePath>:<line>:<column>"`, `"<unknown>:0:0"` when absent
    fn location_str(&self) -> String {
        self.location().location_str()
    }
}
