//! 诊断渲染
//!
//! 诊断记录自身只负责 `print` 出消息正文；本模块提供输出侧的
//! 两种包装：带级别前缀的文本渲染和面向工具的 JSON 渲染，以及
//! 把诊断转发给 tracing 的桥接。

pub mod json;
pub mod text;

pub use json::JsonEmitter;
pub use text::{EmitterConfig, TextEmitter};

use crate::diagnostic::{DiagnosticInfo, Severity};

/// 把一条诊断按其严重级别转发给 tracing
pub fn log_diagnostic(diag: &dyn DiagnosticInfo) {
    let text = diag.print_to_string();
    match diag.severity() {
        Severity::Error => tracing::error!("{}", text),
        Severity::Warning => tracing::warn!("{}", text),
        Severity::Remark => tracing::info!("{}", text),
        Severity::Note => tracing::debug!("{}", text),
    }
}
