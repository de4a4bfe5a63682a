//! YaoGuang Compiler Backend Diagnostics
//!
//! IR 层的诊断模型：后端 Pass 产生的类型化诊断记录（错误、警告、
//! 优化备注、barebonecc 调用约定违规），每条携带结构化上下文并能
//! 渲染为面向人的文本。
//!
//! # Example
//!
//! ```
//! use yaoguang::diagnostic::{OptimizationRemark, RemarkFilter, TextEmitter, EmitterConfig};
//! use yaoguang::ir::{Function, FunctionType, Type};
//!
//! let func = Function::new("hot_loop", FunctionType::new(Type::Void, vec![]));
//! let remark = OptimizationRemark::on_function("inliner", "Inlined", &func)
//!     .insert("inlined callee into ")
//!     .arg("Caller", &func);
//!
//! let filter = RemarkFilter::new().with_passed_pattern("inlin.*").unwrap();
//! if remark.is_enabled(&filter) {
//!     let emitter = TextEmitter::with_config(EmitterConfig {
//!         use_colors: false,
//!         show_severity: true,
//!     });
//!     println!("{}", emitter.render(&remark));
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/yaoguang")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod diagnostic;
pub mod ir;

// Utility modules
pub mod util;

// Re-exports
pub use diagnostic::{
    next_available_plugin_kind, DiagnosticHandler, DiagnosticInfo, DiagnosticKind,
    DiagnosticLocation, OptimizationRemark, RemarkFilter, RemarkKind, Severity, WithLocation,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project name
pub const NAME: &str = "YaoGuang (瑶光)";
