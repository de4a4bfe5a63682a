//! 文本诊断渲染器

use crate::diagnostic::{DiagnosticInfo, Severity};

/// 渲染器配置
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// 是否启用颜色输出
    pub use_colors: bool,
    /// 是否显示级别前缀
    pub show_severity: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_severity: true,
        }
    }
}

/// 文本诊断渲染器
///
/// 输出形如 `"warning: isr.yg:20:0: in function isr_entry: ..."`，
/// 消息正文来自记录自身的 `print`。
#[derive(Debug, Clone, Default)]
pub struct TextEmitter {
    config: EmitterConfig,
}

impl TextEmitter {
    /// 创建新的文本渲染器
    pub fn new() -> Self {
        Self {
            config: EmitterConfig::default(),
        }
    }

    /// 使用自定义配置创建渲染器
    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// 渲染单条诊断
    pub fn render(
        &self,
        diag: &dyn DiagnosticInfo,
    ) -> String {
        let body = diag.print_to_string();
        if !self.config.show_severity {
            return body;
        }
        let severity = diag.severity().to_string();
        format!("{}: {}", self.color(diag.severity(), &severity), body)
    }

    /// 简单的颜色渲染
    fn color(
        &self,
        severity: Severity,
        text: &str,
    ) -> String {
        if !self.config.use_colors {
            return text.to_string();
        }

        match severity {
            Severity::Error => format!("\x1b[31m{}\x1b[0m", text),
            Severity::Warning => format!("\x1b[33m{}\x1b[0m", text),
            Severity::Remark => format!("\x1b[34m{}\x1b[0m", text),
            Severity::Note => format!("\x1b[36m{}\x1b[0m", text),
        }
    }
}
