//! 备注启用查询接口
//!
//! 诊断分发方按 pass 名回答"这类备注要不要发射"。本模块给出查询
//! trait 和一个正则过滤器实现（对应命令行上的 pass 过滤选项）。

use regex::Regex;
use thiserror::Error;

/// 处理器注册表的查询面
///
/// 默认全部关闭；分发方按配置覆写。
pub trait DiagnosticHandler {
    /// Passed 备注是否对该 pass 启用
    fn is_passed_opt_remark_enabled(
        &self,
        _pass_name: &str,
    ) -> bool {
        false
    }

    /// Missed 备注是否对该 pass 启用
    fn is_missed_opt_remark_enabled(
        &self,
        _pass_name: &str,
    ) -> bool {
        false
    }

    /// Analysis 备注是否对该 pass 启用
    fn is_analysis_remark_enabled(
        &self,
        _pass_name: &str,
    ) -> bool {
        false
    }
}

/// 过滤器构造错误
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid remark pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// 基于正则的默认处理器实现
///
/// 每类备注各有一个可选的 pass 名模式；未配置的类别保持关闭。
#[derive(Debug, Default)]
pub struct RemarkFilter {
    passed: Option<Regex>,
    missed: Option<Regex>,
    analysis: Option<Regex>,
}

impl RemarkFilter {
    /// 不放行任何备注的过滤器
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_passed_pattern(
        mut self,
        pattern: &str,
    ) -> Result<Self, FilterError> {
        self.passed = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn with_missed_pattern(
        mut self,
        pattern: &str,
    ) -> Result<Self, FilterError> {
        self.missed = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn with_analysis_pattern(
        mut self,
        pattern: &str,
    ) -> Result<Self, FilterError> {
        self.analysis = Some(Regex::new(pattern)?);
        Ok(self)
    }

    fn matches(
        pattern: &Option<Regex>,
        pass_name: &str,
    ) -> bool {
        pattern.as_ref().is_some_and(|re| re.is_match(pass_name))
    }
}

impl DiagnosticHandler for RemarkFilter {
    fn is_passed_opt_remark_enabled(
        &self,
        pass_name: &str,
    ) -> bool {
        Self::matches(&self.passed, pass_name)
    }

    fn is_missed_opt_remark_enabled(
        &self,
        pass_name: &str,
    ) -> bool {
        Self::matches(&self.missed, pass_name)
    }

    fn is_analysis_remark_enabled(
        &self,
        pass_name: &str,
    ) -> bool {
        Self::matches(&self.analysis, pass_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_rejects_everything() {
        let filter = RemarkFilter::new();
        assert!(!filter.is_passed_opt_remark_enabled("inliner"));
        assert!(!filter.is_missed_opt_remark_enabled("inliner"));
        assert!(!filter.is_analysis_remark_enabled("inliner"));
    }

    #[test]
    fn test_pattern_matches_pass_name() {
        let filter = RemarkFilter::new()
            .with_passed_pattern("inlin.*")
            .unwrap()
            .with_missed_pattern("loop-vectorize|slp")
            .unwrap();
        assert!(filter.is_passed_opt_remark_enabled("inliner"));
        assert!(!filter.is_passed_opt_remark_enabled("unroll"));
        assert!(filter.is_missed_opt_remark_enabled("slp"));
        // 每类模式互相独立
        assert!(!filter.is_analysis_remark_enabled("inliner"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = RemarkFilter::new().with_passed_pattern("(").unwrap_err();
        assert!(matches!(err, FilterError::InvalidPattern(_)));
    }
}
