//! 诊断源位置
//!
//! 从调试位置句柄或 subprogram 节点解析出 (文件, 行, 列)。
//! 文件缺失时位置视为不可用，行列无意义。

use std::path::Path;
use std::sync::Arc;

use crate::ir::{DebugLoc, DiFile, Subprogram};

/// Source location carried by a diagnostic
///
/// 不可变；由持有它的诊断记录按值拥有。
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLocation {
    file: Option<Arc<DiFile>>,
    line: u32,
    column: u32,
}

impl DiagnosticLocation {
    /// The unavailable location
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Resolve from a debug-location handle
    ///
    /// 句柄无效时返回空位置。
    pub fn from_debug_loc(loc: &DebugLoc) -> Self {
        match loc.get() {
            Some(resolved) => Self {
                file: Some(Arc::clone(resolved.file())),
                line: resolved.line(),
                column: resolved.column(),
            },
            None => Self::unknown(),
        }
    }

    /// Resolve from a subprogram node: scope line, column forced to 0
    pub fn from_subprogram(sp: Option<&Subprogram>) -> Self {
        match sp {
            Some(sp) => Self {
                file: Some(Arc::clone(sp.file())),
                line: sp.scope_line(),
                column: 0,
            },
            None => Self::unknown(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.file.is_some()
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// File name as stored, without directory resolution
    pub fn relative_path(&self) -> &str {
        self.file.as_ref().map_or("", |f| f.filename())
    }

    /// Absolute path: the stored filename if already absolute, otherwise
    /// the stored directory joined with it, with leading "./" removed
    pub fn absolute_path(&self) -> String {
        let Some(file) = self.file.as_ref() else {
            return String::new();
        };
        let name = file.filename();
        if Path::new(name).is_absolute() {
            return name.to_string();
        }
        let mut joined = if file.directory().is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", file.directory(), name)
        };
        while let Some(rest) = joined.strip_prefix("./") {
            joined = rest.to_string();
        }
        joined
    }

    /// `"<relativePath>:<line>:<column>"`, or `"<unknown>:0:0"` when the
    /// location is unavailable
    pub fn location_str(&self) -> String {
        if self.is_available() {
            format!("{}:{}:{}", self.relative_path(), self.line, self.column)
        } else {
            "<unknown>:0:0".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::DebugLoc;

    fn file(
        name: &str,
        dir: &str,
    ) -> Arc<DiFile> {
        Arc::new(DiFile::new(name, dir))
    }

    #[test]
    fn test_unknown_location_str() {
        let loc = DiagnosticLocation::from_debug_loc(&DebugLoc::unknown());
        assert!(!loc.is_available());
        assert_eq!(loc.location_str(), "<unknown>:0:0");
    }

    #[test]
    fn test_location_from_debug_loc() {
        let loc = DiagnosticLocation::from_debug_loc(&DebugLoc::new(file("a.yg", "/src"), 7, 12));
        assert!(loc.is_available());
        assert_eq!(loc.location_str(), "a.yg:7:12");
    }

    #[test]
    fn test_location_from_subprogram_forces_column_zero() {
        let sp = Subprogram::new(file("b.yg", "/src"), 41);
        let loc = DiagnosticLocation::from_subprogram(Some(&sp));
        assert_eq!(loc.line(), 41);
        assert_eq!(loc.column(), 0);
        assert_eq!(loc.location_str(), "b.yg:41:0");
    }

    #[test]
    fn test_location_from_missing_subprogram() {
        let loc = DiagnosticLocation::from_subprogram(None);
        assert_eq!(loc.location_str(), "<unknown>:0:0");
    }

    #[test]
    fn test_absolute_path_passthrough() {
        let loc = DiagnosticLocation::from_debug_loc(&DebugLoc::new(
            file("/abs/path/a.yg", "/ignored"),
            1,
            1,
        ));
        assert_eq!(loc.absolute_path(), "/abs/path/a.yg");
    }

    #[test]
    fn test_absolute_path_joins_directory() {
        let loc =
            DiagnosticLocation::from_debug_loc(&DebugLoc::new(file("sub/a.yg", "/work"), 1, 1));
        assert_eq!(loc.absolute_path(), "/work/sub/a.yg");
    }

    #[test]
    fn test_absolute_path_strips_leading_dotslash() {
        let loc =
            DiagnosticLocation::from_debug_loc(&DebugLoc::new(file("././a.yg", "work"), 1, 1));
        assert_eq!(loc.absolute_path(), "work/././a.yg");

        let loc =
            DiagnosticLocation::from_debug_loc(&DebugLoc::new(file("a.yg", "./work"), 1, 1));
        assert_eq!(loc.absolute_path(), "work/a.yg");
    }
}
