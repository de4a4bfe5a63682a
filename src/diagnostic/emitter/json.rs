//! JSON 诊断渲染器
//!
//! 面向工具消费的结构化输出。备注记录保留全部结构化字段
//! （pass、备注名、参数表、hotness）；其余诊断输出级别加正文。

use serde::Serialize;

use crate::diagnostic::location::DiagnosticLocation;
use crate::diagnostic::remark::{OptimizationRemark, RemarkKind};
use crate::diagnostic::DiagnosticInfo;

/// 序列化用的位置
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl JsonLocation {
    fn from_location(loc: &DiagnosticLocation) -> Option<Self> {
        loc.is_available().then(|| Self {
            file: loc.relative_path().to_string(),
            line: loc.line(),
            column: loc.column(),
        })
    }
}

/// 序列化用的键值参数
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonArgument {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<JsonLocation>,
}

/// 一条备注的结构化形态
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonRemark {
    pub kind: &'static str,
    pub pass: String,
    pub name: String,
    pub function: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<JsonLocation>,
    pub args: Vec<JsonArgument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotness: Option<u64>,
    pub verbose: bool,
}

/// 通用诊断的退化形态：级别 + 渲染正文
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDiagnostic {
    pub severity: String,
    pub message: String,
}

/// JSON 诊断渲染器
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    fn remark_kind_name(kind: RemarkKind) -> &'static str {
        match kind {
            RemarkKind::Passed => "Passed",
            RemarkKind::Missed => "Missed",
            RemarkKind::Analysis => "Analysis",
            RemarkKind::Failure => "Failure",
        }
    }

    /// 渲染备注的结构化 JSON
    pub fn render_remark(remark: &OptimizationRemark<'_>) -> String {
        use crate::diagnostic::WithLocation;

        let record = JsonRemark {
            kind: Self::remark_kind_name(remark.remark_kind()),
            pass: remark.pass_name().to_string(),
            name: remark.remark_name().to_string(),
            function: remark.function().name().to_string(),
            location: JsonLocation::from_location(remark.location()),
            args: remark
                .args()
                .iter()
                .map(|arg| JsonArgument {
                    key: arg.key.clone(),
                    value: arg.value.clone(),
                    location: arg.loc.as_ref().and_then(JsonLocation::from_location),
                })
                .collect(),
            hotness: remark.hotness(),
            verbose: remark.is_verbose(),
        };
        // JsonRemark 全部字段可序列化，to_string 不会失败
        serde_json::to_string(&record).unwrap_or_default()
    }

    /// 渲染任意诊断的退化 JSON
    pub fn render(diag: &dyn DiagnosticInfo) -> String {
        let record = JsonDiagnostic {
            severity: diag.severity().to_string(),
            message: diag.print_to_string(),
        };
        serde_json::to_string(&record).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::info::IselFallbackDiagnostic;
    use crate::ir::{DiFile, Function, FunctionType, Subprogram, Type};
    use std::sync::Arc;

    fn hot_function() -> Function {
        let file = Arc::new(DiFile::new("hot.yg", "/src"));
        Function::new("hot_loop", FunctionType::new(Type::Void, vec![]))
            .with_subprogram(Subprogram::new(file, 5))
    }

    #[test]
    fn test_remark_json_shape() {
        let func = hot_function();
        let remark = OptimizationRemark::on_function("inliner", "Inlined", &func)
            .insert("inlined ")
            .arg("Callee", &func)
            .with_hotness(Some(64));
        let json: serde_json::Value =
            serde_json::from_str(&JsonEmitter::render_remark(&remark)).unwrap();
        assert_eq!(json["kind"], "Passed");
        assert_eq!(json["pass"], "inliner");
        assert_eq!(json["name"], "Inlined");
        assert_eq!(json["function"], "hot_loop");
        assert_eq!(json["location"]["file"], "hot.yg");
        assert_eq!(json["location"]["line"], 5);
        assert_eq!(json["hotness"], 64);
        assert_eq!(json["args"][0]["key"], "String");
        assert_eq!(json["args"][1]["key"], "Callee");
        assert_eq!(json["args"][1]["value"], "hot_loop");
    }

    #[test]
    fn test_remark_json_omits_unavailable_location() {
        let func = Function::new("f", FunctionType::new(Type::Void, vec![]));
        let remark = OptimizationRemark::on_function("inliner", "Inlined", &func);
        let json: serde_json::Value =
            serde_json::from_str(&JsonEmitter::render_remark(&remark)).unwrap();
        assert!(json.get("location").is_none());
        assert!(json.get("hotness").is_none());
    }

    #[test]
    fn test_generic_diagnostic_json() {
        let func = hot_function();
        let diag = IselFallbackDiagnostic::new(&func);
        let json: serde_json::Value = serde_json::from_str(&JsonEmitter::render(&diag)).unwrap();
        assert_eq!(json["severity"], "remark");
        assert_eq!(
            json["message"],
            "Instruction selection used fallback path for hot_loop"
        );
    }
}
