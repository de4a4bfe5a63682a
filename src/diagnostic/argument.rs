//! 诊断参数捕获
//!
//! 把异构输入（函数、指令、值、类型、数字、字符串、调试位置）统一
//! 转换为 (key, 文本值, 可选源位置) 三元组。转换从不失败：缺失或
//! 无效的输入退化为空串或占位文本。

use std::borrow::Cow;

use crate::diagnostic::location::DiagnosticLocation;
use crate::ir::{Constant, DebugLoc, Function, Instruction, Type, Value};

/// Strip the private-symbol mangling escape from a value name
///
/// 名称以 `\x01` 开头表示该符号不参与重整，展示时去掉前缀。
fn drop_mangling_escape(name: &str) -> &str {
    name.strip_prefix('\u{1}').unwrap_or(name)
}

/// A captured input, one variant per accepted semantic type
#[derive(Debug, Clone)]
pub enum ArgValue<'ir> {
    Function(&'ir Function),
    Instruction(&'ir Instruction),
    Value(&'ir Value),
    Type(&'ir Type),
    Str(Cow<'ir, str>),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    DebugLoc(DebugLoc),
}

impl<'ir> From<&'ir Function> for ArgValue<'ir> {
    fn from(f: &'ir Function) -> Self {
        ArgValue::Function(f)
    }
}

impl<'ir> From<&'ir Instruction> for ArgValue<'ir> {
    fn from(i: &'ir Instruction) -> Self {
        ArgValue::Instruction(i)
    }
}

impl<'ir> From<&'ir Value> for ArgValue<'ir> {
    fn from(v: &'ir Value) -> Self {
        ArgValue::Value(v)
    }
}

impl<'ir> From<&'ir Type> for ArgValue<'ir> {
    fn from(t: &'ir Type) -> Self {
        ArgValue::Type(t)
    }
}

impl<'ir> From<&'ir str> for ArgValue<'ir> {
    fn from(s: &'ir str) -> Self {
        ArgValue::Str(Cow::Borrowed(s))
    }
}

impl From<String> for ArgValue<'_> {
    fn from(s: String) -> Self {
        ArgValue::Str(Cow::Owned(s))
    }
}

impl From<i32> for ArgValue<'_> {
    fn from(n: i32) -> Self {
        ArgValue::I32(n)
    }
}

impl From<i64> for ArgValue<'_> {
    fn from(n: i64) -> Self {
        ArgValue::I64(n)
    }
}

impl From<u32> for ArgValue<'_> {
    fn from(n: u32) -> Self {
        ArgValue::U32(n)
    }
}

impl From<u64> for ArgValue<'_> {
    fn from(n: u64) -> Self {
        ArgValue::U64(n)
    }
}

impl From<f32> for ArgValue<'_> {
    fn from(n: f32) -> Self {
        ArgValue::F32(n)
    }
}

impl From<DebugLoc> for ArgValue<'_> {
    fn from(loc: DebugLoc) -> Self {
        ArgValue::DebugLoc(loc)
    }
}

/// Rendered key/value pair attached to a remark
///
/// 构造后不可变。
#[derive(Debug, Clone)]
pub struct Argument {
    pub key: String,
    pub value: String,
    pub loc: Option<DiagnosticLocation>,
}

impl Argument {
    /// Capture a value under `key`, applying the per-kind extraction rules
    pub fn new<'ir>(
        key: impl Into<String>,
        value: impl Into<ArgValue<'ir>>,
    ) -> Self {
        let key = key.into();
        match value.into() {
            ArgValue::Function(f) => {
                let loc = f
                    .subprogram()
                    .map(|sp| DiagnosticLocation::from_subprogram(Some(sp)));
                Self {
                    key,
                    value: drop_mangling_escape(f.name()).to_string(),
                    loc,
                }
            }
            ArgValue::Instruction(inst) => {
                let loc = inst
                    .debug_loc()
                    .is_valid()
                    .then(|| DiagnosticLocation::from_debug_loc(inst.debug_loc()));
                Self {
                    key,
                    value: inst.opcode().name().to_string(),
                    loc,
                }
            }
            ArgValue::Value(v) => {
                let value = match v {
                    Value::Argument { name } | Value::Global { name } => {
                        drop_mangling_escape(name).to_string()
                    }
                    Value::Constant(c) => c.to_string(),
                };
                Self {
                    key,
                    value,
                    loc: None,
                }
            }
            ArgValue::Type(t) => Self {
                key,
                value: t.to_string(),
                loc: None,
            },
            ArgValue::Str(s) => Self {
                key,
                value: s.into_owned(),
                loc: None,
            },
            ArgValue::I32(n) => Self {
                key,
                value: n.to_string(),
                loc: None,
            },
            ArgValue::I64(n) => Self {
                key,
                value: n.to_string(),
                loc: None,
            },
            ArgValue::U32(n) => Self {
                key,
                value: n.to_string(),
                loc: None,
            },
            ArgValue::U64(n) => Self {
                key,
                value: n.to_string(),
                loc: None,
            },
            ArgValue::F32(n) => Self {
                key,
                value: n.to_string(),
                loc: None,
            },
            ArgValue::DebugLoc(dl) => {
                let loc = DiagnosticLocation::from_debug_loc(&dl);
                let value = match dl.get() {
                    Some(resolved) => format!(
                        "{}:{}:{}",
                        resolved.file().filename(),
                        resolved.line(),
                        resolved.column()
                    ),
                    None => "<UNKNOWN LOCATION>".to_string(),
                };
                Self {
                    key,
                    value,
                    loc: Some(loc),
                }
            }
        }
    }

    /// Capture a constant under `key` (bare operand form, no type prefix)
    pub fn from_constant(
        key: impl Into<String>,
        c: &Constant,
    ) -> Self {
        Self {
            key: key.into(),
            value: c.to_string(),
            loc: None,
        }
    }

    /// Plain message fragment with an empty key
    pub fn text(s: impl Into<String>) -> Self {
        Self {
            key: String::new(),
            value: s.into(),
            loc: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Callee, DiFile, FunctionType, Opcode, Subprogram};
    use std::sync::Arc;

    fn file() -> Arc<DiFile> {
        Arc::new(DiFile::new("m.yg", "/src"))
    }

    #[test]
    fn test_function_argument_uses_subprogram_location() {
        let func = Function::new("\u{1}hidden", FunctionType::new(Type::Void, vec![]))
            .with_subprogram(Subprogram::new(file(), 10));
        let arg = Argument::new("Callee", &func);
        assert_eq!(arg.value, "hidden");
        let loc = arg.loc.unwrap();
        assert_eq!(loc.line(), 10);
        assert_eq!(loc.column(), 0);
    }

    #[test]
    fn test_function_argument_without_subprogram_has_no_location() {
        let func = Function::new("f", FunctionType::new(Type::Void, vec![]));
        let arg = Argument::new("Callee", &func);
        assert_eq!(arg.value, "f");
        assert!(arg.loc.is_none());
    }

    #[test]
    fn test_instruction_argument_renders_opcode() {
        let inst = Instruction::new(Opcode::Load).with_debug_loc(DebugLoc::new(file(), 4, 2));
        let arg = Argument::new("Inst", &inst);
        assert_eq!(arg.value, "load");
        assert_eq!(arg.loc.unwrap().location_str(), "m.yg:4:2");
    }

    #[test]
    fn test_call_instruction_argument_renders_opcode() {
        let inst = Instruction::call(Callee::Direct("callee".into()));
        let arg = Argument::new("Inst", &inst);
        assert_eq!(arg.value, "call");
        assert!(arg.loc.is_none());
    }

    #[test]
    fn test_named_value_argument() {
        let v = Value::Global {
            name: "\u{1}__table".into(),
        };
        let arg = Argument::new("Global", &v);
        assert_eq!(arg.value, "__table");
        assert!(arg.loc.is_none());
    }

    #[test]
    fn test_constant_argument_has_no_type_prefix() {
        let v = Value::Constant(Constant::Int(42));
        assert_eq!(Argument::new("N", &v).value, "42");
        assert_eq!(Argument::from_constant("B", &Constant::Bool(true)).value, "true");
        assert_eq!(Argument::from_constant("P", &Constant::Null).value, "null");
    }

    #[test]
    fn test_type_argument() {
        let t = Type::Int(64);
        assert_eq!(Argument::new("Type", &t).value, "i64");
    }

    #[test]
    fn test_numeric_arguments() {
        assert_eq!(Argument::new("A", -3i32).value, "-3");
        assert_eq!(Argument::new("B", -3i64).value, "-3");
        assert_eq!(Argument::new("C", 3u32).value, "3");
        assert_eq!(Argument::new("D", 3u64).value, "3");
        assert_eq!(Argument::new("E", 2.5f32).value, "2.5");
    }

    #[test]
    fn test_debug_loc_argument() {
        let arg = Argument::new("Loc", DebugLoc::new(file(), 9, 1));
        assert_eq!(arg.value, "m.yg:9:1");
        assert_eq!(arg.loc.unwrap().location_str(), "m.yg:9:1");

        let arg = Argument::new("Loc", DebugLoc::unknown());
        assert_eq!(arg.value, "<UNKNOWN LOCATION>");
    }
}
