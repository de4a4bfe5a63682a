//! barebonecc 调用约定诊断族
//!
//! barebonecc 是面向裸机入口的低层调用约定；本模块报告其校验
//! 规则的违规：硬件寄存器属性、帧指针、局部栈区大小、尾调用
//! 形态与跨约定调用。
//!
//! 记录只通过命名工厂构造，每个工厂恰好填充其子类各自需要的
//! 字段；payload 枚举按子类分支，渲染时穷尽匹配。

use std::fmt;

use crate::diagnostic::location::DiagnosticLocation;
use crate::diagnostic::{DiagnosticInfo, DiagnosticKind, Severity, WithLocation};
use crate::ir::{Align, Callee, Function, Instruction, Type};

/// 子类判别与各自的载荷
#[derive(Debug, Clone)]
pub enum BareboneCcKind<'ir> {
    /// 'hwreg' 属性请求的寄存器未知或无效
    HwRegInvalid {
        call: Option<&'ir Instruction>,
        raw_value: String,
    },
    /// 'hwreg' 属性请求的寄存器分配失败
    HwRegAllocFailure {
        call: Option<&'ir Instruction>,
        raw_value: String,
    },
    /// 参数需要多个寄存器承载，与 'hwreg' 不兼容
    MultipartArgUnsupported {
        call: Option<&'ir Instruction>,
        ty: &'ir Type,
    },
    /// 'no-clobber-hwreg' 属性里的寄存器未知
    NoClobberHwRegInvalid { raw_value: String },
    /// 不允许使用帧指针
    FramePointerNotAllowed,
    /// 'local-area-size' 属性的值无法解析
    LocalAreaSizeInvalid { raw_value: String, align: Align },
    /// 'local-area-size' 的值必须是对齐的整数倍
    LocalAreaSizeAlignNote { align: Align },
    /// 局部栈区超出声明的上限
    LocalAreaSizeExceeded {
        local_area_size: i64,
        bytes_used: i64,
    },
    /// barebonecc 函数不得普通返回
    ReturnNotAllowed,
    /// 对该函数的调用必须带 musttail 标记
    MustTailCall { call: Option<&'ir Instruction> },
    /// 对该函数的调用必须处于尾调用位置
    NotInTailCallPosition { call: Option<&'ir Instruction> },
    /// 只有 barebonecc 函数内才能调用该函数
    InNonBareboneFunction { call: Option<&'ir Instruction> },
}

/// 写出调用目标：直接调用打印函数名，间接调用退化为签名文本
fn write_callee(
    out: &mut dyn fmt::Write,
    call: Option<&Instruction>,
) -> fmt::Result {
    let Some(call) = call else {
        return Ok(());
    };
    match call.callee() {
        Some(Callee::Direct(name)) => write!(out, "{}", name),
        Some(Callee::Indirect(fn_ty)) => write!(out, "{}", fn_ty),
        None => Ok(()),
    }
}

/// barebonecc 校验诊断
#[derive(Debug, Clone)]
pub struct BareboneCcDiagnostic<'ir> {
    severity: Severity,
    func: &'ir Function,
    loc: DiagnosticLocation,
    sub_kind: BareboneCcKind<'ir>,
}

impl<'ir> BareboneCcDiagnostic<'ir> {
    /// 私有全量构造：位置取指令的调试位置，缺指令时取函数 subprogram
    fn new(
        severity: Severity,
        func: &'ir Function,
        instr: Option<&Instruction>,
        sub_kind: BareboneCcKind<'ir>,
    ) -> Self {
        let loc = match instr {
            Some(instr) => DiagnosticLocation::from_debug_loc(instr.debug_loc()),
            None => DiagnosticLocation::from_subprogram(func.subprogram()),
        };
        Self {
            severity,
            func,
            loc,
            sub_kind,
        }
    }

    pub fn hw_reg_invalid(
        severity: Severity,
        func: &'ir Function,
        call: Option<&'ir Instruction>,
        raw_value: impl Into<String>,
    ) -> Self {
        Self::new(
            severity,
            func,
            call,
            BareboneCcKind::HwRegInvalid {
                call,
                raw_value: raw_value.into(),
            },
        )
    }

    pub fn hw_reg_alloc_failure(
        severity: Severity,
        func: &'ir Function,
        call: Option<&'ir Instruction>,
        raw_value: impl Into<String>,
    ) -> Self {
        Self::new(
            severity,
            func,
            call,
            BareboneCcKind::HwRegAllocFailure {
                call,
                raw_value: raw_value.into(),
            },
        )
    }

    pub fn multipart_arg_unsupported(
        severity: Severity,
        func: &'ir Function,
        call: Option<&'ir Instruction>,
        ty: &'ir Type,
    ) -> Self {
        Self::new(
            severity,
            func,
            call,
            BareboneCcKind::MultipartArgUnsupported { call, ty },
        )
    }

    pub fn no_clobber_hw_reg_invalid(
        severity: Severity,
        func: &'ir Function,
        raw_value: impl Into<String>,
    ) -> Self {
        Self::new(
            severity,
            func,
            None,
            BareboneCcKind::NoClobberHwRegInvalid {
                raw_value: raw_value.into(),
            },
        )
    }

    pub fn frame_pointer_not_allowed(
        severity: Severity,
        func: &'ir Function,
    ) -> Self {
        Self::new(severity, func, None, BareboneCcKind::FramePointerNotAllowed)
    }

    pub fn local_area_size_invalid(
        severity: Severity,
        func: &'ir Function,
        raw_value: impl Into<String>,
        align: Align,
    ) -> Self {
        Self::new(
            severity,
            func,
            None,
            BareboneCcKind::LocalAreaSizeInvalid {
                raw_value: raw_value.into(),
                align,
            },
        )
    }

    pub fn local_area_size_align_note(
        severity: Severity,
        func: &'ir Function,
        align: Align,
    ) -> Self {
        Self::new(
            severity,
            func,
            None,
            BareboneCcKind::LocalAreaSizeAlignNote { align },
        )
    }

    pub fn local_area_size_exceeded(
        severity: Severity,
        func: &'ir Function,
        local_area_size: i64,
        bytes_used: i64,
    ) -> Self {
        Self::new(
            severity,
            func,
            None,
            BareboneCcKind::LocalAreaSizeExceeded {
                local_area_size,
                bytes_used,
            },
        )
    }

    pub fn return_not_allowed(
        severity: Severity,
        func: &'ir Function,
        return_instr: Option<&Instruction>,
    ) -> Self {
        Self::new(severity, func, return_instr, BareboneCcKind::ReturnNotAllowed)
    }

    pub fn must_tail_call(
        severity: Severity,
        func: &'ir Function,
        call: Option<&'ir Instruction>,
    ) -> Self {
        Self::new(severity, func, call, BareboneCcKind::MustTailCall { call })
    }

    pub fn not_in_tail_call_position(
        severity: Severity,
        func: &'ir Function,
        call: Option<&'ir Instruction>,
    ) -> Self {
        Self::new(
            severity,
            func,
            call,
            BareboneCcKind::NotInTailCallPosition { call },
        )
    }

    pub fn in_non_barebone_function(
        severity: Severity,
        func: &'ir Function,
        call: Option<&'ir Instruction>,
    ) -> Self {
        Self::new(
            severity,
            func,
            call,
            BareboneCcKind::InNonBareboneFunction { call },
        )
    }

    pub fn sub_kind(&self) -> &BareboneCcKind<'ir> {
        &self.sub_kind
    }
}

impl DiagnosticInfo for BareboneCcDiagnostic<'_> {
    fn kind(&self) -> DiagnosticKind {
        DiagnosticKind::BareboneCc
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn print(
        &self,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        if self.is_location_available() {
            write!(out, "{}: ", self.location_str())?;
        }
        write!(out, "in function {}: ", self.func.name())?;
        match &self.sub_kind {
            BareboneCcKind::HwRegInvalid { call, raw_value } => {
                write!(
                    out,
                    "register requested by 'hwreg' attribute is unknown or invalid"
                )?;
                if let Some(call) = call {
                    write!(out, " in a call to ")?;
                    write_callee(out, Some(call))?;
                }
                write!(out, ": {}", raw_value)
            }
            BareboneCcKind::HwRegAllocFailure { call, raw_value } => {
                write!(
                    out,
                    "failed to allocate register requested by 'hwreg' attribute"
                )?;
                if let Some(call) = call {
                    write!(out, " in a call to ")?;
                    write_callee(out, Some(call))?;
                }
                write!(out, ": {}", raw_value)
            }
            BareboneCcKind::MultipartArgUnsupported { call, ty } => {
                write!(
                    out,
                    "argument of type {} is passed in multiple registers, incompatible with 'hwreg'",
                    ty
                )?;
                if let Some(call) = call {
                    write!(out, " in a call to ")?;
                    write_callee(out, Some(call))?;
                }
                Ok(())
            }
            BareboneCcKind::NoClobberHwRegInvalid { raw_value } => {
                write!(
                    out,
                    "unknown register in 'no-clobber-hwreg' attribute: {}",
                    raw_value
                )
            }
            BareboneCcKind::FramePointerNotAllowed => {
                write!(out, "frame pointer not allowed")
            }
            BareboneCcKind::LocalAreaSizeInvalid { raw_value, .. } => {
                write!(out, "bad value in 'local-area-size' attribute: {}", raw_value)
            }
            BareboneCcKind::LocalAreaSizeAlignNote { align } => {
                write!(
                    out,
                    "the value in 'local-area-size' attribute must be a multiple of {}",
                    align.value()
                )
            }
            BareboneCcKind::LocalAreaSizeExceeded {
                local_area_size,
                bytes_used,
            } => {
                write!(
                    out,
                    "stack size limit of {} exceeded: {} used",
                    local_area_size, bytes_used
                )
            }
            BareboneCcKind::ReturnNotAllowed => {
                write!(
                    out,
                    "must terminate by tail-calling another barebonecc function"
                )
            }
            BareboneCcKind::MustTailCall { call } => {
                write!(out, "function ")?;
                write_callee(out, *call)?;
                write!(out, " must be tail-called, use musttail marker")
            }
            BareboneCcKind::NotInTailCallPosition { call } => {
                write!(out, "a call to function ")?;
                write_callee(out, *call)?;
                write!(out, " must be in tail-call position")
            }
            BareboneCcKind::InNonBareboneFunction { call } => {
                write!(out, "a call to function ")?;
                write_callee(out, *call)?;
                write!(out, " is only allowed in barebonecc functions")
            }
        }
    }
}

impl WithLocation for BareboneCcDiagnostic<'_> {
    fn function(&self) -> &Function {
        self.func
    }

    fn location(&self) -> &DiagnosticLocation {
        &self.loc
    }
}
