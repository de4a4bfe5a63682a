//! barebonecc 调用约定诊断端到端测试

use yaoguang::diagnostic::{BareboneCcDiagnostic, EmitterConfig, TextEmitter};
use yaoguang::ir::{
    Callee, DebugLoc, DiFile, Function, FunctionType, Instruction, Subprogram, Type,
};
use yaoguang::{DiagnosticInfo, DiagnosticKind, Severity};

use std::sync::Arc;

fn isr() -> Function {
    let file = Arc::new(DiFile::new("boot/isr.yg", "/fw"));
    Function::new("timer_isr", FunctionType::new(Type::Void, vec![]))
        .with_subprogram(Subprogram::new(file, 12))
}

#[test]
fn hw_reg_invalid_renders_with_direct_callee() {
    let func = isr();
    let file = Arc::new(DiFile::new("boot/isr.yg", "/fw"));
    let call = Instruction::call(Callee::Direct("dispatch".into()))
        .with_debug_loc(DebugLoc::new(file, 30, 5));

    let diag = BareboneCcDiagnostic::hw_reg_invalid(Severity::Error, &func, Some(&call), "r7");
    assert_eq!(diag.kind(), DiagnosticKind::BareboneCc);
    assert_eq!(
        diag.print_to_string(),
        "boot/isr.yg:30:5: in function timer_isr: register requested by 'hwreg' attribute \
         is unknown or invalid in a call to dispatch: r7"
    );
}

#[test]
fn indirect_callee_falls_back_to_signature_text() {
    let func = isr();
    let call = Instruction::call(Callee::Indirect(FunctionType::new(
        Type::Void,
        vec![Type::Ptr, Type::Int(64)],
    )));

    let diag = BareboneCcDiagnostic::not_in_tail_call_position(Severity::Error, &func, Some(&call));
    assert_eq!(
        diag.print_to_string(),
        "boot/isr.yg:12:0: in function timer_isr: a call to function void (ptr, i64) \
         must be in tail-call position"
    );
}

#[test]
fn local_area_size_exceeded_exact_message() {
    let func = isr();
    let diag =
        BareboneCcDiagnostic::local_area_size_exceeded(Severity::Warning, &func, 1024, 2048);
    assert_eq!(
        diag.print_to_string(),
        "boot/isr.yg:12:0: in function timer_isr: stack size limit of 1024 exceeded: 2048 used"
    );

    let emitter = TextEmitter::with_config(EmitterConfig {
        use_colors: false,
        show_severity: true,
    });
    assert!(emitter.render(&diag).starts_with("warning: "));
}

#[test]
fn severity_is_caller_chosen() {
    let func = isr();
    let warn = BareboneCcDiagnostic::frame_pointer_not_allowed(Severity::Warning, &func);
    let err = BareboneCcDiagnostic::frame_pointer_not_allowed(Severity::Error, &func);
    assert_eq!(warn.severity(), Severity::Warning);
    assert_eq!(err.severity(), Severity::Error);
    // 同一子类不同级别，正文一致
    assert_eq!(warn.print_to_string(), err.print_to_string());
}
