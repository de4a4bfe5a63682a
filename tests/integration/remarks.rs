//! 优化备注端到端测试
//!
//! 模拟 Pass 的完整流程：构造备注、按过滤器门控、渲染输出。

use yaoguang::diagnostic::{
    Argument, EmitterConfig, JsonEmitter, OptimizationRemark, RemarkFilter, RemarkKind,
    SetExtraArgs, TextEmitter,
};
use yaoguang::ir::{
    BasicBlock, Callee, DebugLoc, DiFile, Function, FunctionType, Instruction, Opcode, Subprogram,
    Type,
};
use yaoguang::{DiagnosticHandler, DiagnosticInfo, WithLocation};

use std::sync::Arc;

fn sample_module_function() -> Function {
    let file = Arc::new(DiFile::new("kernel.yg", "/work/project"));
    let call = Instruction::call(Callee::Direct("helper".into()))
        .with_debug_loc(DebugLoc::new(Arc::clone(&file), 14, 9));
    Function::new("main_loop", FunctionType::new(Type::Void, vec![Type::Int(32)]))
        .with_subprogram(Subprogram::new(file, 10))
        .with_blocks(vec![BasicBlock::new("entry", vec![call])])
}

#[test]
fn passed_remark_flows_through_filter_and_emitter() {
    let func = sample_module_function();
    let callee = Function::new("helper", FunctionType::new(Type::Void, vec![]));

    let remark = OptimizationRemark::on_function("inliner", "Inlined", &func)
        .insert("inlined ")
        .arg("Callee", &callee)
        .insert(" into ")
        .arg("Caller", &func)
        .with_hotness(Some(1200));

    let filter = RemarkFilter::new().with_passed_pattern("^inliner$").unwrap();
    assert!(remark.is_enabled(&filter));

    let emitter = TextEmitter::with_config(EmitterConfig {
        use_colors: false,
        show_severity: true,
    });
    assert_eq!(
        emitter.render(&remark),
        "remark: kernel.yg:10:0: inlined helper into main_loop (hotness: 1200)"
    );
}

#[test]
fn missed_remark_on_instruction_uses_instruction_location() {
    let func = sample_module_function();
    let inst = &func.entry_block().unwrap().instructions()[0];

    let remark = OptimizationRemark::on_instruction(
        RemarkKind::Missed,
        "inliner",
        "NotInlined",
        &func,
        inst,
    )
    .arg("Callee", inst)
    .insert(" could not be inlined");

    assert_eq!(remark.location_str(), "kernel.yg:14:9");
    assert_eq!(remark.msg(), "call could not be inlined");

    // 过滤器只配置了 passed，missed 不放行
    let filter = RemarkFilter::new().with_passed_pattern(".*").unwrap();
    assert!(!remark.is_enabled(&filter));

    let filter = RemarkFilter::new().with_missed_pattern("inliner").unwrap();
    assert!(remark.is_enabled(&filter));
}

#[test]
fn extra_args_are_kept_structurally_but_out_of_message() {
    let func = sample_module_function();
    let remark = OptimizationRemark::on_function("loop-vectorize", "Vectorized", &func)
        .insert("vectorized loop")
        .insert(SetExtraArgs)
        .insert(Argument::new("VectorWidth", 8u32))
        .insert(Argument::new("InterleaveCount", 2u32));

    assert_eq!(remark.msg(), "vectorized loop");

    let json: serde_json::Value =
        serde_json::from_str(&JsonEmitter::render_remark(&remark)).unwrap();
    let args = json["args"].as_array().unwrap();
    assert_eq!(args.len(), 3);
    assert_eq!(args[1]["key"], "VectorWidth");
    assert_eq!(args[1]["value"], "8");
}

#[test]
fn analysis_always_print_bypasses_empty_registry() {
    struct ClosedRegistry;
    impl DiagnosticHandler for ClosedRegistry {}

    let func = sample_module_function();
    let remark = OptimizationRemark::new(
        RemarkKind::Analysis,
        OptimizationRemark::ALWAYS_PRINT,
        "StackUsage",
        &func,
        yaoguang::DiagnosticLocation::from_subprogram(func.subprogram()),
        None,
    )
    .insert("function uses ")
    .arg("Bytes", 256u64)
    .insert(" bytes of stack");

    assert!(remark.is_enabled(&ClosedRegistry));
    assert_eq!(
        remark.print_to_string(),
        "kernel.yg:10:0: function uses 256 bytes of stack"
    );
}
