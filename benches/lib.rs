//! # YaoGuang 诊断层基准测试
//!
//! 使用 Criterion.rs 进行性能基准测试。
//!
//! ## 基准测试分组
//! - `argument`: 参数捕获开销
//! - `remark`: 备注构造与渲染
//!
//! ## 使用方法
//! ```bash
//! cargo bench           # 运行所有
//! cargo bench remark    # 只运行备注基准
//! ```

use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use yaoguang::diagnostic::{Argument, OptimizationRemark, TextEmitter};
use yaoguang::ir::{DiFile, Function, FunctionType, Subprogram, Type};
use yaoguang::DiagnosticInfo;

fn bench_argument_capture(c: &mut Criterion) {
    let file = Arc::new(DiFile::new("bench.yg", "/src"));
    let func = Function::new("hot", FunctionType::new(Type::Void, vec![]))
        .with_subprogram(Subprogram::new(file, 1));

    c.bench_function("argument_capture_function", |b| {
        b.iter(|| Argument::new("Callee", &func))
    });

    c.bench_function("argument_capture_u64", |b| {
        b.iter(|| Argument::new("Count", 123456u64))
    });
}

fn bench_remark_render(c: &mut Criterion) {
    let file = Arc::new(DiFile::new("bench.yg", "/src"));
    let func = Function::new("hot", FunctionType::new(Type::Void, vec![]))
        .with_subprogram(Subprogram::new(file, 1));

    c.bench_function("remark_build_and_print", |b| {
        b.iter(|| {
            OptimizationRemark::on_function("inliner", "Inlined", &func)
                .insert("inlined ")
                .arg("Callee", &func)
                .with_hotness(Some(100))
                .print_to_string()
        })
    });

    let emitter = TextEmitter::new();
    let remark = OptimizationRemark::on_function("inliner", "Inlined", &func).insert("inlined");
    c.bench_function("remark_text_emit", |b| b.iter(|| emitter.render(&remark)));
}

criterion_group!(argument, bench_argument_capture);
criterion_group!(remark, bench_remark_render);
criterion_main!(argument, remark);
