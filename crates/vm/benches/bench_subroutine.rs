//! Benchmark for testing VM performance with repeated CALL / RETURN pairs.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use regvm_vm::core::vm::{VmOptions, VM};

fn test_subroutine(c: &mut Criterion) {
    let mut group = c.benchmark_group("regvm_vm");

    // 00: LOAD_CONST r0, 200 ; 03: LOAD_CONST r1, 1
    // 06: CALL 0x10 ; 08: JUMP_IF_ZERO r0, 0x0e ; 0b: JUMP 0x06 ; 0d: pad ; 0e: HALT
    // 10: SUB r0, r0, r1 ; 14: RETURN
    let mut bytecode = vec![
        0x01, 0x00, 0xc8, 0x01, 0x01, 0x01, 0x0c, 0x10, 0x0a, 0x00, 0x0e, 0x09, 0x06, 0x00, 0x0e,
        0x00,
    ];
    bytecode.extend_from_slice(&[0x04, 0x00, 0x00, 0x01, 0x0d]);

    group.sample_size(500);
    group.bench_function(BenchmarkId::from_parameter("subroutine"), |b| {
        b.iter(|| {
            let result = VM::run_program(&bytecode, VmOptions::default()).expect("load failed");
            assert!(result.success);
            result
        });
    });

    group.finish();
}

criterion_group!(benches, test_subroutine);
criterion_main!(benches);
