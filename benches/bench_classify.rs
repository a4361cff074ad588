// benches/bench_classify.rs
//
// benchmark line classification, `lookup` alone and `classify_line`, in the
// current thread and with worker threads

#![allow(
    non_upper_case_globals,
    dead_code,
    non_snake_case
)]

use ::criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion,
};
use ::jcllib::data::catalog::lookup;
use ::jcllib::readers::lineclassifier::{classify_line, classify_lines_parallel};
use ::lazy_static::lazy_static;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// lines of a fatal error report, recognized and unrecognized
const LINES: [&str; 16] = [
    "---------------  S U M M A R Y ------------",
    "# A fatal error has been detected by the Java Runtime Environment:",
    "timezone: UTC",
    "VM state:not at safepoint (normal execution)",
    "rlimit: STACK 8192k, CORE infinity, NOFILE 65536, AS infinity",
    "load average:0.12 0.05 0.01",
    "12345:",
    "CDS archive(s) not mapped",
    "OutOfMemory and StackOverflow Exception counts:",
    "LinkageErrors=56",
    "VM_Operation (0x00007f6bdb9fe8e0): G1CollectFull, mode: safepoint, requested by thread 0x00007f6c0c01e800",
    "OS uptime: 0 days 2:07 hours",
    "Barrier set: G1BarrierSet",
    "-                 Java Heap (reserved=4194304KB, committed=262144KB)",
    "Total: reserved=5799365KB, committed=492261KB",
    "R15=0x00007f6c0c01e800 is a thread",
];

lazy_static! {
    /// `LINES` repeated into a larger report
    static ref Report: Vec<&'static str> = {
        let mut report: Vec<&'static str> = Vec::with_capacity(LINES.len() * 500);
        for _ in 0..500 {
            report.extend(LINES.iter());
        }
        report
    };
}

#[inline(never)]
fn lookup_lines() {
    for line in LINES.iter() {
        black_box(lookup(black_box(line)));
    }
}

#[inline(never)]
fn classify_line_lines() {
    for line in LINES.iter() {
        let _ = black_box(classify_line(black_box(line)));
    }
}

#[inline(never)]
fn classify_report_threads_1() {
    black_box(classify_lines_parallel(&Report, 1));
}

#[inline(never)]
fn classify_report_threads_4() {
    black_box(classify_lines_parallel(&Report, 4));
}

// criterion runners

fn criterion_benchmark(c: &mut Criterion) {
    // compile the regular expressions before measuring
    lookup_lines();

    let mut bg = c.benchmark_group("classify");
    bg.bench_function("lookup_lines", |b| b.iter(lookup_lines));
    bg.bench_function("classify_line_lines", |b| b.iter(classify_line_lines));
    bg.bench_function("classify_report_threads_1", |b| b.iter(classify_report_threads_1));
    bg.bench_function("classify_report_threads_4", |b| b.iter(classify_report_threads_4));
    bg.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
