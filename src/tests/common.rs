// src/tests/common.rs

//! common data for tests

use crate::data::catalog::EventKind;

/// An excerpt of a fatal error report, with the kind of each line.
pub const REPORT_LINES: [(&str, EventKind); 36] = [
    ("#", EventKind::Unrecognized),
    ("# A fatal error has been detected by the Java Runtime Environment:", EventKind::Unrecognized),
    ("#", EventKind::Unrecognized),
    ("#  SIGSEGV (0xb) at pc=0x00007f27bd0c5e52, pid=12345, tid=12346", EventKind::Unrecognized),
    ("", EventKind::Unrecognized),
    ("---------------  S U M M A R Y ------------", EventKind::Heading),
    ("", EventKind::Unrecognized),
    ("Command Line: -Xmx4g com.example.Main", EventKind::Unrecognized),
    ("Time: Tue Sep 19 12:00:00 2023 UTC elapsed time: 3.5 seconds (0d 0h 0m 3s)", EventKind::Unrecognized),
    ("", EventKind::Unrecognized),
    ("---------------  T H R E A D  ---------------", EventKind::Heading),
    ("", EventKind::Unrecognized),
    ("---------------  P R O C E S S  ---------------", EventKind::Heading),
    ("", EventKind::Unrecognized),
    ("VM state: not at safepoint (normal execution)", EventKind::VmState),
    ("", EventKind::Unrecognized),
    ("VM_Operation (0x00007f6bdb9fe8e0): G1CollectFull, mode: safepoint, requested by thread 0x00007f6c0c01e800", EventKind::VmOperation),
    ("", EventKind::Unrecognized),
    ("Barrier set: G1BarrierSet", EventKind::BarrierSet),
    ("CDS archive(s) not mapped", EventKind::CdsArchive),
    ("Compressed class space mapped at: 0x0000000800c00000-0x0000000840c00000, reserved size: 1073741824", EventKind::CompressedClassSpace),
    ("", EventKind::Unrecognized),
    ("OutOfMemory and StackOverflow Exception counts:", EventKind::ExceptionCounts),
    ("OutOfMemoryError java_heap_errors=1", EventKind::ExceptionCounts),
    ("", EventKind::Unrecognized),
    ("---------------  S Y S T E M  ---------------", EventKind::Heading),
    ("", EventKind::Unrecognized),
    ("OS uptime: 0 days 2:07 hours", EventKind::Uptime),
    ("rlimit: STACK 8192k, CORE infinity, NOFILE 65536, AS infinity", EventKind::Rlimit),
    ("load average:0.12 0.05 0.01", EventKind::LoadAverage),
    ("", EventKind::Unrecognized),
    ("/etc/ld.so.preload:", EventKind::LdPreloadFile),
    ("/usr/lib64/libjemalloc.so.2", EventKind::LdPreloadFile),
    ("timezone: UTC", EventKind::Timezone),
    ("Total: reserved=5799365KB, committed=492261KB", EventKind::NativeMemoryTracking),
    ("---------------  E N D  ---------------", EventKind::Heading),
];

/// The lines of [`REPORT_LINES`].
pub fn report_lines() -> Vec<&'static str> {
    REPORT_LINES
        .iter()
        .map(|(line, _kind)| *line)
        .collect()
}

/// The lines of [`REPORT_LINES`] joined with `"\n"`, as read from a file.
pub fn report_text() -> String {
    let mut text = report_lines().join("\n");
    text.push('\n');

    text
}
