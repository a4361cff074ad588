// src/tests/lineclassifier_tests.rs

//! tests for `lineclassifier.rs` functions

#![allow(non_snake_case)]

use crate::data::catalog::{EventKind, EVENT_KINDS_ALL};
use crate::data::event::{EventFields, FormatEra, LogEvent, RlimitValue};
use crate::readers::lineclassifier::{
    classify_line,
    classify_lines,
    classify_lines_parallel,
    reportable_events,
    results_in_order,
    ChanResult,
    ClassifyResults,
    LineClassifier,
    CHANNEL_CAPACITY,
};
use crate::readers::summary::SummaryLineClassifier;
use crate::tests::common::{report_lines, REPORT_LINES};

use ::si_trace_print::stack::stack_offset_set;
use ::test_case::test_case;

fn events_of(results: ClassifyResults) -> Vec<LogEvent> {
    results
        .into_iter()
        .map(|result| result.unwrap())
        .collect()
}

fn kinds_of(events: &[LogEvent]) -> Vec<EventKind> {
    events
        .iter()
        .map(|event| event.kind)
        .collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// classify_line
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_classify_line_timezone() {
    stack_offset_set(Some(2));
    let event = classify_line("timezone: UTC").unwrap();
    assert_eq!(event.kind, EventKind::Timezone);
    assert_eq!(event.raw, "timezone: UTC");
    assert_eq!(event.timezone(), Some("UTC"));
    assert!(!event.is_discardable());
}

#[test]
fn test_classify_line_pid() {
    stack_offset_set(Some(2));
    let event = classify_line("12345:").unwrap();
    assert_eq!(event.kind, EventKind::Pid);
    assert_eq!(event.fields, None);
    assert!(event.is_discardable());
}

#[test_case("VM state:at safepoint (normal execution)", FormatEra::Legacy)]
#[test_case("VM state: at safepoint (normal execution)", FormatEra::Modern)]
fn test_classify_line_vm_state(
    line: &str,
    era: FormatEra,
) {
    let event = classify_line(line).unwrap();
    assert_eq!(event.kind, EventKind::VmState);
    assert_eq!(event.vm_state(), Some("at safepoint (normal execution)"));
    match event.fields {
        Some(EventFields::VmState { era: era_, .. }) => assert_eq!(era_, era),
        fields => panic!("unexpected {:?}", fields),
    }
}

#[test]
fn test_classify_line_rlimit() {
    stack_offset_set(Some(2));
    let line = "rlimit: STACK 8192k, CORE infinity, NOFILE 65536, AS infinity";
    let event = classify_line(line).unwrap();
    assert_eq!(event.kind, EventKind::Rlimit);
    assert_eq!(event.raw, line);
    match &event.fields {
        Some(EventFields::Rlimit { limits }) => {
            assert_eq!(limits.len(), 4);
            assert_eq!(limits[0].resource, "STACK");
            assert_eq!(limits[0].soft, RlimitValue::Kilobytes(8192));
            assert_eq!(limits[1].resource, "CORE");
            assert_eq!(limits[1].soft, RlimitValue::Infinity);
        }
        fields => panic!("unexpected {:?}", fields),
    }
}

#[test]
fn test_classify_line_rlimit_unknown() {
    stack_offset_set(Some(2));
    let line = "rlimit: STACK 8192k, CORE could not obtain value, NOFILE 65536, AS infinity";
    let event = classify_line(line).unwrap();
    assert_eq!(event.kind, EventKind::Rlimit);
    match &event.fields {
        Some(EventFields::Rlimit { limits }) => {
            assert_eq!(limits.len(), 4);
            assert_eq!(limits[1].resource, "CORE");
            assert_eq!(limits[1].soft, RlimitValue::Unknown);
            assert_eq!(limits[1].hard, None);
        }
        fields => panic!("unexpected {:?}", fields),
    }
}

#[test]
fn test_classify_line_native_memory_tracking() {
    let event = classify_line("-                 Java Heap (reserved=4194304KB, committed=262144KB)").unwrap();
    let nmt = event.native_memory_tracking().unwrap();
    assert_eq!(nmt.category, "Java Heap");
    assert_eq!(nmt.committed_kb, 262144);
}

#[test_case("not a known line"; "prose")]
#[test_case(""; "empty")]
#[test_case("   "; "blanks")]
#[test_case("timezone: UTC\n"; "terminator not stripped")]
fn test_classify_line_unrecognized(line: &str) {
    let event = classify_line(line).unwrap();
    assert_eq!(event.kind, EventKind::Unrecognized);
    assert_eq!(event.raw, line);
    assert_eq!(event.fields, None);
    assert!(!event.is_discardable());
}

#[test]
fn test_classify_line_extract_error() {
    // matches the catalog but the number does not fit
    let result = classify_line("Total: reserved=5799365KB, committed=99999999999999999999999KB");
    assert!(result.is_err(), "{:?}", result);
}

#[test]
fn test_classify_line_test_cases() {
    stack_offset_set(Some(2));
    for kind in EVENT_KINDS_ALL.iter() {
        let instr = match kind.parse_instr() {
            Some(instr) => instr,
            None => continue,
        };
        for line in instr._test_cases.iter() {
            let event = classify_line(line).unwrap();
            assert_eq!(event.kind, *kind, "line {:?}", line);
            assert_eq!(event.raw, *line);
            if !kind.has_header() {
                assert!(!event.is_header(), "line {:?}", line);
            }
        }
    }
}

#[test]
fn test_classify_lines_report() {
    stack_offset_set(Some(2));
    let events = events_of(classify_lines(report_lines()));
    assert_eq!(events.len(), REPORT_LINES.len());
    for (event, (line, kind)) in events.iter().zip(REPORT_LINES.iter()) {
        assert_eq!(event.kind, *kind, "line {:?}", line);
        assert_eq!(event.raw, *line);
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// reportable_events
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_reportable_events() {
    let lines = [
        "---------------  S U M M A R Y ------------",
        "timezone: UTC",
        "12345:",
        "load average:0.12 0.05 0.01",
        "not a known line",
        "OS uptime: 0 days 2:07 hours",
        "G1BarrierSet",
    ];
    let events = events_of(classify_lines(lines));
    let events = reportable_events(events);
    assert_eq!(
        kinds_of(&events),
        vec![EventKind::Timezone, EventKind::Unrecognized, EventKind::BarrierSet]
    );
    assert_eq!(events[1].raw, "not a known line");
}

#[test]
fn test_reportable_events_empty() {
    assert_eq!(reportable_events(Vec::new()), Vec::new());
}

#[test]
fn test_reportable_events_report() {
    let events = reportable_events(events_of(classify_lines(report_lines())));
    for event in events.iter() {
        assert!(!event.is_discardable(), "{:?}", event);
    }
    let expect: Vec<EventKind> = REPORT_LINES
        .iter()
        .map(|(_line, kind)| *kind)
        .filter(|kind| !kind.is_discardable())
        .collect();
    assert_eq!(kinds_of(&events), expect);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LineClassifier
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_LineClassifier_new() {
    let classifier = LineClassifier::new();
    assert_eq!(classifier.count_lines(), 0);
    assert_eq!(classifier.summary(), SummaryLineClassifier::default());
}

#[test]
fn test_LineClassifier_summary() {
    stack_offset_set(Some(2));
    let mut classifier = LineClassifier::new();
    let results = classifier.classify_lines(report_lines());
    assert_eq!(results.len(), REPORT_LINES.len());

    let summary = classifier.summary();
    assert_eq!(classifier.count_lines(), REPORT_LINES.len() as u64);
    assert_eq!(summary.lineclassifier_lines, 36);
    assert_eq!(summary.count_kind(EventKind::Heading), 5);
    assert_eq!(summary.count_kind(EventKind::Unrecognized), 17);
    assert_eq!(summary.count_kind(EventKind::ExceptionCounts), 2);
    assert_eq!(summary.count_kind(EventKind::LdPreloadFile), 2);
    assert_eq!(summary.count_kind(EventKind::Pid), 0);
    assert_eq!(summary.lineclassifier_unrecognized, 17);
    // 5 headings, uptime, load average
    assert_eq!(summary.lineclassifier_discardable, 7);
    // exception counts, ld.so.preload
    assert_eq!(summary.lineclassifier_headers, 2);
    // vm state, vm operation, barrier set, rlimit, timezone, total
    assert_eq!(summary.lineclassifier_fields, 6);
    assert_eq!(summary.lineclassifier_extract_errors, 0);
    assert_eq!(summary.count_recognized(), 19);
}

#[test]
fn test_LineClassifier_extract_error_counted() {
    let mut classifier = LineClassifier::new();
    let result = classifier.classify("Total: reserved=5799365KB, committed=99999999999999999999999KB");
    assert!(result.is_err());
    let summary = classifier.summary();
    assert_eq!(summary.lineclassifier_lines, 1);
    assert_eq!(summary.lineclassifier_extract_errors, 1);
    assert_eq!(summary.count_recognized(), 0);
}

/// classifying with worker threads yields the same events, in the same
/// order, and the same statistics as classifying in the current thread
#[test_case(0)]
#[test_case(1)]
#[test_case(2)]
#[test_case(3)]
#[test_case(8)]
fn test_LineClassifier_classify_lines_parallel(threads: usize) {
    stack_offset_set(Some(2));
    // more lines than the channel holds
    let mut lines: Vec<&str> = Vec::new();
    while lines.len() <= CHANNEL_CAPACITY * 3 {
        lines.extend(report_lines());
    }

    let mut classifier1 = LineClassifier::new();
    let expect = classifier1.classify_lines(lines.iter().copied());

    let mut classifier2 = LineClassifier::new();
    let results = classifier2.classify_lines_parallel(&lines, threads);
    assert_eq!(results, expect);
    assert_eq!(classifier2.summary(), classifier1.summary());
    assert_eq!(classifier2.count_lines(), lines.len() as u64);
}

#[test_case(&[]; "no lines")]
#[test_case(&["timezone: UTC"]; "one line")]
#[test_case(&["timezone: UTC", "12345:"]; "two lines")]
fn test_classify_lines_parallel_few(lines: &[&str]) {
    let results = classify_lines_parallel(lines, 4);
    assert_eq!(results, classify_lines(lines.iter().copied()));
}

#[test]
fn test_classify_lines_parallel_extract_error_in_order() {
    let lines = [
        "timezone: UTC",
        "Total: reserved=5799365KB, committed=99999999999999999999999KB",
        "G1BarrierSet",
    ];
    let results = classify_lines_parallel(&lines, 2);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}

fn indexed_results(indexes: &[usize]) -> Vec<ChanResult> {
    indexes
        .iter()
        .map(|index| (*index, classify_line(REPORT_LINES[*index].0)))
        .collect()
}

#[test]
fn test_results_in_order() {
    let results = results_in_order(indexed_results(&[2, 0, 3, 1]), 4).unwrap();
    let expect: ClassifyResults = REPORT_LINES[..4]
        .iter()
        .map(|(line, _kind)| classify_line(line))
        .collect();
    assert_eq!(results, expect);
}

#[test]
fn test_results_in_order_empty() {
    assert_eq!(results_in_order(Vec::new(), 0), Some(Vec::new()));
}

/// a worker that dies takes the results of its lines with it; the missing
/// results must be noticed, never silently shorten the output
#[test_case(&[0, 2], 3; "missing middle")]
#[test_case(&[0, 1], 3; "missing last")]
#[test_case(&[], 2; "no results")]
#[test_case(&[0, 0, 1], 3; "duplicate index")]
#[test_case(&[0, 1, 5], 3; "index out of range")]
#[test_case(&[0, 1, 2], 2; "too many")]
fn test_results_in_order_incomplete(
    indexes: &[usize],
    count: usize,
) {
    assert_eq!(results_in_order(indexed_results(indexes), count), None);
}

/// every line gets exactly one result, whatever the number of threads
#[test_case(2)]
#[test_case(5)]
#[test_case(64)]
fn test_classify_lines_parallel_one_result_per_line(threads: usize) {
    let lines = report_lines();
    let mut classifier = LineClassifier::new();
    let results = classifier.classify_lines_parallel(&lines, threads);
    assert_eq!(results.len(), lines.len());
    assert_eq!(classifier.count_lines(), lines.len() as u64);
    for ((line, kind), result) in REPORT_LINES.iter().zip(results.iter()) {
        let event = result.as_ref().unwrap();
        assert_eq!(event.raw, *line);
        assert_eq!(event.kind, *kind, "line {:?}", line);
    }
}
