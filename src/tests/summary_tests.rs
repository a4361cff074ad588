// src/tests/summary_tests.rs

//! tests for `summary.rs` functions

#![allow(non_snake_case)]

use crate::common::FPath;
use crate::data::catalog::EventKind;
use crate::readers::lineclassifier::LineClassifier;
use crate::readers::summary::{Summary, SummaryLineClassifier};

fn summary_of(lines: &[&str]) -> SummaryLineClassifier {
    let mut classifier = LineClassifier::new();
    classifier.classify_lines(lines.iter().copied());

    classifier.summary()
}

#[test]
fn test_SummaryLineClassifier_default() {
    let summary = SummaryLineClassifier::default();
    assert_eq!(summary.lineclassifier_lines, 0);
    assert_eq!(summary.max_count(), 0);
    assert_eq!(summary.count_recognized(), 0);
}

#[test]
fn test_SummaryLineClassifier_count_kind() {
    let summary = summary_of(&["timezone: UTC", "timezone: CEST", "12345:", "bogus"]);
    assert_eq!(summary.count_kind(EventKind::Timezone), 2);
    assert_eq!(summary.count_kind(EventKind::Pid), 1);
    assert_eq!(summary.count_kind(EventKind::Unrecognized), 1);
    assert_eq!(summary.count_kind(EventKind::VmState), 0);
    assert_eq!(summary.count_recognized(), 3);
    assert_eq!(summary.max_count(), 4);
}

#[test]
fn test_SummaryLineClassifier_merge() {
    let lines1 = ["timezone: UTC", "12345:"];
    let lines2 = ["G1BarrierSet", "timezone: UTC", "bogus"];
    let mut summary = summary_of(&lines1);
    summary.merge(&summary_of(&lines2));

    let lines_all = ["timezone: UTC", "12345:", "G1BarrierSet", "timezone: UTC", "bogus"];
    assert_eq!(summary, summary_of(&lines_all));
    assert_eq!(summary.lineclassifier_lines, 5);
    assert_eq!(summary.count_kind(EventKind::Timezone), 2);
    assert_eq!(summary.lineclassifier_fields, 3);
    assert_eq!(summary.lineclassifier_discardable, 1);
}

#[test]
fn test_SummaryLineClassifier_display() {
    let summary = summary_of(&["timezone: UTC", "12345:"]);
    let s = summary.to_string();
    assert!(s.contains("  lines        : 2\n"), "{}", s);
    assert!(s.contains("    timezone                : 1\n"), "{}", s);
    assert!(s.contains("    pid                     : 1\n"), "{}", s);
    // kinds not seen are not printed
    assert!(!s.contains("vm_state"), "{}", s);
}

#[test]
fn test_Summary_has_error() {
    let path: FPath = FPath::from("hs_err_pid1234.log");
    let summary = Summary::new(path.clone(), 100, summary_of(&["timezone: UTC"]), None);
    assert!(!summary.has_error());

    let summary = Summary::new_failed(path.clone(), String::from("failed to read"));
    assert!(summary.has_error());
    assert_eq!(summary.bytes, 0);
    assert_eq!(summary.path, path);

    let bad_line = "Total: reserved=5799365KB, committed=99999999999999999999999KB";
    let summary = Summary::new(path, 100, summary_of(&[bad_line]), None);
    assert!(summary.has_error());
}
