// src/readers/lineclassifier.rs

//! Implements [`classify_line`] and the [`LineClassifier`], the dispatcher
//! from one line of a fatal error report to a [`LogEvent`].
//!
//! Classification of a line is stateless and pure: [`lookup`] the
//! [`EventKind`], then [`extract_fields`] for that kind. Discardable kinds are
//! classified like any other; dropping them is the business of the caller,
//! see [`reportable_events`].
//!
//! [`lookup`]: crate::data::catalog::lookup
//! [`EventKind`]: crate::data::catalog::EventKind
//! [`extract_fields`]: crate::data::fields::extract_fields

use crate::common::{Count, LineNumber};
use crate::data::catalog::{lookup, EventKind};
use crate::data::event::LogEvent;
use crate::data::fields::{extract_fields, ExtractError};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn, e_err};
use crate::readers::summary::SummaryLineClassifier;

use std::fmt;
use std::thread;

use ::crossbeam_channel;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ, dpfn, dpfo, dpfx, dpfñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// classify_line
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Result of classifying one line.
pub type ClassifyResult = Result<LogEvent, ExtractError>;

/// Results of classifying many lines, in input order.
pub type ClassifyResults = Vec<ClassifyResult>;

/// Classify one `line` of a fatal error report.
///
/// `line` must not have a line terminator. An unrecognized `line` is
/// `Ok` with kind [`EventKind::Unrecognized`]. `Err` only if the catalog and
/// the field extractors disagree about `line`.
pub fn classify_line(line: &str) -> ClassifyResult {
    dpfn!("({:?})", str_to_String_noraw(line));
    let kind: EventKind = lookup(line);
    let fields = match extract_fields(kind, line) {
        Ok(fields) => fields,
        Err(err) => {
            dpfx!("return Err({})", err);
            return Err(err);
        }
    };
    let event = LogEvent::new(kind, String::from(line), fields);
    dpfx!("return {:?}", event.kind);

    Ok(event)
}

/// Classify every line of `lines` in the current thread, preserving order.
pub fn classify_lines<'a, I>(lines: I) -> ClassifyResults
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(classify_line)
        .collect()
}

/// Classify every line of `lines` using `threads` worker threads.
///
/// The results are in the same order as `lines`.
pub fn classify_lines_parallel(
    lines: &[&str],
    threads: usize,
) -> ClassifyResults {
    let mut classifier = LineClassifier::new();

    classifier.classify_lines_parallel(lines, threads)
}

/// Drop the discardable events, preserving order of the rest.
pub fn reportable_events(events: Vec<LogEvent>) -> Vec<LogEvent> {
    events
        .into_iter()
        .filter(|event| !event.is_discardable())
        .collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LineClassifier
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Capacity of the channel of lines sent to worker threads.
pub const CHANNEL_CAPACITY: usize = 256;

/// Index of a line within the lines passed to
/// [`LineClassifier::classify_lines_parallel`], re-attached to each result so
/// results can be put back in order.
type ChanDatum<'a> = (LineNumber, &'a str);

/// Sender channel of lines (used by the calling thread).
type ChanSendDatum<'a> = crossbeam_channel::Sender<ChanDatum<'a>>;

/// Receiver channel of lines (used by each worker thread).
type ChanRecvDatum<'a> = crossbeam_channel::Receiver<ChanDatum<'a>>;

/// A classified line and its index.
pub(crate) type ChanResult = (LineNumber, ClassifyResult);

type ChanSendResult = crossbeam_channel::Sender<ChanResult>;

/// A `LineClassifier` wraps [`classify_line`] and keeps statistics about
/// the lines it classified.
///
/// The statistics never change how a line is classified.
#[derive(Default)]
pub struct LineClassifier {
    summary: SummaryLineClassifier,
}

impl fmt::Debug for LineClassifier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LineClassifier")
            .field("summary", &self.summary)
            .finish()
    }
}

impl LineClassifier {
    pub fn new() -> LineClassifier {
        LineClassifier {
            summary: SummaryLineClassifier::default(),
        }
    }

    /// Classify one `line` and count it.
    pub fn classify(
        &mut self,
        line: &str,
    ) -> ClassifyResult {
        let result = classify_line(line);
        self.count(&result);

        result
    }

    fn count(
        &mut self,
        result: &ClassifyResult,
    ) {
        let summary = &mut self.summary;
        summary.lineclassifier_lines += 1;
        match result {
            Ok(event) => {
                summary.lineclassifier_kinds[event.kind as usize] += 1;
                if event.is_discardable() {
                    summary.lineclassifier_discardable += 1;
                }
                if event.is_unrecognized() {
                    summary.lineclassifier_unrecognized += 1;
                }
                if event.is_header() {
                    summary.lineclassifier_headers += 1;
                }
                if event.fields.is_some() {
                    summary.lineclassifier_fields += 1;
                }
            }
            Err(_) => {
                summary.lineclassifier_extract_errors += 1;
            }
        }
    }

    /// Classify every line of `lines` in the current thread, preserving
    /// order.
    pub fn classify_lines<'a, I>(
        &mut self,
        lines: I,
    ) -> ClassifyResults
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .map(|line| self.classify(line))
            .collect()
    }

    /// Classify every line of `lines` using `threads` worker threads,
    /// preserving order.
    ///
    /// Lines are sent with their index to the workers over a bounded
    /// channel. Each worker classifies with its own `LineClassifier` and
    /// sends back the indexed result. The results are sorted by index and the
    /// statistics of every worker are merged into `self`.
    ///
    /// With `threads` of `0` or `1`, the lines are classified in the current
    /// thread. If any line comes back without a result (no worker thread could
    /// be started, or a worker panicked) the worker results are discarded and
    /// all lines are classified again in the current thread. So there is
    /// always exactly one result per line.
    pub fn classify_lines_parallel(
        &mut self,
        lines: &[&str],
        threads: usize,
    ) -> ClassifyResults {
        defn!("(lines {}, threads {})", lines.len(), threads);
        if threads <= 1 || lines.len() <= 1 {
            let results = self.classify_lines(lines.iter().copied());
            defx!("classified in current thread, return {} results", results.len());
            return results;
        }

        let (chan_send_dt, chan_recv_dt): (ChanSendDatum, ChanRecvDatum) =
            crossbeam_channel::bounded(CHANNEL_CAPACITY);
        let (chan_send_rs, chan_recv_rs) = crossbeam_channel::unbounded::<ChanResult>();

        let mut results: Vec<ChanResult> = Vec::with_capacity(lines.len());
        let summaries: Vec<SummaryLineClassifier> = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(threads);
            for threadn in 0..threads {
                let chan_recv_dt = chan_recv_dt.clone();
                let chan_send_rs = chan_send_rs.clone();
                match thread::Builder::new()
                    .name(format!("jcl_classify_{}", threadn))
                    .spawn_scoped(scope, move || exec_classifier_thread(chan_recv_dt, chan_send_rs))
                {
                    Ok(handle) => handles.push(handle),
                    Err(err) => {
                        e_err!("thread.name(\"jcl_classify_{}\").spawn() failed {:?}", threadn, err);
                    }
                }
            }
            // workers hold their own clones; these ends must close so the
            // loops below finish
            drop(chan_recv_dt);
            drop(chan_send_rs);
            if handles.is_empty() {
                return Vec::new();
            }
            defo!("spawned {} threads", handles.len());

            for (index, line) in lines.iter().enumerate() {
                if let Err(_err) = chan_send_dt.send((index, *line)) {
                    de_err!("chan_send_dt.send(({}, …)) failed {}", index, _err);
                    break;
                }
            }
            drop(chan_send_dt);

            results.extend(chan_recv_rs.iter());

            handles
                .into_iter()
                .filter_map(|handle| match handle.join() {
                    Ok(summary) => Some(summary),
                    Err(_err) => {
                        e_err!("classifier thread panicked {:?}", _err);
                        None
                    }
                })
                .collect()
        });

        let results: ClassifyResults = match results_in_order(results, lines.len()) {
            Some(results) => results,
            None => {
                // a worker failed to start or panicked, its lines have no result
                de_wrn!("missing results of worker threads, classify {} lines again", lines.len());
                let results = self.classify_lines(lines.iter().copied());
                defx!("missing results, classified in current thread, return {} results", results.len());
                return results;
            }
        };
        for summary in summaries.iter() {
            self.summary.merge(summary);
        }
        defx!("return {} results", results.len());

        results
    }

    /// Statistics of every line classified so far.
    pub fn summary(&self) -> SummaryLineClassifier {
        self.summary.clone()
    }

    /// Count of lines classified so far.
    pub fn count_lines(&self) -> Count {
        self.summary.lineclassifier_lines
    }
}

/// Put the indexed results of the worker threads back in line order.
///
/// `None` unless there is exactly one result for each index `0..count`.
pub(crate) fn results_in_order(
    mut results: Vec<ChanResult>,
    count: usize,
) -> Option<ClassifyResults> {
    if results.len() != count {
        return None;
    }
    results.sort_unstable_by_key(|(index, _)| *index);
    let mut ordered: ClassifyResults = Vec::with_capacity(count);
    for (expect, (index, result)) in results.into_iter().enumerate() {
        if index != expect {
            return None;
        }
        ordered.push(result);
    }
    debug_assert_eq!(ordered.len(), count);

    Some(ordered)
}

/// Worker thread of [`LineClassifier::classify_lines_parallel`]. Classify
/// each received line until the sender hangs up. Return the statistics.
fn exec_classifier_thread(
    chan_recv_dt: ChanRecvDatum,
    chan_send_rs: ChanSendResult,
) -> SummaryLineClassifier {
    defn!("{:?}", thread::current().name());
    let mut classifier = LineClassifier::new();
    for (index, line) in chan_recv_dt.iter() {
        let result = classifier.classify(line);
        if let Err(_err) = chan_send_rs.send((index, result)) {
            de_err!("chan_send_rs.send(({}, …)) failed {}", index, _err);
            break;
        }
    }
    defx!("{:?} classified {} lines", thread::current().name(), classifier.count_lines());

    classifier.summary()
}
