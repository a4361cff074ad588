// src/bin/jcl.rs

//! Driver program _jcl_ drives the [_jcllib_].
//!
//! Processes user-passed command-line arguments.
//! Then reads each passed path whole, splits it into lines, classifies every
//! line with a [`LineClassifier`], and prints the ordered [`LogEvent`]s to
//! STDOUT, one per line, as
//!
//! ```text
//! KIND<TAB>[FIELDS<TAB>]LINE
//! ```
//!
//! If passed CLI option `--summary`, prints a [`Summary`] about each path
//! processed to STDERR.
//!
//! [_jcllib_]: jcllib
//! [`LineClassifier`]: jcllib::readers::lineclassifier::LineClassifier
//! [`LogEvent`]: jcllib::data::event::LogEvent
//! [`Summary`]: jcllib::readers::summary::Summary

#![allow(non_camel_case_types)]

use std::io::{Read, Write};
use std::process::ExitCode;

use ::anyhow::{Context, Result};
use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;
use ::jcllib::common::{strip_line_terminator, Count, FPath, FPATH_STDIN};
use ::jcllib::data::event::LogEvent;
#[allow(unused_imports)]
use ::jcllib::debug::printers::{de_err, de_wrn, e_err, e_wrn};
use ::jcllib::readers::lineclassifier::{reportable_events, LineClassifier};
use ::jcllib::readers::summary::Summary;
use ::si_trace_print::stack::stack_offset_set;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

// --------------------
// command-line parsing

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.1.3/termcolor/enum.ColorChoice.html
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ValueEnum, // from `clap`
)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

const CLI_HELP_AFTER: &str = r#"Each line of each report is printed as
    KIND<TAB>LINE
or, with --fields,
    KIND<TAB>FIELDS<TAB>LINE

When more than one PATH is passed, each printed line is prefixed with the
PATH and a ':'.

Exit code is failure if any PATH could not be read or any line could not be
fully classified."#;

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    name = "jcl",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(JVM Crash Lines)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path(s) of JVM fatal error reports, e.g. "hs_err_pid1234.log".
    /// Pass "-" to read a report from STDIN.
    #[clap(
        required = true,
        verbatim_doc_comment,
    )]
    paths: Vec<String>,

    /// Print all events, including those of discardable kinds
    /// (section headings, load average, pid, uptime).
    #[clap(
        short = 'a',
        long,
        verbatim_doc_comment,
    )]
    all: bool,

    /// Print unrecognized lines.
    #[clap(
        short = 'u',
        long,
        verbatim_doc_comment,
    )]
    unrecognized: bool,

    /// Print the fields extracted from each line, after the kind.
    #[clap(
        short = 'f',
        long,
        verbatim_doc_comment,
    )]
    fields: bool,

    /// Classify lines using this many worker threads.
    #[clap(
        short = 'j',
        long,
        verbatim_doc_comment,
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..=1024),
    )]
    threads: u16,

    /// Choose to print using colors.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Print a summary of each path processed to stderr.
    #[clap(
        short,
        long,
        verbatim_doc_comment,
    )]
    summary: bool,
}

/// Processed command-line options passed to [`process_path`].
#[derive(Debug)]
struct PrintOptions {
    all: bool,
    unrecognized: bool,
    fields: bool,
    threads: usize,
    /// prefix each printed line with the path
    prepend_path: bool,
}

// --------------------
// printing

/// Color used to print the kind of `event`.
fn color_of(event: &LogEvent) -> Color {
    if event.is_unrecognized() {
        Color::Red
    } else if event.is_discardable() {
        Color::Blue
    } else if event.is_header() {
        Color::Cyan
    } else if event.fields.is_some() {
        Color::Green
    } else {
        Color::Yellow
    }
}

/// Print colored `value` if possible using passed stream, otherwise print
/// plain output.
fn print_colored(
    color: Color,
    value: &str,
    out: &mut StandardStream,
) -> std::io::Result<()> {
    if let Err(err) = out.set_color(ColorSpec::new().set_fg(Some(color))) {
        de_err!("print_colored: out.set_color({:?}) returned error {}", color, err);
        return Err(err);
    }
    out.write_all(value.as_bytes())?;
    out.reset()
}

/// Print one `event` as `KIND<TAB>[FIELDS<TAB>]LINE`.
fn print_event(
    path: &FPath,
    event: &LogEvent,
    options: &PrintOptions,
    out: &mut StandardStream,
) -> std::io::Result<()> {
    if options.prepend_path {
        write!(out, "{}:", path)?;
    }
    print_colored(color_of(event), event.kind.as_str(), out)?;
    if options.fields {
        match &event.fields {
            Some(fields) => write!(out, "\t{}", fields)?,
            None => write!(out, "\t")?,
        }
    }
    writeln!(out, "\t{}", event.raw)
}

// --------------------
// processing

/// Read all of `path`, or all of STDIN if `path` is `"-"`.
///
/// Bytes that are not UTF-8 are replaced.
fn read_report(path: &FPath) -> Result<String> {
    let mut buffer: Vec<u8> = Vec::with_capacity(0x10000);
    if path == FPATH_STDIN {
        std::io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .context("failed to read STDIN")?;
    } else {
        buffer = std::fs::read(path).with_context(|| format!("failed to read {:?}", path))?;
    }

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Classify and print every line of the report at `path`.
///
/// Lines that could not be fully classified are printed to STDERR and
/// counted in the returned `Summary`.
fn process_path(
    path: &FPath,
    options: &PrintOptions,
    out: &mut StandardStream,
) -> Result<Summary> {
    defn!("({:?})", path);
    let report: String = read_report(path)?;
    let lines: Vec<&str> = report
        .split_inclusive('\n')
        .map(strip_line_terminator)
        .collect();
    defo!("read {} bytes, {} lines", report.len(), lines.len());

    let mut classifier = LineClassifier::new();
    let results = classifier.classify_lines_parallel(&lines, options.threads);
    let mut events: Vec<LogEvent> = Vec::with_capacity(results.len());
    for result in results.into_iter() {
        match result {
            Ok(event) => events.push(event),
            Err(err) => e_err!("{}: {}", path, err),
        }
    }
    if !options.all {
        events = reportable_events(events);
    }
    for event in events.iter() {
        if event.is_unrecognized() && !options.unrecognized {
            continue;
        }
        print_event(path, event, options, out).with_context(|| "failed to write to STDOUT")?;
    }
    out.flush()
        .with_context(|| "failed to flush STDOUT")?;
    let summary = Summary::new(path.clone(), report.len() as Count, classifier.summary(), None);
    defx!("{:?}", summary);

    Ok(summary)
}

/// Print each `Summary` to STDERR.
fn print_summaries(
    summaries: &[Summary],
    color_choice: ColorChoice,
) {
    let mut stderr = StandardStream::stderr(color_choice);
    for summary in summaries.iter() {
        if let Err(_err) = print_colored(Color::Green, &summary.path, &mut stderr) {
            de_err!("print_colored(…) failed {}", _err);
        }
        eprintln!();
        match &summary.error {
            Some(error) => eprintln!("  error        : {}", error),
            None => {
                eprintln!("  bytes        : {}", summary.bytes);
                eprint!("{}", summary.summarylineclassifier);
            }
        }
    }
}

/// Process the user-passed command-line arguments.
/// Process each path.
/// Determine a process return code.
pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    // map `CLI_Color_Choice` to `ColorChoice`
    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };
    let options = PrintOptions {
        all: args.all,
        unrecognized: args.unrecognized,
        fields: args.fields,
        threads: args.threads as usize,
        prepend_path: args.paths.len() > 1,
    };
    defo!("options {:?}", options);

    let mut stdout = StandardStream::stdout(color_choice);
    let mut summaries: Vec<Summary> = Vec::with_capacity(args.paths.len());
    let mut ok: bool = true;
    for path in args.paths.iter() {
        match process_path(path, &options, &mut stdout) {
            Ok(summary) => {
                if summary.has_error() {
                    ok = false;
                }
                summaries.push(summary);
            }
            Err(err) => {
                e_err!("{:#}", err);
                ok = false;
                summaries.push(Summary::new_failed(path.clone(), format!("{:#}", err)));
            }
        }
    }

    if args.summary {
        print_summaries(&summaries, color_choice);
    }

    let exitcode = if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    defx!("exitcode {:?}", exitcode);

    exitcode
}
