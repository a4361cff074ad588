// src/data/catalog.rs

//! The catalog of known JVM fatal error report line shapes, and the
//! [`lookup`] of a line to its [`EventKind`].
//!
//! A JVM that crashes writes a "fatal error report", the file
//! `hs_err_pid<pid>.log`. Each line of that report has one of dozens of
//! shapes. Each shape of interest is declared once in
//! [`EVENT_PARSE_DATAS`] as an [`EventParseInstr`]: the [`EventKind`], a
//! whole-line anchored regular expression, an optional header regular
//! expression, and whether the kind is "discardable" (recognized but never
//! surfaced in a final report).
//!
//! The most relevant documents to understand this file are:
//! - `regex` crate [Regular Expression syntax].
//! - the JVM source `src/hotspot/share/utilities/vmError.cpp` which writes
//!   most of these lines.
//!
//! The most relevant function is [`lookup`].
//!
//! The most relevant constant is [`EVENT_PARSE_DATAS`].
//!
//! [Regular Expression syntax]: https://docs.rs/regex/1.11.1/regex/index.html#syntax

#![allow(non_camel_case_types)]
#![allow(non_upper_case_globals)]

#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use std::fmt;
use std::str::FromStr;

use ::const_format::concatcp;
use ::lazy_static::lazy_static;
use ::regex::{Regex, RegexSet};
#[allow(unused_imports)]
use ::si_trace_print::{dpfn, dpfo, dpfx, dpfñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EventKind
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The closed set of line shapes recognized within a fatal error report.
///
/// Every variant except [`Unrecognized`] has exactly one entry in
/// [`EVENT_PARSE_DATAS`].
///
/// [`Unrecognized`]: EventKind::Unrecognized
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum EventKind {
    /// `---------------  S U M M A R Y ------------`
    Heading,
    /// `timezone: UTC`
    Timezone,
    /// `VM state:not at safepoint (normal execution)`
    VmState,
    /// `rlimit: STACK 8192k, CORE infinity, NOFILE 65536, AS infinity`
    Rlimit,
    /// `load average:0.12 0.05 0.01`
    LoadAverage,
    /// `12345:`, the process id written by `jcmd` before its output
    Pid,
    /// `CDS archive(s) not mapped`
    CdsArchive,
    /// `Compressed class space mapped at: ...`
    CompressedClassSpace,
    /// `JVMTI agents:`
    JvmtiAgents,
    /// `/etc/ld.so.preload:`
    LdPreloadFile,
    /// `OutOfMemory and StackOverflow Exception counts:`
    ExceptionCounts,
    /// `Decoder state:`
    NativeDecoderState,
    /// `Transparent hugepage (THP) support:`
    TransparentHugepage,
    /// `[timeout occurred during error reporting in step "..."] after 30 s.`
    Timeout,
    /// `Decoding CodeBlob, name: ...`
    DecodingCodeBlob,
    /// `VM_Operation (0x...): G1CollectFull, mode: safepoint, ...`
    VmOperation,
    /// `OS uptime: 0 days 2:07 hours`
    Uptime,
    /// `G1BarrierSet`
    BarrierSet,
    /// `-                 Java Heap (reserved=4194304KB, committed=262144KB)`
    NativeMemoryTracking,
    /// No entry in [`EVENT_PARSE_DATAS`] matched.
    Unrecognized,
}

/// Length of [`EVENT_KINDS_ALL`].
pub const EVENT_KINDS_LEN: usize = 20;

/// Every [`EventKind`], in declaration order.
pub const EVENT_KINDS_ALL: [EventKind; EVENT_KINDS_LEN] = [
    EventKind::Heading,
    EventKind::Timezone,
    EventKind::VmState,
    EventKind::Rlimit,
    EventKind::LoadAverage,
    EventKind::Pid,
    EventKind::CdsArchive,
    EventKind::CompressedClassSpace,
    EventKind::JvmtiAgents,
    EventKind::LdPreloadFile,
    EventKind::ExceptionCounts,
    EventKind::NativeDecoderState,
    EventKind::TransparentHugepage,
    EventKind::Timeout,
    EventKind::DecodingCodeBlob,
    EventKind::VmOperation,
    EventKind::Uptime,
    EventKind::BarrierSet,
    EventKind::NativeMemoryTracking,
    EventKind::Unrecognized,
];

impl EventKind {
    /// The unique, stable identifier of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::Heading => "heading",
            EventKind::Timezone => "timezone",
            EventKind::VmState => "vm_state",
            EventKind::Rlimit => "rlimit",
            EventKind::LoadAverage => "load_average",
            EventKind::Pid => "pid",
            EventKind::CdsArchive => "cds_archive",
            EventKind::CompressedClassSpace => "compressed_class_space",
            EventKind::JvmtiAgents => "jvmti_agents",
            EventKind::LdPreloadFile => "ld_preload_file",
            EventKind::ExceptionCounts => "exception_counts",
            EventKind::NativeDecoderState => "native_decoder_state",
            EventKind::TransparentHugepage => "transparent_hugepage",
            EventKind::Timeout => "timeout",
            EventKind::DecodingCodeBlob => "decoding_code_blob",
            EventKind::VmOperation => "vm_operation",
            EventKind::Uptime => "uptime",
            EventKind::BarrierSet => "barrier_set",
            EventKind::NativeMemoryTracking => "native_memory_tracking",
            EventKind::Unrecognized => "unrecognized",
        }
    }

    /// The catalog entry for this kind. `None` only for
    /// [`EventKind::Unrecognized`].
    pub fn parse_instr(&self) -> Option<&'static EventParseInstr<'static>> {
        event_parse_datas_index_of(*self).map(|index| &EVENT_PARSE_DATAS[index])
    }

    /// Matched but never surfaced in a final report?
    pub fn is_discardable(&self) -> bool {
        match self.parse_instr() {
            Some(instr) => instr.discardable,
            None => false,
        }
    }

    /// Does this kind have a fixed introductory line distinct from its data
    /// lines?
    pub fn has_header(&self) -> bool {
        match self.parse_instr() {
            Some(instr) => instr.header_pattern.is_some(),
            None => false,
        }
    }

    pub const fn is_unrecognized(&self) -> bool {
        matches!(self, EventKind::Unrecognized)
    }
}

impl fmt::Display for EventKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A string that is not the [`as_str`] of any [`EventKind`].
///
/// [`as_str`]: EventKind::as_str
#[derive(Clone, Debug, Eq, PartialEq, ::thiserror::Error)]
#[error("unknown event kind {0:?}")]
pub struct EventKindParseError(pub String);

impl FromStr for EventKind {
    type Err = EventKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for kind in EVENT_KINDS_ALL.iter() {
            if kind.as_str() == s {
                return Ok(*kind);
            }
        }

        Err(EventKindParseError(s.to_string()))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Line shape regular expressions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Regular expression formatting pattern, passed to [`regex::Regex`].
///
/// [`regex::Regex`]: https://docs.rs/regex/1.11.1/regex/struct.Regex.html
pub type EventRegex_str = str;

/// Regular expression fragment, composed into an [`EventRegex_str`].
pub type RegexPattern = str;

/// Regular expression capture group name, used within the regular expression
/// and for later retrieval via [`regex::Captures::name`].
///
/// [`regex::Captures::name`]: https://docs.rs/regex/1.11.1/regex/struct.Captures.html#method.name
pub type CaptureGroupName = str;

/// The regular expression "class" used for matching whole lines.
pub type EventRegex = Regex;

/// [`CaptureGroupName`] timezone text
pub const CGN_TIMEZONE: &CaptureGroupName = "timezone";
/// [`CaptureGroupName`] optional blank between `VM state:` and the state
pub const CGN_STATE_SEP: &CaptureGroupName = "state_sep";
/// [`CaptureGroupName`] VM state phrase
pub const CGN_STATE: &CaptureGroupName = "state";
/// [`CaptureGroupName`] list of resource limits of an `rlimit:` line
pub const CGN_LIMITS: &CaptureGroupName = "limits";
/// [`CaptureGroupName`] list of resource limits of an `rlimit (soft/hard):` line
pub const CGN_LIMITS_SOFTHARD: &CaptureGroupName = "limits_softhard";
/// [`CaptureGroupName`] VM operation name
pub const CGN_OPERATION: &CaptureGroupName = "operation";
/// [`CaptureGroupName`] VM operation mode
pub const CGN_MODE: &CaptureGroupName = "mode";
/// [`CaptureGroupName`] barrier set identifier
pub const CGN_BARRIER_SET: &CaptureGroupName = "barrier_set";
/// [`CaptureGroupName`] native memory tracking category
pub const CGN_CATEGORY: &CaptureGroupName = "category";
/// [`CaptureGroupName`] native memory tracking committed KB of a category
pub const CGN_COMMITTED: &CaptureGroupName = "committed";
/// [`CaptureGroupName`] native memory tracking `Total` row
pub const CGN_TOTAL: &CaptureGroupName = "total";
/// [`CaptureGroupName`] native memory tracking committed KB of the `Total` row
pub const CGN_TOTAL_COMMITTED: &CaptureGroupName = "total_committed";

/// for help in testing only
#[doc(hidden)]
#[cfg(any(debug_assertions, test))]
pub(crate) const CGN_ALL: [&CaptureGroupName; 12] = [
    CGN_TIMEZONE,
    CGN_STATE_SEP,
    CGN_STATE,
    CGN_LIMITS,
    CGN_LIMITS_SOFTHARD,
    CGN_OPERATION,
    CGN_MODE,
    CGN_BARRIER_SET,
    CGN_CATEGORY,
    CGN_COMMITTED,
    CGN_TOTAL,
    CGN_TOTAL_COMMITTED,
];

/// [`RegexPattern`] hexadecimal address, `0x00007f27bd0c5e40`
pub(crate) const RP_HEX: &RegexPattern = r"0x[[:xdigit:]]{1,16}";
/// [`RegexPattern`] decimal count
pub(crate) const RP_NUM: &RegexPattern = r"\d+";
/// [`RegexPattern`] decimal with optional fraction
pub(crate) const RP_DEC: &RegexPattern = r"\d+(?:\.\d+)?";

const RP_HEADING: &RegexPattern = r"-{15} {2}[A-Z](?: [A-Z])* {1,2}-{3,}";

const RP_TIMEZONE: &RegexPattern = r"timezone: (?P<timezone>.+)";

// legacy JVMs write `VM state:at safepoint`, later JVMs `VM state: at safepoint`
const RP_VM_STATE: &RegexPattern = r"VM state:(?P<state_sep> ?)(?P<state>\S.*)";

/// written in place of the value(s) of a resource when `getrlimit` fails
pub const RLIMIT_UNKNOWN: &str = "could not obtain value";
/// [`RegexPattern`] one rlimit value, `8192k`, `4096`, `infinity`
const RP_RLIMIT_VALUE: &RegexPattern = r"(?:infinity|\d+k?)";
const RP_RLIMIT_ITEM: &RegexPattern = concatcp!("(?:", RP_RLIMIT_VALUE, "|", RLIMIT_UNKNOWN, ")");
const RP_RLIMIT_ITEM_SOFTHARD: &RegexPattern =
    concatcp!("(?:", RP_RLIMIT_VALUE, "/", RP_RLIMIT_VALUE, "|", RLIMIT_UNKNOWN, ")");
// the soft/hard form separates items with ` , `
const RP_RLIMIT: &RegexPattern = concatcp!(
    "rlimit: (?P<limits>STACK ", RP_RLIMIT_ITEM, "(?: ?, [A-Z]+ ", RP_RLIMIT_ITEM, ")*)",
    r"|rlimit \(soft/hard\): (?P<limits_softhard>STACK ", RP_RLIMIT_ITEM_SOFTHARD,
    "(?: ?, [A-Z]+ ", RP_RLIMIT_ITEM_SOFTHARD, ")*)"
);

const RP_LOAD_AVERAGE: &RegexPattern =
    concatcp!("load average: ?", RP_DEC, " ", RP_DEC, " ", RP_DEC);

const RP_PID: &RegexPattern = concatcp!(RP_NUM, ":");

const RP_CDS_ARCHIVE: &RegexPattern = concatcp!(
    r"CDS archive\(s\) (?:mapped at: \[", RP_HEX, "-", RP_HEX, "-", RP_HEX,
    r"\), size ", RP_NUM, ", SharedBaseAddress: ", RP_HEX,
    ", ArchiveRelocationMode: ", RP_NUM, r"\.|not mapped)"
);

const RP_COMPRESSED_CLASS_SPACE: &RegexPattern = concatcp!(
    "Compressed class space mapped at: ", RP_HEX, "-", RP_HEX, ", reserved size: ", RP_NUM,
    "|Narrow klass base: ", RP_HEX, ", Narrow klass shift: ", RP_NUM,
    "(?:, Narrow klass range: ", RP_HEX, ")?"
);

const RP_JVMTI_AGENTS_HEADER: &RegexPattern = "JVMTI agents:(?: none)?";
const RP_JVMTI_AGENTS: &RegexPattern = concatcp!(
    r"\S*[^\s:] path:\S+, (?:not )?loaded, (?:not )?initialized, initialization time: ", RP_DEC, " ms"
);

const RP_LD_PRELOAD_FILE_HEADER: &RegexPattern = r"/etc/ld\.so\.preload:";
const RP_LD_PRELOAD_FILE: &RegexPattern = r"/\S+\.so(?:\.\d+)*";

const RP_EXCEPTION_COUNTS_HEADER: &RegexPattern = "OutOfMemory and StackOverflow Exception counts:";
const RP_EXCEPTION_COUNTS: &RegexPattern = concatcp!(
    "OutOfMemoryError (?:java_heap|metaspace|class_metaspace|array_size)_errors=", RP_NUM,
    "|StackOverflowErrors=", RP_NUM,
    "|LinkageErrors=", RP_NUM
);

const RP_NATIVE_DECODER_STATE_HEADER: &RegexPattern = "Decoder state:";
const RP_NATIVE_DECODER_STATE: &RegexPattern = "  - (?:DWARF|ELF|Windows|Mach-O|Native) decoder: .+";

const RP_TRANSPARENT_HUGEPAGE_HEADER: &RegexPattern = r"Transparent hugepage \(THP\) support:";
const RP_TRANSPARENT_HUGEPAGE: &RegexPattern = concatcp!(
    "  THP mode: (?:always|madvise|never|unknown)",
    "|  THP pagesize: ", RP_NUM, "[KMG]?",
    r"|/sys/kernel/mm/transparent_hugepage/(?:enabled|defrag|hpage_pmd_size|shmem_enabled)(?: \([^)]+\))?: .+"
);

const RP_TIMEOUT: &RegexPattern = concatcp!(
    r#"\[timeout occurred during error reporting in step "[^"]*"\] after "#, RP_NUM, r" s\.",
    "|------ Timeout during error reporting after ", RP_NUM, r" s\. ------"
);

const RP_DECODING_CODE_BLOB: &RegexPattern = concatcp!(
    r"Decoding CodeBlob, name: .+, at +\[", RP_HEX, ", ", RP_HEX, r"\] +", RP_NUM, " bytes"
);

const RP_VM_OPERATION: &RegexPattern = concatcp!(
    r"VM_Operation \(", RP_HEX, r"\): (?P<operation>\w+), ",
    "mode: (?P<mode>safepoint|no safepoint|concurrent|async safepoint), ",
    "requested by thread ", RP_HEX
);

const RP_UPTIME: &RegexPattern = concatcp!("OS uptime: ?", RP_DEC, " days? ", r"\d{1,2}:\d{2} hours");

const RP_BARRIER_SET: &RegexPattern =
    "(?:Barrier set: )?(?P<barrier_set>(?:CardTable|G1|Shenandoah|Z|X|Epsilon|ModRef)BarrierSet)";

const RP_NATIVE_MEMORY_TRACKING: &RegexPattern = concatcp!(
    r"-\s+(?P<category>[A-Za-z][A-Za-z ]*[A-Za-z]) \(reserved=", RP_NUM, "KB, committed=(?P<committed>", RP_NUM, ")KB\\)",
    "|(?P<total>Total): reserved=", RP_NUM, "KB, committed=(?P<total_committed>", RP_NUM, ")KB"
);

/// Anchor a [`RegexPattern`] so it only matches a whole line.
macro_rules! anchored {
    ($rp:expr) => {
        concatcp!("^(?:", $rp, ")$")
    };
    ($rp_header:expr, $rp_data:expr) => {
        concatcp!("^(?:", $rp_header, "|", $rp_data, ")$")
    };
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EventParseInstr
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `Instr`uctions for `pars`ing a line into an [`EventKind`].
///
/// Tested in test `test_EVENT_PARSE_DATAS_builtin`.
#[derive(Hash)]
pub struct EventParseInstr<'a> {
    pub kind: EventKind,
    /// Whole-line anchored regex pattern matching both the header line (if
    /// any) and the data lines of `kind`.
    pub regex_pattern: &'a EventRegex_str,
    /// Whole-line anchored regex pattern matching only the header line.
    pub header_pattern: Option<&'a EventRegex_str>,
    /// Recognized but informational noise; the aggregator drops these.
    pub discardable: bool,
    /// Hardcoded self-test cases. Each must match `regex_pattern`.
    #[cfg(any(debug_assertions, test))]
    pub _test_cases: &'a [&'a str],
    /// Source code line number of declaration, to aid debugging.
    pub _line_num: u32,
}

/// Declare a [`EventParseInstr`] more easily.
#[macro_export]
macro_rules! EVPD {
    (
        $kind:expr,
        $rp:expr,
        $rp_header:expr,
        $discardable:literal,
        $test_cases:expr,
        $line_num:expr,
    ) => {
        $crate::data::catalog::EventParseInstr {
            kind: $kind,
            regex_pattern: $rp,
            header_pattern: $rp_header,
            discardable: $discardable,
            #[cfg(any(debug_assertions, test))]
            _test_cases: $test_cases,
            _line_num: $line_num,
        }
    };
}
// Allow easy macro import via `use jcllib::data::catalog::EVPD;`
pub use EVPD;

/// Implement ordering traits to allow sorting collections of
/// `EventParseInstr`.
///
/// Only used for tests.
impl Ord for EventParseInstr<'_> {
    fn cmp(
        &self,
        other: &Self,
    ) -> std::cmp::Ordering {
        (self.regex_pattern, &self.kind).cmp(&(other.regex_pattern, &other.kind))
    }
}

impl PartialOrd for EventParseInstr<'_> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EventParseInstr<'_> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.regex_pattern == other.regex_pattern && self.kind == other.kind
    }
}

impl Eq for EventParseInstr<'_> {}

impl fmt::Debug for EventParseInstr<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        // regexp strings can be very long, truncate it
        const MAXLEN: usize = 30;
        let mut rp: String = String::with_capacity(MAXLEN + 5);
        rp.extend(
            self.regex_pattern
                .chars()
                .take(MAXLEN),
        );
        if self.regex_pattern.len() > MAXLEN {
            rp.push('…');
        }
        let mut f_ = f.debug_struct("EventParseInstr:");
        f_.field("kind", &self.kind)
            .field("regex_pattern", &rp)
            .field("header", &self.header_pattern.is_some())
            .field("discardable", &self.discardable);
        f_.field("line", &self._line_num);

        f_.finish()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// the global list of built-in line parsing "instructions"
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Index into the global [`EVENT_PARSE_DATAS`]
pub type EventParseInstrsIndex = usize;

/// A run-time created vector of [`EventRegex`] instances that is a
/// counterpart to [`EVENT_PARSE_DATAS`]
pub type EventParseInstrsRegexVec = Vec<EventRegex>;

/// Length of [`EVENT_PARSE_DATAS`]
pub const EVENT_PARSE_DATAS_LEN: usize = 19;

/// Built-in [`EventParseInstr`] line parsing patterns.
///
/// Order of declaration is the priority order; [`lookup`] returns the first
/// entry that matches. Every pattern is anchored to the whole line and the
/// shapes are mutually exclusive, so in practice the order only affects
/// speed. Test `test_EVENT_PARSE_DATAS_test_cases` checks no two entries
/// match the same built-in test case.
///
/// Timezone and VM state were each once recognized by two separate entries
/// (an older and a newer kind for the same shape). There is now one entry
/// per shape; the VM state era is recorded in the extracted fields.
pub static EVENT_PARSE_DATAS: [EventParseInstr; EVENT_PARSE_DATAS_LEN] = [
    // ---------------------------------------------------------------------------------------------
    // section separators, e.g.
    //
    //     ---------------  S U M M A R Y ------------
    //     ---------------  T H R E A D  ---------------
    //
    EVPD!(
        EventKind::Heading,
        anchored!(RP_HEADING),
        None,
        true,
        &[
            "---------------  S U M M A R Y ------------",
            "---------------  T H R E A D  ---------------",
            "---------------  P R O C E S S  ---------------",
            "---------------  S Y S T E M  ---------------",
            "---------------  E N D  ---------------",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::Timezone,
        anchored!(RP_TIMEZONE),
        None,
        false,
        &[
            "timezone: UTC",
            "timezone: CEST",
            "timezone: Eastern Daylight Time",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::VmState,
        anchored!(RP_VM_STATE),
        None,
        false,
        &[
            "VM state:at safepoint (normal execution)",
            "VM state:not at safepoint (normal execution)",
            "VM state: not at safepoint (normal execution)",
            "VM state: synchronizing (normal execution)",
            "VM state:not at safepoint (shutting down)",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::Rlimit,
        anchored!(RP_RLIMIT),
        None,
        false,
        &[
            "rlimit: STACK 8192k, CORE infinity, NOFILE 65536, AS infinity",
            "rlimit: STACK 8192k, CORE 0k, NPROC 4096, NOFILE 4096, AS infinity",
            "rlimit: STACK 8192k, CORE could not obtain value, NOFILE 65536, AS infinity",
            "rlimit (soft/hard): STACK 8192k/infinity , CORE 0k/infinity , NPROC 30324/30324 , NOFILE 65536/65536 , AS infinity/infinity , CPU infinity/infinity , DATA infinity/infinity , FSIZE infinity/infinity , MEMLOCK 64k/64k",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::LoadAverage,
        anchored!(RP_LOAD_AVERAGE),
        None,
        true,
        &[
            "load average:0.12 0.05 0.01",
            "load average: 1.79 1.32 1.25",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // process id written by `jcmd <pid> VM.native_memory`, e.g.
    //
    //     12345:
    //
    //     Native Memory Tracking:
    //
    EVPD!(
        EventKind::Pid,
        anchored!(RP_PID),
        None,
        true,
        &[
            "12345:",
            "1:",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::CdsArchive,
        anchored!(RP_CDS_ARCHIVE),
        None,
        false,
        &[
            "CDS archive(s) mapped at: [0x0000000800000000-0x0000000800be2000-0x0000000800be2000), size 12460032, SharedBaseAddress: 0x0000000800000000, ArchiveRelocationMode: 0.",
            "CDS archive(s) mapped at: [0x00007f1a8f000000-0x00007f1a8fc86000-0x00007f1a8fc86000), size 13131776, SharedBaseAddress: 0x00007f1a8f000000, ArchiveRelocationMode: 1.",
            "CDS archive(s) not mapped",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::CompressedClassSpace,
        anchored!(RP_COMPRESSED_CLASS_SPACE),
        None,
        false,
        &[
            "Compressed class space mapped at: 0x0000000800c00000-0x0000000840c00000, reserved size: 1073741824",
            "Narrow klass base: 0x0000000800000000, Narrow klass shift: 0",
            "Narrow klass base: 0x0000000800000000, Narrow klass shift: 0, Narrow klass range: 0x100000000",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::JvmtiAgents,
        anchored!(RP_JVMTI_AGENTS_HEADER, RP_JVMTI_AGENTS),
        Some(anchored!(RP_JVMTI_AGENTS_HEADER)),
        false,
        &[
            "JVMTI agents:",
            "JVMTI agents: none",
            "/opt/dynatrace/oneagent/agent/lib64/liboneagentloader.so path:/opt/dynatrace/oneagent/agent/lib64/liboneagentloader.so, loaded, initialized, initialization time: 12 ms",
            "jdwp path:/usr/lib/jvm/java-21/lib/libjdwp.so, loaded, not initialized, initialization time: 0.25 ms",
            r"C:\agents\agent.dll path:C:\agents\agent.dll, not loaded, not initialized, initialization time: 0 ms",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::LdPreloadFile,
        anchored!(RP_LD_PRELOAD_FILE_HEADER, RP_LD_PRELOAD_FILE),
        Some(anchored!(RP_LD_PRELOAD_FILE_HEADER)),
        false,
        &[
            "/etc/ld.so.preload:",
            "/$LIB/libonload.so",
            "/usr/lib64/libjemalloc.so.2",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::ExceptionCounts,
        anchored!(RP_EXCEPTION_COUNTS_HEADER, RP_EXCEPTION_COUNTS),
        Some(anchored!(RP_EXCEPTION_COUNTS_HEADER)),
        false,
        &[
            "OutOfMemory and StackOverflow Exception counts:",
            "OutOfMemoryError java_heap_errors=1",
            "OutOfMemoryError metaspace_errors=2",
            "StackOverflowErrors=3",
            "LinkageErrors=56",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::NativeDecoderState,
        anchored!(RP_NATIVE_DECODER_STATE_HEADER, RP_NATIVE_DECODER_STATE),
        Some(anchored!(RP_NATIVE_DECODER_STATE_HEADER)),
        false,
        &[
            "Decoder state:",
            "  - ELF decoder: initialized",
            "  - DWARF decoder: not available",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::TransparentHugepage,
        anchored!(RP_TRANSPARENT_HUGEPAGE_HEADER, RP_TRANSPARENT_HUGEPAGE),
        Some(anchored!(RP_TRANSPARENT_HUGEPAGE_HEADER)),
        false,
        &[
            "Transparent hugepage (THP) support:",
            "  THP mode: madvise",
            "  THP pagesize: 2M",
            "/sys/kernel/mm/transparent_hugepage/enabled: always [madvise] never",
            "/sys/kernel/mm/transparent_hugepage/defrag (defrag/compaction efforts parameter): always defer defer+madvise [madvise] never",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::Timeout,
        anchored!(RP_TIMEOUT),
        None,
        false,
        &[
            r#"[timeout occurred during error reporting in step "printing summary machine and OS info"] after 30 s."#,
            "------ Timeout during error reporting after 120 s. ------",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::DecodingCodeBlob,
        anchored!(RP_DECODING_CODE_BLOB),
        None,
        false,
        &[
            "Decoding CodeBlob, name: I2C/C2I adapters, at  [0x00007f27bd0c5e40, 0x00007f27bd0c5f80]  320 bytes",
            "Decoding CodeBlob, name: StubRoutines (2), at  [0x00007f8d5d3f7d00, 0x00007f8d5d3f9880]  7040 bytes",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::VmOperation,
        anchored!(RP_VM_OPERATION),
        None,
        false,
        &[
            "VM_Operation (0x00007fffaa62ab20): PrintThreads, mode: safepoint, requested by thread 0x0000000002d8b000",
            "VM_Operation (0x00007f6bdb9fe8e0): G1CollectFull, mode: safepoint, requested by thread 0x00007f6c0c01e800",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::Uptime,
        anchored!(RP_UPTIME),
        None,
        true,
        &[
            "OS uptime: 0 days 2:07 hours",
            "OS uptime: 1 day 0:15 hours",
            "OS uptime: 23.5 days 11:40 hours",
        ],
        line!(),
    ),
    EVPD!(
        EventKind::BarrierSet,
        anchored!(RP_BARRIER_SET),
        None,
        false,
        &[
            "G1BarrierSet",
            "ShenandoahBarrierSet",
            "Barrier set: CardTableBarrierSet",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // native memory tracking summary, e.g.
    //
    //     Total: reserved=5799365KB, committed=492261KB
    //     -                 Java Heap (reserved=4194304KB, committed=262144KB)
    //                                 (mmap: reserved=4194304KB, committed=262144KB)
    //
    EVPD!(
        EventKind::NativeMemoryTracking,
        anchored!(RP_NATIVE_MEMORY_TRACKING),
        None,
        false,
        &[
            "-                 Java Heap (reserved=4194304KB, committed=262144KB)",
            "-                     Class (reserved=1056892KB, committed=5244KB)",
            "-        Arena Chunk (reserved=187KB, committed=187KB)",
            "Total: reserved=5799365KB, committed=492261KB",
        ],
        line!(),
    ),
];

/// Index of `kind` within [`EVENT_PARSE_DATAS`].
pub fn event_parse_datas_index_of(kind: EventKind) -> Option<EventParseInstrsIndex> {
    EVENT_PARSE_DATAS
        .iter()
        .position(|instr| instr.kind == kind)
}

lazy_static! {
    /// Run-time created copy of [`EVENT_PARSE_DATAS`] with compiled
    /// [`Regex`].
    ///
    /// [`Regex`]: https://docs.rs/regex/1.11.1/regex/struct.Regex.html
    pub(crate) static ref EVENT_PARSE_DATAS_REGEX_VEC: EventParseInstrsRegexVec =
        EVENT_PARSE_DATAS.iter().map(
            |x| Regex::new(x.regex_pattern).unwrap()
        ).collect();

    /// Run-time created counterpart to [`EVENT_PARSE_DATAS`] header patterns.
    pub(crate) static ref EVENT_PARSE_DATAS_HEADER_REGEX_VEC: Vec<Option<EventRegex>> =
        EVENT_PARSE_DATAS.iter().map(
            |x| x.header_pattern.map(|rp| Regex::new(rp).unwrap())
        ).collect();

    /// All of [`EVENT_PARSE_DATAS`] patterns compiled into one
    /// [`RegexSet`], so a line is scanned once for all entries.
    ///
    /// [`RegexSet`]: https://docs.rs/regex/1.11.1/regex/struct.RegexSet.html
    pub(crate) static ref EVENT_PARSE_DATAS_REGEX_SET: RegexSet =
        RegexSet::new(
            EVENT_PARSE_DATAS.iter().map(|x| x.regex_pattern)
        ).unwrap();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// lookup
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Return the [`EventKind`] of the first entry in [`EVENT_PARSE_DATAS`]
/// whose pattern matches all of `line`, else
/// [`EventKind::Unrecognized`].
///
/// `line` should not have a line terminator.
pub fn lookup(line: &str) -> EventKind {
    dpfn!("({:?})", str_to_String_noraw(line));
    let kind: EventKind = match lookup_index(line) {
        Some(index) => EVENT_PARSE_DATAS[index].kind,
        None => EventKind::Unrecognized,
    };
    dpfx!("return {:?}", kind);

    kind
}

/// Return the index into [`EVENT_PARSE_DATAS`] of the first entry that
/// matches `line`.
pub fn lookup_index(line: &str) -> Option<EventParseInstrsIndex> {
    EVENT_PARSE_DATAS_REGEX_SET
        .matches(line)
        .iter()
        .next()
}

/// Return every [`EventKind`] whose pattern matches `line`, in priority
/// order.
///
/// More than one returned kind means the catalog is ambiguous for `line`.
pub fn lookup_all(line: &str) -> Vec<EventKind> {
    EVENT_PARSE_DATAS_REGEX_SET
        .matches(line)
        .iter()
        .map(|index| EVENT_PARSE_DATAS[index].kind)
        .collect()
}

/// Does `line` match the header pattern of `kind`?
///
/// Always `false` for kinds without a header.
pub fn is_header(
    kind: EventKind,
    line: &str,
) -> bool {
    match event_parse_datas_index_of(kind) {
        Some(index) => match &EVENT_PARSE_DATAS_HEADER_REGEX_VEC[index] {
            Some(regex) => regex.is_match(line),
            None => false,
        },
        None => false,
    }
}

/// The compiled whole-line [`EventRegex`] for `kind`.
///
/// `None` only for [`EventKind::Unrecognized`].
pub fn event_regex(kind: EventKind) -> Option<&'static EventRegex> {
    event_parse_datas_index_of(kind).map(|index| &EVENT_PARSE_DATAS_REGEX_VEC[index])
}
