//! Per run aggregation of every non fatal issue.
use crate::error::{ParsingError, Warning};

use std::collections::BTreeMap;

#[cfg(feature = "log")]
use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Issue classification, used for counting
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IssueKind {
    MalformedLine,
    BadTimeField,
    BadNumericField,
    UnknownEnumValue,
    FieldCountMismatch,
    ChecksumMismatch,
    DuplicateTimestamp,
    DayRollover,
}

impl IssueKind {
    /// Returns true if this kind of issue is a warning
    /// (data was retained) rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::DuplicateTimestamp | Self::DayRollover)
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::MalformedLine => f.write_str("malformed line"),
            Self::BadTimeField => f.write_str("bad time field"),
            Self::BadNumericField => f.write_str("bad numeric field"),
            Self::UnknownEnumValue => f.write_str("unknown enum value"),
            Self::FieldCountMismatch => f.write_str("field count mismatch"),
            Self::ChecksumMismatch => f.write_str("checksum mismatch"),
            Self::DuplicateTimestamp => f.write_str("duplicate timestamp"),
            Self::DayRollover => f.write_str("day rollover"),
        }
    }
}

/// Either a [ParsingError] or a [Warning]
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    Error(ParsingError),
    Warning(Warning),
}

impl Issue {
    pub fn kind(&self) -> IssueKind {
        match self {
            Self::Error(e) => match e {
                ParsingError::MalformedLine => IssueKind::MalformedLine,
                ParsingError::BadTimeField(_) => IssueKind::BadTimeField,
                ParsingError::BadNumericField(_) => IssueKind::BadNumericField,
                ParsingError::UnknownEnumValue(_) => IssueKind::UnknownEnumValue,
                ParsingError::FieldCountMismatch { .. } => IssueKind::FieldCountMismatch,
                ParsingError::ChecksumMismatch { .. } => IssueKind::ChecksumMismatch,
            },
            Self::Warning(w) => match w {
                Warning::DuplicateTimestamp { .. } => IssueKind::DuplicateTimestamp,
                Warning::DayRollover { .. } => IssueKind::DayRollover,
            },
        }
    }
}

impl From<ParsingError> for Issue {
    fn from(e: ParsingError) -> Self {
        Self::Error(e)
    }
}

impl From<Warning> for Issue {
    fn from(w: Warning) -> Self {
        Self::Warning(w)
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Error(e) => write!(f, "{}", e),
            Self::Warning(w) => write!(f, "{}", w),
        }
    }
}

/// An [Issue] and the input line (1 based) it originates from
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub issue: Issue,
}

/// [Diagnostics] gathers all issues encountered in one run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    counts: BTreeMap<IssueKind, usize>,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Records a new issue, at given line number
    pub fn push<I: Into<Issue>>(&mut self, line: usize, issue: I) {
        let issue = issue.into();
        let kind = issue.kind();

        #[cfg(feature = "log")]
        {
            if kind.is_warning() {
                warn!("line {}: {}", line, issue);
            } else {
                debug!("line {}: {}", line, issue);
            }
        }

        *self.counts.entry(kind).or_insert(0) += 1;
        self.entries.push(Diagnostic { line, issue });
    }
    /// Returns number of issues of this kind
    pub fn count(&self, kind: IssueKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }
    /// Iterates the (kind, count) summary, for every kind encountered
    pub fn counts(&self) -> impl Iterator<Item = (IssueKind, usize)> + '_ {
        self.counts.iter().map(|(k, n)| (*k, *n))
    }
    /// Returns total number of issues
    pub fn total(&self) -> usize {
        self.entries.len()
    }
    /// Returns true if this run went without a single issue
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Iterates all issues in order of appearance
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.entries.iter()
    }
    /// Iterates errors only
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.entries.iter().filter(|d| !d.issue.kind().is_warning())
    }
    /// Iterates warnings only
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.entries.iter().filter(|d| d.issue.kind().is_warning())
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.counts.is_empty() {
            return f.write_str("no issue");
        }
        let summary = self
            .counts
            .iter()
            .map(|(kind, count)| format!("{}: {}", kind, count))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&summary)
    }
}
