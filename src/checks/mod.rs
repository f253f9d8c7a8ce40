use std::fmt;

pub mod database;
pub mod encryption_key;

pub use database::check_database;
pub use encryption_key::check_encryption_key;

/// How a single check turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    Pass,
    Fail,
    /// The check couldn't run in this build; it counts as neither pass nor fail.
    Skip,
}

/// One line of a check's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    /// Plain text, e.g. the "Testing ..." header.
    Info(String),
    Success(String),
    Failure(String),
    Warning(String),
    /// Indented under the previous line.
    Detail(String),
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::Info(text) => f.write_str(text),
            Note::Success(text) => write!(f, "✅ {}", text),
            Note::Failure(text) => write!(f, "❌ {}", text),
            // The warning sign is narrower than the other markers in most terminals.
            Note::Warning(text) => write!(f, "⚠️  {}", text),
            Note::Detail(text) => write!(f, "   {}", text),
        }
    }
}

/// What a check found, plus everything it has to say about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub result: CheckResult,
    pub notes: Vec<Note>,
}

impl CheckOutcome {
    pub(crate) fn pass(mut notes: Vec<Note>, message: String) -> Self {
        notes.push(Note::Success(message));
        Self {
            result: CheckResult::Pass,
            notes,
        }
    }

    pub(crate) fn fail(mut notes: Vec<Note>, message: String) -> Self {
        notes.push(Note::Failure(message));
        Self {
            result: CheckResult::Fail,
            notes,
        }
    }
}
