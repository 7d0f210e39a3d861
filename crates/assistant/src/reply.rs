//! Structured assistant replies.

/// Visual severity of a reply, returned alongside the text so the UI
/// does not have to guess from marker substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

/// One assistant reply: the user-visible text plus its severity.
///
/// The text keeps the original marker vocabulary (`✅`, `❌`, `⚠️`,
/// `🔒`) so transcripts read the same as before; the severity field is
/// the authoritative classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub severity: Severity,
}

impl Reply {
    /// Create a reply with the given severity.
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    /// An informational reply.
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info)
    }

    /// A success reply.
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Success)
    }

    /// An error reply.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Error)
    }

    /// A warning reply.
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Warning)
    }
}
