use thiserror::Error;

/// Why a rule failed.
///
/// Every reason renders through a fixed template; grammars and their tests can
/// rely on the exact wording.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Reason {
    /// The text at the cursor is not the expected literal.
    #[error("Expected {expected} but got something else.")]
    LiteralMismatch { expected: String },
    /// The keyword matched but runs straight into more word material.
    #[error("Expected trailing space after {keyword} but got something else.")]
    MissingBoundary { keyword: String },
    /// A token was expected and the boundary sits right at the cursor.
    #[error("Expected some token here.")]
    EmptyToken,
    /// A negative lookahead saw the pattern it prohibits.
    #[error("This pattern is explicitly prohibited here.")]
    ForbiddenPattern,
    /// No alternative of an alternation applied.
    #[error("Expected some subpattern here but gone none.")]
    NoAlternative,
    /// The input goes on where the grammar expects it to end.
    #[error("Expected the end of the file but got more text.")]
    TrailingInput,
    /// External failure, usually raised from a `try_map` validation.
    #[error("{0}")]
    Custom(String),
}

/// A located parse failure.
///
/// `committed` carries the cut/backtrack intent: `false` means "this
/// alternative did not apply, feel free to try another one", `true` means
/// "this was the right alternative and the input is malformed from here on" —
/// optionals and alternations must not swallow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} (offset {at})")]
pub struct Error {
    /// Byte offset of the cursor at the moment of failure.
    pub at: usize,
    pub reason: Reason,
    pub committed: bool,
}

impl Error {
    pub fn new(at: usize, reason: Reason, committed: bool) -> Self {
        Error {
            at,
            reason,
            committed,
        }
    }

    /// Re-tags the failure as committed.
    pub fn commit(mut self) -> Self {
        self.committed = true;
        self
    }
}
