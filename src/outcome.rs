use crate::error::Error;
use Outcome::{Failure, Value};

/// The result of applying a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The rule matched and the cursor moved past what it consumed.
    Value(T),
    /// The rule did not match; the error's `committed` flag decides whether
    /// the ancestors may backtrack.
    Failure(Error),
}

impl<T> Outcome<T> {
    pub fn is_value(&self) -> bool {
        matches!(self, Value(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Failure(_))
    }

    /// True only for a failure that forbids backtracking.
    pub fn is_committed(&self) -> bool {
        matches!(self, Failure(e) if e.committed)
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Value(v) => Some(v),
            Failure(_) => None,
        }
    }

    pub fn error(self) -> Option<Error> {
        match self {
            Value(_) => None,
            Failure(e) => Some(e),
        }
    }

    pub fn map<K, F>(self, f: F) -> Outcome<K>
    where
        F: FnOnce(T) -> K,
    {
        match self {
            Value(v) => Value(f(v)),
            Failure(e) => Failure(e),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Error> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Value(v) => Ok(v),
            Failure(e) => Err(e),
        }
    }
}

impl<T> From<Result<T, Error>> for Outcome<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(v) => Value(v),
            Err(e) => Failure(e),
        }
    }
}
