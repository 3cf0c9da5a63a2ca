use crate::error::{Error, Reason};
use crate::outcome::Outcome;
use crate::scan::ScanIt;
use crate::stop::Stop;

/// A parse context: the shared scan buffer plus the currently active boundary
/// predicates and the ambient `committed` flag.
///
/// Contexts are cheap stack values over one mutable buffer. Plain sub-rule
/// calls reuse the caller's context (and therefore its `committed` flag);
/// alternation branches, scoped overrides and recursive dispatch enter a
/// child context created with [`extend`](Context::extend) or
/// [`scope`](Context::scope), where the flag starts out `false` again.
pub struct Context<'a, 'c> {
    pub scan: &'c mut ScanIt<'a>,
    pub space: &'c dyn Stop,
    pub token: &'c dyn Stop,
    pub committed: bool,
}

impl<'a, 'c> Context<'a, 'c> {
    pub fn new(scan: &'c mut ScanIt<'a>, space: &'c dyn Stop, token: &'c dyn Stop) -> Self {
        Context {
            scan,
            space,
            token,
            committed: false,
        }
    }

    /// A child context over the same buffer, substituting the predicates only
    /// where supplied. The child starts a fresh match scope.
    pub fn extend<'x>(
        &'x mut self,
        space: Option<&'x dyn Stop>,
        token: Option<&'x dyn Stop>,
    ) -> Context<'a, 'x> {
        Context {
            scan: &mut *self.scan,
            space: space.unwrap_or(self.space),
            token: token.unwrap_or(self.token),
            committed: false,
        }
    }

    /// A fresh match scope with the same predicates.
    pub fn scope(&mut self) -> Context<'a, '_> {
        self.extend(None, None)
    }

    /// Skips the current space predicate.
    pub fn skip_trivia(&mut self) {
        self.scan.skip(self.space);
    }

    /// Consumes `n` bytes and the trivia after them.
    pub fn consume(&mut self, n: usize) {
        self.scan.consume(n, self.space);
    }

    pub fn peek(&self, n: usize) -> &'a str {
        self.scan.peek(n)
    }

    /// True if a token boundary, or the end of input, sits `n` bytes ahead.
    pub fn ends(&self, n: usize) -> bool {
        self.scan.ends(n, self.token)
    }

    /// Marks the current scope committed: past this point the enclosing
    /// alternation must not retry sibling alternatives.
    pub fn commit(&mut self) {
        self.committed = true;
    }

    /// An error at the current cursor, tagged with the ambient committed flag.
    /// Once raised, the flag travels with the error.
    pub fn raise(&self, reason: Reason) -> Error {
        Error::new(self.scan.cursor(), reason, self.committed)
    }

    /// Shortcut wrapping [`raise`](Context::raise) into a failed outcome.
    pub fn fail<T>(&self, reason: Reason) -> Outcome<T> {
        Outcome::Failure(self.raise(reason))
    }
}
