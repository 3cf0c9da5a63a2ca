use crate::combinators::{
    Capture, CommitOn, Discard, Fails, Many, Map, Maybe, Or, Peek, Scope, Skip, Then, Trace,
    TryMap, WithSpace, WithToken, Zip,
};
use crate::context::Context;
use crate::outcome::Outcome;
use crate::scan::ScanIt;
use crate::stop::{Hard, NotSpace, Stop};

/// A parsing rule: an immutable value that can be applied at the current
/// cursor of a [`Context`], producing a typed value or a located failure.
///
/// A grammar builds its rule tree once and reuses it across parses; the tree
/// is read-only while parsing, all mutation goes through the context.
///
/// Custom leaves are ordinary implementations of this trait:
///
/// ```
/// use scanit::context::Context;
/// use scanit::error::Reason;
/// use scanit::outcome::Outcome;
/// use scanit::rule::{parse, Rule};
///
/// struct Digits;
///
/// impl<'a> Rule<'a> for Digits {
///     type Output = &'a str;
///
///     fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<&'a str> {
///         let size = ctx.scan.rest().bytes().take_while(u8::is_ascii_digit).count();
///         if size == 0 {
///             return ctx.fail(Reason::Custom("expected digits".into()));
///         }
///         let text = ctx.peek(size);
///         ctx.consume(size);
///         Outcome::Value(text)
///     }
/// }
///
/// assert_eq!(parse(&Digits, "42 and more").ok(), Some("42"));
/// ```
pub trait Rule<'a> {
    type Output;

    /// Applies the rule at the context's current cursor, advancing it past
    /// whatever the rule consumed on success.
    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<Self::Output>;
}

/// A boxed, type-erased rule.
pub type BoxedRule<'a, T> = Box<dyn Rule<'a, Output = T> + 'a>;

impl<'a, T> Rule<'a> for BoxedRule<'a, T> {
    type Output = T;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<T> {
        (**self).apply(ctx)
    }
}

/// Plain functions over a context are rules too, which keeps one-off leaves
/// light.
impl<'a, T, F> Rule<'a> for F
where
    F: for<'r, 'c> Fn(&'r mut Context<'a, 'c>) -> Outcome<T>,
{
    type Output = T;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<T> {
        self(ctx)
    }
}

/// The builder surface of the rule algebra: every method wraps `self` into the
/// corresponding combinator.
pub trait RuleExt<'a>: Rule<'a> + Sized {
    /// Pairs this rule's result with `other`'s, run in order.
    fn zip<B: Rule<'a>>(self, other: B) -> Zip<Self, B> {
        Zip::new(self, other)
    }

    /// Runs `self` then `other`, keeping only `other`'s result. The usual way
    /// to drop the unit result of a literal or keyword.
    fn then<B: Rule<'a>>(self, other: B) -> Then<Self, B> {
        Then::new(self, other)
    }

    /// Runs `self` then `other`, keeping only `self`'s result.
    fn skip<B: Rule<'a>>(self, other: B) -> Skip<Self, B> {
        Skip::new(self, other)
    }

    /// Converts the result with a pure function.
    fn map<K, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> K,
    {
        Map::new(self, f)
    }

    /// Converts the result with a function that may reject it; a rejection
    /// fails the parse at the current cursor with a custom reason.
    fn try_map<K, F>(self, f: F) -> TryMap<Self, F>
    where
        F: Fn(Self::Output) -> Result<K, String>,
    {
        TryMap::new(self, f)
    }

    /// Makes the rule optional; only a committed failure still propagates.
    fn maybe(self) -> Maybe<Self> {
        Maybe::new(self)
    }

    /// Applies the rule as often as it matches, collecting the results. Zero
    /// matches is a valid outcome.
    fn many(self) -> Many<Self> {
        Many::new(self)
    }

    /// Applies the rule and restores the cursor unconditionally.
    fn peek(self) -> Peek<Self> {
        Peek::new(self)
    }

    /// Negative lookahead: succeeds exactly when the rule does not match.
    fn fails(self) -> Fails<Self> {
        Fails::new(self)
    }

    /// Ordered choice: tries `self`, then `other`, each in a fresh match
    /// scope from the same start cursor.
    fn or<B>(self, other: B) -> Or<Self, B>
    where
        B: Rule<'a, Output = Self::Output>,
    {
        Or::new(self, other)
    }

    /// Returns the raw source slice the rule consumed instead of its value.
    fn capture(self) -> Capture<Self> {
        Capture::new(self)
    }

    /// Drops the rule's value, keeping only success or failure.
    fn discard(self) -> Discard<Self> {
        Discard::new(self)
    }

    /// Runs the rule in a fresh match scope, so a cut inside does not leak
    /// into the surrounding scope.
    fn scoped(self) -> Scope<Self> {
        Scope::new(self)
    }

    /// Replaces the token boundary predicate for the duration of the rule.
    fn with_token<S: Stop>(self, stop: S) -> WithToken<Self, S> {
        WithToken::new(self, stop)
    }

    /// Replaces the space boundary predicate for the duration of the rule.
    fn with_space<S: Stop>(self, stop: S) -> WithSpace<Self, S> {
        WithSpace::new(self, stop)
    }

    /// Promotes an uncommitted failure to a committed one when `check`
    /// matches at the failure point.
    fn commit_on<C: Rule<'a>>(self, check: C) -> CommitOn<Self, C> {
        CommitOn::new(self, check)
    }

    /// A debug tap: prints a caret diagnostic on failure, forwards the
    /// outcome untouched.
    fn trace(self, label: &'static str) -> Trace<Self> {
        Trace::new(self, label)
    }

    fn boxed(self) -> BoxedRule<'a, Self::Output>
    where
        Self: 'a,
    {
        Box::new(self)
    }
}

impl<'a, R: Rule<'a>> RuleExt<'a> for R {}

/// Applies `rule` once to `text` with the default boundary predicates: trivia
/// is whitespace, a token ends at whitespace or the usual punctuation.
///
/// # Example
/// ```
/// use scanit::primitives::{keyword, lit, token};
/// use scanit::rule::{parse, RuleExt};
///
/// let stmt = keyword("let").then(token()).zip(lit("=").then(token()));
/// assert_eq!(parse(&stmt, "let x = y").ok(), Some(("x", "y")));
/// ```
pub fn parse<'a, R: Rule<'a>>(rule: &R, text: &'a str) -> Outcome<R::Output> {
    let space = NotSpace;
    let token = Hard::default();
    parse_with(rule, text, &space, &token)
}

/// As [`parse`], with explicit boundary predicates.
pub fn parse_with<'a, R: Rule<'a>>(
    rule: &R,
    text: &'a str,
    space: &dyn Stop,
    token: &dyn Stop,
) -> Outcome<R::Output> {
    let mut scan = ScanIt::new(text);
    let mut ctx = Context::new(&mut scan, space, token);
    rule.apply(&mut ctx)
}
