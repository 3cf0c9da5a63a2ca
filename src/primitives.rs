use crate::context::Context;
use crate::error::Reason;
use crate::outcome::Outcome;
use crate::outcome::Outcome::Value;
use crate::rule::Rule;
use crate::stop::Literals;

/// Matches the exact `text` and eats the trivia after it. Produces nothing.
#[derive(Debug, Clone)]
pub struct Literal {
    text: String,
}

pub fn lit(text: impl Into<String>) -> Literal {
    Literal { text: text.into() }
}

impl<'a> Rule<'a> for Literal {
    type Output = ();

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<()> {
        if ctx.peek(self.text.len()) != self.text {
            return ctx.fail(Reason::LiteralMismatch {
                expected: self.text.clone(),
            });
        }
        ctx.consume(self.text.len());
        Value(())
    }
}

/// As [`Literal`], but the match must end on a token boundary, so a keyword
/// does not match inside a longer word.
///
/// # Example
/// ```
/// use scanit::primitives::keyword;
/// use scanit::rule::parse;
///
/// assert!(parse(&keyword("if"), "if x").is_value());
/// assert!(parse(&keyword("if"), "if;x").is_value());
/// assert!(parse(&keyword("if"), "ifx").is_failure());
/// ```
#[derive(Debug, Clone)]
pub struct Keyword {
    text: String,
}

pub fn keyword(text: impl Into<String>) -> Keyword {
    Keyword { text: text.into() }
}

impl<'a> Rule<'a> for Keyword {
    type Output = ();

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<()> {
        if ctx.peek(self.text.len()) != self.text {
            return ctx.fail(Reason::LiteralMismatch {
                expected: self.text.clone(),
            });
        }
        // the boundary check comes before any consumption; consuming first
        // would let trailing trivia hide a missing boundary
        if !ctx.ends(self.text.len()) {
            return ctx.fail(Reason::MissingBoundary {
                keyword: self.text.clone(),
            });
        }
        ctx.consume(self.text.len());
        Value(())
    }
}

/// Captures the text up to the current token boundary, then eats the trivia
/// after it. Fails when the boundary sits right at the cursor.
///
/// # Example
/// ```
/// use scanit::primitives::token;
/// use scanit::rule::parse;
///
/// assert_eq!(parse(&token(), "word; rest").ok(), Some("word"));
/// assert!(parse(&token(), ";").is_failure());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Token;

pub fn token() -> Token {
    Token
}

impl<'a> Rule<'a> for Token {
    type Output = &'a str;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<&'a str> {
        let size = ctx.scan.count_until(ctx.token);
        if size == 0 {
            return ctx.fail(Reason::EmptyToken);
        }
        let text = ctx.peek(size);
        ctx.consume(size);
        Value(text)
    }
}

/// Captures everything up to the first position where one of the `stops`
/// literals matches, or the end of input. Always succeeds, the capture may be
/// empty, and no trivia is skipped afterwards.
///
/// Stops are checked in the supplied order, not by longest match.
#[derive(Debug, Clone)]
pub struct Until {
    stops: Literals,
}

pub fn until<I, S>(stops: I) -> Until
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Until {
        stops: Literals::new(stops),
    }
}

impl<'a> Rule<'a> for Until {
    type Output = &'a str;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<&'a str> {
        let size = ctx.scan.count_until(&self.stops);
        let text = ctx.peek(size);
        ctx.scan.advance(size);
        Value(text)
    }
}

/// Skips the current space predicate. Always succeeds, produces nothing.
#[derive(Debug, Clone, Copy)]
pub struct Trivia;

pub fn trivia() -> Trivia {
    Trivia
}

impl<'a> Rule<'a> for Trivia {
    type Output = ();

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<()> {
        ctx.skip_trivia();
        Value(())
    }
}

/// Succeeds only at the end of input.
#[derive(Debug, Clone, Copy)]
pub struct End;

pub fn end() -> End {
    End
}

impl<'a> Rule<'a> for End {
    type Output = ();

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<()> {
        if ctx.scan.at_end() {
            Value(())
        } else {
            ctx.fail(Reason::TrailingInput)
        }
    }
}

/// Yields the current byte offset without reading anything; useful for later
/// slicing or for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct Mark;

pub fn mark() -> Mark {
    Mark
}

impl<'a> Rule<'a> for Mark {
    type Output = usize;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<usize> {
        Value(ctx.scan.cursor())
    }
}

/// The cut point: marks the ambient scope committed. Failures raised after it
/// propagate instead of letting `maybe`/`many` or an enclosing alternation
/// backtrack.
///
/// # Example
/// ```
/// use scanit::primitives::{cut, lit};
/// use scanit::rule::{parse, RuleExt};
///
/// // without a cut the optional swallows the miss...
/// assert_eq!(parse(&lit("x").maybe(), "y").ok(), Some(None));
/// // ...with one it must not
/// assert!(parse(&cut().then(lit("x")).maybe(), "y").is_failure());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Cut;

pub fn cut() -> Cut {
    Cut
}

impl<'a> Rule<'a> for Cut {
    type Output = ();

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<()> {
        ctx.commit();
        Value(())
    }
}

/// Yields a clone of a fixed value without reading input. Handy to give an
/// alternative a result when nothing needs capturing.
#[derive(Debug, Clone)]
pub struct Pure<T> {
    value: T,
}

pub fn pure<T: Clone>(value: T) -> Pure<T> {
    Pure { value }
}

impl<'a, T: Clone> Rule<'a> for Pure<T> {
    type Output = T;

    fn apply(&self, _ctx: &mut Context<'a, '_>) -> Outcome<T> {
        Value(self.value.clone())
    }
}
