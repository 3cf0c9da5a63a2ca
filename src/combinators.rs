use crate::context::Context;
use crate::diag::Snippet;
use crate::error::{Error, Reason};
use crate::outcome::Outcome;
use crate::outcome::Outcome::{Failure, Value};
use crate::rule::{BoxedRule, Rule};
use crate::stop::Stop;

/// Runs `first` then `second` over the same cursor progression, pairing the
/// results. The first failure aborts the pair and is returned verbatim,
/// committed flag included.
#[derive(Debug, Clone)]
pub struct Zip<A, B> {
    first: A,
    second: B,
}

impl<A, B> Zip<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Zip { first, second }
    }
}

impl<'a, A: Rule<'a>, B: Rule<'a>> Rule<'a> for Zip<A, B> {
    type Output = (A::Output, B::Output);

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<Self::Output> {
        let first = match self.first.apply(ctx) {
            Value(v) => v,
            Failure(e) => return Failure(e),
        };
        match self.second.apply(ctx) {
            Value(second) => Value((first, second)),
            Failure(e) => Failure(e),
        }
    }
}

/// Runs `first` then `second`, keeping only `second`'s result.
#[derive(Debug, Clone)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<A, B> Then<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Then { first, second }
    }
}

impl<'a, A: Rule<'a>, B: Rule<'a>> Rule<'a> for Then<A, B> {
    type Output = B::Output;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<B::Output> {
        match self.first.apply(ctx) {
            Value(_) => self.second.apply(ctx),
            Failure(e) => Failure(e),
        }
    }
}

/// Runs `first` then `second`, keeping only `first`'s result.
#[derive(Debug, Clone)]
pub struct Skip<A, B> {
    first: A,
    second: B,
}

impl<A, B> Skip<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Skip { first, second }
    }
}

impl<'a, A: Rule<'a>, B: Rule<'a>> Rule<'a> for Skip<A, B> {
    type Output = A::Output;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<A::Output> {
        let first = match self.first.apply(ctx) {
            Value(v) => v,
            Failure(e) => return Failure(e),
        };
        match self.second.apply(ctx) {
            Value(_) => Value(first),
            Failure(e) => Failure(e),
        }
    }
}

/// Converts the inner result with a pure function; failures pass through
/// unchanged.
#[derive(Clone)]
pub struct Map<R, F> {
    inner: R,
    f: F,
}

impl<R, F> Map<R, F> {
    pub(crate) fn new(inner: R, f: F) -> Self {
        Map { inner, f }
    }
}

impl<'a, R, K, F> Rule<'a> for Map<R, F>
where
    R: Rule<'a>,
    F: Fn(R::Output) -> K,
{
    type Output = K;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<K> {
        match self.inner.apply(ctx) {
            Value(v) => Value((self.f)(v)),
            Failure(e) => Failure(e),
        }
    }
}

/// Converts the inner result with a function that may reject it; a rejection
/// becomes a custom failure at the current cursor. This is how semantic
/// validation fails a parse after syntactic success.
#[derive(Clone)]
pub struct TryMap<R, F> {
    inner: R,
    f: F,
}

impl<R, F> TryMap<R, F> {
    pub(crate) fn new(inner: R, f: F) -> Self {
        TryMap { inner, f }
    }
}

impl<'a, R, K, F> Rule<'a> for TryMap<R, F>
where
    R: Rule<'a>,
    F: Fn(R::Output) -> Result<K, String>,
{
    type Output = K;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<K> {
        match self.inner.apply(ctx) {
            Value(v) => match (self.f)(v) {
                Ok(k) => Value(k),
                Err(message) => ctx.fail(Reason::Custom(message)),
            },
            Failure(e) => Failure(e),
        }
    }
}

/// Optional match: an uncommitted failure rewinds the cursor and yields
/// `None`; a committed failure is never swallowed.
#[derive(Debug, Clone)]
pub struct Maybe<R> {
    inner: R,
}

impl<R> Maybe<R> {
    pub(crate) fn new(inner: R) -> Self {
        Maybe { inner }
    }
}

impl<'a, R: Rule<'a>> Rule<'a> for Maybe<R> {
    type Output = Option<R::Output>;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<Self::Output> {
        let start = ctx.scan.cursor();
        match self.inner.apply(ctx) {
            Value(v) => Value(Some(v)),
            Failure(e) if e.committed => Failure(e),
            Failure(_) => {
                ctx.scan.rewind(start);
                Value(None)
            }
        }
    }
}

/// Applies the inner rule as often as it matches, collecting the results and
/// rewinding to the last good cursor when a run ends on an uncommitted
/// failure. Zero matches is a valid outcome; a committed failure discards the
/// accumulation and propagates.
///
/// # Example
/// ```
/// use scanit::primitives::lit;
/// use scanit::rule::{parse, RuleExt};
///
/// let out = parse(&lit("a").many(), "aaab");
/// assert_eq!(out.ok().map(|v| v.len()), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct Many<R> {
    inner: R,
}

impl<R> Many<R> {
    pub(crate) fn new(inner: R) -> Self {
        Many { inner }
    }
}

impl<'a, R: Rule<'a>> Rule<'a> for Many<R> {
    type Output = Vec<R::Output>;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<Self::Output> {
        let mut list = Vec::new();
        let mut last = ctx.scan.cursor();
        loop {
            match self.inner.apply(ctx) {
                Value(v) => {
                    list.push(v);
                    last = ctx.scan.cursor();
                }
                Failure(e) if e.committed => return Failure(e),
                Failure(_) => {
                    ctx.scan.rewind(last);
                    return Value(list);
                }
            }
        }
    }
}

/// Runs the inner rule and restores the cursor unconditionally, forwarding
/// the outcome untouched: a lookahead with no visible consumption.
#[derive(Debug, Clone)]
pub struct Peek<R> {
    inner: R,
}

impl<R> Peek<R> {
    pub(crate) fn new(inner: R) -> Self {
        Peek { inner }
    }
}

impl<'a, R: Rule<'a>> Rule<'a> for Peek<R> {
    type Output = R::Output;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<R::Output> {
        let start = ctx.scan.cursor();
        let out = self.inner.apply(ctx);
        ctx.scan.rewind(start);
        out
    }
}

/// Negative lookahead: succeeds with no value exactly when the inner rule
/// does not match. The cursor is fully restored on both paths.
#[derive(Debug, Clone)]
pub struct Fails<R> {
    inner: R,
}

impl<R> Fails<R> {
    pub(crate) fn new(inner: R) -> Self {
        Fails { inner }
    }
}

impl<'a, R: Rule<'a>> Rule<'a> for Fails<R> {
    type Output = ();

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<()> {
        let start = ctx.scan.cursor();
        let out = self.inner.apply(ctx);
        ctx.scan.rewind(start);
        match out {
            Value(_) => ctx.fail(Reason::ForbiddenPattern),
            Failure(_) => Value(()),
        }
    }
}

/// Ordered choice between two rules of the same output type. Every
/// alternative runs in a fresh match scope from the same start cursor; a
/// committed failure stops the search, otherwise the last failure surfaces.
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<A, B> Or<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Or { first, second }
    }
}

impl<'a, A, B> Rule<'a> for Or<A, B>
where
    A: Rule<'a>,
    B: Rule<'a, Output = A::Output>,
{
    type Output = A::Output;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<A::Output> {
        let start = ctx.scan.cursor();
        let first = {
            let mut sub = ctx.scope();
            self.first.apply(&mut sub)
        };
        match first {
            Value(v) => Value(v),
            Failure(e) => {
                ctx.scan.rewind(start);
                if e.committed {
                    return Failure(e);
                }
                let second = {
                    let mut sub = ctx.scope();
                    self.second.apply(&mut sub)
                };
                match second {
                    Value(v) => Value(v),
                    Failure(e) => {
                        ctx.scan.rewind(start);
                        Failure(e)
                    }
                }
            }
        }
    }
}

/// The tagged result of a two-way [`Branch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice2<A, B> {
    First(A),
    Second(B),
}

/// The tagged result of a three-way [`Branch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice3<A, B, C> {
    First(A),
    Second(B),
    Third(C),
}

/// The tagged result of a four-way [`Branch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice4<A, B, C, D> {
    First(A),
    Second(B),
    Third(C),
    Fourth(D),
}

/// The tagged result of a five-way [`Branch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice5<A, B, C, D, E> {
    First(A),
    Second(B),
    Third(C),
    Fourth(D),
    Fifth(E),
}

/// Ordered alternation over differently-typed alternatives; the winner is
/// tagged with its position. Same control flow as [`Pick`].
///
/// # Example
/// ```
/// use scanit::combinators::{branch, Choice2};
/// use scanit::primitives::{keyword, pure, token};
/// use scanit::rule::{parse, RuleExt};
///
/// let rule = branch((keyword("nil").then(pure(0u32)), token()));
/// assert_eq!(parse(&rule, "nil").ok(), Some(Choice2::First(0)));
/// assert_eq!(parse(&rule, "name").ok(), Some(Choice2::Second("name")));
/// ```
#[derive(Debug, Clone)]
pub struct Branch<T> {
    rules: T,
}

pub fn branch<T>(rules: T) -> Branch<T> {
    Branch { rules }
}

/// Ordered alternation where every alternative produces the same type, so the
/// result needs no tag. Alternatives run in a fresh match scope each, from
/// the same start cursor; a committed failure stops the search and the last
/// alternative's failure surfaces otherwise.
#[derive(Debug, Clone)]
pub struct Pick<T> {
    rules: T,
}

pub fn pick<T>(rules: T) -> Pick<T> {
    Pick { rules }
}

macro_rules! try_alternative {
    ($ctx:ident, $start:ident, $last:ident, $rule:expr, $win:expr) => {
        match {
            let mut sub = $ctx.scope();
            $rule.apply(&mut sub)
        } {
            Value(v) => return Value($win(v)),
            Failure(e) => {
                $ctx.scan.rewind($start);
                if e.committed {
                    return Failure(e);
                }
                $last = Some(e);
            }
        }
    };
}

macro_rules! branch_impl {
    ($choice:ident; $($field:tt: $name:ident => $variant:ident),+) => {
        impl<'a, $($name: Rule<'a>),+> Rule<'a> for Branch<($($name,)+)> {
            type Output = $choice<$($name::Output),+>;

            fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<Self::Output> {
                let start = ctx.scan.cursor();
                let mut last: Option<Error> = None;
                $(try_alternative!(ctx, start, last, self.rules.$field, $choice::$variant);)+
                match last {
                    Some(e) => Failure(e),
                    None => ctx.fail(Reason::NoAlternative),
                }
            }
        }
    };
}

branch_impl!(Choice2; 0: A => First, 1: B => Second);
branch_impl!(Choice3; 0: A => First, 1: B => Second, 2: C => Third);
branch_impl!(Choice4; 0: A => First, 1: B => Second, 2: C => Third, 3: D => Fourth);
branch_impl!(Choice5; 0: A => First, 1: B => Second, 2: C => Third, 3: D => Fourth, 4: E => Fifth);

macro_rules! pick_impl {
    ($first_field:tt: $First:ident $(, $field:tt: $name:ident)*) => {
        impl<'a, $First: Rule<'a>, $($name: Rule<'a, Output = $First::Output>),*> Rule<'a>
            for Pick<($First, $($name,)*)>
        {
            type Output = $First::Output;

            fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<Self::Output> {
                let start = ctx.scan.cursor();
                let mut last: Option<Error> = None;
                try_alternative!(ctx, start, last, self.rules.$first_field, |v| v);
                $(try_alternative!(ctx, start, last, self.rules.$field, |v| v);)*
                match last {
                    Some(e) => Failure(e),
                    None => ctx.fail(Reason::NoAlternative),
                }
            }
        }
    };
}

pick_impl!(0: A, 1: B);
pick_impl!(0: A, 1: B, 2: C);
pick_impl!(0: A, 1: B, 2: C, 3: D);
pick_impl!(0: A, 1: B, 2: C, 3: D, 4: E);
pick_impl!(0: A, 1: B, 2: C, 3: D, 4: E, 5: F);

/// The dynamic form of [`Pick`]: boxed alternatives in a vec, tried in order.
/// An empty vec fails with [`Reason::NoAlternative`].
impl<'a, T> Rule<'a> for Pick<Vec<BoxedRule<'a, T>>> {
    type Output = T;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<T> {
        let start = ctx.scan.cursor();
        let mut last: Option<Error> = None;
        for rule in &self.rules {
            try_alternative!(ctx, start, last, rule, |v| v);
        }
        match last {
            Some(e) => Failure(e),
            None => ctx.fail(Reason::NoAlternative),
        }
    }
}

/// Promotes an uncommitted failure to a committed one when `check` matches at
/// the failure point, probed without consuming. Lets a grammar decide from
/// lookahead context that this was the right alternative after all.
#[derive(Debug, Clone)]
pub struct CommitOn<R, C> {
    inner: R,
    check: C,
}

impl<R, C> CommitOn<R, C> {
    pub(crate) fn new(inner: R, check: C) -> Self {
        CommitOn { inner, check }
    }
}

impl<'a, R: Rule<'a>, C: Rule<'a>> Rule<'a> for CommitOn<R, C> {
    type Output = R::Output;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<R::Output> {
        match self.inner.apply(ctx) {
            Value(v) => Value(v),
            Failure(e) if e.committed => Failure(e),
            Failure(e) => {
                let at = ctx.scan.cursor();
                let hit = {
                    let mut sub = ctx.scope();
                    self.check.apply(&mut sub).is_value()
                };
                ctx.scan.rewind(at);
                if hit {
                    Failure(e.commit())
                } else {
                    Failure(e)
                }
            }
        }
    }
}

/// Returns the raw source slice the inner rule consumed, ignoring its value.
///
/// # Example
/// ```
/// use scanit::primitives::lit;
/// use scanit::rule::{parse, RuleExt};
///
/// let out = parse(&lit("a").many().capture(), "aaa;");
/// assert_eq!(out.ok(), Some("aaa"));
/// ```
#[derive(Debug, Clone)]
pub struct Capture<R> {
    inner: R,
}

impl<R> Capture<R> {
    pub(crate) fn new(inner: R) -> Self {
        Capture { inner }
    }
}

impl<'a, R: Rule<'a>> Rule<'a> for Capture<R> {
    type Output = &'a str;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<&'a str> {
        let start = ctx.scan.cursor();
        match self.inner.apply(ctx) {
            Value(_) => {
                let end = ctx.scan.cursor();
                Value(ctx.scan.slice(start, end))
            }
            Failure(e) => Failure(e),
        }
    }
}

/// Drops the inner value, forwarding only success or failure.
#[derive(Debug, Clone)]
pub struct Discard<R> {
    inner: R,
}

impl<R> Discard<R> {
    pub(crate) fn new(inner: R) -> Self {
        Discard { inner }
    }
}

impl<'a, R: Rule<'a>> Rule<'a> for Discard<R> {
    type Output = ();

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<()> {
        match self.inner.apply(ctx) {
            Value(_) => Value(()),
            Failure(e) => Failure(e),
        }
    }
}

/// Runs the inner rule in a fresh match scope: a cut inside affects only that
/// sub-tree, the surrounding scope's flag stays as it was.
#[derive(Debug, Clone)]
pub struct Scope<R> {
    inner: R,
}

impl<R> Scope<R> {
    pub(crate) fn new(inner: R) -> Self {
        Scope { inner }
    }
}

impl<'a, R: Rule<'a>> Rule<'a> for Scope<R> {
    type Output = R::Output;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<R::Output> {
        let mut sub = ctx.scope();
        self.inner.apply(&mut sub)
    }
}

/// Replaces the token boundary predicate for the inner rule, which runs in a
/// fresh match scope over the same buffer.
#[derive(Debug, Clone)]
pub struct WithToken<R, S> {
    inner: R,
    stop: S,
    propagate: bool,
}

impl<R, S> WithToken<R, S> {
    pub(crate) fn new(inner: R, stop: S) -> Self {
        WithToken {
            inner,
            stop,
            propagate: false,
        }
    }

    /// Forwards the inner scope's committed flag to the surrounding scope
    /// when the inner rule succeeds, so a cut inside keeps protecting the
    /// enclosing alternation.
    pub fn propagate_commit(mut self) -> Self {
        self.propagate = true;
        self
    }
}

impl<'a, R: Rule<'a>, S: Stop> Rule<'a> for WithToken<R, S> {
    type Output = R::Output;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<R::Output> {
        let (out, inner_committed) = {
            let mut sub = ctx.extend(None, Some(&self.stop));
            let out = self.inner.apply(&mut sub);
            (out, sub.committed)
        };
        if self.propagate && inner_committed && out.is_value() {
            ctx.commit();
        }
        out
    }
}

/// Replaces the space boundary predicate for the inner rule, which runs in a
/// fresh match scope over the same buffer.
#[derive(Debug, Clone)]
pub struct WithSpace<R, S> {
    inner: R,
    stop: S,
    propagate: bool,
}

impl<R, S> WithSpace<R, S> {
    pub(crate) fn new(inner: R, stop: S) -> Self {
        WithSpace {
            inner,
            stop,
            propagate: false,
        }
    }

    /// As [`WithToken::propagate_commit`].
    pub fn propagate_commit(mut self) -> Self {
        self.propagate = true;
        self
    }
}

impl<'a, R: Rule<'a>, S: Stop> Rule<'a> for WithSpace<R, S> {
    type Output = R::Output;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<R::Output> {
        let (out, inner_committed) = {
            let mut sub = ctx.extend(Some(&self.stop), None);
            let out = self.inner.apply(&mut sub);
            (out, sub.committed)
        };
        if self.propagate && inner_committed && out.is_value() {
            ctx.commit();
        }
        out
    }
}

/// A debug tap: on failure it prints the offending line with a caret, the
/// reason and the span consumed so far, then forwards the outcome untouched.
/// A pure observer, it never changes the cursor or the result.
#[derive(Debug, Clone)]
pub struct Trace<R> {
    inner: R,
    label: &'static str,
}

impl<R> Trace<R> {
    pub(crate) fn new(inner: R, label: &'static str) -> Self {
        Trace { inner, label }
    }
}

impl<'a, R: Rule<'a>> Rule<'a> for Trace<R> {
    type Output = R::Output;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<R::Output> {
        let start = ctx.scan.cursor();
        let out = self.inner.apply(ctx);
        if let Failure(e) = &out {
            let snippet = Snippet::new(ctx.scan.text(), e.at, true);
            let kind = if e.committed { "committed" } else { "backtrack" };
            println!(
                "debug | {} {} on line {}: {}",
                self.label, kind, snippet.number, e.reason
            );
            println!("debug | {}", snippet.line);
            println!("debug | {}", snippet.marker);
            println!(
                "debug | consumed {:?}",
                ctx.scan.slice(start, ctx.scan.cursor())
            );
        }
        out
    }
}

/// Builds a flattened sequence out of two to five rules, pairing all their
/// results left to right. Results of unit-producing leaves are dropped with
/// [`then`](crate::rule::RuleExt::then)/[`skip`](crate::rule::RuleExt::skip)
/// before feeding them in.
///
/// # Example
/// ```
/// use scanit::primitives::{lit, token};
/// use scanit::rule::{parse, RuleExt};
///
/// let date = scanit::all!(token(), lit("-").then(token()), lit("-").then(token()));
/// assert_eq!(parse(&date, "2026-08-06").ok(), Some(("2026", "08", "06")));
/// ```
#[macro_export]
macro_rules! all {
    ($a:expr, $b:expr) => {
        $crate::rule::RuleExt::zip($a, $b)
    };
    ($a:expr, $b:expr, $c:expr) => {
        $crate::rule::RuleExt::map(
            $crate::rule::RuleExt::zip($crate::rule::RuleExt::zip($a, $b), $c),
            |((a, b), c)| (a, b, c),
        )
    };
    ($a:expr, $b:expr, $c:expr, $d:expr) => {
        $crate::rule::RuleExt::map(
            $crate::rule::RuleExt::zip(
                $crate::rule::RuleExt::zip($crate::rule::RuleExt::zip($a, $b), $c),
                $d,
            ),
            |(((a, b), c), d)| (a, b, c, d),
        )
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr) => {
        $crate::rule::RuleExt::map(
            $crate::rule::RuleExt::zip(
                $crate::rule::RuleExt::zip(
                    $crate::rule::RuleExt::zip($crate::rule::RuleExt::zip($a, $b), $c),
                    $d,
                ),
                $e,
            ),
            |((((a, b), c), d), e)| (a, b, c, d, e),
        )
    };
}

/// Builds a delimited rule:
/// ```ebnf
/// <rule> ::= open inner close
/// ```
/// keeping only the inner result.
///
/// # Example
/// ```
/// use scanit::primitives::{lit, token};
/// use scanit::rule::parse;
///
/// let group = scanit::wrap!(lit("("); token(); lit(")"));
/// assert_eq!(parse(&group, "( word )").ok(), Some("word"));
/// ```
#[macro_export]
macro_rules! wrap {
    ($left:expr; $mid:expr; $right:expr) => {
        $crate::rule::RuleExt::skip($crate::rule::RuleExt::then($left, $mid), $right)
    };
}

/// Builds a separated list:
/// ```ebnf
/// <rule> ::= elem {sep elem}
/// ```
/// The trailing-comma form also allows one trailing separator.
///
/// # Example
/// ```
/// use scanit::primitives::{lit, token};
/// use scanit::rule::parse;
///
/// let list = scanit::seq!(token(), lit(","));
/// assert_eq!(parse(&list, "a, b, c").ok(), Some(vec!["a", "b", "c"]));
///
/// let trailing = scanit::seq!(token(), lit(","),);
/// assert_eq!(parse(&trailing, "a, b,").ok(), Some(vec!["a", "b"]));
/// ```
#[macro_export]
macro_rules! seq {
    ($elem:expr, $sep:expr) => {
        $crate::rule::RuleExt::map(
            $crate::rule::RuleExt::zip(
                $elem,
                $crate::rule::RuleExt::many($crate::rule::RuleExt::then($sep, $elem)),
            ),
            |(head, mut tail)| {
                tail.insert(0, head);
                tail
            },
        )
    };
    ($elem:expr, $sep:expr,) => {
        $crate::rule::RuleExt::skip($crate::seq!($elem, $sep), $crate::rule::RuleExt::maybe($sep))
    };
}
