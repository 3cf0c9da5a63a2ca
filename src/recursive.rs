use std::cell::RefCell;
use std::rc::Rc;

use crate::context::Context;
use crate::error::Reason;
use crate::outcome::Outcome;
use crate::rule::{BoxedRule, Rule};

/// A handle to a rule that may refer to itself, or to a rule defined later.
///
/// The handle owns the concrete rule behind a shared, type-erased slot;
/// cloning is cheap and every clone dispatches to the same rule. Dispatch
/// costs one dynamic call per recursive step and enters a fresh match scope.
///
/// The slot outlives every clone referencing it, which makes the usual
/// grammar-singleton setup safe without further ceremony.
pub struct Recur<'a, T> {
    slot: Rc<RefCell<Option<BoxedRule<'a, T>>>>,
}

impl<'a, T> Clone for Recur<'a, T> {
    fn clone(&self) -> Self {
        Recur {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<'a, T> Recur<'a, T> {
    /// Declares a forward reference. [`define`](Recur::define) must run
    /// before the handle is applied; an undefined handle reports a custom
    /// failure rather than matching anything.
    pub fn declare() -> Self {
        Recur {
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// Installs the concrete rule behind the handle.
    pub fn define<R>(&self, rule: R)
    where
        R: Rule<'a, Output = T> + 'a,
    {
        *self.slot.borrow_mut() = Some(Box::new(rule));
    }
}

/// Ties the knot in one step: the builder receives the handle and returns the
/// rule the handle stands for.
///
/// # Example
/// ```
/// use scanit::primitives::{lit, token};
/// use scanit::recursive::recursive;
/// use scanit::rule::{parse, RuleExt};
///
/// // how deep is the nesting around the token?
/// let depth = recursive(|this| {
///     scanit::wrap!(lit("("); this; lit(")"))
///         .map(|d| d + 1)
///         .or(token().map(|_| 0))
/// });
///
/// assert_eq!(parse(&depth, "((x))").ok(), Some(2));
/// assert_eq!(parse(&depth, "x").ok(), Some(0));
/// ```
pub fn recursive<'a, T, R, F>(build: F) -> Recur<'a, T>
where
    R: Rule<'a, Output = T> + 'a,
    F: FnOnce(Recur<'a, T>) -> R,
{
    let handle = Recur::declare();
    let rule = build(handle.clone());
    handle.define(rule);
    handle
}

impl<'a, T> Rule<'a> for Recur<'a, T> {
    type Output = T;

    fn apply(&self, ctx: &mut Context<'a, '_>) -> Outcome<T> {
        let slot = self.slot.borrow();
        match slot.as_ref() {
            Some(rule) => {
                let mut sub = ctx.scope();
                rule.apply(&mut sub)
            }
            None => ctx.fail(Reason::Custom(
                "recursive rule used before being defined".into(),
            )),
        }
    }
}
