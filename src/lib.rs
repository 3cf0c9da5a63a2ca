//!The crate provides a basic mechanism to hand-build recursive descent
//! parsers over plain text, with a backtracking and explicit cut points.
//!
//! A grammar is a tree of small rule values built once and applied to many
//! inputs. Every application drives a cursor over the text; boundary
//! predicates decide where whitespace and tokens end, so token boundaries
//! stay contextual instead of being fixed by a lexer. A failure carries the
//! exact byte offset, a reason with a stable wording and a committed flag
//! that separates "try the next alternative" from "stop, the input is
//! malformed here".
//!
//! # Example
//!```
//!     use scanit::primitives::{end, keyword, lit, token};
//!     use scanit::rule::{parse, RuleExt};
//!
//!     // statement: 'let' name '=' value ';'
//!     let stmt = keyword("let")
//!         .then(token())
//!         .zip(lit("=").then(token()))
//!         .skip(lit(";"));
//!
//!     let file = stmt.many().skip(end());
//!
//!     let out = parse(&file, "let x = a; let y = b;");
//!     assert_eq!(out.ok(), Some(vec![("x", "a"), ("y", "b")]));
//! ```
//!
//! Ambiguity is resolved with ordered alternation and cuts. An alternative
//! that placed a [`cut`](primitives::cut) refuses to hand control back: the
//! failure is reported to the caller instead of being swallowed by an
//! optional or retried by a sibling.
//!
//!```
//!     use scanit::primitives::{cut, keyword, lit, token};
//!     use scanit::rule::{parse, RuleExt};
//!
//!     // after the 'let' keyword the statement is committed: a malformed
//!     // tail must not be reinterpreted by the enclosing grammar
//!     let stmt = keyword("let").then(cut()).then(token()).skip(lit("="));
//!
//!     let out = parse(&stmt.maybe(), "let x + 1");
//!     assert!(out.is_failure());
//! ```
//!
//! For error reports, [`diag::Snippet`] turns a byte offset into the line,
//! a caret marker and a 1-based line number; the
//! [`trace`](rule::RuleExt::trace) tap prints that rendering whenever the
//! wrapped rule fails.

pub mod scan;
pub mod stop;
pub mod context;
pub mod outcome;
pub mod error;
pub mod rule;
pub mod primitives;
pub mod combinators;
pub mod recursive;
pub mod diag;
pub mod test;
