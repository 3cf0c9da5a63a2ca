use pretty_assertions::assert_eq;
use proptest::prelude::*;

use scanit::combinators::{branch, pick, Choice2, Pick};
use scanit::error::Reason;
use scanit::primitives::{cut, end, keyword, lit, mark, pure, token, trivia, until};
use scanit::recursive::recursive;
use scanit::rule::{parse, BoxedRule, Rule, RuleExt};
use scanit::stop::Literals;
use scanit::test::rule_test::{expect, fail_committed, with_context};

#[test]
fn let_binding_sequence() {
    let stmt = keyword("let")
        .then(token())
        .zip(lit("=").then(token()))
        .skip(end());
    expect(parse(&stmt, "let x = y"), ("x", "y"));
}

#[test]
fn many_collects_and_leaves_cursor_after_last_match() {
    let (out, cursor) = with_context("aaab", |ctx| {
        let out = lit("a").many().apply(ctx);
        (out, ctx.scan.cursor())
    });
    assert_eq!(out.ok().map(|v| v.len()), Some(3));
    assert_eq!(cursor, 3);
}

#[test]
fn alternation_surfaces_the_last_alternative_failure() {
    let out = parse(&pick((lit("foo"), lit("bar"))), "baz");
    match out.error() {
        Some(e) => {
            assert_eq!(e.at, 0);
            assert!(!e.committed);
            assert_eq!(
                e.reason,
                Reason::LiteralMismatch {
                    expected: "bar".into()
                }
            );
        }
        None => panic!("expected a failure"),
    }
}

#[test]
fn maybe_respects_a_cut() {
    fail_committed(parse(&cut().then(lit("x")).maybe(), "y"));
    expect(parse(&lit("x").maybe(), "y"), None);
}

#[test]
fn capture_returns_the_raw_slice() {
    let (out, cursor) = with_context("aaa;", |ctx| {
        let out = lit("a").many().capture().apply(ctx);
        (out, ctx.scan.cursor())
    });
    assert_eq!(out.ok(), Some("aaa"));
    assert_eq!(cursor, 3);
}

#[test]
fn keyword_requires_a_boundary() {
    expect(parse(&keyword("if"), "if cond"), ());
    expect(parse(&keyword("if"), "if;cond"), ());
    match parse(&keyword("if"), "ifcond").error() {
        Some(e) => assert_eq!(
            e.reason,
            Reason::MissingBoundary {
                keyword: "if".into()
            }
        ),
        None => panic!("expected a failure"),
    }
}

#[test]
fn cut_stops_sibling_alternatives() {
    // "y" would match the second alternative, but the first one cut first
    let out = parse(&pick((cut().then(lit("x")), lit("y"))), "y");
    fail_committed(out);
}

#[test]
fn branch_tags_the_winner() {
    let rule = branch((keyword("yes").then(pure(true)), token()));
    assert_eq!(parse(&rule, "yes ").ok(), Some(Choice2::First(true)));
    assert_eq!(parse(&rule, "nope").ok(), Some(Choice2::Second("nope")));
}

#[test]
fn empty_pick_reports_no_alternative() {
    let rule: Pick<Vec<BoxedRule<'static, ()>>> = pick(Vec::new());
    match parse(&rule, "x").error() {
        Some(e) => assert_eq!(e.reason, Reason::NoAlternative),
        None => panic!("expected a failure"),
    }
}

#[test]
fn boxed_pick_tries_alternatives_in_order() {
    let rule = pick(vec![lit("a").boxed(), lit("b").boxed()]);
    assert!(parse(&rule, "b rest").is_value());
    assert!(parse(&rule, "c rest").is_failure());
}

#[test]
fn until_captures_without_trivia_skip() {
    let (out, cursor) = with_context("ab;c", |ctx| {
        let out = until([";"]).apply(ctx);
        (out, ctx.scan.cursor())
    });
    assert_eq!(out.ok(), Some("ab"));
    assert_eq!(cursor, 2);

    // a zero-length capture is still a success
    expect(parse(&until(["x"]), "xyz"), "");
}

#[test]
fn with_token_overrides_the_boundary() {
    let rule = token().with_token(Literals::new([";"]));
    expect(parse(&rule, "a b;c"), "a b");
}

#[test]
fn with_token_can_propagate_a_commit() {
    let committed = cut()
        .then(lit("a"))
        .with_token(Literals::new([";"]))
        .propagate_commit();
    fail_committed(parse(
        &pick((committed.then(lit("!")), lit("a").then(lit("?")))),
        "a b",
    ));

    // without the propagation the outer alternation is free to move on
    let contained = cut().then(lit("a")).with_token(Literals::new([";"]));
    let out = parse(
        &pick((contained.then(lit("!")), lit("a").then(lit("?")))),
        "a b",
    );
    match out.error() {
        Some(e) => assert!(!e.committed),
        None => panic!("expected a failure"),
    }
}

#[test]
fn scope_isolates_a_cut() {
    expect(parse(&cut().scoped().then(lit("x")).maybe(), "y"), None);
    fail_committed(parse(&cut().then(lit("x")).maybe(), "y"));
}

#[test]
fn commit_on_promotes_matching_failures() {
    let rule = || keyword("do").then(lit("end")).commit_on(lit("{"));
    // a '{' at the failure point proves we were inside the right construct
    fail_committed(parse(&rule(), "do {"));
    match parse(&rule(), "do x").error() {
        Some(e) => assert!(!e.committed),
        None => panic!("expected a failure"),
    }
}

#[test]
fn mark_reports_the_offset_after_trivia() {
    let rule = trivia().then(mark());
    expect(parse(&rule, "   x"), 3);
}

#[test]
fn try_map_turns_rejections_into_custom_failures() {
    let number = token().try_map(|t| t.parse::<u32>().map_err(|_| format!("{t} is not a number")));
    expect(parse(&number, "17"), 17);
    match parse(&number, "nope").error() {
        Some(e) => assert_eq!(e.reason, Reason::Custom("nope is not a number".into())),
        None => panic!("expected a failure"),
    }
}

#[test]
fn fails_flips_the_outcome_and_restores_the_cursor() {
    let (out, cursor) = with_context("word", |ctx| {
        let out = token().fails().apply(ctx);
        (out, ctx.scan.cursor())
    });
    assert!(out.is_failure());
    assert_eq!(cursor, 0);

    let (out, cursor) = with_context(";;", |ctx| {
        let out = token().fails().apply(ctx);
        (out, ctx.scan.cursor())
    });
    assert!(out.is_value());
    assert_eq!(cursor, 0);
}

#[test]
fn recursive_grammar_counts_nesting_depth() {
    let depth = recursive(|this| {
        scanit::wrap!(lit("("); this; lit(")"))
            .map(|d| d + 1)
            .or(token().map(|_| 0))
    });
    expect(parse(&depth, "((x))"), 2);
    expect(parse(&depth, "x"), 0);
}

#[test]
fn forward_reference_without_definition_fails_gracefully() {
    let dangling = scanit::recursive::Recur::<&str>::declare();
    match parse(&dangling, "x").error() {
        Some(e) => assert!(matches!(e.reason, Reason::Custom(_))),
        None => panic!("expected a failure"),
    }
}

#[test]
fn error_templates_are_stable() {
    assert_eq!(
        Reason::LiteralMismatch { expected: "=".into() }.to_string(),
        "Expected = but got something else."
    );
    assert_eq!(
        Reason::MissingBoundary { keyword: "if".into() }.to_string(),
        "Expected trailing space after if but got something else."
    );
    assert_eq!(Reason::EmptyToken.to_string(), "Expected some token here.");
    assert_eq!(
        Reason::ForbiddenPattern.to_string(),
        "This pattern is explicitly prohibited here."
    );
    assert_eq!(
        Reason::NoAlternative.to_string(),
        "Expected some subpattern here but gone none."
    );
    assert_eq!(
        Reason::TrailingInput.to_string(),
        "Expected the end of the file but got more text."
    );
}

#[test]
fn separated_lists_with_macros() {
    let list = scanit::seq!(token(), lit(","));
    expect(parse(&list, "a, b, c"), vec!["a", "b", "c"]);

    let trailing = scanit::seq!(token(), lit(","),);
    expect(parse(&trailing, "a, b,"), vec!["a", "b"]);

    let triple = scanit::all!(token(), lit(",").then(token()), lit(",").then(token()));
    expect(parse(&triple, "a, b, c"), ("a", "b", "c"));
}

proptest! {
    #[test]
    fn peek_never_moves_the_cursor(s in "\\PC{0,40}") {
        let (before, after) = with_context(&s, |ctx| {
            let before = ctx.scan.cursor();
            let _ = token().peek().apply(ctx);
            (before, ctx.scan.cursor())
        });
        prop_assert_eq!(before, after);
    }

    #[test]
    fn many_never_fails_without_a_cut(s in "\\PC{0,40}") {
        let out = with_context(&s, |ctx| lit("a").many().apply(ctx));
        prop_assert!(out.is_value());
    }

    #[test]
    fn successful_rules_only_move_forward(s in "\\PC{0,40}") {
        let (start, end, matched) = with_context(&s, |ctx| {
            let start = ctx.scan.cursor();
            let matched = token().apply(ctx).is_value();
            (start, ctx.scan.cursor(), matched)
        });
        if matched {
            prop_assert!(end >= start);
        } else {
            prop_assert_eq!(end, start);
        }
    }
}
