pub mod rule_test {
    use std::fmt::Debug;

    use crate::context::Context;
    use crate::outcome::Outcome;
    use crate::scan::ScanIt;
    use crate::stop::{Hard, NotSpace};

    /// Runs `f` with a context over `text`, set up with the default boundary
    /// predicates. Lets a test watch the cursor around a rule application.
    ///
    /// # Example
    /// ```rust
    /// use scanit::primitives::token;
    /// use scanit::rule::Rule;
    /// use scanit::test::rule_test::with_context;
    ///
    /// let cursor = with_context("word next", |ctx| {
    ///     let _ = token().apply(ctx);
    ///     ctx.scan.cursor()
    /// });
    /// assert_eq!(cursor, 5);
    /// ```
    pub fn with_context<'a, T, F>(text: &'a str, f: F) -> T
    where
        F: FnOnce(&mut Context<'a, '_>) -> T,
    {
        let mut scan = ScanIt::new(text);
        let space = NotSpace;
        let token = Hard::default();
        let mut ctx = Context::new(&mut scan, &space, &token);
        f(&mut ctx)
    }

    /// Asserts an outcome holds the expected value.
    ///
    /// # Example
    /// ```rust
    /// use scanit::primitives::token;
    /// use scanit::rule::parse;
    /// use scanit::test::rule_test::expect;
    ///
    /// expect(parse(&token(), "word"), "word");
    /// ```
    pub fn expect<T>(out: Outcome<T>, want: T)
    where
        T: PartialEq + Debug,
    {
        match out {
            Outcome::Value(v) => assert_eq!(v, want),
            Outcome::Failure(e) => panic!("the rule failed with: {e}"),
        }
    }

    /// Asserts an outcome is a failure.
    pub fn fail<T: Debug>(out: Outcome<T>) {
        if let Outcome::Value(v) = out {
            panic!("the rule should fail but produced {v:?}");
        }
    }

    /// Asserts an outcome is a failure at the given byte offset.
    pub fn fail_on<T: Debug>(out: Outcome<T>, at: usize) {
        match out {
            Outcome::Value(v) => panic!("the rule should fail but produced {v:?}"),
            Outcome::Failure(e) => assert_eq!(e.at, at),
        }
    }

    /// Asserts an outcome is a committed failure.
    pub fn fail_committed<T: Debug>(out: Outcome<T>) {
        match out {
            Outcome::Value(v) => panic!("the rule should fail but produced {v:?}"),
            Outcome::Failure(e) => assert!(e.committed, "the failure is not committed: {e}"),
        }
    }
}
