use std::collections::HashSet;

/// A boundary predicate: given the unread remainder of the text, decides
/// whether the current position ends a token or a whitespace run.
///
/// The engine only calls `stops` with a non-empty remainder, so an
/// implementation may look at the first character unconditionally.
pub trait Stop {
    fn stops(&self, rest: &str) -> bool;
}

fn hard_characters() -> HashSet<char> {
    [
        ':', ';', ',', '.', '{', '}', '+', '-', '=', '/', '\\', '@', '#', '$', '%', '^', '&', '|',
        '*', '(', ')', '!', '?', '<', '>', '~', '[', ']', '"', '\'',
    ]
    .into_iter()
    .collect()
}

/// Stops on whitespace or on one of a fixed set of punctuation characters.
///
/// This is the usual way a word ends; the punctuation set can be replaced at
/// construction when a grammar treats some of it as word material.
#[derive(Debug, Clone)]
pub struct Hard {
    stop_at: HashSet<char>,
}

impl Hard {
    pub fn new() -> Self {
        Hard {
            stop_at: hard_characters(),
        }
    }

    pub fn with_stops(stop_at: HashSet<char>) -> Self {
        Hard { stop_at }
    }
}

impl Default for Hard {
    fn default() -> Self {
        Hard::new()
    }
}

impl Stop for Hard {
    fn stops(&self, rest: &str) -> bool {
        match rest.chars().next() {
            Some(c) => c.is_whitespace() || self.stop_at.contains(&c),
            None => true,
        }
    }
}

/// Stops as soon as the next character is not whitespace.
///
/// Used as the space predicate: skipping with it eats a whitespace run and
/// halts on the first real character.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotSpace;

impl Stop for NotSpace {
    fn stops(&self, rest: &str) -> bool {
        match rest.chars().next() {
            Some(c) => !c.is_whitespace(),
            None => true,
        }
    }
}

/// Stops where one of the supplied literal strings matches.
///
/// Candidates are checked in the supplied order, not by longest match; a
/// grammar must order its stop markers to get the intended result.
#[derive(Debug, Clone)]
pub struct Literals {
    stops: Vec<String>,
}

impl Literals {
    pub fn new<I, S>(stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Literals {
            stops: stops.into_iter().map(Into::into).collect(),
        }
    }
}

impl Stop for Literals {
    fn stops(&self, rest: &str) -> bool {
        self.stops.iter().any(|stop| rest.starts_with(stop.as_str()))
    }
}
