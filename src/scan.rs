use crate::stop::Stop;

/// The scan buffer: a view over the source text plus the only mutable piece of
/// a parse, the cursor.
///
/// All navigation goes through a handful of primitives that never panic:
/// out-of-range requests clip to the end of the buffer, and every position the
/// cursor can land on is a valid `char` boundary.
#[derive(Debug)]
pub struct ScanIt<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> ScanIt<'a> {
    pub fn new(text: &'a str) -> Self {
        ScanIt { text, cursor: 0 }
    }

    /// The whole source text, untouched by the cursor.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The current byte offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn at_end(&self) -> bool {
        self.cursor >= self.text.len()
    }

    /// The unread remainder of the text.
    pub fn rest(&self) -> &'a str {
        &self.text[self.cursor..]
    }

    /// Moves the cursor to `pos`, clipping to the buffer end. Combinators use
    /// it to backtrack to a previously observed cursor.
    pub fn rewind(&mut self, pos: usize) {
        self.cursor = self.floor(pos);
    }

    /// Advances by exactly `n` bytes, without any trivia skipping.
    pub fn advance(&mut self, n: usize) {
        self.cursor = self.floor(self.cursor + n);
    }

    /// Advances while `stop` keeps saying "not a boundary" and input remains.
    pub fn skip(&mut self, stop: &dyn Stop) {
        while self.cursor < self.text.len() {
            let rest = &self.text[self.cursor..];
            if stop.stops(rest) {
                break;
            }
            self.cursor += char_width(rest);
        }
    }

    /// Advances by `n` bytes and then skips the trivia after them with `stop`.
    pub fn consume(&mut self, n: usize, stop: &dyn Stop) {
        self.advance(n);
        self.skip(stop);
    }

    /// Up to `n` bytes starting at the cursor, clipped to the remaining
    /// length. Never errors and never advances.
    pub fn peek(&self, n: usize) -> &'a str {
        &self.text[self.cursor..self.floor(self.cursor + n)]
    }

    /// Counts the bytes from the cursor up to the first boundary reported by
    /// `stop`, or the end of input. Does not advance.
    pub fn count_until(&self, stop: &dyn Stop) -> usize {
        let mut size = 0;
        while self.cursor + size < self.text.len() {
            let rest = &self.text[self.cursor + size..];
            if stop.stops(rest) {
                break;
            }
            size += char_width(rest);
        }
        size
    }

    /// True if `cursor + n` is at or past the end of input, or `stop` reports
    /// a boundary at that offset.
    pub fn ends(&self, n: usize, stop: &dyn Stop) -> bool {
        let at = self.floor(self.cursor + n);
        at >= self.text.len() || stop.stops(&self.text[at..])
    }

    /// The raw source slice between two previously observed cursor positions.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let start = self.floor(start);
        let end = self.floor(end);
        if start <= end {
            &self.text[start..end]
        } else {
            ""
        }
    }

    fn floor(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}

fn char_width(rest: &str) -> usize {
    rest.chars().next().map(char::len_utf8).unwrap_or(1)
}
