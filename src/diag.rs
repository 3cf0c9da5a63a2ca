/// A human-oriented view of one source line: the line text, a caret marker
/// pointing into it, and the 1-based line number. This is the whole interface
/// between the engine's byte offsets and a readable report.
///
/// # Example
/// ```
/// use scanit::diag::Snippet;
///
/// let snippet = Snippet::new("let x =\nlet = 10", 12, false);
/// assert_eq!(snippet.line, "let = 10");
/// assert_eq!(snippet.marker, "    ^");
/// assert_eq!(snippet.number, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub line: String,
    pub marker: String,
    pub number: usize,
}

impl Snippet {
    /// Renders the line around the byte offset `at`.
    ///
    /// With `backtrack` the anchor first walks left over the end of input and
    /// any whitespace, so a failure reported just past a token points at the
    /// token itself rather than at the gap after it.
    pub fn new(text: &str, at: usize, backtrack: bool) -> Self {
        let mut anchor = floor_boundary(text, at);
        if backtrack {
            while anchor > 0 && (anchor >= text.len() || starts_with_space(&text[anchor..])) {
                anchor = floor_boundary(text, anchor - 1);
            }
        }

        let line_start = text[..anchor].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = text[anchor..]
            .find('\n')
            .map(|i| anchor + i)
            .unwrap_or(text.len());
        let line = text[line_start..line_end].to_string();

        // whitespace is copied into the marker so tabs keep their width
        let mut marker = String::new();
        for c in text[line_start..anchor].chars() {
            marker.push(if c.is_whitespace() { c } else { ' ' });
        }
        marker.push('^');

        let number = text[..line_start].matches('\n').count() + 1;

        Snippet {
            line,
            marker,
            number,
        }
    }
}

fn floor_boundary(text: &str, at: usize) -> usize {
    let mut at = at.min(text.len());
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

fn starts_with_space(rest: &str) -> bool {
    rest.chars().next().map(char::is_whitespace).unwrap_or(false)
}
