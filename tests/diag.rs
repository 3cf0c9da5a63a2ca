use pretty_assertions::assert_eq;

use scanit::diag::Snippet;

#[test]
fn caret_points_at_the_offset() {
    let text = "let x = 1\nlet y == 2";
    let snippet = Snippet::new(text, 16, false);
    assert_eq!(snippet.line, "let y == 2");
    assert_eq!(snippet.marker, "      ^");
    assert_eq!(snippet.number, 2);
}

#[test]
fn backtrack_walks_over_trailing_whitespace() {
    let text = "first  \nsecond";
    let snippet = Snippet::new(text, 7, true);
    assert_eq!(snippet.line, "first  ");
    assert_eq!(snippet.marker, "    ^");
    assert_eq!(snippet.number, 1);
}

#[test]
fn end_of_input_anchors_on_the_last_token() {
    let text = "alpha beta";
    let snippet = Snippet::new(text, text.len(), true);
    assert_eq!(snippet.line, "alpha beta");
    assert_eq!(snippet.marker, "         ^");
    assert_eq!(snippet.number, 1);
}

#[test]
fn marker_preserves_tabs() {
    let text = "\tif x";
    let snippet = Snippet::new(text, 4, false);
    assert_eq!(snippet.line, "\tif x");
    assert_eq!(snippet.marker, "\t   ^");
    assert_eq!(snippet.number, 1);
}

#[test]
fn offsets_past_the_end_clip_to_the_buffer() {
    let snippet = Snippet::new("abc", 99, false);
    assert_eq!(snippet.line, "abc");
    assert_eq!(snippet.marker, "   ^");
}
