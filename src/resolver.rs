//! Tokenization and stack-based resolution of annotation markers.
//!
//! The resolver consumes sanitized, shielded text and produces an ordered
//! fragment tree. Nesting is explicit in the tree; nothing downstream has to
//! re-derive it. The output sequence is an append-only arena and stack
//! frames store indices into it, never references, so truncation on a match
//! cannot dangle.

use crate::annotation::AnnotationCode;
use fancy_regex::Regex as FancyRegex;
use regex::Regex;
use std::sync::LazyLock;

/// Two-letter alternates first, so `GR`/`BR` win over `G`/`B`.
static MARKER_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(/?)(GR|BR|Y|B|O|G|R|P|L|H)\]").unwrap());

static OPEN_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(GR|BR|Y|B|O|G|R|P|L|H)\]").unwrap());

/// Orphaned `**` at a line start: no closing `**` follows on the line.
static BOLD_AT_LINE_START: LazyLock<FancyRegex> =
    LazyLock::new(|| FancyRegex::new(r"(?m)^\*\*(?![^\n]*\*\*)").unwrap());

/// Orphaned `**` right after a line break. The first lookahead keeps
/// `***strong em***` intact, the second keeps bold that closes on the line.
static BOLD_AFTER_BREAK: LazyLock<FancyRegex> =
    LazyLock::new(|| FancyRegex::new(r"\n\s*\*\*(?!\*)(?![^\n]*\*\*)").unwrap());

static BOLD_PAIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+?)\*\*").unwrap());
static ITALIC_PAIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+?)\*").unwrap());
static CODE_SPAN_PAIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// True when the text still carries at least one opening marker from the
/// closed set. Cheap pre-check used for the no-marker fast path.
pub fn has_annotation_markers(text: &str) -> bool {
    OPEN_MARKER_REGEX.is_match(text)
}

/// Delete every marker token, keeping all surrounding text. The mode-None
/// rendering path uses this instead of the resolver.
pub fn strip_marker_tokens(text: &str) -> String {
    MARKER_TOKEN_REGEX.replace_all(text, "").into_owned()
}

/// One lexical unit of the marker grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Open(AnnotationCode),
    Close(AnnotationCode),
    Text(&'a str),
}

/// A resolved piece of output: literal text, or an annotated span with its
/// children in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Plain(String),
    Annotated(AnnotationCode, Vec<Fragment>),
}

/// An open marker awaiting its close. `output_start` is the arena index
/// where the marker's content begins.
#[derive(Debug, Clone, Copy)]
struct Frame {
    code: AnnotationCode,
    output_start: usize,
}

/// Convert the minimal emphasis/code markdown subset to span markup. These
/// are direct, non-nesting substitutions applied before tokenization; they
/// are not part of the annotation state machine.
pub fn normalize_markdown(text: &str) -> String {
    let text = BOLD_AT_LINE_START.replace_all(text, "");
    let text = BOLD_AFTER_BREAK.replace_all(&text, "\n");
    let text = BOLD_PAIR.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC_PAIR.replace_all(&text, "<em>$1</em>");
    CODE_SPAN_PAIR
        .replace_all(&text, "<code class=\"inline-code\">$1</code>")
        .into_owned()
}

/// Split text into the alternating sequence of markers and plain text.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last_end = 0;
    for caps in MARKER_TOKEN_REGEX.captures_iter(text) {
        let m = caps.get(0).expect("regex match");
        if m.start() > last_end {
            tokens.push(Token::Text(&text[last_end..m.start()]));
        }
        let code = AnnotationCode::from_marker(&caps[2]).expect("token regex only matches closed-set codes");
        if caps[1].is_empty() {
            tokens.push(Token::Open(code));
        } else {
            tokens.push(Token::Close(code));
        }
        last_end = m.end();
    }
    if last_end < text.len() {
        tokens.push(Token::Text(&text[last_end..]));
    }
    tokens
}

/// Resolve markers into a fragment tree.
///
/// A close token binds to the most recent open frame of the same code;
/// frames pushed after it stay on the stack. When pairs cross, a surviving
/// frame can record a start index past the truncated arena length; the index
/// is clamped when that frame closes, so the earlier-closed marker keeps the
/// shared text and the later one wraps only what follows. Unmatched closes
/// are dropped, unmatched opens are discarded at end of input.
pub fn resolve(text: &str) -> Vec<Fragment> {
    let mut output: Vec<Fragment> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for token in tokenize(text) {
        match token {
            Token::Open(code) => {
                stack.push(Frame {
                    code,
                    output_start: output.len(),
                });
            }
            Token::Text(t) => {
                output.push(Fragment::Plain(t.to_string()));
            }
            Token::Close(code) => {
                let Some(j) = stack.iter().rposition(|frame| frame.code == code) else {
                    continue;
                };
                let frame = stack.remove(j);
                let start = frame.output_start.min(output.len());
                let children: Vec<Fragment> = output.drain(start..).collect();
                output.push(Fragment::Annotated(code, children));
            }
        }
    }

    if !stack.is_empty() {
        log::debug!("{} open marker(s) without a close were discarded", stack.len());
    }

    output
}
