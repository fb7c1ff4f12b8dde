//! Shielding of literal code content.
//!
//! Fenced code blocks (and inline-example content promoted to fenced form by
//! the sanitizer) are replaced by opaque placeholders before any marker
//! processing, and restored byte-for-byte after styling. Bracket-like
//! sequences inside code are therefore never seen by the resolver.

use regex::Regex;
use std::sync::LazyLock;

static FENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__CODEBLOCK_(\d+)__").unwrap());

fn placeholder(index: usize) -> String {
    format!("__CODEBLOCK_{index}__")
}

/// Collects literal code regions during extraction and restores them after
/// marker resolution. Placeholders are keyed by discovery order and resolved
/// by index, so restoration is independent of any reordering in between.
#[derive(Debug, Default)]
pub struct CodeBlockShield {
    blocks: Vec<String>,
}

impl CodeBlockShield {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shielded regions so far.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Replace every closed fenced block with a placeholder, recording the
    /// literal text. An unclosed trailing fence is left in place.
    pub fn extract_fences(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last_end = 0;
        for m in FENCE_REGEX.find_iter(text) {
            out.push_str(&text[last_end..m.start()]);
            out.push_str(&placeholder(self.blocks.len()));
            self.blocks.push(m.as_str().to_string());
            last_end = m.end();
        }
        out.push_str(&text[last_end..]);
        out
    }

    /// Shield an already-assembled literal (the sanitizer's promoted code
    /// examples), returning the placeholder to splice into the text.
    pub fn shield_literal(&mut self, literal: String) -> String {
        let token = placeholder(self.blocks.len());
        self.blocks.push(literal);
        token
    }

    /// Substitute each placeholder with its original literal text, exactly
    /// once, by index. Placeholder-shaped text with no recorded block is
    /// left untouched.
    pub fn restore(&self, text: &str) -> String {
        if self.blocks.is_empty() {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        let mut last_end = 0;
        for caps in PLACEHOLDER_REGEX.captures_iter(text) {
            let m = caps.get(0).expect("regex match");
            out.push_str(&text[last_end..m.start()]);
            // An out-of-range or overflowing index is not one of ours
            match caps[1].parse::<usize>().ok().and_then(|index| self.blocks.get(index)) {
                Some(block) => out.push_str(block),
                None => out.push_str(m.as_str()),
            }
            last_end = m.end();
        }
        out.push_str(&text[last_end..]);
        out
    }
}
