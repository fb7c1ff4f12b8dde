//! Repair of malformed, legacy, and adversarial marker sequences.
//!
//! The upstream generator is imperfect: it emits mis-encoded punctuation,
//! retired marker vocabularies, meta markers that belong to its reasoning
//! wrapper, and unbalanced markers. Every known malformation class has a
//! repair-or-drop rule here, so the tokenizer downstream only ever sees
//! well-formed candidate markers from the closed code set.

use crate::annotation::AnnotationCode;
use crate::shield::CodeBlockShield;
use fancy_regex::Regex as FancyRegex;
use regex::Regex;
use std::sync::LazyLock;

/// UTF-8 em dash read back as Latin-1 by a broken upstream transcoder.
pub(crate) const MISENCODED_DASH: &str = "\u{00e2}\u{20ac}\u{201d}";

/// Default keyword heuristic for classifying `[P]` example bodies as code.
/// Tunable policy, not a correctness boundary; see `PromoteConfig`.
pub const DEFAULT_PROMOTE_KEYWORDS: &[&str] = &[
    "function",
    "def",
    "class",
    "procedure",
    "algorithm",
    "if",
    "while",
    "for",
    "return",
    "const",
    "let",
    "var",
    "import",
    "export",
    "distances",
    "graph",
    "node",
];

static EXAMPLE_PAIR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\[P\](.+?)\[/P\]").unwrap());

/// Reasoning/response wrapper markers; must never surface in output.
static META_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[/?(?:thinking|response)\]").unwrap());

/// Retired full-word color vocabulary, one pair pattern per word.
static FULL_WORD_PAIRS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["GREEN", "RED", "BLUE", "YELLOW", "ORANGE", "PURPLE"]
        .iter()
        .map(|word| Regex::new(&format!(r"(?i)\[{word}\]([^\[]*)\[/{word}\]")).unwrap())
        .collect()
});

/// Single-letter experimental markers that never shipped.
static EXPERIMENTAL_PAIRS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["E", "I", "N", "T", "S", "M", "D", "C", "A", "X"]
        .iter()
        .map(|letter| Regex::new(&format!(r"(?i)\[{letter}\]([^\[]*)\[/{letter}\]")).unwrap())
        .collect()
});

static LEADING_MODE_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)^\s*\[HU\]\s*").unwrap(),
        Regex::new(r"(?i)^\s*\[HL\]\s*").unwrap(),
    ]
});

static STRAY_MODE_CLOSERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\[/HU\]").unwrap(),
        Regex::new(r"(?i)\[/HL\]").unwrap(),
    ]
});

/// One pair matcher per closed-set code. The body may contain markers of
/// *other* codes but no marker of the same code, so different-code nesting
/// survives the orphan sweep while same-code self-nesting does not (the
/// outer pair is treated as orphaned, a documented limitation).
static CODE_PAIR_MATCHERS: LazyLock<Vec<(AnnotationCode, FancyRegex)>> = LazyLock::new(|| {
    AnnotationCode::ALL
        .iter()
        .map(|&code| {
            let marker = code.as_marker();
            let pattern = format!(r"\[{marker}\]((?:[^\[]|\[(?!/?{marker}\]))*?)\[/{marker}\]");
            (code, FancyRegex::new(&pattern).unwrap())
        })
        .collect()
});

/// Repairs known malformed marker patterns and strips orphaned or legacy
/// markers ahead of the main parse. Stateless apart from the configured
/// code-promotion heuristic.
#[derive(Debug, Clone)]
pub struct ResponseSanitizer {
    promote_keywords: Regex,
}

impl Default for ResponseSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSanitizer {
    pub fn new() -> Self {
        Self::with_keywords(DEFAULT_PROMOTE_KEYWORDS.iter().map(|s| s.to_string()))
    }

    /// Build a sanitizer with a custom code-keyword heuristic. An empty
    /// list falls back to the defaults.
    pub fn with_keywords(keywords: impl IntoIterator<Item = String>) -> Self {
        let escaped: Vec<String> = keywords.into_iter().map(|word| regex::escape(&word)).collect();
        let escaped = if escaped.is_empty() {
            DEFAULT_PROMOTE_KEYWORDS.iter().map(|s| s.to_string()).collect()
        } else {
            escaped
        };
        let pattern = format!(r"(?i)\b(?:{})\b", escaped.join("|"));
        ResponseSanitizer {
            promote_keywords: Regex::new(&pattern).expect("escaped keywords form a valid pattern"),
        }
    }

    /// Replace the mis-encoded long-dash byte sequence with a comma-space.
    pub fn fix_encoding(&self, text: &str) -> String {
        text.replace(MISENCODED_DASH, ", ")
    }

    /// Promote `[P]` example bodies that look like multi-line code into
    /// fenced form, shielded immediately so no later pass can touch them.
    /// Inline examples are left as-is.
    pub fn promote_code_examples(&self, text: &str, shield: &mut CodeBlockShield) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last_end = 0;
        let mut promoted = 0usize;
        for caps in EXAMPLE_PAIR_REGEX.captures_iter(text) {
            let m = caps.get(0).expect("regex match");
            let body = &caps[1];
            out.push_str(&text[last_end..m.start()]);
            if body.contains('\n') && self.promote_keywords.is_match(body) {
                let fenced = format!("```\n{}\n```", body.trim());
                out.push_str(&shield.shield_literal(fenced));
                promoted += 1;
            } else {
                out.push_str(m.as_str());
            }
            last_end = m.end();
        }
        out.push_str(&text[last_end..]);
        if promoted > 0 {
            log::debug!("promoted {promoted} example marker(s) to fenced code");
        }
        out
    }

    /// Steps 3-6 of the repair sequence: meta markers, legacy vocabularies,
    /// stray mode closers, the surgical orphan sweep, then leading
    /// mode-selector markers. The leading sweep runs last (to a fixpoint)
    /// because deleting an orphan can expose a mode marker at the start.
    pub fn cleanse(&self, text: &str) -> String {
        let mut text = META_MARKER_REGEX.replace_all(text, "").into_owned();

        for pair in FULL_WORD_PAIRS.iter().chain(EXPERIMENTAL_PAIRS.iter()) {
            text = pair.replace_all(&text, "$1").into_owned();
        }

        for closer in STRAY_MODE_CLOSERS.iter() {
            text = closer.replace_all(&text, "").into_owned();
        }

        let mut text = remove_orphan_markers(&text);

        loop {
            let mut changed = false;
            for leading in LEADING_MODE_MARKERS.iter() {
                let next = leading.replace(&text, "").into_owned();
                if next != text {
                    text = next;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        text
    }
}

/// For each code: protect simple pairs behind placeholders, delete every
/// remaining marker of that code, restore the pairs verbatim. Guarantees no
/// unmatched closed-set marker reaches the tokenizer.
fn remove_orphan_markers(text: &str) -> String {
    let mut text = text.to_string();

    for (code, pair_regex) in CODE_PAIR_MATCHERS.iter() {
        let marker = code.as_marker();

        let mut kept: Vec<String> = Vec::new();
        let mut protected = String::with_capacity(text.len());
        let mut last_end = 0;
        let mut iter = pair_regex.find_iter(&text);
        while let Some(Ok(m)) = iter.next() {
            protected.push_str(&text[last_end..m.start()]);
            protected.push_str(&format!("__KEEP_{marker}_{}__", kept.len()));
            kept.push(m.as_str().to_string());
            last_end = m.end();
        }
        protected.push_str(&text[last_end..]);

        let open = format!("[{marker}]");
        let close = format!("[/{marker}]");
        let stripped = protected.replace(&open, "").replace(&close, "");

        let mut restored = stripped;
        for (index, pair) in kept.iter().enumerate() {
            restored = restored.replacen(&format!("__KEEP_{marker}_{index}__"), pair, 1);
        }
        text = restored;
    }

    text
}
