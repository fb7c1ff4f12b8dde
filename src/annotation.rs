//! Core vocabulary for the annotation engine: the closed set of semantic
//! annotation codes, the render mode selection, and the density hint.
//!
//! Legacy and invalid marker codes never reach these types; the sanitizer
//! normalizes them away before tokenization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic category attached to a span of annotated text.
///
/// The two-letter codes (`GR`, `BR`) must be matched before their one-letter
/// prefixes (`G`, `B`) wherever a marker alternation is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnnotationCode {
    /// Yellow - important/key points
    #[serde(rename = "Y")]
    Y,
    /// Blue - concepts/definitions
    #[serde(rename = "B")]
    B,
    /// Orange - steps/sequences
    #[serde(rename = "O")]
    O,
    /// Green - success/positive
    #[serde(rename = "G")]
    G,
    /// Red - warnings/errors
    #[serde(rename = "R")]
    R,
    /// Pink - examples
    #[serde(rename = "P")]
    P,
    /// Light blue - data/numbers
    #[serde(rename = "L")]
    L,
    /// Gray - code/technical
    #[serde(rename = "GR")]
    Gr,
    /// Purple - emphasis/highlights
    #[serde(rename = "H")]
    H,
    /// Brown - context/background info
    #[serde(rename = "BR")]
    Br,
}

impl AnnotationCode {
    /// All codes, in the order the sanitizer sweeps them.
    pub const ALL: [AnnotationCode; 10] = [
        AnnotationCode::Y,
        AnnotationCode::B,
        AnnotationCode::O,
        AnnotationCode::G,
        AnnotationCode::R,
        AnnotationCode::P,
        AnnotationCode::L,
        AnnotationCode::Gr,
        AnnotationCode::H,
        AnnotationCode::Br,
    ];

    /// The letter(s) used inside `[..]` markers.
    pub fn as_marker(&self) -> &'static str {
        match self {
            AnnotationCode::Y => "Y",
            AnnotationCode::B => "B",
            AnnotationCode::O => "O",
            AnnotationCode::G => "G",
            AnnotationCode::R => "R",
            AnnotationCode::P => "P",
            AnnotationCode::L => "L",
            AnnotationCode::Gr => "GR",
            AnnotationCode::H => "H",
            AnnotationCode::Br => "BR",
        }
    }

    /// Human-readable category name, used in tooltips and diagnostics.
    pub fn description(&self) -> &'static str {
        match self {
            AnnotationCode::Y => "key information",
            AnnotationCode::B => "concept",
            AnnotationCode::O => "step",
            AnnotationCode::G => "success",
            AnnotationCode::R => "warning",
            AnnotationCode::P => "example",
            AnnotationCode::L => "data",
            AnnotationCode::Gr => "code",
            AnnotationCode::H => "emphasis",
            AnnotationCode::Br => "context",
        }
    }

    /// Parse a marker letter sequence. Case-sensitive: markers are emitted
    /// uppercase by the upstream generator, and lowercase bracket text is
    /// ordinary prose.
    pub fn from_marker(s: &str) -> Option<AnnotationCode> {
        match s {
            "Y" => Some(AnnotationCode::Y),
            "B" => Some(AnnotationCode::B),
            "O" => Some(AnnotationCode::O),
            "G" => Some(AnnotationCode::G),
            "R" => Some(AnnotationCode::R),
            "P" => Some(AnnotationCode::P),
            "L" => Some(AnnotationCode::L),
            "GR" => Some(AnnotationCode::Gr),
            "H" => Some(AnnotationCode::H),
            "BR" => Some(AnnotationCode::Br),
            _ => None,
        }
    }
}

impl fmt::Display for AnnotationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_marker())
    }
}

impl FromStr for AnnotationCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnnotationCode::from_marker(&s.to_uppercase()).ok_or_else(|| format!("unknown annotation code: {s}"))
    }
}

/// Which visual treatment is applied to resolved annotations.
///
/// `Both` covers the two historical mode names "both" and
/// "highlights-underline", which were always rendered identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Strip markers, keep inner text, no styling
    None,
    /// Colored underline only
    Underline,
    /// Colored background only
    #[default]
    Highlights,
    /// Background and underline together
    #[serde(alias = "highlights-underline")]
    Both,
}

impl RenderMode {
    /// Lenient name lookup. Unknown names fall back to `Highlights`, the
    /// documented default treatment.
    pub fn from_name(s: &str) -> RenderMode {
        match s.to_lowercase().as_str() {
            "none" | "off" => RenderMode::None,
            "underline" | "u" => RenderMode::Underline,
            "highlights" | "hl" => RenderMode::Highlights,
            "both" | "b" | "highlights-underline" | "hu" => RenderMode::Both,
            _ => RenderMode::Highlights,
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::None => write!(f, "none"),
            RenderMode::Underline => write!(f, "underline"),
            RenderMode::Highlights => write!(f, "highlights"),
            RenderMode::Both => write!(f, "both"),
        }
    }
}

/// Annotation density requested from the upstream generator.
///
/// Forwarded unused by the rendering pipeline; only the prompt-side cost
/// estimator consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Auto,
    Explicit,
}

impl Density {
    /// Anything other than "auto" counts as an explicit density request.
    pub fn from_name(s: &str) -> Density {
        if s.eq_ignore_ascii_case("auto") {
            Density::Auto
        } else {
            Density::Explicit
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Density::Auto => write!(f, "auto"),
            Density::Explicit => write!(f, "explicit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_round_trip() {
        for code in AnnotationCode::ALL {
            assert_eq!(AnnotationCode::from_marker(code.as_marker()), Some(code));
        }
    }

    #[test]
    fn two_letter_codes_are_distinct_from_prefixes() {
        assert_eq!(AnnotationCode::from_marker("GR"), Some(AnnotationCode::Gr));
        assert_eq!(AnnotationCode::from_marker("G"), Some(AnnotationCode::G));
        assert_eq!(AnnotationCode::from_marker("BR"), Some(AnnotationCode::Br));
        assert_eq!(AnnotationCode::from_marker("B"), Some(AnnotationCode::B));
    }

    #[test]
    fn unknown_marker_rejected() {
        assert_eq!(AnnotationCode::from_marker("U"), None);
        assert_eq!(AnnotationCode::from_marker("X"), None);
        assert_eq!(AnnotationCode::from_marker(""), None);
        // Lowercase bracket text is prose, not a marker
        assert_eq!(AnnotationCode::from_marker("y"), None);
    }

    #[test]
    fn mode_from_name_aliases() {
        assert_eq!(RenderMode::from_name("none"), RenderMode::None);
        assert_eq!(RenderMode::from_name("underline"), RenderMode::Underline);
        assert_eq!(RenderMode::from_name("HL"), RenderMode::Highlights);
        assert_eq!(RenderMode::from_name("both"), RenderMode::Both);
        assert_eq!(RenderMode::from_name("highlights-underline"), RenderMode::Both);
        // Unknown mode degrades to the default treatment
        assert_eq!(RenderMode::from_name("sparkle"), RenderMode::Highlights);
    }

    #[test]
    fn density_from_name() {
        assert_eq!(Density::from_name("auto"), Density::Auto);
        assert_eq!(Density::from_name("AUTO"), Density::Auto);
        assert_eq!(Density::from_name("high"), Density::Explicit);
    }
}
