//! Named color palettes for annotation styling.
//!
//! A palette is a pair of color tables (background, underline) keyed by
//! annotation code. The registry is the single source of truth: built once,
//! read-only afterwards, consulted only by the style renderer.

use crate::annotation::AnnotationCode;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Background color used when a palette has no entry for a code.
pub const DEFAULT_BACKGROUND: &str = "#FFF4C3";
/// Underline color used when a palette has no entry for a code.
pub const DEFAULT_UNDERLINE: &str = "#FF7744";

/// The palette every unknown-name lookup resolves to.
pub const DEFAULT_PALETTE: &str = "vibrant";

/// A named pair of color tables indexed by annotation code.
#[derive(Debug, Clone)]
pub struct Palette {
    pub name: String,
    pub background: HashMap<AnnotationCode, String>,
    pub underline: HashMap<AnnotationCode, String>,
}

impl Palette {
    /// Background color for a code, falling back to [`DEFAULT_BACKGROUND`].
    pub fn background(&self, code: AnnotationCode) -> &str {
        self.background.get(&code).map(String::as_str).unwrap_or(DEFAULT_BACKGROUND)
    }

    /// Underline color for a code, falling back to [`DEFAULT_UNDERLINE`].
    pub fn underline(&self, code: AnnotationCode) -> &str {
        self.underline.get(&code).map(String::as_str).unwrap_or(DEFAULT_UNDERLINE)
    }
}

fn table(entries: [(&'static str, &'static str); 10]) -> HashMap<AnnotationCode, String> {
    entries
        .into_iter()
        .map(|(marker, color)| {
            let code = AnnotationCode::from_marker(marker).expect("built-in palette uses valid codes");
            (code, color.to_string())
        })
        .collect()
}

fn vibrant() -> Palette {
    Palette {
        name: "vibrant".to_string(),
        // Soft colors for highlight backgrounds
        background: table([
            ("Y", "#FFF4C3"),
            ("B", "#D5FEFF"),
            ("O", "#FFD5C3"),
            ("G", "#DCFCE7"),
            ("R", "#fee2e2"),
            ("P", "#FEECFF"),
            ("L", "#E6F3FF"),
            ("GR", "#E8E6E5"),
            ("H", "#ede9fe"),
            ("BR", "#f5e8dd"),
        ]),
        // Stronger shades so underlines stay visible
        underline: table([
            ("Y", "#FFC41A"),
            ("B", "#5DCFFF"),
            ("O", "#FF7744"),
            ("G", "#22C55E"),
            ("R", "#ef4444"),
            ("P", "#FC90FF"),
            ("L", "#8DC5FF"),
            ("GR", "#ACA8A4"),
            ("H", "#8b5cf6"),
            ("BR", "#92400e"),
        ]),
    }
}

fn natural() -> Palette {
    Palette {
        name: "natural".to_string(),
        background: table([
            ("Y", "#F5F0E8"),
            ("B", "#E8F0F4"),
            ("O", "#F5E8DD"),
            ("G", "#E8EDE6"),
            ("R", "#F5E8EA"),
            ("P", "#F0EAF5"),
            ("L", "#E6EEF3"),
            ("GR", "#E8E6E5"),
            ("H", "#EAE8F0"),
            ("BR", "#F0E8E0"),
        ]),
        underline: table([
            ("Y", "#9A8B7A"),
            ("B", "#2C5F6F"),
            ("O", "#92400E"),
            ("G", "#6B7056"),
            ("R", "#7C2D3F"),
            ("P", "#9B8BA8"),
            ("L", "#5C7B8B"),
            ("GR", "#ACA8A4"),
            ("H", "#7C6B8A"),
            ("BR", "#8B6B47"),
        ]),
    }
}

static BUILTIN: LazyLock<PaletteRegistry> = LazyLock::new(PaletteRegistry::with_builtins);

/// Immutable name-to-palette mapping with deterministic fallback.
#[derive(Debug, Clone)]
pub struct PaletteRegistry {
    palettes: BTreeMap<String, Palette>,
}

impl PaletteRegistry {
    /// Registry containing only the built-in palettes.
    pub fn with_builtins() -> Self {
        let mut palettes = BTreeMap::new();
        for palette in [vibrant(), natural()] {
            palettes.insert(palette.name.clone(), palette);
        }
        PaletteRegistry { palettes }
    }

    /// Process-wide shared registry of built-in palettes.
    pub fn builtin() -> &'static PaletteRegistry {
        &BUILTIN
    }

    /// Built-ins plus caller-supplied palettes. A custom palette with the
    /// name of a built-in shadows it.
    pub fn with_custom(custom: impl IntoIterator<Item = Palette>) -> Self {
        let mut registry = Self::with_builtins();
        for palette in custom {
            if registry.palettes.contains_key(&palette.name) {
                log::warn!("custom palette '{}' shadows a built-in palette", palette.name);
            }
            registry.palettes.insert(palette.name.clone(), palette);
        }
        registry
    }

    /// Look up a palette by name. Unknown names resolve to the default
    /// palette; this never fails.
    pub fn lookup(&self, name: &str) -> &Palette {
        self.palettes.get(name).unwrap_or_else(|| {
            &self.palettes[DEFAULT_PALETTE]
        })
    }

    /// Registered palette names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
