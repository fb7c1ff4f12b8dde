pub mod annotation;
pub mod config;
pub mod estimate;
pub mod marks;
pub mod palette;
pub mod render;
pub mod resolver;
pub mod sanitize;
pub mod shield;

pub use crate::annotation::{AnnotationCode, Density, RenderMode};
pub use crate::config::{Config, ConfigError};
pub use crate::estimate::{CostEstimate, estimate_token_cost, mode_instruction_code};
pub use crate::palette::{Palette, PaletteRegistry};
pub use crate::resolver::Fragment;
pub use crate::sanitize::ResponseSanitizer;

use crate::render::StyleRenderer;
use crate::shield::CodeBlockShield;

/// True when the text can possibly be changed by the pipeline: it carries a
/// bracket (candidate marker) or the known encoding artifact. Everything
/// else passes through untouched.
fn needs_processing(text: &str) -> bool {
    text.contains('[') || text.contains(sanitize::MISENCODED_DASH)
}

/// Reusable annotation engine: a palette registry, a configured sanitizer,
/// and a chosen palette name. Immutable once built; `render` is a pure
/// function of its inputs, so concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct HighlightEngine {
    registry: PaletteRegistry,
    sanitizer: ResponseSanitizer,
    palette: String,
}

impl Default for HighlightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightEngine {
    /// Engine over the built-in palettes with the default promotion
    /// heuristic and the default palette.
    pub fn new() -> Self {
        HighlightEngine {
            registry: PaletteRegistry::with_builtins(),
            sanitizer: ResponseSanitizer::new(),
            palette: palette::DEFAULT_PALETTE.to_string(),
        }
    }

    /// Engine resolved from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(HighlightEngine {
            registry: config.palette_registry()?,
            sanitizer: config.sanitizer(),
            palette: config.global.palette.clone(),
        })
    }

    /// Select the palette used by subsequent renders. Unknown names resolve
    /// to the default palette at lookup time.
    pub fn with_palette(mut self, name: &str) -> Self {
        self.palette = name.to_string();
        self
    }

    /// Convert annotated response text into styled span markup.
    ///
    /// Density is accepted for interface completeness and forwarded unused;
    /// it is metadata for the upstream prompt builder.
    pub fn render(&self, text: &str, mode: RenderMode, _density: Density) -> String {
        if mode == RenderMode::None {
            return self.strip(text);
        }
        if !needs_processing(text) {
            log::trace!("no candidate markers, returning input verbatim");
            return text.to_string();
        }

        let mut shield = CodeBlockShield::new();
        let text = self.sanitizer.fix_encoding(text);
        let text = shield.extract_fences(&text);
        let text = self.sanitizer.promote_code_examples(&text, &mut shield);
        let text = self.sanitizer.cleanse(&text);

        if !resolver::has_annotation_markers(&text) {
            log::debug!("no annotation markers after sanitization, skipping resolution");
            return shield.restore(&text);
        }

        let text = resolver::normalize_markdown(&text);
        let fragments = resolver::resolve(&text);
        log::debug!(
            "resolved {} top-level fragment(s), {} shielded block(s)",
            fragments.len(),
            shield.len()
        );

        let palette = self.registry.lookup(&self.palette);
        let renderer = StyleRenderer::new(palette, mode);
        let styled = renderer.render_fragments(&fragments);
        shield.restore(&styled)
    }

    /// Mode-None pass: delete all recognized marker delimiters, keep inner
    /// text, leave everything else (markdown included) alone. Idempotent.
    pub fn strip(&self, text: &str) -> String {
        if !needs_processing(text) {
            return text.to_string();
        }
        let mut shield = CodeBlockShield::new();
        let text = self.sanitizer.fix_encoding(text);
        let text = shield.extract_fences(&text);
        let mut text = self.sanitizer.promote_code_examples(&text, &mut shield);

        // Deleting a marker can expose another repairable pattern, so
        // cleanse-and-strip runs to a fixpoint; each round only deletes, so
        // this terminates.
        loop {
            let stripped = resolver::strip_marker_tokens(&self.sanitizer.cleanse(&text));
            if stripped == text {
                break;
            }
            text = stripped;
        }

        shield.restore(&text)
    }
}

/// One-shot rendering against the built-in palettes. This is the whole
/// external surface: response text in, styled string out.
pub fn render(text: &str, palette_name: &str, mode: RenderMode, density: Density) -> String {
    HighlightEngine::new().with_palette(palette_name).render(text, mode, density)
}

/// One-shot marker stripping (mode None).
pub fn strip_markers(text: &str) -> String {
    HighlightEngine::new().strip(text)
}
