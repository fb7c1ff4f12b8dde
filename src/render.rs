//! Materialization of resolved fragments into inline-styled span markup.

use crate::annotation::{AnnotationCode, RenderMode};
use crate::palette::Palette;
use crate::resolver::Fragment;
use itertools::Itertools;

/// Renders a fragment tree against a palette and render mode. Plain
/// fragments pass through as literal text; annotated fragments are rendered
/// depth-first, children before wrapper.
#[derive(Debug, Clone, Copy)]
pub struct StyleRenderer<'a> {
    palette: &'a Palette,
    mode: RenderMode,
}

impl<'a> StyleRenderer<'a> {
    pub fn new(palette: &'a Palette, mode: RenderMode) -> Self {
        StyleRenderer { palette, mode }
    }

    pub fn render_fragments(&self, fragments: &[Fragment]) -> String {
        fragments.iter().map(|fragment| self.render_fragment(fragment)).join("")
    }

    fn render_fragment(&self, fragment: &Fragment) -> String {
        match fragment {
            Fragment::Plain(text) => text.clone(),
            Fragment::Annotated(code, children) => {
                let inner = self.render_fragments(children);
                self.wrap(&inner, *code)
            }
        }
    }

    fn wrap(&self, content: &str, code: AnnotationCode) -> String {
        match self.mode {
            // Mode None is handled by the marker-stripping pass; the
            // renderer passes content through unchanged if reached.
            RenderMode::None => content.to_string(),
            RenderMode::Underline => {
                let color = self.palette.underline(code);
                format!(
                    "<span style=\"text-decoration:underline {color};text-decoration-thickness:2px;text-underline-offset:2px;text-decoration-skip-ink:none\">{content}</span>"
                )
            }
            RenderMode::Highlights => {
                let background = self.palette.background(code);
                format!(
                    "<span style=\"background-color:{background};padding:1px 3px 0 3px;border-radius:3px;display:inline\">{content}</span>"
                )
            }
            RenderMode::Both => {
                let background = self.palette.background(code);
                let underline = self.palette.underline(code);
                format!(
                    "<span style=\"background-color:{background};text-decoration:underline {underline};text-decoration-thickness:2px;text-underline-offset:2px;text-decoration-skip-ink:none;padding:1px 3px 0 3px;border-radius:3px\">{content}</span>"
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteRegistry;

    fn fragments() -> Vec<Fragment> {
        vec![Fragment::Annotated(
            AnnotationCode::Y,
            vec![Fragment::Plain("key".to_string())],
        )]
    }

    #[test]
    fn highlights_mode_uses_background_table() {
        let palette = PaletteRegistry::builtin().lookup("vibrant");
        let renderer = StyleRenderer::new(palette, RenderMode::Highlights);
        assert_eq!(
            renderer.render_fragments(&fragments()),
            "<span style=\"background-color:#FFF4C3;padding:1px 3px 0 3px;border-radius:3px;display:inline\">key</span>"
        );
    }

    #[test]
    fn underline_mode_uses_underline_table() {
        let palette = PaletteRegistry::builtin().lookup("vibrant");
        let renderer = StyleRenderer::new(palette, RenderMode::Underline);
        assert_eq!(
            renderer.render_fragments(&fragments()),
            "<span style=\"text-decoration:underline #FFC41A;text-decoration-thickness:2px;text-underline-offset:2px;text-decoration-skip-ink:none\">key</span>"
        );
    }

    #[test]
    fn both_mode_combines_background_and_underline() {
        let palette = PaletteRegistry::builtin().lookup("vibrant");
        let renderer = StyleRenderer::new(palette, RenderMode::Both);
        let out = renderer.render_fragments(&fragments());
        assert!(out.starts_with("<span style=\"background-color:#FFF4C3;text-decoration:underline #FFC41A;"));
        assert!(out.ends_with(">key</span>"));
    }

    #[test]
    fn nested_fragments_render_inside_out() {
        let palette = PaletteRegistry::builtin().lookup("vibrant");
        let renderer = StyleRenderer::new(palette, RenderMode::Highlights);
        let tree = vec![Fragment::Annotated(
            AnnotationCode::Y,
            vec![
                Fragment::Plain("a".to_string()),
                Fragment::Annotated(AnnotationCode::B, vec![Fragment::Plain("b".to_string())]),
            ],
        )];
        let out = renderer.render_fragments(&tree);
        assert_eq!(
            out,
            "<span style=\"background-color:#FFF4C3;padding:1px 3px 0 3px;border-radius:3px;display:inline\">a<span style=\"background-color:#D5FEFF;padding:1px 3px 0 3px;border-radius:3px;display:inline\">b</span></span>"
        );
    }

    #[test]
    fn plain_fragments_pass_through() {
        let palette = PaletteRegistry::builtin().lookup("natural");
        let renderer = StyleRenderer::new(palette, RenderMode::Highlights);
        let tree = vec![Fragment::Plain("just text".to_string())];
        assert_eq!(renderer.render_fragments(&tree), "just text");
    }
}
