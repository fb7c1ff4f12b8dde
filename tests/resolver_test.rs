use hilite_lib::resolver::{Fragment, resolve};
use hilite_lib::{AnnotationCode, Density, RenderMode, render};
use pretty_assertions::assert_eq;

fn plain(s: &str) -> Fragment {
    Fragment::Plain(s.to_string())
}

#[test]
fn three_level_nesting_builds_a_tree() {
    let fragments = resolve("[O]1[L]2[GR]3[/GR]4[/L]5[/O]");
    assert_eq!(
        fragments,
        vec![Fragment::Annotated(
            AnnotationCode::O,
            vec![
                plain("1"),
                Fragment::Annotated(
                    AnnotationCode::L,
                    vec![
                        plain("2"),
                        Fragment::Annotated(AnnotationCode::Gr, vec![plain("3")]),
                        plain("4"),
                    ],
                ),
                plain("5"),
            ],
        )]
    );
}

#[test]
fn sequential_pairs_stay_siblings() {
    let fragments = resolve("[Y]a[/Y][B]b[/B]");
    assert_eq!(
        fragments,
        vec![
            Fragment::Annotated(AnnotationCode::Y, vec![plain("a")]),
            Fragment::Annotated(AnnotationCode::B, vec![plain("b")]),
        ]
    );
}

#[test]
fn crossing_markers_render_deterministically() {
    // Crossing pairs survive sanitization; the resolver clamps the stale
    // frame so the earlier close keeps the shared text.
    let out = render("[B]x[Y]a[/B]y[/Y]", "vibrant", RenderMode::Highlights, Density::Auto);
    assert_eq!(
        out,
        "<span style=\"background-color:#D5FEFF;padding:1px 3px 0 3px;border-radius:3px;display:inline\">xa</span>\
<span style=\"background-color:#FFF4C3;padding:1px 3px 0 3px;border-radius:3px;display:inline\">y</span>"
    );
}

#[test]
fn empty_annotation_renders_empty_span() {
    let out = render("[Y][/Y]", "vibrant", RenderMode::Highlights, Density::Auto);
    assert_eq!(
        out,
        "<span style=\"background-color:#FFF4C3;padding:1px 3px 0 3px;border-radius:3px;display:inline\"></span>"
    );
}

#[test]
fn text_between_pairs_stays_plain() {
    let out = render("a [Y]b[/Y] c [B]d[/B] e", "vibrant", RenderMode::Highlights, Density::Auto);
    assert!(out.starts_with("a <span"));
    assert!(out.contains("</span> c <span"));
    assert!(out.ends_with("</span> e"));
}

#[test]
fn all_ten_codes_resolve_and_render() {
    for code in AnnotationCode::ALL {
        let marker = code.as_marker();
        let text = format!("[{marker}]x[/{marker}]");
        let out = render(&text, "vibrant", RenderMode::Highlights, Density::Auto);
        assert!(
            out.starts_with("<span style=\"background-color:#"),
            "{marker} did not render: {out}"
        );
        assert!(out.ends_with(">x</span>"), "{marker} did not render: {out}");
    }
}
