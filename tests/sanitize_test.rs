use hilite_lib::sanitize::ResponseSanitizer;
use hilite_lib::shield::CodeBlockShield;
use hilite_lib::{Density, RenderMode, render};
use pretty_assertions::assert_eq;

fn highlights(text: &str) -> String {
    render(text, "vibrant", RenderMode::Highlights, Density::Auto)
}

#[test]
fn legacy_full_word_colors_render_as_plain_text() {
    // Delimiters deleted, enclosed text kept, nothing styled
    let out = highlights("[YELLOW]sun[/YELLOW] [PURPLE]sky[/PURPLE]");
    assert_eq!(out, "sun sky");
}

#[test]
fn experimental_single_letter_markers_render_as_plain_text() {
    let out = highlights("[I]idea[/I] [T]term[/T] [C]cmd[/C]");
    assert_eq!(out, "idea term cmd");
}

#[test]
fn leading_mode_selector_is_dropped() {
    let out = highlights("[HL][Y]key[/Y]");
    assert!(out.starts_with("<span"));
    assert!(!out.contains("[HL]"));
}

#[test]
fn mid_text_mode_selector_open_is_not_dropped() {
    // Openers are leading-only; a mid-text [HL] is ordinary bracket text
    let out = highlights("text [HL] more");
    assert_eq!(out, "text [HL] more");
}

#[test]
fn orphan_markers_never_reach_output() {
    let out = highlights("[Y]good[/Y] [B]bad [O]worse");
    assert!(!out.contains("[B]"));
    assert!(!out.contains("[O]"));
    assert!(out.contains(">good</span>"));
}

#[test]
fn lone_closers_vanish() {
    assert_eq!(highlights("a[/Y]b[/GR]c"), "abc");
}

#[test]
fn promoted_example_becomes_fenced_code() {
    let text = "Algorithm: [P]for node in graph:\n  visit(node)[/P] done";
    let out = highlights(text);
    assert_eq!(out, "Algorithm: ```\nfor node in graph:\n  visit(node)\n``` done");
}

#[test]
fn promoted_example_shields_inner_markers() {
    // Marker-like text inside the promoted block must not be styled
    let text = "[P]if ready:\n  emit [Y]token[/Y][/P]";
    let out = highlights(text);
    assert!(out.contains("[Y]token[/Y]"));
    assert!(!out.contains("<span"));
}

#[test]
fn inline_example_still_resolves_as_annotation() {
    let out = highlights("[P]ad hoc[/P]");
    assert_eq!(
        out,
        "<span style=\"background-color:#FEECFF;padding:1px 3px 0 3px;border-radius:3px;display:inline\">ad hoc</span>"
    );
}

#[test]
fn sanitizer_components_compose() {
    let sanitizer = ResponseSanitizer::new();
    let mut shield = CodeBlockShield::new();
    let raw = "intro \u{00e2}\u{20ac}\u{201d} [thinking]hidden[/thinking] [P]while x:\n  step()[/P] [Y]tail";
    let text = sanitizer.fix_encoding(raw);
    let text = shield.extract_fences(&text);
    let text = sanitizer.promote_code_examples(&text, &mut shield);
    let text = sanitizer.cleanse(&text);
    assert_eq!(text, "intro ,  hidden __CODEBLOCK_0__ tail");
    assert_eq!(
        shield.restore(&text),
        "intro ,  hidden ```\nwhile x:\n  step()\n``` tail"
    );
}

#[test]
fn nested_same_code_keeps_inner_pair_only() {
    // Accepted limitation: simple pair matching treats the outer same-code
    // pair as orphaned
    let out = highlights("[Y]outer [Y]inner[/Y] tail[/Y]");
    assert_eq!(
        out,
        "outer <span style=\"background-color:#FFF4C3;padding:1px 3px 0 3px;border-radius:3px;display:inline\">inner</span> tail"
    );
}
