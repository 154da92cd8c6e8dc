//! Integration tests for the tokenizer: marker kinds, synthesized triples,
//! fragment coverage, and permissive degradation.

use alder_markup::{Marker, MarkerKind, Tokenizer};

/// Collect (kind, covered text) pairs for an input.
fn kinds(input: &str) -> Vec<(MarkerKind, String)> {
    Tokenizer::new(input)
        .map(|marker| (marker.kind(), marker.fragment().text().to_string()))
        .collect()
}

// ========== generic tags ==========

#[test]
fn test_content_and_tags() {
    assert_eq!(
        kinds("a<b>c</b>d"),
        vec![
            (MarkerKind::Content, "a".to_string()),
            (MarkerKind::Start, "<b>".to_string()),
            (MarkerKind::Content, "c".to_string()),
            (MarkerKind::End, "</b>".to_string()),
            (MarkerKind::Content, "d".to_string()),
        ]
    );
}

#[test]
fn test_inline_tag() {
    assert_eq!(
        kinds("<img src='x'/>"),
        vec![(MarkerKind::Inline, "<img src='x'/>".to_string())]
    );
}

#[test]
fn test_start_marker_carries_parsed_attributes() {
    let markers: Vec<Marker<'_>> = Tokenizer::new("<a href=\"y\" disabled>").collect();
    let Marker::Start { name, attributes, .. } = &markers[0] else {
        panic!("expected a start marker");
    };
    assert_eq!(name.local, "a");
    assert_eq!(name.prefix, None);
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes[0].name, "href");
    assert_eq!(attributes[0].value, Some("y"));
    assert_eq!(attributes[1].name, "disabled");
    assert_eq!(attributes[1].value, None);
}

#[test]
fn test_namespace_prefix_is_split() {
    let markers: Vec<Marker<'_>> = Tokenizer::new("<svg:rect width='1'/>").collect();
    let Marker::Inline { name, .. } = &markers[0] else {
        panic!("expected an inline marker");
    };
    assert_eq!(name.prefix, Some("svg"));
    assert_eq!(name.local, "rect");
    assert_eq!(name.qualified(), "svg:rect");
}

// ========== synthesized triples ==========

#[test]
fn test_comment_synthesizes_exact_triple() {
    assert_eq!(
        kinds("<!-- hi -->"),
        vec![
            (MarkerKind::Start, "<!--".to_string()),
            (MarkerKind::Content, " hi ".to_string()),
            (MarkerKind::End, "-->".to_string()),
        ]
    );
}

#[test]
fn test_doctype_synthesizes_exact_triple() {
    assert_eq!(
        kinds("<!DOCTYPE html>"),
        vec![
            (MarkerKind::Start, "<!DOCTYPE".to_string()),
            (MarkerKind::Content, " html".to_string()),
            (MarkerKind::End, ">".to_string()),
        ]
    );
}

#[test]
fn test_cdata_synthesizes_exact_triple() {
    assert_eq!(
        kinds("<![CDATA[1 < 2]]>"),
        vec![
            (MarkerKind::Start, "<![CDATA[".to_string()),
            (MarkerKind::Content, "1 < 2".to_string()),
            (MarkerKind::End, "]]>".to_string()),
        ]
    );
}

#[test]
fn test_special_construct_names_start_with_bang() {
    let markers: Vec<Marker<'_>> = Tokenizer::new("<!--x--><!DOCTYPE y>").collect();
    let Marker::Start { name, .. } = &markers[0] else {
        panic!("expected a start marker");
    };
    assert_eq!(name.local, "!--");
    let Marker::Start { name, .. } = &markers[3] else {
        panic!("expected a start marker");
    };
    assert_eq!(name.local, "!DOCTYPE");
}

#[test]
fn test_processing_instruction_triple() {
    let markers: Vec<Marker<'_>> = Tokenizer::new("<?xml version=\"1.0\"?>").collect();
    assert_eq!(markers.len(), 3);
    let Marker::Start { name, .. } = &markers[0] else {
        panic!("expected a start marker");
    };
    assert_eq!(name.local, "?xml");
}

// ========== permissive degradation ==========

#[test]
fn test_unterminated_comment_runs_to_end() {
    assert_eq!(
        kinds("<!-- never closed"),
        vec![
            (MarkerKind::Start, "<!--".to_string()),
            (MarkerKind::Content, " never closed".to_string()),
            (MarkerKind::End, String::new()),
        ]
    );
}

#[test]
fn test_stray_angle_bracket_is_content() {
    assert_eq!(
        kinds("a < b > c"),
        vec![(MarkerKind::Content, "a < b > c".to_string())]
    );
}

#[test]
fn test_tag_without_closing_bracket_is_content() {
    assert_eq!(
        kinds("<div attr"),
        vec![(MarkerKind::Content, "<div attr".to_string())]
    );
}

#[test]
fn test_lowercase_doctype_is_recognized() {
    let markers: Vec<Marker<'_>> = Tokenizer::new("<!doctype html>").collect();
    assert_eq!(markers.len(), 3);
    let Marker::Start { name, .. } = &markers[0] else {
        panic!("expected a start marker");
    };
    assert_eq!(name.local, "!doctype");
}

// ========== coverage ==========

#[test]
fn test_markers_cover_the_input_contiguously() {
    let input = "x<a id='1'>y<!-- c --><br/>z</a><![CDATA[q]]> tail";
    let rebuilt: String = Tokenizer::new(input)
        .map(|marker| marker.fragment().text().to_string())
        .collect();
    assert_eq!(rebuilt, input);
}

#[test]
fn test_independent_tokenizers_do_not_interfere() {
    // Two interleaved tokenizers over different inputs each keep their own
    // cursor.
    let mut first = Tokenizer::new("<a>1</a>");
    let mut second = Tokenizer::new("<b>2</b>");
    let a0 = first.next().unwrap();
    let b0 = second.next().unwrap();
    let a1 = first.next().unwrap();
    let b1 = second.next().unwrap();
    assert_eq!(a0.fragment().text(), "<a>");
    assert_eq!(b0.fragment().text(), "<b>");
    assert_eq!(a1.fragment().text(), "1");
    assert_eq!(b1.fragment().text(), "2");
}
