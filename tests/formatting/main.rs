use std::path::Path;

use rml::formatting::{render, Identity, Render, Syntax, Terminal};
use rml::templating::{fill, Summary};
use rml::{Loader, Scope};

fn resolved(name: &str) -> rml::Section {
    let path = Path::new("tests/samples/").join(name);
    Loader::with_scope(Scope::new())
        .load_section("config", &path, None)
        .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", path, e))
}

/// Marks each fragment with the category it was given, so tests can see how
/// text was classified.
struct Marker;

impl Render for Marker {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Tag => format!("[{}]", content),
            Syntax::Numeric => format!("#{}", content),
            _ => content.to_string(),
        }
    }
}

#[test]
fn identity_preserves_resolved_text() {
    for name in ["loops.rml", "expressions.rml", "includes.rml", "aliases.rml"] {
        let section = resolved(name);
        let buffer = section.buffer();

        let mut expected = buffer.to_string();
        if !expected.is_empty() && !expected.ends_with('\n') {
            expected.push('\n');
        }

        assert_eq!(render(&Identity, buffer), expected, "rendering {}", name);
    }
}

#[test]
fn fragments_are_classified() {
    let section = resolved("expressions.rml");
    let output = render(&Marker, section.buffer());

    assert!(output.contains("<[parameter] name=\"height\" value=#\"30\""));
    assert!(output.contains("value=\"TPC\""));
    assert!(output.contains("</[config]>"));
}

#[test]
fn terminal_output_keeps_the_text() {
    let section = resolved("aliases.rml");
    let output = render(&Terminal, section.buffer());

    assert!(output.contains("\x1b["));
    assert!(output.contains("addPixel"));
}

#[test]
fn summary_of_a_sample() {
    let section = resolved("expressions.rml");
    let text = fill(&Summary, &section).unwrap();

    assert!(text.starts_with("<config> \"geometry\"\n"));
    assert!(text.contains("    height = 30 [cm]\n"));
    assert!(text.contains("    origin = (0,0,-50) [mm]\n"));
    assert!(text.contains("    label = TPC\n"));
    assert!(!text.contains("warning:"));
}
