use std::path::Path;

use rml::language::{Vector2, Vector3, Verbosity};
use rml::{Loader, Scope};

use crate::samples::sample;

#[test]
fn nested_loops_in_sample() {
    let section = sample("loops.rml");

    assert_eq!(section.name(), Some("readout"));
    assert_eq!(section.title(), Some("Generated readout"));
    assert_eq!(section.verbosity(), Verbosity::Info);
    assert_eq!(section.parameter("modules"), Some("2".to_string()));

    let mut cursor = 0;
    let mut modules = Vec::new();
    while let Some(block) = section.key_structure("module", &mut cursor) {
        modules.push(block);
    }
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[1].attribute("firstChannel"), Some("4".to_string()));

    let channels = section.key_definitions("channel");
    assert_eq!(channels.len(), 8);
    assert_eq!(channels[5].attribute("id"), Some("5"));
    assert_eq!(
        channels[5].vector2_with_units("position"),
        Ok(Vector2::new(3.0, 10.0))
    );
}

#[test]
fn expressions_in_sample() {
    let section = sample("expressions.rml");

    assert_eq!(section.parameter_with_units("height"), Ok(300.0));
    assert_eq!(section.parameter_with_units("radius"), Ok(10.0));
    assert_eq!(section.parameter_with_units("drift"), Ok(500.0));
    assert_eq!(
        section.vector3_with_units("origin"),
        Ok(Vector3::new(0.0, 0.0, -50.0))
    );
    assert_eq!(
        section.vector2_with_units("size"),
        Ok(Vector2::new(100.0, 200.0))
    );
    assert_eq!(section.parameter("label"), Some("TPC".to_string()));
    assert_eq!(
        section.field_from_key("condition", "cut"),
        Some(">100".to_string())
    );
}

#[test]
fn named_sections_in_sample() {
    let section = sample("sections.rml");
    assert_eq!(section.name(), Some("first"));
    assert_eq!(section.parameter("runNumber"), Some("1".to_string()));
    assert_eq!(section.parameter("mainDataPath"), Some("/tmp/data".to_string()));

    let section = Loader::with_scope(Scope::new())
        .load_section("config", Path::new("tests/samples/sections.rml"), Some("second"))
        .unwrap();
    assert_eq!(section.title(), Some("Second run"));
    assert_eq!(section.parameter("runNumber"), Some("2".to_string()));
    assert_eq!(section.observables(), vec!["energy"]);
    assert_eq!(section.observable_descriptions(), vec!["Deposited energy"]);
}

#[test]
fn includes_in_sample() {
    let section = sample("includes.rml");

    assert_eq!(section.parameter("name"), Some("prototype".to_string()));
    assert_eq!(section.parameter_with_units("length"), Ok(300.0));
    assert_eq!(section.parameter_with_units("wall"), Ok(4.0));
    assert!(!section
        .buffer()
        .contains("shared geometry"));
}

#[test]
fn delegation_in_sample() {
    let section = sample("delegation.rml");

    assert_eq!(section.name(), Some("argon"));
    assert_eq!(section.title(), Some("Argon mixture"));
    assert_eq!(section.parameter_with_units("pressure"), Ok(10.0));
    assert_eq!(section.parameter("quencher"), Some("isobutane".to_string()));
    assert!(section
        .file()
        .unwrap()
        .ends_with("gases.rml"));
}

#[test]
fn aliases_in_sample() {
    let section = sample("aliases.rml");

    assert_eq!(section.my_parameter("PITCH"), Some("0.5".to_string()));
    assert_eq!(section.parameter_with_units("pitch"), Ok(0.5));

    let pixels = section.key_definitions("addPixel");
    assert_eq!(pixels.len(), 3);
    assert_eq!(pixels[2].attribute("origin"), Some("(1,0)"));
    assert_eq!(pixels[2].attribute("size"), Some("(0.5,0.5)"));
}

#[test]
fn missing_includes_are_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let section = Loader::with_scope(Scope::new())
        .load_str(
            "config",
            r#"<config><include file="absent.rml"/><parameter name="x" value="1"/></config>"#,
            dir.path(),
            None,
        )
        .unwrap();

    assert_eq!(section.parameter("x"), Some("1".to_string()));
    assert_eq!(
        section
            .diagnostics()
            .len(),
        1
    );
}
