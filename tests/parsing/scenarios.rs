use std::fs;
use std::path::Path;

use rml::language::{units, Vector3};
use rml::parsing::expression::{evaluate, format_number};
use rml::parsing::loops::Loop;
use rml::parsing::scanner::{attribute, build_tag};
use rml::{LoadError, Loader, Scope, UnitError};

fn resolve(content: &str) -> Result<rml::Section, LoadError> {
    Loader::with_scope(Scope::new()).load_str("config", content, Path::new("."), None)
}

#[test]
fn loop_generates_parameters() {
    let section = resolve(
        r#"<config><for variable="i" from="1" to="3"><parameter name="p[i]" value="[i]"/></for></config>"#,
    )
    .unwrap();

    let parameters = section.key_definitions("parameter");
    assert_eq!(parameters.len(), 3);

    for (i, span) in parameters
        .iter()
        .enumerate()
    {
        let expected = (i + 1).to_string();
        assert_eq!(span.attribute("name"), Some(format!("p{}", expected).as_str()));
        assert_eq!(span.attribute("value"), Some(expected.as_str()));
    }
}

#[test]
fn arithmetic_is_evaluated() {
    let section = resolve(r#"<config><parameter name="x" value="2+3*4"/></config>"#).unwrap();
    assert_eq!(section.parameter("x"), Some("14".to_string()));
}

#[test]
fn vector_is_converted_to_millimetres() {
    let section =
        resolve(r#"<config><parameter name="v" value="(1,2,3)" units="cm"/></config>"#).unwrap();
    assert_eq!(
        section.vector3_with_units("v"),
        Ok(Vector3::new(10.0, 20.0, 30.0))
    );
}

#[test]
fn undefined_variable_is_fatal() {
    let result = resolve(r#"<config><parameter name="p" value="${FOO}"/></config>"#);
    assert_eq!(
        result,
        Err(LoadError::UndefinedVariable {
            name: "FOO".to_string()
        })
    );
}

#[test]
fn include_cycle_terminates() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir
        .path()
        .join("a.rml");
    let b = dir
        .path()
        .join("b.rml");
    fs::write(&a, r#"<config><include file="b.rml"/></config>"#).unwrap();
    fs::write(&b, r#"<parameter name="x" value="1"/><include file="a.rml"/>"#).unwrap();

    let result = Loader::with_scope(Scope::new()).load_section("config", &a, None);
    assert!(matches!(result, Err(LoadError::IncludeCycle { .. })));
}

#[test]
fn self_include_terminates() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir
        .path()
        .join("self.rml");
    fs::write(&a, r#"<config><include file="self.rml"/></config>"#).unwrap();

    let result = Loader::with_scope(Scope::new()).load_section("config", &a, None);
    assert!(matches!(result, Err(LoadError::IncludeCycle { .. })));
}

#[test]
fn evaluation_is_idempotent() {
    let mut diagnostics = Vec::new();
    for value in [
        "1+1",
        "(1,2,3)",
        "(2*5, 1/4)",
        "2/3",
        "1e-9*3",
        "4e16",
        "sqrt(3)*log(10)",
        "plain text",
        "mm",
    ] {
        let once = evaluate(value, &mut diagnostics);
        let twice = evaluate(&once, &mut diagnostics);
        assert_eq!(twice, once, "evaluating {:?}", value);
    }
    assert!(diagnostics.is_empty());
}

#[test]
fn loop_cardinality() {
    for (from, to, step) in [
        (0.0, 10.0, 1.0),
        (1.0, 2.0, 0.25),
        (-5.0, 5.0, 3.0),
        (0.0, 0.0, 1.0),
        (10.0, 100.0, 9.0),
    ] {
        let descriptor = Loop {
            variable: "i".to_string(),
            from,
            to,
            step,
        };
        let expected = ((to - from) / step).floor() as usize + 1;
        assert_eq!(descriptor.count(), Ok(expected));

        let values = descriptor
            .values()
            .unwrap();
        assert_eq!(values.len(), expected);
        assert_eq!(values[0], from);
    }
}

#[test]
fn attribute_round_trip() {
    for value in ["X", "", "0.5", "(1,2,3)", "a b c", "${HOME}", "<x>"] {
        let tag = build_tag("p", &[("name", value)]);
        assert_eq!(attribute(&tag, "name"), Some(value));
    }
}

#[test]
fn unknown_units_are_reported() {
    assert!(units::to_canonical(1.0, "furlong").is_nan());

    let section =
        resolve(r#"<config><parameter name="d" value="3" units="furlong"/></config>"#).unwrap();
    assert_eq!(
        section.parameter_with_units("d"),
        Err(UnitError::UnknownUnit {
            name: "d".to_string(),
            unit: "furlong".to_string()
        })
    );
}

#[test]
fn malformed_vectors_give_sentinel() {
    let section =
        resolve(r#"<config><parameter name="v" value="(1,2)" units="cm"/></config>"#).unwrap();
    assert_eq!(section.vector3_with_units("v"), Ok(Vector3::SENTINEL));
}

#[test]
fn loaders_do_not_share_declarations() {
    let content = r#"<environment><variable name="RML_SCENARIO_GAS" value="argon"/></environment>
<config><parameter name="gas" value="${RML_SCENARIO_GAS}"/></config>"#;

    let loader = Loader::with_scope(Scope::new());
    let section = loader
        .load_str("config", content, Path::new("."), None)
        .unwrap();
    assert_eq!(section.parameter("gas"), Some("argon".to_string()));

    assert_eq!(
        loader
            .scope()
            .get("RML_SCENARIO_GAS"),
        None
    );
    assert!(std::env::var("RML_SCENARIO_GAS").is_err());

    let result = loader.load_str(
        "config",
        r#"<config><parameter name="gas" value="${RML_SCENARIO_GAS}"/></config>"#,
        Path::new("."),
        None,
    );
    assert!(result.is_err());
}

#[test]
fn formatting_matches_evaluation() {
    assert_eq!(format_number(14.0), "14");
    assert_eq!(format_number(-0.25), "-0.25");
}

#[test]
fn deeply_nested_values_are_left_alone() {
    let value = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
    let content = format!(r#"<config><parameter name="deep" value="{}"/></config>"#, value);

    let section = resolve(&content).unwrap();
    assert_eq!(section.parameter("deep"), Some(value.clone()));
    assert_eq!(
        section.diagnostics(),
        &[rml::Diagnostic::ExpressionNotEvaluated { expression: value }]
    );
}
