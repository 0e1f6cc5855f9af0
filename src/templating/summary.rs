//! Summary template - a readable overview of a resolved section

use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::language::Section;

use super::Template;

static TEMPLATE: &str = r#"<{key}>{{ if name }} "{name}"{{ endif }}{{ if title }} - {title}{{ endif }}
{{ if file }}file: {file}
{{ endif }}verbosity: {verbosity}
{{ for parameter in parameters }}    {parameter.name} = {parameter.value}{{ if parameter.units }} [{parameter.units}]{{ endif }}
{{ endfor }}{{ for observable in observables }}    observable {observable}
{{ endfor }}{{ for diagnostic in diagnostics }}    warning: {diagnostic}
{{ endfor }}"#;

#[derive(Serialize)]
struct Parameter {
    name: String,
    value: String,
    units: Option<String>,
}

#[derive(Serialize)]
struct Context {
    key: String,
    name: Option<String>,
    title: Option<String>,
    file: Option<String>,
    verbosity: String,
    parameters: Vec<Parameter>,
    observables: Vec<String>,
    diagnostics: Vec<String>,
}

impl Context {
    fn from_section(section: &Section) -> Context {
        let parameters = section
            .key_definitions("parameter")
            .iter()
            .filter_map(|span| {
                let name = span.attribute("name")?;
                let (value, units) = span.attribute_with_units("value")?;
                Some(Parameter {
                    name: name.to_string(),
                    value: value.to_string(),
                    units: units.map(str::to_string),
                })
            })
            .collect();

        Context {
            key: section
                .key()
                .to_string(),
            name: section
                .name()
                .map(str::to_string),
            title: section
                .title()
                .map(str::to_string),
            file: section
                .file()
                .map(|path| {
                    path.display()
                        .to_string()
                }),
            verbosity: section
                .verbosity()
                .as_str()
                .to_string(),
            parameters,
            observables: section.observables(),
            diagnostics: section
                .diagnostics()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Template listing a section's parameters, observables, and any problems
/// noticed while resolving it
pub struct Summary;

impl Template for Summary {
    fn render(&self, section: &Section) -> Result<String, tinytemplate::error::Error> {
        let mut tt = TinyTemplate::new();
        tt.set_default_formatter(&tinytemplate::format_unescaped);
        tt.add_template("summary", TEMPLATE)?;

        let context = Context::from_section(section);
        tt.render("summary", &context)
    }
}
