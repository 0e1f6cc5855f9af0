use rml::formatting::{render, Render};
use rml::language::{LoadError, UnitError};

/// Generate problem and detail messages for errors encountered while loading
/// a section.
pub fn generate_error_message(error: &LoadError, renderer: &dyn Render) -> (String, String) {
    match error {
        LoadError::FileUnreadable { details, .. } => (
            format!("Unable to read file: {}", details),
            "Check that the path is correct and that the file is readable.".to_string(),
        ),
        LoadError::UndefinedVariable { name } => (
            format!("Undefined variable ${{{}}}", name),
            format!(
                r#"
The variable {} is used in the file but is neither set in the environment
nor declared in the <environment> block. Declare it like this:

{}
                "#,
                name,
                example(
                    renderer,
                    &format!(
                        r#"<environment>
    <variable name="{}" value="..." overwrite="false" />
</environment>"#,
                        name
                    )
                )
            )
            .trim_ascii()
            .to_string(),
        ),
        LoadError::SectionNotFound { key, name } => match name {
            Some(name) => (
                format!("No <{}> section named \"{}\"", key, name),
                format!(
                    r#"
None of the <{}> sections in this file has name="{}", and none of the
unnamed ones refers to a section of that name in another file.
                    "#,
                    key, name
                )
                .trim_ascii()
                .to_string(),
            ),
            None => (
                format!("No <{}> section", key),
                format!(
                    "The file does not contain a <{}> section, either in full or as <section {}>.",
                    key, key
                ),
            ),
        },
        LoadError::ReferencedFileUnreadable { path, nameref } => (
            format!("Unable to read {}", path.display()),
            format!(
                "The section named \"{}\" was to be loaded from this file, but it could not be read.",
                nameref
            ),
        ),
        LoadError::DelegationTooDeep { nameref } => (
            format!("Section \"{}\" delegates too many times", nameref),
            r#"
Following nameref and file attributes from section to section went on too
long. Check whether the sections refer to one another in a circle.
            "#
            .trim_ascii()
            .to_string(),
        ),
        LoadError::UnterminatedTag { name, .. } => (
            format!("Missing </{}>", name),
            format!(
                r#"
Every <{}> that is not written as a leaf tag must have a corresponding
closing tag:

{}
                "#,
                name,
                example(renderer, &format!("<{} ...>\n    ...\n</{}>", name, name))
            )
            .trim_ascii()
            .to_string(),
        ),
        LoadError::InvalidLoop { variable, problem } => (
            format!("Invalid loop over \"{}\"", variable),
            format!(
                r#"
The loop cannot be expanded: {}. A loop is written as:

{}
                "#,
                problem,
                example(
                    renderer,
                    r#"<for variable="i" from="1" to="10" step="1">
    <parameter name="p[i]" value="[i]" />
</for>"#
                )
            )
            .trim_ascii()
            .to_string(),
        ),
        LoadError::IncludeCycle { path } => (
            format!("{} includes itself", path.display()),
            "Files included by <include file=\"...\"/> must not include one another in a circle."
                .to_string(),
        ),
        LoadError::IncludeTooDeep { path } => (
            format!("Includes nested too deeply at {}", path.display()),
            "Included files may only include further files to a limited depth.".to_string(),
        ),
    }
}

/// Generate a one-line explanation of a problem reading a parameter.
pub fn generate_unit_message(error: &UnitError) -> String {
    match error {
        UnitError::ParameterNotFound { name } => format!("No parameter named \"{}\"", name),
        UnitError::MissingUnits { name } => format!(
            "Parameter \"{}\" needs units, as in units=\"mm\", to be converted",
            name
        ),
        UnitError::UnknownUnit { name, unit } => {
            format!("Parameter \"{}\" has units \"{}\" which are not recognized", name, unit)
        }
        UnitError::InvalidNumber { name, value } => {
            format!("Parameter \"{}\" has value \"{}\" which is not a number", name, value)
        }
    }
}

fn example(renderer: &dyn Render, text: &str) -> String {
    render(renderer, text)
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rml::formatting::Identity;

    #[test]
    fn undefined_variable_message() {
        let error = LoadError::UndefinedVariable {
            name: "FOO".to_string(),
        };
        let (problem, details) = generate_error_message(&error, &Identity);

        assert_eq!(problem, "Undefined variable ${FOO}");
        assert!(details.contains(r#"<variable name="FOO" value="..." overwrite="false" />"#));
    }

    #[test]
    fn section_not_found_message() {
        let error = LoadError::SectionNotFound {
            key: "TRestRun".to_string(),
            name: None,
        };
        let (problem, _) = generate_error_message(&error, &Identity);
        assert_eq!(problem, "No <TRestRun> section");
    }
}
