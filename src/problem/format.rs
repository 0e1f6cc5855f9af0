use super::messages::{generate_error_message, generate_unit_message};
use owo_colors::OwoColorize;
use rml::{
    formatting::Render,
    language::{Diagnostic, LoadError, UnitError},
};
use std::path::Path;

/// Format a load error with full details of the problem and how to fix it
pub fn full_load_error(error: &LoadError, filename: &Path, renderer: &dyn Render) -> String {
    let (problem, details) = generate_error_message(error, renderer);

    format!(
        r#"
{}: {}: {}

{}
        "#,
        "error".bright_red(),
        filename.to_string_lossy(),
        problem.bold(),
        details
    )
    .trim_ascii()
    .to_string()
}

/// Format a load error with concise single-line output
pub fn concise_load_error(error: &LoadError, filename: &Path) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        error
            .to_string()
            .bold()
    )
}

/// Format a problem reading a parameter from a resolved section
pub fn unit_error(error: &UnitError, filename: &Path) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        generate_unit_message(error).bold()
    )
}

/// Format something noticed while loading that did not stop the load
pub fn diagnostic_warning(diagnostic: &Diagnostic, filename: &Path) -> String {
    format!(
        "{}: {}: {}",
        "warning".bright_yellow(),
        filename.to_string_lossy(),
        diagnostic
    )
}
