//! A resolved section, and the lookups a consumer makes against it.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::language::{Block, Diagnostic, Globals, Span, UnitError, Vector2, Vector3, Verbosity};
use crate::parsing::scanner;

/// The fully resolved text of one section (variables substituted, includes
/// spliced, loops unrolled, expressions evaluated) and everything needed to
/// answer questions about it.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    key: String,
    name: Option<String>,
    title: Option<String>,
    buffer: String,
    globals: Globals,
    verbosity: Verbosity,
    diagnostics: Vec<Diagnostic>,
    file: Option<PathBuf>,
}

impl Section {
    /// Assemble a section from its resolved text. The name and title are
    /// read from the opening tag, as is a `verboseLevel` overriding the one
    /// in the globals. Repeated diagnostics are only kept once.
    pub fn new(
        key: &str,
        buffer: String,
        globals: Globals,
        diagnostics: Vec<Diagnostic>,
        file: Option<PathBuf>,
    ) -> Section {
        let definition = scanner::find_tag(&buffer, key, 0);
        let field = |name: &str| {
            definition
                .as_ref()
                .and_then(|span| span.attribute(name))
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let name = field("name");
        let title = field("title");
        let verbosity = field("verboseLevel")
            .and_then(|level| Verbosity::parse(&level))
            .or(globals.verbosity)
            .unwrap_or_default();

        let mut unique: Vec<Diagnostic> = Vec::new();
        for diagnostic in diagnostics {
            if !unique.contains(&diagnostic) {
                unique.push(diagnostic);
            }
        }

        Section {
            key: key.to_string(),
            name,
            title,
            buffer,
            globals,
            verbosity,
            diagnostics: unique,
            file,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> Option<&str> {
        self.name
            .as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title
            .as_deref()
    }

    /// The resolved text, from the opening tag to the closing tag.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The file the section text came from, when it was loaded from one.
    pub fn file(&self) -> Option<&Path> {
        self.file
            .as_deref()
    }

    /// The next `<name ...>` tag at or after `cursor`, which is moved to the
    /// end of that tag so that repeated calls walk through siblings.
    pub fn key_definition(&self, name: &str, cursor: &mut usize) -> Option<Span> {
        let span = scanner::find_tag(&self.buffer, name, *cursor)?;
        *cursor = span.end;
        Some(span)
    }

    /// The next `<name ...> ... </name>` block at or after `cursor`, which
    /// is moved past the end of that block.
    pub fn key_structure(&self, name: &str, cursor: &mut usize) -> Option<Block> {
        match scanner::find_block(&self.buffer, name, *cursor) {
            Ok(Some(block)) => {
                *cursor = block.end;
                Some(block)
            }
            Ok(None) => None,
            Err(error) => {
                warn!("{}", error);
                None
            }
        }
    }

    /// Every `<name ...>` tag in the section, in order.
    pub fn key_definitions(&self, name: &str) -> Vec<Span> {
        let mut cursor = 0;
        let mut result = Vec::new();

        while let Some(span) = self.key_definition(name, &mut cursor) {
            result.push(span);
        }
        result
    }

    fn parameter_definition(&self, name: &str) -> Option<Span> {
        let mut cursor = 0;

        while let Some(span) = self.key_definition("parameter", &mut cursor) {
            if span.attribute("name") == Some(name) {
                return Some(span);
            }
        }
        None
    }

    /// The value of `<parameter name="..." value="..."/>`, looking in the
    /// section first and then in the globals of the file it came from.
    pub fn parameter(&self, name: &str) -> Option<String> {
        let found = match self.parameter_definition(name) {
            Some(span) => span
                .attribute("value")
                .map(str::to_string),
            None => self
                .globals
                .get(name)
                .map(str::to_string),
        };

        if found.is_none() {
            self.not_found(name);
        }
        found
    }

    /// As [`Section::parameter`], but an absent or empty value gives the
    /// default.
    pub fn parameter_or(&self, name: &str, default: &str) -> String {
        match self.parameter(name) {
            Some(value) if !value.is_empty() => value,
            _ => default.to_string(),
        }
    }

    /// A parameter's numeric value, converted into the canonical unit for
    /// its quantity.
    pub fn parameter_with_units(&self, name: &str) -> Result<f64, UnitError> {
        self.measured(name)?
            .value_with_units("value")
            .map_err(|error| error.renamed(name))
    }

    pub fn vector2_with_units(&self, name: &str) -> Result<Vector2, UnitError> {
        self.measured(name)?
            .vector2_with_units("value")
            .map_err(|error| error.renamed(name))
    }

    pub fn vector3_with_units(&self, name: &str) -> Result<Vector3, UnitError> {
        self.measured(name)?
            .vector3_with_units("value")
            .map_err(|error| error.renamed(name))
    }

    /// As [`Section::parameter_with_units`], but a parameter that is not
    /// there gives `default`, taken to be in canonical units already. Any
    /// other problem with the value is still an error.
    pub fn parameter_with_units_or(&self, name: &str, default: f64) -> Result<f64, UnitError> {
        match self.parameter_with_units(name) {
            Err(UnitError::ParameterNotFound { .. }) => Ok(default),
            result => result,
        }
    }

    pub fn vector2_with_units_or(&self, name: &str, default: Vector2) -> Result<Vector2, UnitError> {
        match self.vector2_with_units(name) {
            Err(UnitError::ParameterNotFound { .. }) => Ok(default),
            result => result,
        }
    }

    pub fn vector3_with_units_or(&self, name: &str, default: Vector3) -> Result<Vector3, UnitError> {
        match self.vector3_with_units(name) {
            Err(UnitError::ParameterNotFound { .. }) => Ok(default),
            result => result,
        }
    }

    fn measured(&self, name: &str) -> Result<Span, UnitError> {
        self.parameter_definition(name)
            .ok_or_else(|| {
                self.not_found(name);
                UnitError::ParameterNotFound {
                    name: name.to_string(),
                }
            })
    }

    /// The value of a `<myParameter>` alias defined in the section.
    pub fn my_parameter(&self, name: &str) -> Option<String> {
        self.key_definitions("myParameter")
            .into_iter()
            .find(|span| span.attribute("name") == Some(name))
            .and_then(|span| {
                span.attribute("value")
                    .map(str::to_string)
            })
    }

    /// The value of attribute `field` on the first `<key>` tag that has one.
    pub fn field_from_key(&self, field: &str, key: &str) -> Option<String> {
        let found = self
            .key_definitions(key)
            .into_iter()
            .find_map(|span| {
                span.attribute(field)
                    .map(str::to_string)
            });

        if found.is_none() {
            self.not_found(field);
        }
        found
    }

    fn enabled_observables(&self) -> Vec<Span> {
        self.key_definitions("observable")
            .into_iter()
            .filter(|span| matches!(span.attribute("value"), Some("ON") | Some("on")))
            .collect()
    }

    /// Names of the `<observable>` entries switched on.
    pub fn observables(&self) -> Vec<String> {
        self.enabled_observables()
            .iter()
            .map(|span| {
                span.attribute("name")
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    /// Descriptions of the observables switched on, in the same order as
    /// [`Section::observables`]; an observable without one gives "".
    pub fn observable_descriptions(&self) -> Vec<String> {
        self.enabled_observables()
            .iter()
            .map(|span| {
                span.attribute("description")
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    fn not_found(&self, name: &str) {
        if self.verbosity >= Verbosity::Warning {
            warn!(
                "Section <{}>{}: parameter \"{}\" not found",
                self.key,
                self.name
                    .as_ref()
                    .map(|name| format!(" \"{}\"", name))
                    .unwrap_or_default(),
                name
            );
        }
    }
}
