use std::path::PathBuf;

use thiserror::Error;

/// Conditions that stop a section from being loaded at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("unable to read {}: {details}", .path.display())]
    FileUnreadable { path: PathBuf, details: String },

    #[error("variable ${{{name}}} is not defined")]
    UndefinedVariable { name: String },

    #[error("section <{key}>{} not found", named(.name))]
    SectionNotFound { key: String, name: Option<String> },

    #[error("unable to read {} referenced by nameref \"{nameref}\"", .path.display())]
    ReferencedFileUnreadable { path: PathBuf, nameref: String },

    #[error("sections delegated by nameref \"{nameref}\" nest too deeply")]
    DelegationTooDeep { nameref: String },

    #[error("<{name}> at offset {offset} has no closing </{name}>")]
    UnterminatedTag { name: String, offset: usize },

    #[error("invalid for loop over \"{variable}\": {problem}")]
    InvalidLoop { variable: String, problem: String },

    #[error("{} includes itself", .path.display())]
    IncludeCycle { path: PathBuf },

    #[error("includes nest too deeply at {}", .path.display())]
    IncludeTooDeep { path: PathBuf },
}

fn named(name: &Option<String>) -> String {
    match name {
        Some(name) => format!(" named \"{}\"", name),
        None => String::new(),
    }
}

/// Problems reading a value that carries physical units.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("parameter \"{name}\" not found")]
    ParameterNotFound { name: String },

    #[error("parameter \"{name}\" has no units")]
    MissingUnits { name: String },

    #[error("parameter \"{name}\" has unrecognized units \"{unit}\"")]
    UnknownUnit { name: String, unit: String },

    #[error("parameter \"{name}\" has value \"{value}\" which is not a number")]
    InvalidNumber { name: String, value: String },
}

impl UnitError {
    /// The same problem, reported against a different name.
    pub(crate) fn renamed(self, name: &str) -> UnitError {
        let name = name.to_string();
        match self {
            UnitError::ParameterNotFound { .. } => UnitError::ParameterNotFound { name },
            UnitError::MissingUnits { .. } => UnitError::MissingUnits { name },
            UnitError::UnknownUnit { unit, .. } => UnitError::UnknownUnit { name, unit },
            UnitError::InvalidNumber { value, .. } => UnitError::InvalidNumber { name, value },
        }
    }
}

/// Something odd noticed while resolving a section that did not prevent it
/// from loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("included file {} not found", .path.display())]
    IncludeUnreadable { path: PathBuf },

    #[error("{{{name}}} is not substituted; write ${{{name}}} if it is meant to be a variable")]
    LegacyVariable { name: String },

    #[error("for loop over \"{variable}\" produced no iterations")]
    EmptyLoop { variable: String },

    #[error("expression \"{expression}\" could not be evaluated")]
    ExpressionNotEvaluated { expression: String },
}
