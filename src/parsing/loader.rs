//! Sequencing the resolution passes that turn a configuration file into a
//! resolved [`Section`].

use std::path::Path;

use tracing::{debug, info};

use crate::language::{Globals, LoadError, Section};
use crate::parsing::expression::replace_expressions;
use crate::parsing::includes::expand_includes;
use crate::parsing::loops::expand_loops;
use crate::parsing::scanner::{find_block, normalize_sections, strip_comments};
use crate::parsing::scope::Scope;
use crate::parsing::sections::locate_section;
use crate::parsing::variables::{apply_aliases, declare_variables, legacy_variables, substitute};

/// Loads sections from configuration files. Each load starts from a copy of
/// the loader's variables, so declarations made by one file never leak into
/// another load.
#[derive(Debug, Clone)]
pub struct Loader {
    scope: Scope,
}

impl Default for Loader {
    fn default() -> Self {
        Loader::new()
    }
}

impl Loader {
    /// A loader seeing the variables of the process environment.
    pub fn new() -> Loader {
        Loader {
            scope: Scope::from_environment(),
        }
    }

    /// A loader seeing only the given variables.
    pub fn with_scope(scope: Scope) -> Loader {
        Loader { scope }
    }

    pub fn with_variable(mut self, name: &str, value: &str) -> Loader {
        self.scope
            .insert(name, value);
        self
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Resolve the `<key>` section of the file at `path`, optionally the one
    /// named `instance`.
    pub fn load_section(
        &self,
        key: &str,
        path: &Path,
        instance: Option<&str>,
    ) -> Result<Section, LoadError> {
        let content = super::load(path)?;
        let directory = path
            .parent()
            .unwrap_or_else(|| Path::new("."));

        info!("Loading <{}> from {}", key, path.display());
        self.resolve(key, &content, directory, Some(path), instance)
    }

    /// Resolve a section from configuration text held in memory. Relative
    /// include and delegation paths are taken from `directory`.
    pub fn load_str(
        &self,
        key: &str,
        content: &str,
        directory: &Path,
        instance: Option<&str>,
    ) -> Result<Section, LoadError> {
        self.resolve(key, content, directory, None, instance)
    }

    fn resolve(
        &self,
        key: &str,
        content: &str,
        directory: &Path,
        origin: Option<&Path>,
        instance: Option<&str>,
    ) -> Result<Section, LoadError> {
        let mut scope = self
            .scope
            .clone();
        let mut diagnostics = Vec::new();

        let text = normalize_sections(&strip_comments(content));

        if let Some(block) = find_block(&text, "environment", 0)? {
            let environment = expand_includes(&block.text, directory, origin, &scope, &mut diagnostics)?;
            declare_variables(&strip_comments(&environment), &mut scope)?;
        }

        let text = substitute(&text, &scope)?;
        diagnostics.extend(legacy_variables(&text));

        let globals = match find_block(&text, "globals", 0)? {
            Some(block) => {
                let globals = expand_includes(&block.text, directory, origin, &scope, &mut diagnostics)?;
                Globals::from_block(&strip_comments(&globals))
            }
            None => Globals::default(),
        };
        debug!("{} global parameters", globals.parameters.len());

        let location = locate_section(&text, key, instance, directory, &scope, 0)?;
        let directory = match &location.file {
            Some(file) => file
                .parent()
                .unwrap_or(directory),
            None => directory,
        };
        let file = location
            .file
            .clone()
            .or_else(|| origin.map(Path::to_path_buf));

        let text = expand_includes(
            &location.block.text,
            directory,
            file.as_deref(),
            &scope,
            &mut diagnostics,
        )?;
        let text = substitute(&strip_comments(&text), &scope)?;
        diagnostics.extend(legacy_variables(&text));

        let text = apply_aliases(&text);
        let text = replace_expressions(&text, &mut diagnostics);
        let text = expand_loops(&text, &mut diagnostics)?;
        let text = replace_expressions(&text, &mut diagnostics);
        let text = apply_aliases(&text);
        let text = replace_expressions(&text, &mut diagnostics);

        debug!(
            "Resolved <{}> with {} diagnostic{}",
            key,
            diagnostics.len(),
            if diagnostics.len() == 1 { "" } else { "s" }
        );

        Ok(Section::new(key, text, globals, diagnostics, file))
    }
}

/// Resolve the `<key>` section of the file at `path` using the variables of
/// the process environment.
pub fn load_section(key: &str, path: &Path, instance: Option<&str>) -> Result<Section, LoadError> {
    Loader::new().load_section(key, path, instance)
}
