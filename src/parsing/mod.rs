//! resolver for RML configuration files

use std::path::Path;
use tracing::debug;

use crate::language::LoadError;

pub mod expression;
pub mod includes;
mod loader;
pub mod loops;
pub mod scanner;
mod scope;
pub mod sections;
pub mod variables;

pub use loader::{load_section, Loader};
pub use scope::Scope;

/// Read a file and return an owned String.
pub fn load(filename: &Path) -> Result<String, LoadError> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadError::FileUnreadable {
                    path: filename.to_path_buf(),
                    details: "file not found".to_string(),
                }),
                _ => Err(LoadError::FileUnreadable {
                    path: filename.to_path_buf(),
                    details: error
                        .kind()
                        .to_string(),
                }),
            }
        }
    }
}
