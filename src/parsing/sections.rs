//! Finding the block for a requested section, following `nameref`
//! delegation into other files.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::language::{Block, LoadError};
use crate::parsing::scanner;
use crate::parsing::scope::Scope;
use crate::parsing::variables;

/// How many files a chain of `nameref` delegations may pass through.
pub const MAXIMUM_DELEGATION: usize = 32;

/// A located section block, and where it came from if it was found by
/// following a delegation into another file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub block: Block,
    pub file: Option<PathBuf>,
}

/// Find the `<key>` block to load. With an `instance` the block must be
/// named that; without one the first block qualifies. A block with no name
/// but with `nameref` and `file` attributes stands for the block of that name
/// in the other file.
pub fn locate_section(
    buffer: &str,
    key: &str,
    instance: Option<&str>,
    directory: &Path,
    scope: &Scope,
    depth: usize,
) -> Result<Location, LoadError> {
    let mut cursor = 0;

    while let Some(block) = scanner::find_block(buffer, key, cursor)? {
        cursor = block.end;

        let name = block
            .attribute("name")
            .filter(|name| !name.is_empty());

        if let Some(name) = name {
            if instance.map_or(true, |instance| instance == name) {
                debug!("Found <{}> named \"{}\"", key, name);
                return Ok(Location { block, file: None });
            }
            continue;
        }

        if let (Some(nameref), Some(file)) = (block.attribute("nameref"), block.attribute("file")) {
            if instance.map_or(true, |instance| instance == nameref) {
                return delegate(key, &nameref, &file, directory, scope, depth);
            }
            continue;
        }

        if instance.is_none() {
            debug!("Found unnamed <{}>", key);
            return Ok(Location { block, file: None });
        }
    }

    Err(LoadError::SectionNotFound {
        key: key.to_string(),
        name: instance.map(str::to_string),
    })
}

fn delegate(
    key: &str,
    nameref: &str,
    file: &str,
    directory: &Path,
    scope: &Scope,
    depth: usize,
) -> Result<Location, LoadError> {
    if depth >= MAXIMUM_DELEGATION {
        return Err(LoadError::DelegationTooDeep {
            nameref: nameref.to_string(),
        });
    }

    let path = directory.join(variables::substitute(file, scope)?);
    info!("Section <{}> \"{}\" delegated to {}", key, nameref, path.display());

    let content = std::fs::read_to_string(&path).map_err(|error| {
        debug!(?error);
        LoadError::ReferencedFileUnreadable {
            path: path.clone(),
            nameref: nameref.to_string(),
        }
    })?;
    let content = scanner::normalize_sections(&scanner::strip_comments(&content));

    let remote = path
        .parent()
        .unwrap_or(directory);
    let location = locate_section(&content, key, Some(nameref), remote, scope, depth + 1)?;

    Ok(Location {
        block: location.block,
        file: location
            .file
            .or(Some(path)),
    })
}
