//! Splicing `<include file="..."/>` markers with the contents of the file
//! they name.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::language::{Diagnostic, LoadError};
use crate::parsing::scanner;
use crate::parsing::scope::Scope;
use crate::parsing::variables;

/// How deeply included files may include further files.
pub const MAXIMUM_DEPTH: usize = 32;

// A file spliced into the buffer, and the offset one past the last byte of
// its text. Offsets shift as later splices grow or shrink the buffer.
#[derive(Debug)]
struct Frame {
    path: PathBuf,
    end: usize,
}

/// Replace each include marker in `buffer` with the text of the file it
/// names. Relative paths are resolved against the directory of the file
/// doing the including, or `directory` for markers in the buffer itself.
/// Markers inside spliced text are expanded in turn. A file that cannot be
/// read leaves its marker in place and is reported; a file that (directly or
/// indirectly) includes itself is fatal.
pub fn expand_includes(
    buffer: &str,
    directory: &Path,
    origin: Option<&Path>,
    scope: &Scope,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<String, LoadError> {
    let origin = origin.map(canonical);
    let mut output = buffer.to_string();
    let mut frames: Vec<Frame> = Vec::new();
    let mut cursor = 0;

    while let Some(tag) = scanner::find_tag(&output, "include", cursor) {
        frames.retain(|frame| frame.end > tag.start);

        // A marker begun inside spliced text must also end there.
        if frames
            .iter()
            .any(|frame| tag.end >= frame.end)
        {
            return Err(LoadError::UnterminatedTag {
                name: "include".to_string(),
                offset: tag.start,
            });
        }

        let file = match tag.attribute("file") {
            Some(file) => variables::substitute(file, scope)?,
            None => {
                cursor = tag.end + 1;
                continue;
            }
        };

        let base = frames
            .last()
            .and_then(|frame| {
                frame
                    .path
                    .parent()
            })
            .unwrap_or(directory);
        let path = base.join(&file);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) => {
                debug!(?error);
                warn!("Included file {} not found", path.display());
                diagnostics.push(Diagnostic::IncludeUnreadable { path });
                cursor = tag.end + 1;
                continue;
            }
        };

        let path = canonical(&path);
        if origin.as_ref() == Some(&path)
            || frames
                .iter()
                .any(|frame| frame.path == path)
        {
            return Err(LoadError::IncludeCycle { path });
        }
        if frames.len() >= MAXIMUM_DEPTH {
            return Err(LoadError::IncludeTooDeep { path });
        }

        let content = scanner::strip_comments(&content);
        debug!("Including {} ({} bytes)", path.display(), content.len());

        let replaced = tag.end + 1 - tag.start;
        output.replace_range(tag.start..=tag.end, &content);

        for frame in frames.iter_mut() {
            frame.end = frame.end - replaced + content.len();
        }
        frames.push(Frame {
            path,
            end: tag.start + content.len(),
        });

        cursor = tag.start;
    }

    Ok(output)
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
}
