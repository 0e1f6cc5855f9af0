//! Variables, declared in the `<environment>` block or taken from the process
//! environment, and the `<myParameter>` aliases a section defines for itself.

use tracing::{debug, warn};

use crate::language::{Diagnostic, LoadError};
use crate::parsing::scanner;
use crate::parsing::scope::Scope;

/// Replace every `${NAME}` in `text` with its value from `scope`. A name not
/// in scope is fatal. An opening `${` with no closing brace ends
/// substitution, leaving the rest of the text as it is.
pub fn substitute(text: &str, scope: &Scope) -> Result<String, LoadError> {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        let close = match rest[start + 2..].find('}') {
            Some(i) => start + 2 + i,
            None => break,
        };
        let name = &rest[start + 2..close];

        let value = scope
            .get(name)
            .ok_or_else(|| LoadError::UndefinedVariable {
                name: name.to_string(),
            })?;

        output.push_str(&rest[..start]);
        output.push_str(value);
        rest = &rest[close + 1..];
    }
    output.push_str(rest);

    Ok(output)
}

/// Find uses of the old `{NAME}` form. These are no longer substituted; each
/// distinct name is reported once.
pub fn legacy_variables(text: &str) -> Vec<Diagnostic> {
    let re = regex!(r"(?:^|[^$])\{([A-Za-z_][A-Za-z0-9_]*)\}");

    let mut names: Vec<String> = Vec::new();
    for captures in re.captures_iter(text) {
        let name = captures[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names
        .into_iter()
        .map(|name| {
            warn!("Legacy variable {{{}}} left unsubstituted", name);
            Diagnostic::LegacyVariable { name }
        })
        .collect()
}

/// Apply each `<variable name="N" value="V" overwrite="true"/>` declaration
/// in an environment block to the scope, in order. Values may themselves
/// refer to variables already in scope.
pub fn declare_variables(environment: &str, scope: &mut Scope) -> Result<(), LoadError> {
    let mut cursor = 0;

    while let Some(span) = scanner::find_tag(environment, "variable", cursor) {
        cursor = span.end;

        let (name, value) = match (span.attribute("name"), span.attribute("value")) {
            (Some(name), Some(value)) => (name, value),
            _ => continue,
        };
        let overwrite = span.attribute("overwrite") == Some("true");
        let value = substitute(value, scope)?;

        if scope.declare(name, &value, overwrite) {
            debug!(name, %value, "Variable declared");
        } else {
            debug!(name, "Variable already set; declaration ignored");
        }
    }

    Ok(())
}

/// Replace the names defined by `<myParameter name="N" value="V"/>` tags with
/// their values. Replacement is literal and applies to the text following
/// each defining tag, so a definition can use aliases declared before it.
pub fn apply_aliases(text: &str) -> String {
    let mut output = text.to_string();
    let mut cursor = 0;

    while let Some(span) = scanner::find_tag(&output, "myParameter", cursor) {
        cursor = span.end + 1;

        let (name, value) = match (span.attribute("name"), span.attribute("value")) {
            (Some(name), Some(value)) if !name.is_empty() => (name.to_string(), value.to_string()),
            _ => continue,
        };

        let mut position = cursor;
        while let Some(i) = output[position..].find(&name) {
            let at = position + i;
            output.replace_range(at..at + name.len(), &value);
            position = at + value.len();
        }
    }

    output
}
