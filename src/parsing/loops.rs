//! Expansion of `<for variable="i" from="1" to="3" step="1"> ... </for>`
//! blocks into one copy of their body per iteration.

use tracing::{debug, warn};

use crate::language::{parse_number, Diagnostic, LoadError, Span};
use crate::parsing::expression::{format_number, replace_expressions};
use crate::parsing::scanner;

/// Loops producing more copies than this are rejected.
pub const MAXIMUM_ITERATIONS: usize = 100_000;

/// Largest buffer, in bytes, that unrolling may produce. Nested loops
/// multiply, so each loop being under the iteration limit is not enough.
pub const MAXIMUM_EXPANSION: usize = 64 * 1024 * 1024;

/// The header of a `<for>` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    pub variable: String,
    pub from: f64,
    pub to: f64,
    pub step: f64,
}

impl Loop {
    /// Read a loop header. Missing `step` means 1.
    pub fn from_span(span: &Span) -> Result<Loop, LoadError> {
        let variable = match span.attribute("variable") {
            Some(variable) if !variable.is_empty() => variable.to_string(),
            _ => {
                return Err(LoadError::InvalidLoop {
                    variable: String::new(),
                    problem: "no variable given".to_string(),
                })
            }
        };

        let number = |attribute: &str, default: Option<f64>| -> Result<f64, LoadError> {
            match span.attribute(attribute) {
                Some(value) => parse_number(value).ok_or_else(|| LoadError::InvalidLoop {
                    variable: variable.clone(),
                    problem: format!("{} \"{}\" is not a number", attribute, value),
                }),
                None => default.ok_or_else(|| LoadError::InvalidLoop {
                    variable: variable.clone(),
                    problem: format!("no {} given", attribute),
                }),
            }
        };

        let from = number("from", None)?;
        let to = number("to", None)?;
        let step = number("step", Some(1.0))?;

        Ok(Loop {
            variable,
            from,
            to,
            step,
        })
    }

    /// How many times the body is repeated. The upper bound is inclusive,
    /// within a small tolerance so that accumulated rounding in `to` does not
    /// lose the last iteration.
    pub fn count(&self) -> Result<usize, LoadError> {
        if self.step <= 0.0 {
            if self.from <= self.to {
                return Err(self.invalid(format!(
                    "step {} never reaches {}",
                    format_number(self.step),
                    format_number(self.to)
                )));
            }
            return Ok(0);
        }

        let span = (self.to - self.from) / self.step;
        if span < -1e-9 {
            return Ok(0);
        }

        let count = (span + 1e-9).floor() + 1.0;
        if count > MAXIMUM_ITERATIONS as f64 {
            return Err(self.invalid(format!(
                "{} iterations exceeds the limit of {}",
                count, MAXIMUM_ITERATIONS
            )));
        }

        Ok(count as usize)
    }

    /// The successive values the variable takes.
    pub fn values(&self) -> Result<Vec<f64>, LoadError> {
        let count = self.count()?;

        Ok((0..count)
            .map(|i| self.from + i as f64 * self.step)
            .collect())
    }

    fn invalid(&self, problem: String) -> LoadError {
        LoadError::InvalidLoop {
            variable: self
                .variable
                .clone(),
            problem,
        }
    }
}

/// Replace every `<for>` block in the buffer with its unrolled body. The
/// outermost loop is unrolled first, so inner loops may use the outer
/// variable in their bounds. Repeats until no loops remain.
pub fn expand_loops(buffer: &str, diagnostics: &mut Vec<Diagnostic>) -> Result<String, LoadError> {
    let mut output = buffer.to_string();

    while let Some(block) = scanner::find_block(&output, "for", 0)? {
        let mut header = block
            .definition()
            .ok_or_else(|| LoadError::UnterminatedTag {
                name: "for".to_string(),
                offset: block.start,
            })?;

        header.definition = replace_expressions(&header.definition, diagnostics);
        let descriptor = Loop::from_span(&header)?;
        let values = descriptor.values()?;

        debug!(
            "Expanding loop over {} with {} iteration{}",
            descriptor.variable,
            values.len(),
            if values.len() == 1 { "" } else { "s" }
        );

        if values.is_empty() {
            warn!("Loop over \"{}\" has no iterations", descriptor.variable);
            diagnostics.push(Diagnostic::EmptyLoop {
                variable: descriptor
                    .variable
                    .clone(),
            });
        }

        let body = block.body();
        let size = (output.len() - (block.end - block.start))
            .saturating_add(body.len().saturating_mul(values.len()));
        if size > MAXIMUM_EXPANSION {
            return Err(descriptor.invalid(format!(
                "unrolling would grow the section to {} bytes, beyond the limit of {}",
                size, MAXIMUM_EXPANSION
            )));
        }

        let marker = format!("[{}]", descriptor.variable);

        let mut expansion = String::new();
        for value in values {
            expansion.push_str(&body.replace(&marker, &format_number(value)));
        }

        output.replace_range(block.start..block.end, &expansion);
    }

    Ok(output)
}
