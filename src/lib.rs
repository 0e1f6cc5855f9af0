#[macro_use]
mod regex;

pub mod formatting;
pub mod language;
pub mod parsing;
pub mod templating;

pub use language::{Diagnostic, LoadError, Section, UnitError, Vector2, Vector3, Verbosity};
pub use parsing::{load_section, Loader, Scope};
