//! Template trait for rendering resolved sections

use crate::language::Section;

/// Trait for templates that describe a resolved section as text
pub trait Template {
    /// Render a section into its textual form
    fn render(&self, section: &Section) -> Result<String, tinytemplate::error::Error>;
}
