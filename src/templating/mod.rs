//! Templates for rendering resolved sections into formatted output

mod summary;
mod template;

pub use summary::Summary;
pub use template::Template;

use crate::language::Section;

/// Render a resolved section using the specified template
pub fn fill(template: &impl Template, section: &Section) -> Result<String, tinytemplate::error::Error> {
    template.render(section)
}
