//! Syntax highlighting for resolved configuration text

mod highlight;
mod renderer;
mod syntax;

pub use renderer::Terminal;
pub use syntax::{Identity, Render, Syntax};

/// We do the highlighting in two passes. First we split the text into a Vec
/// of "fragments" (Syntax tag, String pairs). Then second we apply the
/// specified renderer to each pair to result in an embellished String.
pub fn render(renderer: &(impl Render + ?Sized), buffer: &str) -> String {
    let fragments = highlight::fragments(buffer);

    render_to_string(renderer, fragments)
}

fn render_to_string(renderer: &(impl Render + ?Sized), fragments: Vec<(Syntax, String)>) -> String {
    let mut output = String::new();

    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }

    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rendering() {
        let buffer = r#"<config><parameter name="x" value="1"/></config>"#;
        assert_eq!(render(&Identity, buffer), format!("{}\n", buffer));
        assert_eq!(render(&Identity, ""), "");
    }
}
