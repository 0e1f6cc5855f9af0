//! Renderers for colourizing RML configuration text

use owo_colors::OwoColorize;

use super::{Render, Syntax};

/// Embellish fragments with ANSI escapes to create syntax highlighting in
/// terminal output.
pub struct Terminal;

impl Render for Terminal {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Neutral => content.to_string(),
            Syntax::Tag => content // entity.name.tag - #3465a4 (blue) bold
                .color(owo_colors::Rgb(52, 101, 164))
                .bold()
                .to_string(),
            Syntax::Attribute => content // entity.other.attribute-name - #8f5902 (brown)
                .color(owo_colors::Rgb(143, 89, 2))
                .to_string(),
            Syntax::String => content // string - #4e9a06 (green) bold
                .color(owo_colors::Rgb(78, 154, 6))
                .bold()
                .to_string(),
            Syntax::Numeric => content // constant.numeric - #ad7fa8 (purple) bold
                .color(owo_colors::Rgb(173, 127, 168))
                .bold()
                .to_string(),
            Syntax::Punctuation => content // punctuation - #999999 (grey)
                .color(owo_colors::Rgb(153, 153, 153))
                .to_string(),
            Syntax::Comment => content // comment - #999999 (grey) italic
                .color(owo_colors::Rgb(153, 153, 153))
                .italic()
                .to_string(),
        }
    }
}
