//! Splitting configuration text into fragments tagged with the kind of
//! content they hold.

use crate::language::{parse_number, Vector2, Vector3};

use super::Syntax;

/// Break the buffer into (Syntax, text) pairs. Concatenating the text of the
/// fragments gives back the buffer unchanged.
pub fn fragments(buffer: &str) -> Vec<(Syntax, String)> {
    let mut result = Vec::new();
    let mut rest = buffer;

    while !rest.is_empty() {
        if rest.starts_with("<!--") {
            let end = match rest.find("-->") {
                Some(i) => i + 3,
                None => rest.len(),
            };
            result.push((Syntax::Comment, rest[..end].to_string()));
            rest = &rest[end..];
        } else if rest.starts_with('<') {
            rest = tag(rest, &mut result);
        } else {
            let end = rest
                .find('<')
                .unwrap_or(rest.len());
            result.push((Syntax::Neutral, rest[..end].to_string()));
            rest = &rest[end..];
        }
    }

    result
}

// Consume one tag from its opening `<` through the `>` ending it, returning
// whatever follows.
fn tag<'i>(text: &'i str, result: &mut Vec<(Syntax, String)>) -> &'i str {
    let open = if text.starts_with("</") { 2 } else { 1 };
    result.push((Syntax::Punctuation, text[..open].to_string()));
    let mut rest = &text[open..];

    let length = take(rest, |c| c.is_alphanumeric() || "_-:.".contains(c));
    if length > 0 {
        result.push((Syntax::Tag, rest[..length].to_string()));
        rest = &rest[length..];
    }

    while let Some(c) = rest
        .chars()
        .next()
    {
        match c {
            '>' => {
                result.push((Syntax::Punctuation, ">".to_string()));
                return &rest[1..];
            }
            '/' | '=' => {
                result.push((Syntax::Punctuation, c.to_string()));
                rest = &rest[1..];
            }
            '"' => {
                let end = match rest[1..].find('"') {
                    Some(i) => i + 2,
                    None => rest.len(),
                };
                let inner = rest[1..end].trim_end_matches('"');
                result.push((classify(inner), rest[..end].to_string()));
                rest = &rest[end..];
            }
            c if c.is_whitespace() => {
                let length = take(rest, char::is_whitespace);
                result.push((Syntax::Neutral, rest[..length].to_string()));
                rest = &rest[length..];
            }
            _ => {
                let length = take(rest, |c| !(c.is_whitespace() || "=/>\"".contains(c)));
                result.push((Syntax::Attribute, rest[..length].to_string()));
                rest = &rest[length..];
            }
        }
    }

    rest
}

fn take(text: &str, predicate: impl Fn(char) -> bool) -> usize {
    text.chars()
        .take_while(|c| predicate(*c))
        .map(char::len_utf8)
        .sum()
}

fn classify(value: &str) -> Syntax {
    if parse_number(value).is_some()
        || Vector2::parse(value).is_some()
        || Vector3::parse(value).is_some()
    {
        Syntax::Numeric
    } else {
        Syntax::String
    }
}
