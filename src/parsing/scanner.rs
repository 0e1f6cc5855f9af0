//! Locating tags, attributes, and balanced blocks in configuration text.
//!
//! Everything here works on plain strings by searching for substrings; there
//! is no document tree. Offsets handed in and out are byte positions in the
//! buffer being searched, and always fall on ASCII characters (`<`, `>`, `"`)
//! so they are valid slice boundaries.

use crate::language::{Block, LoadError, Span};

/// Find the first tag called `name` at or after `from`.
///
/// The tag ends at the first `>` after its name, except that a definition
/// which (ignoring whitespace) ends in `="` was cut short by a `>` inside a
/// quoted value, as in `condition=">100"`, and the search for the real
/// terminator continues past it.
pub fn find_tag(buffer: &str, name: &str, from: usize) -> Option<Span> {
    let key = format!("<{}", name);
    let mut search = from;

    loop {
        let start = search
            + buffer
                .get(search..)?
                .find(&key)?;
        let after = start + key.len();

        if !is_name_boundary(buffer, after) {
            search = after;
            continue;
        }

        let mut end = after + buffer[after..].find('>')?;

        while is_value_cut_short(&buffer[start..end]) {
            match buffer[end + 1..].find('>') {
                Some(i) => end = end + 1 + i,
                None => break,
            }
        }

        return Some(Span {
            name: name.to_string(),
            start,
            end,
            definition: buffer[start..end].to_string(),
        });
    }
}

/// Find the first `</name>` closing tag at or after `from`, returning the
/// position of its `<`.
pub fn find_closing(buffer: &str, name: &str, from: usize) -> Option<usize> {
    let key = format!("</{}", name);
    let mut search = from;

    loop {
        let start = search
            + buffer
                .get(search..)?
                .find(&key)?;
        let after = start + key.len();

        if is_name_boundary(buffer, after) {
            return Some(start);
        }
        search = after;
    }
}

/// Find the first block `<name ...> ... </name>` at or after `from`, matching
/// the closing tag by counting nested openings of the same name. A leaf tag
/// `<name ... />` is a block with an empty body. An opening tag without a
/// matching closing tag is an error.
pub fn find_block(buffer: &str, name: &str, from: usize) -> Result<Option<Block>, LoadError> {
    let open = match find_tag(buffer, name, from) {
        Some(span) => span,
        None => return Ok(None),
    };

    if open.is_self_closing() {
        let end = open.end + 1;
        return Ok(Some(Block {
            name: name.to_string(),
            start: open.start,
            end,
            body_start: end,
            body_end: end,
            text: buffer[open.start..end].to_string(),
        }));
    }

    let unterminated = || LoadError::UnterminatedTag {
        name: name.to_string(),
        offset: open.start,
    };

    let mut depth = 1;
    let mut cursor = open.end + 1;

    loop {
        let close = find_closing(buffer, name, cursor).ok_or_else(unterminated)?;

        match find_tag(buffer, name, cursor) {
            Some(nested) if nested.start < close => {
                if !nested.is_self_closing() {
                    depth += 1;
                }
                cursor = nested.end + 1;
            }
            _ => {
                depth -= 1;
                let end = match buffer[close..].find('>') {
                    Some(i) => close + i + 1,
                    None => buffer.len(),
                };

                if depth == 0 {
                    return Ok(Some(Block {
                        name: name.to_string(),
                        start: open.start,
                        end,
                        body_start: open.end + 1,
                        body_end: close,
                        text: buffer[open.start..end].to_string(),
                    }));
                }
                cursor = end;
            }
        }
    }
}

/// Value of the first attribute `name="..."` in a tag definition.
pub fn attribute<'d>(definition: &'d str, name: &str) -> Option<&'d str> {
    let (begin, close) = locate_attribute(definition, name)?;
    Some(&definition[begin..close])
}

/// Value of attribute `name` plus the `units="..."` attribute trailing it.
/// Units only belong to a value if they follow within a few characters of
/// its closing quote, which lets one tag carry several measured values each
/// with their own units.
pub fn attribute_with_units<'d>(
    definition: &'d str,
    name: &str,
) -> Option<(&'d str, Option<&'d str>)> {
    let (begin, close) = locate_attribute(definition, name)?;
    let units = units_after(definition, close);

    Some((&definition[begin..close], units))
}

/// The `units="..."` attribute starting no more than 8 bytes after `from`.
pub fn units_after(definition: &str, from: usize) -> Option<&str> {
    let key = "units=\"";
    let at = from
        + definition
            .get(from..)?
            .find(key)?;

    if at - from > 8 {
        return None;
    }

    let begin = at + key.len();
    let close = match definition[begin..].find('"') {
        Some(i) => begin + i,
        None => definition.len(),
    };

    Some(&definition[begin..close])
}

// Returns the byte range of the value (between the quotes). The attribute
// name has to start the definition or follow whitespace, so that looking up
// "name" does not find "nameref" or "filename".
fn locate_attribute(definition: &str, name: &str) -> Option<(usize, usize)> {
    let key = format!("{}=\"", name);
    let mut search = 0;

    loop {
        let at = search + definition[search..].find(&key)?;

        let boundary = definition[..at]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);

        if boundary {
            let begin = at + key.len();
            let close = match definition[begin..].find('"') {
                Some(i) => begin + i,
                None => definition.len(),
            };
            return Some((begin, close));
        }
        search = at + key.len();
    }
}

fn is_name_boundary(buffer: &str, position: usize) -> bool {
    match buffer[position..]
        .chars()
        .next()
    {
        None => true,
        Some(c) => c.is_whitespace() || c == '>' || c == '/',
    }
}

fn is_value_cut_short(definition: &str) -> bool {
    let compact: String = definition
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    compact.ends_with("=\"")
}

/// Remove `<!-- ... -->` comments. An unterminated comment runs to the end
/// of the text.
pub fn strip_comments(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("<!--") {
        output.push_str(&rest[..start]);
        rest = match rest[start + 4..].find("-->") {
            Some(i) => &rest[start + 4 + i + 3..],
            None => "",
        };
    }
    output.push_str(rest);

    output
}

/// Rewrite the long form `<section Key ...> ... </section>` into the
/// shorthand `<Key ...> ... </Key>` that the rest of the pipeline searches
/// for. Each `<section` is paired with the next `</section>` after it.
pub fn normalize_sections(text: &str) -> String {
    let mut output = text.to_string();
    let mut cursor = 0;

    while let Some(i) = output[cursor..].find("<section") {
        let start = cursor + i;
        let after = start + "<section".len();

        let spaces = output[after..]
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum::<usize>();

        if spaces == 0 {
            cursor = after;
            continue;
        }

        output.replace_range(start..after + spaces, "<");

        let rest = &output[start + 1..];
        let length = rest
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .unwrap_or(rest.len());
        let key = rest[..length].to_string();
        let after = start + 1 + length;

        if let Some(j) = output[after..].find("</section>") {
            let close = after + j;
            output.replace_range(close..close + "</section>".len(), &format!("</{}>", key));
        }

        cursor = start + 1;
    }

    output
}

/// Build a tag definition from a name and attributes, without the closing
/// `>`. Values must not contain double quotes.
pub fn build_tag(name: &str, attributes: &[(&str, &str)]) -> String {
    let mut definition = format!("<{}", name);
    for (key, value) in attributes {
        definition.push_str(&format!(" {}=\"{}\"", key, value));
    }
    definition
}
