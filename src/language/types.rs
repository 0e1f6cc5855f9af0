//! Types describing the tags, blocks, and values found in RML configuration text

use crate::language::{units, UnitError};
use crate::parsing::scanner;

/// A single opening (or leaf) tag, `<name attr="value" ...>`. The definition
/// holds the text from the opening `<` up to but not including the `>` that
/// terminates the tag; the offsets are positions in the buffer the tag was
/// found in, with `end` being the position of that terminating `>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub name: String,
    pub start: usize,
    pub end: usize,
    pub definition: String,
}

impl Span {
    /// Value of the first attribute called `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        scanner::attribute(&self.definition, name)
    }

    /// The value of attribute `name` together with the `units="..."`
    /// attribute immediately trailing it, if there is one.
    pub fn attribute_with_units(&self, name: &str) -> Option<(&str, Option<&str>)> {
        scanner::attribute_with_units(&self.definition, name)
    }

    /// The numeric value of attribute `field` converted from the units
    /// trailing it into the canonical unit of its quantity.
    pub fn value_with_units(&self, field: &str) -> Result<f64, UnitError> {
        let (value, symbol) = self.measured(field)?;

        let number = parse_number(value).ok_or_else(|| UnitError::InvalidNumber {
            name: field.to_string(),
            value: value.to_string(),
        })?;

        let result = units::to_canonical(number, symbol);
        if result.is_nan() {
            return Err(unknown(field, symbol));
        }
        Ok(result)
    }

    /// As [`Span::value_with_units`] for a `(x,y)` value. A value that is not
    /// a well formed pair gives [`Vector2::SENTINEL`], unconverted.
    pub fn vector2_with_units(&self, field: &str) -> Result<Vector2, UnitError> {
        let (value, symbol) = self.measured(field)?;
        if units::lookup(symbol).is_none() {
            return Err(unknown(field, symbol));
        }

        match Vector2::parse(value) {
            Some(vector) => Ok(units::vector2_to_canonical(vector, symbol)),
            None => Ok(Vector2::SENTINEL),
        }
    }

    /// As [`Span::value_with_units`] for a `(x,y,z)` value. A value that is
    /// not a well formed triple gives [`Vector3::SENTINEL`], unconverted.
    pub fn vector3_with_units(&self, field: &str) -> Result<Vector3, UnitError> {
        let (value, symbol) = self.measured(field)?;
        if units::lookup(symbol).is_none() {
            return Err(unknown(field, symbol));
        }

        match Vector3::parse(value) {
            Some(vector) => Ok(units::vector3_to_canonical(vector, symbol)),
            None => Ok(Vector3::SENTINEL),
        }
    }

    fn measured(&self, field: &str) -> Result<(&str, &str), UnitError> {
        let (value, symbol) = self
            .attribute_with_units(field)
            .ok_or_else(|| UnitError::ParameterNotFound {
                name: field.to_string(),
            })?;

        let symbol = symbol.ok_or_else(|| UnitError::MissingUnits {
            name: field.to_string(),
        })?;

        Ok((value, symbol))
    }

    /// Whether this is a leaf tag written `<name ... />`.
    pub fn is_self_closing(&self) -> bool {
        self.definition
            .trim_end()
            .ends_with('/')
    }
}

/// A balanced structure, `<name ...> ... </name>`. Offsets are relative to
/// the buffer the block was found in: `start` is the opening `<`, `end` is
/// one past the `>` of the closing tag, and the body lies between
/// `body_start` and `body_end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub start: usize,
    pub end: usize,
    pub body_start: usize,
    pub body_end: usize,
    pub text: String,
}

impl Block {
    /// The opening tag of this block, with offsets relative to the block's
    /// own text.
    pub fn definition(&self) -> Option<Span> {
        scanner::find_tag(&self.text, &self.name, 0)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.definition()
            .and_then(|span| {
                span.attribute(name)
                    .map(str::to_string)
            })
    }

    /// Everything between the opening tag and the closing tag.
    pub fn body(&self) -> &str {
        &self.text[self.body_start - self.start..self.body_end - self.start]
    }
}

fn unknown(field: &str, symbol: &str) -> UnitError {
    UnitError::UnknownUnit {
        name: field.to_string(),
        unit: symbol.to_string(),
    }
}

/// A plain decimal number, optionally signed and with an exponent.
pub fn parse_number(value: &str) -> Option<f64> {
    let re = regex!(r"^[-+]?(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?$");

    let value = value.trim();
    if re.is_match(value) {
        value
            .parse::<f64>()
            .ok()
    } else {
        None
    }
}

// The comma separated numbers inside `(...)`, if there are exactly `count`
// of them.
fn components(value: &str, count: usize) -> Option<Vec<f64>> {
    let value = value.trim();
    let inner = value
        .strip_prefix('(')?
        .strip_suffix(')')?;

    let numbers = inner
        .split(',')
        .map(parse_number)
        .collect::<Option<Vec<f64>>>()?;

    if numbers.len() == count {
        Some(numbers)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Returned in place of a value that is not a well formed `(x,y)` pair.
    pub const SENTINEL: Vector2 = Vector2 { x: -1.0, y: -1.0 };

    pub fn new(x: f64, y: f64) -> Vector2 {
        Vector2 { x, y }
    }

    /// Read `(x,y)`.
    pub fn parse(value: &str) -> Option<Vector2> {
        let numbers = components(value, 2)?;
        Some(Vector2::new(numbers[0], numbers[1]))
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Vector2::SENTINEL
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Returned in place of a value that is not a well formed `(x,y,z)`
    /// triple.
    pub const SENTINEL: Vector3 = Vector3 {
        x: -1.0,
        y: -1.0,
        z: -1.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3 { x, y, z }
    }

    /// Read `(x,y,z)`.
    pub fn parse(value: &str) -> Option<Vector3> {
        let numbers = components(value, 3)?;
        Some(Vector3::new(numbers[0], numbers[1], numbers[2]))
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Vector3::SENTINEL
    }
}

/// How chatty lookups against a resolved section should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent,
    Warning,
    Info,
    Debug,
    Extreme,
}

impl Verbosity {
    pub fn parse(value: &str) -> Option<Verbosity> {
        match value {
            "silent" => Some(Verbosity::Silent),
            "warning" => Some(Verbosity::Warning),
            "info" => Some(Verbosity::Info),
            "debug" => Some(Verbosity::Debug),
            "extreme" => Some(Verbosity::Extreme),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Silent => "silent",
            Verbosity::Warning => "warning",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
            Verbosity::Extreme => "extreme",
        }
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Warning
    }
}

/// Defaults declared in the `<globals>` block of a configuration file. These
/// apply to every section in that file but are not carried across to
/// sections delegated to other files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Globals {
    pub parameters: Vec<(String, String)>,
    pub verbosity: Option<Verbosity>,
}

impl Globals {
    /// Read the `<parameter name value>` entries out of a globals block.
    pub fn from_block(text: &str) -> Globals {
        let mut parameters = Vec::new();
        let mut cursor = 0;

        while let Some(span) = scanner::find_tag(text, "parameter", cursor) {
            cursor = span.end;

            if let (Some(name), Some(value)) = (span.attribute("name"), span.attribute("value")) {
                parameters.push((name.to_string(), value.to_string()));
            }
        }

        let verbosity = parameters
            .iter()
            .find(|(name, _)| name == "verboseLevel")
            .and_then(|(_, value)| Verbosity::parse(value));

        Globals {
            parameters,
            verbosity,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Where output data is to be written, if the file says.
    pub fn main_data_path(&self) -> Option<&str> {
        self.get("mainDataPath")
    }

    pub fn gas_data_path(&self) -> Option<&str> {
        self.get("gasDataPath")
    }
}
