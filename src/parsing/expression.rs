//! Arithmetic in attribute values. A quoted value made only of numbers,
//! operators, and parentheses (optionally wrapped in `sqrt()` or `log()`) is
//! replaced by its computed result; vectors like `(2*5, 1+1)` are computed
//! component by component.

use tracing::warn;

use crate::language::Diagnostic;

/// Whether a value looks like something to evaluate. The function names are
/// the only letters allowed, apart from the `e` of an exponent.
pub fn is_expression(value: &str) -> bool {
    let stripped = value
        .replace("sqrt", "0")
        .replace("log", "0");

    if stripped.trim().is_empty() || stripped == "e-" || stripped == "e+" {
        return false;
    }

    stripped
        .chars()
        .all(|c| "-0123456789e+*/.,() ".contains(c))
}

/// Compute `value` if it is an expression or a vector of expressions,
/// returning it unchanged if it is neither. A value that looks like an
/// expression but cannot be computed is also returned unchanged, and
/// reported.
pub fn evaluate(value: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
    if !is_expression(value) {
        return value.to_string();
    }

    let trimmed = value.trim();
    if trimmed.starts_with('(') && trimmed.ends_with(')') && trimmed.contains(',') {
        let inner = &trimmed[1..trimmed.len() - 1];
        let mut components = Vec::new();

        for component in inner.split(',') {
            match calculate(component.trim()) {
                Some(number) => components.push(format_number(number)),
                None => return not_evaluated(value, diagnostics),
            }
        }
        return format!("({})", components.join(","));
    }

    match calculate(trimmed) {
        Some(number) => format_number(number),
        None => not_evaluated(value, diagnostics),
    }
}

fn not_evaluated(value: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
    warn!("Expression \"{}\" could not be evaluated", value);
    diagnostics.push(Diagnostic::ExpressionNotEvaluated {
        expression: value.to_string(),
    });
    value.to_string()
}

/// Evaluate every double-quoted value in the buffer.
pub fn replace_expressions(buffer: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
    let mut output = String::with_capacity(buffer.len());
    let mut rest = buffer;

    while let Some(open) = rest.find('"') {
        let close = match rest[open + 1..].find('"') {
            Some(i) => open + 1 + i,
            None => break,
        };

        output.push_str(&rest[..=open]);
        output.push_str(&evaluate(&rest[open + 1..close], diagnostics));
        output.push('"');
        rest = &rest[close + 1..];
    }
    output.push_str(rest);

    output
}

/// Compute a single arithmetic expression. Returns None if the text does not
/// parse or the result is not a finite number.
pub fn calculate(text: &str) -> Option<f64> {
    let mut parser = Parser::new(text);

    let result = parser.expression()?;
    parser.trim_whitespace();
    if !parser.is_finished() {
        return None;
    }

    if result.is_finite() {
        Some(result)
    } else {
        None
    }
}

/// Render a number the way values are written in configuration files: up to
/// twelve significant digits, no trailing zeros, and exponent notation only
/// for very large or very small magnitudes.
pub fn format_number(number: f64) -> String {
    if number == 0.0 {
        return "0".to_string();
    }
    if !number.is_finite() {
        return number.to_string();
    }

    let scientific = format!("{:.11e}", number);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(pair) => pair,
        None => return scientific,
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return scientific,
    };

    if (-5..15).contains(&exponent) {
        let decimals = (11 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, number))
    } else {
        format!("{}e{}", trim_zeros(mantissa), exponent)
    }
}

fn trim_zeros(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        text.to_string()
    }
}

/// Deepest nesting of parentheses and signs an expression may have.
const MAXIMUM_NESTING: usize = 256;

struct Parser<'i> {
    source: &'i str,
    offset: usize,
    depth: usize,
}

impl<'i> Parser<'i> {
    fn new(source: &'i str) -> Parser<'i> {
        Parser {
            source,
            offset: 0,
            depth: 0,
        }
    }

    fn rest(&self) -> &'i str {
        &self.source[self.offset..]
    }

    fn is_finished(&self) -> bool {
        self.offset >= self.source.len()
    }

    fn trim_whitespace(&mut self) {
        let rest = self.rest();
        self.offset += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Option<char> {
        self.trim_whitespace();
        self.rest()
            .chars()
            .next()
    }

    fn advance(&mut self, width: usize) {
        self.offset += width;
    }

    fn expression(&mut self) -> Option<f64> {
        let mut value = self.term()?;

        loop {
            match self.peek() {
                Some('+') => {
                    self.advance(1);
                    value += self.term()?;
                }
                Some('-') => {
                    self.advance(1);
                    value -= self.term()?;
                }
                _ => return Some(value),
            }
        }
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.unary()?;

        loop {
            match self.peek() {
                Some('*') => {
                    self.advance(1);
                    value *= self.unary()?;
                }
                Some('/') => {
                    self.advance(1);
                    value /= self.unary()?;
                }
                _ => return Some(value),
            }
        }
    }

    fn unary(&mut self) -> Option<f64> {
        if self.depth >= MAXIMUM_NESTING {
            return None;
        }

        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Option<f64> {
        match self.peek() {
            Some('-') => {
                self.advance(1);
                Some(-self.unary()?)
            }
            Some('+') => {
                self.advance(1);
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Option<f64> {
        match self.peek()? {
            '(' => {
                self.advance(1);
                let value = self.expression()?;
                self.expect(')')?;
                Some(value)
            }
            's' => {
                self.function("sqrt")?;
                Some(self.argument()?.sqrt())
            }
            'l' => {
                self.function("log")?;
                Some(self.argument()?.ln())
            }
            _ => self.number(),
        }
    }

    fn function(&mut self, name: &str) -> Option<()> {
        if self
            .rest()
            .starts_with(name)
        {
            self.advance(name.len());
            Some(())
        } else {
            None
        }
    }

    fn argument(&mut self) -> Option<f64> {
        self.expect('(')?;
        let value = self.expression()?;
        self.expect(')')?;
        Some(value)
    }

    fn expect(&mut self, c: char) -> Option<()> {
        if self.peek()? == c {
            self.advance(1);
            Some(())
        } else {
            None
        }
    }

    fn number(&mut self) -> Option<f64> {
        let re = regex!(r"^(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?");

        let found = re.find(self.rest())?;
        let text = found.as_str();
        self.advance(text.len());

        text.parse::<f64>()
            .ok()
    }
}
