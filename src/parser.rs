//! Surface syntax parsing: program text to an ordered sequence of
//! `Number` instruction weights.

use num_bigint::BigInt;

use crate::error::ChickenError;
use crate::value::Value;

/// Which surface syntax the program text uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    /// Every token is the literal word `chicken`; the weight of a line is
    /// its token count.
    #[default]
    Standard,
    /// Every token is a decimal integer used as a weight directly.
    Simplified,
}

/// Parse program text into instruction weights, in source order.
/// CRLF pairs are normalized to single line breaks first.
pub fn parse(program: &str, syntax: Syntax) -> Result<Vec<Value>, ChickenError> {
    let program = program.replace("\r\n", "\n");
    match syntax {
        Syntax::Standard => parse_standard(&program),
        Syntax::Simplified => parse_simplified(&program),
    }
}

fn parse_standard(program: &str) -> Result<Vec<Value>, ChickenError> {
    let mut weights = Vec::new();
    for line in program.split('\n') {
        let mut count: usize = 0;
        for token in line.split_whitespace() {
            if token != "chicken" {
                return Err(ChickenError::syntax(format!(
                    "'chicken' expected, found '{}'",
                    token
                )));
            }
            count += 1;
        }
        weights.push(Value::Number(count.to_string()));
    }
    Ok(weights)
}

fn parse_simplified(program: &str) -> Result<Vec<Value>, ChickenError> {
    let mut weights = Vec::new();
    // Newlines count as token separators like any other whitespace.
    for token in program.split_whitespace() {
        if token.parse::<BigInt>().is_err() {
            return Err(ChickenError::syntax(format!(
                "number expected, found '{}'",
                token
            )));
        }
        // The token text is kept verbatim; dispatch is lexical.
        weights.push(Value::Number(token.to_string()));
    }
    Ok(weights)
}
