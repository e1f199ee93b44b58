//! The Chicken value model.
//!
//! Chicken is dynamically typed and its coercions behave like JavaScript.
//! Payloads are textual; numbers are arbitrary-precision decimal integers.
//!
//! ```text
//! Add:              Sub / Mul:
//!      NUM STR BOOL UND NAN        NUM STR BOOL UND NAN
//! NUM  NUM STR NUM  NAN NAN   NUM  NUM NUM NUM  NAN NAN
//! STR  STR STR STR  STR STR   STR  NUM NUM NUM  NAN NAN
//! BOOL NUM STR NUM  NAN NAN   BOOL NUM NUM NUM  NAN NAN
//! UND  NAN STR NAN  NAN NAN   UND  NAN NAN NAN  NAN NAN
//! NAN  NAN STR NAN  NAN NAN   NAN  NAN NAN NAN  NAN NAN
//! ```

use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// A single Chicken value: a textual payload plus a type tag.
///
/// Values are immutable; every operator returns a fresh value. `Sentinel`
/// only ever occupies slot 0 of the machine store and is never produced by
/// arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Payload is the decimal text of a signed arbitrary-precision integer.
    Number(String),
    Str(String),
    Bool(bool),
    Undefined,
    NaN,
    /// Marker in store slot 0; tells the load opcode "index the store itself".
    Sentinel,
}

fn parse_big(text: &str) -> Option<BigInt> {
    text.trim().parse().ok()
}

impl Value {
    /// The canonical textual form of this value.
    pub fn payload(&self) -> &str {
        match self {
            Value::Number(s) | Value::Str(s) => s,
            Value::Bool(true) => "true",
            Value::Bool(false) => "false",
            Value::Undefined => "undefined",
            Value::NaN => "NaN",
            Value::Sentinel => "",
        }
    }

    /// Type name as shown by the step trace.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "NUM",
            Value::Str(_) => "STR",
            Value::Bool(_) => "BOOL",
            Value::Undefined => "UND",
            Value::NaN => "NAN",
            Value::Sentinel => "STACK",
        }
    }

    /// Payload with booleans coerced to `"1"` / `"0"`, as the numeric
    /// operators and loose equality see it.
    fn numeric_payload(&self) -> &str {
        match self {
            Value::Bool(true) => "1",
            Value::Bool(false) => "0",
            _ => self.payload(),
        }
    }

    /// Ordering of type tags used to normalize operand pairs in `add`.
    fn rank(&self) -> u8 {
        match self {
            Value::Number(_) => 0,
            Value::Str(_) => 1,
            Value::Bool(_) => 2,
            Value::Undefined => 3,
            Value::NaN => 4,
            Value::Sentinel => 5,
        }
    }

    /// Payload parsed as a machine-width integer, for index operands.
    pub fn to_i64(&self) -> Option<i64> {
        parse_big(self.payload()).and_then(|n| n.to_i64())
    }

    /// Addition. Strings concatenate (left operand first); numbers and
    /// booleans sum as big integers; undefined and NaN are contagious.
    pub fn add(&self, other: &Value) -> Value {
        if matches!(self, Value::Str(_)) || matches!(other, Value::Str(_)) {
            return Value::Str(format!("{}{}", self.payload(), other.payload()));
        }
        let (x, y) = if self.rank() <= other.rank() {
            (self, other)
        } else {
            (other, self)
        };
        match (x, y) {
            (Value::Number(_) | Value::Bool(_), Value::Number(_) | Value::Bool(_)) => {
                match (parse_big(x.numeric_payload()), parse_big(y.numeric_payload())) {
                    (Some(a), Some(b)) => Value::Number((a + b).to_string()),
                    _ => Value::NaN,
                }
            }
            _ => Value::NaN,
        }
    }

    /// Subtraction (`self - other`).
    pub fn sub(&self, other: &Value) -> Value {
        Self::numeric_binary(self, other, |a, b| a - b)
    }

    /// Multiplication.
    pub fn mul(&self, other: &Value) -> Value {
        Self::numeric_binary(self, other, |a, b| a * b)
    }

    fn numeric_binary(x: &Value, y: &Value, op: fn(BigInt, BigInt) -> BigInt) -> Value {
        if matches!(x, Value::Undefined | Value::NaN) || matches!(y, Value::Undefined | Value::NaN)
        {
            return Value::NaN;
        }
        match (parse_big(x.numeric_payload()), parse_big(y.numeric_payload())) {
            (Some(a), Some(b)) => Value::Number(op(a, b).to_string()),
            _ => Value::NaN,
        }
    }

    /// Loose equality. NaN never equals anything (itself included);
    /// undefined only equals undefined; booleans compare as `"1"` / `"0"`;
    /// a `Number` zero equals a non-`Number` empty payload (symmetrically);
    /// everything else is exact payload comparison.
    pub fn loose_eq(&self, other: &Value) -> bool {
        if matches!(self, Value::NaN) || matches!(other, Value::NaN) {
            return false;
        }
        if matches!(self, Value::Undefined) || matches!(other, Value::Undefined) {
            return matches!(self, Value::Undefined) && matches!(other, Value::Undefined);
        }
        let a = self.numeric_payload();
        let b = other.numeric_payload();
        let zero_vs_empty = |zero: &Value, zs: &str, empty: &Value, es: &str| {
            matches!(zero, Value::Number(_))
                && zs == "0"
                && !matches!(empty, Value::Number(_))
                && es.is_empty()
        };
        if zero_vs_empty(self, a, other, b) || zero_vs_empty(other, b, self, a) {
            return true;
        }
        a == b
    }

    /// Truthiness for the conditional jump opcode.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Number(s) => s != "0",
            Value::Undefined | Value::NaN => false,
            Value::Sentinel => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Value {
        Value::Number(s.to_string())
    }

    fn text(s: &str) -> Value {
        Value::Str(s.to_string())
    }

    #[test]
    fn add_numbers() {
        assert_eq!(num("2").add(&num("3")), num("5"));
        assert_eq!(num("-7").add(&num("7")), num("0"));
    }

    #[test]
    fn add_is_arbitrary_precision() {
        let big = "9".repeat(40);
        let expected = format!("1{}8", "9".repeat(39)); // 2 * (10^40 - 1)
        assert_eq!(expected.len(), 41); // doubling a 40-digit number carries
        assert_eq!(num(&big).add(&num(&big)), num(&expected));
    }

    #[test]
    fn add_coerces_booleans() {
        assert_eq!(Value::Bool(true).add(&Value::Bool(true)), num("2"));
        assert_eq!(num("41").add(&Value::Bool(true)), num("42"));
        assert_eq!(Value::Bool(false).add(&num("5")), num("5"));
    }

    #[test]
    fn add_concatenates_strings_left_first() {
        assert_eq!(text("foo").add(&text("bar")), text("foobar"));
        assert_eq!(num("1").add(&text("x")), text("1x"));
        assert_eq!(text("x").add(&num("1")), text("x1"));
        assert_eq!(Value::Undefined.add(&text("!")), text("undefined!"));
        assert_eq!(Value::NaN.add(&text("!")), text("NaN!"));
    }

    #[test]
    fn add_undefined_and_nan_are_contagious() {
        assert_eq!(num("1").add(&Value::Undefined), Value::NaN);
        assert_eq!(Value::Undefined.add(&Value::Bool(true)), Value::NaN);
        assert_eq!(Value::NaN.add(&num("0")), Value::NaN);
        assert_eq!(Value::Undefined.add(&Value::Undefined), Value::NaN);
    }

    #[test]
    fn sub_and_mul_parse_string_payloads() {
        assert_eq!(text("10").sub(&num("4")), num("6"));
        assert_eq!(text("3").mul(&text("5")), num("15"));
        assert_eq!(text("chicken").sub(&num("1")), Value::NaN);
    }

    #[test]
    fn sub_and_mul_coerce_each_boolean_independently() {
        assert_eq!(Value::Bool(true).sub(&Value::Bool(false)), num("1"));
        assert_eq!(num("10").sub(&Value::Bool(true)), num("9"));
        assert_eq!(Value::Bool(false).mul(&num("9")), num("0"));
    }

    #[test]
    fn nan_is_absorbing_for_sub_and_mul() {
        for v in [num("1"), text("1"), Value::Bool(true), Value::Undefined] {
            assert_eq!(Value::NaN.sub(&v), Value::NaN);
            assert_eq!(v.sub(&Value::NaN), Value::NaN);
            assert_eq!(Value::NaN.mul(&v), Value::NaN);
            assert_eq!(v.mul(&Value::NaN), Value::NaN);
        }
        assert_eq!(Value::Undefined.sub(&num("1")), Value::NaN);
    }

    #[test]
    fn nan_never_equals_itself() {
        assert!(!Value::NaN.loose_eq(&Value::NaN));
        assert!(!Value::NaN.loose_eq(&text("NaN")));
    }

    #[test]
    fn undefined_only_equals_undefined() {
        assert!(Value::Undefined.loose_eq(&Value::Undefined));
        assert!(!Value::Undefined.loose_eq(&text("undefined")));
        assert!(!num("0").loose_eq(&Value::Undefined));
    }

    #[test]
    fn zero_equals_empty_string_symmetrically() {
        assert!(num("0").loose_eq(&text("")));
        assert!(text("").loose_eq(&num("0")));
        // Only a Number zero triggers the rule.
        assert!(!text("0").loose_eq(&text("")));
        assert!(!Value::Bool(false).loose_eq(&text("")));
    }

    #[test]
    fn equality_coerces_booleans() {
        assert!(Value::Bool(true).loose_eq(&num("1")));
        assert!(Value::Bool(false).loose_eq(&text("0")));
        assert!(!Value::Bool(true).loose_eq(&text("true")));
    }

    #[test]
    fn equality_compares_payload_text() {
        assert!(num("12").loose_eq(&text("12")));
        assert!(!num("12").loose_eq(&num("13")));
        assert!(text("chicken").loose_eq(&text("chicken")));
    }

    #[test]
    fn truthiness() {
        assert!(Value::Bool(true).truthy());
        assert!(!Value::Bool(false).truthy());
        assert!(text("x").truthy());
        assert!(!text("").truthy());
        assert!(num("-1").truthy());
        assert!(!num("0").truthy());
        assert!(!Value::Undefined.truthy());
        assert!(!Value::NaN.truthy());
        assert!(Value::Sentinel.truthy());
    }

    #[test]
    fn index_conversion() {
        assert_eq!(num("42").to_i64(), Some(42));
        assert_eq!(text("-3").to_i64(), Some(-3));
        assert_eq!(text("chicken").to_i64(), None);
        assert_eq!(num(&"9".repeat(30)).to_i64(), None);
        assert_eq!(Value::Undefined.to_i64(), None);
    }
}
