use std::collections::HashMap;
use std::fmt;

/// Named values an expression's identifiers resolve against.
pub type Variables = HashMap<String, Value>;

/// A dynamically typed value produced by evaluating an expression.
///
/// The language keeps the distinction between integers and floats: arithmetic
/// on two integers stays integral whenever the result is a whole number.
///
/// # Examples
///
/// ```
/// use miniexpr::Value;
///
/// let absent = Value::Null;
/// let boolean = Value::Boolean(true);
/// let integer = Value::Integer(42);
/// let float = Value::Float(3.14);
/// let text = Value::String("hello".to_string());
///
/// assert!(integer.is_truthy());
/// assert!(!absent.is_truthy());
/// assert_eq!(float.to_string(), "3.14");
/// assert_eq!(Value::Float(3.0).to_string(), "3.0");
/// # let _ = (boolean, text);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value; only enters an evaluation through a variable binding
    Null,

    /// Boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 text
    String(String),
}

impl Value {
    /// Truthiness used by `!`, `&&`, `||` and the conditional.
    ///
    /// Numbers are truthy when non-zero, text when non-empty, null never.
    pub fn is_truthy(&self) -> bool {
        use Value::*;
        match self {
            Null => false,
            Boolean(b) => *b,
            Float(n) => *n != 0.0,
            Integer(n) => *n != 0,
            String(s) => !s.is_empty(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }
}

/// Canonical text of a value, used for concatenation and textual equality.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write_float(f, *n),
            Value::String(s) => f.write_str(s),
        }
    }
}

/// Shortest round-tripping digits, always with a fractional part. Magnitudes
/// below `1e-3` or from `1e7` up use scientific notation (`1.0E7`, `2.5E-4`).
fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }

    if n == 0.0 || (1e-3..1e7).contains(&n.abs()) {
        return if n.fract() == 0.0 {
            write!(f, "{:.1}", n)
        } else {
            write!(f, "{}", n)
        };
    }

    let scientific = format!("{:e}", n);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    if mantissa.contains('.') {
        write!(f, "{}E{}", mantissa, exponent)
    } else {
        write!(f, "{}.0E{}", mantissa, exponent)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[test]
fn test_truthiness() {
    assert!(!Value::Integer(0).is_truthy());
    assert!(Value::Integer(-1).is_truthy());
    assert!(!Value::Float(0.0).is_truthy());
    assert!(Value::Float(-0.5).is_truthy());
    assert!(!Value::String(String::new()).is_truthy());
    assert!(Value::String("no".into()).is_truthy());
    assert!(!Value::Null.is_truthy());
}

#[test]
fn test_canonical_text() {
    assert_eq!(Value::Integer(-7).to_string(), "-7");
    assert_eq!(Value::Float(25.0).to_string(), "25.0");
    assert_eq!(Value::Float(-0.0).to_string(), "-0.0");
    assert_eq!(Value::Float(0.1).to_string(), "0.1");
    assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
    assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
    assert_eq!(Value::Float(9_999_999.5).to_string(), "9999999.5");
    assert_eq!(Value::Float(0.001).to_string(), "0.001");
    assert_eq!(Value::Float(1e7).to_string(), "1.0E7");
    assert_eq!(Value::Float(-1e7).to_string(), "-1.0E7");
    assert_eq!(Value::Float(1.5e20).to_string(), "1.5E20");
    assert_eq!(Value::Float(12_345_678.9).to_string(), "1.23456789E7");
    assert_eq!(Value::Float(1e-4).to_string(), "1.0E-4");
    assert_eq!(Value::Float(0.00025).to_string(), "2.5E-4");
    assert_eq!(
        Value::Float(9_223_372_036_854_775_808.0).to_string(),
        "9.223372036854776E18"
    );
    assert_eq!(Value::Boolean(false).to_string(), "false");
    assert_eq!(Value::Null.to_string(), "null");
}
