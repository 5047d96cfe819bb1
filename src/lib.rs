//! miniexpr evaluates small boolean, arithmetic and string expressions.
//!
//! ```
//! use miniexpr::{evaluate, Value};
//!
//! assert_eq!(
//!     evaluate("1 + 1 >= 2 ? 'yes' : 'no'").unwrap(),
//!     Value::String("yes".into())
//! );
//!
//! let err = evaluate("1 / 0").unwrap_err();
//! assert_eq!(err.offset(), 2);
//! assert_eq!(err.to_string(), "Division by zero at index 3\n1 / 0\n  ^");
//! ```
pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod convert;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{BinOp, Expr, Token, TokenKind, UnaryOp};
pub use error::{ErrorKind, EvalError, format_error};
pub use evaluator::{Evaluator, RuntimeError};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, Parser};
pub use value::{Value, Variables};

/// Evaluates `expression` with no variables bound.
///
/// Every identifier evaluates to its own name as text.
pub fn evaluate(expression: &str) -> Result<Value, EvalError> {
    run(expression, Evaluator::new())
}

/// Evaluates `expression`, resolving identifiers bound in `variables`.
///
/// Identifiers missing from `variables` evaluate to their own name as text.
///
/// # Examples
///
/// ```
/// use miniexpr::{evaluate_with, Value, Variables};
///
/// let mut vars = Variables::new();
/// vars.insert("age".to_string(), Value::Integer(20));
///
/// let result = evaluate_with("age >= 18 ? adult : minor", &vars).unwrap();
/// assert_eq!(result, Value::String("adult".into()));
/// ```
pub fn evaluate_with(expression: &str, variables: &Variables) -> Result<Value, EvalError> {
    run(expression, Evaluator::with_variables(variables))
}

fn run(expression: &str, evaluator: Evaluator<'_>) -> Result<Value, EvalError> {
    let attach = |e: EvalError| e.with_source(expression);

    let expr = Parser::new(Lexer::new(expression))
        .and_then(|mut parser| parser.parse_expression())
        .map_err(|e| attach(e.into()))?;

    evaluator.eval(&expr).map_err(|e| attach(e.into()))
}
