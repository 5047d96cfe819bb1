use thiserror::Error;

use crate::{
    ast::{BinOp, Expr, UnaryOp},
    value::{Value, Variables},
};

/// Errors that can occur while evaluating a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// An operator was applied to operand kinds it does not support
    #[error("{message}")]
    Type { message: String, offset: usize },

    /// Division whose divisor is zero
    #[error("Division by zero")]
    DivisionByZero { offset: usize },
}

impl RuntimeError {
    fn type_error(message: impl Into<String>, offset: usize) -> Self {
        RuntimeError::Type {
            message: message.into(),
            offset,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            RuntimeError::Type { offset, .. } | RuntimeError::DivisionByZero { offset } => *offset,
        }
    }
}

/// Tree-walking evaluator.
///
/// Evaluation is a pure read of the tree: the evaluator holds nothing but a
/// borrowed variable context, so the same tree and context always produce
/// the same result.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator<'v> {
    variables: Option<&'v Variables>,
}

impl<'v> Evaluator<'v> {
    /// Creates an evaluator without variables; every identifier is its own name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator resolving identifiers against `variables`.
    pub fn with_variables(variables: &'v Variables) -> Self {
        Evaluator {
            variables: Some(variables),
        }
    }

    /// Evaluates an expression tree.
    ///
    /// Binary operands are evaluated left to right and the first error wins.
    /// A conditional evaluates its condition and then only the selected branch.
    ///
    /// # Examples
    ///
    /// ```
    /// use miniexpr::{Evaluator, Value, parser::parse};
    ///
    /// let expr = parse("(1 + 4) * 5").unwrap();
    /// let result = Evaluator::new().eval(&expr).unwrap();
    /// assert_eq!(result, Value::Integer(25));
    /// ```
    pub fn eval(&self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Number { value, .. } => Ok((*value).into()),
            Expr::String { value, .. } => Ok(Value::String(value.clone())),
            Expr::Identifier { name, .. } => Ok(self.resolve(name)),
            Expr::Unary { op, operand, pos } => {
                let value = self.eval(operand)?;
                self.apply_unary(*op, value, *pos)
            }
            Expr::Binary {
                op,
                left,
                right,
                pos,
            } => {
                // Both sides are always evaluated, `&&` and `||` included.
                let left_val = self.eval(left)?;
                let right_val = self.eval(right)?;
                self.apply_binop(*op, &left_val, &right_val, right, *pos)
            }
            Expr::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                if self.eval(condition)?.is_truthy() {
                    self.eval(when_true)
                } else {
                    self.eval(when_false)
                }
            }
        }
    }

    fn resolve(&self, name: &str) -> Value {
        self.variables
            .and_then(|vars| vars.get(name))
            .cloned()
            .unwrap_or_else(|| Value::String(name.to_string()))
    }

    fn apply_unary(&self, op: UnaryOp, value: Value, pos: usize) -> Result<Value, RuntimeError> {
        match (op, value) {
            (UnaryOp::Not, v) => Ok(Value::Boolean(!v.is_truthy())),
            (UnaryOp::Plus, v @ (Value::Integer(_) | Value::Float(_))) => Ok(v),
            (UnaryOp::Minus, Value::Integer(n)) => Ok(n
                .checked_neg()
                .map(Value::Integer)
                .unwrap_or(Value::Float(-(n as f64)))),
            (UnaryOp::Minus, Value::Float(n)) => Ok(Value::Float(-n)),
            (op, v) => Err(RuntimeError::type_error(
                format!(
                    "Unary {} requires numeric operand, got {}",
                    op,
                    v.type_name()
                ),
                pos,
            )),
        }
    }

    fn apply_binop(
        &self,
        op: BinOp,
        left: &Value,
        right: &Value,
        right_expr: &Expr,
        pos: usize,
    ) -> Result<Value, RuntimeError> {
        match op {
            BinOp::Add => match (left, right) {
                (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
                    arithmetic(op, left, right, pos)
                }
                (Value::Null, _) | (_, Value::Null) => Err(RuntimeError::type_error(
                    "Operator '+' requires numbers or strings",
                    pos,
                )),
                (a, b) => Ok(Value::String(format!("{}{}", a, b))),
            },
            BinOp::Subtract | BinOp::Multiply | BinOp::Divide | BinOp::Modulo => {
                arithmetic(op, left, right, pos)
            }
            BinOp::LessThan | BinOp::GreaterThan | BinOp::LessEqual | BinOp::GreaterEqual => {
                let (Some(a), Some(b)) = (left.as_float(), right.as_float()) else {
                    return Err(RuntimeError::type_error(
                        format!(
                            "Relational operators require numeric operands, cannot compare {} {} {}",
                            left.type_name(),
                            op,
                            right.type_name()
                        ),
                        right_expr.pos(),
                    ));
                };
                let result = match op {
                    BinOp::LessThan => a < b,
                    BinOp::GreaterThan => a > b,
                    BinOp::LessEqual => a <= b,
                    _ => a >= b,
                };
                Ok(Value::Boolean(result))
            }
            BinOp::Equal => Ok(Value::Boolean(loose_equals(left, right))),
            BinOp::NotEqual => Ok(Value::Boolean(!loose_equals(left, right))),
            BinOp::And => Ok(Value::Boolean(left.is_truthy() && right.is_truthy())),
            BinOp::Or => Ok(Value::Boolean(left.is_truthy() || right.is_truthy())),
        }
    }
}

/// Numbers compare by value regardless of kind, anything else by canonical text.
fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left.as_float(), right.as_float()) {
        (Some(a), Some(b)) => a == b,
        _ => left.to_string() == right.to_string(),
    }
}

/// Applies `+ - * / %` to two numeric values.
///
/// Integer operands use exact `i64` arithmetic when it neither overflows nor
/// leaves a remainder. Otherwise the operation runs on `f64`: a float operand
/// makes the result a float, two integer operands give an integer when the
/// result is finite, whole and within `i64` range.
fn arithmetic(op: BinOp, left: &Value, right: &Value, pos: usize) -> Result<Value, RuntimeError> {
    let (Some(a), Some(b)) = (left.as_float(), right.as_float()) else {
        return Err(RuntimeError::type_error(
            format!(
                "Numeric operator requires numeric operands, cannot apply {} to {} and {}",
                op,
                left.type_name(),
                right.type_name()
            ),
            pos,
        ));
    };

    if op == BinOp::Divide && b == 0.0 {
        return Err(RuntimeError::DivisionByZero { offset: pos });
    }

    if let (Value::Integer(x), Value::Integer(y)) = (left, right)
        && let Some(exact) = exact_integer(op, *x, *y)
    {
        return Ok(Value::Integer(exact));
    }

    let result = match op {
        BinOp::Add => a + b,
        BinOp::Subtract => a - b,
        BinOp::Multiply => a * b,
        BinOp::Divide => a / b,
        BinOp::Modulo => a % b,
        _ => unreachable!("{} is not an arithmetic operator", op),
    };

    let both_integers = matches!(left, Value::Integer(_)) && matches!(right, Value::Integer(_));
    if both_integers && is_whole(result) {
        Ok(Value::Integer(result as i64))
    } else {
        Ok(Value::Float(result))
    }
}

fn exact_integer(op: BinOp, x: i64, y: i64) -> Option<i64> {
    match op {
        BinOp::Add => x.checked_add(y),
        BinOp::Subtract => x.checked_sub(y),
        BinOp::Multiply => x.checked_mul(y),
        BinOp::Divide if x.checked_rem(y)? == 0 => x.checked_div(y),
        BinOp::Modulo => x.checked_rem(y),
        _ => None,
    }
}

/// Finite, without fractional part, and representable as `i64`.
fn is_whole(n: f64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    n.is_finite() && n.fract() == 0.0 && (-LIMIT..LIMIT).contains(&n)
}
