use crate::ast::{BinOp, UnaryOp};
use crate::value::Value;

/// A numeric literal, integral unless its source text contained a `.`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Integer(i) => Value::Integer(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Every node owns its children and records the source offset used when an
/// error has to be attributed to it. The tree is never mutated after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    ///
    /// # Example
    /// ```text
    /// 42
    /// 2.5
    /// ```
    Number { value: Number, pos: usize },

    /// Quoted string literal, already stripped of its quotes
    ///
    /// # Example
    /// ```text
    /// "hello"
    /// 'yes'
    /// ```
    String { value: String, pos: usize },

    /// Bare identifier
    ///
    /// Resolves against the variable context when bound there. An unbound
    /// identifier is a string constant equal to its own name.
    ///
    /// # Example
    /// ```text
    /// yes
    /// ```
    Identifier { name: String, pos: usize },

    /// Prefix operation, `pos` is the operator offset
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        pos: usize,
    },

    /// Binary operation (arithmetic, comparison, logical), `pos` is the operator offset
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        pos: usize,
    },

    /// `condition ? when_true : when_false`
    ///
    /// Only the selected branch is evaluated.
    Conditional {
        condition: Box<Expr>,
        when_true: Box<Expr>,
        when_false: Box<Expr>,
    },
}

impl Expr {
    /// Source offset attributed to this node.
    ///
    /// A conditional has no token of its own and reports its condition's position.
    pub fn pos(&self) -> usize {
        match self {
            Expr::Number { pos, .. }
            | Expr::String { pos, .. }
            | Expr::Identifier { pos, .. }
            | Expr::Unary { pos, .. }
            | Expr::Binary { pos, .. } => *pos,
            Expr::Conditional { condition, .. } => condition.pos(),
        }
    }

    /// Number of nodes on the longest path from this node down to a leaf.
    ///
    /// Walks the tree with an explicit stack, so it works on trees of any depth.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending = vec![(self, 1)];

        while let Some((expr, depth)) = pending.pop() {
            height = height.max(depth);
            match expr {
                Expr::Number { .. } | Expr::String { .. } | Expr::Identifier { .. } => {}
                Expr::Unary { operand, .. } => pending.push((operand, depth + 1)),
                Expr::Binary { left, right, .. } => {
                    pending.push((left, depth + 1));
                    pending.push((right, depth + 1));
                }
                Expr::Conditional {
                    condition,
                    when_true,
                    when_false,
                } => {
                    pending.push((condition, depth + 1));
                    pending.push((when_true, depth + 1));
                    pending.push((when_false, depth + 1));
                }
            }
        }
        height
    }
}

#[test]
fn test_height() {
    let leaf = || Box::new(Expr::Number {
        value: Number::Integer(1),
        pos: 0,
    });
    assert_eq!(leaf().height(), 1);

    let sum = Expr::Binary {
        op: BinOp::Add,
        left: Box::new(Expr::Unary {
            op: UnaryOp::Minus,
            operand: leaf(),
            pos: 0,
        }),
        right: leaf(),
        pos: 0,
    };
    assert_eq!(sum.height(), 3);
}
