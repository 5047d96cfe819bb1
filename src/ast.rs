//! # miniexpr - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) of
//! miniexpr, a small expression language for rule engines, templates and
//! conditional configuration.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, identifiers, operations, conditionals)
//! - **[operators]** - Unary and binary operators
//!
//! ## Quick Start
//!
//! ```text
//! 1 + 1 >= 2 ? 'yes' : 'no'
//! ```
//!
//! This expression evaluates to the text `yes`.
//!
//! ## Precedence
//!
//! From lowest to highest binding:
//!
//! | Level          | Operators              | Associativity |
//! |----------------|------------------------|---------------|
//! | conditional    | `? :`                  | right         |
//! | logical or     | `\|\|`                 | left          |
//! | logical and    | `&&`                   | left          |
//! | equality       | `==` `!=`              | left          |
//! | relational     | `>` `>=` `<` `<=`      | left          |
//! | additive       | `+` `-`                | left          |
//! | multiplicative | `*` `/` `%`            | left          |
//! | unary          | `!` `+` `-`            | prefix        |
//!
//! ### Type System
//!
//! Values are integers, floats, text, booleans and null. Arithmetic keeps
//! integer results when both operands are integers and the result is whole.
//! `&&` and `||` always evaluate both sides; only the conditional skips the
//! branch it does not take.
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, Number};
pub use operators::{BinOp, UnaryOp};
pub use tokens::{Token, TokenKind};
