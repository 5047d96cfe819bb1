// tests/parser_tests.rs

use miniexpr::ast::{BinOp, Expr, Number, Token, TokenKind, UnaryOp};
use miniexpr::lexer::{LexError, Lexer};
use miniexpr::parser::{MAX_HEIGHT, MAX_NESTING, ParseError, Parser, parse};

// ============================================================================
// Simple tests
// ============================================================================

#[test]
fn test_number_literals() {
    assert_eq!(
        parse("42").unwrap(),
        Expr::Number {
            value: Number::Integer(42),
            pos: 0
        }
    );
    assert_eq!(
        parse(" 2.5").unwrap(),
        Expr::Number {
            value: Number::Float(2.5),
            pos: 1
        }
    );
    // A trailing dot still makes a float
    assert_eq!(
        parse("5.").unwrap(),
        Expr::Number {
            value: Number::Float(5.0),
            pos: 0
        }
    );
}

#[test]
fn test_string_and_identifier() {
    assert_eq!(
        parse("'yes'").unwrap(),
        Expr::String {
            value: "yes".into(),
            pos: 0
        }
    );
    assert_eq!(
        parse("yes").unwrap(),
        Expr::Identifier {
            name: "yes".into(),
            pos: 0
        }
    );
}

#[test]
fn test_comparison() {
    let expr = parse("price > 100").unwrap();

    assert!(matches!(
        expr,
        Expr::Binary {
            op: BinOp::GreaterThan,
            pos: 6,
            ..
        }
    ));
}

#[test]
fn test_parentheses() {
    let expr = parse("(1 + 2) * 3").unwrap();

    // Should be: Multiply(Add(1, 2), 3)
    match expr {
        Expr::Binary {
            op: BinOp::Multiply,
            left,
            right,
            pos,
        } => {
            assert_eq!(pos, 8);
            assert!(matches!(*left, Expr::Binary { op: BinOp::Add, pos: 3, .. }));
            assert!(matches!(
                *right,
                Expr::Number {
                    value: Number::Integer(3),
                    ..
                }
            ));
        }
        _ => panic!("Expected multiplication"),
    }
}

#[test]
fn test_arithmetic_precedence() {
    let expr = parse("1 + 2 * 3").unwrap();

    // Should be: Add(1, Multiply(2, 3))
    match expr {
        Expr::Binary {
            op: BinOp::Add,
            left,
            right,
            ..
        } => {
            assert!(matches!(
                *left,
                Expr::Number {
                    value: Number::Integer(1),
                    ..
                }
            ));
            assert!(matches!(
                *right,
                Expr::Binary {
                    op: BinOp::Multiply,
                    ..
                }
            ));
        }
        _ => panic!("Expected addition"),
    }
}

#[test]
fn test_left_associativity() {
    // Should be: Subtract(Subtract(10, 3), 2)
    match parse("10 - 3 - 2").unwrap() {
        Expr::Binary {
            op: BinOp::Subtract,
            left,
            right,
            pos,
        } => {
            assert_eq!(pos, 7);
            assert!(matches!(*left, Expr::Binary { op: BinOp::Subtract, pos: 3, .. }));
            assert!(matches!(
                *right,
                Expr::Number {
                    value: Number::Integer(2),
                    ..
                }
            ));
        }
        _ => panic!("Expected subtraction"),
    }
}

// ============================================================================
// Precedence Levels
// ============================================================================

fn top_op(source: &str) -> BinOp {
    match parse(source).unwrap() {
        Expr::Binary { op, .. } => op,
        other => panic!("Expected binary expression for {:?}, got {:?}", source, other),
    }
}

#[test]
fn test_precedence_levels() {
    assert_eq!(top_op("a || b && c"), BinOp::Or);
    assert_eq!(top_op("a && b || c"), BinOp::Or);
    assert_eq!(top_op("a && b == c"), BinOp::And);
    assert_eq!(top_op("a == b < c"), BinOp::Equal);
    assert_eq!(top_op("a < b + c"), BinOp::LessThan);
    assert_eq!(top_op("a + b % c"), BinOp::Add);
    assert_eq!(top_op("a != b"), BinOp::NotEqual);
    assert_eq!(top_op("a <= b"), BinOp::LessEqual);
    assert_eq!(top_op("a >= b"), BinOp::GreaterEqual);
    assert_eq!(top_op("a / b"), BinOp::Divide);
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    match parse("-a * b").unwrap() {
        Expr::Binary {
            op: BinOp::Multiply,
            left,
            ..
        } => assert!(matches!(*left, Expr::Unary { op: UnaryOp::Minus, pos: 0, .. })),
        other => panic!("Expected multiplication, got {:?}", other),
    }
}

#[test]
fn test_nested_unary() {
    match parse("!-+1").unwrap() {
        Expr::Unary {
            op: UnaryOp::Not,
            operand,
            pos: 0,
        } => match *operand {
            Expr::Unary {
                op: UnaryOp::Minus,
                operand,
                pos: 1,
            } => assert!(matches!(*operand, Expr::Unary { op: UnaryOp::Plus, pos: 2, .. })),
            other => panic!("Expected unary minus, got {:?}", other),
        },
        other => panic!("Expected unary not, got {:?}", other),
    }
}

#[test]
fn test_conditional_binds_loosest() {
    match parse("a || b ? 1 : 2").unwrap() {
        Expr::Conditional { condition, .. } => {
            assert!(matches!(*condition, Expr::Binary { op: BinOp::Or, .. }));
        }
        other => panic!("Expected conditional, got {:?}", other),
    }
}

#[test]
fn test_nested_conditional_in_true_branch() {
    match parse("a ? b ? 1 : 2 : 3").unwrap() {
        Expr::Conditional {
            when_true,
            when_false,
            ..
        } => {
            assert!(matches!(*when_true, Expr::Conditional { .. }));
            assert!(matches!(*when_false, Expr::Number { .. }));
        }
        other => panic!("Expected conditional, got {:?}", other),
    }
}

#[test]
fn test_conditional_position_is_condition_position() {
    let expr = parse("  x > 1 ? 'a' : 'b'").unwrap();
    assert_eq!(expr.pos(), 4);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_closing_paren_at_end_of_input() {
    let err = parse("(1 + 2").unwrap_err();
    assert_eq!(
        err,
        ParseError::Expected {
            expected: "')' to close '('",
            offset: 6
        }
    );
    assert_eq!(err.to_string(), "Expected ')' to close '('");
}

#[test]
fn test_missing_closing_paren_before_other_token() {
    let err = parse("(1 + 2 3").unwrap_err();
    assert_eq!(err.offset(), 7);
}

#[test]
fn test_missing_colon() {
    let err = parse("a ? b").unwrap_err();
    assert_eq!(
        err,
        ParseError::Expected {
            expected: "':' in conditional expression",
            offset: 5
        }
    );

    let err = parse("a ? b c").unwrap_err();
    assert_eq!(err.offset(), 6);
}

#[test]
fn test_trailing_tokens() {
    let err = parse("1 2").unwrap_err();
    assert_eq!(
        err,
        ParseError::TrailingToken {
            text: "2".into(),
            offset: 2
        }
    );

    let err = parse("(1))").unwrap_err();
    assert_eq!(err.offset(), 3);
}

#[test]
fn test_unexpected_tokens() {
    let err = parse("").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            text: "end of input".into(),
            offset: 0
        }
    );

    let err = parse("1 + * 2").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            text: "*".into(),
            offset: 4
        }
    );

    assert_eq!(parse("1 +").unwrap_err().offset(), 3);
    assert_eq!(parse(")").unwrap_err().offset(), 0);
}

#[test]
fn test_integer_literal_overflow() {
    let err = parse("1 + 9223372036854775808").unwrap_err();
    assert_eq!(err, ParseError::InvalidNumber { offset: 4 });
    assert_eq!(err.to_string(), "Invalid number literal");

    assert!(parse("9223372036854775807").is_ok());
}

#[test]
fn test_lex_errors_surface_through_parser() {
    let err = Parser::new(Lexer::new("'abc")).err().unwrap();
    assert_eq!(
        err,
        ParseError::Lex(LexError::UnterminatedString { offset: 0 })
    );
    assert_eq!(err.offset(), 0);
}

// ============================================================================
// Nesting limits
// ============================================================================

fn parenthesized(levels: usize) -> String {
    format!("{}1{}", "(".repeat(levels), ")".repeat(levels))
}

fn chain(terms: usize) -> String {
    vec!["1"; terms].join(" + ")
}

#[test]
fn test_nesting_up_to_the_limit_parses() {
    assert!(parse(&parenthesized(MAX_NESTING)).is_ok());
    assert!(parse(&format!("{}1", "-".repeat(MAX_NESTING))).is_ok());
}

#[test]
fn test_deep_parentheses_are_rejected() {
    assert_eq!(
        parse(&parenthesized(MAX_NESTING + 1)).unwrap_err(),
        ParseError::TooDeep { offset: MAX_NESTING }
    );

    let err = parse(&parenthesized(10_000)).unwrap_err();
    assert_eq!(err, ParseError::TooDeep { offset: MAX_NESTING });
    assert_eq!(err.to_string(), "Expression is nested too deeply");
}

#[test]
fn test_deep_prefix_operators_are_rejected() {
    let err = parse(&format!("{}1", "-".repeat(100_000))).unwrap_err();
    assert_eq!(err, ParseError::TooDeep { offset: MAX_NESTING });

    let err = parse(&format!("{}x", "!".repeat(MAX_NESTING + 1))).unwrap_err();
    assert_eq!(err.offset(), MAX_NESTING);
}

#[test]
fn test_deep_conditionals_are_rejected() {
    let nested = |n: usize| format!("{}1{}", "1 ? ".repeat(n), " : 1".repeat(n));

    assert!(parse(&nested(MAX_NESTING)).is_ok());
    // Each `1 ? ` is four characters wide; the offending `?` is the last one
    assert_eq!(
        parse(&nested(MAX_NESTING + 1)).unwrap_err(),
        ParseError::TooDeep {
            offset: 4 * MAX_NESTING + 2
        }
    );
}

#[test]
fn test_long_operator_chains_are_capped() {
    let expr = parse(&chain(MAX_HEIGHT)).unwrap();
    assert_eq!(expr.height(), MAX_HEIGHT);

    // The operator that would make the tree too tall, each term being four characters wide
    assert_eq!(
        parse(&chain(MAX_HEIGHT + 1)).unwrap_err(),
        ParseError::TooDeep {
            offset: 4 * MAX_HEIGHT - 2
        }
    );
    assert!(matches!(
        parse(&chain(100_000)),
        Err(ParseError::TooDeep { .. })
    ));
}

// ============================================================================
// Token input
// ============================================================================

#[test]
fn test_from_tokens_appends_end_of_input() {
    let tokens = vec![
        Token::new(TokenKind::Number, "1", 0),
        Token::new(TokenKind::Plus, "+", 1),
        Token::new(TokenKind::Number, "2", 2),
    ];
    let expr = Parser::from_tokens(tokens).parse_expression().unwrap();
    assert!(matches!(expr, Expr::Binary { op: BinOp::Add, pos: 1, .. }));

    let err = Parser::from_tokens(vec![Token::new(TokenKind::Minus, "-", 0)])
        .parse_expression()
        .unwrap_err();
    assert_eq!(err.offset(), 1);
}
