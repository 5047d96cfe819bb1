#![cfg(feature = "cli")]

use miniexpr::cli::{CheckOptions, CheckResult, CliError, DEMO_EXPRESSIONS, execute_check};
use miniexpr::{ErrorKind, Value, convert, evaluate};

fn options(expression: &str) -> CheckOptions {
    CheckOptions {
        expression: expression.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_evaluates_to_canonical_text() {
    let result = execute_check(&options("(1 + 4) * 5")).unwrap();
    assert_eq!(result, CheckResult::Success("25".into()));

    let result = execute_check(&options("10 / 4")).unwrap();
    assert_eq!(result, CheckResult::Success("2.5".into()));

    let result = execute_check(&options("1 + 1 >= 2 ? yes : no")).unwrap();
    assert_eq!(result, CheckResult::Success("yes".into()));
}

#[test]
fn test_json_output() {
    let opts = CheckOptions {
        json: true,
        ..options("1 + 1 >= 2 ? 'yes' : 'no'")
    };
    assert_eq!(execute_check(&opts).unwrap(), CheckResult::Success("\"yes\"".into()));

    let opts = CheckOptions {
        json: true,
        ..options("2.0 * 2")
    };
    assert_eq!(execute_check(&opts).unwrap(), CheckResult::Success("4.0".into()));

    let opts = CheckOptions {
        json: true,
        ..options("5 % 0")
    };
    assert_eq!(execute_check(&opts).unwrap(), CheckResult::Success("null".into()));
}

#[test]
fn test_variables_from_json() {
    let opts = CheckOptions {
        variables: Some(r#"{"age": 20, "ratio": 0.5, "name": "ada"}"#.into()),
        ..options("age >= 18 ? name + ' ' + age * ratio : minor")
    };
    assert_eq!(
        execute_check(&opts).unwrap(),
        CheckResult::Success("ada 10.0".into())
    );
}

#[test]
fn test_syntax_only_does_not_evaluate() {
    let opts = CheckOptions {
        syntax_only: true,
        ..options("1 / 0")
    };
    assert_eq!(execute_check(&opts).unwrap(), CheckResult::SyntaxValid);

    let opts = CheckOptions {
        syntax_only: true,
        ..options("(1 / 0")
    };
    match execute_check(&opts) {
        Err(CliError::Eval(e)) => {
            assert_eq!(e.kind(), ErrorKind::Parse);
            assert_eq!(e.offset(), 6);
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_errors_keep_source_snippet() {
    match execute_check(&options("1 / 0\n")) {
        Err(CliError::Eval(e)) => {
            assert_eq!(e.to_string(), "Division by zero at index 3\n1 / 0\n  ^");
        }
        other => panic!("Expected evaluation error, got {:?}", other),
    }
}

#[test]
fn test_empty_expression() {
    assert!(matches!(execute_check(&options("  \n")), Err(CliError::NoInput)));
}

#[test]
fn test_invalid_variables() {
    let opts = CheckOptions {
        variables: Some("[1, 2]".into()),
        ..options("1")
    };
    assert!(matches!(
        execute_check(&opts),
        Err(CliError::Variables(convert::ConvertError::NotAnObject("array")))
    ));

    let opts = CheckOptions {
        variables: Some(r#"{"xs": [1]}"#.into()),
        ..options("1")
    };
    let err = execute_check(&opts).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid variables: Variable 'xs' holds an unsupported array; only scalars are allowed"
    );

    let opts = CheckOptions {
        variables: Some("{".into()),
        ..options("1")
    };
    assert!(matches!(
        execute_check(&opts),
        Err(CliError::Variables(convert::ConvertError::Json(_)))
    ));
}

#[test]
fn test_demo_expressions() {
    let results: Vec<Value> = DEMO_EXPRESSIONS
        .iter()
        .map(|e| evaluate(e).unwrap())
        .collect();
    assert_eq!(
        results,
        vec![
            Value::Boolean(true),
            Value::String("yes".into()),
            Value::String("no".into()),
            Value::String("yes: (1 + 4) * 5 = 25".into()),
        ]
    );
}

#[test]
fn test_json_conversion() {
    assert_eq!(
        convert::json_to_value(serde_json::json!(1.5)),
        Some(Value::Float(1.5))
    );
    assert_eq!(
        convert::json_to_value(serde_json::json!(u64::MAX)),
        Some(Value::Float(u64::MAX as f64))
    );
    assert_eq!(convert::json_to_value(serde_json::json!({})), None);
    assert_eq!(
        convert::value_to_json(Value::Integer(-3)),
        serde_json::json!(-3)
    );
}
