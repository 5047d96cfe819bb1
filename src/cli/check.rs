//! Evaluate miniexpr expressions from the command line

use log::debug;

use super::CliError;
use crate::{
    EvalError, Lexer, Parser, Value, Variables,
    convert::{value_to_json, variables_from_json},
    evaluate_with,
};

/// Expressions evaluated by `miniexpr demo`.
pub const DEMO_EXPRESSIONS: [&str; 4] = [
    "1 >= 0 && yes == 'yes'",
    "1 + 1 >= 2 ? yes : no",
    "(1 + 4) * 5 >= (100 * 100) ? '(1 + 4) * 5 = ' + (1 + 4) * 5 : no",
    "(1 + 4) * 5 <= (100 * 1000) ? 'yes: (1 + 4) * 5 = ' + (1 + 4) * 5: no",
];

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The expression to evaluate
    pub expression: String,
    /// JSON object with the variables identifiers resolve against
    pub variables: Option<String>,
    /// Render the result as JSON instead of its canonical text
    pub json: bool,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Expression evaluated successfully, rendered for output
    Success(String),
}

/// Execute a miniexpr eval operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expression = options.expression.trim_end_matches(['\n', '\r']);
    if expression.trim().is_empty() {
        return Err(CliError::NoInput);
    }
    debug!("expression: {:?}", expression);

    if options.syntax_only {
        Parser::new(Lexer::new(expression))
            .and_then(|mut parser| parser.parse_expression())
            .map_err(|e| EvalError::from(e).with_source(expression))?;
        debug!("syntax valid");
        return Ok(CheckResult::SyntaxValid);
    }

    let variables = match &options.variables {
        Some(json) => variables_from_json(json)?,
        None => Variables::new(),
    };
    debug!("{} variable(s) bound", variables.len());

    let value = evaluate_with(expression, &variables).inspect_err(|e| {
        debug!("evaluation failed with {} at offset {}", e.kind(), e.offset());
    })?;
    debug!("evaluated to {}", value.type_name());

    Ok(CheckResult::Success(render(value, options.json)?))
}

fn render(value: Value, json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string(&value_to_json(value))?)
    } else {
        Ok(value.to_string())
    }
}
