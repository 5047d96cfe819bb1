use clap::{Parser as ClapParser, Subcommand};
use log::debug;
use miniexpr::cli::{self, CheckOptions, CheckResult, CliError, DEMO_EXPRESSIONS};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "miniexpr")]
#[command(about = "miniexpr - evaluate small boolean, arithmetic and string expressions")]
#[command(version)]
struct Cli {
    /// Log evaluation steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression
    Eval {
        /// The expression to evaluate (reads from stdin if not provided)
        expression: Option<String>,

        /// JSON object of variables identifiers resolve against
        #[arg(long)]
        vars: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Evaluate the bundled demonstration expressions
    Demo,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::logger::init(cli.verbose) {
        eprintln!("Could not install logger: {}", e);
    }

    let result = match cli.command {
        Commands::Eval {
            expression,
            vars,
            json,
            syntax_only,
        } => run_eval(expression, vars, json, syntax_only),
        Commands::Demo => {
            run_demo();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_eval(
    expression: Option<String>,
    variables: Option<String>,
    json: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let expression = match expression {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let options = CheckOptions {
        expression,
        variables,
        json,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(output) => println!("{}", output),
    }
    Ok(())
}

fn run_demo() {
    for expression in DEMO_EXPRESSIONS {
        debug!("demo expression: {:?}", expression);
        println!("{}", expression);
        match miniexpr::evaluate(expression) {
            Ok(value) => println!("=> {}\n", value),
            Err(e) => println!("{}\n", e),
        }
    }
}
