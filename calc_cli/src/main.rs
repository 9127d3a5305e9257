//! # Flexcalc CLI Application
//!
//! Terminal front end for `calc_core`.
//!
//! ```bash
//! calc eval divide 5 2                 # 2.5
//! calc chain 10 add:5 multiply:2       # 30
//! calc --json eval add 5 3             # {"code": "200", "message": "Success", "data": 8}
//! echo '{"operation":"ADD","num1":1,"num2":2}' | calc request
//! calc ops
//! ```
//!
//! Operands accept `i32`/`i64`/`f32`/`f64` suffixes (`7i64`, `1.5f32`).
//! Logging goes to stderr; `-v` raises verbosity and `CALC_LOG` takes an
//! explicit filter such as `CALC_LOG=calc_core=debug`.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use calc_core::service::{parse_request, CalculatorService, Response};
use calc_core::{CalcResult, CalculateRequest, ChainRequest, ChainStep, NumericValue, OperationTag};

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "CALC_LOG";

/// Typed arithmetic calculator with chained evaluation
#[derive(Parser, Debug)]
#[command(name = "calc")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print the JSON response envelope instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply one operation to two operands
    Eval {
        /// ADD, SUBTRACT, MULTIPLY, DIVIDE (any case) or + - * /
        operation: OperationTag,
        /// Left operand
        #[arg(allow_negative_numbers = true)]
        a: NumericValue,
        /// Right operand
        #[arg(allow_negative_numbers = true)]
        b: NumericValue,
    },

    /// Apply steps left to right, starting from INITIAL
    Chain {
        /// Starting value
        #[arg(allow_negative_numbers = true)]
        initial: NumericValue,
        /// Steps written OP:VALUE, e.g. add:5 divide:2.5
        #[arg(value_name = "STEP", allow_hyphen_values = true)]
        steps: Vec<ChainStep>,
    },

    /// Run a JSON request read from FILE, or from stdin when omitted
    Request {
        /// Path to the request body
        file: Option<PathBuf>,
    },

    /// List the registered operations
    Ops,
}

/// What a command produced, before it is printed.
#[derive(Debug, PartialEq)]
enum Outcome {
    Value(CalcResult<NumericValue>),
    Operations(Vec<OperationTag>),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_body(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading request file {}", path.display())),
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body).context("reading request from stdin")?;
            Ok(body)
        }
    }
}

fn execute(command: &Command, service: &CalculatorService) -> Result<Outcome> {
    let outcome = match command {
        Command::Eval { operation, a, b } => {
            debug!(%operation, %a, %b, "eval");
            Outcome::Value(service.calculate(&CalculateRequest::new(*operation, *a, *b)))
        }
        Command::Chain { initial, steps } => {
            debug!(%initial, steps = steps.len(), "chain");
            Outcome::Value(service.calculate_chain(&ChainRequest::new(*initial, steps.clone())))
        }
        Command::Request { file } => {
            let body = read_body(file.as_deref())?;
            Outcome::Value(parse_request(&body).and_then(|request| service.handle(&request)))
        }
        Command::Ops => Outcome::Operations(service.calculator().registry().tags()),
    };
    Ok(outcome)
}

fn report(outcome: Outcome, json: bool) -> Result<ExitCode> {
    match outcome {
        Outcome::Operations(tags) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&Response::success(&tags))?);
            } else {
                for tag in tags {
                    println!("{:<10} {}", tag.name(), tag.symbol());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Value(result) => {
            let code = if result.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE };
            if let Ok(value) = &result {
                info!(kind = %value.kind(), "result");
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&Response::from_result(result))?);
            } else {
                match result {
                    Ok(value) => println!("{}", value),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Ok(code)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let service = CalculatorService::new();
    match execute(&cli.command, &service).and_then(|outcome| report(outcome, cli.json)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
