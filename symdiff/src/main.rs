//! symdiff CLI entry point.
//!
//! Usage:
//!   symdiff lex <expr>                  (dump tokens)
//!   symdiff parse <expr>                (dump tree)
//!   symdiff diff <expr> [variable]      (simplified derivative, default x)
//!   symdiff simplify <expr>
//!   symdiff eval <expr> [name=value...]

use std::process;

use miette::Report;
use symdiff::{
    differentiate, evaluate, parse_expression, simplify, tokenize, Bindings, Error,
    DEFAULT_VARIABLE,
};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        usage();
    }

    let command = &args[1];
    let source = &args[2];

    match command.as_str() {
        "lex" => match tokenize(source) {
            Ok(tokens) => {
                for token in &tokens {
                    println!("{:?}", token);
                }
            }
            Err(e) => fail(e.into(), source),
        },
        "parse" => {
            let expr = parse_or_exit(source);
            println!("{:#?}", expr);
            println!("{}", expr);
        }
        "diff" => {
            let variable = args.get(3).map(String::as_str).unwrap_or(DEFAULT_VARIABLE);
            let expr = parse_or_exit(source);
            match differentiate(&expr, variable) {
                Ok(d) => println!("d/d{}({}) = {}", variable, source, simplify(&d)),
                Err(e) => fail(e.into(), source),
            }
        }
        "simplify" => {
            let expr = parse_or_exit(source);
            println!("{}", simplify(&expr));
        }
        "eval" => {
            let bindings = match parse_bindings(&args[3..]) {
                Ok(b) => b,
                Err(msg) => {
                    eprintln!("{}", msg);
                    process::exit(64);
                }
            };
            let expr = parse_or_exit(source);
            match evaluate(&expr, &bindings) {
                Ok(value) => println!("{} = {}", source, value),
                Err(e) => fail(e.into(), source),
            }
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            usage();
        }
    }
}

fn usage() -> ! {
    eprintln!("Usage: symdiff <command> <expression> [args...]");
    eprintln!("Commands: lex, parse, diff [variable], simplify, eval [name=value...]");
    process::exit(64);
}

/// Parse an expression, exiting on errors.
fn parse_or_exit(source: &str) -> symdiff::Expr {
    match parse_expression(source) {
        Ok(expr) => expr,
        Err(e) => fail(e, source),
    }
}

/// Render `err` against the input it came from and exit.
fn fail(err: Error, source: &str) -> ! {
    let report = Report::new(err).with_source_code(source.to_string());
    eprintln!("{:?}", report);
    process::exit(65);
}

/// `x=3 y=4.5` into bindings.
fn parse_bindings(pairs: &[String]) -> Result<Bindings, String> {
    let mut bindings = Bindings::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("Expected name=value, got '{}'", pair))?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("Invalid value for {}: '{}'", name.trim(), value.trim()))?;
        bindings.insert(name.trim().to_string(), value);
    }
    Ok(bindings)
}
