//! Command-line front end for the calculator.
//!
//! Usage:
//!   zcalc "3+4*2" "(3+4)*2"   Evaluate each argument
//!   zcalc                     Evaluate each non-empty line of stdin

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use zcalc::Config;
use zcalc::calculator::{
    CalcResult, Calculator, DivisionPolicy, copy_to_clipboard, looks_like_expression, to_postfix,
    tokenize,
};

#[derive(Debug, Parser)]
#[command(
    name = "zcalc",
    version,
    about,
    after_help = "Exits with status 1 when any input is invalid or evaluates to infinity or NaN."
)]
struct Cli {
    /// Expressions to evaluate. Lines are read from stdin when none are given.
    expressions: Vec<String>,

    /// Also print the postfix form of each expression.
    #[arg(long)]
    postfix: bool,

    /// Print the token stream instead of evaluating.
    #[arg(long, conflicts_with_all = ["postfix", "json"])]
    tokens: bool,

    /// Division-by-zero handling, overriding the config file.
    #[arg(long, value_enum)]
    division: Option<DivisionPolicy>,

    /// Skip inputs that do not look like arithmetic.
    #[arg(long)]
    filter: bool,

    /// Print one JSON object per input.
    #[arg(long)]
    json: bool,

    /// Copy the last successful result to the clipboard.
    #[arg(long)]
    copy: bool,

    /// Path to the config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Outcome of a batch of inputs.
#[derive(Debug)]
struct Report {
    all_ok: bool,
    last_success: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("zcalc: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load the config, evaluate every input and copy if asked.
/// Returns whether all inputs succeeded.
fn execute(cli: &Cli) -> Result<bool> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    let calc = build_calculator(cli, config);

    let inputs = if cli.expressions.is_empty() {
        read_stdin_lines()?
    } else {
        cli.expressions.clone()
    };

    let report = run(cli, &calc, &inputs, &mut io::stdout().lock())?;

    if cli.copy {
        match report.last_success {
            Some(text) => {
                copy_to_clipboard(&text)?;
                info!(%text, "copied result to clipboard");
            }
            None => warn!("no successful result to copy"),
        }
    }

    Ok(report.all_ok)
}

fn build_calculator(cli: &Cli, mut config: Config) -> Calculator {
    if let Some(division) = cli.division {
        config.division = division;
    }
    Calculator::from_config(&config)
}

fn run(cli: &Cli, calc: &Calculator, inputs: &[String], out: &mut impl Write) -> Result<Report> {
    let mut report = Report {
        all_ok: true,
        last_success: None,
    };

    for input in inputs {
        if cli.filter && !looks_like_expression(input) {
            debug!(%input, "skipping input that is not an expression");
            continue;
        }

        if cli.tokens {
            report.all_ok &= print_tokens(input, out)?;
            continue;
        }

        let result = calc.calculate(input);
        if cli.json {
            print_json(&result, cli.postfix, out)?;
        } else {
            print_result(&result, cli.postfix, out)?;
        }

        if let Some(text) = result.clipboard() {
            report.last_success = Some(text.to_string());
        }
        report.all_ok &= result.is_success();
    }

    Ok(report)
}

fn read_stdin_lines() -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn print_tokens(input: &str, out: &mut impl Write) -> io::Result<bool> {
    match tokenize(input) {
        Ok(tokens) => {
            let rendered: Vec<String> = tokens.iter().map(|tok| tok.elem.to_string()).collect();
            writeln!(out, "{}", rendered.join(" "))?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "Invalid expression: {}", e)?;
            Ok(false)
        }
    }
}

fn print_result(result: &CalcResult, show_postfix: bool, out: &mut impl Write) -> io::Result<()> {
    let expression = result.expression();
    match result {
        CalcResult::Success { .. } => writeln!(out, "{} = {}", expression, result.display())?,
        CalcResult::Error {
            message,
            error: Some(_),
            ..
        } => writeln!(out, "Invalid expression: {}", message)?,
        CalcResult::Error { message, .. } => {
            writeln!(out, "No finite result: {} = {}", expression, message)?
        }
    }

    if show_postfix && let Ok(postfix) = to_postfix(expression) {
        writeln!(out, "  postfix: {}", postfix)?;
    }
    Ok(())
}

fn print_json(result: &CalcResult, show_postfix: bool, out: &mut impl Write) -> Result<()> {
    let mut value = serde_json::to_value(result)?;
    if show_postfix
        && let Ok(postfix) = to_postfix(result.expression())
        && let Some(object) = value.as_object_mut()
    {
        object.insert("postfix".to_string(), postfix.to_string().into());
    }
    writeln!(out, "{}", value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(args: &[&str], inputs: &[&str]) -> (Report, Vec<String>) {
        let argv = std::iter::once("zcalc").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        let calc = build_calculator(&cli, Config::default());
        let inputs: Vec<String> = inputs.iter().map(|s| s.to_string()).collect();

        let mut out = Vec::new();
        let report = run(&cli, &calc, &inputs, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        (report, text.lines().map(str::to_string).collect())
    }

    #[test]
    fn test_all_valid_inputs_succeed() {
        let (report, lines) = run_with(&[], &["3+4*2", "7 / 2"]);
        assert!(report.all_ok);
        assert_eq!(lines, vec!["3+4*2 = 11", "7 / 2 = 3.5"]);
        assert_eq!(report.last_success.as_deref(), Some("3.5"));
    }

    #[test]
    fn test_mixed_inputs_fail_the_batch() {
        let (report, lines) = run_with(&[], &["3+4*2", "3+4)", "1/0"]);
        assert!(!report.all_ok);
        assert_eq!(
            lines,
            vec![
                "3+4*2 = 11",
                "Invalid expression: unmatched ')' at position 3",
                "No finite result: 1/0 = Infinity",
            ]
        );
        assert_eq!(report.last_success.as_deref(), Some("11"));
    }

    #[test]
    fn test_division_flag_overrides_config() {
        let (report, lines) = run_with(&["--division", "error"], &["1/0"]);
        assert!(!report.all_ok);
        assert_eq!(
            lines,
            vec!["Invalid expression: division by zero at position 1"]
        );
    }

    #[test]
    fn test_filter_skips_non_expressions() {
        let (report, lines) = run_with(&["--filter"], &["firefox", "2+2", "42"]);
        assert!(report.all_ok);
        assert_eq!(lines, vec!["2+2 = 4"]);
    }

    #[test]
    fn test_postfix_text_output() {
        let (_, lines) = run_with(&["--postfix"], &["3+4*2"]);
        assert_eq!(lines, vec!["3+4*2 = 11", "  postfix: 3 4 2 * +"]);
    }

    #[test]
    fn test_json_with_postfix() {
        let (report, lines) = run_with(&["--json", "--postfix"], &["(3+4)*2", "3#4"]);
        assert!(!report.all_ok);
        assert_eq!(lines.len(), 2);

        let ok: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(ok["status"], "success");
        assert_eq!(ok["value"], 14.0);
        assert_eq!(ok["postfix"], "3 4 + 2 *");

        let err: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(err["status"], "error");
        assert_eq!(err["message"], "unexpected character '#' at position 1");
        assert!(err.get("postfix").is_none());
    }

    #[test]
    fn test_tokens_output() {
        let (report, lines) = run_with(&["--tokens"], &["3 + 4.5*(2)", "3#"]);
        assert!(!report.all_ok);
        assert_eq!(
            lines,
            vec![
                "3 + 4.5 * ( 2 )",
                "Invalid expression: unexpected character '#' at position 1",
            ]
        );
        assert_eq!(report.last_success, None);
    }

    #[test]
    fn test_tokens_conflicts_with_json() {
        let parsed = Cli::try_parse_from(["zcalc", "--tokens", "--json", "1+1"]);
        assert!(parsed.is_err());
    }
}
