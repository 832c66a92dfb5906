use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tmtrace::{FaError, Pipeline, Token, TraceLoader, Verdict};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tokenize every trace in a file
    Lex(TraceArgs),
    /// Tokenize every trace in a file and verify its steps
    Verify(TraceArgs),
}

#[derive(Args)]
struct TraceArgs {
    /// File containing one trace per line
    tracefile: PathBuf,

    /// Warn about every transition the automata cannot perform
    #[clap(short, long)]
    verbose: bool,

    /// Print one JSON object per trace
    #[clap(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();

    let cli = Cli::parse();
    let (args, verify) = match cli.command {
        Command::Lex(args) => (args, false),
        Command::Verify(args) => (args, true),
    };

    let traces = TraceLoader::load_traces(&args.tracefile)?;
    let mut pipeline = Pipeline::new(args.verbose).context("failed to build automata")?;
    let mut failures = 0;

    for trace in &traces {
        let result = if verify {
            pipeline.process(trace).map(|report| (report.tokens, Some(report.verdict)))
        } else {
            pipeline.lex(trace).map(|tokens| (tokens, None))
        };

        if result.is_err() {
            failures += 1;
        }
        println!("{}", render(trace, &result, args.json)?);
    }

    if failures > 0 {
        anyhow::bail!("{} of {} traces could not be lexed", failures, traces.len());
    }

    Ok(())
}

type Outcome = Result<(Vec<Token>, Option<Verdict>), FaError>;

/// Renders the stdout report for one trace. A lex failure is reported here only.
fn render(trace: &str, outcome: &Outcome, json: bool) -> serde_json::Result<String> {
    let output = match (outcome, json) {
        (Ok((tokens, verdict)), true) => {
            let mut value = serde_json::json!({ "trace": trace, "tokens": tokens });
            if let Some(verdict) = verdict {
                value["verdict"] = serde_json::to_value(verdict)?;
                value["valid"] = verdict.is_accepted().into();
            }
            value.to_string()
        }
        (Ok((tokens, verdict)), false) => {
            let mut lines = vec![
                format!("Trace : \"{}\"", trace),
                format!("Lexer : {}", format_tokens(tokens)),
            ];
            if let Some(verdict) = verdict {
                lines.push(format!("Verify: {}", verdict.is_accepted()));
            }
            lines.join("\n")
        }
        (Err(e), true) => serde_json::json!({ "trace": trace, "error": e.to_string() }).to_string(),
        (Err(e), false) => format!("Trace : \"{}\"\nError : {}", trace, e),
    };

    Ok(output)
}

fn format_tokens(tokens: &[Token]) -> String {
    let tokens = tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<String>>()
        .join(", ");

    format!("[{}]", tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tmtrace::TokenKind;

    fn lex_failure() -> Outcome {
        Err(FaError::NoTransition {
            state: "START".to_string(),
            character: '?',
        })
    }

    #[test]
    fn test_render_lex_failure_once() {
        let output = render("-a ?", &lex_failure(), false).unwrap();

        assert_eq!(
            output,
            "Trace : \"-a ?\"\nError : State 'START' has no transition for token '?'"
        );
        assert_eq!(output.matches("Error :").count(), 1);
    }

    #[test]
    fn test_render_lex_failure_json() {
        let output = render("-a ?", &lex_failure(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["trace"], "-a ?");
        assert!(value["error"].as_str().unwrap().contains('?'));
    }

    #[test]
    fn test_render_verified_trace() {
        let mut pipeline = Pipeline::new(false).unwrap();
        let report = pipeline.process("-a +b >").unwrap();
        let outcome: Outcome = Ok((report.tokens, Some(report.verdict)));

        let output = render("-a +b >", &outcome, false).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Trace : \"-a +b >\"");
        assert!(lines[1].starts_with("Lexer : [(\"-\", READ)"));
        assert_eq!(lines[2], "Verify: true");
    }

    #[test]
    fn test_render_lexed_trace() {
        let outcome: Outcome = Ok((vec![Token::new("q1", TokenKind::Symbol)], None));
        let output = render("q1", &outcome, false).unwrap();

        assert_eq!(output, "Trace : \"q1\"\nLexer : [(\"q1\", SYMBOL)]");
    }
}
