use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use begin_lex::{ScanError, Token, scanner};

#[derive(Parser, Debug)]
#[command(name = "begin-lex", about = "Tokenize programs in the begin/end teaching language")]
struct Cli {
    /// Source file to scan (omit for REPL)
    file: Option<PathBuf>,

    /// Token output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Fail if the source has malformed characters or an unterminated comment
    #[arg(long)]
    strict: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_tokens(tokens: &[Token], format: Format) -> Result<()> {
    match format {
        Format::Text => {
            for token in tokens {
                println!("{token}");
            }
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(tokens).context("serialize tokens to JSON")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn report_scan_errors(errors: Vec<ScanError>, name: &str, source: &str) {
    for e in errors {
        let report = miette::Report::new(e.with_source_code(name, source));
        eprintln!("{report:?}");
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let Some(path) = cli.file else {
        begin_lex::repl::run_repl();
        return Ok(());
    };

    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("read source file '{}'", path.display()))?;
    let name = path.display().to_string();

    let (tokens, errors) = scanner::scan_with_diagnostics(&source);
    let error_count = errors.len();

    if cli.strict && error_count > 0 {
        report_scan_errors(errors, &name, &source);
        bail!("{error_count} error(s)");
    }

    print_tokens(&tokens, cli.format)?;
    report_scan_errors(errors, &name, &source);
    Ok(())
}
