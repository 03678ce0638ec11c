use anyhow::Context;
use clap::Parser;
use neardup::aggregate::GroupOrder;
use neardup::engine::SimilarityEngine;
use neardup::logging::{self, Profile};
use neardup::report::{self, ReportFormat, ReportOpts, ReportOutcome};
use neardup::source;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "neardup", version, about = "Find log lines that differ by exactly one word")]
struct Cli {
    /// Input files (`-` for stdin). May be repeated; defaults to stdin.
    #[arg(required = false)]
    input: Vec<String>,

    /// Write the report here instead of stdout
    #[arg(long = "output", short = 'o')]
    output: Option<PathBuf>,

    /// Report format: text | json
    #[arg(long = "format", default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Group order: first-match | key
    #[arg(long = "order", default_value = "first-match", value_parser = ["first-match", "key"])]
    order: String,

    /// Log format on stderr: pretty | json
    #[arg(long = "log-format", default_value = "pretty", value_parser = ["pretty", "json"])]
    log_format: String,

    /// Debug logging on stderr
    #[arg(long = "verbose", short = 'v', default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let profile = match (cli.log_format.as_str(), cli.verbose) {
        ("json", _) => Profile::Json,
        (_, true) => Profile::Verbose,
        _ => Profile::Quiet,
    };
    logging::init(profile);

    let reads_stdin = cli.input.is_empty() || cli.input.iter().any(|p| p == source::STDIN);
    if reads_stdin && atty::is(atty::Stream::Stdin) {
        tracing::warn!("reading lines from a terminal; end input with Ctrl-D");
    }

    let lines = source::read_all_lines(&cli.input).context("reading input")?;

    let mut engine = SimilarityEngine::new();
    engine.ingest(&lines);
    let analysis = engine.finish();

    let opts = ReportOpts {
        format: match cli.format.as_str() {
            "json" => ReportFormat::Json,
            _ => ReportFormat::Text,
        },
        order: match cli.order.as_str() {
            "key" => GroupOrder::Key,
            _ => GroupOrder::FirstMatch,
        },
    };

    let output = cli.output.as_deref();
    let outcome = report::write_with_diagnostics(
        || match output {
            Some(path) => report::write_report_to_path(path, &analysis, &opts),
            None => report::write_report(&mut io::stdout().lock(), &analysis, &opts),
        },
        &mut io::stderr().lock(),
        &analysis.unparsable,
    )
    .with_context(|| match output {
        Some(path) => format!("writing report to {}", path.display()),
        None => "writing report to stdout".to_string(),
    })?;

    match outcome {
        ReportOutcome::NoMatches => eprintln!("No match was found"),
        ReportOutcome::Written { groups } => {
            if let Some(path) = output {
                tracing::info!(groups, path = %path.display(), "report written");
            }
        }
    }
    Ok(())
}
