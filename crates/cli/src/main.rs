use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use article_share_core::{
    ArticleShare, BulletOrder, FetchConfig, HeuristicSummarizer, JsonConfig, PageSource, SummarizerConfig, TextConfig,
    convert_to_json, convert_to_text, record_to_json,
};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod echo;

use echo::{
    format_size, print_article_details, print_banner, print_field, print_info, print_step, print_success,
    print_timing_summary, print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BIN_NAME: &str = "article-share";

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {s}. Valid options: text, json")),
        }
    }
}

/// Extract an article from a web page and draft a summary to share with others
#[derive(Parser, Debug)]
#[command(name = BIN_NAME)]
#[command(version)]
#[command(about = "Extract an article and draft a share summary", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Why you are sharing this article (at least 3 characters)
    #[arg(short, long, value_name = "TEXT", required_unless_present_any = ["extract_only", "completions"])]
    context: Option<String>,

    /// Who the summary is for: technical-team, business-stakeholders, general-audience, or any label
    /// of at least 3 characters
    #[arg(short, long, default_value = "general-audience", value_name = "AUDIENCE")]
    audience: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Print the extracted article without summarizing it
    #[arg(long)]
    extract_only: bool,

    /// Print only the summary, without the page URL
    #[arg(long)]
    no_url: bool,

    /// Bullet ordering (score, document)
    #[arg(long, default_value = "score", value_name = "ORDER")]
    bullet_order: BulletOrder,

    /// Simulated summarizer latency in milliseconds
    #[arg(long, default_value = "0", value_name = "MS")]
    latency_ms: u64,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Args {
    fn fetch_config(&self) -> FetchConfig {
        let mut config = FetchConfig { timeout: self.timeout, ..Default::default() };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }

    fn summarizer(&self) -> HeuristicSummarizer {
        HeuristicSummarizer::with_config(
            SummarizerConfig::builder()
                .bullet_order(self.bullet_order)
                .latency(Duration::from_millis(self.latency_ms))
                .build(),
        )
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), BIN_NAME, &mut io::stdout());
        return Ok(());
    }

    init_tracing(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let input = args.input.as_deref().context("No input given")?;
    let source = PageSource::detect(input).context("Invalid input")?;
    let sharer = ArticleShare::new().fetch_config(args.fetch_config());
    let total_steps = if args.extract_only { 3 } else { 4 };
    let mut timings = Vec::new();

    if args.verbose {
        let message = match &source {
            PageSource::Url(url) => format!("Fetching from {}", url.as_str().bright_white().underline()),
            PageSource::File(path) => format!("Reading from file {}", path.display().bright_white()),
            PageSource::Stdin => "Reading from stdin".to_string(),
        };
        print_step(1, total_steps, &message);
    }

    let started = Instant::now();
    let html = sharer
        .load_html(&source)
        .await
        .with_context(|| format!("Failed to load {input}"))?;
    timings.push(("Load", started.elapsed()));

    if args.verbose {
        print_field("Size", &format_size(html.len()));
        eprintln!();
        print_step(2, total_steps, "Extracting article");
    }

    let started = Instant::now();
    let record = sharer.extract_source(&html, &source).context("Failed to extract article")?;
    timings.push(("Extract", started.elapsed()));

    if args.verbose {
        print_article_details(&record);
    }
    if !record.has_content() {
        print_warning("No readable content found on this page");
    }

    let output = if args.extract_only {
        match args.format {
            OutputFormat::Text => convert_to_text(&record, &TextConfig { include_header: true, line_width: 0 }),
            OutputFormat::Json => record_to_json(&record, true).context("Failed to serialize article")?,
        }
    } else {
        let context = args.context.as_deref().unwrap_or_default();

        if args.verbose {
            print_step(3, total_steps, &format!("Summarizing for {}", args.audience.bright_white()));
        }

        let started = Instant::now();
        let shared = sharer
            .share(record, context, &args.audience, &args.summarizer())
            .await
            .context("Failed to summarize article")?;
        timings.push(("Summarize", started.elapsed()));

        match args.format {
            OutputFormat::Text if args.no_url => shared.summary,
            OutputFormat::Text => shared.share_text,
            OutputFormat::Json => {
                let share_text = (!args.no_url).then_some(shared.share_text.as_str());
                convert_to_json(&shared.article, Some(&shared.summary), share_text, &JsonConfig { pretty: true })
                    .context("Failed to serialize summary")?
            }
        }
    };

    if args.verbose {
        print_step(total_steps, total_steps, "Writing output");
        eprintln!();
        print_timing_summary(&timings);
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{output}");
        }
    }

    Ok(())
}
