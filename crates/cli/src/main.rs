mod echo;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use decant_core::{FetchConfig, OutputFormat, PageType, Pipeline, SiteRules, fetch_file, fetch_stdin};
use owo_colors::OwoColorize;
use url::Url;

use echo::*;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract the main content of web pages as HTML, Markdown or plain text
#[derive(Parser, Debug)]
#[command(name = "decant")]
#[command(version)]
#[command(about = "Extract the main content of web pages", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (markdown, html, text)
    #[arg(short, long, default_value = "markdown", value_name = "FORMAT")]
    format: OutputFormat,

    /// Page type override (article, forum, weixin)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    page_type: Option<PageType>,

    /// Source URL of a file or stdin input, used for classification and site extractors
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Site rules file (JSON)
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn is_http_url(input: &str) -> bool {
    Url::parse(input).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("decant_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn fetch_config(args: &Args) -> anyhow::Result<FetchConfig> {
    let rules = SiteRules::load_or_default(args.rules.as_deref()).context("Failed to load site rules")?;

    let mut config = FetchConfig { timeout: args.timeout, rules, ..Default::default() };
    if let Some(user_agent) = &args.user_agent {
        config.user_agent = user_agent.clone();
    }
    Ok(config)
}

async fn run(args: Args) -> anyhow::Result<()> {
    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "decant", &mut io::stdout());
        return Ok(());
    }

    let input = args.input.clone().context("INPUT is required")?;

    if args.verbose {
        init_logging();
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let pipeline = Pipeline::new(fetch_config(&args)?).context("Failed to build HTTP client")?;
    let started = Instant::now();
    let mut timings: Vec<(&str, Duration)> = Vec::new();

    let (html, url) = if input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        let html = fetch_stdin().context("Failed to read from stdin")?;
        (html, args.base_url.clone().unwrap_or_default())
    } else if is_http_url(&input) {
        if args.verbose {
            print_step(1, 3, &format!("Fetching from {}", input.bright_white().underline()));
        }
        let page = pipeline.fetch(&input).await.context("Failed to fetch URL")?;
        if args.verbose {
            if page.final_url != page.url {
                print_detail("Redirected to", &page.final_url);
            }
            print_detail("Encoding", page.encoding);
        }
        (page.html, input.clone())
    } else {
        if args.verbose {
            print_step(1, 3, &format!("Reading from file {}", input.bright_white()));
        }
        let html = fetch_file(&input).with_context(|| format!("Failed to read file: {}", input))?;
        (html, args.base_url.clone().unwrap_or_default())
    };
    timings.push(("Input", started.elapsed()));

    if args.verbose {
        print_detail("Size", &format_size(html.len()));
        eprintln!();
        print_step(2, 3, "Extracting main content");
    }

    let extract_started = Instant::now();
    let extraction =
        pipeline.process(&url, &html, args.format, args.page_type).context("Failed to extract content")?;
    timings.push(("Extraction", extract_started.elapsed()));

    if args.verbose {
        print_extraction_details(&extraction);
        print_step(3, 3, "Writing output");
    }

    if extraction.content.trim().is_empty() {
        print_warning("No content extracted");
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &extraction.content)
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None if extraction.content.ends_with('\n') => print!("{}", extraction.content),
        None => println!("{}", extraction.content),
    }

    if args.verbose {
        eprintln!();
        print_timing_summary(started.elapsed(), &timings);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run(Args::parse()).await {
        print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://example.com/a"));
        assert!(is_http_url("http://example.com"));
        assert!(!is_http_url("page.html"));
        assert!(!is_http_url("/tmp/page.html"));
        assert!(!is_http_url("-"));
        assert!(!is_http_url("ftp://example.com/a"));
    }

    #[test]
    fn test_parse_type_and_format() {
        let args = Args::try_parse_from(["decant", "-f", "md", "-t", "forum", "page.html"]).unwrap();
        assert_eq!(args.format, OutputFormat::Markdown);
        assert_eq!(args.page_type, Some(PageType::Forum));

        assert!(Args::try_parse_from(["decant", "-t", "video", "page.html"]).is_err());
        assert!(Args::try_parse_from(["decant", "-f", "pdf", "page.html"]).is_err());
    }

    #[test]
    fn test_input_required_without_completions() {
        assert!(Args::try_parse_from(["decant"]).is_err());
        assert!(Args::try_parse_from(["decant", "--completions", "bash"]).is_ok());
    }
}
