mod repl;

use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use course_search_core::SuggestConfig;
use course_search_protocol::RouteType;

pub use repl::ReplCommand;
pub use repl::parse_command;

/// Interactive driver for the course search suggestion box.
///
/// Every stdin line replaces the whole input value. Lines starting with `:`
/// are commands: `:enter`, `:pick N`, `:context course|professor VALUE`,
/// `:context none`, `:clear`, `:sleep MS`, `:quit`. `:sleep` only holds back
/// the next stdin line; suggestions keep rendering and Ctrl-C still exits.
#[derive(Debug, Parser)]
#[command(name = "course-search", version)]
pub struct Cli {
    /// TOML config file (base_url, debounce_ms, min_query_chars, ...).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the suggestion service origin.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the debounce window in milliseconds.
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Course currently on screen, e.g. "CSE 3320".
    #[arg(long)]
    pub course: Option<String>,

    /// Professor currently on screen.
    #[arg(long)]
    pub professor: Option<String>,

    /// Kind of page currently on screen.
    #[arg(long, value_parser = parse_route_type)]
    pub route_type: Option<RouteType>,

    /// Pre-fill the input.
    #[arg(long, default_value = "")]
    pub initial_value: String,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_route_type(raw: &str) -> std::result::Result<RouteType, String> {
    raw.parse()
        .map_err(|_| format!("expected `course` or `professor`, got `{raw}`"))
}

impl Cli {
    pub fn resolve_config(&self) -> Result<SuggestConfig> {
        let mut config = match &self.config {
            Some(path) => SuggestConfig::load(path)
                .with_context(|| format!("load config from {}", path.display()))?,
            None => SuggestConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.debounce_ms = debounce_ms;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    pub async fn run(self) -> Result<()> {
        let config = self.resolve_config()?;
        repl::run(self, config).await
    }
}

/// Logs go to stderr so stdout stays a clean transcript of suggestions and
/// navigations.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("course_search_core=debug,course_search_cli=debug,info")
        } else {
            EnvFilter::new("course_search_core=info,course_search_cli=info,warn")
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
