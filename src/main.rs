//! # Tickerdesk - Terminal Client for a Stock Analysis Service
//!
//! Sends a ticker and a free-form prompt to an analysis service, shows
//! whether the service is reachable, and renders the markdown report it
//! returns.

#[macro_use]
extern crate rust_i18n;

// Load locale files from `locales/` directory, default to English
i18n!("locales", fallback = "en");

mod api;
mod app;
mod config;
pub mod constants;
mod headless;
mod logging;
mod report;
mod ui;
mod utils;

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use config::{Config, FixedSource};
use constants::{log_file_path, LANGUAGES};
use logging::LogTarget;
use report::MarkdownCapability;

/// Tickerdesk - ask an analysis service about a stock
#[derive(Parser, Debug)]
#[command(name = "tickerdesk", version, about = "A terminal client for a stock analysis service")]
struct Cli {
    /// Service base URL (overrides API_BASE and the config file)
    #[arg(long, value_name = "URL")]
    api_base: Option<String>,

    /// Ticker to pre-fill (or to analyze in headless mode)
    #[arg(long, short = 'k')]
    ticker: Option<String>,

    /// Prompt to pre-fill (or to send in headless mode)
    #[arg(long, short = 'p')]
    prompt: Option<String>,

    /// Show reports as literal text, never as markdown
    #[arg(long)]
    plain: bool,

    /// Run one analysis without the TUI and print the report on stdout
    #[arg(long)]
    headless: bool,

    /// In headless mode, print rendered HTML instead of the raw report
    #[arg(long)]
    html: bool,

    /// Color theme (default, gruvbox, nord, catppuccin, dracula, solarized)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// UI language (en, pt)
    #[arg(long, short = 'l', value_name = "LANG")]
    lang: Option<String>,

    /// Log file for interactive sessions
    #[arg(long, value_name = "PATH")]
    log_file: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // No terminal to draw on: fall back to headless output
    let interactive = !cli.headless && std::io::stdout().is_terminal();

    logging::init(if interactive {
        LogTarget::File(cli.log_file.clone().unwrap_or_else(log_file_path))
    } else {
        LogTarget::Stderr
    });

    // Load and apply CLI overrides to config
    let mut config = Config::load();
    if let Some(ref base) = cli.api_base {
        config.api_base = config::resolve(&FixedSource::new(base.as_str()));
    }
    if let Some(ref ticker) = cli.ticker {
        config.default_ticker = ticker.clone();
    }
    if let Some(ref prompt) = cli.prompt {
        config.default_prompt = prompt.clone();
    }
    if let Some(ref theme_name) = cli.theme {
        config.theme = theme_name.clone();
    }
    if let Some(ref lang) = cli.lang {
        config.lang = lang.clone();
    }

    // Set UI language (CLI > config > default "en")
    let lang = if LANGUAGES.contains(&config.lang.as_str()) {
        config.lang.as_str()
    } else {
        "en"
    };
    rust_i18n::set_locale(lang);

    if !cli.headless && !interactive {
        eprintln!("{}", t!("app.no_terminal"));
    }

    let capability = MarkdownCapability::detect(config.markdown, cli.plain);
    info!(api_base = %config.api_base, ?capability, interactive, "starting");

    if interactive {
        let mut app = app::App::new(&config, capability);
        app.run().await
    } else {
        let output = if cli.html {
            headless::Output::Html
        } else {
            headless::Output::Raw
        };
        headless::run(&config, capability, output).await
    }
}
