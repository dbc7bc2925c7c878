// src/config.rs
// =============================================================================
// Runtime configuration, collected once from the parsed command line.
//
// clap already merged flags, environment variables and defaults; this file
// only validates the values and turns them into the types the rest of the
// program wants (a parsed Url instead of a String, for example).
// =============================================================================

use crate::cli::Cli;
use crate::page::LanguageButtons;
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use url::Url;

// GitHub refuses API requests without a User-Agent header
pub const USER_AGENT: &str = concat!("repo-finder/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: Url,
    pub detail_page: String,
    pub json: bool,
    pub html_out: Option<PathBuf>,
    pub latest_only: bool,
    pub buttons: LanguageButtons,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let api_base = Url::parse(&cli.api_url)
            .with_context(|| format!("Invalid API URL '{}'", cli.api_url))?;

        // A base like "mailto:x" parses but cannot take path segments
        if api_base.cannot_be_a_base() {
            return Err(anyhow!("API URL cannot be used as a base: {}", cli.api_url));
        }

        let buttons = match &cli.buttons {
            Some(path) => {
                let markup = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read button markup from {}", path.display()))?;
                LanguageButtons::new(markup)
            }
            None => LanguageButtons::default(),
        };

        if buttons.languages().is_empty() {
            return Err(anyhow!("No button with a data-language attribute in the button markup"));
        }

        Ok(Self {
            api_base,
            detail_page: cli.detail_page.clone(),
            json: cli.json,
            html_out: cli.html.clone(),
            latest_only: cli.latest_only,
            buttons,
        })
    }
}

#[cfg(test)]
impl Config {
    // Config pointing at a local fake server
    pub fn for_api(api_base: Url) -> Self {
        Self {
            api_base,
            detail_page: "./single-repo.html".to_string(),
            json: false,
            html_out: None,
            latest_only: false,
            buttons: LanguageButtons::default(),
        }
    }
}
