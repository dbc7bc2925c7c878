// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three ways to use the tool:
// - `user <USERNAME>`: list a user's repositories (like submitting the form)
// - `topic <LANGUAGE>`: list featured repositories for a language (like
//   clicking one of the language buttons)
// - `interactive`: keep a page open and type commands against it
//
// Flags that apply to all three live on the top-level Cli struct with
// `global = true`, so they can be written before or after the subcommand.
// =============================================================================

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "repo-finder",
    version = "0.1.0",
    about = "Search GitHub repositories by user or by language",
    long_about = "repo-finder lists GitHub repositories for a user, or featured repositories for a \
                  language, and shows how many open issues each one has."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the GitHub REST API
    #[arg(long, global = true, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Page that repository links point to (user searches only)
    #[arg(long, global = true, default_value = "./single-repo.html")]
    pub detail_page: String,

    /// Print the fetched repositories as JSON instead of a list
    #[arg(long, global = true)]
    pub json: bool,

    /// Write the final page as HTML to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// HTML file with the language buttons (each with a data-language attribute)
    #[arg(long, global = true, value_name = "PATH")]
    pub buttons: Option<PathBuf>,

    /// When searches overlap, only show the most recent one
    ///
    /// By default every response is painted as it arrives, so an older
    /// search can replace the results of a newer one.
    #[arg(long, global = true)]
    pub latest_only: bool,

    /// More logging (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the public repositories of a GitHub user
    ///
    /// Example: repo-finder user octocat
    User {
        /// GitHub username (surrounding whitespace is ignored)
        username: String,
    },

    /// List featured repositories for a language
    ///
    /// Example: repo-finder topic javascript
    Topic {
        /// Label or data-language value of one of the language buttons
        language: String,
    },

    /// Open a page and enter commands against it
    ///
    /// Commands: submit <username>, click <button>, show, html <path>, quit
    Interactive,
}
