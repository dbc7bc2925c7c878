// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and build the configuration
// 3. Run one search (user / topic) or an interactive session
// 4. Print the page (or the raw records as JSON)
// 5. Exit with proper code (0 = success, 1 = the user was notified of a
//    problem, 2 = unexpected error)
// =============================================================================

mod cli;          // src/cli.rs - command-line parsing
mod config;       // src/config.rs - runtime configuration
mod controller;   // src/controller.rs - form and button handlers
mod error;        // src/error.rs - validation and fetch errors
mod github;       // src/github/ - GitHub API client
mod page;         // src/page/ - the page the results are shown on
mod render;       // src/render.rs - repositories to result-list nodes
mod session;      // src/session.rs - runs searches against the page

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use session::{Notifier, Session, TerminalNotifier};
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = search done, nothing to report
//   Ok(1) = a notification was shown (bad input, unknown user, ...)
//   Err = unexpected or unhandled error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_cli(&cli)?;
    let mut session = Session::new(&config, TerminalNotifier)?;

    execute(&cli.command, &mut session, &config, &mut std::io::stdout()).await
}

// Runs one command against the session, then writes the --html page (if
// asked for) and works out the exit code
async fn execute<W: Write, N: Notifier>(
    command: &Commands,
    session: &mut Session<N>,
    config: &Config,
    stdout: &mut W,
) -> Result<i32> {
    match command {
        Commands::User { username } => {
            let message = format!("🔍 Searching repositories of user: {}", username.trim());
            report(stdout, config, &message)?;
            let pending = session.submit_user(username);
            session.finish(pending).await?;
            print_results(stdout, session, config)?;
        }
        Commands::Topic { language } => {
            let pending = session.click(language);
            if pending.is_some() {
                let message = format!("🔍 Searching featured repositories for: {}", language);
                report(stdout, config, &message)?;
                session.finish(pending).await?;
                print_results(stdout, session, config)?;
            } else {
                let message = format!(
                    "⚠️  No language button matches '{}' (available: {})",
                    language,
                    session.page().buttons().languages().join(", ")
                );
                report(stdout, config, &message)?;
            }
        }
        Commands::Interactive => {
            session.interactive().await?;
        }
    }

    if let Some(path) = &config.html_out {
        session.write_html(path)?;
        report(stdout, config, &format!("📝 Wrote page to {}", path.display()))?;
    }

    if session.notifications() > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Logging goes to stderr so it never mixes with --json output.
// REPO_FINDER_LOG (e.g. "repo_finder=debug") wins over -v.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("REPO_FINDER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("repo_finder={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Status lines for the user. With --json, stdout carries only the JSON,
// so they go to stderr instead.
fn report<W: Write>(out: &mut W, config: &Config, message: &str) -> Result<()> {
    if config.json {
        eprintln!("{}", message);
    } else {
        writeln!(out, "{}", message)?;
    }
    Ok(())
}

// Prints the page, or the painted records as JSON
fn print_results<W: Write, N: Notifier>(out: &mut W, session: &Session<N>, config: &Config) -> Result<()> {
    if config.json {
        // Nothing was painted (notification shown): print an empty array
        let records = session.last_records().unwrap_or_default();
        writeln!(out, "{}", serde_json::to_string_pretty(records)?)?;
    } else {
        write!(out, "{}", session.page().to_terminal())?;
    }
    Ok(())
}
