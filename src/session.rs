// src/session.rs
// =============================================================================
// The session owns the page and carries out what the controllers decide.
//
// How a search flows through here:
// 1. A controller returns a list of Effects
// 2. `Dispatch` spawns the fetch as a tokio task and hands back a Pending
//    future; effects after it (clearing the list or the input) run right
//    away, before the response exists
// 3. When the Pending future resolves, `complete()` paints the page,
//    shows a notification, or returns the unhandled error
//
// Searches are never cancelled. If two overlap, both responses are applied
// in arrival order, so the older search can win. With `latest_only` set,
// responses from anything but the most recent search are dropped instead.
//
// Rust concepts:
// - Traits: Notifier lets tests record messages instead of printing them
// - BoxFuture: a type-erased future we can store in FuturesUnordered
// - tokio::select!: wait on stdin and on running searches at the same time
// =============================================================================

use crate::config::Config;
use crate::controller::{self, Completion, Effect, SearchContext, SearchKind};
use crate::error::FetchError;
use crate::github::{GithubClient, RepositoryRecord};
use crate::page::Page;
use crate::render::{self, RenderOptions};
use anyhow::{anyhow, Context, Result};
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinError;
use tracing::{debug, trace, warn};

// Something that can show the user a blocking message
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

// Prints notifications to stderr so they never end up in --json output
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("⚠️  {}", message);
    }
}

// A fetch that has finished (or whose task panicked)
#[derive(Debug)]
pub struct Finished {
    id: u64,
    context: SearchContext,
    result: Result<Result<Vec<RepositoryRecord>, FetchError>, JoinError>,
}

pub type Pending = BoxFuture<'static, Finished>;

pub struct Session<N: Notifier> {
    page: Page,
    client: GithubClient,
    notifier: N,
    detail_page: String,
    latest_only: bool,
    next_id: u64,
    latest: Option<u64>,
    notifications: usize,
    last_records: Option<Vec<RepositoryRecord>>,
}

impl<N: Notifier> Session<N> {
    pub fn new(config: &Config, notifier: N) -> Result<Self> {
        let client = GithubClient::new(config.api_base.clone())
            .context("Failed to create HTTP client")?;

        Ok(Self {
            page: Page::new(config.buttons.clone()),
            client,
            notifier,
            detail_page: config.detail_page.clone(),
            latest_only: config.latest_only,
            next_id: 0,
            latest: None,
            notifications: 0,
            last_records: None,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    // How many notifications were shown so far
    pub fn notifications(&self) -> usize {
        self.notifications
    }

    // Records from the most recent painted search
    pub fn last_records(&self) -> Option<&[RepositoryRecord]> {
        self.last_records.as_deref()
    }

    // Types `raw` into the username field and submits the form
    pub fn submit_user(&mut self, raw: &str) -> Option<Pending> {
        self.page.type_input(raw);
        let effects = controller::on_submit_user(self.page.input());
        self.run_effects(effects)
    }

    // Clicks the language button labelled `clicked`
    pub fn click(&mut self, clicked: &str) -> Option<Pending> {
        let language = self.page.buttons().target_language(clicked);
        if language.is_none() {
            debug!(clicked, "click did not hit a language button");
        }
        let effects = controller::on_select_topic(language.as_deref());
        self.run_effects(effects)
    }

    fn run_effects(&mut self, effects: Vec<Effect>) -> Option<Pending> {
        let mut pending = None;

        for effect in effects {
            match effect {
                Effect::PreventDefault => trace!("form submission handled in place"),
                Effect::Dispatch(context) => pending = Some(self.dispatch(context)),
                Effect::ClearResults => self.page.clear_results(),
                Effect::ClearInput => self.page.clear_input(),
                Effect::Notify(message) => self.notify(&message),
            }
        }

        pending
    }

    fn dispatch(&mut self, context: SearchContext) -> Pending {
        self.next_id += 1;
        let id = self.next_id;
        self.latest = Some(id);

        debug!(id, kind = %context.kind, term = %context.term, "dispatching search");

        let client = self.client.clone();
        let term = context.term.clone();
        let handle = match context.kind {
            SearchKind::User => tokio::spawn(async move { client.fetch_by_user(&term).await }),
            SearchKind::Topic => tokio::spawn(async move { client.fetch_by_topic(&term).await }),
        };

        async move {
            Finished {
                id,
                context,
                result: handle.await,
            }
        }
        .boxed()
    }

    // Applies a finished fetch to the page
    //
    // Returns Err only for failures nobody handles (a broken response body,
    // a lost connection on a topic search, a panicked task).
    pub fn complete(&mut self, finished: Finished) -> Result<()> {
        let Finished { id, context, result } = finished;

        if self.latest_only && self.latest != Some(id) {
            warn!(id, kind = %context.kind, term = %context.term, "dropping response of a superseded search");
            return Ok(());
        }

        let result = result.map_err(|e| anyhow!("search task failed: {}", e))?;

        match controller::on_fetch_complete(context.clone(), result) {
            Completion::Paint { records, term, linkable } => {
                debug!(id, count = records.len(), "painting results");
                let options = RenderOptions {
                    linkable,
                    detail_page: self.detail_page.clone(),
                };
                self.page.paint(render::render(&records, &term, &options));
                self.last_records = Some(records);
                Ok(())
            }
            Completion::Notify(message) => {
                self.notify(&message);
                Ok(())
            }
            Completion::Unhandled(e) => Err(anyhow::Error::new(e)
                .context(format!("{} search for '{}' failed", context.kind, context.term))),
        }
    }

    // Waits for one dispatched search (if any) and applies it
    pub async fn finish(&mut self, pending: Option<Pending>) -> Result<()> {
        match pending {
            Some(pending) => {
                let finished = pending.await;
                self.complete(finished)
            }
            None => Ok(()),
        }
    }

    fn notify(&mut self, message: &str) {
        self.notifications += 1;
        self.notifier.alert(message);
    }

    pub fn write_html(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.page.to_html())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    // Reads commands from stdin until `quit` or end of input
    pub async fn interactive(&mut self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.run_commands(stdin, &mut std::io::stdout()).await
    }

    // Searches keep running while new commands are typed. At end of input
    // we wait for the ones still running; `quit` leaves immediately.
    //
    // A failed command (an unwritable html path, an unhandled search error)
    // is reported on stderr and the loop goes on with the next command.
    pub async fn run_commands<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let mut in_flight: FuturesUnordered<Pending> = FuturesUnordered::new();

        writeln!(out, "Commands: submit <username>, click <button>, show, html <path>, quit")?;
        writeln!(out, "Buttons: {}", self.page.buttons().languages().join(", "))?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read from stdin")? else {
                        break;
                    };
                    match parse_command(&line) {
                        Command::Submit(raw) => in_flight.extend(self.submit_user(raw)),
                        Command::Click(target) => in_flight.extend(self.click(target)),
                        Command::Show => write!(out, "{}", self.page.to_terminal())?,
                        Command::Html(path) => match self.write_html(Path::new(path)) {
                            Ok(()) => writeln!(out, "📝 Wrote {}", path)?,
                            Err(e) => eprintln!("Error: {:#}", e),
                        },
                        Command::Quit => return Ok(()),
                        Command::Empty => {}
                        Command::Unknown(text) => writeln!(out, "Unknown command: {}", text)?,
                    }
                }
                Some(finished) = in_flight.next(), if !in_flight.is_empty() => {
                    self.complete_and_show(finished, out)?;
                }
            }
        }

        while let Some(finished) = in_flight.next().await {
            self.complete_and_show(finished, out)?;
        }

        Ok(())
    }

    // The page stays usable after an unhandled failure, so it is only logged
    fn complete_and_show<W: Write>(&mut self, finished: Finished, out: &mut W) -> Result<()> {
        match self.complete(finished) {
            Ok(()) => write!(out, "{}", self.page.to_terminal())?,
            Err(e) => eprintln!("Error: {:#}", e),
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Submit(&'a str),
    Click(&'a str),
    Show,
    Html(&'a str),
    Quit,
    Empty,
    Unknown(&'a str),
}

// One line of interactive input
//
// The submit argument is passed through untrimmed: trimming and validation
// belong to the form handler.
pub fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    match word {
        "" => Command::Empty,
        "submit" => Command::Submit(rest),
        "click" => Command::Click(rest.trim()),
        "show" => Command::Show,
        "html" if !rest.trim().is_empty() => Command::Html(rest.trim()),
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(trimmed),
    }
}
