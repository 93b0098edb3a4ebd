//! Interactive lazy list
//!
//! The terminal stands in for a scrolling page: typing a line sets the search
//! term, an empty line means "the last row is on screen" (the proximity
//! signal), and `:q` closes the view. Events reach the view through an
//! `mpsc` channel, so the driver is exercised in tests without a terminal.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use countries_core::browse::{plan_facets, BrowseSession, Page};
use countries_core::catalog::{Catalog, FetchGate, FetchTicket};
use countries_core::detail::format_population;
use countries_core::loader::{LoaderConfig, CHUNK_SIZE, INITIAL_CHUNK};
use countries_core::FetchError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::api::CountriesClient;
use crate::prelude::{eprintln, *};

#[derive(Debug, clap::Args, Clone)]
pub struct BrowseOptions {
    /// Only countries in this region (e.g. "Europe")
    #[arg(short, long)]
    pub region: Option<String>,

    /// Only countries speaking this language (e.g. "Spanish")
    #[arg(short = 'L', long)]
    pub language: Option<String>,

    /// Rows shown before the first growth step
    #[arg(long, env = "COUNTRIES_INITIAL_CHUNK", default_value_t = INITIAL_CHUNK)]
    pub initial_chunk: usize,

    /// Rows added per growth step
    #[arg(long, env = "COUNTRIES_CHUNK_SIZE", default_value_t = CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Delay before a growth step is applied, in milliseconds (0 disables it)
    #[arg(long, env = "COUNTRIES_SETTLE_MS", default_value = "1300")]
    pub settle_ms: u64,
}

impl BrowseOptions {
    /// Loader settings, rejecting chunk sizes that would never show a row.
    pub fn loader_config(&self) -> Result<LoaderConfig, Error> {
        if self.initial_chunk == 0 {
            return Err(Error::InvalidArgument(
                "--initial-chunk must be at least 1".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(Error::InvalidArgument(
                "--chunk-size must be at least 1".to_string(),
            ));
        }

        Ok(LoaderConfig {
            initial_chunk: self.initial_chunk,
            chunk_size: self.chunk_size,
            settle_delay: Duration::from_millis(self.settle_ms),
        })
    }
}

/// Input to a running view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The search box changed.
    Search(String),
    /// The last rendered row came into view.
    Proximity,
    /// Mount again: fetch a fresh catalog.
    Reload,
    /// Tear the view down.
    Close,
}

/// Map one line of terminal input to a view event.
pub fn parse_event(line: &str) -> ViewEvent {
    match line.trim() {
        "" => ViewEvent::Proximity,
        ":q" | ":quit" => ViewEvent::Close,
        ":r" | ":reload" => ViewEvent::Reload,
        ":c" | ":clear" => ViewEvent::Search(String::new()),
        term => ViewEvent::Search(term.to_string()),
    }
}

pub trait Renderer {
    fn loading(&mut self) {}
    fn loading_more(&mut self) {}
    fn render(&mut self, page: &Page<'_>);
    fn error(&mut self, error: &FetchError);
}

/// Run one view until it is closed or its event source ends.
///
/// `fetch` is called once on mount and again for every [`ViewEvent::Reload`].
/// Only the newest fetch may publish its catalog; anything arriving after
/// teardown is dropped. Returns the disposed session and the renderer.
pub async fn run_view<F, Fut, R>(
    mut session: BrowseSession,
    fetch: F,
    mut events: mpsc::Receiver<ViewEvent>,
    mut renderer: R,
) -> (BrowseSession, R)
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Catalog, FetchError>> + Send + 'static,
    R: Renderer,
{
    let settle_delay = session.loader().config().settle_delay;
    let (loaded_tx, mut loaded_rx) =
        mpsc::channel::<(FetchTicket, Result<Catalog, FetchError>)>(4);
    let mut gate = FetchGate::default();

    let start_fetch = |gate: &mut FetchGate| {
        let ticket = gate.issue();
        let tx = loaded_tx.clone();
        let request = fetch();
        tokio::spawn(async move {
            let result = request.await;
            // The view may be gone already; nobody to tell.
            let _ = tx.send((ticket, result)).await;
        });
    };

    renderer.loading();
    start_fetch(&mut gate);

    let settle = tokio::time::sleep(settle_delay);
    tokio::pin!(settle);
    let mut pending = None;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                None | Some(ViewEvent::Close) => break,
                Some(ViewEvent::Search(term)) => {
                    if session.set_term(&term) {
                        log::debug!("search term changed to {term:?}");
                        pending = None;
                        renderer.render(&session.page());
                    }
                }
                Some(ViewEvent::Proximity) => {
                    if let Some(ticket) = session.on_proximity() {
                        log::debug!("growth step scheduled in {settle_delay:?}");
                        pending = Some(ticket);
                        settle.as_mut().reset(tokio::time::Instant::now() + settle_delay);
                        renderer.loading_more();
                    }
                }
                Some(ViewEvent::Reload) => {
                    pending = None;
                    renderer.loading();
                    start_fetch(&mut gate);
                }
            },
            Some((ticket, result)) = loaded_rx.recv() => {
                if !gate.accepts(ticket) {
                    log::debug!("discarding stale catalog response");
                    continue;
                }
                pending = None;
                match result {
                    Ok(catalog) => {
                        session.load(catalog);
                        renderer.render(&session.page());
                    }
                    Err(err) => {
                        renderer.error(&err);
                        session.fail(err);
                    }
                }
            }
            () = &mut settle, if pending.is_some() => {
                if let Some(ticket) = pending.take() {
                    if session.complete_growth(ticket) {
                        log::debug!("visible count grew to {}", session.loader().visible_count());
                        renderer.render(&session.page());
                    }
                }
            }
        }
    }

    gate.close();
    session.dispose();
    (session, renderer)
}

/// Prints only the rows that were not on screen yet.
pub struct TerminalRenderer<W: Write> {
    out: W,
    term: Option<String>,
    printed: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            term: None,
            printed: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            log::warn!("failed to write to terminal: {err}");
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn loading(&mut self) {
        self.write(&f!("{}\n", "Loading countries...".bright_black()));
        self.term = None;
    }

    fn loading_more(&mut self) {
        self.write(&f!("{}\n", "Loading more...".bright_black()));
    }

    fn render(&mut self, page: &Page<'_>) {
        let text = format_page_update(page, self.term.as_deref(), self.printed);
        self.write(&text);
        self.term = Some(page.term.to_string());
        self.printed = page.shown.len();
    }

    fn error(&mut self, error: &FetchError) {
        self.write(&f!("{} {}\n", "Error loading data:".red().bold(), error));
    }
}

/// Text for a page, given what the terminal already shows.
///
/// A new term (or first render) prints a header and every shown row; the same
/// term only appends rows past `already_printed`.
pub fn format_page_update(
    page: &Page<'_>,
    previous_term: Option<&str>,
    already_printed: usize,
) -> String {
    let mut result = String::new();
    let fresh = previous_term != Some(page.term);
    let start = if fresh { 0 } else { already_printed.min(page.shown.len()) };

    if fresh {
        let title = if page.term.is_empty() {
            "ALL COUNTRIES".to_string()
        } else {
            f!("SEARCH: \"{}\"", page.term)
        };
        result.push_str(&f!("\n{}\n", title.bright_cyan().bold()));
        result.push_str(&f!("{}\n", "=".repeat(RULE_WIDTH).bright_cyan()));
    }

    if page.shown.is_empty() {
        let message = if page.term.is_empty() {
            "No countries to show.".to_string()
        } else {
            f!("No countries match \"{}\".", page.term)
        };
        result.push_str(&f!("{}\n", message.yellow()));
        return result;
    }

    for (idx, country) in page.shown.iter().enumerate().skip(start) {
        result.push_str(&f!(
            "{:>4}  {}  {}  {}\n",
            f!("{}.", idx + 1).yellow(),
            country.display_name().white().bold(),
            country.region.as_deref().unwrap_or("-").green(),
            format_population(country.population).bright_black()
        ));
    }

    if page.has_more {
        result.push_str(&f!(
            "{}\n",
            f!(
                "-- {} of {} shown. Press Enter for more, type to search, :q to quit --",
                page.shown.len(),
                page.total_matches
            )
            .bright_yellow()
        ));
    } else {
        result.push_str(&f!("{}\n", "-- End of the list --".bright_yellow()));
    }

    result
}

fn spawn_stdin_events(tx: mpsc::Sender<ViewEvent>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let event = parse_event(&line);
                    let close = event == ViewEvent::Close;
                    if tx.send(event).await.is_err() || close {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    log::warn!("failed to read stdin: {err}");
                    break;
                }
            }
        }
    });
}

pub async fn run(options: BrowseOptions, global: crate::Global) -> Result<()> {
    let config = options.loader_config()?;
    let client = CountriesClient::from_global(&global)?;
    let (query, facets) = plan_facets(options.region.as_deref(), options.language.as_deref());

    if global.verbose {
        eprintln!("API base: {}", client.api_base());
        eprintln!("Browsing {}", query.describe());
    }

    let session = BrowseSession::new(config, facets);
    let (tx, rx) = mpsc::channel(16);
    spawn_stdin_events(tx);

    let fetch = || {
        let client = client.clone();
        let query = query.clone();
        async move { client.load_catalog(&query).await }
    };

    let renderer = TerminalRenderer::new(anstream::stdout());
    let (session, _) = run_view(session, fetch, rx, renderer).await;

    if let Some(err) = session.error() {
        return Err(eyre!("{err}"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use countries_core::browse::Facets;
    use countries_core::country::Country;
    use countries_core::loader::LoaderState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    #[derive(Default)]
    struct Recorder {
        renders: Vec<(String, usize, bool)>,
        loading_more: usize,
        errors: Vec<FetchError>,
    }

    impl Renderer for Recorder {
        fn loading_more(&mut self) {
            self.loading_more += 1;
        }

        fn render(&mut self, page: &Page<'_>) {
            self.renders
                .push((page.term.to_string(), page.shown.len(), page.has_more));
        }

        fn error(&mut self, error: &FetchError) {
            self.errors.push(error.clone());
        }
    }

    fn numbered_catalog(count: usize) -> Catalog {
        Catalog::from_records(
            (0..count)
                .map(|i| Country::named(&format!("Country {i:02}")))
                .collect(),
        )
    }

    fn session(settle_ms: u64) -> BrowseSession {
        BrowseSession::new(
            LoaderConfig {
                settle_delay: Duration::from_millis(settle_ms),
                ..LoaderConfig::default()
            },
            Facets::default(),
        )
    }

    fn fixed(count: usize) -> impl Fn() -> std::future::Ready<Result<Catalog, FetchError>> {
        move || std::future::ready(Ok(numbered_catalog(count)))
    }

    #[test]
    fn test_parse_event() {
        assert_eq!(parse_event(""), ViewEvent::Proximity);
        assert_eq!(parse_event("\n"), ViewEvent::Proximity);
        assert_eq!(parse_event(":q"), ViewEvent::Close);
        assert_eq!(parse_event(":reload"), ViewEvent::Reload);
        assert_eq!(parse_event(":clear"), ViewEvent::Search(String::new()));
        assert_eq!(parse_event("chi\n"), ViewEvent::Search("chi".to_string()));
        assert_eq!(
            parse_event("  new zea  "),
            ViewEvent::Search("new zea".to_string())
        );
    }

    fn options(initial_chunk: usize, chunk_size: usize) -> BrowseOptions {
        BrowseOptions {
            region: None,
            language: None,
            initial_chunk,
            chunk_size,
            settle_ms: 250,
        }
    }

    #[test]
    fn test_loader_config_from_options() {
        let config = options(10, 5).loader_config().unwrap();

        assert_eq!(config.initial_chunk, 10);
        assert_eq!(config.chunk_size, 5);
        assert_eq!(config.settle_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_loader_config_rejects_empty_chunks() {
        let initial = options(0, 20).loader_config().unwrap_err();
        let chunk = options(20, 0).loader_config().unwrap_err();

        assert!(initial.to_string().contains("--initial-chunk"));
        assert!(chunk.to_string().contains("--chunk-size"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_growth_steps_after_settle_delay() {
        let (tx, rx) = mpsc::channel(8);

        let driver = async {
            sleep(Duration::from_millis(10)).await;
            tx.send(ViewEvent::Proximity).await.unwrap();
            sleep(Duration::from_millis(1500)).await;
            tx.send(ViewEvent::Proximity).await.unwrap();
            sleep(Duration::from_millis(1500)).await;
            tx.send(ViewEvent::Proximity).await.unwrap();
            sleep(Duration::from_millis(1500)).await;
            tx.send(ViewEvent::Close).await.unwrap();
        };

        let ((session, recorder), ()) = tokio::join!(
            run_view(session(1300), fixed(45), rx, Recorder::default()),
            driver
        );

        let sizes: Vec<(usize, bool)> = recorder.renders.iter().map(|r| (r.1, r.2)).collect();
        assert_eq!(sizes, vec![(20, true), (40, true), (45, false)]);
        assert_eq!(recorder.loading_more, 2);
        assert_eq!(session.loader().visible_count(), 45);
        assert_eq!(session.loader().state(), LoaderState::Exhausted);
        assert!(session.loader().is_disposed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_proximity_applies_one_step() {
        let (tx, rx) = mpsc::channel(8);

        let driver = async {
            sleep(Duration::from_millis(10)).await;
            tx.send(ViewEvent::Proximity).await.unwrap();
            tx.send(ViewEvent::Proximity).await.unwrap();
            sleep(Duration::from_millis(100)).await;
            tx.send(ViewEvent::Proximity).await.unwrap();
            sleep(Duration::from_millis(2000)).await;
            tx.send(ViewEvent::Close).await.unwrap();
        };

        let ((session, recorder), ()) = tokio::join!(
            run_view(session(1300), fixed(100), rx, Recorder::default()),
            driver
        );

        assert_eq!(recorder.loading_more, 1);
        assert_eq!(session.loader().visible_count(), 40);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_during_pending_growth_resets() {
        let (tx, rx) = mpsc::channel(8);

        let driver = async {
            sleep(Duration::from_millis(10)).await;
            tx.send(ViewEvent::Proximity).await.unwrap();
            sleep(Duration::from_millis(500)).await;
            tx.send(ViewEvent::Search("country".to_string()))
                .await
                .unwrap();
            sleep(Duration::from_millis(2000)).await;
            tx.send(ViewEvent::Close).await.unwrap();
        };

        let ((session, recorder), ()) = tokio::join!(
            run_view(session(1300), fixed(100), rx, Recorder::default()),
            driver
        );

        assert_eq!(session.loader().visible_count(), INITIAL_CHUNK);
        assert_eq!(
            recorder.renders.last(),
            Some(&("country".to_string(), 20, true))
        );
        assert_eq!(recorder.renders.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_pending_growth() {
        let (tx, rx) = mpsc::channel(8);

        let driver = async {
            sleep(Duration::from_millis(10)).await;
            tx.send(ViewEvent::Proximity).await.unwrap();
            tx.send(ViewEvent::Close).await.unwrap();
        };

        let ((session, recorder), ()) = tokio::join!(
            run_view(session(1300), fixed(100), rx, Recorder::default()),
            driver
        );
        sleep(Duration::from_millis(3000)).await;

        assert_eq!(session.loader().visible_count(), INITIAL_CHUNK);
        assert!(session.loader().is_disposed());
        assert_eq!(recorder.renders.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_sets_error_state() {
        let (tx, rx) = mpsc::channel(8);

        let fetch =
            || std::future::ready(Err::<Catalog, _>(FetchError::NotFound("Atlantis".to_string())));
        let driver = async {
            sleep(Duration::from_millis(10)).await;
            tx.send(ViewEvent::Proximity).await.unwrap();
            tx.send(ViewEvent::Close).await.unwrap();
        };

        let ((session, recorder), ()) =
            tokio::join!(run_view(session(0), fetch, rx, Recorder::default()), driver);

        assert_eq!(
            recorder.errors,
            vec![FetchError::NotFound("Atlantis".to_string())]
        );
        assert_eq!(
            session.error(),
            Some(&FetchError::NotFound("Atlantis".to_string()))
        );
        assert!(session.catalog().is_empty());
        assert_eq!(recorder.loading_more, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reload_last_request_wins() {
        let (tx, rx) = mpsc::channel(8);
        let calls = Arc::new(AtomicUsize::new(0));

        // First (mount) fetch is slow and small, the reload is fast and large.
        let fetch = {
            let calls = calls.clone();
            move || {
                let call = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if call == 0 {
                        sleep(Duration::from_millis(1000)).await;
                        Ok::<_, FetchError>(numbered_catalog(3))
                    } else {
                        Ok(numbered_catalog(45))
                    }
                }
            }
        };
        let driver = async {
            sleep(Duration::from_millis(10)).await;
            tx.send(ViewEvent::Reload).await.unwrap();
            sleep(Duration::from_millis(2000)).await;
            tx.send(ViewEvent::Close).await.unwrap();
        };

        let ((session, recorder), ()) =
            tokio::join!(run_view(session(0), fetch, rx, Recorder::default()), driver);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(session.catalog().len(), 45);
        assert_eq!(recorder.renders, vec![(String::new(), 20, true)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_event_source_tears_down() {
        let (tx, rx) = mpsc::channel(8);
        drop(tx);

        let (session, _) = run_view(session(0), fixed(5), rx, Recorder::default()).await;

        assert!(session.loader().is_disposed());
    }

    #[test]
    fn test_format_page_update_fresh_and_incremental() {
        let catalog = numbered_catalog(45);
        let mut session = session(0);
        session.load(catalog);

        let first = format_page_update(&session.page(), None, 0);
        assert!(first.contains("ALL COUNTRIES"));
        assert!(first.contains("Country 00"));
        assert!(first.contains("Country 19"));
        assert!(!first.contains("Country 20"));
        assert!(first.contains("20 of 45 shown"));

        let ticket = session.on_proximity().unwrap();
        session.complete_growth(ticket);
        let second = format_page_update(&session.page(), Some(""), 20);
        assert!(!second.contains("ALL COUNTRIES"));
        assert!(!second.contains("Country 19"));
        assert!(second.contains("Country 20"));
        assert!(second.contains("Country 39"));
    }

    #[test]
    fn test_format_page_update_end_and_empty() {
        let mut session = session(0);
        session.load(numbered_catalog(3));

        let text = format_page_update(&session.page(), None, 0);
        assert!(text.contains("End of the list"));

        session.set_term("atlantis");
        let text = format_page_update(&session.page(), Some(""), 3);
        assert!(text.contains("SEARCH: \"atlantis\""));
        assert!(text.contains("No countries match \"atlantis\""));
    }

    #[test]
    fn test_terminal_renderer_writes_rows() {
        let mut session = session(0);
        session.load(numbered_catalog(2));
        let mut renderer = TerminalRenderer::new(Vec::new());

        renderer.render(&session.page());
        renderer.error(&FetchError::Network("offline".to_string()));

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains("Country 00"));
        assert!(out.contains("Country 01"));
        assert!(out.contains("offline"));
    }
}
