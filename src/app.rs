//! Application struct and event loop.
//!
//! Owns the terminal, the desk state, the service clients and the channels
//! their tasks report back on.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{health, AnalysisClient, AnalysisError, AnalysisResponse, HealthProber, HealthStatus};
use crate::config::Config;
use crate::constants::*;
use crate::report::{MarkdownCapability, ReportRenderer};
use crate::ui::{self, DefaultAction, DeskState, Field, Settlement, SubmitTicket, SubmitTrigger, Theme};

/// Result of one analysis task, tagged with its submission number.
#[derive(Debug)]
pub struct AnalysisEvent {
    pub seq: u64,
    pub result: Result<AnalysisResponse, AnalysisError>,
}

/// Main application struct.
pub struct App {
    state: DeskState,
    client: AnalysisClient,
    renderer: ReportRenderer,
    /// Taken on mount; the probe runs once per session.
    prober: Option<HealthProber>,

    // Channels
    health_tx: mpsc::UnboundedSender<HealthStatus>,
    health_rx: mpsc::UnboundedReceiver<HealthStatus>,
    analysis_tx: mpsc::UnboundedSender<AnalysisEvent>,
    analysis_rx: mpsc::UnboundedReceiver<AnalysisEvent>,
}

impl App {
    pub fn new(config: &Config, capability: MarkdownCapability) -> Self {
        let theme = Theme::resolve(&config.theme);
        let renderer = ReportRenderer::new(capability, &theme);
        let state = DeskState::new(
            &config.api_base,
            &config.default_ticker,
            &config.default_prompt,
            theme,
        );

        let (health_tx, health_rx) = mpsc::unbounded_channel();
        let (analysis_tx, analysis_rx) = mpsc::unbounded_channel();

        Self {
            state,
            client: build_client(config),
            renderer,
            prober: Some(build_prober(config)),
            health_tx,
            health_rx,
            analysis_tx,
            analysis_rx,
        }
    }

    /// Run the main event loop. Returns when the user quits.
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        self.mount();
        let result = self.event_loop(&mut terminal);

        // Restore the terminal even if the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Fire the one health probe of this session.
    fn mount(&mut self) {
        if let Some(prober) = self.prober.take() {
            info!(api_base = %self.state.api_base, "mounted, probing service health");
            health::spawn_probe(prober, self.health_tx.clone());
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            self.drain_health_events();
            self.drain_analysis_events();

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        return Ok(()); // quit requested
                    }
                }
            }

            self.state.tick_count = self.state.tick_count.wrapping_add(1);
        }
    }

    // ── Channel draining ─────────────────────────────────────────

    fn drain_health_events(&mut self) {
        while let Ok(status) = self.health_rx.try_recv() {
            if self.state.set_health(status) {
                info!(?status, "health probe result");
            }
        }
    }

    fn drain_analysis_events(&mut self) {
        while let Ok(event) = self.analysis_rx.try_recv() {
            let settlement = self.settlement_for(event.result);
            if !self.state.settle(event.seq, settlement) {
                debug!(seq = event.seq, "discarding stale analysis result");
            }
        }
    }

    fn settlement_for(&self, result: Result<AnalysisResponse, AnalysisError>) -> Settlement {
        match result {
            Ok(response) => {
                info!(bytes = response.content_markdown.len(), "analysis succeeded");
                let report = self.renderer.render(&response.content_markdown);
                Settlement::Success { response, report }
            }
            Err(e) => {
                warn!(status = ?e.status(), error = %e, "analysis failed");
                Settlement::Failure(e.to_string())
            }
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────

    fn dispatch_analysis(&self, ticket: SubmitTicket) {
        let client = self.client.clone();
        let tx = self.analysis_tx.clone();

        tokio::spawn(async move {
            let result = client.submit(&ticket.request).await;
            let _ = tx.send(AnalysisEvent {
                seq: ticket.seq,
                result,
            });
        });
    }

    // ── Key handling ─────────────────────────────────────────────

    /// Handle one key press. Returns `true` when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return true,

            KeyCode::Enter if alt => {
                if self.state.focus == Field::Prompt {
                    self.state.prompt.insert('\n');
                }
            }
            KeyCode::Enter => self.on_submit(),

            KeyCode::Tab | KeyCode::BackTab => self.state.focus_next(),

            KeyCode::Char('u') if ctrl => self.state.focused_input().clear(),
            KeyCode::Char(c) if !ctrl => self.state.focused_input().insert(c),
            KeyCode::Backspace => self.state.focused_input().backspace(),
            KeyCode::Delete => self.state.focused_input().delete(),
            KeyCode::Left => self.state.focused_input().move_left(),
            KeyCode::Right => self.state.focused_input().move_right(),
            KeyCode::Home => self.state.focused_input().move_home(),
            KeyCode::End => self.state.focused_input().move_end(),

            KeyCode::Up => self.state.scroll_report_up(1),
            KeyCode::Down => self.state.scroll_report_down(1),
            KeyCode::PageUp => self.state.scroll_report_up(REPORT_PAGE_STEP),
            KeyCode::PageDown => self.state.scroll_report_down(REPORT_PAGE_STEP),
            _ => {}
        }
        false
    }

    fn on_submit(&mut self) {
        let default_action = match self.state.focus {
            Field::Ticker => DefaultAction::FocusNext,
            Field::Prompt => DefaultAction::InsertNewline,
        };
        let mut trigger = SubmitTrigger::new(default_action);

        if let Some(ticket) = self.state.submit(&mut trigger) {
            debug!(seq = ticket.seq, ticker = %ticket.request.ticker, "submission started");
            self.dispatch_analysis(ticket);
        }

        match trigger.default_action() {
            Some(DefaultAction::FocusNext) => self.state.focus_next(),
            Some(DefaultAction::InsertNewline) => self.state.prompt.insert('\n'),
            None => {}
        }
    }
}

/// Analysis request timeout; `0` in the config means none.
pub fn request_timeout(config: &Config) -> Option<Duration> {
    (config.request_timeout_secs > 0).then(|| Duration::from_secs(config.request_timeout_secs))
}

pub fn build_client(config: &Config) -> AnalysisClient {
    AnalysisClient::new(&config.api_base, request_timeout(config))
}

pub fn build_prober(config: &Config) -> HealthProber {
    HealthProber::new(
        &config.api_base,
        Duration::from_secs(config.health_timeout_secs),
    )
}
