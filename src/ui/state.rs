use std::cell::Cell;
use std::time::Instant;

use chrono::{DateTime, Local};
use unicode_width::UnicodeWidthStr;

use crate::api::{AnalysisRequest, AnalysisResponse, HealthStatus};
use crate::report::RenderedReport;

use super::theme::Theme;

/// Which form field has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Ticker,
    Prompt,
}

impl Field {
    pub fn next(&self) -> Self {
        match self {
            Field::Ticker => Field::Prompt,
            Field::Prompt => Field::Ticker,
        }
    }
}

/// Editable text with a character-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Cursor position as (row, display column) within the raw text.
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.value[..self.byte_index(self.cursor)];
        let row = before.matches('\n').count();
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        (row, before[line_start..].width())
    }
}

/// What the submit key would have done if the form didn't take it over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    FocusNext,
    InsertNewline,
}

/// The key event that asked for a submission.
///
/// [`DeskState::submit`] always prevents the default action before doing
/// anything else, so the key never also edits the form.
#[derive(Debug)]
pub struct SubmitTrigger {
    default_action: DefaultAction,
    default_prevented: bool,
}

impl SubmitTrigger {
    pub fn new(default_action: DefaultAction) -> Self {
        Self {
            default_action,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// The action to perform, unless it was prevented.
    pub fn default_action(&self) -> Option<DefaultAction> {
        (!self.default_prevented).then_some(self.default_action)
    }
}

/// How the last submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Where the analysis lifecycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting { seq: u64 },
    Settled(Outcome),
}

/// Handed out by [`DeskState::submit`]; the caller runs the request and
/// settles with the same `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub seq: u64,
    pub request: AnalysisRequest,
}

/// A finished submission, already rendered on success.
#[derive(Debug)]
pub enum Settlement {
    Success {
        response: AnalysisResponse,
        report: RenderedReport,
    },
    Failure(String),
}

/// Everything the desk screen shows.
///
/// Mutated only through its own handlers, by the event loop.
pub struct DeskState {
    pub ticker: TextInput,
    pub prompt: TextInput,
    pub focus: Field,

    pub loading: bool,
    pub result: String,
    pub error: String,
    pub health: Option<HealthStatus>,

    pub report: Option<RenderedReport>,
    pub report_scroll: usize,
    /// Largest useful `report_scroll`, recorded by the last draw.
    report_max_scroll: Cell<usize>,
    pub session_id: Option<String>,
    pub settled_at: Option<DateTime<Local>>,

    pub api_base: String,
    pub theme: Theme,
    pub tick_count: u64,
    pub status_message: Option<(String, Instant)>,

    phase: Phase,
    seq: u64,
}

impl DeskState {
    pub fn new(api_base: &str, ticker: &str, prompt: &str, theme: Theme) -> Self {
        Self {
            ticker: TextInput::new(ticker),
            prompt: TextInput::new(prompt),
            focus: Field::Ticker,
            loading: false,
            result: String::new(),
            error: String::new(),
            health: None,
            report: None,
            report_scroll: 0,
            report_max_scroll: Cell::new(0),
            session_id: None,
            settled_at: None,
            api_base: api_base.to_string(),
            theme,
            tick_count: 0,
            status_message: None,
            phase: Phase::Idle,
            seq: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            Field::Ticker => &mut self.ticker,
            Field::Prompt => &mut self.prompt,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Start a submission.
    ///
    /// Returns `None` (and changes nothing about the lifecycle) while a
    /// request is already in flight or when a field is blank.
    pub fn submit(&mut self, trigger: &mut SubmitTrigger) -> Option<SubmitTicket> {
        trigger.prevent_default();

        if self.loading {
            return None;
        }

        let Some(request) = AnalysisRequest::new(self.ticker.value(), self.prompt.value()) else {
            self.set_status(t!("form.required").to_string());
            return None;
        };

        self.seq += 1;
        self.phase = Phase::Submitting { seq: self.seq };
        self.loading = true;
        self.result.clear();
        self.error.clear();
        self.report = None;
        self.report_scroll = 0;
        self.session_id = None;

        Some(SubmitTicket {
            seq: self.seq,
            request,
        })
    }

    /// Apply the outcome of submission `seq`.
    ///
    /// Returns `false` and leaves state untouched when `seq` is not the
    /// submission currently in flight.
    pub fn settle(&mut self, seq: u64, settlement: Settlement) -> bool {
        if self.phase != (Phase::Submitting { seq }) {
            return false;
        }

        self.loading = false;
        self.settled_at = Some(Local::now());
        match settlement {
            Settlement::Success { response, report } => {
                self.result = response.content_markdown;
                self.session_id = response.session_id;
                self.report = Some(report);
                self.error.clear();
                self.phase = Phase::Settled(Outcome::Success);
            }
            Settlement::Failure(message) => {
                self.error = message;
                self.result.clear();
                self.report = None;
                self.phase = Phase::Settled(Outcome::Failure);
            }
        }
        true
    }

    /// Record the health probe result. Only the first call has any effect.
    pub fn set_health(&mut self, status: HealthStatus) -> bool {
        if self.health.is_some() {
            return false;
        }
        self.health = Some(status);
        true
    }

    /// Called by the report pane each draw, once it knows the wrapped height.
    pub fn record_report_max_scroll(&self, max_scroll: usize) {
        self.report_max_scroll.set(max_scroll);
    }

    pub fn scroll_report_down(&mut self, lines: usize) {
        self.report_scroll = self
            .report_scroll
            .saturating_add(lines)
            .min(self.report_max_scroll.get());
    }

    pub fn scroll_report_up(&mut self, lines: usize) {
        // A resize may have shrunk the limit since the last scroll.
        self.report_scroll = self
            .report_scroll
            .min(self.report_max_scroll.get())
            .saturating_sub(lines);
    }
}
