//! Terminal dashboard state and navigation logic.

use std::time::{Duration, Instant};

use statusboard_types::Group;

use crate::data::{Board, Entry};
use crate::source::DataSource;
use crate::ui::Theme;

/// The current tab in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Every component, grouped.
    All,
    Bots,
    Websites,
    Discord,
    Other,
}

impl View {
    /// Tab order.
    pub const ALL: [View; 5] = [
        View::All,
        View::Bots,
        View::Websites,
        View::Discord,
        View::Other,
    ];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn index(self) -> usize {
        match self {
            View::All => 0,
            View::Bots => 1,
            View::Websites => 2,
            View::Discord => 3,
            View::Other => 4,
        }
    }

    /// View for a 1-based tab number.
    pub fn from_number(n: u32) -> Option<Self> {
        Self::ALL.get((n as usize).checked_sub(1)?).copied()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::All => "All",
            View::Bots => "Bots",
            View::Websites => "Websites",
            View::Discord => "Discord",
            View::Other => "Other",
        }
    }

    /// The single group this view shows, or `None` for every group.
    pub fn group(&self) -> Option<Group> {
        match self {
            View::All => None,
            View::Bots => Some(Group::Bots),
            View::Websites => Some(Group::Websites),
            View::Discord => Some(Group::DiscordServices),
            View::Other => Some(Group::CustomServices),
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub board: Board,
    pub last_loaded: Option<Instant>,

    // Navigation state
    pub selected_index: usize,

    // UI
    pub title: String,
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from the given data source.
    pub fn new(source: Box<dyn DataSource>, title: impl Into<String>) -> Self {
        Self {
            running: true,
            current_view: View::All,
            show_help: false,
            source,
            board: Board::default(),
            last_loaded: None,
            selected_index: 0,
            title: title.into(),
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < Duration::from_secs(3) => Some(msg),
            _ => None,
        }
    }

    /// Poll the data source. Returns true if a new board was loaded.
    pub fn reload_data(&mut self) -> bool {
        let Some(snapshot) = self.source.poll() else {
            return false;
        };

        self.board = Board::from_snapshot(&snapshot);
        self.last_loaded = Some(Instant::now());
        self.clamp_selection();
        true
    }

    /// Re-read the source even if it looks unchanged.
    pub fn force_reload(&mut self) {
        self.source.reset();
        if self.reload_data() {
            self.set_status_message("Reloaded".to_string());
        }
    }

    /// Entries shown in the current view, in display order.
    pub fn visible_entries(&self) -> Vec<(Group, &Entry)> {
        match self.current_view.group() {
            Some(group) => self.board.group(group).iter().map(|e| (group, e)).collect(),
            None => self.board.entries().collect(),
        }
    }

    /// Number of entries in a tab, for the tab bar.
    pub fn view_count(&self, view: View) -> usize {
        match view.group() {
            Some(group) => self.board.group(group).len(),
            None => self.board.entries().count(),
        }
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.selected_index = 0;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.visible_entries().len().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.visible_entries().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_entries().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Esc: close the help overlay if open, otherwise quit.
    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else {
            self.quit();
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}
