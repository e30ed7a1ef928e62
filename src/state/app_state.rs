use crate::app::MenuItem;
use crate::state::entry::EntryForm;
use scorebook::{Scorecard, Scorer};

// ---------------------------------------------------------------------------
// Match state: one scorer per innings
// ---------------------------------------------------------------------------

/// The innings of a match in batting order. The last one is live; earlier
/// ones are closed and only viewed.
#[derive(Debug)]
pub struct MatchState {
    pub title: String,
    innings: Vec<Scorer>,
    /// Index of the innings on screen.
    pub viewing: usize,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            title: String::new(),
            innings: vec![Scorer::new()],
            viewing: 0,
        }
    }
}

impl MatchState {
    pub fn live(&self) -> &Scorer {
        // innings is never empty: created with one, only ever pushed to.
        &self.innings[self.innings.len() - 1]
    }

    pub fn live_mut(&mut self) -> &mut Scorer {
        let last = self.innings.len() - 1;
        &mut self.innings[last]
    }

    pub fn live_index(&self) -> usize {
        self.innings.len() - 1
    }

    pub fn viewed(&self) -> &Scorecard {
        self.innings
            .get(self.viewing)
            .unwrap_or_else(|| self.live())
            .card()
    }

    pub fn is_viewing_live(&self) -> bool {
        self.viewing == self.live_index()
    }

    pub fn innings_count(&self) -> usize {
        self.innings.len()
    }

    /// Freeze the live innings and open the next one.
    pub fn close_innings(&mut self) {
        self.live_mut().close();
        self.innings.push(Scorer::new());
        self.viewing = self.live_index();
    }

    pub fn view_prev(&mut self) {
        self.viewing = self.viewing.saturating_sub(1);
    }

    pub fn view_next(&mut self) {
        if self.viewing < self.live_index() {
            self.viewing += 1;
        }
    }

    pub fn view_live(&mut self) {
        self.viewing = self.live_index();
    }
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub game: MatchState,
    pub entry: EntryForm,
    /// A recorded match is being fed in; manual scoring is paused.
    pub replaying: bool,
    pub status: Option<String>,
    pub last_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
