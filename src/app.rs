use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::ReplayEvent;
use chrono::Local;
use log::{info, warn};
use scorebook::{Ball, ScoreResult};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Scoring,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Scoring: every mutation of a card goes through here
    // -----------------------------------------------------------------------

    /// Score the ball on the entry form.
    pub fn add_ball(&mut self) {
        if self.refuse_while_replaying() {
            return;
        }
        let ball = self.state.entry.to_ball();
        match self.apply(ball.clone()) {
            Ok(()) => self.state.entry.after_ball(&ball),
            Err(e) => self.on_error(e.to_string()),
        }
    }

    pub fn over_bowled(&mut self) {
        if self.refuse_while_replaying() {
            return;
        }
        match self.end_over() {
            Ok(()) => self.state.entry.new_over(),
            Err(e) => self.on_error(e.to_string()),
        }
    }

    pub fn swap_strike(&mut self) {
        self.state.entry.swap_ends();
    }

    pub fn close_innings(&mut self) {
        if self.refuse_while_replaying() {
            return;
        }
        self.end_innings();
        self.state.entry = Default::default();
    }

    pub fn on_replay(&mut self, event: ReplayEvent) {
        let result = match event {
            ReplayEvent::Ball(ball) => self.apply(ball),
            ReplayEvent::OverEnd => self.end_over(),
            ReplayEvent::InningsEnd => {
                self.end_innings();
                Ok(())
            }
            ReplayEvent::Finished => {
                self.state.game.live_mut().close();
                self.state.replaying = false;
                self.set_status("Replay finished");
                Ok(())
            }
        };
        if let Err(e) = result {
            warn!("replay step failed: {e}");
            self.on_error(e.to_string());
        }
    }

    /// True once the live over has had its full count of legal balls.
    pub fn over_complete(&self) -> bool {
        let card = self.state.game.live().card();
        !card.closed && card.ball >= u32::from(self.settings.balls_per_over)
    }

    fn apply(&mut self, ball: Ball) -> ScoreResult<()> {
        self.state.game.live_mut().apply(ball)?;
        self.state.last_error = None;
        self.state.game.view_live();
        if self.over_complete() {
            self.set_status("Over complete: F5 to start the next over");
        } else {
            self.state.status = None;
        }
        Ok(())
    }

    fn end_over(&mut self) -> ScoreResult<()> {
        self.state.game.live_mut().over_bowled()?;
        self.state.status = None;
        Ok(())
    }

    fn end_innings(&mut self) {
        let finished = self.state.game.live().card().score();
        self.state.game.close_innings();
        info!("innings {} closed at {finished}", self.state.game.live_index());
        self.set_status(format!("Innings closed at {finished}"));
    }

    fn refuse_while_replaying(&mut self) -> bool {
        if self.state.replaying {
            self.set_status("Replay in progress");
        }
        self.state.replaying
    }

    // -----------------------------------------------------------------------
    // Innings navigation
    // -----------------------------------------------------------------------

    pub fn view_prev_innings(&mut self) {
        self.state.game.view_prev();
    }

    pub fn view_next_innings(&mut self) {
        self.state.game.view_next();
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn toggle_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.exit_help();
        } else {
            self.update_tab(MenuItem::Help);
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let stamp = Local::now().format("%H:%M");
        self.state.status = Some(format!("{stamp} {}", message.into()));
    }
}
