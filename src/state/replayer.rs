use crate::state::messages::{ReplayEvent, UiEvent};
use log::{debug, info};
use scorebook::cricsheet::{Delivery, Match};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Feeds a recorded match into the UI one delivery per tick, as if it were
/// being scored live.
pub struct Replayer {
    script: Vec<ReplayEvent>,
    ui_events: mpsc::Sender<UiEvent>,
    tick: Duration,
}

impl Replayer {
    pub fn new(game: &Match, ui_events: mpsc::Sender<UiEvent>, tick: Duration) -> Self {
        Self {
            script: script(game),
            ui_events,
            tick,
        }
    }

    pub async fn run(self) {
        let mut ticker = interval(self.tick);
        // Skip the immediate first tick so the empty card is drawn first.
        ticker.tick().await;

        info!("replaying {} events", self.script.len());
        for event in self.script {
            ticker.tick().await;
            debug!("replay: {event:?}");
            if self.ui_events.send(UiEvent::Replay(event)).await.is_err() {
                break;
            }
        }
    }
}

/// Flatten a match into scorer steps: every delivery, an over end after each
/// over, an innings end between innings and a final marker.
pub fn script(game: &Match) -> Vec<ReplayEvent> {
    let mut events = Vec::new();
    for (i, innings) in game.innings.iter().enumerate() {
        if i > 0 {
            events.push(ReplayEvent::InningsEnd);
        }
        for over in &innings.overs {
            events.extend(over.deliveries.iter().map(Delivery::to_ball).map(ReplayEvent::Ball));
            events.push(ReplayEvent::OverEnd);
        }
    }
    events.push(ReplayEvent::Finished);
    events
}
