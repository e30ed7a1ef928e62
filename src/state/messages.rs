use crossterm::event::KeyEvent;
use scorebook::Ball;

/// One step of a recorded match being fed back through the scorer.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayEvent {
    Ball(Ball),
    OverEnd,
    InningsEnd,
    Finished,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    Replay(ReplayEvent),
}
