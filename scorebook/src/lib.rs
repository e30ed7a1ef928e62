pub mod cricsheet;
pub mod scorer;

pub use scorer::{ScoreError, ScoreResult, Scorer};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Index;

// ---------------------------------------------------------------------------
// Delivery vocabulary
// ---------------------------------------------------------------------------

/// Extra category of a delivery. Serialized as the scorer's shorthand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Extra {
    #[default]
    #[serde(rename = "")]
    NoExtra,
    #[serde(rename = "w")]
    Wide,
    #[serde(rename = "nb")]
    NoBall,
    #[serde(rename = "b")]
    Bye,
    #[serde(rename = "lb")]
    LegBye,
}

impl Extra {
    pub const ALL: [Extra; 5] = [
        Extra::NoExtra,
        Extra::Wide,
        Extra::NoBall,
        Extra::Bye,
        Extra::LegBye,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Extra::NoExtra => "",
            Extra::Wide => "w",
            Extra::NoBall => "nb",
            Extra::Bye => "b",
            Extra::LegBye => "lb",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Extra::NoExtra => "none",
            Extra::Wide => "wide",
            Extra::NoBall => "no-ball",
            Extra::Bye => "bye",
            Extra::LegBye => "leg-bye",
        }
    }

    /// Wides and no-balls are not part of the over and are charged to the bowler.
    pub fn is_illegal_delivery(&self) -> bool {
        matches!(self, Extra::Wide | Extra::NoBall)
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Extra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Manner of dismissal. `NotOut` doubles as "no wicket on this ball".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HowOut {
    #[default]
    #[serde(rename = "no")]
    NotOut,
    #[serde(rename = "b")]
    Bowled,
    #[serde(rename = "c")]
    Caught,
    #[serde(rename = "lbw")]
    Lbw,
    #[serde(rename = "st")]
    Stumped,
    #[serde(rename = "ro")]
    RunOut,
    #[serde(rename = "other")]
    Other,
}

impl HowOut {
    pub const ALL: [HowOut; 7] = [
        HowOut::NotOut,
        HowOut::Bowled,
        HowOut::Caught,
        HowOut::Lbw,
        HowOut::Stumped,
        HowOut::RunOut,
        HowOut::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            HowOut::NotOut => "no",
            HowOut::Bowled => "b",
            HowOut::Caught => "c",
            HowOut::Lbw => "lbw",
            HowOut::Stumped => "st",
            HowOut::RunOut => "ro",
            HowOut::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HowOut::NotOut => "not out",
            HowOut::Bowled => "bowled",
            HowOut::Caught => "caught",
            HowOut::Lbw => "lbw",
            HowOut::Stumped => "stumped",
            HowOut::RunOut => "run out",
            HowOut::Other => "other",
        }
    }

    /// Dismissals that go into the bowler's wicket column.
    pub fn is_bowler_credited(&self) -> bool {
        matches!(
            self,
            HowOut::Bowled | HowOut::Caught | HowOut::Lbw | HowOut::Stumped
        )
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|h| *h == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|h| *h == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for HowOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Everything that happened on one delivery. Built once, never mutated by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub striker: String,
    pub non_striker: String,
    pub bowler: String,
    pub batter_runs: u16,
    pub extra_type: Extra,
    pub extra_runs: u16,
    pub penalty_runs: u16,
    pub player_out: String,
    pub how_out: HowOut,
    pub fielder: String,
}

impl Ball {
    pub fn total_runs(&self) -> u32 {
        let extras = if self.is_extra() { self.extra_runs } else { 0 };
        u32::from(self.batter_runs) + u32::from(extras) + u32::from(self.penalty_runs)
    }

    /// Runs charged to the bowler: off the bat plus wides and no-balls.
    pub fn bowler_runs(&self) -> u32 {
        let extras = if self.extra_type.is_illegal_delivery() { self.extra_runs } else { 0 };
        u32::from(self.batter_runs) + u32::from(extras)
    }

    pub fn is_extra(&self) -> bool {
        self.extra_type != Extra::NoExtra
    }

    pub fn is_legal(&self) -> bool {
        !self.extra_type.is_illegal_delivery()
    }

    pub fn is_wicket(&self) -> bool {
        !self.player_out.is_empty()
    }
}

impl fmt::Display for Ball {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}: {}", self.bowler, self.striker, self.batter_runs)?;
        if self.is_extra() {
            write!(f, " +{}{}", self.extra_runs, self.extra_type)?;
        }
        if self.penalty_runs > 0 {
            write!(f, " +{}pen", self.penalty_runs)?;
        }
        if self.is_wicket() {
            write!(f, ", {} {}", self.player_out, self.how_out.label())?;
            if !self.fielder.is_empty() {
                write!(f, " ({})", self.fielder)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Shared shape of batting and bowling entries, so both rosters can be kept in
/// one ordered structure.
pub trait Entrant {
    fn enter(name: &str, position: usize) -> Self;
    fn name(&self) -> &str;
    fn position(&self) -> usize;
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Batter {
    pub position: usize,
    pub name: String,
    pub balls: Vec<Ball>,
    pub how_out: HowOut,
    pub fielder: String,
}

impl Batter {
    /// Record a ball faced. Dismisses the batter when they are the one given out.
    pub fn add(&mut self, ball: &Ball) {
        self.balls.push(ball.clone());
        if ball.player_out == self.name {
            self.record_out(ball);
        }
    }

    pub fn record_out(&mut self, ball: &Ball) {
        self.how_out = ball.how_out;
        self.fielder = ball.fielder.clone();
    }

    pub fn balls_faced(&self) -> usize {
        self.balls.len()
    }

    pub fn runs(&self) -> u32 {
        self.balls.iter().map(|b| u32::from(b.batter_runs)).sum()
    }

    pub fn fours(&self) -> usize {
        self.balls.iter().filter(|b| b.batter_runs == 4).count()
    }

    pub fn sixes(&self) -> usize {
        self.balls.iter().filter(|b| b.batter_runs == 6).count()
    }

    pub fn is_out(&self) -> bool {
        self.how_out != HowOut::NotOut
    }

    pub fn strike_rate(&self) -> f64 {
        if self.balls.is_empty() {
            return 0.0;
        }
        f64::from(self.runs()) * 100.0 / self.balls.len() as f64
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {} {} ({})",
            self.name,
            self.how_out,
            self.runs(),
            self.balls_faced()
        )
    }
}

impl Entrant for Batter {
    fn enter(name: &str, position: usize) -> Self {
        Self {
            position,
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> usize {
        self.position
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Bowler {
    pub position: usize,
    pub name: String,
    pub balls: Vec<Ball>,
    pub wickets: u32,
}

impl Bowler {
    /// Record a ball bowled. Only bowled, caught, lbw and stumped count as wickets.
    pub fn add(&mut self, ball: &Ball) {
        self.balls.push(ball.clone());
        if ball.is_wicket() && ball.how_out.is_bowler_credited() {
            self.wickets += 1;
        }
    }

    pub fn balls_bowled(&self) -> usize {
        self.balls.len()
    }

    pub fn legal_balls(&self) -> usize {
        self.balls.iter().filter(|b| b.is_legal()).count()
    }

    pub fn runs(&self) -> u32 {
        self.balls.iter().map(Ball::bowler_runs).sum()
    }

    pub fn fours(&self) -> usize {
        self.balls.iter().filter(|b| b.batter_runs == 4).count()
    }

    pub fn sixes(&self) -> usize {
        self.balls.iter().filter(|b| b.batter_runs == 6).count()
    }

    /// Overs in the usual `overs.balls` notation, e.g. `3.4`.
    pub fn overs(&self, balls_per_over: u8) -> String {
        let per_over = usize::from(balls_per_over.max(1));
        let legal = self.legal_balls();
        format!("{}.{}", legal / per_over, legal % per_over)
    }

    /// Runs conceded per over of `balls_per_over` legal balls.
    pub fn economy(&self, balls_per_over: u8) -> f64 {
        let legal = self.legal_balls();
        if legal == 0 {
            return 0.0;
        }
        f64::from(self.runs()) * f64::from(balls_per_over.max(1)) / legal as f64
    }

    pub fn summary(&self) -> String {
        format!("{} {}-{} ({})", self.name, self.wickets, self.runs(), self.balls_bowled())
    }
}

impl Entrant for Bowler {
    fn enter(name: &str, position: usize) -> Self {
        Self {
            position,
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> usize {
        self.position
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Players in order of first appearance. Position `n` is always entry `n - 1`,
/// since entries are only ever appended.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Order<T> {
    entries: Vec<T>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

pub type BattingOrder = Order<Batter>;
pub type BowlingOrder = Order<Bowler>;

impl<T> Default for Order<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Entrant> Order<T> {
    /// Look a player up by name, entering them at the next position if unseen.
    pub fn add(&mut self, name: &str) -> &mut T {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries.push(T::enter(name, idx + 1));
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx]
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// 1-based lookup, matching the numbering on a printed card.
    pub fn by_position(&self, position: usize) -> Option<&T> {
        self.entries.get(position.checked_sub(1)?)
    }

    /// Exactly `count` slots for display; unfilled positions are `None`.
    pub fn slots(&self, count: usize) -> Vec<Option<&T>> {
        (1..=count).map(|p| self.by_position(p)).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// # Panics
///
/// Panics if nobody named `name` has been entered. Use [`Order::get`] when the
/// name may be missing.
impl<T: Entrant> Index<&str> for Order<T> {
    type Output = T;

    fn index(&self, name: &str) -> &T {
        self.get(name)
            .unwrap_or_else(|| panic!("no entry for {name}"))
    }
}

impl<'a, T> IntoIterator for &'a Order<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Scorecard
// ---------------------------------------------------------------------------

/// Running state of one innings. Mutated only through [`Scorer`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scorecard {
    pub runs: u32,
    pub wickets: u32,
    pub over: u32,
    pub ball: u32,
    pub batters: BattingOrder,
    pub bowlers: BowlingOrder,
    pub extras: BTreeMap<Extra, u32>,
    pub history: Vec<String>,
    pub closed: bool,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fours(&self) -> usize {
        self.batters.iter().map(Batter::fours).sum()
    }

    pub fn sixes(&self) -> usize {
        self.batters.iter().map(Batter::sixes).sum()
    }

    /// `runs/wickets (over.ball)`, the headline score.
    pub fn score(&self) -> String {
        format!("{}/{} ({}.{})", self.runs, self.wickets, self.over, self.ball)
    }

    /// Up to six most recent history lines, newest first.
    pub fn last_six(&self) -> Vec<&str> {
        self.history.iter().rev().take(6).map(String::as_str).collect()
    }

    pub fn extra(&self, kind: Extra) -> u32 {
        self.extras.get(&kind).copied().unwrap_or(0)
    }

    pub fn extras_total(&self) -> u32 {
        self.extras.values().sum()
    }

    pub fn legal_balls(&self) -> usize {
        self.bowlers.iter().map(Bowler::legal_balls).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
