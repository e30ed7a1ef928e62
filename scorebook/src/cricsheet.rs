//! Wire types for cricsheet-style match files, and the mapping from a recorded
//! delivery to a [`Ball`]. The scorer itself never sees this format.
use crate::scorer::{ScoreError, ScoreResult};
use crate::{Ball, Extra, HowOut};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Match {
    pub meta: Meta,
    pub info: Info,
    pub innings: Vec<Innings>,
}

impl Match {
    pub fn from_json(json: &str) -> ScoreResult<Self> {
        serde_json::from_str(json).map_err(|e| ScoreError::Parsing(e, "match json".into()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ScoreResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content =
            std::fs::read_to_string(path).map_err(|e| ScoreError::Io(e, display.clone()))?;
        serde_json::from_str(&content).map_err(|e| ScoreError::Parsing(e, display))
    }

    pub fn innings(&self, innings_no: usize) -> ScoreResult<&Innings> {
        self.innings.get(innings_no).ok_or_else(|| {
            ScoreError::NotFound(format!(
                "innings {} (match has {})",
                innings_no + 1,
                self.innings.len()
            ))
        })
    }

    pub fn overs(&self, innings_no: usize) -> ScoreResult<&[Over]> {
        Ok(&self.innings(innings_no)?.overs)
    }

    /// Every delivery of an innings, in the order it was bowled.
    pub fn balls(&self, innings_no: usize) -> ScoreResult<impl Iterator<Item = Ball> + '_> {
        Ok(self
            .overs(innings_no)?
            .iter()
            .flat_map(|over| over.deliveries.iter().map(Delivery::to_ball)))
    }

    /// Short title such as "England v West Indies, World T20 Final".
    pub fn title(&self) -> String {
        let mut title = self.info.teams.join(" v ");
        if let Some(event) = &self.info.event {
            title.push_str(&format!(", {}", event.name));
            if let Some(stage) = &event.stage {
                title.push(' ');
                title.push_str(stage);
            }
        }
        title
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Meta {
    pub created: Option<NaiveDate>,
    pub data_version: String,
    pub revision: u32,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Info {
    pub dates: Vec<NaiveDate>,
    pub balls_per_over: u8,
    pub gender: String,
    pub match_type: String,
    pub match_type_number: Option<u32>,
    pub overs: Option<u32>,
    pub venue: String,
    pub city: Option<String>,
    pub toss: Toss,
    pub event: Option<Event>,
    pub players: HashMap<String, Vec<String>>,
    pub teams: Vec<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Toss {
    pub decision: String,
    pub winner: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Event {
    pub name: String,
    pub stage: Option<String>,
    pub match_number: Option<u32>,
}

// ---------------------------------------------------------------------------
// Innings / overs / deliveries
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Innings {
    pub team: String,
    pub overs: Vec<Over>,
    pub powerplays: Vec<PowerPlay>,
    pub target: Option<Target>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Over {
    pub over: u32,
    pub deliveries: Vec<Delivery>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PowerPlay {
    pub from: f32,
    pub to: f32,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Target {
    pub overs: Option<f32>,
    pub runs: u32,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Delivery {
    pub batter: String,
    pub bowler: String,
    pub non_striker: String,
    pub runs: Runs,
    pub extras: Extras,
    pub wickets: Vec<Dismissal>,
}

impl Delivery {
    /// Only the first dismissal on a delivery is carried over. The file's
    /// extras total includes penalty runs, which `Ball` keeps separately.
    pub fn to_ball(&self) -> Ball {
        let wicket = self.wickets.first();
        Ball {
            striker: self.batter.clone(),
            non_striker: self.non_striker.clone(),
            bowler: self.bowler.clone(),
            batter_runs: self.runs.batter,
            extra_type: self.extras.to_extra(),
            extra_runs: self.runs.extras.saturating_sub(self.extras.penalty),
            penalty_runs: self.extras.penalty,
            player_out: wicket.map(|w| w.player_out.clone()).unwrap_or_default(),
            how_out: wicket.map(Dismissal::to_how_out).unwrap_or_default(),
            fielder: wicket.and_then(Dismissal::fielder).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Runs {
    pub batter: u16,
    pub extras: u16,
    pub total: u16,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Extras {
    pub noballs: u16,
    pub wides: u16,
    pub legbyes: u16,
    pub byes: u16,
    pub penalty: u16,
}

impl Extras {
    /// A no-ball wins over anything run off it, then wides, byes, leg-byes.
    pub fn to_extra(&self) -> Extra {
        if self.noballs > 0 {
            Extra::NoBall
        } else if self.wides > 0 {
            Extra::Wide
        } else if self.byes > 0 {
            Extra::Bye
        } else if self.legbyes > 0 {
            Extra::LegBye
        } else {
            Extra::NoExtra
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Dismissal {
    pub player_out: String,
    pub kind: String,
    pub fielders: Vec<Fielder>,
}

impl Dismissal {
    pub fn to_how_out(&self) -> HowOut {
        match self.kind.as_str() {
            "caught" | "caught and bowled" => HowOut::Caught,
            "bowled" => HowOut::Bowled,
            "lbw" => HowOut::Lbw,
            "stumped" => HowOut::Stumped,
            "run out" => HowOut::RunOut,
            _ => HowOut::Other,
        }
    }

    pub fn fielder(&self) -> Option<String> {
        self.fielders.first().and_then(|f| f.name.clone())
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Fielder {
    pub name: Option<String>,
    pub substitute: bool,
}
