use scorebook::{Ball, Extra, HowOut};

pub const MAX_BATTER_RUNS: u16 = 6;
pub const MAX_EXTRA_RUNS: u16 = 6;
pub const MAX_PENALTY_RUNS: u16 = 5;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Striker,
    NonStriker,
    Bowler,
    BatterRuns,
    ExtraType,
    ExtraRuns,
    PenaltyRuns,
    Out,
    HowOut,
    Fielder,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Striker,
        Field::NonStriker,
        Field::Bowler,
        Field::BatterRuns,
        Field::ExtraType,
        Field::ExtraRuns,
        Field::PenaltyRuns,
        Field::Out,
        Field::HowOut,
        Field::Fielder,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Striker => "Striker",
            Field::NonStriker => "Non-striker",
            Field::Bowler => "Bowler",
            Field::BatterRuns => "Batter runs",
            Field::ExtraType => "Extra type",
            Field::ExtraRuns => "Extra runs",
            Field::PenaltyRuns => "Penalty",
            Field::Out => "Out",
            Field::HowOut => "How",
            Field::Fielder => "Fielder",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Field::Striker | Field::NonStriker | Field::Bowler | Field::Fielder
        )
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Which batter, if any, is given out on the pending ball.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutChoice {
    #[default]
    Nobody,
    Striker,
    NonStriker,
}

impl OutChoice {
    pub fn next(self) -> Self {
        match self {
            OutChoice::Nobody => OutChoice::Striker,
            OutChoice::Striker => OutChoice::NonStriker,
            OutChoice::NonStriker => OutChoice::Nobody,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            OutChoice::Nobody => OutChoice::NonStriker,
            OutChoice::Striker => OutChoice::Nobody,
            OutChoice::NonStriker => OutChoice::Striker,
        }
    }
}

/// The ball being composed on screen. Player names persist between balls;
/// everything else resets once a ball is scored.
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    pub striker: String,
    pub non_striker: String,
    pub bowler: String,
    pub batter_runs: u16,
    pub extra_type: Extra,
    pub extra_runs: u16,
    pub penalty_runs: u16,
    pub out: OutChoice,
    pub how_out: HowOut,
    pub fielder: String,
    pub focus: Field,
}

impl EntryForm {
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Typing: appends to name fields, sets numeric fields from a digit.
    pub fn input_char(&mut self, c: char) {
        if let Some(text) = self.text_mut() {
            text.push(c);
            return;
        }
        let Some(digit) = c.to_digit(10) else {
            return;
        };
        let digit = digit as u16;
        match self.focus {
            Field::BatterRuns if digit <= MAX_BATTER_RUNS => self.batter_runs = digit,
            Field::ExtraRuns if digit <= MAX_EXTRA_RUNS => self.extra_runs = digit,
            Field::PenaltyRuns if digit <= MAX_PENALTY_RUNS => self.penalty_runs = digit,
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    /// Left/Right on a choice or numeric field.
    pub fn cycle(&mut self, forward: bool) {
        let step = |value: u16, max: u16| {
            if forward {
                (value + 1) % (max + 1)
            } else {
                (value + max) % (max + 1)
            }
        };
        match self.focus {
            Field::BatterRuns => self.batter_runs = step(self.batter_runs, MAX_BATTER_RUNS),
            Field::ExtraRuns => self.extra_runs = step(self.extra_runs, MAX_EXTRA_RUNS),
            Field::PenaltyRuns => self.penalty_runs = step(self.penalty_runs, MAX_PENALTY_RUNS),
            Field::ExtraType => {
                self.extra_type = if forward {
                    self.extra_type.next()
                } else {
                    self.extra_type.prev()
                };
                if self.extra_type != Extra::NoExtra && self.extra_runs == 0 {
                    self.extra_runs = 1;
                }
            }
            Field::Out => {
                self.out = if forward { self.out.next() } else { self.out.prev() };
                if self.out != OutChoice::Nobody && self.how_out == HowOut::NotOut {
                    self.how_out = HowOut::Bowled;
                }
            }
            Field::HowOut => {
                self.how_out = if forward {
                    self.how_out.next()
                } else {
                    self.how_out.prev()
                };
            }
            _ => {}
        }
    }

    pub fn player_out(&self) -> &str {
        match self.out {
            OutChoice::Nobody => "",
            OutChoice::Striker => &self.striker,
            OutChoice::NonStriker => &self.non_striker,
        }
    }

    /// The pending ball. Extra runs only count with an extra type, and the
    /// dismissal fields only with a batter given out.
    pub fn to_ball(&self) -> Ball {
        let is_out = self.out != OutChoice::Nobody;
        Ball {
            striker: self.striker.trim().to_string(),
            non_striker: self.non_striker.trim().to_string(),
            bowler: self.bowler.trim().to_string(),
            batter_runs: self.batter_runs,
            extra_type: self.extra_type,
            extra_runs: if self.extra_type == Extra::NoExtra {
                0
            } else {
                self.extra_runs
            },
            penalty_runs: self.penalty_runs,
            player_out: self.player_out().trim().to_string(),
            how_out: if is_out { self.how_out } else { HowOut::NotOut },
            fielder: if is_out {
                self.fielder.trim().to_string()
            } else {
                String::new()
            },
        }
    }

    /// Reset for the next ball after `ball` was scored. A dismissed batter's
    /// slot is emptied and focused so the new batter can be typed in.
    pub fn after_ball(&mut self, ball: &Ball) {
        let dismissed = match self.out {
            OutChoice::Striker => Some(Field::Striker),
            OutChoice::NonStriker => Some(Field::NonStriker),
            OutChoice::Nobody => None,
        };
        self.batter_runs = 0;
        self.extra_type = Extra::NoExtra;
        self.extra_runs = 0;
        self.penalty_runs = 0;
        self.out = OutChoice::Nobody;
        self.how_out = HowOut::NotOut;
        self.fielder.clear();

        if let Some(field) = dismissed.filter(|_| ball.is_wicket()) {
            match field {
                Field::Striker => self.striker.clear(),
                _ => self.non_striker.clear(),
            }
            self.focus = field;
        } else {
            self.focus = Field::BatterRuns;
        }
    }

    pub fn swap_ends(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    /// New over: batters change ends and a new bowler is needed.
    pub fn new_over(&mut self) {
        self.swap_ends();
        self.bowler.clear();
        self.focus = Field::Bowler;
    }

    /// Display value for a field.
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::Striker => self.striker.clone(),
            Field::NonStriker => self.non_striker.clone(),
            Field::Bowler => self.bowler.clone(),
            Field::BatterRuns => self.batter_runs.to_string(),
            Field::ExtraType => self.extra_type.label().to_string(),
            Field::ExtraRuns => self.extra_runs.to_string(),
            Field::PenaltyRuns => self.penalty_runs.to_string(),
            Field::Out => match self.out {
                OutChoice::Nobody => "-".to_string(),
                _ => self.player_out().to_string(),
            },
            Field::HowOut => self.how_out.label().to_string(),
            Field::Fielder => self.fielder.clone(),
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Striker => Some(&mut self.striker),
            Field::NonStriker => Some(&mut self.non_striker),
            Field::Bowler => Some(&mut self.bowler),
            Field::Fielder => Some(&mut self.fielder),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EntryForm {
        EntryForm {
            striker: "JJ Roy".into(),
            non_striker: "AD Hales".into(),
            bowler: "S Badree".into(),
            ..Default::default()
        }
    }

    #[test]
    fn typing_goes_to_the_focused_name() {
        let mut f = EntryForm::default();
        for c in "JE Root".chars() {
            f.input_char(c);
        }
        assert_eq!(f.striker, "JE Root");
        f.backspace();
        assert_eq!(f.striker, "JE Roo");
        f.focus = Field::Bowler;
        f.input_char('X');
        assert_eq!(f.bowler, "X");
    }

    #[test]
    fn digits_set_numeric_fields_within_bounds() {
        let mut f = form();
        f.focus = Field::BatterRuns;
        f.input_char('4');
        assert_eq!(f.batter_runs, 4);
        f.input_char('9');
        assert_eq!(f.batter_runs, 4);
        f.input_char('x');
        assert_eq!(f.batter_runs, 4);

        f.focus = Field::PenaltyRuns;
        f.input_char('5');
        assert_eq!(f.penalty_runs, 5);
        f.input_char('6');
        assert_eq!(f.penalty_runs, 5);
    }

    #[test]
    fn cycling_wraps() {
        let mut f = form();
        f.focus = Field::BatterRuns;
        f.cycle(false);
        assert_eq!(f.batter_runs, 6);
        f.cycle(true);
        assert_eq!(f.batter_runs, 0);

        f.focus = Field::ExtraType;
        f.cycle(true);
        assert_eq!(f.extra_type, Extra::Wide);
        assert_eq!(f.extra_runs, 1);
    }

    #[test]
    fn focus_wraps_around_the_form() {
        let mut f = EntryForm::default();
        f.focus_prev();
        assert_eq!(f.focus, Field::Fielder);
        f.focus_next();
        assert_eq!(f.focus, Field::Striker);
    }

    #[test]
    fn extra_runs_are_dropped_without_an_extra_type() {
        let mut f = form();
        f.extra_runs = 3;
        assert_eq!(f.to_ball().extra_runs, 0);
        f.extra_type = Extra::Bye;
        assert_eq!(f.to_ball().extra_runs, 3);
    }

    #[test]
    fn out_choice_names_the_batter() {
        let mut f = form();
        f.focus = Field::Out;
        f.cycle(true);
        let ball = f.to_ball();
        assert_eq!(ball.player_out, "JJ Roy");
        assert_eq!(ball.how_out, HowOut::Bowled);

        f.cycle(true);
        f.how_out = HowOut::RunOut;
        f.fielder = "Sub".into();
        let ball = f.to_ball();
        assert_eq!(ball.player_out, "AD Hales");
        assert_eq!(ball.how_out, HowOut::RunOut);
        assert_eq!(ball.fielder, "Sub");

        f.cycle(true);
        let ball = f.to_ball();
        assert!(ball.player_out.is_empty());
        assert_eq!(ball.how_out, HowOut::NotOut);
        assert!(ball.fielder.is_empty());
    }

    #[test]
    fn after_a_wicket_the_dismissed_slot_is_cleared() {
        let mut f = form();
        f.batter_runs = 2;
        f.out = OutChoice::NonStriker;
        f.how_out = HowOut::RunOut;
        let ball = f.to_ball();
        f.after_ball(&ball);
        assert_eq!(f.striker, "JJ Roy");
        assert!(f.non_striker.is_empty());
        assert_eq!(f.focus, Field::NonStriker);
        assert_eq!(f.batter_runs, 0);
        assert_eq!(f.out, OutChoice::Nobody);
        assert_eq!(f.how_out, HowOut::NotOut);
    }

    #[test]
    fn after_a_scoring_ball_names_are_kept() {
        let mut f = form();
        f.batter_runs = 4;
        f.extra_type = Extra::NoBall;
        f.extra_runs = 1;
        let ball = f.to_ball();
        f.after_ball(&ball);
        assert_eq!(f.striker, "JJ Roy");
        assert_eq!(f.bowler, "S Badree");
        assert_eq!(f.extra_type, Extra::NoExtra);
        assert_eq!(f.extra_runs, 0);
        assert_eq!(f.focus, Field::BatterRuns);
    }

    #[test]
    fn new_over_swaps_ends_and_asks_for_a_bowler() {
        let mut f = form();
        f.new_over();
        assert_eq!(f.striker, "AD Hales");
        assert_eq!(f.non_striker, "JJ Roy");
        assert!(f.bowler.is_empty());
        assert_eq!(f.focus, Field::Bowler);
    }

    #[test]
    fn names_are_trimmed_into_the_ball() {
        let mut f = form();
        f.striker = "  JJ Roy ".into();
        assert_eq!(f.to_ball().striker, "JJ Roy");
    }
}
