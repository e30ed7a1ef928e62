use crate::{Ball, Extra, HowOut, Scorecard};
use log::{debug, info, warn};
use std::fmt;

pub type ScoreResult<T> = Result<T, ScoreError>;

#[derive(Debug)]
pub enum ScoreError {
    /// The ball was rejected before touching the card.
    InvalidEvent(String),
    InningsClosed,
    NotFound(String),
    Parsing(serde_json::Error, String),
    Io(std::io::Error, String),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::InvalidEvent(msg) => write!(f, "Invalid ball: {msg}"),
            ScoreError::InningsClosed => write!(f, "Innings is closed"),
            ScoreError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ScoreError::Parsing(e, source) => write!(f, "Parse error for {source}: {e}"),
            ScoreError::Io(e, path) => write!(f, "Could not read {path}: {e}"),
        }
    }
}

impl std::error::Error for ScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreError::Parsing(e, _) => Some(e),
            ScoreError::Io(e, _) => Some(e),
            _ => None,
        }
    }
}

/// Check the cross-field consistency of a ball without touching any card.
pub fn validate(ball: &Ball) -> ScoreResult<()> {
    let invalid = |msg: String| Err(ScoreError::InvalidEvent(msg));

    if ball.striker.trim().is_empty() {
        return invalid("striker is missing".into());
    }
    if ball.non_striker.trim().is_empty() {
        return invalid("non-striker is missing".into());
    }
    if ball.bowler.trim().is_empty() {
        return invalid("bowler is missing".into());
    }
    if ball.striker == ball.non_striker {
        return invalid(format!("{} cannot be at both ends", ball.striker));
    }
    if ball.extra_runs > 0 && ball.extra_type == Extra::NoExtra {
        return invalid(format!("{} extra runs without an extra type", ball.extra_runs));
    }
    if ball.is_wicket() {
        if ball.player_out != ball.striker && ball.player_out != ball.non_striker {
            return invalid(format!("{} is not at the crease", ball.player_out));
        }
        if ball.how_out == HowOut::NotOut {
            return invalid(format!("{} given out without a dismissal", ball.player_out));
        }
    }
    Ok(())
}

/// Applies balls to the scorecard of a single innings, in delivery order.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    card: Scorecard,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card(&self) -> &Scorecard {
        &self.card
    }

    pub fn into_card(self) -> Scorecard {
        self.card
    }

    pub fn is_closed(&self) -> bool {
        self.card.closed
    }

    /// Freeze the card. Every later mutation is refused.
    pub fn close(&mut self) {
        if !self.card.closed {
            info!("innings closed at {}", self.card.score());
        }
        self.card.closed = true;
    }

    /// Start the next over. Over length is the caller's business.
    pub fn over_bowled(&mut self) -> ScoreResult<()> {
        if self.card.closed {
            return Err(ScoreError::InningsClosed);
        }
        self.card.over += 1;
        self.card.ball = 0;
        info!("end of over {}: {}", self.card.over, self.card.score());
        Ok(())
    }

    /// Apply one ball. Invalid balls are rejected with the card left untouched.
    pub fn apply(&mut self, ball: Ball) -> ScoreResult<()> {
        if self.card.closed {
            return Err(ScoreError::InningsClosed);
        }
        if let Err(e) = validate(&ball) {
            warn!("rejected ball ({ball}): {e}");
            return Err(e);
        }

        let card = &mut self.card;

        // Entering both batters first fixes the order of a new partnership.
        card.batters.add(&ball.striker);
        card.batters.add(&ball.non_striker);
        card.bowlers.add(&ball.bowler);

        card.runs += ball.total_runs();

        card.batters.add(&ball.striker).add(&ball);
        card.bowlers.add(&ball.bowler).add(&ball);

        if ball.is_wicket() {
            card.wickets += 1;
            if ball.player_out == ball.non_striker {
                card.batters.add(&ball.non_striker).record_out(&ball);
            }
        }

        if ball.extra_runs > 0 {
            *card.extras.entry(ball.extra_type).or_insert(0) += u32::from(ball.extra_runs);
        }

        if ball.is_legal() {
            card.ball += 1;
        }

        let line = describe(card.over, card.ball, &ball);
        debug!("{line}");
        card.history.push(line);
        Ok(())
    }

    /// Apply balls in order, stopping at the first rejection.
    /// Returns how many were applied.
    pub fn replay<I>(&mut self, balls: I) -> ScoreResult<usize>
    where
        I: IntoIterator<Item = Ball>,
    {
        let mut applied = 0;
        for ball in balls {
            self.apply(ball)?;
            applied += 1;
        }
        Ok(applied)
    }
}

fn describe(over: u32, ball_no: u32, ball: &Ball) -> String {
    let mut line = format!(
        "{over}.{ball_no} {} to {}: {} runs",
        ball.bowler, ball.striker, ball.batter_runs
    );
    if ball.is_extra() {
        line.push_str(&format!(" +{}{}", ball.extra_runs, ball.extra_type));
    }
    if ball.penalty_runs > 0 {
        line.push_str(&format!(" +{}pen", ball.penalty_runs));
    }
    if ball.is_wicket() {
        line.push_str(&format!(" OUT {} {}", ball.player_out, ball.how_out));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cricsheet::Match;

    const FIXTURE: &str = include_str!("../fixtures/951373.json");

    fn ball(striker: &str, non_striker: &str, bowler: &str, runs: u16) -> Ball {
        Ball {
            striker: striker.into(),
            non_striker: non_striker.into(),
            bowler: bowler.into(),
            batter_runs: runs,
            ..Default::default()
        }
    }

    fn out(mut ball: Ball, player: &str, how: HowOut, fielder: &str) -> Ball {
        ball.player_out = player.into();
        ball.how_out = how;
        ball.fielder = fielder.into();
        ball
    }

    fn extra(mut ball: Ball, kind: Extra, runs: u16) -> Ball {
        ball.extra_type = kind;
        ball.extra_runs = runs;
        ball
    }

    fn first_innings() -> (Match, Scorecard) {
        let m = Match::from_json(FIXTURE).expect("fixture should parse");
        let mut scorer = Scorer::new();
        for ball in m.balls(0).expect("first innings") {
            scorer.apply(ball).expect("fixture balls are valid");
        }
        (m, scorer.into_card())
    }

    #[test]
    fn applying_nothing_leaves_an_empty_card() {
        let card = Scorer::new().into_card();
        assert_eq!(card.runs, 0);
        assert_eq!(card.wickets, 0);
        assert!(card.batters.is_empty());
        assert!(card.bowlers.is_empty());
        assert!(card.extras.is_empty());
        assert!(card.history.is_empty());
    }

    #[test]
    fn dot_ball_enters_both_batters_and_the_bowler() {
        let mut scorer = Scorer::new();
        scorer.apply(ball("A", "B", "X", 0)).unwrap();
        let card = scorer.card();
        assert_eq!(card.batters["A"].position, 1);
        assert_eq!(card.batters["B"].position, 2);
        assert_eq!(card.batters["A"].balls_faced(), 1);
        assert_eq!(card.batters["B"].balls_faced(), 0);
        assert_eq!(card.bowlers["X"].position, 1);
        assert_eq!(card.ball, 1);
        assert_eq!(card.history, vec!["0.1 X to A: 0 runs".to_string()]);
    }

    #[test]
    fn positions_do_not_move_when_strike_rotates() {
        let mut scorer = Scorer::new();
        scorer.apply(ball("A", "B", "X", 1)).unwrap();
        scorer.apply(ball("B", "A", "X", 1)).unwrap();
        scorer.apply(ball("A", "B", "X", 0)).unwrap();
        let card = scorer.card();
        assert_eq!(card.batters.len(), 2);
        assert_eq!(card.batters["A"].position, 1);
        assert_eq!(card.batters["B"].position, 2);
        assert_eq!(card.batters["A"].balls_faced(), 2);
        assert_eq!(card.batters["B"].balls_faced(), 1);
    }

    #[test]
    fn wides_and_no_balls_do_not_advance_the_ball_count() {
        let mut scorer = Scorer::new();
        scorer.apply(extra(ball("A", "B", "X", 0), Extra::Wide, 1)).unwrap();
        scorer.apply(extra(ball("A", "B", "X", 2), Extra::NoBall, 1)).unwrap();
        assert_eq!(scorer.card().ball, 0);
        scorer.apply(extra(ball("A", "B", "X", 0), Extra::Bye, 1)).unwrap();
        scorer.apply(extra(ball("A", "B", "X", 0), Extra::LegBye, 1)).unwrap();
        assert_eq!(scorer.card().ball, 2);

        let card = scorer.card();
        assert_eq!(card.runs, 6);
        assert_eq!(card.extra(Extra::Wide), 1);
        assert_eq!(card.extra(Extra::NoBall), 1);
        assert_eq!(card.extra(Extra::Bye), 1);
        assert_eq!(card.extra(Extra::LegBye), 1);
        assert_eq!(card.extras_total(), 4);
        assert_eq!(card.bowlers["X"].runs(), 4);
        assert_eq!(card.bowlers["X"].balls_bowled(), 4);
        assert_eq!(card.batters["A"].balls_faced(), 4);
        assert_eq!(card.history[0], "0.0 X to A: 0 runs +1w");
    }

    #[test]
    fn extras_only_record_positive_runs() {
        let mut scorer = Scorer::new();
        scorer.apply(extra(ball("A", "B", "X", 1), Extra::NoBall, 0)).unwrap();
        assert!(scorer.card().extras.is_empty());
        assert_eq!(scorer.card().runs, 1);
    }

    #[test]
    fn penalty_runs_go_to_the_total_only() {
        let mut scorer = Scorer::new();
        let mut b = ball("A", "B", "X", 2);
        b.penalty_runs = 5;
        scorer.apply(b).unwrap();
        let card = scorer.card();
        assert_eq!(card.runs, 7);
        assert_eq!(card.batters["A"].runs(), 2);
        assert_eq!(card.bowlers["X"].runs(), 2);
        assert!(card.extras.is_empty());
        assert_eq!(card.history[0], "0.1 X to A: 2 runs +5pen");
    }

    #[test]
    fn striker_dismissal_is_credited_to_the_bowler() {
        let mut scorer = Scorer::new();
        scorer
            .apply(out(ball("A", "B", "X", 0), "A", HowOut::Caught, "F"))
            .unwrap();
        let card = scorer.card();
        assert_eq!(card.wickets, 1);
        assert_eq!(card.batters["A"].how_out, HowOut::Caught);
        assert_eq!(card.batters["A"].fielder, "F");
        assert_eq!(card.batters["B"].how_out, HowOut::NotOut);
        assert_eq!(card.bowlers["X"].wickets, 1);
        assert_eq!(card.history[0], "0.1 X to A: 0 runs OUT A c");
    }

    #[test]
    fn non_striker_run_out_leaves_striker_and_bowler_alone() {
        let mut scorer = Scorer::new();
        scorer
            .apply(out(ball("A", "B", "X", 1), "B", HowOut::RunOut, "F"))
            .unwrap();
        let card = scorer.card();
        assert_eq!(card.wickets, 1);
        assert_eq!(card.batters["B"].how_out, HowOut::RunOut);
        assert_eq!(card.batters["B"].fielder, "F");
        assert_eq!(card.batters["A"].how_out, HowOut::NotOut);
        assert_eq!(card.batters["A"].runs(), 1);
        assert_eq!(card.bowlers["X"].wickets, 0);
    }

    #[test]
    fn other_dismissals_are_not_bowler_wickets() {
        let mut scorer = Scorer::new();
        scorer
            .apply(out(ball("A", "B", "X", 0), "A", HowOut::Other, ""))
            .unwrap();
        scorer
            .apply(out(ball("C", "B", "X", 0), "C", HowOut::Lbw, ""))
            .unwrap();
        scorer
            .apply(out(ball("D", "B", "X", 0), "D", HowOut::Stumped, "K"))
            .unwrap();
        let card = scorer.card();
        assert_eq!(card.wickets, 3);
        assert_eq!(card.bowlers["X"].wickets, 2);
        assert_eq!(card.batters["C"].position, 3);
        assert_eq!(card.batters["D"].position, 4);
    }

    #[test]
    fn over_bowled_resets_the_ball_pointer() {
        let mut scorer = Scorer::new();
        for _ in 0..6 {
            scorer.apply(ball("A", "B", "X", 0)).unwrap();
        }
        assert_eq!(scorer.card().ball, 6);
        scorer.over_bowled().unwrap();
        assert_eq!((scorer.card().over, scorer.card().ball), (1, 0));
        scorer.apply(ball("B", "A", "Y", 1)).unwrap();
        assert_eq!(scorer.card().score(), "1/0 (1.1)");
        assert_eq!(scorer.card().bowlers["Y"].position, 2);
    }

    #[test]
    fn the_engine_does_not_roll_overs_by_itself() {
        let mut scorer = Scorer::new();
        for _ in 0..8 {
            scorer.apply(ball("A", "B", "X", 0)).unwrap();
        }
        assert_eq!((scorer.card().over, scorer.card().ball), (0, 8));
    }

    #[test]
    fn invalid_balls_leave_the_card_untouched() {
        let mut scorer = Scorer::new();
        scorer.apply(ball("A", "B", "X", 1)).unwrap();
        let before = format!("{:?}", scorer.card());

        let rejected = [
            ball("", "B", "X", 0),
            ball("A", " ", "X", 0),
            ball("A", "B", "", 0),
            ball("A", "A", "X", 0),
            extra(ball("A", "B", "X", 0), Extra::NoExtra, 2),
            out(ball("A", "B", "X", 0), "Z", HowOut::Bowled, ""),
            out(ball("A", "B", "X", 0), "A", HowOut::NotOut, ""),
        ];
        for b in rejected {
            let err = scorer.apply(b).unwrap_err();
            assert!(matches!(err, ScoreError::InvalidEvent(_)), "got {err}");
        }
        assert_eq!(format!("{:?}", scorer.card()), before);
    }

    #[test]
    fn closed_innings_refuses_changes() {
        let mut scorer = Scorer::new();
        scorer.apply(ball("A", "B", "X", 4)).unwrap();
        scorer.close();
        assert!(scorer.is_closed());
        assert!(matches!(
            scorer.apply(ball("A", "B", "X", 4)),
            Err(ScoreError::InningsClosed)
        ));
        assert!(matches!(scorer.over_bowled(), Err(ScoreError::InningsClosed)));
        assert_eq!(scorer.card().runs, 4);
        assert_eq!(scorer.card().history.len(), 1);
    }

    #[test]
    fn replay_stops_at_the_first_bad_ball() {
        let mut scorer = Scorer::new();
        let balls = vec![
            ball("A", "B", "X", 1),
            ball("B", "A", "X", 2),
            ball("", "A", "X", 0),
            ball("B", "A", "X", 6),
        ];
        assert!(scorer.replay(balls).is_err());
        assert_eq!(scorer.card().runs, 3);
        assert_eq!(scorer.card().history.len(), 2);
    }

    #[test]
    fn last_six_is_newest_first() {
        let mut scorer = Scorer::new();
        for runs in 0..8 {
            scorer.apply(ball("A", "B", "X", runs)).unwrap();
        }
        let recent = scorer.card().last_six();
        assert_eq!(recent.len(), 6);
        assert_eq!(recent[0], "0.8 X to A: 7 runs");
        assert_eq!(recent[5], "0.3 X to A: 2 runs");
    }

    #[test]
    fn replayed_innings_totals_match_the_deliveries() {
        let (m, card) = first_innings();
        let balls: Vec<Ball> = m.balls(0).unwrap().collect();
        let runs: u32 = balls.iter().map(Ball::total_runs).sum();
        let wickets = balls.iter().filter(|b| b.is_wicket()).count();
        assert_eq!(card.runs, runs);
        assert_eq!(card.wickets as usize, wickets);
        assert_eq!(card.history.len(), balls.len());

        for kind in Extra::ALL {
            let expected: u32 = balls
                .iter()
                .filter(|b| b.extra_type == kind)
                .map(|b| u32::from(b.extra_runs))
                .sum();
            assert_eq!(card.extra(kind), expected, "extras for {}", kind.label());
        }

        for batter in &card.batters {
            let faced = balls.iter().filter(|b| b.striker == batter.name).count();
            assert_eq!(batter.balls_faced(), faced, "{}", batter.name);
        }
    }

    #[test]
    fn replayed_innings_matches_the_published_card() {
        let (_, card) = first_innings();

        assert_eq!(card.runs, 157);
        assert_eq!(card.batters.len(), 11);
        assert_eq!(card.wickets, 9);
        assert!(card.fours() > 0);

        let roy = &card.batters["JJ Roy"];
        assert_eq!(roy.position, 1);
        assert_eq!(roy.how_out, HowOut::Bowled);

        let hales = &card.batters["AD Hales"];
        assert_eq!(hales.position, 2);
        assert_eq!(hales.how_out, HowOut::Caught);
        assert_eq!(hales.fielder, "S Badree");
        assert_eq!(hales.balls_faced(), 3);

        let root = &card.batters["JE Root"];
        assert_eq!(root.position, 3);
        assert_eq!(root.fours(), 7);

        assert_eq!(card.batters["JC Buttler"].sixes(), 3);
        assert_eq!(card.bowlers["SJ Benn"].sixes(), 3);

        let badree = &card.bowlers["S Badree"];
        assert_eq!(badree.position, 1);
        assert_eq!(badree.wickets, 2);
        assert_eq!(badree.runs(), 16);

        let brathwaite = &card.bowlers["CR Brathwaite"];
        assert_eq!(brathwaite.balls_bowled(), 25);
        assert_eq!(brathwaite.runs(), 23);

        assert_eq!(card.extra(Extra::LegBye), 4);
        assert_eq!(card.extra(Extra::Wide), 1);
        assert_eq!(card.extra(Extra::Bye), 0);
    }

    #[test]
    fn over_boundaries_from_the_file_give_the_final_score() {
        let m = Match::from_json(FIXTURE).unwrap();
        let mut scorer = Scorer::new();
        for over in m.overs(0).unwrap() {
            scorer.replay(over.deliveries.iter().map(|d| d.to_ball())).unwrap();
            scorer.over_bowled().unwrap();
        }
        assert_eq!(scorer.card().score(), "157/9 (20.0)");
        assert_eq!(scorer.card().legal_balls(), 120);
    }

    #[test]
    fn scorecard_snapshot_serializes_in_batting_order() {
        let (_, card) = first_innings();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["runs"], 157);
        assert_eq!(json["batters"][0]["name"], "JJ Roy");
        assert_eq!(json["batters"][0]["how_out"], "b");
        assert_eq!(json["extras"]["lb"], 4);
    }
}
