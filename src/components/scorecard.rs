use scorebook::{Batter, Bowler, Extra, Scorecard};

/// A printed card has room for a full side.
pub const CARD_SLOTS: usize = 11;

pub const BATTING_HEADER: [&str; 7] = ["#", "Batter", "How out", "R", "B", "4s", "6s"];
pub const BOWLING_HEADER: [&str; 7] = ["#", "Bowler", "O", "R", "W", "Econ", "Balls"];

/// One row per batting position; positions nobody has reached are blank.
pub fn batting_rows(card: &Scorecard) -> Vec<[String; 7]> {
    card.batters
        .slots(CARD_SLOTS)
        .into_iter()
        .enumerate()
        .map(|(i, slot)| match slot {
            Some(batter) => batting_row(batter),
            None => blank_row(i + 1),
        })
        .collect()
}

pub fn batting_row(batter: &Batter) -> [String; 7] {
    [
        batter.position.to_string(),
        batter.name.clone(),
        dismissal(batter),
        batter.runs().to_string(),
        batter.balls_faced().to_string(),
        batter.fours().to_string(),
        batter.sixes().to_string(),
    ]
}

pub fn bowling_rows(card: &Scorecard, balls_per_over: u8) -> Vec<[String; 7]> {
    card.bowlers
        .slots(CARD_SLOTS)
        .into_iter()
        .enumerate()
        .map(|(i, slot)| match slot {
            Some(bowler) => bowling_row(bowler, balls_per_over),
            None => blank_row(i + 1),
        })
        .collect()
}

pub fn bowling_row(bowler: &Bowler, balls_per_over: u8) -> [String; 7] {
    [
        bowler.position.to_string(),
        bowler.name.clone(),
        bowler.overs(balls_per_over),
        bowler.runs().to_string(),
        bowler.wickets.to_string(),
        format!("{:.2}", bowler.economy(balls_per_over)),
        bowler.balls_bowled().to_string(),
    ]
}

/// "c Bravo", "run out (Sub)", "not out", in the style of a printed card.
pub fn dismissal(batter: &Batter) -> String {
    let how = batter.how_out.label();
    if batter.is_out() && !batter.fielder.is_empty() {
        format!("{how} ({})", batter.fielder)
    } else {
        how.to_string()
    }
}

/// "Extras 5 (lb 4, w 1)", listing only categories that occurred.
pub fn extras_line(card: &Scorecard) -> String {
    let parts: Vec<String> = Extra::ALL
        .iter()
        .filter(|kind| card.extra(**kind) > 0)
        .map(|kind| format!("{} {}", kind.code(), card.extra(*kind)))
        .collect();
    if parts.is_empty() {
        format!("Extras {}", card.extras_total())
    } else {
        format!("Extras {} ({})", card.extras_total(), parts.join(", "))
    }
}

/// Headline plus boundaries, e.g. "157/9 (20.0)  4s 13  6s 3".
pub fn headline(card: &Scorecard) -> String {
    format!("{}  4s {}  6s {}", card.score(), card.fours(), card.sixes())
}

fn blank_row(position: usize) -> [String; 7] {
    [
        position.to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorebook::{Ball, HowOut, Scorer};

    fn card() -> Scorecard {
        let mut scorer = Scorer::new();
        let ball = |runs: u16| Ball {
            striker: "A".into(),
            non_striker: "B".into(),
            bowler: "X".into(),
            batter_runs: runs,
            ..Default::default()
        };
        scorer.apply(ball(4)).unwrap();
        scorer.apply(ball(6)).unwrap();
        scorer
            .apply(Ball {
                extra_type: Extra::LegBye,
                extra_runs: 1,
                ..ball(0)
            })
            .unwrap();
        scorer
            .apply(Ball {
                player_out: "A".into(),
                how_out: HowOut::Caught,
                fielder: "F".into(),
                ..ball(0)
            })
            .unwrap();
        scorer.into_card()
    }

    #[test]
    fn batting_card_has_eleven_slots() {
        let rows = batting_rows(&card());
        assert_eq!(rows.len(), CARD_SLOTS);
        assert_eq!(rows[0][1], "A");
        assert_eq!(rows[0][2], "caught (F)");
        assert_eq!(rows[0][3], "10");
        assert_eq!(rows[0][4], "4");
        assert_eq!(rows[1][1], "B");
        assert_eq!(rows[1][2], "not out");
        assert_eq!(rows[2][0], "3");
        assert!(rows[2][1].is_empty());
    }

    #[test]
    fn bowling_card_rows() {
        let rows = bowling_rows(&card(), 6);
        assert_eq!(rows.len(), CARD_SLOTS);
        assert_eq!(rows[0][1], "X");
        assert_eq!(rows[0][2], "0.4");
        assert_eq!(rows[0][3], "10");
        assert_eq!(rows[0][4], "1");
        assert_eq!(rows[0][5], "15.00");
        assert!(rows[1][1].is_empty());
    }

    #[test]
    fn extras_line_lists_only_what_happened() {
        assert_eq!(extras_line(&card()), "Extras 1 (lb 1)");
        assert_eq!(extras_line(&Scorecard::new()), "Extras 0");
    }

    #[test]
    fn headline_counts_boundaries() {
        assert_eq!(headline(&card()), "11/1 (0.4)  4s 1  6s 1");
    }

    #[test]
    fn bowled_without_fielder() {
        let mut batter = Batter {
            name: "A".into(),
            how_out: HowOut::Bowled,
            ..Default::default()
        };
        assert_eq!(dismissal(&batter), "bowled");
        batter.how_out = HowOut::NotOut;
        batter.fielder = "stale".into();
        assert_eq!(dismissal(&batter), "not out");
    }
}
