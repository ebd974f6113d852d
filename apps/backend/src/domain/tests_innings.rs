use crate::domain::finalization::end_match;
use crate::domain::matches::{InningsNo, TeamIndex};
use crate::domain::overs::Overs;
use crate::domain::scoring::{score_run, score_wicket, BallOutcome};
use crate::domain::state::{LiveMatchState, Phase};
use crate::domain::test_state_helpers::{auto_resolve, batting_state};
use crate::errors::domain::ValidationKind;

fn run(state: &mut LiveMatchState, runs: u32) -> BallOutcome {
    let outcome = score_run(state, runs, false).unwrap();
    auto_resolve(state);
    outcome
}

fn wicket(state: &mut LiveMatchState) -> BallOutcome {
    let outcome = score_wicket(state).unwrap();
    auto_resolve(state);
    outcome
}

#[test]
fn innings_ends_when_overs_run_out() {
    let mut state = batting_state(2, 4);
    for _ in 0..11 {
        let outcome = run(&mut state, 1);
        assert_eq!(outcome.innings_ended, None);
    }
    let outcome = score_run(&mut state, 1, false).unwrap();

    assert_eq!(outcome.innings_ended, Some(InningsNo::First));
    assert!(!outcome.match_completed);
    assert_eq!(state.phase, Phase::AwaitingOpeningPlayers);
    assert_eq!(state.current_innings, InningsNo::Second);
    assert_eq!(state.batting_team(), Some(TeamIndex::Second));
    assert_eq!((state.current_over, state.balls_in_over), (0, 0));
    assert_eq!(state.previous_bowler, None);

    let first = state.team(TeamIndex::First);
    assert!(first.innings_completed);
    assert_eq!((first.runs, first.overs), (12, Overs::whole(2)));
}

#[test]
fn innings_ends_when_one_batsman_is_left() {
    let mut state = batting_state(5, 4);
    wicket(&mut state);
    wicket(&mut state);
    assert_eq!(state.current_innings, InningsNo::First);

    let outcome = score_wicket(&mut state).unwrap();
    assert_eq!(outcome.innings_ended, Some(InningsNo::First));
    assert_eq!(state.team(TeamIndex::First).wickets, 3);
    assert_eq!(state.phase, Phase::AwaitingOpeningPlayers);
}

#[test]
fn second_innings_ending_completes_the_match() {
    let mut state = batting_state(1, 3);
    for _ in 0..6 {
        run(&mut state, 2);
    }
    assert_eq!(state.team(TeamIndex::First).runs, 12);

    for _ in 0..5 {
        run(&mut state, 0);
    }
    let outcome = score_run(&mut state, 4, false).unwrap();

    assert_eq!(outcome.innings_ended, Some(InningsNo::Second));
    assert!(outcome.match_completed);
    assert_eq!(state.phase, Phase::Completed);
    assert_eq!(state.result.as_deref(), Some("Team A won by 8 runs"));
    assert!(state.team(TeamIndex::Second).innings_completed);
}

#[test]
fn equal_totals_tie_the_match() {
    let mut state = batting_state(1, 3);
    for _ in 0..6 {
        run(&mut state, 1);
    }
    for _ in 0..6 {
        run(&mut state, 1);
    }
    assert_eq!(state.result.as_deref(), Some("Match Tied"));
}

#[test]
fn completed_match_rejects_further_commands() {
    let mut state = batting_state(1, 3);
    for _ in 0..12 {
        run(&mut state, 0);
    }
    assert_eq!(state.phase, Phase::Completed);
    let before = state.clone();

    let err = score_run(&mut state, 1, false).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::MatchCompleted));
    let err = end_match(&mut state).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::MatchCompleted));
    assert_eq!(state, before);
}

/// Team A (six players) makes 50 all out in 6.3 overs of an eight-over
/// match; Team B reaches 51 for 2 and the scorer ends the match.
#[test]
fn eight_over_chase_is_won_by_wickets_in_hand() {
    let mut state = batting_state(8, 6);

    let wicket_balls = [7, 15, 23, 31, 38];
    let mut scoring_balls = 0;
    for ball in 0..39 {
        if wicket_balls.contains(&ball) {
            wicket(&mut state);
            continue;
        }
        let runs = match scoring_balls {
            0..=7 => 4,
            8..=16 => 2,
            _ => 0,
        };
        scoring_balls += 1;
        run(&mut state, runs);
    }

    let team_a = state.team(TeamIndex::First);
    assert_eq!(team_a.runs, 50);
    assert_eq!(team_a.wickets, 5);
    assert_eq!(team_a.overs, Overs::from_balls(39));
    assert_eq!(team_a.overs.to_string(), "6.3");
    assert!(team_a.innings_completed);
    assert_eq!(state.current_innings, InningsNo::Second);
    assert!(matches!(state.phase, Phase::InProgress(_)));

    for _ in 0..12 {
        run(&mut state, 4);
    }
    wicket(&mut state);
    run(&mut state, 3);
    wicket(&mut state);

    let team_b = state.team(TeamIndex::Second);
    assert_eq!((team_b.runs, team_b.wickets), (51, 2));
    assert!(!team_b.innings_completed);

    end_match(&mut state).unwrap();
    assert_eq!(state.phase, Phase::Completed);
    assert_eq!(state.result.as_deref(), Some("Team B won by 3 wickets"));
    assert!(state.team(TeamIndex::Second).innings_completed);
}
