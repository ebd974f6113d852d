//! Property-based tests for per-delivery scoring rules.

use proptest::prelude::*;

use crate::domain::matches::{InningsNo, TeamIndex};
use crate::domain::scoring::{score_extra, score_run, score_wicket, ExtraKind};
use crate::domain::state::{Batsmen, CreaseEnd, LiveMatchState, Phase, WicketPause};
use crate::domain::test_state_helpers::{batting_state, crease};
use crate::domain::{test_gens, test_prelude};

/// Twenty overs and eleven a side, so no property below ends an innings.
fn long_match() -> LiveMatchState {
    batting_state(20, 11)
}

fn play_runs(state: &mut LiveMatchState, runs: &[u32]) {
    for &r in runs {
        score_run(state, r, false).unwrap();
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: the sixth legal ball advances the over by exactly one and
    /// swaps the batsmen relative to their orientation after that ball.
    #[test]
    fn prop_over_completion_swaps_ends(over in test_gens::clean_over()) {
        let mut state = long_match();
        play_runs(&mut state, &over[..5]);
        let before = crease(&state).clone();
        let over_before = state.current_over;

        let last = over[5];
        let outcome = score_run(&mut state, last, false).unwrap();

        let (striker, non_striker) = if last % 2 == 1 {
            (before.non_striker, before.striker)
        } else {
            (before.striker, before.non_striker)
        };
        prop_assert!(outcome.over_completed);
        prop_assert_eq!(state.current_over, over_before + 1);
        prop_assert_eq!(state.balls_in_over, 0);
        prop_assert_eq!(
            &state.phase,
            &Phase::AwaitingNewBowler(Batsmen { striker: non_striker, non_striker: striker })
        );
    }

    /// Property: a wicket adds exactly one to the total, marks the striker
    /// out and keeps the non-striker.
    #[test]
    fn prop_wicket_dismisses_striker(prefix in prop::collection::vec(test_gens::runs(), 0..5)) {
        let mut state = long_match();
        play_runs(&mut state, &prefix);
        let before = crease(&state).clone();
        let wickets = state.team(TeamIndex::First).wickets;

        score_wicket(&mut state).unwrap();

        prop_assert_eq!(state.team(TeamIndex::First).wickets, wickets + 1);
        prop_assert!(state.scorecard.innings(InningsNo::First).is_out(&before.striker));
        prop_assert_eq!(
            &state.phase,
            &Phase::AwaitingNewBatsman(WicketPause {
                survivor: before.non_striker,
                vacancy: CreaseEnd::Striker,
                bowler: Some(before.bowler),
            })
        );
    }

    /// Property: extras never touch a batsman's personal runs; only a no-ball
    /// uses up a ball of the over.
    #[test]
    fn prop_extras_leave_batsman_runs_alone(
        prefix in prop::collection::vec(test_gens::runs(), 0..5),
        kind in test_gens::extra_kind(),
    ) {
        let mut state = long_match();
        play_runs(&mut state, &prefix);
        let before = crease(&state).clone();
        let entry_before = state
            .scorecard
            .innings(InningsNo::First)
            .batting
            .get(&before.striker)
            .cloned()
            .unwrap_or_default();
        let balls_before = state.balls_in_over;

        score_extra(&mut state, kind).unwrap();

        let entry_after = state
            .scorecard
            .innings(InningsNo::First)
            .batting
            .get(&before.striker)
            .cloned()
            .unwrap_or_default();
        prop_assert_eq!(entry_after.runs, entry_before.runs);
        prop_assert_eq!(entry_after.fours, entry_before.fours);
        prop_assert_eq!(entry_after.sixes, entry_before.sixes);

        let expected = if kind == ExtraKind::NoBall { balls_before + 1 } else { balls_before };
        prop_assert_eq!(state.balls_in_over, expected);
        prop_assert_eq!(crease(&state), &before);
    }

    /// Property: mid-over, odd runs swap the batsmen and even runs never do.
    #[test]
    fn prop_rotation_follows_parity(
        prefix in prop::collection::vec(test_gens::runs(), 0..5),
        odd in test_gens::odd_runs(),
        even in test_gens::even_runs(),
        use_odd in any::<bool>(),
    ) {
        let mut state = long_match();
        play_runs(&mut state, &prefix);
        let before = crease(&state).clone();

        let runs = if use_odd { odd } else { even };
        score_run(&mut state, runs, false).unwrap();

        let after = crease(&state);
        if use_odd {
            prop_assert_eq!(&after.striker, &before.non_striker);
            prop_assert_eq!(&after.non_striker, &before.striker);
        } else {
            prop_assert_eq!(&after.striker, &before.striker);
            prop_assert_eq!(&after.non_striker, &before.non_striker);
        }
    }

    /// Property: declaring no rotation keeps the striker for any runs.
    #[test]
    fn prop_declared_no_rotate_keeps_striker(
        prefix in prop::collection::vec(test_gens::runs(), 0..5),
        runs in test_gens::runs(),
    ) {
        let mut state = long_match();
        play_runs(&mut state, &prefix);
        let before = crease(&state).clone();

        score_run(&mut state, runs, true).unwrap();
        prop_assert_eq!(crease(&state), &before);
    }
}
