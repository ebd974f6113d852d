use crate::domain::finalization::TerminationReason;
use crate::domain::matches::TeamIndex;
use crate::domain::state::LiveMatchState;

/// Progress of one side, as far as transitions care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamProgress {
    pub wickets: u32,
    pub completed_overs: u32,
    pub innings_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLifecycleView {
    pub teams: [TeamProgress; 2],
    pub completed: bool,
    pub termination: Option<TerminationReason>,
    pub result: Option<String>,
}

impl MatchLifecycleView {
    pub fn of(state: &LiveMatchState) -> Self {
        let progress = |i: usize| TeamProgress {
            wickets: state.teams[i].wickets,
            completed_overs: state.teams[i].overs.completed(),
            innings_completed: state.teams[i].innings_completed,
        };
        Self {
            teams: [progress(0), progress(1)],
            completed: state.phase.is_completed(),
            termination: state.termination,
            result: state.result.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchTransition {
    /// Edge-triggered: the side lost a wicket; `wickets` is the new total.
    WicketFell { team: TeamIndex, wickets: u32 },

    /// Edge-triggered: the side's completed-over count went up.
    OverCompleted { team: TeamIndex, overs: u32 },

    /// Edge-triggered: the side's innings closed.
    InningsEnded { team: TeamIndex },

    /// Edge-triggered: natural completion with a result.
    MatchCompleted { result: String },

    /// Edge-triggered: admin-forced end.
    MatchTerminated { reason: TerminationReason },
}

/// Derive match transitions from before/after lifecycle state.
pub fn derive_transitions(
    before: &MatchLifecycleView,
    after: &MatchLifecycleView,
) -> Vec<MatchTransition> {
    let mut transitions = Vec::new();

    for team in [TeamIndex::First, TeamIndex::Second] {
        let (b, a) = (before.teams[team.index()], after.teams[team.index()]);
        if a.wickets > b.wickets {
            transitions.push(MatchTransition::WicketFell {
                team,
                wickets: a.wickets,
            });
        }
        if a.completed_overs > b.completed_overs {
            transitions.push(MatchTransition::OverCompleted {
                team,
                overs: a.completed_overs,
            });
        }
        if a.innings_completed && !b.innings_completed {
            transitions.push(MatchTransition::InningsEnded { team });
        }
    }

    if after.completed && !before.completed {
        match after.termination {
            Some(reason) => transitions.push(MatchTransition::MatchTerminated { reason }),
            None => transitions.push(MatchTransition::MatchCompleted {
                result: after.result.clone().unwrap_or_default(),
            }),
        }
    }

    transitions
}
