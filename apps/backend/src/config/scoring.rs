//! Scoring session configuration loaded from the environment.
//!
//! - `SCORING_TOSS_SEED`: optional `u64` seeding the toss RNG; absent means OS entropy.
//! - `SCORING_COMMIT_ATTEMPTS`: attempts at committing a finalized match (default 3, min 1).
//! - `SCORING_SCRIPT`: session script path, required only by the replay binary.

use std::env;
use std::path::PathBuf;

use crate::error::AppError;

pub const DEFAULT_COMMIT_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    pub toss_seed: Option<u64>,
    pub commit_attempts: u32,
    pub script: Option<PathBuf>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            toss_seed: None,
            commit_attempts: DEFAULT_COMMIT_ATTEMPTS,
            script: None,
        }
    }
}

impl ScoringConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let toss_seed = get("SCORING_TOSS_SEED")
            .map(|raw| {
                raw.parse::<u64>().map_err(|_| {
                    AppError::config(format!("SCORING_TOSS_SEED must be a u64, got {raw:?}"))
                })
            })
            .transpose()?;

        let commit_attempts = match get("SCORING_COMMIT_ATTEMPTS") {
            None => DEFAULT_COMMIT_ATTEMPTS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(AppError::config(format!(
                        "SCORING_COMMIT_ATTEMPTS must be a positive integer, got {raw:?}"
                    )))
                }
            },
        };

        Ok(Self {
            toss_seed,
            commit_attempts,
            script: get("SCORING_SCRIPT").map(PathBuf::from),
        })
    }

    pub fn with_toss_seed(mut self, seed: u64) -> Self {
        self.toss_seed = Some(seed);
        self
    }

    pub fn with_commit_attempts(mut self, attempts: u32) -> Self {
        self.commit_attempts = attempts.max(1);
        self
    }
}
