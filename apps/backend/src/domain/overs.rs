//! Ball-granular over counting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Legal deliveries in one over.
pub const BALLS_PER_OVER: u32 = 6;

/// Over count kept as legal balls so no precision is lost.
///
/// Renders in the conventional `overs.balls` notation (`3.2` is three overs
/// and two balls), while [`Overs::as_decimal`] gives true fractional overs
/// for rate calculations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overs {
    balls: u32,
}

impl Overs {
    pub const ZERO: Overs = Overs { balls: 0 };

    pub const fn from_balls(balls: u32) -> Self {
        Self { balls }
    }

    pub const fn whole(overs: u32) -> Self {
        Self {
            balls: overs * BALLS_PER_OVER,
        }
    }

    pub const fn balls(self) -> u32 {
        self.balls
    }

    /// Completed overs.
    pub const fn completed(self) -> u32 {
        self.balls / BALLS_PER_OVER
    }

    /// Balls into the current, unfinished over.
    pub const fn remainder(self) -> u32 {
        self.balls % BALLS_PER_OVER
    }

    pub fn add_ball(&mut self) {
        self.balls += 1;
    }

    /// Round up to the next whole over; no-op when already whole.
    pub fn complete_over(&mut self) {
        let rem = self.remainder();
        if rem != 0 {
            self.balls += BALLS_PER_OVER - rem;
        }
    }

    /// `3.2` for three overs and two balls.
    pub fn as_notation(self) -> f64 {
        self.completed() as f64 + self.remainder() as f64 / 10.0
    }

    /// `3.333..` for three overs and two balls.
    pub fn as_decimal(self) -> f64 {
        self.balls as f64 / BALLS_PER_OVER as f64
    }
}

impl std::ops::Add for Overs {
    type Output = Overs;

    fn add(self, rhs: Overs) -> Overs {
        Overs::from_balls(self.balls + rhs.balls)
    }
}

impl std::ops::AddAssign for Overs {
    fn add_assign(&mut self, rhs: Overs) {
        self.balls += rhs.balls;
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.completed(), self.remainder())
    }
}
