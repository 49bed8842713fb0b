use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Auto-advance stops once the clock reaches regulation time.
pub const AUTO_ADVANCE_LIMIT: i32 = 90;
/// Upper bound for manual minute adjustment (extra time included).
pub const MAX_MINUTE: i32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Live => "live",
            MatchStatus::Finished => "finished",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a fixture a score change applies to.
/// Elimination matches call the sides `team1` / `team2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[serde(alias = "team1")]
    Home,
    #[serde(alias = "team2")]
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreDelta {
    Increment,
    Decrement,
}

impl TryFrom<i32> for ScoreDelta {
    type Error = LifecycleError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ScoreDelta::Increment),
            -1 => Ok(ScoreDelta::Decrement),
            other => Err(LifecycleError::InvalidDelta(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub home: i32,
    pub away: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Score {
    pub fn new(home: i32, away: i32) -> Self {
        Self { home, away }
    }

    pub fn outcome(&self) -> Outcome {
        if self.home > self.away {
            Outcome::HomeWin
        } else if self.away > self.home {
            Outcome::AwayWin
        } else {
            Outcome::Draw
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut i32 {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }
}

/// A single write to the match clock. The per-minute ticker and the manual
/// control both go through [`LiveState::apply_minute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinuteUpdate {
    Tick,
    Set(i32),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("match cannot be started while {0}")]
    NotScheduled(MatchStatus),

    #[error("match is not live (currently {0})")]
    NotLive(MatchStatus),

    #[error("score delta must be +1 or -1, got {0}")]
    InvalidDelta(i32),

    #[error("both bracket slots must be filled before the match can start")]
    BracketSlotEmpty,
}

pub fn clamp_minute(minute: i32) -> i32 {
    minute.clamp(0, MAX_MINUTE)
}

/// The mutable part of a fixture shared by regular and elimination matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveState {
    pub status: MatchStatus,
    pub current_minute: i32,
    pub live_score: Score,
    pub final_score: Option<Score>,
}

impl Default for LiveState {
    fn default() -> Self {
        Self {
            status: MatchStatus::Scheduled,
            current_minute: 0,
            live_score: Score::default(),
            final_score: None,
        }
    }
}

impl LiveState {
    pub fn start(&mut self) -> Result<(), LifecycleError> {
        if self.status != MatchStatus::Scheduled {
            return Err(LifecycleError::NotScheduled(self.status));
        }
        self.status = MatchStatus::Live;
        self.current_minute = 1;
        self.live_score = Score::default();
        Ok(())
    }

    /// Live scores never drop below zero; the final score is untouched.
    pub fn adjust_live_score(&mut self, side: Side, delta: ScoreDelta) -> Result<Score, LifecycleError> {
        self.require_live()?;
        let goals = self.live_score.side_mut(side);
        *goals = match delta {
            ScoreDelta::Increment => *goals + 1,
            ScoreDelta::Decrement => (*goals - 1).max(0),
        };
        Ok(self.live_score)
    }

    /// Returns the new minute, or `None` when a tick left the clock where it was.
    pub fn apply_minute(&mut self, update: MinuteUpdate) -> Result<Option<i32>, LifecycleError> {
        self.require_live()?;
        match update {
            MinuteUpdate::Tick => {
                if self.current_minute >= AUTO_ADVANCE_LIMIT {
                    return Ok(None);
                }
                self.current_minute += 1;
            }
            MinuteUpdate::Set(minute) => {
                self.current_minute = clamp_minute(minute);
            }
        }
        Ok(Some(self.current_minute))
    }

    /// Freezes the live tally as the final score. A second call is rejected.
    pub fn finish(&mut self) -> Result<Score, LifecycleError> {
        self.require_live()?;
        self.status = MatchStatus::Finished;
        self.final_score = Some(self.live_score);
        Ok(self.live_score)
    }

    pub fn is_played(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    fn require_live(&self) -> Result<(), LifecycleError> {
        if self.status != MatchStatus::Live {
            return Err(LifecycleError::NotLive(self.status));
        }
        Ok(())
    }
}

/// Winner of a knockout tie. Level scores leave the winner unset.
pub fn decide_winner(score: Score, team1_id: Option<Uuid>, team2_id: Option<Uuid>) -> Option<Uuid> {
    match score.outcome() {
        Outcome::HomeWin => team1_id,
        Outcome::AwayWin => team2_id,
        Outcome::Draw => None,
    }
}
