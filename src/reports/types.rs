//! Crowd-sourced delay reports and their votes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::accuracy::accuracy;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(Error::InvalidSeverity(s.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl FromStr for VoteDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(VoteDirection::Up),
            "down" => Ok(VoteDirection::Down),
            _ => Err(Error::InvalidVote(s.to_string())),
        }
    }
}

/// Fields supplied by the reporter. Severity and coordinates are required, so
/// a report can never exist without them.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub latitude: f64,
    pub longitude: f64,
    pub problem: String,
    pub severity: Severity,
    pub image_url: Option<String>,
}

/// A stored delay report.
///
/// `voters` is authoritative; `upvotes` and `downvotes` are a cache of its
/// counts and are only ever rewritten from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayReport {
    pub id: String,
    pub user_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub problem: String,
    pub severity: Severity,
    /// Epoch milliseconds.
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub downvotes: u32,
    #[serde(default)]
    pub voters: HashMap<String, VoteDirection>,
}

impl DelayReport {
    /// Creates a report with zero votes.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        draft: NewReport,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            latitude: draft.latitude,
            longitude: draft.longitude,
            problem: draft.problem,
            severity: draft.severity,
            created_at,
            image_url: draft.image_url,
            upvotes: 0,
            downvotes: 0,
            voters: HashMap::new(),
        }
    }

    /// Records `voter`'s vote, replacing any earlier one, then recounts.
    ///
    /// Voting the same direction twice is a no-op; switching moves one vote
    /// from the old counter to the new one.
    pub fn apply_vote(&mut self, voter: &str, direction: VoteDirection) {
        self.voters.insert(voter.to_string(), direction);
        self.recount();
    }

    /// Removes `voter`'s vote if present. Returns whether anything changed.
    pub fn retract_vote(&mut self, voter: &str) -> bool {
        let removed = self.voters.remove(voter).is_some();
        self.recount();
        removed
    }

    pub fn vote_of(&self, voter: &str) -> Option<VoteDirection> {
        self.voters.get(voter).copied()
    }

    pub fn accuracy(&self) -> u8 {
        accuracy(self.upvotes, self.downvotes)
    }

    /// True when the cached counters agree with the voter map.
    pub fn is_consistent(&self) -> bool {
        let (up, down) = self.count_voters();
        self.upvotes == up && self.downvotes == down
    }

    fn count_voters(&self) -> (u32, u32) {
        self.voters
            .values()
            .fold((0, 0), |(up, down), direction| match direction {
                VoteDirection::Up => (up + 1, down),
                VoteDirection::Down => (up, down + 1),
            })
    }

    fn recount(&mut self) {
        let (up, down) = self.count_voters();
        self.upvotes = up;
        self.downvotes = down;
    }
}
