//! Priority levels and their sort rank.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort rank given to tasks whose priority has never been assigned.
pub const UNSET_PRIORITY_RANK: u8 = 4;

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Needs attention first.
    High,
    /// Should be handled soon.
    Medium,
    /// Can wait.
    Low,
    /// Nice to have.
    Optional,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Optional => "optional",
        }
    }

    /// Returns the sort rank, lower ranks first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
            Self::Optional => 3,
        }
    }

    /// Maps an accumulated urgency score onto a priority level.
    #[must_use]
    pub const fn from_points(points: u32) -> Self {
        match points {
            5.. => Self::High,
            3..=4 => Self::Medium,
            1..=2 => Self::Low,
            0 => Self::Optional,
        }
    }
}

/// Returns the sort rank of a possibly unset priority.
#[must_use]
pub const fn priority_rank(priority: Option<Priority>) -> u8 {
    match priority {
        Some(level) => level.rank(),
        None => UNSET_PRIORITY_RANK,
    }
}

impl TryFrom<&str> for Priority {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "optional" => Ok(Self::Optional),
            _ => Err(TaskDomainError::UnknownPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
