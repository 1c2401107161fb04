//! Pomodoro timer configuration and session cycle.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Kind of timed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionKind {
    /// Focused work session.
    Focus,
    /// Short break between work sessions.
    ShortBreak,
    /// Long break after a full cycle of work sessions.
    LongBreak,
}

impl SessionKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::ShortBreak => "shortBreak",
            Self::LongBreak => "longBreak",
        }
    }
}

impl TryFrom<&str> for SessionKind {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "focus" => Ok(Self::Focus),
            "shortBreak" => Ok(Self::ShortBreak),
            "longBreak" => Ok(Self::LongBreak),
            _ => Err(TaskDomainError::UnknownSessionKind(value.to_owned())),
        }
    }
}

/// Pomodoro durations in minutes and the long-break cadence.
///
/// # Examples
///
/// ```
/// use focusboard::task::domain::{PomodoroSettings, SessionKind};
///
/// let settings = PomodoroSettings::default();
/// assert_eq!(settings.work_duration, 25);
/// assert_eq!(settings.phase_after(4), SessionKind::LongBreak);
/// assert_eq!(settings.phase_after(5), SessionKind::ShortBreak);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    /// Work session length in minutes.
    pub work_duration: u32,
    /// Short break length in minutes.
    pub short_break_duration: u32,
    /// Long break length in minutes.
    pub long_break_duration: u32,
    /// Work sessions completed before a long break.
    pub sessions_before_long_break: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_duration: 25,
            short_break_duration: 5,
            long_break_duration: 15,
            sessions_before_long_break: 4,
        }
    }
}

impl PomodoroSettings {
    /// Returns the break that follows the given number of finished work
    /// sessions.
    ///
    /// A cadence of zero never schedules a long break.
    #[must_use]
    pub const fn phase_after(&self, completed_work_sessions: u32) -> SessionKind {
        match completed_work_sessions.checked_rem(self.sessions_before_long_break) {
            Some(0) if completed_work_sessions > 0 => SessionKind::LongBreak,
            _ => SessionKind::ShortBreak,
        }
    }

    /// Returns the configured length of a session kind in minutes.
    #[must_use]
    pub const fn duration_of(&self, kind: SessionKind) -> u32 {
        match kind {
            SessionKind::Focus => self.work_duration,
            SessionKind::ShortBreak => self.short_break_duration,
            SessionKind::LongBreak => self.long_break_duration,
        }
    }
}
