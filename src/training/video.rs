//! Watch tracking for a single training video.
//!
//! Player callbacks arrive as a stream of [`PlayerEvent`]s; [`WatchProgress::apply`]
//! is the only place that turns them into new watch state. Persisting a
//! completion is left to the caller.

use serde::{Deserialize, Serialize};
use crate::config::TrainingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    Ready { duration: f64 },
    Playing,
    /// Sent on the poll interval while the video plays.
    Progress { position: f64, duration: f64 },
    /// The player stalled, usually because the viewer dragged the scrubber.
    Buffering { position: f64 },
    Paused,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WatchProgress {
    pub duration: f64,
    pub max_position: f64,
    pub playing: bool,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchRules {
    pub completion_ratio: f64,
    pub seek_tolerance: f64,
}

impl From<&TrainingConfig> for WatchRules {
    fn from(config: &TrainingConfig) -> Self {
        Self {
            completion_ratio: config.completion_ratio,
            seek_tolerance: config.seek_tolerance_secs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchOutcome {
    pub progress: WatchProgress,
    /// Where the player must jump back to after a skip attempt.
    pub seek_to: Option<f64>,
    pub newly_completed: bool,
}

impl WatchProgress {
    pub fn percent(&self) -> f64 {
        if self.duration > 0.0 {
            (self.max_position / self.duration * 100.0).min(100.0)
        } else {
            0.0
        }
    }

    pub fn apply(mut self, event: PlayerEvent, rules: WatchRules) -> WatchOutcome {
        let mut seek_to = None;
        let was_completed = self.completed;

        match event {
            PlayerEvent::Ready { duration } => self.set_duration(duration),
            PlayerEvent::Playing => self.playing = true,
            PlayerEvent::Progress { position, duration } => {
                self.set_duration(duration);
                seek_to = self.observe(position, rules);
                self.check_threshold(rules);
            }
            PlayerEvent::Buffering { position } => {
                seek_to = self.observe(position, rules);
                self.check_threshold(rules);
            }
            PlayerEvent::Paused => self.playing = false,
            PlayerEvent::Ended => {
                self.playing = false;
                if self.duration > 0.0 {
                    self.max_position = self.duration;
                }
                self.completed = true;
            }
        }

        WatchOutcome {
            progress: self,
            seek_to,
            newly_completed: self.completed && !was_completed,
        }
    }

    fn set_duration(&mut self, duration: f64) {
        if duration.is_finite() && duration > 0.0 {
            self.duration = duration;
        }
    }

    // A jump past the furthest watched point snaps back to it.
    fn observe(&mut self, position: f64, rules: WatchRules) -> Option<f64> {
        let position = position.max(0.0);
        if position > self.max_position + rules.seek_tolerance {
            return Some(self.max_position);
        }
        self.max_position = self.max_position.max(position);
        None
    }

    fn check_threshold(&mut self, rules: WatchRules) {
        if self.duration > 0.0 && self.max_position / self.duration >= rules.completion_ratio {
            self.completed = true;
        }
    }
}
