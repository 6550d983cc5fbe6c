//! Per-domain progress records and the pure derivations computed from them.
//!
//! Records are keyed by item id and tolerate stale keys: every aggregate is
//! counted over the current content list, never over record keys.

mod checklist;
mod interview;
mod quiz;
mod rating;

pub use checklist::ChecklistProgress;
pub use interview::{InterviewProgress, QuestionProgress};
pub use quiz::{QuizAttempt, QuizResult};
pub use rating::{SCORE_BANDS, ScoreRating, score_rating};

/// Shape checks applied to a decoded record before it is trusted.
///
/// A record that fails here is discarded exactly like unparseable JSON.
pub trait PersistedShape {
    fn is_well_formed(&self) -> bool {
        true
    }
}

/// `round(100 * part / total)`, or `0` when `total` is zero. Never exceeds 100.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total);
    ((part as f64 * 100.0) / total as f64).round() as u8
}
