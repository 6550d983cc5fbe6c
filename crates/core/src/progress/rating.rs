/// Label and emoji shown next to a quiz score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRating {
    pub label: &'static str,
    pub emoji: &'static str,
}

/// Score bands, highest cutoff first. Cutoffs are inclusive lower bounds.
pub const SCORE_BANDS: [(u8, ScoreRating); 4] = [
    (90, ScoreRating { label: "Expert!", emoji: "🏆" }),
    (75, ScoreRating { label: "Great job!", emoji: "🎉" }),
    (60, ScoreRating { label: "Good effort!", emoji: "👍" }),
    (40, ScoreRating { label: "Keep practicing!", emoji: "📚" }),
];

const FALLBACK: ScoreRating = ScoreRating {
    label: "Review the material",
    emoji: "💪",
};

/// Rating for a score percentage.
#[must_use]
pub fn score_rating(percentage: u8) -> ScoreRating {
    SCORE_BANDS
        .iter()
        .find(|(cutoff, _)| percentage >= *cutoff)
        .map_or(FALLBACK, |(_, rating)| *rating)
}
