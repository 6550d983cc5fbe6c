//! Category/level filtering and multi-field sorting shared by checklist,
//! quiz and interview-question listings.
//!
//! Ascending order is fixed per field: dates oldest first, levels easiest
//! first, estimated time shortest first, points lowest first, titles A to Z.
//! Items without a value for the sort field always come last.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::model::{Checklist, InterviewQuestion, Level, Quiz};

//
// ─── FILTER STATE ──────────────────────────────────────────────────────────────
//

/// Either no filtering, or an exact match on one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    #[must_use]
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted),
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        s.parse().map(Selection::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Date,
    Difficulty,
    EstimatedTime,
    Points,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Same field, opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        Self {
            field: self.field,
            direction: self.direction.toggled(),
        }
    }
}

impl Default for SortSpec {
    /// Newest first.
    fn default() -> Self {
        Self::new(SortField::Date, SortDirection::Desc)
    }
}

/// Transient listing filters. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<L> {
    pub category: Selection<String>,
    pub level: Selection<L>,
    pub sort: SortSpec,
}

impl<L> Default for FilterState<L> {
    fn default() -> Self {
        Self {
            category: Selection::All,
            level: Selection::All,
            sort: SortSpec::default(),
        }
    }
}

impl<L> FilterState<L> {
    /// Resets every filter and the sort to defaults.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Selecting the current sort field flips direction; a new field starts
    /// ascending.
    pub fn select_sort(&mut self, field: SortField) {
        self.sort = if self.sort.field == field {
            self.sort.toggled()
        } else {
            SortSpec::new(field, SortDirection::Asc)
        };
    }
}

//
// ─── FILTERABLE CONTENT ────────────────────────────────────────────────────────
//

/// Comparable value of a sort field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Date(NaiveDate),
    Rank(u8),
    Number(u32),
    Text(String),
}

/// Content that can appear in a filtered listing.
pub trait Filterable {
    type Level: Level;

    fn category(&self) -> &str;
    fn level(&self) -> Option<Self::Level>;
    fn sort_key(&self, field: SortField) -> Option<SortKey>;
}

/// Filters then stably sorts `items`. The input slice is never modified.
#[must_use]
pub fn apply_filters<'a, T: Filterable>(
    items: &'a [T],
    state: &FilterState<T::Level>,
) -> Vec<&'a T> {
    let mut selected: Vec<&T> = items
        .iter()
        .filter(|item| match &state.category {
            Selection::All => true,
            Selection::Only(category) => category == item.category(),
        })
        .filter(|item| state.level.matches(item.level().as_ref()))
        .collect();

    let SortSpec { field, direction } = state.sort;
    selected.sort_by(|a, b| match (a.sort_key(field), b.sort_key(field)) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    selected
}

/// Distinct categories across `items`, sorted.
#[must_use]
pub fn categories<T: Filterable>(items: &[T]) -> Vec<String> {
    let mut names: Vec<String> = items.iter().map(|i| i.category().to_string()).collect();
    names.sort();
    names.dedup();
    names
}

fn title_key(title: &str) -> SortKey {
    SortKey::Text(title.trim().to_lowercase())
}

impl Filterable for Checklist {
    type Level = crate::model::Difficulty;

    fn category(&self) -> &str {
        &self.category
    }

    fn level(&self) -> Option<Self::Level> {
        Some(self.difficulty)
    }

    fn sort_key(&self, field: SortField) -> Option<SortKey> {
        match field {
            SortField::Date => self.published_at.map(SortKey::Date),
            SortField::Difficulty => Some(SortKey::Rank(self.difficulty.rank())),
            SortField::EstimatedTime => self.estimated_minutes.map(SortKey::Number),
            SortField::Points => None,
            SortField::Title => Some(title_key(&self.title)),
        }
    }
}

impl Filterable for Quiz {
    type Level = crate::model::Difficulty;

    fn category(&self) -> &str {
        &self.category
    }

    fn level(&self) -> Option<Self::Level> {
        Some(self.difficulty)
    }

    fn sort_key(&self, field: SortField) -> Option<SortKey> {
        match field {
            SortField::Date => self.published_at.map(SortKey::Date),
            SortField::Difficulty => Some(SortKey::Rank(self.difficulty.rank())),
            SortField::EstimatedTime => self.estimated_minutes.map(SortKey::Number),
            SortField::Points => Some(SortKey::Number(self.total_points())),
            SortField::Title => Some(title_key(&self.title)),
        }
    }
}

impl Filterable for InterviewQuestion {
    type Level = crate::model::Tier;

    fn category(&self) -> &str {
        &self.category
    }

    fn level(&self) -> Option<Self::Level> {
        Some(self.tier)
    }

    fn sort_key(&self, field: SortField) -> Option<SortKey> {
        match field {
            SortField::Date => self.published_at.map(SortKey::Date),
            SortField::Difficulty => Some(SortKey::Rank(self.tier.rank())),
            SortField::EstimatedTime | SortField::Points => None,
            SortField::Title => Some(title_key(&self.question)),
        }
    }
}

//
// ─── PARSING ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortField(pub String);

impl fmt::Display for UnknownSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort field: {}", self.0)
    }
}

impl std::error::Error for UnknownSortField {}

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "difficulty" | "level" | "tier" => Ok(SortField::Difficulty),
            "estimated-time" | "time" => Ok(SortField::EstimatedTime),
            "points" => Ok(SortField::Points),
            "title" => Ok(SortField::Title),
            _ => Err(UnknownSortField(s.to_string())),
        }
    }
}
