//! Student records and grade bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of grades a student record may hold.
pub const MAX_GRADES: usize = 4;

/// A single numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// The score value.
    pub grade: f64,
}

impl Grade {
    /// Creates a new grade.
    #[must_use]
    pub fn new(grade: f64) -> Self {
        Self { grade }
    }
}

/// A student record tracked by the store.
///
/// Wire field names keep the camelCase the API has always used
/// (`lastNames`, `gradeAverage`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique record identifier, assigned at creation.
    pub id: String,
    /// First name(s).
    pub names: String,
    /// Last name(s).
    #[serde(rename = "lastNames")]
    pub last_names: String,
    /// Up to [`MAX_GRADES`] scores.
    pub grades: Vec<Grade>,
    /// Derived mean of `grades`, rounded to two decimals; 0.0 when empty.
    ///
    /// Never settable by callers; recomputed whenever grades change.
    #[serde(rename = "gradeAverage")]
    pub grade_average: f64,
}

impl Student {
    /// Creates a new record, computing the grade average.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        names: impl Into<String>,
        last_names: impl Into<String>,
        grades: Vec<Grade>,
    ) -> Self {
        let grade_average = grade_average(&grades);
        Self {
            id: id.into(),
            names: names.into(),
            last_names: last_names.into(),
            grades,
            grade_average,
        }
    }

    /// Replaces the grades list wholesale and recomputes the average.
    pub fn set_grades(&mut self, grades: Vec<Grade>) {
        self.grade_average = grade_average(&grades);
        self.grades = grades;
    }
}

/// Payload for creating a student record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    /// First name(s), required.
    pub names: String,
    /// Last name(s), required.
    #[serde(rename = "lastNames")]
    pub last_names: String,
    /// Initial grades, at most [`MAX_GRADES`].
    #[serde(default)]
    pub grades: Vec<Grade>,
}

impl NewStudent {
    /// Creates a new create-payload.
    #[must_use]
    pub fn new(
        names: impl Into<String>,
        last_names: impl Into<String>,
        grades: Vec<Grade>,
    ) -> Self {
        Self {
            names: names.into(),
            last_names: last_names.into(),
            grades,
        }
    }
}

/// Mean of the grades rounded to two decimal places, 0.0 for an empty list.
#[must_use]
pub fn grade_average(grades: &[Grade]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = grades.iter().map(|g| g.grade).sum::<f64>() / grades.len() as f64;
    (mean * 100.0).round() / 100.0
}

/// Generates a record id from the name prefixes and the creation time.
///
/// Format: up to the first three characters of each name, the unix
/// timestamp in seconds, and the date as `YYYYMMDD`, underscore-joined.
/// Two records with matching prefixes created within the same second
/// collide; the store rejects the duplicate rather than overwriting it.
#[must_use]
pub fn student_id(names: &str, last_names: &str, now: DateTime<Utc>) -> String {
    let first: String = names.chars().take(3).collect();
    let last: String = last_names.chars().take(3).collect();
    format!(
        "{}_{}_{}_{}",
        first,
        last,
        now.timestamp(),
        now.format("%Y%m%d")
    )
}
