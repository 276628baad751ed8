use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::house::{AcademicYear, Category, Department, House};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Addition,
    Subtraction,
}

impl EntryType {
    /// Derived from the sign of the adjustment; zero is rejected upstream.
    pub fn from_points(points: i64) -> Self {
        if points > 0 {
            EntryType::Addition
        } else {
            EntryType::Subtraction
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Addition => "addition",
            EntryType::Subtraction => "subtraction",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable point-adjustment fact. Created exactly once, never edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PointLog {
    pub id: String,
    pub student_name: String,
    pub house: House,
    pub points: i64,
    pub category: Category,
    pub department: Department,
    pub year: AcademicYear,
    /// Epoch milliseconds.
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

/// Archive record cut at each weekly reset, newest first in the state
/// document. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyWinner {
    pub week_end_date: String,
    pub winner: House,
    pub runner: House,
    pub second_runner: House,
    pub scores: HashMap<House, i64>,
}

/// The root aggregate. One document per installation, mirrored to a single
/// key-value blob on every change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemState {
    pub weekly_points: HashMap<House, i64>,
    pub championship_points: HashMap<House, i64>,
    pub history: Vec<PointLog>,
    pub weekly_winners: Vec<WeeklyWinner>,
    /// Epoch milliseconds; only ever moves forward.
    pub last_reset_timestamp: i64,
    #[serde(default)]
    pub student_names: BTreeMap<Department, Vec<String>>,
}

impl SystemState {
    /// The zeroed default document used on first launch and after a failed
    /// or legacy load.
    pub fn initial(now_millis: i64) -> Self {
        Self {
            weekly_points: Self::zeroed_points(),
            championship_points: Self::zeroed_points(),
            history: Vec::new(),
            weekly_winners: Vec::new(),
            last_reset_timestamp: now_millis,
            student_names: BTreeMap::new(),
        }
    }

    /// All four houses present, all at zero.
    pub fn zeroed_points() -> HashMap<House, i64> {
        House::ALL.into_iter().map(|house| (house, 0)).collect()
    }

    pub fn weekly_score(&self, house: House) -> i64 {
        self.weekly_points.get(&house).copied().unwrap_or(0)
    }

    pub fn championship_score(&self, house: House) -> i64 {
        self.championship_points.get(&house).copied().unwrap_or(0)
    }
}
