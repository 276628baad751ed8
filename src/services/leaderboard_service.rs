use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;

use crate::error::AppResult;
use crate::models::house::{Department, House};
use crate::models::ledger::{PointLog, SystemState};
use crate::services::state_store::StateStore;

const TOP_STUDENTS_PER_DEPARTMENT: usize = 3;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HouseStanding {
    pub house: House,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentStanding {
    pub student: String,
    pub house: House,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopStudent {
    pub student: String,
    pub house: House,
    pub department: Department,
    pub score: i64,
}

/// Input for the admin's printable merit certificates.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateData {
    pub student: String,
    pub department: Department,
    pub house: House,
    pub rank: String,
}

/// Read-side projections over the event log and counters. Everything here is
/// recomputed from a state snapshot on every call; nothing is stored back.
pub struct LeaderboardService {
    store: Arc<StateStore>,
}

impl LeaderboardService {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    pub fn weekly_leaderboard(&self) -> AppResult<Vec<HouseStanding>> {
        let state = self.store.snapshot()?;
        Ok(rank_houses(&state.weekly_points))
    }

    pub fn championship_leaderboard(&self) -> AppResult<Vec<HouseStanding>> {
        let state = self.store.snapshot()?;
        Ok(rank_houses(&state.championship_points))
    }

    pub fn top_students_by_department(
        &self,
    ) -> AppResult<BTreeMap<Department, Vec<StudentStanding>>> {
        let state = self.store.snapshot()?;
        Ok(top_students_by_department(&state))
    }

    pub fn overall_topper(&self) -> AppResult<Option<TopStudent>> {
        let state = self.store.snapshot()?;
        Ok(overall_topper(&state))
    }

    /// Names offered as suggestions in a department's entry form: the
    /// uploaded roster plus every name already seen in that department's
    /// history, duplicates suppressed.
    pub fn name_suggestions(&self, department: Department) -> AppResult<Vec<String>> {
        let state = self.store.snapshot()?;
        Ok(name_suggestions(&state, department))
    }

    /// Certificate entries: top three per teaching department, plus the
    /// overall topper across all departments.
    pub fn certificates(&self) -> AppResult<Vec<CertificateData>> {
        let state = self.store.snapshot()?;
        let mut certificates = Vec::new();

        let per_department = top_students_by_department(&state);
        for (department, standings) in &per_department {
            for (index, standing) in standings.iter().enumerate() {
                certificates.push(CertificateData {
                    student: standing.student.clone(),
                    department: *department,
                    house: standing.house,
                    rank: rank_label(index),
                });
            }
        }

        if let Some(topper) = overall_topper(&state) {
            certificates.push(CertificateData {
                student: topper.student,
                department: topper.department,
                house: topper.house,
                rank: "Overall Topper".to_string(),
            });
        }

        Ok(certificates)
    }
}

/// Houses sorted by score descending; ties keep `House::ALL` order.
pub fn rank_houses(points: &HashMap<House, i64>) -> Vec<HouseStanding> {
    let mut standings: Vec<HouseStanding> = House::ALL
        .into_iter()
        .map(|house| HouseStanding {
            house,
            score: points.get(&house).copied().unwrap_or(0),
        })
        .collect();
    standings.sort_by_key(|standing| Reverse(standing.score));
    standings
}

pub fn top_students_by_department(
    state: &SystemState,
) -> BTreeMap<Department, Vec<StudentStanding>> {
    let mut results = BTreeMap::new();

    for department in Department::teaching() {
        let logs = state
            .history
            .iter()
            .filter(|log| log.department == department);
        let mut standings = aggregate_students(logs);
        standings.truncate(TOP_STUDENTS_PER_DEPARTMENT);
        if !standings.is_empty() {
            results.insert(department, standings);
        }
    }

    results
}

pub fn overall_topper(state: &SystemState) -> Option<TopStudent> {
    let standings = aggregate_students(state.history.iter());
    let top = standings.into_iter().next()?;

    // The department of record follows the same first-seen rule as the house.
    let department = state
        .history
        .iter()
        .find(|log| log.student_name == top.student)
        .map(|log| log.department)?;

    Some(TopStudent {
        student: top.student,
        house: top.house,
        department,
        score: top.score,
    })
}

pub fn name_suggestions(state: &SystemState, department: Department) -> Vec<String> {
    let mut names: Vec<String> = state
        .student_names
        .get(&department)
        .cloned()
        .unwrap_or_default();

    for log in &state.history {
        if log.department == department && !names.iter().any(|name| name == &log.student_name) {
            names.push(log.student_name.clone());
        }
    }

    names
}

/// Sums points per student over the given logs. The history is stored newest
/// first, so the first entry seen for a student decides their house of
/// record, even if they later accrued points under another house.
fn aggregate_students<'a>(logs: impl Iterator<Item = &'a PointLog>) -> Vec<StudentStanding> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut standings: Vec<StudentStanding> = Vec::new();

    for log in logs {
        match index.get(log.student_name.as_str()) {
            Some(&position) => standings[position].score += log.points,
            None => {
                index.insert(log.student_name.clone(), standings.len());
                standings.push(StudentStanding {
                    student: log.student_name.clone(),
                    house: log.house,
                    score: log.points,
                });
            }
        }
    }

    // Stable: tied students stay in first-encountered order.
    standings.sort_by_key(|standing| Reverse(standing.score));
    standings
}

fn rank_label(index: usize) -> String {
    match index {
        0 => "First Place".to_string(),
        1 => "Second Place".to_string(),
        _ => "Third Place".to_string(),
    }
}
