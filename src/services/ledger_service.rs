use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::house::{AcademicYear, Category, Department, House};
use crate::models::ledger::{EntryType, PointLog, SystemState};
use crate::services::state_store::StateStore;

#[derive(Debug, Clone)]
pub struct RecordPointsInput {
    pub house: House,
    pub points: i64,
    pub category: Category,
    pub department: Department,
    pub year: AcademicYear,
    pub student_name: String,
}

/// Applies point-adjustment events and keeps the running per-house counters
/// in step with the event log.
pub struct LedgerService {
    store: Arc<StateStore>,
}

impl LedgerService {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    /// Records one adjustment: prepends the event to the history, bumps both
    /// the weekly and championship counters for the house, and registers the
    /// student name with the department.
    ///
    /// A blank student name is a silent no-op and returns the state
    /// unchanged; the UI treats this as an abandoned form, not an error.
    pub fn record_points(&self, input: RecordPointsInput) -> AppResult<SystemState> {
        let trimmed = input.student_name.trim();
        if trimmed.is_empty() {
            warn!(target: "app::ledger", "ignoring point entry with empty student name");
            return self.store.snapshot();
        }

        if input.points == 0 {
            return Err(AppError::validation("point adjustment must be nonzero"));
        }

        let log = PointLog {
            id: Uuid::new_v4().to_string(),
            student_name: trimmed.to_string(),
            house: input.house,
            points: input.points,
            category: input.category,
            department: input.department,
            year: input.year,
            timestamp: Utc::now().timestamp_millis(),
            entry_type: EntryType::from_points(input.points),
        };

        let (state, _) = self.store.update(|state| {
            *state.weekly_points.entry(log.house).or_insert(0) += log.points;
            *state.championship_points.entry(log.house).or_insert(0) += log.points;

            let names = state.student_names.entry(log.department).or_default();
            if !names.iter().any(|name| name == &log.student_name) {
                names.push(log.student_name.clone());
            }

            state.history.insert(0, log.clone());
        })?;

        info!(
            target: "app::ledger",
            house = %input.house,
            points = input.points,
            department = %input.department,
            "recorded point adjustment"
        );

        Ok(state)
    }

    /// Recent events, newest first, optionally filtered to one department.
    pub fn recent_history(
        &self,
        department: Option<Department>,
        limit: usize,
    ) -> AppResult<Vec<PointLog>> {
        let state = self.store.snapshot()?;
        let logs = state
            .history
            .into_iter()
            .filter(|log| department.map_or(true, |dept| log.department == dept))
            .take(limit)
            .collect();
        Ok(logs)
    }
}
