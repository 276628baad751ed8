use serde::Deserialize;
use tauri::State;

use crate::commands::{run_blocking, AppState, CommandResult};
use crate::models::house::{AcademicYear, Category, Department, House};
use crate::models::ledger::{PointLog, SystemState};
use crate::services::ledger_service::RecordPointsInput;

const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsRecordRequest {
    pub house: House,
    pub points: i64,
    pub category: String,
    pub department: Department,
    pub year: AcademicYear,
    pub student_name: String,
}

#[tauri::command]
pub async fn points_record(
    state: State<'_, AppState>,
    request: PointsRecordRequest,
) -> CommandResult<SystemState> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        app_state.ledger().record_points(RecordPointsInput {
            house: request.house,
            points: request.points,
            category: Category::from(request.category.as_str()),
            department: request.department,
            year: request.year,
            student_name: request.student_name,
        })
    })
    .await
}

#[tauri::command]
pub async fn history_fetch(
    state: State<'_, AppState>,
    department: Option<Department>,
    limit: Option<usize>,
) -> CommandResult<Vec<PointLog>> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        app_state
            .ledger()
            .recent_history(department, limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
    })
    .await
}

#[tauri::command]
pub async fn state_fetch(state: State<'_, AppState>) -> CommandResult<SystemState> {
    let app_state = state.inner().clone();

    run_blocking(move || app_state.store().snapshot()).await
}
