use std::collections::BTreeMap;

use serde::Serialize;
use tauri::State;

use crate::commands::{run_blocking, AppState, CommandResult};
use crate::models::house::Department;
use crate::services::leaderboard_service::{HouseStanding, StudentStanding, TopStudent};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub weekly: Vec<HouseStanding>,
    pub championship: Vec<HouseStanding>,
}

#[tauri::command]
pub async fn leaderboard_fetch(state: State<'_, AppState>) -> CommandResult<LeaderboardResponse> {
    let app_state = state.inner().clone();

    run_blocking(move || {
        let boards = app_state.leaderboards();
        Ok(LeaderboardResponse {
            weekly: boards.weekly_leaderboard()?,
            championship: boards.championship_leaderboard()?,
        })
    })
    .await
}

#[tauri::command]
pub async fn top_students_fetch(
    state: State<'_, AppState>,
) -> CommandResult<BTreeMap<Department, Vec<StudentStanding>>> {
    let app_state = state.inner().clone();

    run_blocking(move || app_state.leaderboards().top_students_by_department()).await
}

#[tauri::command]
pub async fn overall_topper_fetch(
    state: State<'_, AppState>,
) -> CommandResult<Option<TopStudent>> {
    let app_state = state.inner().clone();

    run_blocking(move || app_state.leaderboards().overall_topper()).await
}

#[tauri::command]
pub async fn name_suggestions_fetch(
    state: State<'_, AppState>,
    department: Department,
) -> CommandResult<Vec<String>> {
    let app_state = state.inner().clone();

    run_blocking(move || app_state.leaderboards().name_suggestions(department)).await
}
