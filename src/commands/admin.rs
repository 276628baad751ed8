use tauri::State;

use crate::commands::{run_blocking, AppState, CommandResult};
use crate::models::house::Department;
use crate::models::ledger::{SystemState, WeeklyWinner};
use crate::services::leaderboard_service::CertificateData;

/// Manual admin reset: archives the current weekly standings immediately.
#[tauri::command]
pub async fn reset_trigger(state: State<'_, AppState>) -> CommandResult<Option<WeeklyWinner>> {
    let app_state = state.inner().clone();

    run_blocking(move || app_state.reset().reset_now()).await
}

/// On-demand evaluation of the Wednesday-10:00 boundary, same check the
/// background job runs every minute.
#[tauri::command]
pub async fn reset_check(state: State<'_, AppState>) -> CommandResult<Option<WeeklyWinner>> {
    let app_state = state.inner().clone();

    run_blocking(move || app_state.reset().check_and_reset()).await
}

#[tauri::command]
pub async fn weekly_winners_fetch(state: State<'_, AppState>) -> CommandResult<Vec<WeeklyWinner>> {
    let app_state = state.inner().clone();

    run_blocking(move || Ok(app_state.store().snapshot()?.weekly_winners)).await
}

#[tauri::command]
pub async fn roster_replace(
    state: State<'_, AppState>,
    department: Department,
    csv_text: String,
) -> CommandResult<SystemState> {
    let app_state = state.inner().clone();

    run_blocking(move || app_state.roster().replace_from_csv(department, &csv_text)).await
}

#[tauri::command]
pub async fn certificates_fetch(
    state: State<'_, AppState>,
) -> CommandResult<Vec<CertificateData>> {
    let app_state = state.inner().clone();

    run_blocking(move || app_state.leaderboards().certificates()).await
}
