use tauri::State;

use crate::commands::{run_blocking, AppState, CommandResult};
use crate::models::house::{AcademicYear, Department};
use crate::models::session::Session;

#[tauri::command]
pub async fn session_login(
    state: State<'_, AppState>,
    department: Department,
    security_key: String,
    year: Option<AcademicYear>,
) -> CommandResult<Session> {
    let app_state = state.inner().clone();

    run_blocking(move || app_state.auth().login(department, &security_key, year)).await
}
