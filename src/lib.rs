pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    if let Err(error) = try_run() {
        eprintln!("failed to launch application: {error}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let handle = app.handle();

            crate::utils::logger::init_logging(&handle)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            let mut data_dir = handle
                .path()
                .app_data_dir()
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            std::fs::create_dir_all(&data_dir)?;
            data_dir.push("housepoints.sqlite");

            let pool = crate::db::DbPool::new(&data_dir)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            let state = crate::commands::AppState::new(pool)
                .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

            // Weekly boundary is evaluated at startup and then once a minute.
            state.reset().spawn_job();

            app.manage(state);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            crate::commands::auth::session_login,
            crate::commands::ledger::points_record,
            crate::commands::ledger::history_fetch,
            crate::commands::ledger::state_fetch,
            crate::commands::leaderboard::leaderboard_fetch,
            crate::commands::leaderboard::top_students_fetch,
            crate::commands::leaderboard::overall_topper_fetch,
            crate::commands::leaderboard::name_suggestions_fetch,
            crate::commands::admin::reset_trigger,
            crate::commands::admin::reset_check,
            crate::commands::admin::weekly_winners_fetch,
            crate::commands::admin::roster_replace,
            crate::commands::admin::certificates_fetch,
        ])
        .run(tauri::generate_context!())?;

    Ok(())
}
