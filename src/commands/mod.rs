pub mod admin;
pub mod auth;
pub mod leaderboard;
pub mod ledger;

use std::sync::Arc;

use serde::Serialize;
use tauri::async_runtime;
use tracing::error;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::services::auth_service::AuthService;
use crate::services::ledger_service::LedgerService;
use crate::services::leaderboard_service::LeaderboardService;
use crate::services::reset_service::ResetService;
use crate::services::roster_service::RosterService;
use crate::services::state_store::StateStore;

#[derive(Clone)]
pub struct AppState {
    db_pool: DbPool,
    store: Arc<StateStore>,
    auth_service: Arc<AuthService>,
    ledger_service: Arc<LedgerService>,
    leaderboard_service: Arc<LeaderboardService>,
    reset_service: Arc<ResetService>,
    roster_service: Arc<RosterService>,
}

impl AppState {
    pub fn new(db_pool: DbPool) -> AppResult<Self> {
        let store = Arc::new(StateStore::new(db_pool.clone())?);

        let auth_service = Arc::new(AuthService::new());
        let ledger_service = Arc::new(LedgerService::new(Arc::clone(&store)));
        let leaderboard_service = Arc::new(LeaderboardService::new(Arc::clone(&store)));
        let reset_service = Arc::new(ResetService::new(Arc::clone(&store)));
        let roster_service = Arc::new(RosterService::new(Arc::clone(&store)));

        Ok(Self {
            db_pool,
            store,
            auth_service,
            ledger_service,
            leaderboard_service,
            reset_service,
            roster_service,
        })
    }

    pub fn store(&self) -> Arc<StateStore> {
        Arc::clone(&self.store)
    }

    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth_service)
    }

    pub fn ledger(&self) -> Arc<LedgerService> {
        Arc::clone(&self.ledger_service)
    }

    pub fn leaderboards(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard_service)
    }

    pub fn reset(&self) -> Arc<ResetService> {
        Arc::clone(&self.reset_service)
    }

    pub fn roster(&self) -> Arc<RosterService> {
        Arc::clone(&self.roster_service)
    }

    pub fn db(&self) -> DbPool {
        self.db_pool.clone()
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
}

impl CommandError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation { message } => CommandError::new("VALIDATION_ERROR", message),
            AppError::AuthRejected { reason } => CommandError::new("AUTH_REJECTED", reason),
            AppError::NotFound => CommandError::new("NOT_FOUND", "requested resource not found"),
            AppError::Persistence { message } => {
                error!(target: "app::command", %message, "persistence error in command");
                CommandError::new("PERSISTENCE_ERROR", message)
            }
            AppError::Database { message } => {
                error!(target: "app::command", %message, "database error in command");
                CommandError::new("UNKNOWN", message)
            }
            AppError::Serialization(error) => {
                error!(target: "app::command", error = %error, "serialization error in command");
                CommandError::new("UNKNOWN", "serialization failed")
            }
            AppError::Io(error) => {
                error!(target: "app::command", error = %error, "io error in command");
                CommandError::new("UNKNOWN", "filesystem read/write failed")
            }
            AppError::Other(message) => {
                error!(target: "app::command", %message, "unexpected error in command");
                CommandError::new("UNKNOWN", message)
            }
        }
    }
}

pub(crate) async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    async_runtime::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("command task failed: {err}")))?
        .map_err(CommandError::from)
}
