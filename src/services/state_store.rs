use std::sync::RwLock;

use chrono::Utc;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::db::repositories::state_repository::StateRepository;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::ledger::SystemState;

/// Key the document has been stored under since the first deployment.
pub const STORAGE_KEY: &str = "bsrt_house_points_state";

/// Probe key of the retired house-naming scheme. A blob that still carries it
/// predates the current houses and is discarded wholesale instead of migrated.
const LEGACY_HOUSE_KEY: &str = "Red";

/// Exclusive owner of the canonical `SystemState` document. All mutation goes
/// through `update`, which persists the new document before making it visible
/// to readers, so a failed write never advances the in-memory state.
pub struct StateStore {
    db: DbPool,
    state: RwLock<SystemState>,
}

impl StateStore {
    pub fn new(db: DbPool) -> AppResult<Self> {
        let state = load_or_init(&db)?;
        Ok(Self {
            db,
            state: RwLock::new(state),
        })
    }

    /// Current document, by value. Readers always recompute their views from
    /// a snapshot; nothing derived is ever stored back.
    pub fn snapshot(&self) -> AppResult<SystemState> {
        let guard = self
            .state
            .read()
            .map_err(|_| AppError::other("state lock poisoned"))?;
        Ok(guard.clone())
    }

    /// Applies `mutate` to a working copy, persists the result, then commits
    /// it to memory in one step while holding the write lock. A mutation that
    /// leaves the document unchanged skips the write entirely.
    pub fn update<T, F>(&self, mutate: F) -> AppResult<(SystemState, T)>
    where
        F: FnOnce(&mut SystemState) -> T,
    {
        let mut guard = self
            .state
            .write()
            .map_err(|_| AppError::other("state lock poisoned"))?;

        let mut working = guard.clone();
        let outcome = mutate(&mut working);

        if working == *guard {
            return Ok((working, outcome));
        }

        self.persist(&working)?;
        *guard = working.clone();
        Ok((working, outcome))
    }

    fn persist(&self, state: &SystemState) -> AppResult<()> {
        let payload = serde_json::to_string(state)?;

        let write = || {
            self.db
                .with_connection(|conn| StateRepository::upsert(conn, STORAGE_KEY, &payload))
        };

        if let Err(first) = write() {
            warn!(target: "app::store", error = %first, "state write failed, retrying once");
            write().map_err(|retry| {
                AppError::persistence(format!(
                    "state write failed after retry: {retry} (first attempt: {first})"
                ))
            })?;
        }

        Ok(())
    }
}

fn load_or_init(db: &DbPool) -> AppResult<SystemState> {
    let stored = db.with_connection(|conn| StateRepository::get(conn, STORAGE_KEY))?;
    let now = Utc::now().timestamp_millis();

    let Some(raw) = stored else {
        info!(target: "app::store", "no persisted state, starting from the zeroed document");
        return Ok(SystemState::initial(now));
    };

    match parse_state(&raw) {
        Ok(state) => {
            info!(
                target: "app::store",
                history_len = state.history.len(),
                winners = state.weekly_winners.len(),
                "loaded persisted state"
            );
            Ok(state)
        }
        Err(reason) => {
            warn!(target: "app::store", %reason, "discarding persisted state, reinitializing");
            Ok(SystemState::initial(now))
        }
    }
}

fn parse_state(raw: &str) -> Result<SystemState, String> {
    let value: JsonValue =
        serde_json::from_str(raw).map_err(|err| format!("unparseable document: {err}"))?;

    if value
        .get("weeklyPoints")
        .and_then(|points| points.get(LEGACY_HOUSE_KEY))
        .is_some()
    {
        return Err("legacy house naming scheme detected".to_string());
    }

    serde_json::from_value(value).map_err(|err| format!("incompatible document: {err}"))
}
