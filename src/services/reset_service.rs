use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Datelike, Duration, Local, LocalResult, TimeZone, Timelike, Utc};
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::house::House;
use crate::models::ledger::{SystemState, WeeklyWinner};
use crate::services::state_store::StateStore;

/// Wednesday as `num_days_from_sunday`.
const RESET_DAY: i64 = 3;
const RESET_HOUR: u32 = 10;
const POLL_INTERVAL_SECS: u64 = 60;

/// Most recent Wednesday-10:00 boundary at or before `now`.
///
/// The arithmetic deliberately looks forward to the next candidate Wednesday
/// and then steps back a week if that candidate lies in the future. At
/// exactly Wednesday 10:00:00.000 the candidate equals `now` and is kept, so
/// the boundary is inclusive at the instant itself.
///
/// Returns `None` only when 10:00 does not exist on the candidate date in
/// the given time zone.
pub fn last_boundary<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let day = i64::from(now.weekday().num_days_from_sunday());
    let diff = if day <= RESET_DAY {
        RESET_DAY - day
    } else {
        RESET_DAY + 7 - day
    };

    let candidate = (now.clone() + Duration::days(diff))
        .with_hour(RESET_HOUR)?
        .with_minute(0)?
        .with_second(0)?
        .with_nanosecond(0)?;

    if candidate > *now {
        Some(candidate - Duration::days(7))
    } else {
        Some(candidate)
    }
}

/// Archives the weekly standings on the Wednesday-10:00 cadence and on
/// manual admin request. The whole due-check plus transition runs inside a
/// single `StateStore::update`, so two racing triggers cannot double-archive.
pub struct ResetService {
    store: Arc<StateStore>,
    job_running: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
}

impl ResetService {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self {
            store,
            job_running: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Scheduled check against the wall clock.
    pub fn check_and_reset(&self) -> AppResult<Option<WeeklyWinner>> {
        self.check_and_reset_at(Local::now())
    }

    /// Scheduled check against an explicit instant, so boundary crossings are
    /// testable without waiting on the wall clock.
    pub fn check_and_reset_at<Tz: TimeZone>(
        &self,
        now: DateTime<Tz>,
    ) -> AppResult<Option<WeeklyWinner>> {
        let target = last_boundary(&now)
            .ok_or_else(|| AppError::other("reset boundary does not exist in this time zone"))?;
        self.apply_if_due(target.timestamp_millis())
    }

    /// Manual admin reset: archives right now, regardless of the weekly
    /// boundary.
    pub fn reset_now(&self) -> AppResult<Option<WeeklyWinner>> {
        self.apply_if_due(Local::now().timestamp_millis())
    }

    fn apply_if_due(&self, reset_millis: i64) -> AppResult<Option<WeeklyWinner>> {
        let (_, archived) = self.store.update(|state| {
            // lastResetTimestamp only ever moves forward; an equal or newer
            // value means another trigger already handled this boundary.
            if state.last_reset_timestamp >= reset_millis {
                return None;
            }
            Some(archive_and_zero(state, reset_millis))
        })?;

        if let Some(winner) = &archived {
            info!(
                target: "app::scheduler",
                winner = %winner.winner,
                week_end = %winner.week_end_date,
                "weekly standings archived and reset"
            );
        }

        Ok(archived)
    }

    /// Spawns the cooperative polling job on the async runtime: one check per
    /// minute, first check immediately at startup. Idempotent.
    pub fn spawn_job(self: Arc<Self>) {
        if self.job_running.swap(true, Ordering::SeqCst) {
            return;
        }

        let service = self;
        tauri::async_runtime::spawn(async move {
            let mut ticker = tokio::time::interval(StdDuration::from_secs(POLL_INTERVAL_SECS));
            info!(target: "app::scheduler", "weekly reset job started");

            loop {
                ticker.tick().await;
                if service.shutdown.load(Ordering::SeqCst) {
                    break;
                }

                let svc = Arc::clone(&service);
                match tauri::async_runtime::spawn_blocking(move || svc.check_and_reset()).await {
                    Ok(Ok(_)) => {}
                    Ok(Err(err)) => {
                        warn!(target: "app::scheduler", error = %err, "reset check failed")
                    }
                    Err(err) => {
                        error!(target: "app::scheduler", error = %err, "reset check panicked")
                    }
                }
            }

            info!(target: "app::scheduler", "weekly reset job stopped");
        });
    }

    /// Asks the polling job to stop after its current tick.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

fn archive_and_zero(state: &mut SystemState, reset_millis: i64) -> WeeklyWinner {
    // Stable sort keeps declaration order between tied houses.
    let mut ranking = House::ALL;
    ranking.sort_by_key(|house| Reverse(state.weekly_score(*house)));

    let winner = WeeklyWinner {
        week_end_date: format_week_end(reset_millis),
        winner: ranking[0],
        runner: ranking[1],
        second_runner: ranking[2],
        scores: state.weekly_points.clone(),
    };

    state.weekly_winners.insert(0, winner.clone());
    state.weekly_points = SystemState::zeroed_points();
    state.last_reset_timestamp = reset_millis;

    winner
}

fn format_week_end(reset_millis: i64) -> String {
    match Utc.timestamp_millis_opt(reset_millis) {
        LocalResult::Single(instant) => instant
            .with_timezone(&Local)
            .format("%d/%m/%Y")
            .to_string(),
        _ => reset_millis.to_string(),
    }
}
