pub mod auth_service;
pub mod ledger_service;
pub mod leaderboard_service;
pub mod reset_service;
pub mod roster_service;
pub mod state_store;
