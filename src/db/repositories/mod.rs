pub mod state_repository;
