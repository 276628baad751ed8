pub mod house;
pub mod ledger;
pub mod session;
