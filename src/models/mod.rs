pub mod client;
pub mod language;
pub mod ledger;
pub mod record;
pub mod session_state;
pub mod tags;
