pub mod client_cache;
pub mod ledger_file;
pub mod pause_marker;
