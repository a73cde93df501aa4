pub mod backup;
pub mod merge;
pub mod report;
pub mod resolve;
pub mod session;
