pub mod dispatch;
pub mod lead;
pub mod resolve;
pub mod stale;
