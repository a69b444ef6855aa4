//! # om-core
//!
//! Core types shared by every orgmatch crate:
//! - Entity structs for organizations, search candidates, decision-makers and leads
//! - `ResolutionStatus` with its state machine transitions
//! - `Origin`, the selector for the lead table a record lives in
//! - `ResolutionOutcome`, the result of resolving one lead
//! - Payload size limits applied before anything is persisted
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod limits;
pub mod outcome;
