//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `chrono`).
//! Keep it lean: no I/O, networking, or heavy logic—just data, the role rank model,
//! and exact money arithmetic.

pub mod config;
pub mod constants;
pub mod entity;
pub mod money;
pub mod registry;
pub mod role;
