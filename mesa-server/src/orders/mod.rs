//! Orders Module
//!
//! The order/table lifecycle core:
//! - [`LifecycleEngine`] - validation, totals, transactional creation and
//!   status transitions
//! - [`board`] - derived table occupancy over the fixed 40-slot board

pub mod board;
pub mod lifecycle;

pub use board::{TABLE_COUNT, TableState, TableStatusEntry, build_board};
pub use lifecycle::LifecycleEngine;
