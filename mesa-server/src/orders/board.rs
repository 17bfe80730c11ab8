//! Table Board
//!
//! Stateless occupancy projection over the fixed set of numbered tables.
//! Recomputed from active orders on every call; there is no stored board
//! entity to keep in sync.

use serde::{Deserialize, Serialize};

use crate::db::models::TableOccupancy;

/// Fixed number of tables per restaurant
pub const TABLE_COUNT: i32 = 40;

/// Occupancy state of a single table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TableState {
    Booked,
    Available,
}

/// One slot of the 40-entry board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatusEntry {
    pub table_number: i32,
    pub status: TableState,
    pub customer: Option<String>,
    pub email: Option<String>,
    pub assigned_at: Option<i64>,
}

/// Project occupancy rows onto the fixed board
///
/// At most one active order per table is expected; if the store ever
/// holds more, the first match wins.
pub fn build_board(occupancies: &[TableOccupancy]) -> Vec<TableStatusEntry> {
    (1..=TABLE_COUNT)
        .map(|table_number| {
            match occupancies
                .iter()
                .find(|o| o.table_number == Some(table_number))
            {
                Some(seat) => TableStatusEntry {
                    table_number,
                    status: TableState::Booked,
                    customer: seat.customer_name.clone(),
                    email: seat.customer_email.clone(),
                    assigned_at: seat.table_assigned_at,
                },
                None => TableStatusEntry {
                    table_number,
                    status: TableState::Available,
                    customer: None,
                    email: None,
                    assigned_at: None,
                },
            }
        })
        .collect()
}
