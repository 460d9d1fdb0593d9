//! Repository modules implementing ledger operations.
//!
//! Each module adds methods to `DepotService` via `impl DepotService` blocks.

pub mod notification;
