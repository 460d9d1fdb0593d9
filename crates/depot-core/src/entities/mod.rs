//! Entity structs for depot domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod coordinate;
mod notification;

pub use coordinate::{Coordinate, CoordinateParseError};
pub use notification::NotificationEvent;
