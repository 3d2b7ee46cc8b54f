//! Core domain logic for the parking lot.
//!
//! This crate contains:
//! - Allocation: atomic find-and-claim of a compatible spot for a vehicle
//! - Billing: the tiered fee schedule applied when a ticket is redeemed
//! - The value types (vehicles, spots, levels, tickets) and their validation

mod clock;
mod error;
pub mod fee;
mod lot;
mod spot;
mod ticket;
pub mod types;
mod vehicle;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ErrorKind, LotError};
pub use fee::{Fee, FeeSchedule, Rate};
pub use lot::ParkingLot;
pub use spot::{Level, ParkingSpot};
pub use ticket::Ticket;
pub use types::{LicensePlate, SpotClass, SpotId, TicketNumber, VehicleClass};
pub use vehicle::Vehicle;
