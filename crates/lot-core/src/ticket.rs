use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::spot::ParkingSpot;
use crate::types::{SpotClass, SpotId, TicketNumber};
use crate::vehicle::Vehicle;

/// Proof of occupancy handed out by [`crate::ParkingLot::park`].
///
/// A ticket refers to its spot by floor and spot ID and records the vehicle
/// that was parked. Tickets are never mutated; identity is the ticket number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    number: TicketNumber,
    floor: u32,
    spot_id: SpotId,
    spot_class: SpotClass,
    vehicle: Vehicle,
    entry_time: DateTime<Utc>,
}

impl Ticket {
    pub(crate) fn issue(
        number: TicketNumber,
        floor: u32,
        spot: &ParkingSpot,
        vehicle: Vehicle,
        entry_time: DateTime<Utc>,
    ) -> Self {
        Self {
            number,
            floor,
            spot_id: spot.id().clone(),
            spot_class: spot.class(),
            vehicle,
            entry_time,
        }
    }

    pub const fn number(&self) -> &TicketNumber {
        &self.number
    }

    pub const fn floor(&self) -> u32 {
        self.floor
    }

    pub const fn spot_id(&self) -> &SpotId {
        &self.spot_id
    }

    pub const fn spot_class(&self) -> SpotClass {
        self.spot_class
    }

    pub const fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub const fn entry_time(&self) -> DateTime<Utc> {
        self.entry_time
    }
}
