//! Parking spots and the levels that hold them.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::LotError;
use crate::types::{SpotClass, SpotId};
use crate::vehicle::Vehicle;

/// A single parking spot.
///
/// Occupancy is derived from the occupant, so a spot is occupied exactly
/// when it holds a vehicle. The class never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParkingSpot {
    id: SpotId,
    class: SpotClass,
    occupant: Option<Vehicle>,
}

impl ParkingSpot {
    /// Creates an empty spot.
    pub fn new(id: impl Into<String>, class: SpotClass) -> Result<Self, LotError> {
        Ok(Self {
            id: SpotId::new(id)?,
            class,
            occupant: None,
        })
    }

    pub const fn id(&self) -> &SpotId {
        &self.id
    }

    pub const fn class(&self) -> SpotClass {
        self.class
    }

    pub const fn occupant(&self) -> Option<&Vehicle> {
        self.occupant.as_ref()
    }

    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Whether `vehicle` could be parked here right now.
    pub fn is_assignable(&self, vehicle: &Vehicle) -> bool {
        !self.is_occupied() && self.class.accepts(vehicle.class())
    }

    /// Places `vehicle` in this spot. Callers check [`Self::is_assignable`] first.
    pub(crate) fn occupy(&mut self, vehicle: Vehicle) {
        debug_assert!(self.is_assignable(&vehicle));
        self.occupant = Some(vehicle);
    }

    /// Empties the spot, returning whoever was parked.
    pub(crate) fn release(&mut self) -> Option<Vehicle> {
        self.occupant.take()
    }
}

/// One floor of the lot: an ordered sequence of spots.
///
/// Spot IDs are unique within a level here, and across the lot once the
/// level is added to a [`crate::ParkingLot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level {
    floor: u32,
    spots: Vec<ParkingSpot>,
}

impl Level {
    /// Creates a level, rejecting duplicate spot IDs.
    pub fn new(floor: u32, spots: Vec<ParkingSpot>) -> Result<Self, LotError> {
        if let Some(id) = first_duplicate(&spots) {
            return Err(LotError::invalid_argument(format!(
                "duplicate spot ID {id} on level {floor}"
            )));
        }
        Ok(Self { floor, spots })
    }

    pub const fn floor(&self) -> u32 {
        self.floor
    }

    pub fn spots(&self) -> &[ParkingSpot] {
        &self.spots
    }

    /// Number of unoccupied spots of `class`.
    pub fn available(&self, class: SpotClass) -> usize {
        self.spots
            .iter()
            .filter(|s| s.class() == class && !s.is_occupied())
            .count()
    }

    /// The first spot, in level order, that can take `vehicle`.
    pub(crate) fn first_assignable_mut(&mut self, vehicle: &Vehicle) -> Option<&mut ParkingSpot> {
        self.spots.iter_mut().find(|s| s.is_assignable(vehicle))
    }

    pub(crate) fn spot_mut(&mut self, id: &SpotId) -> Option<&mut ParkingSpot> {
        self.spots.iter_mut().find(|s| s.id() == id)
    }
}

fn first_duplicate(spots: &[ParkingSpot]) -> Option<&SpotId> {
    let mut seen = HashSet::with_capacity(spots.len());
    spots.iter().map(ParkingSpot::id).find(|id| !seen.insert(*id))
}
