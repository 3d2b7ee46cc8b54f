use serde::{Deserialize, Serialize};

use crate::error::LotError;
use crate::types::{LicensePlate, VehicleClass};

/// A vehicle presented at the lot. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    license_plate: LicensePlate,
    class: VehicleClass,
}

impl Vehicle {
    /// Creates a vehicle, rejecting an empty license plate.
    pub fn new(license_plate: impl Into<String>, class: VehicleClass) -> Result<Self, LotError> {
        Ok(Self {
            license_plate: LicensePlate::new(license_plate)?,
            class,
        })
    }

    pub const fn license_plate(&self) -> &LicensePlate {
        &self.license_plate
    }

    pub const fn class(&self) -> VehicleClass {
        self.class
    }
}
