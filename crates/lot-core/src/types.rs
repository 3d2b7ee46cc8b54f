//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LotError;

/// The category of a vehicle, which decides the spot class it may occupy.
///
/// Also accepted under the capacity names `small`, `medium` and `large`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    #[serde(alias = "small")]
    Bike,
    #[serde(alias = "medium")]
    Car,
    #[serde(alias = "large")]
    Truck,
}

impl VehicleClass {
    /// Every vehicle class, in rate-table order.
    pub const ALL: [Self; 3] = [Self::Bike, Self::Car, Self::Truck];

    /// String representation used in config files and output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bike => "bike",
            Self::Car => "car",
            Self::Truck => "truck",
        }
    }

    /// The only spot class this vehicle class may park in.
    ///
    /// There is no fallback to a larger spot.
    #[must_use]
    pub const fn spot_class(self) -> SpotClass {
        match self {
            Self::Bike => SpotClass::Small,
            Self::Car => SpotClass::Medium,
            Self::Truck => SpotClass::Large,
        }
    }

    /// Position of this class in per-class tables.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VehicleClass {
    type Err = LotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bike" | "small" => Ok(Self::Bike),
            "car" | "medium" => Ok(Self::Car),
            "truck" | "large" => Ok(Self::Truck),
            _ => Err(LotError::invalid_argument(format!(
                "unknown vehicle class: {s}"
            ))),
        }
    }
}

/// The capacity category of a parking spot, fixed when the spot is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotClass {
    Small,
    Medium,
    Large,
}

impl SpotClass {
    /// String representation used in config files and output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Whether a vehicle of `class` belongs in a spot of this class.
    #[must_use]
    pub fn accepts(self, class: VehicleClass) -> bool {
        class.spot_class() == self
    }
}

impl fmt::Display for SpotClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SpotClass {
    type Err = LotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(LotError::invalid_argument(format!(
                "unknown spot class: {s}"
            ))),
        }
    }
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, LotError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(LotError::invalid_argument(concat!(
                        $field_name,
                        " cannot be empty"
                    )));
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = LotError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A vehicle's license plate. Must be non-empty.
    LicensePlate, "license plate"
);

define_string_id!(
    /// A parking spot identifier (e.g., "L1-S1").
    ///
    /// Spot IDs must be non-empty and unique within their level.
    SpotId, "spot ID"
);

define_string_id!(
    /// An opaque ticket number.
    ///
    /// Only uniqueness and non-emptiness are guaranteed; callers must not
    /// parse it.
    TicketNumber, "ticket number"
);

impl TicketNumber {
    /// Mints a fresh ticket number.
    pub(crate) fn generate() -> Self {
        Self(format!("TICKET-{}", Uuid::new_v4().simple()))
    }
}
