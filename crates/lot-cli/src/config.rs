//! Configuration loading and lot construction.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use lot_core::{FeeSchedule, Level, LotError, ParkingLot, ParkingSpot, SpotClass};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Levels in the order they are added to the lot.
    pub levels: Vec<LevelConfig>,

    /// Rate table, keyed by vehicle class.
    pub rates: FeeSchedule,
}

/// One level of the configured layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub floor: u32,
    pub spots: Vec<SpotConfig>,
}

/// One spot of the configured layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotConfig {
    pub id: String,
    pub class: SpotClass,
}

impl SpotConfig {
    fn new(id: &str, class: SpotClass) -> Self {
        Self {
            id: id.to_string(),
            class,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels: vec![LevelConfig {
                floor: 1,
                spots: vec![
                    SpotConfig::new("L1-S1", SpotClass::Small),
                    SpotConfig::new("L1-S3", SpotClass::Medium),
                    SpotConfig::new("L1-S4", SpotClass::Large),
                ],
            }],
            rates: FeeSchedule::standard(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (LOT_*)
        figment = figment.merge(Env::prefixed("LOT_"));

        figment.extract()
    }

    /// Builds a lot with this layout and rate table.
    pub fn build_lot(&self) -> Result<ParkingLot, LotError> {
        let lot = ParkingLot::new().with_schedule(self.rates.clone());
        for level in &self.levels {
            let spots = level
                .spots
                .iter()
                .map(|s| ParkingSpot::new(s.id.as_str(), s.class))
                .collect::<Result<Vec<_>, _>>()?;
            lot.add_level(Level::new(level.floor, spots)?)?;
        }
        Ok(lot)
    }
}

/// Returns the platform-specific config directory for the lot.
///
/// On Linux: `~/.config/parking-lot`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("parking-lot"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use lot_core::{Fee, Rate, VehicleClass};
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_dirs_config_path_ends_with_parking_lot() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "parking-lot");
    }

    #[test]
    fn test_default_config_builds_sample_lot() {
        let lot = Config::default().build_lot().unwrap();
        let levels = lot.levels();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].floor(), 1);
        let ids: Vec<&str> = levels[0].spots().iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, ["L1-S1", "L1-S3", "L1-S4"]);
        assert_eq!(lot.schedule(), &FeeSchedule::standard());
    }

    #[test]
    fn test_config_file_overrides_layout_and_one_rate() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[levels]]
floor = 0
spots = [
    {{ id = "G-1", class = "small" }},
    {{ id = "G-2", class = "small" }},
]

[rates.bike]
base = 2.0
per_extra_hour = 1.0
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.levels.len(), 1);
        assert_eq!(config.levels[0].floor, 0);
        assert_eq!(config.levels[0].spots.len(), 2);
        assert_eq!(config.rates.rate(VehicleClass::Bike), Rate::new(2.0, 1.0));
        assert_eq!(config.rates.rate(VehicleClass::Car), Rate::new(15.0, 10.0));

        let lot = config.build_lot().unwrap();
        assert_eq!(lot.available_spots(0, SpotClass::Small).unwrap(), 2);
        assert_eq!(
            lot.schedule()
                .quote(VehicleClass::Bike, chrono::Duration::hours(3))
                .unwrap(),
            Fee::from_amount(4.0)
        );
    }

    #[test]
    fn test_build_lot_rejects_duplicate_floor() {
        let mut config = Config::default();
        config.levels.push(config.levels[0].clone());
        let err = config.build_lot().unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: level 1 already exists");
    }

    #[test]
    fn test_build_lot_rejects_spot_id_reused_on_another_floor() {
        let mut config = Config::default();
        config.levels.push(LevelConfig {
            floor: 2,
            spots: vec![SpotConfig::new("L1-S4", SpotClass::Large)],
        });
        let err = config.build_lot().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument: spot ID L1-S4 already exists on level 1"
        );
    }

    #[test]
    fn test_build_lot_rejects_empty_spot_id() {
        let mut config = Config::default();
        config.levels[0].spots.push(SpotConfig::new("", SpotClass::Large));
        assert!(config.build_lot().is_err());
    }
}
