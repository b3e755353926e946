//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::Boundary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Largest grid (in cells) that can be rendered as text
pub const MAX_RENDERED_CELLS: u128 = 1_000_000;

/// Plain `name=value` settings with integer values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    values: BTreeMap<String, i64>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings text. Lines without `=` are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut settings = Self::new();

        for (line_no, line) in text.lines().enumerate() {
            let Some((name, value)) = line.split_once('=') else {
                continue;
            };

            let name = name.trim();
            let value = value.trim();
            let parsed = value.parse::<i64>().map_err(|_| {
                Error::Configuration(format!(
                    "line {}: value '{}' for '{}' is not an integer",
                    line_no + 1,
                    value,
                    name
                ))
            })?;

            settings.set(name, parsed);
        }

        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::parse(&text)?;
        debug!(path = %path.display(), keys = settings.values.len(), "Loaded settings file");
        Ok(settings)
    }

    pub fn set(&mut self, name: impl Into<String>, value: i64) {
        self.values.insert(name.into(), value);
    }

    /// Look up a required setting
    pub fn get(&self, name: &str) -> Result<i64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| Error::Configuration(format!("{name} is not in settings")))
    }

    pub fn get_or(&self, name: &str, default: i64) -> i64 {
        self.values.get(name).copied().unwrap_or(default)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// Parameters for a single hunt run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of grid columns
    pub grid_size_x: i32,
    /// Number of grid rows
    pub grid_size_y: i32,
    /// Number of prey spawned at start
    pub n_prey: usize,
    /// Number of ticks to simulate
    pub n_steps: u64,
    /// Random seed for reproducibility
    pub random_seed: u64,
    /// Render the text grid after every tick
    pub show_grid: bool,
    /// Driver pause between ticks (milliseconds)
    pub tick_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size_x: 30,
            grid_size_y: 30,
            n_prey: 2,
            n_steps: 20,
            random_seed: 1,
            show_grid: false,
            tick_delay_ms: 500,
        }
    }
}

impl SimulationConfig {
    /// Build a configuration from a settings file.
    ///
    /// `random_seed` and `tick_delay_ms` are optional; every other key is required.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            grid_size_x: to_i32("grid_size_x", settings.get("grid_size_x")?)?,
            grid_size_y: to_i32("grid_size_y", settings.get("grid_size_y")?)?,
            n_prey: to_unsigned("n_prey", settings.get("n_prey")?)?,
            n_steps: to_unsigned("n_steps", settings.get("n_steps")?)?,
            random_seed: to_unsigned(
                "random_seed",
                settings.get_or("random_seed", defaults.random_seed as i64),
            )?,
            show_grid: settings.get("show_grid")? != 0,
            tick_delay_ms: to_unsigned(
                "tick_delay_ms",
                settings.get_or("tick_delay_ms", defaults.tick_delay_ms as i64),
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let boundary = self.boundary()?;
        if self.show_grid && boundary.cell_count() > MAX_RENDERED_CELLS {
            return Err(Error::Configuration(format!(
                "grid of {}x{} cells is too large to show (limit {} cells)",
                self.grid_size_x, self.grid_size_y, MAX_RENDERED_CELLS
            )));
        }
        Ok(())
    }

    /// Grid bounds derived from the configured size
    pub fn boundary(&self) -> Result<Boundary> {
        Boundary::from_grid_size(self.grid_size_x, self.grid_size_y)
    }

    /// Names handed to spawned prey, in spawn order
    pub fn prey_names(&self) -> impl Iterator<Item = String> {
        (0..self.n_prey).map(|i| format!("Prey_{i}"))
    }
}

fn to_i32(name: &str, value: i64) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| Error::Configuration(format!("{name}={value} is out of range")))
}

fn to_unsigned<T: TryFrom<i64>>(name: &str, value: i64) -> Result<T> {
    T::try_from(value)
        .map_err(|_| Error::Configuration(format!("{name}={value} must not be negative")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = "grid_size_x=10\ngrid_size_y=8\nn_prey=3\nn_steps=15\nshow_grid=1\n";

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.grid_size_x, 30);
        assert_eq!(config.grid_size_y, 30);
        assert_eq!(config.n_prey, 2);
        assert_eq!(config.n_steps, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_settings() {
        let settings = Settings::parse("# comment\ngrid_size_x = 12\n\nn_prey=4").unwrap();
        assert_eq!(settings.get("grid_size_x").unwrap(), 12);
        assert_eq!(settings.get("n_prey").unwrap(), 4);
        assert!(!settings.contains("# comment"));
    }

    #[test]
    fn test_parse_rejects_non_integer() {
        let err = Settings::parse("n_prey=many").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_config_from_settings() {
        let settings = Settings::parse(SETTINGS).unwrap();
        let config = SimulationConfig::from_settings(&settings).unwrap();

        assert_eq!(config.grid_size_x, 10);
        assert_eq!(config.grid_size_y, 8);
        assert_eq!(config.n_prey, 3);
        assert_eq!(config.n_steps, 15);
        assert!(config.show_grid);
        assert_eq!(config.random_seed, 1);
        assert_eq!(config.tick_delay_ms, 500);
        assert_eq!(config.boundary().unwrap(), Boundary::new(0, 9, 0, 7).unwrap());
    }

    #[test]
    fn test_missing_required_key() {
        let settings = Settings::parse("grid_size_x=10\ngrid_size_y=8\nn_prey=3").unwrap();
        let err = SimulationConfig::from_settings(&settings).unwrap_err();
        match err {
            Error::Configuration(msg) => assert!(msg.contains("n_steps")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_grid_rejected() {
        let mut settings = Settings::parse(SETTINGS).unwrap();
        settings.set("grid_size_x", 0);
        assert!(matches!(
            SimulationConfig::from_settings(&settings),
            Err(Error::Configuration(_))
        ));

        settings.set("grid_size_x", 5);
        settings.set("n_prey", -1);
        assert!(matches!(
            SimulationConfig::from_settings(&settings),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_oversized_grid_only_rejected_when_shown() {
        let mut config = SimulationConfig {
            grid_size_x: 2_000_000_000,
            grid_size_y: 30,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.show_grid = true;
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));

        config.grid_size_x = 1000;
        config.grid_size_y = 1000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prey_names() {
        let config = SimulationConfig {
            n_prey: 3,
            ..Default::default()
        };
        let names: Vec<String> = config.prey_names().collect();
        assert_eq!(names, vec!["Prey_0", "Prey_1", "Prey_2"]);
    }

    #[test]
    fn test_config_serialization() {
        let config = SimulationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
