//! Core type definitions for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::any::{type_name, Any};
use std::fmt;
use std::str::FromStr;

/// Inclusive rectangular bounds for valid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Boundary {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Boundary {
    pub fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Result<Self> {
        if x_min > x_max || y_min > y_max {
            return Err(Error::Configuration(format!(
                "inverted boundary x=({x_min}, {x_max}) y=({y_min}, {y_max})"
            )));
        }

        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Bounds of a `width` x `height` grid anchored at the origin
    pub fn from_grid_size(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::Configuration(format!(
                "grid dimensions must be positive, got {width}x{height}"
            )));
        }
        Self::new(0, width - 1, 0, height - 1)
    }

    /// Number of columns
    pub fn width(&self) -> i64 {
        i64::from(self.x_max) - i64::from(self.x_min) + 1
    }

    /// Number of rows
    pub fn height(&self) -> i64 {
        i64::from(self.y_max) - i64::from(self.y_min) + 1
    }

    /// Total number of cells
    pub fn cell_count(&self) -> u128 {
        self.width() as u128 * self.height() as u128
    }

    pub fn contains(&self, location: Location) -> bool {
        (self.x_min..=self.x_max).contains(&location.x)
            && (self.y_min..=self.y_max).contains(&location.y)
    }
}

/// A cell coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset location, `None` if a coordinate leaves the `i32` range
    pub fn checked_add(&self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    pub fn is_valid(&self, boundary: &Boundary) -> bool {
        boundary.contains(*self)
    }

    /// Structural equality against an operand whose type is only known at runtime.
    ///
    /// Comparing against anything that is not a `Location` is an error rather
    /// than `false`.
    pub fn equals<T: Any>(&self, other: &T) -> Result<bool> {
        match (other as &dyn Any).downcast_ref::<Location>() {
            Some(location) => Ok(self == location),
            None => Err(Error::TypeMismatch {
                expected: type_name::<Location>(),
                found: type_name::<T>(),
            }),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}; {}]", self.x, self.y)
    }
}

/// Single-step movement command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCommand {
    Left,
    Right,
    Up,
    Down,
    Pass,
}

impl MoveCommand {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            MoveCommand::Left => (-1, 0),
            MoveCommand::Right => (1, 0),
            MoveCommand::Up => (0, 1),
            MoveCommand::Down => (0, -1),
            MoveCommand::Pass => (0, 0),
        }
    }

    /// Candidate location after applying this command.
    ///
    /// `None` when the step would overflow the coordinate range, which no
    /// boundary can contain.
    pub fn apply(&self, location: Location) -> Option<Location> {
        let (dx, dy) = self.to_delta();
        location.checked_add(dx, dy)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveCommand::Left => "left",
            MoveCommand::Right => "right",
            MoveCommand::Up => "up",
            MoveCommand::Down => "down",
            MoveCommand::Pass => "pass",
        }
    }

    pub fn all() -> [MoveCommand; 5] {
        [
            MoveCommand::Left,
            MoveCommand::Right,
            MoveCommand::Up,
            MoveCommand::Down,
            MoveCommand::Pass,
        ]
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoveCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MoveCommand::all()
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| Error::Configuration(format!("unknown move command '{s}'")))
    }
}

/// Which side of the hunt an agent is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hunter,
    Prey,
}
