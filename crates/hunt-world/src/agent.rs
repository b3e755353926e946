//! Hunter and prey agents.

use crate::random::RandomSource;
use hunt_core::{Boundary, Location, MoveCommand, Role};
use std::fmt;
use tracing::trace;

const HUNTER_MOVES: [MoveCommand; 4] = [
    MoveCommand::Left,
    MoveCommand::Right,
    MoveCommand::Up,
    MoveCommand::Down,
];

const PREY_MOVES: [MoveCommand; 7] = [
    MoveCommand::Left,
    MoveCommand::Right,
    MoveCommand::Up,
    MoveCommand::Down,
    MoveCommand::Pass,
    MoveCommand::Pass,
    MoveCommand::Pass,
];

/// Shared behaviour of everything that walks the grid
pub trait Player {
    fn name(&self) -> &str;

    fn location(&self) -> Location;

    fn is_alive(&self) -> bool;

    fn role(&self) -> Role;

    /// Display sign used by the grid renderer
    fn sign(&self) -> char;

    /// Move list; repeated entries make a command more likely
    fn move_weights(&self) -> &'static [MoveCommand];

    fn set_location(&mut self, location: Location);

    /// Apply `direction` if the result stays inside `boundary`.
    ///
    /// Dead agents always pass. Returns whether the location changed.
    fn attempt_move(&mut self, direction: MoveCommand, boundary: &Boundary) -> bool {
        let direction = if self.is_alive() {
            direction
        } else {
            MoveCommand::Pass
        };

        let current = self.location();
        let Some(candidate) = direction
            .apply(current)
            .filter(|candidate| candidate.is_valid(boundary))
        else {
            trace!(
                agent = self.name(),
                %direction,
                from = %current,
                "Move rejected: outside boundary"
            );
            return false;
        };

        self.set_location(candidate);
        candidate != current
    }

    /// Draw a command from the move weights and attempt it
    fn random_move(&mut self, random: &mut RandomSource, boundary: &Boundary) -> MoveCommand {
        let direction = random
            .choose(self.move_weights())
            .unwrap_or(MoveCommand::Pass);
        let moved = self.attempt_move(direction, boundary);

        trace!(
            agent = self.name(),
            %direction,
            moved,
            location = %self.location(),
            "Agent moved"
        );
        direction
    }
}

/// The single predator; always moves when it can
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunter {
    location: Location,
}

impl Hunter {
    pub const NAME: &'static str = "Hunter";

    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

impl Player for Hunter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn location(&self) -> Location {
        self.location
    }

    fn is_alive(&self) -> bool {
        true
    }

    fn role(&self) -> Role {
        Role::Hunter
    }

    fn sign(&self) -> char {
        'H'
    }

    fn move_weights(&self) -> &'static [MoveCommand] {
        &HUNTER_MOVES
    }

    fn set_location(&mut self, location: Location) {
        self.location = location;
    }
}

impl fmt::Display for Hunter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hunter at [{}, {}]", self.location.x, self.location.y)
    }
}

/// A prey animal, biased toward standing still
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prey {
    name: String,
    location: Location,
    alive: bool,
}

impl Prey {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            alive: true,
        }
    }

    /// Mark this prey dead. Returns whether it was alive before the call.
    pub fn kill(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}

impl Player for Prey {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Location {
        self.location
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn role(&self) -> Role {
        Role::Prey
    }

    fn sign(&self) -> char {
        if self.alive {
            'P'
        } else {
            'X'
        }
    }

    fn move_weights(&self) -> &'static [MoveCommand] {
        &PREY_MOVES
    }

    fn set_location(&mut self, location: Location) {
        self.location = location;
    }
}

impl fmt::Display for Prey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alive_info = if self.alive { "Is alive." } else { "Is dead" };
        write!(
            f,
            "{} at [{}, {}]. {}",
            self.name, self.location.x, self.location.y, alive_info
        )
    }
}
