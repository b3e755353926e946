//! Simulation engine: spawning, ticking and capture detection.

use crate::agent::{Hunter, Player, Prey};
use crate::random::RandomSource;
use hunt_core::{Boundary, Error, Location, Result, Role, SimulationConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A prey caught by the hunter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureEvent {
    pub prey: String,
    pub tick: u64,
    pub location: Location,
}

/// Outcome of a single tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub captures: Vec<CaptureEvent>,
}

/// Read-only view of one agent after a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    pub name: String,
    pub role: Role,
    pub location: Location,
    pub alive: bool,
    pub sign: char,
}

impl AgentState {
    fn of(player: &impl Player) -> Self {
        Self {
            name: player.name().to_string(),
            role: player.role(),
            location: player.location(),
            alive: player.is_alive(),
            sign: player.sign(),
        }
    }
}

/// Everything a display collaborator needs about one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub tick: u64,
    pub agents: Vec<AgentState>,
    pub captures: Vec<CaptureEvent>,
}

impl TickSnapshot {
    /// Single-line JSON encoding
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

pub struct Simulation {
    boundary: Boundary,
    random: RandomSource,
    hunter: Option<Hunter>,
    prey: Vec<Prey>,
    captures: Vec<CaptureEvent>,
    tick: u64,
}

impl Simulation {
    /// Fully populated simulation: `Prey_0..` first, then the hunter
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let boundary = config.boundary()?;

        let mut sim = Self::empty(boundary, RandomSource::new(config.random_seed));
        for name in config.prey_names() {
            sim.spawn_prey(name)?;
        }
        sim.spawn_hunter()?;

        info!(
            grid_size_x = config.grid_size_x,
            grid_size_y = config.grid_size_y,
            n_prey = config.n_prey,
            seed = config.random_seed,
            "Simulation created"
        );

        Ok(sim)
    }

    /// Simulation with no agents; populate with `spawn_prey`/`spawn_hunter`
    pub fn empty(boundary: Boundary, random: RandomSource) -> Self {
        Self {
            boundary,
            random,
            hunter: None,
            prey: Vec::new(),
            captures: Vec::new(),
            tick: 0,
        }
    }

    pub fn spawn_prey(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.prey.iter().any(|p| p.name() == name) {
            return Err(Error::AlreadyExists(format!("prey named '{name}'")));
        }

        let location = self.random.random_location(&self.boundary);
        debug!(prey = %name, %location, "Spawned prey");
        self.prey.push(Prey::new(name, location));
        Ok(())
    }

    pub fn spawn_hunter(&mut self) -> Result<()> {
        if self.hunter.is_some() {
            return Err(Error::AlreadyExists("hunter".to_string()));
        }

        let location = self.random.random_location(&self.boundary);
        debug!(%location, "Spawned hunter");
        self.hunter = Some(Hunter::new(location));
        Ok(())
    }

    /// Advance one step: hunter moves, every prey moves, then captures are resolved
    pub fn tick(&mut self) -> Result<TickReport> {
        let hunter = self
            .hunter
            .as_mut()
            .ok_or_else(|| Error::InvalidState("tick before the hunter was spawned".to_string()))?;

        self.tick += 1;

        hunter.random_move(&mut self.random, &self.boundary);
        for prey in &mut self.prey {
            prey.random_move(&mut self.random, &self.boundary);
        }

        let hunter_location = hunter.location();
        let mut captures = Vec::new();

        // Dead prey are compared too and reported again while co-located
        for prey in &mut self.prey {
            if prey.location() != hunter_location {
                continue;
            }

            let first_kill = prey.kill();
            info!(
                event = "prey_captured",
                prey = prey.name(),
                tick = self.tick,
                first_kill,
                x = hunter_location.x,
                y = hunter_location.y,
                "Prey captured"
            );
            captures.push(CaptureEvent {
                prey: prey.name().to_string(),
                tick: self.tick,
                location: hunter_location,
            });
        }

        debug!(
            tick = self.tick,
            hunter = %hunter_location,
            alive_prey = self.alive_prey(),
            captures = captures.len(),
            "Tick complete"
        );

        self.captures.extend(captures.iter().cloned());

        Ok(TickReport {
            tick: self.tick,
            captures,
        })
    }

    /// Tick `steps` times and summarise the run
    #[instrument(skip(self))]
    pub fn run(&mut self, steps: u64) -> Result<SimulationResult> {
        info!("Starting simulation for {} ticks", steps);

        for _ in 0..steps {
            self.tick()?;
        }

        let result = self.collect_results();
        info!(
            event = "run_summary",
            total_ticks = result.total_ticks,
            captures = result.captures.len(),
            survivors = result.survivors.len(),
            "Simulation complete"
        );

        Ok(result)
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn hunter(&self) -> Option<&Hunter> {
        self.hunter.as_ref()
    }

    /// Prey in spawn order, dead ones included
    pub fn prey(&self) -> &[Prey] {
        &self.prey
    }

    pub fn alive_prey(&self) -> usize {
        self.prey.iter().filter(|p| p.is_alive()).count()
    }

    /// Number of ticks performed so far
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Every capture since the simulation was created
    pub fn captures(&self) -> &[CaptureEvent] {
        &self.captures
    }

    /// Hunter first, then prey in spawn order
    pub fn agents(&self) -> Vec<AgentState> {
        self.hunter
            .iter()
            .map(AgentState::of)
            .chain(self.prey.iter().map(AgentState::of))
            .collect()
    }

    pub fn snapshot(&self, report: &TickReport) -> TickSnapshot {
        TickSnapshot {
            tick: report.tick,
            agents: self.agents(),
            captures: report.captures.clone(),
        }
    }

    fn collect_results(&self) -> SimulationResult {
        SimulationResult {
            total_ticks: self.tick,
            captures: self.captures.clone(),
            survivors: self
                .prey
                .iter()
                .filter(|p| p.is_alive())
                .map(|p| p.name().to_string())
                .collect(),
            final_agents: self.agents(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_ticks: u64,
    pub captures: Vec<CaptureEvent>,
    pub survivors: Vec<String>,
    pub final_agents: Vec<AgentState>,
}
