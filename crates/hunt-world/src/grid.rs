//! Text rendering of the grid.

use crate::simulation::AgentState;
use hunt_core::{Boundary, Location, Role, MAX_RENDERED_CELLS};

const EMPTY_CELL: char = ' ';

/// Render one row per y (from `y_min`), cells joined by `|`.
///
/// Prey are drawn in order and the hunter is drawn last, so it wins its cell.
/// Grids above `MAX_RENDERED_CELLS` are replaced by a one-line notice.
pub fn render_grid(boundary: &Boundary, agents: &[AgentState]) -> String {
    if boundary.cell_count() > MAX_RENDERED_CELLS {
        return format!(
            "<grid of {}x{} cells not rendered>",
            boundary.width(),
            boundary.height()
        );
    }

    let width = boundary.width() as usize;
    let height = boundary.height() as usize;
    let mut cells = vec![vec![EMPTY_CELL; width]; height];

    let prey = agents.iter().filter(|a| a.role == Role::Prey);
    let hunters = agents.iter().filter(|a| a.role == Role::Hunter);

    for agent in prey.chain(hunters) {
        if let Some((row, col)) = cell_index(boundary, agent.location) {
            cells[row][col] = agent.sign;
        }
    }

    cells
        .iter()
        .map(|row| {
            row.iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn cell_index(boundary: &Boundary, location: Location) -> Option<(usize, usize)> {
    if !location.is_valid(boundary) {
        return None;
    }
    let row = (location.y - boundary.y_min) as usize;
    let col = (location.x - boundary.x_min) as usize;
    Some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(name: &str, role: Role, x: i32, y: i32, alive: bool) -> AgentState {
        let sign = match (role, alive) {
            (Role::Hunter, _) => 'H',
            (Role::Prey, true) => 'P',
            (Role::Prey, false) => 'X',
        };
        AgentState {
            name: name.to_string(),
            role,
            location: Location::new(x, y),
            alive,
            sign,
        }
    }

    #[test]
    fn test_grid_dimensions() {
        let boundary = Boundary::new(0, 3, 0, 1).unwrap();
        let rendered = render_grid(&boundary, &[]);
        let rows: Vec<&str> = rendered.lines().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], " | | | ");
    }

    #[test]
    fn test_hunter_drawn_over_prey() {
        let boundary = Boundary::new(0, 2, 0, 1).unwrap();
        let agents = vec![
            agent("Hunter", Role::Hunter, 1, 0, true),
            agent("Prey_0", Role::Prey, 1, 0, false),
            agent("Prey_1", Role::Prey, 2, 1, true),
        ];

        let rendered = render_grid(&boundary, &agents);
        assert_eq!(rendered, " |H| \n | |P");
    }

    #[test]
    fn test_oversized_grid_not_allocated() {
        let boundary = Boundary::new(0, i32::MAX, 0, 1).unwrap();
        let agents = vec![agent("Hunter", Role::Hunter, 0, 0, true)];
        let rendered = render_grid(&boundary, &agents);
        assert_eq!(rendered, "<grid of 2147483648x2 cells not rendered>");
    }

    #[test]
    fn test_dead_prey_sign_and_offset_boundary() {
        let boundary = Boundary::new(5, 6, -1, -1).unwrap();
        let agents = vec![agent("Prey_0", Role::Prey, 6, -1, false)];
        assert_eq!(render_grid(&boundary, &agents), " |X");
    }
}
