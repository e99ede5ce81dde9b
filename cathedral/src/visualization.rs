use crate::{Agent, BoardState, Cell, Grid, Territory, TerritoryMap, BOARD_SIZE};

fn mark(cell: Cell, territory: Territory) -> char {
    match (cell, territory) {
        (Cell::PlayerA, _) => 'A',
        (Cell::PlayerB, _) => 'B',
        (Cell::Cathedral, _) => 'C',
        (Cell::Empty, Territory::Owned(Agent::PlayerA)) => 'a',
        (Cell::Empty, Territory::Owned(Agent::PlayerB)) => 'b',
        (Cell::Empty, _) => '·',
    }
}

/// Draws the board in a box, one line per `y`.
///
/// Pieces are upper case, territory is lower case.
pub fn visualize_board(grid: &Grid, territory: &TerritoryMap) -> String {
    // Draw the top of the box
    let mut result = String::from("    ");
    for x in 0..BOARD_SIZE {
        result += &format!("{:<2}", x);
    }
    result += "\n   ╭";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "─╮\n";

    for y in 0..BOARD_SIZE {
        result += &format!("{:>2} │", y);
        for x in 0..BOARD_SIZE {
            result.push(' ');
            result.push(mark(grid.cell(x, y), territory.get(x, y)));
        }
        result += " │\n";
    }

    // Draw the bottom of the box
    result += "   ╰";
    for _ in 0..BOARD_SIZE {
        result += "──";
    }
    result += "─╯";
    result
}

impl std::fmt::Display for BoardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_board(self.grid(), self.territory()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve;

    #[test]
    fn marks() {
        let mut grid = Grid::new();
        for (x, y) in [(1, 0), (0, 1), (1, 1)] {
            grid.set_cell(x, y, Cell::PlayerB);
        }
        grid.set_cell(9, 9, Cell::Cathedral);
        let text = visualize_board(&grid, &resolve(&grid));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2 + BOARD_SIZE as usize + 1);
        assert_eq!(lines[2], " 0 │ b B · · · · · · · · │");
        assert_eq!(lines[3], " 1 │ B B · · · · · · · · │");
        assert_eq!(lines[11], " 9 │ · · · · · · · · · C │");
        assert_eq!(lines[1].chars().count(), lines[2].chars().count());
    }
}
