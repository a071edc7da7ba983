//! Rooms and their local walkable grid.
//!
//! A room is a small square grid: walls around the border, floor inside, a
//! centre reference cell, and one marker at the midpoint of each edge that
//! has a non-closed entrance. Interior shortcut cells jump straight into
//! another room. The grid is derived data and is rebuilt whenever the
//! entrances or shortcuts change.

use super::{CardinalDirection, Enemy, GridPos, Inventory, LocalPos, RoomId, UseHandler};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    #[error("room size {0} must be odd and at least 3")]
    InvalidSize(usize),

    #[error("shortcut at {position} must be an interior cell other than the centre")]
    InvalidShortcut { position: LocalPos },
}

impl GameError for RoomError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSize(_) => "ROOM_INVALID_SIZE",
            Self::InvalidShortcut { .. } => "ROOM_INVALID_SHORTCUT",
        }
    }
}

/// State of one directional opening.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Entrance {
    /// Solid wall, no marker on the grid.
    #[default]
    Closed,
    /// Doorway with nothing behind it yet.
    Open,
    /// Doorway leading into the given room.
    Bound(RoomId),
}

impl Entrance {
    pub fn is_closed(self) -> bool {
        matches!(self, Entrance::Closed)
    }

    pub fn bound_room(self) -> Option<RoomId> {
        match self {
            Entrance::Bound(room) => Some(room),
            Entrance::Closed | Entrance::Open => None,
        }
    }
}

/// One cell of a room's local grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Wall,
    Floor,
    /// Centre of the room; walkable.
    Here,
    Entrance(CardinalDirection),
    Shortcut(RoomId),
}

impl Cell {
    pub fn is_walkable(self) -> bool {
        matches!(self, Cell::Floor | Cell::Here)
    }
}

/// Why a step did not happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockReason {
    OutOfBounds,
    Wall,
    UnboundEntrance(CardinalDirection),
}

/// Result of resolving a single step on a room's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Blocked(BlockReason),
    Walk(LocalPos),
    /// Leave the room. `direction` is the direction of travel.
    Enter {
        room: RoomId,
        direction: CardinalDirection,
    },
}

/// Square grid of cells with odd side length.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalGrid {
    size: usize,
    cells: Vec<Cell>,
}

impl LocalGrid {
    fn build(size: usize, entrances: &[Entrance; 4], shortcuts: &[(LocalPos, RoomId)]) -> Self {
        let last = size - 1;
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let border = row == 0 || col == 0 || row == last || col == last;
                cells.push(if border { Cell::Wall } else { Cell::Floor });
            }
        }

        let mut grid = Self { size, cells };
        grid.set(grid.centre(), Cell::Here);

        for direction in CardinalDirection::ALL {
            if !entrances[direction.index()].is_closed() {
                grid.set(grid.entrance_cell(direction), Cell::Entrance(direction));
            }
        }
        for &(position, room) in shortcuts {
            grid.set(position, Cell::Shortcut(room));
        }

        grid
    }

    fn set(&mut self, position: LocalPos, cell: Cell) {
        let index = position.row * self.size + position.col;
        self.cells[index] = cell;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn centre(&self) -> LocalPos {
        let mid = self.size / 2;
        LocalPos::new(mid, mid)
    }

    /// Midpoint of the edge facing `direction`.
    pub fn entrance_cell(&self, direction: CardinalDirection) -> LocalPos {
        let mid = self.size / 2;
        let last = self.size - 1;
        match direction {
            CardinalDirection::North => LocalPos::new(0, mid),
            CardinalDirection::South => LocalPos::new(last, mid),
            CardinalDirection::East => LocalPos::new(mid, last),
            CardinalDirection::West => LocalPos::new(mid, 0),
        }
    }

    pub fn cell(&self, position: LocalPos) -> Option<Cell> {
        if position.row >= self.size || position.col >= self.size {
            return None;
        }
        Some(self.cells[position.row * self.size + position.col])
    }

    /// Cells row by row, for display.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    fn positions(&self) -> impl Iterator<Item = (LocalPos, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(index, &cell)| {
            (LocalPos::new(index / self.size, index % self.size), cell)
        })
    }

    fn is_interior(&self, position: LocalPos) -> bool {
        let last = self.size - 1;
        (1..last).contains(&position.row) && (1..last).contains(&position.col)
    }
}

/// A navigable room: entrances, local grid, floor inventory and occupants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    name: String,
    entrances: [Entrance; 4],
    shortcuts: Vec<(LocalPos, RoomId)>,
    grid: LocalGrid,
    inventory: Inventory,
    enemies: Vec<Enemy>,
    map_position: Option<GridPos>,
}

impl Room {
    pub fn new(name: impl Into<String>, size: usize) -> Result<Self, RoomError> {
        if size < GameConfig::MIN_ROOM_SIZE || size % 2 == 0 {
            return Err(RoomError::InvalidSize(size));
        }
        let entrances = [Entrance::Closed; 4];
        Ok(Self {
            name: name.into(),
            entrances,
            shortcuts: Vec::new(),
            grid: LocalGrid::build(size, &entrances, &[]),
            inventory: Inventory::with_handler(UseHandler::PickUp),
            enemies: Vec::new(),
            map_position: None,
        })
    }

    /// Builder-style variant of [`Room::add_entrance`].
    pub fn with_entrance(mut self, direction: CardinalDirection, entrance: Entrance) -> Self {
        self.add_entrance(direction, entrance);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entrance(&self, direction: CardinalDirection) -> Entrance {
        self.entrances[direction.index()]
    }

    pub fn entrances(&self) -> impl Iterator<Item = (CardinalDirection, Entrance)> + '_ {
        CardinalDirection::ALL
            .into_iter()
            .map(|direction| (direction, self.entrances[direction.index()]))
    }

    /// Directions whose entrance does not lead anywhere yet.
    pub fn unbound_directions(&self) -> impl Iterator<Item = CardinalDirection> + '_ {
        self.entrances()
            .filter(|(_, entrance)| entrance.bound_room().is_none())
            .map(|(direction, _)| direction)
    }

    /// Replaces one entrance and rebuilds the grid.
    pub fn add_entrance(&mut self, direction: CardinalDirection, entrance: Entrance) {
        self.entrances[direction.index()] = entrance;
        self.rebuild_grid();
    }

    /// Places a cell that jumps straight into `room`.
    pub fn add_shortcut(&mut self, position: LocalPos, room: RoomId) -> Result<(), RoomError> {
        if !self.grid.is_interior(position) || position == self.grid.centre() {
            return Err(RoomError::InvalidShortcut { position });
        }
        self.shortcuts.retain(|(existing, _)| *existing != position);
        self.shortcuts.push((position, room));
        self.rebuild_grid();
        Ok(())
    }

    pub fn shortcuts(&self) -> &[(LocalPos, RoomId)] {
        &self.shortcuts
    }

    fn rebuild_grid(&mut self) {
        self.grid = LocalGrid::build(self.grid.size, &self.entrances, &self.shortcuts);
    }

    pub fn grid(&self) -> &LocalGrid {
        &self.grid
    }

    pub fn cell(&self, position: LocalPos) -> Option<Cell> {
        self.grid.cell(position)
    }

    pub fn centre(&self) -> LocalPos {
        self.grid.centre()
    }

    /// Scans the grid for the marker of `direction`.
    pub fn find_entrance(&self, direction: CardinalDirection) -> Option<LocalPos> {
        self.grid
            .positions()
            .find(|(_, cell)| *cell == Cell::Entrance(direction))
            .map(|(position, _)| position)
    }

    /// Where a player travelling in `direction` appears: this room's
    /// entrance on the opposite side, or the centre if there is none.
    pub fn entry_point(&self, direction: CardinalDirection) -> LocalPos {
        self.find_entrance(direction.opposite())
            .unwrap_or_else(|| self.centre())
    }

    /// Decides what a single step from `from` towards `direction` does.
    pub fn resolve_step(&self, from: LocalPos, direction: CardinalDirection) -> Step {
        let Some(target) = from.step(direction, self.grid.size) else {
            return Step::Blocked(BlockReason::OutOfBounds);
        };
        match self.grid.cell(target) {
            None => Step::Blocked(BlockReason::OutOfBounds),
            Some(Cell::Wall) => Step::Blocked(BlockReason::Wall),
            Some(Cell::Floor | Cell::Here) => Step::Walk(target),
            Some(Cell::Shortcut(room)) => Step::Enter { room, direction },
            Some(Cell::Entrance(side)) => match self.entrance(side) {
                Entrance::Bound(room) => Step::Enter { room, direction },
                Entrance::Open | Entrance::Closed => {
                    Step::Blocked(BlockReason::UnboundEntrance(side))
                }
            },
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn has_enemies(&self) -> bool {
        !self.enemies.is_empty()
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn remove_enemy(&mut self, index: usize) -> Option<Enemy> {
        (index < self.enemies.len()).then(|| self.enemies.remove(index))
    }

    pub fn map_position(&self) -> Option<GridPos> {
        self.map_position
    }

    pub(crate) fn set_map_position(&mut self, position: GridPos) {
        self.map_position = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CardinalDirection::*;

    fn hall() -> Room {
        Room::new("Great Hall", 7)
            .unwrap()
            .with_entrance(North, Entrance::Bound(RoomId(1)))
            .with_entrance(East, Entrance::Open)
    }

    #[test]
    fn rejects_even_sizes() {
        assert_eq!(Room::new("Closet", 4), Err(RoomError::InvalidSize(4)));
        assert_eq!(Room::new("Closet", 1), Err(RoomError::InvalidSize(1)));
    }

    #[test]
    fn grid_layout_marks_walls_centre_and_entrances() {
        let room = hall();
        assert_eq!(room.cell(LocalPos::new(0, 0)), Some(Cell::Wall));
        assert_eq!(room.cell(LocalPos::new(1, 1)), Some(Cell::Floor));
        assert_eq!(room.cell(LocalPos::new(3, 3)), Some(Cell::Here));
        assert_eq!(room.cell(LocalPos::new(0, 3)), Some(Cell::Entrance(North)));
        assert_eq!(room.cell(LocalPos::new(3, 6)), Some(Cell::Entrance(East)));
        // closed sides stay wall
        assert_eq!(room.cell(LocalPos::new(6, 3)), Some(Cell::Wall));
        assert_eq!(room.cell(LocalPos::new(3, 0)), Some(Cell::Wall));
        assert_eq!(room.cell(LocalPos::new(7, 0)), None);
    }

    #[test]
    fn find_entrance_reports_missing_markers() {
        let room = hall();
        assert_eq!(room.find_entrance(North), Some(LocalPos::new(0, 3)));
        assert_eq!(room.find_entrance(South), None);
    }

    #[test]
    fn add_entrance_rebuilds_grid() {
        let mut room = hall();
        room.add_entrance(South, Entrance::Bound(RoomId(4)));
        assert_eq!(room.find_entrance(South), Some(LocalPos::new(6, 3)));
        room.add_entrance(North, Entrance::Closed);
        assert_eq!(room.find_entrance(North), None);
        assert_eq!(room.cell(LocalPos::new(0, 3)), Some(Cell::Wall));
    }

    #[test]
    fn steps_resolve_by_cell() {
        let room = hall();
        assert_eq!(
            room.resolve_step(LocalPos::new(3, 3), West),
            Step::Walk(LocalPos::new(3, 2))
        );
        assert_eq!(
            room.resolve_step(LocalPos::new(1, 1), North),
            Step::Blocked(BlockReason::Wall)
        );
        assert_eq!(
            room.resolve_step(LocalPos::new(0, 3), North),
            Step::Blocked(BlockReason::OutOfBounds)
        );
        assert_eq!(
            room.resolve_step(LocalPos::new(1, 3), North),
            Step::Enter {
                room: RoomId(1),
                direction: North
            }
        );
        assert_eq!(
            room.resolve_step(LocalPos::new(3, 5), East),
            Step::Blocked(BlockReason::UnboundEntrance(East))
        );
    }

    #[test]
    fn shortcuts_jump_rooms_and_survive_rebuilds() {
        let mut room = hall();
        room.add_shortcut(LocalPos::new(2, 2), RoomId(9)).unwrap();
        room.add_entrance(West, Entrance::Open);
        assert_eq!(room.cell(LocalPos::new(2, 2)), Some(Cell::Shortcut(RoomId(9))));
        assert_eq!(
            room.resolve_step(LocalPos::new(2, 3), West),
            Step::Enter {
                room: RoomId(9),
                direction: West
            }
        );
    }

    #[test]
    fn shortcuts_must_be_interior() {
        let mut room = hall();
        for position in [LocalPos::new(0, 2), LocalPos::new(3, 3), LocalPos::new(9, 9)] {
            assert_eq!(
                room.add_shortcut(position, RoomId(2)),
                Err(RoomError::InvalidShortcut { position })
            );
        }
    }

    #[test]
    fn entry_point_prefers_opposite_entrance() {
        let room = hall();
        // travelling south into this room arrives through its north door
        assert_eq!(room.entry_point(South), LocalPos::new(0, 3));
        // no west door, so travelling east lands in the centre
        assert_eq!(room.entry_point(East), room.centre());
    }

    #[test]
    fn unbound_directions_skip_bound_doors() {
        let room = hall();
        let unbound: Vec<_> = room.unbound_directions().collect();
        assert_eq!(unbound, vec![South, East, West]);
    }

    #[test]
    fn floor_inventory_picks_up() {
        let room = hall();
        assert_eq!(room.inventory().handler(), Some(UseHandler::PickUp));
    }
}
