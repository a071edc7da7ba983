//! The castle map: an arena of rooms laid out on a coarse grid.
//!
//! Rooms live in a `Vec` and are addressed by [`RoomId`]. The grid only
//! records which cell holds which room; it is consulted once at construction
//! to bind `Open` entrances to their neighbours. After that every link is an
//! explicit [`Entrance::Bound`].

use std::ops::Index;

use tracing::debug;

use super::{CardinalDirection, Entrance, GridPos, Room, RoomError, RoomId};
use crate::env::{CastleLayout, EntranceSpec, RngOracle};
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("castle has no rooms")]
    Empty,

    #[error("{role} coordinate {position} does not hold a room")]
    MissingRoom {
        role: &'static str,
        position: GridPos,
    },

    #[error("start and boss share the room at {0}")]
    BossAtStart(GridPos),

    #[error("room '{room}' links {direction} to {target}, which does not hold a room")]
    DanglingBinding {
        room: String,
        direction: CardinalDirection,
        target: GridPos,
    },

    #[error("room '{room}' has a shortcut to {target}, which does not hold a room")]
    DanglingShortcut { room: String, target: GridPos },

    #[error("room '{room}' refers to {target}, which is not in the castle")]
    UnknownRoom { room: String, target: RoomId },

    #[error(transparent)]
    Room(#[from] RoomError),
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "MAP_EMPTY",
            Self::MissingRoom { .. } => "MAP_MISSING_ROOM",
            Self::BossAtStart(_) => "MAP_BOSS_AT_START",
            Self::DanglingBinding { .. } => "MAP_DANGLING_BINDING",
            Self::DanglingShortcut { .. } => "MAP_DANGLING_SHORTCUT",
            Self::UnknownRoom { .. } => "MAP_UNKNOWN_ROOM",
            Self::Room(err) => err.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnlockError {
    #[error("the boss room is already unlocked")]
    AlreadyUnlocked,

    #[error("no unbound entrance is left to lead into the boss room")]
    NoFreeSlot,
}

impl GameError for UnlockError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyUnlocked => ErrorSeverity::Recoverable,
            Self::NoFreeSlot => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyUnlocked => "UNLOCK_ALREADY_UNLOCKED",
            Self::NoFreeSlot => "UNLOCK_NO_FREE_SLOT",
        }
    }
}

/// The entrance chosen to lead into the boss room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossUnlock {
    pub room: RoomId,
    pub direction: CardinalDirection,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Map {
    rooms: Vec<Room>,
    grid: Vec<Vec<Option<RoomId>>>,
    start: RoomId,
    boss: RoomId,
    boss_unlocked: bool,
}

impl Map {
    /// Builds a map from a ragged grid of rooms.
    ///
    /// Ids are assigned in row-major order. Every `Open` entrance with a room
    /// on that side of the grid becomes bound to it. `Open` entrances facing
    /// an edge, a hole, or the boss room stay open, so the boss room is only
    /// reachable once unlocked.
    pub fn new(
        layout: Vec<Vec<Option<Room>>>,
        start: GridPos,
        boss: GridPos,
    ) -> Result<Self, MapError> {
        let mut rooms = Vec::new();
        let mut grid = Vec::with_capacity(layout.len());
        for (row, cells) in layout.into_iter().enumerate() {
            let mut ids = Vec::with_capacity(cells.len());
            for (col, cell) in cells.into_iter().enumerate() {
                ids.push(cell.map(|mut room| {
                    let id = RoomId(rooms.len());
                    room.set_map_position(GridPos::new(row, col));
                    rooms.push(room);
                    id
                }));
            }
            grid.push(ids);
        }

        if rooms.is_empty() {
            return Err(MapError::Empty);
        }

        let mut map = Self {
            rooms,
            grid,
            start: RoomId(0),
            boss: RoomId(0),
            boss_unlocked: false,
        };
        map.start = map.room_at(start).ok_or(MapError::MissingRoom {
            role: "start",
            position: start,
        })?;
        map.boss = map.room_at(boss).ok_or(MapError::MissingRoom {
            role: "boss",
            position: boss,
        })?;
        if map.start == map.boss {
            return Err(MapError::BossAtStart(start));
        }

        map.check_references()?;
        map.bind_open_entrances();
        Ok(map)
    }

    /// Builds live rooms of `room_size` from a static layout.
    pub fn from_layout(layout: &CastleLayout, room_size: usize) -> Result<Self, MapError> {
        // Pre-compute the ids `Map::new` will assign so explicit links resolve.
        let mut next = 0;
        let ids: Vec<Vec<Option<RoomId>>> = layout
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|spec| {
                        spec.as_ref().map(|_| {
                            next += 1;
                            RoomId(next - 1)
                        })
                    })
                    .collect()
            })
            .collect();
        let id_at = |position: GridPos| -> Option<RoomId> {
            *ids.get(position.row)?.get(position.col)?
        };

        let mut rooms = Vec::with_capacity(layout.rows.len());
        for row in &layout.rows {
            let mut built = Vec::with_capacity(row.len());
            for spec in row {
                let Some(spec) = spec else {
                    built.push(None);
                    continue;
                };

                let mut room = Room::new(spec.name.clone(), room_size)?;
                for direction in CardinalDirection::ALL {
                    let entrance = match spec.entrance(direction) {
                        EntranceSpec::Closed => continue,
                        EntranceSpec::Open => Entrance::Open,
                        EntranceSpec::To(target) => {
                            Entrance::Bound(id_at(target).ok_or_else(|| {
                                MapError::DanglingBinding {
                                    room: spec.name.clone(),
                                    direction,
                                    target,
                                }
                            })?)
                        }
                    };
                    room.add_entrance(direction, entrance);
                }
                for shortcut in &spec.shortcuts {
                    let target =
                        id_at(shortcut.to).ok_or_else(|| MapError::DanglingShortcut {
                            room: spec.name.clone(),
                            target: shortcut.to,
                        })?;
                    room.add_shortcut(shortcut.at, target)?;
                }
                built.push(Some(room));
            }
            rooms.push(built);
        }

        Self::new(rooms, layout.start, layout.boss)
    }

    fn check_references(&self) -> Result<(), MapError> {
        for room in &self.rooms {
            let bound = room.entrances().filter_map(|(_, entrance)| entrance.bound_room());
            let shortcuts = room.shortcuts().iter().map(|&(_, target)| target);
            if let Some(target) = bound
                .chain(shortcuts)
                .find(|target| target.0 >= self.rooms.len())
            {
                return Err(MapError::UnknownRoom {
                    room: room.name().to_owned(),
                    target,
                });
            }
        }
        Ok(())
    }

    fn bind_open_entrances(&mut self) {
        for index in 0..self.rooms.len() {
            let id = RoomId(index);
            for direction in CardinalDirection::ALL {
                if self.rooms[index].entrance(direction) != Entrance::Open {
                    continue;
                }
                if let Some(neighbour) = self.neighbor(id, direction) {
                    if neighbour == self.boss {
                        continue;
                    }
                    debug!(room = %id, %direction, %neighbour, "bound open entrance");
                    self.rooms[index].add_entrance(direction, Entrance::Bound(neighbour));
                }
            }
        }
    }

    /// Room on the grid next to `room`, or `None` at edges and holes.
    pub fn neighbor(&self, room: RoomId, direction: CardinalDirection) -> Option<RoomId> {
        let position = self.room(room)?.map_position()?;
        self.room_at(position.step(direction)?)
    }

    pub fn room_at(&self, position: GridPos) -> Option<RoomId> {
        *self.grid.get(position.row)?.get(position.col)?
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.0)
    }

    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms
            .iter()
            .enumerate()
            .map(|(index, room)| (RoomId(index), room))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Room ids row by row, holes as `None`.
    pub fn grid(&self) -> &[Vec<Option<RoomId>>] {
        &self.grid
    }

    pub fn start_room(&self) -> RoomId {
        self.start
    }

    pub fn boss_room(&self) -> RoomId {
        self.boss
    }

    pub fn is_boss_unlocked(&self) -> bool {
        self.boss_unlocked
    }

    /// Every `(room, direction)` outside the boss room whose entrance does
    /// not lead anywhere yet.
    pub fn unbound_slots(&self) -> Vec<(RoomId, CardinalDirection)> {
        self.rooms()
            .filter(|(id, _)| *id != self.boss)
            .flat_map(|(id, room)| room.unbound_directions().map(move |dir| (id, dir)))
            .collect()
    }

    /// Binds one uniformly chosen unbound slot to the boss room.
    ///
    /// Only the chosen side is bound; the boss room gains no way back.
    pub fn unlock_boss_room(
        &mut self,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<BossUnlock, UnlockError> {
        if self.boss_unlocked {
            return Err(UnlockError::AlreadyUnlocked);
        }
        let slots = self.unbound_slots();
        let index = rng.choose_index(slots.len()).ok_or(UnlockError::NoFreeSlot)?;
        let (room, direction) = slots[index];

        let boss = self.boss;
        self.rooms[room.0].add_entrance(direction, Entrance::Bound(boss));
        self.boss_unlocked = true;
        Ok(BossUnlock { room, direction })
    }

    /// Picks a uniformly random room among those accepted by `filter`.
    pub fn random_room(
        &self,
        rng: &mut (impl RngOracle + ?Sized),
        mut filter: impl FnMut(RoomId, &Room) -> bool,
    ) -> Option<RoomId> {
        let candidates: Vec<RoomId> = self
            .rooms()
            .filter(|(id, room)| filter(*id, room))
            .map(|(id, _)| id)
            .collect();
        rng.choose_index(candidates.len())
            .map(|index| candidates[index])
    }
}

impl Index<RoomId> for Map {
    type Output = Room;

    fn index(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }
}
