//! Static castle layout description.
//!
//! A [`CastleLayout`] is plain data: a ragged grid of optional room specs plus
//! the start and boss coordinates. [`Map::from_layout`](crate::state::Map::from_layout)
//! turns it into live rooms.

use crate::state::{CardinalDirection, GridPos, LocalPos};

/// Declared state of one entrance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntranceSpec {
    #[default]
    Closed,
    /// Bound to the grid neighbour on that side when the map is built.
    Open,
    /// Bound explicitly to the room at the given map coordinate.
    To(GridPos),
}

/// Interior cell that jumps straight into another room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortcutSpec {
    pub at: LocalPos,
    pub to: GridPos,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoomSpec {
    pub name: String,
    pub north: EntranceSpec,
    pub south: EntranceSpec,
    pub east: EntranceSpec,
    pub west: EntranceSpec,
    pub shortcuts: Vec<ShortcutSpec>,
}

impl RoomSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with(mut self, direction: CardinalDirection, entrance: EntranceSpec) -> Self {
        *self.entrance_mut(direction) = entrance;
        self
    }

    pub fn with_shortcut(mut self, at: LocalPos, to: GridPos) -> Self {
        self.shortcuts.push(ShortcutSpec { at, to });
        self
    }

    pub fn entrance(&self, direction: CardinalDirection) -> EntranceSpec {
        match direction {
            CardinalDirection::North => self.north,
            CardinalDirection::South => self.south,
            CardinalDirection::East => self.east,
            CardinalDirection::West => self.west,
        }
    }

    fn entrance_mut(&mut self, direction: CardinalDirection) -> &mut EntranceSpec {
        match direction {
            CardinalDirection::North => &mut self.north,
            CardinalDirection::South => &mut self.south,
            CardinalDirection::East => &mut self.east,
            CardinalDirection::West => &mut self.west,
        }
    }
}

/// The whole castle as data. Rows may differ in length; `None` is a hole.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastleLayout {
    pub rows: Vec<Vec<Option<RoomSpec>>>,
    pub start: GridPos,
    pub boss: GridPos,
}

impl CastleLayout {
    pub fn spec_at(&self, position: GridPos) -> Option<&RoomSpec> {
        self.rows.get(position.row)?.get(position.col)?.as_ref()
    }

    pub fn room_count(&self) -> usize {
        self.rows.iter().flatten().flatten().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lookup_handles_holes_and_ragged_rows() {
        let layout = CastleLayout {
            rows: vec![
                vec![Some(RoomSpec::new("Gate")), None],
                vec![Some(RoomSpec::new("Hall"))],
            ],
            start: GridPos::new(0, 0),
            boss: GridPos::new(1, 0),
        };
        assert_eq!(layout.room_count(), 2);
        assert!(layout.spec_at(GridPos::new(0, 1)).is_none());
        assert!(layout.spec_at(GridPos::new(1, 1)).is_none());
        assert_eq!(
            layout.spec_at(GridPos::new(1, 0)).map(|spec| spec.name.as_str()),
            Some("Hall")
        );
    }

    #[test]
    fn builder_sets_each_side() {
        let spec = RoomSpec::new("Chapel")
            .with(CardinalDirection::West, EntranceSpec::Open)
            .with(CardinalDirection::North, EntranceSpec::To(GridPos::new(0, 0)));
        assert_eq!(spec.west, EntranceSpec::Open);
        assert_eq!(spec.entrance(CardinalDirection::North), EntranceSpec::To(GridPos::new(0, 0)));
        assert_eq!(spec.entrance(CardinalDirection::South), EntranceSpec::Closed);
    }
}
