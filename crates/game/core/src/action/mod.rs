//! Action domain.
//!
//! Every state change is expressed as an action that implements
//! [`ActionTransition`]. Player commands are [`CharacterActionKind`]s; world
//! setup commands issued by the game factory or a scripted event are
//! [`SystemActionKind`]s.
//!
//! # Module Structure
//!
//! - `transition`: the three-phase transition trait and the per-action context
//! - `movement`: walking the local grid and entering rooms
//! - `combat`: attack rounds, retreat, knock-outs
//! - `inventory`: picking up and activating items
//! - `system`: random placement and the boss-room unlock

pub mod combat;
pub mod inventory;
pub mod movement;
pub mod system;
pub mod transition;

pub use combat::{
    AttackAction, AttackError, BattleRound, KnockOut, RetreatAction, RetreatError, RoundResolution,
};
pub use inventory::{InventoryOwner, UseItemAction, UseItemError, UseOutcome};
pub use movement::{MoveAction, MoveError, MoveOutcome};
pub use system::{PlaceEnemyAction, PlaceItemAction, PlacementError, UnlockBossRoomAction};
pub use transition::{ActionContext, ActionTransition};

use crate::state::CardinalDirection;

/// Commands issued by the player.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CharacterActionKind {
    Move(MoveAction),
    Attack(AttackAction),
    Retreat(RetreatAction),
    UseItem(UseItemAction),
}

/// World setup and scripted events.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SystemActionKind {
    PlaceItem(PlaceItemAction),
    PlaceEnemy(PlaceEnemyAction),
    UnlockBossRoom(UnlockBossRoomAction),
}

/// Top-level action enum that can be either a character action or system action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Character { kind: CharacterActionKind },
    System { kind: SystemActionKind },
}

impl Action {
    pub fn character(kind: CharacterActionKind) -> Self {
        Self::Character { kind }
    }

    pub fn system(kind: SystemActionKind) -> Self {
        Self::System { kind }
    }

    pub fn move_player(direction: CardinalDirection) -> Self {
        MoveAction::new(direction).into()
    }

    pub fn attack() -> Self {
        AttackAction.into()
    }

    pub fn retreat() -> Self {
        RetreatAction.into()
    }

    pub fn use_item(owner: InventoryOwner, cursor: usize) -> Self {
        UseItemAction::new(owner, cursor).into()
    }

    /// Stable snake_case name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Character { kind } => kind.into(),
            Action::System { kind } => kind.into(),
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Action::System { .. })
    }
}

macro_rules! impl_into_action {
    ($($action:ty => $group:ident($kind:ident::$variant:ident)),* $(,)?) => {
        $(
            impl From<$action> for Action {
                fn from(action: $action) -> Self {
                    Action::$group {
                        kind: $kind::$variant(action),
                    }
                }
            }
        )*
    };
}

impl_into_action! {
    MoveAction => Character(CharacterActionKind::Move),
    AttackAction => Character(CharacterActionKind::Attack),
    RetreatAction => Character(CharacterActionKind::Retreat),
    UseItemAction => Character(CharacterActionKind::UseItem),
    PlaceItemAction => System(SystemActionKind::PlaceItem),
    PlaceEnemyAction => System(SystemActionKind::PlaceEnemy),
    UnlockBossRoomAction => System(SystemActionKind::UnlockBossRoom),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_snake_case() {
        assert_eq!(Action::move_player(CardinalDirection::North).name(), "move");
        assert_eq!(Action::use_item(InventoryOwner::Player, 0).name(), "use_item");
        assert_eq!(Action::from(UnlockBossRoomAction).name(), "unlock_boss_room");
        assert!(Action::from(UnlockBossRoomAction).is_system());
        assert!(!Action::attack().is_system());
    }
}
