//! Exploration and combat rules for Dracula's Castle.
//!
//! `castle-core` defines the canonical rules (actions, engine, castle state)
//! and exposes synchronous APIs that a presentation layer drives. All state
//! mutation flows through [`engine::GameEngine`]; randomness is always
//! injected through [`env::RngOracle`] so outcomes are reproducible.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    Action, ActionContext, ActionTransition, AttackAction, AttackError, BattleRound,
    CharacterActionKind, InventoryOwner, KnockOut, MoveAction, MoveError, MoveOutcome,
    PlaceEnemyAction, PlaceItemAction, PlacementError, RetreatAction, RetreatError,
    RoundResolution, SystemActionKind, UnlockBossRoomAction, UseItemAction, UseItemError,
    UseOutcome,
};
pub use combat::{AttackResult, CombatError, apply_damage, attack, calculate_damage};
pub use config::{ConfigError, GameConfig};
pub use engine::{
    ActionResult, ExecuteError, ExecutionOutcome, GameEngine, GameEvent, TransitionPhase,
    TransitionPhaseError,
};
pub use env::{
    CastleLayout, EnemyTemplate, EnemyTemplateBuilder, EntranceSpec, PcgRng, RngOracle,
    RoomSpec, ScriptedRng, ShortcutSpec,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Armor, BlockReason, BossUnlock, CardinalDirection, Cell, Combatant, Enemy, Entrance,
    GamePhase, GameState, GridPos, Inventory, InventoryError, Item, ItemError, ItemKind, ItemUse,
    Key, KeyEffect, LocalGrid, LocalPos, Map, MapError, Player, Potion, Room, RoomError, RoomId,
    Step, UnlockError, UseHandler, Waypoint, Weapon,
};
