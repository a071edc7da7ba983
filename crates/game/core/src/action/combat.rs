//! Attack rounds, retreats and knock-outs.

use tracing::{info, warn};

use crate::action::{ActionContext, ActionTransition};
use crate::combat::{self, AttackResult, CombatError};
use crate::engine::GameEvent;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GamePhase, GameState, RoomId, Waypoint};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("there is nothing to attack")]
    NoEncounter,

    #[error("no enemy left in {0}")]
    NoEnemy(RoomId),

    #[error("the fight is in {encounter} but the player is in {player}")]
    WrongRoom { encounter: RoomId, player: RoomId },

    #[error(transparent)]
    Combat(#[from] CombatError),
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoEncounter => ErrorSeverity::Recoverable,
            Self::NoEnemy(_) | Self::WrongRoom { .. } => ErrorSeverity::Internal,
            Self::Combat(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEncounter => "ATTACK_NO_ENCOUNTER",
            Self::NoEnemy(_) => "ATTACK_NO_ENEMY",
            Self::WrongRoom { .. } => "ATTACK_WRONG_ROOM",
            Self::Combat(err) => err.error_code(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RetreatError {
    #[error("there is nothing to retreat from")]
    NoEncounter,
}

impl GameError for RetreatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "RETREAT_NO_ENCOUNTER"
    }
}

/// What happened to a player whose health reached 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnockOut {
    /// Dragged back to the previous waypoint and patched up.
    Revived { at: Waypoint, health: u32 },
    /// Died in the boss room. The game is lost.
    Defeated,
}

/// How an attack round ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundResolution {
    /// Both sides still stand.
    Continue,
    EnemySlain { enemy: String, boss: bool },
    PlayerDown(KnockOut),
}

/// Full record of one attack round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRound {
    pub player_strike: AttackResult,
    /// `None` when the enemy died before striking back.
    pub enemy_strike: Option<AttackResult>,
    pub resolution: RoundResolution,
}

/// The player strikes the current enemy, which strikes back if it survives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction;

impl AttackAction {
    fn encounter_room(state: &GameState) -> Result<RoomId, AttackError> {
        let room = state.phase.encounter_room().ok_or(AttackError::NoEncounter)?;
        if state.player.room() != room {
            return Err(AttackError::WrongRoom {
                encounter: room,
                player: state.player.room(),
            });
        }
        Ok(room)
    }
}

impl ActionTransition for AttackAction {
    type Error = AttackError;
    type Result = BattleRound;

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        let room = Self::encounter_room(state)?;
        let has_enemy = state.map.room(room).is_some_and(|room| room.has_enemies());
        if !has_enemy {
            return Err(AttackError::NoEnemy(room));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let room_id = Self::encounter_room(state)?;
        let room = state
            .map
            .room_mut(room_id)
            .ok_or(AttackError::NoEnemy(room_id))?;
        let enemy = room
            .enemies_mut()
            .first_mut()
            .ok_or(AttackError::NoEnemy(room_id))?;

        let player_strike =
            combat::attack(state.player.combatant(), enemy.combatant_mut(), ctx.rng())?;
        ctx.emit(GameEvent::Strike {
            attacker: state.player.name().to_owned(),
            defender: enemy.name().to_owned(),
            damage: player_strike.damage,
            defender_health: player_strike.defender_health,
        });

        if player_strike.defender_slain() {
            let resolution = slay_first_enemy(state, ctx, room_id);
            return Ok(BattleRound {
                player_strike,
                enemy_strike: None,
                resolution,
            });
        }

        let enemy_strike =
            combat::attack(enemy.combatant(), state.player.combatant_mut(), ctx.rng())?;
        ctx.emit(GameEvent::Strike {
            attacker: enemy.name().to_owned(),
            defender: state.player.name().to_owned(),
            damage: enemy_strike.damage,
            defender_health: enemy_strike.defender_health,
        });

        let resolution = if enemy_strike.defender_slain() {
            RoundResolution::PlayerDown(knock_out(state, ctx))
        } else {
            RoundResolution::Continue
        };

        Ok(BattleRound {
            player_strike,
            enemy_strike: Some(enemy_strike),
            resolution,
        })
    }

    fn post_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        if state.phase.encounter_room().is_some() && !state.player.is_alive() {
            return Err(CombatError::AttackerDown {
                name: state.player.name().to_owned(),
            }
            .into());
        }
        Ok(())
    }
}

/// Removes the dead first enemy of `room`, drops its loot on the floor and
/// ends the encounter. Killing the boss wins the game.
fn slay_first_enemy(
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
    room_id: RoomId,
) -> RoundResolution {
    let Some(room) = state.map.room_mut(room_id) else {
        return RoundResolution::Continue;
    };
    let Some(enemy) = room.remove_enemy(0) else {
        return RoundResolution::Continue;
    };

    let name = enemy.name().to_owned();
    let boss = enemy.is_boss();
    let loot = enemy.into_loot();
    let loot_names: Vec<String> = loot.iter().map(|item| item.name().to_owned()).collect();
    room.inventory_mut().extend(loot);

    info!(room = %room_id, enemy = %name, boss, "enemy slain");
    ctx.emit(GameEvent::EnemySlain {
        room: room_id,
        enemy: name.clone(),
        loot: loot_names,
    });

    state.phase = if boss {
        GamePhase::Victory
    } else {
        GamePhase::Exploring
    };
    if boss {
        info!("boss defeated, game won");
        ctx.emit(GameEvent::GameOver(GamePhase::Victory));
    }

    RoundResolution::EnemySlain { enemy: name, boss }
}

/// Applies the rule for a player at 0 health.
///
/// In the boss room the game ends. Anywhere else the player is dragged back
/// to the previous waypoint and healed by the configured amount.
pub(crate) fn knock_out(state: &mut GameState, ctx: &mut ActionContext<'_>) -> KnockOut {
    if state.player.room() == state.map.boss_room() {
        state.phase = GamePhase::Defeat;
        info!("player died in the boss room, game lost");
        ctx.emit(GameEvent::GameOver(GamePhase::Defeat));
        return KnockOut::Defeated;
    }

    let at = fall_back(state);
    let health = state
        .player
        .combatant_mut()
        .heal(state.config.retreat_heal);
    state.phase = GamePhase::Exploring;

    warn!(room = %at.room, health, "player knocked out");
    ctx.emit(GameEvent::PlayerKnockedOut {
        room: at.room,
        health,
    });
    KnockOut::Revived { at, health }
}

/// Sends the player back to the previous waypoint, or to the centre of the
/// current room when there is none.
///
/// Without a previous waypoint the player stays next to the enemy but the
/// phase returns to `Exploring`. The encounter only starts again once the
/// player leaves the room and comes back.
fn fall_back(state: &mut GameState) -> Waypoint {
    match state.player.previous() {
        Some(previous) => state.player.relocate(previous.room, previous.position),
        None => {
            let centre = state.current_room().centre();
            state.player.set_position(centre);
        }
    }
    state.player.waypoint()
}

/// Leave the current fight for the previous room without loot.
///
/// A player who never left the start room has nowhere to go and is moved to
/// the room centre instead; the enemy stays put and no longer blocks moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetreatAction;

impl ActionTransition for RetreatAction {
    type Error = RetreatError;
    type Result = Waypoint;

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        state
            .phase
            .encounter_room()
            .map(|_| ())
            .ok_or(RetreatError::NoEncounter)
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let at = fall_back(state);
        state.phase = GamePhase::Exploring;

        info!(room = %at.room, position = %at.position, "player retreated");
        ctx.emit(GameEvent::Retreated { room: at.room });
        Ok(at)
    }
}
