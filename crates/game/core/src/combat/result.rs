//! Combat result types and strike resolution.

use tracing::debug;

use crate::env::RngOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Combatant;

use super::damage::{apply_damage, calculate_damage};

/// A dead combatant was asked to take part in a strike.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("{name} cannot attack while dead")]
    AttackerDown { name: String },

    #[error("{name} is already dead")]
    DefenderDown { name: String },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AttackerDown { .. } => "COMBAT_ATTACKER_DOWN",
            Self::DefenderDown { .. } => "COMBAT_DEFENDER_DOWN",
        }
    }
}

/// Result of one strike.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    /// Raw weapon roll (0 when unarmed).
    pub weapon_roll: u32,

    /// Armor roll subtracted from the weapon roll (0 when unarmored).
    pub protection_roll: u32,

    /// Damage actually dealt.
    pub damage: u32,

    /// Defender health after the strike.
    pub defender_health: u32,
}

impl AttackResult {
    pub fn defender_slain(&self) -> bool {
        self.defender_health == 0
    }
}

/// Resolve one strike of `attacker` against `defender`.
///
/// The weapon is rolled first, then the armor, each only when present.
pub fn attack(
    attacker: &Combatant,
    defender: &mut Combatant,
    rng: &mut (impl RngOracle + ?Sized),
) -> Result<AttackResult, CombatError> {
    if !attacker.is_alive() {
        return Err(CombatError::AttackerDown {
            name: attacker.name().to_owned(),
        });
    }
    if !defender.is_alive() {
        return Err(CombatError::DefenderDown {
            name: defender.name().to_owned(),
        });
    }

    let weapon_roll = attacker
        .weapon()
        .map_or(0, |weapon| weapon.attack_damage(rng));
    let protection_roll = defender
        .armor()
        .map_or(0, |armor| armor.protection_roll(rng));
    let damage = calculate_damage(weapon_roll, protection_roll);

    let defender_health = apply_damage(defender.health(), damage);
    defender.take_damage(damage);

    debug!(
        attacker = attacker.name(),
        defender = defender.name(),
        weapon_roll,
        protection_roll,
        damage,
        defender_health,
        "strike resolved"
    );

    Ok(AttackResult {
        weapon_roll,
        protection_roll,
        damage,
        defender_health,
    })
}
