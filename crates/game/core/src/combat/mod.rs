//! Combat resolution system.
//!
//! This module provides the functions that resolve a single strike between
//! two combatants. Randomness comes only from the injected [`RngOracle`].
//!
//! # Core Functions
//!
//! - `attack`: Complete strike resolution (weapon roll, armor roll, damage)
//! - `calculate_damage`: Weapon roll mitigated by armor roll
//! - `apply_damage`: HP reduction (clamped to 0)
//!
//! [`RngOracle`]: crate::env::RngOracle

pub mod damage;
pub mod result;

pub use damage::{apply_damage, calculate_damage};
pub use result::{AttackResult, CombatError, attack};
