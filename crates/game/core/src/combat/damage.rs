//! Damage calculation and application.

/// Calculate damage from a strike.
///
/// # Formula
///
/// ```text
/// final_damage = max(weapon_roll - protection_roll, 0)
/// ```
///
/// An unarmed attacker rolls 0; an unarmored defender rolls 0.
pub fn calculate_damage(weapon_roll: u32, protection_roll: u32) -> u32 {
    weapon_roll.saturating_sub(protection_roll)
}

/// Apply damage to current HP.
///
/// # Returns
///
/// New HP value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armor_never_heals() {
        assert_eq!(calculate_damage(5, 8), 0);
        assert_eq!(calculate_damage(10, 0), 10);
        assert_eq!(calculate_damage(12, 4), 8);
    }

    #[test]
    fn hp_clamps_at_zero() {
        assert_eq!(apply_damage(100, 100), 0);
        assert_eq!(apply_damage(3, 40), 0);
        assert_eq!(apply_damage(30, 7), 23);
    }
}
