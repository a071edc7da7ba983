use std::collections::HashSet;

use castle_core::{
    Armor, Combatant, Inventory, Item, PcgRng, Potion, UseHandler, Weapon, attack,
    calculate_damage,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn weapon_rolls_stay_in_bounds(seed: u64, min in 0u32..50, spread in 0u32..50) {
        let weapon = Weapon::new("Blade", min, min + spread).unwrap();
        let mut rng = PcgRng::new(seed);
        for _ in 0..64 {
            let roll = weapon.attack_damage(&mut rng);
            prop_assert!((min..=min + spread).contains(&roll));
        }
    }

    #[test]
    fn armor_rolls_stay_in_bounds(seed: u64, protection in 0u32..100) {
        let armor = Armor::new("Mail", protection);
        let mut rng = PcgRng::new(seed);
        for _ in 0..64 {
            prop_assert!(armor.protection_roll(&mut rng) <= protection);
        }
    }

    #[test]
    fn mitigated_damage_never_exceeds_the_roll(weapon_roll: u32, protection_roll: u32) {
        let damage = calculate_damage(weapon_roll, protection_roll);
        prop_assert!(damage <= weapon_roll);
        if protection_roll >= weapon_roll {
            prop_assert_eq!(damage, 0);
        }
    }

    #[test]
    fn a_strike_never_raises_health(seed: u64, health in 1u32..200, max in 0u32..60, protection in 0u32..60) {
        let attacker = Combatant::new("Hero", 10).with_weapon(Weapon::new("Blade", 0, max).unwrap());
        let mut defender = Combatant::new("Ghoul", health).with_armor(Armor::new("Hide", protection));
        let result = attack(&attacker, &mut defender, &mut PcgRng::new(seed)).unwrap();
        prop_assert!(defender.health() <= health);
        prop_assert_eq!(defender.health(), health.saturating_sub(result.damage));
    }
}

#[test]
fn both_weapon_bounds_are_observed() {
    let weapon = Weapon::new("Stick", 10, 20).unwrap();
    let mut rng = PcgRng::new(0xC0FFEE);
    let seen: HashSet<u32> = (0..2_000).map(|_| weapon.attack_damage(&mut rng)).collect();
    assert!(seen.contains(&10));
    assert!(seen.contains(&20));
    assert!(seen.iter().all(|roll| (10..=20).contains(roll)));
}

#[test]
fn fixed_stick_against_zero_shield_hits_for_exactly_ten() {
    let hero = Combatant::new("Hero", 100).with_weapon(Weapon::new("Stick", 10, 10).unwrap());
    let mut ghoul = Combatant::new("Ghoul", 50).with_armor(Armor::new("Shield", 0));
    let mut rng = PcgRng::new(3);
    for _ in 0..4 {
        assert_eq!(attack(&hero, &mut ghoul, &mut rng).unwrap().damage, 10);
    }
    assert_eq!(ghoul.health(), 10);
}

#[test]
fn use_current_invokes_the_callback_once() {
    let mut pack = Inventory::with_handler(UseHandler::Activate);
    let tonic: Item = Potion::new("Tonic", 5).into();
    pack.add(tonic.clone());

    let mut calls = 0;
    let used = pack
        .use_current(0, |item| {
            calls += 1;
            item
        })
        .unwrap();
    assert_eq!(calls, 1);
    assert_eq!(used, tonic);
    assert!(!pack.contains(&tonic));
}
