use castle_core::CardinalDirection::{East, North, West};
use castle_core::{
    ActionResult, Armor, Combatant, Enemy, Entrance, ExecuteError, GameConfig, GameEngine,
    GameEvent, GamePhase, GameState, GridPos, Item, KnockOut, LocalPos, Map, MoveOutcome, Potion,
    Room, RoomId, RoundResolution, ScriptedRng, Waypoint, Weapon,
};

const GATE: RoomId = RoomId(0);
const CRYPT: RoomId = RoomId(1);
const THRONE: RoomId = RoomId(2);

/// Gate (start) <-> Crypt, Throne (boss) east of Crypt but sealed.
fn castle() -> GameState {
    let map = Map::new(
        vec![vec![
            Some(Room::new("Gate", 5).unwrap().with_entrance(East, Entrance::Open)),
            Some(Room::new("Crypt", 5).unwrap().with_entrance(West, Entrance::Open)),
            Some(Room::new("Throne", 5).unwrap()),
        ]],
        GridPos::new(0, 0),
        GridPos::new(0, 2),
    )
    .unwrap();
    let hero = Combatant::new("Van Helsing", 100).with_weapon(Weapon::fixed("Stick", 10));
    GameState::new(GameConfig::new().with_room_size(5), map, hero)
}

fn walk_into_crypt(state: &mut GameState, rng: &mut ScriptedRng) -> MoveOutcome {
    let mut engine = GameEngine::new(state);
    engine.move_player(rng, East).unwrap();
    engine.move_player(rng, East).unwrap().result
}

#[test]
fn forced_retreat_when_the_player_drops_outside_the_boss_room() {
    let mut state = castle();
    let ghoul = Combatant::new("Ghoul", 200).with_weapon(Weapon::fixed("Great Axe", 100));
    state.map.room_mut(CRYPT).unwrap().add_enemy(Enemy::new(ghoul));
    let mut rng = ScriptedRng::default();

    let entered = walk_into_crypt(&mut state, &mut rng);
    assert_eq!(
        entered,
        MoveOutcome::Entered {
            room: CRYPT,
            position: LocalPos::new(2, 0),
            encounter: true
        }
    );
    assert_eq!(state.phase, GamePhase::Encounter { room: CRYPT });

    let round = GameEngine::new(&mut state).attack(&mut rng).unwrap();

    let back = Waypoint::new(GATE, LocalPos::new(2, 3));
    assert_eq!(
        round.result.resolution,
        RoundResolution::PlayerDown(KnockOut::Revived { at: back, health: 10 })
    );
    assert_eq!(state.player.waypoint(), back);
    assert_eq!(state.player.health(), 10);
    assert_eq!(state.phase, GamePhase::Exploring);
    // the ghoul stays behind, wounded
    assert_eq!(state.map[CRYPT].enemies()[0].combatant().health(), 190);
    assert!(round.events.contains(&GameEvent::PlayerKnockedOut {
        room: GATE,
        health: 10
    }));
}

#[test]
fn one_hit_kill_drops_all_loot_on_the_floor() {
    let mut state = castle();
    let bat = Combatant::new("Bat", 5)
        .with_weapon(Weapon::fixed("Fangs", 3))
        .with_armor(Armor::new("Leathery Wings", 0));
    let mut bat = Enemy::new(bat);
    bat.combatant_mut()
        .inventory_mut()
        .add(Potion::new("Blood Vial", 20).into());
    state.map.room_mut(CRYPT).unwrap().add_enemy(bat);
    let mut rng = ScriptedRng::default();

    walk_into_crypt(&mut state, &mut rng);
    let round = GameEngine::new(&mut state).attack(&mut rng).unwrap().result;

    assert_eq!(round.player_strike.damage, 10);
    assert_eq!(round.enemy_strike, None);
    assert!(!state.map[CRYPT].has_enemies());
    assert_eq!(state.phase, GamePhase::Exploring);
    let floor: Vec<&str> = state.map[CRYPT]
        .inventory()
        .iter()
        .map(Item::name)
        .collect();
    assert_eq!(floor, ["Fangs", "Leathery Wings", "Blood Vial"]);
    assert_eq!(state.player.health(), 100);
}

#[test]
fn moving_through_the_unlocked_slot_enters_the_boss_room() {
    let mut state = castle();
    let before = state.map.unbound_slots();
    assert_eq!(before.len(), 6);

    // slot 5 is the crypt's east wall, right next to the throne room
    let mut rng = ScriptedRng::new([5]);
    let unlock = GameEngine::new(&mut state)
        .unlock_boss_room(&mut rng)
        .unwrap()
        .result;
    assert_eq!((unlock.room, unlock.direction), (CRYPT, East));
    let after = state.map.unbound_slots();
    assert_eq!(after.len(), before.len() - 1);
    assert!(!after.contains(&(CRYPT, East)));

    walk_into_crypt(&mut state, &mut rng);
    let mut engine = GameEngine::new(&mut state);
    let mut last = None;
    for _ in 0..4 {
        last = Some(engine.move_player(&mut rng, East).unwrap().result);
    }
    assert_eq!(
        last,
        Some(MoveOutcome::Entered {
            room: THRONE,
            position: LocalPos::new(2, 2),
            encounter: false
        })
    );
    assert_eq!(state.player.room(), THRONE);
}

#[test]
fn an_open_door_next_to_the_throne_stays_sealed_until_the_key_turns() {
    let map = Map::new(
        vec![vec![
            Some(Room::new("Gate", 5).unwrap().with_entrance(East, Entrance::Open)),
            Some(
                Room::new("Crypt", 5)
                    .unwrap()
                    .with_entrance(West, Entrance::Open)
                    .with_entrance(East, Entrance::Open),
            ),
            Some(Room::new("Throne", 5).unwrap()),
        ]],
        GridPos::new(0, 0),
        GridPos::new(0, 2),
    )
    .unwrap();
    let hero = Combatant::new("Van Helsing", 100).with_weapon(Weapon::fixed("Stick", 10));
    let mut state = GameState::new(GameConfig::new().with_room_size(5), map, hero);
    let mut rng = ScriptedRng::default();

    let mut engine = GameEngine::new(&mut state);
    for _ in 0..8 {
        let outcome = engine.move_player(&mut rng, East).unwrap().result;
        assert!(!matches!(outcome, MoveOutcome::Entered { room: THRONE, .. }));
    }
    assert_eq!(state.player.room(), CRYPT);
    assert!(!state.map.is_boss_unlocked());
    assert!(state.map.unbound_slots().contains(&(CRYPT, East)));
}

#[test]
fn slaying_the_boss_wins_and_freezes_the_game() {
    let mut state = castle();
    let count = Enemy::new(Combatant::new("Count Dracula", 5)).as_boss();
    state.map.room_mut(THRONE).unwrap().add_enemy(count);
    state
        .map
        .room_mut(CRYPT)
        .unwrap()
        .add_entrance(East, Entrance::Bound(THRONE));
    let mut rng = ScriptedRng::default();

    walk_into_crypt(&mut state, &mut rng);
    {
        let mut engine = GameEngine::new(&mut state);
        for _ in 0..4 {
            engine.move_player(&mut rng, East).unwrap();
        }
    }
    assert_eq!(state.phase, GamePhase::Encounter { room: THRONE });

    let outcome = GameEngine::new(&mut state).attack(&mut rng).unwrap();
    assert_eq!(
        outcome.result.resolution,
        RoundResolution::EnemySlain {
            enemy: "Count Dracula".into(),
            boss: true
        }
    );
    assert_eq!(outcome.events.last(), Some(&GameEvent::GameOver(GamePhase::Victory)));
    assert!(state.is_over());

    let turn = state.turn;
    let err = GameEngine::new(&mut state)
        .move_player(&mut rng, West)
        .unwrap_err();
    assert_eq!(
        err,
        ExecuteError::GameOver {
            phase: GamePhase::Victory
        }
    );
    assert_eq!(state.turn, turn);
}

#[test]
fn dying_to_the_boss_loses_the_game() {
    let mut state = castle();
    let count = Combatant::new("Count Dracula", 500).with_weapon(Weapon::fixed("Claws", 150));
    state
        .map
        .room_mut(THRONE)
        .unwrap()
        .add_enemy(Enemy::new(count).as_boss());
    state
        .map
        .room_mut(GATE)
        .unwrap()
        .add_shortcut(LocalPos::new(1, 2), THRONE)
        .unwrap();
    let mut rng = ScriptedRng::default();

    let entered = GameEngine::new(&mut state)
        .move_player(&mut rng, North)
        .unwrap()
        .result;
    assert!(matches!(
        entered,
        MoveOutcome::Entered {
            room: THRONE,
            encounter: true,
            ..
        }
    ));

    let outcome = GameEngine::new(&mut state)
        .execute(&mut rng, &castle_core::Action::attack())
        .unwrap();
    let ActionResult::Attack(round) = outcome.result else {
        panic!("expected an attack round");
    };
    assert_eq!(round.resolution, RoundResolution::PlayerDown(KnockOut::Defeated));
    assert_eq!(state.phase, GamePhase::Defeat);
    assert_eq!(state.player.room(), THRONE);
}

#[test]
fn walls_hold_no_matter_how_often_they_are_hit() {
    let mut state = castle();
    let mut rng = ScriptedRng::default();
    let mut engine = GameEngine::new(&mut state);

    engine.move_player(&mut rng, West).unwrap();
    for _ in 0..10 {
        let outcome = engine.move_player(&mut rng, West).unwrap();
        assert!(matches!(outcome.result, MoveOutcome::Blocked(_)));
        assert!(outcome.events.is_empty());
    }
    assert_eq!(state.player.position(), LocalPos::new(2, 1));
    assert_eq!(state.player.room(), GATE);
    assert_eq!(state.turn, 11);
}
