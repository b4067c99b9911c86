use broadside::prelude::*;
use broadside::Coordinate;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn skirmish(difficulty: Difficulty, rules: Rules, seed: u64) -> Skirmish {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::with_rules(rules);
    board.auto_place(&mut rng, &STANDARD_FLEET).unwrap();
    let engine = TargetingEngine::new(difficulty, &STANDARD_FLEET, SmallRng::seed_from_u64(seed + 1));
    Skirmish::new(board, engine)
}

fn cells_fired(board: &Board) -> usize {
    Coordinate::all()
        .filter(|&c| board.cell(c).has_been_shot())
        .count()
}

fn mean_shots(difficulty: Difficulty, games: u64) -> f64 {
    let total: usize = (0..games)
        .map(|g| {
            let mut s = skirmish(difficulty, Rules::default(), 1000 + g * 2);
            assert_eq!(s.play_out(500).unwrap(), GameStatus::Won);
            s.shots_fired()
        })
        .sum();
    total as f64 / games as f64
}

#[test]
fn test_every_tier_clears_the_board() {
    for difficulty in Difficulty::ALL {
        let mut s = skirmish(difficulty, Rules::default(), 123);
        assert_eq!(s.play_out(500).unwrap(), GameStatus::Won, "{difficulty}");
        assert!(s.board().all_ships_sunk());
        assert!(s.shots_fired() <= 100);
        assert!(s.turns() <= s.shots_fired());
    }
}

#[test]
fn test_relaxed_rules_game() {
    for difficulty in Difficulty::ALL {
        let mut s = skirmish(difficulty, Rules::relaxed(), 77);
        assert_eq!(s.play_out(500).unwrap(), GameStatus::Won, "{difficulty}");
    }
}

#[test]
fn test_expert_outguns_easy() {
    let easy = mean_shots(Difficulty::Easy, 10);
    let expert = mean_shots(Difficulty::Expert, 10);
    assert!(expert < easy, "expert {expert} vs easy {easy}");
}

#[test]
fn test_turn_continues_while_hitting() {
    let mut s = skirmish(Difficulty::Hard, Rules::default(), 5);
    while s.status() == GameStatus::InProgress {
        let turn = s.take_turn().unwrap();
        assert!(!turn.is_empty());
        let (last, rest) = turn.split_last().unwrap();
        assert!(rest.iter().all(|(_, r)| r.fires_again()));
        if s.status() == GameStatus::InProgress {
            assert!(!last.1.fires_again(), "turn ended on {:?}", last.1);
        }
    }
}

#[test]
fn test_no_turns_after_the_win() {
    let mut s = skirmish(Difficulty::Expert, Rules::default(), 31);
    assert_eq!(s.play_out(500).unwrap(), GameStatus::Won);
    let (turns, shots) = (s.turns(), s.shots_fired());
    assert!(s.take_turn().unwrap().is_empty());
    assert_eq!(s.turns(), turns);
    assert_eq!(s.shots_fired(), shots);
}

#[test]
fn test_single_shot_turns_without_fire_again() {
    let rules = Rules {
        fire_again_on_hit: false,
        ..Rules::default()
    };
    let mut s = skirmish(Difficulty::Normal, rules, 21);
    for _ in 0..20 {
        assert_eq!(s.take_turn().unwrap().len(), 1);
    }
    assert_eq!(s.turns(), 20);
    assert_eq!(s.shots_fired(), 20);
}

#[test]
fn test_empty_board_is_never_won() {
    let engine = TargetingEngine::seeded(Difficulty::Easy, &STANDARD_FLEET, 0);
    let mut s = Skirmish::new(Board::new(), engine);
    assert_eq!(s.status(), GameStatus::InProgress);
    assert_eq!(s.fire().unwrap().1, ShotResult::Miss);
    assert_eq!(s.play_out(50).unwrap(), GameStatus::InProgress);
    assert_eq!(s.shots_fired(), 51);
}

#[test]
fn test_skill_effects_between_turns() {
    let mut s = skirmish(Difficulty::Normal, Rules::default(), 9);
    let target = s.board().intact_segments().next().unwrap();
    let revealed = s.reveal(target);
    assert!(revealed.is_hit());
    assert!(s.engine().fired().contains(target));
    assert_eq!(s.shots_fired(), 0);
    assert_eq!(s.play_out(500).unwrap(), GameStatus::Won);
    assert_eq!(cells_fired(s.board()), s.shots_fired() + 1);
}
