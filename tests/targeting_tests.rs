use std::collections::HashSet;

use broadside::{
    Coordinate, Difficulty, Mode, Orientation, ShipKind, ShotResult, TargetingEngine,
    TargetingError, TargetingTuning, STANDARD_FLEET,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn c(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col).unwrap()
}

fn engine(difficulty: Difficulty, seed: u64) -> TargetingEngine {
    TargetingEngine::seeded(difficulty, &STANDARD_FLEET, seed)
}

#[test]
fn test_easy_covers_the_board_then_stops() {
    let mut e = engine(Difficulty::Easy, 9);
    let mut seen = HashSet::new();
    for _ in 0..100 {
        let shot = e.next_shot().unwrap();
        assert!(seen.insert(shot), "repeated {shot}");
        e.process_result(shot, ShotResult::Miss);
    }
    assert_eq!(seen.len(), 100);
    assert!(e.fired().is_full());
    assert_eq!(e.next_shot(), Err(TargetingError::NoLegalMove));
}

#[test]
fn test_easy_ignores_hits() {
    let mut e = engine(Difficulty::Easy, 3);
    e.process_result(c(5, 5), ShotResult::Hit);
    assert_eq!(e.mode(), Mode::Search);
    assert!(e.pending().is_empty());
    assert_eq!(e.last_hit(), None);
}

#[test]
fn test_follow_up_after_first_hit() {
    for difficulty in [Difficulty::Normal, Difficulty::Hard, Difficulty::Expert] {
        for seed in 0..20 {
            let mut e = engine(difficulty, seed);
            let first = e.next_shot().unwrap();
            e.process_result(first, ShotResult::Hit);
            assert_eq!(e.mode(), Mode::Hunt);
            assert_eq!(e.last_hit(), Some(first));
            let next = e.next_shot().unwrap();
            assert!(
                next.is_adjacent(first),
                "{difficulty}: {next} does not touch {first}"
            );
        }
    }
}

#[test]
fn test_normal_queue_is_fifo() {
    let mut e = engine(Difficulty::Normal, 1);
    e.process_result(c(5, 5), ShotResult::Hit);
    assert_eq!(e.pending(), vec![c(4, 5), c(6, 5), c(5, 4), c(5, 6)]);

    assert_eq!(e.next_shot().unwrap(), c(4, 5));
    e.process_result(c(4, 5), ShotResult::Miss);
    assert_eq!(e.next_shot().unwrap(), c(6, 5));
    e.process_result(c(6, 5), ShotResult::Hit);
    // The new hit's neighbours go to the back of the line.
    assert_eq!(e.pending(), vec![c(5, 4), c(5, 6), c(7, 5), c(6, 4), c(6, 6)]);
    assert_eq!(e.locked_axis(), None);
}

#[test]
fn test_hard_locks_onto_the_axis() {
    let mut e = engine(Difficulty::Hard, 1);
    e.process_result(c(5, 5), ShotResult::Hit);
    for miss in [c(4, 5), c(6, 5)] {
        assert_eq!(e.next_shot().unwrap(), miss);
        e.process_result(miss, ShotResult::Miss);
    }
    assert_eq!(e.next_shot().unwrap(), c(5, 4));
    e.process_result(c(5, 4), ShotResult::Hit);

    assert_eq!(e.locked_axis(), Some(Orientation::Horizontal));
    assert_eq!(e.pending(), vec![c(5, 3), c(5, 6)]);
    assert_eq!(e.next_shot().unwrap(), c(5, 3));
}

#[test]
fn test_locked_hunt_flips_when_line_is_blocked() {
    let mut e = engine(Difficulty::Hard, 2);
    e.process_result(c(0, 0), ShotResult::Hit);
    e.process_result(c(0, 1), ShotResult::Hit);
    assert_eq!(e.locked_axis(), Some(Orientation::Horizontal));
    assert_eq!(e.pending(), vec![c(0, 2)]);

    let shot = e.next_shot().unwrap();
    assert_eq!(shot, c(0, 2));
    e.process_result(shot, ShotResult::Miss);
    assert_eq!(e.locked_axis(), Some(Orientation::Vertical));
    assert_eq!(e.pending(), vec![c(1, 0), c(1, 1)]);
}

#[test]
fn test_sunk_returns_to_search() {
    for difficulty in Difficulty::ALL {
        let mut e = engine(difficulty, 5);
        e.process_result(c(3, 3), ShotResult::Hit);
        e.process_result(c(3, 4), ShotResult::Sunk(ShipKind::Destroyer));
        assert_eq!(e.mode(), Mode::Search, "{difficulty}");
        assert!(e.pending().is_empty());
        assert_eq!(e.last_hit(), None);
        assert_eq!(e.locked_axis(), None);
        assert!(!e.remaining_fleet().contains(&ShipKind::Destroyer));
        assert_eq!(e.remaining_fleet().len(), STANDARD_FLEET.len() - 1);
    }
}

#[test]
fn test_hard_searches_interior_first() {
    let mut e = engine(Difficulty::Hard, 11);
    for _ in 0..36 {
        let shot = e.next_shot().unwrap();
        assert!((2..8).contains(&shot.row()) && (2..8).contains(&shot.col()), "{shot}");
        e.process_result(shot, ShotResult::Miss);
    }
    // interior exhausted
    let shot = e.next_shot().unwrap();
    assert!(!((2..8).contains(&shot.row()) && (2..8).contains(&shot.col())));
}

#[test]
fn test_normal_parity_bias_shows() {
    let mut parity = 0;
    for seed in 0..200 {
        let mut e = engine(Difficulty::Normal, seed);
        let shot = e.next_shot().unwrap();
        if (shot.row() + shot.col()) % 2 == 0 {
            parity += 1;
        }
    }
    // 0.3 + 0.7 * 0.5 = 0.65 expected share of even cells
    assert!(parity > 110, "only {parity} of 200 opening shots on parity");
}

#[test]
fn test_normal_tolerates_unusable_parity_bias() {
    for parity_bias in [f64::NAN, f64::INFINITY, -2.0, 7.5] {
        let tuning = TargetingTuning {
            parity_bias,
            ..TargetingTuning::default()
        };
        let mut e = TargetingEngine::with_tuning(
            Difficulty::Normal,
            &STANDARD_FLEET,
            tuning,
            SmallRng::seed_from_u64(12),
        );
        for _ in 0..100 {
            let shot = e.next_shot().unwrap();
            e.process_result(shot, ShotResult::Miss);
        }
        assert!(e.fired().is_full());
    }
}

#[test]
fn test_expert_fires_at_peak_density() {
    let mut e = engine(Difficulty::Expert, 4);
    for _ in 0..30 {
        let map = e.density().unwrap();
        let best = map.best_cells(e.fired());
        let shot = e.next_shot().unwrap();
        if e.mode() == Mode::Search {
            assert!(best.contains(&shot), "{shot} not among {best:?}");
        }
        e.process_result(shot, ShotResult::Miss);
    }
}

#[test]
fn test_expert_density_is_zero_on_fired_cells() {
    let mut e = engine(Difficulty::Expert, 8);
    for i in 0..40 {
        let shot = e.next_shot().unwrap();
        let result = if i % 7 == 3 { ShotResult::Hit } else { ShotResult::Miss };
        e.process_result(shot, result);
        let map = e.density().unwrap();
        for fired in e.fired().iter() {
            assert_eq!(map.get(fired), 0, "fired {fired} kept density");
        }
    }
}

#[test]
fn test_expert_opening_favours_the_centre() {
    let e = engine(Difficulty::Expert, 0);
    let map = e.density().unwrap();
    assert!(map.get(c(4, 4)) > map.get(c(0, 0)));
    assert!(map.get(c(5, 5)) > map.get(c(9, 0)));
}

#[test]
fn test_expert_damps_around_sunk_ship() {
    let mut e = engine(Difficulty::Expert, 6);
    let before = e.density().unwrap().get(c(2, 4));
    e.process_result(c(0, 4), ShotResult::Hit);
    e.process_result(c(0, 5), ShotResult::Sunk(ShipKind::Destroyer));

    let map = e.density().unwrap();
    assert!(map.damped().contains(c(2, 4)));
    assert!(!map.damped().contains(c(5, 5)));
    assert!(map.get(c(2, 4)) < before);
    assert_eq!(e.mode(), Mode::Search);
}

#[test]
fn test_invalid_result_is_ignored() {
    let mut e = engine(Difficulty::Hard, 0);
    let before = e.state();
    e.process_result(c(1, 1), ShotResult::Invalid);
    assert_eq!(e.state(), before);
}

#[test]
fn test_external_result_marks_fired() {
    let mut e = engine(Difficulty::Normal, 0);
    e.process_result(c(7, 7), ShotResult::Miss);
    assert!(e.fired().contains(c(7, 7)));
    for _ in 0..99 {
        assert_ne!(e.next_shot().unwrap(), c(7, 7));
    }
}
