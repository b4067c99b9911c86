use broadside::{BitBoard, CoordSet, Coordinate};

fn c(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col).unwrap()
}

#[test]
fn test_insert_remove() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());

    assert!(bb.insert(c(1, 1)));
    assert!(!bb.insert(c(1, 1)));
    assert!(bb.contains(c(1, 1)));

    assert!(bb.remove(c(1, 1)));
    assert!(!bb.contains(c(1, 1)));
    assert!(!bb.remove(c(1, 1)));

    // Outside a 4x4 board.
    assert!(!bb.insert(c(5, 5)));
    assert!(!bb.contains(c(5, 5)));
}

#[test]
fn test_from_iter_and_iter() {
    let bb: BitBoard<u16, 4> = [c(3, 3), c(0, 1)].into_iter().collect();
    let bits: Vec<_> = bb.iter().collect();
    assert_eq!(bits, vec![c(0, 1), c(3, 3)]);
    assert_eq!(bb.len(), 2);
}

#[test]
fn test_full_board_set_ops() {
    let full = CoordSet::full();
    assert!(full.is_full());
    assert_eq!(full.len(), 100);
    assert!(full.contains(c(9, 9)));

    let diag: CoordSet = (0..10).map(|i| c(i, i)).collect();
    assert_eq!((!diag).len(), 90);
    assert_eq!(diag & full, diag);
    assert_eq!((diag | !diag), full);
    assert!((diag & !diag).is_empty());
}

#[test]
fn test_complement_stays_on_the_board() {
    // 9 cells in a 16-bit word: the spare bits never show up.
    let full = !BitBoard::<u16, 3>::new();
    assert!(full.is_full());
    assert_eq!(full.len(), 9);
    assert_eq!(full.iter().last(), Some(c(2, 2)));
}
