use broadside::{Coordinate, Orientation, PlacementError, Ship, ShipKind};

fn c(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col).unwrap()
}

fn placed(kind: ShipKind, cells: &[(usize, usize)]) -> Ship {
    let mut ship = Ship::new(kind);
    ship.place(cells.iter().map(|&(r, col)| c(r, col)).collect())
        .unwrap();
    ship
}

#[test]
fn test_unplaced_ship_is_empty() {
    let ship = Ship::new(ShipKind::Cruiser);
    assert!(!ship.is_placed());
    assert!(ship.segments().is_empty());
    assert!(!ship.is_sunk());
    assert_eq!(ship.orientation(), None);
}

#[test]
fn test_place_infers_orientation() -> Result<(), PlacementError> {
    let mut ship = Ship::new(ShipKind::Submarine);
    let orientation = ship.place(vec![c(1, 4), c(2, 4), c(3, 4)])?;
    assert_eq!(orientation, Some(Orientation::Vertical));
    assert_eq!(ship.damage(), &[false, false, false]);

    let mut frigate = Ship::new(ShipKind::Frigate);
    assert_eq!(frigate.place(vec![c(0, 0)])?, None);
    Ok(())
}

#[test]
fn test_register_hit_and_sunk() {
    let mut ship = placed(ShipKind::Destroyer, &[(1, 1), (1, 2)]);
    assert!(!ship.is_sunk());
    assert!(ship.register_hit(c(1, 1)));
    assert!(!ship.register_hit(c(1, 1)), "same segment twice");
    assert_eq!(ship.hits(), 1);
    assert!(ship.register_hit(c(1, 2)));
    assert!(ship.is_sunk());
    // not part of the ship
    assert!(!ship.register_hit(c(0, 0)));
}

#[test]
fn test_repair_rules() {
    let mut ship = placed(ShipKind::Cruiser, &[(4, 4), (4, 5), (4, 6)]);
    assert!(!ship.repair(c(4, 4)), "intact");
    ship.register_hit(c(4, 5));
    assert!(ship.repair(c(4, 5)));
    assert_eq!(ship.hits(), 0);
    assert_eq!(ship.damage(), &[false, false, false]);

    for col in 4..7 {
        ship.register_hit(c(4, col));
    }
    assert!(ship.is_sunk());
    assert!(!ship.repair(c(4, 5)), "sinking is terminal");
    assert_eq!(ship.hits(), 3);
}

#[test]
fn test_unplaced_ship_cannot_be_repaired() {
    let mut ship = Ship::new(ShipKind::Destroyer);
    assert!(!ship.repair(c(0, 0)));
    assert!(!ship.register_hit(c(0, 0)));
}

#[test]
fn test_from_parts_validates() {
    let ship = Ship::from_parts(
        ShipKind::Destroyer,
        vec![c(0, 0), c(0, 1)],
        vec![true, false],
    )
    .unwrap();
    assert_eq!(ship.hits(), 1);

    assert_eq!(
        Ship::from_parts(ShipKind::Destroyer, vec![c(0, 0), c(0, 1)], vec![true]),
        Err(PlacementError::WrongLength {
            expected: 2,
            actual: 1
        })
    );
    assert_eq!(
        Ship::from_parts(ShipKind::Destroyer, vec![c(0, 0), c(1, 1)], vec![false, false]),
        Err(PlacementError::NonCollinear)
    );
}

#[test]
fn test_kind_table() {
    let lengths: Vec<_> = ShipKind::ALL.iter().map(|k| k.length()).collect();
    assert_eq!(lengths, vec![5, 4, 3, 3, 2, 1]);
    assert_eq!(ShipKind::Submarine.to_string(), "Submarine");
    assert_eq!(broadside::ship_kind_by_name("carrier"), Some(ShipKind::Carrier));
    assert_eq!(broadside::ship_kind_by_name("dinghy"), None);
}
