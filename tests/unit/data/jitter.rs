use super::*;

#[test]
fn splitmix_golden_sequence() {
    let mut rng = JitterRng::from_seed_str("Start");
    assert_eq!(rng.next_u64(), 10_803_437_321_495_624_663);
    assert_eq!(rng.next_u64(), 2_904_412_869_523_187_806);
    assert_eq!(rng.next_u64(), 3_692_019_629_607_123_160);
}

#[test]
fn default_table_golden_rows() {
    let table = JitterTable::generate("Start", 3, 10, 5).unwrap();
    assert_eq!(table.frames(), 3);
    assert_eq!(table.layers_per_frame(), 9);
    assert_eq!(
        table.row(FrameIndex(0)).unwrap(),
        &[29, 7, 8, 12, 11, 9, 11, 8, 1]
    );
    assert_eq!(
        table.row(FrameIndex(1)).unwrap(),
        &[27, 1, 32, 24, 8, 20, 4, 5, 3]
    );
    assert_eq!(
        table.row(FrameIndex(2)).unwrap(),
        &[11, 40, 6, 18, 21, 20, 9, 3, 1]
    );
}

#[test]
fn independent_runs_reproduce_the_table() {
    let a = JitterTable::generate("Start", 150, 10, 5).unwrap();
    let b = JitterTable::generate("Start", 150, 10, 5).unwrap();
    assert_eq!(a, b);

    let other = JitterTable::generate("Stop", 150, 10, 5).unwrap();
    assert_ne!(a, other);
}

#[test]
fn longer_tables_extend_shorter_ones() {
    let short = JitterTable::generate("Start", 4, 10, 5).unwrap();
    let long = JitterTable::generate("Start", 40, 10, 5).unwrap();
    for tau in 0..4 {
        assert_eq!(
            short.row(FrameIndex(tau)).unwrap(),
            long.row(FrameIndex(tau)).unwrap()
        );
    }
}

#[test]
fn draws_stay_below_layer_bound() {
    let table = JitterTable::generate("Start", 150, 10, 5).unwrap();
    for tau in 0..150 {
        for (zeta, &j) in table.row(FrameIndex(tau)).unwrap().iter().enumerate() {
            assert!(j < layer_bound(10, zeta as u32, 5));
        }
    }
}

#[test]
fn layer_bound_matches_reference_formula() {
    for zeta in 0..9 {
        assert_eq!(layer_bound(10, zeta, 5), (10 - zeta) * 5);
    }
    assert_eq!(layer_bound(10, 12, 5), 0);
}

#[test]
fn zero_bound_yields_zero() {
    let mut rng = JitterRng::new(1);
    assert_eq!(rng.next_below(0), 0);
    let table = JitterTable::generate("Start", 2, 10, 0).unwrap();
    assert!(table.row(FrameIndex(1)).unwrap().iter().all(|&j| j == 0));
}

#[test]
fn rows_past_the_end_are_errors() {
    let table = JitterTable::generate("Start", 2, 10, 5).unwrap();
    assert!(table.row(FrameIndex(2)).is_err());
}

#[test]
fn replayed_row_matches_the_table() {
    let table = JitterTable::generate("Start", 12, 10, 5).unwrap();
    for tau in [0u64, 1, 7, 11] {
        let row = JitterTable::replay_row("Start", FrameIndex(tau), 10, 5);
        assert_eq!(row.as_slice(), table.row(FrameIndex(tau)).unwrap());
    }
    assert!(JitterTable::replay_row("Start", FrameIndex(3), 1, 5).is_empty());
}

#[test]
fn oversized_tables_are_validation_errors() {
    let err = JitterTable::generate("Start", u64::MAX / 16, 10, 5).unwrap_err();
    assert!(matches!(err, CrossPlotError::Validation(_)));
    assert!(JitterTable::entries_for(u64::from(u32::MAX), 10).is_err());
    assert_eq!(JitterTable::entries_for(150, 10).unwrap(), 1350);
}
