// Integration tests for the address space model

use fitsim::memory::{AddressSpace, BlockInterval, Gap};
use fitsim::placement::Strategy;
use fitsim::simulator::errors::SimError;

fn space_with(size: u64, blocks: &[(i32, u64)], strategy: Strategy) -> AddressSpace {
    let mut space = AddressSpace::new(size).expect("valid size");
    for &(id, dim) in blocks {
        space
            .allocate(id, dim, strategy)
            .expect("setup allocation should fit");
    }
    space
}

fn assert_disjoint(space: &AddressSpace) {
    let blocks = space.intervals();
    for (i, a) in blocks.iter().enumerate() {
        assert!(a.low <= a.high);
        assert!(a.high < space.size());
        for b in &blocks[i + 1..] {
            assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            assert!(a.high < b.low, "intervals out of address order");
        }
    }
}

#[test]
fn test_zero_size_rejected() {
    assert!(matches!(
        AddressSpace::new(0),
        Err(SimError::InvalidSpaceSize { size: 0 })
    ));
}

#[test]
fn test_empty_space_has_single_gap() {
    let space = AddressSpace::new(10).unwrap();
    assert_eq!(space.free_gaps(), vec![Gap::new(0, 9)]);
    assert_eq!(space.fragmentation(), 0.0);
    assert!(space.list_block_ids().is_empty());
}

#[test]
fn test_queries_distinguish_missing_blocks() {
    let space = space_with(10, &[(7, 1)], Strategy::FirstFit);

    assert!(space.contains_block(7));
    assert!(!space.contains_block(8));
    assert!(!space.contains_block(-1));
    assert_eq!(space.block_dimension(7).unwrap(), 1);
    assert!(matches!(
        space.block_dimension(8),
        Err(SimError::BlockNotFound { block_id: 8 })
    ));
    assert_eq!(
        space.get_interval(7),
        Some(&BlockInterval {
            block_id: 7,
            low: 0,
            high: 0
        })
    );
    assert_eq!(space.get_interval(8), None);
}

#[test]
fn test_block_ids_listed_in_address_order() {
    let mut space = space_with(12, &[(5, 2), (1, 2), (9, 2)], Strategy::FirstFit);
    space.deallocate(5);
    space.allocate(3, 1, Strategy::FirstFit).unwrap();

    assert_eq!(space.list_block_ids(), vec![3, 1, 9]);
    assert_disjoint(&space);
}

#[test]
fn test_free_gaps_include_leading_inner_and_trailing() {
    let mut space = space_with(10, &[(1, 2), (2, 2), (3, 2)], Strategy::FirstFit);
    space.deallocate(1);
    space.deallocate(3);

    assert_eq!(space.free_gaps(), vec![Gap::new(0, 1), Gap::new(4, 9)]);
}

#[test]
fn test_deallocate_merges_adjacent_gaps() {
    let mut space = space_with(9, &[(1, 3), (2, 3), (3, 3)], Strategy::FirstFit);
    space.deallocate(1);
    space.deallocate(3);
    assert_eq!(space.free_gaps().len(), 2);

    let released = space.deallocate(2).expect("block 2 is live");
    assert_eq!(released.len(), 3);
    assert_eq!(space.free_gaps(), vec![Gap::new(0, 8)]);
}

#[test]
fn test_deallocate_missing_is_noop() {
    let mut space = space_with(10, &[(1, 4)], Strategy::FirstFit);
    let before = space.clone();

    assert_eq!(space.deallocate(42), None);
    assert_eq!(space, before);
}

#[test]
fn test_failed_allocation_does_not_mutate() {
    let mut space = space_with(5, &[(1, 4)], Strategy::FirstFit);
    let before = space.clone();

    for strategy in Strategy::ALL {
        assert!(matches!(
            space.allocate(2, 2, strategy),
            Err(SimError::AllocationFailed { block_id: 2, .. })
        ));
    }
    assert_eq!(space, before);
}

#[test]
fn test_zero_dimension_and_duplicate_id_rejected() {
    let mut space = space_with(10, &[(1, 2)], Strategy::FirstFit);

    assert!(matches!(
        space.allocate(2, 0, Strategy::FirstFit),
        Err(SimError::InvalidDimension { block_id: 2, .. })
    ));
    assert!(matches!(
        space.allocate(1, 2, Strategy::FirstFit),
        Err(SimError::DuplicateBlock { block_id: 1 })
    ));
    assert_eq!(space.intervals().len(), 1);
}

#[test]
fn test_neighboring_gaps_touch_block_boundaries() {
    let mut space = space_with(10, &[(1, 2), (2, 2), (3, 2)], Strategy::FirstFit);
    space.deallocate(1);

    let neighbors = space.neighboring_gaps(2).unwrap();
    assert_eq!(neighbors.len(), 1);
    assert!(neighbors.contains(&Gap::new(0, 1)));

    let trailing = space.neighboring_gaps(3).unwrap();
    assert_eq!(trailing.len(), 1);
    assert!(trailing.contains(&Gap::new(6, 9)));

    assert!(matches!(
        space.neighboring_gaps(99),
        Err(SimError::BlockNotFound { block_id: 99 })
    ));
}

#[test]
fn test_gap_signatures_use_structural_equality() {
    let space = AddressSpace::new(4).unwrap();
    let signatures = space.gap_signatures();

    assert_eq!(signatures.len(), 1);
    assert!(signatures.contains(&Gap { low: 0, high: 3 }));
}

#[test]
fn test_compaction_closes_gaps_and_keeps_order() {
    let mut space = space_with(12, &[(1, 2), (2, 3), (3, 1), (4, 2)], Strategy::FirstFit);
    space.deallocate(1);
    space.deallocate(3);

    let moved = space.compact();

    assert_eq!(moved, 2);
    assert_eq!(space.size(), 12);
    assert_eq!(space.list_block_ids(), vec![2, 4]);
    assert_eq!(space.block_dimension(2).unwrap(), 3);
    assert_eq!(space.block_dimension(4).unwrap(), 2);
    assert_eq!(space.free_gaps(), vec![Gap::new(5, 11)]);
    assert_disjoint(&space);
}

#[test]
fn test_compaction_is_idempotent() {
    let mut space = space_with(10, &[(1, 2), (2, 2), (3, 2)], Strategy::FirstFit);
    space.deallocate(2);
    space.compact();
    let compacted = space.clone();

    assert_eq!(space.compact(), 0);
    assert_eq!(space, compacted);
}

#[test]
fn test_fragmentation_values() {
    // Full space
    let full = space_with(6, &[(1, 3), (2, 3)], Strategy::FirstFit);
    assert_eq!(full.free_total(), 0);
    assert_eq!(full.fragmentation(), 0.0);

    // Single contiguous gap
    let single = space_with(6, &[(1, 3)], Strategy::FirstFit);
    assert_eq!(single.fragmentation(), 0.0);

    // Gaps of 2 and 2: 1 - 2/4
    let mut split = space_with(8, &[(1, 2), (2, 2), (3, 2), (4, 2)], Strategy::FirstFit);
    split.deallocate(1);
    split.deallocate(3);
    assert!((split.fragmentation() - 0.5).abs() < 1e-9);
}

#[test]
fn test_fragmentation_stays_in_bounds() {
    let mut space = AddressSpace::new(30).unwrap();
    for id in 0..10 {
        space.allocate(id, 3, Strategy::FirstFit).unwrap();
    }
    for id in (0..10).step_by(2) {
        space.deallocate(id);
        let f = space.fragmentation();
        assert!((0.0..=1.0).contains(&f), "fragmentation {} out of range", f);
    }
}

#[test]
fn test_strategies_place_differently() {
    // Gaps after setup: (0-1) len 2, (5-10) len 6, (13-15) len 3
    let setup = |strategy| {
        let mut space = space_with(16, &[(1, 2), (2, 3), (3, 6), (4, 2)], Strategy::FirstFit);
        space.deallocate(1);
        space.deallocate(3);
        space.allocate(9, 2, strategy).unwrap()
    };

    assert_eq!(setup(Strategy::FirstFit).low, 0);
    assert_eq!(setup(Strategy::BestFit).low, 0);

    let mut space = space_with(16, &[(1, 2), (2, 3), (3, 6), (4, 2)], Strategy::FirstFit);
    space.deallocate(1);
    space.deallocate(3);
    assert_eq!(space.allocate(9, 3, Strategy::BestFit).unwrap().low, 13);
    assert_eq!(setup(Strategy::WorstFit).low, 5);
}
