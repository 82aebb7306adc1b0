// Integration tests for the simulator engine

use fitsim::memory::{BlockInterval, Gap};
use fitsim::placement::Strategy;
use fitsim::simulator::errors::SimError;
use fitsim::simulator::{simulate, Instruction, Outcome, SimState};

fn alloc(id: i32, dim: i64) -> Instruction {
    Instruction::allocate(id, dim).expect("valid dimension")
}

#[test]
fn test_scenario_first_fit_reuses_freed_gap() {
    let mut sim = simulate(
        10,
        Strategy::FirstFit,
        [alloc(1, 3), alloc(2, 3), Instruction::deallocate(1), alloc(3, 2)],
    )
    .unwrap();

    let outcomes = sim.run_all();

    assert_eq!(
        outcomes[0],
        Outcome::Allocated(BlockInterval {
            block_id: 1,
            low: 0,
            high: 2
        })
    );
    assert_eq!(
        outcomes[1],
        Outcome::Allocated(BlockInterval {
            block_id: 2,
            low: 3,
            high: 5
        })
    );
    assert_eq!(
        sim.space().get_interval(3),
        Some(&BlockInterval {
            block_id: 3,
            low: 0,
            high: 1
        })
    );
    assert_eq!(sim.state(), SimState::Drained);
}

#[test]
fn test_scenario_best_fit_bounded_then_complete() {
    let mut sim = simulate(
        10,
        Strategy::BestFit,
        [
            alloc(1, 3),
            alloc(3, 3),
            alloc(2, 3),
            Instruction::deallocate(0),
            Instruction::Compact,
        ],
    )
    .unwrap();

    let first = sim.run(2);
    assert_eq!(first.len(), 2);
    assert_eq!(sim.pending().len(), 3);
    assert_eq!(sim.state(), SimState::Idle);
    assert_eq!(sim.pending().peek(), Some(&alloc(2, 3)));

    let rest = sim.run_all();
    assert_eq!(rest.len(), 3);
    assert_eq!(rest[1], Outcome::DeallocateIgnored { block_id: 0 });
    assert!(sim.pending().is_empty());
    assert_eq!(sim.processed(), 5);

    // Three 3-address blocks fit in 10 addresses; compaction packs them from 0
    let space = sim.space();
    assert_eq!(space.list_block_ids(), vec![1, 3, 2]);
    assert_eq!(space.intervals().first().map(|b| b.low), Some(0));
    assert_eq!(space.intervals().last().map(|b| b.high), Some(8));
    assert_eq!(space.free_gaps(), vec![Gap::new(9, 9)]);
    assert_eq!(space.fragmentation(), 0.0);
}

#[test]
fn test_scenario_worst_fit_fails_on_small_largest_gap() {
    let mut sim = simulate(5, Strategy::WorstFit, [alloc(1, 4), alloc(2, 2)]).unwrap();

    let outcomes = sim.run_all();

    assert!(!outcomes[0].is_failure());
    assert!(outcomes[1].is_failure());
    assert_eq!(
        outcomes[1].to_string(),
        "AllocationInstruction failed: block: 2 dimension: 2"
    );
    assert!(!sim.space().contains_block(2));
    assert_eq!(sim.space().free_gaps(), vec![Gap::new(4, 4)]);
}

#[test]
fn test_worst_fit_equal_largest_gaps_take_lower_address() {
    // Gaps (0-1) and (4-5); worst fit takes the lower of the equal largest
    let mut sim = simulate(
        6,
        Strategy::WorstFit,
        [
            alloc(1, 2),
            alloc(2, 2),
            alloc(3, 2),
            Instruction::deallocate(1),
            Instruction::deallocate(3),
            alloc(4, 3),
            alloc(5, 2),
        ],
    )
    .unwrap();

    let outcomes = sim.run_all();

    assert!(outcomes[5].is_failure());
    assert_eq!(
        outcomes[6],
        Outcome::Allocated(BlockInterval {
            block_id: 5,
            low: 0,
            high: 1
        })
    );
}

#[test]
fn test_every_instruction_consumed_once() {
    let instructions = vec![
        alloc(1, 20),
        Instruction::deallocate(7),
        alloc(2, 2),
        alloc(2, 2),
        Instruction::Compact,
    ];
    let mut sim = simulate(4, Strategy::FirstFit, instructions.clone()).unwrap();

    let mut processed = 0;
    while !sim.pending().is_empty() {
        let before = sim.pending().len();
        processed += sim.run(1).len();
        assert_eq!(sim.pending().len(), before - 1);
    }

    assert_eq!(processed, instructions.len());
    assert_eq!(sim.processed(), instructions.len());
    assert!(sim.run(3).is_empty());
}

#[test]
fn test_failures_do_not_abort_run() {
    let mut sim = simulate(
        3,
        Strategy::BestFit,
        [alloc(1, 5), alloc(2, 1), alloc(2, 1), alloc(3, 2)],
    )
    .unwrap();

    let outcomes = sim.run_all();

    let failures: Vec<bool> = outcomes.iter().map(Outcome::is_failure).collect();
    assert_eq!(failures, vec![true, false, true, false]);
    assert_eq!(sim.space().list_block_ids(), vec![2, 3]);
}

#[test]
fn test_state_transitions() {
    let mut sim = simulate(10, Strategy::FirstFit, [alloc(1, 1), alloc(2, 1)]).unwrap();
    assert_eq!(sim.state(), SimState::Idle);

    sim.run(1);
    assert_eq!(sim.state(), SimState::Idle);

    sim.run(5);
    assert_eq!(sim.state(), SimState::Drained);

    sim.enqueue(Instruction::Compact).unwrap();
    assert_eq!(sim.state(), SimState::Idle);
}

#[test]
fn test_invalid_dimension_rejected_at_enqueue() {
    assert!(matches!(
        Instruction::allocate(1, 0),
        Err(SimError::InvalidDimension {
            block_id: 1,
            dimension: 0
        })
    ));
    assert!(Instruction::allocate(1, -4).is_err());

    let mut sim = simulate(10, Strategy::FirstFit, Vec::new()).unwrap();
    let hand_built = Instruction::Allocate {
        block_id: 1,
        dimension: 0,
    };
    let err = sim.enqueue(hand_built).unwrap_err();
    assert!(err.is_configuration());
    assert!(sim.pending().is_empty());
}

#[test]
fn test_pending_inspection_is_non_destructive() {
    let mut sim = simulate(10, Strategy::FirstFit, [alloc(1, 1), Instruction::Compact]).unwrap();

    let listed: Vec<Instruction> = sim.pending().iter().copied().collect();
    assert_eq!(listed.len(), 2);
    assert_eq!(sim.pending().len(), 2);

    let drained = sim.drain_pending();
    assert_eq!(drained, listed);
    assert!(sim.pending().is_empty());
    assert_eq!(sim.state(), SimState::Drained);
    assert_eq!(sim.processed(), 0);
}

#[test]
fn test_allocation_report_line() {
    let mut sim = simulate(10, Strategy::FirstFit, [alloc(4, 3)]).unwrap();
    let outcomes = sim.run_all();

    assert_eq!(
        outcomes[0].to_string(),
        "AllocationInstruction: Allocated block: 4  dimension: 3 addresses: 0-2"
    );
}

#[test]
fn test_no_overlap_throughout_run() {
    let mut instructions = Vec::new();
    for id in 0..12 {
        instructions.push(alloc(id, (id % 4 + 1) as i64));
        if id % 3 == 2 {
            instructions.push(Instruction::deallocate(id - 1));
        }
        if id % 5 == 4 {
            instructions.push(Instruction::Compact);
        }
    }

    for strategy in Strategy::ALL {
        let mut sim = simulate(20, strategy, instructions.clone()).unwrap();
        while sim.step().is_some() {
            let blocks = sim.space().intervals();
            for pair in blocks.windows(2) {
                assert!(pair[0].high < pair[1].low, "{}: overlap", strategy);
            }
            assert!(sim.space().used() <= sim.space().size());
        }
    }
}
