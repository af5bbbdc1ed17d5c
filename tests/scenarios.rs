//! Concrete seed-vector scenarios, run both at the auto-chosen bit-array
//! length and at an explicit length of 100.

use sylver::oracle::KnownPPositions;
use sylver::position::Position;
use sylver::primality::TrialDivision;
use sylver::solver::{NullObserver, SolveOptions, Solver};
use sylver::status::Status;
use sylver::store::MemoryStore;

const SCENARIOS: &[(&[u64], Status)] = &[
    (&[1], Status::N),
    (&[2], Status::N),
    (&[2, 3], Status::P),
    (&[4], Status::N),
    (&[5], Status::P),
    (&[7], Status::P),
    (&[6, 9], Status::P),
    (&[8, 12, 18, 22, 41], Status::N),
];

fn solve(seeds: &[u64], length: Option<usize>) -> Status {
    let store = MemoryStore::new();
    let solver = Solver::new(&store, &TrialDivision, &KnownPPositions, SolveOptions::default());
    let position = Position::construct(seeds, length).unwrap();
    solver.solve(&position, &mut NullObserver).unwrap()
}

#[test]
fn scenarios_at_auto_length() {
    for (seeds, expected) in SCENARIOS {
        assert_eq!(solve(seeds, None), *expected, "seeds {seeds:?} at auto length");
    }
}

#[test]
fn scenarios_at_explicit_length_100() {
    for (seeds, expected) in SCENARIOS {
        assert_eq!(solve(seeds, Some(100)), *expected, "seeds {seeds:?} at length 100");
    }
}
