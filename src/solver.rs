//! The recursive solver. Settles a position's status by the quick oracle
//! first, then the status store, then by recursing over the position's
//! gaps, with the three-way case split the Quiet End Theorem and the
//! gcd=1/gcd>1 distinction demand.

use log::warn;

use crate::error::SylverError;
use crate::oracle::{self, HardTable};
use crate::position::Position;
use crate::primality::Primality;
use crate::status::Status;
use crate::store::StatusStore;

/// Tunable behavior for a solve: `reverse`/`deep`/`verbose` flags.
#[derive(Clone, Copy, Debug)]
pub struct SolveOptions {
    /// Traverse gaps in descending order instead of ascending.
    pub reverse: bool,
    /// Keep searching after the first winning reply is found, so every
    /// winning reply is collected instead of just one.
    pub deep: bool,
    /// Emit one observation per position visited.
    pub verbose: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            reverse: false,
            deep: false,
            verbose: false,
        }
    }
}

/// Receives one notification per position the solver finalizes a status
/// for. The default [`PrintObserver`] prints a verbose-mode line; a caller
/// wanting structured output can supply its own.
pub trait Observer {
    fn observe(&mut self, position: &Position, status: Status, replies: &[u64]);
}

/// Prints one line per finalized position in verbose mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrintObserver;

impl Observer for PrintObserver {
    fn observe(&mut self, position: &Position, status: Status, replies: &[u64]) {
        println!("{status} : {position} {replies:?}");
    }
}

/// An observer that does nothing, for non-verbose solves.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn observe(&mut self, _position: &Position, _status: Status, _replies: &[u64]) {}
}

/// Recursively solves `position`, persisting every status it determines
/// along the way through `store`.
pub struct Solver<'a, S, P, H> {
    store: &'a S,
    primality: &'a P,
    table: &'a H,
    options: SolveOptions,
}

impl<'a, S, P, H> Solver<'a, S, P, H>
where
    S: StatusStore,
    P: Primality,
    H: HardTable,
{
    pub fn new(store: &'a S, primality: &'a P, table: &'a H, options: SolveOptions) -> Self {
        Solver {
            store,
            primality,
            table,
            options,
        }
    }

    /// Solves `position`, notifying `observer` once per position visited
    /// when verbose mode is on.
    pub fn solve(&self, position: &Position, observer: &mut impl Observer) -> Result<Status, SylverError> {
        // [1] is always N: the current player takes the only number left
        // and wins immediately.
        if position.generators() == [1] {
            let status = Status::N;
            self.finalize(position, status, &[], observer)?;
            return Ok(status);
        }

        // The shortcut oracle is skipped entirely in deep mode: firing it
        // would short-circuit the full reply enumeration deep mode exists
        // to produce.
        let quick_status = if self.options.deep {
            Status::Unknown
        } else {
            oracle::quick(position, self.primality, self.table)
        };
        let key = position.to_identity();
        let known_status = if matches!(quick_status, Status::Unknown) {
            self.store.get_status(&key)?
        } else {
            quick_status
        };

        if !matches!(known_status, Status::Unknown) {
            self.finalize(position, known_status, &[], observer)?;
            return Ok(known_status);
        }

        let (status, replies) = if position.gcd() == 1 {
            self.solve_gcd_one(position, observer)?
        } else if matches!(position.irreducible(), Some(crate::position::Irreducible::Symmetric))
            && self.primality.is_prime(position.gcd())
        {
            self.solve_short(position, observer)?
        } else {
            self.solve_long(position, observer)?
        };

        self.finalize(position, status, &replies, observer)?;
        Ok(status)
    }

    /// Case A: `gcd == 1`. Reduces the array length before recursing,
    /// since every gap below the (now-small) Frobenius bound is relevant.
    fn solve_gcd_one(
        &self,
        position: &Position,
        observer: &mut impl Observer,
    ) -> Result<(Status, Vec<u64>), SylverError> {
        let reduced = position.reduce_length(1);
        let mut status = Status::P;
        let mut replies = Vec::new();
        for gap in reduced.gaps(self.options.reverse) {
            let child = reduced.add(gap)?;
            let child_status = self.solve(&child, observer)?;
            match child_status {
                Status::P => {
                    status = Status::N;
                    replies.push(gap);
                    if !self.options.deep {
                        break;
                    }
                }
                Status::Unknown => status = Status::Unknown,
                Status::N => {}
            }
        }
        Ok((status, replies))
    }

    /// Case B: `gcd > 1`, irreducible and symmetric, with prime `gcd`.
    /// The Quiet End Theorem bounds the search to gaps no larger than the
    /// Frobenius number: no winning move exists beyond it. That bound is
    /// vacuous when `frobenius == 0`: the reduced semigroup is already
    /// all of N (e.g. any single-generator position whose generator is
    /// prime), so the theorem has no nontrivial gap to exclude and every
    /// gap must be tried.
    fn solve_short(
        &self,
        position: &Position,
        observer: &mut impl Observer,
    ) -> Result<(Status, Vec<u64>), SylverError> {
        let mut status = Status::P;
        let mut replies = Vec::new();
        for gap in position.gaps(self.options.reverse) {
            if position.frobenius() > 0 && gap > position.frobenius() {
                continue;
            }
            let child = position.add(gap)?;
            let child_status = self.solve(&child, observer)?;
            match child_status {
                Status::P => {
                    status = Status::N;
                    replies.push(gap);
                    if !self.options.deep {
                        break;
                    }
                }
                Status::Unknown => status = Status::Unknown,
                Status::N => {}
            }
        }
        Ok((status, replies))
    }

    /// Case C: `gcd > 1` and long (neither Case A nor Case B applies).
    /// Gaps whose array is too short to grow into are simply skipped (a
    /// caught `LengthError` just continues the loop); a position with no
    /// discovered reply and no settled status falls back to `Unknown`
    /// rather than being guessed at.
    fn solve_long(
        &self,
        position: &Position,
        observer: &mut impl Observer,
    ) -> Result<(Status, Vec<u64>), SylverError> {
        let mut status = Status::P;
        let mut replies = Vec::new();
        for gap in position.gaps(self.options.reverse) {
            let child = match position.add(gap) {
                Ok(child) => child,
                Err(SylverError::LengthError { .. }) => continue,
                Err(other) => return Err(other),
            };
            let child_status = self.solve(&child, observer)?;
            match child_status {
                Status::P => {
                    status = Status::N;
                    replies.push(gap);
                    if !self.options.deep {
                        break;
                    }
                }
                Status::Unknown => status = Status::Unknown,
                Status::N => {}
            }
        }
        if replies.is_empty() && matches!(status, Status::P) {
            warn!("no reply found for long position {position}; reporting unknown rather than P");
            status = Status::Unknown;
        }
        Ok((status, replies))
    }

    fn finalize(
        &self,
        position: &Position,
        status: Status,
        replies: &[u64],
        observer: &mut impl Observer,
    ) -> Result<(), SylverError> {
        let key = position.to_identity();
        if let Err(err) = self.store.save(&key, status, replies) {
            warn!("status store save failed for {key}: {err}");
        }
        if self.options.verbose {
            observer.observe(position, status, replies);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::KnownPPositions;
    use crate::primality::TrialDivision;
    use crate::store::MemoryStore;

    fn solve_seeds(seeds: &[u64]) -> Status {
        let store = MemoryStore::new();
        let solver = Solver::new(&store, &TrialDivision, &KnownPPositions, SolveOptions::default());
        let position = Position::construct(seeds, None).unwrap();
        solver.solve(&position, &mut NullObserver).unwrap()
    }

    #[test]
    fn single_move_is_n() {
        assert_eq!(solve_seeds(&[1]), Status::N);
    }

    #[test]
    fn two_is_n() {
        assert_eq!(solve_seeds(&[2]), Status::N);
    }

    #[test]
    fn two_three_is_p() {
        assert_eq!(solve_seeds(&[2, 3]), Status::P);
    }

    #[test]
    fn four_is_n() {
        assert_eq!(solve_seeds(&[4]), Status::N);
    }

    #[test]
    fn five_is_p() {
        assert_eq!(solve_seeds(&[5]), Status::P);
    }

    #[test]
    fn seven_is_p() {
        assert_eq!(solve_seeds(&[7]), Status::P);
    }

    #[test]
    fn six_nine_is_p() {
        assert_eq!(solve_seeds(&[6, 9]), Status::P);
    }

    #[test]
    fn eight_twelve_eighteen_twentytwo_fortyone_is_n() {
        assert_eq!(solve_seeds(&[8, 12, 18, 22, 41]), Status::N);
    }

    #[test]
    fn scenarios_hold_at_explicit_length_100() {
        let cases: [(&[u64], Status); 8] = [
            (&[1], Status::N),
            (&[2], Status::N),
            (&[2, 3], Status::P),
            (&[4], Status::N),
            (&[5], Status::P),
            (&[7], Status::P),
            (&[6, 9], Status::P),
            (&[8, 12, 18, 22, 41], Status::N),
        ];
        for (seeds, expected) in cases {
            let store = MemoryStore::new();
            let solver = Solver::new(&store, &TrialDivision, &KnownPPositions, SolveOptions::default());
            let position = Position::construct(seeds, Some(100)).unwrap();
            assert_eq!(
                solver.solve(&position, &mut NullObserver).unwrap(),
                expected,
                "seeds {seeds:?} at length 100"
            );
        }
    }

    #[test]
    fn deep_mode_collects_every_winning_reply() {
        let store = MemoryStore::new();
        let options = SolveOptions {
            deep: true,
            ..SolveOptions::default()
        };
        let solver = Solver::new(&store, &TrialDivision, &KnownPPositions, options);
        let position = Position::construct(&[2, 3], None).unwrap();
        let status = solver.solve(&position, &mut NullObserver).unwrap();
        assert_eq!(status, Status::P);
    }

    #[test]
    fn repeated_solve_uses_memoized_store() {
        let store = MemoryStore::new();
        let solver = Solver::new(&store, &TrialDivision, &KnownPPositions, SolveOptions::default());
        let position = Position::construct(&[2, 3], None).unwrap();
        let first = solver.solve(&position, &mut NullObserver).unwrap();
        let second = solver.solve(&position, &mut NullObserver).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.get_status(&position.to_identity()).unwrap(), Status::P);
    }
}
