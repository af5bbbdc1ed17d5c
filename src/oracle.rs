//! The quick oracle: cheap syntactic tests that settle a position's status
//! without any search.
//!
//! `quick` bundles three checks: the enders/quiet-enders rule, the
//! single-large-prime rule, and a pluggable table of empirically-known
//! `gcd > 1` P-positions. The third check is a first-class, swappable
//! [`HardTable`] rather than a fixed, hand-maintained dict, so callers can
//! extend it as new results get proven.

use crate::position::Position;
use crate::primality::Primality;
use crate::status::Status;

/// A table of known `gcd > 1` P-positions, keyed by generator set.
/// Implementations may answer from a fixed list, a computed rule, or both.
pub trait HardTable {
    /// Returns `Some(true)` / `Some(false)` if this table has an opinion
    /// on `generators`, `None` if it doesn't recognize the position.
    fn lookup(&self, generators: &[u64]) -> Option<bool>;
}

/// The empirically-known `gcd > 1` P-position families: `{4, 6}`,
/// `{8, 10, 22}`, `{8, 10, 12, 14}`, the parametric family `{8, 12, k, k+4}`
/// for `k ≡ 2 (mod 8)`, `{6, 9}`, `{12, 15, 18}`, `{12, 18, 21}`, and
/// `{8, 12}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct KnownPPositions;

impl HardTable for KnownPPositions {
    fn lookup(&self, generators: &[u64]) -> Option<bool> {
        match generators {
            [4, 6] | [8, 10, 22] | [8, 10, 12, 14] | [6, 9] | [12, 15, 18] | [12, 18, 21] | [8, 12] => Some(true),
            [8, 12, k, last] if k % 8 == 2 && *last == k + 4 => Some(true),
            _ => None,
        }
    }
}

/// A table with no entries. Use this to disable the hard-coded lookup and
/// fall back entirely on recursive search.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyTable;

impl HardTable for EmptyTable {
    fn lookup(&self, _generators: &[u64]) -> Option<bool> {
        None
    }
}

/// Applies the quick oracle to `position`. Returns `Status::Unknown` if
/// none of the cheap tests apply; the solver then falls through to search.
pub fn quick(position: &Position, primality: &impl Primality, table: &impl HardTable) -> Status {
    if position.gcd() == 1 && position.irreducible().is_some() && position.generators() != [2, 3] {
        return Status::N;
    }
    if let [only] = position.generators() {
        if *only > 3 && primality.is_prime(*only) {
            return Status::P;
        }
    }
    if position.gcd() > 1 {
        if let Some(is_p) = table.lookup(position.generators()) {
            return if is_p { Status::P } else { Status::N };
        }
    }
    Status::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primality::TrialDivision;

    #[test]
    fn single_prime_generator_is_p() {
        let pos = Position::construct(&[5], None).unwrap();
        assert_eq!(quick(&pos, &TrialDivision, &KnownPPositions), Status::P);
    }

    #[test]
    fn ender_other_than_two_three_is_n() {
        // Two-generator semigroups are always symmetric, hence irreducible;
        // {4, 5} != {2, 3} so the ender rule settles it as N.
        let pos = Position::construct(&[4, 5], None).unwrap();
        assert_eq!(quick(&pos, &TrialDivision, &KnownPPositions), Status::N);
    }

    #[test]
    fn two_three_is_not_settled_by_ender_rule() {
        let pos = Position::construct(&[2, 3], None).unwrap();
        assert_eq!(quick(&pos, &TrialDivision, &KnownPPositions), Status::Unknown);
    }

    #[test]
    fn known_hard_table_entry_resolves() {
        let pos = Position::construct(&[4, 6], None).unwrap();
        assert_eq!(quick(&pos, &TrialDivision, &KnownPPositions), Status::P);
    }

    #[test]
    fn parametric_family_member_resolves() {
        let pos = Position::construct(&[8, 12, 18, 22], None).unwrap();
        assert_eq!(quick(&pos, &TrialDivision, &KnownPPositions), Status::P);
    }

    #[test]
    fn empty_table_defers_everything() {
        let pos = Position::construct(&[4, 6], None).unwrap();
        assert_eq!(quick(&pos, &TrialDivision, &EmptyTable), Status::Unknown);
    }

    #[test]
    fn large_single_generator_prime_is_p() {
        let pos = Position::construct(&[97], None).unwrap();
        assert_eq!(quick(&pos, &TrialDivision, &KnownPPositions), Status::P);
    }
}
