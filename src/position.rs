//! Positions of Sylver Coinage, represented as a dense bit array over a
//! numerical semigroup.
//!
//! A `Position` is immutable to callers: `add` returns a fresh value.
//! Equality is by `generators` alone: the chosen array length `L` is an
//! implementation detail, not part of a position's identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bitset::BitArray;
use crate::error::SylverError;

/// Classification of an irreducible (gcd-reduced) numerical semigroup.
/// Serializes to a single-character token: `"s"` or `"p"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Irreducible {
    #[serde(rename = "s")]
    Symmetric,
    #[serde(rename = "p")]
    Pseudosymmetric,
}

/// The derived-record view of a position, with no bit-array included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionRecord {
    pub generators: Vec<u64>,
    pub gcd: u64,
    pub multiplicity: u64,
    pub genus: usize,
    pub frobenius: u64,
    pub irreducible: Option<Irreducible>,
}

#[derive(Clone)]
pub struct Position {
    seeds: Vec<u64>,
    bits: BitArray,
    gcd: u64,
    generators: Vec<u64>,
    frobenius: u64,
    multiplicity: u64,
    genus: usize,
    irreducible: Option<Irreducible>,
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("generators", &self.generators)
            .field("gcd", &self.gcd)
            .field("frobenius", &self.frobenius)
            .field("irreducible", &self.irreducible)
            .field("length", &self.bits.len())
            .finish()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_identity())
    }
}

/// Two positions are equal iff their generator sets match.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.generators == other.generators
    }
}
impl Eq for Position {}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn gcd_many(values: &[u64]) -> u64 {
    values.iter().copied().fold(0, gcd)
}

/// The classical two-generator upper bound on the Frobenius number, plus
/// enough slack to guarantee the tail of `bits` ends up saturated. This is
/// both the length `construct` picks when none is supplied and the
/// "suggested minimum length" a `LengthError` carries: a caller acting on
/// the bare Frobenius bound alone would often hit the same error again.
fn default_length(sorted_values: &[u64], gcd_value: u64) -> usize {
    let gcd_value = gcd_value.max(1);
    let min_value = sorted_values[0];
    if sorted_values.len() < 2 {
        return (min_value + gcd_value) as usize;
    }
    let g_max = sorted_values[sorted_values.len() - 1];
    let g_2nd = sorted_values[sorted_values.len() - 2];
    let a = g_max / gcd_value - 1;
    let b = g_2nd / gcd_value - 1;
    let product = a.saturating_mul(b);
    let bound = product.saturating_sub(1);
    (gcd_value.saturating_mul(bound) + min_value + gcd_value) as usize
}

fn ceil_to_multiple(value: u64, modulus: u64) -> u64 {
    if modulus <= 1 {
        return value;
    }
    value.div_ceil(modulus) * modulus
}

/// Applies the propagation half of `add`: every index reachable as
/// `a + k*n` for some member `a` and `k >= 0` becomes a member. This is
/// the O(L) residue-class formulation, the efficient equivalent of the
/// naive O(L^2/n) approach that walks every set bit one step at a time.
fn propagate(old: &BitArray, n: usize) -> BitArray {
    let len = old.len();
    let mut new_bits = old.clone();
    let residues = n.min(len);
    for r in 0..residues {
        let mut i = r;
        let mut first_set = None;
        while i < len {
            if old.get(i) {
                first_set = Some(i);
                break;
            }
            i += n;
        }
        if let Some(start) = first_set {
            new_bits.set_progression(start, n);
        }
    }
    new_bits
}

/// Applies the generator-minimization half of `add`. `old_generators`
/// must be sorted ascending and not already contain `n`.
fn minimize_generators(new_bits: &BitArray, old_generators: &[u64], n: u64) -> Vec<u64> {
    let len = new_bits.len();
    let mut next = Vec::with_capacity(old_generators.len() + 1);
    for &g in old_generators {
        if g < n {
            next.push(g);
            continue;
        }
        let offset = (g - n) as usize;
        let g_usize = g as usize;
        let window = len.saturating_sub(g_usize);
        if new_bits.exists_set_with_clear_at_offset(offset, window) {
            next.push(g);
        }
    }
    next.push(n);
    next.sort_unstable();
    next
}

/// Classifies the reduced semigroup as symmetric, pseudosymmetric, or
/// neither, with `[1]` treated as pseudosymmetric by convention (its
/// reduced Frobenius is 0, which would otherwise be an ambiguous case).
fn classify_irreducible(reduced: &BitArray, frobenius_index: u64, generators: &[u64]) -> Option<Irreducible> {
    if generators == [1] {
        return Some(Irreducible::Pseudosymmetric);
    }
    if frobenius_index == 0 {
        return Some(Irreducible::Symmetric);
    }
    let f = frobenius_index;
    let symmetric = (1..f).all(|i| reduced.get(i as usize) != reduced.get((f - i) as usize));
    if symmetric {
        return Some(Irreducible::Symmetric);
    }
    if f % 2 != 0 {
        return None;
    }
    let mid = f / 2;
    if reduced.get(mid as usize) {
        return None;
    }
    let pseudosymmetric = (1..f)
        .filter(|&i| i != mid)
        .all(|i| reduced.get(i as usize) != reduced.get((f - i) as usize));
    if pseudosymmetric {
        Some(Irreducible::Pseudosymmetric)
    } else {
        None
    }
}

/// Derives the scalar fields (`frobenius`, `irreducible`, `multiplicity`,
/// `genus`) from `bits` and `generators`.
fn derive_fields(bits: &BitArray, generators: &[u64], gcd_value: u64) -> (u64, Option<Irreducible>, u64, usize) {
    let reduced = bits.reduced(gcd_value.max(1) as usize);
    let frobenius_index = reduced.last_clear().unwrap_or(0) as u64;
    let frobenius = if reduced.last_clear().is_some() {
        frobenius_index * gcd_value.max(1)
    } else {
        0
    };
    let irreducible = classify_irreducible(&reduced, frobenius_index, generators);
    let multiplicity = *generators.iter().min().expect("generators non-empty");
    let genus = reduced.count_clear();
    (frobenius, irreducible, multiplicity, genus)
}

/// Checks that the final `multiplicity/gcd` bits of the reduced array are
/// all set, i.e. the array is long enough that nothing past the tail could
/// still be a gap.
fn length_sufficient(bits: &BitArray, generators: &[u64], gcd_value: u64) -> bool {
    let reduced = bits.reduced(gcd_value.max(1) as usize);
    let multiplicity = *generators.iter().min().expect("generators non-empty");
    let tail = (multiplicity / gcd_value.max(1)).max(1) as usize;
    let reduced_len = reduced.len();
    if tail >= reduced_len {
        return !reduced.any_clear();
    }
    (reduced_len - tail..reduced_len).all(|i| reduced.get(i))
}

impl Position {
    /// Validates, deduplicates and sorts `seeds`, then builds the
    /// semigroup they generate.
    pub fn construct(seeds: &[u64], length: Option<usize>) -> Result<Position, SylverError> {
        if seeds.is_empty() {
            return Err(SylverError::InvalidSeeds {
                seeds: seeds.to_vec(),
                reason: "seeds must be non-empty".to_string(),
            });
        }
        if seeds.iter().any(|&s| s < 1) {
            return Err(SylverError::InvalidSeeds {
                seeds: seeds.to_vec(),
                reason: "all seeds must be >= 1".to_string(),
            });
        }
        let mut sorted = seeds.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let gcd_value = gcd_many(&sorted);
        let len = length.unwrap_or_else(|| default_length(&sorted, gcd_value));

        let mut bits = BitArray::new(len);
        bits.set(0);
        let mut generators: Vec<u64> = Vec::new();
        for &seed in &sorted {
            if (seed as usize) >= len {
                return Err(SylverError::LengthError {
                    length: len,
                    suggested_length: default_length(&sorted, gcd_value),
                });
            }
            if bits.get(seed as usize) {
                continue;
            }
            let new_bits = propagate(&bits, seed as usize);
            generators = minimize_generators(&new_bits, &generators, seed);
            bits = new_bits;
        }

        let final_gcd = gcd_many(&generators);
        if !length_sufficient(&bits, &generators, final_gcd) {
            return Err(SylverError::LengthError {
                length: len,
                suggested_length: default_length(&generators, final_gcd),
            });
        }

        let (frobenius, irreducible, multiplicity, genus) = derive_fields(&bits, &generators, final_gcd);
        Ok(Position {
            seeds: sorted,
            bits,
            gcd: final_gcd,
            generators,
            frobenius,
            multiplicity,
            genus,
            irreducible,
        })
    }

    /// Plays `n`, returning the resulting position. A no-op (returns an
    /// equivalent position) if `n` is already a member.
    pub fn add(&self, n: u64) -> Result<Position, SylverError> {
        if n < 1 {
            return Err(SylverError::InvalidSeeds {
                seeds: vec![n],
                reason: "move must be a positive integer".to_string(),
            });
        }
        if (n as usize) >= self.bits.len() {
            let mut projected = self.generators.clone();
            projected.push(n);
            projected.sort_unstable();
            return Err(SylverError::LengthError {
                length: self.bits.len(),
                suggested_length: default_length(&projected, gcd(self.gcd, n)),
            });
        }
        if self.bits.get(n as usize) {
            return Ok(self.clone());
        }

        let new_bits = propagate(&self.bits, n as usize);
        let new_generators = minimize_generators(&new_bits, &self.generators, n);
        let new_gcd = gcd_many(&new_generators);

        if !length_sufficient(&new_bits, &new_generators, new_gcd) {
            return Err(SylverError::LengthError {
                length: new_bits.len(),
                suggested_length: default_length(&new_generators, new_gcd),
            });
        }

        let (frobenius, irreducible, multiplicity, genus) = derive_fields(&new_bits, &new_generators, new_gcd);
        Ok(Position {
            seeds: self.seeds.clone(),
            bits: new_bits,
            gcd: new_gcd,
            generators: new_generators,
            frobenius,
            multiplicity,
            genus,
            irreducible,
        })
    }

    /// Clear-bit indices of `bits`, i.e. the legal moves from this
    /// position. Each call produces a fresh, restartable sequence.
    pub fn gaps(&self, reverse: bool) -> Vec<u64> {
        let raw = if reverse {
            self.bits.gaps_descending()
        } else {
            self.bits.gaps_ascending()
        };
        raw.into_iter().map(|i| i as u64).collect()
    }

    /// Shrinks `L` to `frobenius + min(generators) + gcd`, rounded up to a
    /// multiple of `modulus`.
    pub fn reduce_length(&self, modulus: u64) -> Position {
        let target = ceil_to_multiple(self.frobenius + self.multiplicity + self.gcd, modulus.max(1));
        let mut bits = self.bits.clone();
        let new_len = (target as usize).min(bits.len());
        bits.truncate(new_len);
        let (frobenius, irreducible, multiplicity, genus) = derive_fields(&bits, &self.generators, self.gcd);
        Position {
            seeds: self.seeds.clone(),
            bits,
            gcd: self.gcd,
            generators: self.generators.clone(),
            frobenius,
            multiplicity,
            genus,
            irreducible,
        }
    }

    /// Apéry set of this semigroup with respect to `n`: entry `i` is the
    /// least member congruent to `i` mod `n`.
    pub fn apery_set(&self, n: u64) -> Vec<u64> {
        let n = n.max(1) as usize;
        let mut out = vec![0u64; n];
        for (residue, slot) in out.iter_mut().enumerate() {
            let mut i = residue;
            while i < self.bits.len() {
                if self.bits.get(i) {
                    *slot = i as u64;
                    break;
                }
                i += n;
            }
        }
        out
    }

    /// Canonical identity string used as the status store key.
    pub fn to_identity(&self) -> String {
        let body = self
            .generators
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{body}}}")
    }

    /// Reconstructs a position from a canonical identity string produced
    /// by [`Position::to_identity`].
    pub fn from_identity(identity: &str) -> Result<Position, SylverError> {
        let trimmed = identity.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| SylverError::InvalidSeeds {
                seeds: vec![],
                reason: format!("not a canonical identity string: {identity:?}"),
            })?;
        let mut seeds = Vec::new();
        for part in inner.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let value: u64 = part.parse().map_err(|_| SylverError::InvalidSeeds {
                seeds: vec![],
                reason: format!("not an integer: {part:?}"),
            })?;
            seeds.push(value);
        }
        Position::construct(&seeds, None)
    }

    /// Derived view with no bit-array included.
    pub fn to_record(&self) -> PositionRecord {
        PositionRecord {
            generators: self.generators.clone(),
            gcd: self.gcd,
            multiplicity: self.multiplicity,
            genus: self.genus,
            frobenius: self.frobenius,
            irreducible: self.irreducible,
        }
    }

    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }

    pub fn generators(&self) -> &[u64] {
        &self.generators
    }

    pub fn gcd(&self) -> u64 {
        self.gcd
    }

    pub fn frobenius(&self) -> u64 {
        self.frobenius
    }

    pub fn multiplicity(&self) -> u64 {
        self.multiplicity
    }

    pub fn genus(&self) -> usize {
        self.genus
    }

    pub fn irreducible(&self) -> Option<Irreducible> {
        self.irreducible
    }

    pub fn length(&self) -> usize {
        self.bits.len()
    }

    pub fn is_member(&self, n: u64) -> bool {
        (n as usize) < self.bits.len() && self.bits.get(n as usize)
    }
}
