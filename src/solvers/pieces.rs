//! Piece Vectors

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::sizes::BagSizes;

/// Half-bag piece counts, one per bag size in descending size order.
///
/// An odd entry means that size is used a non-whole number of bags, i.e. one
/// bag of that size is split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PieceVector {
    pieces: SmallVec<[u64; 8]>,
}

impl PieceVector {
    /// Create an all-zero vector with one entry per bag size.
    pub fn zeros(len: usize) -> Self {
        PieceVector {
            pieces: SmallVec::from_elem(0, len),
        }
    }

    /// Create a vector from explicit piece counts.
    pub fn from_pieces(pieces: impl Into<SmallVec<[u64; 8]>>) -> Self {
        PieceVector {
            pieces: pieces.into(),
        }
    }

    /// Piece counts, largest size first.
    pub fn as_slice(&self) -> &[u64] {
        &self.pieces
    }

    /// Number of entries (bag sizes).
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Check if the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Piece count for the size at `idx`.
    pub fn get(&self, idx: usize) -> Option<u64> {
        self.pieces.get(idx).copied()
    }

    /// Sum of all piece counts.
    pub fn total_pieces(&self) -> u64 {
        total_pieces(&self.pieces)
    }

    /// Number of sizes used an odd number of pieces.
    pub fn split_count(&self) -> usize {
        split_count(&self.pieces)
    }

    /// Weighted sum in half-kilogram units for the given sizes.
    ///
    /// Returns `None` if the lengths differ or the sum overflows.
    pub fn units(&self, sizes: &BagSizes) -> Option<u64> {
        if sizes.len() != self.pieces.len() {
            return None;
        }

        self.pieces
            .iter()
            .zip(sizes)
            .try_fold(0u64, |acc, (&pieces, size)| {
                acc.checked_add(pieces.checked_mul(size.piece_units())?)
            })
    }

    /// Compare two vectors by packing preference.
    ///
    /// [`Ordering::Less`] means `self` is preferred over `other`.
    pub fn cmp_preference(&self, other: &Self) -> Ordering {
        compare_pieces(&self.pieces, &other.pieces)
    }

    /// Check if `self` is strictly preferred over `other`.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.cmp_preference(other) == Ordering::Less
    }

    /// Add another vector entry by entry.
    ///
    /// Returns `None` if the lengths differ or a sum overflows; `self` is left
    /// unchanged in that case.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.pieces.len() != other.pieces.len() {
            return None;
        }

        let pieces = self
            .pieces
            .iter()
            .zip(&other.pieces)
            .map(|(a, b)| a.checked_add(*b))
            .collect::<Option<SmallVec<[u64; 8]>>>()?;

        Some(PieceVector { pieces })
    }
}

impl From<&[u64]> for PieceVector {
    fn from(pieces: &[u64]) -> Self {
        PieceVector {
            pieces: SmallVec::from_slice(pieces),
        }
    }
}

pub(crate) fn total_pieces(pieces: &[u64]) -> u64 {
    pieces.iter().sum()
}

pub(crate) fn split_count(pieces: &[u64]) -> usize {
    pieces.iter().filter(|&&count| count % 2 == 1).count()
}

/// Total order over equal-length piece slices.
///
/// Fewer split entries first, then fewer total pieces, then the slice holding
/// the larger count at the first differing position.
pub(crate) fn compare_pieces(a: &[u64], b: &[u64]) -> Ordering {
    split_count(a)
        .cmp(&split_count(b))
        .then_with(|| total_pieces(a).cmp(&total_pieces(b)))
        .then_with(|| b.iter().cmp(a.iter()))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn pv(pieces: &[u64]) -> PieceVector {
        PieceVector::from(pieces)
    }

    #[test]
    fn totals_and_splits() {
        let pieces = pv(&[4, 0, 3, 1]);

        assert_eq!(pieces.total_pieces(), 8);
        assert_eq!(pieces.split_count(), 2);
        assert_eq!(pieces.len(), 4);
        assert_eq!(pieces.get(2), Some(3));
        assert_eq!(pieces.get(4), None);
    }

    #[test]
    fn fewer_splits_wins_over_fewer_pieces() {
        // 6kg from [4, 3, 1]: 3 pieces of 4 is one split, 4 pieces of 3 is none
        let split = pv(&[3, 0, 0]);
        let whole = pv(&[0, 4, 0]);

        assert!(whole.is_better_than(&split));
        assert_eq!(split.cmp_preference(&whole), Ordering::Greater);
    }

    #[test]
    fn fewer_pieces_wins_on_equal_splits() {
        let few = pv(&[2, 0, 1]);
        let many = pv(&[0, 4, 1]);

        assert!(few.is_better_than(&many));
    }

    #[test]
    fn larger_sizes_win_ties() {
        let large = pv(&[2, 0, 2]);
        let middle = pv(&[0, 4, 0]);

        assert!(large.is_better_than(&middle));
        assert!(!middle.is_better_than(&large));
    }

    #[test]
    fn identical_vectors_are_equal() {
        let a = pv(&[1, 2, 3]);

        assert_eq!(a.cmp_preference(&a.clone()), Ordering::Equal);
        assert!(!a.is_better_than(&a));
    }

    #[test]
    fn units_weights_by_half_bag() -> TestResult {
        let sizes = BagSizes::new(&[1, 2, 4])?;

        assert_eq!(pv(&[4, 0, 2]).units(&sizes), Some(18));
        assert_eq!(pv(&[4, 0]).units(&sizes), None);

        Ok(())
    }

    #[test]
    fn checked_add_sums_entries() {
        let sum = pv(&[1, 0, 2]).checked_add(&pv(&[3, 1, 0]));

        assert_eq!(sum, Some(pv(&[4, 1, 2])));
        assert_eq!(pv(&[1]).checked_add(&pv(&[1, 2])), None);
        assert_eq!(pv(&[u64::MAX]).checked_add(&pv(&[1])), None);
    }

    #[test]
    fn zeros_has_no_pieces() {
        let zeros = PieceVector::zeros(3);

        assert_eq!(zeros.as_slice(), &[0, 0, 0]);
        assert_eq!(zeros.total_pieces(), 0);
        assert!(!zeros.is_empty());
    }
}
