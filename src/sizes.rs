//! Bag Sizes

use std::fmt;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use thiserror::Error;

/// Errors related to bag size catalog construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BagSizeError {
    /// A bag size was zero or negative (catalog index, value).
    #[error("Bag size {1} at index {0} must be positive")]
    NonPositive(usize, i64),

    /// A bag size does not fit the supported range (catalog index, value).
    #[error("Bag size {1} at index {0} is too large")]
    TooLarge(usize, i64),

    /// No bag sizes remained after deduplication.
    #[error("At least one bag size is required")]
    Empty,
}

/// Capacity of a single bag, in whole kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BagSize(u32);

impl BagSize {
    /// Create a bag size from a kilogram value.
    ///
    /// Returns `None` for zero.
    pub fn new(kilograms: u32) -> Option<Self> {
        (kilograms > 0).then_some(BagSize(kilograms))
    }

    /// Bag capacity in kilograms.
    pub fn kilograms(self) -> u32 {
        self.0
    }

    /// Half-kilogram units contributed by one piece (half a bag) of this size.
    ///
    /// A half bag of `s` kg weighs `s / 2` kg, which is `s` half-kilogram units.
    pub fn piece_units(self) -> u64 {
        u64::from(self.0)
    }
}

impl fmt::Display for BagSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kg", self.0)
    }
}

/// Normalized bag size catalog: deduplicated, sorted largest first, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagSizes {
    sizes: SmallVec<[BagSize; 8]>,
}

impl BagSizes {
    /// Validate and normalize raw bag sizes.
    ///
    /// Duplicates are dropped and the result is ordered descending.
    ///
    /// # Errors
    ///
    /// - [`BagSizeError::NonPositive`]: a size was zero or negative.
    /// - [`BagSizeError::TooLarge`]: a size exceeded `u32::MAX` kilograms.
    /// - [`BagSizeError::Empty`]: no sizes were given.
    pub fn new(raw: &[i64]) -> Result<Self, BagSizeError> {
        let sizes = raw
            .iter()
            .enumerate()
            .map(|(idx, &value)| {
                if value <= 0 {
                    return Err(BagSizeError::NonPositive(idx, value));
                }

                u32::try_from(value)
                    .map(BagSize)
                    .map_err(|_err| BagSizeError::TooLarge(idx, value))
            })
            .collect::<Result<SmallVec<[BagSize; 8]>, _>>()?;

        Self::from_sizes(sizes)
    }

    /// Build a catalog from already validated sizes, dropping duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`BagSizeError::Empty`] if `sizes` is empty.
    pub fn from_sizes(sizes: impl IntoIterator<Item = BagSize>) -> Result<Self, BagSizeError> {
        let mut seen = FxHashSet::default();

        let mut sizes: SmallVec<[BagSize; 8]> = sizes
            .into_iter()
            .filter(|size| seen.insert(*size))
            .collect();

        if sizes.is_empty() {
            return Err(BagSizeError::Empty);
        }

        sizes.sort_unstable_by(|a, b| b.cmp(a));

        Ok(BagSizes { sizes })
    }

    /// Sizes, largest first.
    pub fn as_slice(&self) -> &[BagSize] {
        &self.sizes
    }

    /// Iterate sizes, largest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = BagSize> + '_ {
        self.sizes.iter().copied()
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Always `false`; a catalog holds at least one size.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Largest available size.
    pub fn largest(&self) -> Option<BagSize> {
        self.sizes.first().copied()
    }

    /// Smallest available size.
    pub fn smallest(&self) -> Option<BagSize> {
        self.sizes.last().copied()
    }
}

impl<'a> IntoIterator for &'a BagSizes {
    type Item = BagSize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, BagSize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sizes.iter().copied()
    }
}
