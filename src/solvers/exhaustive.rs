//! Exhaustive Solver

use std::cmp::Ordering;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    orders::Order,
    sizes::{BagSize, BagSizes},
    solvers::{
        Solver, SolverError,
        observer::{NoopObserver, SearchObserver},
        pieces::{PieceVector, compare_pieces},
    },
};

/// Solver that enumerates every exact combination of bag sizes.
///
/// Each size, largest first, takes every piece count from the most that fits
/// the remainder down to zero, and the remainder is handed to the next size.
/// A leaf with no sizes left is a solution only if nothing remains.
///
/// The best solution is tracked against a running incumbent using
/// [`PieceVector::cmp_preference`]: fewest split bags, then fewest pieces, then
/// the most pieces of the larger sizes.
///
/// # Complexity
///
/// The number of leaves is the product of `floor(units / size) + 1` over the
/// sizes, so the search is exponential in the number of distinct sizes. No
/// branch is pruned or memoized; every exact combination is compared.
#[derive(Debug)]
pub struct ExhaustiveSolver;

impl ExhaustiveSolver {
    /// Solve with an observer receiving search events.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Unfulfillable`] if no exact combination exists.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bagcount::{
    ///     orders::Order,
    ///     sizes::BagSizes,
    ///     solvers::{ExhaustiveSolver, SearchStats},
    /// };
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let sizes = BagSizes::new(&[1, 2, 4])?;
    /// let order = Order::from_kilograms(9.0)?;
    ///
    /// let mut stats = SearchStats::default();
    /// let pieces = ExhaustiveSolver::solve_with_observer(&order, &sizes, &mut stats)?;
    ///
    /// assert_eq!(pieces.as_slice(), &[4, 0, 2]);
    /// assert!(stats.candidates > 0);
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    pub fn solve_with_observer(
        order: &Order,
        sizes: &BagSizes,
        observer: &mut dyn SearchObserver,
    ) -> Result<PieceVector, SolverError> {
        let mut search = Search {
            sizes: sizes.as_slice(),
            working: SmallVec::from_elem(0, sizes.len()),
            best: None,
            observer,
        };

        search.explore(0, order.units());

        let best = search.best.ok_or(SolverError::Unfulfillable {
            kilograms: order.kilograms(),
        })?;

        debug!(
            order = %order,
            pieces = ?best.as_slice(),
            splits = best.split_count(),
            total_pieces = best.total_pieces(),
            "solved order"
        );

        Ok(best)
    }
}

impl Solver for ExhaustiveSolver {
    fn solve(order: &Order, sizes: &BagSizes) -> Result<PieceVector, SolverError> {
        Self::solve_with_observer(order, sizes, &mut NoopObserver)
    }
}

struct Search<'a> {
    sizes: &'a [BagSize],
    working: SmallVec<[u64; 8]>,
    best: Option<PieceVector>,
    observer: &'a mut dyn SearchObserver,
}

impl Search<'_> {
    fn explore(&mut self, idx: usize, remaining: u64) {
        let Some(size) = self.sizes.get(idx) else {
            if remaining == 0 {
                self.consider();
            } else {
                self.observer.on_dead_end(remaining);
            }

            return;
        };

        let piece_units = size.piece_units();
        let max_pieces = remaining / piece_units;

        for pieces in (0..=max_pieces).rev() {
            if let Some(slot) = self.working.get_mut(idx) {
                *slot = pieces;
            }

            self.explore(idx + 1, remaining - pieces * piece_units);
        }

        if let Some(slot) = self.working.get_mut(idx) {
            *slot = 0;
        }
    }

    fn consider(&mut self) {
        self.observer.on_candidate(&self.working);

        let improves = self
            .best
            .as_ref()
            .is_none_or(|best| compare_pieces(&self.working, best.as_slice()) == Ordering::Less);

        if improves {
            trace!(pieces = ?self.working.as_slice(), "new best combination");

            self.observer.on_improvement(&self.working);
            self.best = Some(PieceVector::from(self.working.as_slice()));
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::solvers::observer::SearchStats;

    use super::*;

    fn solve(order_kg: f64, sizes: &[i64]) -> Result<PieceVector, Box<dyn std::error::Error>> {
        let sizes = BagSizes::new(sizes)?;
        let order = Order::from_kilograms(order_kg)?;

        Ok(ExhaustiveSolver::solve(&order, &sizes)?)
    }

    #[test]
    fn whole_bags_when_possible() -> TestResult {
        assert_eq!(solve(9.0, &[1, 2, 4])?.as_slice(), &[4, 0, 2]);

        Ok(())
    }

    #[test]
    fn half_bag_of_smallest_size() -> TestResult {
        assert_eq!(solve(4.5, &[1, 2, 4])?.as_slice(), &[2, 0, 1]);

        Ok(())
    }

    #[test]
    fn avoids_splits_before_minimising_bags() -> TestResult {
        assert_eq!(solve(6.0, &[1, 3, 4])?.as_slice(), &[0, 4, 0]);

        Ok(())
    }

    #[test]
    fn ties_prefer_larger_sizes() -> TestResult {
        assert_eq!(solve(4.0, &[1, 2, 3])?.as_slice(), &[2, 0, 2]);

        Ok(())
    }

    #[test]
    fn single_size() -> TestResult {
        assert_eq!(solve(12.5, &[5])?.as_slice(), &[5]);

        Ok(())
    }

    #[test]
    fn half_kilogram_order_uses_one_kilogram_half_bag() -> TestResult {
        assert_eq!(solve(0.5, &[1, 2])?.as_slice(), &[0, 1]);

        Ok(())
    }

    #[test]
    fn unfulfillable_with_even_sizes() -> TestResult {
        let sizes = BagSizes::new(&[2, 4])?;
        let order = Order::from_kilograms(4.5)?;

        assert_eq!(
            ExhaustiveSolver::solve(&order, &sizes),
            Err(SolverError::Unfulfillable { kilograms: 4.5 })
        );

        Ok(())
    }

    #[test]
    fn unfulfillable_when_order_smaller_than_half_bag() -> TestResult {
        let sizes = BagSizes::new(&[5])?;
        let order = Order::from_kilograms(2.0)?;

        assert!(matches!(
            ExhaustiveSolver::solve(&order, &sizes),
            Err(SolverError::Unfulfillable { .. })
        ));

        Ok(())
    }

    #[test]
    fn observer_sees_every_leaf() -> TestResult {
        let sizes = BagSizes::new(&[1, 2])?;
        let order = Order::from_kilograms(2.0)?;
        let mut stats = SearchStats::default();

        let best = ExhaustiveSolver::solve_with_observer(&order, &sizes, &mut stats)?;

        // 4 units: [2,0], [1,2] and [0,4] are exact, every smaller 1kg count is not
        assert_eq!(best.as_slice(), &[2, 0]);
        assert_eq!(stats.candidates, 3);
        assert_eq!(stats.dead_ends, 6);
        assert_eq!(stats.improvements, 1);

        Ok(())
    }

    #[test]
    fn observer_counts_dead_ends() -> TestResult {
        let sizes = BagSizes::new(&[3, 2])?;
        let order = Order::from_kilograms(2.5)?;
        let mut stats = SearchStats::default();

        // 5 units: only [1,1] is exact
        let best = ExhaustiveSolver::solve_with_observer(&order, &sizes, &mut stats)?;

        assert_eq!(best.as_slice(), &[1, 1]);
        assert_eq!(stats.candidates, 1);
        assert_eq!(stats.dead_ends, 4);

        Ok(())
    }

    #[test]
    fn result_is_exact() -> TestResult {
        let sizes = BagSizes::new(&[7, 5, 3])?;
        let order = Order::from_kilograms(23.5)?;

        let best = ExhaustiveSolver::solve(&order, &sizes)?;

        assert_eq!(best.units(&sizes), Some(order.units()));

        Ok(())
    }
}
