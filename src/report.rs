//! Bag Report

use std::io;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;
use tracing::debug;

use crate::{
    orders::{Order, OrderError},
    sizes::{BagSize, BagSizeError, BagSizes},
    solvers::{ExhaustiveSolver, PieceVector, SearchObserver, SearchStats, Solver, SolverError},
};

/// Errors that can occur while building a bag report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The bag size catalog was invalid.
    #[error(transparent)]
    BagSizes(#[from] BagSizeError),

    /// An order quantity was invalid.
    #[error("Invalid order at index {index}: {source}")]
    InvalidOrder {
        /// Position of the order in the input
        index: usize,

        /// Why the order was rejected
        #[source]
        source: OrderError,
    },

    /// An order could not be packed with the available sizes.
    #[error("Order at index {index}: {source}")]
    Unfulfillable {
        /// Position of the order in the input
        index: usize,

        /// Solver failure for that order
        #[source]
        source: SolverError,
    },

    /// Accumulated piece counts no longer fit in a `u64`.
    #[error("Accumulated piece counts overflowed")]
    Overflow,

    /// Error writing the rendered report.
    #[error("Failed to write report: {0}")]
    Io(#[from] io::Error),
}

impl ReportError {
    /// Whether the error was caused by malformed input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::BagSizes(_) | Self::InvalidOrder { .. })
    }

    /// Whether the error was caused by an order with no exact packing.
    pub fn is_unfulfillable(&self) -> bool {
        matches!(self, Self::Unfulfillable { .. })
    }
}

/// Total usage of one bag size across a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagCount {
    size: BagSize,
    pieces: u64,
}

impl BagCount {
    /// Create a count from a size and a number of half-bag pieces.
    pub fn new(size: BagSize, pieces: u64) -> Self {
        BagCount { size, pieces }
    }

    /// Bag size.
    pub fn size(&self) -> BagSize {
        self.size
    }

    /// Number of half-bag pieces.
    pub fn pieces(&self) -> u64 {
        self.pieces
    }

    /// Exact number of bags, in steps of 0.5.
    pub fn quantity(&self) -> Decimal {
        Decimal::from(self.pieces) / Decimal::TWO
    }

    /// Number of bags as a float.
    pub fn bags(&self) -> f64 {
        self.quantity().to_f64().unwrap_or(f64::NAN)
    }

    /// Whether the count ends in half a bag.
    pub fn has_half_bag(&self) -> bool {
        self.pieces % 2 == 1
    }
}

/// The packing chosen for a single order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderAllocation {
    order: Order,
    pieces: PieceVector,
}

impl OrderAllocation {
    /// The packed order.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Half-bag pieces per size, largest first.
    pub fn pieces(&self) -> &PieceVector {
        &self.pieces
    }
}

/// Bag usage for a set of orders, one entry per available size.
#[derive(Debug, Clone)]
pub struct BagReport {
    sizes: BagSizes,
    totals: PieceVector,
    allocations: Vec<OrderAllocation>,
    stats: SearchStats,
}

impl BagReport {
    /// Validate raw inputs and build a report with the [`ExhaustiveSolver`].
    ///
    /// Bag sizes are checked before any order is solved. Orders are checked
    /// and solved one at a time; the first failure aborts the whole report.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if the sizes or an order are invalid, or an
    /// order cannot be packed exactly.
    pub fn compute(orders: &[f64], bag_sizes: &[i64]) -> Result<Self, ReportError> {
        let sizes = BagSizes::new(bag_sizes)?;

        let orders = orders.iter().enumerate().map(|(index, &kilograms)| {
            Order::from_kilograms(kilograms)
                .map_err(|source| ReportError::InvalidOrder { index, source })
        });

        Self::build(orders, sizes, |order, sizes, stats| {
            ExhaustiveSolver::solve_with_observer(order, sizes, stats)
        })
    }

    /// Build a report from validated orders using solver `S`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if an order cannot be packed exactly.
    pub fn from_orders<S: Solver>(
        orders: impl IntoIterator<Item = Order>,
        sizes: BagSizes,
    ) -> Result<Self, ReportError> {
        Self::build(orders.into_iter().map(Ok), sizes, |order, sizes, _stats| {
            S::solve(order, sizes)
        })
    }

    fn build(
        orders: impl IntoIterator<Item = Result<Order, ReportError>>,
        sizes: BagSizes,
        mut solve: impl FnMut(
            &Order,
            &BagSizes,
            &mut dyn SearchObserver,
        ) -> Result<PieceVector, SolverError>,
    ) -> Result<Self, ReportError> {
        let mut totals = PieceVector::zeros(sizes.len());
        let mut allocations = Vec::new();
        let mut stats = SearchStats::default();

        for (index, order) in orders.into_iter().enumerate() {
            let order = order?;

            let pieces = solve(&order, &sizes, &mut stats)
                .map_err(|source| ReportError::Unfulfillable { index, source })?;

            totals = totals.checked_add(&pieces).ok_or(ReportError::Overflow)?;

            allocations.push(OrderAllocation { order, pieces });
        }

        debug!(
            orders = allocations.len(),
            sizes = sizes.len(),
            candidates = stats.candidates,
            leaves = stats.leaves(),
            "computed bag report"
        );

        Ok(BagReport {
            sizes,
            totals,
            allocations,
            stats,
        })
    }

    /// Per-size bag counts, largest size first, unused sizes included.
    pub fn counts(&self) -> SmallVec<[BagCount; 8]> {
        self.sizes
            .iter()
            .zip(self.totals.as_slice())
            .map(|(size, &pieces)| BagCount::new(size, pieces))
            .collect()
    }

    /// Per-size bag counts as a `Vec`.
    pub fn into_counts(self) -> Vec<BagCount> {
        self.counts().into_vec()
    }

    /// The normalized bag size catalog.
    pub fn sizes(&self) -> &BagSizes {
        &self.sizes
    }

    /// Accumulated half-bag pieces per size, largest first.
    pub fn totals(&self) -> &PieceVector {
        &self.totals
    }

    /// Packing chosen for each order, in input order.
    pub fn allocations(&self) -> &[OrderAllocation] {
        &self.allocations
    }

    /// Search statistics summed over all orders.
    ///
    /// Only populated by [`BagReport::compute`].
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Total ordered weight in kilograms.
    pub fn total_kilograms(&self) -> Decimal {
        self.allocations
            .iter()
            .map(|allocation| allocation.order.exact_kilograms())
            .sum()
    }

    /// Total number of bags across all sizes.
    pub fn total_bags(&self) -> Decimal {
        Decimal::from(self.totals.total_pieces()) / Decimal::TWO
    }

    /// Number of half bags cut across all orders.
    pub fn split_bags(&self) -> usize {
        self.allocations
            .iter()
            .map(|allocation| allocation.pieces.split_count())
            .sum()
    }

    /// Render the report as a table.
    ///
    /// With `per_order` set, a second table lists the packing of every order.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write, per_order: bool) -> Result<(), ReportError> {
        let mut builder = Builder::default();

        builder.push_record(["Size", "Bags", "Pieces"]);

        for count in self.counts() {
            builder.push_record([
                count.size().to_string(),
                format!("{:.1}", count.quantity()),
                count.pieces().to_string(),
            ]);
        }

        writeln!(out, "\n{}", style_table(builder))?;

        if per_order {
            self.write_allocations(&mut out)?;
        }

        writeln!(out, " Orders:     {}", self.allocations.len())?;
        writeln!(out, " Total:      {}kg", self.total_kilograms().normalize())?;
        writeln!(out, " Bags:       {:.1}", self.total_bags())?;
        writeln!(out, " Half bags:  {}", self.split_bags())?;

        Ok(())
    }

    fn write_allocations(&self, out: &mut impl io::Write) -> Result<(), ReportError> {
        let mut builder = Builder::default();

        let mut header = vec!["#".to_string(), "Order".to_string()];
        header.extend(self.sizes.iter().map(|size| size.to_string()));
        header.push("Half bags".to_string());

        builder.push_record(header);

        for (idx, allocation) in self.allocations.iter().enumerate() {
            let mut row = vec![format!("#{:<3}", idx + 1), allocation.order.to_string()];

            row.extend(
                allocation
                    .pieces
                    .as_slice()
                    .iter()
                    .map(|&pieces| format!("{:.1}", Decimal::from(pieces) / Decimal::TWO)),
            );
            row.push(allocation.pieces.split_count().to_string());

            builder.push_record(row);
        }

        writeln!(out, "{}", style_table(builder))?;

        Ok(())
    }
}

fn style_table(builder: Builder) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..), Alignment::right());

    table.to_string()
}

/// Compute per-size bag counts for a set of orders.
///
/// Returns one [`BagCount`] per distinct bag size, largest first, including
/// sizes that no order used.
///
/// # Errors
///
/// Returns a [`ReportError`] if the inputs are invalid or an order cannot be
/// packed exactly.
///
/// # Example
///
/// ```rust
/// use bagcount::report::bag_counts;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let counts = bag_counts(&[9.0], &[1, 2, 4])?;
///
/// let bags: Vec<(u32, f64)> = counts
///     .iter()
///     .map(|count| (count.size().kilograms(), count.bags()))
///     .collect();
///
/// assert_eq!(bags, [(4, 2.0), (2, 0.0), (1, 1.0)]);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn bag_counts(orders: &[f64], bag_sizes: &[i64]) -> Result<Vec<BagCount>, ReportError> {
    BagReport::compute(orders, bag_sizes).map(BagReport::into_counts)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn quantities(counts: &[BagCount]) -> Vec<(u32, Decimal)> {
        counts
            .iter()
            .map(|count| (count.size().kilograms(), count.quantity()))
            .collect()
    }

    fn bags(n: i64) -> Decimal {
        Decimal::new(n, 1)
    }

    #[test]
    fn single_order() -> TestResult {
        let counts = bag_counts(&[9.0], &[1, 2, 4])?;

        assert_eq!(
            quantities(&counts),
            [(4, bags(20)), (2, bags(0)), (1, bags(10))]
        );

        Ok(())
    }

    #[test]
    fn aggregates_across_orders() -> TestResult {
        let counts = bag_counts(&[5.0, 12.0, 12.0], &[1, 2, 4])?;

        assert_eq!(
            quantities(&counts),
            [(4, bags(70)), (2, bags(0)), (1, bags(10))]
        );

        Ok(())
    }

    #[test]
    fn half_bags() -> TestResult {
        let counts = bag_counts(&[4.5], &[1, 2, 4])?;

        assert_eq!(
            quantities(&counts),
            [(4, bags(10)), (2, bags(0)), (1, bags(5))]
        );
        assert!(counts.last().is_some_and(BagCount::has_half_bag));

        Ok(())
    }

    #[test]
    fn empty_orders_report_every_size_at_zero() -> TestResult {
        let report = BagReport::compute(&[], &[3, 1])?;

        assert_eq!(quantities(&report.counts()), [(3, bags(0)), (1, bags(0))]);
        assert_eq!(report.total_kilograms(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn invalid_sizes_fail_before_orders() {
        let result = BagReport::compute(&[1.25], &[1, 0]);

        assert!(matches!(
            result,
            Err(ReportError::BagSizes(BagSizeError::NonPositive(1, 0)))
        ));
    }

    #[test]
    fn invalid_order_is_invalid_input() -> TestResult {
        let result = BagReport::compute(&[2.0, 1.25], &[1, 2, 4]);

        match result {
            Err(error @ ReportError::InvalidOrder { index, .. }) => {
                assert_eq!(index, 1);
                assert!(error.is_invalid_input());
                assert!(!error.is_unfulfillable());
            }
            other => return Err(format!("expected InvalidOrder error, got {other:?}").into()),
        }

        Ok(())
    }

    #[test]
    fn unfulfillable_order_aborts_report() -> TestResult {
        let result = BagReport::compute(&[4.0, 4.5], &[2, 4]);

        match result {
            Err(error @ ReportError::Unfulfillable { index, .. }) => {
                assert_eq!(index, 1);
                assert!(error.is_unfulfillable());
                assert_eq!(
                    error.to_string(),
                    "Order at index 1: Order of 4.5kg cannot be fulfilled with the given bag sizes"
                );
            }
            other => return Err(format!("expected Unfulfillable error, got {other:?}").into()),
        }

        Ok(())
    }

    #[test]
    fn unfulfillable_order_before_invalid_order_wins() {
        let result = BagReport::compute(&[4.5, 1.25], &[2, 4]);

        assert!(result.is_err_and(|error| error.is_unfulfillable()));
    }

    #[test]
    fn report_summary() -> TestResult {
        let report = BagReport::compute(&[4.5, 9.0], &[4, 2, 1])?;

        assert_eq!(report.total_kilograms(), bags(135));
        assert_eq!(report.total_bags(), bags(45));
        assert_eq!(report.split_bags(), 1);
        assert_eq!(report.allocations().len(), 2);
        assert!(report.stats().candidates >= 2);

        Ok(())
    }

    #[test]
    fn from_orders_matches_compute() -> TestResult {
        let sizes = BagSizes::new(&[1, 3, 4])?;
        let orders = [Order::from_kilograms(6.0)?, Order::from_kilograms(2.5)?];

        let report = BagReport::from_orders::<ExhaustiveSolver>(orders, sizes)?;
        let computed = BagReport::compute(&[6.0, 2.5], &[4, 3, 1])?;

        assert_eq!(report.counts(), computed.counts());
        assert_eq!(report.stats(), SearchStats::default());

        Ok(())
    }

    #[test]
    fn write_to_renders_every_size() -> TestResult {
        let report = BagReport::compute(&[5.0, 12.0, 12.0], &[1, 2, 4])?;
        let mut out = Vec::new();

        report.write_to(&mut out, false)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("4kg"));
        assert!(text.contains("2kg"));
        assert!(text.contains("1kg"));
        assert!(text.contains("7.0"));
        assert!(text.contains(" Total:      29kg"));
        assert!(!text.contains("#1"));

        Ok(())
    }

    #[test]
    fn write_to_per_order() -> TestResult {
        let report = BagReport::compute(&[4.5], &[1, 2, 4])?;
        let mut out = Vec::new();

        report.write_to(&mut out, true)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Order"));
        assert!(text.contains("4.5kg"));
        assert!(text.contains(" Half bags:  1"));

        Ok(())
    }
}
