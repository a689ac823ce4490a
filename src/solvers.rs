//! Solvers for Orders

use thiserror::Error;

use crate::{orders::Order, sizes::BagSizes};

pub mod exhaustive;
pub mod observer;
pub mod pieces;

pub use exhaustive::ExhaustiveSolver;
pub use observer::{NoopObserver, SearchObserver, SearchStats};
pub use pieces::PieceVector;

/// Solver Errors
#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    /// No combination of the available bag sizes adds up to the order exactly.
    #[error("Order of {kilograms}kg cannot be fulfilled with the given bag sizes")]
    Unfulfillable {
        /// Order quantity in kilograms
        kilograms: f64,
    },
}

/// Trait for packing a single order into bags
pub trait Solver {
    /// Find the preferred piece vector for `order` over `sizes`.
    ///
    /// The returned vector has one entry per size in `sizes`, largest first.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the order cannot be packed exactly.
    fn solve(order: &Order, sizes: &BagSizes) -> Result<PieceVector, SolverError>;
}
