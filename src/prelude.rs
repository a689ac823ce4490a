//! Bagcount prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    fixtures::{Fixture, FixtureError},
    orders::{Order, OrderError},
    report::{BagCount, BagReport, OrderAllocation, ReportError, bag_counts},
    sizes::{BagSize, BagSizeError, BagSizes},
    solvers::{
        ExhaustiveSolver, NoopObserver, PieceVector, SearchObserver, SearchStats, Solver,
        SolverError,
    },
};
