//! Bagcount
//!
//! Packs kilogram orders into seed bags of the available sizes, allowing half
//! bags, and totals the bags needed per size across all orders.
//!
//! Each order is packed exactly: fewest half bags first, then fewest bags, and
//! on a tie the packing that uses more of the larger sizes.
//!
//! ```rust
//! use bagcount::report::bag_counts;
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let counts = bag_counts(&[5.0, 12.0, 12.0], &[1, 2, 4])?;
//!
//! assert_eq!(counts.len(), 3);
//! assert_eq!(counts.first().map(|count| count.bags()), Some(7.0));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod fixtures;
pub mod logging;
pub mod orders;
pub mod prelude;
pub mod report;
pub mod sizes;
pub mod solvers;
