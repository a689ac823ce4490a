//! Orders

use std::{fmt, str::FromStr};

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Tolerance used when checking that a scaled order lands on a whole half-kilogram.
pub const HALF_KILOGRAM_EPSILON: f64 = 1e-9;

/// Errors related to order validation.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// Order quantity is NaN or infinite.
    #[error("Order quantity must be a finite number")]
    NotFinite,

    /// Order quantity is zero or negative.
    #[error("Orders must be positive, got {0}kg")]
    NonPositive(f64),

    /// Order quantity is not a multiple of 0.5kg.
    #[error("Order {0}kg is not in 0.5kg increments")]
    NotHalfKilogram(f64),

    /// Order quantity is too large to be represented in half-kilogram units.
    #[error("Order {0}kg is too large")]
    TooLarge(f64),

    /// Order quantity could not be parsed.
    #[error("Invalid order quantity: {0}")]
    Parse(String),
}

/// A customer order, held as an exact count of half-kilogram units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order {
    kilograms: f64,
    units: u64,
}

impl Order {
    /// Create an order from a kilogram quantity.
    ///
    /// The quantity is accepted when twice its value is within
    /// [`HALF_KILOGRAM_EPSILON`] of a whole number.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NotFinite`]: the quantity is NaN or infinite.
    /// - [`OrderError::NonPositive`]: the quantity is zero or negative.
    /// - [`OrderError::NotHalfKilogram`]: the quantity is not a multiple of 0.5kg.
    /// - [`OrderError::TooLarge`]: the unit count does not fit in a `u64`.
    pub fn from_kilograms(kilograms: f64) -> Result<Self, OrderError> {
        if !kilograms.is_finite() {
            return Err(OrderError::NotFinite);
        }

        if kilograms <= 0.0 {
            return Err(OrderError::NonPositive(kilograms));
        }

        let scaled = kilograms * 2.0;
        let rounded = scaled.round();

        if (scaled - rounded).abs() > HALF_KILOGRAM_EPSILON {
            return Err(OrderError::NotHalfKilogram(kilograms));
        }

        let units = Decimal::from_f64(rounded)
            .and_then(|value| value.to_u64())
            .ok_or(OrderError::TooLarge(kilograms))?;

        // positive quantities within epsilon of zero
        if units == 0 {
            return Err(OrderError::NotHalfKilogram(kilograms));
        }

        Ok(Order { kilograms, units })
    }

    /// Create an order from an exact decimal kilogram quantity.
    ///
    /// # Errors
    ///
    /// - [`OrderError::NonPositive`]: the quantity is zero or negative.
    /// - [`OrderError::NotHalfKilogram`]: the quantity is not a multiple of 0.5kg.
    /// - [`OrderError::TooLarge`]: the quantity cannot be represented.
    pub fn from_decimal(kilograms: Decimal) -> Result<Self, OrderError> {
        let approx = kilograms.to_f64().unwrap_or(f64::NAN);

        if kilograms <= Decimal::ZERO {
            return Err(OrderError::NonPositive(approx));
        }

        let scaled = kilograms
            .checked_mul(Decimal::TWO)
            .ok_or(OrderError::TooLarge(approx))?;

        if !scaled.fract().is_zero() {
            return Err(OrderError::NotHalfKilogram(approx));
        }

        let units = scaled.to_u64().ok_or(OrderError::TooLarge(approx))?;

        Ok(Order {
            kilograms: approx,
            units,
        })
    }

    /// Create an order directly from a half-kilogram unit count.
    ///
    /// Returns `None` for zero.
    pub fn from_units(units: u64) -> Option<Self> {
        if units == 0 {
            return None;
        }

        let kilograms = Decimal::from(units).checked_div(Decimal::TWO)?.to_f64()?;

        Some(Order { kilograms, units })
    }

    /// Order quantity in kilograms, as supplied.
    pub fn kilograms(&self) -> f64 {
        self.kilograms
    }

    /// Order quantity in half-kilogram units.
    pub fn units(&self) -> u64 {
        self.units
    }

    /// Exact order quantity in kilograms, derived from the unit count.
    pub fn exact_kilograms(&self) -> Decimal {
        Decimal::from(self.units) / Decimal::TWO
    }
}

impl FromStr for Order {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kilograms = s
            .trim()
            .trim_end_matches("kg")
            .trim_end()
            .parse::<Decimal>()
            .map_err(|_err| OrderError::Parse(s.to_string()))?;

        Self::from_decimal(kilograms)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}kg", self.exact_kilograms().normalize())
    }
}
