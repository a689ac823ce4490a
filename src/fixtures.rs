//! Fixtures
//!
//! Order sets stored as YAML documents:
//!
//! ```yaml
//! bag_sizes: [1, 2, 4]
//! orders: [5.0, 12.0, "12kg"]
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    orders::{Order, OrderError},
    report::{BagReport, ReportError},
};

/// Default directory searched by [`Fixture::from_set`].
pub const DEFAULT_BASE_PATH: &str = "./fixtures";

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,

        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The document has no `orders` key
    #[error("Fixture is missing `orders`")]
    MissingOrders,

    /// The document has no `bag_sizes` key
    #[error("Fixture is missing `bag_sizes`")]
    MissingBagSizes,

    /// A textual order could not be parsed
    #[error("Invalid order at index {index}: {source}")]
    InvalidOrder {
        /// Position of the order in the fixture
        index: usize,

        /// Why the order was rejected
        #[source]
        source: OrderError,
    },

    /// Report computation failed
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Order set document
#[derive(Debug, Deserialize)]
pub struct OrderSetFixture {
    /// Optional human readable name
    #[serde(default)]
    pub name: Option<String>,

    /// Available bag sizes in kilograms
    #[serde(default)]
    pub bag_sizes: Option<Vec<i64>>,

    /// Order quantities
    #[serde(default)]
    pub orders: Option<Vec<OrderFixture>>,
}

/// Order quantity, either numeric kilograms or text such as `"4.5kg"`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OrderFixture {
    /// Kilograms as a number
    Kilograms(f64),

    /// Kilograms as text, with an optional `kg` suffix
    Text(String),
}

/// A loaded order set.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    name: Option<String>,
    orders: Vec<f64>,
    bag_sizes: Vec<i64>,
}

impl Fixture {
    /// Create a fixture from in-memory values.
    pub fn new(orders: impl Into<Vec<f64>>, bag_sizes: impl Into<Vec<i64>>) -> Self {
        Fixture {
            name: None,
            orders: orders.into(),
            bag_sizes: bag_sizes.into(),
        }
    }

    /// Load the named set from [`DEFAULT_BASE_PATH`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in(DEFAULT_BASE_PATH, name)
    }

    /// Load `<base_path>/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set_in(base_path: impl AsRef<Path>, name: &str) -> Result<Self, FixtureError> {
        Self::from_path(base_path.as_ref().join(format!("{name}.yml")))
    }

    /// Load a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let fixture = Self::from_yaml(&contents)?;

        debug!(
            path = %path.display(),
            orders = fixture.orders.len(),
            bag_sizes = fixture.bag_sizes.len(),
            "loaded fixture"
        );

        Ok(fixture)
    }

    /// Parse a fixture document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a key is missing, or a
    /// textual order cannot be parsed.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let document: OrderSetFixture = serde_norway::from_str(contents)?;

        document.try_into()
    }

    /// Optional set name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Order quantities in kilograms.
    pub fn orders(&self) -> &[f64] {
        &self.orders
    }

    /// Raw bag sizes, as written.
    pub fn bag_sizes(&self) -> &[i64] {
        &self.bag_sizes
    }

    /// Compute the bag report for this set.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Report`] if the report cannot be computed.
    pub fn report(&self) -> Result<BagReport, FixtureError> {
        Ok(BagReport::compute(&self.orders, &self.bag_sizes)?)
    }
}

impl TryFrom<OrderSetFixture> for Fixture {
    type Error = FixtureError;

    fn try_from(document: OrderSetFixture) -> Result<Self, Self::Error> {
        let bag_sizes = document.bag_sizes.ok_or(FixtureError::MissingBagSizes)?;

        let orders = document
            .orders
            .ok_or(FixtureError::MissingOrders)?
            .into_iter()
            .enumerate()
            .map(|(index, order)| match order {
                OrderFixture::Kilograms(kilograms) => Ok(kilograms),
                OrderFixture::Text(text) => text
                    .parse::<Order>()
                    .map(|order| order.kilograms())
                    .map_err(|source| FixtureError::InvalidOrder { index, source }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Fixture {
            name: document.name,
            orders,
            bag_sizes,
        })
    }
}
