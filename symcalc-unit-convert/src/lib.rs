//! Unit catalog for dimensioned quantities.
//!
//! Every unit belongs to exactly one [`Dimension`], and converts to and from the base unit of
//! that dimension through the [`Convert`] trait. Units are looked up by name with [`FromStr`],
//! which is what the [`convert`] function does with its string argument.
//!
//! [`FromStr`]: std::str::FromStr

pub mod convert;
pub mod unit;

pub use convert::Convert;
pub use unit::{
    Angle,
    Area,
    ConversionError,
    Dimension,
    InvalidUnit,
    Length,
    Mass,
    Power,
    Temperature,
    Time,
    Unit,
    Volume,
};

use std::{error::Error, fmt::{self, Display, Formatter}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A value and the unit it is measured in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// The numeric value, in terms of [`Measurement::unit`].
    pub value: f64,

    /// The unit of the value.
    pub unit: Unit,
}

impl Measurement {
    /// Create a new measurement.
    pub fn new(value: f64, unit: impl Into<Unit>) -> Self {
        Self { value, unit: unit.into() }
    }

    /// Returns the dimension this measurement measures.
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Returns the value of this measurement, expressed in the base unit of its dimension.
    pub fn base_value(&self) -> f64 {
        self.unit.to_base(self.value)
    }

    /// Convert this measurement to another unit. Returns [`Err`] if the units measure different
    /// dimensions.
    pub fn convert(&self, target: impl Into<Unit>) -> Result<Self, ConversionError> {
        let target = target.into();
        Ok(Self {
            value: self.unit.convert_to(self.value, target)?,
            unit: target,
        })
    }
}

impl Display for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// The error returned by [`convert`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConvertError {
    /// The target unit name is not in the catalog.
    UnknownUnit(InvalidUnit),

    /// The target unit measures a different dimension than the source unit.
    Incompatible(ConversionError),
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUnit(err) => write!(f, "{}", err),
            Self::Incompatible(err) => write!(f, "{}", err),
        }
    }
}

impl Error for ConvertError {}

impl From<InvalidUnit> for ConvertError {
    fn from(err: InvalidUnit) -> Self {
        Self::UnknownUnit(err)
    }
}

impl From<ConversionError> for ConvertError {
    fn from(err: ConversionError) -> Self {
        Self::Incompatible(err)
    }
}

/// Converts a measurement into the unit with the given name.
///
/// This is total over the catalog: any name that parses as a [`Unit`] of the same dimension
/// succeeds, and unknown names fail with [`ConvertError::UnknownUnit`].
pub fn convert(measurement: Measurement, unit_name: &str) -> Result<Measurement, ConvertError> {
    let target = unit_name.parse::<Unit>()?;
    Ok(measurement.convert(target)?)
}
