use std::{error::Error, f64::consts::{PI, TAU}, fmt::{self, Display, Formatter}, str::FromStr};
use super::convert::Convert;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Provides copy-pasteable impls for unit enums.
macro_rules! unit_impl {
    (
        $doc:literal,
        $enum_name:ident, $base_variant:ident,
        $(
            $variant:ident: $main_abbr:literal $(, $alt_abbr:literal)* => $factor:expr $(; offset $offset:expr)?
        ),*
        $(,)?
    ) => {
        #[doc = $doc]
        ///
        /// The listed abbreviations are the abbreviations used to parse the unit with
        /// [`FromStr`]. The main abbreviation comes first, followed by any alternate
        /// abbreviations that can be used.
        ///
        /// The base unit for
        #[doc = concat!("[`", stringify!($enum_name), "`] is [`", stringify!($enum_name), "::", stringify!($base_variant), "`].")]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum $enum_name {
            $(
                #[doc = concat!("- Abbreviation: `", $main_abbr, "`" $(, ", `", $alt_abbr, "`")*)]
                $variant,
            )*
        }

        impl $enum_name {
            /// Every unit of this dimension, in declaration order.
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$variant),*];
        }

        impl FromStr for $enum_name {
            type Err = InvalidUnit;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $(
                        $main_abbr $(| $alt_abbr)* => Ok($enum_name::$variant),
                    )*
                    _ => Err(InvalidUnit { unit: value.to_owned() }),
                }
            }
        }

        impl Display for $enum_name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                match self {
                    $(
                        $enum_name::$variant => write!(f, $main_abbr),
                    )*
                }
            }
        }

        impl Convert for $enum_name {
            const BASE: Self = $enum_name::$base_variant;

            fn conversion_factor(&self) -> f64 {
                match self {
                    $(
                        $enum_name::$variant => $factor,
                    )*
                }
            }

            fn offset(&self) -> f64 {
                match self {
                    $(
                        $enum_name::$variant => 0.0 $(+ $offset)?,
                    )*
                }
            }
        }

        impl From<$enum_name> for Unit {
            fn from(unit: $enum_name) -> Self {
                Unit::$enum_name(unit)
            }
        }
    };
}

unit_impl!(
    "A unit of plane angle.",
    Angle, Radian,
    Radian: "rad", "radian", "radians" => 1.0,
    Degree: "deg", "degree", "degrees" => PI / 180.0,
    Gradian: "grad", "gradian", "gradians" => PI / 200.0,
    Turn: "turn", "turns", "rev" => TAU,
);

unit_impl!(
    "A unit of thermodynamic temperature. These units are affine: converting between them shifts \
    the value as well as scaling it.",
    Temperature, Kelvin,
    Kelvin: "K", "kelvin" => 1.0,
    Celsius: "degC", "celsius" => 1.0; offset 273.15,
    Fahrenheit: "degF", "fahrenheit" => 5.0 / 9.0; offset 459.67,
);

unit_impl!(
    "A unit of mass.",
    Mass, Kilogram,
    Kilogram: "kg", "kilogram", "kilograms" => 1.0,
    Gram: "g", "gram", "grams" => 1e-3,
    Milligram: "mg" => 1e-6,
    Tonne: "t", "tonne", "tonnes" => 1e3,
    Pound: "lb", "lbs", "pound", "pounds" => 0.45359237,
    Ounce: "oz", "ounce", "ounces" => 0.028349523125,
);

unit_impl!(
    "A unit of length.",
    Length, Meter,
    Meter: "m", "meter", "meters" => 1.0,
    Kilometer: "km" => 1e3,
    Centimeter: "cm" => 1e-2,
    Millimeter: "mm" => 1e-3,
    Inch: "inch", "in", "inches" => 0.0254,
    Foot: "ft", "foot", "feet" => 0.3048,
    Yard: "yd", "yard", "yards" => 0.9144,
    Mile: "mi", "mile", "miles" => 1609.344,
);

unit_impl!(
    "A unit of time.",
    Time, Second,
    Second: "s", "sec", "second", "seconds" => 1.0,
    Millisecond: "ms" => 1e-3,
    Minute: "min", "minute", "minutes" => 60.0,
    Hour: "h", "hr", "hour", "hours" => 3600.0,
    Day: "day", "days" => 86400.0,
    Week: "week", "weeks" => 604800.0,
);

unit_impl!(
    "A unit of area. The base unit is the square of the base unit of [`Length`].",
    Area, SquareMeter,
    SquareMeter: "m2", "sqm" => 1.0,
    SquareKilometer: "km2" => 1e6,
    SquareCentimeter: "cm2" => 1e-4,
    SquareFoot: "ft2", "sqft" => 0.09290304,
    SquareInch: "in2" => 0.00064516,
    Acre: "acre", "acres" => 4046.8564224,
    Hectare: "ha", "hectare", "hectares" => 1e4,
);

unit_impl!(
    "A unit of volume. The base unit is the cube of the base unit of [`Length`].",
    Volume, CubicMeter,
    CubicMeter: "m3" => 1.0,
    CubicCentimeter: "cm3", "cc" => 1e-6,
    Liter: "L", "liter", "liters" => 1e-3,
    Milliliter: "mL" => 1e-6,
    Gallon: "gal", "gallon", "gallons" => 0.003785411784,
    CubicFoot: "ft3" => 0.028316846592,
    CubicInch: "in3" => 1.6387064e-5,
);

unit_impl!(
    "A unit of power.",
    Power, Watt,
    Watt: "W", "watt", "watts" => 1.0,
    Kilowatt: "kW" => 1e3,
    Megawatt: "MW" => 1e6,
    Horsepower: "hp" => 745.69987158227022,
);

/// The physical dimension measured by a [`Unit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dimension {
    Angle,
    Temperature,
    Mass,
    Length,
    Time,
    Area,
    Volume,
    Power,
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Angle => "angle",
            Self::Temperature => "temperature",
            Self::Mass => "mass",
            Self::Length => "length",
            Self::Time => "time",
            Self::Area => "area",
            Self::Volume => "volume",
            Self::Power => "power",
        };
        write!(f, "{}", name)
    }
}

/// Any unit in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Unit {
    Angle(Angle),
    Temperature(Temperature),
    Mass(Mass),
    Length(Length),
    Time(Time),
    Area(Area),
    Volume(Volume),
    Power(Power),
}

/// Calls the given method on the unit enum wrapped by a [`Unit`].
macro_rules! dispatch {
    ($unit:expr, $inner:ident => $body:expr) => {
        match $unit {
            Unit::Angle($inner) => $body,
            Unit::Temperature($inner) => $body,
            Unit::Mass($inner) => $body,
            Unit::Length($inner) => $body,
            Unit::Time($inner) => $body,
            Unit::Area($inner) => $body,
            Unit::Volume($inner) => $body,
            Unit::Power($inner) => $body,
        }
    };
}

impl Unit {
    /// Returns the dimension this unit measures.
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Angle(_) => Dimension::Angle,
            Unit::Temperature(_) => Dimension::Temperature,
            Unit::Mass(_) => Dimension::Mass,
            Unit::Length(_) => Dimension::Length,
            Unit::Time(_) => Dimension::Time,
            Unit::Area(_) => Dimension::Area,
            Unit::Volume(_) => Dimension::Volume,
            Unit::Power(_) => Dimension::Power,
        }
    }

    /// Returns the base unit of the given dimension.
    pub fn base_of(dimension: Dimension) -> Unit {
        match dimension {
            Dimension::Angle => Angle::BASE.into(),
            Dimension::Temperature => Temperature::BASE.into(),
            Dimension::Mass => Mass::BASE.into(),
            Dimension::Length => Length::BASE.into(),
            Dimension::Time => Time::BASE.into(),
            Dimension::Area => Area::BASE.into(),
            Dimension::Volume => Volume::BASE.into(),
            Dimension::Power => Power::BASE.into(),
        }
    }

    /// Returns the base unit of this unit's dimension.
    pub fn base(&self) -> Unit {
        Self::base_of(self.dimension())
    }

    /// Converts a value in this unit to the base unit of its dimension.
    pub fn to_base(&self, value: f64) -> f64 {
        dispatch!(self, unit => unit.to_base(value))
    }

    /// Converts a value in the base unit of this unit's dimension to this unit.
    pub fn from_base(&self, value: f64) -> f64 {
        dispatch!(self, unit => unit.from_base(value))
    }

    /// Returns true if the unit is affine, meaning zero in this unit is not zero in the base unit.
    pub fn is_affine(&self) -> bool {
        dispatch!(self, unit => unit.offset() != 0.0)
    }

    /// Converts a value in this unit to the target unit. Returns [`Err`] if the units measure
    /// different dimensions.
    pub fn convert_to(&self, value: f64, target: Unit) -> Result<f64, ConversionError> {
        if self.dimension() != target.dimension() {
            return Err(ConversionError { unit: *self, target });
        }
        Ok(target.from_base(self.to_base(value)))
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        dispatch!(self, unit => write!(f, "{}", unit))
    }
}

impl FromStr for Unit {
    type Err = InvalidUnit;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.parse::<Angle>().map(Unit::from)
            .or_else(|_| value.parse::<Temperature>().map(Unit::from))
            .or_else(|_| value.parse::<Mass>().map(Unit::from))
            .or_else(|_| value.parse::<Length>().map(Unit::from))
            .or_else(|_| value.parse::<Time>().map(Unit::from))
            .or_else(|_| value.parse::<Area>().map(Unit::from))
            .or_else(|_| value.parse::<Volume>().map(Unit::from))
            .or_else(|_| value.parse::<Power>().map(Unit::from))
    }
}

impl TryFrom<&str> for Unit {
    type Error = InvalidUnit;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An error that occurs when parsing a unit from a string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidUnit {
    /// The unit that was attempted to be parsed.
    pub unit: String,
}

impl Display for InvalidUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported unit: `{}`", self.unit)
    }
}

impl Error for InvalidUnit {}

/// An error that occurs when converting between units of different dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConversionError {
    /// The unit that was attempted to be converted.
    pub unit: Unit,

    /// The unit that was attempted to be converted to.
    pub target: Unit,
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot convert from `{}` ({}) to `{}` ({})",
            self.unit,
            self.unit.dimension(),
            self.target,
            self.target.dimension(),
        )
    }
}

impl Error for ConversionError {}
