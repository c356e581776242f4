//! Provides the [`Convert`] trait, which is implemented by every unit enum.

/// A trait implemented by all unit enums, providing the information needed to convert between
/// units of the same dimension.
pub trait Convert: Sized {
    /// The base unit of this dimension.
    ///
    /// The base unit is the unit in which conversions to other units of the same dimension are
    /// defined. For example, the base unit of length is the meter, and the base unit of volume
    /// is the cubic meter. Base units are chosen so that multiplying two base lengths gives the
    /// base area, and multiplying a base length by a base area gives the base volume.
    const BASE: Self;

    /// Returns the conversion factor from `&self` to [`Convert::BASE`], i.e. the value to multiply
    /// a quantity in this unit by, in order to get a quantity in [`Convert::BASE`].
    ///
    /// For example, if [`Convert::BASE`] is the meter, the conversion factor for a centimeter
    /// would be `0.01`.
    fn conversion_factor(&self) -> f64;

    /// Returns the offset added to a value in this unit before it is scaled into the base unit.
    /// This is zero for every linear unit; only affine scales such as temperatures need it.
    fn offset(&self) -> f64 {
        0.0
    }

    /// Converts a value in this unit to the base unit.
    fn to_base(&self, value: f64) -> f64 {
        (value + self.offset()) * self.conversion_factor()
    }

    /// Converts a value in the base unit to this unit.
    fn from_base(&self, value: f64) -> f64 {
        value / self.conversion_factor() - self.offset()
    }
}
