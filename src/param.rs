//! Parameter value storage types.

/// Represents a sampled parameter value.
///
/// This enum stores different parameter value types uniformly.
/// For categorical parameters, the `Categorical` variant stores
/// the index into the choices array.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamValue {
    /// A floating-point parameter value.
    Float(f64),
    /// An integer parameter value.
    Int(i64),
    /// A categorical parameter value, stored as an index into the choices array.
    Categorical(usize),
}

impl ParamValue {
    /// Returns the categorical index, if this is a categorical value.
    #[must_use]
    pub fn as_categorical(&self) -> Option<usize> {
        match self {
            Self::Categorical(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as an `f64` for float and integer values.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::Categorical(_) => None,
        }
    }
}
