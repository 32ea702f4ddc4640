//! Compile-time constants.

use ember_dtype::{DType, ScalarDType};

/// A constant operand.
///
/// Integer payloads are stored zero-extended and truncated to the width of
/// their type, so two constants of the same type compare equal exactly when
/// they denote the same bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    Int { ty: ScalarDType, value: u64 },

    /// Float constant stored as raw IEEE bits of an `f64`.
    Float { ty: ScalarDType, bits: u64 },

    /// Fixed vector with an explicit value per lane.
    Vector { scalar: ScalarDType, elements: Vec<Constant> },

    /// Every lane holds `value`. The only constant form for scalable vectors.
    Splat { ty: DType, value: Box<Constant> },

    Undef(DType),
}

impl Constant {
    /// Integer constant of scalar type `ty`, truncated to its width.
    pub fn int(ty: ScalarDType, value: u64) -> Self {
        Self::Int { ty, value: value & ty.mask() }
    }

    /// Integer constant of `dtype`: a scalar, or a splat for vector types.
    ///
    /// Returns `None` when `dtype` is not an integer type.
    pub fn int_for(dtype: &DType, value: u64) -> Option<Self> {
        let scalar = dtype.element().filter(ScalarDType::is_int)?;
        let lane = Self::int(scalar, value);
        Some(if dtype.is_vector() { Self::Splat { ty: dtype.clone(), value: Box::new(lane) } } else { lane })
    }

    pub fn float(ty: ScalarDType, value: f64) -> Self {
        Self::Float { ty, bits: value.to_bits() }
    }

    /// Fixed vector of integer lanes.
    pub fn int_vector(scalar: ScalarDType, lanes: impl IntoIterator<Item = u64>) -> Self {
        Self::Vector { scalar, elements: lanes.into_iter().map(|v| Self::int(scalar, v)).collect() }
    }

    pub fn dtype(&self) -> DType {
        match self {
            Self::Int { ty, .. } | Self::Float { ty, .. } => DType::Scalar(*ty),
            Self::Vector { scalar, elements } => DType::Vector { scalar: *scalar, count: elements.len() as u32 },
            Self::Splat { ty, .. } | Self::Undef(ty) => ty.clone(),
        }
    }

    /// Zero-extended payload of a scalar integer constant.
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// The common lane value of a splat or a uniform vector constant.
    pub fn splat_value(&self) -> Option<&Constant> {
        match self {
            Self::Splat { value, .. } => Some(value),
            Self::Vector { elements, .. } => {
                let (first, rest) = elements.split_first()?;
                rest.iter().all(|e| e == first).then_some(first)
            }
            _ => None,
        }
    }

    /// Integer lanes of a scalar or fixed-width constant, expanding splats.
    pub fn int_lanes(&self) -> Option<Vec<u64>> {
        match self {
            Self::Int { value, .. } => Some(vec![*value]),
            Self::Vector { elements, .. } => elements.iter().map(Self::as_int).collect(),
            Self::Splat { ty, value } => {
                let count = ty.fixed_count()?;
                let lane = value.as_int()?;
                Some(vec![lane; count as usize])
            }
            _ => None,
        }
    }
}
