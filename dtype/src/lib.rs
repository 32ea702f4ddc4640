//! Value types for the Ember kernel IR.
//!
//! Integers are signless: signedness is a property of the operation (`ashr`
//! versus `lshr`, `sdiv` versus `udiv`), not of the type. Vectors are either
//! fixed-width or scalable, in which case the element count is a known
//! minimum multiplied by a hardware-defined factor.


use std::fmt;

use enumset::EnumSet;

/// Address space for pointer types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::EnumIter, strum::FromRepr)]
pub enum AddrSpace {
    /// Private (per work-item) memory.
    Private = 0,
    /// Global/device memory.
    Global = 1,
    /// Constant memory.
    Constant = 2,
    /// Local (work-group shared) memory.
    Local = 3,
}

/// Scalar data types.
#[derive(Debug, Hash, PartialOrd, Ord)]
#[derive(strum::EnumCount, strum::EnumIter, strum::VariantArray, strum::FromRepr)]
#[derive(enumset::EnumSetType)]
#[cfg_attr(any(test, feature = "proptest"), derive(proptest_derive::Arbitrary))]
#[enumset(repr = "u32")]
pub enum ScalarDType {
    /// One-bit integer, the result type of comparisons.
    I1 = 0,
    I8 = 1,
    I16 = 2,
    I32 = 3,
    I64 = 4,

    Half = 5,
    Float = 6,
    Double = 7,

    /// No value. Only valid as a function return type.
    Void = 8,
}

impl ScalarDType {
    /// All integer types.
    pub const INTEGERS: EnumSet<Self> = enumset::enum_set!(Self::I1 | Self::I8 | Self::I16 | Self::I32 | Self::I64);

    /// All floating point types.
    pub const FLOATS: EnumSet<Self> = enumset::enum_set!(Self::Half | Self::Float | Self::Double);

    pub const fn bits(&self) -> u32 {
        match self {
            Self::I1 => 1,
            Self::I8 => 8,
            Self::I16 => 16,
            Self::I32 => 32,
            Self::I64 => 64,
            Self::Half => 16,
            Self::Float => 32,
            Self::Double => 64,
            Self::Void => 0,
        }
    }

    /// Integer type with exactly `bits` bits, if one exists.
    pub const fn int_of_width(bits: u32) -> Option<Self> {
        match bits {
            1 => Some(Self::I1),
            8 => Some(Self::I8),
            16 => Some(Self::I16),
            32 => Some(Self::I32),
            64 => Some(Self::I64),
            _ => None,
        }
    }

    pub fn is_int(&self) -> bool {
        Self::INTEGERS.contains(*self)
    }

    pub fn is_float(&self) -> bool {
        Self::FLOATS.contains(*self)
    }

    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// All-ones mask for this integer width (`0` for non-integers).
    pub const fn mask(&self) -> u64 {
        match self {
            Self::I1 => 1,
            Self::I8 => 0xff,
            Self::I16 => 0xffff,
            Self::I32 => 0xffff_ffff,
            Self::I64 => u64::MAX,
            Self::Half | Self::Float | Self::Double | Self::Void => 0,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::I1 => "i1",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Half => "half",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }
}

impl fmt::Display for ScalarDType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Data type of an IR value: scalars, vectors, and pointers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DType {
    /// Scalar type (single value).
    Scalar(ScalarDType),

    /// Fixed-width vector type.
    Vector { scalar: ScalarDType, count: u32 },

    /// Scalable vector type: `min_count` lanes times a hardware factor.
    ScalableVector { scalar: ScalarDType, min_count: u32 },

    /// Opaque pointer.
    Ptr { addrspace: AddrSpace },
}

impl From<ScalarDType> for DType {
    fn from(scalar: ScalarDType) -> Self {
        Self::Scalar(scalar)
    }
}

impl DType {
    // =========================================================================
    // Type Constructors
    // =========================================================================

    /// Create a fixed vector type from this scalar dtype.
    ///
    /// Returns `None` for non-scalar or void element types.
    pub fn vec(&self, count: u32) -> Option<Self> {
        match self {
            Self::Scalar(s) if !s.is_void() && count > 0 => Some(Self::Vector { scalar: *s, count }),
            _ => None,
        }
    }

    /// Create a scalable vector type from this scalar dtype.
    pub fn scalable_vec(&self, min_count: u32) -> Option<Self> {
        match self {
            Self::Scalar(s) if !s.is_void() && min_count > 0 => Some(Self::ScalableVector { scalar: *s, min_count }),
            _ => None,
        }
    }

    /// Same shape as `self`, with a different element type.
    pub fn with_scalar(&self, scalar: ScalarDType) -> Self {
        match self {
            Self::Scalar(_) => Self::Scalar(scalar),
            Self::Vector { count, .. } => Self::Vector { scalar, count: *count },
            Self::ScalableVector { min_count, .. } => Self::ScalableVector { scalar, min_count: *min_count },
            Self::Ptr { .. } => self.clone(),
        }
    }

    pub fn scalar(&self) -> Option<ScalarDType> {
        match self {
            Self::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    /// Element type for scalars and vectors; `None` for pointers.
    pub fn element(&self) -> Option<ScalarDType> {
        match self {
            Self::Scalar(s) => Some(*s),
            Self::Vector { scalar, .. } | Self::ScalableVector { scalar, .. } => Some(*scalar),
            Self::Ptr { .. } => None,
        }
    }

    /// Width in bits of the scalar element (the type itself for scalars).
    pub fn scalar_bits(&self) -> u32 {
        match self {
            Self::Ptr { .. } => 64,
            _ => self.element().map_or(0, |s| s.bits()),
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector { .. } | Self::ScalableVector { .. })
    }

    pub fn is_scalable(&self) -> bool {
        matches!(self, Self::ScalableVector { .. })
    }

    /// Number of lanes for fixed vectors and scalars; `None` for scalable vectors.
    pub fn fixed_count(&self) -> Option<u32> {
        match self {
            Self::Vector { count, .. } => Some(*count),
            Self::ScalableVector { .. } => None,
            _ => Some(1),
        }
    }

    /// True for integer scalars and vectors of integers.
    pub fn is_int(&self) -> bool {
        self.element().is_some_and(|s| s.is_int())
    }

    pub fn is_float(&self) -> bool {
        self.element().is_some_and(|s| s.is_float())
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Scalar(ScalarDType::Void))
    }

    pub fn is_ptr(&self) -> bool {
        matches!(self, Self::Ptr { .. })
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Vector { scalar, count } => write!(f, "<{count} x {scalar}>"),
            Self::ScalableVector { scalar, min_count } => write!(f, "<vscale x {min_count} x {scalar}>"),
            Self::Ptr { addrspace: AddrSpace::Private } => f.write_str("ptr"),
            Self::Ptr { addrspace } => write!(f, "ptr addrspace({})", *addrspace as u32),
        }
    }
}

// Convenient constructors for common scalar types
#[allow(non_upper_case_globals)]
impl DType {
    pub const I1: Self = Self::Scalar(ScalarDType::I1);
    pub const I8: Self = Self::Scalar(ScalarDType::I8);
    pub const I16: Self = Self::Scalar(ScalarDType::I16);
    pub const I32: Self = Self::Scalar(ScalarDType::I32);
    pub const I64: Self = Self::Scalar(ScalarDType::I64);
    pub const Half: Self = Self::Scalar(ScalarDType::Half);
    pub const Float: Self = Self::Scalar(ScalarDType::Float);
    pub const Double: Self = Self::Scalar(ScalarDType::Double);
    pub const Void: Self = Self::Scalar(ScalarDType::Void);
    pub const GlobalPtr: Self = Self::Ptr { addrspace: AddrSpace::Global };
}
