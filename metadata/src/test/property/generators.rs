//! Proptest strategies for metadata records.

use proptest::prelude::*;
use strum::IntoEnumIterator;

use crate::{SimdDim, VectorizationFactor, VectorizationInfo, WrapperMetadata};

pub fn vectorization_factor() -> impl Strategy<Value = VectorizationFactor> {
    prop_oneof![
        Just(VectorizationFactor::scalar()),
        (1u32..=64, any::<bool>()).prop_filter_map("non-zero lanes", |(n, s)| VectorizationFactor::new(n, s)),
    ]
}

pub fn simd_dim() -> impl Strategy<Value = SimdDim> {
    proptest::sample::select(SimdDim::iter().collect::<Vec<_>>())
}

pub fn vectorization_info() -> impl Strategy<Value = VectorizationInfo> {
    (vectorization_factor(), simd_dim(), any::<bool>()).prop_map(|(vf, dim, vp)| VectorizationInfo::new(vf, dim, vp))
}

pub fn wrapper_metadata() -> impl Strategy<Value = WrapperMetadata> {
    (vectorization_info(), proptest::option::of(vectorization_info()))
        .prop_map(|(main, tail)| WrapperMetadata::new(main, tail))
}
