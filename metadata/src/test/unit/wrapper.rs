use ember_ir::{MdNode, Metadata};
use itertools::iproduct;
use strum::IntoEnumIterator;

use super::kernels;
use crate::*;

#[test]
fn main_and_tail_round_trip() {
    let (mut m, ids) = kernels(&["k"]);
    let f = m.function_mut(ids[0]).unwrap();
    let main = VectorizationInfo::new(VectorizationFactor::fixed(4).unwrap(), SimdDim::X, false);
    let tail = VectorizationInfo::scalar();
    encode_wrapper_fn_metadata(f, &WrapperMetadata::new(main, Some(tail)));

    let decoded = parse_wrapper_fn_metadata(f).unwrap();
    assert_eq!(decoded.main.vf.known_min(), 4);
    assert!(!decoded.main.vf.is_scalable());
    assert_eq!(decoded.main.simd_dim, SimdDim::X);
    assert!(!decoded.main.is_vector_predicated);
    assert_eq!(decoded.tail, Some(tail));
}

#[test]
fn every_shape_round_trips() {
    let factors = [
        VectorizationFactor::scalar(),
        VectorizationFactor::fixed(8).unwrap(),
        VectorizationFactor::scalable(4).unwrap(),
    ];
    let (mut m, ids) = kernels(&["k"]);
    let f = m.function_mut(ids[0]).unwrap();
    for (vf, dim, vp, with_tail) in iproduct!(factors, SimdDim::iter(), [false, true], [false, true]) {
        let main = VectorizationInfo::new(vf, dim, vp);
        let wrapper = WrapperMetadata::new(main, with_tail.then(VectorizationInfo::scalar));
        encode_wrapper_fn_metadata(f, &wrapper);
        assert_eq!(parse_wrapper_fn_metadata(f), Some(wrapper), "{wrapper:?}");
    }
}

#[test]
fn unvectorized_kernel_has_scalar_main_and_no_tail() {
    let (mut m, ids) = kernels(&["k"]);
    let f = m.function_mut(ids[0]).unwrap();
    encode_wrapper_fn_metadata(f, &WrapperMetadata::unvectorized());

    let node = f.metadata().get(kinds::WRAPPER).unwrap();
    assert_eq!(node.operand(1), Some(&Metadata::Node(MdNode::empty())));
    let decoded = parse_wrapper_fn_metadata(f).unwrap();
    assert!(decoded.main.vf.is_scalar());
    assert_eq!(decoded.tail, None);
}

#[test]
fn absent_is_not_scalar() {
    let (m, ids) = kernels(&["k"]);
    assert_eq!(parse_wrapper_fn_metadata(m.function(ids[0]).unwrap()), None);
}

#[test]
fn malformed_tail_hides_record() {
    let (mut m, ids) = kernels(&["k"]);
    let f = m.function_mut(ids[0]).unwrap();
    let main = Metadata::Node(VectorizationInfo::scalar().to_node());
    let tail = Metadata::Node(MdNode::new([Metadata::u32(1)]));
    f.metadata_mut().set(kinds::WRAPPER, MdNode::new([main.clone(), tail]));
    assert_eq!(parse_wrapper_fn_metadata(f), None);

    f.metadata_mut().set(kinds::WRAPPER, MdNode::new([main]));
    assert_eq!(parse_wrapper_fn_metadata(f), None);
}
