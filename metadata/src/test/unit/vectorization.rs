use ember_ir::{MdNode, Metadata};
use test_case::test_case;

use super::kernels;
use crate::*;

fn info(lanes: u32, scalable: bool, dim: SimdDim, vp: bool) -> VectorizationInfo {
    VectorizationInfo::new(VectorizationFactor::new(lanes, scalable).unwrap(), dim, vp)
}

#[test_case(VectorizationFactor::scalar(), "1"; "scalar")]
#[test_case(VectorizationFactor::fixed(8).unwrap(), "8"; "fixed")]
#[test_case(VectorizationFactor::scalable(4).unwrap(), "vscale x 4"; "scalable")]
fn factor_display(vf: VectorizationFactor, expected: &str) {
    assert_eq!(vf.to_string(), expected);
}

#[test]
fn factor_classes() {
    assert!(VectorizationFactor::scalar().is_scalar());
    assert!(VectorizationFactor::scalable(1).unwrap().is_vector());
    assert!(VectorizationFactor::fixed(0).is_none());
}

#[test]
fn info_layout() {
    let node = info(4, true, SimdDim::Z, true).to_node();
    assert_eq!(node, MdNode::new([Metadata::u32(4), Metadata::u32(1), Metadata::u32(2), Metadata::u32(1)]));
}

#[test_case(&[4, 0, 0]; "too few fields")]
#[test_case(&[4, 0, 0, 0, 0]; "too many fields")]
#[test_case(&[0, 0, 0, 0]; "zero lanes")]
#[test_case(&[4, 2, 0, 0]; "scalable flag not boolean")]
#[test_case(&[4, 0, 3, 0]; "dimension out of range")]
#[test_case(&[4, 0, 0, 7]; "predication flag not boolean")]
fn malformed_info_is_rejected(fields: &[u32]) {
    let node = MdNode::new(fields.iter().map(|&v| Metadata::u32(v)));
    assert_eq!(VectorizationInfo::from_node(&node), None);
}

#[test]
fn info_rejects_non_integer_fields() {
    let node = MdNode::new([Metadata::string("4"), Metadata::u32(0), Metadata::u32(0), Metadata::u32(0)]);
    assert_eq!(VectorizationInfo::from_node(&node), None);
}

#[test]
fn absent_links_are_none() {
    let (m, ids) = kernels(&["k"]);
    let f = m.function(ids[0]).unwrap();
    assert_eq!(parse_orig_to_vecz_fn_link_metadata(f), None);
    assert_eq!(parse_vecz_to_orig_fn_link_metadata(f), None);
    assert!(parse_vectorization_failed_metadata(f).is_empty());
}

#[test]
fn base_links_append_and_derived_link_overwrites() {
    let (mut m, ids) = kernels(&["orig", "v4", "v8"]);
    let (orig, v4, v8) = (ids[0], ids[1], ids[2]);
    let four = info(4, false, SimdDim::X, false);
    let eight = info(8, false, SimdDim::X, false);

    let f = m.function_mut(orig).unwrap();
    link_orig_to_vecz_fn_metadata(f, v4, four);
    link_orig_to_vecz_fn_metadata(f, v8, eight);
    link_vecz_to_orig_fn_metadata(f, v4, four);
    link_vecz_to_orig_fn_metadata(f, v8, eight);

    let f = m.function(orig).unwrap();
    assert_eq!(
        parse_orig_to_vecz_fn_link_metadata(f),
        Some(vec![LinkRecord { info: four, function: Some(v4) }, LinkRecord { info: eight, function: Some(v8) }])
    );
    assert_eq!(parse_vecz_to_orig_fn_link_metadata(f), Some(LinkRecord { info: eight, function: Some(v8) }));
}

#[test]
fn one_malformed_base_link_hides_all() {
    let (mut m, ids) = kernels(&["orig", "vecz"]);
    let f = m.function_mut(ids[0]).unwrap();
    link_orig_to_vecz_fn_metadata(f, ids[1], VectorizationInfo::scalar());
    f.metadata_mut().add(kinds::VECZ_BASE, MdNode::new([Metadata::u32(1)]));
    assert_eq!(parse_orig_to_vecz_fn_link_metadata(f), None);
}

#[test]
fn null_link_target_decodes() {
    let node = LinkRecord { info: VectorizationInfo::scalar(), function: None }.to_node();
    assert_eq!(node.operand(1), Some(&Metadata::null()));
    assert_eq!(LinkRecord::from_node(&node).map(|r| r.function), Some(None));
}

#[test]
fn failure_records() {
    let (mut m, ids) = kernels(&["k"]);
    let f = m.function_mut(ids[0]).unwrap();
    let a = info(16, false, SimdDim::X, false);
    let b = info(4, true, SimdDim::Y, true);
    encode_vectorization_failed_metadata(f, a);
    f.metadata_mut().add(kinds::VECZ_BASE_FAIL, MdNode::empty());
    encode_vectorization_failed_metadata(f, b);

    assert_eq!(parse_vectorization_failed_metadata(f), vec![a, b]);
    // Failures are not links.
    assert_eq!(parse_orig_to_vecz_fn_link_metadata(f), None);
}

#[test]
fn drops_are_independent() {
    let (mut m, ids) = kernels(&["k", "other"]);
    let f = m.function_mut(ids[0]).unwrap();
    let i = info(4, false, SimdDim::X, false);
    link_orig_to_vecz_fn_metadata(f, ids[1], i);
    encode_vectorization_failed_metadata(f, i);
    link_vecz_to_orig_fn_metadata(f, ids[1], i);

    drop_vecz_derived_metadata(f);
    assert_eq!(parse_vecz_to_orig_fn_link_metadata(f), None);
    assert_eq!(parse_orig_to_vecz_fn_link_metadata(f).map(|l| l.len()), Some(1));

    link_vecz_to_orig_fn_metadata(f, ids[1], i);
    drop_vecz_orig_metadata(f);
    assert_eq!(parse_orig_to_vecz_fn_link_metadata(f), None);
    assert!(parse_vectorization_failed_metadata(f).is_empty());
    assert_eq!(parse_vecz_to_orig_fn_link_metadata(f), Some(LinkRecord { info: i, function: Some(ids[1]) }));
}
