use test_case::test_case;

use crate::{FunctionId, MdNode, Metadata, MetadataAttachments, NamedMetadata};

#[test_case(Metadata::i32(-1), Some(-1); "negative i32")]
#[test_case(Metadata::i32(5), Some(5); "positive i32")]
#[test_case(Metadata::u32(u32::MAX), Some(-1); "u32 max sign extends")]
#[test_case(Metadata::u64(u64::MAX), Some(-1); "u64 max")]
#[test_case(Metadata::string("x"), None; "string")]
fn as_sint(md: Metadata, expected: Option<i64>) {
    assert_eq!(md.as_sint(), expected);
}

#[test]
fn i32_zero_extends_in_storage() {
    assert_eq!(Metadata::i32(-1).as_int(), Some(0xffff_ffff));
}

#[test]
fn function_operands() {
    assert_eq!(Metadata::function(FunctionId(3)).as_function(), Some(Some(FunctionId(3))));
    assert_eq!(Metadata::null().as_function(), Some(None));
    assert_eq!(Metadata::u32(0).as_function(), None);
}

#[test]
fn attachments_set_replaces_every_node_of_kind() {
    let mut md = MetadataAttachments::default();
    md.add("k", MdNode::new([Metadata::u32(1)]));
    md.add("k", MdNode::new([Metadata::u32(2)]));
    md.add("other", MdNode::empty());
    assert_eq!(md.get_all("k").count(), 2);

    md.set("k", MdNode::new([Metadata::u32(3)]));
    let all: Vec<_> = md.get_all("k").collect();
    assert_eq!(all, vec![&MdNode::new([Metadata::u32(3)])]);
    assert!(md.contains("other"));
}

#[test]
fn attachments_erase() {
    let mut md = MetadataAttachments::default();
    md.add("k", MdNode::empty());
    assert!(md.erase("k"));
    assert!(!md.erase("k"));
    assert!(md.get("k").is_none());
    assert!(md.is_empty());
}

#[test]
fn attachments_get_returns_first() {
    let mut md = MetadataAttachments::default();
    md.add("k", MdNode::new([Metadata::u32(1)]));
    md.add("k", MdNode::new([Metadata::u32(2)]));
    assert_eq!(md.get("k").and_then(|n| n.operand(0)).and_then(Metadata::as_int), Some(1));
}

#[test]
fn named_metadata() {
    let mut named = NamedMetadata::default();
    assert!(named.get("opencl.kernels").is_none());
    named.get_or_insert("opencl.kernels").push(MdNode::empty());
    assert_eq!(named.get("opencl.kernels").map(<[MdNode]>::len), Some(1));
    assert!(named.erase("opencl.kernels"));
    assert!(named.get("opencl.kernels").is_none());
}
