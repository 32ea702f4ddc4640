use ember_dtype::{DType, ScalarDType};

use crate::{Builder, Constant, Function, MdNode, Metadata, Module, Value};

#[test]
fn function_dump() {
    let mut f = Function::kernel("k", [DType::I32, DType::I32]);
    f.metadata_mut().set("max_work_dim", MdNode::new([Metadata::u32(3)]));
    let entry = f.add_block("entry");
    let mut b = Builder::at_end(&mut f, entry);
    let masked = b.and(Value::Arg(1), Value::Const(Constant::int(ScalarDType::I32, 31))).unwrap();
    b.shl(Value::Arg(0), masked).unwrap();
    b.ret(None).unwrap();

    let text = f.to_string();
    assert!(text.starts_with("define spir_kernel void @k(i32 %arg0, i32 %arg1) !max_work_dim !{i32 3} {"), "{text}");
    assert!(text.contains("  %0 = and i32 %arg1, 31\n"), "{text}");
    assert!(text.contains("  %1 = shl i32 %arg0, %0\n"), "{text}");
    assert!(text.contains("  ret void\n"), "{text}");
}

#[test]
fn splat_and_metadata_dump() {
    let ty = DType::I8.scalable_vec(16).unwrap();
    let splat = Constant::int_for(&ty, 7).unwrap();
    assert_eq!(Value::Const(splat).to_string(), "splat (i8 7)");

    let node = MdNode::new([
        Metadata::u32(4),
        Metadata::null(),
        Metadata::string("reqd_work_group_size"),
        Metadata::Node(MdNode::empty()),
    ]);
    assert_eq!(node.to_string(), "!{i32 4, null, !\"reqd_work_group_size\", !{}}");
}

#[test]
fn module_dump_lists_named_metadata() {
    let mut m = Module::new("m");
    let id = m.add_function(Function::new("decl", [DType::I64], DType::Void));
    m.named_metadata_mut().get_or_insert("opencl.kernels").push(MdNode::new([Metadata::function(id)]));

    let text = m.to_string();
    assert!(text.contains("declare void @decl(i64 %arg0)"), "{text}");
    assert!(text.contains("!opencl.kernels = !{!{ptr @0}}"), "{text}");
}
