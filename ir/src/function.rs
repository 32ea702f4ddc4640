//! Functions, basic blocks and instructions.

use std::collections::BTreeMap;

use ember_dtype::DType;
use smallvec::SmallVec;
use snafu::OptionExt;

use crate::error::{OperandIndexOutOfBoundsSnafu, Result, UnknownArgumentSnafu, UnknownInstructionSnafu};
use crate::{BinaryOp, BlockId, CallingConv, InstId, MetadataAttachments, Opcode, Value};

/// Formal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Option<String>,
    pub ty: DType,
}

/// A typed instruction with an ordered operand list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub(crate) opcode: Opcode,
    pub(crate) ty: DType,
    pub(crate) operands: SmallVec<[Value; 3]>,
    pub(crate) name: Option<String>,
    pub(crate) block: BlockId,
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Result type. `void` for terminators and void calls.
    pub fn ty(&self) -> &DType {
        &self.ty
    }

    pub fn operands(&self) -> &[Value] {
        &self.operands
    }

    pub fn operand(&self, index: usize) -> Option<&Value> {
        self.operands.get(index)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Block the instruction lives in.
    pub fn block(&self) -> BlockId {
        self.block
    }

    pub fn binary_op(&self) -> Option<BinaryOp> {
        self.opcode.binary_op()
    }

    pub fn is_shift(&self) -> bool {
        self.opcode.is_shift()
    }

    pub fn is_terminator(&self) -> bool {
        self.opcode.is_terminator()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicBlock {
    pub(crate) name: String,
    pub(crate) insts: Vec<InstId>,
}

impl BasicBlock {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instructions in execution order.
    pub fn insts(&self) -> &[InstId] {
        &self.insts
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }
}

/// A function: signature, body and attached metadata.
///
/// Instructions live in a per-function arena addressed by [`InstId`]; blocks
/// hold the execution order. A function without blocks is a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    name: String,
    params: Vec<Param>,
    ret_ty: DType,
    calling_conv: CallingConv,
    attributes: BTreeMap<String, String>,
    pub(crate) blocks: Vec<BasicBlock>,
    pub(crate) insts: Vec<Instruction>,
    metadata: MetadataAttachments,
}

impl Function {
    pub fn new(name: impl Into<String>, params: impl IntoIterator<Item = DType>, ret_ty: DType) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().map(|ty| Param { name: None, ty }).collect(),
            ret_ty,
            calling_conv: CallingConv::Default,
            attributes: BTreeMap::new(),
            blocks: Vec::new(),
            insts: Vec::new(),
            metadata: MetadataAttachments::default(),
        }
    }

    /// A kernel entry point returning `void`.
    pub fn kernel(name: impl Into<String>, params: impl IntoIterator<Item = DType>) -> Self {
        let mut f = Self::new(name, params, DType::Void);
        f.calling_conv = CallingConv::Kernel;
        f
    }

    // =========================================================================
    // Signature
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// The `index`-th formal parameter as an operand.
    pub fn arg(&self, index: u32) -> Result<Value> {
        self.params.get(index as usize).context(UnknownArgumentSnafu { index })?;
        Ok(Value::Arg(index))
    }

    pub fn set_param_name(&mut self, index: u32, name: impl Into<String>) -> Result<()> {
        let param = self.params.get_mut(index as usize).context(UnknownArgumentSnafu { index })?;
        param.name = Some(name.into());
        Ok(())
    }

    pub fn ret_ty(&self) -> &DType {
        &self.ret_ty
    }

    pub fn calling_conv(&self) -> CallingConv {
        self.calling_conv
    }

    pub fn set_calling_conv(&mut self, cc: CallingConv) {
        self.calling_conv = cc;
    }

    /// True for kernel entry points.
    pub fn is_kernel(&self) -> bool {
        self.calling_conv == CallingConv::Kernel
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    // =========================================================================
    // Body
    // =========================================================================

    pub fn add_block(&mut self, name: impl Into<String>) -> BlockId {
        let id = BlockId::from_index(self.blocks.len());
        self.blocks.push(BasicBlock { name: name.into(), insts: Vec::new() });
        id
    }

    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.index())
    }

    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &BasicBlock)> {
        self.blocks.iter().enumerate().map(|(i, b)| (BlockId::from_index(i), b))
    }

    pub fn entry_block(&self) -> Option<BlockId> {
        (!self.blocks.is_empty()).then_some(BlockId(0))
    }

    pub fn inst(&self, id: InstId) -> Option<&Instruction> {
        self.insts.get(id.index())
    }

    /// Instructions in program order (block order, then position in block).
    pub fn instructions(&self) -> impl Iterator<Item = (InstId, &Instruction)> {
        self.blocks.iter().flat_map(|b| b.insts.iter()).map(|&id| (id, &self.insts[id.index()]))
    }

    /// Snapshot of [`instructions`](Self::instructions) ids, for rewrites that
    /// insert while walking.
    pub fn inst_ids(&self) -> Vec<InstId> {
        self.blocks.iter().flat_map(|b| b.insts.iter().copied()).collect()
    }

    pub fn num_instructions(&self) -> usize {
        self.blocks.iter().map(|b| b.insts.len()).sum()
    }

    /// Block and position of an instruction.
    pub fn position_of(&self, id: InstId) -> Option<(BlockId, usize)> {
        let block = self.inst(id)?.block;
        let pos = self.blocks[block.index()].insts.iter().position(|&i| i == id)?;
        Some((block, pos))
    }

    /// Type of an operand, or an error if it refers to nothing in this function.
    pub fn value_type(&self, value: &Value) -> Result<DType> {
        match value {
            Value::Inst(id) => Ok(self.inst(*id).context(UnknownInstructionSnafu { id: *id })?.ty.clone()),
            Value::Arg(index) => {
                Ok(self.params.get(*index as usize).context(UnknownArgumentSnafu { index: *index })?.ty.clone())
            }
            Value::Const(c) => Ok(c.dtype()),
        }
    }

    /// Replaces operand `index` of `inst`.
    ///
    /// Type compatibility is the caller's responsibility; the verifier checks it.
    pub fn set_operand(&mut self, inst: InstId, index: usize, value: Value) -> Result<()> {
        let instruction = self.insts.get_mut(inst.index()).context(UnknownInstructionSnafu { id: inst })?;
        let count = instruction.operands.len();
        let slot = instruction.operands.get_mut(index).context(OperandIndexOutOfBoundsSnafu { index, count })?;
        *slot = value;
        Ok(())
    }

    pub fn set_inst_name(&mut self, inst: InstId, name: impl Into<String>) -> Result<()> {
        let instruction = self.insts.get_mut(inst.index()).context(UnknownInstructionSnafu { id: inst })?;
        instruction.name = Some(name.into());
        Ok(())
    }

    /// Places a new instruction at `position` in `block`.
    pub(crate) fn insert_at(&mut self, block: BlockId, position: usize, mut inst: Instruction) -> InstId {
        let id = InstId::from_index(self.insts.len());
        inst.block = block;
        self.insts.push(inst);
        self.blocks[block.index()].insts.insert(position, id);
        id
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    pub fn metadata(&self) -> &MetadataAttachments {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut MetadataAttachments {
        &mut self.metadata
    }
}
