//! Textual dump of functions and modules.
//!
//! The format follows LLVM's assembly closely enough to be read at a glance
//! in logs and test failures. It is not meant to be parsed back.

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::{Constant, Function, InstId, Instruction, MdNode, Metadata, Module, Opcode};

pub(crate) struct ConstantDisplay<'a>(pub &'a Constant);

impl Display for ConstantDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Constant::Int { ty, value } if ty.bits() == 1 => write!(f, "{}", *value != 0),
            Constant::Int { value, .. } => write!(f, "{value}"),
            Constant::Float { bits, .. } => write!(f, "{:?}", f64::from_bits(*bits)),
            Constant::Vector { scalar, elements } => {
                write!(f, "<{}>", elements.iter().map(|e| format!("{scalar} {}", ConstantDisplay(e))).join(", "))
            }
            Constant::Splat { value, .. } => write!(f, "splat ({} {})", value.dtype(), ConstantDisplay(value)),
            Constant::Undef(_) => f.write_str("undef"),
        }
    }
}

impl Display for Metadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Metadata::Int { bits, value } => write!(f, "i{bits} {value}"),
            Metadata::String(s) => write!(f, "!{s:?}"),
            Metadata::Function(Some(id)) => write!(f, "ptr {id}"),
            Metadata::Function(None) => f.write_str("null"),
            Metadata::Node(node) => write!(f, "{node}"),
        }
    }
}

impl Display for MdNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "!{{{}}}", self.operands().iter().join(", "))
    }
}

struct InstDisplay<'a> {
    func: &'a Function,
    id: InstId,
    inst: &'a Instruction,
}

impl InstDisplay<'_> {
    fn typed(&self, index: usize) -> String {
        match self.inst.operand(index) {
            Some(v) => match self.func.value_type(v) {
                Ok(ty) => format!("{ty} {v}"),
                Err(_) => format!("<invalid> {v}"),
            },
            None => "<missing>".to_string(),
        }
    }

    fn block_name(&self, id: crate::BlockId) -> String {
        self.func.block(id).map_or_else(|| id.to_string(), |b| b.name().to_string())
    }
}

impl Display for InstDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let inst = self.inst;
        let ops = inst.operands();
        match inst.opcode() {
            Opcode::Binary(op) => {
                write!(f, "{} = {op} {}, {}", self.id, self.typed(0), ops.get(1).map(ToString::to_string).unwrap_or_default())?
            }
            Opcode::ICmp(pred) => write!(
                f,
                "{} = icmp {pred} {}, {}",
                self.id,
                self.typed(0),
                ops.get(1).map(ToString::to_string).unwrap_or_default()
            )?,
            Opcode::Select => {
                write!(f, "{} = select {}, {}, {}", self.id, self.typed(0), self.typed(1), self.typed(2))?
            }
            Opcode::Call(callee) => {
                let args = (0..ops.len()).map(|i| self.typed(i)).join(", ");
                if inst.ty().is_void() {
                    write!(f, "call void {callee}({args})")?
                } else {
                    write!(f, "{} = call {} {callee}({args})", self.id, inst.ty())?
                }
            }
            Opcode::Ret if ops.is_empty() => f.write_str("ret void")?,
            Opcode::Ret => write!(f, "ret {}", self.typed(0))?,
            Opcode::Br(target) => write!(f, "br label %{}", self.block_name(target))?,
            Opcode::CondBr { then_block, else_block } => write!(
                f,
                "br {}, label %{}, label %{}",
                self.typed(0),
                self.block_name(then_block),
                self.block_name(else_block)
            )?,
        }
        if let Some(name) = inst.name() {
            write!(f, " ; {name}")?;
        }
        Ok(())
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let keyword = if self.is_declaration() { "declare" } else { "define" };
        write!(f, "{keyword} ")?;
        let cc = self.calling_conv().to_string();
        if !cc.is_empty() {
            write!(f, "{cc} ")?;
        }
        let params = self
            .params()
            .iter()
            .enumerate()
            .map(|(i, p)| match &p.name {
                Some(name) => format!("{} %arg{i} ; {name}", p.ty),
                None => format!("{} %arg{i}", p.ty),
            })
            .join(", ");
        write!(f, "{} @{}({params})", self.ret_ty(), self.name())?;
        for (key, value) in self.attributes() {
            write!(f, " \"{key}\"=\"{value}\"")?;
        }
        for (kind, node) in self.metadata().iter() {
            write!(f, " !{kind} {node}")?;
        }
        if self.is_declaration() {
            return writeln!(f);
        }
        writeln!(f, " {{")?;
        for (_, block) in self.blocks() {
            writeln!(f, "{}:", block.name())?;
            for &id in block.insts() {
                if let Some(inst) = self.inst(id) {
                    writeln!(f, "  {}", InstDisplay { func: self, id, inst })?;
                }
            }
        }
        writeln!(f, "}}")
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.name())?;
        for (id, func) in self.functions() {
            writeln!(f, "; {id}")?;
            writeln!(f, "{func}")?;
        }
        for (name, nodes) in self.named_metadata().iter() {
            writeln!(f, "!{name} = !{{{}}}", nodes.iter().join(", "))?;
        }
        Ok(())
    }
}
