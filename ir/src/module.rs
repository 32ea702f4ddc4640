use crate::{Function, FunctionId, NamedMetadata};

/// A compilation unit: functions plus module-level named metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    name: String,
    functions: Vec<Function>,
    named_metadata: NamedMetadata,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_function(&mut self, function: Function) -> FunctionId {
        let id = FunctionId::from_index(self.functions.len());
        self.functions.push(function);
        id
    }

    pub fn function(&self, id: FunctionId) -> Option<&Function> {
        self.functions.get(id.index())
    }

    pub fn function_mut(&mut self, id: FunctionId) -> Option<&mut Function> {
        self.functions.get_mut(id.index())
    }

    /// Two distinct functions borrowed mutably at once.
    pub fn function_pair_mut(&mut self, a: FunctionId, b: FunctionId) -> Option<(&mut Function, &mut Function)> {
        let (ia, ib) = (a.index(), b.index());
        if ia == ib || ia.max(ib) >= self.functions.len() {
            return None;
        }
        if ia < ib {
            let (lo, hi) = self.functions.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.functions.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }

    pub fn function_by_name(&self, name: &str) -> Option<FunctionId> {
        self.functions.iter().position(|f| f.name() == name).map(FunctionId::from_index)
    }

    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &Function)> {
        self.functions.iter().enumerate().map(|(i, f)| (FunctionId::from_index(i), f))
    }

    pub fn functions_mut(&mut self) -> impl Iterator<Item = (FunctionId, &mut Function)> {
        self.functions.iter_mut().enumerate().map(|(i, f)| (FunctionId::from_index(i), f))
    }

    pub fn num_functions(&self) -> usize {
        self.functions.len()
    }

    pub fn named_metadata(&self) -> &NamedMetadata {
        &self.named_metadata
    }

    pub fn named_metadata_mut(&mut self) -> &mut NamedMetadata {
        &mut self.named_metadata
    }
}
