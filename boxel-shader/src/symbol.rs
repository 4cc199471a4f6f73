use crate::{
  error::{LowerError, SymbolShape},
  param::Parameter,
  types::{Qualifier, Type},
};
use std::collections::HashMap;

/// Stage-level symbol, as a runtime binder sees it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Symbol {
  pub name: String,
  pub qualifier: Qualifier,
  pub ty: Type,

  /// Number of elements, `0` if not an array.
  pub array_length: u32,
}

impl Symbol {
  pub fn shape(&self) -> SymbolShape {
    SymbolShape {
      qualifier: self.qualifier,
      ty: self.ty,
      array_length: self.array_length,
    }
  }
}

impl<'a> From<&'a Parameter> for Symbol {
  fn from(param: &'a Parameter) -> Self {
    Symbol {
      name: param.name().to_owned(),
      qualifier: param.qualifier(),
      ty: param.ty(),
      array_length: param.array_length(),
    }
  }
}

/// Symbols of a stage, in discovery order, unique by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymbolTable {
  symbols: Vec<Symbol>,
  index: HashMap<String, usize>,
}

impl SymbolTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a parameter.
  ///
  /// Returns `true` if the parameter was not known yet. A parameter whose name is already recorded with a different
  /// qualifier, type or array length is an error.
  pub fn insert(&mut self, param: &Parameter) -> Result<bool, LowerError> {
    let symbol = Symbol::from(param);

    if let Some(&i) = self.index.get(&symbol.name) {
      let known = &self.symbols[i];

      let (first, second) = (known.shape(), symbol.shape());

      if first != second {
        return Err(LowerError::InconsistentSymbol {
          name: symbol.name,
          first,
          second,
        });
      }

      return Ok(false);
    }

    self.index.insert(symbol.name.clone(), self.symbols.len());
    self.symbols.push(symbol);
    Ok(true)
  }

  pub fn get(&self, name: &str) -> Option<&Symbol> {
    self.index.get(name).map(|&i| &self.symbols[i])
  }

  pub fn contains(&self, name: &str) -> bool {
    self.index.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.symbols.len()
  }

  pub fn is_empty(&self) -> bool {
    self.symbols.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
    self.symbols.iter()
  }

  pub fn into_vec(self) -> Vec<Symbol> {
    self.symbols
  }
}
