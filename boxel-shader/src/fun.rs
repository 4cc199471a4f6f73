use crate::{operation::Operation, param::Parameter, types::Type};
use std::{collections::HashMap, sync::Arc};
use tracing::trace;

/// User-defined function.
///
/// Functions are invoked with [`Operation::call`]; the definition is hoisted into the lowered source the first time a
/// stage references it. Parameters of the function are local to its body and never declared at stage level.
///
/// Functions are immutable once built and shared through [`Arc`], so that a single definition can serve many
/// materials. See [`FunctionCache`] to memoize them.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderFunction {
  pub name: String,

  /// Return type; `None` is `void`.
  pub return_type: Option<Type>,

  pub params: Vec<Parameter>,
  pub body: Vec<Operation>,
}

impl ShaderFunction {
  pub fn new(
    name: impl Into<String>,
    return_type: Option<Type>,
    params: Vec<Parameter>,
    body: Vec<Operation>,
  ) -> Self {
    Self {
      name: name.into(),
      return_type,
      params,
      body,
    }
  }
}

/// Memoization of [`ShaderFunction`]s, keyed by the shape they were built for.
///
/// Keys are free-form; a function specialized on a count should carry it in its key, e.g.
/// `"directional_lighting/3"`.
#[derive(Debug, Default)]
pub struct FunctionCache {
  functions: HashMap<String, Arc<ShaderFunction>>,
  hits: u64,
  misses: u64,
}

impl FunctionCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn hits(&self) -> u64 {
    self.hits
  }

  pub fn misses(&self) -> u64 {
    self.misses
  }

  pub fn len(&self) -> usize {
    self.functions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.functions.is_empty()
  }

  /// Get the function cached under `key`, building and caching it if absent.
  pub fn get_or_insert_with(
    &mut self,
    key: &str,
    build: impl FnOnce() -> ShaderFunction,
  ) -> Arc<ShaderFunction> {
    if let Some(existing) = self.functions.get(key) {
      self.hits += 1;
      trace!(key, "shader function cache hit");
      return Arc::clone(existing);
    }

    let fun = Arc::new(build());
    self.functions.insert(key.to_owned(), Arc::clone(&fun));
    self.misses += 1;
    trace!(key, name = %fun.name, "shader function cache miss");
    fun
  }

  pub fn clear(&mut self) {
    self.functions.clear();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Qualifier;

  fn square() -> ShaderFunction {
    let x = Parameter::scalar("x", Qualifier::Const);

    ShaderFunction::new(
      "square",
      Some(Type::Scalar),
      vec![x.clone()],
      vec![Operation::ret(Operation::multiply(&x, &x))],
    )
  }

  #[test]
  fn cache_memoizes_by_key() {
    let mut cache = FunctionCache::new();

    let a = cache.get_or_insert_with("square", square);
    let b = cache.get_or_insert_with("square", || panic!("must not rebuild"));

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.len(), 1);
  }
}
