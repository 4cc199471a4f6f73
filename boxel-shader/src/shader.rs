use crate::{
  error::LowerError,
  operation::Operation,
  types::{Precision, Stage},
  writer::{dialect::Dialect, glsl, CompiledShader},
};

/// Body of one shader stage.
///
/// A [`Shader`] is plain data: its top-level operations form the body of the entry point, and every parameter and
/// function they reference is discovered when lowering. Shaders are rebuilt, not patched, when the structural
/// configuration they were built for changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Shader {
  pub stage: Stage,

  /// Default float precision; `None` emits no precision statement.
  pub precision: Option<Precision>,

  pub operations: Vec<Operation>,
}

impl Shader {
  pub fn new(stage: Stage) -> Self {
    Self {
      stage,
      precision: None,
      operations: Vec::new(),
    }
  }

  pub fn vertex() -> Self {
    Self::new(Stage::Vertex)
  }

  pub fn fragment() -> Self {
    Self::new(Stage::Fragment)
  }

  pub fn with_precision(mut self, precision: Precision) -> Self {
    self.precision = Some(precision);
    self
  }

  pub fn with_operations(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
    self.operations.extend(operations);
    self
  }

  pub fn push(&mut self, op: Operation) {
    self.operations.push(op);
  }

  /// Lower the shader with the given dialect.
  pub fn compile(&self, dialect: &Dialect) -> Result<CompiledShader, LowerError> {
    glsl::lower(self, dialect)
  }
}
