//! Writers lowering shaders into target source code.

pub mod dialect;
pub mod glsl;

use crate::{symbol::Symbol, types::Stage};

/// Result of lowering a [`Shader`](crate::shader::Shader).
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledShader {
  pub stage: Stage,

  /// Complete source of the stage.
  pub source: String,

  /// Stage-level symbols, in declaration order; this is what a runtime binds buffers and uniforms against.
  pub symbols: Vec<Symbol>,

  /// Names of the hoisted functions, in definition order.
  pub functions: Vec<String>,
}

impl CompiledShader {
  pub fn symbol(&self, name: &str) -> Option<&Symbol> {
    self.symbols.iter().find(|symbol| symbol.name == name)
  }
}
