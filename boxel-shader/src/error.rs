use crate::{
  builtin::BuiltIn,
  types::{Precision, Qualifier, Stage, Type},
};
use std::fmt;
use thiserror::Error;

/// Declaration of a symbol, as recorded in the symbol table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SymbolShape {
  pub qualifier: Qualifier,
  pub ty: Type,
  pub array_length: u32,
}

impl fmt::Display for SymbolShape {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.qualifier, self.ty)?;

    if self.array_length > 0 {
      write!(f, "[{}]", self.array_length)?;
    }

    Ok(())
  }
}

/// Lowering failures.
///
/// Lowering never produces partial output: the first error aborts the pass.
#[derive(Debug, Error)]
pub enum LowerError {
  #[error("dialect `{dialect}` has no keyword for type {ty} (used by `{name}`)")]
  UnmappableType {
    dialect: String,
    name: String,
    ty: Type,
  },

  #[error("dialect `{dialect}` has no keyword for qualifier {qualifier} (parameter `{name}`)")]
  UnmappableQualifier {
    dialect: String,
    name: String,
    qualifier: Qualifier,
  },

  #[error("dialect `{dialect}` has no keyword for precision {precision:?}")]
  UnmappablePrecision {
    dialect: String,
    precision: Precision,
  },

  #[error("parameter `{name}` cannot be declared as a {qualifier} array of length {array_length}")]
  UnsupportedDeclaration {
    name: String,
    qualifier: Qualifier,
    array_length: u32,
  },

  /// Assignment to something that is not writable.
  ///
  /// Only locals, [`Qualifier::Var`] parameters, the writable built-in variables, declarations and selections of
  /// those are assignable. Uniforms ([`Qualifier::Const`]) and attributes ([`Qualifier::Let`]) are read-only.
  #[error("invalid assignment target: {0}")]
  InvalidLvalue(String),

  #[error("symbol `{name}` declared as `{first}` and as `{second}`")]
  InconsistentSymbol {
    name: String,
    first: SymbolShape,
    second: SymbolShape,
  },

  #[error("two different functions are named `{0}`")]
  InconsistentFunction(String),

  #[error("cannot convert {from} to the smaller {to}")]
  ConversionShrink { from: Type, to: Type },

  #[error("cannot infer the component count of the source converted to {0}")]
  UnknownConversionSource(Type),

  #[error("{ty} constructor expects {expected} components but was given {found}")]
  ComponentMismatch {
    ty: Type,
    expected: usize,
    found: usize,
  },

  #[error("`{fun}` expects {expected} arguments but was given {found}")]
  ArityMismatch {
    fun: String,
    expected: usize,
    found: usize,
  },

  #[error("{0} cannot be used as a value")]
  StatementInExpression(&'static str),

  #[error("built-in variable {builtin:?} is not available in the {stage} stage")]
  StageMismatch { builtin: BuiltIn, stage: Stage },

  #[error("literal {0} is not finite")]
  NonFiniteLiteral(f32),

  #[error("formatting error: {0}")]
  Fmt(#[from] fmt::Error),
}
