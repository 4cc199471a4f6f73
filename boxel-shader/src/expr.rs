use crate::{
  builtin::BuiltIn,
  operation::Operation,
  param::Parameter,
  types::Type,
};

/// Literal value inlined in the shader source.
///
/// Matrices are stored column-major, like the target language expects them.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
  Scalar(f32),
  Vector2([f32; 2]),
  Vector3([f32; 3]),
  Vector4([f32; 4]),
  Matrix2([f32; 4]),
  Matrix3([f32; 9]),
  Matrix4([f32; 16]),
  Boolean(bool),
}

impl Literal {
  pub fn ty(&self) -> Type {
    match self {
      Literal::Scalar(_) => Type::Scalar,
      Literal::Vector2(_) => Type::Vector2,
      Literal::Vector3(_) => Type::Vector3,
      Literal::Vector4(_) => Type::Vector4,
      Literal::Matrix2(_) => Type::Matrix2,
      Literal::Matrix3(_) => Type::Matrix3,
      Literal::Matrix4(_) => Type::Matrix4,
      Literal::Boolean(_) => Type::Boolean,
    }
  }
}

/// Operand of an [`Operation`].
///
/// Operands are untyped at construction; the lowering pass infers and checks types where it needs them.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
  /// A symbol, hoisted as a declaration unless it is local to the enclosing body.
  Param(Parameter),

  /// An inlined literal.
  Literal(Literal),

  /// A built-in variable, such as the stage output.
  BuiltIn(BuiltIn),

  /// A nested operation.
  Op(Box<Operation>),

  /// Verbatim target text, e.g. a loop counter introduced by a `for` header.
  Raw(String),
}

impl Operand {
  pub fn raw(text: impl Into<String>) -> Self {
    Operand::Raw(text.into())
  }

  /// Inferred type of the operand, if it can be known statically.
  pub fn ty(&self) -> Option<Type> {
    match self {
      Operand::Param(param) => Some(param.ty()),
      Operand::Literal(lit) => Some(lit.ty()),
      Operand::BuiltIn(builtin) => Some(builtin.ty()),
      Operand::Op(op) => op.ty(),
      Operand::Raw(_) => None,
    }
  }

  /// Parameter behind this operand, if any.
  pub fn as_param(&self) -> Option<&Parameter> {
    match self {
      Operand::Param(param) => Some(param),
      _ => None,
    }
  }
}

impl From<Parameter> for Operand {
  fn from(param: Parameter) -> Self {
    Operand::Param(param)
  }
}

impl<'a> From<&'a Parameter> for Operand {
  fn from(param: &'a Parameter) -> Self {
    Operand::Param(param.clone())
  }
}

impl From<Operation> for Operand {
  fn from(op: Operation) -> Self {
    Operand::Op(Box::new(op))
  }
}

impl<'a> From<&'a Operation> for Operand {
  fn from(op: &'a Operation) -> Self {
    Operand::Op(Box::new(op.clone()))
  }
}

impl<'a> From<&'a Operand> for Operand {
  fn from(operand: &'a Operand) -> Self {
    operand.clone()
  }
}

impl From<BuiltIn> for Operand {
  fn from(builtin: BuiltIn) -> Self {
    Operand::BuiltIn(builtin)
  }
}

impl From<Literal> for Operand {
  fn from(lit: Literal) -> Self {
    Operand::Literal(lit)
  }
}

impl From<f32> for Operand {
  fn from(x: f32) -> Self {
    Operand::Literal(Literal::Scalar(x))
  }
}

impl From<f64> for Operand {
  fn from(x: f64) -> Self {
    Operand::Literal(Literal::Scalar(x as f32))
  }
}

// integral numbers are float literals in the target language
impl From<i32> for Operand {
  fn from(x: i32) -> Self {
    Operand::Literal(Literal::Scalar(x as f32))
  }
}

impl From<bool> for Operand {
  fn from(x: bool) -> Self {
    Operand::Literal(Literal::Boolean(x))
  }
}

impl From<[f32; 2]> for Operand {
  fn from(a: [f32; 2]) -> Self {
    Operand::Literal(Literal::Vector2(a))
  }
}

impl From<[f32; 3]> for Operand {
  fn from(a: [f32; 3]) -> Self {
    Operand::Literal(Literal::Vector3(a))
  }
}

impl From<[f32; 4]> for Operand {
  fn from(a: [f32; 4]) -> Self {
    Operand::Literal(Literal::Vector4(a))
  }
}

/// Coercion of an operand to a larger vector type.
///
/// The source is wrapped in a constructor call of the target type, followed by as many copies of the pad value as
/// there are missing components.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
  pub source: Operand,
  pub target: Type,
  pub pad: f32,
}

impl Conversion {
  pub fn new(source: impl Into<Operand>, target: Type, pad: f32) -> Self {
    Self {
      source: source.into(),
      target,
      pad,
    }
  }

  /// Number of pad values to append, or `None` if the source or target component count is unknown.
  ///
  /// The count saturates at `0`; a shrinking conversion is rejected by the lowering pass, not here.
  pub fn missing_value_count(&self) -> Option<usize> {
    let source = self.source.ty()?.components()?;
    let target = self.target.components()?;
    Some(target.saturating_sub(source))
  }
}
