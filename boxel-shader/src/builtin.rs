//! Built-in variables and functions of the target language.

use crate::types::{Stage, Type};

/// Built-in variables.
///
/// [`BuiltIn::Output`] is the stage output sentinel: it lowers to the clip-space position in a vertex stage and to the
/// final color in a fragment stage.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum BuiltIn {
  Output,
  PointSize,
  FragCoord,
  PointCoord,
  FrontFacing,
}

impl BuiltIn {
  pub fn ty(self) -> Type {
    match self {
      BuiltIn::Output | BuiltIn::FragCoord => Type::Vector4,
      BuiltIn::PointSize => Type::Scalar,
      BuiltIn::PointCoord => Type::Vector2,
      BuiltIn::FrontFacing => Type::Boolean,
    }
  }

  /// Whether the variable exists in the given stage.
  pub fn available_in(self, stage: Stage) -> bool {
    match self {
      BuiltIn::Output => true,
      BuiltIn::PointSize => stage == Stage::Vertex,
      BuiltIn::FragCoord | BuiltIn::PointCoord | BuiltIn::FrontFacing => stage == Stage::Fragment,
    }
  }
}

/// Built-in functions.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum BuiltInFun {
  Abs,
  Fract,
  FWidth,
  Normalize,
  Min,
  Max,
  Distance,
  Pow,
  Mix,
  Dot,
  Length,
  Clamp,
  Discard,
  Sqrt,
  Sin,
  Cos,
  Floor,
  Step,
  SmoothStep,
  Reflect,
  Cross,
  Texture2D,
}

impl BuiltInFun {
  /// Number of arguments the function takes.
  pub fn arity(self) -> usize {
    match self {
      BuiltInFun::Discard => 0,

      BuiltInFun::Abs
      | BuiltInFun::Fract
      | BuiltInFun::FWidth
      | BuiltInFun::Normalize
      | BuiltInFun::Length
      | BuiltInFun::Sqrt
      | BuiltInFun::Sin
      | BuiltInFun::Cos
      | BuiltInFun::Floor => 1,

      BuiltInFun::Min
      | BuiltInFun::Max
      | BuiltInFun::Distance
      | BuiltInFun::Pow
      | BuiltInFun::Dot
      | BuiltInFun::Step
      | BuiltInFun::Reflect
      | BuiltInFun::Cross
      | BuiltInFun::Texture2D => 2,

      BuiltInFun::Mix | BuiltInFun::Clamp | BuiltInFun::SmoothStep => 3,
    }
  }

  /// Name of the function in the target language.
  ///
  /// [`BuiltInFun::Texture2D`] is not listed here as its name depends on the dialect.
  pub fn name(self) -> &'static str {
    match self {
      BuiltInFun::Abs => "abs",
      BuiltInFun::Fract => "fract",
      BuiltInFun::FWidth => "fwidth",
      BuiltInFun::Normalize => "normalize",
      BuiltInFun::Min => "min",
      BuiltInFun::Max => "max",
      BuiltInFun::Distance => "distance",
      BuiltInFun::Pow => "pow",
      BuiltInFun::Mix => "mix",
      BuiltInFun::Dot => "dot",
      BuiltInFun::Length => "length",
      BuiltInFun::Clamp => "clamp",
      BuiltInFun::Discard => "discard",
      BuiltInFun::Sqrt => "sqrt",
      BuiltInFun::Sin => "sin",
      BuiltInFun::Cos => "cos",
      BuiltInFun::Floor => "floor",
      BuiltInFun::Step => "step",
      BuiltInFun::SmoothStep => "smoothstep",
      BuiltInFun::Reflect => "reflect",
      BuiltInFun::Cross => "cross",
      BuiltInFun::Texture2D => "texture2D",
    }
  }

  /// Result type, given the types of the arguments (`None` where unknown).
  pub fn ty(self, args: &[Option<Type>]) -> Option<Type> {
    let arg = |i: usize| args.get(i).copied().flatten();

    match self {
      BuiltInFun::Dot | BuiltInFun::Length | BuiltInFun::Distance => Some(Type::Scalar),
      BuiltInFun::Cross => Some(Type::Vector3),
      BuiltInFun::Texture2D => Some(Type::Vector4),
      BuiltInFun::Discard => None,
      BuiltInFun::Step => arg(1),
      BuiltInFun::SmoothStep => arg(2),
      _ => arg(0),
    }
  }
}
