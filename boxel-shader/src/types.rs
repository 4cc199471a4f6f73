//! Types, qualifiers, stages and precisions of the shader IR.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a shader symbol or expression.
///
/// Types are _primitive_: array-ness is not part of the type but carried by the [`Parameter`] that declares it (see
/// [`Parameter::array_length`]).
///
/// > Note: matrices are expressed in column-major.
///
/// [`Parameter`]: crate::param::Parameter
/// [`Parameter::array_length`]: crate::param::Parameter::array_length
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Type {
  /// Floating scalar.
  Scalar,

  /// 2D floating vector.
  Vector2,

  /// 3D floating vector.
  Vector3,

  /// 4D floating vector.
  Vector4,

  /// Squared 2 dimension matrix.
  Matrix2,

  /// Squared 3 dimension matrix.
  Matrix3,

  /// Squared 4 dimension matrix.
  Matrix4,

  /// Boolean.
  Boolean,

  /// 2D texture sampler.
  Texture,
}

impl Type {
  /// Number of scalar components a value of this type carries.
  ///
  /// Textures are opaque and have no components.
  pub fn components(self) -> Option<usize> {
    match self {
      Type::Scalar | Type::Boolean => Some(1),
      Type::Vector2 => Some(2),
      Type::Vector3 => Some(3),
      Type::Vector4 => Some(4),
      Type::Matrix2 => Some(4),
      Type::Matrix3 => Some(9),
      Type::Matrix4 => Some(16),
      Type::Texture => None,
    }
  }

  /// Floating vector type with `n` components; `1` is [`Type::Scalar`].
  pub fn vector(n: usize) -> Option<Self> {
    match n {
      1 => Some(Type::Scalar),
      2 => Some(Type::Vector2),
      3 => Some(Type::Vector3),
      4 => Some(Type::Vector4),
      _ => None,
    }
  }

  pub fn is_vector(self) -> bool {
    matches!(self, Type::Vector2 | Type::Vector3 | Type::Vector4)
  }

  pub fn is_matrix(self) -> bool {
    matches!(self, Type::Matrix2 | Type::Matrix3 | Type::Matrix4)
  }

  /// Type of a column of a matrix, i.e. what `m[i]` yields.
  pub fn column(self) -> Option<Self> {
    match self {
      Type::Matrix2 => Some(Type::Vector2),
      Type::Matrix3 => Some(Type::Vector3),
      Type::Matrix4 => Some(Type::Vector4),
      _ => None,
    }
  }
}

impl fmt::Display for Type {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

/// Binding class of a shader symbol.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Qualifier {
  /// Read-only value, constant for a whole draw call (a _uniform_).
  Const,

  /// Per-vertex input (an _attribute_).
  Let,

  /// Per-vertex value interpolated and passed to the next stage (a _varying_).
  Var,
}

impl fmt::Display for Qualifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

/// Shader stage.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Stage {
  Vertex,
  Fragment,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

/// Floating-point precision hint of a stage.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Precision {
  Low,
  Medium,
  High,
}
