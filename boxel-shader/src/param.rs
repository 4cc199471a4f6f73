use crate::types::{Qualifier, Type};
use std::{
  fmt,
  sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
  },
};

/// Named, typed and qualified shader symbol.
///
/// A [`Parameter`] is a cheap handle: cloning it shares the same symbol, so the same parameter can be an operand of
/// as many operations as needed. Identity during lowering is the [`Parameter::name`]; two distinct handles sharing a
/// name must agree on type, qualifier and array length.
///
/// The array length is the only mutable part of a parameter. It is used to specialize per-light uniform arrays on the
/// number of active lights and must be set before the next lowering.
#[derive(Clone)]
pub struct Parameter {
  inner: Arc<ParameterDecl>,
}

struct ParameterDecl {
  name: String,
  ty: Type,
  qualifier: Qualifier,
  array_length: AtomicU32,
}

impl Parameter {
  /// Create a new parameter. Its array length is `0`, i.e. it is not an array.
  pub fn new(name: impl Into<String>, ty: Type, qualifier: Qualifier) -> Self {
    Self {
      inner: Arc::new(ParameterDecl {
        name: name.into(),
        ty,
        qualifier,
        array_length: AtomicU32::new(0),
      }),
    }
  }

  pub fn scalar(name: impl Into<String>, qualifier: Qualifier) -> Self {
    Self::new(name, Type::Scalar, qualifier)
  }

  pub fn vector2(name: impl Into<String>, qualifier: Qualifier) -> Self {
    Self::new(name, Type::Vector2, qualifier)
  }

  pub fn vector3(name: impl Into<String>, qualifier: Qualifier) -> Self {
    Self::new(name, Type::Vector3, qualifier)
  }

  pub fn vector4(name: impl Into<String>, qualifier: Qualifier) -> Self {
    Self::new(name, Type::Vector4, qualifier)
  }

  pub fn matrix2(name: impl Into<String>, qualifier: Qualifier) -> Self {
    Self::new(name, Type::Matrix2, qualifier)
  }

  pub fn matrix3(name: impl Into<String>, qualifier: Qualifier) -> Self {
    Self::new(name, Type::Matrix3, qualifier)
  }

  pub fn matrix4(name: impl Into<String>, qualifier: Qualifier) -> Self {
    Self::new(name, Type::Matrix4, qualifier)
  }

  pub fn texture(name: impl Into<String>, qualifier: Qualifier) -> Self {
    Self::new(name, Type::Texture, qualifier)
  }

  pub fn boolean(name: impl Into<String>, qualifier: Qualifier) -> Self {
    Self::new(name, Type::Boolean, qualifier)
  }

  /// Builder-style variant of [`Parameter::set_array_length`].
  pub fn with_array_length(self, len: u32) -> Self {
    self.set_array_length(len);
    self
  }

  pub fn name(&self) -> &str {
    &self.inner.name
  }

  pub fn ty(&self) -> Type {
    self.inner.ty
  }

  pub fn qualifier(&self) -> Qualifier {
    self.inner.qualifier
  }

  /// Number of elements if the parameter is an array, `0` otherwise.
  pub fn array_length(&self) -> u32 {
    self.inner.array_length.load(Ordering::Acquire)
  }

  /// Change the array length of the parameter, affecting every handle sharing it.
  pub fn set_array_length(&self, len: u32) {
    self.inner.array_length.store(len, Ordering::Release);
  }

  pub fn is_array(&self) -> bool {
    self.array_length() > 0
  }

  /// Whether both handles point to the very same symbol.
  pub fn ptr_eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl PartialEq for Parameter {
  fn eq(&self, other: &Self) -> bool {
    self.ptr_eq(other)
      || (self.name() == other.name()
        && self.ty() == other.ty()
        && self.qualifier() == other.qualifier()
        && self.array_length() == other.array_length())
  }
}

impl fmt::Debug for Parameter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Parameter")
      .field("name", &self.name())
      .field("ty", &self.ty())
      .field("qualifier", &self.qualifier())
      .field("array_length", &self.array_length())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn constructors() {
    let p = Parameter::vector3("normal", Qualifier::Let);

    assert_eq!(p.name(), "normal");
    assert_eq!(p.ty(), Type::Vector3);
    assert_eq!(p.qualifier(), Qualifier::Let);
    assert_eq!(p.array_length(), 0);
    assert!(!p.is_array());
  }

  #[test]
  fn array_length_is_shared() {
    let colors = Parameter::vector3("lightColors", Qualifier::Const);
    let alias = colors.clone();

    colors.set_array_length(4);

    assert_eq!(alias.array_length(), 4);
    assert!(alias.ptr_eq(&colors));
  }

  #[test]
  fn equality_by_declaration() {
    let a = Parameter::scalar("t", Qualifier::Const);
    let b = Parameter::scalar("t", Qualifier::Const);
    let c = Parameter::scalar("t", Qualifier::Var);

    assert_eq!(a, b);
    assert!(!a.ptr_eq(&b));
    assert_ne!(a, c);
  }
}
