//! Operations, the nodes of the shader IR.
//!
//! An [`Operation`] is built bottom-up from [`Operand`]s with the static factories below. Factories never look at the
//! types of their operands: a typo such as adding a texture to a matrix is accepted here and rejected by the lowering
//! pass.

use crate::{
  builtin::BuiltInFun,
  expr::{Conversion, Operand},
  fun::ShaderFunction,
  param::Parameter,
  types::Type,
};
use std::sync::Arc;

/// Assignment operators.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AssignOp {
  Assign,
  AddTo,
  SubtractTo,
  MultiplyTo,
  DivideTo,
}

impl AssignOp {
  pub fn symbol(self) -> &'static str {
    match self {
      AssignOp::Assign => "=",
      AssignOp::AddTo => "+=",
      AssignOp::SubtractTo => "-=",
      AssignOp::MultiplyTo => "*=",
      AssignOp::DivideTo => "/=",
    }
  }
}

/// Arithmetic operators.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ArithOp {
  Add,
  Subtract,
  Multiply,
  Divide,
}

impl ArithOp {
  pub fn symbol(self) -> &'static str {
    match self {
      ArithOp::Add => "+",
      ArithOp::Subtract => "-",
      ArithOp::Multiply => "*",
      ArithOp::Divide => "/",
    }
  }
}

/// Comparison operators.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompareOp {
  Equals,
  NotEquals,
  Less,
  LessEquals,
  Greater,
  GreaterEquals,
}

impl CompareOp {
  pub fn symbol(self) -> &'static str {
    match self {
      CompareOp::Equals => "==",
      CompareOp::NotEquals => "!=",
      CompareOp::Less => "<",
      CompareOp::LessEquals => "<=",
      CompareOp::Greater => ">",
      CompareOp::GreaterEquals => ">=",
    }
  }
}

/// Node of the shader IR.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
  /// `target <op> value`. The target must be a parameter, a built-in variable, a selection or a declaration.
  Assign {
    op: AssignOp,
    target: Operand,
    value: Operand,
  },

  /// First use of a local variable.
  Declare(Parameter),

  /// Left-to-right infix chain, `a + b + c`.
  Arithmetic { op: ArithOp, operands: Vec<Operand> },

  Compare {
    op: CompareOp,
    lhs: Operand,
    rhs: Operand,
  },

  /// Field, swizzle or index access; the suffix is emitted verbatim after the base.
  Selection { base: Operand, suffix: String },

  BuiltIn { fun: BuiltInFun, args: Vec<Operand> },

  If {
    condition: Operand,
    then: Vec<Operation>,
    otherwise: Option<Vec<Operation>>,
  },

  /// `for (init; condition; step)`; the header parts are verbatim target text.
  For {
    init: String,
    condition: String,
    step: String,
    body: Vec<Operation>,
  },

  Return(Option<Operand>),

  /// Invocation of a user-defined function.
  Call {
    fun: Arc<ShaderFunction>,
    args: Vec<Operand>,
  },

  /// Vector constructor concatenating the components of its operands.
  Construct { ty: Type, operands: Vec<Operand> },

  /// Vector constructor padding a single source.
  Convert(Conversion),
}

fn operands<I>(items: I) -> Vec<Operand>
where
  I: IntoIterator,
  I::Item: Into<Operand>,
{
  items.into_iter().map(Into::into).collect()
}

impl Operation {
  fn assignment(op: AssignOp, target: impl Into<Operand>, value: impl Into<Operand>) -> Self {
    Operation::Assign {
      op,
      target: target.into(),
      value: value.into(),
    }
  }

  fn arithmetic(op: ArithOp, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
    Operation::Arithmetic {
      op,
      operands: vec![lhs.into(), rhs.into()],
    }
  }

  fn compare(op: CompareOp, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
    Operation::Compare {
      op,
      lhs: lhs.into(),
      rhs: rhs.into(),
    }
  }

  pub fn assign(target: impl Into<Operand>, value: impl Into<Operand>) -> Self {
    Self::assignment(AssignOp::Assign, target, value)
  }

  pub fn add_to(target: impl Into<Operand>, value: impl Into<Operand>) -> Self {
    Self::assignment(AssignOp::AddTo, target, value)
  }

  pub fn subtract_to(target: impl Into<Operand>, value: impl Into<Operand>) -> Self {
    Self::assignment(AssignOp::SubtractTo, target, value)
  }

  pub fn multiply_to(target: impl Into<Operand>, value: impl Into<Operand>) -> Self {
    Self::assignment(AssignOp::MultiplyTo, target, value)
  }

  pub fn divide_to(target: impl Into<Operand>, value: impl Into<Operand>) -> Self {
    Self::assignment(AssignOp::DivideTo, target, value)
  }

  /// Declare a local variable. Used as the target of [`Operation::assign`], it declares and initializes it at once.
  pub fn declare(param: &Parameter) -> Self {
    Operation::Declare(param.clone())
  }

  pub fn add(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
    Self::arithmetic(ArithOp::Add, lhs, rhs)
  }

  pub fn subtract(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
    Self::arithmetic(ArithOp::Subtract, lhs, rhs)
  }

  pub fn multiply(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
    Self::arithmetic(ArithOp::Multiply, lhs, rhs)
  }

  pub fn divide(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
    Self::arithmetic(ArithOp::Divide, lhs, rhs)
  }

  /// N-ary addition, `a + b + c + …`.
  pub fn add_all<I>(items: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Operand>,
  {
    Operation::Arithmetic {
      op: ArithOp::Add,
      operands: operands(items),
    }
  }

  pub fn subtract_all<I>(items: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Operand>,
  {
    Operation::Arithmetic {
      op: ArithOp::Subtract,
      operands: operands(items),
    }
  }

  pub fn multiply_all<I>(items: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Operand>,
  {
    Operation::Arithmetic {
      op: ArithOp::Multiply,
      operands: operands(items),
    }
  }

  pub fn divide_all<I>(items: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Operand>,
  {
    Operation::Arithmetic {
      op: ArithOp::Divide,
      operands: operands(items),
    }
  }

  pub fn equals(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
    Self::compare(CompareOp::Equals, lhs, rhs)
  }

  pub fn not_equals(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
    Self::compare(CompareOp::NotEquals, lhs, rhs)
  }

  pub fn less(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
    Self::compare(CompareOp::Less, lhs, rhs)
  }

  pub fn less_equals(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
    Self::compare(CompareOp::LessEquals, lhs, rhs)
  }

  pub fn greater(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
    Self::compare(CompareOp::Greater, lhs, rhs)
  }

  pub fn greater_equals(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
    Self::compare(CompareOp::GreaterEquals, lhs, rhs)
  }

  /// Field or swizzle access (`.xyz`, `.a`) or indexing (`[i]`).
  pub fn selection(base: impl Into<Operand>, suffix: impl Into<String>) -> Self {
    Operation::Selection {
      base: base.into(),
      suffix: suffix.into(),
    }
  }

  /// Call to a built-in function with arbitrary arguments. Arity is checked when lowering.
  pub fn builtin<I>(fun: BuiltInFun, args: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Operand>,
  {
    Operation::BuiltIn {
      fun,
      args: operands(args),
    }
  }

  fn builtin_call(fun: BuiltInFun, args: Vec<Operand>) -> Self {
    Operation::BuiltIn { fun, args }
  }

  pub fn abs(x: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Abs, vec![x.into()])
  }

  pub fn fract(x: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Fract, vec![x.into()])
  }

  pub fn fwidth(x: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::FWidth, vec![x.into()])
  }

  pub fn normalize(x: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Normalize, vec![x.into()])
  }

  pub fn min(a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Min, vec![a.into(), b.into()])
  }

  pub fn max(a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Max, vec![a.into(), b.into()])
  }

  pub fn distance(a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Distance, vec![a.into(), b.into()])
  }

  pub fn pow(x: impl Into<Operand>, y: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Pow, vec![x.into(), y.into()])
  }

  pub fn mix(a: impl Into<Operand>, b: impl Into<Operand>, t: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Mix, vec![a.into(), b.into(), t.into()])
  }

  pub fn dot(a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Dot, vec![a.into(), b.into()])
  }

  pub fn length(x: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Length, vec![x.into()])
  }

  pub fn clamp(x: impl Into<Operand>, lo: impl Into<Operand>, hi: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Clamp, vec![x.into(), lo.into(), hi.into()])
  }

  pub fn discard() -> Self {
    Self::builtin_call(BuiltInFun::Discard, Vec::new())
  }

  pub fn sqrt(x: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Sqrt, vec![x.into()])
  }

  pub fn sin(x: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Sin, vec![x.into()])
  }

  pub fn cos(x: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Cos, vec![x.into()])
  }

  pub fn floor(x: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Floor, vec![x.into()])
  }

  pub fn step(edge: impl Into<Operand>, x: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Step, vec![edge.into(), x.into()])
  }

  pub fn smoothstep(
    edge0: impl Into<Operand>,
    edge1: impl Into<Operand>,
    x: impl Into<Operand>,
  ) -> Self {
    Self::builtin_call(BuiltInFun::SmoothStep, vec![edge0.into(), edge1.into(), x.into()])
  }

  pub fn reflect(i: impl Into<Operand>, n: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Reflect, vec![i.into(), n.into()])
  }

  pub fn cross(a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Cross, vec![a.into(), b.into()])
  }

  /// Sample a 2D texture.
  pub fn texture2d(sampler: impl Into<Operand>, uv: impl Into<Operand>) -> Self {
    Self::builtin_call(BuiltInFun::Texture2D, vec![sampler.into(), uv.into()])
  }

  pub fn if_then(condition: impl Into<Operand>, then: Vec<Operation>) -> Self {
    Operation::If {
      condition: condition.into(),
      then,
      otherwise: None,
    }
  }

  pub fn if_else(
    condition: impl Into<Operand>,
    then: Vec<Operation>,
    otherwise: Vec<Operation>,
  ) -> Self {
    Operation::If {
      condition: condition.into(),
      then,
      otherwise: Some(otherwise),
    }
  }

  pub fn for_loop(
    init: impl Into<String>,
    condition: impl Into<String>,
    step: impl Into<String>,
    body: Vec<Operation>,
  ) -> Self {
    Operation::For {
      init: init.into(),
      condition: condition.into(),
      step: step.into(),
      body,
    }
  }

  /// `for (int counter = 0; counter < count; counter++)`.
  ///
  /// The count is baked into the loop header, so the operation must be rebuilt when it changes.
  pub fn for_count(counter: &str, count: u32, body: Vec<Operation>) -> Self {
    Self::for_loop(
      format!("int {} = 0", counter),
      format!("{} < {}", counter, count),
      format!("{}++", counter),
      body,
    )
  }

  pub fn ret(value: impl Into<Operand>) -> Self {
    Operation::Return(Some(value.into()))
  }

  pub fn ret_void() -> Self {
    Operation::Return(None)
  }

  /// Invoke a user-defined function. Its definition is hoisted the first time it is referenced.
  pub fn call<I>(fun: &Arc<ShaderFunction>, args: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Operand>,
  {
    Operation::Call {
      fun: Arc::clone(fun),
      args: operands(args),
    }
  }

  pub fn to_vector2(source: impl Into<Operand>, pad: f32) -> Self {
    Operation::Convert(Conversion::new(source, Type::Vector2, pad))
  }

  pub fn to_vector3(source: impl Into<Operand>, pad: f32) -> Self {
    Operation::Convert(Conversion::new(source, Type::Vector3, pad))
  }

  pub fn to_vector4(source: impl Into<Operand>, pad: f32) -> Self {
    Operation::Convert(Conversion::new(source, Type::Vector4, pad))
  }

  pub fn vector2<I>(items: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Operand>,
  {
    Operation::Construct {
      ty: Type::Vector2,
      operands: operands(items),
    }
  }

  pub fn vector3<I>(items: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Operand>,
  {
    Operation::Construct {
      ty: Type::Vector3,
      operands: operands(items),
    }
  }

  pub fn vector4<I>(items: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Operand>,
  {
    Operation::Construct {
      ty: Type::Vector4,
      operands: operands(items),
    }
  }

  /// Whether the operation renders as an infix expression, requiring parentheses when nested.
  pub fn is_infix(&self) -> bool {
    matches!(
      self,
      Operation::Assign { .. } | Operation::Arithmetic { .. } | Operation::Compare { .. }
    )
  }

  /// Inferred result type, if it can be known statically.
  pub fn ty(&self) -> Option<Type> {
    match self {
      Operation::Assign { target, .. } => target.ty(),
      Operation::Declare(param) => Some(param.ty()),
      Operation::Arithmetic { operands, .. } => arithmetic_ty(operands),
      Operation::Compare { .. } => Some(Type::Boolean),
      Operation::Selection { base, suffix } => selection_ty(base, suffix),
      Operation::BuiltIn { fun, args } => {
        let tys = args.iter().map(Operand::ty).collect::<Vec<_>>();
        fun.ty(&tys)
      }
      Operation::If { .. } | Operation::For { .. } | Operation::Return(_) => None,
      Operation::Call { fun, .. } => fun.return_type,
      Operation::Construct { ty, .. } => Some(*ty),
      Operation::Convert(conversion) => Some(conversion.target),
    }
  }
}

// vectors win over matrices (m * v is a vector), matrices over scalars
fn arithmetic_ty(operands: &[Operand]) -> Option<Type> {
  let tys = operands
    .iter()
    .map(Operand::ty)
    .collect::<Option<Vec<_>>>()?;

  tys
    .iter()
    .copied()
    .filter(|ty| ty.is_vector())
    .max_by_key(|ty| ty.components())
    .or_else(|| tys.iter().copied().find(|ty| ty.is_matrix()))
    .or_else(|| tys.first().copied())
}

const SWIZZLE_CHARS: &str = "xyzwrgbastpq";

fn selection_ty(base: &Operand, suffix: &str) -> Option<Type> {
  let base_ty = base.ty()?;

  if let Some(fields) = suffix.strip_prefix('.') {
    let is_swizzle = !fields.is_empty() && fields.chars().all(|c| SWIZZLE_CHARS.contains(c));

    if base_ty.is_vector() && is_swizzle {
      Type::vector(fields.len())
    } else {
      None
    }
  } else if suffix.starts_with('[') && suffix.ends_with(']') {
    match base.as_param() {
      Some(param) if param.is_array() => Some(param.ty()),
      _ if base_ty.is_matrix() => base_ty.column(),
      _ if base_ty.is_vector() => Some(Type::Scalar),
      _ => None,
    }
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{builtin::BuiltIn, expr::Literal, types::Qualifier};

  #[test]
  fn binary_factories() {
    let a = Parameter::scalar("a", Qualifier::Const);

    assert_eq!(
      Operation::add(&a, 1),
      Operation::Arithmetic {
        op: ArithOp::Add,
        operands: vec![
          Operand::Param(a.clone()),
          Operand::Literal(Literal::Scalar(1.))
        ],
      }
    );

    assert_eq!(
      Operation::add_all([Operand::from(1), Operand::from(2), Operand::from(3)]),
      Operation::Arithmetic {
        op: ArithOp::Add,
        operands: vec![1.into(), 2.into(), 3.into()],
      }
    );
  }

  #[test]
  fn assignment_target_is_kept() {
    let x = Parameter::vector3("x", Qualifier::Var);
    let op = Operation::multiply_to(&x, 2.);

    match op {
      Operation::Assign { op, target, .. } => {
        assert_eq!(op, AssignOp::MultiplyTo);
        assert_eq!(target.as_param(), Some(&x));
      }
      _ => panic!("expected an assignment"),
    }
  }

  #[test]
  fn arithmetic_inference() {
    let m = Parameter::matrix4("projection", Qualifier::Const);
    let v = Parameter::vector4("position", Qualifier::Let);
    let s = Parameter::scalar("scale", Qualifier::Const);

    assert_eq!(Operation::multiply(&m, &v).ty(), Some(Type::Vector4));
    assert_eq!(Operation::multiply(&m, &m).ty(), Some(Type::Matrix4));
    assert_eq!(Operation::multiply(&s, &v).ty(), Some(Type::Vector4));
    assert_eq!(Operation::add(&s, 1).ty(), Some(Type::Scalar));
    assert_eq!(Operation::add(&s, Operand::raw("k")).ty(), None);
    assert_eq!(Operation::less(&s, 1).ty(), Some(Type::Boolean));
  }

  #[test]
  fn selection_inference() {
    let color = Parameter::vector4("color", Qualifier::Var);
    let lights = Parameter::vector3("lights", Qualifier::Const).with_array_length(4);
    let model = Parameter::matrix3("model", Qualifier::Const);

    assert_eq!(Operation::selection(&color, ".rgb").ty(), Some(Type::Vector3));
    assert_eq!(Operation::selection(&color, ".a").ty(), Some(Type::Scalar));
    assert_eq!(Operation::selection(&lights, "[i]").ty(), Some(Type::Vector3));
    assert_eq!(Operation::selection(&model, "[0]").ty(), Some(Type::Vector3));
    assert_eq!(Operation::selection(&color, ".nope").ty(), None);
  }

  #[test]
  fn conversion_inference() {
    let normal = Parameter::vector3("normal", Qualifier::Let);

    assert_eq!(Operation::to_vector4(&normal, 0.).ty(), Some(Type::Vector4));
    assert_eq!(
      Operation::vector4([Operand::from(&normal), Operand::from(1.)]).ty(),
      Some(Type::Vector4)
    );
    assert_eq!(Operand::from(BuiltIn::Output).ty(), Some(Type::Vector4));
  }

  #[test]
  fn for_count_header() {
    assert_eq!(
      Operation::for_count("i", 3, Vec::new()),
      Operation::For {
        init: "int i = 0".to_owned(),
        condition: "i < 3".to_owned(),
        step: "i++".to_owned(),
        body: Vec::new(),
      }
    );
  }
}
