use boxel_shader::{
  BuiltIn, BuiltInFun, Operand, Operation, Parameter, Qualifier, ShaderFunction, Type,
};
use boxel_shader_edsl::op;
use std::sync::Arc;

#[test]
fn arithmetic_chains_are_flattened() {
  let a = Parameter::scalar("a", Qualifier::Const);
  let b = Parameter::scalar("b", Qualifier::Const);

  assert_eq!(
    op!(a + b + 1.0),
    Operation::add_all([Operand::from(&a), Operand::from(&b), Operand::from(1.)])
  );

  assert_eq!(
    op!((a - b) * 2),
    Operation::multiply(Operation::subtract(&a, &b), 2.)
  );
}

#[test]
fn mixed_operators_nest() {
  let a = Parameter::scalar("a", Qualifier::Const);
  let b = Parameter::scalar("b", Qualifier::Const);
  let c = Parameter::scalar("c", Qualifier::Const);

  assert_eq!(
    op!(a + b * c),
    Operation::add(&a, Operation::multiply(&b, &c))
  );
}

#[test]
fn comparisons_and_assignments() {
  let x = Parameter::vector3("x", Qualifier::Var);
  let t = Parameter::scalar("t", Qualifier::Const);

  assert_eq!(op!(t >= 0.5), Operation::greater_equals(&t, 0.5));
  assert_eq!(op!(x = x * t), Operation::assign(&x, Operation::multiply(&x, &t)));
  assert_eq!(op!(x += x), Operation::add_to(&x, &x));
  assert_eq!(op!(x /= 2), Operation::divide_to(&x, 2.));
}

#[test]
fn selections() {
  let color = Parameter::vector4("color", Qualifier::Var);
  let lights = Parameter::vector3("lights", Qualifier::Const).with_array_length(4);

  assert_eq!(op!(color.rgb), Operation::selection(&color, ".rgb"));
  assert_eq!(op!(lights[i]), Operation::selection(&lights, "[i]"));
  assert_eq!(op!(lights[0].x), Operation::selection(Operation::selection(&lights, "[0]"), ".x"));
}

#[test]
fn builtins_and_constructors() {
  let n = Parameter::vector3("n", Qualifier::Var);
  let l = Parameter::vector3("l", Qualifier::Const);

  assert_eq!(
    op!(max(dot(n, l), 0.0)),
    Operation::max(Operation::dot(&n, &l), 0.)
  );
  assert_eq!(op!(discard()), Operation::discard());
  assert_eq!(
    op!(vec4(n, 1)),
    Operation::vector4([Operand::from(&n), Operand::from(1.)])
  );
  assert_eq!(
    op!(texture2d(n, l)),
    Operation::builtin(BuiltInFun::Texture2D, [Operand::from(&n), Operand::from(&l)])
  );
}

#[test]
fn user_functions() {
  let x = Parameter::scalar("x", Qualifier::Const);
  let square = Arc::new(ShaderFunction::new(
    "square",
    Some(Type::Scalar),
    vec![x.clone()],
    vec![Operation::ret(Operation::multiply(&x, &x))],
  ));

  assert_eq!(op!(square(x)), Operation::call(&square, [&x]));
}

#[test]
fn leaves_and_negation() {
  let x = Parameter::scalar("x", Qualifier::Const);

  assert_eq!(op!(x), Operand::from(&x));
  assert_eq!(op!(-2), Operand::from(-2.));
  assert_eq!(op!(-x), Operation::multiply(-1., &x));
  assert_eq!(op!(BuiltIn::Output), Operand::from(BuiltIn::Output));
}
