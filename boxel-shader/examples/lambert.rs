//! Print the shaders of a lit material, before and after a light is added to the scene.

use boxel_shader::{
  material::{LambertMaterial, LightCounts, MaterialRegistry},
  op, Dialect, Operation, Parameter, Precision, Qualifier, Shader,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let threshold = Parameter::scalar("threshold", Qualifier::Const);
  let color = Parameter::vector4("color", Qualifier::Var);

  let cutout = Shader::fragment()
    .with_precision(Precision::Medium)
    .with_operations([
      Operation::if_then(op!(color.a < threshold), vec![op!(discard())]),
      op!(boxel_shader::BuiltIn::Output = color),
    ]);
  println!("{}", cutout.compile(&Dialect::default())?.source);

  let mut registry = MaterialRegistry::default();
  registry.set_scene_light_counts(LightCounts::new(1, 0, 0));
  let lambert = registry.register(LambertMaterial::default());

  println!("{}", registry.compiled(lambert)?.fragment.source);

  registry.set_scene_light_counts(LightCounts::new(1, 2, 0));
  let compiled = registry.compiled(lambert)?;

  println!("{}", compiled.vertex.source);
  println!("{}", compiled.fragment.source);

  for symbol in &compiled.fragment.symbols {
    println!("{:?}", symbol);
  }

  Ok(())
}
