//! Diffuse material lit by directional, point and spot lights.
//!
//! Per-light data is uploaded as uniform arrays, one per light property, sized on the light counts of the material.
//! Kinds of lights with no active light are left out of the fragment stage entirely.

use crate::{
  builtin::BuiltIn,
  expr::Operand,
  fun::{FunctionCache, ShaderFunction},
  material::{LightCounts, Material, ShaderPair},
  operation::Operation,
  param::Parameter,
  shader::Shader,
  types::{Precision, Qualifier, Type},
};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct LambertMaterial {
  name: String,
  precision: Precision,
}

impl Default for LambertMaterial {
  fn default() -> Self {
    Self::new("lambert")
  }
}

impl LambertMaterial {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      precision: Precision::Medium,
    }
  }

  pub fn with_precision(mut self, precision: Precision) -> Self {
    self.precision = precision;
    self
  }
}

/// Attributes, uniforms and varyings shared by the vertex stages of the materials.
pub(crate) struct Transform {
  pub position: Parameter,
  pub model: Parameter,
  pub view: Parameter,
  pub projection: Parameter,
}

impl Transform {
  pub fn new() -> Self {
    Self {
      position: Parameter::vector3("position", Qualifier::Let),
      model: Parameter::matrix4("model", Qualifier::Const),
      view: Parameter::matrix4("view", Qualifier::Const),
      projection: Parameter::matrix4("projection", Qualifier::Const),
    }
  }

  /// `gl_Position = projection * view * model * vec4(position, 1.0)`.
  pub fn project(&self) -> Operation {
    Operation::assign(
      BuiltIn::Output,
      Operation::multiply_all([
        Operand::from(&self.projection),
        Operand::from(&self.view),
        Operand::from(&self.model),
        Operand::from(Operation::to_vector4(&self.position, 1.)),
      ]),
    )
  }
}

fn vec3_array(name: &str, len: u32) -> Parameter {
  Parameter::vector3(name, Qualifier::Const).with_array_length(len)
}

fn zero_vec3() -> Operand {
  Operand::from([0f32, 0., 0.])
}

/// `dot(normal, direction)` clamped to zero.
fn diffuse(normal: &Parameter, direction: impl Into<Operand>) -> Operation {
  Operation::max(Operation::dot(normal, direction), 0.)
}

fn at(array: &Parameter) -> Operation {
  Operation::selection(array, "[i]")
}

/// `vec3 directionalLighting(vec3 normal, vec3 directions[n], vec3 colors[n])`.
///
/// Directions point from the surface towards the lights.
fn directional_lighting(count: u32) -> ShaderFunction {
  let normal = Parameter::vector3("normal", Qualifier::Const);
  let directions = vec3_array("directions", count);
  let colors = vec3_array("colors", count);
  let sum = Parameter::vector3("sum", Qualifier::Var);

  ShaderFunction::new(
    "directionalLighting",
    Some(Type::Vector3),
    vec![normal.clone(), directions.clone(), colors.clone()],
    vec![
      Operation::assign(Operation::declare(&sum), zero_vec3()),
      Operation::for_count(
        "i",
        count,
        vec![Operation::add_to(
          &sum,
          Operation::multiply(at(&colors), diffuse(&normal, at(&directions))),
        )],
      ),
      Operation::ret(&sum),
    ],
  )
}

/// `vec3 pointLighting(vec3 normal, vec3 position, vec3 positions[n], vec3 colors[n])`.
fn point_lighting(count: u32) -> ShaderFunction {
  let normal = Parameter::vector3("normal", Qualifier::Const);
  let position = Parameter::vector3("position", Qualifier::Const);
  let positions = vec3_array("positions", count);
  let colors = vec3_array("colors", count);
  let sum = Parameter::vector3("sum", Qualifier::Var);
  let to_light = Parameter::vector3("toLight", Qualifier::Var);
  let attenuation = Parameter::scalar("attenuation", Qualifier::Var);

  ShaderFunction::new(
    "pointLighting",
    Some(Type::Vector3),
    vec![
      normal.clone(),
      position.clone(),
      positions.clone(),
      colors.clone(),
    ],
    vec![
      Operation::assign(Operation::declare(&sum), zero_vec3()),
      Operation::for_count(
        "i",
        count,
        vec![
          Operation::assign(
            Operation::declare(&to_light),
            Operation::subtract(at(&positions), &position),
          ),
          Operation::assign(
            Operation::declare(&attenuation),
            Operation::divide(1., Operation::add(1., Operation::dot(&to_light, &to_light))),
          ),
          Operation::add_to(
            &sum,
            Operation::multiply_all([
              Operand::from(at(&colors)),
              Operand::from(diffuse(&normal, Operation::normalize(&to_light))),
              Operand::from(&attenuation),
            ]),
          ),
        ],
      ),
      Operation::ret(&sum),
    ],
  )
}

/// `vec3 spotLighting(vec3 normal, vec3 position, vec3 positions[n], vec3 directions[n], vec3 colors[n],
/// float cutoffs[n])`.
///
/// Directions point from the lights towards the scene; cutoffs are cosines of the cone half angles.
fn spot_lighting(count: u32) -> ShaderFunction {
  let normal = Parameter::vector3("normal", Qualifier::Const);
  let position = Parameter::vector3("position", Qualifier::Const);
  let positions = vec3_array("positions", count);
  let directions = vec3_array("directions", count);
  let colors = vec3_array("colors", count);
  let cutoffs = Parameter::scalar("cutoffs", Qualifier::Const).with_array_length(count);
  let sum = Parameter::vector3("sum", Qualifier::Var);
  let facing = Parameter::scalar("facing", Qualifier::Var);

  ShaderFunction::new(
    "spotLighting",
    Some(Type::Vector3),
    vec![
      normal.clone(),
      position.clone(),
      positions.clone(),
      directions.clone(),
      colors.clone(),
      cutoffs.clone(),
    ],
    vec![
      Operation::assign(Operation::declare(&sum), zero_vec3()),
      Operation::for_count(
        "i",
        count,
        vec![
          Operation::assign(
            Operation::declare(&facing),
            Operation::dot(
              Operation::normalize(Operation::subtract(&position, at(&positions))),
              at(&directions),
            ),
          ),
          Operation::if_then(
            Operation::greater(&facing, at(&cutoffs)),
            vec![Operation::add_to(
              &sum,
              Operation::multiply(
                at(&colors),
                diffuse(
                  &normal,
                  Operation::normalize(Operation::subtract(at(&positions), &position)),
                ),
              ),
            )],
          ),
        ],
      ),
      Operation::ret(&sum),
    ],
  )
}

fn lighting(
  functions: &mut FunctionCache,
  kind: &str,
  count: u32,
  build: fn(u32) -> ShaderFunction,
) -> Arc<ShaderFunction> {
  functions.get_or_insert_with(&format!("{}_lighting/{}", kind, count), || build(count))
}

impl Material for LambertMaterial {
  fn name(&self) -> &str {
    &self.name
  }

  fn build(&self, lights: &LightCounts, functions: &mut FunctionCache) -> ShaderPair {
    let transform = Transform::new();
    let normal = Parameter::vector3("normal", Qualifier::Let);
    let v_normal = Parameter::vector3("vNormal", Qualifier::Var);
    let v_world_position = Parameter::vector3("vWorldPosition", Qualifier::Var);

    let vertex = Shader::vertex().with_operations([
      Operation::assign(
        &v_world_position,
        Operation::selection(
          Operation::multiply(&transform.model, Operation::to_vector4(&transform.position, 1.)),
          ".xyz",
        ),
      ),
      Operation::assign(
        &v_normal,
        Operation::selection(
          Operation::multiply(&transform.model, Operation::to_vector4(&normal, 0.)),
          ".xyz",
        ),
      ),
      transform.project(),
    ]);

    let base_color = Parameter::vector3("baseColor", Qualifier::Const);
    let ambient = Parameter::vector3("ambientColor", Qualifier::Const);
    let n = Parameter::vector3("n", Qualifier::Var);
    let light = Parameter::vector3("light", Qualifier::Var);

    let mut fragment = Shader::fragment()
      .with_precision(self.precision)
      .with_operations([
        Operation::assign(Operation::declare(&n), Operation::normalize(&v_normal)),
        Operation::assign(Operation::declare(&light), &ambient),
      ]);

    if lights.directional > 0 {
      let fun = lighting(functions, "directional", lights.directional, directional_lighting);

      fragment.push(Operation::add_to(
        &light,
        Operation::call(
          &fun,
          [
            Operand::from(&n),
            Operand::from(vec3_array("directionalDirections", lights.directional)),
            Operand::from(vec3_array("directionalColors", lights.directional)),
          ],
        ),
      ));
    }

    if lights.point > 0 {
      let fun = lighting(functions, "point", lights.point, point_lighting);

      fragment.push(Operation::add_to(
        &light,
        Operation::call(
          &fun,
          [
            Operand::from(&n),
            Operand::from(&v_world_position),
            Operand::from(vec3_array("pointPositions", lights.point)),
            Operand::from(vec3_array("pointColors", lights.point)),
          ],
        ),
      ));
    }

    if lights.spot > 0 {
      let fun = lighting(functions, "spot", lights.spot, spot_lighting);

      fragment.push(Operation::add_to(
        &light,
        Operation::call(
          &fun,
          [
            Operand::from(&n),
            Operand::from(&v_world_position),
            Operand::from(vec3_array("spotPositions", lights.spot)),
            Operand::from(vec3_array("spotDirections", lights.spot)),
            Operand::from(vec3_array("spotColors", lights.spot)),
            Operand::from(
              Parameter::scalar("spotCutoffs", Qualifier::Const).with_array_length(lights.spot),
            ),
          ],
        ),
      ));
    }

    fragment.push(Operation::assign(
      BuiltIn::Output,
      Operation::to_vector4(Operation::multiply(&base_color, &light), 1.),
    ));

    ShaderPair::new(vertex, fragment)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::writer::dialect::Dialect;

  fn compile(lights: LightCounts) -> crate::material::CompiledPair {
    LambertMaterial::default()
      .build(&lights, &mut FunctionCache::new())
      .compile(&Dialect::default())
      .unwrap()
  }

  #[test]
  fn unlit() {
    let pair = compile(LightCounts::default());

    assert!(pair.fragment.functions.is_empty());
    assert!(pair
      .fragment
      .source
      .contains("  gl_FragColor = vec4(baseColor * light, 1.0);\n"));
    assert!(pair.vertex.source.contains(
      "  gl_Position = projection * view * model * vec4(position, 1.0);\n"
    ));
  }

  #[test]
  fn specialized_on_light_counts() {
    let pair = compile(LightCounts::new(2, 0, 3));
    let source = &pair.fragment.source;

    assert_eq!(pair.fragment.functions, ["directionalLighting", "spotLighting"]);
    assert!(source.contains("uniform vec3 directionalDirections[2];\n"));
    assert!(source.contains("uniform float spotCutoffs[3];\n"));
    assert!(source.contains("for (int i = 0; i < 2; i++) {"));
    assert!(source.contains("for (int i = 0; i < 3; i++) {"));
    assert!(!source.contains("pointLighting"));

    // function parameters stay local
    assert!(pair.fragment.symbol("colors").is_none());
  }

  #[test]
  fn lighting_functions_are_memoized() {
    let material = LambertMaterial::default();
    let mut functions = FunctionCache::new();

    material.build(&LightCounts::new(1, 1, 0), &mut functions);
    material.build(&LightCounts::new(1, 2, 0), &mut functions);

    assert_eq!(functions.misses(), 3);
    assert_eq!(functions.hits(), 1);
  }
}
