//! Unlit voxel material drawing anti-aliased lines along the edges of the voxel grid.

use crate::{
  builtin::BuiltIn,
  fun::FunctionCache,
  material::{lambert::Transform, LightCounts, Material, ShaderPair},
  operation::Operation,
  param::Parameter,
  shader::Shader,
  types::{Precision, Qualifier},
};

#[derive(Clone, Debug)]
pub struct GridMaterial {
  name: String,
}

impl Default for GridMaterial {
  fn default() -> Self {
    Self::new("grid")
  }
}

impl GridMaterial {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }
}

impl Material for GridMaterial {
  fn name(&self) -> &str {
    &self.name
  }

  // lights do not affect the grid
  fn build(&self, _: &LightCounts, _: &mut FunctionCache) -> ShaderPair {
    let transform = Transform::new();
    let v_position = Parameter::vector3("vPosition", Qualifier::Var);

    let vertex = Shader::vertex().with_operations([
      Operation::assign(&v_position, &transform.position),
      transform.project(),
    ]);

    let color = Parameter::vector4("color", Qualifier::Const);
    let line_color = Parameter::vector4("lineColor", Qualifier::Const);
    let line_width = Parameter::scalar("lineWidth", Qualifier::Const);
    let alpha_threshold = Parameter::scalar("alphaThreshold", Qualifier::Const);

    let cell = Parameter::vector3("cell", Qualifier::Var);
    let line = Parameter::scalar("line", Qualifier::Var);
    let result = Parameter::vector4("result", Qualifier::Var);

    // distance to the closest grid edge, in pixels
    let edge_distance = Operation::divide(
      Operation::abs(Operation::subtract(
        Operation::fract(Operation::subtract(&v_position, 0.5)),
        0.5,
      )),
      Operation::fwidth(&v_position),
    );

    let fragment = Shader::fragment()
      .with_precision(Precision::Medium)
      .with_operations([
        Operation::assign(Operation::declare(&cell), edge_distance),
        Operation::assign(
          Operation::declare(&line),
          Operation::min(
            Operation::min(
              Operation::selection(&cell, ".x"),
              Operation::selection(&cell, ".y"),
            ),
            Operation::selection(&cell, ".z"),
          ),
        ),
        Operation::assign(
          Operation::declare(&result),
          Operation::mix(
            &line_color,
            &color,
            Operation::min(Operation::divide(&line, &line_width), 1.),
          ),
        ),
        Operation::if_then(
          Operation::less(Operation::selection(&result, ".a"), &alpha_threshold),
          vec![Operation::discard()],
        ),
        Operation::assign(BuiltIn::Output, &result),
      ]);

    ShaderPair::new(vertex, fragment)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::writer::dialect::Dialect;
  use pretty_assertions::assert_eq;

  #[test]
  fn fragment_source() {
    let pair = GridMaterial::default()
      .build(&LightCounts::default(), &mut FunctionCache::new())
      .compile(&Dialect::default())
      .unwrap();

    assert_eq!(
      pair.fragment.source,
      "precision mediump float;
varying vec3 vPosition;
uniform vec4 lineColor;
uniform vec4 color;
uniform float lineWidth;
uniform float alphaThreshold;

void main() {
  vec3 cell = abs(fract(vPosition - 0.5) - 0.5) / fwidth(vPosition);
  float line = min(min(cell.x, cell.y), cell.z);
  vec4 result = mix(lineColor, color, min(line / lineWidth, 1.0));
  if (result.a < alphaThreshold) {
    discard;
  }
  gl_FragColor = result;
}
"
    );
  }

  #[test]
  fn ignores_lights() {
    let material = GridMaterial::default();
    let mut functions = FunctionCache::new();

    assert_eq!(
      material.build(&LightCounts::default(), &mut functions),
      material.build(&LightCounts::new(4, 4, 4), &mut functions)
    );
  }
}
