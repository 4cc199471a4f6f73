//! Keyword tables of the target shading language.

use crate::{
  builtin::BuiltIn,
  types::{Precision, Qualifier, Stage, Type},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialectError {
  #[error("invalid dialect configuration: {0}")]
  Json(#[from] serde_json::Error),
}

/// Target dialect: every keyword the lowering pass emits that depends on the shading language flavor.
///
/// The default dialect is GLSL ES 1.00, as consumed by WebGL 1. A dialect can be loaded from JSON; fields absent from
/// the JSON document keep their default value, but a table given in JSON replaces the default table entirely. A
/// lookup missing from a table is reported when lowering.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Dialect {
  pub name: String,
  pub types: BTreeMap<Type, String>,
  pub qualifiers: BTreeMap<Qualifier, String>,
  pub precisions: BTreeMap<Precision, String>,

  /// Vertex stage output.
  pub position_output: String,

  /// Fragment stage output.
  pub color_output: String,

  pub point_size: String,
  pub frag_coord: String,
  pub point_coord: String,
  pub front_facing: String,

  /// Name of the 2D texture sampling function.
  pub texture_sample: String,

  pub entry_point: String,
}

impl Default for Dialect {
  fn default() -> Self {
    Self::glsl_es_100()
  }
}

fn table<K: Ord, const N: usize>(entries: [(K, &str); N]) -> BTreeMap<K, String> {
  entries
    .into_iter()
    .map(|(k, v)| (k, v.to_owned()))
    .collect()
}

impl Dialect {
  /// GLSL ES 1.00.
  pub fn glsl_es_100() -> Self {
    Self {
      name: "glsl-es-100".to_owned(),
      types: table([
        (Type::Scalar, "float"),
        (Type::Vector2, "vec2"),
        (Type::Vector3, "vec3"),
        (Type::Vector4, "vec4"),
        (Type::Matrix2, "mat2"),
        (Type::Matrix3, "mat3"),
        (Type::Matrix4, "mat4"),
        (Type::Boolean, "bool"),
        (Type::Texture, "sampler2D"),
      ]),
      qualifiers: table([
        (Qualifier::Const, "uniform"),
        (Qualifier::Let, "attribute"),
        (Qualifier::Var, "varying"),
      ]),
      precisions: table([
        (Precision::Low, "lowp"),
        (Precision::Medium, "mediump"),
        (Precision::High, "highp"),
      ]),
      position_output: "gl_Position".to_owned(),
      color_output: "gl_FragColor".to_owned(),
      point_size: "gl_PointSize".to_owned(),
      frag_coord: "gl_FragCoord".to_owned(),
      point_coord: "gl_PointCoord".to_owned(),
      front_facing: "gl_FrontFacing".to_owned(),
      texture_sample: "texture2D".to_owned(),
      entry_point: "main".to_owned(),
    }
  }

  pub fn from_json_str(json: &str) -> Result<Self, DialectError> {
    Ok(serde_json::from_str(json)?)
  }

  pub fn to_json_string(&self) -> Result<String, DialectError> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  pub fn type_keyword(&self, ty: Type) -> Option<&str> {
    self.types.get(&ty).map(String::as_str)
  }

  pub fn qualifier_keyword(&self, qualifier: Qualifier) -> Option<&str> {
    self.qualifiers.get(&qualifier).map(String::as_str)
  }

  pub fn precision_keyword(&self, precision: Precision) -> Option<&str> {
    self.precisions.get(&precision).map(String::as_str)
  }

  /// Name of a built-in variable in the given stage.
  pub fn builtin_name(&self, builtin: BuiltIn, stage: Stage) -> &str {
    match builtin {
      BuiltIn::Output => match stage {
        Stage::Vertex => &self.position_output,
        Stage::Fragment => &self.color_output,
      },
      BuiltIn::PointSize => &self.point_size,
      BuiltIn::FragCoord => &self.frag_coord,
      BuiltIn::PointCoord => &self.point_coord,
      BuiltIn::FrontFacing => &self.front_facing,
    }
  }
}
