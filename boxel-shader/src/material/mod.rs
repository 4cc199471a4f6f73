//! Material shader caches.
//!
//! A [`Material`] knows how to build the [`ShaderPair`] of its current configuration. [`MaterialShaders`] keeps the
//! compiled pair of one material and goes through the following states:
//!
//! - [`CacheState::Unbuilt`]: nothing was compiled yet.
//! - [`CacheState::Built`]: the compiled pair matches the current light counts.
//! - [`CacheState::Stale`]: the light counts changed since the pair was compiled; the pair was dropped.
//!
//! Nothing is compiled implicitly: the runtime calls [`MaterialShaders::rebuild_if_stale`] before each use, which
//! rebuilds the trees from scratch (array lengths and loop bounds included) and lowers them again.
//! [`MaterialRegistry`] does the same for a whole scene.

pub mod grid;
pub mod lambert;

pub use grid::GridMaterial;
pub use lambert::LambertMaterial;

use crate::{
  error::LowerError,
  fun::FunctionCache,
  shader::Shader,
  writer::{dialect::Dialect, CompiledShader},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use thiserror::Error;
use tracing::debug;

/// Number of active lights of each kind; the structural configuration materials specialize on.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default)]
pub struct LightCounts {
  pub directional: u32,
  pub point: u32,
  pub spot: u32,
}

impl LightCounts {
  pub fn new(directional: u32, point: u32, spot: u32) -> Self {
    Self {
      directional,
      point,
      spot,
    }
  }

  pub fn total(&self) -> u32 {
    self.directional + self.point + self.spot
  }
}

impl fmt::Display for LightCounts {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} directional, {} point, {} spot",
      self.directional, self.point, self.spot
    )
  }
}

/// Vertex and fragment stages of a material.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderPair {
  pub vertex: Shader,
  pub fragment: Shader,
}

impl ShaderPair {
  pub fn new(vertex: Shader, fragment: Shader) -> Self {
    Self { vertex, fragment }
  }

  pub fn compile(&self, dialect: &Dialect) -> Result<CompiledPair, LowerError> {
    Ok(CompiledPair {
      vertex: self.vertex.compile(dialect)?,
      fragment: self.fragment.compile(dialect)?,
    })
  }
}

/// Lowered [`ShaderPair`].
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledPair {
  pub vertex: CompiledShader,
  pub fragment: CompiledShader,
}

/// A material, building its shaders for a given light configuration.
///
/// Building must be deterministic: the same counts give the same trees, so that lowering gives the same sources.
/// Functions shared between materials should be taken from the [`FunctionCache`].
pub trait Material {
  /// Name of the material, for diagnostics.
  fn name(&self) -> &str;

  fn build(&self, lights: &LightCounts, functions: &mut FunctionCache) -> ShaderPair;
}

impl<M> Material for Box<M>
where
  M: Material + ?Sized,
{
  fn name(&self) -> &str {
    (**self).name()
  }

  fn build(&self, lights: &LightCounts, functions: &mut FunctionCache) -> ShaderPair {
    (**self).build(lights, functions)
  }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CacheState {
  Unbuilt,
  Built,
  Stale,
}

/// Compiled shaders of a single material.
#[derive(Debug)]
pub struct MaterialShaders<M> {
  material: M,
  lights: LightCounts,
  compiled: Option<CompiledPair>,
  state: CacheState,
}

impl<M> MaterialShaders<M>
where
  M: Material,
{
  pub fn new(material: M) -> Self {
    Self::with_light_counts(material, LightCounts::default())
  }

  pub fn with_light_counts(material: M, lights: LightCounts) -> Self {
    Self {
      material,
      lights,
      compiled: None,
      state: CacheState::Unbuilt,
    }
  }

  pub fn material(&self) -> &M {
    &self.material
  }

  pub fn light_counts(&self) -> LightCounts {
    self.lights
  }

  pub fn state(&self) -> CacheState {
    self.state
  }

  /// Currently compiled pair, if the cache is [`CacheState::Built`].
  pub fn compiled(&self) -> Option<&CompiledPair> {
    self.compiled.as_ref()
  }

  /// Change the light counts.
  ///
  /// Returns `true` if the counts changed, in which case a built pair is dropped and the cache becomes stale. Setting
  /// the current counts again is a no-op.
  pub fn set_light_counts(&mut self, lights: LightCounts) -> bool {
    if lights == self.lights {
      return false;
    }

    debug!(
      material = self.material.name(),
      old = %self.lights,
      new = %lights,
      "light counts changed"
    );

    self.lights = lights;
    self.invalidate();
    true
  }

  /// Drop the compiled pair, if any.
  pub fn invalidate(&mut self) {
    if self.compiled.take().is_some() {
      self.state = CacheState::Stale;
    }
  }

  /// Get the compiled pair, building and lowering it first if the cache is not [`CacheState::Built`].
  ///
  /// On error, the cache keeps its previous state and nothing is cached.
  pub fn rebuild_if_stale(
    &mut self,
    dialect: &Dialect,
    functions: &mut FunctionCache,
  ) -> Result<&CompiledPair, LowerError> {
    let compiled = match self.compiled.take() {
      Some(compiled) => compiled,

      None => {
        let compiled = self.material.build(&self.lights, functions).compile(dialect)?;

        debug!(
          material = self.material.name(),
          previous = ?self.state,
          lights = %self.lights,
          vertex_bytes = compiled.vertex.source.len(),
          fragment_bytes = compiled.fragment.source.len(),
          "rebuilt material shaders"
        );

        self.state = CacheState::Built;
        compiled
      }
    };

    Ok(self.compiled.insert(compiled))
  }
}

/// Identifier of a material in a [`MaterialRegistry`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MaterialId(u32);

impl fmt::Display for MaterialId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "material#{}", self.0)
  }
}

#[derive(Debug, Error)]
pub enum MaterialError {
  #[error("unknown material {0}")]
  UnknownMaterial(MaterialId),

  #[error("cannot lower material shaders: {0}")]
  Lower(#[from] LowerError),
}

/// Materials of a scene, along with the dialect they are lowered with and the functions they share.
pub struct MaterialRegistry {
  dialect: Dialect,
  functions: FunctionCache,
  lights: LightCounts,
  materials: BTreeMap<MaterialId, MaterialShaders<Box<dyn Material>>>,
  next_id: u32,
}

impl Default for MaterialRegistry {
  fn default() -> Self {
    Self::new(Dialect::default())
  }
}

impl MaterialRegistry {
  pub fn new(dialect: Dialect) -> Self {
    Self {
      dialect,
      functions: FunctionCache::new(),
      lights: LightCounts::default(),
      materials: BTreeMap::new(),
      next_id: 0,
    }
  }

  pub fn dialect(&self) -> &Dialect {
    &self.dialect
  }

  pub fn functions(&self) -> &FunctionCache {
    &self.functions
  }

  /// Light counts of the scene, given to newly registered materials.
  pub fn scene_light_counts(&self) -> LightCounts {
    self.lights
  }

  pub fn len(&self) -> usize {
    self.materials.len()
  }

  pub fn is_empty(&self) -> bool {
    self.materials.is_empty()
  }

  pub fn register(&mut self, material: impl Material + 'static) -> MaterialId {
    let id = MaterialId(self.next_id);
    self.next_id += 1;

    let material: Box<dyn Material> = Box::new(material);
    self
      .materials
      .insert(id, MaterialShaders::with_light_counts(material, self.lights));

    id
  }

  /// Remove a material; returns `false` if it was not registered.
  pub fn unregister(&mut self, id: MaterialId) -> bool {
    self.materials.remove(&id).is_some()
  }

  fn shaders_mut(
    &mut self,
    id: MaterialId,
  ) -> Result<&mut MaterialShaders<Box<dyn Material>>, MaterialError> {
    self
      .materials
      .get_mut(&id)
      .ok_or(MaterialError::UnknownMaterial(id))
  }

  pub fn state(&self, id: MaterialId) -> Result<CacheState, MaterialError> {
    self
      .materials
      .get(&id)
      .map(MaterialShaders::state)
      .ok_or(MaterialError::UnknownMaterial(id))
  }

  /// Change the light counts of a single material. See [`MaterialShaders::set_light_counts`].
  pub fn set_light_counts(
    &mut self,
    id: MaterialId,
    lights: LightCounts,
  ) -> Result<bool, MaterialError> {
    Ok(self.shaders_mut(id)?.set_light_counts(lights))
  }

  /// Change the light counts of the scene and of every registered material.
  ///
  /// Returns the number of materials whose counts changed.
  pub fn set_scene_light_counts(&mut self, lights: LightCounts) -> usize {
    self.lights = lights;

    self
      .materials
      .values_mut()
      .map(|shaders| shaders.set_light_counts(lights))
      .filter(|&changed| changed)
      .count()
  }

  /// Compiled pair of a material, rebuilt first if needed.
  pub fn compiled(&mut self, id: MaterialId) -> Result<&CompiledPair, MaterialError> {
    let shaders = self
      .materials
      .get_mut(&id)
      .ok_or(MaterialError::UnknownMaterial(id))?;

    Ok(shaders.rebuild_if_stale(&self.dialect, &mut self.functions)?)
  }

  /// Rebuild every material that is not built.
  pub fn rebuild_all(&mut self) -> Result<(), MaterialError> {
    for shaders in self.materials.values_mut() {
      shaders.rebuild_if_stale(&self.dialect, &mut self.functions)?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    operation::Operation,
    param::Parameter,
    types::{Qualifier, Stage},
  };
  use std::cell::Cell;

  // fragment stage sums a uniform array sized on the point light count
  #[derive(Default)]
  struct Counting {
    builds: Cell<u32>,
  }

  impl Material for Counting {
    fn name(&self) -> &str {
      "counting"
    }

    fn build(&self, lights: &LightCounts, _: &mut FunctionCache) -> ShaderPair {
      self.builds.set(self.builds.get() + 1);

      let values = Parameter::scalar("values", Qualifier::Const).with_array_length(lights.point);
      let total = Parameter::scalar("total", Qualifier::Var);

      let mut fragment = Shader::new(Stage::Fragment);
      if lights.point > 0 {
        fragment.push(Operation::add_to(&total, Operation::selection(&values, "[0]")));
      }

      ShaderPair::new(Shader::new(Stage::Vertex), fragment)
    }
  }

  #[test]
  fn state_machine() {
    let dialect = Dialect::default();
    let mut functions = FunctionCache::new();
    let mut shaders = MaterialShaders::new(Counting::default());

    assert_eq!(shaders.state(), CacheState::Unbuilt);
    assert!(shaders.compiled().is_none());

    shaders.rebuild_if_stale(&dialect, &mut functions).unwrap();
    assert_eq!(shaders.state(), CacheState::Built);
    assert_eq!(shaders.material().builds.get(), 1);

    // cached
    shaders.rebuild_if_stale(&dialect, &mut functions).unwrap();
    assert_eq!(shaders.material().builds.get(), 1);

    assert!(!shaders.set_light_counts(LightCounts::default()));
    assert_eq!(shaders.state(), CacheState::Built);

    assert!(shaders.set_light_counts(LightCounts::new(0, 2, 0)));
    assert_eq!(shaders.state(), CacheState::Stale);
    assert!(shaders.compiled().is_none());

    let compiled = shaders.rebuild_if_stale(&dialect, &mut functions).unwrap();
    assert!(compiled
      .fragment
      .source
      .contains("uniform float values[2];"));
    assert_eq!(shaders.state(), CacheState::Built);
    assert_eq!(shaders.material().builds.get(), 2);
  }

  #[test]
  fn light_counts() {
    let lights = LightCounts::new(2, 1, 3);

    assert_eq!(lights.total(), 6);
    assert_eq!(LightCounts::default().total(), 0);
    assert_eq!(lights.to_string(), "2 directional, 1 point, 3 spot");
    assert_eq!(
      serde_json::from_str::<LightCounts>(r#"{ "point": 4 }"#).unwrap(),
      LightCounts::new(0, 4, 0)
    );
  }

  #[test]
  fn unbuilt_stays_unbuilt() {
    let mut shaders = MaterialShaders::new(Counting::default());

    assert!(shaders.set_light_counts(LightCounts::new(1, 0, 0)));
    assert_eq!(shaders.state(), CacheState::Unbuilt);
  }

  #[test]
  fn registry() {
    let mut registry = MaterialRegistry::default();
    let a = registry.register(Counting::default());
    let b = registry.register(Counting::default());

    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);

    registry.rebuild_all().unwrap();
    assert_eq!(registry.state(a).unwrap(), CacheState::Built);

    assert!(registry.set_light_counts(a, LightCounts::new(0, 1, 0)).unwrap());
    assert_eq!(registry.state(a).unwrap(), CacheState::Stale);
    assert_eq!(registry.state(b).unwrap(), CacheState::Built);

    assert_eq!(registry.set_scene_light_counts(LightCounts::new(0, 1, 0)), 1);
    assert_eq!(registry.state(b).unwrap(), CacheState::Stale);

    let fragment = &registry.compiled(b).unwrap().fragment;
    assert_eq!(fragment.symbol("values").map(|s| s.array_length), Some(1));

    assert!(registry.unregister(a));
    assert!(matches!(
      registry.compiled(a),
      Err(MaterialError::UnknownMaterial(id)) if id == a
    ));
  }
}
