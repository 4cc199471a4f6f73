//! Boxel shader, a small shader compiler for voxel scene materials.
//!
//! Materials do not ship shader text. They build the body of each stage as a tree of [`Operation`]s over
//! [`Parameter`]s, and a lowering pass turns that tree into shading language source, along with the list of symbols
//! the stage declares so that a runtime can bind its uniforms and attributes by name.
//!
//! # The IR
//!
//! - A [`Parameter`] is a named, typed, qualified symbol: an attribute ([`Qualifier::Let`]), a uniform
//!   ([`Qualifier::Const`]) or a varying ([`Qualifier::Var`]). Uniforms can be arrays.
//! - An [`Operation`] is a node: assignment, arithmetic, comparison, selection, built-in call, control flow, user
//!   function call or vector construction. Its operands are [`Operand`]s: parameters, literals, built-in variables or
//!   nested operations.
//! - A [`ShaderFunction`] is a named, reusable body, hoisted into the stage the first time it is called.
//! - A [`Shader`] is the ordered body of one stage.
//!
//! The IR is not typed at construction. Types are inferred and checked when lowering, and every inconsistency is
//! reported as a [`LowerError`].
//!
//! ```
//! use boxel_shader::{Dialect, Operation, Parameter, Precision, Qualifier, Shader};
//!
//! let threshold = Parameter::scalar("threshold", Qualifier::Const);
//! let shader = Shader::fragment()
//!   .with_precision(Precision::Medium)
//!   .with_operations([Operation::if_then(
//!     Operation::greater(&threshold, 0),
//!     vec![Operation::discard()],
//!   )]);
//!
//! let compiled = shader.compile(&Dialect::default()).unwrap();
//! assert_eq!(compiled.symbols[0].name, "threshold");
//! ```
//!
//! # Specialization
//!
//! The array length of a uniform is shared by every clone of its [`Parameter`] and can be changed in place. Lowering
//! the same tree again picks the new length up. Loop bounds baked with [`Operation::for_count`] are not, so materials
//! rebuild their trees instead; see the [`material`] module.
//!
//! # Dialects
//!
//! Keywords of the target language come from a [`Dialect`], which defaults to GLSL ES 1.00 and can be loaded from JSON.

pub mod builtin;
pub mod error;
pub mod expr;
pub mod fun;
pub mod material;
pub mod operation;
pub mod param;
pub mod shader;
pub mod symbol;
pub mod types;
pub mod writer;

pub use builtin::{BuiltIn, BuiltInFun};
pub use error::LowerError;
pub use expr::{Conversion, Literal, Operand};
pub use fun::{FunctionCache, ShaderFunction};
pub use operation::{ArithOp, AssignOp, CompareOp, Operation};
pub use param::Parameter;
pub use shader::Shader;
pub use symbol::{Symbol, SymbolTable};
pub use types::{Precision, Qualifier, Stage, Type};
pub use writer::{
  dialect::{Dialect, DialectError},
  CompiledShader,
};

#[cfg(feature = "edsl")]
pub use boxel_shader_edsl::op;
