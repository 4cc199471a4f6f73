//! Rust expression syntax for [boxel-shader] operations.
//!
//! [`op!`] rewrites a single Rust expression into calls to the `Operation` factories of `boxel_shader`. Identifiers
//! refer to Rust variables in scope, which must be parameters, operations or operands (or shader functions, when
//! called):
//!
//! | Rust                          | Operation                                  |
//! |-------------------------------|--------------------------------------------|
//! | `a + b + c`, `-`, `*`, `/`    | `add_all([a, b, c])`, …                    |
//! | `a < b`, `==`, `!=`, …        | `less(a, b)`, …                            |
//! | `a = b`, `a += b`, …          | `assign(a, b)`, `add_to(a, b)`, …          |
//! | `a.xyz`                       | `selection(a, ".xyz")`                     |
//! | `a[i]`                        | `selection(a, "[i]")`                      |
//! | `dot(a, b)`, `discard()`, …   | built-in calls                             |
//! | `vec3(a, b)`                  | `vector3([a, b])`                          |
//! | `f(a, b)`                     | `call(&f, [a, b])`                         |
//! | `-a`                          | `multiply(-1.0, a)`                        |
//!
//! Numeric literals become float literals. Any other syntax is a compile error.
//!
//! [boxel-shader]: https://crates.io/crates/boxel-shader

mod expr;

use proc_macro::TokenStream;
use syn::{parse_macro_input, Expr};

#[proc_macro]
pub fn op(tokens: TokenStream) -> TokenStream {
  let expr = parse_macro_input!(tokens as Expr);

  match expr::translate(&expr) {
    Ok(tokens) => tokens.into(),
    Err(err) => err.to_compile_error().into(),
  }
}
