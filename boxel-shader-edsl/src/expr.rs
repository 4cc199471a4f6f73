//! Translation of Rust expressions into operation factory calls.

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{spanned::Spanned, BinOp, Expr, Lit, Member, UnOp};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Arith {
  Add,
  Subtract,
  Multiply,
  Divide,
}

impl Arith {
  fn from_bin_op(op: &BinOp) -> Option<Self> {
    match op {
      BinOp::Add(_) => Some(Arith::Add),
      BinOp::Sub(_) => Some(Arith::Subtract),
      BinOp::Mul(_) => Some(Arith::Multiply),
      BinOp::Div(_) => Some(Arith::Divide),
      _ => None,
    }
  }

  fn factory(self) -> TokenStream {
    match self {
      Arith::Add => quote! { add_all },
      Arith::Subtract => quote! { subtract_all },
      Arith::Multiply => quote! { multiply_all },
      Arith::Divide => quote! { divide_all },
    }
  }
}

fn compare_factory(op: &BinOp) -> Option<TokenStream> {
  let factory = match op {
    BinOp::Eq(_) => quote! { equals },
    BinOp::Ne(_) => quote! { not_equals },
    BinOp::Lt(_) => quote! { less },
    BinOp::Le(_) => quote! { less_equals },
    BinOp::Gt(_) => quote! { greater },
    BinOp::Ge(_) => quote! { greater_equals },
    _ => return None,
  };

  Some(factory)
}

fn assign_factory(op: &BinOp) -> Option<TokenStream> {
  let factory = match op {
    BinOp::AddEq(_) => quote! { add_to },
    BinOp::SubEq(_) => quote! { subtract_to },
    BinOp::MulEq(_) => quote! { multiply_to },
    BinOp::DivEq(_) => quote! { divide_to },
    _ => return None,
  };

  Some(factory)
}

/// Built-in function names, mapped to their `BuiltInFun` variant.
fn builtin_fun(name: &str) -> Option<TokenStream> {
  let fun = match name {
    "abs" => quote! { Abs },
    "fract" => quote! { Fract },
    "fwidth" => quote! { FWidth },
    "normalize" => quote! { Normalize },
    "min" => quote! { Min },
    "max" => quote! { Max },
    "distance" => quote! { Distance },
    "pow" => quote! { Pow },
    "mix" => quote! { Mix },
    "dot" => quote! { Dot },
    "length" => quote! { Length },
    "clamp" => quote! { Clamp },
    "sqrt" => quote! { Sqrt },
    "sin" => quote! { Sin },
    "cos" => quote! { Cos },
    "floor" => quote! { Floor },
    "step" => quote! { Step },
    "smoothstep" => quote! { SmoothStep },
    "reflect" => quote! { Reflect },
    "cross" => quote! { Cross },
    "texture2d" => quote! { Texture2D },
    _ => return None,
  };

  Some(fun)
}

fn constructor(name: &str) -> Option<TokenStream> {
  match name {
    "vec2" => Some(quote! { vector2 }),
    "vec3" => Some(quote! { vector3 }),
    "vec4" => Some(quote! { vector4 }),
    _ => None,
  }
}

fn unsupported(expr: &impl Spanned, what: &str) -> syn::Error {
  syn::Error::new(expr.span(), format!("{} is not supported in op!", what))
}

/// Whether an expression translates to an operand rather than to an operation.
fn is_leaf(expr: &Expr) -> bool {
  match expr {
    Expr::Lit(_) | Expr::Path(_) => true,
    Expr::Paren(paren) => is_leaf(&paren.expr),
    Expr::Group(group) => is_leaf(&group.expr),
    Expr::Unary(unary) => matches!(unary.op, UnOp::Neg(_)) && matches!(&*unary.expr, Expr::Lit(_)),
    _ => false,
  }
}

/// Translate the top-level expression of the macro: an `Operation` if it is one, an `Operand` otherwise.
pub fn translate(expr: &Expr) -> syn::Result<TokenStream> {
  if is_leaf(expr) {
    operand(expr)
  } else {
    operation(expr)
  }
}

fn literal(lit: &Lit, negative: bool) -> syn::Result<TokenStream> {
  let sign = if negative { quote! { - } } else { quote! {} };

  match lit {
    Lit::Float(_) | Lit::Int(_) => Ok(quote! { ::boxel_shader::Operand::from(#sign (#lit as f32)) }),
    Lit::Bool(_) if !negative => Ok(quote! { ::boxel_shader::Operand::from(#lit) }),
    _ => Err(unsupported(lit, "this literal")),
  }
}

/// Tokens of type `Operand`.
fn operand(expr: &Expr) -> syn::Result<TokenStream> {
  match expr {
    Expr::Lit(lit) => literal(&lit.lit, false),

    Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => match &*unary.expr {
      Expr::Lit(lit) => literal(&lit.lit, true),
      _ => {
        let op = operation(expr)?;
        Ok(quote! { ::boxel_shader::Operand::from(#op) })
      }
    },

    Expr::Path(path) if path.qself.is_none() => {
      if let Some(ident) = path.path.get_ident() {
        Ok(quote! { ::boxel_shader::Operand::from(&#ident) })
      } else {
        Ok(quote! { ::boxel_shader::Operand::from(#path) })
      }
    }

    Expr::Paren(paren) => operand(&paren.expr),
    Expr::Group(group) => operand(&group.expr),

    _ => {
      let op = operation(expr)?;
      Ok(quote! { ::boxel_shader::Operand::from(#op) })
    }
  }
}

fn operands<'a>(exprs: impl IntoIterator<Item = &'a Expr>) -> syn::Result<TokenStream> {
  let operands = exprs
    .into_iter()
    .map(operand)
    .collect::<syn::Result<Vec<_>>>()?;

  Ok(quote! { ::std::vec::Vec::<::boxel_shader::Operand>::from([#(#operands),*]) })
}

// left-associative chain of the same arithmetic operator, flattened
fn collect_chain<'a>(expr: &'a Expr, arith: Arith, chain: &mut Vec<&'a Expr>) {
  if let Expr::Binary(binary) = expr {
    if Arith::from_bin_op(&binary.op) == Some(arith) {
      collect_chain(&binary.left, arith, chain);
      chain.push(&binary.right);
      return;
    }
  }

  chain.push(expr);
}

/// Tokens of type `Operation`.
fn operation(expr: &Expr) -> syn::Result<TokenStream> {
  match expr {
    Expr::Binary(binary) => {
      if let Some(arith) = Arith::from_bin_op(&binary.op) {
        let mut chain = Vec::new();
        collect_chain(expr, arith, &mut chain);

        let factory = arith.factory();
        let operands = operands(chain)?;
        return Ok(quote! { ::boxel_shader::Operation::#factory(#operands) });
      }

      if let Some(factory) = compare_factory(&binary.op) {
        let lhs = operand(&binary.left)?;
        let rhs = operand(&binary.right)?;
        return Ok(quote! { ::boxel_shader::Operation::#factory(#lhs, #rhs) });
      }

      Err(unsupported(&binary.op, "this operator"))
    }

    Expr::Assign(assign) => {
      let target = operand(&assign.left)?;
      let value = operand(&assign.right)?;
      Ok(quote! { ::boxel_shader::Operation::assign(#target, #value) })
    }

    Expr::AssignOp(assign) => {
      let factory = assign_factory(&assign.op).ok_or_else(|| unsupported(&assign.op, "this operator"))?;
      let target = operand(&assign.left)?;
      let value = operand(&assign.right)?;
      Ok(quote! { ::boxel_shader::Operation::#factory(#target, #value) })
    }

    Expr::Field(field) => {
      let suffix = match &field.member {
        Member::Named(ident) => format!(".{}", ident),
        Member::Unnamed(_) => return Err(unsupported(&field.member, "tuple indexing")),
      };
      let base = operand(&field.base)?;

      Ok(quote! { ::boxel_shader::Operation::selection(#base, #suffix) })
    }

    Expr::Index(index) => {
      let suffix = format!("[{}]", index.index.to_token_stream());
      let base = operand(&index.expr)?;

      Ok(quote! { ::boxel_shader::Operation::selection(#base, #suffix) })
    }

    Expr::Call(call) => {
      let ident = match &*call.func {
        Expr::Path(path) if path.qself.is_none() => path.path.get_ident(),
        _ => None,
      }
      .ok_or_else(|| unsupported(&call.func, "calling this expression"))?;

      let name = ident.to_string();

      if name == "discard" {
        if !call.args.is_empty() {
          return Err(unsupported(&call.args, "passing arguments to discard"));
        }

        return Ok(quote! { ::boxel_shader::Operation::discard() });
      }

      let args = operands(&call.args)?;

      if let Some(fun) = builtin_fun(&name) {
        Ok(quote! { ::boxel_shader::Operation::builtin(::boxel_shader::BuiltInFun::#fun, #args) })
      } else if let Some(factory) = constructor(&name) {
        Ok(quote! { ::boxel_shader::Operation::#factory(#args) })
      } else {
        Ok(quote! { ::boxel_shader::Operation::call(&#ident, #args) })
      }
    }

    Expr::Unary(unary) => match unary.op {
      UnOp::Neg(_) => {
        let value = operand(&unary.expr)?;
        Ok(quote! { ::boxel_shader::Operation::multiply(-1f32, #value) })
      }

      _ => Err(unsupported(&unary.op, "this unary operator")),
    },

    Expr::Paren(paren) => operation(&paren.expr),
    Expr::Group(group) => operation(&group.expr),

    Expr::Lit(_) | Expr::Path(_) => Err(unsupported(expr, "a single operand")),

    _ => Err(unsupported(expr, "this expression")),
  }
}
