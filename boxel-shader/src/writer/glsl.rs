//! GLSL lowering pass.
//!
//! [`lower`] walks a [`Shader`] depth-first, hoists every stage-level [`Parameter`] and every called
//! [`ShaderFunction`] it meets, and stitches the result into a complete stage source.

use crate::{
  builtin::{BuiltIn, BuiltInFun},
  error::LowerError,
  expr::{Conversion, Literal, Operand},
  fun::ShaderFunction,
  operation::Operation,
  param::Parameter,
  shader::Shader,
  symbol::{Symbol, SymbolTable},
  types::{Qualifier, Stage, Type},
  writer::{dialect::Dialect, CompiledShader},
};
use std::{collections::HashMap, fmt::Write as _, sync::Arc};
use tracing::{debug, trace};

// Number of space an indent level represents.
const INDENT_SPACES: usize = 2;

/// Lower a [`Shader`] into source code of the given dialect.
///
/// The source is laid out as the precision line (if any), the stage-level declarations in discovery order, the
/// called functions (callees first) and finally the entry point. Declarations come before functions so that function
/// bodies can read uniforms.
///
/// Lowering is pure: the same shader and dialect always produce the same source and symbol list. The first error
/// aborts the pass and no source is produced.
pub fn lower(shader: &Shader, dialect: &Dialect) -> Result<CompiledShader, LowerError> {
  let mut lowering = Lowering::new(shader.stage, dialect);
  lowering.locals = collect_locals(&[], &shader.operations)?;

  let mut body = String::new();
  lowering.write_statements(&mut body, &shader.operations, 1)?;

  let mut source = String::new();

  if let Some(precision) = shader.precision {
    let keyword = dialect
      .precision_keyword(precision)
      .ok_or_else(|| LowerError::UnmappablePrecision {
        dialect: dialect.name.clone(),
        precision,
      })?;
    writeln!(source, "precision {} float;", keyword)?;
  }

  for symbol in lowering.symbols.iter() {
    lowering.write_declaration(&mut source, symbol)?;
  }

  source.push_str(&lowering.function_sources);

  writeln!(source, "\nvoid {}() {{", dialect.entry_point)?;
  source.push_str(&body);
  source.push_str("}\n");

  let functions = lowering
    .functions
    .iter()
    .map(|fun| fun.name.clone())
    .collect::<Vec<_>>();
  let symbols = lowering.symbols.into_vec();

  debug!(
    stage = %shader.stage,
    symbols = symbols.len(),
    functions = functions.len(),
    bytes = source.len(),
    "lowered shader stage"
  );

  Ok(CompiledShader {
    stage: shader.stage,
    source,
    symbols,
    functions,
  })
}

/// Variables local to a body, by name: the given function parameters and every declared variable.
///
/// A name declared twice with a different type, qualifier or array length is an error.
fn collect_locals(params: &[Parameter], body: &[Operation]) -> Result<HashMap<String, Parameter>, LowerError> {
  let mut locals = HashMap::new();

  for param in params {
    insert_local(&mut locals, param)?;
  }

  for op in body {
    collect_op_locals(op, &mut locals)?;
  }

  Ok(locals)
}

fn insert_local(locals: &mut HashMap<String, Parameter>, param: &Parameter) -> Result<(), LowerError> {
  match locals.get(param.name()) {
    Some(known) => check_same_symbol(known, param),
    None => {
      locals.insert(param.name().to_owned(), param.clone());
      Ok(())
    }
  }
}

fn check_same_symbol(known: &Parameter, param: &Parameter) -> Result<(), LowerError> {
  if known == param {
    Ok(())
  } else {
    Err(LowerError::InconsistentSymbol {
      name: param.name().to_owned(),
      first: Symbol::from(known).shape(),
      second: Symbol::from(param).shape(),
    })
  }
}

fn collect_operand_locals(operand: &Operand, locals: &mut HashMap<String, Parameter>) -> Result<(), LowerError> {
  match operand {
    Operand::Op(op) => collect_op_locals(op, locals),
    _ => Ok(()),
  }
}

fn collect_op_locals(op: &Operation, locals: &mut HashMap<String, Parameter>) -> Result<(), LowerError> {
  match op {
    Operation::Declare(param) => insert_local(locals, param),

    Operation::Assign { target, value, .. } => {
      collect_operand_locals(target, locals)?;
      collect_operand_locals(value, locals)
    }

    Operation::Arithmetic { operands, .. } | Operation::Construct { operands, .. } => operands
      .iter()
      .try_for_each(|operand| collect_operand_locals(operand, locals)),

    Operation::Compare { lhs, rhs, .. } => {
      collect_operand_locals(lhs, locals)?;
      collect_operand_locals(rhs, locals)
    }

    Operation::Selection { base, .. } => collect_operand_locals(base, locals),

    Operation::BuiltIn { args, .. } | Operation::Call { args, .. } => args
      .iter()
      .try_for_each(|arg| collect_operand_locals(arg, locals)),

    Operation::If {
      condition,
      then,
      otherwise,
    } => {
      collect_operand_locals(condition, locals)?;
      then
        .iter()
        .chain(otherwise.iter().flatten())
        .try_for_each(|op| collect_op_locals(op, locals))
    }

    Operation::For { body, .. } => body.iter().try_for_each(|op| collect_op_locals(op, locals)),

    Operation::Return(Some(value)) => collect_operand_locals(value, locals),
    Operation::Return(None) => Ok(()),

    Operation::Convert(conversion) => collect_operand_locals(&conversion.source, locals),
  }
}

struct Lowering<'a> {
  stage: Stage,
  dialect: &'a Dialect,
  symbols: SymbolTable,

  // variables of the body being lowered that are not stage-level symbols
  locals: HashMap<String, Parameter>,

  // hoisted functions, callees first
  functions: Vec<Arc<ShaderFunction>>,
  function_sources: String,
}

impl<'a> Lowering<'a> {
  fn new(stage: Stage, dialect: &'a Dialect) -> Self {
    Self {
      stage,
      dialect,
      symbols: SymbolTable::new(),
      locals: HashMap::new(),
      functions: Vec::new(),
      function_sources: String::new(),
    }
  }

  fn type_keyword(&self, ty: Type, used_by: &str) -> Result<&'a str, LowerError> {
    self
      .dialect
      .type_keyword(ty)
      .ok_or_else(|| LowerError::UnmappableType {
        dialect: self.dialect.name.clone(),
        name: used_by.to_owned(),
        ty,
      })
  }

  fn qualifier_keyword(&self, qualifier: Qualifier, used_by: &str) -> Result<&'a str, LowerError> {
    self
      .dialect
      .qualifier_keyword(qualifier)
      .ok_or_else(|| LowerError::UnmappableQualifier {
        dialect: self.dialect.name.clone(),
        name: used_by.to_owned(),
        qualifier,
      })
  }

  /// Whether a parameter is a local of the body being lowered.
  ///
  /// A stage-level parameter cannot share its name with a local.
  fn is_local(&self, param: &Parameter) -> Result<bool, LowerError> {
    match self.locals.get(param.name()) {
      Some(local) => check_same_symbol(local, param).map(|_| true),
      None => Ok(false),
    }
  }

  /// Record a stage-level parameter, checking it can be declared.
  fn hoist_param(&mut self, param: &Parameter) -> Result<(), LowerError> {
    let array_length = param.array_length();

    if array_length > 0 && param.qualifier() != Qualifier::Const {
      return Err(LowerError::UnsupportedDeclaration {
        name: param.name().to_owned(),
        qualifier: param.qualifier(),
        array_length,
      });
    }

    self.type_keyword(param.ty(), param.name())?;
    self.qualifier_keyword(param.qualifier(), param.name())?;

    if self.symbols.insert(param)? {
      trace!(
        name = param.name(),
        qualifier = %param.qualifier(),
        ty = %param.ty(),
        array_length,
        "hoisted symbol"
      );
    }

    Ok(())
  }

  fn write_declaration(&self, f: &mut String, symbol: &Symbol) -> Result<(), LowerError> {
    let qualifier = self.qualifier_keyword(symbol.qualifier, &symbol.name)?;
    let ty = self.type_keyword(symbol.ty, &symbol.name)?;

    write!(f, "{} {} {}", qualifier, ty, symbol.name)?;
    write_array_suffix(f, symbol.array_length)?;
    f.push_str(";\n");

    Ok(())
  }

  /// Hoist a function the first time it is called; its callees are hoisted before it.
  fn hoist_function(&mut self, fun: &Arc<ShaderFunction>) -> Result<(), LowerError> {
    if let Some(known) = self.functions.iter().find(|known| known.name == fun.name) {
      if Arc::ptr_eq(known, fun) || **known == **fun {
        return Ok(());
      }

      return Err(LowerError::InconsistentFunction(fun.name.clone()));
    }

    let outer_locals = std::mem::replace(&mut self.locals, collect_locals(&fun.params, &fun.body)?);

    let mut def = String::new();
    def.push('\n');

    match fun.return_type {
      Some(ty) => def.push_str(self.type_keyword(ty, &fun.name)?),
      None => def.push_str("void"),
    }

    write!(def, " {}(", fun.name)?;

    for (i, param) in fun.params.iter().enumerate() {
      if i > 0 {
        def.push_str(", ");
      }

      write!(def, "{} {}", self.type_keyword(param.ty(), param.name())?, param.name())?;
      write_array_suffix(&mut def, param.array_length())?;
    }

    def.push_str(") {\n");
    self.write_statements(&mut def, &fun.body, 1)?;
    def.push_str("}\n");

    self.locals = outer_locals;

    // a callee may have been hoisted while lowering the body
    if self.functions.iter().any(|known| known.name == fun.name) {
      return Err(LowerError::InconsistentFunction(fun.name.clone()));
    }

    trace!(name = %fun.name, params = fun.params.len(), "hoisted function");

    self.function_sources.push_str(&def);
    self.functions.push(Arc::clone(fun));

    Ok(())
  }

  fn write_statements(
    &mut self,
    f: &mut String,
    ops: &[Operation],
    indent_lvl: usize,
  ) -> Result<(), LowerError> {
    for op in ops {
      self.write_statement(f, op, indent_lvl)?;
    }

    Ok(())
  }

  fn write_statement(
    &mut self,
    f: &mut String,
    op: &Operation,
    indent_lvl: usize,
  ) -> Result<(), LowerError> {
    write_indent(f, indent_lvl);

    match op {
      Operation::If {
        condition,
        then,
        otherwise,
      } => {
        f.push_str("if (");
        self.write_operand(f, condition)?;
        f.push_str(") {\n");
        self.write_statements(f, then, indent_lvl + 1)?;
        write_indent(f, indent_lvl);
        f.push('}');

        if let Some(otherwise) = otherwise {
          f.push_str(" else {\n");
          self.write_statements(f, otherwise, indent_lvl + 1)?;
          write_indent(f, indent_lvl);
          f.push('}');
        }

        f.push('\n');
      }

      Operation::For {
        init,
        condition,
        step,
        body,
      } => {
        writeln!(f, "for ({}; {}; {}) {{", init, condition, step)?;
        self.write_statements(f, body, indent_lvl + 1)?;
        write_indent(f, indent_lvl);
        f.push_str("}\n");
      }

      Operation::Return(value) => {
        f.push_str("return");

        if let Some(value) = value {
          f.push(' ');
          self.write_operand(f, value)?;
        }

        f.push_str(";\n");
      }

      Operation::Declare(param) => {
        self.write_local_declaration(f, param)?;
        write_array_suffix(f, param.array_length())?;
        f.push_str(";\n");
      }

      Operation::BuiltIn {
        fun: BuiltInFun::Discard,
        args,
      } => {
        check_arity(BuiltInFun::Discard.name(), 0, args.len())?;
        f.push_str("discard;\n");
      }

      _ => {
        self.write_expr(f, op)?;
        f.push_str(";\n");
      }
    }

    Ok(())
  }

  fn write_local_declaration(&self, f: &mut String, param: &Parameter) -> Result<(), LowerError> {
    write!(f, "{} {}", self.type_keyword(param.ty(), param.name())?, param.name())?;
    Ok(())
  }

  fn write_expr(&mut self, f: &mut String, op: &Operation) -> Result<(), LowerError> {
    match op {
      Operation::Assign { op, target, value } => {
        self.check_lvalue(target)?;

        match declared_param(target) {
          Some(param) => self.write_local_declaration(f, param)?,
          None => self.write_operand(f, target)?,
        }

        write!(f, " {} ", op.symbol())?;
        self.write_operand(f, value)
      }

      Operation::Declare(_) => Err(LowerError::StatementInExpression("declaration")),

      Operation::Arithmetic { op, operands } => {
        if operands.len() < 2 {
          return Err(LowerError::ArityMismatch {
            fun: op.symbol().to_owned(),
            expected: 2,
            found: operands.len(),
          });
        }

        for (i, operand) in operands.iter().enumerate() {
          if i > 0 {
            write!(f, " {} ", op.symbol())?;
          }

          self.write_nested_operand(f, operand)?;
        }

        Ok(())
      }

      Operation::Compare { op, lhs, rhs } => {
        self.write_nested_operand(f, lhs)?;
        write!(f, " {} ", op.symbol())?;
        self.write_nested_operand(f, rhs)
      }

      Operation::Selection { base, suffix } => {
        self.write_nested_operand(f, base)?;
        f.push_str(suffix);
        Ok(())
      }

      Operation::BuiltIn { fun, args } => {
        if *fun == BuiltInFun::Discard {
          return Err(LowerError::StatementInExpression("discard"));
        }

        check_arity(fun.name(), fun.arity(), args.len())?;

        let dialect = self.dialect;
        let name = match fun {
          BuiltInFun::Texture2D => dialect.texture_sample.as_str(),
          _ => fun.name(),
        };

        self.write_call(f, name, args)
      }

      Operation::If { .. } => Err(LowerError::StatementInExpression("if")),
      Operation::For { .. } => Err(LowerError::StatementInExpression("for")),
      Operation::Return(_) => Err(LowerError::StatementInExpression("return")),

      Operation::Call { fun, args } => {
        check_arity(&fun.name, fun.params.len(), args.len())?;
        self.hoist_function(fun)?;
        self.write_call(f, &fun.name, args)
      }

      Operation::Construct { ty, operands } => {
        self.check_components(*ty, operands)?;
        let keyword = self.type_keyword(*ty, "constructor")?;
        self.write_call(f, keyword, operands)
      }

      Operation::Convert(conversion) => self.write_conversion(f, conversion),
    }
  }

  fn write_call(&mut self, f: &mut String, name: &str, args: &[Operand]) -> Result<(), LowerError> {
    write!(f, "{}(", name)?;

    for (i, arg) in args.iter().enumerate() {
      if i > 0 {
        f.push_str(", ");
      }

      self.write_operand(f, arg)?;
    }

    f.push(')');
    Ok(())
  }

  fn write_conversion(&mut self, f: &mut String, conversion: &Conversion) -> Result<(), LowerError> {
    let target = conversion.target;
    let source_ty = conversion
      .source
      .ty()
      .filter(|ty| ty.components().is_some())
      .ok_or(LowerError::UnknownConversionSource(target))?;

    if source_ty.components() > target.components() {
      return Err(LowerError::ConversionShrink {
        from: source_ty,
        to: target,
      });
    }

    let missing = conversion
      .missing_value_count()
      .ok_or(LowerError::UnknownConversionSource(target))?;

    write!(f, "{}(", self.type_keyword(target, "conversion")?)?;
    self.write_operand(f, &conversion.source)?;

    for _ in 0..missing {
      f.push_str(", ");
      write_float(f, conversion.pad)?;
    }

    f.push(')');
    Ok(())
  }

  /// Check the component count of a constructor, when every operand type is known.
  ///
  /// A single scalar operand is a splat and is always accepted.
  fn check_components(&self, ty: Type, operands: &[Operand]) -> Result<(), LowerError> {
    let expected = ty.components().unwrap_or(0);
    let counts = operands
      .iter()
      .map(|operand| operand.ty().and_then(Type::components))
      .collect::<Option<Vec<_>>>();

    let found = match counts {
      Some(counts) => counts.into_iter().sum::<usize>(),
      None => return Ok(()),
    };

    if found == expected || (operands.len() == 1 && found == 1) {
      Ok(())
    } else {
      Err(LowerError::ComponentMismatch {
        ty,
        expected,
        found,
      })
    }
  }

  fn check_lvalue(&self, target: &Operand) -> Result<(), LowerError> {
    match target {
      Operand::Param(param) => {
        if self.is_local(param)? || param.qualifier() == Qualifier::Var {
          Ok(())
        } else {
          Err(LowerError::InvalidLvalue(format!(
            "{} parameter `{}` is read-only",
            param.qualifier(),
            param.name()
          )))
        }
      }

      Operand::BuiltIn(builtin) => match builtin {
        BuiltIn::Output | BuiltIn::PointSize => Ok(()),
        _ => Err(LowerError::InvalidLvalue(format!(
          "built-in {:?} is read-only",
          builtin
        ))),
      },

      Operand::Op(op) => match &**op {
        Operation::Declare(_) => Ok(()),
        Operation::Selection { base, .. } => self.check_lvalue(base),
        _ => Err(LowerError::InvalidLvalue("the result of an operation".to_owned())),
      },

      Operand::Literal(lit) => Err(LowerError::InvalidLvalue(format!("{} literal", lit.ty()))),
      Operand::Raw(text) => Err(LowerError::InvalidLvalue(format!("raw text `{}`", text))),
    }
  }

  /// Write an operand that is itself the operand of an infix operation or a selection.
  fn write_nested_operand(&mut self, f: &mut String, operand: &Operand) -> Result<(), LowerError> {
    match operand {
      Operand::Op(op) if op.is_infix() => {
        f.push('(');
        self.write_expr(f, op)?;
        f.push(')');
        Ok(())
      }

      _ => self.write_operand(f, operand),
    }
  }

  fn write_operand(&mut self, f: &mut String, operand: &Operand) -> Result<(), LowerError> {
    match operand {
      Operand::Param(param) => {
        if !self.is_local(param)? {
          self.hoist_param(param)?;
        }

        f.push_str(param.name());
        Ok(())
      }

      Operand::Literal(lit) => self.write_literal(f, lit),

      Operand::BuiltIn(builtin) => {
        if !builtin.available_in(self.stage) {
          return Err(LowerError::StageMismatch {
            builtin: *builtin,
            stage: self.stage,
          });
        }

        f.push_str(self.dialect.builtin_name(*builtin, self.stage));
        Ok(())
      }

      Operand::Op(op) => self.write_expr(f, op),

      Operand::Raw(text) => {
        f.push_str(text);
        Ok(())
      }
    }
  }

  fn write_literal(&self, f: &mut String, lit: &Literal) -> Result<(), LowerError> {
    let values: &[f32] = match lit {
      Literal::Scalar(x) => return write_float(f, *x),
      Literal::Boolean(b) => {
        write!(f, "{}", b)?;
        return Ok(());
      }
      Literal::Vector2(values) => values,
      Literal::Vector3(values) => values,
      Literal::Vector4(values) => values,
      Literal::Matrix2(values) => values,
      Literal::Matrix3(values) => values,
      Literal::Matrix4(values) => values,
    };

    write_values(f, self.type_keyword(lit.ty(), "literal")?, values)
  }
}

/// Parameter declared by an assignment target, if any.
fn declared_param(target: &Operand) -> Option<&Parameter> {
  match target {
    Operand::Op(op) => match &**op {
      Operation::Declare(param) => Some(param),
      _ => None,
    },
    _ => None,
  }
}

fn check_arity(fun: &str, expected: usize, found: usize) -> Result<(), LowerError> {
  if expected == found {
    Ok(())
  } else {
    Err(LowerError::ArityMismatch {
      fun: fun.to_owned(),
      expected,
      found,
    })
  }
}

fn write_indent(f: &mut String, indent_lvl: usize) {
  f.extend(std::iter::repeat(' ').take(indent_lvl * INDENT_SPACES));
}

fn write_array_suffix(f: &mut String, array_length: u32) -> Result<(), LowerError> {
  if array_length > 0 {
    write!(f, "[{}]", array_length)?;
  }

  Ok(())
}

/// Floats always carry a fractional part, as integer literals are not floats in the target language.
fn write_float(f: &mut String, x: f32) -> Result<(), LowerError> {
  if !x.is_finite() {
    return Err(LowerError::NonFiniteLiteral(x));
  }

  if x.fract() == 0. {
    write!(f, "{:.1}", x)?;
  } else {
    write!(f, "{}", x)?;
  }

  Ok(())
}

fn write_values(f: &mut String, keyword: &str, values: &[f32]) -> Result<(), LowerError> {
  write!(f, "{}(", keyword)?;

  for (i, x) in values.iter().enumerate() {
    if i > 0 {
      f.push_str(", ");
    }

    write_float(f, *x)?;
  }

  f.push(')');
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Precision;

  fn lower_fragment(ops: Vec<Operation>) -> Result<CompiledShader, LowerError> {
    lower(
      &Shader::fragment().with_operations(ops),
      &Dialect::default(),
    )
  }

  #[test]
  fn floats() {
    let mut output = String::new();

    write_float(&mut output, 1.).unwrap();
    output.push(' ');
    write_float(&mut output, 0.25).unwrap();
    output.push(' ');
    write_float(&mut output, -3.).unwrap();

    assert_eq!(output, "1.0 0.25 -3.0");
    assert!(matches!(
      write_float(&mut output, f32::NAN),
      Err(LowerError::NonFiniteLiteral(_))
    ));
  }

  #[test]
  fn matrices() {
    let mut output = String::new();

    write_values(&mut output, "mat2", &[1., 2., 3., 4.]).unwrap();
    assert_eq!(output, "mat2(1.0, 2.0, 3.0, 4.0)");

    output.clear();
    write_values(
      &mut output,
      "mat3",
      &[1., 2., 3., 4., 5., 6., 7., 8., 9.],
    )
    .unwrap();
    assert_eq!(output, "mat3(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0)");

    output.clear();
    write_values(
      &mut output,
      "mat4",
      &[
        1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12., 13., 14., 15., 16.,
      ],
    )
    .unwrap();
    assert_eq!(
      output,
      "mat4(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0)"
    );
  }

  #[test]
  fn nested_infix_is_parenthesized() {
    let a = Parameter::scalar("a", Qualifier::Const);
    let b = Parameter::scalar("b", Qualifier::Const);
    let x = Parameter::scalar("x", Qualifier::Var);

    let compiled = lower_fragment(vec![Operation::assign(
      &x,
      Operation::multiply(Operation::add(&a, &b), 2),
    )])
    .unwrap();

    assert!(compiled.source.contains("  x = (a + b) * 2.0;\n"));
  }

  #[test]
  fn locals_are_not_hoisted() {
    let n = Parameter::vector3("n", Qualifier::Var);
    let v = Parameter::vector3("v", Qualifier::Var);

    let compiled = lower_fragment(vec![
      Operation::assign(Operation::declare(&n), Operation::normalize(&v)),
      Operation::multiply_to(&n, 0.5),
    ])
    .unwrap();

    assert_eq!(compiled.symbols.len(), 1);
    assert_eq!(compiled.symbols[0].name, "v");
    assert!(compiled.source.contains("  vec3 n = normalize(v);\n  n *= 0.5;\n"));
  }

  #[test]
  fn precision_is_optional() {
    let without = lower_fragment(Vec::new()).unwrap();
    assert_eq!(without.source, "\nvoid main() {\n}\n");

    let with = lower(
      &Shader::fragment().with_precision(Precision::High),
      &Dialect::default(),
    )
    .unwrap();
    assert_eq!(with.source, "precision highp float;\n\nvoid main() {\n}\n");
  }

  #[test]
  fn statements_are_not_values() {
    let x = Parameter::scalar("x", Qualifier::Var);

    let err = lower_fragment(vec![Operation::assign(&x, Operation::ret_void())]).unwrap_err();
    assert!(matches!(err, LowerError::StatementInExpression("return")));

    let err = lower_fragment(vec![Operation::add(Operation::discard(), 1)]).unwrap_err();
    assert!(matches!(err, LowerError::StatementInExpression("discard")));
  }

  #[test]
  fn selection_lvalue_checks_its_base() {
    let color = Parameter::vector4("color", Qualifier::Var);
    let tint = Parameter::vector4("tint", Qualifier::Const);

    assert!(lower_fragment(vec![Operation::assign(
      Operation::selection(&color, ".a"),
      1
    )])
    .is_ok());

    assert!(matches!(
      lower_fragment(vec![Operation::assign(Operation::selection(&tint, ".a"), 1)]),
      Err(LowerError::InvalidLvalue(_))
    ));
  }
}
