use crate::ast::{Block, Expr, LambdaExpr, Program, Statement, VariableDecl};

/// Renders a whole program back to parseable source text.
///
/// The output is canonical rather than faithful to the original spelling:
/// numeric binary expressions are fully parenthesized and string
/// concatenation chains re-emit the `:` form. Parsing the result yields an
/// AST structurally equal to the one that was printed.
///
/// ## Example
/// ```
/// use lazuli::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let source = "fn main(): f32 { ret 2 + 3 * 4; }";
/// let tokens = tokenize(source).unwrap();
/// let program = parse_program(&mut tokens.iter().peekable()).unwrap();
///
/// let printed = lazuli::ast::pretty::program(&program);
/// assert!(printed.contains("ret (2 + (3 * 4));"));
/// ```
#[must_use]
pub fn program(node: &Program) -> String {
    let mut out = String::new();
    for variable in &node.variables {
        write_variable_decl(&mut out, variable, 0);
    }
    for function in &node.functions {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("fn {}(", function.name));
        write_params(&mut out, &function.params);
        out.push_str(&format!("): {} ", function.return_type));
        write_block(&mut out, &function.body, 0);
        out.push('\n');
    }
    out
}

/// Renders a single expression back to parseable source text.
#[must_use]
pub fn expression(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

/// Returns `true` when the expression is a string concatenation chain, i.e.
/// the leftmost leaf of its addition spine is a string literal. Such chains
/// must re-emit the `:` separator because `"a" + 1` is not parseable.
fn is_string_chain(expr: &Expr) -> bool {
    match expr {
        Expr::StringLiteral { .. } => true,
        Expr::Binary { left,
                       op: crate::ast::BinaryOperator::Add,
                       .. } => is_string_chain(left),
        _ => false,
    }
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::NumericLiteral { value, .. } => write_number(out, *value),
        Expr::StringLiteral { value, .. } => write_string(out, value),
        Expr::Variable { name, .. } => out.push_str(name),
        Expr::Unary { op, term, .. } => {
            out.push_str(&op.to_string());
            write_expr(out, term);
        },
        Expr::Binary { .. } if is_string_chain(expr) => write_chain(out, expr),
        Expr::Binary { left, op, right, .. } => {
            out.push('(');
            write_expr(out, left);
            out.push_str(&format!(" {op} "));
            write_expr(out, right);
            out.push(')');
        },
        Expr::FunctionCall { name, arguments, .. } => {
            out.push_str(name);
            write_arguments(out, arguments);
        },
        Expr::FunctionResultCall { callee, arguments, .. } => {
            write_expr(out, callee);
            write_arguments(out, arguments);
        },
        Expr::Lambda(lambda) => write_lambda(out, lambda, 0),
        Expr::LambdaCall { lambda, arguments, .. } => {
            out.push('(');
            write_lambda(out, lambda, 0);
            out.push(')');
            write_arguments(out, arguments);
        },
    }
}

/// Emits a string concatenation chain using the `:` separator, the only
/// spelling the grammar accepts for it.
fn write_chain(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Binary { left, right, .. } => {
            write_chain(out, left);
            out.push_str(" : ");
            write_expr(out, right);
        },
        _ => write_expr(out, expr),
    }
}

fn write_number(out: &mut String, value: f64) {
    // Negative literals only arise from compound-assignment snapping; the
    // grammar reaches them through a parenthesized unary minus.
    if value < 0.0 {
        out.push_str(&format!("(-{})", -value));
    } else {
        out.push_str(&format!("{value}"));
    }
}

fn write_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0B' => out.push_str("\\v"),
            '\x0C' => out.push_str("\\f"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

fn write_arguments(out: &mut String, arguments: &[std::rc::Rc<Expr>]) {
    out.push('(');
    for (index, argument) in arguments.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        write_expr(out, argument);
    }
    out.push(')');
}

fn write_params(out: &mut String, params: &crate::ast::Parameters) {
    for (index, (name, type_name)) in params.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(&format!("{name}: {type_name}"));
    }
}

fn write_lambda(out: &mut String, lambda: &LambdaExpr, indent: usize) {
    out.push_str("\\(");
    write_params(out, &lambda.params);
    out.push_str(&format!("): {} = ", lambda.return_type));
    write_block(out, &lambda.body, indent);
}

fn write_block(out: &mut String, block: &Block, indent: usize) {
    if block.statements.is_empty() {
        out.push_str("{ }");
        return;
    }

    out.push_str("{\n");
    for statement in &block.statements {
        write_statement(out, statement, indent + 1);
    }
    out.push_str(&"  ".repeat(indent));
    out.push('}');
}

fn write_statement(out: &mut String, statement: &Statement, indent: usize) {
    out.push_str(&"  ".repeat(indent));
    match statement {
        Statement::VariableDeclaration(decl) => {
            write_variable_decl(out, decl, indent);
            return;
        },
        Statement::Assignment { name, op, value, .. } => {
            out.push_str(&format!("{name} {op} "));
            write_value(out, value, indent);
        },
        Statement::Return { value, .. } => {
            out.push_str("ret ");
            write_value(out, value, indent);
        },
        Statement::FunctionCall { call, .. } => write_expr(out, call),
    }
    out.push_str(";\n");
}

fn write_variable_decl(out: &mut String, decl: &VariableDecl, indent: usize) {
    out.push_str(&format!("let {}: {} = ", decl.name, decl.var_type));
    write_value(out, &decl.value, indent);
    out.push_str(";\n");
}

/// Emits the right-hand side of a declaration, assignment or return, which
/// may be a lambda printed with the surrounding indentation.
fn write_value(out: &mut String, value: &Expr, indent: usize) {
    if let Expr::Lambda(lambda) = value {
        write_lambda(out, lambda, indent);
    } else {
        write_expr(out, value);
    }
}
