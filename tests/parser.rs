use lazuli::{
    ast::{pretty, Statement},
    interpreter::{
        lexer::tokenize,
        parser::{
            block::parse_block,
            core::{parse_expression, parse_program},
            statement::{parse_assignment, parse_return_statement, parse_variable_declaration},
            unary::{parse_function_call, parse_lambda, parse_lambda_call, parse_unary},
            utils::parse_string_expression,
        },
    },
};

/// Parses a full expression and renders it back to canonical source.
fn expr(source: &str) -> String {
    let tokens = tokenize(source).unwrap();
    let node = parse_expression(&mut tokens.iter().peekable()).unwrap();
    pretty::expression(&node)
}

/// Asserts that expression parsing fails or leaves trailing tokens.
fn assert_expr_rejected(source: &str) {
    let Ok(tokens) = tokenize(source) else {
        return;
    };
    let mut iter = tokens.iter().peekable();
    match parse_expression(&mut iter) {
        Err(_) => {},
        Ok(_) => assert!(iter.peek().is_some(), "expression was accepted: {source}"),
    }
}

macro_rules! assert_parse_fails {
    ($parser:ident, $($source:literal),+ $(,)?) => {
        $(
            let tokens = tokenize($source).expect("lexing should succeed");
            assert!($parser(&mut tokens.iter().peekable()).is_err(),
                    "parser accepted: {}",
                    $source);
        )+
    };
}

#[test]
fn simple_terms() {
    assert_eq!(expr("42"), "42");
    assert_eq!(expr("12.5"), "12.5");
    assert_eq!(expr("x"), "x");
}

#[test]
fn function_calls() {
    assert_eq!(expr("f()"), "f()");
    assert_eq!(expr("xyz(x)"), "xyz(x)");
    assert_eq!(expr("g(x, 2, z)"), "g(x, 2, z)");
}

#[test]
fn builtin_names_are_callable() {
    assert_eq!(expr("if(1, 2, z)"), "if(1, 2, z)");

    let tokens = tokenize("print(\"test\")").unwrap();
    let node = parse_function_call(&mut tokens.iter().peekable()).unwrap();
    assert_eq!(pretty::expression(&node), "print(\"test\")");
}

#[test]
fn invalid_function_calls_are_rejected() {
    assert_parse_fails!(parse_function_call, "f(", "f)", "f(x,)", "f(x y)", "(x y)");
}

#[test]
fn string_expressions() {
    let cases = [("\"test\"", "\"test\""),
                 ("\"test\" : 2", "\"test\" : 2"),
                 ("\"test\" : \"a\"", "\"test\" : \"a\""),
                 ("\"test\" : 2 : \"a\"", "\"test\" : 2 : \"a\""),
                 ("\"sum: \" : 1 + 2", "\"sum: \" : (1 + 2)")];

    for (source, expected) in cases {
        let tokens = tokenize(source).unwrap();
        let node = parse_string_expression(&mut tokens.iter().peekable()).unwrap();
        assert_eq!(pretty::expression(&node), expected);
    }
}

#[test]
fn unary_expressions() {
    assert_eq!(expr("-2"), "-2");
    assert_eq!(expr("-x"), "-x");
    assert_eq!(expr("~x"), "~x");
}

#[test]
fn invalid_unary_is_rejected() {
    assert_parse_fails!(parse_unary, "+x", "--4");
}

#[test]
fn factors_and_additive() {
    assert_eq!(expr("2 * 3"), "(2 * 3)");
    assert_eq!(expr("5 / 3"), "(5 / 3)");
    assert_eq!(expr("-x * 2"), "(-x * 2)");
    assert_eq!(expr("y / x * 2"), "((y / x) * 2)");
    assert_eq!(expr("2 + 3"), "(2 + 3)");
    assert_eq!(expr("5 - 3"), "(5 - 3)");
    assert_eq!(expr("x % 2"), "(x % 2)");
}

#[test]
fn proper_operation_order() {
    assert_eq!(expr("2 + 3 * 4"), "(2 + (3 * 4))");
    assert_eq!(expr("(2 + 3) * 4"), "((2 + 3) * 4)");
    assert_eq!(expr("3 - 2 - 1"), "((3 - 2) - 1)");
}

#[test]
fn bitwise_expressions() {
    assert_eq!(expr("2 & 3"), "(2 & 3)");
    assert_eq!(expr("5 | 3"), "(5 | 3)");
    assert_eq!(expr("x ^ 2"), "(x ^ 2)");
    assert_eq!(expr("1 << 2"), "(1 << 2)");
    assert_eq!(expr("1 >> 2"), "(1 >> 2)");
    assert_eq!(expr("2 + 3 * 4 & 3"), "((2 + (3 * 4)) & 3)");
    assert_eq!(expr("(2 + 3) * 4 << 2"), "(((2 + 3) * 4) << 2)");
}

#[test]
fn invalid_arithmetic_is_rejected() {
    assert_expr_rejected("+x + 3");
    assert_expr_rejected("42++");
    assert_expr_rejected("10 +");
    assert_expr_rejected("10 * (23 + 3");
}

#[test]
fn comparison_expressions() {
    assert_eq!(expr("2 == 3"), "(2 == 3)");
    assert_eq!(expr("5 != 3"), "(5 != 3)");
    assert_eq!(expr("x > 2"), "(x > 2)");
    assert_eq!(expr("1 < 2"), "(1 < 2)");
    assert_eq!(expr("1 >= 2"), "(1 >= 2)");
    assert_eq!(expr("1 <= 1"), "(1 <= 1)");
    assert_eq!(expr("2 + 3 > 5"), "((2 + 3) > 5)");
    assert_eq!(expr("(2 + 3) * 4 >= 2 ^ 4"), "(((2 + 3) * 4) >= (2 ^ 4))");
}

#[test]
fn unary_logical_expressions() {
    assert_eq!(expr("(2 > 3)"), "(2 > 3)");
    assert_eq!(expr("!(2 > 3)"), "!(2 > 3)");
    // The negation swallows the whole comparison that follows it.
    assert_eq!(expr("!1 < 3"), "!(1 < 3)");
}

#[test]
fn logical_expressions() {
    assert_eq!(expr("2 >= 5 && 2 == 2"), "((2 >= 5) && (2 == 2))");
    assert_eq!(expr("2 <= 5 || 2 == 2 && 4 > 2"),
               "(((2 <= 5) || (2 == 2)) && (4 > 2))");
}

#[test]
fn variable_declarations() {
    let tokens = tokenize("let xyz: f32 = 2+3*4;").unwrap();
    let decl = parse_variable_declaration(&mut tokens.iter().peekable()).unwrap();
    assert_eq!(decl.name, "xyz");
    assert_eq!(pretty::expression(&decl.value), "(2 + (3 * 4))");
}

#[test]
fn invalid_variable_declarations_are_rejected() {
    assert_parse_fails!(parse_variable_declaration,
                        "xyz: f32 = 2;",
                        "let : f32 = 4;",
                        "let x f32 = 6+4;",
                        "let y: = 5;",
                        "let h: f3fsg2 = 5;",
                        "let d: f32  5;",
                        "let k: f32 = ;",
                        "let l: f32 = 6",
                        "let let: f32 = 6;",
                        "let if: f32 = 6;",
                        "let print: f32 = 6;",
                        "let f32: f32 = 6;",
                        "let void: f32 = 6;",
                        "let fn: f32 = 6;",
                        "let function: f32 = 6;");
}

#[test]
fn assignments() {
    for op in ["=", "+=", "-=", "*=", "/=", "&=", "|=", "^=", "<<=", ">>="] {
        let source = format!("x {op} 3;");
        let tokens = tokenize(&source).unwrap();
        let statement = parse_assignment(&mut tokens.iter().peekable()).unwrap();
        match statement {
            Statement::Assignment { name, op: parsed, .. } => {
                assert_eq!(name, "x");
                assert_eq!(parsed.to_string(), op);
            },
            other => panic!("expected assignment, got {other:?}"),
        }
    }
}

#[test]
fn invalid_assignments_are_rejected() {
    assert_parse_fails!(parse_assignment, "= 3;", "y = ;", "y = 3");
}

#[test]
fn return_statements() {
    let tokens = tokenize("ret 12;").unwrap();
    let statement = parse_return_statement(&mut tokens.iter().peekable()).unwrap();
    assert!(matches!(statement, Statement::Return { .. }));

    assert_parse_fails!(parse_return_statement, "3;", "ret ;", "ret 3");
}

#[test]
fn blocks() {
    let tokens = tokenize("{ let x: f32 = 42; x=7; ret 12; }").unwrap();
    let block = parse_block(&mut tokens.iter().peekable()).unwrap();
    assert_eq!(block.statements.len(), 3);
    assert!(matches!(block.statements[0], Statement::VariableDeclaration(_)));
    assert!(matches!(block.statements[1], Statement::Assignment { .. }));
    assert!(matches!(block.statements[2], Statement::Return { .. }));

    let tokens = tokenize("{ print(\"test\"); }").unwrap();
    let block = parse_block(&mut tokens.iter().peekable()).unwrap();
    assert!(matches!(block.statements[0], Statement::FunctionCall { .. }));

    let tokens = tokenize("{}").unwrap();
    let block = parse_block(&mut tokens.iter().peekable()).unwrap();
    assert!(block.statements.is_empty());
}

#[test]
fn invalid_blocks_are_rejected() {
    assert_parse_fails!(parse_block,
                        " ret 3; }",
                        "{ f(); ",
                        "{ f(); ggdfh }",
                        "{ 4 }",
                        "{ 4+3; }");
}

#[test]
fn function_declarations() {
    let source = "fn g(x: f32, y: function): void { ret 12; }";
    let tokens = tokenize(source).unwrap();
    let mut iter = tokens.iter().peekable();
    let decl =
        lazuli::interpreter::parser::statement::parse_function_declaration(&mut iter).unwrap();

    assert_eq!(decl.name, "g");
    assert_eq!(decl.params.len(), 2);
    assert_eq!(decl.body.statements.len(), 1);
}

#[test]
fn invalid_function_declarations_are_rejected() {
    use lazuli::interpreter::parser::statement::parse_function_declaration;

    assert_parse_fails!(parse_function_declaration,
                        "t(x: f32): f32 { }",
                        "fn (x:f32): f32 {}",
                        "fn t :f32): f32 {}",
                        "fn t(x f32) :f32 {}",
                        "fn f(x: f32) f32 {}",
                        "fn f(x: f32) : {}",
                        "fn f(x: f32, ): f32 {}",
                        "fn f(x: f32, y) : f32 {}",
                        "fn f(x: f32) : f32",
                        "fn f(x: f32) : f32 {",
                        "fn f(x: f32) : f32 }");
}

#[test]
fn lambda_declarations() {
    let tokens = tokenize("\\(x: f32): void = {}").unwrap();
    let lambda = parse_lambda(&mut tokens.iter().peekable()).unwrap();
    assert_eq!(lambda.params.len(), 1);
    assert!(lambda.body.statements.is_empty());
}

#[test]
fn invalid_lambda_declarations_are_rejected() {
    assert_parse_fails!(parse_lambda,
                        "(x: f32): f32 = { }",
                        "\\x:f32): f32 = {}",
                        "\\( :f32): f32 = {}",
                        "\\(x f32) :f32 = {}",
                        "\\(x:): f32 = {}",
                        "\\(x: f32) f32 = {}",
                        "\\(x: f32):  = {}",
                        "\\(x: f32) : f32  {}",
                        "\\(x: f32) : f32 = {",
                        "\\f(x: f32) : f32 = {}",
                        "\\(x: f32) : f32 = }");
}

#[test]
fn calling_a_lambda() {
    let tokens = tokenize("(\\(x: f32): void = {})(3)").unwrap();
    let node = parse_lambda_call(&mut tokens.iter().peekable()).unwrap();
    assert_eq!(pretty::expression(&node), "(\\(x: f32): void = { })(3)");
}

#[test]
fn lambda_in_declaration_and_as_argument() {
    let tokens = tokenize("let x: function = \\(x: f32): void = {};").unwrap();
    let decl = parse_variable_declaration(&mut tokens.iter().peekable()).unwrap();
    assert!(matches!(*decl.value, lazuli::ast::Expr::Lambda(_)));

    assert_eq!(expr("func(\\(x:f32): f32 = { ret x; })"),
               "func(\\(x: f32): f32 = {\n  ret x;\n})");
}

#[test]
fn calling_a_function_result() {
    assert_eq!(expr("f(x, 2)(10)"), "f(x, 2)(10)");
    assert_eq!(expr("f(a)(b)(c)"), "f(a)(b)(c)");
}

#[test]
fn program_keeps_declaration_order() {
    let source = "let x: f32 = 1; fn main(): f32 { ret x; } fn helper(): void { print(\"h\"); }";
    let tokens = tokenize(source).unwrap();
    let program = parse_program(&mut tokens.iter().peekable()).unwrap();

    assert_eq!(program.variables.len(), 1);
    assert_eq!(program.functions.len(), 2);
    assert_eq!(program.functions[0].name, "main");
    assert_eq!(program.functions[1].name, "helper");
}

#[test]
fn pretty_print_round_trip() {
    let source = r#"
    let limit: f32 = 2 + 3 * 4;

    fn factorial(n: f32): f32
    {
        ret if(n == 0, 1, n * factorial(n - 1));
    }

    fn main(): f32
    {
        let f: function = \(y: f32, z: f32): f32 = { ret y + z; };
        print("" : factorial(4) : " and " : f(1, 2));
        ret 0;
    }
    "#;

    let first = lazuli::parse(source).unwrap();
    let printed = pretty::program(&first);
    let second = lazuli::parse(&printed).unwrap();

    // Printing the reparse reproduces the print exactly, so the canonical
    // form is a fixed point of parse-then-print.
    assert_eq!(pretty::program(&second), printed);
}
