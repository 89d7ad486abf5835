use lazuli::{error::SemanticError, interpreter::analyzer::semantic::SemanticAnalyser};

fn analyse(source: &str) -> Result<(), SemanticError> {
    let program = lazuli::parse(source).expect("source should parse");
    SemanticAnalyser::new().analyse(&program)
}

fn assert_valid(source: &str) {
    if let Err(e) = analyse(source) {
        panic!("program was rejected: {e}\n{source}");
    }
}

fn assert_invalid(source: &str) {
    assert!(analyse(source).is_err(), "program was accepted:\n{source}");
}

#[test]
fn variable_redefinition_is_rejected() {
    assert_invalid(r#"
    fn main(): f32
    {
        let x: f32 = 2;
        let x: f32 = 5;

        ret 0;
    }
    "#);
}

#[test]
fn shadowing_an_outer_scope_is_allowed() {
    assert_valid(r#"
    let x: f32 = 1;

    fn main(): f32
    {
        let x: f32 = 2;
        ret x;
    }
    "#);
}

#[test]
fn function_redefinition_is_rejected() {
    assert_invalid(r#"
    fn f(x: f32): f32 { ret 1; }
    fn f(x: f32): f32 { ret x; }

    fn main(): f32
    {
        ret 0;
    }
    "#);
}

#[test]
fn duplicate_parameter_names_are_rejected() {
    assert_invalid(r#"
    fn f(x: f32, x: f32): f32 { ret 1; }

    fn main(): f32
    {
        ret 0;
    }
    "#);
}

#[test]
fn builtin_print_is_in_scope() {
    assert_valid(r#"
    fn main(): f32
    {
        print("test");
        ret 0;
    }
    "#);
}

#[test]
fn builtin_if_is_in_scope() {
    assert_valid(r#"
    fn main(): f32
    {
        let x: f32 = if(1 == 1, 1, 0);
        ret 0;
    }
    "#);
}

#[test]
fn undeclared_variable_access_is_rejected() {
    assert_invalid("fn main(): f32 { let x: f32 = 2*y; ret 0; }");
    assert_invalid("fn main(): f32 { x = 2; ret 0; }");
    assert_invalid("fn main(): f32 { let x: f32 = 42; x = 2*y; ret 0; }");
}

#[test]
fn undeclared_variable_in_argument_is_rejected() {
    assert_invalid(r#"
    fn test(x: f32, y: f32): void
    {
        print("x = " : x : " y = " : y);
    }

    fn main(): f32
    {
        let x: f32 = 12;
        test(x, y);
        ret 0;
    }
    "#);
}

#[test]
fn undeclared_variable_in_return_is_rejected() {
    assert_invalid(r#"
    fn test(): f32
    {
        ret x;
    }

    fn main(): f32
    {
        ret 0;
    }
    "#);
}

#[test]
fn undeclared_function_calls_are_rejected() {
    assert_invalid("fn main(): f32 { let x: f32 = 12; test(x); ret 0; }");
    assert_invalid("fn f(): f32 { ret 5; } fn main(): f32 { f(test(1)); ret 0; }");
    assert_invalid("fn f(): f32 { ret test(); } fn main(): f32 { ret 0; }");
    assert_invalid("fn main(): f32 { let x: f32 = test(12); ret 0; }");
    assert_invalid("fn main(): f32 { let x: f32 = 42; x = test(12); ret 0; }");
}

#[test]
fn forward_references_are_rejected() {
    // Declarations may only use names that are already in scope.
    assert_invalid(r#"
    fn first(): f32 { ret second(); }
    fn second(): f32 { ret 1; }

    fn main(): f32 { ret 0; }
    "#);
}

#[test]
fn calling_a_number_variable_is_rejected() {
    assert_invalid(r#"
    fn main(): f32
    {
        let x: f32 = 1;
        x();
        ret 0;
    }
    "#);
}

#[test]
fn call_arity_mismatches_are_rejected() {
    assert_invalid(r#"
    fn test(x: f32, y: f32): f32
    {
        ret x + y;
    }

    fn main(): f32
    {
        let x: f32 = 12;
        test(x);
        ret 0;
    }
    "#);

    assert_invalid(r#"
    fn test(x: f32, y: f32): f32
    {
        ret x + y;
    }

    fn main(): f32
    {
        test(1, 2, 3);
        ret 0;
    }
    "#);
}

#[test]
fn call_argument_type_mismatches_are_rejected() {
    assert_invalid(r#"
    fn callTwice(f: function): void
    {
        f();
        f();
    }

    fn main(): f32
    {
        callTwice(12);
        ret 0;
    }
    "#);

    assert_invalid(r#"
    fn addOne(x: f32): f32
    {
        ret x+1;
    }

    fn main(): f32
    {
        addOne(\(x:f32):f32 = { ret x; });
        ret 0;
    }
    "#);
}

#[test]
fn calling_a_function_variable_skips_signature_checks() {
    // The signature of a function-typed variable is unknown, so arity and
    // argument types are not checked.
    assert_valid(r#"
    fn main(): f32
    {
        let f: function = \(y: f32): f32 = { ret y; };
        f(1, 2, 3);
        ret 0;
    }
    "#);
}

#[test]
fn lambda_calls_are_fully_checked() {
    assert_invalid(r#"
    fn main(): f32
    {
        let x: f32 = (\(y: f32): f32 = { ret y; })(1, 2);
        ret 0;
    }
    "#);

    assert_invalid(r#"
    fn main(): f32
    {
        (\(y: f32): void = { print("" : y); })(\(z: f32): f32 = { ret z; });
        ret 0;
    }
    "#);
}

#[test]
fn void_function_returning_value_is_rejected() {
    assert_invalid(r#"
    fn func(): void
    {
        ret 12;
    }

    fn main(): f32
    {
        ret 0;
    }
    "#);
}

#[test]
fn missing_return_is_rejected() {
    assert_invalid(r#"
    fn func(): f32
    {
    }

    fn main(): f32
    {
        ret 0;
    }
    "#);
}

#[test]
fn return_type_mismatch_is_rejected() {
    assert_invalid(r#"
    fn func(): function
    {
        ret 12;
    }

    fn main(): f32
    {
        ret 0;
    }
    "#);
}

#[test]
fn declaration_type_mismatches_are_rejected() {
    assert_invalid("fn main(): f32 { let x: f32 = \\(x: f32): void = { }; ret 0; }");
    assert_invalid("fn main(): f32 { let x: function = 12; ret 0; }");
    assert_invalid(r#"
    fn f(): function
    {
        ret \(x: f32): void = { };
    }

    fn main(): f32
    {
        let x: f32 = f();
        ret 0;
    }
    "#);
    assert_invalid(r#"
    fn f(): f32
    {
        ret 12;
    }

    fn main(): f32
    {
        let x: function = f();
        ret 0;
    }
    "#);
}

#[test]
fn assignment_type_mismatches_are_rejected() {
    assert_invalid("fn main(): f32 { let x: f32 = 42; x = \\(x: f32): void = { }; ret 0; }");
    assert_invalid(r#"
    fn main(): f32
    {
        let x: function = \(x: f32): void = { };
        x = 12;
        ret 0;
    }
    "#);
    assert_invalid(r#"
    fn f(): function
    {
        ret \(x: f32): void = { };
    }

    fn main(): f32
    {
        let x: f32 = 12;
        x = f();
        ret 0;
    }
    "#);
    assert_invalid(r#"
    fn f(): f32
    {
        ret 12;
    }

    fn main(): f32
    {
        let x: function = \(x: f32): void = { };
        x = f();
        ret 0;
    }
    "#);
}

#[test]
fn compound_assignment_on_function_variable_is_rejected() {
    assert_invalid(r#"
    fn main(): f32
    {
        let f: function = \(x: f32): f32 = { ret x; };
        f += 1;
        ret 0;
    }
    "#);
}

#[test]
fn indeterminate_types_are_accepted() {
    // Calling a variable of type function yields an unknown type, which
    // the declaration check lets through.
    assert_valid(r#"
    fn main(): f32
    {
        let f: function = \(y: f32): f32 = { ret y; };
        let x: f32 = f(2);
        ret x;
    }
    "#);
}

#[test]
fn missing_main_is_rejected() {
    assert_invalid(r#"
    fn test(): void
    {
        print("Test");
    }
    "#);
}

#[test]
fn main_with_wrong_return_type_is_rejected() {
    assert_invalid("fn main(): void { print(\"x\"); }");
}

#[test]
fn main_as_variable_is_rejected() {
    assert_invalid("let main: f32 = 1;");
}
