use lazuli::{eval_expression, interpreter::value::Value, run};

fn assert_number(source: &str, expected: f64) {
    let value = eval_expression(source).unwrap_or_else(|e| panic!("{source} failed: {e}"));
    match value {
        Value::Number(n) => {
            assert!((n - expected).abs() < f64::EPSILON,
                    "{source} evaluated to {n}, expected {expected}")
        },
        other => panic!("{source} evaluated to {other:?}"),
    }
}

fn assert_program(source: &str, out: &str, status: i32) {
    let execution = run(source).unwrap_or_else(|e| panic!("program failed: {e}\n{source}"));
    assert_eq!(execution.standard_out, out);
    assert_eq!(execution.exit_code, status);
}

fn assert_runtime_error(source: &str) {
    assert!(run(source).is_err(), "program succeeded:\n{source}");
}

#[test]
fn basic_factor() {
    assert_number("2*3", 6.0);
    assert_number("6/2", 3.0);
}

#[test]
fn basic_additive_expressions() {
    assert_number("2+3", 5.0);
    assert_number("6-2", 4.0);
    assert_number("10%3", 1.0);
}

#[test]
fn basic_unary_expressions() {
    assert_number("-2", -2.0);
    assert_number("~2", 4_294_967_293.0);
}

#[test]
fn proper_operation_order() {
    assert_number("-2 + 5 * 2", 8.0);
    assert_number("3 - 2 - 1", 0.0);
}

#[test]
fn compound_arithmetic_expressions() {
    assert_number("(-2 + 5) * 2 + (4 >> 1)", 8.0);
    assert_number("((2 | 1) + 1) / 2", 2.0);
}

#[test]
fn comparison_expressions() {
    assert_number("2 == 2", 1.0);
    assert_number("2*2 >= 42", 0.0);
}

#[test]
fn unary_logical_expressions() {
    assert_number("!(2 == 2)", 0.0);
    assert_number("!(2*2 >= 42)", 1.0);
}

#[test]
fn compound_logical_expressions() {
    assert_number("!(2 == 2) || 3 > 2", 1.0);
    assert_number("!(2*2 >= 42) && 2/2 == 1", 1.0);
}

#[test]
fn division_follows_ieee_semantics() {
    assert_number("1 / 0 > 1000000", 1.0);
    assert_number("0 - 1 / 0 < 0 - 1000000", 1.0);
}

#[test]
fn exit_code_works() {
    assert_program(r#"
    fn main(): f32
    {
        ret 12;
    }
    "#,
                   "",
                   12);
}

#[test]
fn exit_code_truncates() {
    assert_program("fn main(): f32 { ret 12.9; }", "", 12);
}

#[test]
fn print_works() {
    assert_program(r#"
    fn main(): f32
    {
        print("test!");
        ret 0;
    }
    "#,
                   "test!\n",
                   0);
}

#[test]
fn print_with_concatenation_works() {
    assert_program(r#"
    fn main(): f32
    {
        print("test " : 1 : " other");
        ret 0;
    }
    "#,
                   "test 1.000000 other\n",
                   0);
}

#[test]
fn variables_work() {
    assert_program(r#"
    let x: f32 = 1;

    fn main(): f32
    {
        print("" : x);
        ret 0;
    }
    "#,
                   "1.000000\n",
                   0);
}

#[test]
fn variable_shadowing_works() {
    assert_program(r#"
    let x: f32 = 1;

    fn main(): f32
    {
        let x: f32 = 2;
        print("" : x);
        ret 0;
    }
    "#,
                   "2.000000\n",
                   0);
}

#[test]
fn function_calls_work() {
    assert_program(r#"
    fn test(x: f32, y: f32): f32
    {
        ret x + y + 1;
    }

    fn main(): f32
    {
        print("" : test(1, 2));
        ret 0;
    }
    "#,
                   "4.000000\n",
                   0);
}

#[test]
fn void_function_calls_work() {
    assert_program(r#"
    fn test(x: f32): void
    {
        print("test " : x);
    }

    fn main(): f32
    {
        test(4);
        ret 0;
    }
    "#,
                   "test 4.000000\n",
                   0);
}

#[test]
fn recursion_works() {
    assert_program(r#"
    fn factorial(n: f32): f32
    {
        ret if(n == 0, 1, n * factorial(n - 1));
    }

    fn main(): f32
    {
        print("" : factorial(4));
        ret 0;
    }
    "#,
                   "24.000000\n",
                   0);
}

#[test]
fn if_works() {
    assert_program(r#"
    fn main(): f32
    {
        let t1: f32 = if(1==1, 1, 0);
        let t2: f32 = if(1!=1, 1, 0);
        print("" : t1 : " " : t2);
        ret 0;
    }
    "#,
                   "1.000000 0.000000\n",
                   0);
}

#[test]
fn if_condition_tolerance() {
    // Magnitudes at or below 1e-4 count as false.
    assert_program(r#"
    fn main(): f32
    {
        let tiny: f32 = if(0.0001, 1, 0);
        let small: f32 = if(0.001, 1, 0);
        let negative: f32 = if(0 - 0.001, 1, 0);
        print("" : tiny : " " : small : " " : negative);
        ret 0;
    }
    "#,
                   "0.000000 1.000000 1.000000\n",
                   0);
}

#[test]
fn lambda_calls_work() {
    assert_program(r#"
    fn main(): f32
    {
        let x: f32 = (\(y: f32, z: f32): f32 = { ret y + z; })(1, 2);
        print("" : x);
        ret 0;
    }
    "#,
                   "3.000000\n",
                   0);
}

#[test]
fn lambda_calls_from_variables_work() {
    assert_program(r#"
    fn main(): f32
    {
        let f: function = \(y: f32, z: f32): f32 = { ret y + z; };
        print("" : f(2, 2));
        ret 0;
    }
    "#,
                   "4.000000\n",
                   0);
}

#[test]
fn lambdas_capture_a_snapshot() {
    // The assignment to m after the lambda value exists is not observed.
    assert_program(r#"
    fn main(): f32
    {
        let m: f32 = 1;
        let f: function = \(y: f32, z: f32): f32 = { ret y + z + m; };
        m = 2;
        print("" : f(2, 2));
        ret 0;
    }
    "#,
                   "5.000000\n",
                   0);
}

#[test]
fn assignments_work() {
    assert_program(r#"
    fn main(): f32
    {
        let m: f32 = 1;
        m = 2;
        print("" : m);
        m += 2;
        print("" : m);
        m <<= 1;
        print("" : m);
        ret 0;
    }
    "#,
                   "2.000000\n4.000000\n8.000000\n",
                   0);
}

#[test]
fn functions_can_be_assigned_to_variables() {
    assert_program(r#"
    fn test(): void
    {
        print("test");
    }

    fn main(): f32
    {
        let f: function = test;
        f();
        ret 0;
    }
    "#,
                   "test\n",
                   0);
}

#[test]
fn lazy_evaluation_skips_unread_variables() {
    assert_program(r#"
    fn hang(): f32
    {
        ret hang();
    }

    fn main(): f32
    {
        let f: f32 = hang();
        ret 0;
    }
    "#,
                   "",
                   0);
}

#[test]
fn variables_are_reevaluated_on_every_read() {
    // A variable holds an expression, not a value: reassigning n changes
    // what later reads of n produce, but total was snapped eagerly by the
    // compound assignment.
    assert_program(r#"
    fn main(): f32
    {
        let n: f32 = 2;
        let total: f32 = 0;
        total += n * 10;
        n = 3;
        print("" : total : " " : n);
        ret 0;
    }
    "#,
                   "20.000000 3.000000\n",
                   0);
}

#[test]
fn plain_assignment_rebinds_the_expression() {
    // x = y + 1 stores the expression; the later read evaluates it in the
    // environment captured when x was declared.
    assert_program(r#"
    fn main(): f32
    {
        let y: f32 = 1;
        let x: f32 = 0;
        x = y + 1;
        print("" : x);
        ret 0;
    }
    "#,
                   "2.000000\n",
                   0);
}

#[test]
fn function_results_can_be_called() {
    assert_program(r#"
    fn adder(x: f32): function
    {
        ret \(y: f32): f32 = { ret x + y; };
    }

    fn main(): f32
    {
        print("" : adder(2)(3));
        ret 0;
    }
    "#,
                   "5.000000\n",
                   0);
}

#[test]
fn higher_order_functions_work() {
    assert_program(r#"
    fn apply(f: function, x: f32): f32
    {
        ret f(x);
    }

    fn double(x: f32): f32
    {
        ret 2 * x;
    }

    fn main(): f32
    {
        print("" : apply(double, 21));
        ret 0;
    }
    "#,
                   "42.000000\n",
                   0);
}

#[test]
fn string_concatenation_of_strings() {
    assert_program(r#"
    fn main(): f32
    {
        print("a" : "b" : "c");
        ret 0;
    }
    "#,
                   "abc\n",
                   0);
}

#[test]
fn modulo_is_fmod() {
    assert_program(r#"
    fn main(): f32
    {
        print("" : 7.5 % 2);
        ret 0;
    }
    "#,
                   "1.500000\n",
                   0);
}

#[test]
fn runtime_type_errors_are_fatal() {
    // Calling a number as a function survives the analyzer (the variable
    // has type function only statically) but fails at runtime.
    assert_runtime_error(r#"
    fn identity(x: f32): f32
    {
        ret x;
    }

    fn main(): f32
    {
        let f: function = identity;
        ret f(1)(2);
    }
    "#);
}

#[test]
fn calling_a_function_variable_with_wrong_arity_fails_at_runtime() {
    assert_runtime_error(r#"
    fn main(): f32
    {
        let f: function = \(y: f32): f32 = { ret y; };
        ret f(1, 2);
    }
    "#);
}
