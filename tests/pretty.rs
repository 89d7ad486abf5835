use std::fs;

use lazuli::ast::pretty;
use walkdir::WalkDir;

fn printed(source: &str) -> String {
    pretty::program(&lazuli::parse(source).unwrap())
}

#[test]
fn statements_render_canonically() {
    let source =
        "let limit: f32 = 10; fn main(): f32 { let x: f32 = 1; x += 2; print(\"x = \" : x); ret x; }";

    assert_eq!(printed(source),
               "let limit: f32 = 10;\n\
                \n\
                fn main(): f32 {\n\
                \x20 let x: f32 = 1;\n\
                \x20 x += 2;\n\
                \x20 print(\"x = \" : x);\n\
                \x20 ret x;\n\
                }\n");
}

#[test]
fn binary_expressions_are_fully_parenthesized() {
    let out = printed("fn main(): f32 { ret 2 + 3 * 4 & 3; }");
    assert!(out.contains("ret ((2 + (3 * 4)) & 3);"), "{out}");
}

#[test]
fn lambdas_render_with_their_bodies() {
    let out = printed("fn main(): f32 { let f: function = \\(y: f32): f32 = { ret y; }; ret 0; }");
    assert!(out.contains("let f: function = \\(y: f32): f32 = {\n    ret y;\n  };"),
            "{out}");
}

#[test]
fn string_escapes_round_trip() {
    let source = "fn main(): f32 { print(\"a\\tb\\n\\\"c\\\"\"); ret 0; }";
    let once = printed(source);
    assert!(once.contains("print(\"a\\tb\\n\\\"c\\\"\");"), "{once}");

    // The escaped form reparses to the same program.
    assert_eq!(printed(&once), once);
}

#[test]
fn printing_is_a_fixed_point_for_every_example_script() {
    let mut count = 0;

    for entry in
        WalkDir::new("scripts").into_iter()
                               .filter_map(Result::ok)
                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "laz"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let once = printed(&source);
        assert_eq!(printed(&once), once, "printing {path:?} is not a fixed point");
    }

    assert!(count > 0, "No example scripts found in scripts/");
}
