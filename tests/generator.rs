//! Source-to-C++ scenarios

use cclear::cclear::formats::to_treeviz_str;
use cclear::cclear::generating::{Generator, GeneratorOptions};
use cclear::cclear::pipeline::{compile, parse_source};
use rstest::rstest;
use std::fs;

#[rstest]
#[case::plain_declaration("alc var_name:int;\n", "int var_name;\n")]
#[case::options_and_expression(
    "alc( static const ) var_name:int = 2 * 5 - (2 + 5 / 4);\n",
    "static const int var_name = 2 * 5 - ( 2 + 5 / 4 );\n"
)]
#[case::float_assignment("alc ratio:float = 0.5 * x;", "float ratio = 0.5 * x;\n")]
#[case::repeated_options("alc(const const) k:int = 1;", "const const int k = 1;\n")]
#[case::empty_source("", "")]
#[case::comments_only("// nothing here\n/* or here */\n", "")]
fn compiles_to(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(compile(source).unwrap(), expected);
}

#[test]
fn branch_scenario() {
    let source = fs::read_to_string("tests/fixtures/branches.cclr").unwrap();
    assert_eq!(
        compile(&source).unwrap(),
        "if (5):\n\t{\n\tif (6):\n\t\t{\n\t\tint num;\n\t\t}\n\t}\nelif (7 * 9):\n\t{\n\tbool is_true;\n\t}\nelse:\n\t{\n\tstr story;\n\t}\n"
    );
}

#[test]
fn branch_scenario_tree() {
    let source = fs::read_to_string("tests/fixtures/branches.cclr").unwrap();
    let script = parse_source(&source).unwrap();
    insta::assert_snapshot!(to_treeviz_str(&script), @r"
    ⧉ 1 statements
    └─ ⑂ 3 clauses
      ├─ ? if 5
      │ ├─ # 5
      │ └─ ⑂ 1 clauses
      │   └─ ? if 6
      │     ├─ # 6
      │     └─ ≔ num:int
      ├─ ? elif 7 * 9
      │ ├─ ± *
      │ │ ├─ # 7
      │ │ └─ # 9
      │ └─ ≔ is_true:bool
      └─ ? else
        └─ ≔ story:str
    ");
}

#[test]
fn program_with_spaces_and_int_return() {
    let source = fs::read_to_string("tests/fixtures/program.cclr").unwrap();
    let script = parse_source(&source).unwrap();
    let generator = Generator::new(GeneratorOptions {
        indent_unit: "    ".to_string(),
        return_type: "int".to_string(),
    });
    insta::assert_snapshot!(generator.generate(&script), @r"
    static const int var_name = 2 * 5 - ( 2 + 5 / 4 );
    int add(int a, float b)
        {
        float total = a + b;
        }
    ");
}

#[test]
fn else_alias_renders_as_else() {
    assert_eq!(
        compile("if a;\n\tb;\nels;\n\tc;\n").unwrap(),
        "if (a):\n\t{\n\tb;\n\t}\nelse:\n\t{\n\tc;\n\t}\n"
    );
}

#[test]
fn nested_function_body_keeps_header_indentation() {
    assert_eq!(
        compile("if x;\n\tfunc f(a:int);\n\t\ta;\n").unwrap(),
        "if (x):\n\t{\n\tvoid f(int a)\n\t\t{\n\t\ta;\n\t\t}\n\t}\n"
    );
}
