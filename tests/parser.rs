//! Parser integration tests: tree shapes and indentation diagnostics

use cclear::cclear::ast::{AstNode, Command};
use cclear::cclear::error::ErrorKind;
use cclear::cclear::pipeline::compile;
use cclear::cclear::testing::{assert_script, parse_err, parse_ok};
use std::fs;

/// Prefix form of an expression tree, e.g. `-(1, +(2, 3))`
fn prefix(command: &Command) -> String {
    match command {
        Command::BinaryExpression(expr) => {
            format!("{}({}, {})", expr.op, prefix(&expr.left), prefix(&expr.right))
        }
        Command::Group(group) => format!("({})", prefix(&group.left)),
        Command::ExpressionStatement(statement) => prefix(&statement.expression),
        other => other.display_label(),
    }
}

#[test]
fn subtraction_is_the_loosest_operator() {
    let script = parse_ok("1 - 2 + 3;");
    assert_eq!(prefix(&script.body[0]), "-(1, +(2, 3))");
}

#[test]
fn multiplication_binds_tighter_than_division() {
    let script = parse_ok("8 / 2 * 4;");
    assert_eq!(prefix(&script.body[0]), "/(8, *(2, 4))");
}

#[test]
fn parentheses_override_precedence() {
    let script = parse_ok("(1 - 2) + 3;");
    assert_eq!(prefix(&script.body[0]), "+((-(1, 2)), 3)");
}

#[test]
fn branch_scenario_tree() {
    let source = fs::read_to_string("tests/fixtures/branches.cclr").unwrap();
    let script = parse_ok(&source);

    assert_script(&script).statement_count(1).statement(0, |stmt| {
        stmt.indent(0)
            .assert_if_chain()
            .clause_count(3)
            .clause(0, |clause| {
                clause
                    .keyword("if")
                    .condition("5")
                    .block_indent(1)
                    .statement_count(1)
                    .statement(0, |inner| {
                        inner.assert_if_chain().clause(0, |nested| {
                            nested
                                .keyword("if")
                                .condition("6")
                                .block_indent(2)
                                .statement(0, |decl| {
                                    decl.assert_var_declaration()
                                        .name("num")
                                        .var_type("int")
                                        .unassigned();
                                });
                        });
                    });
            })
            .clause(1, |clause| {
                clause.keyword("elif").condition("7 * 9").statement(0, |decl| {
                    decl.assert_var_declaration().name("is_true").var_type("bool");
                });
            })
            .clause(2, |clause| {
                clause.keyword("else").is_else().statement(0, |decl| {
                    decl.assert_var_declaration().name("story").var_type("str");
                });
            });
    });
}

#[test]
fn program_fixture() {
    let source = fs::read_to_string("tests/fixtures/program.cclr").unwrap();
    let script = parse_ok(&source);

    assert_script(&script)
        .statement_count(2)
        .statement(0, |stmt| {
            stmt.assert_var_declaration()
                .name("var_name")
                .options(&["static", "const"])
                .assigned("2 * 5 - ( 2 + 5 / 4 )");
        })
        .statement(1, |stmt| {
            stmt.assert_function()
                .name("add")
                .parameters(&["a:int", "b:float"])
                .block_indent(1)
                .statement_count(1)
                .statement(0, |inner| {
                    inner.assert_var_declaration().name("total").assigned("a + b");
                });
        });
}

#[test]
fn statements_after_a_block_return_to_the_outer_scope() {
    let script = parse_ok("if x;\n\ty;\nz;\n");
    assert_script(&script)
        .statement_count(2)
        .statement(1, |stmt| {
            stmt.indent(0).assert_expression("z");
        });
}

#[test]
fn deeper_statement_is_an_unexpected_indent() {
    let err = parse_err("alc x:int;\n\talc y:int;\n");
    assert_eq!(err.kind, ErrorKind::UnexpectedIndent);
    assert_eq!((err.row(), err.col()), (2, 1));
}

#[test]
fn shallower_token_inside_a_statement_is_an_abrupt_dedent() {
    let err = parse_err("if 5;\n\talc x:int =\n1;\n");
    assert_eq!(err.kind, ErrorKind::AbruptDedent);
    assert_eq!(err.token.text, "1");
    assert_eq!(err.row(), 3);
}

#[test]
fn nested_header_without_block_is_an_abrupt_dedent() {
    let err = parse_err("if a;\n\tif b;\nc;\n");
    assert_eq!(err.kind, ErrorKind::AbruptDedent);
    assert_eq!(err.token.text, "c");
    assert_eq!(err.row(), 3);
}

#[test]
fn dedent_below_the_script_is_unexpected() {
    let err = parse_err("\talc x:int;\nalc y:int;\n");
    assert_eq!(err.kind, ErrorKind::UnexpectedDedent);
    assert_eq!(err.row(), 2);
}

#[test]
fn header_without_block() {
    let source = fs::read_to_string("tests/fixtures/missing_block.cclr").unwrap();
    let err = parse_err(&source);
    assert_eq!(err.kind, ErrorKind::ExpectedBlock);
    assert_eq!(err.message, "expected an indented block");
    assert_eq!(err.token.text, "alc");
}

#[test]
fn header_at_end_of_input() {
    let err = parse_err("func main();");
    assert_eq!(err.kind, ErrorKind::ExpectedBlock);
    assert_eq!(err.row(), 1);
}

#[test]
fn missing_condition() {
    let err = parse_err("if;\n\tx;\n");
    assert_eq!(err.kind, ErrorKind::Expected);
    assert_eq!(err.message, "expected a condition after 'if'");
}

#[test]
fn long_operator_runs_compile_on_a_spawned_thread() {
    let terms = "1 + ".repeat(500);
    let source = format!("alc x:int = {}1;", terms);
    let cpp = std::thread::spawn(move || compile(&source))
        .join()
        .expect("compiling on a worker thread")
        .unwrap();
    assert_eq!(cpp, format!("int x = {}1;\n", terms));
}

#[test]
fn deep_parentheses_are_a_diagnostic() {
    let source = format!("alc x:int = {}1{};", "(".repeat(300), ")".repeat(300));
    let err = std::thread::spawn(move || parse_err(&source))
        .join()
        .expect("parsing on a worker thread");
    assert_eq!(err.kind, ErrorKind::TooDeep);
    assert_eq!(err.row(), 1);
}
