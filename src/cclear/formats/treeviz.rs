//! Treeviz formatter for CClear syntax trees
//!
//! One line per node, nesting shown with box-drawing connectors (2 columns per level):
//!
//!     ⧉ 3 statements
//!     ├─ ≔ var_name:int
//!     │ └─ = =
//!     │   └─ ± -
//!     ├─ ⑂ 2 clauses
//!     │ ├─ ? if 5
//!     ...
//!
//! Icons
//!     Script: ⧉
//!     CodeBlock: ▤
//!     VarDeclaration: ≔
//!     Assignment: =
//!     IfChain: ⑂
//!     IfStatement: ?
//!     FunctionDef: ƒ
//!     ExpressionStatement: ⏎
//!     BinaryExpression: ±
//!     Group: ()
//!     NumericLiteral: #
//!     Identifier: ◦
//!     TokenList: ☰
//!     VarTypeSpecifier: :

use crate::cclear::ast::{snapshot_from_script, AstSnapshot, Script};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Script" => "⧉",
        "CodeBlock" => "▤",
        "VarDeclaration" => "≔",
        "Assignment" => "=",
        "IfChain" => "⑂",
        "IfStatement" => "?",
        "FunctionDef" => "ƒ",
        "ExpressionStatement" => "⏎",
        "BinaryExpression" => "±",
        "Group" => "()",
        "NumericLiteral" => "#",
        "Identifier" => "◦",
        "TokenList" => "☰",
        "VarTypeSpecifier" => ":",
        _ => "○",
    }
}

fn format_snapshot(
    snapshot: &AstSnapshot,
    prefix: &str,
    is_last: bool,
    show_linum: bool,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    let linum_prefix = match (show_linum, snapshot.row) {
        (true, Some(row)) => format!("{:02} ", row),
        (true, None) => "   ".to_string(),
        (false, _) => String::new(),
    };

    output.push_str(&format!(
        "{}{}{} {} {}\n",
        linum_prefix,
        prefix,
        connector,
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, 30)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, &child_prefix, i + 1 == count, show_linum, output);
    }
}

/// Renders a script as a tree
pub fn to_treeviz_str(script: &Script) -> String {
    to_treeviz_str_with_linum(script, false)
}

/// Renders a script as a tree, optionally prefixing every line with the node's source row
pub fn to_treeviz_str_with_linum(script: &Script, show_linum: bool) -> String {
    let snapshot = snapshot_from_script(script);
    let mut output = format!(
        "{} {}\n",
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, 30)
    );

    let count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, "", i + 1 == count, show_linum, &mut output);
    }
    output
}
