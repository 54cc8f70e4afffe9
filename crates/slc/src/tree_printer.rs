//! Box-drawing rendering of a syntax tree, for humans.

use crate::ast::{Block, Expression, Program, Statement};

struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: vec![],
        }
    }

    fn with_children(label: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }
}

fn block_node(block: &Block) -> Node {
    Node::with_children("BLOCK", block.statements.iter().map(statement_node).collect())
}

fn statement_node(statement: &Statement) -> Node {
    match statement {
        Statement::Declaration {
            name, initializer, ..
        } => Node::with_children(
            format!("DECLARATION: {name}"),
            initializer.iter().map(expression_node).collect(),
        ),
        Statement::Assignment { name, value, .. } => {
            Node::with_children(format!("ASSIGNMENT: {name}"), vec![expression_node(value)])
        }
        Statement::If {
            condition,
            then_block,
            else_block,
            ..
        } => {
            let mut children = vec![
                Node::with_children("CONDITION:", vec![expression_node(condition)]),
                Node::with_children("THEN:", vec![block_node(then_block)]),
            ];
            if let Some(else_block) = else_block {
                children.push(Node::with_children("ELSE:", vec![block_node(else_block)]));
            }
            Node::with_children("IF", children)
        }
    }
}

fn expression_node(expr: &Expression) -> Node {
    match expr {
        Expression::BinaryOp {
            left,
            operator,
            right,
            ..
        } => Node::with_children(
            format!("BINARY_OP: {}", operator.token_kind().name()),
            vec![expression_node(left), expression_node(right)],
        ),
        Expression::Number { value, .. } => Node::leaf(format!("NUMBER: {value}")),
        Expression::Identifier { name, .. } => Node::leaf(format!("IDENTIFIER: {name}")),
    }
}

fn render_children(out: &mut String, children: &[Node], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        out.push_str(prefix);
        out.push_str(if is_last { "└── " } else { "├── " });
        out.push_str(&child.label);
        out.push('\n');

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        render_children(out, &child.children, &child_prefix);
    }
}

pub fn render_tree(program: &Program) -> String {
    let root = Node::with_children(
        "PROGRAM",
        program.statements.iter().map(statement_node).collect(),
    );
    let mut out = format!("{}\n", root.label);
    render_children(&mut out, &root.children, "");
    out
}
