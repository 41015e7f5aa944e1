use std::io::{self, Write};

use super::ast::{Node, NodeKind};

/// Writes an indented, one-line-per-node dump of the tree.
pub fn print_tree(node: &Node, out: &mut dyn Write) -> io::Result<()> {
    print_node(node, 0, out)
}

fn print_node(node: &Node, depth: usize, out: &mut dyn Write) -> io::Result<()> {
    write!(out, "{}", "  ".repeat(depth))?;

    match &node.kind {
        NodeKind::Program { block } => {
            writeln!(out, "Program")?;
            print_node(block, depth + 1, out)
        }
        NodeKind::Block { constants, variables, procedures, statement } => {
            writeln!(out, "Block")?;
            for child in constants.iter().chain(variables).chain(procedures) {
                print_node(child, depth + 1, out)?;
            }
            print_optional(statement, depth + 1, out)
        }
        NodeKind::ConstDecl { name, value } => match &value.kind {
            NodeKind::Number { value } => writeln!(out, "Const Declaration: {} = {}", name, value),
            _ => {
                writeln!(out, "Const Declaration: {} =", name)?;
                print_node(value, depth + 1, out)
            }
        },
        NodeKind::VarDecl { name } => writeln!(out, "Var Declaration: {}", name),
        NodeKind::ProcDecl { name, block } => {
            writeln!(out, "Procedure Declaration: {}", name)?;
            print_node(block, depth + 1, out)
        }
        NodeKind::Assign { target, value } => {
            writeln!(out, "Assignment: {} :=", target)?;
            print_node(value, depth + 1, out)
        }
        NodeKind::Call { target } => writeln!(out, "Procedure Call: {}", target),
        NodeKind::Input { target } => writeln!(out, "Input: {}", target),
        NodeKind::Output { value } => {
            writeln!(out, "Output")?;
            print_node(value, depth + 1, out)
        }
        NodeKind::Compound { statements } => {
            writeln!(out, "Compound Statement")?;
            for statement in statements {
                print_node(statement, depth + 1, out)?;
            }
            Ok(())
        }
        NodeKind::If { condition, body } => {
            writeln!(out, "If Statement")?;
            print_node(condition, depth + 1, out)?;
            print_optional(body, depth + 1, out)
        }
        NodeKind::While { condition, body } => {
            writeln!(out, "While Loop")?;
            print_node(condition, depth + 1, out)?;
            print_optional(body, depth + 1, out)
        }
        NodeKind::Condition { operator, left, right } => {
            writeln!(out, "Condition: {}", operator)?;
            print_node(left, depth + 1, out)?;
            print_optional(right, depth + 1, out)
        }
        NodeKind::BinaryOp { operator, left, right } => {
            writeln!(out, "Binary Operation: {}", operator)?;
            print_node(left, depth + 1, out)?;
            print_node(right, depth + 1, out)
        }
        NodeKind::Number { value } => writeln!(out, "Number: {}", value),
        NodeKind::Identifier { name } => writeln!(out, "Identifier: {}", name),
    }
}

fn print_optional(node: &Option<Box<Node>>, depth: usize, out: &mut dyn Write) -> io::Result<()> {
    match node {
        Some(node) => print_node(node, depth, out),
        None => Ok(()),
    }
}
