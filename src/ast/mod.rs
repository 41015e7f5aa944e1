/// AST (Abstract Syntax Tree) module
/// Contains the syntax tree consumed by both analysis passes
///
/// Submodules:
/// - ast: Node and operator definitions
/// - printer: Indented debug dump of a tree
pub mod ast;
pub mod printer;
