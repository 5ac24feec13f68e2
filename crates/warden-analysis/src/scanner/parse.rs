//! Thin parse layer over tree-sitter.
//!
//! The grammar layer is an external collaborator; the only contract the
//! core requires is a tree the normalizers can walk structurally. Files
//! whose tree contains syntax errors are excluded from the pass.

use tree_sitter::{Parser, Tree};
use warden_core::errors::NormalizeError;

use super::language::Language;

/// Parse source text for the given language.
///
/// Returns `NormalizeError::SyntaxErrors` when the tree contains error
/// nodes; the caller excludes that file from the current scan and counts
/// the failure, per the recoverable-per-file error taxonomy.
pub fn parse_source(language: Language, source: &str, file: &str) -> Result<Tree, NormalizeError> {
    let ext = std::path::Path::new(file)
        .extension()
        .and_then(|e| e.to_str());

    let mut parser = Parser::new();
    parser
        .set_language(&language.ts_language_for_ext(ext))
        .map_err(|e| NormalizeError::ParserFailure {
            file: file.to_string(),
            message: e.to_string(),
        })?;

    let tree = parser
        .parse(source.as_bytes(), None)
        .ok_or_else(|| NormalizeError::ParserFailure {
            file: file.to_string(),
            message: "parser returned no tree".to_string(),
        })?;

    if tree.root_node().has_error() {
        let error_count = count_error_nodes(tree.root_node());
        return Err(NormalizeError::SyntaxErrors {
            file: file.to_string(),
            error_count,
        });
    }

    Ok(tree)
}

fn count_error_nodes(node: tree_sitter::Node) -> u32 {
    let mut count = if node.is_error() || node.is_missing() { 1 } else { 0 };
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            count += count_error_nodes(child);
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clean_typescript() {
        let tree = parse_source(Language::TypeScript, "const x = db.query('y');", "a.ts");
        assert!(tree.is_ok());
    }

    #[test]
    fn rejects_broken_source() {
        let err = parse_source(Language::TypeScript, "const = = (((", "a.ts").unwrap_err();
        assert!(matches!(err, NormalizeError::SyntaxErrors { .. }));
    }
}
