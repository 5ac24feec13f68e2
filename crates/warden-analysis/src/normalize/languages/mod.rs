//! The eight built-in language normalizers.
//!
//! Each module is a grammar table plus, where the tree-sitter grammar
//! deviates from the common wrapped call shape, a `decompose_call`
//! override.

pub mod csharp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod php;
pub mod python;
pub mod ruby;
pub mod typescript;
