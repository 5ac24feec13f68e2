//! JavaScript chains. The grammar tables are shared with TypeScript,
//! whose tree-sitter grammar is a superset of this one for the node
//! kinds the walk touches.

use crate::normalize::walker::ChainGrammar;
use crate::normalize::ChainNormalizer;
use crate::scanner::Language;

pub struct JavaScriptNormalizer;

impl ChainNormalizer for JavaScriptNormalizer {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn grammar(&self) -> &'static ChainGrammar {
        &super::typescript::GRAMMAR
    }
}
