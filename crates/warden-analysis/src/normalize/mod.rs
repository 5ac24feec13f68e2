//! Chain normalization — per-language reducers from tree-sitter trees to
//! the unified call-chain form.
//!
//! The contract: given a parsed tree, produce every method chain in the
//! file as a [`UnifiedCallChain`], segments in receiver-to-tail order,
//! arguments reduced to [`chain::NormalizedArg`] values, nested chains
//! preserved recursively. Everything downstream of this module is
//! language-agnostic.

pub mod chain;
pub mod languages;
pub mod walker;

use tree_sitter::{Node, Tree};

use crate::scanner::Language;
use crate::types::FxHashMap;
pub use chain::{CallChainSegment, NormalizedArg, Span, UnifiedCallChain};
use walker::{CallParts, ChainGrammar};

/// A per-language chain reducer.
///
/// Most languages only supply their [`ChainGrammar`]; the shared walk in
/// [`walker`] does the rest. Languages whose grammar shape deviates from
/// the tables (PHP's three call kinds, for example) override
/// `decompose_call`.
pub trait ChainNormalizer: Send + Sync {
    fn language(&self) -> Language;

    /// The node-kind and field tables for this language's grammar.
    fn grammar(&self) -> &'static ChainGrammar;

    /// Split a call node into receiver, name, and argument list.
    fn decompose_call<'a>(&self, node: Node<'a>) -> Option<CallParts<'a>> {
        walker::decompose_default(self.grammar(), node)
    }

    /// Reduce one argument node to a normalized value.
    fn normalize_arg(&self, node: Node, source: &str, file: &str, max_depth: usize) -> NormalizedArg
    where
        Self: Sized,
    {
        walker::normalize_arg_default(self, node, source, file, max_depth)
    }

    /// Extract every chain in the file, in source order.
    fn normalize_file(
        &self,
        tree: &Tree,
        source: &str,
        file: &str,
        max_depth: usize,
    ) -> Vec<UnifiedCallChain>
    where
        Self: Sized,
    {
        walker::extract_chains(self, tree, source, file, max_depth)
    }
}

/// Normalizer lookup keyed by language.
pub struct NormalizerRegistry {
    normalizers: FxHashMap<Language, Box<dyn DynChainNormalizer>>,
}

/// Object-safe facade over [`ChainNormalizer`].
///
/// The trait's default methods are generic over `Self` so the shared walk
/// can call back into overrides statically; this shim re-exposes the two
/// entry points the pipeline needs behind a `dyn` pointer.
pub trait DynChainNormalizer: Send + Sync {
    fn language(&self) -> Language;
    fn normalize_file(
        &self,
        tree: &Tree,
        source: &str,
        file: &str,
        max_depth: usize,
    ) -> Vec<UnifiedCallChain>;
}

impl<T: ChainNormalizer + Sized> DynChainNormalizer for T {
    fn language(&self) -> Language {
        ChainNormalizer::language(self)
    }

    fn normalize_file(
        &self,
        tree: &Tree,
        source: &str,
        file: &str,
        max_depth: usize,
    ) -> Vec<UnifiedCallChain> {
        ChainNormalizer::normalize_file(self, tree, source, file, max_depth)
    }
}

impl NormalizerRegistry {
    pub fn new() -> Self {
        Self {
            normalizers: FxHashMap::default(),
        }
    }

    /// A registry holding all eight built-in language normalizers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(languages::typescript::TypeScriptNormalizer));
        registry.register(Box::new(languages::javascript::JavaScriptNormalizer));
        registry.register(Box::new(languages::python::PythonNormalizer));
        registry.register(Box::new(languages::java::JavaNormalizer));
        registry.register(Box::new(languages::csharp::CSharpNormalizer));
        registry.register(Box::new(languages::go::GoNormalizer));
        registry.register(Box::new(languages::ruby::RubyNormalizer));
        registry.register(Box::new(languages::php::PhpNormalizer));
        registry
    }

    /// Register a normalizer; a later registration for the same language
    /// replaces the earlier one.
    pub fn register(&mut self, normalizer: Box<dyn DynChainNormalizer>) {
        self.normalizers.insert(normalizer.language(), normalizer);
    }

    pub fn get(&self, language: Language) -> Option<&dyn DynChainNormalizer> {
        self.normalizers.get(&language).map(|n| n.as_ref())
    }

    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }
}

impl Default for NormalizerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
