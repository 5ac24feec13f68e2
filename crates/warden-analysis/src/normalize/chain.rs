//! The unified call-chain intermediate representation.
//!
//! Every language normalizer reduces method-chain expressions like
//! `supabase.from('users').select('id,email')` to this one shape so the
//! matcher registry never sees a language-specific AST.

use serde::{Deserialize, Serialize};

use crate::scanner::Language;

/// Source span of a chain, 1-based lines and columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub file: String,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

/// A call argument reduced to a typed value.
///
/// Object/array members normalize recursively; a call expression used as
/// an argument carries its own nested chain so a subquery can be
/// classified independently of the chain it is embedded in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NormalizedArg {
    String { value: String },
    Number { value: f64 },
    Boolean { value: bool },
    Object { properties: Vec<(String, NormalizedArg)> },
    Array { elements: Vec<NormalizedArg> },
    Identifier { name: String },
    Call { chain: Box<UnifiedCallChain> },
    Unknown,
}

impl NormalizedArg {
    /// The string value, if this is a string literal.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            NormalizedArg::String { value } => Some(value),
            _ => None,
        }
    }

    /// Top-level property keys, if this is an object literal.
    pub fn object_keys(&self) -> Vec<&str> {
        match self {
            NormalizedArg::Object { properties } => {
                properties.iter().map(|(k, _)| k.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Look up a property value by key, if this is an object literal.
    pub fn property(&self, key: &str) -> Option<&NormalizedArg> {
        match self {
            NormalizedArg::Object { properties } => properties
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

/// One `.name(...)` or `.name` step of a chain, in source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallChainSegment {
    pub name: String,
    /// Distinguishes invocation from property access.
    pub is_call: bool,
    /// Empty for non-calls.
    #[serde(default)]
    pub args: Vec<NormalizedArg>,
}

impl CallChainSegment {
    /// First string-literal argument, the common place for a table name.
    pub fn first_string_arg(&self) -> Option<&str> {
        self.args.iter().find_map(|a| a.as_string())
    }

    /// All string-literal arguments.
    pub fn string_args(&self) -> Vec<&str> {
        self.args.iter().filter_map(|a| a.as_string()).collect()
    }
}

/// A method-chain expression in language-agnostic form.
///
/// Invariants: `segments` is non-empty, `receiver` is non-empty, and the
/// receiver-adjacent segment comes first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedCallChain {
    /// Root identifier the chain starts from (`supabase`, `User`, `this`,
    /// or the textual form of an opaque root expression).
    pub receiver: String,
    pub segments: Vec<CallChainSegment>,
    pub span: Span,
    pub language: Language,
    /// Set when the walk hit `max_chain_depth`; scored with reduced
    /// confidence downstream rather than dropped.
    #[serde(default)]
    pub truncated: bool,
    /// Textual form of the whole expression, used as the context snippet.
    pub full_expression: String,
}

impl UnifiedCallChain {
    /// Find a segment by name.
    pub fn segment(&self, name: &str) -> Option<&CallChainSegment> {
        self.segments.iter().find(|s| s.name == name)
    }

    /// Index of the first segment with the given name.
    pub fn segment_index(&self, name: &str) -> Option<usize> {
        self.segments.iter().position(|s| s.name == name)
    }

    /// The last invocation segment, which usually names the operation.
    pub fn last_call(&self) -> Option<&CallChainSegment> {
        self.segments.iter().rev().find(|s| s.is_call)
    }

    /// All chains nested inside call arguments, recursively, in source
    /// order. Each is resolved through the matcher registry independently
    /// so subqueries produce their own access points.
    pub fn nested_chains(&self) -> Vec<&UnifiedCallChain> {
        let mut found = Vec::new();
        for segment in &self.segments {
            for arg in &segment.args {
                collect_nested(arg, &mut found);
            }
        }
        found
    }
}

fn collect_nested<'a>(arg: &'a NormalizedArg, found: &mut Vec<&'a UnifiedCallChain>) {
    match arg {
        NormalizedArg::Call { chain } => {
            found.push(chain);
            for nested in chain.nested_chains() {
                found.push(nested);
            }
        }
        NormalizedArg::Object { properties } => {
            for (_, value) in properties {
                collect_nested(value, found);
            }
        }
        NormalizedArg::Array { elements } => {
            for element in elements {
                collect_nested(element, found);
            }
        }
        _ => {}
    }
}
