//! Shared chain-extraction walk, driven by per-language grammar tables.
//!
//! Each language normalizer supplies a [`ChainGrammar`] naming the node
//! kinds and fields of its tree-sitter grammar; the walk itself is the
//! same for all eight languages. Languages whose call nodes carry the
//! receiver inline (Java, Ruby, PHP) override `decompose_call` or set
//! the inline fields.

use tree_sitter::{Node, Tree};

use super::chain::{CallChainSegment, NormalizedArg, Span, UnifiedCallChain};
use super::ChainNormalizer;

/// Node-kind and field-name tables for one language grammar.
pub struct ChainGrammar {
    /// Kinds of call-expression nodes.
    pub call_kinds: &'static [&'static str],
    /// Kinds of member/property-access nodes.
    pub member_kinds: &'static [&'static str],
    /// Field holding the callee on a call node (wrapped shape).
    pub function_field: &'static str,
    /// Field holding the object on a member node.
    pub object_field: &'static str,
    /// Field holding the property name on a member node.
    pub property_field: &'static str,
    /// Field holding the argument list on a call node.
    pub arguments_field: &'static str,
    /// For inline-shaped calls (receiver and method live on the call node
    /// itself): the receiver field. `None` selects the wrapped shape.
    pub inline_receiver_field: Option<&'static str>,
    /// For inline-shaped calls: the method-name field.
    pub inline_name_field: &'static str,
    pub string_kinds: &'static [&'static str],
    pub number_kinds: &'static [&'static str],
    pub bool_kinds: &'static [&'static str],
    pub identifier_kinds: &'static [&'static str],
    pub object_kinds: &'static [&'static str],
    pub pair_kinds: &'static [&'static str],
    pub pair_key_field: &'static str,
    pub pair_value_field: &'static str,
    pub array_kinds: &'static [&'static str],
}

/// A call node decomposed into the pieces the walk needs.
pub struct CallParts<'a> {
    /// Node the chain continues into (the receiver side). `None` for a
    /// direct call on an identifier, which roots the chain.
    pub receiver: Option<Node<'a>>,
    /// Method/function name node. `None` when the callee is opaque.
    pub name: Option<Node<'a>>,
    pub args: Option<Node<'a>>,
}

/// Default call decomposition from the grammar tables.
pub fn decompose_default<'a>(grammar: &ChainGrammar, node: Node<'a>) -> Option<CallParts<'a>> {
    let args = node.child_by_field_name(grammar.arguments_field);

    if let Some(receiver_field) = grammar.inline_receiver_field {
        return Some(CallParts {
            receiver: node.child_by_field_name(receiver_field),
            name: node.child_by_field_name(grammar.inline_name_field),
            args,
        });
    }

    let function = node.child_by_field_name(grammar.function_field)?;
    if grammar.member_kinds.contains(&function.kind()) {
        Some(CallParts {
            receiver: function.child_by_field_name(grammar.object_field),
            name: function.child_by_field_name(grammar.property_field),
            args,
        })
    } else if grammar.identifier_kinds.contains(&function.kind()) {
        Some(CallParts {
            receiver: None,
            name: Some(function),
            args,
        })
    } else {
        // Opaque or curried callee: continue into it without a segment.
        Some(CallParts {
            receiver: Some(function),
            name: None,
            args,
        })
    }
}

/// Extract every top-level chain in the file, in source order.
pub fn extract_chains<N: ChainNormalizer>(
    norm: &N,
    tree: &Tree,
    source: &str,
    file: &str,
    max_depth: usize,
) -> Vec<UnifiedCallChain> {
    let mut chains = Vec::new();
    visit(norm, tree.root_node(), source, file, max_depth, &mut chains);
    chains
}

fn visit<N: ChainNormalizer>(
    norm: &N,
    node: Node,
    source: &str,
    file: &str,
    max_depth: usize,
    out: &mut Vec<UnifiedCallChain>,
) {
    let grammar = norm.grammar();
    let kind = node.kind();
    // A chain may also end in a property access (`db.query(..).rows`);
    // such a member node heads the chain when its object side is a call.
    let chain_shaped = grammar.call_kinds.contains(&kind)
        || (grammar.member_kinds.contains(&kind)
            && node
                .child_by_field_name(grammar.object_field)
                .is_some_and(|o| grammar.call_kinds.contains(&o.kind())));
    let is_head =
        chain_shaped && !is_chain_link(norm, node) && !is_captured_argument(norm, node);

    if is_head {
        if let Some(chain) = build_chain(norm, node, source, file, max_depth) {
            out.push(chain);
        }
    }

    // Keep walking below call heads: chains inside callback bodies are
    // not reachable through argument normalization and must still be
    // found. Direct argument expressions are filtered out above.
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(norm, child, source, file, max_depth, out);
    }
}

/// True when `node` is the receiver/callee side of an enclosing chain,
/// i.e. already captured as part of a longer chain.
fn is_chain_link<N: ChainNormalizer>(norm: &N, node: Node) -> bool {
    let grammar = norm.grammar();
    let Some(parent) = node.parent() else {
        return false;
    };
    if grammar.member_kinds.contains(&parent.kind()) {
        if let Some(object) = parent.child_by_field_name(grammar.object_field) {
            if object.id() == node.id() {
                return true;
            }
        }
    }
    if grammar.call_kinds.contains(&parent.kind()) {
        if let Some(parts) = norm.decompose_call(parent) {
            if parts.receiver.map(|r| r.id()) == Some(node.id()) {
                return true;
            }
        }
        if parent
            .child_by_field_name(grammar.function_field)
            .map(|f| f.id())
            == Some(node.id())
        {
            return true;
        }
    }
    false
}

/// True when `node` sits in direct argument position of an enclosing call
/// (possibly through object/array/pair literals). Such nodes are captured
/// as `NormalizedArg::Call` and resolved independently; re-emitting them
/// as top-level chains would double-count.
fn is_captured_argument<N: ChainNormalizer>(norm: &N, node: Node) -> bool {
    let grammar = norm.grammar();
    let mut current = node;
    while let Some(parent) = current.parent() {
        let kind = parent.kind();
        if grammar.object_kinds.contains(&kind)
            || grammar.array_kinds.contains(&kind)
            || grammar.pair_kinds.contains(&kind)
            || kind == "argument"
        {
            current = parent;
            continue;
        }
        if let Some(grandparent) = parent.parent() {
            if grammar.call_kinds.contains(&grandparent.kind()) {
                let args_id = grandparent
                    .child_by_field_name(grammar.arguments_field)
                    .map(|a| a.id());
                if args_id == Some(parent.id()) {
                    return true;
                }
            }
        }
        return false;
    }
    false
}

/// Walk one chain downward from its head to its root, then reverse so the
/// receiver-adjacent segment comes first.
pub fn build_chain<N: ChainNormalizer>(
    norm: &N,
    head: Node,
    source: &str,
    file: &str,
    max_depth: usize,
) -> Option<UnifiedCallChain> {
    let grammar = norm.grammar();
    let mut segments: Vec<CallChainSegment> = Vec::new();
    let mut truncated = false;
    let mut current = head;

    let receiver = loop {
        if segments.len() >= max_depth {
            truncated = true;
            break node_text(current, source);
        }

        if grammar.call_kinds.contains(&current.kind()) {
            let Some(parts) = norm.decompose_call(current) else {
                break node_text(current, source);
            };
            match parts.name {
                Some(name) => {
                    let args = parts
                        .args
                        .map(|a| normalize_args(norm, a, source, file, max_depth))
                        .unwrap_or_default();
                    segments.push(CallChainSegment {
                        name: node_text(name, source),
                        is_call: true,
                        args,
                    });
                    match parts.receiver {
                        Some(receiver) => current = receiver,
                        // Direct call on an identifier: the identifier is
                        // both the root and the segment name.
                        None => break node_text(name, source),
                    }
                }
                None => match parts.receiver {
                    Some(receiver) => current = receiver,
                    None => break node_text(current, source),
                },
            }
        } else if grammar.member_kinds.contains(&current.kind()) {
            let property = current.child_by_field_name(grammar.property_field);
            let object = current.child_by_field_name(grammar.object_field);
            match property {
                Some(property) => {
                    segments.push(CallChainSegment {
                        name: node_text(property, source),
                        is_call: false,
                        args: Vec::new(),
                    });
                    match object {
                        Some(object) => current = object,
                        None => break node_text(current, source),
                    }
                }
                None => break node_text(current, source),
            }
        } else {
            break node_text(current, source);
        }
    };

    segments.reverse();
    segments.retain(|s| !s.name.is_empty());
    if segments.is_empty() || receiver.is_empty() {
        return None;
    }

    Some(UnifiedCallChain {
        receiver,
        segments,
        span: span_of(head, file),
        language: norm.language(),
        truncated,
        full_expression: node_text(head, source),
    })
}

fn normalize_args<N: ChainNormalizer>(
    norm: &N,
    args: Node,
    source: &str,
    file: &str,
    max_depth: usize,
) -> Vec<NormalizedArg> {
    let mut out = Vec::new();
    let mut cursor = args.walk();
    for child in args.named_children(&mut cursor) {
        if child.kind() == "comment" {
            continue;
        }
        out.push(norm.normalize_arg(child, source, file, max_depth));
    }
    out
}

/// Default argument normalization from the grammar tables.
pub fn normalize_arg_default<N: ChainNormalizer>(
    norm: &N,
    node: Node,
    source: &str,
    file: &str,
    max_depth: usize,
) -> NormalizedArg {
    let grammar = norm.grammar();

    // C# and PHP wrap each argument expression in an `argument` node;
    // unwrap to the expression (the last named child, past any arg name).
    let mut node = node;
    while node.kind() == "argument" {
        let count = node.named_child_count();
        match count.checked_sub(1).and_then(|i| node.named_child(i)) {
            Some(inner) => node = inner,
            None => return NormalizedArg::Unknown,
        }
    }
    let kind = node.kind();

    if grammar.string_kinds.contains(&kind) {
        return NormalizedArg::String {
            value: strip_quotes(&node_text(node, source)),
        };
    }
    if grammar.number_kinds.contains(&kind) {
        let text = node_text(node, source).replace('_', "");
        return match text.parse::<f64>() {
            Ok(value) => NormalizedArg::Number { value },
            Err(_) => NormalizedArg::Unknown,
        };
    }
    if grammar.bool_kinds.contains(&kind) {
        let text = node_text(node, source);
        return NormalizedArg::Boolean {
            value: text.eq_ignore_ascii_case("true"),
        };
    }
    if grammar.pair_kinds.contains(&kind) {
        let key = node
            .child_by_field_name(grammar.pair_key_field)
            .or_else(|| node.child_by_field_name("name"))
            .map(|k| clean_key(&node_text(k, source)))
            .unwrap_or_default();
        let value = node
            .child_by_field_name(grammar.pair_value_field)
            .map(|v| norm.normalize_arg(v, source, file, max_depth))
            .unwrap_or(NormalizedArg::Unknown);
        if key.is_empty() {
            return NormalizedArg::Unknown;
        }
        return NormalizedArg::Object {
            properties: vec![(key, value)],
        };
    }
    if grammar.object_kinds.contains(&kind) {
        let mut properties = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if grammar.pair_kinds.contains(&child.kind()) {
                if let NormalizedArg::Object { properties: mut p } =
                    norm.normalize_arg(child, source, file, max_depth)
                {
                    properties.append(&mut p);
                }
            } else if child.kind() == "shorthand_property_identifier" {
                // `{ email }` names both the key and the value.
                let name = node_text(child, source);
                properties.push((name.clone(), NormalizedArg::Identifier { name }));
            }
        }
        return NormalizedArg::Object { properties };
    }
    if grammar.array_kinds.contains(&kind) {
        let mut elements = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            elements.push(norm.normalize_arg(child, source, file, max_depth));
        }
        return NormalizedArg::Array { elements };
    }
    if grammar.call_kinds.contains(&kind) || grammar.member_kinds.contains(&kind) {
        // Bound nested recursion: a chain inside an argument consumes one
        // level of the depth budget.
        if max_depth == 0 {
            return NormalizedArg::Unknown;
        }
        return match build_chain(norm, node, source, file, max_depth - 1) {
            Some(chain) => NormalizedArg::Call {
                chain: Box::new(chain),
            },
            None => NormalizedArg::Unknown,
        };
    }
    if grammar.identifier_kinds.contains(&kind) {
        let text = node_text(node, source);
        // PHP spells booleans as bare names.
        if text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("false") {
            return NormalizedArg::Boolean {
                value: text.eq_ignore_ascii_case("true"),
            };
        }
        return NormalizedArg::Identifier { name: text };
    }
    NormalizedArg::Unknown
}

pub fn node_text(node: Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}

fn span_of(node: Node, file: &str) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span {
        file: file.to_string(),
        start_line: start.row as u32 + 1,
        start_column: start.column as u32 + 1,
        end_line: end.row as u32 + 1,
        end_column: end.column as u32 + 1,
    }
}

/// Strip quote characters, literal prefixes (`f"…"`, `@"…"`, `rb'…'`),
/// and symbol colons. Unquoted text passes through untouched so bare
/// keys and symbols keep their spelling.
fn strip_quotes(text: &str) -> String {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix(':').unwrap_or(trimmed);
    if let Some(idx) = trimmed.find(['"', '\'', '`']) {
        let prefix_ok = idx <= 2
            && trimmed[..idx]
                .chars()
                .all(|c| matches!(c, 'f' | 'F' | 'r' | 'R' | 'b' | 'B' | 'u' | 'U' | '@' | '$'));
        if prefix_ok {
            let quoted = &trimmed[idx..];
            let quote = quoted.chars().next().unwrap_or('"');
            if quoted.len() >= 2 && quoted.ends_with(quote) {
                return quoted[1..quoted.len() - 1].to_string();
            }
        }
    }
    trimmed.to_string()
}

/// Clean an object/kwarg key: quotes, symbol colons, lookup noise.
fn clean_key(text: &str) -> String {
    strip_quotes(text)
        .trim_end_matches(':')
        .trim_start_matches(':')
        .to_string()
}
