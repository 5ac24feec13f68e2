//! PHP chains: three call kinds with different shapes, so call
//! decomposition is overridden. `User::where(...)` is a
//! `scoped_call_expression`, `$db->table(...)` a
//! `member_call_expression`, and `query(...)` a
//! `function_call_expression`.

use tree_sitter::Node;

use crate::normalize::walker::{CallParts, ChainGrammar};
use crate::normalize::ChainNormalizer;
use crate::scanner::Language;

static GRAMMAR: ChainGrammar = ChainGrammar {
    call_kinds: &[
        "member_call_expression",
        "scoped_call_expression",
        "function_call_expression",
        "nullsafe_member_call_expression",
    ],
    member_kinds: &["member_access_expression", "nullsafe_member_access_expression"],
    function_field: "function",
    object_field: "object",
    property_field: "name",
    arguments_field: "arguments",
    inline_receiver_field: None,
    inline_name_field: "name",
    string_kinds: &["string", "encapsed_string"],
    number_kinds: &["integer", "float"],
    // Booleans surface as bare `name` nodes; the identifier fallback in
    // the shared walk handles them by text.
    bool_kinds: &[],
    identifier_kinds: &["variable_name", "name"],
    object_kinds: &[],
    pair_kinds: &[],
    pair_key_field: "key",
    pair_value_field: "value",
    array_kinds: &["array_creation_expression"],
};

pub struct PhpNormalizer;

impl ChainNormalizer for PhpNormalizer {
    fn language(&self) -> Language {
        Language::Php
    }

    fn grammar(&self) -> &'static ChainGrammar {
        &GRAMMAR
    }

    fn decompose_call<'a>(&self, node: Node<'a>) -> Option<CallParts<'a>> {
        let args = node.child_by_field_name("arguments");
        match node.kind() {
            "member_call_expression" | "nullsafe_member_call_expression" => Some(CallParts {
                receiver: node.child_by_field_name("object"),
                name: node.child_by_field_name("name"),
                args,
            }),
            "scoped_call_expression" => Some(CallParts {
                receiver: node.child_by_field_name("scope"),
                name: node.child_by_field_name("name"),
                args,
            }),
            "function_call_expression" => {
                let function = node.child_by_field_name("function")?;
                if function.kind() == "name" {
                    Some(CallParts {
                        receiver: None,
                        name: Some(function),
                        args,
                    })
                } else {
                    Some(CallParts {
                        receiver: Some(function),
                        name: None,
                        args,
                    })
                }
            }
            _ => None,
        }
    }
}
