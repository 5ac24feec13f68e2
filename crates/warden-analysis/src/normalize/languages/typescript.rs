//! TypeScript chains: wrapped call shape, `call_expression` over
//! `member_expression`.

use crate::normalize::walker::ChainGrammar;
use crate::normalize::ChainNormalizer;
use crate::scanner::Language;

pub(crate) static GRAMMAR: ChainGrammar = ChainGrammar {
    call_kinds: &["call_expression"],
    member_kinds: &["member_expression"],
    function_field: "function",
    object_field: "object",
    property_field: "property",
    arguments_field: "arguments",
    inline_receiver_field: None,
    inline_name_field: "name",
    string_kinds: &["string", "template_string"],
    number_kinds: &["number"],
    bool_kinds: &["true", "false"],
    identifier_kinds: &["identifier", "this", "property_identifier"],
    object_kinds: &["object"],
    pair_kinds: &["pair"],
    pair_key_field: "key",
    pair_value_field: "value",
    array_kinds: &["array"],
};

pub struct TypeScriptNormalizer;

impl ChainNormalizer for TypeScriptNormalizer {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn grammar(&self) -> &'static ChainGrammar {
        &GRAMMAR
    }
}
