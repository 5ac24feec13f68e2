//! Java chains: `method_invocation` carries its receiver and name
//! inline, so the inline decomposition applies.

use crate::normalize::walker::ChainGrammar;
use crate::normalize::ChainNormalizer;
use crate::scanner::Language;

static GRAMMAR: ChainGrammar = ChainGrammar {
    call_kinds: &["method_invocation"],
    member_kinds: &["field_access"],
    function_field: "function",
    object_field: "object",
    property_field: "field",
    arguments_field: "arguments",
    inline_receiver_field: Some("object"),
    inline_name_field: "name",
    string_kinds: &["string_literal"],
    number_kinds: &[
        "decimal_integer_literal",
        "decimal_floating_point_literal",
        "hex_integer_literal",
    ],
    bool_kinds: &["true", "false"],
    identifier_kinds: &["identifier", "this"],
    object_kinds: &[],
    pair_kinds: &[],
    pair_key_field: "key",
    pair_value_field: "value",
    array_kinds: &[],
};

pub struct JavaNormalizer;

impl ChainNormalizer for JavaNormalizer {
    fn language(&self) -> Language {
        Language::Java
    }

    fn grammar(&self) -> &'static ChainGrammar {
        &GRAMMAR
    }
}
