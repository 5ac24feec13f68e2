//! Go chains: wrapped shape, `call_expression` over
//! `selector_expression`.

use crate::normalize::walker::ChainGrammar;
use crate::normalize::ChainNormalizer;
use crate::scanner::Language;

static GRAMMAR: ChainGrammar = ChainGrammar {
    call_kinds: &["call_expression"],
    member_kinds: &["selector_expression"],
    function_field: "function",
    object_field: "operand",
    property_field: "field",
    arguments_field: "arguments",
    inline_receiver_field: None,
    inline_name_field: "name",
    string_kinds: &["interpreted_string_literal", "raw_string_literal"],
    number_kinds: &["int_literal", "float_literal"],
    bool_kinds: &["true", "false"],
    identifier_kinds: &["identifier", "field_identifier"],
    object_kinds: &[],
    pair_kinds: &[],
    pair_key_field: "key",
    pair_value_field: "value",
    array_kinds: &[],
};

pub struct GoNormalizer;

impl ChainNormalizer for GoNormalizer {
    fn language(&self) -> Language {
        Language::Go
    }

    fn grammar(&self) -> &'static ChainGrammar {
        &GRAMMAR
    }
}
