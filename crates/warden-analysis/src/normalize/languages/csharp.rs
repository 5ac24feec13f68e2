//! C# chains: wrapped shape, `invocation_expression` over
//! `member_access_expression`.

use crate::normalize::walker::ChainGrammar;
use crate::normalize::ChainNormalizer;
use crate::scanner::Language;

static GRAMMAR: ChainGrammar = ChainGrammar {
    call_kinds: &["invocation_expression"],
    member_kinds: &["member_access_expression"],
    function_field: "function",
    object_field: "expression",
    property_field: "name",
    arguments_field: "arguments",
    inline_receiver_field: None,
    inline_name_field: "name",
    string_kinds: &[
        "string_literal",
        "verbatim_string_literal",
        "interpolated_string_expression",
        "raw_string_literal",
    ],
    number_kinds: &["integer_literal", "real_literal"],
    bool_kinds: &["boolean_literal"],
    identifier_kinds: &["identifier", "this_expression"],
    object_kinds: &[],
    pair_kinds: &[],
    pair_key_field: "key",
    pair_value_field: "value",
    array_kinds: &[],
};

pub struct CSharpNormalizer;

impl ChainNormalizer for CSharpNormalizer {
    fn language(&self) -> Language {
        Language::CSharp
    }

    fn grammar(&self) -> &'static ChainGrammar {
        &GRAMMAR
    }
}
