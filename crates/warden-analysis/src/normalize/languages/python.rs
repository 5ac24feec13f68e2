//! Python chains: `call` over `attribute`, keyword arguments normalized
//! as single-property objects so `filter(user_id=uid)` and an options
//! dict look the same to the matchers.

use crate::normalize::walker::ChainGrammar;
use crate::normalize::ChainNormalizer;
use crate::scanner::Language;

static GRAMMAR: ChainGrammar = ChainGrammar {
    call_kinds: &["call"],
    member_kinds: &["attribute"],
    function_field: "function",
    object_field: "object",
    property_field: "attribute",
    arguments_field: "arguments",
    inline_receiver_field: None,
    inline_name_field: "name",
    string_kinds: &["string", "concatenated_string"],
    number_kinds: &["integer", "float"],
    bool_kinds: &["true", "false"],
    identifier_kinds: &["identifier"],
    object_kinds: &["dictionary"],
    // keyword_argument carries its key in the "name" field; the walk
    // falls back to it when "key" is absent.
    pair_kinds: &["pair", "keyword_argument"],
    pair_key_field: "key",
    pair_value_field: "value",
    array_kinds: &["list", "tuple", "set"],
};

pub struct PythonNormalizer;

impl ChainNormalizer for PythonNormalizer {
    fn language(&self) -> Language {
        Language::Python
    }

    fn grammar(&self) -> &'static ChainGrammar {
        &GRAMMAR
    }
}
