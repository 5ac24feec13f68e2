//! Ruby chains: a `call` node carries receiver and method inline, and a
//! parenless `user.posts` is still a `call`, so there are no separate
//! member kinds.

use crate::normalize::walker::ChainGrammar;
use crate::normalize::ChainNormalizer;
use crate::scanner::Language;

static GRAMMAR: ChainGrammar = ChainGrammar {
    call_kinds: &["call"],
    member_kinds: &[],
    function_field: "function",
    object_field: "receiver",
    property_field: "method",
    arguments_field: "arguments",
    inline_receiver_field: Some("receiver"),
    inline_name_field: "method",
    string_kinds: &["string", "simple_symbol"],
    number_kinds: &["integer", "float"],
    bool_kinds: &["true", "false"],
    identifier_kinds: &["identifier", "constant", "self"],
    object_kinds: &["hash"],
    pair_kinds: &["pair"],
    pair_key_field: "key",
    pair_value_field: "value",
    array_kinds: &["array"],
};

pub struct RubyNormalizer;

impl ChainNormalizer for RubyNormalizer {
    fn language(&self) -> Language {
        Language::Ruby
    }

    fn grammar(&self) -> &'static ChainGrammar {
        &GRAMMAR
    }
}
