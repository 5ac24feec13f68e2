//! Chain extraction across the eight languages.

use warden_analysis::normalize::{NormalizedArg, NormalizerRegistry, UnifiedCallChain};
use warden_analysis::scanner::{parse_source, Language};

fn chains(language: Language, source: &str, path: &str) -> Vec<UnifiedCallChain> {
    let registry = NormalizerRegistry::with_builtins();
    let tree = parse_source(language, source, path).expect("source parses");
    registry
        .get(language)
        .expect("normalizer registered")
        .normalize_file(&tree, source, path, 32)
}

#[test]
fn typescript_chain_has_receiver_and_ordered_segments() {
    let found = chains(
        Language::TypeScript,
        "supabase.from('users').select('id,ssn');",
        "app.ts",
    );
    assert_eq!(found.len(), 1);
    let chain = &found[0];
    assert_eq!(chain.receiver, "supabase");
    let names: Vec<&str> = chain.segments.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["from", "select"]);
    assert!(chain.segments.iter().all(|s| s.is_call));
    assert_eq!(chain.segments[0].first_string_arg(), Some("users"));
    assert_eq!(chain.span.start_line, 1);
    assert!(!chain.truncated);
}

#[test]
fn typescript_object_arguments_normalize_recursively() {
    let found = chains(
        Language::TypeScript,
        "prisma.user.findMany({ where: { email: 'x' }, take: 10 });",
        "app.ts",
    );
    assert_eq!(found.len(), 1);
    let find_many = found[0].segment("findMany").unwrap();
    let arg = &find_many.args[0];
    assert_eq!(arg.object_keys(), vec!["where", "take"]);
    let where_clause = arg.property("where").unwrap();
    assert_eq!(where_clause.object_keys(), vec!["email"]);
    assert!(matches!(
        arg.property("take"),
        Some(NormalizedArg::Number { value }) if *value == 10.0
    ));
}

#[test]
fn python_keyword_arguments_become_object_properties() {
    let found = chains(
        Language::Python,
        "User.objects.filter(email=address)\n",
        "app.py",
    );
    assert_eq!(found.len(), 1);
    let chain = &found[0];
    assert_eq!(chain.receiver, "User");
    assert_eq!(chain.segments[0].name, "objects");
    assert!(!chain.segments[0].is_call);
    let filter = chain.segment("filter").unwrap();
    assert_eq!(filter.args[0].object_keys(), vec!["email"]);
}

#[test]
fn ruby_parenless_calls_are_still_segments() {
    let found = chains(
        Language::Ruby,
        "User.where(email: address).first\n",
        "app.rb",
    );
    assert_eq!(found.len(), 1);
    let chain = &found[0];
    assert_eq!(chain.receiver, "User");
    let names: Vec<&str> = chain.segments.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["where", "first"]);
    assert_eq!(chain.segment("where").unwrap().args[0].object_keys(), vec!["email"]);
}

#[test]
fn java_inline_invocations_chain() {
    let source = r#"
class Repo {
    void load() {
        userRepository.findByEmail(email);
    }
}
"#;
    let found = chains(Language::Java, source, "Repo.java");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].receiver, "userRepository");
    assert_eq!(found[0].segments[0].name, "findByEmail");
}

#[test]
fn csharp_dbset_property_is_a_non_call_segment() {
    let source = r#"
class UserService {
    void Load() {
        _context.Users.Where(u => u.Active).ToList();
    }
}
"#;
    let found = chains(Language::CSharp, source, "UserService.cs");
    assert_eq!(found.len(), 1);
    let chain = &found[0];
    assert_eq!(chain.receiver, "_context");
    assert_eq!(chain.segments[0].name, "Users");
    assert!(!chain.segments[0].is_call);
    assert_eq!(chain.segments[1].name, "Where");
}

#[test]
fn go_selector_chains_extract() {
    let source = r#"
package main

func load() {
    db.Table("users").Where("email = ?", e).Find(&users)
}
"#;
    let found = chains(Language::Go, source, "main.go");
    assert_eq!(found.len(), 1);
    let chain = &found[0];
    assert_eq!(chain.receiver, "db");
    let names: Vec<&str> = chain.segments.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Table", "Where", "Find"]);
    assert_eq!(chain.segments[0].first_string_arg(), Some("users"));
}

#[test]
fn php_scoped_and_member_calls_mix() {
    let source = "<?php\nUser::where('email', $e)->first();\n";
    let found = chains(Language::Php, source, "app.php");
    assert_eq!(found.len(), 1);
    let chain = &found[0];
    assert_eq!(chain.receiver, "User");
    let names: Vec<&str> = chain.segments.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["where", "first"]);
    assert_eq!(chain.segments[0].first_string_arg(), Some("email"));
}

#[test]
fn direct_builder_invocation_roots_the_chain() {
    let found = chains(
        Language::JavaScript,
        "knex('users').where({ id: 1 }).del();",
        "app.js",
    );
    assert_eq!(found.len(), 1);
    let chain = &found[0];
    assert_eq!(chain.receiver, "knex");
    assert_eq!(chain.segments[0].name, "knex");
    assert_eq!(chain.segments[0].first_string_arg(), Some("users"));
}

#[test]
fn call_arguments_carry_nested_chains() {
    let found = chains(
        Language::TypeScript,
        "logger.record(knex('users').select('id'));",
        "app.ts",
    );
    // The inner chain is captured inside the argument, not re-emitted at
    // top level.
    assert_eq!(found.len(), 1);
    let nested = found[0].nested_chains();
    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0].receiver, "knex");
    assert_eq!(nested[0].segment("select").unwrap().first_string_arg(), Some("id"));
}

#[test]
fn chains_inside_callback_bodies_are_found() {
    let found = chains(
        Language::TypeScript,
        "app.get('/users', async () => { await supabase.from('users').select('id'); });",
        "app.ts",
    );
    assert!(found
        .iter()
        .any(|c| c.receiver == "supabase" && c.segment("from").is_some()));
}

#[test]
fn depth_limit_truncates_instead_of_dropping() {
    let registry = NormalizerRegistry::with_builtins();
    let source = "client.a().b().c().d().e().f();";
    let tree = parse_source(Language::TypeScript, source, "app.ts").unwrap();
    let found = registry
        .get(Language::TypeScript)
        .unwrap()
        .normalize_file(&tree, source, "app.ts", 3);
    assert_eq!(found.len(), 1);
    assert!(found[0].truncated);
    assert_eq!(found[0].segments.len(), 3);
}

#[test]
fn identical_source_yields_identical_chains() {
    let source = "supabase.from('users').select('id');\nUser.findOne({ email: 'x' });";
    let first = chains(Language::TypeScript, source, "app.ts");
    let second = chains(Language::TypeScript, source, "app.ts");
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
