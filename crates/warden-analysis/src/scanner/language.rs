//! Language detection from file extension.

use serde::{Deserialize, Serialize};

/// The eight supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Java,
    CSharp,
    Go,
    Ruby,
    Php,
}

impl Language {
    /// Detect language from a file extension string.
    pub fn from_extension(ext: Option<&str>) -> Option<Language> {
        match ext? {
            "ts" | "tsx" | "mts" | "cts" => Some(Language::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            "py" | "pyi" => Some(Language::Python),
            "java" => Some(Language::Java),
            "cs" => Some(Language::CSharp),
            "go" => Some(Language::Go),
            "rb" | "rake" => Some(Language::Ruby),
            "php" => Some(Language::Php),
            _ => None,
        }
    }

    /// Detect language from a file path.
    pub fn from_path(path: &str) -> Option<Language> {
        let ext = std::path::Path::new(path)
            .extension()
            .and_then(|e| e.to_str());
        Self::from_extension(ext)
    }

    /// Returns the display name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
        }
    }

    /// Get the tree-sitter grammar for this language.
    pub fn ts_language(&self) -> tree_sitter::Language {
        match self {
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            Language::Php => tree_sitter_php::LANGUAGE_PHP.into(),
        }
    }

    /// Get the tree-sitter grammar, with TSX handling for `.tsx` files.
    pub fn ts_language_for_ext(&self, ext: Option<&str>) -> tree_sitter::Language {
        if matches!(self, Language::TypeScript) && ext == Some("tsx") {
            tree_sitter_typescript::LANGUAGE_TSX.into()
        } else {
            self.ts_language()
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
