//! Language tags and keyword sets.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Languages a generated file can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    Html,
    Css,
    JavaScript,
    TypeScript,
    Java,
    Python,
    Json,
    #[default]
    Other,
}

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "import", "from",
    "export", "default", "class", "extends", "new", "this", "async", "await", "try", "catch",
    "case", "switch",
];

const TYPESCRIPT_KEYWORDS: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "import", "from",
    "export", "default", "class", "extends", "new", "this", "async", "await", "try", "catch",
    "interface", "type", "implements", "public", "private", "protected", "readonly", "declare",
    "module", "namespace",
];

const JAVA_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "class", "interface", "extends", "implements", "void",
    "int", "boolean", "String", "return", "if", "else", "for", "while", "new", "this", "static",
    "final", "package", "import", "try", "catch", "throw", "throws",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "def", "class", "return", "if", "else", "elif", "for", "while", "import", "from", "try",
    "except", "print", "None", "True", "False", "pass", "break", "continue", "with", "as",
    "global", "lambda",
];

const JSON_KEYWORDS: &[&str] = &["true", "false", "null"];

impl Language {
    /// Returns all languages.
    pub fn all() -> &'static [Language] {
        &[
            Language::Html,
            Language::Css,
            Language::JavaScript,
            Language::TypeScript,
            Language::Java,
            Language::Python,
            Language::Json,
            Language::Other,
        ]
    }

    /// Parses a language tag. Unrecognized tags map to [`Language::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "html" => Self::Html,
            "css" => Self::Css,
            "javascript" => Self::JavaScript,
            "typescript" => Self::TypeScript,
            "java" => Self::Java,
            "python" => Self::Python,
            "json" => Self::Json,
            _ => Self::Other,
        }
    }

    /// Returns the tag this language is written as.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Java => "java",
            Self::Python => "python",
            Self::Json => "json",
            Self::Other => "other",
        }
    }

    /// Detects language from a file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Self::TypeScript,
            "java" => Self::Java,
            "py" | "pyw" | "pyi" => Self::Python,
            "json" => Self::Json,
            _ => Self::Other,
        }
    }

    /// Detects language from a filename based on extension.
    pub fn from_filename(filename: &str) -> Self {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Other)
    }

    /// Keywords styled on the generic highlighting path.
    ///
    /// `Other` uses the JavaScript set. Markup languages have none.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Html | Self::Css => &[],
            Self::TypeScript => TYPESCRIPT_KEYWORDS,
            Self::Java => JAVA_KEYWORDS,
            Self::Python => PYTHON_KEYWORDS,
            Self::Json => JSON_KEYWORDS,
            Self::JavaScript | Self::Other => JAVASCRIPT_KEYWORDS,
        }
    }

    /// Returns whether `#` starts a line comment.
    pub fn has_hash_comments(&self) -> bool {
        matches!(self, Self::Python)
    }
}

impl From<String> for Language {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.tag().to_string()
    }
}
