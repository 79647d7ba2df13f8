//! Grammar profile detection and tree-sitter grammar loading

use std::path::Path;
use tree_sitter::Language;

use crate::error::{ExtractError, Result};

/// Supported JavaScript-family grammar profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    TypeScript,
    /// TypeScript with JSX. Fragments are always parsed with this profile
    /// since it accepts class properties, type annotations and markup.
    #[default]
    Tsx,
    JavaScript,
    Jsx,
}

impl Lang {
    pub const ALL: [Lang; 4] = [Self::TypeScript, Self::Tsx, Self::JavaScript, Self::Jsx];

    /// Detect language from file path extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ExtractError::UnsupportedLanguage {
                extension: "none".to_string(),
            })?;

        Self::from_extension(ext)
    }

    /// Detect language from file extension string
    pub fn from_extension(ext: &str) -> Result<Self> {
        let lower = ext.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&lower.as_str()))
            .ok_or_else(|| ExtractError::UnsupportedLanguage {
                extension: ext.to_string(),
            })
    }

    /// Get the canonical name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::JavaScript => "javascript",
            Self::Jsx => "jsx",
        }
    }

    /// Get the tree-sitter Language for parsing
    ///
    /// The JavaScript grammar parses JSX natively, so `.js` and `.jsx`
    /// share it. Plain `.ts` cannot hold markup (`<T>x` is a type assertion
    /// there), which is why it keeps its own grammar.
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::JavaScript | Self::Jsx => tree_sitter_javascript::LANGUAGE.into(),
        }
    }

    /// Check if this language accepts JSX syntax
    pub fn supports_jsx(&self) -> bool {
        !matches!(self, Self::TypeScript)
    }

    /// Get common file extensions for this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::TypeScript => &["ts", "mts", "cts"],
            Self::Tsx => &["tsx"],
            Self::JavaScript => &["js", "mjs", "cjs"],
            Self::Jsx => &["jsx"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_language_detection() {
        assert_eq!(Lang::from_extension("ts").unwrap(), Lang::TypeScript);
        assert_eq!(Lang::from_extension("tsx").unwrap(), Lang::Tsx);
        assert_eq!(Lang::from_extension("js").unwrap(), Lang::JavaScript);
        assert_eq!(Lang::from_extension("JSX").unwrap(), Lang::Jsx);
        assert_eq!(Lang::from_extension("mjs").unwrap(), Lang::JavaScript);
    }

    #[test]
    fn test_language_from_path() {
        let path = PathBuf::from("src/components/App.tsx");
        assert_eq!(Lang::from_path(&path).unwrap(), Lang::Tsx);

        let path = PathBuf::from("Makefile");
        assert!(Lang::from_path(&path).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            Lang::from_extension("rs"),
            Err(ExtractError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_jsx_support() {
        assert!(Lang::Tsx.supports_jsx());
        assert!(Lang::Jsx.supports_jsx());
        assert!(Lang::JavaScript.supports_jsx());
        assert!(!Lang::TypeScript.supports_jsx());
    }

    #[test]
    fn test_extensions_round_trip() {
        for lang in Lang::ALL {
            for ext in lang.extensions() {
                assert_eq!(Lang::from_extension(ext).unwrap(), lang, "{}", lang.name());
            }
        }
    }

    #[test]
    fn test_default_is_tsx() {
        assert_eq!(Lang::default(), Lang::Tsx);
    }
}
