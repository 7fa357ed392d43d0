//! File-name based language detection for the editor and status bar.
//!
//! There is no content sniffing; the language is purely a function of the
//! file-name extension, so renaming a file re-derives it.

/// Languages the editor knows how to label and highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
    Html,
    Css,
    Json,
    Markdown,
    Python,
    Go,
    C,
    Cpp,
    Java,
    Shell,
    Toml,
    Yaml,
    PlainText,
}

impl Language {
    /// Derive the language from a file name, falling back to plain text.
    pub fn from_name(name: &str) -> Self {
        let extension = name
            .rsplit_once('.')
            .map(|(stem, ext)| if stem.is_empty() { "" } else { ext })
            .unwrap_or("");

        match extension.to_ascii_lowercase().as_str() {
            "rs" => Language::Rust,
            "js" | "mjs" | "cjs" => Language::JavaScript,
            "ts" => Language::TypeScript,
            "jsx" => Language::Jsx,
            "tsx" => Language::Tsx,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "json" => Language::Json,
            "md" | "markdown" => Language::Markdown,
            "py" => Language::Python,
            "go" => Language::Go,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "hpp" => Language::Cpp,
            "java" => Language::Java,
            "sh" | "bash" => Language::Shell,
            "toml" => Language::Toml,
            "yml" | "yaml" => Language::Yaml,
            _ => Language::PlainText,
        }
    }

    /// Human-readable name shown in the status bar.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Rust => "Rust",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Jsx => "JSX",
            Language::Tsx => "TSX",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Json => "JSON",
            Language::Markdown => "Markdown",
            Language::Python => "Python",
            Language::Go => "Go",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Java => "Java",
            Language::Shell => "Shell",
            Language::Toml => "TOML",
            Language::Yaml => "YAML",
            Language::PlainText => "Plain Text",
        }
    }

    /// Token passed to the syntax highlighter (syntect extension lookup).
    pub fn highlight_token(&self) -> &'static str {
        match self {
            Language::Rust => "rs",
            Language::JavaScript => "js",
            Language::TypeScript => "ts",
            Language::Jsx => "js",
            Language::Tsx => "ts",
            Language::Html => "html",
            Language::Css => "css",
            Language::Json => "json",
            Language::Markdown => "md",
            Language::Python => "py",
            Language::Go => "go",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Shell => "sh",
            Language::Toml => "toml",
            Language::Yaml => "yaml",
            Language::PlainText => "txt",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_known_extensions() {
        assert_eq!(Language::from_name("main.rs"), Language::Rust);
        assert_eq!(Language::from_name("App.tsx"), Language::Tsx);
        assert_eq!(Language::from_name("index.HTML"), Language::Html);
        assert_eq!(Language::from_name("script.sh"), Language::Shell);
    }

    #[test]
    fn falls_back_to_plain_text() {
        assert_eq!(Language::from_name("LICENSE"), Language::PlainText);
        assert_eq!(Language::from_name("notes.xyz"), Language::PlainText);
    }

    #[test]
    fn dotfiles_are_plain_text() {
        assert_eq!(Language::from_name(".gitignore"), Language::PlainText);
    }
}
