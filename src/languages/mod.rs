//! Static catalog of runnable languages and their starter snippets.

/// A runtime the execution service understands, identified by name and version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub language: &'static str,
    pub version: &'static str,
}

/// Selectable options. The first entry is the default selection.
pub const LANGUAGE_OPTIONS: &[LanguageOption] = &[
    LanguageOption { language: "javascript", version: "18.15.0" },
    LanguageOption { language: "typescript", version: "5.0.3" },
    LanguageOption { language: "python", version: "3.10.0" },
    LanguageOption { language: "java", version: "15.0.2" },
    LanguageOption { language: "csharp", version: "6.12.0" },
    LanguageOption { language: "php", version: "8.2.3" },
];

const JAVASCRIPT: &str = "function greet(name) {\n\tconsole.log(\"Hello, \" + name + \"!\");\n}\n\ngreet(\"Alex\");\n";

const TYPESCRIPT: &str = "type Params = {\n\tname: string;\n}\n\nfunction greet(data: Params) {\n\tconsole.log(\"Hello, \" + data.name + \"!\");\n}\n\ngreet({ name: \"Alex\" });\n";

const PYTHON: &str = "def greet(name):\n\tprint(\"Hello, \" + name + \"!\")\n\ngreet(\"Alex\")\n";

const JAVA: &str = "public class HelloWorld {\n\tpublic static void main(String[] args) {\n\t\tSystem.out.println(\"Hello World\");\n\t}\n}\n";

const CSHARP: &str = "using System;\n\nnamespace HelloWorld\n{\n\tclass Hello {\n\t\tstatic void Main(string[] args) {\n\t\t\tConsole.WriteLine(\"Hello World in C#\");\n\t\t}\n\t}\n}\n";

const PHP: &str = "<?php\n\n$name = 'Alex';\necho $name;\n";

impl LanguageOption {
    /// Starter source shown when this language is selected.
    pub fn snippet(&self) -> &'static str {
        snippet(self.language).unwrap_or_default()
    }
}

/// Default starter source for a language name.
pub fn snippet(language: &str) -> Option<&'static str> {
    let text = match language {
        "javascript" => JAVASCRIPT,
        "typescript" => TYPESCRIPT,
        "python" => PYTHON,
        "java" => JAVA,
        "csharp" => CSHARP,
        "php" => PHP,
        _ => return None,
    };
    Some(text)
}

/// Look up an option by language name (case-insensitive).
pub fn find(language: &str) -> Option<LanguageOption> {
    LANGUAGE_OPTIONS
        .iter()
        .find(|o| o.language.eq_ignore_ascii_case(language.trim()))
        .copied()
}

/// Guess the language of a source file from its extension.
pub fn from_extension(ext: &str) -> Option<LanguageOption> {
    let language = match ext.to_ascii_lowercase().as_str() {
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "py" => "python",
        "java" => "java",
        "cs" => "csharp",
        "php" => "php",
        _ => return None,
    };
    find(language)
}

pub fn default_option() -> LanguageOption {
    LANGUAGE_OPTIONS[0]
}

/// Position of an option in [`LANGUAGE_OPTIONS`].
pub fn index_of(option: &LanguageOption) -> usize {
    LANGUAGE_OPTIONS
        .iter()
        .position(|o| o == option)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_option_has_a_snippet() {
        for opt in LANGUAGE_OPTIONS {
            let text = snippet(opt.language);
            assert!(text.is_some(), "missing snippet for {}", opt.language);
            assert!(!opt.snippet().is_empty());
        }
    }

    #[test]
    fn default_is_javascript() {
        assert_eq!(default_option().language, "javascript");
        assert_eq!(default_option().snippet(), JAVASCRIPT);
    }

    #[test]
    fn find_ignores_case_and_whitespace() {
        assert_eq!(find(" Python ").map(|o| o.version), Some("3.10.0"));
        assert!(find("cobol").is_none());
    }

    #[test]
    fn extensions_map_to_catalog_entries() {
        assert_eq!(from_extension("PY").map(|o| o.language), Some("python"));
        assert_eq!(from_extension("cs").map(|o| o.language), Some("csharp"));
        assert!(from_extension("rs").is_none());
    }

    #[test]
    fn index_of_matches_position() {
        for (i, opt) in LANGUAGE_OPTIONS.iter().enumerate() {
            assert_eq!(index_of(opt), i);
        }
    }
}
