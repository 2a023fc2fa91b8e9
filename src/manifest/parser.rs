//! Extraction of `name = [ "a", "b" ]` lists from manifest text.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::ManifestError;
use super::lexer::{Lexer, Token};

/// A named list extracted from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Identifier on the left-hand side of the assignment.
    pub name: String,
    /// Quoted file names in the order they were written.
    pub values: Vec<String>,
}

/// Ordered mapping of list names to their entries.
///
/// Re-assigning a name replaces its values but keeps the position of the first assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse manifest text. Text without any simple list assignment yields an empty manifest.
    pub fn parse(source: &str) -> Self {
        let tokens: Vec<Token<'_>> = Lexer::new(source).collect();
        let mut manifest = Self::default();

        let mut index = 0;
        while index < tokens.len() {
            match list_assignment_at(&tokens, index) {
                Some((name, values, next)) => {
                    manifest.insert(name, values);
                    index = next;
                }
                None => index += 1,
            }
        }

        manifest
    }

    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let source = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&source))
    }

    /// Store `values` under `name`, replacing any earlier list with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.values = values,
            None => self.entries.push(ManifestEntry { name, values }),
        }
    }

    /// Values of the list called `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.values.as_slice())
    }

    /// First list, in manifest order, whose name ends with `suffix`.
    pub fn first_with_suffix(&self, suffix: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|entry| entry.name.ends_with(suffix))
    }

    /// Entries in manifest order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of distinct list names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no list was found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Match `ident = [ ... ]` starting at `start`, returning the name, the file names and the
/// index just past the closing bracket.
///
/// The body may hold strings, bare identifiers, commas and the path characters `.`, `-`
/// and `/`; strings may contain those characters and whitespace. Anything else, including a string with characters outside that set such as a
/// `$` expansion or a `:` label, means the value is not a plain list and the assignment is
/// ignored.
fn list_assignment_at<'a>(
    tokens: &[Token<'a>],
    start: usize,
) -> Option<(&'a str, Vec<String>, usize)> {
    let &Token::Ident(name) = tokens.get(start)? else {
        return None;
    };
    if tokens.get(start + 1)? != &Token::Assign || tokens.get(start + 2)? != &Token::OpenBracket {
        return None;
    }

    let mut values = Vec::new();
    for (offset, token) in tokens[start + 3..].iter().enumerate() {
        match token {
            Token::Str(value) if !is_list_text(value) => return None,
            Token::Str(value) if is_file_token(value) => values.push(value.clone()),
            Token::Str(_) | Token::Ident(_) | Token::Comma | Token::Punct(_) => {}
            Token::CloseBracket => return Some((name, values, start + 4 + offset)),
            _ => return None,
        }
    }

    None
}

fn file_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\w\-.]+$").expect("invalid file token regex"))
}

fn list_text_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\w\-./,\s]*$").expect("invalid list text regex"))
}

/// Whether a quoted value only uses characters a plain list body may contain.
fn is_list_text(value: &str) -> bool {
    list_text_pattern().is_match(value)
}

/// Whether a quoted value is a plain file name: word characters, hyphens and dots only.
fn is_file_token(value: &str) -> bool {
    file_token_pattern().is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(manifest: &Manifest) -> Vec<&str> {
        manifest
            .entries()
            .iter()
            .map(|entry| entry.name.as_str())
            .collect()
    }

    #[test]
    fn extracts_every_assignment_in_order() {
        let manifest = Manifest::parse(
            r#"
            # Copyright header
            vm_sources = [
              "allocation.cc",
              "allocation.h",
              "bitfield.h",
            ]

            vm_sources_tests = ["allocation_test.cc"]
            empty = [ ]
            bare = []
            "#,
        );

        assert_eq!(manifest.len(), 3);
        assert_eq!(names(&manifest), vec!["vm_sources", "vm_sources_tests", "empty"]);
        assert_eq!(manifest.get("vm_sources").unwrap(), &[
            "allocation.cc".to_string(),
            "allocation.h".to_string(),
            "bitfield.h".to_string(),
        ]);
        assert!(manifest.get("empty").unwrap().is_empty());
    }

    #[test]
    fn duplicate_names_keep_last_values_at_first_position() {
        let manifest = Manifest::parse(
            r#"
            a = ["first.cc"]
            b = ["b.cc"]
            a = ["second.cc", "third.cc"]
            "#,
        );

        assert_eq!(names(&manifest), vec!["a", "b"]);
        assert_eq!(manifest.get("a").unwrap(), &[
            "second.cc".to_string(),
            "third.cc".to_string()
        ]);
    }

    #[test]
    fn skips_values_that_are_not_plain_file_names() {
        let manifest = Manifest::parse(r#"x = [ "ok-1.cc", "dir/nested.cc", "two words", other ]"#);
        assert_eq!(manifest.get("x").unwrap(), &["ok-1.cc".to_string()]);
    }

    #[test]
    fn lists_with_expansions_or_labels_are_ignored() {
        let manifest = Manifest::parse(
            r#"
            vm_sources = [ "a.cc", "$root_gen_dir/b.cc" ]
            deps = [ "a.cc", "//build:x" ]
            kept = [ "c.cc" ]
            "#,
        );

        assert_eq!(names(&manifest), vec!["kept"]);
        assert!(manifest.get("vm_sources").is_none());
    }

    #[test]
    fn bare_path_characters_are_allowed_between_values() {
        let manifest = Manifest::parse(
            r#"
            dotted = [ "a.cc", some.name ]
            hyphen = [ "b.cc", some-name ]
            slashed = [ "c.cc", some/name ]
            "#,
        );

        assert_eq!(manifest.get("dotted").unwrap(), &["a.cc".to_string()]);
        assert_eq!(manifest.get("hyphen").unwrap(), &["b.cc".to_string()]);
        assert_eq!(manifest.get("slashed").unwrap(), &["c.cc".to_string()]);
    }

    #[test]
    fn adjacent_brackets_do_not_overwrite_earlier_list() {
        let manifest = Manifest::parse(
            r#"
            a = ["x.cc"]
            a = []
            "#,
        );

        assert_eq!(manifest.get("a").unwrap(), &["x.cc".to_string()]);
    }

    #[test]
    fn ignores_non_list_assignments() {
        let manifest = Manifest::parse(
            r#"
            flag = true
            appended += [ "a.cc" ]
            nested = [ [ "b.cc" ] ]
            joined = [ "c.cc" ] + other_list
            if (is_win) {
              win_sources = [ "d.cc" ]
            }
            "#,
        );

        assert_eq!(names(&manifest), vec!["joined", "win_sources"]);
    }

    #[test]
    fn comments_inside_lists_are_ignored() {
        let manifest = Manifest::parse("x = [\n  \"a.cc\",  # keep\n  # \"b.cc\",\n  \"c.cc\",\n]\n");
        assert_eq!(manifest.get("x").unwrap(), &["a.cc".to_string(), "c.cc".to_string()]);
    }

    #[test]
    fn suffix_lookup_returns_first_match_in_order() {
        let manifest = Manifest::parse(
            r#"
            core_runtime_dart_files = ["core.dart"]
            core_runtime_cc_files = ["array.cc", "bool.cc"]
            extra_cc_files = ["extra.cc"]
            "#,
        );

        let entry = manifest.first_with_suffix("_cc_files").unwrap();
        assert_eq!(entry.name, "core_runtime_cc_files");
        assert_eq!(entry.values.len(), 2);
        assert!(manifest.first_with_suffix("_h_files").is_none());
    }

    #[test]
    fn text_without_lists_is_empty() {
        assert!(Manifest::parse("import(\"../build.gni\")\n").is_empty());
        assert!(Manifest::parse("").is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent_sources.gni");

        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
        assert!(err.to_string().contains("absent_sources.gni"));
    }

    #[test]
    fn load_parses_file_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("heap_sources.gni");
        fs::write(&path, r#"heap_sources = [ "heap.cc", "heap.h" ]"#).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.get("heap_sources").unwrap().len(), 2);
    }
}
