//! Tree descriptions stored as TOML documents.
//!
//! A string value is the text of a file and a table is the collection of a
//! directory. The top-level table is the root collection:
//!
//! ```toml
//! "README.md" = "# This is the title"
//! "vendor/" = {}
//!
//! ["src/"]
//! "main.rs" = "fn main() {}"
//! "empty.txt" = ""
//! ```
//!
//! Whether a value fits its name is only checked when the tree is
//! materialized, so a table under a file name parses fine.
use crate::{
    errors::{FileFormat, FileOperation, IoError, ParseError},
    tree::{Content, Tree},
};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::{
    de::{self, MapAccess, Visitor},
    Deserialize, Deserializer,
};
use std::{fmt, fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DescriptionError {
    #[error("I/O error within description domain")]
    #[diagnostic(code(plantree::description::io))]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

struct ContentVisitor;
impl<'de> Visitor<'de> for ContentVisitor {
    type Value = Content;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string of file contents or a table of directory entries")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Content, E> {
        Ok(Content::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Content, E> {
        Ok(Content::from(value))
    }

    fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Content, E> {
        Ok(Content::from(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Content, E> {
        Ok(Content::Absent)
    }

    fn visit_none<E: de::Error>(self) -> Result<Content, E> {
        Ok(Content::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Content, D::Error> {
        Content::deserialize(deserializer)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Content, A::Error> {
        let mut tree = Tree::new();

        while let Some((name, content)) = map.next_entry::<String, Content>()? {
            tree.insert(name, content);
        }

        Ok(Content::Collection(tree))
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ContentVisitor)
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = IndexMap::<String, Content>::deserialize(deserializer)?;

        Ok(entries.into_iter().collect())
    }
}

impl Tree {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DescriptionError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        let parsed = Tree::from_toml(&content)
            .map_err(|error| ParseError::new(FileFormat::Toml, path.to_path_buf(), error))?;

        log::debug!(
            "loaded {} top-level entries from {}",
            parsed.len(),
            path.display()
        );

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ContentKind;

    const DESCRIPTION: &str = r##"
"README.md" = "# This is the title"
"vendor/" = {}

["json/"]
"test1.json" = '{"key1":"value1"}'

["src/"]
"one.cc" = "int main() {}"
"empty.txt" = ""

["src/"."nested/"]
"deep.txt" = "deep"
"##;

    #[test]
    fn test_parses_strings_and_tables() {
        let tree = Tree::from_toml(DESCRIPTION).unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.get("README.md").map(Content::kind), Some(ContentKind::Text));
        assert_eq!(tree.get("vendor/").map(Content::kind), Some(ContentKind::Collection));

        let Some(Content::Collection(src)) = tree.get("src/") else {
            panic!("src/ should be a collection");
        };
        assert!(matches!(
            src.get("one.cc"),
            Some(Content::Text(bytes)) if bytes == b"int main() {}"
        ));
        assert!(matches!(src.get("empty.txt"), Some(Content::Text(bytes)) if bytes.is_empty()));
        assert!(matches!(
            src.get("nested/"),
            Some(Content::Collection(nested)) if nested.len() == 1
        ));
    }

    #[test]
    fn test_keeps_document_order_of_entries() {
        let tree = Tree::from_toml(
            r#"
"zeta.txt" = "z"
"alpha.txt" = "a"
"#,
        )
        .unwrap();

        let names: Vec<&str> = tree.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta.txt", "alpha.txt"]);
    }

    #[test]
    fn test_mismatched_shapes_parse() {
        let tree = Tree::from_toml(
            r#"
"dir/" = "text under a directory name"
["file.txt"]
"inner" = ""
"#,
        )
        .unwrap();

        assert_eq!(tree.get("dir/").map(Content::kind), Some(ContentKind::Text));
        assert_eq!(tree.get("file.txt").map(Content::kind), Some(ContentKind::Collection));
    }

    #[test]
    fn test_other_value_types_are_rejected() {
        assert!(Tree::from_toml(r#""count.txt" = 3"#).is_err());
        assert!(Tree::from_toml(r#""list/" = ["a", "b"]"#).is_err());
        assert!(Tree::from_toml(r#""flag" = true"#).is_err());
    }

    #[test]
    fn test_from_file_reports_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();

        let error = Tree::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(error, DescriptionError::Io(_)));

        let invalid = dir.path().join("invalid.toml");
        fs::write(&invalid, "not = [valid").unwrap();
        let error = Tree::from_file(&invalid).unwrap_err();
        assert!(matches!(error, DescriptionError::Parse(_)));
    }

    #[test]
    fn test_from_file_loads_description() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.toml");
        fs::write(&path, DESCRIPTION).unwrap();

        let tree = Tree::from_file(&path).unwrap();

        assert_eq!(tree.len(), 4);
    }
}
