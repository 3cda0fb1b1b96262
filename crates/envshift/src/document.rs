//! configuration documents and the files they come from
//!
//! Documents are read as YAML. JSON is a subset of YAML, so `.json` files load just the same.
//! Loading is the only place where the type of a value is checked, see [ValueError].
use crate::key_path::KeyPath;
use crate::value::{document_from_mapping, Value, ValueError};
use std::path::Path;

/// Order-preserving mapping of keys to [Value]s
pub type Document = indexmap::IndexMap<String, Value>;

/// Parse a document from a yaml (or json) string
pub fn parse(source: &str) -> Result<Document, LoadError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(source)?;
    match yaml {
        serde_yaml::Value::Mapping(mapping) => Ok(document_from_mapping(mapping, &KeyPath::root())?),
        // an empty file is an empty document
        serde_yaml::Value::Null => Ok(Document::new()),
        other => Err(LoadError::NotADocument(
            Value::from_yaml(other, &KeyPath::root())
                .map(|value| value.kind())
                .unwrap_or("unsupported value"),
        )),
    }
}

pub fn load_file(file_path: &Path) -> Result<Document, LoadError> {
    let file_path = file_path.canonicalize()?;
    tracing::info!(path=%file_path.display(), "loading document");

    let file_contents = std::fs::read_to_string(&file_path)?;
    parse(&file_contents)
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to parse yaml")]
    YamlParseFailed(#[from] serde_yaml::Error),
    #[error("Root of a document must be a mapping, found {0}")]
    NotADocument(&'static str),
    #[error("Invalid value")]
    InvalidValue(#[from] ValueError),
}

/// Utility macro to create a [Document] from yaml
///
/// ```
/// # use envshift::document;
/// let doc = document!("service:\n  endpoint: https://api.example.com");
/// assert!(doc.contains_key("service"));
/// ```
///
/// # Panic
/// Panics on invalid input
///
/// ```should_panic
/// # use envshift::document;
/// document!("ratio: 0.5");
/// ```
#[macro_export]
macro_rules! document {
    ($expr:expr) => {
        $crate::document::parse($expr).expect("document must parse")
    };
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_key_order() {
        let doc = document!("b: 1\na: 2\nc: 3");
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
    }

    #[test]
    fn json_input() {
        let doc = document!(r#"{"service": {"endpoint": "http://x.example", "port": 80}}"#);
        let Value::Document(service) = &doc["service"] else {
            panic!("service must be a document");
        };
        assert_eq!(service["port"], Value::Integer(80));
    }

    #[test]
    fn empty_source_is_empty_document() {
        assert_eq!(parse("").unwrap(), Document::new());
    }

    #[test]
    fn root_must_be_mapping() {
        let err = parse("- a\n- b").unwrap_err();
        assert!(matches!(err, LoadError::NotADocument("list")));
    }

    #[test]
    fn unsupported_value_is_load_error() {
        let err = parse("timeout: 1.5").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidValue(ValueError::Unsupported { kind: "float", .. })
        ));
    }
}
