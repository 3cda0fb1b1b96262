//! dotted key paths (`service.endpoint`)

/// Path of a value inside a [Document](crate::document::Document)
///
/// The path of a root key is the key itself, every nested key is appended with a `.` separator.
/// List indices are not part of addressable paths, see [KeyPath::index].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(String);

impl KeyPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of the child `key`
    pub fn join(&self, key: &str) -> KeyPath {
        if self.is_root() {
            return KeyPath(key.to_string());
        }

        KeyPath(format!("{}.{key}", self.0))
    }

    /// Path of a list element
    ///
    /// Only used to point at values in error messages. Overrides can never address list elements.
    pub fn index(&self, index: usize) -> KeyPath {
        KeyPath(format!("{}[{index}]", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for KeyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }

        f.write_str(&self.0)
    }
}

impl From<&str> for KeyPath {
    fn from(value: &str) -> Self {
        KeyPath(value.to_string())
    }
}
