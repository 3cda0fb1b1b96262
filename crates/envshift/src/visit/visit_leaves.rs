use super::VisitMut;
use crate::document::Document;
use crate::key_path::KeyPath;
use crate::value::Value;

/// Recursively visit every value that is not a nested [Document] mutably
///
/// Lists are leaves, their elements are never visited.
pub trait VisitLeavesMut {
    fn visit_leaves_mut(&mut self, visitor: &mut dyn VisitMut<Value>);
}

impl VisitLeavesMut for Document {
    fn visit_leaves_mut(&mut self, visitor: &mut dyn VisitMut<Value>) {
        visit_document(self, &KeyPath::root(), visitor);
    }
}

fn visit_document(document: &mut Document, prefix: &KeyPath, visitor: &mut dyn VisitMut<Value>) {
    for (key, value) in document.iter_mut() {
        let path = prefix.join(key);
        match value {
            Value::Document(child) => visit_document(child, &path, visitor),
            leaf => visitor.visit_mut(&path, leaf),
        }
    }
}
