//! visitor pattern helpers
mod visit_leaves;
pub use visit_leaves::VisitLeavesMut;

use crate::key_path::KeyPath;

/// Visitor that visits its subjects mutably, along with their [KeyPath]
pub trait VisitMut<T> {
    fn visit_mut(&mut self, path: &KeyPath, value: &mut T);
}

// blanket impl for FnMut
impl<T, F> VisitMut<T> for F
where
    F: FnMut(&KeyPath, &mut T),
{
    fn visit_mut(&mut self, path: &KeyPath, value: &mut T) {
        self(path, value)
    }
}
