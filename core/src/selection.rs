//! Label selection toggling for the todo form and edit dialog.

use crate::types::Label;

/// Remove `candidate` from `selected` if a label with the same id is present,
/// otherwise append it. Order of the remaining labels is preserved.
pub fn toggle_labels(selected: &[Label], candidate: &Label) -> Vec<Label> {
    if selected.iter().any(|label| label.id == candidate.id) {
        selected
            .iter()
            .filter(|label| label.id != candidate.id)
            .cloned()
            .collect()
    } else {
        let mut next = selected.to_vec();
        next.push(candidate.clone());
        next
    }
}
