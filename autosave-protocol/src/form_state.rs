use std::collections::HashMap;

/// Draft value of a field alongside the value last committed for it.
///
/// A commit only reports a change when the draft differs from the previous
/// commit, mirroring how a "change" event fires on an input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldEdit {
    draft: String,
    committed: String,
}

impl FieldEdit {
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        FieldEdit {
            draft: initial.clone(),
            committed: initial,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn set_draft(&mut self, value: impl Into<String>) {
        self.draft = value.into();
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.committed
    }

    pub fn commit(&mut self) -> Option<String> {
        if !self.is_dirty() {
            return None;
        }
        self.committed = self.draft.clone();
        Some(self.committed.clone())
    }
}

pub type FormState = HashMap<String, FieldEdit>;
