use crate::ledger::PurchaseId;

/// Which purchase, if any, the add/update form is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(PurchaseId),
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }

    pub fn target(&self) -> Option<PurchaseId> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing(id) => Some(*id),
        }
    }

    pub fn reset(&mut self) {
        *self = EditSession::Idle;
    }
}
