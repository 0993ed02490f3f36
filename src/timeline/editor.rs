//! The single-slot inline rename state machine.

use super::TimelineState;

/// An in-progress rename: edits accumulate in `buffer` and only reach the
/// item on commit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub item_id: u64,
    pub buffer: String,
}

impl TimelineState {
    /// Start renaming an item, seeding the buffer from its current name.
    /// Any session already open is discarded without committing.
    pub fn begin_rename(&mut self, item_id: u64) {
        let Some(item) = self.items.iter().find(|item| item.id == item_id) else {
            return;
        };
        self.editor = Some(EditSession {
            item_id,
            buffer: item.name.clone(),
        });
    }

    pub fn rename_edited(&mut self, buffer: String) {
        if let Some(session) = &mut self.editor {
            session.buffer = buffer;
        }
    }

    /// Write the buffer into the item and close the session. A no-op when
    /// nothing is being edited.
    pub fn commit_rename(&mut self) {
        let Some(session) = self.editor.take() else {
            return;
        };
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.id == session.item_id)
        {
            item.name = session.buffer;
        }
    }

    /// Discard the buffer without touching the item.
    pub fn cancel_rename(&mut self) {
        self.editor = None;
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editor.as_ref()
    }
}
