use crate::registry::MarkerId;

/// Shows information about a selected marker, e.g. a modal overlay.
pub trait SelectionPresenter {
    fn open(&mut self, id: MarkerId);
    fn close(&mut self);
}

/// Presenter that only remembers the current selection. Useful headless.
#[derive(Clone, Debug, Default)]
pub struct SelectionSlot {
    current: Option<MarkerId>,
}

impl SelectionSlot {
    pub fn current(&self) -> Option<MarkerId> {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }
}

impl SelectionPresenter for SelectionSlot {
    fn open(&mut self, id: MarkerId) {
        self.current = Some(id);
    }

    fn close(&mut self) {
        self.current = None;
    }
}
