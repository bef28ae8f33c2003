use case_core::model::SectionId;

/// At most one open section per case. Hard invariant, not a UI default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccordionController {
    open: Option<SectionId>,
}

impl AccordionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn open_section(&self) -> Option<&SectionId> {
        self.open.as_ref()
    }

    /// Toggle a section: close it if it is the open one, otherwise open it
    /// (closing whatever was open before).
    pub fn toggle(&mut self, section_id: &SectionId) {
        if self.open.as_ref() == Some(section_id) {
            self.open = None;
        } else {
            self.open = Some(section_id.clone());
        }
    }

    /// Forced close on case change.
    pub fn close_all(&mut self) {
        self.open = None;
    }
}
