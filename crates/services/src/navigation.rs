use case_core::model::{CaseId, Catalog, Category};

/// Tracks the active category and case over an immutable catalog.
///
/// Invariant: the active case belongs to the active category, unless the
/// category has no cases at all, in which case the catalog's first case is
/// the explicit fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationController {
    active_category: Category,
    active_case: CaseId,
}

impl NavigationController {
    /// Start at the catalog's first case and its category.
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        let first = catalog.first_case();
        Self {
            active_category: first.category(),
            active_case: first.id().clone(),
        }
    }

    #[must_use]
    pub fn active_category(&self) -> Category {
        self.active_category
    }

    #[must_use]
    pub fn active_case(&self) -> &CaseId {
        &self.active_case
    }

    /// Switch the active category, reassigning the active case when it falls
    /// outside the new category's list. Returns true if the active case
    /// changed.
    pub fn select_category(&mut self, catalog: &Catalog, category: Category) -> bool {
        self.active_category = category;

        let in_category = catalog
            .cases_in(category)
            .any(|c| c.id() == &self.active_case);
        if in_category {
            return false;
        }

        let fallback = catalog
            .first_case_in(category)
            .unwrap_or_else(|| catalog.first_case());
        let changed = fallback.id() != &self.active_case;
        self.active_case = fallback.id().clone();
        changed
    }

    /// Select a case from the active category's visible list.
    ///
    /// Ids outside that list (unknown, or tagged with another category) leave
    /// the state unchanged; the current case is the defined fallback.
    /// Returns true if the active case changed.
    pub fn select_case(&mut self, catalog: &Catalog, case_id: &CaseId) -> bool {
        if case_id == &self.active_case {
            return false;
        }
        let selectable = catalog
            .cases_in(self.active_category)
            .any(|c| c.id() == case_id);
        if !selectable {
            log::debug!("ignoring case {case_id} outside the active category");
            return false;
        }
        self.active_case = case_id.clone();
        true
    }
}
