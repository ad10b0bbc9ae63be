use super::highlight::HighlightSelection;
use super::text_match::Banner;
use crate::files::Doc;

/// Page position within a multi-page document, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNavigator {
    page: u32,
    total: u32,
}

impl Default for PageNavigator {
    fn default() -> Self {
        Self { page: 1, total: 1 }
    }
}

impl PageNavigator {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total
    }

    /// Called once the renderer reports the page count.
    pub fn set_total(&mut self, total: u32) {
        self.total = total.max(1);
        self.page = self.page.min(self.total);
    }

    /// Returns whether the page actually changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        let next = page.clamp(1, self.total);
        let changed = next != self.page;
        self.page = next;
        changed
    }

    pub fn label(&self) -> String {
        format!("{} / {}p", self.page, self.total)
    }
}

/// Viewer-local state of one document panel.
///
/// Any page or document change drops the active highlight and banner.
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    doc: Option<Doc>,
    pub pager: PageNavigator,
    pub selection: HighlightSelection,
    pub banner: Banner,
}

impl ViewerState {
    pub fn doc(&self) -> Option<&Doc> {
        self.doc.as_ref()
    }

    pub fn select_doc(&mut self, doc: Option<Doc>) {
        self.doc = doc;
        self.pager = PageNavigator::default();
        self.reset_highlight();
    }

    pub fn on_pdf_load(&mut self, num_pages: u32) {
        self.pager.set_total(num_pages);
    }

    pub fn next_page(&mut self) {
        if self.pager.can_next() {
            let page = self.pager.page() + 1;
            self.set_page(page);
        }
    }

    pub fn prev_page(&mut self) {
        if self.pager.can_prev() {
            let page = self.pager.page() - 1;
            self.set_page(page);
        }
    }

    pub fn set_page(&mut self, page: u32) {
        if self.pager.go_to(page) {
            self.reset_highlight();
        }
    }

    fn reset_highlight(&mut self) {
        self.selection.clear();
        self.banner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::DocKind;

    #[test]
    fn navigator_bounds() {
        let mut nav = PageNavigator::default();
        assert!(!nav.can_prev() && !nav.can_next());
        nav.set_total(3);
        assert!(nav.go_to(3));
        assert!(!nav.go_to(9));
        assert_eq!(nav.label(), "3 / 3p");
        nav.set_total(2);
        assert_eq!(nav.page(), 2);
        nav.set_total(0);
        assert_eq!((nav.page(), nav.total()), (1, 1));
    }

    #[test]
    fn page_change_clears_active_highlight() {
        let mut viewer = ViewerState::default();
        viewer.on_pdf_load(3);
        viewer.selection.toggle(0);
        viewer.next_page();
        assert_eq!(viewer.pager.page(), 2);
        assert_eq!(viewer.selection.active(), None);

        viewer.selection.toggle(4);
        viewer.set_page(2);
        assert_eq!(viewer.selection.active(), Some(4));

        viewer.prev_page();
        assert_eq!(viewer.selection.active(), None);
    }

    #[test]
    fn doc_change_resets_page() {
        let mut viewer = ViewerState::default();
        viewer.on_pdf_load(5);
        viewer.set_page(4);
        viewer.selection.toggle(1);
        viewer.select_doc(Some(Doc { id: 2, name: "b.pdf".into(), kind: DocKind::Pdf }));
        assert_eq!(viewer.pager.page(), 1);
        assert_eq!(viewer.selection.active(), None);
        assert_eq!(viewer.doc().map(|d| d.id), Some(2));
    }
}
