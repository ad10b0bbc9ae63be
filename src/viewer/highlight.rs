use crate::api::{ExtractRisksItem, RiskySentence};
use crate::risk::RiskLabel;

/// Vertical gap between a highlight and its callout, in pixels.
pub const CALLOUT_GAP: f64 = 4.0;

/// One box of one risky sentence, in extraction-time page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfHighlight {
    pub page: u32,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub page_width: f64,
    pub page_height: f64,
    pub label: RiskLabel,
    pub color: &'static str,
    pub reason: String,
    /// Index of the owning sentence.
    pub index: usize,
    pub sentence: String,
}

/// Flatten sentence positions into highlights. Sentences without positions
/// contribute nothing.
pub fn highlights_from_sentences(sentences: &[RiskySentence]) -> Vec<PdfHighlight> {
    sentences
        .iter()
        .enumerate()
        .flat_map(|(index, s)| {
            s.positions.iter().map(move |p| PdfHighlight {
                page: p.page,
                x: p.x,
                y: p.y,
                w: p.w,
                h: p.h,
                page_width: p.page_width,
                page_height: p.page_height,
                label: s.risk_label,
                color: s.risk_label.highlight_color(),
                reason: s.reason.clone(),
                index,
                sentence: s.sentence.clone(),
            })
        })
        .collect()
}

pub fn highlights_from_item(item: Option<&ExtractRisksItem>) -> Vec<PdfHighlight> {
    item.map(|i| highlights_from_sentences(&i.risky_sentences))
        .unwrap_or_default()
}

/// Pixel rectangle relative to the top-left of the rendered page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A highlight positioned on the page currently displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedHighlight {
    /// Position in the flattened highlight list; the selection key.
    pub id: usize,
    pub sentence_index: usize,
    pub rect: Rect,
    pub color: &'static str,
}

/// Position every highlight of `page` for a page rendered `render_width`
/// pixels wide. Boxes captured without a usable reference width are skipped.
pub fn layout(highlights: &[PdfHighlight], page: u32, render_width: f64) -> Vec<PlacedHighlight> {
    highlights
        .iter()
        .enumerate()
        .filter(|(_, h)| h.page == page && h.page_width > 0.0)
        .map(|(id, h)| {
            let scale = render_width / h.page_width;
            PlacedHighlight {
                id,
                sentence_index: h.index,
                rect: Rect {
                    left: h.x * scale,
                    top: h.y * scale,
                    width: h.w * scale,
                    height: h.h * scale,
                },
                color: h.color,
            }
        })
        .collect()
}

/// Which highlight (if any) has its reason shown. At most one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightSelection {
    active: Option<usize>,
}

impl HighlightSelection {
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Clicking the active highlight hides it; any other one replaces it.
    pub fn toggle(&mut self, id: usize) -> Option<usize> {
        self.active = if self.active == Some(id) { None } else { Some(id) };
        self.active
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

/// Floating reason box anchored just below a highlight.
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    pub left: f64,
    pub top: f64,
    pub reason: String,
}

/// Callout for the active highlight, if it is placed on the current page.
pub fn callout(
    highlights: &[PdfHighlight],
    placed: &[PlacedHighlight],
    selection: &HighlightSelection,
) -> Option<Callout> {
    let id = selection.active()?;
    let p = placed.iter().find(|p| p.id == id)?;
    let h = highlights.get(id)?;
    Some(Callout {
        left: p.rect.left,
        top: p.rect.top + p.rect.height + CALLOUT_GAP,
        reason: h.reason.clone(),
    })
}
