//! Best-effort highlight fallback for documents without position data.
//!
//! Text fragments emitted by the PDF text layer are compared with risky
//! sentences after normalization. Duplicate or near-duplicate sentences will
//! cross-match; callers should prefer coordinate highlights whenever any
//! sentence carries positions (see [`HighlightMode::choose`]).

use crate::api::{ExtractRisksItem, RiskySentence};
use crate::risk::RiskLabel;

const STRIP: &[char] = &[
    '·', '•', '‧', '∙', '●', '○', '◦', '▪', '▫', '-', '–', '—', ',', '.', ';', ':', '!', '?',
    '"', '\'', '“', '”', '‘', '’', '(', ')', '[', ']', '「', '」', '『', '』',
];

/// Trim, collapse whitespace runs to one space, and drop punctuation/bullets.
pub fn normalize_fragment(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !STRIP.contains(c)).collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextMatch {
    /// Index of the matched sentence.
    pub index: usize,
    pub label: RiskLabel,
    pub color: &'static str,
    pub reason: String,
}

pub struct TextMatcher {
    candidates: Vec<(String, TextMatch)>,
}

impl TextMatcher {
    /// Sentences that normalize to nothing are never matchable.
    pub fn new(sentences: &[RiskySentence]) -> Self {
        let candidates = sentences
            .iter()
            .enumerate()
            .filter_map(|(index, s)| {
                let norm = normalize_fragment(&s.sentence);
                (!norm.is_empty()).then(|| {
                    (
                        norm,
                        TextMatch {
                            index,
                            label: s.risk_label,
                            color: s.risk_label.highlight_color(),
                            reason: s.reason.clone(),
                        },
                    )
                })
            })
            .collect();
        Self { candidates }
    }

    /// First sentence whose normalized form equals the fragment's.
    pub fn match_fragment(&self, fragment: &str) -> Option<&TextMatch> {
        let norm = normalize_fragment(fragment);
        if norm.is_empty() {
            return None;
        }
        self.candidates
            .iter()
            .find(|(candidate, _)| *candidate == norm)
            .map(|(_, m)| m)
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Which highlight path a viewer should use for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightMode {
    Coordinates,
    TextMatch,
    None,
}

impl HighlightMode {
    pub fn choose(item: Option<&ExtractRisksItem>) -> Self {
        match item {
            Some(i) if i.has_positions() => Self::Coordinates,
            Some(i) if !i.risky_sentences.is_empty() => Self::TextMatch,
            _ => Self::None,
        }
    }
}

/// Reason banner pinned to the bottom of the viewer, toggled per sentence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Banner {
    active: Option<(usize, String)>,
}

impl Banner {
    pub fn toggle(&mut self, m: &TextMatch) {
        self.active = match &self.active {
            Some((idx, _)) if *idx == m.index => None,
            _ => Some((m.index, m.reason.clone())),
        };
    }

    pub fn reason(&self) -> Option<&str> {
        self.active.as_ref().map(|(_, r)| r.as_str())
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}
