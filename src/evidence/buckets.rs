use crate::api::AnalyzeItem;
use crate::files::FileRecord;
use crate::risk::{row_tint, RiskLabel};
use crate::store::AnalysisCache;
use std::fmt;

/// Named evidence category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketKey {
    Contract,
    Sms,
    Deposit,
    Me,
    Landlord,
    Other,
}

impl BucketKey {
    pub const ORDER: [BucketKey; 6] = [
        Self::Contract,
        Self::Sms,
        Self::Deposit,
        Self::Me,
        Self::Landlord,
        Self::Other,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Contract => "계약서",
            Self::Sms => "문자 내역",
            Self::Deposit => "입금 내역",
            Self::Me => "내 정보",
            Self::Landlord => "집주인 정보",
            Self::Other => "기타",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Sms => "sms",
            Self::Deposit => "deposit",
            Self::Me => "me",
            Self::Landlord => "landlord",
            Self::Other => "other",
        }
    }

    /// Server classification to bucket. Unknown or missing goes to `Other`.
    pub fn from_classification(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("contract") => Self::Contract,
            Some("sms") => Self::Sms,
            Some("deposit") => Self::Deposit,
            Some("me") => Self::Me,
            Some("landlord") => Self::Landlord,
            _ => Self::Other,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub name: String,
}

/// Session-local assignment of uploaded files to buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    lists: [Vec<Item>; 6],
}

impl Buckets {
    /// Place each file exactly once, by its classification.
    pub fn classify<F>(files: &[FileRecord], mut kind_of: F) -> Self
    where
        F: FnMut(&FileRecord) -> Option<String>,
    {
        let mut buckets = Self::default();
        for f in files {
            let key = BucketKey::from_classification(kind_of(f).as_deref());
            buckets.lists[key.slot()].push(Item {
                id: f.key(),
                name: f.original_filename.clone(),
            });
        }
        buckets
    }

    pub fn from_analysis(files: &[FileRecord], analysis: &AnalysisCache) -> Self {
        Self::classify(files, |f| analysis.get(&f.key()).and_then(|a| a.kind))
    }

    pub fn items(&self, key: BucketKey) -> &[Item] {
        &self.lists[key.slot()]
    }

    /// Non-empty buckets in display order.
    pub fn sections(&self) -> impl Iterator<Item = (BucketKey, &[Item])> {
        BucketKey::ORDER
            .into_iter()
            .map(|k| (k, self.items(k)))
            .filter(|(_, items)| !items.is_empty())
    }

    pub fn total(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub fn locate(&self, id: &str) -> Option<(BucketKey, usize)> {
        BucketKey::ORDER.into_iter().find_map(|k| {
            self.items(k)
                .iter()
                .position(|it| it.id == id)
                .map(|idx| (k, idx))
        })
    }

    /// Finish a drag of `id` into `to`.
    ///
    /// The item lands at the position of `over` (the item under the pointer)
    /// when that item is in `to`, at the end otherwise. Within one bucket
    /// this is a reorder. Returns whether anything moved.
    pub fn move_item(&mut self, id: &str, to: BucketKey, over: Option<&str>) -> bool {
        let Some((from, from_idx)) = self.locate(id) else {
            return false;
        };
        if over == Some(id) {
            return false;
        }
        let over_idx = over.and_then(|o| self.items(to).iter().position(|it| it.id == o));

        let item = self.lists[from.slot()].remove(from_idx);
        let dest = &mut self.lists[to.slot()];
        let at = over_idx.unwrap_or(dest.len()).min(dest.len());
        dest.insert(at, item);
        from != to || at != from_idx
    }

    /// Menu-driven reassignment: append to `to`. Same bucket is a no-op.
    pub fn move_to(&mut self, id: &str, to: BucketKey) -> bool {
        match self.locate(id) {
            Some((from, _)) if from != to => self.move_item(id, to, None),
            _ => false,
        }
    }
}

/// One row of the evidence list, tinted by its rating.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceRow {
    pub id: String,
    pub name: String,
    pub rating: Option<RiskLabel>,
    pub tint: &'static str,
    pub reasons: Vec<String>,
    pub open: bool,
}

impl EvidenceRow {
    pub fn new(item: &Item, analysis: Option<&AnalyzeItem>) -> Self {
        let rating = analysis.map(|a| a.rating.label);
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            rating,
            tint: row_tint(rating),
            reasons: analysis.map(|a| a.rating.reasons.clone()).unwrap_or_default(),
            open: false,
        }
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    /// Reasons shown while the row is expanded.
    pub fn visible_reasons(&self) -> &[String] {
        if self.open {
            &self.reasons
        } else {
            &[]
        }
    }
}
