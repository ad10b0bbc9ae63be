//! Risk labels assigned by the analysis service, and how they are shown.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine label: `G` low, `M` medium, `B` high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    G,
    M,
    B,
}

impl RiskLabel {
    /// Translucent fill used for PDF highlights.
    pub fn highlight_color(self) -> &'static str {
        match self {
            Self::G => "rgba(34,197,94,0.25)",
            Self::M => "rgba(245,158,11,0.25)",
            Self::B => "rgba(248,113,113,0.25)",
        }
    }

    pub fn kor(self) -> KorRiskLabel {
        match self {
            Self::G => KorRiskLabel::Low,
            Self::M => KorRiskLabel::Medium,
            Self::B => KorRiskLabel::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::G => "G",
            Self::M => "M",
            Self::B => "B",
        }
    }
}

/// Display grade in the Korean UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KorRiskLabel {
    Low,
    Medium,
    High,
}

impl KorRiskLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "하",
            Self::Medium => "중",
            Self::High => "상",
        }
    }
}

impl fmt::Display for KorRiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw label to its Korean grade. Anything unrecognized is `None`.
pub fn to_kor_risk_label(raw: Option<&str>) -> Option<KorRiskLabel> {
    let v = raw?.trim().to_uppercase();
    match v.as_str() {
        "B" => Some(KorRiskLabel::High),
        "M" => Some(KorRiskLabel::Medium),
        "G" => Some(KorRiskLabel::Low),
        _ => None,
    }
}

/// Row tint of an evidence entry, by rating.
pub fn row_tint(label: Option<RiskLabel>) -> &'static str {
    match label {
        Some(RiskLabel::G) => "emerald",
        Some(RiskLabel::M) => "amber",
        Some(RiskLabel::B) => "rose",
        None => "gray",
    }
}
