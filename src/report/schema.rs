use crate::workflow::{MappingView, SectionResult};
use serde::{Deserialize, Serialize};

/// Everything printed in a mapping report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingReportData {
    pub file_name: String,
    pub ai_summary: AiSummary,
    pub uploaded_doc: UploadedDoc,
    pub law_groups: Vec<LawGroup>,
    pub cases: Vec<ReportCase>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiSummary {
    /// Raw label, e.g. `B`.
    pub risk_label: Option<String>,
    pub file_display_name: Option<String>,
    pub law_analysis: Option<String>,
    pub case_analysis: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadedDoc {
    pub file_name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawGroup {
    pub law_title: String,
    pub articles: Vec<ReportArticle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportArticle {
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCase {
    pub title: String,
    pub court: Option<String>,
    pub decision_date: Option<String>,
    pub summary: Option<String>,
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

impl MappingReportData {
    /// Snapshot of what the mapping page currently shows. Failed or empty
    /// search sections print as "none linked".
    pub fn from_view(view: &MappingView) -> Self {
        let ai_summary = match &view.analysis {
            Some(a) => AiSummary {
                risk_label: Some(a.rating.label.as_str().to_string()),
                file_display_name: Some(view.doc.name.clone()),
                law_analysis: non_blank(&a.law_input),
                case_analysis: non_blank(&a.case_input),
                bullets: a.rating.reasons.clone(),
            },
            None => AiSummary {
                file_display_name: Some(view.doc.name.clone()),
                ..AiSummary::default()
            },
        };

        let law_groups = match &view.laws {
            SectionResult::Ready(laws) => laws
                .iter()
                .map(|law| LawGroup {
                    law_title: law.law_name.clone(),
                    articles: law
                        .articles
                        .iter()
                        .map(|a| ReportArticle {
                            title: a.title.clone(),
                            summary: a.text.clone(),
                        })
                        .collect(),
                })
                .collect(),
            _ => Vec::new(),
        };

        let cases = view
            .cases
            .items()
            .iter()
            .map(|c| ReportCase {
                title: c.name.clone(),
                court: non_blank(&c.court),
                decision_date: non_blank(&c.date),
                summary: c.summary.as_deref().and_then(non_blank),
            })
            .collect();

        Self {
            file_name: view.doc.name.clone(),
            ai_summary,
            uploaded_doc: UploadedDoc {
                file_name: view.doc.name.clone(),
                description: None,
            },
            law_groups,
            cases,
        }
    }
}
