use crate::api::CaseSearchResponse;
use serde::{Deserialize, Serialize};

/// A court decision as listed on the mapping and simulation pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseItem {
    /// `{doc_id}-{input_idx}-{rank_idx}`; the same decision may appear once
    /// per query that found it.
    pub id: String,
    pub name: String,
    pub court: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Flatten per-query search responses, keeping query order then rank order.
pub fn project_cases(responses: &[CaseSearchResponse]) -> Vec<CaseItem> {
    responses
        .iter()
        .enumerate()
        .flat_map(|(input_idx, resp)| {
            resp.items.iter().enumerate().map(move |(rank_idx, row)| CaseItem {
                id: format!("{}-{}-{}", row.doc_id, input_idx, rank_idx),
                name: row.case_name.clone(),
                court: row.court.clone(),
                date: row.decision_date.clone(),
                summary: row.summary.clone().filter(|s| !s.trim().is_empty()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RawCaseRow;

    fn response(rows: &[(i64, &str)]) -> CaseSearchResponse {
        CaseSearchResponse {
            query: "q".into(),
            count: rows.len(),
            items: rows
                .iter()
                .map(|(id, name)| RawCaseRow {
                    doc_id: *id,
                    case_name: name.to_string(),
                    court: "대법원".into(),
                    decision_date: "2025.04.15".into(),
                    summary: Some(" ".into()),
                })
                .collect(),
        }
    }

    #[test]
    fn ids_encode_query_and_rank() {
        let cases = project_cases(&[
            response(&[(77, "보증금반환"), (78, "임대차")]),
            response(&[(77, "보증금반환")]),
        ]);
        let ids: Vec<&str> = cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["77-0-0", "78-0-1", "77-1-0"]);
        assert_eq!(cases[0].court, "대법원");
        assert_eq!(cases[0].summary, None);
    }

    #[test]
    fn no_responses_no_cases() {
        assert!(project_cases(&[]).is_empty());
    }
}
