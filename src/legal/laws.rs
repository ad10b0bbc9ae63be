use crate::api::RawLawRow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const UNNAMED_LAW: &str = "법령명 없음";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub key: String,
    /// Displayed article number.
    pub number: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawWithArticles {
    pub law_id: String,
    pub law_name: String,
    pub articles: Vec<Article>,
}

/// `제39조` → `39`; anything that strips to nothing keeps its raw form.
fn clean_article_number(raw: &str) -> String {
    let trimmed = raw.trim();
    let inner = trimmed.strip_prefix('제').unwrap_or(trimmed);
    let inner = inner.strip_suffix('조').unwrap_or(inner).trim();
    if inner.is_empty() {
        raw.to_string()
    } else {
        inner.to_string()
    }
}

/// Group flat search rows under their law, in first-appearance order.
pub fn group_law_rows(rows: &[RawLawRow]) -> Vec<LawWithArticles> {
    let mut order: Vec<LawWithArticles> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (idx, row) in rows.iter().enumerate() {
        let law_name = if row.law_name.trim().is_empty() {
            UNNAMED_LAW.to_string()
        } else {
            row.law_name.clone()
        };
        let slot = *index.entry(law_name.clone()).or_insert_with(|| {
            order.push(LawWithArticles {
                law_id: law_name.clone(),
                law_name: law_name.clone(),
                articles: Vec::new(),
            });
            order.len() - 1
        });
        order[slot].articles.push(Article {
            key: format!("{}-{}-{}", law_name, row.article_no, idx),
            number: clean_article_number(&row.article_no),
            title: row.article_no.clone(),
            text: row.snippet.clone(),
        });
    }
    order
}
