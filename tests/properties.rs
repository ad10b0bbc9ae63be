use jeonsafe::api::{RiskPosition, RiskySentence};
use jeonsafe::evidence::{BucketKey, Buckets};
use jeonsafe::files::FileRecord;
use jeonsafe::risk::RiskLabel;
use jeonsafe::viewer::{highlights_from_sentences, layout};
use proptest::prelude::*;
use serde_json::json;

const KINDS: [&str; 7] = ["contract", "sms", "deposit", "me", "landlord", "other", "receipt"];

fn record(id: i64) -> FileRecord {
    serde_json::from_value(json!({
        "id": id,
        "user_id": 1,
        "original_filename": format!("file-{id}.pdf"),
        "content_type": "application/pdf",
        "size_bytes": 10,
        "storage": "local",
        "category": "other",
        "created_at": "2025-09-01T00:00:00",
    }))
    .unwrap()
}

fn ids(buckets: &Buckets) -> Vec<String> {
    let mut all: Vec<String> = BucketKey::ORDER
        .into_iter()
        .flat_map(|k| buckets.items(k).iter().map(|it| it.id.clone()))
        .collect();
    all.sort();
    all
}

proptest! {
    #[test]
    fn moves_never_lose_or_duplicate_items(
        kinds in prop::collection::vec(0usize..KINDS.len(), 1..12),
        moves in prop::collection::vec((0usize..12, 0usize..6, prop::option::of(0usize..12)), 0..24),
    ) {
        let files: Vec<FileRecord> = (0..kinds.len() as i64).map(record).collect();
        let mut buckets = Buckets::classify(&files, |f| Some(KINDS[kinds[f.id as usize]].to_string()));
        let before = ids(&buckets);
        prop_assert_eq!(buckets.total(), files.len());

        for (item, to, over) in moves {
            let id = (item % files.len()).to_string();
            let over = over.map(|o| (o % files.len()).to_string());
            buckets.move_item(&id, BucketKey::ORDER[to], over.as_deref());
            if over.as_deref() == Some(id.as_str()) {
                continue;
            }
            prop_assert_eq!(buckets.locate(&id).map(|(k, _)| k), Some(BucketKey::ORDER[to]));
        }

        prop_assert_eq!(buckets.total(), files.len());
        prop_assert_eq!(ids(&buckets), before);
    }

    #[test]
    fn highlight_boxes_scale_with_render_width(
        x in 0.0f64..500.0,
        y in 0.0f64..700.0,
        w in 1.0f64..200.0,
        h in 1.0f64..40.0,
        page_width in 100.0f64..1200.0,
        render_width in 100.0f64..1200.0,
    ) {
        let sentence = RiskySentence {
            sentence: "임대인은 수선 의무를 지지 않는다.".into(),
            anchor: None,
            reason: "수선 의무 전가".into(),
            risk_label: RiskLabel::M,
            law_input: None,
            case_input: None,
            positions: vec![RiskPosition { page: 2, x, y, w, h, page_width, page_height: page_width * 1.4 }],
        };
        let highlights = highlights_from_sentences(&[sentence]);
        prop_assert!(layout(&highlights, 1, render_width).is_empty());

        let placed = layout(&highlights, 2, render_width);
        prop_assert_eq!(placed.len(), 1);
        let scale = render_width / page_width;
        let rect = placed[0].rect;
        prop_assert!((rect.left - x * scale).abs() < 1e-9);
        prop_assert!((rect.top - y * scale).abs() < 1e-9);
        prop_assert!((rect.width / rect.height - w / h).abs() < 1e-9 * (w / h).max(1.0));
    }
}
