use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub text: String,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub posted_at: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    pub fn is_posted(&self) -> bool {
        self.posted_at.is_some()
    }
}

/// Orders entries for display: posted entries first, each group newest first.
pub fn sorted_for_display(entries: &[HistoryEntry]) -> Vec<HistoryEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| {
        b.is_posted()
            .cmp(&a.is_posted())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn entry(id: &str, created_minute: u32, posted: bool) -> HistoryEntry {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, created_minute, 0).unwrap();
        HistoryEntry {
            id: id.to_string(),
            text: format!("comment {id}"),
            video_url: None,
            created_at,
            posted_at: posted.then(|| created_at + chrono::Duration::minutes(1)),
        }
    }

    fn assert_display_order(sorted: &[HistoryEntry]) {
        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.is_posted() || !b.is_posted(),
                "pending {} placed before posted {}",
                a.id,
                b.id
            );
            if a.is_posted() == b.is_posted() {
                assert!(a.created_at >= b.created_at, "{} older than {}", a.id, b.id);
            }
        }
    }

    fn permutations(items: &[HistoryEntry]) -> Vec<Vec<HistoryEntry>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut result = Vec::new();
        for idx in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(idx);
            for mut tail in permutations(&rest) {
                tail.insert(0, head.clone());
                result.push(tail);
            }
        }
        result
    }

    #[test]
    fn posted_entries_come_first() {
        let entries = vec![entry("a", 5, false), entry("b", 1, true), entry("c", 9, false)];
        let sorted = sorted_for_display(&entries);
        let ids: Vec<_> = sorted.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn ordering_holds_for_every_permutation() {
        let entries = vec![
            entry("p-old", 1, true),
            entry("p-new", 7, true),
            entry("q-old", 2, false),
            entry("q-new", 8, false),
            entry("q-tie", 8, false),
        ];
        for permutation in permutations(&entries) {
            let sorted = sorted_for_display(&permutation);
            assert_eq!(sorted.len(), entries.len());
            assert_display_order(&sorted);
        }
    }

    #[test]
    fn empty_history_sorts_to_empty() {
        assert!(sorted_for_display(&[]).is_empty());
    }
}
