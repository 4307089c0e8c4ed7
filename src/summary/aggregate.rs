use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One (user, chapter) pair from the users ⟕ user_chapters join.
///
/// Users without any chapter record come through the outer join with
/// `chapter_id = 0` and `score = 0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ScoreRow {
    pub user_id: i64,
    pub user_name: String,
    pub user_class: String,
    pub chapter_id: i64,
    pub score: f64,
}

impl ScoreRow {
    /// Sentinel chapter id produced by the outer join for users with no activity
    pub const NO_CHAPTER: i64 = 0;

    pub fn new(
        user_id: i64,
        user_name: impl Into<String>,
        user_class: impl Into<String>,
        chapter_id: i64,
        score: f64,
    ) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            user_class: user_class.into(),
            chapter_id,
            score,
        }
    }
}

/// Per-user nested view: identity plus `"C<chapter>" -> score`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScoreEntry {
    pub id: i64,
    pub name: String,
    pub class: String,
    pub chapter_scores: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChapterScoresSummary {
    pub users_scores: Vec<UserScoreEntry>,
}

impl From<Vec<UserScoreEntry>> for UserChapterScoresSummary {
    fn from(users_scores: Vec<UserScoreEntry>) -> Self {
        Self { users_scores }
    }
}

/// Label used for a chapter in `chapterScores`
pub fn chapter_key(chapter_id: i64) -> String {
    format!("C{}", chapter_id)
}

/// Fold flat score rows into one entry per user, ascending by user id.
///
/// - the first row seen for a user fixes its name and class
/// - `chapter_id == 0` creates the entry but adds no score
/// - a repeated chapter for the same user overwrites the earlier score
///
/// Input order does not matter; the output is always sorted by id.
pub fn aggregate_chapter_scores<I>(rows: I) -> Vec<UserScoreEntry>
where
    I: IntoIterator<Item = ScoreRow>,
{
    let mut by_user: BTreeMap<i64, UserScoreEntry> = BTreeMap::new();

    for row in rows {
        let entry = match by_user.entry(row.user_id) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => vacant.insert(UserScoreEntry {
                id: row.user_id,
                name: row.user_name,
                class: row.user_class,
                chapter_scores: BTreeMap::new(),
            }),
        };

        if row.chapter_id != ScoreRow::NO_CHAPTER {
            entry.chapter_scores.insert(chapter_key(row.chapter_id), row.score);
        }
    }

    by_user.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn user_without_chapters_gets_empty_scores() {
        let out = aggregate_chapter_scores(vec![ScoreRow::new(1, "Alice", "A", 0, 0.0)]);
        assert_eq!(
            out,
            vec![UserScoreEntry {
                id: 1,
                name: "Alice".into(),
                class: "A".into(),
                chapter_scores: BTreeMap::new(),
            }]
        );
    }

    #[test]
    fn chapters_are_keyed_by_label() {
        let out = aggregate_chapter_scores(vec![
            ScoreRow::new(1, "Alice", "A", 1, 80.0),
            ScoreRow::new(1, "Alice", "A", 2, 90.0),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].chapter_scores, scores(&[("C1", 80.0), ("C2", 90.0)]));
    }

    #[test]
    fn output_is_sorted_by_user_id() {
        let out = aggregate_chapter_scores(vec![
            ScoreRow::new(2, "Bob", "B", 1, 70.0),
            ScoreRow::new(1, "Alice", "A", 1, 80.0),
        ]);
        let ids: Vec<i64> = out.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(out[1].name, "Bob");
    }

    #[test]
    fn duplicate_chapter_keeps_last_score() {
        let out = aggregate_chapter_scores(vec![
            ScoreRow::new(1, "Alice", "A", 1, 80.0),
            ScoreRow::new(1, "Alice", "A", 1, 95.0),
        ]);
        assert_eq!(out[0].chapter_scores, scores(&[("C1", 95.0)]));
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        assert!(aggregate_chapter_scores(Vec::new()).is_empty());
    }

    #[test]
    fn first_row_fixes_identity_fields() {
        let out = aggregate_chapter_scores(vec![
            ScoreRow::new(7, "Citra", "TI-1", 1, 50.0),
            ScoreRow::new(7, "Citra Renamed", "TI-2", 2, 60.0),
        ]);
        assert_eq!(out[0].name, "Citra");
        assert_eq!(out[0].class, "TI-1");
        assert_eq!(out[0].chapter_scores.len(), 2);
    }

    #[test]
    fn sentinel_row_never_adds_c0() {
        let out = aggregate_chapter_scores(vec![
            ScoreRow::new(1, "Alice", "A", 3, 70.0),
            ScoreRow::new(1, "Alice", "A", 0, 0.0),
            ScoreRow::new(2, "Bob", "B", 0, 0.0),
        ]);
        assert!(out.iter().all(|e| !e.chapter_scores.contains_key("C0")));
        assert_eq!(out[0].chapter_scores, scores(&[("C3", 70.0)]));
        assert!(out[1].chapter_scores.is_empty());
    }

    #[test]
    fn negative_chapter_ids_pass_through() {
        let out = aggregate_chapter_scores(vec![ScoreRow::new(1, "Alice", "A", -4, 12.5)]);
        assert_eq!(out[0].chapter_scores, scores(&[("C-4", 12.5)]));
    }

    #[test]
    fn reordering_rows_does_not_change_output() {
        let rows = vec![
            ScoreRow::new(3, "Dedi", "B", 2, 66.0),
            ScoreRow::new(1, "Alice", "A", 1, 80.0),
            ScoreRow::new(2, "Bob", "B", 0, 0.0),
            ScoreRow::new(3, "Dedi", "B", 1, 77.0),
            ScoreRow::new(1, "Alice", "A", 2, 90.0),
        ];
        let expected = aggregate_chapter_scores(rows.clone());

        let mut reversed = rows.clone();
        reversed.reverse();
        assert_eq!(aggregate_chapter_scores(reversed), expected);

        let mut rotated = rows;
        rotated.rotate_left(2);
        assert_eq!(aggregate_chapter_scores(rotated), expected);

        // one entry per distinct user id
        assert_eq!(expected.len(), 3);
    }

    #[test]
    fn aggregating_twice_is_stable() {
        let rows = vec![
            ScoreRow::new(5, "Eka", "C", 4, 88.0),
            ScoreRow::new(4, "Fajar", "C", 0, 0.0),
        ];
        assert_eq!(aggregate_chapter_scores(rows.clone()), aggregate_chapter_scores(rows));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let summary = UserChapterScoresSummary::from(aggregate_chapter_scores(vec![ScoreRow::new(
            1, "Alice", "A", 1, 80.0,
        )]));
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["usersScores"][0]["id"], 1);
        assert_eq!(value["usersScores"][0]["chapterScores"]["C1"], 80.0);
    }
}
