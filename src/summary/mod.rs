// summary/mod.rs - Admin aggregation views
//
// Pure, request-scoped transforms over rows that the repositories already
// materialized. Nothing in here touches the database or holds state between
// calls, so handlers can run them concurrently on independent inputs.

pub mod aggregate;
pub mod count;

pub use aggregate::{aggregate_chapter_scores, chapter_key, ScoreRow, UserChapterScoresSummary, UserScoreEntry};
pub use count::{count_by_label, LabelCounts};
