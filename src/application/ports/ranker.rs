use crate::domain::entities::KnowledgeArticle;

pub const DEFAULT_TOP_K: usize = 3;

/// Scores at or below this are never returned.
pub const RELEVANCE_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredArticle {
    pub article: KnowledgeArticle,
    pub score: f32,
}

/// Ranks stored knowledge against a free-text query.
///
/// Implementations return at most `top_k` entries, sorted by descending score
/// with ties kept in corpus order, every score in `[0, 1]` and above
/// [`RELEVANCE_THRESHOLD`]. "No matches" is an empty vector, never an error.
pub trait Ranker: Send + Sync {
    fn rank(&self, query: &str, corpus: &[KnowledgeArticle], top_k: usize) -> Vec<ScoredArticle>;

    fn name(&self) -> &'static str;
}
