use std::collections::BTreeSet;

use crate::application::ports::ranker::{RELEVANCE_THRESHOLD, Ranker, ScoredArticle};
use crate::domain::entities::KnowledgeArticle;

const TITLE_BOOST: f32 = 0.3;
const KEYWORD_BOOST: f32 = 0.4;
const PHRASE_BOOST: f32 = 0.5;

/// Keyword-driven scorer: token Jaccard overlap plus additive boosts for
/// title, keyword and exact-phrase hits. Only the final sum is clamped.
#[derive(Debug, Clone, Default)]
pub struct LexicalRanker;

impl LexicalRanker {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, query: &str, article: &KnowledgeArticle) -> f32 {
        let query_lower = query.to_lowercase();
        let query_tokens: BTreeSet<&str> = query_lower.split_whitespace().collect();

        let title_lower = article.title().to_lowercase();
        let content_lower = article.content().to_lowercase();

        let mut score = jaccard(&query_tokens, &title_lower, &content_lower);

        for token in &query_tokens {
            if title_lower.contains(token) {
                score += TITLE_BOOST;
            }
        }

        let keywords = normalized_keywords(article);
        for token in &query_tokens {
            for keyword in &keywords {
                if keyword.contains(token) || token.contains(keyword.as_str()) {
                    score += KEYWORD_BOOST;
                }
            }
        }

        let phrase = query_lower.trim();
        if !phrase.is_empty() && content_lower.contains(phrase) {
            score += PHRASE_BOOST;
        }

        score.min(1.0)
    }
}

impl Ranker for LexicalRanker {
    fn rank(&self, query: &str, corpus: &[KnowledgeArticle], top_k: usize) -> Vec<ScoredArticle> {
        let mut scored: Vec<ScoredArticle> = corpus
            .iter()
            .map(|article| ScoredArticle {
                score: self.score(query, article),
                article: article.clone(),
            })
            .filter(|entry| entry.score > RELEVANCE_THRESHOLD)
            .collect();

        // sort_by is stable, so equal scores keep corpus order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        scored
    }

    fn name(&self) -> &'static str {
        "lexical"
    }
}

fn jaccard(query_tokens: &BTreeSet<&str>, title_lower: &str, content_lower: &str) -> f32 {
    let doc_tokens: BTreeSet<&str> = title_lower
        .split_whitespace()
        .chain(content_lower.split_whitespace())
        .collect();

    let union = query_tokens.union(&doc_tokens).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = query_tokens.intersection(&doc_tokens).count();
    intersection as f32 / union as f32
}

fn normalized_keywords(article: &KnowledgeArticle) -> Vec<String> {
    article
        .keywords()
        .iter()
        .flat_map(|raw| raw.split(','))
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}
