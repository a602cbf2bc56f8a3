use std::sync::LazyLock;

use regex::Regex;

use crate::domain::value_objects::Keywords;

pub const DEFAULT_MAX_KEYWORDS: usize = 5;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"));

/// Domain terms that count double when picking keywords.
const IT_TERMS: &[&str] = &[
    "database", "db", "데이터베이스", "oracle", "mysql", "postgresql", "server", "서버", "cpu",
    "memory", "메모리", "disk", "디스크", "network", "네트워크", "connection", "연결", "error",
    "에러", "performance", "성능", "monitoring", "모니터링", "backup", "백업", "query", "쿼리",
    "index", "인덱스", "tablespace", "테이블스페이스", "log", "로그", "session", "세션", "lock",
    "락", "timeout", "타임아웃",
];

/// Frequency-based keyword pick for articles submitted without keywords.
/// Words of two characters or fewer are ignored; ties keep first appearance.
pub fn extract_keywords(text: &str, max_keywords: usize) -> Keywords {
    let lowered = text.to_lowercase();
    let mut scores: Vec<(String, u32)> = Vec::new();

    for word in WORD_PATTERN.find_iter(&lowered).map(|m| m.as_str()) {
        if word.chars().count() <= 2 {
            continue;
        }
        let weight = if IT_TERMS.contains(&word) { 2 } else { 1 };
        match scores.iter_mut().find(|(existing, _)| existing == word) {
            Some((_, score)) => *score += weight,
            None => scores.push((word.to_string(), weight)),
        }
    }

    scores.sort_by(|a, b| b.1.cmp(&a.1));
    Keywords::new(
        scores
            .into_iter()
            .take(max_keywords)
            .map(|(word, _)| word)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_it_terms_weigh_double() {
        let keywords = extract_keywords(
            "Listener restart fixed the oracle listener. Oracle was fine.",
            3,
        );
        assert_eq!(keywords.as_slice()[0], "oracle");
        assert_eq!(keywords.as_slice()[1], "listener");
        assert_eq!(keywords.len(), 3);
    }

    #[test]
    fn test_short_words_skipped() {
        let keywords = extract_keywords("db is ok 디스크 용량", DEFAULT_MAX_KEYWORDS);
        assert_eq!(keywords.as_slice(), &["디스크".to_string()]);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_keywords("", DEFAULT_MAX_KEYWORDS).is_empty());
    }
}
