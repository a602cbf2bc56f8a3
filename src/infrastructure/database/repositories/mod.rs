pub mod postgres_chat_history_repository;
pub mod postgres_knowledge_repository;
pub mod postgres_promotion_store;
pub mod postgres_qna_repository;
pub mod postgres_user_repository;

pub use postgres_chat_history_repository::PostgresChatHistoryRepository;
pub use postgres_knowledge_repository::PostgresKnowledgeRepository;
pub use postgres_promotion_store::PostgresPromotionStore;
pub use postgres_qna_repository::PostgresQnaRepository;
pub use postgres_user_repository::PostgresUserRepository;

/// `%fragment%` for LIKE / ILIKE with the pattern metacharacters escaped,
/// so the match is a plain substring test.
pub(crate) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn test_like_metacharacters_are_escaped() {
        assert_eq!(contains_pattern("100%_done"), "%100\\%\\_done%");
        assert_eq!(contains_pattern("C:\\temp"), "%C:\\\\temp%");
        assert_eq!(contains_pattern("리스너"), "%리스너%");
    }
}
