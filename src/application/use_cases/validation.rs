use crate::application::UseCaseError;

pub const MAX_TITLE_CHARS: usize = 500;
pub const MAX_CONTENT_CHARS: usize = 10_000;

pub fn require_text(field: &str, value: &str, max_chars: usize) -> Result<(), UseCaseError> {
    if value.trim().is_empty() {
        return Err(UseCaseError::Validation(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > max_chars {
        return Err(UseCaseError::Validation(format!(
            "{} must be at most {} characters",
            field, max_chars
        )));
    }
    Ok(())
}

/// Title and content rules for knowledge articles.
pub fn validate_article(title: &str, content: &str) -> Result<(), UseCaseError> {
    require_text("Title", title, MAX_TITLE_CHARS)?;
    require_text("Content", content, MAX_CONTENT_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_limits() {
        assert!(validate_article("제목", "충분히 긴 본문 내용입니다").is_ok());
        assert!(validate_article("  ", "충분히 긴 본문 내용입니다").is_err());
        assert!(validate_article("제목", "짧음").is_ok());
        assert!(validate_article(&"가".repeat(501), "충분히 긴 본문 내용입니다").is_err());
        assert!(validate_article("제목", &"가".repeat(10_001)).is_err());
    }
}
