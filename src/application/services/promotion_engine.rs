use tracing::info;
use uuid::Uuid;

use crate::application::ports::PromotionLedger;
use crate::domain::StoreError;
use crate::domain::entities::{KnowledgeArticle, QnaAnswer, QnaQuestion};
use crate::domain::repositories::qna_repository::LikeToggleOutcome;
use crate::domain::value_objects::{ExperienceEvent, Keywords, KnowledgeType};

/// Like count at which an answer is promoted into the knowledge base.
pub const PROMOTION_LIKE_THRESHOLD: i64 = 2;

/// Leading answer characters used to detect an earlier promotion.
pub const ANSWER_FINGERPRINT_CHARS: usize = 50;

pub const PROMOTED_TITLE_PREFIX: &str = "[QnA] ";

const PROMOTED_KEYWORD_LIMIT: usize = 5;

const STOPWORDS: &[&str] = &[
    "의", "을", "를", "이", "가", "은", "는", "과", "와", "에", "에서", "로", "으로", "질문", "답변",
];

pub fn compose_content(question_body: &str, answer_content: &str) -> String {
    format!("**질문:** {}\n\n**답변:** {}", question_body, answer_content)
}

/// First five tokens longer than two characters that are not stopwords.
pub fn promoted_keywords(composite: &str) -> Keywords {
    Keywords::new(
        composite
            .to_lowercase()
            .split_whitespace()
            .filter(|word| word.chars().count() > 2 && !STOPWORDS.contains(word))
            .take(PROMOTED_KEYWORD_LIMIT)
            .map(str::to_string)
            .collect(),
    )
}

pub fn build_promoted_article(
    question: &QnaQuestion,
    answer: &QnaAnswer,
) -> Result<KnowledgeArticle, String> {
    let content = compose_content(question.body(), answer.content());
    let keywords = promoted_keywords(&content);

    let article = KnowledgeArticle::new(
        format!("{}{}", PROMOTED_TITLE_PREFIX, question.title()),
        content,
        keywords,
        KnowledgeType::for_category(question.category()),
        Some(answer.author_id()),
    )?;

    Ok(article.promoted_from(answer.id()))
}

/// Flips `user_id`'s like on the answer and, on a like that reaches the
/// threshold, promotes the answer. Every write goes through `ledger`, which
/// the caller commits or rolls back as a unit.
pub fn toggle_like<L>(
    ledger: &mut L,
    answer_id: Uuid,
    user_id: Uuid,
) -> Result<LikeToggleOutcome, StoreError>
where
    L: PromotionLedger + ?Sized,
{
    let answer = ledger
        .lock_answer(answer_id)?
        .ok_or_else(|| StoreError::not_found("answer", answer_id))?;

    if !ledger.user_exists(user_id)? {
        return Err(StoreError::not_found("user", user_id));
    }

    let liked = if ledger.has_like(answer_id, user_id)? {
        ledger.remove_like(answer_id, user_id)?;
        false
    } else {
        ledger.insert_like(answer_id, user_id)?;
        true
    };

    let like_count = ledger.count_likes(answer_id)?;

    let promoted_article_id = if liked && like_count >= PROMOTION_LIKE_THRESHOLD {
        promote(ledger, &answer)?
    } else {
        None
    };

    info!(
        "Answer {} {} by user {}. Total likes: {}",
        answer_id,
        if liked { "liked" } else { "unliked" },
        user_id,
        like_count
    );

    Ok(LikeToggleOutcome {
        like_count,
        liked,
        promoted: promoted_article_id.is_some(),
        promoted_article_id,
    })
}

fn promote<L>(ledger: &mut L, answer: &QnaAnswer) -> Result<Option<Uuid>, StoreError>
where
    L: PromotionLedger + ?Sized,
{
    let question = ledger
        .find_question(answer.question_id())?
        .ok_or_else(|| StoreError::not_found("question", answer.question_id()))?;

    let fingerprint = answer.fingerprint(ANSWER_FINGERPRINT_CHARS);
    if ledger.find_promoted_duplicate(question.title(), &fingerprint)? {
        info!("Answer {} already exists in knowledge base", answer.id());
        return Ok(None);
    }

    let article = build_promoted_article(&question, answer).map_err(StoreError::Validation)?;
    if !ledger.insert_article(&article)? {
        info!("Answer {} was promoted concurrently", answer.id());
        return Ok(None);
    }

    let award = ledger.add_experience(
        answer.author_id(),
        ExperienceEvent::AnswerPromoted.points(),
    )?;

    info!(
        "Answer {} added to knowledge base as {} (author {} now at {} points, level {})",
        answer.id(),
        article.id(),
        answer.author_id(),
        award.points,
        award.level
    );

    Ok(Some(article.id()))
}
