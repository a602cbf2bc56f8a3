use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::{LedgerWork, PromotionLedger, PromotionStore};
use crate::domain::StoreError;
use crate::domain::entities::{ChatRecord, KnowledgeArticle, QnaAnswer, QnaQuestion, User};
use crate::domain::repositories::knowledge_repository::{KnowledgeQuery, KnowledgeSort};
use crate::domain::repositories::qna_repository::{
    AnswerView, LikeToggleOutcome, QuestionFilter, QuestionSummary,
};
use crate::domain::repositories::{
    ChatHistoryRepository, KnowledgeRepository, QnaRepository, UserRepository,
};
use crate::domain::value_objects::{ExperienceAward, ExperienceEvent, QuestionStatus};

#[derive(Debug, Clone, Default)]
struct StoreState {
    users: Vec<User>,
    articles: Vec<KnowledgeArticle>,
    questions: Vec<QnaQuestion>,
    answers: Vec<QnaAnswer>,
    likes: Vec<(Uuid, Uuid)>,
    chats: Vec<ChatRecord>,
}

impl StoreState {
    fn user_mut(&mut self, user_id: Uuid) -> Result<&mut User, StoreError> {
        self.users
            .iter_mut()
            .find(|u| u.id() == user_id)
            .ok_or_else(|| StoreError::not_found("user", user_id))
    }

    fn add_experience(&mut self, user_id: Uuid, delta: u32) -> Result<ExperienceAward, StoreError> {
        Ok(self.user_mut(user_id)?.apply_award(delta))
    }

    fn display_name(&self, user_id: Uuid) -> Option<String> {
        self.users
            .iter()
            .find(|u| u.id() == user_id)
            .map(|u| u.display_name().to_string())
    }

    fn question_mut(&mut self, question_id: Uuid) -> Result<&mut QnaQuestion, StoreError> {
        self.questions
            .iter_mut()
            .find(|q| q.id() == question_id)
            .ok_or_else(|| StoreError::not_found("question", question_id))
    }

    fn like_count(&self, answer_id: Uuid) -> i64 {
        self.likes.iter().filter(|(a, _)| *a == answer_id).count() as i64
    }

    fn remove_answers_where(&mut self, doomed: impl Fn(&QnaAnswer) -> bool) {
        let removed: Vec<Uuid> = self
            .answers
            .iter()
            .filter(|a| doomed(a))
            .map(|a| a.id())
            .collect();
        self.answers.retain(|a| !removed.contains(&a.id()));
        self.likes.retain(|(a, _)| !removed.contains(a));
    }
}

/// Process-local store implementing every repository port.
///
/// Multi-step writes run against a cloned snapshot that replaces the live
/// state only when the whole operation succeeds.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }

    fn read<T>(&self, query: impl FnOnce(&StoreState) -> T) -> Result<T, StoreError> {
        let state = self.lock()?;
        Ok(query(&state))
    }

    fn transact<T>(
        &self,
        work: impl FnOnce(&mut StoreState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.lock()?;
        let mut draft = state.clone();
        let result = work(&mut draft)?;
        *state = draft;
        Ok(result)
    }
}

#[async_trait]
impl KnowledgeRepository for InMemoryStore {
    async fn create(
        &self,
        article: &KnowledgeArticle,
    ) -> Result<Option<ExperienceAward>, StoreError> {
        self.transact(|state| {
            if state.articles.iter().any(|a| a.id() == article.id()) {
                return Err(StoreError::Database(format!(
                    "duplicate knowledge article {}",
                    article.id()
                )));
            }
            state.articles.push(article.clone());
            article
                .owner_id()
                .map(|owner| {
                    state.add_experience(owner, ExperienceEvent::KnowledgeCreated.points())
                })
                .transpose()
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<KnowledgeArticle>, StoreError> {
        self.read(|state| state.articles.iter().find(|a| a.id() == id).cloned())
    }

    async fn list(&self, query: &KnowledgeQuery) -> Result<Vec<KnowledgeArticle>, StoreError> {
        self.read(|state| {
            let search = query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty());

            let mut articles: Vec<KnowledgeArticle> = state
                .articles
                .iter()
                .filter(|a| search.is_none_or(|needle| a.matches_search(needle)))
                .filter(|a| query.knowledge_type.is_none_or(|kind| a.knowledge_type() == kind))
                .cloned()
                .collect();

            match query.sort {
                KnowledgeSort::Views => articles.sort_by(|a, b| {
                    b.view_count()
                        .cmp(&a.view_count())
                        .then(b.created_at().cmp(&a.created_at()))
                }),
                KnowledgeSort::Latest => articles.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
                KnowledgeSort::Title => articles.sort_by(|a, b| a.title().cmp(b.title())),
            }
            articles
        })
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<i64, StoreError> {
        self.transact(|state| {
            let article = state
                .articles
                .iter_mut()
                .find(|a| a.id() == id)
                .ok_or_else(|| StoreError::not_found("knowledge article", id))?;
            article.record_view();
            Ok(article.view_count())
        })
    }

    async fn update(&self, article: &KnowledgeArticle) -> Result<(), StoreError> {
        self.transact(|state| {
            let stored = state
                .articles
                .iter_mut()
                .find(|a| a.id() == article.id())
                .ok_or_else(|| StoreError::not_found("knowledge article", article.id()))?;

            *stored = KnowledgeArticle::restore(
                stored.id(),
                article.title().to_string(),
                article.content().to_string(),
                article.keywords().clone(),
                article.knowledge_type(),
                stored.owner_id(),
                stored.view_count(),
                stored.source_answer_id(),
                stored.created_at(),
                article.updated_at(),
            );
            Ok(())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        self.transact(|state| {
            let before = state.articles.len();
            state.articles.retain(|a| a.id() != id);
            Ok(state.articles.len() < before)
        })
    }

    async fn count(&self) -> Result<i64, StoreError> {
        self.read(|state| state.articles.len() as i64)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        self.transact(|state| {
            if state.users.iter().any(|u| u.username() == user.username()) {
                return Err(StoreError::Validation(format!(
                    "Username '{}' is already taken",
                    user.username()
                )));
            }
            state.users.push(user.clone());
            Ok(())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.read(|state| state.users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.read(|state| state.users.iter().find(|u| u.username() == username).cloned())
    }

    async fn rankings(&self, limit: i64) -> Result<Vec<User>, StoreError> {
        self.read(|state| {
            let mut users = state.users.clone();
            users.sort_by(|a, b| {
                b.experience_points()
                    .cmp(&a.experience_points())
                    .then(a.created_at().cmp(&b.created_at()))
            });
            users.truncate(usize::try_from(limit).unwrap_or(0));
            users
        })
    }

    async fn award_experience(
        &self,
        user_id: Uuid,
        delta: u32,
    ) -> Result<ExperienceAward, StoreError> {
        self.transact(|state| state.add_experience(user_id, delta))
    }
}

#[async_trait]
impl QnaRepository for InMemoryStore {
    async fn create_question(&self, question: &QnaQuestion) -> Result<ExperienceAward, StoreError> {
        self.transact(|state| {
            state.questions.push(question.clone());
            state.add_experience(
                question.questioner_id(),
                ExperienceEvent::QuestionCreated.points(),
            )
        })
    }

    async fn find_question(&self, id: Uuid) -> Result<Option<QnaQuestion>, StoreError> {
        self.read(|state| state.questions.iter().find(|q| q.id() == id).cloned())
    }

    async fn list_questions(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Vec<QuestionSummary>, StoreError> {
        self.read(|state| {
            let mut summaries: Vec<QuestionSummary> = state
                .questions
                .iter()
                .rev()
                .filter(|q| filter.category.as_deref().is_none_or(|c| q.category() == c))
                .filter(|q| filter.question_type.is_none_or(|t| q.question_type() == t))
                .filter_map(|q| {
                    let questioner_name = state.display_name(q.questioner_id())?;
                    let answer_count = state
                        .answers
                        .iter()
                        .filter(|a| a.question_id() == q.id())
                        .count() as i64;
                    Some(QuestionSummary {
                        question: q.clone(),
                        questioner_name,
                        answer_count,
                    })
                })
                .collect();
            summaries.sort_by(|a, b| b.question.created_at().cmp(&a.question.created_at()));
            summaries
        })
    }

    async fn update_question(&self, question: &QnaQuestion) -> Result<(), StoreError> {
        self.transact(|state| {
            let stored = state.question_mut(question.id())?;
            *stored = question.clone();
            Ok(())
        })
    }

    async fn delete_question(&self, id: Uuid) -> Result<bool, StoreError> {
        self.transact(|state| {
            let before = state.questions.len();
            state.questions.retain(|q| q.id() != id);
            if state.questions.len() == before {
                return Ok(false);
            }
            state.remove_answers_where(|a| a.question_id() == id);
            Ok(true)
        })
    }

    async fn create_answer(&self, answer: &QnaAnswer) -> Result<ExperienceAward, StoreError> {
        self.transact(|state| {
            state
                .question_mut(answer.question_id())?
                .set_status(QuestionStatus::Answered);
            state.answers.push(answer.clone());
            state.add_experience(answer.author_id(), ExperienceEvent::AnswerCreated.points())
        })
    }

    async fn find_answer(&self, id: Uuid) -> Result<Option<QnaAnswer>, StoreError> {
        self.read(|state| state.answers.iter().find(|a| a.id() == id).cloned())
    }

    async fn list_answers(
        &self,
        question_id: Uuid,
        viewer_id: Option<Uuid>,
    ) -> Result<Vec<AnswerView>, StoreError> {
        self.read(|state| {
            let mut views: Vec<AnswerView> = state
                .answers
                .iter()
                .filter(|a| a.question_id() == question_id)
                .filter_map(|a| {
                    Some(AnswerView {
                        author_name: state.display_name(a.author_id())?,
                        like_count: state.like_count(a.id()),
                        liked_by_viewer: viewer_id
                            .is_some_and(|viewer| state.likes.contains(&(a.id(), viewer))),
                        answer: a.clone(),
                    })
                })
                .collect();
            views.sort_by(|a, b| a.answer.created_at().cmp(&b.answer.created_at()));
            views
        })
    }

    async fn update_answer(&self, answer: &QnaAnswer) -> Result<(), StoreError> {
        self.transact(|state| {
            let stored = state
                .answers
                .iter_mut()
                .find(|a| a.id() == answer.id())
                .ok_or_else(|| StoreError::not_found("answer", answer.id()))?;
            *stored = answer.clone();
            Ok(())
        })
    }

    async fn delete_answer(&self, id: Uuid) -> Result<QuestionStatus, StoreError> {
        self.transact(|state| {
            let question_id = state
                .answers
                .iter()
                .find(|a| a.id() == id)
                .map(|a| a.question_id())
                .ok_or_else(|| StoreError::not_found("answer", id))?;

            state.remove_answers_where(|a| a.id() == id);
            let remaining = state
                .answers
                .iter()
                .filter(|a| a.question_id() == question_id)
                .count() as i64;

            let status = QuestionStatus::for_answer_count(remaining);
            state.question_mut(question_id)?.set_status(status);
            Ok(status)
        })
    }

    async fn count_likes(&self, answer_id: Uuid) -> Result<i64, StoreError> {
        self.read(|state| state.like_count(answer_id))
    }

    async fn has_liked(&self, answer_id: Uuid, user_id: Uuid) -> Result<bool, StoreError> {
        self.read(|state| state.likes.contains(&(answer_id, user_id)))
    }
}

#[async_trait]
impl ChatHistoryRepository for InMemoryStore {
    async fn save(&self, record: &ChatRecord) -> Result<(), StoreError> {
        self.transact(|state| {
            state.chats.push(record.clone());
            Ok(())
        })
    }

    async fn list_by_user(
        &self,
        user_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<ChatRecord>, StoreError> {
        self.read(|state| {
            let mut records: Vec<ChatRecord> = state
                .chats
                .iter()
                .rev()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect();
            records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            records.truncate(usize::try_from(limit).unwrap_or(0));
            records
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        self.transact(|state| {
            let before = state.chats.len();
            state.chats.retain(|r| r.id != id);
            Ok(state.chats.len() < before)
        })
    }

    async fn clear(&self, user_id: Option<Uuid>) -> Result<u64, StoreError> {
        self.transact(|state| {
            let before = state.chats.len();
            state.chats.retain(|r| r.user_id != user_id);
            Ok((before - state.chats.len()) as u64)
        })
    }
}

#[async_trait]
impl PromotionStore for InMemoryStore {
    async fn run_promotion(&self, work: LedgerWork) -> Result<LikeToggleOutcome, StoreError> {
        self.transact(|state| work(&mut MemoryLedger { state }))
    }
}

struct MemoryLedger<'a> {
    state: &'a mut StoreState,
}

impl PromotionLedger for MemoryLedger<'_> {
    fn lock_answer(&mut self, answer_id: Uuid) -> Result<Option<QnaAnswer>, StoreError> {
        Ok(self.state.answers.iter().find(|a| a.id() == answer_id).cloned())
    }

    fn user_exists(&mut self, user_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.state.users.iter().any(|u| u.id() == user_id))
    }

    fn find_question(&mut self, question_id: Uuid) -> Result<Option<QnaQuestion>, StoreError> {
        Ok(self
            .state
            .questions
            .iter()
            .find(|q| q.id() == question_id)
            .cloned())
    }

    fn has_like(&mut self, answer_id: Uuid, user_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.state.likes.contains(&(answer_id, user_id)))
    }

    fn insert_like(&mut self, answer_id: Uuid, user_id: Uuid) -> Result<(), StoreError> {
        if !self.state.likes.contains(&(answer_id, user_id)) {
            self.state.likes.push((answer_id, user_id));
        }
        Ok(())
    }

    fn remove_like(&mut self, answer_id: Uuid, user_id: Uuid) -> Result<(), StoreError> {
        self.state.likes.retain(|like| *like != (answer_id, user_id));
        Ok(())
    }

    fn count_likes(&mut self, answer_id: Uuid) -> Result<i64, StoreError> {
        Ok(self.state.like_count(answer_id))
    }

    fn find_promoted_duplicate(
        &mut self,
        title_fragment: &str,
        content_fragment: &str,
    ) -> Result<bool, StoreError> {
        Ok(self.state.articles.iter().any(|a| {
            a.title().contains(title_fragment) && a.content().contains(content_fragment)
        }))
    }

    fn insert_article(&mut self, article: &KnowledgeArticle) -> Result<bool, StoreError> {
        let source = article.source_answer_id();
        if source.is_some() && self.state.articles.iter().any(|a| a.source_answer_id() == source) {
            return Ok(false);
        }
        self.state.articles.push(article.clone());
        Ok(true)
    }

    fn add_experience(&mut self, user_id: Uuid, delta: u32) -> Result<ExperienceAward, StoreError> {
        self.state.add_experience(user_id, delta)
    }
}
