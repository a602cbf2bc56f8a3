use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use uuid::Uuid;

use crate::application::ports::{LedgerWork, PromotionLedger, PromotionStore};
use crate::domain::StoreError;
use crate::domain::entities::{KnowledgeArticle, QnaAnswer, QnaQuestion};
use crate::domain::repositories::qna_repository::LikeToggleOutcome;
use crate::domain::value_objects::ExperienceAward;
use crate::infrastructure::database::models::{
    AnswerModel, NewKnowledgeModel, NewLikeModel, QuestionModel,
};
use crate::infrastructure::database::repositories::contains_pattern;
use crate::infrastructure::database::repositories::postgres_qna_repository::decode_question;
use crate::infrastructure::database::repositories::postgres_user_repository::add_experience;
use crate::infrastructure::database::schema::{
    answer_likes, knowledge_articles, qna_answers, qna_questions, users,
};
use crate::infrastructure::database::{DbPool, with_connection};

/// Runs like toggles inside a single Postgres transaction.
pub struct PostgresPromotionStore {
    pool: DbPool,
}

impl PostgresPromotionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromotionStore for PostgresPromotionStore {
    async fn run_promotion(&self, work: LedgerWork) -> Result<LikeToggleOutcome, StoreError> {
        with_connection(&self.pool, move |conn| {
            conn.transaction(|conn| {
                let mut ledger = PgPromotionLedger { conn };
                work(&mut ledger)
            })
        })
        .await
    }
}

struct PgPromotionLedger<'a> {
    conn: &'a mut PgConnection,
}

impl PromotionLedger for PgPromotionLedger<'_> {
    fn lock_answer(&mut self, answer_id: Uuid) -> Result<Option<QnaAnswer>, StoreError> {
        Ok(qna_answers::table
            .find(answer_id)
            .select(AnswerModel::as_select())
            .for_update()
            .first(self.conn)
            .optional()?
            .map(QnaAnswer::from))
    }

    fn user_exists(&mut self, user_id: Uuid) -> Result<bool, StoreError> {
        Ok(diesel::select(exists(users::table.find(user_id))).get_result(self.conn)?)
    }

    fn find_question(&mut self, question_id: Uuid) -> Result<Option<QnaQuestion>, StoreError> {
        qna_questions::table
            .find(question_id)
            .select(QuestionModel::as_select())
            .first(self.conn)
            .optional()?
            .map(decode_question)
            .transpose()
    }

    fn has_like(&mut self, answer_id: Uuid, user_id: Uuid) -> Result<bool, StoreError> {
        Ok(diesel::select(exists(
            answer_likes::table
                .filter(answer_likes::answer_id.eq(answer_id))
                .filter(answer_likes::user_id.eq(user_id)),
        ))
        .get_result(self.conn)?)
    }

    fn insert_like(&mut self, answer_id: Uuid, user_id: Uuid) -> Result<(), StoreError> {
        diesel::insert_into(answer_likes::table)
            .values(&NewLikeModel::new(answer_id, user_id))
            .on_conflict((answer_likes::answer_id, answer_likes::user_id))
            .do_nothing()
            .execute(self.conn)?;
        Ok(())
    }

    fn remove_like(&mut self, answer_id: Uuid, user_id: Uuid) -> Result<(), StoreError> {
        diesel::delete(
            answer_likes::table
                .filter(answer_likes::answer_id.eq(answer_id))
                .filter(answer_likes::user_id.eq(user_id)),
        )
        .execute(self.conn)?;
        Ok(())
    }

    fn count_likes(&mut self, answer_id: Uuid) -> Result<i64, StoreError> {
        Ok(answer_likes::table
            .filter(answer_likes::answer_id.eq(answer_id))
            .count()
            .get_result(self.conn)?)
    }

    fn find_promoted_duplicate(
        &mut self,
        title_fragment: &str,
        content_fragment: &str,
    ) -> Result<bool, StoreError> {
        Ok(diesel::select(exists(
            knowledge_articles::table
                .filter(knowledge_articles::title.like(contains_pattern(title_fragment)))
                .filter(knowledge_articles::content.like(contains_pattern(content_fragment))),
        ))
        .get_result(self.conn)?)
    }

    fn insert_article(&mut self, article: &KnowledgeArticle) -> Result<bool, StoreError> {
        let new_article = NewKnowledgeModel::from(article);
        let inserted = diesel::insert_into(knowledge_articles::table)
            .values(&new_article)
            .on_conflict(knowledge_articles::source_answer_id)
            .do_nothing()
            .execute(self.conn)?;
        Ok(inserted == 1)
    }

    fn add_experience(&mut self, user_id: Uuid, delta: u32) -> Result<ExperienceAward, StoreError> {
        add_experience(self.conn, user_id, delta)
    }
}
