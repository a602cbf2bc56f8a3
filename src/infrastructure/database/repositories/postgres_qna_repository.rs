use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::{count_star, exists};
use diesel::prelude::*;
use tracing::debug;
use uuid::Uuid;

use crate::domain::StoreError;
use crate::domain::entities::{QnaAnswer, QnaQuestion};
use crate::domain::repositories::QnaRepository;
use crate::domain::repositories::qna_repository::{AnswerView, QuestionFilter, QuestionSummary};
use crate::domain::value_objects::{ExperienceAward, ExperienceEvent, QuestionStatus};
use crate::infrastructure::database::models::{
    AnswerModel, NewAnswerModel, NewQuestionModel, QuestionModel,
};
use crate::infrastructure::database::repositories::postgres_user_repository::{
    add_experience, require_user,
};
use crate::infrastructure::database::schema::{answer_likes, qna_answers, qna_questions, users};
use crate::infrastructure::database::{DbPool, with_connection};

pub struct PostgresQnaRepository {
    pool: DbPool,
}

impl PostgresQnaRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn decode_question(model: QuestionModel) -> Result<QnaQuestion, StoreError> {
    QnaQuestion::try_from(model).map_err(StoreError::Database)
}

fn set_question_status(
    conn: &mut PgConnection,
    question_id: Uuid,
    status: QuestionStatus,
) -> Result<(), StoreError> {
    diesel::update(qna_questions::table.find(question_id))
        .set((
            qna_questions::status.eq(status.as_str()),
            qna_questions::updated_at.eq(Utc::now()),
        ))
        .execute(conn)?;
    Ok(())
}

#[async_trait]
impl QnaRepository for PostgresQnaRepository {
    async fn create_question(&self, question: &QnaQuestion) -> Result<ExperienceAward, StoreError> {
        let new_question = NewQuestionModel::from(question);
        let questioner = question.questioner_id();

        with_connection(&self.pool, move |conn| {
            conn.transaction(|conn| {
                require_user(conn, questioner)?;
                diesel::insert_into(qna_questions::table)
                    .values(&new_question)
                    .execute(conn)?;
                add_experience(conn, questioner, ExperienceEvent::QuestionCreated.points())
            })
        })
        .await
    }

    async fn find_question(&self, id: Uuid) -> Result<Option<QnaQuestion>, StoreError> {
        with_connection(&self.pool, move |conn| {
            qna_questions::table
                .find(id)
                .select(QuestionModel::as_select())
                .first(conn)
                .optional()?
                .map(decode_question)
                .transpose()
        })
        .await
    }

    async fn list_questions(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Vec<QuestionSummary>, StoreError> {
        let filter = filter.clone();

        with_connection(&self.pool, move |conn| {
            let mut statement = qna_questions::table
                .inner_join(users::table)
                .select((QuestionModel::as_select(), users::display_name))
                .order(qna_questions::created_at.desc())
                .into_boxed();

            if let Some(category) = filter.category {
                statement = statement.filter(qna_questions::category.eq(category));
            }
            if let Some(kind) = filter.question_type {
                statement = statement.filter(qna_questions::question_type.eq(kind.as_str()));
            }

            let rows: Vec<(QuestionModel, String)> = statement.load(conn)?;
            let ids: Vec<Uuid> = rows.iter().map(|(q, _)| q.id).collect();

            let counts: HashMap<Uuid, i64> = qna_answers::table
                .filter(qna_answers::question_id.eq_any(ids.clone()))
                .group_by(qna_answers::question_id)
                .select((qna_answers::question_id, count_star()))
                .load::<(Uuid, i64)>(conn)?
                .into_iter()
                .collect();

            rows.into_iter()
                .map(|(model, questioner_name)| {
                    let answer_count = counts.get(&model.id).copied().unwrap_or(0);
                    Ok(QuestionSummary {
                        question: decode_question(model)?,
                        questioner_name,
                        answer_count,
                    })
                })
                .collect()
        })
        .await
    }

    async fn update_question(&self, question: &QnaQuestion) -> Result<(), StoreError> {
        let changes = NewQuestionModel::from(question);
        let question_id = question.id();

        with_connection(&self.pool, move |conn| {
            let updated = diesel::update(qna_questions::table.find(question_id))
                .set(&changes)
                .execute(conn)?;
            if updated == 0 {
                return Err(StoreError::not_found("question", question_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_question(&self, id: Uuid) -> Result<bool, StoreError> {
        with_connection(&self.pool, move |conn| {
            let deleted = diesel::delete(qna_questions::table.find(id)).execute(conn)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn create_answer(&self, answer: &QnaAnswer) -> Result<ExperienceAward, StoreError> {
        let new_answer = NewAnswerModel::from(answer);
        let question_id = answer.question_id();
        let author = answer.author_id();

        with_connection(&self.pool, move |conn| {
            conn.transaction(|conn| {
                let question_exists: bool =
                    diesel::select(exists(qna_questions::table.find(question_id)))
                        .get_result(conn)?;
                if !question_exists {
                    return Err(StoreError::not_found("question", question_id));
                }
                require_user(conn, author)?;

                diesel::insert_into(qna_answers::table)
                    .values(&new_answer)
                    .execute(conn)?;
                set_question_status(conn, question_id, QuestionStatus::Answered)?;
                add_experience(conn, author, ExperienceEvent::AnswerCreated.points())
            })
        })
        .await
    }

    async fn find_answer(&self, id: Uuid) -> Result<Option<QnaAnswer>, StoreError> {
        with_connection(&self.pool, move |conn| {
            Ok(qna_answers::table
                .find(id)
                .select(AnswerModel::as_select())
                .first(conn)
                .optional()?
                .map(QnaAnswer::from))
        })
        .await
    }

    async fn list_answers(
        &self,
        question_id: Uuid,
        viewer_id: Option<Uuid>,
    ) -> Result<Vec<AnswerView>, StoreError> {
        with_connection(&self.pool, move |conn| {
            let rows: Vec<(AnswerModel, String)> = qna_answers::table
                .inner_join(users::table)
                .filter(qna_answers::question_id.eq(question_id))
                .order(qna_answers::created_at.asc())
                .select((AnswerModel::as_select(), users::display_name))
                .load(conn)?;
            let ids: Vec<Uuid> = rows.iter().map(|(a, _)| a.id).collect();

            let like_counts: HashMap<Uuid, i64> = answer_likes::table
                .filter(answer_likes::answer_id.eq_any(ids.clone()))
                .group_by(answer_likes::answer_id)
                .select((answer_likes::answer_id, count_star()))
                .load::<(Uuid, i64)>(conn)?
                .into_iter()
                .collect();

            let liked: HashSet<Uuid> = match viewer_id {
                Some(viewer) => answer_likes::table
                    .filter(answer_likes::answer_id.eq_any(ids.clone()))
                    .filter(answer_likes::user_id.eq(viewer))
                    .select(answer_likes::answer_id)
                    .load::<Uuid>(conn)?
                    .into_iter()
                    .collect(),
                None => HashSet::new(),
            };

            debug!("Loaded {} answers for question {}", rows.len(), question_id);

            Ok(rows
                .into_iter()
                .map(|(model, author_name)| {
                    let answer_id = model.id;
                    AnswerView {
                        answer: QnaAnswer::from(model),
                        author_name,
                        like_count: like_counts.get(&answer_id).copied().unwrap_or(0),
                        liked_by_viewer: liked.contains(&answer_id),
                    }
                })
                .collect())
        })
        .await
    }

    async fn update_answer(&self, answer: &QnaAnswer) -> Result<(), StoreError> {
        let answer_id = answer.id();
        let new_content = answer.content().to_string();
        let updated_at = answer.updated_at();

        with_connection(&self.pool, move |conn| {
            let updated = diesel::update(qna_answers::table.find(answer_id))
                .set((
                    qna_answers::content.eq(new_content),
                    qna_answers::updated_at.eq(updated_at),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(StoreError::not_found("answer", answer_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_answer(&self, id: Uuid) -> Result<QuestionStatus, StoreError> {
        with_connection(&self.pool, move |conn| {
            conn.transaction(|conn| {
                let question_id: Uuid = qna_answers::table
                    .find(id)
                    .select(qna_answers::question_id)
                    .for_update()
                    .first(conn)
                    .optional()?
                    .ok_or_else(|| StoreError::not_found("answer", id))?;

                diesel::delete(qna_answers::table.find(id)).execute(conn)?;

                let remaining: i64 = qna_answers::table
                    .filter(qna_answers::question_id.eq(question_id))
                    .count()
                    .get_result(conn)?;
                let status = QuestionStatus::for_answer_count(remaining);
                set_question_status(conn, question_id, status)?;

                Ok(status)
            })
        })
        .await
    }

    async fn count_likes(&self, answer_id: Uuid) -> Result<i64, StoreError> {
        with_connection(&self.pool, move |conn| {
            Ok(answer_likes::table
                .filter(answer_likes::answer_id.eq(answer_id))
                .count()
                .get_result(conn)?)
        })
        .await
    }

    async fn has_liked(&self, answer_id: Uuid, user_id: Uuid) -> Result<bool, StoreError> {
        with_connection(&self.pool, move |conn| {
            Ok(diesel::select(exists(
                answer_likes::table
                    .filter(answer_likes::answer_id.eq(answer_id))
                    .filter(answer_likes::user_id.eq(user_id)),
            ))
            .get_result(conn)?)
        })
        .await
    }
}
