use std::sync::Arc;

use shoo_kb::application::use_cases::manage_questions::QuestionDraft;
use shoo_kb::application::use_cases::manage_users::NewUser;
use shoo_kb::application::use_cases::{
    ManageAnswersUseCase, ManageQuestionsUseCase, ManageUsersUseCase, RankAndBuildContextUseCase,
    ToggleLikeUseCase,
};
use shoo_kb::application::services::LexicalRanker;
use shoo_kb::domain::repositories::KnowledgeRepository;
use shoo_kb::domain::value_objects::{KnowledgeType, QuestionStatus, QuestionType};
use shoo_kb::infrastructure::InMemoryStore;
use uuid::Uuid;

struct Board {
    store: Arc<InMemoryStore>,
    users: ManageUsersUseCase,
    questions: ManageQuestionsUseCase,
    answers: ManageAnswersUseCase,
    likes: ToggleLikeUseCase,
}

impl Board {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: ManageUsersUseCase::new(store.clone()),
            questions: ManageQuestionsUseCase::new(store.clone()),
            answers: ManageAnswersUseCase::new(store.clone()),
            likes: ToggleLikeUseCase::new(store.clone()),
            store,
        }
    }

    async fn user(&self, username: &str) -> Uuid {
        self.users
            .create(NewUser {
                username: username.to_string(),
                display_name: None,
                department: None,
            })
            .await
            .unwrap()
            .id()
    }

    async fn answered_question(&self, asker: Uuid, author: Uuid) -> (Uuid, Uuid) {
        let question = self
            .questions
            .create(
                QuestionDraft {
                    title: "테이블스페이스 부족".to_string(),
                    body: "ORA-01653 가 발생합니다".to_string(),
                    category: "서버".to_string(),
                    question_type: QuestionType::Issue,
                },
                asker,
            )
            .await
            .unwrap()
            .question;

        let answer = self
            .answers
            .create(
                question.id(),
                "ALTER TABLESPACE USERS ADD DATAFILE 로 데이터파일을 추가하세요".to_string(),
                author,
            )
            .await
            .unwrap()
            .answer;

        (question.id(), answer.id())
    }
}

#[tokio::test]
async fn like_then_unlike_restores_count() {
    let board = Board::new();
    let asker = board.user("asker").await;
    let author = board.user("author").await;
    let (_, answer_id) = board.answered_question(asker, author).await;

    let liked = board.likes.execute(answer_id, asker).await.unwrap();
    assert_eq!(liked.like_count, 1);
    assert!(liked.liked);

    let unliked = board.likes.execute(answer_id, asker).await.unwrap();
    assert_eq!(unliked.like_count, 0);
    assert!(!unliked.liked);
    assert!(!unliked.promoted);
    assert_eq!(KnowledgeRepository::count(board.store.as_ref()).await.unwrap(), 0);
}

#[tokio::test]
async fn promotion_happens_once_and_feeds_the_ranker() {
    let board = Board::new();
    let asker = board.user("asker").await;
    let author = board.user("author").await;
    let fans = [board.user("fan1").await, board.user("fan2").await];
    let (_, answer_id) = board.answered_question(asker, author).await;

    assert!(!board.likes.execute(answer_id, asker).await.unwrap().promoted);
    let second = board.likes.execute(answer_id, fans[0]).await.unwrap();
    assert!(second.promoted);
    let third = board.likes.execute(answer_id, fans[1]).await.unwrap();
    assert!(!third.promoted);
    assert_eq!(third.like_count, 3);

    let articles = board.store.find_all().await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title(), "[QnA] 테이블스페이스 부족");
    assert_eq!(articles[0].knowledge_type(), KnowledgeType::Issue);
    assert_eq!(articles[0].source_answer_id(), Some(answer_id));
    assert!(articles[0].content().starts_with("**질문:** ORA-01653"));

    // +3 for the answer, +10 for the promotion
    let author = board.users.get(author).await.unwrap();
    assert_eq!(author.experience_points(), 13);
    assert_eq!(author.level(), 1);

    let context = RankAndBuildContextUseCase::new(
        board.store.clone(),
        Arc::new(LexicalRanker::new()),
        3,
        2000,
    )
    .execute("테이블스페이스 부족")
    .await
    .unwrap();
    assert_eq!(context.manifest.len(), 1);
    assert_eq!(context.manifest[0].id, articles[0].id());
}

#[tokio::test]
async fn unlike_after_promotion_keeps_the_article() {
    let board = Board::new();
    let asker = board.user("asker").await;
    let author = board.user("author").await;
    let fan = board.user("fan").await;
    let (_, answer_id) = board.answered_question(asker, author).await;

    board.likes.execute(answer_id, asker).await.unwrap();
    board.likes.execute(answer_id, fan).await.unwrap();
    let unliked = board.likes.execute(answer_id, fan).await.unwrap();
    let relike = board.likes.execute(answer_id, fan).await.unwrap();

    assert_eq!(unliked.like_count, 1);
    assert_eq!(relike.like_count, 2);
    assert!(!relike.promoted);
    assert_eq!(KnowledgeRepository::count(board.store.as_ref()).await.unwrap(), 1);
    assert_eq!(board.users.get(author).await.unwrap().experience_points(), 13);
}

#[tokio::test]
async fn deleting_the_only_answer_reopens_the_question() {
    let board = Board::new();
    let asker = board.user("asker").await;
    let author = board.user("author").await;
    let (question_id, answer_id) = board.answered_question(asker, author).await;

    let status = board.answers.delete(answer_id, author).await.unwrap();
    assert_eq!(status, QuestionStatus::Pending);

    let detail = board.questions.detail(question_id, None).await.unwrap();
    assert_eq!(detail.question.status(), QuestionStatus::Pending);
    assert!(detail.answers.is_empty());
}
