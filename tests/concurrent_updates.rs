use std::sync::Arc;

use shoo_kb::application::use_cases::manage_questions::QuestionDraft;
use shoo_kb::application::use_cases::manage_users::NewUser;
use shoo_kb::application::use_cases::{
    AwardPointsUseCase, ManageAnswersUseCase, ManageQuestionsUseCase, ManageUsersUseCase,
    ToggleLikeUseCase,
};
use shoo_kb::domain::repositories::KnowledgeRepository;
use shoo_kb::domain::value_objects::{ExperienceEvent, QuestionType};
use shoo_kb::infrastructure::InMemoryStore;
use uuid::Uuid;

const FANS: usize = 16;

async fn register(users: &ManageUsersUseCase, username: String) -> Uuid {
    users
        .create(NewUser {
            username,
            display_name: None,
            department: None,
        })
        .await
        .unwrap()
        .id()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_likes_promote_exactly_once() {
    let store = Arc::new(InMemoryStore::new());
    let users = ManageUsersUseCase::new(store.clone());
    let asker = register(&users, "asker".to_string()).await;
    let author = register(&users, "author".to_string()).await;
    let mut fans = Vec::with_capacity(FANS);
    for n in 0..FANS {
        fans.push(register(&users, format!("fan{}", n)).await);
    }

    let question = ManageQuestionsUseCase::new(store.clone())
        .create(
            QuestionDraft {
                title: "DNS 응답 지연".to_string(),
                body: "내부 도메인 조회가 5초씩 걸립니다".to_string(),
                category: "네트워크".to_string(),
                question_type: QuestionType::Issue,
            },
            asker,
        )
        .await
        .unwrap()
        .question;
    let answer = ManageAnswersUseCase::new(store.clone())
        .create(
            question.id(),
            "resolv.conf 의 options timeout 과 search 도메인 순서를 확인하세요".to_string(),
            author,
        )
        .await
        .unwrap()
        .answer;

    let likes = Arc::new(ToggleLikeUseCase::new(store.clone()));
    let handles: Vec<_> = fans
        .iter()
        .map(|&fan| {
            let likes = likes.clone();
            let answer_id = answer.id();
            tokio::spawn(async move { likes.execute(answer_id, fan).await })
        })
        .collect();

    let mut promoted = 0;
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert!(outcome.liked);
        if outcome.promoted {
            promoted += 1;
        }
    }

    assert_eq!(promoted, 1);
    assert_eq!(KnowledgeRepository::count(store.as_ref()).await.unwrap(), 1);
    // +3 for the answer, +10 once for the promotion
    assert_eq!(users.get(author).await.unwrap().experience_points(), 13);

    let status = ManageAnswersUseCase::new(store.clone())
        .like_status(answer.id(), None)
        .await
        .unwrap();
    assert_eq!(status.like_count, FANS as i64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_awards_are_not_lost() {
    let store = Arc::new(InMemoryStore::new());
    let users = ManageUsersUseCase::new(store.clone());
    let user = register(&users, "oncall".to_string()).await;

    let awards = Arc::new(AwardPointsUseCase::new(store.clone()));
    let handles: Vec<_> = (0..50)
        .map(|n| {
            let awards = awards.clone();
            let event = if n % 2 == 0 {
                ExperienceEvent::AnswerPromoted
            } else {
                ExperienceEvent::AnswerCreated
            };
            tokio::spawn(async move { awards.execute(user, event).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // 25 x 10 + 25 x 3
    let stored = users.get(user).await.unwrap();
    assert_eq!(stored.experience_points(), 325);
    assert_eq!(stored.level(), 2);
}
