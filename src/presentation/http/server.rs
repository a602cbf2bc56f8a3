use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::StorageBackend;
use crate::infrastructure::AppContainer;
use crate::presentation::http::{
    handlers::{ChatHandler, KnowledgeHandler, QnaHandler, UserHandler},
    routes::{chat_routes, health_routes, knowledge_routes, qna_routes, user_routes},
};

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub struct HttpServer {
    chat_handler: Arc<ChatHandler>,
    knowledge_handler: Arc<KnowledgeHandler>,
    qna_handler: Arc<QnaHandler>,
    user_handler: Arc<UserHandler>,
    storage: StorageBackend,
    port: u16,
}

impl HttpServer {
    pub fn from_container(container: &AppContainer) -> Self {
        Self {
            chat_handler: container.chat_handler.clone(),
            knowledge_handler: container.knowledge_handler.clone(),
            qna_handler: container.qna_handler.clone(),
            user_handler: container.user_handler.clone(),
            storage: container.config.storage,
            port: container.config.port,
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(health_routes(self.storage))
            .merge(chat_routes(self.chat_handler.clone()))
            .merge(knowledge_routes(self.knowledge_handler.clone()))
            .merge(qna_routes(self.qna_handler.clone()))
            .merge(user_routes(self.user_handler.clone()))
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            )
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::ports::completion_provider::{
        CompletionError, CompletionProvider, CompletionRequest,
    };
    use crate::config::AppConfig;

    struct CannedProvider;

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
            Ok("리스너를 재시작해 보세요.".to_string())
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    fn app() -> Router {
        let container = AppContainer::in_memory(AppConfig::default(), Arc::new(CannedProvider));
        HttpServer::from_container(&container).router()
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn create_user(app: &Router, username: &str) -> String {
        let (status, body) = send(app, "POST", "/api/users", Some(json!({ "username": username }))).await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let (status, body) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "healthy");
        assert_eq!(body["data"]["storage"], "memory");
    }

    #[tokio::test]
    async fn test_second_like_promotes_answer_into_knowledge() {
        let app = app();
        let asker = create_user(&app, "asker").await;
        let author = create_user(&app, "author").await;
        let fan = create_user(&app, "fan").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/questions",
            Some(json!({
                "user_id": asker,
                "title": "리스너 접속 불가",
                "body": "ORA-12541 오류가 납니다",
                "category": "데이터베이스",
                "question_type": "issue"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let question_id = body["data"]["question"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/questions/{}/answers", question_id),
            Some(json!({ "user_id": author, "content": "lsnrctl start 로 리스너를 기동하세요" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["award"]["experience_points"], 3);
        let answer_id = body["data"]["answer"]["id"].as_str().unwrap().to_string();

        let like_uri = format!("/api/answers/{}/like", answer_id);
        let (_, first) = send(&app, "POST", &like_uri, Some(json!({ "user_id": asker }))).await;
        assert_eq!(first["data"]["like_count"], 1);
        assert_eq!(first["data"]["promoted"], false);

        let (status, second) = send(&app, "POST", &like_uri, Some(json!({ "user_id": fan }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["data"]["like_count"], 2);
        assert_eq!(second["data"]["promoted"], true);

        let (_, list) = send(&app, "GET", "/api/knowledge", None).await;
        let articles = list["data"].as_array().unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0]["title"], "[QnA] 리스너 접속 불가");
        assert_eq!(articles[0]["knowledge_type"], "이슈");

        let (_, user) = send(&app, "GET", &format!("/api/users/{}", author), None).await;
        assert_eq!(user["data"]["experience_points"], 13);

        let (_, detail) = send(
            &app,
            "GET",
            &format!("/api/questions/{}?user_id={}", question_id, fan),
            None,
        )
        .await;
        assert_eq!(detail["data"]["question"]["status"], "answered");
        assert_eq!(detail["data"]["answers"][0]["like_count"], 2);
        assert_eq!(detail["data"]["answers"][0]["liked"], true);
    }

    #[tokio::test]
    async fn test_viewing_knowledge_counts_views() {
        let app = app();
        let owner = create_user(&app, "owner").await;
        let (status, created) = send(
            &app,
            "POST",
            "/api/knowledge",
            Some(json!({
                "title": "Oracle 리스너 오류",
                "content": "리스너 로그를 확인합니다",
                "keywords": ["oracle", "listener"],
                "knowledge_type": "이슈",
                "owner_id": owner
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["data"]["award"]["experience_points"], 5);

        let uri = format!("/api/knowledge/{}", created["data"]["article"]["id"].as_str().unwrap());
        send(&app, "GET", &uri, None).await;
        let (_, viewed) = send(&app, "GET", &uri, None).await;
        assert_eq!(viewed["data"]["view_count"], 2);
    }

    #[tokio::test]
    async fn test_error_envelopes() {
        let app = app();
        let owner = create_user(&app, "owner").await;
        let stranger = create_user(&app, "stranger").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/knowledge",
            Some(json!({ "title": " ", "content": "본문", "knowledge_type": "manual" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, created) = send(
            &app,
            "POST",
            "/api/knowledge",
            Some(json!({
                "title": "VPN 설정",
                "content": "클라이언트 설치 후 접속",
                "knowledge_type": "manual",
                "owner_id": owner
            })),
        )
        .await;
        let id = created["data"]["article"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "DELETE",
            &format!("/api/knowledge/{}?user_id={}", id, stranger),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/answers/{}/like", uuid::Uuid::new_v4()),
            Some(json!({ "user_id": owner })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_suggestions_follow_popular_knowledge() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/chat/suggestions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["questions"].as_array().unwrap().len(), 5);

        let (_, created) = send(
            &app,
            "POST",
            "/api/knowledge",
            Some(json!({
                "title": "WAS 힙 메모리 부족",
                "content": "Xmx 값을 늘리고 GC 로그를 확인합니다",
                "knowledge_type": "issue"
            })),
        )
        .await;
        assert_eq!(created["data"]["summary"], "Xmx 값을 늘리고 GC 로그를 확인합니다");
        assert!(!created["data"]["article"]["keywords"].as_array().unwrap().is_empty());

        let (_, body) = send(&app, "GET", "/api/chat/suggestions", None).await;
        assert_eq!(
            body["data"]["questions"],
            json!(["WAS 힙 메모리 부족에 대해 알려주세요"])
        );

        let id = created["data"]["article"]["id"].as_str().unwrap();
        let (status, summary) = send(
            &app,
            "GET",
            &format!("/api/knowledge/{}/summary?max_length=12", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["data"]["summary"], "리스너를 재시작해...");
    }

    #[tokio::test]
    async fn test_chat_without_knowledge_suggests_registration() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/chat",
            Some(json!({ "message": "프린터가 안 돼요" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["suggest_qna_registration"], true);
        assert_eq!(body["data"]["used_fallback"], false);
        assert!(body["data"]["related_articles"].as_array().unwrap().is_empty());

        let (_, history) = send(&app, "GET", "/api/chat/history", None).await;
        assert_eq!(history["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_chat_and_context_use_ranked_knowledge() {
        let app = app();
        send(
            &app,
            "POST",
            "/api/knowledge",
            Some(json!({
                "title": "Oracle 리스너 오류",
                "content": "lsnrctl status 로 리스너 상태를 확인합니다",
                "keywords": ["oracle", "리스너"],
                "knowledge_type": "issue"
            })),
        )
        .await;

        let (status, context) = send(&app, "GET", "/api/context?query=oracle", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(context["data"]["related_articles"][0]["title"], "Oracle 리스너 오류");

        let (_, reply) = send(
            &app,
            "POST",
            "/api/chat",
            Some(json!({ "message": "Oracle 리스너 오류" })),
        )
        .await;
        let text = reply["data"]["reply"].as_str().unwrap();
        assert!(text.starts_with("리스너를 재시작해 보세요."));
        assert!(text.contains("Oracle 리스너 오류 (유사도:"));
        assert_eq!(reply["data"]["suggest_qna_registration"], false);
    }
}
