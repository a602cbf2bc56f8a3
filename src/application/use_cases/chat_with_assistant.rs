use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::UseCaseError;
use crate::application::ports::completion_provider::{ChatMessage, CompletionRequest};
use crate::application::ports::CompletionProvider;
use crate::application::services::assistant_replies::{
    self, NO_RELATED_REPLY, RegistrationSuggestion, SYSTEM_PROMPT,
};
use crate::application::services::AssembledContext;
use crate::application::use_cases::RankAndBuildContextUseCase;
use crate::application::use_cases::validation::{MAX_CONTENT_CHARS, require_text};
use crate::domain::entities::{ChatRecord, RelatedArticle};
use crate::domain::repositories::ChatHistoryRepository;

/// Prior exchanges replayed to the model.
pub const HISTORY_WINDOW: usize = 5;
const MAX_COMPLETION_TOKENS: u32 = 1500;
const COMPLETION_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub user: String,
    pub assistant: String,
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub user_id: Option<Uuid>,
    pub message: String,
    /// Oldest first. When empty, the user's stored history is used instead.
    pub history: Vec<ChatExchange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub related_articles: Vec<RelatedArticle>,
    pub suggest_qna_registration: bool,
    pub registration_suggestion: Option<RegistrationSuggestion>,
    pub used_fallback: bool,
    pub record_id: Option<Uuid>,
}

pub struct ChatWithAssistantUseCase {
    context: Arc<RankAndBuildContextUseCase>,
    completion_provider: Arc<dyn CompletionProvider>,
    chat_history_repository: Arc<dyn ChatHistoryRepository>,
    completion_timeout: Duration,
}

impl ChatWithAssistantUseCase {
    pub fn new(
        context: Arc<RankAndBuildContextUseCase>,
        completion_provider: Arc<dyn CompletionProvider>,
        chat_history_repository: Arc<dyn ChatHistoryRepository>,
        completion_timeout: Duration,
    ) -> Self {
        Self {
            context,
            completion_provider,
            chat_history_repository,
            completion_timeout,
        }
    }

    pub async fn execute(&self, request: ChatRequest) -> Result<ChatReply, UseCaseError> {
        require_text("Message", &request.message, MAX_CONTENT_CHARS)?;
        let message = request.message.trim().to_string();

        let context = match self.context.execute(&message).await {
            Ok(context) => context,
            Err(e) => {
                warn!("Knowledge lookup failed, answering without context: {}", e);
                AssembledContext {
                    text: String::new(),
                    manifest: Vec::new(),
                }
            }
        };

        if !context.has_related() {
            let mut reply = ChatReply {
                reply: NO_RELATED_REPLY.to_string(),
                related_articles: Vec::new(),
                suggest_qna_registration: true,
                registration_suggestion: None,
                used_fallback: false,
                record_id: None,
            };
            reply.record_id = self.persist(request.user_id, &message, &reply).await;
            return Ok(reply);
        }

        let history = self.history_for(&request).await;
        let related = context.manifest;
        let suggestion = assistant_replies::suggest_registration(&message, &related);

        let completion = CompletionRequest {
            messages: build_messages(&history, &context.text, &message),
            max_tokens: Some(MAX_COMPLETION_TOKENS),
            temperature: Some(COMPLETION_TEMPERATURE),
        };

        let model = self.completion_provider.model_name();
        let outcome = tokio::time::timeout(
            self.completion_timeout,
            self.completion_provider.complete(completion),
        )
        .await;

        let (text, used_fallback) = match outcome {
            Ok(Ok(answer)) => (
                assistant_replies::decorate_reply(
                    &answer,
                    !history.is_empty(),
                    &related,
                    suggestion,
                ),
                false,
            ),
            Ok(Err(e)) => {
                warn!("Completion via {} failed: {}", model, e);
                (assistant_replies::fallback_reply(&message).to_string(), true)
            }
            Err(_) => {
                warn!(
                    "Completion via {} timed out after {:?}",
                    model, self.completion_timeout
                );
                (assistant_replies::fallback_reply(&message).to_string(), true)
            }
        };

        let mut reply = ChatReply {
            reply: text,
            related_articles: related,
            suggest_qna_registration: false,
            registration_suggestion: if used_fallback { None } else { suggestion },
            used_fallback,
            record_id: None,
        };
        reply.record_id = self.persist(request.user_id, &message, &reply).await;

        info!(
            "Answered chat message with {} related articles (fallback: {})",
            reply.related_articles.len(),
            used_fallback
        );
        Ok(reply)
    }

    async fn history_for(&self, request: &ChatRequest) -> Vec<ChatExchange> {
        if !request.history.is_empty() {
            let skip = request.history.len().saturating_sub(HISTORY_WINDOW);
            return request.history[skip..].to_vec();
        }

        let Some(user_id) = request.user_id else {
            return Vec::new();
        };

        match self
            .chat_history_repository
            .list_by_user(Some(user_id), HISTORY_WINDOW as i64)
            .await
        {
            Ok(records) => records
                .into_iter()
                .rev()
                .map(|r| ChatExchange {
                    user: r.user_message,
                    assistant: r.bot_response,
                })
                .collect(),
            Err(e) => {
                warn!("Failed to load chat history for {}: {}", user_id, e);
                Vec::new()
            }
        }
    }

    async fn persist(&self, user_id: Option<Uuid>, message: &str, reply: &ChatReply) -> Option<Uuid> {
        let record = ChatRecord::new(
            user_id,
            message.to_string(),
            reply.reply.clone(),
            reply.related_articles.clone(),
        );

        match self.chat_history_repository.save(&record).await {
            Ok(()) => Some(record.id),
            Err(e) => {
                warn!("Failed to save chat history: {}", e);
                None
            }
        }
    }
}

fn build_messages(history: &[ChatExchange], context: &str, message: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(ChatMessage::system(SYSTEM_PROMPT));
    for exchange in history {
        messages.push(ChatMessage::user(exchange.user.clone()));
        messages.push(ChatMessage::assistant(exchange.assistant.clone()));
    }
    messages.push(ChatMessage::user(assistant_replies::context_prompt(context, message)));
    messages
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::application::ports::DEFAULT_TOP_K;
    use crate::application::ports::completion_provider::{ChatRole, CompletionError};
    use crate::application::services::LexicalRanker;
    use crate::application::services::context_assembler::DEFAULT_MAX_CONTEXT_CHARS;
    use crate::domain::entities::KnowledgeArticle;
    use crate::domain::repositories::KnowledgeRepository;
    use crate::domain::value_objects::{Keywords, KnowledgeType};
    use crate::infrastructure::memory::InMemoryStore;

    enum Behaviour {
        Answer(&'static str),
        Fail,
        Hang,
    }

    struct ScriptedProvider {
        behaviour: Behaviour,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
            self.seen.lock().unwrap().push(request);
            match self.behaviour {
                Behaviour::Answer(text) => Ok(text.to_string()),
                Behaviour::Fail => Err(CompletionError::ApiError("503".to_string())),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(String::new())
                }
            }
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    async fn assistant(
        provider: Arc<ScriptedProvider>,
    ) -> (Arc<InMemoryStore>, ChatWithAssistantUseCase) {
        let store = Arc::new(InMemoryStore::new());
        let article = KnowledgeArticle::new(
            "Oracle 테이블스페이스 부족".to_string(),
            "ALTER TABLESPACE ADD DATAFILE 로 용량을 늘립니다".to_string(),
            Keywords::from_storage("oracle,tablespace"),
            KnowledgeType::Issue,
            None,
        )
        .unwrap();
        KnowledgeRepository::create(store.as_ref(), &article).await.unwrap();

        let context = Arc::new(RankAndBuildContextUseCase::new(
            store.clone(),
            Arc::new(LexicalRanker::new()),
            DEFAULT_TOP_K,
            DEFAULT_MAX_CONTEXT_CHARS,
        ));
        let use_case = ChatWithAssistantUseCase::new(
            context,
            provider,
            store.clone(),
            Duration::from_millis(200),
        );
        (store, use_case)
    }

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            user_id: None,
            message: message.to_string(),
            history: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_unrelated_question_skips_model() {
        let provider = ScriptedProvider::new(Behaviour::Answer("unused"));
        let (store, use_case) = assistant(provider.clone()).await;

        let reply = use_case.execute(request("점심 메뉴 추천")).await.unwrap();

        assert_eq!(provider.calls(), 0);
        assert!(reply.suggest_qna_registration);
        assert_eq!(reply.reply, NO_RELATED_REPLY);
        assert!(reply.related_articles.is_empty());
        assert_eq!(store.list_by_user(None, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_related_question_uses_context() {
        let provider = ScriptedProvider::new(Behaviour::Answer("데이터파일을 추가하세요."));
        let (_, use_case) = assistant(provider.clone()).await;

        let reply = use_case.execute(request("oracle tablespace 부족")).await.unwrap();

        assert!(!reply.used_fallback);
        assert_eq!(reply.related_articles.len(), 1);
        assert!(reply.reply.starts_with("데이터파일을 추가하세요."));
        assert!(reply.reply.contains("• Oracle 테이블스페이스 부족 (유사도: 100%)"));
        assert!(reply.record_id.is_some());

        let seen = provider.seen.lock().unwrap();
        let last = seen[0].messages.last().unwrap();
        assert_eq!(seen[0].messages[0].role, ChatRole::System);
        assert!(last.content.contains("Title: Oracle 테이블스페이스 부족"));
    }

    #[tokio::test]
    async fn test_history_window_is_bounded() {
        let provider = ScriptedProvider::new(Behaviour::Answer("ok"));
        let (_, use_case) = assistant(provider.clone()).await;

        let mut chat = request("oracle tablespace");
        chat.history = (0..8)
            .map(|i| ChatExchange {
                user: format!("q{}", i),
                assistant: format!("a{}", i),
            })
            .collect();
        let reply = use_case.execute(chat).await.unwrap();

        assert!(reply.reply.starts_with("💭"));
        let seen = provider.seen.lock().unwrap();
        // system + 5 exchanges + current turn
        assert_eq!(seen[0].messages.len(), 1 + HISTORY_WINDOW * 2 + 1);
        assert_eq!(seen[0].messages[1].content, "q3");
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back() {
        let provider = ScriptedProvider::new(Behaviour::Fail);
        let (_, use_case) = assistant(provider).await;

        let reply = use_case.execute(request("oracle 데이터베이스 tablespace")).await.unwrap();

        assert!(reply.used_fallback);
        assert!(reply.reply.starts_with("데이터베이스 관련 문제"));
        assert_eq!(reply.related_articles.len(), 1);
    }

    #[tokio::test]
    async fn test_provider_timeout_falls_back() {
        let provider = ScriptedProvider::new(Behaviour::Hang);
        let (_, use_case) = assistant(provider).await;

        let reply = use_case.execute(request("oracle tablespace")).await.unwrap();
        assert!(reply.used_fallback);
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let provider = ScriptedProvider::new(Behaviour::Answer("unused"));
        let (_, use_case) = assistant(provider).await;

        let result = use_case.execute(request("   ")).await;
        assert!(matches!(result, Err(UseCaseError::Validation(_))));
    }
}
