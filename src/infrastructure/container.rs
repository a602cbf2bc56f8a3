use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::{
    application::{
        ports::{CompletionProvider, PromotionStore, Ranker},
        services::{LexicalRanker, TextAssistant},
        use_cases::{
            AwardPointsUseCase, ChatHistoryUseCase, ChatWithAssistantUseCase,
            ManageAnswersUseCase, ManageKnowledgeUseCase, ManageQuestionsUseCase,
            ManageUsersUseCase, RankAndBuildContextUseCase, SuggestQuestionsUseCase,
            ToggleLikeUseCase,
        },
    },
    config::{AppConfig, ConfigError, StorageBackend},
    domain::repositories::{
        ChatHistoryRepository, KnowledgeRepository, QnaRepository, UserRepository,
    },
    infrastructure::{
        database::{
            DatabaseError, DbPool, create_connection_pool, get_connection_from_pool,
            repositories::{
                PostgresChatHistoryRepository, PostgresKnowledgeRepository,
                PostgresPromotionStore, PostgresQnaRepository, PostgresUserRepository,
            },
            run_migrations,
        },
        external_services::{OpenAiClientConfig, OpenAiCompletionProvider},
        memory::InMemoryStore,
    },
    presentation::http::handlers::{ChatHandler, KnowledgeHandler, QnaHandler, UserHandler},
};

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

struct Stores {
    knowledge: Arc<dyn KnowledgeRepository>,
    users: Arc<dyn UserRepository>,
    qna: Arc<dyn QnaRepository>,
    chat_history: Arc<dyn ChatHistoryRepository>,
    promotion: Arc<dyn PromotionStore>,
}

impl Stores {
    fn postgres(pool: DbPool) -> Self {
        Self {
            knowledge: Arc::new(PostgresKnowledgeRepository::new(pool.clone())),
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            qna: Arc::new(PostgresQnaRepository::new(pool.clone())),
            chat_history: Arc::new(PostgresChatHistoryRepository::new(pool.clone())),
            promotion: Arc::new(PostgresPromotionStore::new(pool)),
        }
    }

    fn memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            knowledge: store.clone(),
            users: store.clone(),
            qna: store.clone(),
            chat_history: store.clone(),
            promotion: store,
        }
    }
}

pub struct AppContainer {
    pub config: AppConfig,

    // Repositories
    pub knowledge_repository: Arc<dyn KnowledgeRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub qna_repository: Arc<dyn QnaRepository>,
    pub chat_history_repository: Arc<dyn ChatHistoryRepository>,
    pub promotion_store: Arc<dyn PromotionStore>,

    // External Services
    pub ranker: Arc<dyn Ranker>,
    pub completion_provider: Arc<dyn CompletionProvider>,
    pub text_assistant: Arc<TextAssistant>,

    // Use Cases
    pub rank_and_build_context_use_case: Arc<RankAndBuildContextUseCase>,
    pub chat_use_case: Arc<ChatWithAssistantUseCase>,
    pub chat_history_use_case: Arc<ChatHistoryUseCase>,
    pub suggest_questions_use_case: Arc<SuggestQuestionsUseCase>,
    pub manage_knowledge_use_case: Arc<ManageKnowledgeUseCase>,
    pub manage_questions_use_case: Arc<ManageQuestionsUseCase>,
    pub manage_answers_use_case: Arc<ManageAnswersUseCase>,
    pub toggle_like_use_case: Arc<ToggleLikeUseCase>,
    pub manage_users_use_case: Arc<ManageUsersUseCase>,
    pub award_points_use_case: Arc<AwardPointsUseCase>,

    // HTTP Handlers
    pub chat_handler: Arc<ChatHandler>,
    pub knowledge_handler: Arc<KnowledgeHandler>,
    pub qna_handler: Arc<QnaHandler>,
    pub user_handler: Arc<UserHandler>,
}

impl AppContainer {
    pub fn new(config: AppConfig) -> Result<Self, ContainerError> {
        let stores = match config.storage {
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .ok_or(ConfigError::Missing("DATABASE_URL"))?;

                let pool = create_connection_pool(database_url)?;
                let mut conn = get_connection_from_pool(&pool)?;
                run_migrations(&mut conn)?;
                info!("Database migrations applied");

                Stores::postgres(pool)
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage; data is lost on restart");
                Stores::memory()
            }
        };

        let client_config = OpenAiClientConfig {
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            timeout_secs: config.llm_timeout.as_secs(),
            ..OpenAiClientConfig::default()
        };
        // LLM_TIMEOUT_SECS bounds each attempt; the chat deadline spans the retries.
        let completion_budget = client_config.request_budget();
        let completion_provider: Arc<dyn CompletionProvider> =
            Arc::new(OpenAiCompletionProvider::new(client_config)?);

        Ok(Self::wire(config, stores, completion_provider, completion_budget))
    }

    /// In-memory container with a caller-supplied completion provider.
    pub fn in_memory(config: AppConfig, completion_provider: Arc<dyn CompletionProvider>) -> Self {
        let completion_budget = config.llm_timeout;
        Self::wire(config, Stores::memory(), completion_provider, completion_budget)
    }

    fn wire(
        config: AppConfig,
        stores: Stores,
        completion_provider: Arc<dyn CompletionProvider>,
        completion_budget: Duration,
    ) -> Self {
        let ranker: Arc<dyn Ranker> = Arc::new(LexicalRanker::new());
        let text_assistant = Arc::new(TextAssistant::new(
            completion_provider.clone(),
            completion_budget,
        ));

        // Create use cases
        let rank_and_build_context_use_case = Arc::new(RankAndBuildContextUseCase::new(
            stores.knowledge.clone(),
            ranker.clone(),
            config.rank_top_k,
            config.context_max_chars,
        ));

        let chat_use_case = Arc::new(ChatWithAssistantUseCase::new(
            rank_and_build_context_use_case.clone(),
            completion_provider.clone(),
            stores.chat_history.clone(),
            completion_budget,
        ));

        let chat_history_use_case = Arc::new(ChatHistoryUseCase::new(stores.chat_history.clone()));
        let suggest_questions_use_case =
            Arc::new(SuggestQuestionsUseCase::new(stores.knowledge.clone()));
        let manage_knowledge_use_case = Arc::new(ManageKnowledgeUseCase::new(
            stores.knowledge.clone(),
            text_assistant.clone(),
        ));
        let manage_questions_use_case = Arc::new(ManageQuestionsUseCase::new(stores.qna.clone()));
        let manage_answers_use_case = Arc::new(ManageAnswersUseCase::new(stores.qna.clone()));
        let toggle_like_use_case = Arc::new(ToggleLikeUseCase::new(stores.promotion.clone()));
        let manage_users_use_case = Arc::new(ManageUsersUseCase::new(stores.users.clone()));
        let award_points_use_case = Arc::new(AwardPointsUseCase::new(stores.users.clone()));

        // Create HTTP handlers
        let chat_handler = Arc::new(ChatHandler::new(
            rank_and_build_context_use_case.clone(),
            chat_use_case.clone(),
            chat_history_use_case.clone(),
            suggest_questions_use_case.clone(),
        ));
        let knowledge_handler = Arc::new(KnowledgeHandler::new(manage_knowledge_use_case.clone()));
        let qna_handler = Arc::new(QnaHandler::new(
            manage_questions_use_case.clone(),
            manage_answers_use_case.clone(),
            toggle_like_use_case.clone(),
        ));
        let user_handler = Arc::new(UserHandler::new(
            manage_users_use_case.clone(),
            award_points_use_case.clone(),
        ));

        Self {
            config,
            knowledge_repository: stores.knowledge,
            user_repository: stores.users,
            qna_repository: stores.qna,
            chat_history_repository: stores.chat_history,
            promotion_store: stores.promotion,
            ranker,
            completion_provider,
            text_assistant,
            rank_and_build_context_use_case,
            chat_use_case,
            chat_history_use_case,
            suggest_questions_use_case,
            manage_knowledge_use_case,
            manage_questions_use_case,
            manage_answers_use_case,
            toggle_like_use_case,
            manage_users_use_case,
            award_points_use_case,
            chat_handler,
            knowledge_handler,
            qna_handler,
            user_handler,
        }
    }
}
