use std::fmt::Write;

use serde::Serialize;

use crate::domain::entities::RelatedArticle;
use crate::domain::value_objects::KnowledgeType;

pub const SYSTEM_PROMPT: &str = "\
당신은 IT 실무자를 위한 업무 지식 도우미 '물어보SHOO'입니다.

핵심 원칙:
- 저장된 업무 지식을 최우선으로 활용하여 답변
- 등록된 가이드나 절차가 있다면 반드시 그 내용을 정확히 따라 안내
- 저장된 지식의 단계별 절차를 순서대로 제시
- 도구명, 버전, 설정값 등 구체적 정보를 정확히 전달

답변 방식:
1. 저장된 업무 지식이 있다면 그 내용을 기반으로 단계별 안내
2. 각 단계를 번호를 매겨 명확하게 제시
3. 구체적인 도구명, 명령어, 설정값 등을 정확히 포함
4. 일반적인 IT 지식보다 저장된 지식을 우선 활용

중요: 관련 업무 지식이 저장되어 있다면 반드시 그 가이드를 따라 답변하세요.";

pub const NO_RELATED_REPLY: &str = "⚠️ 현재 제공된 업무 지식에는 해당 질문에 대한 해결 정보가 없습니다. \
이 질문을 QnA 게시판에 등록하시겠습니까?\n\n📚 **관련 유사 이슈들:**\n검색된 관련 이슈가 없습니다.";

const HISTORY_NOTICE: &str = "💭 *이전 대화를 기억하며 답변드립니다*";

/// Related articles scoring above this suppress the registration suggestion.
pub const STRONG_MATCH_SCORE: f32 = 0.7;

const ISSUE_MARKERS: &[&str] = &[
    "오류", "에러", "문제", "장애", "실패", "안됨", "작동하지", "연결", "접속", "느림", "지연",
];
const MANUAL_MARKERS: &[&str] = &[
    "방법", "설정", "설치", "절차", "가이드", "매뉴얼", "어떻게", "구성", "배포",
];

const DATABASE_FALLBACK: &str = "데이터베이스 관련 문제의 경우, 다음 사항들을 확인해보세요:\n\
1. 서버 리소스 사용률 확인\n2. 슬로우 쿼리 로그 확인\n3. 인덱스 최적화 검토\n4. 커넥션 풀 설정 확인";
const SERVER_FALLBACK: &str = "서버 관련 이슈의 경우:\n\
1. 시스템 로그 확인\n2. CPU, 메모리, 디스크 사용률 확인\n3. 네트워크 연결 상태 확인\n4. 서비스 프로세스 상태 확인";
const NETWORK_FALLBACK: &str = "네트워크 관련 문제:\n\
1. 네트워크 연결 상태 확인\n2. 방화벽 설정 확인\n3. DNS 설정 확인\n4. 포트 개방 상태 확인";
const GENERIC_FALLBACK: &str = "죄송합니다. 현재 시스템에 일시적인 문제가 있어 정확한 답변을 드리기 어렵습니다.

일반적인 IT 이슈 해결 접근법:
1. **로그 확인**: 시스템, 애플리케이션, 에러 로그를 확인하세요
2. **리소스 모니터링**: CPU, 메모리, 디스크, 네트워크 사용률을 확인하세요
3. **최근 변경사항 검토**: 최근 시스템 변경이나 업데이트가 있었는지 확인하세요
4. **단계적 진단**: 문제를 단계별로 좁혀가며 진단하세요

더 구체적인 도움이 필요하시면 이슈 등록을 통해 상세한 정보를 제공해주세요.";

/// Offered when no knowledge has been registered yet.
pub const STARTER_QUESTIONS: &[&str] = &[
    "데이터베이스 서버가 느려질 때 어떻게 해야 하나요?",
    "Oracle 데이터베이스 연결 오류 해결 방법은?",
    "시스템 모니터링에서 확인해야 할 항목들은?",
    "테이블스페이스 용량 부족 문제 해결법은?",
    "데이터베이스 백업 및 복구 절차는?",
];

/// Offered when the knowledge store cannot be read.
pub const GENERAL_QUESTIONS: &[&str] = &[
    "데이터베이스 성능 최적화 방법은?",
    "시스템 장애 발생시 대응 절차는?",
    "모니터링 도구 설정 방법은?",
];

pub fn suggested_question(title: &str) -> String {
    format!("{}에 대해 알려주세요", title)
}

pub fn context_prompt(context: &str, user_message: &str) -> String {
    format!(
        "아래는 저장된 업무 지식 정보입니다. 이 정보만을 활용하여 정확한 답변을 제공해주세요:\n\n\
{}\n\n\
중요한 규칙:\n\
1. 위 업무 지식에 관련 정보가 있다면 반드시 그 내용만을 기반으로 답변하세요.\n\
2. 저장된 지식의 단계별 가이드가 있다면 그대로 따라서 설명해주세요.\n\
3. 위 지식에 없는 내용은 절대 추가하지 마세요.\n\n\
사용자 질문: {}",
        context, user_message
    )
}

/// Canned reply used when the completion provider fails or times out.
pub fn fallback_reply(user_message: &str) -> &'static str {
    let message = user_message.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| message.contains(w));

    if mentions(&["database", "db", "데이터베이스", "디비"]) {
        DATABASE_FALLBACK
    } else if mentions(&["server", "서버", "cpu", "memory", "메모리"]) {
        SERVER_FALLBACK
    } else if mentions(&["network", "네트워크", "connection", "연결"]) {
        NETWORK_FALLBACK
    } else {
        GENERIC_FALLBACK
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrationSuggestion {
    pub knowledge_type: KnowledgeType,
}

impl RegistrationSuggestion {
    pub fn reason(&self) -> &'static str {
        match self.knowledge_type {
            KnowledgeType::Issue => "새로운 이슈로 보이며, 관련 업무 지식이 충분하지 않습니다.",
            KnowledgeType::Manual => "새로운 매뉴얼이 필요한 내용으로 보입니다.",
        }
    }
}

/// Suggests filing the message as new knowledge when nothing related is a
/// strong match and the wording reads like an incident or a how-to.
pub fn suggest_registration(
    user_message: &str,
    related: &[RelatedArticle],
) -> Option<RegistrationSuggestion> {
    if related.iter().any(|r| r.score > STRONG_MATCH_SCORE) {
        return None;
    }

    let message = user_message.to_lowercase();
    let knowledge_type = if ISSUE_MARKERS.iter().any(|w| message.contains(w)) {
        KnowledgeType::Issue
    } else if MANUAL_MARKERS.iter().any(|w| message.contains(w)) {
        KnowledgeType::Manual
    } else {
        return None;
    };

    Some(RegistrationSuggestion { knowledge_type })
}

/// Wraps a model answer with the history notice, the related-article list
/// and an optional registration suggestion.
pub fn decorate_reply(
    answer: &str,
    continues_conversation: bool,
    related: &[RelatedArticle],
    suggestion: Option<RegistrationSuggestion>,
) -> String {
    let mut reply = if continues_conversation {
        format!("{}\n\n{}", HISTORY_NOTICE, answer)
    } else {
        answer.to_string()
    };

    if !related.is_empty() {
        reply.push_str("\n\n📚 **관련 유사 이슈들:**\n");
        for article in related {
            let _ = writeln!(
                reply,
                "• {} (유사도: {:.0}%)",
                article.title,
                article.score * 100.0
            );
        }
    }

    if let Some(suggestion) = suggestion {
        let _ = write!(
            reply,
            "\n\n💡 **새로운 업무 지식 등록 제안**\n{}\n이 내용을 {} 업무 지식으로 등록하시겠습니까?\n",
            suggestion.reason(),
            match suggestion.knowledge_type {
                KnowledgeType::Issue => "이슈",
                KnowledgeType::Manual => "매뉴얼",
            }
        );
    }

    reply
}
