use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::ports::CompletionProvider;
use crate::application::ports::completion_provider::{
    ChatMessage, CompletionError, CompletionRequest,
};
use crate::application::services::keyword_extractor;
use crate::domain::value_objects::Keywords;

pub const DEFAULT_SUMMARY_CHARS: usize = 200;
const SUMMARY_MAX_TOKENS: u32 = 100;
const ELLIPSIS: &str = "...";

#[derive(Deserialize)]
struct KeywordReply {
    #[serde(default)]
    keywords: Vec<Value>,
}

/// Model-backed keyword extraction and summarisation. Every call has a
/// deterministic local answer to fall back on, so callers never see a
/// provider failure.
pub struct TextAssistant {
    completion_provider: Arc<dyn CompletionProvider>,
    timeout: Duration,
}

impl TextAssistant {
    pub fn new(completion_provider: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self {
            completion_provider,
            timeout,
        }
    }

    pub async fn extract_keywords(&self, text: &str, max_keywords: usize) -> Keywords {
        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system("JSON 형태로만 응답해주세요."),
                ChatMessage::user(keyword_prompt(text, max_keywords)),
            ],
            max_tokens: None,
            temperature: None,
        };

        match self
            .ask(request)
            .await
            .and_then(|reply| parse_keywords(&reply, max_keywords))
        {
            Ok(keywords) => keywords,
            Err(e) => {
                warn!(
                    "Keyword extraction via {} failed, using word frequency: {}",
                    self.completion_provider.model_name(),
                    e
                );
                keyword_extractor::extract_keywords(text, max_keywords)
            }
        }
    }

    /// Text at or under `max_chars` is returned untouched.
    pub async fn summarize(&self, text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }

        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system("간결하고 명확하게 요약해주세요."),
                ChatMessage::user(format!(
                    "다음 텍스트를 {}자 이내로 요약해주세요.\n\
핵심 내용과 해결 방법을 포함하여 간결하게 정리해주세요.\n\n텍스트: {}",
                    max_chars, text
                )),
            ],
            max_tokens: Some(SUMMARY_MAX_TOKENS),
            temperature: None,
        };

        match self.ask(request).await {
            Ok(summary) if !summary.trim().is_empty() => clip(summary.trim(), max_chars),
            Ok(_) => {
                debug!("Empty summary from model, truncating instead");
                summary_fallback(text, max_chars)
            }
            Err(e) => {
                warn!(
                    "Summary via {} failed, truncating instead: {}",
                    self.completion_provider.model_name(),
                    e
                );
                summary_fallback(text, max_chars)
            }
        }
    }

    async fn ask(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        tokio::time::timeout(self.timeout, self.completion_provider.complete(request))
            .await
            .unwrap_or(Err(CompletionError::Timeout(self.timeout.as_secs())))
    }
}

fn keyword_prompt(text: &str, max_keywords: usize) -> String {
    format!(
        "다음 텍스트에서 가장 중요한 키워드들을 추출해주세요.\n\
IT 기술, 도구, 문제 유형, 해결 방법과 관련된 키워드를 우선적으로 선택해주세요.\n\
최대 {}개의 키워드를 JSON 배열 형태로 응답해주세요.\n\n\
텍스트: {}\n\n\
응답 형식: {{\"keywords\": [\"키워드1\", \"키워드2\", ...]}}",
        max_keywords, text
    )
}

/// Reads `{"keywords": [...]}` out of a model reply, tolerating prose or a
/// code fence around the object. Non-string and blank entries are skipped.
fn parse_keywords(reply: &str, max_keywords: usize) -> Result<Keywords, CompletionError> {
    let object = match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => {
            return Err(CompletionError::InvalidResponse(
                "no JSON object in keyword reply".to_string(),
            ));
        }
    };

    let parsed: KeywordReply = serde_json::from_str(object)
        .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

    let keywords = Keywords::new(
        parsed
            .keywords
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .take(max_keywords)
            .map(str::to_string)
            .collect(),
    );

    if keywords.is_empty() {
        return Err(CompletionError::InvalidResponse(
            "keyword list is empty".to_string(),
        ));
    }
    Ok(keywords)
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    clipped.push_str(ELLIPSIS);
    clipped
}

/// Cuts at the last sentence end in the second half of the budget, or
/// hard-truncates with an ellipsis.
pub fn summary_fallback(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    let sentence_end = truncated
        .chars()
        .enumerate()
        .filter(|(_, c)| matches!(c, '.' | '?' | '!'))
        .map(|(position, _)| position)
        .last();

    match sentence_end {
        Some(position) if position > max_chars / 2 => text.chars().take(position + 1).collect(),
        _ => truncated + ELLIPSIS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct ScriptedProvider(Option<&'static str>);

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| CompletionError::NetworkError("connection refused".to_string()))
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    struct StalledProvider;

    #[async_trait]
    impl CompletionProvider for StalledProvider {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(r#"{"keywords": ["late"]}"#.to_string())
        }

        fn model_name(&self) -> &str {
            "stalled"
        }
    }

    fn assistant(provider: impl CompletionProvider + 'static) -> TextAssistant {
        TextAssistant::new(Arc::new(provider), Duration::from_millis(50))
    }

    const INCIDENT: &str = "Oracle listener 가 내려가서 listener 를 재기동했습니다. oracle alert 로그 확인";

    #[tokio::test]
    async fn test_model_keywords_are_used() {
        let assistant = assistant(ScriptedProvider(Some(
            "```json\n{\"keywords\": [\" Oracle \", \"\", 42, \"리스너\", \"재기동\"]}\n```",
        )));
        let keywords = assistant.extract_keywords(INCIDENT, 2).await;
        assert_eq!(keywords.as_slice(), &["Oracle".to_string(), "리스너".to_string()]);
    }

    #[tokio::test]
    async fn test_keyword_fallback_on_failure_or_garbage() {
        let expected = keyword_extractor::extract_keywords(INCIDENT, 3);

        let failing = assistant(ScriptedProvider(None));
        assert_eq!(failing.extract_keywords(INCIDENT, 3).await, expected);

        let prose = assistant(ScriptedProvider(Some("키워드는 oracle 입니다")));
        assert_eq!(prose.extract_keywords(INCIDENT, 3).await, expected);

        let empty = assistant(ScriptedProvider(Some(r#"{"keywords": []}"#)));
        assert_eq!(empty.extract_keywords(INCIDENT, 3).await, expected);
    }

    #[tokio::test]
    async fn test_keyword_fallback_on_timeout() {
        let keywords = assistant(StalledProvider).extract_keywords(INCIDENT, 3).await;
        assert_eq!(keywords, keyword_extractor::extract_keywords(INCIDENT, 3));
    }

    #[tokio::test]
    async fn test_short_text_is_not_summarised() {
        let summary = assistant(ScriptedProvider(None)).summarize("짧은 글", 200).await;
        assert_eq!(summary, "짧은 글");
    }

    #[tokio::test]
    async fn test_model_summary_is_clipped() {
        let assistant = assistant(ScriptedProvider(Some("가나다라마바사아자차카타파하")));
        let summary = assistant.summarize(&"긴 본문 ".repeat(10), 10).await;
        assert_eq!(summary, "가나다라마바사...");
    }

    #[tokio::test]
    async fn test_summary_falls_back_to_truncation() {
        let text = "첫 문장입니다. 두 번째 문장은 조금 더 깁니다! 세 번째 문장은 잘립니다";
        let summary = assistant(ScriptedProvider(None)).summarize(text, 30).await;
        assert_eq!(summary, summary_fallback(text, 30));
    }

    #[test]
    fn test_fallback_prefers_late_sentence_end() {
        // '!' sits at position 26, past half of the 30 char budget
        let text = "첫 문장입니다. 두 번째 문장은 조금 더 깁니다! 세 번째 문장은 잘립니다";
        assert_eq!(summary_fallback(text, 30), "첫 문장입니다. 두 번째 문장은 조금 더 깁니다!");
    }

    #[test]
    fn test_fallback_truncates_without_late_sentence_end() {
        let text = "마침표 없이 길게 이어지는 문장이 계속됩니다 계속됩니다";
        let summary = summary_fallback(text, 12);
        assert_eq!(summary, "마침표 없이 길게...");
        assert_eq!(summary.chars().count(), 12);
    }
}
