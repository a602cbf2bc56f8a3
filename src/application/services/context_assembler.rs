use crate::application::ports::ScoredArticle;
use crate::domain::entities::RelatedArticle;

pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 2000;
pub const BLOCK_SEPARATOR: &str = "\n---\n";
pub const NO_CONTEXT_MESSAGE: &str = "관련된 업무 지식을 찾을 수 없습니다.";

#[derive(Debug, Clone, PartialEq)]
pub struct AssembledContext {
    pub text: String,
    pub manifest: Vec<RelatedArticle>,
}

impl AssembledContext {
    pub fn has_related(&self) -> bool {
        !self.manifest.is_empty()
    }
}

fn render_block(entry: &ScoredArticle) -> String {
    format!(
        "Title: {}\nContent: {}\nSimilarity: {:.2}\n",
        entry.article.title(),
        entry.article.content(),
        entry.score
    )
}

/// Packs ranked articles into a context blob of at most `max_chars`
/// characters, in rank order, stopping at the first block that does not fit.
/// The manifest lists exactly the blocks that made it into the text.
pub fn build_context(ranked: &[ScoredArticle], max_chars: usize) -> AssembledContext {
    let separator_len = BLOCK_SEPARATOR.chars().count();
    let mut blocks: Vec<String> = Vec::new();
    let mut manifest = Vec::new();
    let mut joined_len = 0;

    for entry in ranked {
        let block = render_block(entry);
        let block_len = block.chars().count();
        let candidate_len = if blocks.is_empty() {
            block_len
        } else {
            joined_len + separator_len + block_len
        };

        if candidate_len > max_chars {
            break;
        }

        joined_len = candidate_len;
        blocks.push(block);
        manifest.push(RelatedArticle {
            id: entry.article.id(),
            title: entry.article.title().to_string(),
            score: entry.score,
        });
    }

    if blocks.is_empty() {
        return AssembledContext {
            text: NO_CONTEXT_MESSAGE.to_string(),
            manifest,
        };
    }

    AssembledContext {
        text: blocks.join(BLOCK_SEPARATOR),
        manifest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::KnowledgeArticle;
    use crate::domain::value_objects::{Keywords, KnowledgeType};

    fn scored(title: &str, content: &str, score: f32) -> ScoredArticle {
        ScoredArticle {
            article: KnowledgeArticle::new(
                title.to_string(),
                content.to_string(),
                Keywords::default(),
                KnowledgeType::Manual,
                None,
            )
            .unwrap(),
            score,
        }
    }

    #[test]
    fn test_empty_input_gives_placeholder() {
        let context = build_context(&[], DEFAULT_MAX_CONTEXT_CHARS);
        assert!(!context.text.is_empty());
        assert_eq!(context.text, NO_CONTEXT_MESSAGE);
        assert!(context.manifest.is_empty());
        assert!(!context.has_related());
    }

    #[test]
    fn test_block_format_and_separator() {
        let ranked = vec![scored("A", "alpha", 0.5), scored("B", "beta", 0.25)];
        let context = build_context(&ranked, DEFAULT_MAX_CONTEXT_CHARS);

        assert_eq!(
            context.text,
            "Title: A\nContent: alpha\nSimilarity: 0.50\n\n---\nTitle: B\nContent: beta\nSimilarity: 0.25\n"
        );
        assert_eq!(context.manifest.len(), 2);
        assert_eq!(context.manifest[0].title, "A");
        assert_eq!(context.manifest[1].score, 0.25);
    }

    #[test]
    fn test_stops_at_first_overflow() {
        let ranked = vec![
            scored("first", &"가".repeat(40), 0.9),
            scored("second", &"나".repeat(400), 0.8),
            scored("third", "짧음", 0.7),
        ];
        let context = build_context(&ranked, 200);

        // "third" would fit on its own but assembly never skips ahead
        assert_eq!(context.manifest.len(), 1);
        assert_eq!(context.manifest[0].title, "first");
        assert!(context.text.chars().count() <= 200);
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let block_len = render_block(&scored("제목", "내용", 0.5)).chars().count();
        let ranked = vec![scored("제목", "내용", 0.5)];

        let exact = build_context(&ranked, block_len);
        assert_eq!(exact.manifest.len(), 1);

        let short = build_context(&ranked, block_len - 1);
        assert!(short.manifest.is_empty());
        assert_eq!(short.text, NO_CONTEXT_MESSAGE);
    }

    #[test]
    fn test_manifest_mirrors_accepted_blocks() {
        let ranked: Vec<ScoredArticle> = (0..10)
            .map(|i| scored(&format!("title-{}", i), &"x".repeat(100), 1.0 - i as f32 * 0.05))
            .collect();

        for max_chars in [0, 50, 150, 300, 600, 2000] {
            let context = build_context(&ranked, max_chars);
            assert!(context.manifest.len() <= ranked.len());
            if context.has_related() {
                assert!(context.text.chars().count() <= max_chars);
                assert_eq!(
                    context.text.matches("Title: ").count(),
                    context.manifest.len()
                );
            }
        }
    }
}
