use serde::{Deserialize, Serialize};

/// Contribution events that earn experience points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceEvent {
    KnowledgeCreated,
    QuestionCreated,
    AnswerCreated,
    AnswerPromoted,
}

impl ExperienceEvent {
    pub fn points(&self) -> u32 {
        match self {
            ExperienceEvent::KnowledgeCreated => 5,
            ExperienceEvent::QuestionCreated => 2,
            ExperienceEvent::AnswerCreated => 3,
            ExperienceEvent::AnswerPromoted => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceAward {
    pub points: u32,
    pub level: u32,
}

/// `floor(sqrt(points / 100)) + 1`
pub fn level_for(points: u32) -> u32 {
    (points / 100).isqrt() + 1
}

pub fn award(current_points: u32, delta: u32) -> ExperienceAward {
    let points = current_points.saturating_add(delta);
    ExperienceAward {
        points,
        level: level_for(points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_crosses_first_level() {
        assert_eq!(award(90, 10), ExperienceAward { points: 100, level: 2 });
    }

    #[test]
    fn test_zero_award_keeps_base_level() {
        assert_eq!(award(0, 0), ExperienceAward { points: 0, level: 1 });
    }

    #[test]
    fn test_level_curve() {
        assert_eq!(level_for(99), 1);
        assert_eq!(level_for(399), 2);
        assert_eq!(level_for(400), 3);
        assert_eq!(level_for(899), 3);
        assert_eq!(level_for(900), 4);
        assert_eq!(level_for(10_000), 11);
    }

    #[test]
    fn test_event_points() {
        assert_eq!(ExperienceEvent::KnowledgeCreated.points(), 5);
        assert_eq!(ExperienceEvent::QuestionCreated.points(), 2);
        assert_eq!(ExperienceEvent::AnswerCreated.points(), 3);
        assert_eq!(ExperienceEvent::AnswerPromoted.points(), 10);
    }
}
