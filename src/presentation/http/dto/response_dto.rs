use serde::Serialize;

use crate::domain::value_objects::ExperienceAward;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: String, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message,
                details,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub version: String,
    pub storage: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponseDto {
    pub message: String,
}

/// Points and level after an experience award.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExperienceAwardDto {
    pub experience_points: u32,
    pub level: u32,
}

impl From<ExperienceAward> for ExperienceAwardDto {
    fn from(award: ExperienceAward) -> Self {
        Self {
            experience_points: award.points,
            level: award.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let response: ApiResponse<()> =
            ApiResponse::error("NOT_FOUND".to_string(), "answer 1".to_string(), None);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert!(json["error"]["details"].is_null());
        assert!(json["timestamp"].as_str().is_some());
    }
}
