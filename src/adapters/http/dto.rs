//! Request/response bodies for the REST endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::GameId;
use crate::domain::game::GameError;

/// POST /game/create body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGameRequest {
    pub username: String,
}

/// POST /game/join body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameRequest {
    pub game_id: GameId,
    pub username: String,
}

/// Structured failure body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }

    pub fn from_game_error(err: &GameError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_request_uses_camel_case_keys() {
        let req: JoinGameRequest = serde_json::from_str(
            r#"{"gameId":"00000000-0000-0000-0000-000000000000","username":"bob"}"#,
        )
        .unwrap();
        assert_eq!(req.username, "bob");
    }

    #[test]
    fn error_response_carries_the_game_error_code() {
        let body = ErrorResponse::from_game_error(&GameError::NotYourTurn);
        assert_eq!(body.code, "not_your_turn");
    }
}
