//! Response validation and status parsing.
//!
//! The API body stays a generic [`serde_json::Value`]: [`check_response`]
//! only verifies its shape, and callers then read `homeworks` and
//! `current_date` through [`homeworks`] and [`current_date`].

use serde_json::Value;

use crate::error::{BotError, BotResult};

/// Review verdicts, keyed by the status codes the API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Check the response shape. Order matters: each failure has its own kind.
pub fn check_response(response: &Value) -> BotResult<()> {
    let body = response
        .as_object()
        .ok_or_else(|| BotError::unexpected_type("API response is not a JSON object"))?;

    let homeworks = body
        .get("homeworks")
        .ok_or_else(|| BotError::response_api("API response has no \"homeworks\" key"))?;

    if !homeworks.is_array() {
        return Err(BotError::unexpected_type(
            "\"homeworks\" in API response is not a list",
        ));
    }

    if !body.contains_key("current_date") {
        return Err(BotError::response_api(
            "API response has no \"current_date\" key",
        ));
    }

    Ok(())
}

/// Submission records of a response that passed [`check_response`].
pub fn homeworks(response: &Value) -> &[Value] {
    response
        .get("homeworks")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// The server timestamp of a response that passed [`check_response`].
pub fn current_date(response: &Value) -> BotResult<i64> {
    let raw = response
        .get("current_date")
        .ok_or_else(|| BotError::response_api("API response has no \"current_date\" key"))?;
    raw.as_i64().ok_or_else(|| {
        BotError::unexpected_type(format!("\"current_date\" is not an integer: {}", raw))
    })
}

/// Turn one submission record into the notification sentence.
pub fn parse_status(homework: &Value) -> BotResult<String> {
    let name = match homework.get("homework_name") {
        Some(Value::String(name)) => name,
        Some(other) => {
            return Err(BotError::homework_status(format!(
                "\"homework_name\" is not a string: {}",
                other
            )))
        }
        None => {
            return Err(BotError::homework_status(
                "Submission record has no \"homework_name\" key",
            ))
        }
    };

    let code = match homework.get("status") {
        Some(Value::String(code)) => code,
        Some(other) => {
            return Err(BotError::homework_status(format!(
                "\"status\" is not a string: {}",
                other
            )))
        }
        None => {
            return Err(BotError::homework_status(
                "Submission record has no \"status\" key",
            ))
        }
    };

    let status = ReviewStatus::from_code(code)
        .ok_or_else(|| BotError::homework_status(format!("Unknown status: {}", code)))?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_response_passes() {
        let response = json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1000
        });
        assert!(check_response(&response).is_ok());
        assert_eq!(homeworks(&response).len(), 1);
        assert_eq!(current_date(&response).unwrap(), 1000);
    }

    #[test]
    fn empty_homeworks_list_is_valid() {
        let response = json!({"homeworks": [], "current_date": 1000});
        assert!(check_response(&response).is_ok());
        assert!(homeworks(&response).is_empty());
    }

    #[test]
    fn non_object_response_is_a_type_error() {
        let err = check_response(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, BotError::UnexpectedType { .. }));
    }

    #[test]
    fn missing_homeworks_is_a_response_api_error() {
        let err = check_response(&json!({"current_date": 1000})).unwrap_err();
        assert!(matches!(err, BotError::ResponseApi { .. }));
    }

    #[test]
    fn homeworks_not_a_list_is_a_type_error() {
        let err =
            check_response(&json!({"homeworks": {"a": 1}, "current_date": 1000})).unwrap_err();
        assert!(matches!(err, BotError::UnexpectedType { .. }));
    }

    #[test]
    fn list_type_is_checked_before_current_date_presence() {
        let err = check_response(&json!({"homeworks": 5})).unwrap_err();
        assert!(matches!(err, BotError::UnexpectedType { .. }));
    }

    #[test]
    fn missing_current_date_is_a_response_api_error() {
        let err = check_response(&json!({"homeworks": []})).unwrap_err();
        assert!(matches!(err, BotError::ResponseApi { .. }));
    }

    #[test]
    fn non_integer_current_date_is_a_type_error() {
        let response = json!({"homeworks": [], "current_date": "yesterday"});
        assert!(check_response(&response).is_ok());
        let err = current_date(&response).unwrap_err();
        assert!(matches!(err, BotError::UnexpectedType { .. }));
    }

    #[test]
    fn approved_status_yields_exact_sentence() {
        let record = json!({"homework_name": "hw1", "status": "approved"});
        assert_eq!(
            parse_status(&record).unwrap(),
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn reviewing_and_rejected_map_to_their_verdicts() {
        let reviewing = parse_status(&json!({"homework_name": "hw2", "status": "reviewing"}));
        assert!(reviewing.unwrap().ends_with("Работа взята на проверку ревьюером."));

        let rejected = parse_status(&json!({"homework_name": "hw3", "status": "rejected"}));
        assert!(rejected.unwrap().ends_with("Работа проверена: у ревьюера есть замечания."));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = parse_status(&json!({"homework_name": "hw1", "status": "in_progress"}))
            .unwrap_err();
        assert!(matches!(err, BotError::HomeworkStatus { .. }));
        assert!(err.to_string().contains("in_progress"));
    }

    #[test]
    fn missing_homework_name_is_rejected() {
        let err = parse_status(&json!({"status": "approved"})).unwrap_err();
        assert!(matches!(err, BotError::HomeworkStatus { .. }));
    }

    #[test]
    fn missing_status_is_rejected() {
        let err = parse_status(&json!({"homework_name": "hw1"})).unwrap_err();
        assert!(matches!(err, BotError::HomeworkStatus { .. }));
    }

    #[test]
    fn non_string_status_is_reported_as_wrong_type() {
        let err = parse_status(&json!({"homework_name": "hw1", "status": 5})).unwrap_err();
        assert!(matches!(err, BotError::HomeworkStatus { .. }));
        assert!(err.to_string().contains("not a string"));
        assert!(!err.to_string().contains("no \"status\" key"));
    }

    #[test]
    fn status_codes_are_case_sensitive() {
        assert_eq!(ReviewStatus::from_code("approved"), Some(ReviewStatus::Approved));
        assert_eq!(ReviewStatus::from_code("APPROVED"), None);
    }
}
