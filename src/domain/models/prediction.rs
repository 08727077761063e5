use serde::Serialize;

use super::CpvCode;

/// One per-text outcome in a batch response.
///
/// Serializes as `{"text": ..., "cpv_code": "NNNNN"}` or, when no valid code
/// could be produced, `{"text": ..., "cpv_code": null}`.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub text: String,
    pub cpv_code: Option<CpvCode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_prediction_serializes_code_as_null() {
        let prediction = Prediction {
            text: "A".to_string(),
            cpv_code: None,
        };
        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json, serde_json::json!({"text": "A", "cpv_code": null}));
    }

    #[test]
    fn successful_prediction_serializes_code_as_string() {
        let prediction = Prediction {
            text: "Park maintenance".to_string(),
            cpv_code: CpvCode::normalize("77311"),
        };
        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "Park maintenance", "cpv_code": "77311"})
        );
    }
}
