//! Generation option presets sent with every request.

use serde::Serialize;

/// Ollama `options` bag. Unset fields are left to the server's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_ctx: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_last_n: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

impl GenerateOptions {
    /// Options for full-text extraction: deterministic, no penalties,
    /// large context and output ceilings, no stop sequences.
    pub fn extraction() -> Self {
        Self {
            temperature: Some(0.0),
            top_p: Some(0.9),
            top_k: Some(100),
            min_p: Some(0.01),
            num_ctx: Some(32768),
            num_predict: Some(8000),
            repeat_penalty: Some(1.0),
            repeat_last_n: Some(64),
            presence_penalty: Some(0.0),
            frequency_penalty: Some(0.0),
            stop: Some(Vec::new()),
        }
    }

    /// Options for the short classification probe.
    pub fn probe() -> Self {
        Self {
            temperature: Some(0.1),
            num_ctx: Some(2048),
            num_predict: Some(50),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_options_json() {
        let json = serde_json::to_value(GenerateOptions::extraction()).unwrap();
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["num_ctx"], 32768);
        assert_eq!(json["num_predict"], 8000);
        assert_eq!(json["repeat_penalty"], 1.0);
        assert_eq!(json["stop"], serde_json::json!([]));
    }

    #[test]
    fn test_probe_options_omit_unset_fields() {
        let json = serde_json::to_value(GenerateOptions::probe()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(json["num_predict"], 50);
        assert!(obj.get("stop").is_none());
    }
}
