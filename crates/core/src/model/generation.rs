use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::BeltRank;

/// Placeholder replaced by the student's belt label when rendering the prompt.
pub const BELT_PLACEHOLDER: &str = "{BELT}";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

pub const DEFAULT_INSTRUCTION_TEMPLATE: &str = "Generate 5 high-quality multiple choice questions for a Karate student at the {BELT} belt level.
For every text field, provide both English and a natural Bengali translation.
Focus on:
- Technical Japanese terminology (e.g., Kihon, Kata, Kumite terms).
- Proper stances (Dachi) and strikes (Uchi/Tsuki).
- Dojo etiquette (Reiho) and philosophy (Dojo Kun).

Tailor difficulty specifically for {BELT} belt rank.
Output MUST be in the specified JSON format.";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 0.95;
pub const DEFAULT_TOP_K: u32 = 40;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GenerationSettingsError {
    #[error("model must not be empty")]
    EmptyModel,
    #[error("instruction template must contain {{BELT}}")]
    MissingBeltPlaceholder,
    #[error("temperature {0} is outside 0..=1")]
    Temperature(f32),
    #[error("top_p {0} is outside 0..=1")]
    TopP(f32),
    #[error("top_k {0} is outside 1..=100")]
    TopK(u32),
    #[error("max output tokens must be positive")]
    MaxOutputTokens,
}

/// Prompt and sampling parameters used to request a quiz.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GenerationSettingsDraft", into = "GenerationSettingsDraft")]
pub struct GenerationSettings {
    model: String,
    system_instruction_template: String,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    use_search_grounding: bool,
}

/// Editable form of `GenerationSettings`; missing persisted fields fall back to defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettingsDraft {
    pub model: String,
    pub system_instruction_template: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub use_search_grounding: bool,
}

impl Default for GenerationSettingsDraft {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_instruction_template: DEFAULT_INSTRUCTION_TEMPLATE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            use_search_grounding: false,
        }
    }
}

impl GenerationSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `GenerationSettingsError` for a blank model, a template without
    /// the belt placeholder, or a parameter outside its range.
    pub fn validate(self) -> Result<GenerationSettings, GenerationSettingsError> {
        let model = self.model.trim().to_string();
        if model.is_empty() {
            return Err(GenerationSettingsError::EmptyModel);
        }
        if !self.system_instruction_template.contains(BELT_PLACEHOLDER) {
            return Err(GenerationSettingsError::MissingBeltPlaceholder);
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(GenerationSettingsError::Temperature(self.temperature));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(GenerationSettingsError::TopP(self.top_p));
        }
        if !(1..=100).contains(&self.top_k) {
            return Err(GenerationSettingsError::TopK(self.top_k));
        }
        if self.max_output_tokens == 0 {
            return Err(GenerationSettingsError::MaxOutputTokens);
        }

        Ok(GenerationSettings {
            model,
            system_instruction_template: self.system_instruction_template,
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_output_tokens,
            use_search_grounding: self.use_search_grounding,
        })
    }
}

impl TryFrom<GenerationSettingsDraft> for GenerationSettings {
    type Error = GenerationSettingsError;

    fn try_from(draft: GenerationSettingsDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<GenerationSettings> for GenerationSettingsDraft {
    fn from(settings: GenerationSettings) -> Self {
        Self {
            model: settings.model,
            system_instruction_template: settings.system_instruction_template,
            temperature: settings.temperature,
            top_p: settings.top_p,
            top_k: settings.top_k,
            max_output_tokens: settings.max_output_tokens,
            use_search_grounding: settings.use_search_grounding,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_instruction_template: DEFAULT_INSTRUCTION_TEMPLATE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            use_search_grounding: false,
        }
    }
}

impl GenerationSettings {
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn system_instruction_template(&self) -> &str {
        &self.system_instruction_template
    }

    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    #[must_use]
    pub fn top_p(&self) -> f32 {
        self.top_p
    }

    #[must_use]
    pub fn top_k(&self) -> u32 {
        self.top_k
    }

    #[must_use]
    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    #[must_use]
    pub fn use_search_grounding(&self) -> bool {
        self.use_search_grounding
    }

    /// Substitute the belt label into every placeholder of the template.
    #[must_use]
    pub fn render_prompt(&self, belt: BeltRank) -> String {
        self.system_instruction_template
            .replace(BELT_PLACEHOLDER, belt.label())
    }

    #[must_use]
    pub fn to_draft(&self) -> GenerationSettingsDraft {
        self.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = GenerationSettingsDraft::default().validate().unwrap();
        assert_eq!(settings, GenerationSettings::default());
        assert_eq!(settings.model(), DEFAULT_MODEL);
    }

    #[test]
    fn render_prompt_replaces_every_placeholder() {
        let prompt = GenerationSettings::default().render_prompt(BeltRank::Brown2);
        assert!(!prompt.contains(BELT_PLACEHOLDER));
        assert_eq!(prompt.matches("Brown 2").count(), 2);
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        let draft = GenerationSettingsDraft {
            temperature: 1.5,
            ..GenerationSettingsDraft::default()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            GenerationSettingsError::Temperature(1.5)
        );

        let draft = GenerationSettingsDraft {
            top_k: 0,
            ..GenerationSettingsDraft::default()
        };
        assert_eq!(draft.validate().unwrap_err(), GenerationSettingsError::TopK(0));

        let draft = GenerationSettingsDraft {
            top_p: -0.1,
            ..GenerationSettingsDraft::default()
        };
        assert!(matches!(
            draft.validate().unwrap_err(),
            GenerationSettingsError::TopP(_)
        ));
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let draft = GenerationSettingsDraft {
            system_instruction_template: "Ask about kata.".into(),
            ..GenerationSettingsDraft::default()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            GenerationSettingsError::MissingBeltPlaceholder
        );
    }

    #[test]
    fn partial_persisted_json_falls_back_to_defaults() {
        let settings: GenerationSettings =
            serde_json::from_str(r#"{"model":"gemini-2.5-pro","topK":10}"#).unwrap();
        assert_eq!(settings.model(), "gemini-2.5-pro");
        assert_eq!(settings.top_k(), 10);
        assert_eq!(settings.top_p(), DEFAULT_TOP_P);
        assert!(!settings.use_search_grounding());
    }

    #[test]
    fn invalid_persisted_json_fails_to_deserialize() {
        let parsed = serde_json::from_str::<GenerationSettings>(r#"{"temperature":4.0}"#);
        assert!(parsed.is_err());
    }
}
