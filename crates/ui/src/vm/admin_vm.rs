use dojo_core::model::{GenerationSettings, GenerationSettingsDraft, QuizResult};

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub id: String,
    pub completed_at_str: String,
    pub student: String,
    pub belt_label: &'static str,
    pub score_label: String,
    pub percentage: u32,
    pub marks: Vec<bool>,
}

impl From<&QuizResult> for ResultRowVm {
    fn from(result: &QuizResult) -> Self {
        Self {
            id: result.id().to_string(),
            completed_at_str: result
                .completed_at()
                .map_or_else(|| "unknown".to_string(), format_datetime),
            student: result.student_name().to_string(),
            belt_label: result.belt_rank().label(),
            score_label: format!("{}/{}", result.score(), result.total()),
            percentage: result.percentage(),
            marks: result.details().iter().map(|d| d.is_correct).collect(),
        }
    }
}

#[must_use]
pub fn map_result_rows(results: &[QuizResult]) -> Vec<ResultRowVm> {
    results.iter().map(ResultRowVm::from).collect()
}

/// Text-field form over `GenerationSettings`. Numbers stay strings until saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsFormVm {
    pub model: String,
    pub template: String,
    pub temperature: String,
    pub top_p: String,
    pub top_k: String,
    pub max_output_tokens: String,
    pub use_search_grounding: bool,
}

impl From<&GenerationSettings> for SettingsFormVm {
    fn from(settings: &GenerationSettings) -> Self {
        Self {
            model: settings.model().to_string(),
            template: settings.system_instruction_template().to_string(),
            temperature: settings.temperature().to_string(),
            top_p: settings.top_p().to_string(),
            top_k: settings.top_k().to_string(),
            max_output_tokens: settings.max_output_tokens().to_string(),
            use_search_grounding: settings.use_search_grounding(),
        }
    }
}

fn parse_field<T: std::str::FromStr>(label: &str, raw: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("{label} must be a number"))
}

impl SettingsFormVm {
    /// Parse the numeric fields. Range checks happen in `GenerationSettingsDraft::validate`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first field that is not a number.
    pub fn to_draft(&self) -> Result<GenerationSettingsDraft, String> {
        Ok(GenerationSettingsDraft {
            model: self.model.clone(),
            system_instruction_template: self.template.clone(),
            temperature: parse_field("Temperature", &self.temperature)?,
            top_p: parse_field("Top P", &self.top_p)?,
            top_k: parse_field("Top K", &self.top_k)?,
            max_output_tokens: parse_field("Max output tokens", &self.max_output_tokens)?,
            use_search_grounding: self.use_search_grounding,
        })
    }
}
