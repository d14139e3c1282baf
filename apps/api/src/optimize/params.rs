//! Tuning parameters — five independent sliders, each clamped to [1, 10].

use serde::{Deserialize, Serialize};

pub const PARAM_MIN: u8 = 1;
pub const PARAM_MAX: u8 = 10;

/// Slider state for the optimization panel. Mutable at any time after a
/// result exists; changing a value does not re-run optimization unless the
/// service is configured with `AUTO_REOPTIMIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationParameters {
    pub keyword_emphasis: u8,
    pub briefness_factor: u8,
    pub technical_detail: u8,
    pub experience_highlight: u8,
    pub skills_emphasis: u8,
}

/// Partial slider update; out-of-range values are clamped, not rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterUpdate {
    pub keyword_emphasis: Option<u8>,
    pub briefness_factor: Option<u8>,
    pub technical_detail: Option<u8>,
    pub experience_highlight: Option<u8>,
    pub skills_emphasis: Option<u8>,
}

fn clamp(value: u8) -> u8 {
    value.clamp(PARAM_MIN, PARAM_MAX)
}

impl Default for OptimizationParameters {
    fn default() -> Self {
        OptimizationParameters {
            keyword_emphasis: 7,
            briefness_factor: 5,
            technical_detail: 5,
            experience_highlight: 5,
            skills_emphasis: 5,
        }
    }
}

impl OptimizationParameters {
    pub fn apply(&mut self, update: ParameterUpdate) {
        if let Some(v) = update.keyword_emphasis {
            self.keyword_emphasis = clamp(v);
        }
        if let Some(v) = update.briefness_factor {
            self.briefness_factor = clamp(v);
        }
        if let Some(v) = update.technical_detail {
            self.technical_detail = clamp(v);
        }
        if let Some(v) = update.experience_highlight {
            self.experience_highlight = clamp(v);
        }
        if let Some(v) = update.skills_emphasis {
            self.skills_emphasis = clamp(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard_initial_state() {
        let params = OptimizationParameters::default();
        assert_eq!(params.keyword_emphasis, 7);
        assert_eq!(params.briefness_factor, 5);
        assert_eq!(params.skills_emphasis, 5);
    }

    #[test]
    fn test_apply_clamps_out_of_range_values() {
        let mut params = OptimizationParameters::default();
        params.apply(ParameterUpdate {
            keyword_emphasis: Some(0),
            briefness_factor: Some(42),
            ..Default::default()
        });
        assert_eq!(params.keyword_emphasis, PARAM_MIN);
        assert_eq!(params.briefness_factor, PARAM_MAX);
    }

    #[test]
    fn test_apply_is_partial() {
        let mut params = OptimizationParameters::default();
        params.apply(ParameterUpdate {
            technical_detail: Some(9),
            ..Default::default()
        });
        assert_eq!(params.technical_detail, 9);
        assert_eq!(params.keyword_emphasis, 7); // untouched
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = r#"{"keywordEmphasis": 3, "skillsEmphasis": 8}"#;
        let update: ParameterUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.keyword_emphasis, Some(3));
        assert_eq!(update.skills_emphasis, Some(8));
        assert_eq!(update.briefness_factor, None);
    }
}
