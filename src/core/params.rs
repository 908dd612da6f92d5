//! # Generation Parameters
//!
//! The four numeric knobs sent along with a prompt, plus the control specs
//! (bounds and step) used by the parameters panel.
//!
//! The session holder stores whatever it is given. Bounds live on
//! [`Knob::spec`] and are applied by the control that edits the value, never
//! on write. [`GenerationParameters::out_of_range`] reports values that came
//! from elsewhere (config file, manual calls) and sit outside the bounds.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GenerationParameters {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2048,
            top_p: 0.9,
            frequency_penalty: 0.0,
        }
    }
}

/// A partial update. `None` fields are left unchanged by [`GenerationParameters::apply`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct ParameterPatch {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
}

impl ParameterPatch {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.max_tokens.is_none()
            && self.top_p.is_none()
            && self.frequency_penalty.is_none()
    }
}

impl GenerationParameters {
    /// Merge a patch into these parameters.
    pub fn apply(&mut self, patch: &ParameterPatch) {
        if let Some(v) = patch.temperature {
            self.temperature = v;
        }
        if let Some(v) = patch.max_tokens {
            self.max_tokens = v;
        }
        if let Some(v) = patch.top_p {
            self.top_p = v;
        }
        if let Some(v) = patch.frequency_penalty {
            self.frequency_penalty = v;
        }
    }

    /// Knobs whose current value lies outside their control bounds.
    pub fn out_of_range(&self) -> Vec<Knob> {
        Knob::ALL
            .into_iter()
            .filter(|knob| !knob.spec().contains(knob.value(self)))
            .collect()
    }
}

/// Identifies one of the four parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Knob {
    Temperature,
    MaxTokens,
    TopP,
    FrequencyPenalty,
}

/// Bounds, step and copy for a knob's control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobSpec {
    pub label: &'static str,
    pub description: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl KnobSpec {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Position of `value` within the bounds, in `0.0..=1.0`.
    pub fn ratio(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Move `value` by `steps` increments along the step grid, staying within
    /// bounds. An off-grid value counts the nearest grid point in the
    /// direction of travel as the first step.
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        // Grid position, with float noise such as 6.9999999 removed
        let pos = (((value - self.min) / self.step) * 1e6).round() / 1e6;
        let target = match steps.signum() {
            1 => pos.floor() + f64::from(steps),
            -1 => pos.ceil() + f64::from(steps),
            _ => pos.round(),
        };
        let moved = target * self.step + self.min;
        let rounded = (moved * 1000.0).round() / 1000.0;
        rounded.clamp(self.min, self.max)
    }
}

impl Knob {
    pub const ALL: [Knob; 4] = [
        Knob::Temperature,
        Knob::MaxTokens,
        Knob::TopP,
        Knob::FrequencyPenalty,
    ];

    pub fn spec(self) -> KnobSpec {
        match self {
            Knob::Temperature => KnobSpec {
                label: "Temperature",
                description: "Controls randomness in responses",
                min: 0.0,
                max: 2.0,
                step: 0.1,
            },
            Knob::MaxTokens => KnobSpec {
                label: "Max Tokens",
                description: "Maximum response length",
                min: 100.0,
                max: 4096.0,
                step: 100.0,
            },
            Knob::TopP => KnobSpec {
                label: "Top P",
                description: "Controls diversity of responses",
                min: 0.0,
                max: 1.0,
                step: 0.05,
            },
            Knob::FrequencyPenalty => KnobSpec {
                label: "Frequency Penalty",
                description: "Reduces repetitive content",
                min: 0.0,
                max: 2.0,
                step: 0.1,
            },
        }
    }

    pub fn value(self, params: &GenerationParameters) -> f64 {
        match self {
            Knob::Temperature => f64::from(params.temperature),
            Knob::MaxTokens => f64::from(params.max_tokens),
            Knob::TopP => f64::from(params.top_p),
            Knob::FrequencyPenalty => f64::from(params.frequency_penalty),
        }
    }

    /// A patch that sets only this knob.
    pub fn patch(self, value: f64) -> ParameterPatch {
        let mut patch = ParameterPatch::default();
        match self {
            Knob::Temperature => patch.temperature = Some(value as f32),
            Knob::MaxTokens => patch.max_tokens = Some(value.round().max(0.0) as u32),
            Knob::TopP => patch.top_p = Some(value as f32),
            Knob::FrequencyPenalty => patch.frequency_penalty = Some(value as f32),
        }
        patch
    }

    /// Display string for this knob's value in `params`.
    pub fn format(self, params: &GenerationParameters) -> String {
        match self {
            Knob::MaxTokens => params.max_tokens.to_string(),
            Knob::TopP => format!("{:.2}", params.top_p),
            Knob::Temperature => format!("{:.1}", params.temperature),
            Knob::FrequencyPenalty => format!("{:.1}", params.frequency_penalty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = GenerationParameters::default();
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.max_tokens, 2048);
        assert_eq!(params.top_p, 0.9);
        assert_eq!(params.frequency_penalty, 0.0);
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut params = GenerationParameters::default();
        params.apply(&ParameterPatch {
            temperature: Some(1.2),
            ..Default::default()
        });
        assert_eq!(params.temperature, 1.2);
        assert_eq!(params.max_tokens, 2048);
        assert_eq!(params.top_p, 0.9);
        assert_eq!(params.frequency_penalty, 0.0);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut params = GenerationParameters::default();
        let patch = ParameterPatch::default();
        assert!(patch.is_empty());
        params.apply(&patch);
        assert_eq!(params, GenerationParameters::default());
    }

    #[test]
    fn test_apply_does_not_clamp() {
        let mut params = GenerationParameters::default();
        params.apply(&ParameterPatch {
            temperature: Some(5.0),
            max_tokens: Some(50),
            ..Default::default()
        });
        assert_eq!(params.temperature, 5.0);
        assert_eq!(params.max_tokens, 50);
        assert_eq!(
            params.out_of_range(),
            vec![Knob::Temperature, Knob::MaxTokens]
        );
    }

    #[test]
    fn test_nudge_snaps_and_clamps() {
        let spec = Knob::Temperature.spec();
        assert_eq!(spec.nudge(0.7, 1), 0.8);
        assert_eq!(spec.nudge(0.2, 1), 0.3);
        assert_eq!(spec.nudge(1.95, 1), 2.0);
        assert_eq!(spec.nudge(0.0, -1), 0.0);

        let tokens = Knob::MaxTokens.spec();
        assert_eq!(tokens.nudge(2048.0, 1), 2100.0);
        assert_eq!(tokens.nudge(2048.0, -1), 2000.0);
        assert_eq!(tokens.nudge(4000.0, 5), 4096.0);

        let top_p = Knob::TopP.spec();
        assert_eq!(top_p.nudge(0.9, 1), 0.95);
    }

    #[test]
    fn test_ratio() {
        let spec = Knob::TopP.spec();
        assert_eq!(spec.ratio(0.5), 0.5);
        assert_eq!(spec.ratio(2.0), 1.0);
        assert_eq!(spec.ratio(-1.0), 0.0);
    }

    #[test]
    fn test_knob_patch_sets_single_field() {
        let patch = Knob::MaxTokens.patch(1024.4);
        assert_eq!(patch.max_tokens, Some(1024));
        assert!(patch.temperature.is_none());
        assert!(patch.top_p.is_none());
        assert!(patch.frequency_penalty.is_none());
    }

    #[test]
    fn test_format() {
        let params = GenerationParameters::default();
        assert_eq!(Knob::Temperature.format(&params), "0.7");
        assert_eq!(Knob::MaxTokens.format(&params), "2048");
        assert_eq!(Knob::TopP.format(&params), "0.90");
        assert_eq!(Knob::FrequencyPenalty.format(&params), "0.0");
    }
}
