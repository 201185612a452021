use thiserror::Error;

/// Setup-time failures. Nothing on the audio path returns these.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),

    #[error("parameter `{name}` = {value} is outside {min}..={max}")]
    ParameterOutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[cfg(feature = "serde")]
    #[error("failed to parse synth parameters")]
    Parse(#[from] serde_json::Error),
}

pub(crate) fn check_sample_rate(sample_rate: f32) -> Result<f32, SynthError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(sample_rate)
    } else {
        Err(SynthError::InvalidSampleRate(sample_rate))
    }
}
