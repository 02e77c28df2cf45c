/// Scaffold mode swaps every external model for a local stand-in: no LLM
/// call, mock tone renderers with an optional artificial delay.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldConfig {
    pub enabled: bool,
    pub mock_render_delay_ms: u64,
}

impl ScaffoldConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var("SCAFFOLD_MODE")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            mock_render_delay_ms: std::env::var("MOCK_RENDER_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
