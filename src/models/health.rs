use serde::Deserialize;

// Missing fields deserialize to false so a sparse health body reads as
// degraded rather than healthy.
#[derive(Debug, Default, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub debug_mode: bool,
    #[serde(default)]
    pub integrations: Integrations,
}

#[derive(Debug, Default, Deserialize)]
pub struct Integrations {
    #[serde(default)]
    pub luma: bool,
}
