use serde::{Deserialize, Serialize};

/// Global switches read by the reconciliation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Grant a light aura tinted by the light effects of granted abilities.
    #[serde(default)]
    pub add_light: bool,

    /// Only compute abilities while the actor has its weapon drawn.
    #[serde(default = "default_true")]
    pub require_weapon_drawn: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            add_light: false,
            require_weapon_drawn: true,
        }
    }
}

fn default_true() -> bool {
    true
}
