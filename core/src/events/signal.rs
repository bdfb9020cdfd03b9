/// Intercepted engine calls that trigger a reconciliation.
/// Each fires on the thread running the engine call, before the original
/// behavior executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineSignal {
    /// Weapon enchantment visuals are being attached to a caster
    EnchantmentVisualsAttached,

    /// A shader reference effect targeting an actor is initializing
    ShaderEffectInitialized,

    /// A magic caster is clearing its shader effects
    CasterShaderCleared,
}

impl EngineSignal {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EnchantmentVisualsAttached => "enchantment_visuals_attached",
            Self::ShaderEffectInitialized => "shader_effect_initialized",
            Self::CasterShaderCleared => "caster_shader_cleared",
        }
    }
}
