//! Configuration of a gym-style base environment.
use serde::{Deserialize, Serialize};

/// Id of the standard walker environment.
pub const BIPEDAL_WALKER: &str = "BipedalWalker-v3";

/// Id of the hardcore variant.
pub const BIPEDAL_WALKER_HARDCORE: &str = "BipedalWalkerHardcore-v3";

/// Tri-state hardcore flag.
///
/// [`HardcoreMode::Unset`] means the flag is not passed to the environment
/// factory at all, leaving the environment's own default in effect. This is
/// distinct from passing `Disabled` explicitly, even when the two appear
/// equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HardcoreMode {
    /// Let the environment use its built-in default.
    Unset,
    /// Pass `hardcore = true` to the factory.
    Enabled,
    /// Pass `hardcore = false` to the factory.
    Disabled,
}

impl HardcoreMode {
    /// The value to pass to the factory, or `None` to omit the flag.
    pub fn as_option(&self) -> Option<bool> {
        match self {
            HardcoreMode::Unset => None,
            HardcoreMode::Enabled => Some(true),
            HardcoreMode::Disabled => Some(false),
        }
    }
}

impl Default for HardcoreMode {
    fn default() -> Self {
        HardcoreMode::Unset
    }
}

/// Render mode of the base environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Render to a visible display surface.
    Human,
    /// Render to in-memory RGB frame buffers.
    RgbArray,
}

impl RenderMode {
    /// The mode string understood by the environment factory.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Human => "human",
            RenderMode::RgbArray => "rgb_array",
        }
    }
}

/// Configuration of the base environment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GymEnvConfig {
    /// Name of the environment, e.g. `BipedalWalker-v3`.
    pub name: String,

    /// Hardcore mode of the walker.
    pub hardcore: HardcoreMode,

    /// Render mode; `None` disables rendering.
    pub render_mode: Option<RenderMode>,
}

impl Default for GymEnvConfig {
    fn default() -> Self {
        Self {
            name: BIPEDAL_WALKER.to_string(),
            hardcore: HardcoreMode::Unset,
            render_mode: None,
        }
    }
}

impl GymEnvConfig {
    /// Sets the environment name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the hardcore mode.
    pub fn hardcore(mut self, mode: HardcoreMode) -> Self {
        self.hardcore = mode;
        self
    }

    /// Sets the render mode.
    pub fn render_mode(mut self, mode: Option<RenderMode>) -> Self {
        self.render_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::HardcoreMode;

    #[test]
    fn hardcore_mode_maps_to_factory_flag() {
        assert_eq!(HardcoreMode::Unset.as_option(), None);
        assert_eq!(HardcoreMode::Enabled.as_option(), Some(true));
        assert_eq!(HardcoreMode::Disabled.as_option(), Some(false));
    }
}
