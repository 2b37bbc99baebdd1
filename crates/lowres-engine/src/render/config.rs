use crate::coords::{ColorRgba, GameResolution, GAME_RESOLUTION};
use crate::scene::MAX_SPRITES;

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Resolution of the offscreen target. Never changes after startup.
    pub game: GameResolution,

    /// Sprites per frame. Appends past this are dropped.
    pub sprite_budget: usize,

    /// Background of the game scene.
    pub offscreen_clear: ColorRgba,

    /// Color of the letterbox/pillarbox bars.
    pub display_clear: ColorRgba,
}

impl RendererConfig {
    /// Panics on a config no renderer can be built from.
    pub fn validate(&self) {
        assert!(
            self.game.is_valid(),
            "game resolution must be positive, got {}x{}",
            self.game.width,
            self.game.height
        );
        assert!(self.sprite_budget > 0, "sprite budget must be positive");
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            game: GAME_RESOLUTION,
            sprite_budget: MAX_SPRITES,
            offscreen_clear: ColorRgba::new(0.08, 0.07, 0.12, 1.0),
            display_clear: ColorRgba::transparent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RendererConfig::default();
        config.validate();
        assert_eq!(config.game, GameResolution::new(320, 180));
    }

    #[test]
    #[should_panic(expected = "game resolution must be positive")]
    fn zero_resolution_is_fatal() {
        RendererConfig {
            game: GameResolution::new(0, 180),
            ..Default::default()
        }
        .validate();
    }

    #[test]
    #[should_panic(expected = "sprite budget")]
    fn zero_budget_is_fatal() {
        RendererConfig {
            sprite_budget: 0,
            ..Default::default()
        }
        .validate();
    }
}
