//! Board theme palettes
//!
//! Maps each [`BoardTheme`] to its light and dark square colors.

use crate::core::resources::BoardTheme;

/// Light/dark square colors as CSS hex strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub light: &'static str,
    pub dark: &'static str,
}

impl Palette {
    /// Color of a square given whether it is light
    pub fn square_color(&self, is_light: bool) -> &'static str {
        if is_light {
            self.light
        } else {
            self.dark
        }
    }
}

/// Returns the palette of a theme
pub fn palette(theme: BoardTheme) -> Palette {
    let (light, dark) = match theme {
        BoardTheme::Tournament => ("#dff7df", "#3ea554"),
        BoardTheme::Wood => ("#f0d9b5", "#b58863"),
        BoardTheme::Blue => ("#cde0ff", "#4f7fe0"),
        BoardTheme::Green => ("#d5f5cb", "#67b96d"),
        BoardTheme::Slate => ("#d9dde3", "#7b8794"),
        BoardTheme::Purple => ("#e2d4ff", "#8a5cf6"),
    };
    Palette { light, dark }
}
