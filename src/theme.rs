//! Theme definitions
//!
//! A theme is selected in the menu by an opaque id string. The simulation
//! only consumes the cosmetic subtype names (to tag spawned obstacles and
//! decorations); colors are for the renderer.

use serde::{Deserialize, Serialize};

/// RGBA color, 0.0 - 1.0 per channel
pub type Rgba = [f32; 4];

/// Opaque color from a 0xRRGGBB literal
pub const fn rgb(hex: u32) -> Rgba {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Same color with a different alpha
pub const fn with_alpha(c: Rgba, a: f32) -> Rgba {
    [c[0], c[1], c[2], a]
}

/// Color table for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Sky gradient, top then bottom
    pub sky: [Rgba; 2],
    pub ground: Rgba,
    pub ground_top: Rgba,
    pub player: Rgba,
    pub coin: Rgba,
    pub platform_top: Rgba,
    pub platform_bottom: Rgba,
    /// Fallback static obstacle body + cap
    pub obstacle_static: [Rgba; 2],
    /// Fallback dynamic obstacle body
    pub obstacle_dynamic: Rgba,
}

/// Selectable themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Forest,
    Snow,
    Beach,
    City,
    Sky,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Forest,
        Theme::Snow,
        Theme::Beach,
        Theme::City,
        Theme::Sky,
    ];

    /// Id used by the menu buttons (`data-theme`)
    pub fn id(&self) -> &'static str {
        match self {
            Theme::Forest => "forest",
            Theme::Snow => "snow",
            Theme::Beach => "beach",
            Theme::City => "city",
            Theme::Sky => "sky",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Resolve a menu id, falling back to the default theme
    pub fn from_id_or_default(id: &str) -> Self {
        Self::from_id(id).unwrap_or_else(|| {
            log::warn!("Unknown theme '{}', using {}", id, Theme::default().id());
            Theme::default()
        })
    }

    /// Display name for the HUD
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Forest => "Forest",
            Theme::Snow => "Snowy Mountains",
            Theme::Beach => "Beach",
            Theme::City => "City",
            Theme::Sky => "Sky",
        }
    }

    /// Subtype name for every static obstacle in this theme
    pub fn static_obstacle_type(&self) -> &'static str {
        match self {
            Theme::Forest => "log",
            Theme::Snow => "ice",
            Theme::Beach => "sandcastle",
            Theme::City => "trashcan",
            Theme::Sky => "cloudObstacle",
        }
    }

    /// Candidate subtype names for dynamic obstacles (uniform pick)
    pub fn dynamic_obstacle_types(&self) -> &'static [&'static str] {
        match self {
            Theme::Forest => &["bee", "wolf"],
            Theme::Snow => &["snowball", "polarBear"],
            Theme::Beach => &["crab", "jellyfish"],
            Theme::City => &["taxi", "pigeon"],
            Theme::Sky => &["airplane", "co2"],
        }
    }

    /// Candidate decoration subtype names (uniform pick)
    pub fn decoration_types(&self) -> &'static [&'static str] {
        match self {
            Theme::Forest => &["tree", "bush"],
            Theme::Snow => &["pine", "snowman"],
            Theme::Beach => &["palm", "umbrella"],
            Theme::City => &["building", "streetlamp"],
            Theme::Sky => &["sun", "cloudDecoration"],
        }
    }

    pub fn palette(&self) -> Palette {
        const PLAYER: Rgba = rgb(0xFF6B35);
        const COIN: Rgba = rgb(0xFFD700);
        match self {
            Theme::Forest => Palette {
                sky: [rgb(0x87CEEB), rgb(0x228B22)],
                ground: rgb(0x3D2817),
                ground_top: rgb(0x228B22),
                player: PLAYER,
                coin: COIN,
                platform_top: rgb(0x228B22),
                platform_bottom: rgb(0x3D2817),
                obstacle_static: [rgb(0x654321), rgb(0x8B4513)],
                obstacle_dynamic: rgb(0xFF4444),
            },
            Theme::Snow => Palette {
                sky: [rgb(0xB0E0E6), rgb(0xE0F0FF)],
                ground: rgb(0x4A6FA5),
                ground_top: rgb(0xFFFAFA),
                player: PLAYER,
                coin: COIN,
                platform_top: rgb(0xFFFAFA),
                platform_bottom: rgb(0xA8D5FF),
                obstacle_static: [rgb(0x708090), rgb(0xA9A9A9)],
                obstacle_dynamic: rgb(0x4169E1),
            },
            Theme::Beach => Palette {
                sky: [rgb(0x87CEEB), rgb(0xFFE4B5)],
                ground: rgb(0x0077BE),
                ground_top: rgb(0xF4D03F),
                player: PLAYER,
                coin: COIN,
                platform_top: rgb(0xC2A66B),
                platform_bottom: rgb(0x8B7355),
                obstacle_static: [rgb(0x8B4513), rgb(0xD2691E)],
                obstacle_dynamic: rgb(0xFF6347),
            },
            Theme::City => Palette {
                sky: [rgb(0x4A5568), rgb(0x1A202C)],
                ground: rgb(0x2D3748),
                ground_top: rgb(0x718096),
                player: PLAYER,
                coin: COIN,
                platform_top: rgb(0x4A5568),
                platform_bottom: rgb(0x2D3748),
                obstacle_static: [rgb(0x718096), rgb(0x4A5568)],
                obstacle_dynamic: rgb(0xF6E05E),
            },
            Theme::Sky => Palette {
                sky: [rgb(0x1E90FF), rgb(0xB0E2FF)],
                ground: rgb(0xDDE7F0),
                ground_top: rgb(0xFFFFFF),
                player: PLAYER,
                coin: COIN,
                platform_top: rgb(0xFFFFFF),
                platform_bottom: rgb(0xC8D8E8),
                obstacle_static: [rgb(0xB0C4DE), rgb(0xF0F8FF)],
                obstacle_dynamic: rgb(0x696969),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_id(theme.id()), Some(theme));
        }
    }

    #[test]
    fn test_unknown_id_falls_back() {
        assert_eq!(Theme::from_id("mars"), None);
        assert_eq!(Theme::from_id_or_default("mars"), Theme::Forest);
    }

    #[test]
    fn test_every_theme_has_subtypes() {
        for theme in Theme::ALL {
            assert!(!theme.static_obstacle_type().is_empty());
            assert!(!theme.dynamic_obstacle_types().is_empty());
            assert!(!theme.decoration_types().is_empty());
        }
    }

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xFF0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(with_alpha(rgb(0x000000), 0.5)[3], 0.5);
    }
}
