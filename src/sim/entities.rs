//! World entities and their per-tick behaviour
//!
//! Everything except the player scrolls left by `SCROLL_SPEED` every
//! unpaused tick; the player is clamped to the viewport instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::Viewport;
use super::tick::TickInput;
use crate::consts::*;

pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 50.0;
/// Player spawn x, and how far above the ground its top starts
pub const PLAYER_START_X: f32 = 100.0;
pub const PLAYER_START_HEIGHT: f32 = 60.0;

pub const COIN_RADIUS: f32 = 15.0;
/// Vertical bob amplitude (pixels) and angular rate (radians per tick)
pub const COIN_BOB_AMPLITUDE: f32 = 5.0;
pub const COIN_BOB_RATE: f32 = 0.1;

pub const PLATFORM_HEIGHT: f32 = 20.0;

/// Dynamic obstacle vertical speed (pixels per tick) and swing
pub const OBSTACLE_BOB_SPEED: f32 = 2.0;
pub const OBSTACLE_BOB_RANGE: f32 = 50.0;

/// Decorations are removed once this far past the left edge
pub const DECORATION_CULL_X: f32 = -100.0;

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// -1 facing left, +1 facing right
    pub facing: i8,
    pub on_ground: bool,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            facing: 1,
            on_ground: false,
        }
    }

    /// Player at the start position for a viewport
    pub fn spawn(viewport: &Viewport) -> Self {
        Self::new(
            PLAYER_START_X,
            viewport.ground_y() - PLAYER_START_HEIGHT,
        )
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    #[inline]
    fn bottom(&self) -> f32 {
        self.pos.y + PLAYER_HEIGHT
    }

    /// Advance one tick: steering, gravity, ground/platform landing, clamp
    pub fn update(&mut self, input: &TickInput, platforms: &[Platform], viewport: &Viewport) {
        if input.left {
            self.vel.x = -PLAYER_SPEED;
            self.facing = -1;
        } else if input.right {
            self.vel.x = PLAYER_SPEED;
            self.facing = 1;
        } else {
            // Skid: decays toward zero, never snapped
            self.vel.x *= SKID_DECAY;
        }

        self.vel.y += GRAVITY;
        self.pos += self.vel;

        let ground_y = viewport.ground_y();
        if self.bottom() >= ground_y {
            self.pos.y = ground_y - PLAYER_HEIGHT;
            self.vel.y = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        // Platforms only catch a falling player. The landing window is
        // widened by velY so fast falls cannot skip a thin platform.
        if self.vel.y > 0.0 {
            for platform in platforms {
                let overlaps_x =
                    self.pos.x + PLAYER_WIDTH > platform.pos.x && self.pos.x < platform.right();
                let bottom = self.bottom();
                if overlaps_x
                    && bottom >= platform.pos.y
                    && bottom <= platform.pos.y + platform.height + self.vel.y
                {
                    self.pos.y = platform.pos.y - PLAYER_HEIGHT;
                    self.vel.y = 0.0;
                    self.on_ground = true;
                    break;
                }
            }
        }

        self.pos.x = self.pos.x.clamp(0.0, (viewport.width - PLAYER_WIDTH).max(0.0));
    }

    /// Jump if standing on something. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel.y = JUMP_FORCE;
        self.on_ground = false;
        true
    }
}

/// A collectible coin (touching one opens a coin puzzle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    /// Centre
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
    /// Bob animation phase, fixed at spawn
    pub bob_phase: f32,
}

impl Coin {
    pub fn new(x: f32, y: f32, bob_phase: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            radius: COIN_RADIUS,
            collected: false,
            bob_phase,
        }
    }

    pub fn update(&mut self) {
        self.pos.x -= SCROLL_SPEED;
    }

    /// Derived vertical offset of the bob animation at a frame
    pub fn bob_offset(&self, frame: u64) -> f32 {
        (frame as f32 * COIN_BOB_RATE + self.bob_phase).sin() * COIN_BOB_AMPLITUDE
    }

    /// Bounding square at the coin's bobbed position
    pub fn bounds(&self, frame: u64) -> Rect {
        let y = self.pos.y + self.bob_offset(frame);
        Rect::new(
            self.pos.x - self.radius,
            y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.radius < 0.0
    }

    /// Collected coins are inert and pruned on the next pass
    pub fn is_live(&self) -> bool {
        !self.collected
    }
}

/// Cosmetic obstacle subtypes. Physics never depends on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Log,
    Ice,
    Sandcastle,
    TrashCan,
    Cloud,
    Bee,
    Wolf,
    Snowball,
    PolarBear,
    Crab,
    Jellyfish,
    Taxi,
    Pigeon,
    Airplane,
    Co2,
    /// Fallback for unknown static names
    GenericStatic,
    /// Fallback for unknown dynamic names
    GenericDynamic,
}

impl ObstacleKind {
    /// Look up a theme subtype name
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "log" => Self::Log,
            "ice" => Self::Ice,
            "sandcastle" => Self::Sandcastle,
            "trashcan" => Self::TrashCan,
            "cloudObstacle" => Self::Cloud,
            "bee" => Self::Bee,
            "wolf" => Self::Wolf,
            "snowball" => Self::Snowball,
            "polarBear" => Self::PolarBear,
            "crab" => Self::Crab,
            "jellyfish" => Self::Jellyfish,
            "taxi" => Self::Taxi,
            "pigeon" => Self::Pigeon,
            "airplane" => Self::Airplane,
            "co2" => Self::Co2,
            _ => return None,
        })
    }

    /// Resolve a name, falling back to the generic subtype for the motion
    pub fn from_name_or_generic(name: &str, dynamic: bool) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown obstacle type '{}', using generic", name);
            if dynamic {
                Self::GenericDynamic
            } else {
                Self::GenericStatic
            }
        })
    }
}

/// How an obstacle moves besides scrolling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleMotion {
    Static,
    /// Vertical oscillation around `center_y`
    Oscillating {
        center_y: f32,
        /// +1 moving down, -1 moving up
        direction: f32,
        amplitude: f32,
    },
}

/// An obstacle (touching one opens an obstacle puzzle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub motion: ObstacleMotion,
    pub kind: ObstacleKind,
    pub hit: bool,
}

impl Obstacle {
    pub fn new_static(x: f32, y: f32, width: f32, height: f32, kind: ObstacleKind) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
            motion: ObstacleMotion::Static,
            kind,
            hit: false,
        }
    }

    pub fn new_dynamic(x: f32, y: f32, width: f32, height: f32, kind: ObstacleKind) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height,
            motion: ObstacleMotion::Oscillating {
                center_y: y,
                direction: 1.0,
                amplitude: OBSTACLE_BOB_RANGE,
            },
            kind,
            hit: false,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.motion, ObstacleMotion::Oscillating { .. })
    }

    pub fn update(&mut self) {
        self.pos.x -= SCROLL_SPEED;

        if let ObstacleMotion::Oscillating {
            center_y,
            ref mut direction,
            amplitude,
        } = self.motion
        {
            self.pos.y += *direction * OBSTACLE_BOB_SPEED;
            if self.pos.y <= center_y - amplitude || self.pos.y >= center_y + amplitude {
                *direction = -*direction;
            }
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.width < 0.0
    }

    /// Hit obstacles are inert and pruned on the next pass
    pub fn is_live(&self) -> bool {
        !self.hit
    }
}

/// A floating platform the player can land on from above
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
            height: PLATFORM_HEIGHT,
        }
    }

    pub fn update(&mut self) {
        self.pos.x -= SCROLL_SPEED;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Cosmetic background props
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecorationKind {
    Tree,
    Bush,
    Pine,
    Snowman,
    Palm,
    Umbrella,
    Building,
    Streetlamp,
    Sun,
    Cloud,
    /// Fallback for unknown names
    Generic,
}

impl DecorationKind {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "tree" => Self::Tree,
            "bush" => Self::Bush,
            "pine" => Self::Pine,
            "snowman" => Self::Snowman,
            "palm" => Self::Palm,
            "umbrella" => Self::Umbrella,
            "building" => Self::Building,
            "streetlamp" => Self::Streetlamp,
            "sun" => Self::Sun,
            "cloudDecoration" => Self::Cloud,
            _ => return None,
        })
    }

    pub fn from_name_or_generic(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown decoration type '{}', using generic", name);
            Self::Generic
        })
    }
}

/// Background prop, anchored to the ground line. Never collides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decoration {
    pub x: f32,
    pub kind: DecorationKind,
    /// Sway animation phase, fixed at spawn
    pub anim_phase: f32,
}

impl Decoration {
    pub fn new(x: f32, kind: DecorationKind, anim_phase: f32) -> Self {
        Self {
            x,
            kind,
            anim_phase,
        }
    }

    /// Parallax: half the world scroll
    pub fn update(&mut self) {
        self.x -= SCROLL_SPEED * PARALLAX_FACTOR;
    }

    pub fn is_off_screen(&self) -> bool {
        self.x < DECORATION_CULL_X
    }
}
