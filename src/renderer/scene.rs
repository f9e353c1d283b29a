//! Draw list construction
//!
//! Turns a `World` snapshot into an ordered list of things to draw, back to
//! front. Runs every frame, frozen or not, and never mutates the world.

use glam::Vec2;

use super::sprites::{self, PaintCtx};
use super::vertex::Vertex;
use crate::sim::{DecorationKind, ObstacleKind, Rect, World};

/// Minimum |velX| for the walk cycle
const WALK_THRESHOLD: f32 = 0.5;

/// One drawable, already resolved to screen geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawItem {
    Background,
    Decoration {
        kind: DecorationKind,
        x: f32,
        phase: f32,
    },
    Platform(Rect),
    Coin {
        center: Vec2,
        radius: f32,
    },
    Obstacle {
        kind: ObstacleKind,
        bounds: Rect,
    },
    Player {
        bounds: Rect,
        facing: i8,
        walking: bool,
    },
}

impl DrawItem {
    /// Paint order; lower draws first
    pub fn layer(&self) -> u8 {
        match self {
            DrawItem::Background => 0,
            DrawItem::Decoration { .. } => 1,
            DrawItem::Platform(_) => 2,
            DrawItem::Coin { .. } => 3,
            DrawItem::Obstacle { .. } => 4,
            DrawItem::Player { .. } => 5,
        }
    }
}

/// Build the frame's draw list. Collected coins and hit obstacles are skipped.
pub fn build(world: &World) -> Vec<DrawItem> {
    let frame = world.frame_count;
    let mut items = Vec::with_capacity(
        2 + world.decorations.len()
            + world.platforms.len()
            + world.coins.len()
            + world.obstacles.len(),
    );

    items.push(DrawItem::Background);

    items.extend(world.decorations.iter().map(|d| DrawItem::Decoration {
        kind: d.kind,
        x: d.x,
        phase: d.anim_phase,
    }));

    items.extend(world.platforms.iter().map(|p| DrawItem::Platform(p.bounds())));

    items.extend(world.coins.iter().filter(|c| c.is_live()).map(|c| {
        DrawItem::Coin {
            center: Vec2::new(c.pos.x, c.pos.y + c.bob_offset(frame)),
            radius: c.radius,
        }
    }));

    items.extend(
        world
            .obstacles
            .iter()
            .filter(|o| o.is_live())
            .map(|o| DrawItem::Obstacle {
                kind: o.kind,
                bounds: o.bounds(),
            }),
    );

    let player = &world.player;
    items.push(DrawItem::Player {
        bounds: player.bounds(),
        facing: player.facing,
        walking: player.on_ground && player.vel.x.abs() > WALK_THRESHOLD,
    });

    items
}

/// Tessellate a draw list into one triangle list
pub fn tessellate(items: &[DrawItem], ctx: &PaintCtx) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(items.len() * 96);
    for item in items {
        match item {
            DrawItem::Background => sprites::paint_background(&mut out, ctx),
            DrawItem::Decoration { kind, x, phase } => {
                sprites::decoration_painter(*kind)(&mut out, *x, *phase, ctx)
            }
            DrawItem::Platform(bounds) => sprites::paint_platform(&mut out, bounds, ctx),
            DrawItem::Coin { center, radius } => sprites::paint_coin(&mut out, *center, *radius, ctx),
            DrawItem::Obstacle { kind, bounds } => {
                sprites::obstacle_painter(*kind)(&mut out, bounds, ctx)
            }
            DrawItem::Player {
                bounds,
                facing,
                walking,
            } => sprites::paint_player(&mut out, bounds, *facing, *walking, ctx),
        }
    }
    out
}

/// Whole-frame convenience: build and tessellate
pub fn frame_vertices(world: &World) -> Vec<Vertex> {
    let ctx = PaintCtx::new(world.theme(), world.frame_count, world.viewport);
    tessellate(&build(world), &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{
        Coin, Decoration, Obstacle, Platform, RunConfig, TickInput, Viewport, tick,
    };

    fn populated_world() -> World {
        let mut world = World::new(RunConfig::default(), Viewport::new(800.0, 600.0), 5);
        world.decorations.push(Decoration::new(500.0, DecorationKind::Tree, 0.0));
        world.platforms.push(Platform::new(400.0, 300.0, 100.0));
        world.coins.push(Coin::new(450.0, 270.0, 0.0));
        world
            .obstacles
            .push(Obstacle::new_static(600.0, 490.0, 40.0, 30.0, ObstacleKind::Log));
        world
    }

    #[test]
    fn test_back_to_front_order() {
        let items = build(&populated_world());
        let layers: Vec<u8> = items.iter().map(DrawItem::layer).collect();
        assert_eq!(layers, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_terminal_entities_are_not_drawn() {
        let mut world = populated_world();
        world.coins[0].collected = true;
        world.obstacles[0].hit = true;
        let items = build(&world);
        assert!(!items.iter().any(|i| matches!(i, DrawItem::Coin { .. })));
        assert!(!items.iter().any(|i| matches!(i, DrawItem::Obstacle { .. })));
    }

    #[test]
    fn test_coin_drawn_at_bobbed_position() {
        let mut world = populated_world();
        world.frame_count = 12;
        let offset = world.coins[0].bob_offset(12);
        let coin = build(&world)
            .into_iter()
            .find(|i| matches!(i, DrawItem::Coin { .. }));
        match coin {
            Some(DrawItem::Coin { center, radius }) => {
                assert_eq!(center, Vec2::new(450.0, 270.0 + offset));
                assert_eq!(radius, 15.0);
            }
            other => panic!("expected a coin, got {other:?}"),
        }
    }

    #[test]
    fn test_render_does_not_depend_on_phase() {
        let mut world = populated_world();
        let running = frame_vertices(&world);
        world.pause();
        tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(frame_vertices(&world), running);
    }

    #[test]
    fn test_tessellation_is_triangles() {
        let vertices = frame_vertices(&populated_world());
        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 3, 0);
    }
}
