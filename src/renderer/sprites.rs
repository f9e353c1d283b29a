//! Cosmetic painters
//!
//! Each obstacle/decoration subtype maps to a plain painter function through
//! a lookup table. Physics never sees any of this; unknown subtypes resolve
//! to the generic painters.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::shapes::{circle, ellipse, gradient_rect, line, rect, ring, sector, triangle};
use super::vertex::{Vertex, colors};
use crate::consts::GROUND_TOP_HEIGHT;
use crate::sim::{DecorationKind, ObstacleKind, Rect, Viewport};
use crate::theme::{Palette, Rgba, Theme, rgb, with_alpha};

/// Everything a painter may read besides the entity itself
#[derive(Debug, Clone, Copy)]
pub struct PaintCtx {
    pub theme: Theme,
    pub palette: Palette,
    pub frame: u64,
    pub viewport: Viewport,
}

impl PaintCtx {
    pub fn new(theme: Theme, frame: u64, viewport: Viewport) -> Self {
        Self {
            theme,
            palette: theme.palette(),
            frame,
            viewport,
        }
    }

    #[inline]
    fn t(&self) -> f32 {
        self.frame as f32
    }
}

pub type ObstaclePainter = fn(&mut Vec<Vertex>, &Rect, &PaintCtx);
/// Decoration painters get the anchor x and the per-instance phase
pub type DecorationPainter = fn(&mut Vec<Vertex>, f32, f32, &PaintCtx);

const OBSTACLE_PAINTERS: &[(ObstacleKind, ObstaclePainter)] = &[
    (ObstacleKind::Log, paint_log),
    (ObstacleKind::Ice, paint_ice),
    (ObstacleKind::Sandcastle, paint_sandcastle),
    (ObstacleKind::TrashCan, paint_trash_can),
    (ObstacleKind::Cloud, paint_storm_cloud),
    (ObstacleKind::Bee, paint_bee),
    (ObstacleKind::Wolf, paint_wolf),
    (ObstacleKind::Snowball, paint_snowball),
    (ObstacleKind::PolarBear, paint_polar_bear),
    (ObstacleKind::Crab, paint_crab),
    (ObstacleKind::Jellyfish, paint_jellyfish),
    (ObstacleKind::Taxi, paint_taxi),
    (ObstacleKind::Pigeon, paint_pigeon),
    (ObstacleKind::Airplane, paint_airplane),
    (ObstacleKind::Co2, paint_smog),
    (ObstacleKind::GenericStatic, paint_generic_static),
    (ObstacleKind::GenericDynamic, paint_generic_dynamic),
];

const DECORATION_PAINTERS: &[(DecorationKind, DecorationPainter)] = &[
    (DecorationKind::Tree, paint_tree),
    (DecorationKind::Bush, paint_bush),
    (DecorationKind::Pine, paint_pine),
    (DecorationKind::Snowman, paint_snowman),
    (DecorationKind::Palm, paint_palm),
    (DecorationKind::Umbrella, paint_umbrella),
    (DecorationKind::Building, paint_building),
    (DecorationKind::Streetlamp, paint_streetlamp),
    (DecorationKind::Sun, paint_sun),
    (DecorationKind::Cloud, paint_cloud),
    (DecorationKind::Generic, paint_shrub),
];

pub fn obstacle_painter(kind: ObstacleKind) -> ObstaclePainter {
    OBSTACLE_PAINTERS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, painter)| *painter)
        .unwrap_or(paint_generic_static)
}

pub fn decoration_painter(kind: DecorationKind) -> DecorationPainter {
    DECORATION_PAINTERS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, painter)| *painter)
        .unwrap_or(paint_shrub)
}

// ============================================================================
// Fixed elements
// ============================================================================

/// Sky gradient plus the two-tone ground band
pub fn paint_background(out: &mut Vec<Vertex>, ctx: &PaintCtx) {
    let Viewport { width, height } = ctx.viewport;
    let ground_y = ctx.viewport.ground_y();
    let [top, bottom] = ctx.palette.sky;
    out.extend(gradient_rect(0.0, 0.0, width, height, top, bottom));
    out.extend(rect(0.0, ground_y, width, GROUND_TOP_HEIGHT, ctx.palette.ground_top));
    out.extend(rect(
        0.0,
        ground_y + GROUND_TOP_HEIGHT,
        width,
        height - ground_y - GROUND_TOP_HEIGHT,
        ctx.palette.ground,
    ));
}

pub fn paint_platform(out: &mut Vec<Vertex>, r: &Rect, ctx: &PaintCtx) {
    const TOP: f32 = 8.0;
    out.extend(rect(r.x, r.y, r.width, TOP, ctx.palette.platform_top));
    out.extend(rect(r.x, r.y + TOP, r.width, r.height - TOP, ctx.palette.platform_bottom));
    out.extend(rect(r.x, r.y, r.width, 1.0, colors::HIGHLIGHT));

    match ctx.theme {
        Theme::Forest => {
            let tuft = rgb(0x2D8A2D);
            let mut i = 0.0;
            while i < r.width {
                out.extend(triangle(
                    Vec2::new(r.x + i + 5.0, r.y),
                    Vec2::new(r.x + i + 8.0, r.y - 6.0),
                    Vec2::new(r.x + i + 11.0, r.y),
                    tuft,
                ));
                i += 15.0;
            }
        }
        Theme::Snow => out.extend(rect(r.x, r.y - 3.0, r.width, 5.0, colors::WHITE)),
        _ => {}
    }
}

pub fn paint_coin(out: &mut Vec<Vertex>, center: Vec2, radius: f32, ctx: &PaintCtx) {
    out.extend(circle(center, radius + 5.0, colors::COIN_GLOW, 24));
    out.extend(circle(center, radius, colors::COIN_RIM, 24));
    out.extend(circle(center, radius - 2.0, ctx.palette.coin, 24));
    // Stylised "$"
    out.extend(ring(center, 3.0, 5.5, colors::COIN_MARK, 12));
    out.extend(rect(center.x - 1.0, center.y - 8.0, 2.0, 16.0, colors::COIN_MARK));
}

pub fn paint_player(out: &mut Vec<Vertex>, r: &Rect, facing: i8, walking: bool, ctx: &PaintCtx) {
    out.extend(rect(r.x, r.y, r.width, r.height, ctx.palette.player));

    let eye_x = if facing > 0 { r.x + 25.0 } else { r.x + 8.0 };
    out.extend(rect(eye_x, r.y + 10.0, 8.0, 8.0, colors::WHITE));
    let pupil_x = if facing > 0 { eye_x + 4.0 } else { eye_x };
    out.extend(rect(pupil_x, r.y + 12.0, 4.0, 4.0, colors::BLACK));

    let stride = if walking {
        (ctx.t() * 0.3).sin() * 5.0
    } else {
        0.0
    };
    let feet = r.bottom();
    out.extend(rect(r.x + 5.0, feet, 10.0, 10.0 + stride, colors::PLAYER_LEGS));
    out.extend(rect(r.x + 25.0, feet, 10.0, 10.0 - stride, colors::PLAYER_LEGS));
}

// ============================================================================
// Static obstacles
// ============================================================================

fn paint_log(out: &mut Vec<Vertex>, r: &Rect, _ctx: &PaintCtx) {
    let c = r.center();
    out.extend(ellipse(c, r.width / 2.0 + 1.5, r.height / 2.0 + 1.5, rgb(0x3D2817), 24));
    out.extend(ellipse(c, r.width / 2.0, r.height / 2.0, rgb(0x654321), 24));
    let grain = rgb(0x8B4513);
    out.extend(ring(Vec2::new(r.x + r.width * 0.3, c.y), 4.0, 5.0, grain, 12));
    out.extend(ring(Vec2::new(r.x + r.width * 0.7, c.y), 3.0, 4.0, grain, 12));
}

fn paint_ice(out: &mut Vec<Vertex>, r: &Rect, _ctx: &PaintCtx) {
    out.extend(rect(r.x - 1.0, r.y - 1.0, r.width + 2.0, r.height + 2.0, [0.39, 0.58, 0.93, 0.8]));
    out.extend(rect(r.x, r.y, r.width, r.height, [0.53, 0.81, 0.98, 0.8]));
    out.extend(triangle(
        Vec2::new(r.x + 5.0, r.y + 5.0),
        Vec2::new(r.x + 15.0, r.y + 5.0),
        Vec2::new(r.x + 5.0, r.y + 20.0),
        [1.0, 1.0, 1.0, 0.6],
    ));
}

fn paint_sandcastle(out: &mut Vec<Vertex>, r: &Rect, _ctx: &PaintCtx) {
    let sand = rgb(0xDEB887);
    out.extend(rect(r.x, r.y + r.height * 0.4, r.width, r.height * 0.6, sand));
    out.extend(rect(r.x, r.y, r.width * 0.3, r.height * 0.5, sand));
    out.extend(rect(r.x + r.width * 0.7, r.y, r.width * 0.3, r.height * 0.5, sand));
    for left in [r.x, r.x + r.width * 0.7] {
        out.extend(triangle(
            Vec2::new(left, r.y),
            Vec2::new(left + r.width * 0.15, r.y - 10.0),
            Vec2::new(left + r.width * 0.3, r.y),
            sand,
        ));
    }
    out.extend(rect(
        r.x + r.width * 0.4,
        r.y + r.height * 0.6,
        r.width * 0.2,
        r.height * 0.4,
        rgb(0x8B7355),
    ));
}

fn paint_trash_can(out: &mut Vec<Vertex>, r: &Rect, _ctx: &PaintCtx) {
    out.extend(rect(r.x + 2.0, r.y + 6.0, r.width - 4.0, r.height - 6.0, rgb(0x718096)));
    out.extend(rect(r.x, r.y, r.width, 6.0, rgb(0x4A5568)));
    out.extend(rect(r.x + r.width / 2.0 - 4.0, r.y - 3.0, 8.0, 3.0, rgb(0x4A5568)));
    let rib = rgb(0x5A6578);
    for i in 1..4 {
        let x = r.x + r.width * i as f32 / 4.0;
        out.extend(rect(x - 1.0, r.y + 10.0, 2.0, r.height - 14.0, rib));
    }
}

fn paint_storm_cloud(out: &mut Vec<Vertex>, r: &Rect, _ctx: &PaintCtx) {
    let c = r.center();
    let body = rgb(0xB0C4DE);
    out.extend(ellipse(c, r.width / 2.0, r.height / 2.5, body, 20));
    out.extend(circle(Vec2::new(r.x + r.width * 0.3, c.y - 5.0), r.height / 3.0, body, 16));
    out.extend(circle(Vec2::new(r.x + r.width * 0.65, c.y - 8.0), r.height / 2.5, body, 16));
    out.extend(circle(Vec2::new(r.x + r.width * 0.6, c.y - 10.0), r.height / 6.0, rgb(0xF0F8FF), 12));
}

fn paint_generic_static(out: &mut Vec<Vertex>, r: &Rect, ctx: &PaintCtx) {
    let [body, cap] = ctx.palette.obstacle_static;
    out.extend(rect(r.x, r.y, r.width, r.height, body));
    out.extend(rect(r.x, r.y, r.width, 10.0_f32.min(r.height), cap));
}

// ============================================================================
// Dynamic obstacles
// ============================================================================

fn paint_bee(out: &mut Vec<Vertex>, r: &Rect, ctx: &PaintCtx) {
    let c = r.center();
    let flap = (ctx.t() * 0.5).sin() * 5.0;
    let wing = [0.78, 0.9, 1.0, 0.7];
    out.extend(ellipse(Vec2::new(c.x - 5.0, r.y + flap), 10.0, 6.0, wing, 16));
    out.extend(ellipse(Vec2::new(c.x + 5.0, r.y - flap), 10.0, 6.0, wing, 16));
    out.extend(ellipse(c, r.width / 2.0, r.height / 2.5, rgb(0xFFD700), 24));
    out.extend(rect(c.x - 5.0, c.y - r.height / 3.0, 4.0, r.height / 1.5, colors::BLACK));
    out.extend(rect(c.x + 3.0, c.y - r.height / 3.0, 4.0, r.height / 1.5, colors::BLACK));
    out.extend(triangle(
        Vec2::new(r.right(), c.y - 3.0),
        Vec2::new(r.right() + 8.0, c.y),
        Vec2::new(r.right(), c.y + 3.0),
        colors::PLAYER_LEGS,
    ));
    let eye = rgb(0xFF0000);
    out.extend(circle(Vec2::new(c.x - 6.0, c.y - 3.0), 3.0, eye, 8));
    out.extend(circle(Vec2::new(c.x + 6.0, c.y - 3.0), 3.0, eye, 8));
}

fn paint_wolf(out: &mut Vec<Vertex>, r: &Rect, ctx: &PaintCtx) {
    let c = r.center();
    let bob = (ctx.t() * 0.2).sin() * 3.0;
    let stride = (ctx.t() * 0.3).sin() * 8.0;
    let fur = rgb(0x555555);
    let cy = c.y + bob;

    out.extend(line(
        Vec2::new(c.x - 10.0, c.y + r.height / 3.0),
        Vec2::new(c.x - 10.0 + stride, c.y + r.height / 2.0 + 10.0),
        4.0,
        fur,
    ));
    out.extend(line(
        Vec2::new(c.x + 10.0, c.y + r.height / 3.0),
        Vec2::new(c.x + 10.0 - stride, c.y + r.height / 2.0 + 10.0),
        4.0,
        fur,
    ));
    out.extend(line(
        Vec2::new(r.right(), cy),
        Vec2::new(r.right() + 20.0, cy - 20.0),
        5.0,
        fur,
    ));
    out.extend(ellipse(Vec2::new(c.x, cy), r.width / 2.0 + 5.0, r.height / 2.5, fur, 24));
    out.extend(ellipse(Vec2::new(r.x - 5.0, cy), 15.0, 12.0, fur, 16));
    out.extend(ellipse(Vec2::new(r.x - 18.0, cy + 3.0), 8.0, 6.0, fur, 12));
    out.extend(triangle(
        Vec2::new(r.x - 10.0, cy - 10.0),
        Vec2::new(r.x - 5.0, cy - 22.0),
        Vec2::new(r.x, cy - 10.0),
        fur,
    ));
    out.extend(circle(Vec2::new(r.x - 8.0, cy - 3.0), 3.0, rgb(0xFFFF00), 8));
    out.extend(circle(Vec2::new(r.x - 8.0, cy - 3.0), 1.5, colors::BLACK, 6));
}

fn paint_snowball(out: &mut Vec<Vertex>, r: &Rect, ctx: &PaintCtx) {
    let c = r.center();
    let roll = ctx.t() * 0.1;
    out.extend(circle(c, r.width / 2.0, rgb(0xFFFAFA), 24));
    out.extend(circle(c + Vec2::splat(3.0), r.width / 2.0 - 2.0, [0.59, 0.71, 0.78, 0.3], 24));
    for i in 0..4 {
        let angle = roll + i as f32 * PI / 2.0;
        let spot = c + Vec2::new(angle.cos() * r.width / 4.0, angle.sin() * r.height / 4.0);
        out.extend(circle(spot, 4.0, [0.78, 0.86, 0.94, 0.5], 8));
    }
}

fn paint_polar_bear(out: &mut Vec<Vertex>, r: &Rect, ctx: &PaintCtx) {
    let c = r.center();
    let sway = (ctx.t() * 0.1).sin() * 2.0;
    let fur = rgb(0xF5F5F5);
    let cy = c.y + sway;
    out.extend(ellipse(Vec2::new(c.x, cy), r.width / 2.0, r.height / 2.5, fur, 24));
    out.extend(circle(Vec2::new(r.x - 2.0, cy - 6.0), 12.0, fur, 16));
    out.extend(circle(Vec2::new(r.x - 8.0, cy - 16.0), 4.0, fur, 8));
    out.extend(circle(Vec2::new(r.x + 4.0, cy - 16.0), 4.0, fur, 8));
    out.extend(circle(Vec2::new(r.x - 6.0, cy - 8.0), 2.0, colors::BLACK, 6));
    out.extend(circle(Vec2::new(r.x - 13.0, cy - 3.0), 2.5, colors::BLACK, 6));
}

fn paint_crab(out: &mut Vec<Vertex>, r: &Rect, ctx: &PaintCtx) {
    let c = r.center();
    let shell = rgb(0xFF6347);
    let pinch = (ctx.t() * 0.3).sin().abs() * 4.0;
    for side in [-1.0f32, 1.0] {
        for k in 0..3 {
            let hip = Vec2::new(c.x + side * (6.0 + k as f32 * 5.0), c.y + 4.0);
            out.extend(line(hip, hip + Vec2::new(side * 8.0, 12.0), 2.0, shell));
        }
        let claw = Vec2::new(c.x + side * (r.width / 2.0 + 6.0), c.y - 8.0);
        out.extend(circle(claw, 7.0, shell, 12));
        out.extend(triangle(
            claw + Vec2::new(side * 2.0, -2.0),
            claw + Vec2::new(side * 9.0, -4.0 - pinch),
            claw + Vec2::new(side * 9.0, pinch),
            rgb(0xC0392B),
        ));
    }
    out.extend(ellipse(c, r.width / 2.0, r.height / 3.0, shell, 24));
    for dx in [-6.0, 6.0] {
        let stalk = Vec2::new(c.x + dx, c.y - r.height / 3.0);
        out.extend(line(stalk, stalk - Vec2::new(0.0, 8.0), 2.0, shell));
        out.extend(circle(stalk - Vec2::new(0.0, 9.0), 3.0, colors::WHITE, 8));
        out.extend(circle(stalk - Vec2::new(0.0, 9.0), 1.5, colors::BLACK, 6));
    }
}

fn paint_jellyfish(out: &mut Vec<Vertex>, r: &Rect, ctx: &PaintCtx) {
    let c = r.center();
    let tentacle = [1.0, 0.41, 0.71, 0.6];
    for i in 0..5 {
        let x = r.x + 6.0 + i as f32 * (r.width - 12.0) / 4.0;
        let mut prev = Vec2::new(x, c.y);
        for seg in 1..=4 {
            let y = c.y + seg as f32 * 5.0;
            let sway = (ctx.t() * 0.15 + seg as f32 + i as f32).sin() * 3.0;
            let next = Vec2::new(x + sway, y);
            out.extend(line(prev, next, 2.0, tentacle));
            prev = next;
        }
    }
    out.extend(sector(c, r.width / 2.0, r.height / 2.0, PI, TAU, [1.0, 0.71, 0.76, 0.85], 20));
    out.extend(circle(Vec2::new(c.x - 6.0, c.y - 8.0), 3.0, [1.0, 1.0, 1.0, 0.5], 8));
}

fn paint_taxi(out: &mut Vec<Vertex>, r: &Rect, _ctx: &PaintCtx) {
    let yellow = rgb(0xF6E05E);
    let glass = rgb(0x90CDF4);
    out.extend(rect(r.x - 6.0, r.y + r.height * 0.4, r.width + 12.0, r.height * 0.4, yellow));
    out.extend(rect(r.x + 4.0, r.y + r.height * 0.1, r.width - 8.0, r.height * 0.32, yellow));
    out.extend(rect(r.x + 7.0, r.y + r.height * 0.15, r.width / 2.0 - 9.0, r.height * 0.22, glass));
    out.extend(rect(r.x + r.width / 2.0 + 2.0, r.y + r.height * 0.15, r.width / 2.0 - 9.0, r.height * 0.22, glass));
    out.extend(rect(r.x + r.width / 2.0 - 6.0, r.y + r.height * 0.02, 12.0, 5.0, colors::BLACK));
    for x in [r.x + 4.0, r.right() - 4.0] {
        out.extend(circle(Vec2::new(x, r.y + r.height * 0.82), 6.0, colors::BLACK, 12));
        out.extend(circle(Vec2::new(x, r.y + r.height * 0.82), 2.5, rgb(0xA0AEC0), 8));
    }
}

fn paint_pigeon(out: &mut Vec<Vertex>, r: &Rect, ctx: &PaintCtx) {
    let c = r.center();
    let flap = (ctx.t() * 0.4).sin() * 6.0;
    let grey = rgb(0x808A96);
    out.extend(ellipse(c, r.width / 2.2, r.height / 3.5, grey, 20));
    out.extend(ellipse(Vec2::new(c.x + 2.0, c.y - 6.0 + flap), 12.0, 5.0, rgb(0x6B7280), 16));
    let head = Vec2::new(r.x + 4.0, c.y - 8.0);
    out.extend(circle(head, 7.0, rgb(0x4A5568), 12));
    out.extend(triangle(
        head + Vec2::new(-6.0, -1.0),
        head + Vec2::new(-12.0, 2.0),
        head + Vec2::new(-6.0, 3.0),
        rgb(0xED8936),
    ));
    out.extend(circle(head + Vec2::new(-2.0, -2.0), 1.5, rgb(0xF56565), 6));
}

fn paint_airplane(out: &mut Vec<Vertex>, r: &Rect, _ctx: &PaintCtx) {
    let c = r.center();
    let hull = rgb(0xE2E8F0);
    let trim = rgb(0x3182CE);
    out.extend(triangle(
        Vec2::new(c.x + 2.0, c.y),
        Vec2::new(c.x + 14.0, c.y + 14.0),
        Vec2::new(c.x + 10.0, c.y),
        trim,
    ));
    out.extend(ellipse(c, r.width / 2.0 + 8.0, r.height / 5.0, hull, 24));
    out.extend(triangle(
        Vec2::new(r.right(), c.y),
        Vec2::new(r.right() + 8.0, c.y - 14.0),
        Vec2::new(r.right() + 8.0, c.y),
        trim,
    ));
    for i in 0..4 {
        out.extend(circle(Vec2::new(r.x + 4.0 + i as f32 * 7.0, c.y - 2.0), 1.8, trim, 6));
    }
}

fn paint_smog(out: &mut Vec<Vertex>, r: &Rect, ctx: &PaintCtx) {
    let c = r.center();
    let churn = ctx.t() * 0.05;
    for i in 0..5 {
        let angle = churn + i as f32 * TAU / 5.0;
        let puff = c + Vec2::new(angle.cos(), angle.sin()) * (r.width / 4.0);
        out.extend(circle(puff, r.width / 4.0, [0.41, 0.41, 0.41, 0.8], 12));
    }
    out.extend(circle(c, r.width / 3.0, rgb(0x4A4A4A), 16));
}

fn paint_generic_dynamic(out: &mut Vec<Vertex>, r: &Rect, ctx: &PaintCtx) {
    let c = r.center();
    out.extend(circle(c, r.width / 2.0, ctx.palette.obstacle_dynamic, 24));
    out.extend(circle(Vec2::new(c.x - 7.0, c.y - 4.0), 4.0, colors::WHITE, 8));
    out.extend(circle(Vec2::new(c.x + 7.0, c.y - 4.0), 4.0, colors::WHITE, 8));
    out.extend(circle(Vec2::new(c.x - 7.0, c.y - 4.0), 2.0, colors::BLACK, 6));
    out.extend(circle(Vec2::new(c.x + 7.0, c.y - 4.0), 2.0, colors::BLACK, 6));
}

// ============================================================================
// Decorations (anchored to the ground line)
// ============================================================================

fn paint_tree(out: &mut Vec<Vertex>, x: f32, _phase: f32, ctx: &PaintCtx) {
    let g = ctx.viewport.ground_y();
    out.extend(rect(x - 10.0, g - 80.0, 20.0, 80.0, rgb(0x5D4037)));
    out.extend(circle(Vec2::new(x, g - 100.0), 40.0, rgb(0x2E7D32), 24));
    let leaves = rgb(0x388E3C);
    out.extend(circle(Vec2::new(x - 20.0, g - 80.0), 25.0, leaves, 20));
    out.extend(circle(Vec2::new(x + 20.0, g - 80.0), 25.0, leaves, 20));
}

fn paint_bush(out: &mut Vec<Vertex>, x: f32, _phase: f32, ctx: &PaintCtx) {
    let g = ctx.viewport.ground_y();
    out.extend(circle(Vec2::new(x, g - 15.0), 20.0, rgb(0x388E3C), 20));
    let dark = rgb(0x2E7D32);
    out.extend(circle(Vec2::new(x - 12.0, g - 10.0), 12.0, dark, 16));
    out.extend(circle(Vec2::new(x + 12.0, g - 10.0), 12.0, dark, 16));
}

fn paint_pine(out: &mut Vec<Vertex>, x: f32, _phase: f32, ctx: &PaintCtx) {
    let g = ctx.viewport.ground_y();
    out.extend(rect(x - 8.0, g - 60.0, 16.0, 60.0, rgb(0x5D4037)));
    let needles = rgb(0x1B5E20);
    for (i, half) in [40.0, 32.0, 24.0].into_iter().enumerate() {
        let base = g - 40.0 - i as f32 * 30.0;
        let apex = Vec2::new(x, base - 45.0);
        out.extend(triangle(Vec2::new(x - half, base), apex, Vec2::new(x + half, base), needles));
        out.extend(triangle(
            apex + Vec2::new(-half * 0.3, 14.0),
            apex,
            apex + Vec2::new(half * 0.3, 14.0),
            colors::WHITE,
        ));
    }
}

fn paint_snowman(out: &mut Vec<Vertex>, x: f32, _phase: f32, ctx: &PaintCtx) {
    let g = ctx.viewport.ground_y();
    out.extend(circle(Vec2::new(x, g - 25.0), 25.0, colors::WHITE, 24));
    out.extend(circle(Vec2::new(x, g - 60.0), 18.0, colors::WHITE, 20));
    out.extend(circle(Vec2::new(x, g - 85.0), 12.0, colors::WHITE, 16));
    out.extend(circle(Vec2::new(x - 4.0, g - 88.0), 2.0, colors::BLACK, 6));
    out.extend(circle(Vec2::new(x + 4.0, g - 88.0), 2.0, colors::BLACK, 6));
    out.extend(triangle(
        Vec2::new(x, g - 86.0),
        Vec2::new(x + 12.0, g - 84.0),
        Vec2::new(x, g - 82.0),
        rgb(0xFF9800),
    ));
    for dy in [52.0, 62.0] {
        out.extend(circle(Vec2::new(x, g - dy), 2.0, colors::BLACK, 6));
    }
}

fn paint_palm(out: &mut Vec<Vertex>, x: f32, phase: f32, ctx: &PaintCtx) {
    let g = ctx.viewport.ground_y();
    let sway = (ctx.t() * 0.02 + phase).sin() * 4.0;
    let bark = rgb(0x8D6E63);
    let mut prev = Vec2::new(x, g);
    for seg in 1..=6 {
        let t = seg as f32 / 6.0;
        let next = Vec2::new(x + t * t * (12.0 + sway), g - t * 110.0);
        out.extend(line(prev, next, 10.0 - t * 3.0, bark));
        prev = next;
    }
    let frond = rgb(0x4CAF50);
    for i in 0..5 {
        let angle = PI + 0.2 + i as f32 * (PI - 0.4) / 4.0;
        let dir = Vec2::new(angle.cos(), angle.sin() * 0.5 + 0.35);
        out.extend(ellipse(prev + dir * 28.0, 30.0, 7.0, frond, 16));
    }
}

fn paint_umbrella(out: &mut Vec<Vertex>, x: f32, _phase: f32, ctx: &PaintCtx) {
    let g = ctx.viewport.ground_y();
    out.extend(line(Vec2::new(x, g), Vec2::new(x, g - 80.0), 3.0, rgb(0x8D6E63)));
    let canopy = Vec2::new(x, g - 80.0);
    out.extend(sector(canopy, 40.0, 40.0, PI, TAU, rgb(0xE91E63), 24));
    out.extend(sector(canopy, 40.0, 40.0, PI + 0.5, PI + 1.0, colors::WHITE, 6));
    out.extend(sector(canopy, 40.0, 40.0, TAU - 0.5, TAU, colors::WHITE, 6));
}

fn paint_building(out: &mut Vec<Vertex>, x: f32, phase: f32, ctx: &PaintCtx) {
    let g = ctx.viewport.ground_y();
    // Size derives from the spawn phase so each building keeps its shape
    let unit = phase / TAU;
    let width = 60.0 + unit * 30.0;
    let height = 120.0 + unit * 80.0;
    let left = x - width / 2.0;
    let top = g - height;

    out.extend(rect(left, top, width, height, rgb(0x2D3748)));
    out.extend(rect(left, top, 5.0, height, rgb(0x4A5568)));

    let window = 8.0;
    let mut row = 0;
    let mut wy = top + 12.0;
    while wy + window < g - 10.0 {
        let mut col = 0;
        let mut wx = left + 12.0;
        while wx + window < left + width - 6.0 {
            let lit = (row * 7 + col * 3 + (phase * 10.0) as i32) % 3 != 0;
            let color = if lit { rgb(0xF6E05E) } else { rgb(0x1A202C) };
            out.extend(rect(wx, wy, window, window, color));
            wx += window + 8.0;
            col += 1;
        }
        wy += window + 10.0;
        row += 1;
    }
    out.extend(rect(left - 2.0, top - 5.0, width + 4.0, 8.0, rgb(0x1A202C)));
}

fn paint_streetlamp(out: &mut Vec<Vertex>, x: f32, _phase: f32, ctx: &PaintCtx) {
    let g = ctx.viewport.ground_y();
    let iron = rgb(0x1A202C);
    out.extend(rect(x - 3.0, g - 90.0, 6.0, 90.0, iron));
    out.extend(line(Vec2::new(x, g - 88.0), Vec2::new(x + 25.0, g - 70.0), 4.0, iron));
    out.extend(rect(x + 17.0, g - 70.0, 16.0, 8.0, rgb(0x2D3748)));
    out.extend(circle(Vec2::new(x + 25.0, g - 55.0), 25.0, [0.96, 0.88, 0.37, 0.3], 20));
    out.extend(circle(Vec2::new(x + 25.0, g - 62.0), 5.0, rgb(0xF6E05E), 12));
    out.extend(rect(x - 8.0, g - 5.0, 16.0, 5.0, iron));
}

fn paint_sun(out: &mut Vec<Vertex>, x: f32, phase: f32, ctx: &PaintCtx) {
    let y = (ctx.viewport.ground_y() - 320.0).max(70.0);
    let c = Vec2::new(x, y);
    let pulse = (ctx.t() * 0.05 + phase).sin() * 5.0;
    out.extend(circle(c, 60.0 + pulse, with_alpha(rgb(0xFFD700), 0.2), 32));
    out.extend(circle(c, 35.0, rgb(0xFFD700), 28));
    out.extend(circle(c - Vec2::splat(10.0), 12.0, rgb(0xFFF8DC), 16));
}

fn paint_cloud(out: &mut Vec<Vertex>, x: f32, phase: f32, ctx: &PaintCtx) {
    let y = 60.0 + (phase / TAU) * 80.0;
    let drift = (ctx.t() * 0.01 + phase).sin() * 10.0;
    let puff = [1.0, 1.0, 1.0, 0.9];
    let cx = x + drift;
    out.extend(circle(Vec2::new(cx, y), 25.0, puff, 20));
    out.extend(circle(Vec2::new(cx + 25.0, y + 5.0), 20.0, puff, 16));
    out.extend(circle(Vec2::new(cx - 20.0, y + 5.0), 18.0, puff, 16));
    out.extend(circle(Vec2::new(cx + 10.0, y - 10.0), 15.0, puff, 16));
    out.extend(circle(Vec2::new(cx - 5.0, y - 5.0), 10.0, colors::WHITE, 12));
}

fn paint_shrub(out: &mut Vec<Vertex>, x: f32, _phase: f32, ctx: &PaintCtx) {
    let g = ctx.viewport.ground_y();
    let leaf: Rgba = ctx.palette.ground_top;
    out.extend(circle(Vec2::new(x, g - 12.0), 16.0, leaf, 16));
    out.extend(circle(Vec2::new(x - 10.0, g - 6.0), 10.0, leaf, 12));
    out.extend(circle(Vec2::new(x + 10.0, g - 6.0), 10.0, leaf, 12));
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OBSTACLES: [ObstacleKind; 17] = [
        ObstacleKind::Log,
        ObstacleKind::Ice,
        ObstacleKind::Sandcastle,
        ObstacleKind::TrashCan,
        ObstacleKind::Cloud,
        ObstacleKind::Bee,
        ObstacleKind::Wolf,
        ObstacleKind::Snowball,
        ObstacleKind::PolarBear,
        ObstacleKind::Crab,
        ObstacleKind::Jellyfish,
        ObstacleKind::Taxi,
        ObstacleKind::Pigeon,
        ObstacleKind::Airplane,
        ObstacleKind::Co2,
        ObstacleKind::GenericStatic,
        ObstacleKind::GenericDynamic,
    ];

    const ALL_DECORATIONS: [DecorationKind; 11] = [
        DecorationKind::Tree,
        DecorationKind::Bush,
        DecorationKind::Pine,
        DecorationKind::Snowman,
        DecorationKind::Palm,
        DecorationKind::Umbrella,
        DecorationKind::Building,
        DecorationKind::Streetlamp,
        DecorationKind::Sun,
        DecorationKind::Cloud,
        DecorationKind::Generic,
    ];

    fn ctx(theme: Theme) -> PaintCtx {
        PaintCtx::new(theme, 37, Viewport::new(800.0, 600.0))
    }

    #[test]
    fn test_every_subtype_has_a_painter() {
        assert_eq!(OBSTACLE_PAINTERS.len(), ALL_OBSTACLES.len());
        assert_eq!(DECORATION_PAINTERS.len(), ALL_DECORATIONS.len());
        for kind in ALL_OBSTACLES {
            assert!(OBSTACLE_PAINTERS.iter().any(|(k, _)| *k == kind), "{kind:?}");
        }
        for kind in ALL_DECORATIONS {
            assert!(DECORATION_PAINTERS.iter().any(|(k, _)| *k == kind), "{kind:?}");
        }
    }

    #[test]
    fn test_painters_emit_whole_triangles() {
        let bounds = Rect::new(300.0, 400.0, 40.0, 40.0);
        for theme in Theme::ALL {
            let ctx = ctx(theme);
            for kind in ALL_OBSTACLES {
                let mut out = Vec::new();
                obstacle_painter(kind)(&mut out, &bounds, &ctx);
                assert!(!out.is_empty(), "{kind:?}");
                assert_eq!(out.len() % 3, 0, "{kind:?}");
            }
            for kind in ALL_DECORATIONS {
                let mut out = Vec::new();
                decoration_painter(kind)(&mut out, 400.0, 1.0, &ctx);
                assert!(!out.is_empty(), "{kind:?}");
                assert_eq!(out.len() % 3, 0, "{kind:?}");
            }
        }
    }

    #[test]
    fn test_generic_static_uses_palette() {
        let ctx = ctx(Theme::City);
        let mut out = Vec::new();
        obstacle_painter(ObstacleKind::GenericStatic)(&mut out, &Rect::new(0.0, 0.0, 40.0, 40.0), &ctx);
        assert_eq!(out[0].color, ctx.palette.obstacle_static[0]);
    }

    #[test]
    fn test_background_spans_viewport() {
        let ctx = ctx(Theme::Beach);
        let mut out = Vec::new();
        paint_background(&mut out, &ctx);
        let max_y = out.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        let max_x = out.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert_eq!((max_x, max_y), (800.0, 600.0));
        assert_eq!(out[0].color, ctx.palette.sky[0]);
    }

    #[test]
    fn test_player_eye_follows_facing() {
        let ctx = ctx(Theme::Forest);
        let body = Rect::new(100.0, 100.0, 40.0, 50.0);
        let mut right = Vec::new();
        paint_player(&mut right, &body, 1, false, &ctx);
        let mut left = Vec::new();
        paint_player(&mut left, &body, -1, false, &ctx);
        // Second quad is the eye
        assert_eq!(right[6].position[0], 125.0);
        assert_eq!(left[6].position[0], 108.0);
    }
}
