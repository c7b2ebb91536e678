//! Scene assembly
//!
//! Turns a [`GameState`] into one triangle list in world coordinates. Pure
//! CPU work so it can be tested without a GPU.

use glam::Vec2;

use super::shapes;
use super::vertex::{Palette, Vertex, with_alpha};
use crate::consts::SIM_HZ;
use crate::settings::Settings;
use crate::sim::{Bubble, GamePhase, GameState, Pipe};

/// Height of the rounded cap drawn where a coral segment meets the gap
const CAP_HEIGHT: f32 = 10.0;
/// Seaweed sway period in seconds
const SWAY_PERIOD: f32 = 3.0;
const SWAY_AMPLITUDE: f32 = 3.0;

/// Build every vertex for the current frame, back to front
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let palette = if settings.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::ocean()
    };
    let segments = settings.quality.circle_segments();

    let mut vertices = Vec::with_capacity(4096);
    vertices.extend(background(state, &palette));

    let max_bubbles = settings.max_bubbles();
    for bubble in state.bubbles.iter().take(max_bubbles) {
        vertices.extend(bubble_shape(bubble, &palette, segments));
    }

    for pipe in &state.pipes {
        vertices.extend(pipe_shape(state, pipe, &palette, segments));
    }

    let sway = if settings.reduced_motion {
        0.0
    } else {
        let t = state.time_ticks as f32 / SIM_HZ as f32;
        (t * std::f32::consts::TAU / SWAY_PERIOD).sin() * SWAY_AMPLITUDE
    };
    vertices.extend(sea_floor(state, &palette, segments, sway));

    // The crab only appears once a run has started
    if state.phase != GamePhase::Idle {
        let tilt = settings.effective_tilt(state.crab.rotation_degrees());
        vertices.extend(crab_shape(state, &palette, segments, tilt));
    }

    vertices
}

fn background(state: &GameState, palette: &Palette) -> Vec<Vertex> {
    let w = state.world.width;
    let h = state.world.height;
    let mid = h / 2.0;

    let mut vertices =
        shapes::gradient_rect(Vec2::ZERO, Vec2::new(w, mid), palette.water_top, palette.water_mid);
    vertices.extend(shapes::gradient_rect(
        Vec2::new(0.0, mid),
        Vec2::new(w, h),
        palette.water_mid,
        palette.water_bottom,
    ));

    // Light shafts fading out toward the floor
    if palette.light_ray[3] > 0.0 {
        let fade = with_alpha(palette.light_ray, 0.0);
        for (fx, width) in [(0.15, 30.0), (0.45, 50.0), (0.75, 25.0)] {
            let x = w * fx;
            vertices.extend(shapes::skewed_rect(
                Vec2::new(x, 0.0),
                Vec2::new(x + width, h * 0.7),
                width,
                palette.light_ray,
                fade,
            ));
        }
    }

    vertices
}

fn bubble_shape(bubble: &Bubble, palette: &Palette, segments: u32) -> Vec<Vertex> {
    let radius = bubble.size / 2.0;
    let center = bubble.pos + Vec2::splat(radius);
    let opacity = bubble.opacity.clamp(0.0, 1.0);

    let mut vertices = shapes::circle(
        center,
        radius,
        with_alpha(palette.bubble, opacity * 0.15),
        segments,
    );
    vertices.extend(shapes::ring(
        center,
        (radius - 1.5).max(0.0),
        radius,
        with_alpha(palette.bubble, opacity * 0.6),
        segments,
    ));
    vertices
}

/// Coral columns above and below the gap
fn pipe_shape(state: &GameState, pipe: &Pipe, palette: &Palette, segments: u32) -> Vec<Vertex> {
    let tuning = &state.tuning;
    let inset = tuning.pipe_hitbox_inset;
    let left = pipe.x + inset;
    let right = pipe.x + tuning.pipe_width - inset;
    let center_x = pipe.x + tuning.pipe_width / 2.0;
    let cap_radii = Vec2::new(tuning.pipe_width / 2.0, CAP_HEIGHT);
    let gap_bottom = pipe.gap_bottom(tuning.pipe_gap);

    let mut vertices = Vec::new();

    // Top segment hangs from the ceiling
    vertices.extend(shapes::rect(
        Vec2::new(left, 0.0),
        Vec2::new(right, pipe.gap_top),
        palette.coral_top,
    ));
    vertices.extend(shapes::rect(
        Vec2::new(left + 6.0, 0.0),
        Vec2::new(left + 14.0, pipe.gap_top),
        palette.coral_top_light,
    ));
    vertices.extend(shapes::ellipse(
        Vec2::new(center_x, pipe.gap_top),
        cap_radii,
        palette.coral_top_light,
        segments,
    ));

    // Bottom segment runs down behind the floor
    vertices.extend(shapes::rect(
        Vec2::new(left, gap_bottom),
        Vec2::new(right, state.world.height),
        palette.coral_bottom,
    ));
    vertices.extend(shapes::rect(
        Vec2::new(left + 6.0, gap_bottom),
        Vec2::new(left + 14.0, state.world.height),
        palette.coral_bottom_light,
    ));
    vertices.extend(shapes::ellipse(
        Vec2::new(center_x, gap_bottom),
        cap_radii,
        palette.coral_bottom_light,
        segments,
    ));

    vertices
}

fn sea_floor(state: &GameState, palette: &Palette, segments: u32, sway: f32) -> Vec<Vertex> {
    let w = state.world.width;
    let floor_y = state.floor_y();

    let mut vertices = shapes::gradient_rect(
        Vec2::new(0.0, floor_y),
        Vec2::new(w, state.world.height),
        palette.sand_top,
        palette.sand_bottom,
    );

    for (fx, radii) in [(0.3, Vec2::new(18.0, 9.0)), (0.65, Vec2::new(12.0, 7.0))] {
        vertices.extend(shapes::ellipse(
            Vec2::new(w * fx, floor_y + 4.0),
            radii,
            palette.rock,
            segments,
        ));
    }

    for (i, fx) in [0.1, 0.45, 0.85].into_iter().enumerate() {
        let base = Vec2::new(w * fx, floor_y + 2.0);
        let height = 30.0 + i as f32 * 8.0;
        // Alternate the phase so the strands don't move in lockstep
        let lean = if i % 2 == 0 { sway } else { -sway };
        let mut prev = base;
        for k in 1..=3 {
            let t = k as f32 / 3.0;
            let next = Vec2::new(base.x + lean * t * 2.0, base.y - height * t);
            vertices.extend(shapes::line(prev, next, 4.0 * (1.2 - t * 0.5), palette.seaweed));
            prev = next;
        }
    }

    vertices
}

/// The crab drawn in a 60x50 design box scaled to the crab's square hitbox
fn crab_shape(state: &GameState, palette: &Palette, segments: u32, tilt_deg: f32) -> Vec<Vertex> {
    let size = state.tuning.crab_size;
    let origin = Vec2::new(state.crab_x(), state.crab.y);
    let scale = Vec2::new(size / 60.0, size / 50.0);
    let at = |x: f32, y: f32| origin + Vec2::new(x, y) * scale;
    let radii = |rx: f32, ry: f32| Vec2::new(rx, ry) * scale;

    let mut vertices = Vec::new();

    // Legs
    for (a, b) in [
        ((15.0, 36.0), (4.0, 46.0)),
        ((20.0, 39.0), (12.0, 49.0)),
        ((40.0, 39.0), (48.0, 49.0)),
        ((45.0, 36.0), (56.0, 46.0)),
    ] {
        vertices.extend(shapes::line(
            at(a.0, a.1),
            at(b.0, b.1),
            3.0 * scale.x,
            palette.crab_shell,
        ));
    }

    // Claws
    for (x, tip_x) in [(8.0, 4.0), (52.0, 56.0)] {
        vertices.extend(shapes::ellipse(at(x, 25.0), radii(7.0, 6.0), palette.crab_shell, segments));
        vertices.extend(shapes::ellipse(
            at(tip_x, 18.0),
            radii(4.0, 3.0),
            palette.crab_shell_mid,
            segments,
        ));
    }

    // Shell, layered for shading
    vertices.extend(shapes::ellipse(at(30.0, 30.0), radii(22.0, 14.0), palette.crab_shell, segments));
    vertices.extend(shapes::ellipse(
        at(30.0, 28.0),
        radii(17.0, 10.0),
        palette.crab_shell_mid,
        segments,
    ));
    vertices.extend(shapes::ellipse(
        at(30.0, 26.0),
        radii(10.0, 6.0),
        palette.crab_shell_light,
        segments,
    ));

    // Eye stalks
    for (base_x, top_x) in [(25.0, 22.0), (35.0, 38.0)] {
        vertices.extend(shapes::line(
            at(base_x, 20.0),
            at(top_x, 11.0),
            3.0 * scale.x,
            palette.crab_shell,
        ));
        vertices.extend(shapes::circle(at(top_x, 9.0), 4.0 * scale.x, palette.crab_eye, segments));
        vertices.extend(shapes::circle(
            at(top_x + 1.0, 8.0),
            2.0 * scale.x,
            palette.crab_pupil,
            segments,
        ));
    }

    let pivot = origin + Vec2::splat(size / 2.0);
    shapes::rotate(&mut vertices, pivot, tilt_deg.to_radians());
    vertices
}
