use crate::map::Map;
use glam::Vec2;
use std::f32::consts::TAU;

/// world units travelled per frame while a movement key is held
pub const SPEED: f32 = 3.;
/// radians turned per pixel of horizontal pointer travel
pub const MOUSE_SENSITIVITY: f32 = 4. / 1024.;
/// collision is probed this many steps ahead of the actual move
const PROBE: f32 = 2.;

const SPAWN: Vec2 = Vec2::new(89., 87.);

/// bring an angle back into `[0, 2π)` by at most one full turn
pub fn wrap_angle(mut angle: f32) -> f32 {
    if angle < 0. {
        angle += TAU;
    }
    // a tiny negative angle can round up to exactly TAU above
    if angle >= TAU {
        angle -= TAU;
    }
    angle
}

/// everything the player reacts to during one frame
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct InputSnapshot {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub exit: bool,
    /// pressed this frame, not held
    pub toggle_minimap: bool,
    /// absolute pointer x under captured cursor mode
    pub cursor_x: i32,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub angle: f32,
    /// heading scaled by `SPEED`, refreshed on every `advance`
    pub step: Vec2,
    mouse_x: Option<i32>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(SPAWN, 0.)
    }
}

impl Player {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        let angle = wrap_angle(angle);
        Self {
            pos,
            angle,
            step: Vec2::from_angle(angle) * SPEED,
            mouse_x: None,
        }
    }

    /// move by `delta` if the spot `PROBE` deltas away is open
    fn try_step(&mut self, map: &Map, delta: Vec2) {
        if !map.is_blocked(self.pos + delta * PROBE) {
            self.pos += delta;
        }
    }

    /// apply one frame of input, returning the new pose
    pub fn advance(&self, map: &Map, input: &InputSnapshot) -> Self {
        let mut next = *self;
        let step = self.step;

        if input.forward {
            next.try_step(map, step);
        }
        if input.back {
            next.try_step(map, -step);
        }
        if input.strafe_left {
            next.try_step(map, -step.perp());
        }
        if input.strafe_right {
            next.try_step(map, step.perp());
        }

        // the first sample only sets the baseline
        let last_x = self.mouse_x.unwrap_or(input.cursor_x);
        next.mouse_x = Some(input.cursor_x);
        let turn = (last_x - input.cursor_x) as f32 * MOUSE_SENSITIVITY;
        next.angle = wrap_angle(next.angle - turn);

        next.step = Vec2::from_angle(next.angle) * SPEED;
        next
    }
}
