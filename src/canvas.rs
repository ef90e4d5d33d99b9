use crate::StringToAnyhow;
use glam::Vec2;
use gridcast::surface::{Color, Surface};
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;

/// draws the core's primitives onto an sdl2 canvas
pub(crate) struct Screen {
    pub canvas: Canvas<Window>,
}

fn sdl_color(color: Color) -> sdl2::pixels::Color {
    sdl2::pixels::Color::RGBA(color.r, color.g, color.b, color.a)
}

fn point(v: Vec2) -> Point {
    Point::new(v.x.round() as i32, v.y.round() as i32)
}

impl Surface for Screen {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) -> anyhow::Result<()> {
        if w <= 0. || h <= 0. {
            return Ok(());
        }
        self.canvas.set_draw_color(sdl_color(color));
        self.canvas
            .fill_rect(Rect::new(x as i32, y as i32, w as u32, h as u32))
            .ah()
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) -> anyhow::Result<()> {
        self.canvas.set_draw_color(sdl_color(color));
        // one horizontal span per row
        let r = radius.round() as i32;
        for dy in -r..=r {
            let half = ((radius * radius) - (dy * dy) as f32).max(0.).sqrt();
            let row = y + dy as f32;
            self.canvas
                .draw_line(
                    point(Vec2::new(x - half, row)),
                    point(Vec2::new(x + half, row)),
                )
                .ah()?;
        }
        Ok(())
    }

    fn stroke_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    ) -> anyhow::Result<()> {
        self.canvas.set_draw_color(sdl_color(color));
        let (from, to) = (Vec2::new(x1, y1), Vec2::new(x2, y2));

        // thick lines are parallel 1px lines spread along the normal
        let normal = (to - from).normalize_or_zero().perp();
        let count = width.round().max(1.) as i32;
        for i in 0..count {
            let offset = normal * (i as f32 - (count - 1) as f32 / 2.);
            self.canvas
                .draw_line(point(from + offset), point(to + offset))
                .ah()?;
        }
        Ok(())
    }
}
