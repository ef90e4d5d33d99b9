use crate::map::{Map, TILE_SIZE};
use crate::player::{InputSnapshot, Player};
use crate::ray::{cast_rays, Sliver};
use crate::surface::{Color, Surface};
use crate::{HEIGHT, WIDTH};
use std::ops::ControlFlow;

const BACKGROUND: Color = Color::rgb(50, 50, 50);
const PLAYER_RADIUS: f32 = 10.;
/// length of the minimap heading line, in steps
const HEADING_LENGTH: f32 = 5.;

pub struct Game {
    map: Map,
    player: Player,
    pub show_minimap: bool,
    slices: Vec<Sliver>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Map::default(), Player::default())
    }
}

impl Game {
    pub fn new(map: Map, player: Player) -> Self {
        Self {
            map,
            player,
            show_minimap: false,
            slices: Vec::with_capacity(WIDTH),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    /// slivers from the most recent `draw`
    pub fn slices(&self) -> &[Sliver] {
        &self.slices
    }

    /// run one tick of simulation, `Break` asks the driver to shut down
    pub fn update(&mut self, input: &InputSnapshot) -> ControlFlow<()> {
        if input.exit {
            log::debug!("exit requested");
            return ControlFlow::Break(());
        }

        if input.toggle_minimap {
            self.show_minimap = !self.show_minimap;
            log::debug!("minimap {}", if self.show_minimap { "on" } else { "off" });
        }

        self.player = self.player.advance(&self.map, input);
        ControlFlow::Continue(())
    }

    pub fn draw(&mut self, surface: &mut impl Surface) -> anyhow::Result<()> {
        surface.fill_rect(0., 0., WIDTH as f32, HEIGHT as f32, BACKGROUND)?;

        // TODO: hand the iterator straight to the surface instead of buffering slivers
        self.slices.clear();
        self.slices.extend(cast_rays(&self.map, &self.player));

        // DRAW WALLS
        for slice in self.slices.iter() {
            if slice.height() <= 0. {
                continue;
            }
            let x = slice.column as f32;
            surface.stroke_line(x, slice.top, x, slice.bottom, 1., slice.color)?;
        }

        if self.show_minimap {
            self.draw_minimap(surface)?;
        }

        Ok(())
    }

    /// top-down view of the grid with the player and their heading
    fn draw_minimap(&self, surface: &mut impl Surface) -> anyhow::Result<()> {
        let scale = (HEIGHT as f32 / (self.map.height as f32 * TILE_SIZE))
            .min(WIDTH as f32 / (self.map.width as f32 * TILE_SIZE));
        let tile = TILE_SIZE * scale;

        for (corner, code) in self.map.tiles() {
            let color = if code == 0 { Color::BLACK } else { Color::WHITE };
            let corner = corner * scale;
            surface.fill_rect(corner.x + 1., corner.y + 1., tile - 1., tile - 1., color)?;
        }

        let pos = self.player.pos * scale;
        let tip = (self.player.pos + self.player.step * HEADING_LENGTH) * scale;
        surface.fill_circle(pos.x, pos.y, PLAYER_RADIUS * scale, Color::RED)?;
        surface.stroke_line(pos.x, pos.y, tip.x, tip.y, 2., Color::RED)?;

        Ok(())
    }
}
