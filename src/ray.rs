use crate::map::{tile_index, Map, TileCode, TILE_SIZE};
use crate::player::{wrap_angle, Player};
use crate::surface::Color;
use crate::{HEIGHT, WIDTH};
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

pub const FOV: f32 = FRAC_PI_4;

/// nudges probes that move toward negative coordinates into the tile they are entering
const EDGE_NUDGE: f32 = 0.0001;

/// which family of grid lines a ray struck
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Face {
    /// a constant-y grid line
    Horizontal,
    /// a constant-x grid line
    Vertical,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RayHit {
    /// 0 when nothing was struck
    pub tile: TileCode,
    pub distance: f32,
}

impl RayHit {
    pub const MISS: RayHit = RayHit {
        tile: 0,
        distance: f32::INFINITY,
    };

    pub fn is_miss(&self) -> bool {
        self.distance == f32::INFINITY
    }
}

/// one projected column of the frame
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Sliver {
    pub column: usize,
    pub top: f32,
    pub bottom: f32,
    pub color: Color,
    pub tile: TileCode,
    pub face: Face,
    /// fisheye corrected
    pub distance: f32,
}

impl Sliver {
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

pub const FALLBACK: Color = Color::rgb(255, 0, 255);

/// wall colors by tile code; vertical faces are drawn brighter than horizontal ones
pub struct Palette {
    horizontal: [Color; 6],
    vertical: [Color; 6],
}

pub const PALETTE: Palette = Palette {
    horizontal: [
        FALLBACK,
        Color::rgb(150, 150, 0),
        Color::rgb(150, 0, 0),
        Color::rgb(0, 150, 0),
        Color::rgb(0, 0, 150),
        Color::rgb(150, 0, 150),
    ],
    vertical: [
        FALLBACK,
        Color::rgb(200, 200, 0),
        Color::rgb(200, 0, 0),
        Color::rgb(0, 200, 0),
        Color::rgb(0, 0, 200),
        Color::rgb(200, 0, 200),
    ],
};

impl Palette {
    pub fn color(&self, tile: TileCode, face: Face) -> Color {
        let table = match face {
            Face::Horizontal => &self.horizontal,
            Face::Vertical => &self.vertical,
        };
        match table.get(tile as usize) {
            Some(color) if tile != 0 => *color,
            _ => {
                if tile != 0 {
                    log::trace!("no palette entry for tile {tile}");
                }
                FALLBACK
            }
        }
    }
}

/// angle of the ray cast through `column`, sweeping `FOV` left to right
pub fn ray_angle(player_angle: f32, column: usize) -> f32 {
    let delta = FOV / WIDTH as f32;
    wrap_angle(player_angle - (WIDTH / 2) as f32 * delta + column as f32 * delta)
}

/// walk `ray` by `step` until it lands in a solid tile or `map.depth_of_field()` probes are spent
fn march(map: &Map, origin: Vec2, mut ray: Vec2, step: Vec2) -> RayHit {
    for _ in 0..map.depth_of_field() {
        // out of bounds probes keep going, the ray may still come back over the grid
        match map.tile_under(ray) {
            Some(tile) if tile != 0 => {
                return RayHit {
                    tile,
                    distance: ray.distance(origin),
                }
            }
            _ => ray += step,
        }
    }
    RayHit::MISS
}

/// nearest solid tile along the ray, looking only at horizontal grid lines
pub fn check_horizontal(map: &Map, origin: Vec2, angle: f32) -> RayHit {
    // parallel to the lines, will never cross one
    if angle == 0. || angle == PI {
        return RayHit::MISS;
    }

    let a_tan = -1. / angle.tan();
    let row = (tile_index(origin.y) as f32) * TILE_SIZE;
    let (ry, dy) = if angle > PI {
        // LOOKING UP
        (row - EDGE_NUDGE, -TILE_SIZE)
    } else {
        // LOOKING DOWN
        (row + TILE_SIZE, TILE_SIZE)
    };

    let ray = Vec2::new((origin.y - ry) * a_tan + origin.x, ry);
    let step = Vec2::new(-dy * a_tan, dy);
    march(map, origin, ray, step)
}

/// nearest solid tile along the ray, looking only at vertical grid lines
pub fn check_vertical(map: &Map, origin: Vec2, angle: f32) -> RayHit {
    // parallel to the lines, will never cross one
    if angle == FRAC_PI_2 || angle == 3. * FRAC_PI_2 {
        return RayHit::MISS;
    }

    let n_tan = -angle.tan();
    let col = (tile_index(origin.x) as f32) * TILE_SIZE;
    let (rx, dx) = if angle > FRAC_PI_2 && angle < 3. * FRAC_PI_2 {
        // LOOKING LEFT
        (col - EDGE_NUDGE, -TILE_SIZE)
    } else {
        // LOOKING RIGHT
        (col + TILE_SIZE, TILE_SIZE)
    };

    let ray = Vec2::new(rx, (origin.x - rx) * n_tan + origin.y);
    let step = Vec2::new(dx, -dx * n_tan);
    march(map, origin, ray, step)
}

/// wall height on screen for a fisheye corrected distance, capped at the screen height
pub fn project(distance: f32) -> f32 {
    (TILE_SIZE * HEIGHT as f32 / distance).min(HEIGHT as f32)
}

pub fn cast_ray(map: &Map, player: &Player, column: usize) -> Sliver {
    let angle = ray_angle(player.angle, column);

    let horizontal = check_horizontal(map, player.pos, angle);
    let vertical = check_vertical(map, player.pos, angle);

    // ties go to the horizontal line
    let (hit, face) = if vertical.distance < horizontal.distance {
        (vertical, Face::Vertical)
    } else {
        (horizontal, Face::Horizontal)
    };

    // correct fisheye by projecting onto the view direction
    let distance = hit.distance * wrap_angle(angle - player.angle).cos();
    let height = if hit.is_miss() { 0. } else { project(distance) };
    let top = HEIGHT as f32 / 2. - height / 2.;

    Sliver {
        column,
        top,
        bottom: top + height,
        color: PALETTE.color(hit.tile, face),
        tile: hit.tile,
        face,
        distance,
    }
}

/// cast one ray per screen column
pub fn cast_rays<'a>(map: &'a Map, player: &'a Player) -> impl Iterator<Item = Sliver> + 'a {
    (0..WIDTH).map(move |column| cast_ray(map, player, column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn open_map() -> Map {
        Map::from_rows(&[[0u8; 8]; 8]).unwrap()
    }

    #[test]
    fn center_column_looks_straight_ahead() {
        assert_eq!(ray_angle(0., WIDTH / 2), 0.);
        assert!((ray_angle(1., WIDTH / 2) - 1.).abs() < 1e-6);
        // leftmost column wraps below zero
        assert!((ray_angle(0., 0) - (TAU - FOV / 2.)).abs() < 1e-5);
    }

    #[test]
    fn facing_east_from_spawn_hits_east_wall() {
        let map = Map::default();
        let origin = Vec2::new(89., 87.);

        assert_eq!(check_horizontal(&map, origin, 0.), RayHit::MISS);
        let hit = check_vertical(&map, origin, 0.);
        assert_eq!(hit.tile, 1);
        assert!((hit.distance - 359.).abs() < 1e-3);

        let sliver = cast_ray(&map, &Player::new(origin, 0.), WIDTH / 2);
        assert_eq!(sliver.face, Face::Vertical);
        assert!((sliver.distance - 359.).abs() < 1e-3);
        assert_eq!(sliver.color, Color::rgb(200, 200, 0));
        let expected = 64. * 512. / 359.;
        assert!((sliver.height() - expected).abs() < 1e-2);
        assert!((sliver.top - (256. - expected / 2.)).abs() < 1e-2);
    }

    #[test]
    fn facing_south_uses_horizontal_lines() {
        let map = Map::default();
        let origin = Vec2::new(89., 87.);

        assert_eq!(check_vertical(&map, origin, FRAC_PI_2), RayHit::MISS);
        // (89, 87) is tile (1, 1); straight down passes (1, 2) .. (1, 6) then the south wall
        let hit = check_horizontal(&map, origin, FRAC_PI_2);
        assert_eq!(hit.tile, 1);
        assert!((hit.distance - (448. - 87.)).abs() < 1e-2);
    }

    #[test]
    fn looking_up_and_left_use_the_nudged_edge() {
        let map = Map::default();
        let origin = Vec2::new(96., 96.);

        let up = check_horizontal(&map, origin, 3. * FRAC_PI_2);
        assert_eq!(up.tile, 1);
        assert!((up.distance - 32.).abs() < 1e-2);

        let left = check_vertical(&map, origin, PI);
        assert_eq!(left.tile, 1);
        assert!((left.distance - 32.).abs() < 1e-2);
    }

    #[test]
    fn colored_tiles_are_reported() {
        let map = Map::default();
        // tile (2, 2) holds code 2, approach it from the east along row 2
        let hit = check_vertical(&map, Vec2::new(224., 160.), PI);
        assert_eq!(hit.tile, 2);
        assert!((hit.distance - (224. - 192.)).abs() < 1e-2);
    }

    #[test]
    fn degenerate_angles_miss() {
        let map = Map::default();
        let origin = Vec2::new(200., 200.);
        assert!(check_horizontal(&map, origin, 0.).is_miss());
        assert!(check_horizontal(&map, origin, PI).is_miss());
        assert!(check_vertical(&map, origin, FRAC_PI_2).is_miss());
        assert!(check_vertical(&map, origin, 3. * FRAC_PI_2).is_miss());
    }

    #[test]
    fn empty_map_never_hits() {
        let map = open_map();
        let origin = Vec2::new(256., 256.);
        for i in 0..64 {
            let angle = i as f32 * TAU / 64. + 0.01;
            assert_eq!(check_horizontal(&map, origin, angle), RayHit::MISS);
            assert_eq!(check_vertical(&map, origin, angle), RayHit::MISS);
        }

        let sliver = cast_ray(&map, &Player::new(origin, 1.), 100);
        assert_eq!(sliver.height(), 0.);
        assert_eq!(sliver.tile, 0);
        assert_eq!(sliver.color, FALLBACK);
    }

    #[test]
    fn probes_off_the_grid_keep_marching() {
        // standing outside the grid to the west, looking east back over it
        let map = Map::from_rows(&[[1, 0, 0, 0]]).unwrap();
        let hit = check_vertical(&map, Vec2::new(-100., 32.), 0.);
        assert_eq!(hit.tile, 1);
        assert!((hit.distance - 100.).abs() < 1e-3);
    }

    #[test]
    fn adjacent_wall_fills_the_column() {
        assert_eq!(project(64.), HEIGHT as f32);
        assert_eq!(project(1.), HEIGHT as f32);
        assert_eq!(project(128.), 256.);
        assert_eq!(project(f32::INFINITY), 0.);
    }

    #[test]
    fn palette_shades_vertical_faces_brighter() {
        for tile in 1..=5 {
            let h = PALETTE.color(tile, Face::Horizontal);
            let v = PALETTE.color(tile, Face::Vertical);
            assert!(v.r >= h.r && v.g >= h.g && v.b >= h.b);
            assert_ne!(v, h);
        }
        assert_eq!(PALETTE.color(0, Face::Vertical), FALLBACK);
        assert_eq!(PALETTE.color(9, Face::Horizontal), FALLBACK);
    }

    #[test]
    fn casting_is_deterministic() {
        let map = Map::default();
        let player = Player::new(Vec2::new(150., 300.), 2.3);
        let first = cast_rays(&map, &player).collect::<Vec<_>>();
        let second = cast_rays(&map, &player).collect::<Vec<_>>();
        assert_eq!(first.len(), WIDTH);
        assert_eq!(first, second);
        for (i, sliver) in first.iter().enumerate() {
            assert_eq!(sliver.column, i);
            assert!(sliver.height() > 0. && sliver.height() <= HEIGHT as f32);
        }
    }
}
