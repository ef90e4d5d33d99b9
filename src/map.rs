use glam::Vec2;

pub type TileCode = u8;

pub const TILE_SIZE: f32 = 64.;

const LEVEL: [[TileCode; 8]; 8] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 2, 0, 3, 3, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 4, 0, 1],
    [1, 0, 5, 0, 0, 4, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
];

/// convert a world coordinate into a tile index
///
/// truncates toward zero first, then floors the division, so `-0.5` still lands in tile 0
pub fn tile_index(coord: f32) -> i32 {
    (coord as i32).div_euclid(TILE_SIZE as i32)
}

#[derive(Clone, PartialEq, Debug)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    tiles: Vec<TileCode>,
}

impl Default for Map {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            tiles: LEVEL.iter().flatten().copied().collect(),
        }
    }
}

impl Map {
    /// build a map from rows of tile codes, every row must have the same length
    pub fn from_rows<R: AsRef<[TileCode]>>(rows: &[R]) -> anyhow::Result<Self> {
        let width = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        if width == 0 {
            anyhow::bail!("map must have at least one tile");
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                anyhow::bail!("row {y} has {} tiles, expected {width}", row.len());
            }
            tiles.extend_from_slice(row);
        }

        Ok(Self {
            width,
            height: rows.len(),
            tiles,
        })
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Option<TileCode> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        self.tiles.get(y as usize * self.width + x as usize).copied()
    }

    /// tile under a world position, `None` outside the grid
    pub fn tile_under(&self, position: Vec2) -> Option<TileCode> {
        self.tile_at(tile_index(position.x), tile_index(position.y))
    }

    /// solid tile under `position`; the world past the grid edge is open
    pub fn is_blocked(&self, position: Vec2) -> bool {
        self.tile_under(position).is_some_and(|tile| tile != 0)
    }

    /// how many grid lines a ray may cross before giving up
    pub fn depth_of_field(&self) -> usize {
        self.width.max(self.height)
    }

    pub fn idx_to_vec(&self, idx: usize) -> Vec2 {
        let x = idx % self.width;
        let y = idx / self.width;
        Vec2::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE)
    }

    /// iterate over every tile with the world position of its top-left corner
    pub fn tiles(&self) -> impl Iterator<Item = (Vec2, TileCode)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(idx, tile)| (self.idx_to_vec(idx), *tile))
    }
}
