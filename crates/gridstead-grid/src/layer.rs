//! Bit-packed boolean occupancy storage with tile-decomposed range ops.

use gridstead_core::{CellPoint, CellRect};

/// Cells per tile along X; one word per X column.
const WORDS_PER_TILE: usize = 16;
/// Cells per tile along Y; one bit per Y row inside a word.
const BITS_PER_WORD: u32 = 32;

type Word = u32;

const FULL_WORD: Word = !0;

/// One cache line worth of cells: 16 words × 32 bits = a 16×32 cell tile.
///
/// Cell `(x, y)` inside a tile lives at bit `y` of word `x`.
#[derive(Clone, Copy)]
#[repr(align(64))]
struct Tile {
    words: [Word; WORDS_PER_TILE],
}

impl Tile {
    const EMPTY: Tile = Tile {
        words: [0; WORDS_PER_TILE],
    };

    /// Whether any cell in words `[from, to)` under `mask` equals `value`.
    fn contains(&self, from: usize, to: usize, mask: Word, value: bool) -> bool {
        debug_assert!(from <= to && to <= WORDS_PER_TILE);
        let expected = if value { 0 } else { FULL_WORD };
        self.words[from..to]
            .iter()
            .any(|&word| word & mask != expected & mask)
    }

    /// Set every cell in words `[from, to)` under `mask` to `value`.
    fn set(&mut self, from: usize, to: usize, mask: Word, value: bool) {
        debug_assert!(from <= to && to <= WORDS_PER_TILE);
        if value {
            for word in &mut self.words[from..to] {
                *word |= mask;
            }
        } else {
            for word in &mut self.words[from..to] {
                *word &= !mask;
            }
        }
    }

    fn fill(&mut self, value: bool) {
        self.words = if value {
            [FULL_WORD; WORDS_PER_TILE]
        } else {
            [0; WORDS_PER_TILE]
        };
    }
}

/// One boolean occupancy channel over a rectangular cell space.
///
/// Storage is a flat row-major array of 16×32-cell [`Tile`]s, so range
/// queries and updates cost O(tiles touched) rather than O(cells): a
/// rectangle decomposes into partial leading/trailing word ranges and bit
/// masks on its boundary tiles plus bulk-tested or bulk-filled interior
/// tiles. This is the hot path under building-placement checks and path
/// adjacency scans.
///
/// Coordinates are layer-local and unsigned: valid cells lie in
/// `[0, width) × [0, height)`. The owning [`GridArea`](crate::GridArea)
/// translates global coordinates before delegating. Out-of-range
/// coordinates are a caller bug, checked by `debug_assert!` only.
pub struct GridLayer {
    tiles: Vec<Tile>,
    /// Padded size in cells; X is a multiple of 16, Y a multiple of 32.
    width: u32,
    height: u32,
}

impl GridLayer {
    /// Create a zeroed layer covering at least `width × height` cells.
    ///
    /// The stored size is padded up to whole tiles (X to a multiple of 16,
    /// Y to a multiple of 32); the padding cells are ordinary valid cells
    /// that simply start unset.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.div_ceil(WORDS_PER_TILE as u32) * WORDS_PER_TILE as u32;
        let height = height.div_ceil(BITS_PER_WORD) * BITS_PER_WORD;
        let tile_count = (width as usize / WORDS_PER_TILE) * (height / BITS_PER_WORD) as usize;
        Self {
            tiles: vec![Tile::EMPTY; tile_count],
            width,
            height,
        }
    }

    /// Padded width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Padded height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read one cell.
    pub fn get(&self, coords: CellPoint) -> bool {
        self.check_coords(coords);
        let (tile, word, bit) = self.locate(coords);
        self.tiles[tile].words[word] & (1 << bit) != 0
    }

    /// Write one cell.
    pub fn set(&mut self, coords: CellPoint, value: bool) {
        self.check_coords(coords);
        let (tile, word, bit) = self.locate(coords);
        if value {
            self.tiles[tile].words[word] |= 1 << bit;
        } else {
            self.tiles[tile].words[word] &= !(1 << bit);
        }
    }

    /// Whether any cell inside `rect` equals `value`.
    ///
    /// An empty rect contains nothing and returns `false`.
    pub fn any_in_rect(&self, rect: &CellRect, value: bool) -> bool {
        if rect.is_empty() {
            return false;
        }
        self.check_rect(rect);
        let span = RectSpan::of(rect);
        for ty in span.tile_y_first..=span.tile_y_last {
            let mask = span.mask_for(ty);
            let row = ty as usize * self.tiles_per_row();
            for tx in span.tile_x_first..=span.tile_x_last {
                let (from, to) = span.words_for(tx);
                if self.tiles[row + tx as usize].contains(from, to, mask, value) {
                    return true;
                }
            }
        }
        false
    }

    /// Set every cell inside `rect` to `value`.
    ///
    /// An empty rect is a no-op. Tiles fully covered by the rect are
    /// bulk-filled.
    pub fn set_rect(&mut self, rect: &CellRect, value: bool) {
        if rect.is_empty() {
            return;
        }
        self.check_rect(rect);
        let span = RectSpan::of(rect);
        let tiles_per_row = self.tiles_per_row();
        for ty in span.tile_y_first..=span.tile_y_last {
            let mask = span.mask_for(ty);
            let row = ty as usize * tiles_per_row;
            for tx in span.tile_x_first..=span.tile_x_last {
                let (from, to) = span.words_for(tx);
                let tile = &mut self.tiles[row + tx as usize];
                if mask == FULL_WORD && from == 0 && to == WORDS_PER_TILE {
                    tile.fill(value);
                } else {
                    tile.set(from, to, mask, value);
                }
            }
        }
    }

    fn tiles_per_row(&self) -> usize {
        self.width as usize / WORDS_PER_TILE
    }

    fn locate(&self, coords: CellPoint) -> (usize, usize, u32) {
        let x = coords.x as u32;
        let y = coords.y as u32;
        let tile_x = x as usize / WORDS_PER_TILE;
        let tile_y = (y / BITS_PER_WORD) as usize;
        let tile = tile_y * self.tiles_per_row() + tile_x;
        (tile, x as usize % WORDS_PER_TILE, y % BITS_PER_WORD)
    }

    fn check_coords(&self, coords: CellPoint) {
        debug_assert!(
            coords.x >= 0
                && coords.y >= 0
                && (coords.x as u32) < self.width
                && (coords.y as u32) < self.height,
            "layer coords {coords} out of range [0, {})x[0, {})",
            self.width,
            self.height,
        );
    }

    fn check_rect(&self, rect: &CellRect) {
        self.check_coords(rect.min);
        self.check_coords(rect.max - CellPoint::new(1, 1));
    }
}

/// Precomputed tile decomposition of one non-empty rect.
struct RectSpan {
    tile_x_first: u32,
    tile_x_last: u32,
    tile_y_first: u32,
    tile_y_last: u32,
    /// Word range inside the first X tile.
    start_word: usize,
    /// Word range end inside the last X tile.
    end_word: usize,
    /// Bit mask inside the first Y tile.
    start_mask: Word,
    /// Bit mask inside the last Y tile.
    end_mask: Word,
}

impl RectSpan {
    fn of(rect: &CellRect) -> Self {
        let min_x = rect.min.x as u32;
        let min_y = rect.min.y as u32;
        let max_x = rect.max.x as u32;
        let max_y = rect.max.y as u32;
        Self {
            tile_x_first: min_x / WORDS_PER_TILE as u32,
            tile_x_last: (max_x - 1) / WORDS_PER_TILE as u32,
            tile_y_first: min_y / BITS_PER_WORD,
            tile_y_last: (max_y - 1) / BITS_PER_WORD,
            start_word: min_x as usize % WORDS_PER_TILE,
            end_word: (max_x as usize - 1) % WORDS_PER_TILE + 1,
            start_mask: FULL_WORD << (min_y % BITS_PER_WORD),
            // max_y on a word boundary covers the last word fully.
            end_mask: FULL_WORD >> ((BITS_PER_WORD - (max_y % BITS_PER_WORD)) % BITS_PER_WORD),
        }
    }

    /// Bit mask for the given Y tile row.
    fn mask_for(&self, tile_y: u32) -> Word {
        let mut mask = FULL_WORD;
        if tile_y == self.tile_y_first {
            mask &= self.start_mask;
        }
        if tile_y == self.tile_y_last {
            mask &= self.end_mask;
        }
        mask
    }

    /// Word range for the given X tile column.
    fn words_for(&self, tile_x: u32) -> (usize, usize) {
        let from = if tile_x == self.tile_x_first {
            self.start_word
        } else {
            0
        };
        let to = if tile_x == self.tile_x_last {
            self.end_word
        } else {
            WORDS_PER_TILE
        };
        (from, to)
    }
}
