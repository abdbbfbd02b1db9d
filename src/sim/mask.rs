//! Pixel-mask footprints for collision
//!
//! Every sprite carries a silhouette mask and overlap tests are
//! mask-accurate: two footprints collide only where opaque pixels of both
//! land on the same cell after translating by their relative offset. The
//! silhouettes are irregular, so a bounding-box test would register hits
//! through the transparent margins.

use std::sync::OnceLock;

use glam::Vec2;

/// Per-pixel collision silhouette. One `u64` bitset per row, bit `i` set
/// means the pixel in column `i` is opaque. Sprites are at most 64 px wide.
#[derive(Debug, Clone)]
pub struct SpriteMask {
    width: u32,
    height: u32,
    rows: Vec<u64>,
}

impl SpriteMask {
    /// Build a mask from rows of `#` (opaque) and `.` (transparent).
    fn from_art(art: &[&str]) -> Self {
        let width = art.first().map_or(0, |row| row.len()) as u32;
        assert!(width > 0 && width <= 64, "sprite art must be 1..=64 px wide");
        let rows = art
            .iter()
            .map(|row| {
                assert_eq!(row.len() as u32, width, "ragged sprite art");
                row.bytes()
                    .enumerate()
                    .fold(0u64, |bits, (i, b)| if b == b'#' { bits | (1 << i) } else { bits })
            })
            .collect::<Vec<_>>();
        Self { width, height: rows.len() as u32, rows }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel-level overlap test. `offset` is the other mask's origin
    /// relative to this mask's origin, in whole pixels.
    pub fn overlaps(&self, other: &SpriteMask, offset_x: i32, offset_y: i32) -> bool {
        // Shifting a u64 by 64+ is not defined; at that distance the
        // footprints cannot intersect anyway.
        if offset_x.unsigned_abs() >= 64 {
            return false;
        }
        for (y, &bits) in self.rows.iter().enumerate() {
            let other_y = y as i64 - offset_y as i64;
            if other_y < 0 || other_y >= other.height as i64 {
                continue;
            }
            let other_bits = other.rows[other_y as usize];
            let shifted = if offset_x >= 0 {
                other_bits << offset_x
            } else {
                other_bits >> -offset_x
            };
            if bits & shifted != 0 {
                return true;
            }
        }
        false
    }
}

/// Overlap test between two positioned sprites. Positions are the sprite
/// top-left corners in playfield coordinates; sub-pixel positions round to
/// the nearest cell.
pub fn sprites_overlap(a: SpriteKind, a_pos: Vec2, b: SpriteKind, b_pos: Vec2) -> bool {
    let offset = b_pos - a_pos;
    a.mask().overlaps(
        b.mask(),
        offset.x.round() as i32,
        offset.y.round() as i32,
    )
}

/// Built-in sprite identifiers. The same id selects both the render image
/// and the collision footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    PlayerShip,
    RedShip,
    GreenShip,
    BlueShip,
    PlayerLaser,
    RedLaser,
    GreenLaser,
    BlueLaser,
}

const PLAYER_SHIP_ART: &[&str] = &[
    ".......#.......",
    "......###......",
    "......###......",
    ".....#####.....",
    "....#######....",
    "...#########...",
    "..##.#####.##..",
    ".###.#####.###.",
    ".##..#####..##.",
    ".#....#.#....#.",
];

const RED_SHIP_ART: &[&str] = &[
    "#...........#",
    "##....#....##",
    ".##..###..##.",
    ".###########.",
    "..#########..",
    "...#######...",
    "....#####....",
    ".....###.....",
    "......#......",
];

const GREEN_SHIP_ART: &[&str] = &[
    "..#.......#..",
    "..##.....##..",
    ".####...####.",
    ".###########.",
    "##.#######.##",
    "#..#######..#",
    "....#####....",
    ".....###.....",
    "......#......",
];

// The blue ship is wider than the other variants; its laser offset
// compensates (see EnemyVariant::laser_offset).
const BLUE_SHIP_ART: &[&str] = &[
    "#...............#",
    "##.....###.....##",
    ".##...#####...##.",
    ".###############.",
    "..#############..",
    "...###########...",
    ".....#######.....",
    ".......###.......",
    "........#........",
];

const BOLT_ART: &[&str] = &[
    ".#.",
    "###",
    "###",
    "###",
    "###",
    "###",
    "###",
    "###",
    ".#.",
];

const WIDE_BOLT_ART: &[&str] = &[
    "..#..",
    ".###.",
    "#####",
    "#####",
    "#####",
    "#####",
    "#####",
    ".###.",
    "..#..",
];

impl SpriteKind {
    pub fn mask(self) -> &'static SpriteMask {
        static MASKS: OnceLock<Vec<SpriteMask>> = OnceLock::new();
        let masks = MASKS.get_or_init(|| {
            vec![
                SpriteMask::from_art(PLAYER_SHIP_ART),
                SpriteMask::from_art(RED_SHIP_ART),
                SpriteMask::from_art(GREEN_SHIP_ART),
                SpriteMask::from_art(BLUE_SHIP_ART),
                SpriteMask::from_art(BOLT_ART),
                SpriteMask::from_art(BOLT_ART),
                SpriteMask::from_art(BOLT_ART),
                SpriteMask::from_art(WIDE_BOLT_ART),
            ]
        });
        &masks[self as usize]
    }

    pub fn width(self) -> f32 {
        self.mask().width() as f32
    }

    pub fn height(self) -> f32 {
        self.mask().height() as f32
    }
}
