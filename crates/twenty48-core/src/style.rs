//! Tile palette: [`Color`] and [`TileStyle`].
//!
//! Pure data shared by drivers; nothing here knows how colours are drawn.

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0 & 0xFF_FFFF)
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Board background behind the tiles.
pub const BOARD_BG: Color = Color::from_rgb(187, 173, 160);
/// Empty cell.
pub const EMPTY_BG: Color = Color::from_rgb(205, 193, 180);
/// Dark text used on light tiles.
pub const DARK_FG: Color = Color::from_rgb(119, 110, 101);
/// Light text used on saturated tiles.
pub const LIGHT_FG: Color = Color::from_rgb(249, 246, 242);

/// Foreground and background of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileStyle {
    pub fg: Color,
    pub bg: Color,
}

const TILE_BG: [Color; 11] = [
    Color::from_rgb(238, 228, 218), // 2
    Color::from_rgb(237, 224, 200), // 4
    Color::from_rgb(242, 177, 121), // 8
    Color::from_rgb(245, 149, 99),  // 16
    Color::from_rgb(246, 124, 95),  // 32
    Color::from_rgb(246, 94, 59),   // 64
    Color::from_rgb(237, 207, 114), // 128
    Color::from_rgb(237, 204, 97),  // 256
    Color::from_rgb(237, 200, 80),  // 512
    Color::from_rgb(237, 197, 63),  // 1024
    Color::from_rgb(237, 194, 46),  // 2048
];

/// Tiles beyond 2048.
const SUPER_BG: Color = Color::from_rgb(60, 58, 50);

/// Style of a cell holding `value` (0 for empty).
pub fn tile_style(value: u32) -> TileStyle {
    if value == 0 {
        return TileStyle {
            fg: DARK_FG,
            bg: EMPTY_BG,
        };
    }
    // 2 -> 0, 4 -> 1, ...
    let rank = value.trailing_zeros().saturating_sub(1) as usize;
    let bg = TILE_BG.get(rank).copied().unwrap_or(SUPER_BG);
    let fg = if value <= 4 { DARK_FG } else { LIGHT_FG };
    TileStyle { fg, bg }
}
