//! Core types shared across the application.
//! This module contains pure data types with no external dependencies.

/// Board dimensions (rows top-to-bottom, columns left-to-right).
pub const BOARD_ROWS: u8 = 20;
pub const BOARD_COLS: u8 = 10;

/// Frame cadence of the host loop (milliseconds).
pub const FRAME_MS: u32 = 16;

/// Gravity interval: one descent attempt per interval. Tunable, owned by the host.
pub const DROP_INTERVAL_MS: u32 = 500;

/// How long the game-over overlay stays up before the automatic restart.
pub const GAME_OVER_PAUSE_MS: u32 = 1500;

/// Points awarded per cleared row.
pub const POINTS_PER_ROW: u32 = 100;

/// DAS/ARR timing for held movement keys (milliseconds).
pub const DEFAULT_DAS_MS: u32 = 150;
pub const DEFAULT_ARR_MS: u32 = 50;
pub const SOFT_DROP_DAS_MS: u32 = 0;
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Minimum drag magnitude, in terminal cells, for a swipe to register.
pub const SWIPE_THRESHOLD: i32 = 4;

/// Piece template identifiers, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    T,
    S,
    Z,
}

/// Catalog order, used for indexing and uniform draws.
pub const PIECE_KINDS: [PieceKind; 7] = [
    PieceKind::I,
    PieceKind::J,
    PieceKind::L,
    PieceKind::O,
    PieceKind::T,
    PieceKind::S,
    PieceKind::Z,
];

impl PieceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }
}

/// Opaque color identifier for locked cells and falling pieces.
///
/// The palette is fixed at 7 entries; colors are drawn independently of the
/// piece shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorId {
    Red,
    Green,
    Blue,
    Magenta,
    Yellow,
    Cyan,
    White,
}

/// Palette order, used for indexing and uniform draws.
pub const PALETTE: [ColorId; 7] = [
    ColorId::Red,
    ColorId::Green,
    ColorId::Blue,
    ColorId::Magenta,
    ColorId::Yellow,
    ColorId::Cyan,
    ColorId::White,
];

impl ColorId {
    /// Compact cell code for snapshots: 1..=7 (0 is reserved for empty).
    pub fn code(self) -> u8 {
        match self {
            ColorId::Red => 1,
            ColorId::Green => 2,
            ColorId::Blue => 3,
            ColorId::Magenta => 4,
            ColorId::Yellow => 5,
            ColorId::Cyan => 6,
            ColorId::White => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ColorId::Red),
            2 => Some(ColorId::Green),
            3 => Some(ColorId::Blue),
            4 => Some(ColorId::Magenta),
            5 => Some(ColorId::Yellow),
            6 => Some(ColorId::Cyan),
            7 => Some(ColorId::White),
            _ => None,
        }
    }
}

/// Cell on the board (None = empty, Some = locked with a color).
pub type Cell = Option<ColorId>;

/// Player commands accepted by the turn controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Restart,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
            Command::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_codes_round_trip() {
        for color in PALETTE {
            assert_eq!(ColorId::from_code(color.code()), Some(color));
        }
        assert_eq!(ColorId::from_code(0), None);
        assert_eq!(ColorId::from_code(8), None);
    }

    #[test]
    fn catalog_and_palette_have_seven_entries() {
        assert_eq!(PIECE_KINDS.len(), 7);
        assert_eq!(PALETTE.len(), 7);
    }
}
