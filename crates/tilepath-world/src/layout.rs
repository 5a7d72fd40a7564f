//! Region layouts written as ASCII art.
//!
//! A [`Layout`] is one layer of one region: `'#'` is solid block, `'.'` is
//! air and `'~'` is liquid. The first line is the top tile row.

use std::fmt;
use std::str::FromStr;

use tilepath_core::Tile;

/// Material of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    Block,
    #[default]
    Air,
    Liquid,
}

impl TileKind {
    pub const fn from_rune(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(Self::Block),
            '.' => Some(Self::Air),
            '~' => Some(Self::Liquid),
            _ => None,
        }
    }

    pub const fn rune(self) -> char {
        match self {
            Self::Block => '#',
            Self::Air => '.',
            Self::Liquid => '~',
        }
    }

    #[inline]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Block)
    }
}

/// A rectangular grid of [`TileKind`] parsed from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    cells: Vec<TileKind>,
    width: usize,
    height: usize,
}

impl Layout {
    /// Parse a layout.
    ///
    /// Leading and trailing whitespace of the whole string is trimmed, as is
    /// a trailing `'\r'` on each line. Every line must have the same width.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        let mut cells = Vec::with_capacity(s.len());
        let mut width = 0;
        let mut height = 0;

        if s.is_empty() {
            return Ok(Self {
                cells,
                width,
                height,
            });
        }

        for (y, line) in s.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let mut x = 0;
            for ch in line.chars() {
                let kind = TileKind::from_rune(ch).ok_or(ParseError::InvalidRune {
                    ch,
                    pos: Tile::new(x as u16, y as u16),
                })?;
                cells.push(kind);
                x += 1;
            }
            if y == 0 {
                width = x;
            } else if x != width {
                return Err(ParseError::InconsistentSize {
                    line: y,
                    expected: width,
                    found: x,
                });
            }
            height += 1;
        }

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, tile: Tile) -> Option<TileKind> {
        let (x, y) = (usize::from(tile.x), usize::from(tile.y));
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    /// Iterate over all tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, TileKind)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &kind)| (Tile::new((i % width) as u16, (i / width) as u16), kind))
    }
}

impl FromStr for Layout {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for kind in row {
                write!(f, "{}", kind.rune())?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when loading a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line is wider or narrower than the first one.
    InconsistentSize {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is not a known tile rune.
    InvalidRune { ch: char, pos: Tile },
    /// The layout does not match the world's region size.
    WrongSize {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout: line {line} is {found} tiles wide, expected {expected}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::WrongSize { expected, found } => write!(
                f,
                "layout is {}x{}, regions are {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for ParseError {}
