//! Type definitions for parsed build log lines

use serde::{Deserialize, Serialize};

/// A single log line split into styled segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    /// Styled text segments with ANSI styling resolved
    pub segments: Vec<StyledSegment>,

    /// Workflow command (if this line contains one)
    pub command: Option<WorkflowCommand>,

    /// Notability of the line
    pub severity: Severity,
}

impl ParsedLine {
    /// Get the plain text content without ANSI codes
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|seg| seg.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// How notable a line is for the minimap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Ordinary output
    #[default]
    Plain,
    /// Line printed in red, or an `::error::` command
    Failure,
    /// Line printed in green
    Success,
}

impl Severity {
    /// Whether this line gets a minimap mark
    pub fn is_notable(&self) -> bool {
        !matches!(self, Self::Plain)
    }
}

/// A segment of text with preserved ANSI styling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSegment {
    /// The text content
    pub text: String,

    /// Applied ANSI styling
    pub style: AnsiStyle,
}

impl StyledSegment {
    /// Create a new unstyled segment
    pub fn new(text: String) -> Self {
        Self {
            text,
            style: AnsiStyle::default(),
        }
    }

    /// Create a segment with specific styling
    pub fn with_style(text: String, style: AnsiStyle) -> Self {
        Self { text, style }
    }
}

/// ANSI styling information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsiStyle {
    pub fg_color: Option<Color>,
    pub bg_color: Option<Color>,
    pub bold: bool,
    pub faint: bool,
    pub italic: bool,
    pub underline: bool,
    pub blink: bool,
    pub reversed: bool,
    pub hidden: bool,
    pub strikethrough: bool,
}

/// ANSI color representation supporting multiple color modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// 24-bit RGB color
    Rgb(u8, u8, u8),

    /// 256-color palette index
    Palette256(u8),

    /// Named ANSI color (0-15)
    Named(NamedColor),
}

impl Color {
    /// Red family, used by test runners and compilers for failures
    pub fn is_red(&self) -> bool {
        match *self {
            Self::Named(named) => matches!(named, NamedColor::Red | NamedColor::BrightRed),
            Self::Palette256(index) => matches!(index, 1 | 9 | 160 | 196),
            Self::Rgb(r, g, b) => r >= 160 && g < 96 && b < 96,
        }
    }

    /// Green family, used for passing checks
    pub fn is_green(&self) -> bool {
        match *self {
            Self::Named(named) => matches!(named, NamedColor::Green | NamedColor::BrightGreen),
            Self::Palette256(index) => matches!(index, 2 | 10 | 34 | 46),
            Self::Rgb(r, g, b) => g >= 160 && r < 96 && b < 96,
        }
    }
}

/// Standard ANSI named colors (0-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamedColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl NamedColor {
    /// Map a palette index (0-15) to a named color; higher values wrap to white
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Black,
            1 => Self::Red,
            2 => Self::Green,
            3 => Self::Yellow,
            4 => Self::Blue,
            5 => Self::Magenta,
            6 => Self::Cyan,
            7 => Self::White,
            8 => Self::BrightBlack,
            9 => Self::BrightRed,
            10 => Self::BrightGreen,
            11 => Self::BrightYellow,
            12 => Self::BrightBlue,
            13 => Self::BrightMagenta,
            14 => Self::BrightCyan,
            _ => Self::BrightWhite,
        }
    }
}

/// Workflow command embedded in a build log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowCommand {
    /// Error annotation: ::error file={f},line={l}::{message}
    Error {
        message: String,
        params: CommandParams,
    },

    /// Warning annotation: ::warning::{message}
    Warning {
        message: String,
        params: CommandParams,
    },

    /// Notice annotation: ::notice::{message}
    Notice {
        message: String,
        params: CommandParams,
    },
}

/// Optional parameters for workflow commands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandParams {
    /// Source file (file=)
    pub file: Option<String>,

    /// Line number (line=)
    pub line: Option<usize>,

    /// Column number (col=)
    pub col: Option<usize>,

    /// Optional title (title=)
    pub title: Option<String>,
}
