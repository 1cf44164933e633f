//! ANSI SGR handling
//!
//! Only Select Graphic Rendition sequences affect the output; cursor movement
//! and other escapes emitted by build tools are dropped.

use crate::types::{AnsiStyle, Color, NamedColor, StyledSegment};
use ansi_parser::{AnsiParser, AnsiSequence, Output};
use regex::Regex;
use std::sync::OnceLock;

/// Split a single line into styled segments
///
/// Style state starts from the default at the beginning of every line, so a
/// colour left open on a previous line does not bleed into this one.
pub fn parse_ansi_line(line: &str) -> Vec<StyledSegment> {
    let mut segments = Vec::new();
    let mut style = AnsiStyle::default();

    for block in line.ansi_parse() {
        match block {
            Output::TextBlock(text) => push_text(&mut segments, &mut style, text),
            Output::Escape(AnsiSequence::SetGraphicsMode(modes)) => {
                apply_sgr(&mut style, &modes);
            }
            Output::Escape(_) => {}
        }
    }

    segments
}

/// Push a text block, applying any CSI sequence the tokenizer left inside it
///
/// The tokenizer only recognises SGR with up to five parameters; longer
/// ones (`1;38;2;r;g;b`) and private modes arrive as plain text.
fn push_text(segments: &mut Vec<StyledSegment>, style: &mut AnsiStyle, text: &str) {
    static CSI_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = CSI_REGEX.get_or_init(|| {
        Regex::new(r"\x1b\[([0-9;?]*)([@-~])").expect("valid CSI regex")
    });

    let mut last = 0;
    for captures in re.captures_iter(text) {
        let (Some(whole), Some(params), Some(command)) =
            (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };
        push_segment(segments, style, &text[last..whole.start()]);
        if command.as_str() == "m" && !params.as_str().starts_with('?') {
            apply_sgr(style, &sgr_params(params.as_str()));
        }
        last = whole.end();
    }
    push_segment(segments, style, &text[last..]);
}

fn push_segment(segments: &mut Vec<StyledSegment>, style: &AnsiStyle, text: &str) {
    if !text.is_empty() {
        segments.push(StyledSegment::with_style(text.to_string(), style.clone()));
    }
}

/// Numeric SGR parameters; an empty parameter means 0
fn sgr_params(params: &str) -> Vec<u8> {
    if params.is_empty() {
        return Vec::new();
    }
    params
        .split(';')
        .map(|p| if p.is_empty() { Ok(0) } else { p.parse::<u8>() })
        .filter_map(Result::ok)
        .collect()
}

fn apply_sgr(style: &mut AnsiStyle, codes: &[u8]) {
    if codes.is_empty() {
        *style = AnsiStyle::default();
        return;
    }

    let mut i = 0;
    while i < codes.len() {
        match codes[i] {
            0 => *style = AnsiStyle::default(),
            1 => style.bold = true,
            2 => style.faint = true,
            3 => style.italic = true,
            4 => style.underline = true,
            5 | 6 => style.blink = true,
            7 => style.reversed = true,
            8 => style.hidden = true,
            9 => style.strikethrough = true,
            22 => {
                style.bold = false;
                style.faint = false;
            }
            23 => style.italic = false,
            24 => style.underline = false,
            25 => style.blink = false,
            27 => style.reversed = false,
            28 => style.hidden = false,
            29 => style.strikethrough = false,
            code @ 30..=37 => style.fg_color = Some(Color::Named(NamedColor::from_index(code - 30))),
            38 => {
                if let Some((color, used)) = extended_color(&codes[i + 1..]) {
                    style.fg_color = Some(color);
                    i += used;
                }
            }
            39 => style.fg_color = None,
            code @ 40..=47 => style.bg_color = Some(Color::Named(NamedColor::from_index(code - 40))),
            48 => {
                if let Some((color, used)) = extended_color(&codes[i + 1..]) {
                    style.bg_color = Some(color);
                    i += used;
                }
            }
            49 => style.bg_color = None,
            code @ 90..=97 => {
                style.fg_color = Some(Color::Named(NamedColor::from_index(code - 90 + 8)))
            }
            code @ 100..=107 => {
                style.bg_color = Some(Color::Named(NamedColor::from_index(code - 100 + 8)))
            }
            other => log::trace!("Ignoring SGR code {}", other),
        }
        i += 1;
    }
}

/// Decode `5;n` or `2;r;g;b` following a 38/48 code.
///
/// Returns the colour and how many parameters were consumed.
fn extended_color(rest: &[u8]) -> Option<(Color, usize)> {
    match rest {
        [5, n, ..] => Some((Color::Palette256(*n), 2)),
        [2, r, g, b, ..] => Some((Color::Rgb(*r, *g, *b), 4)),
        _ => None,
    }
}
