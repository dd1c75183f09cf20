//! # Terminal view
//!
//! Turns a [`SkyState`] into styled text lines. This module knows nothing about the
//! terminal backend: a [`Line`] is a list of [`Span`]s carrying an optional xterm-256
//! foreground color, and the driver decides how to print them.
//!
//! Sky screen layout (`width × (height + 2)` cells):
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │         .           ·     Location   │
//! │    *                      Country: … │   info panel overlaid on the right
//! │              ·   .        …          │
//! │   .     *                            │
//! └──────────────────────────────────────┘
//!  [s] screenshot  [esc] new location  [q] quit
//! ```

use itertools::Itertools;

use crate::app::{Screen, SkyState};
use crate::observer::ObserverLocation;
use crate::render::{render_grid, Cell};
use crate::visibility::VisibleStar;

const DIM: u8 = 245;
const BRIGHT: u8 = 255;
const LABEL: u8 = 75;
const ERROR: u8 = 196;
const BORDER: u8 = 240;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub color: Option<u8>,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            color: None,
            bold: false,
        }
    }

    pub fn colored(text: impl Into<String>, color: u8) -> Self {
        Span {
            text: text.into(),
            color: Some(color),
            bold: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

pub type Line = Vec<Span>;

/// Display width of a line, one column per char.
pub fn line_width(line: &[Span]) -> usize {
    line.iter().map(Span::width).sum()
}

/// The lines without styling, joined by newlines.
pub fn plain_text(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| line.iter().map(|span| span.text.as_str()).join(""))
        .join("\n")
}

/// The first `max_width` columns of a line.
fn clip(line: &[Span], max_width: usize) -> Line {
    let mut clipped = Vec::new();
    let mut left = max_width;
    for span in line {
        if left == 0 {
            break;
        }
        let text: String = span.text.chars().take(left).collect();
        left -= text.chars().count();
        clipped.push(Span {
            text,
            color: span.color,
            bold: span.bold,
        });
    }
    clipped
}

/// Append `text`, merging it into the previous span when the style is the same.
fn push(line: &mut Line, text: &str, color: Option<u8>) {
    match line.last_mut() {
        Some(last) if last.color == color && !last.bold => last.text.push_str(text),
        _ => line.push(Span {
            text: text.into(),
            color,
            bold: false,
        }),
    }
}

pub fn render(state: &SkyState) -> Vec<Line> {
    if !state.is_ready() {
        return vec![vec![Span::plain("Loading...")]];
    }
    match &state.screen {
        Screen::Input {
            input,
            error,
            loading,
        } => render_input(state.height, input, error.as_deref(), *loading),
        Screen::Sky {
            pincode,
            location,
            stars,
            notice,
        } => render_sky(
            state.width,
            state.height,
            pincode,
            location,
            stars,
            notice.as_deref(),
        ),
    }
}

fn render_input(height: usize, input: &str, error: Option<&str>, loading: bool) -> Vec<Line> {
    let mut lines: Vec<Line> = vec![Vec::new(); height / 3];

    lines.push(vec![Span::colored("  Starminal", LABEL).bold()]);
    lines.push(Vec::new());
    lines.push(vec![
        Span::colored("  Enter pincode: ", DIM),
        Span::colored(input, BRIGHT),
        Span::colored("█", BRIGHT),
    ]);
    lines.push(Vec::new());

    if let Some(error) = error {
        lines.push(vec![Span::colored(format!("  Error: {error}"), ERROR)]);
    }
    if loading {
        lines.push(vec![Span::colored("  Looking up location...", DIM)]);
    } else {
        lines.push(vec![Span::colored("  Press Enter to view sky", DIM)]);
    }
    lines
}

fn info_panel(pincode: &str, location: &ObserverLocation, star_count: usize) -> Vec<Line> {
    let field = |name: &str, value: String| {
        vec![
            Span::colored(format!("  {name}"), DIM),
            Span::colored(value, BRIGHT),
        ]
    };
    vec![
        vec![Span::colored("  Location ", LABEL)],
        field("Country: ", location.country.clone()),
        field("Pin:     ", pincode.to_string()),
        field("Lat:     ", format!("{:.4}°", location.latitude)),
        field("Lon:     ", format!("{:.4}°", location.longitude)),
        Vec::new(),
        vec![Span::colored("  Sky ", LABEL)],
        field("Stars: ", star_count.to_string()),
    ]
}

fn push_cells(line: &mut Line, cells: &[Cell]) {
    for cell in cells {
        match cell {
            Some((glyph, color)) => {
                push(line, &glyph.symbol().to_string(), Some(color.ansi256()));
            }
            None => push(line, " ", None),
        }
    }
}

fn render_sky(
    width: usize,
    height: usize,
    pincode: &str,
    location: &ObserverLocation,
    stars: &[VisibleStar],
    notice: Option<&str>,
) -> Vec<Line> {
    let sky_w = width.saturating_sub(2);
    let Ok(grid) = render_grid(stars, sky_w, height) else {
        return vec![vec![Span::plain("Loading...")]];
    };

    let info = info_panel(pincode, location, stars.len());
    let info_width = info.iter().map(|l| line_width(l)).max().unwrap_or(0);
    let info_start = sky_w.saturating_sub(info_width + 1);

    let mut lines = Vec::with_capacity(height + 3);
    lines.push(vec![Span::colored(
        format!("┌{}┐", "─".repeat(sky_w)),
        BORDER,
    )]);

    for (row_idx, row) in grid.rows().enumerate() {
        let mut line = vec![Span::colored("│", BORDER)];
        match info.get(row_idx).filter(|l| !l.is_empty()) {
            Some(info_line) => {
                // narrow skies cut the panel instead of pushing the border out
                let info_line = clip(info_line, sky_w - info_start);
                push_cells(&mut line, &row[..info_start]);
                let used = info_start + line_width(&info_line);
                line.extend(info_line);
                if used < sky_w {
                    push(&mut line, &" ".repeat(sky_w - used), None);
                }
            }
            None => push_cells(&mut line, row),
        }
        line.push(Span::colored("│", BORDER));
        lines.push(line);
    }

    lines.push(vec![Span::colored(
        format!("└{}┘", "─".repeat(sky_w)),
        BORDER,
    )]);

    let mut status = String::from(" [s] screenshot  [esc] new location  [q] quit");
    if let Some(notice) = notice {
        status.push_str("  | ");
        status.push_str(notice);
    }
    lines.push(vec![Span::colored(status, DIM)]);
    lines
}
