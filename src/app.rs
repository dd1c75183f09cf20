//! # Interactive session state
//!
//! The session is an immutable [`SkyState`] value advanced by a pure transition function:
//!
//! ```text
//! (SkyState, Event) --update--> (SkyState, Command)
//! ```
//!
//! Side effects (geocoding, catalog lookups, writing snapshots, quitting) are never
//! performed here: [`update`] only *requests* them through a [`Command`], and the driver
//! feeds their outcome back as a new [`Event`].
//!
//! ```text
//!            Enter (non-empty)            SkyLoaded(Ok)
//!   Input ──────────────────────▶ loading ───────────────▶ Sky
//!     ▲                              │ SkyLoaded(Err)       │
//!     │                              └──────▶ Input+error   │
//!     └──────────────────────── Esc ────────────────────────┘
//! ```

use camino::Utf8PathBuf;

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::observer::ObserverLocation;
use crate::visibility::VisibleStar;

/// Keys the session reacts to, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Enter,
    Backspace,
    Esc,
    CtrlC,
}

/// Result of a successful sky computation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSky {
    pub location: ObserverLocation,
    pub stars: Vec<VisibleStar>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(KeyInput),
    /// Terminal size in cells
    Resize { width: usize, height: usize },
    SkyLoaded(Result<LoadedSky, String>),
    ScreenshotSaved(Result<Utf8PathBuf, String>),
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    None,
    Quit,
    /// Geocode the postal code and compute the visible stars
    LoadSky { pincode: String },
    /// Write a PNG of the current sky
    TakeScreenshot {
        stars: Vec<VisibleStar>,
        width: usize,
        height: usize,
        pincode: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Input {
        input: String,
        error: Option<String>,
        loading: bool,
    },
    Sky {
        pincode: String,
        location: ObserverLocation,
        stars: Vec<VisibleStar>,
        /// Last screenshot outcome, shown in the status line
        notice: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkyState {
    pub screen: Screen,
    /// Width of the drawing area, in cells
    pub width: usize,
    /// Height of the drawing area, in cells (terminal height minus the status lines)
    pub height: usize,
}

impl Default for SkyState {
    fn default() -> Self {
        SkyState {
            screen: Screen::Input {
                input: String::new(),
                error: None,
                loading: false,
            },
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl SkyState {
    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Advance the session by one event.
pub fn update(state: SkyState, event: Event) -> (SkyState, Command) {
    let SkyState {
        screen,
        width,
        height,
    } = state;
    let at = |screen: Screen| SkyState {
        screen,
        width,
        height,
    };

    match (screen, event) {
        (screen, Event::Resize { width, height }) => (
            SkyState {
                screen,
                width,
                height: height.saturating_sub(2),
            },
            Command::None,
        ),

        (
            Screen::Input {
                input,
                error,
                loading,
            },
            Event::Key(key),
        ) => {
            let (screen, command) = update_input(input, error, loading, key);
            (at(screen), command)
        }

        (
            Screen::Sky {
                pincode,
                location,
                stars,
                notice,
            },
            Event::Key(key),
        ) => match key {
            KeyInput::Char('q') | KeyInput::CtrlC => (
                at(Screen::Sky {
                    pincode,
                    location,
                    stars,
                    notice,
                }),
                Command::Quit,
            ),
            KeyInput::Esc => (at(SkyState::default().screen), Command::None),
            KeyInput::Char('s') => {
                let command = Command::TakeScreenshot {
                    stars: stars.clone(),
                    width,
                    height,
                    pincode: pincode.clone(),
                };
                (
                    at(Screen::Sky {
                        pincode,
                        location,
                        stars,
                        notice: None,
                    }),
                    command,
                )
            }
            _ => (
                at(Screen::Sky {
                    pincode,
                    location,
                    stars,
                    notice,
                }),
                Command::None,
            ),
        },

        (
            Screen::Input {
                input,
                loading: true,
                ..
            },
            Event::SkyLoaded(result),
        ) => {
            let screen = match result {
                Ok(sky) => Screen::Sky {
                    pincode: input,
                    location: sky.location,
                    stars: sky.stars,
                    notice: None,
                },
                Err(error) => Screen::Input {
                    input,
                    error: Some(error),
                    loading: false,
                },
            };
            (at(screen), Command::None)
        }

        (
            Screen::Sky {
                pincode,
                location,
                stars,
                ..
            },
            Event::ScreenshotSaved(result),
        ) => {
            let notice = match result {
                Ok(path) => format!("Saved: {path}"),
                Err(error) => format!("Error: {error}"),
            };
            (
                at(Screen::Sky {
                    pincode,
                    location,
                    stars,
                    notice: Some(notice),
                }),
                Command::None,
            )
        }

        // results arriving when nobody waits for them (e.g. after Esc) are dropped
        (screen, _) => (at(screen), Command::None),
    }
}

fn update_input(
    mut input: String,
    error: Option<String>,
    loading: bool,
    key: KeyInput,
) -> (Screen, Command) {
    let command = match key {
        KeyInput::CtrlC => Command::Quit,
        // keys are ignored while a lookup is in flight
        _ if loading => Command::None,
        KeyInput::Enter if !input.is_empty() => {
            return (
                Screen::Input {
                    input: input.clone(),
                    error: None,
                    loading: true,
                },
                Command::LoadSky { pincode: input },
            );
        }
        KeyInput::Backspace => {
            input.pop();
            Command::None
        }
        KeyInput::Char(c) if !c.is_control() => {
            input.push(c);
            Command::None
        }
        _ => Command::None,
    };
    (
        Screen::Input {
            input,
            error,
            loading,
        },
        command,
    )
}
