//! # Terminal driver
//!
//! Runs the interactive session on top of `crossterm`:
//!
//! ```text
//!   crossterm events ──translate──┐
//!                                 ├──▶ app::update ──▶ Command ──▶ worker thread
//!   worker results (mpsc) ────────┘         │                          │
//!                                      view::render                   │
//!                                           │                          │
//!                                        draw ◀────────────────────────┘ (Event)
//! ```
//!
//! Geocoding and screenshots run on short-lived threads so the interface stays
//! responsive. Their outcome comes back as an [`Event`] on a channel and goes through
//! [`update`] like any key press.

use std::io::{self, Write};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use camino::Utf8PathBuf;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use log::{error, info, warn};

use crate::app::{update, Command, Event, KeyInput, LoadedSky, SkyState};
use crate::catalog::StarCatalog;
use crate::geocode::Geocoder;
use crate::screenshot::save_screenshot;
use crate::starminal_errors::StarminalError;
use crate::time::epoch_now;
use crate::view;
use crate::visibility::{compute_visible, VisibleStar};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Everything the interactive session needs besides the terminal itself.
#[derive(Debug, Clone)]
pub struct Session {
    pub catalog: Arc<StarCatalog>,
    pub geocoder: Geocoder,
    pub output_dir: Utf8PathBuf,
}

/// Run the interactive session until the user quits.
///
/// The terminal is put in raw mode on the alternate screen and restored on every exit
/// path, including errors.
pub fn run(session: Session) -> Result<(), StarminalError> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
        let _ = terminal::disable_raw_mode();
        return Err(e.into());
    }
    info!("interactive session started");

    let mut writes = PendingWrites::default();
    let result = event_loop(&mut stdout, &session, &mut writes);

    // a PNG being encoded when the user quits is finished before exiting
    let joined = writes.join_all();
    if joined > 0 {
        info!("waited for {joined} screenshot(s) to finish");
    }

    let left = execute!(stdout, Show, LeaveAlternateScreen);
    let raw = terminal::disable_raw_mode();
    if let Err(e) = &result {
        error!("session ended with an error: {e}");
    }
    result?;
    left?;
    raw?;
    info!("interactive session closed");
    Ok(())
}

/// Screenshot workers still writing to disk.
#[derive(Debug, Default)]
struct PendingWrites {
    handles: Vec<JoinHandle<()>>,
}

impl PendingWrites {
    fn push(&mut self, handle: JoinHandle<()>) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    /// Wait for every outstanding write, returning how many were waited on.
    fn join_all(&mut self) -> usize {
        let handles = std::mem::take(&mut self.handles);
        let count = handles.len();
        for handle in handles {
            if handle.join().is_err() {
                error!("screenshot worker panicked");
            }
        }
        count
    }
}

fn event_loop(
    out: &mut impl Write,
    session: &Session,
    writes: &mut PendingWrites,
) -> Result<(), StarminalError> {
    let (tx, rx) = mpsc::channel();
    let (cols, rows) = terminal::size()?;
    let (mut state, _) = update(
        SkyState::default(),
        Event::Resize {
            width: cols as usize,
            height: rows as usize,
        },
    );
    draw(out, &state)?;

    loop {
        let mut events = Vec::new();
        if event::poll(POLL_INTERVAL)? {
            events.extend(translate(event::read()?));
        }
        events.extend(rx.try_iter());
        if events.is_empty() {
            continue;
        }

        for event in events {
            let (next, command) = update(state, event);
            state = next;
            match command {
                Command::None => {}
                Command::Quit => return Ok(()),
                Command::LoadSky { pincode } => spawn_load(session, pincode, tx.clone()),
                Command::TakeScreenshot {
                    stars,
                    width,
                    height,
                    pincode,
                } => writes.push(spawn_screenshot(
                    session,
                    stars,
                    width,
                    height,
                    pincode,
                    tx.clone(),
                )),
            }
        }
        draw(out, &state)?;
    }
}

/// Map a terminal event onto a session event; everything else is ignored.
fn translate(event: TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => {
            let key = match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    KeyInput::CtrlC
                }
                KeyCode::Char(c) => KeyInput::Char(c),
                KeyCode::Enter => KeyInput::Enter,
                KeyCode::Backspace => KeyInput::Backspace,
                KeyCode::Esc => KeyInput::Esc,
                _ => return None,
            };
            Some(Event::Key(key))
        }
        TermEvent::Resize(width, height) => Some(Event::Resize {
            width: width as usize,
            height: height as usize,
        }),
        _ => None,
    }
}

fn load_sky(
    catalog: &StarCatalog,
    geocoder: &Geocoder,
    pincode: &str,
) -> Result<LoadedSky, StarminalError> {
    let location = geocoder.locate_blocking(pincode)?;
    let now = epoch_now()?;
    let stars = compute_visible(catalog.entries(), &location, &now);
    Ok(LoadedSky { location, stars })
}

fn spawn_load(session: &Session, pincode: String, tx: Sender<Event>) {
    let catalog = Arc::clone(&session.catalog);
    let geocoder = session.geocoder.clone();
    thread::spawn(move || {
        let result = load_sky(&catalog, &geocoder, &pincode).map_err(|e| {
            warn!("sky lookup for {pincode:?} failed: {e}");
            e.to_string()
        });
        // the receiver is gone once the session has quit
        let _ = tx.send(Event::SkyLoaded(result));
    });
}

fn spawn_screenshot(
    session: &Session,
    stars: Vec<VisibleStar>,
    width: usize,
    height: usize,
    pincode: String,
    tx: Sender<Event>,
) -> JoinHandle<()> {
    let out_dir = session.output_dir.clone();
    thread::spawn(move || {
        let result = epoch_now()
            .and_then(|now| save_screenshot(&stars, width, height, &pincode, &out_dir, &now))
            .map_err(|e| {
                warn!("screenshot failed: {e}");
                e.to_string()
            });
        let _ = tx.send(Event::ScreenshotSaved(result));
    })
}

fn draw(out: &mut impl Write, state: &SkyState) -> Result<(), StarminalError> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    for (row, line) in view::render(state).iter().enumerate() {
        queue!(out, MoveTo(0, row as u16))?;
        for span in line {
            if let Some(color) = span.color {
                queue!(out, SetForegroundColor(Color::AnsiValue(color)))?;
            }
            if span.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(
                out,
                Print(&span.text),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }
    }
    out.flush()?;
    Ok(())
}
