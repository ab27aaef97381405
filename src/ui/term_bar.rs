//! Terminal status-bar host.
//!
//! Renders all visible slots as a single status line: carriage-return
//! repaint on a TTY, one plain line per change when piped.

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use unicode_width::UnicodeWidthStr;

use crate::core::status_bar::{BarSide, StatusHost, StatusItem};

const SEPARATOR: &str = " | ";
const GROUP_GAP: &str = "   ";

#[derive(Debug, Default)]
struct SlotState {
    text: String,
    tooltip: String,
    visible: bool,
    disposed: bool,
    side: BarSide,
    priority: i32,
    sequence: usize,
}

#[derive(Default)]
struct BarState {
    slots: Vec<Arc<Mutex<SlotState>>>,
    last_line: Option<String>,
}

/// Production status host writing to stdout.
pub struct TermBar {
    state: Arc<Mutex<BarState>>,
    tty: bool,
}

impl TermBar {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(BarState::default())),
            tty: io::stdout().is_terminal(),
        }
    }

    fn terminal_width(&self) -> Option<usize> {
        if !self.tty {
            return None;
        }
        crossterm::terminal::size()
            .ok()
            .map(|(cols, _)| cols as usize)
    }

    fn paint(&self, line: &str) {
        let mut stdout = io::stdout();
        let result = if self.tty {
            write!(stdout, "\r\x1b[2K{}", line).and_then(|_| stdout.flush())
        } else if line.is_empty() {
            Ok(())
        } else {
            writeln!(stdout, "{}", line)
        };

        if let Err(err) = result {
            log::debug!("status line write failed: {}", err);
        }
    }
}

impl Default for TermBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusHost for TermBar {
    type Item = TermItem;

    fn create_item(&mut self, side: BarSide, priority: i32) -> TermItem {
        let mut state = self.state.lock();
        let slot = Arc::new(Mutex::new(SlotState {
            side,
            priority,
            sequence: state.slots.len(),
            ..Default::default()
        }));
        state.slots.push(Arc::clone(&slot));
        TermItem { slot }
    }

    fn refresh(&mut self) {
        let line = {
            let state = self.state.lock();
            let snapshots: Vec<SlotSnapshot> = state
                .slots
                .iter()
                .map(|slot| {
                    let slot = slot.lock();
                    SlotSnapshot {
                        side: slot.side,
                        priority: slot.priority,
                        sequence: slot.sequence,
                        text: slot.text.clone(),
                        shown: slot.visible && !slot.disposed,
                    }
                })
                .collect();
            compose_line(snapshots, self.terminal_width())
        };

        let mut state = self.state.lock();
        if state.last_line.as_deref() == Some(line.as_str()) {
            return;
        }
        state.last_line = Some(line.clone());
        drop(state);

        self.paint(&line);
    }
}

impl Drop for TermBar {
    fn drop(&mut self) {
        // Leave the shell prompt on its own line
        if self.tty && self.state.lock().last_line.is_some() {
            let mut stdout = io::stdout();
            let _ = writeln!(stdout);
        }
    }
}

/// One display slot handle, sharing state with the bar it came from.
pub struct TermItem {
    slot: Arc<Mutex<SlotState>>,
}

impl StatusItem for TermItem {
    fn set_text(&mut self, text: &str) {
        let mut slot = self.slot.lock();
        if !slot.disposed {
            slot.text = text.to_string();
        }
    }

    fn set_tooltip(&mut self, tooltip: &str) {
        let mut slot = self.slot.lock();
        if !slot.disposed {
            slot.tooltip = tooltip.to_string();
        }
    }

    fn show(&mut self) {
        let mut slot = self.slot.lock();
        if !slot.disposed {
            slot.visible = true;
        }
    }

    fn dispose(&mut self) {
        let mut slot = self.slot.lock();
        slot.disposed = true;
        slot.visible = false;
    }
}

struct SlotSnapshot {
    side: BarSide,
    priority: i32,
    sequence: usize,
    text: String,
    shown: bool,
}

/// Assemble the bar line: left group flush left, right group padded to
/// the terminal edge when the width is known. Within a side, higher
/// priority comes first; creation order breaks ties.
fn compose_line(mut slots: Vec<SlotSnapshot>, width: Option<usize>) -> String {
    slots.retain(|slot| slot.shown && !slot.text.is_empty());
    slots.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.sequence.cmp(&b.sequence))
    });

    let join = |side: BarSide| -> String {
        slots
            .iter()
            .filter(|slot| slot.side == side)
            .map(|slot| slot.text.as_str())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    };

    let left = join(BarSide::Left);
    let right = join(BarSide::Right);

    match (left.is_empty(), right.is_empty()) {
        (true, true) => String::new(),
        (false, true) => left,
        (true, false) => match width {
            Some(width) if right.width() < width => {
                format!("{}{}", " ".repeat(width - right.width()), right)
            }
            _ => right,
        },
        (false, false) => {
            let used = left.width() + right.width();
            match width {
                Some(width) if used + 1 < width => {
                    format!("{}{}{}", left, " ".repeat(width - used), right)
                }
                _ => format!("{}{}{}", left, GROUP_GAP, right),
            }
        }
    }
}
