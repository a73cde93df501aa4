//! ANSI color helper utilities for terminal output.

use crate::models::session_state::SessionState;
use ansi_term::Colour;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey placeholder for empty cells, the value itself otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}

/// Start times green, end times red, like clock-in/clock-out.
pub fn colorize_start_end(value: &str, is_start: bool) -> String {
    if value.trim().is_empty() {
        return colorize_optional(value);
    }

    if is_start {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}

/// The sentinel label is shown greyed out.
pub fn colorize_tags(value: &str, sentinel: &str) -> String {
    if value == sentinel {
        format!("{GREY}{value}{RESET}")
    } else {
        format!("{CYAN}{value}{RESET}")
    }
}

fn state_colour(state: SessionState) -> Colour {
    match state {
        SessionState::NoSession => Colour::Fixed(8),
        SessionState::Open => Colour::Green,
        SessionState::Paused => Colour::Yellow,
    }
}

pub fn paint_state(state: SessionState) -> String {
    state_colour(state).bold().paint(state.as_str()).to_string()
}
