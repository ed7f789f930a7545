//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, testable) and
//! a `print_*` wrapper that writes them to stdout.
//!
//! ## Scan
//!
//! ```text
//! Dining Room (3 images)
//! 001 Wood Fired Oven
//!     Source: 010-Wood-Fired-Oven.jpg
//!     Description: Lit every day at noon.
//! 002 Terrace
//!     Source: 020-Terrace.webp
//! ```
//!
//! ## Replay
//!
//! ```text
//! L1  open 3           → opened at 3          [overlay, scroll locked, 1 listener]
//! L2  click next       → 3 → 4                [overlay, scroll locked, 1 listener]
//! L4  key Escape       → closed from 4        [idle]
//! ```

use crate::lightbox::{ClickTarget, InputEvent, Transition};
use crate::replay::Step;
use crate::types::Manifest;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let count = manifest.items.len();
    let noun = if count == 1 { "image" } else { "images" };
    let mut lines = vec![format!("{} ({} {})", manifest.title, count, noun)];
    for (i, item) in manifest.items.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), item.title()));
        lines.push(format!("{}Source: {}", indent(1), item.image_ref()));
        if !item.description().is_empty() {
            lines.push(format!("{}Description: {}", indent(1), item.description()));
        }
    }
    lines
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

fn describe_event(event: &InputEvent) -> String {
    match event {
        InputEvent::Activate { index } => format!("open {index}"),
        InputEvent::Click { target } => {
            let name = match target {
                ClickTarget::Backdrop => "backdrop",
                ClickTarget::Panel => "panel",
                ClickTarget::Close => "close",
                ClickTarget::Previous => "prev",
                ClickTarget::Next => "next",
            };
            format!("click {name}")
        }
        InputEvent::KeyDown { key } => format!("key {key}"),
    }
}

fn describe_transition(transition: &Transition) -> String {
    match transition {
        Transition::Opened { index } => format!("opened at {index}"),
        Transition::Moved { from, to } => format!("{from} → {to}"),
        Transition::Closed { index } => format!("closed from {index}"),
        Transition::Ignored => "ignored".to_string(),
        Transition::Rejected { reason } => format!("rejected: {reason}"),
    }
}

fn describe_state(step: &Step) -> String {
    if !step.overlay && !step.scroll_locked && step.listeners == 0 {
        return "idle".to_string();
    }
    let mut parts = Vec::new();
    if step.overlay {
        parts.push("overlay".to_string());
    }
    if step.scroll_locked {
        parts.push("scroll locked".to_string());
    }
    let noun = if step.listeners == 1 { "listener" } else { "listeners" };
    parts.push(format!("{} {}", step.listeners, noun));
    parts.join(", ")
}

pub fn format_replay_output(steps: &[Step]) -> Vec<String> {
    steps
        .iter()
        .map(|step| {
            format!(
                "{:<4}{:<17}→ {:<20} [{}]",
                format!("L{}", step.line),
                describe_event(&step.event),
                describe_transition(&step.transition),
                describe_state(step)
            )
        })
        .collect()
}

pub fn print_replay_output(steps: &[Step]) {
    for line in format_replay_output(steps) {
        println!("{}", line);
    }
}
