//! Terminal rendering for calboard types.

use calboard_core::CalendarEvent;
use chrono::Local;
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let start = self.start.with_timezone(&Local);
        let end = self.end.with_timezone(&Local);

        let when = if self.is_all_day() {
            format!("{} {:>13}", start.format("%a %b %e"), "all-day")
        } else {
            format!(
                "{} {}-{}",
                start.format("%a %b %e"),
                start.format("%H:%M"),
                end.format("%H:%M")
            )
        };

        let mut line = format!(
            "{} {} {} {}",
            color_dot(self.display_color()),
            when,
            self.title.bold(),
            format!("[{}]", self.id).dimmed()
        );

        if let Some(description) = &self.description {
            line.push_str(&format!("\n    {}", description.dimmed()));
        }

        line
    }
}

/// A bullet in the event's color, plain if the color is not "#rrggbb".
fn color_dot(hex: &str) -> String {
    match parse_hex(hex) {
        Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
        None => "●".to_string(),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
