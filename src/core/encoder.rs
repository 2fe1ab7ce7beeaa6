//! Time and level encoding for formatted output
//!
//! These functions sit on the hot path of every formatted log line, so they write
//! fixed-width integers straight into the sink instead of going through a calendar
//! formatting routine per event.

use super::log_level::Level;
use std::fmt::{self, Write};

/// SGR code that resets all attributes
pub const ANSI_RESET: u8 = 0;

/// Level names are padded to this width by the `*5` functions
pub const LEVEL_WIDTH: usize = 5;

/// Shortest limit accepted for logger name display
pub const MIN_NAME_LIMIT: usize = 8;

/// Write `hh:mm:ss.mmm` for a time expressed as milliseconds since midnight.
pub fn write_time<W: Write + ?Sized>(day_millis: u32, out: &mut W) -> fmt::Result {
    let total_seconds = day_millis / 1000;
    let millis = day_millis - total_seconds * 1000;
    let total_minutes = total_seconds / 60;
    let seconds = total_seconds - total_minutes * 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes - hours * 60;
    write_2_digits(hours, out)?;
    out.write_char(':')?;
    write_2_digits(minutes, out)?;
    out.write_char(':')?;
    write_2_digits(seconds, out)?;
    out.write_char('.')?;
    write_3_digits(millis, out)
}

pub fn write_level<W: Write + ?Sized>(level: Level, out: &mut W) -> fmt::Result {
    out.write_str(level.to_str())
}

pub fn write_level_coloured<W: Write + ?Sized>(level: Level, out: &mut W) -> fmt::Result {
    write_level_colour(level, out)?;
    out.write_str(level.to_str())?;
    write_ansi_colour(ANSI_RESET, out)
}

/// Write the level padded to five characters.
pub fn write_level5<W: Write + ?Sized>(level: Level, out: &mut W) -> fmt::Result {
    out.write_str(level.to_str())?;
    write_level_padding(level, out)
}

/// Write the level padded to five characters, padding inside the colour span.
pub fn write_level5_coloured<W: Write + ?Sized>(level: Level, out: &mut W) -> fmt::Result {
    write_level_colour(level, out)?;
    out.write_str(level.to_str())?;
    write_level_padding(level, out)?;
    write_ansi_colour(ANSI_RESET, out)
}

/// Write the logger name; a name longer than `limit` is shown as `...` followed by
/// its last `limit - 3` characters.
pub fn write_name_with_limit<W: Write + ?Sized>(
    limit: usize,
    name: &str,
    out: &mut W,
) -> fmt::Result {
    let count = name.chars().count();
    if count <= limit {
        return out.write_str(name);
    }
    out.write_str("...")?;
    let skip = count - limit.saturating_sub(3);
    match name.char_indices().nth(skip) {
        Some((start, _)) => out.write_str(&name[start..]),
        None => Ok(()),
    }
}

/// Write an SGR escape sequence: `ESC [ code m`.
pub fn write_ansi_colour<W: Write + ?Sized>(code: u8, out: &mut W) -> fmt::Result {
    out.write_str("\x1b[")?;
    write_positive_int(u32::from(code), out)?;
    out.write_char('m')
}

fn write_level_colour<W: Write + ?Sized>(level: Level, out: &mut W) -> fmt::Result {
    out.write_str("\x1b[")?;
    out.write_str(&level.color_code().to_fg_str())?;
    out.write_char('m')
}

fn write_level_padding<W: Write + ?Sized>(level: Level, out: &mut W) -> fmt::Result {
    for _ in level.to_str().len()..LEVEL_WIDTH {
        out.write_char(' ')?;
    }
    Ok(())
}

fn write_2_digits<W: Write + ?Sized>(n: u32, out: &mut W) -> fmt::Result {
    out.write_char(digit(n / 10))?;
    out.write_char(digit(n % 10))
}

fn write_3_digits<W: Write + ?Sized>(n: u32, out: &mut W) -> fmt::Result {
    out.write_char(digit(n / 100))?;
    write_2_digits(n % 100, out)
}

fn write_positive_int<W: Write + ?Sized>(n: u32, out: &mut W) -> fmt::Result {
    if n >= 10 {
        write_positive_int(n / 10, out)?;
    }
    out.write_char(digit(n % 10))
}

#[inline]
fn digit(n: u32) -> char {
    char::from(b'0' + (n % 10) as u8)
}
