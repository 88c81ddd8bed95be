//! Timestamped terminal output.

use std::io::{self, Write};

/// Wall-clock prefix for every line, e.g. `14:03:59`.
pub fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Writes `msg` as one timestamped line.
pub fn say<W: Write + ?Sized>(out: &mut W, msg: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{} {}", timestamp(), msg)
}

/// Writes a timestamped prompt without a newline and flushes it.
pub fn prompt<W: Write + ?Sized>(out: &mut W, text: &str) -> io::Result<()> {
    if text.is_empty() {
        write!(out, "{} ", timestamp())?;
    } else {
        write!(out, "{} {} ", timestamp(), text)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_hh_mm_ss() {
        let ts = timestamp();
        assert_eq!(ts.len(), 8);
        assert!(chrono::NaiveTime::parse_from_str(&ts, "%H:%M:%S").is_ok());
    }

    #[test]
    fn say_prefixes_and_terminates_line() {
        let mut buf = Vec::new();
        say(&mut buf, "Hello!").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with(" Hello!\n"));
        assert_eq!(text.len(), "00:00:00 Hello!\n".len());
    }
}
