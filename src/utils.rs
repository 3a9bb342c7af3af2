//! Shared utility functions used across modules.

use crate::constants::SPINNER_CHARS;

/// Get the spinner character for the current tick.
pub fn spinner_char(tick: u64) -> &'static str {
    SPINNER_CHARS[(tick % SPINNER_CHARS.len() as u64) as usize]
}

/// Get animated loading dots for the current tick.
pub fn loading_dots(tick: u64) -> &'static str {
    match tick % 4 {
        0 => "",
        1 => ".",
        2 => "..",
        _ => "...",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_char_cycles() {
        assert_eq!(spinner_char(0), SPINNER_CHARS[0]);
        assert_eq!(spinner_char(1), SPINNER_CHARS[1]);
        assert_eq!(spinner_char(SPINNER_CHARS.len() as u64), SPINNER_CHARS[0]);
    }

    #[test]
    fn spinner_char_large_tick() {
        let _ = spinner_char(u64::MAX);
    }

    #[test]
    fn loading_dots_cycle() {
        assert_eq!(loading_dots(0), "");
        assert_eq!(loading_dots(1), ".");
        assert_eq!(loading_dots(2), "..");
        assert_eq!(loading_dots(3), "...");
        assert_eq!(loading_dots(4), "");
    }
}
