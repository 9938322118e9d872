//! Terminal color helpers for the banner and `check` output

use crate::reporting::charts::HealthBand;

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";

    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
    pub const BRIGHT_WHITE: &'static str = "\x1b[97m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Terminal color for a health band, matching the dashboard gauge
pub fn band_color(band: HealthBand) -> &'static str {
    match band {
        HealthBand::Healthy => Colors::GREEN,
        HealthBand::Degraded => Colors::YELLOW,
        HealthBand::Critical => Colors::RED,
    }
}

/// Whether ANSI escapes should be written to stdout
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    if cfg!(test) || env::var("RUST_TEST_TIME_UNIT").is_ok() {
        return false;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) => !(term == "dumb" || term.is_empty()),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_supports_formatting_with_no_color() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
        }
        assert!(!supports_formatting());
        unsafe {
            std::env::remove_var("NO_COLOR");
        }
    }

    #[test]
    #[serial]
    fn test_colorize_plain_under_test() {
        let original_force = std::env::var("FORCE_COLOR").ok();
        unsafe {
            std::env::remove_var("FORCE_COLOR");
        }

        assert_eq!(colorize("90.0", Colors::GREEN), "90.0");

        if let Some(val) = original_force {
            unsafe {
                std::env::set_var("FORCE_COLOR", val);
            }
        }
    }

    #[test]
    fn test_band_color() {
        assert_eq!(band_color(HealthBand::for_score(95.0)), Colors::GREEN);
        assert_eq!(band_color(HealthBand::for_score(75.0)), Colors::YELLOW);
        assert_eq!(band_color(HealthBand::for_score(10.0)), Colors::RED);
    }
}
