//! Terminal styling helpers
//!
//! Colour output follows `console`'s terminal detection and can be forced
//! off with [`set_colors`] (the `output.colorized` config key).

use console::style;

pub fn red_bold(text: &str) -> String {
    style(text).red().bold().to_string()
}

pub fn green_bold(text: &str) -> String {
    style(text).green().bold().to_string()
}

pub fn blue_bold(text: &str) -> String {
    style(text).blue().bold().to_string()
}

pub fn cyan_bold(text: &str) -> String {
    style(text).cyan().bold().to_string()
}

pub fn yellow_italic(text: &str) -> String {
    style(text).yellow().italic().to_string()
}

/// Warning line on stderr
pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").for_stderr().yellow().bold(), message);
}

/// Error line on stderr
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").for_stderr().red().bold(), message);
}

/// Disabling always wins; enabling only restores terminal detection
pub fn set_colors(enabled: bool) {
    if !enabled {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_without_colors() {
        set_colors(false);
        assert_eq!(red_bold("oops"), "oops");
        assert_eq!(green_bold("done"), "done");
        assert_eq!(yellow_italic("careful"), "careful");
        assert_eq!(cyan_bold("reading"), "reading");
    }
}
