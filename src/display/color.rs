use crate::config::ColorConfig;
use tracing::warn;

pub const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Resolved escape sequences for the text format.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub title: String,
    pub key: String,
    pub value: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&ColorConfig::default())
    }
}

impl Palette {
    /// Unknown colour names fall back to the terminal default.
    pub fn from_config(colors: &ColorConfig) -> Self {
        let resolve = |name: &str| hex_to_ansi(name).unwrap_or_else(|| RESET.to_string());
        Self {
            title: format!("{}{}", BOLD, resolve(&colors.title)),
            key: resolve(&colors.key),
            value: resolve(&colors.value),
        }
    }
}

/// Turn a colour name or `#rrggbb` into an ANSI escape sequence.
pub fn hex_to_ansi(color: &str) -> Option<String> {
    if let Some(ansi_code) = get_ansi_color_code(color) {
        return Some(ansi_code.to_string());
    }

    if color.starts_with('#') && color.len() == 7 && color.is_ascii() {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&color[1..3], 16),
            u8::from_str_radix(&color[3..5], 16),
            u8::from_str_radix(&color[5..7], 16),
        ) {
            return Some(format!("\x1b[38;2;{};{};{}m", r, g, b));
        }
    }

    warn!(
        color,
        "unknown color; use a name such as cyan or bright_white, or a hex value like #ff0000"
    );
    None
}

fn get_ansi_color_code(color_name: &str) -> Option<&'static str> {
    let code = match color_name.to_lowercase().as_str() {
        "black" => "\x1b[30m",
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" | "purple" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "white" => "\x1b[37m",

        "bright_black" | "gray" | "grey" => "\x1b[90m",
        "bright_red" | "orange" => "\x1b[91m",
        "bright_green" => "\x1b[92m",
        "bright_yellow" => "\x1b[93m",
        "bright_blue" => "\x1b[94m",
        "bright_magenta" | "violet" => "\x1b[95m",
        "bright_cyan" => "\x1b[96m",
        "bright_white" => "\x1b[97m",

        "reset" | "default" => RESET,
        _ => return None,
    };
    Some(code)
}
