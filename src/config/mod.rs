//! Configuration structures and widget construction.

mod io;

pub use io::{ConfigError, config_dir, config_path};

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vte::ansi::{Color, Rgb};

use richedit_core::{Attr, AttrFlags, BLINK_RATE, Container, Widget};

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub widget: WidgetConfig,
    pub cursor: CursorConfig,
    pub colors: ColorConfig,
}

/// Editing behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Accept line breaks. When false, Enter and pasted newlines are dropped.
    pub multi_line: bool,
    pub wrap: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            multi_line: true,
            wrap: false,
        }
    }
}

/// Cursor blink and initial visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub blink_interval_ms: u64,
    /// Show the cursor (and accept input) as soon as the widget is built.
    pub show_on_start: bool,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            blink_interval_ms: BLINK_RATE.as_millis() as u64,
            show_on_start: false,
        }
    }
}

impl CursorConfig {
    /// Blink period, at least one millisecond.
    pub fn blink_period(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms.max(1))
    }
}

/// Colors for newly written text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Text color ("#RRGGBB" or "#RGB"). Default: terminal foreground.
    pub foreground: Option<String>,
    /// Background color ("#RRGGBB" or "#RGB"). Default: terminal background.
    pub background: Option<String>,
    pub bold: bool,
    pub underline: bool,
}

impl ColorConfig {
    /// Resolve to `(fg, bg)` write attributes.
    ///
    /// Invalid hex values fall back to the terminal defaults.
    pub fn write_attrs(&self) -> (Attr, Attr) {
        let mut fg = resolve(self.foreground.as_deref(), Attr::default_fg(), "foreground");
        let bg = resolve(self.background.as_deref(), Attr::default_bg(), "background");
        if self.bold {
            fg = fg.with_flags(AttrFlags::BOLD);
        }
        if self.underline {
            fg = fg.with_flags(AttrFlags::UNDERLINE);
        }
        (fg, bg)
    }
}

fn resolve(hex: Option<&str>, default: Attr, label: &str) -> Attr {
    let Some(hex) = hex else {
        return default;
    };
    match parse_hex_color(hex) {
        Some(rgb) => Attr::new(Color::Spec(rgb)),
        None => {
            log::warn!("config: invalid {label} color {hex:?}, using default");
            default
        }
    }
}

/// Parse "#RRGGBB" or "#RGB" to Rgb. Returns None on invalid input.
pub fn parse_hex_color(s: &str) -> Option<Rgb> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    match hex.len() {
        6 => Some(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        }),
        3 => Some(Rgb {
            r: channel(0..1)? * 17,
            g: channel(1..2)? * 17,
            b: channel(2..3)? * 17,
        }),
        _ => None,
    }
}

impl Config {
    /// Build a widget in `container` with these settings applied.
    pub fn build_widget<C: Container>(&self, container: C) -> Widget<C> {
        let widget = Widget::with_blink_period(container, self.cursor.blink_period());
        widget.set_multi_line(self.widget.multi_line);
        widget.set_wrap(self.widget.wrap);
        let (fg, bg) = self.colors.write_attrs();
        widget.set_write_attrs(fg, bg);
        if self.cursor.show_on_start {
            widget.cursor_show();
        }
        widget
    }
}
