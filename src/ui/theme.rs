use std::str::FromStr;

use ratatui::style::Color;

use crate::config::ColorsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Color,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "color" | "256" | "truecolor" | "24bit" => ColorSupport::Color,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

/// Honors `NO_COLOR` (https://no-color.org) and dumb terminals.
pub fn detect_color_support() -> ColorSupport {
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return ColorSupport::Mono;
    }
    let term = std::env::var("TERM").unwrap_or_default().to_lowercase();
    if term == "dumb" {
        return ColorSupport::Mono;
    }
    ColorSupport::Color
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    match ColorSupport::from_config_str(config) {
        ColorSupport::Auto => detect_color_support(),
        parsed => parsed,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub title_fg: Color,
    pub title_bg: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub cpu: Color,
    pub memory: Color,
    pub disk: Color,
    pub gauge_unfilled: Color,
    pub table_label: Color,
    pub table_value: Color,
    pub statusbar_bg: Color,
    pub pill_key_fg: Color,
    pub pill_key_bg: Color,
    pub pill_desc_fg: Color,
    pub status_err: Color,
}

impl Theme {
    /// Green-on-black terminal look.
    pub fn dark() -> Self {
        Theme {
            name: "dark",
            title_fg: Color::Black,
            title_bg: Color::Green,
            border: Color::LightGreen,
            text_primary: Color::White,
            text_secondary: Color::Green,
            cpu: Color::Red,
            memory: Color::Blue,
            disk: Color::Green,
            gauge_unfilled: Color::Black,
            table_label: Color::Cyan,
            table_value: Color::Yellow,
            statusbar_bg: Color::Black,
            pill_key_fg: Color::Black,
            pill_key_bg: Color::Green,
            pill_desc_fg: Color::Gray,
            status_err: Color::LightRed,
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            title_fg: Color::White,
            title_bg: Color::Blue,
            border: Color::DarkGray,
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            cpu: Color::Red,
            memory: Color::Blue,
            disk: Color::Green,
            gauge_unfilled: Color::Gray,
            table_label: Color::Blue,
            table_value: Color::Black,
            statusbar_bg: Color::Gray,
            pill_key_fg: Color::White,
            pill_key_bg: Color::Blue,
            pill_desc_fg: Color::Black,
            status_err: Color::Red,
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            title_fg: Color::Black,
            title_bg: Color::White,
            border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            cpu: Color::White,
            memory: Color::White,
            disk: Color::White,
            gauge_unfilled: Color::DarkGray,
            table_label: Color::White,
            table_value: Color::White,
            statusbar_bg: Color::Reset,
            pill_key_fg: Color::Black,
            pill_key_bg: Color::White,
            pill_desc_fg: Color::Gray,
            status_err: Color::White,
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Theme::light(),
            "mono" | "monochrome" => Theme::mono(),
            _ => Theme::dark(),
        }
    }

    /// Named theme plus per-gauge overrides. Mono support wins over both.
    pub fn from_config(colors: &ColorsConfig, support: ColorSupport) -> Self {
        if support == ColorSupport::Mono {
            return Theme::mono();
        }
        let mut theme = Theme::by_name(&colors.theme);
        apply_override(&mut theme.cpu, colors.cpu.as_deref());
        apply_override(&mut theme.memory, colors.memory.as_deref());
        apply_override(&mut theme.disk, colors.disk.as_deref());
        theme
    }
}

fn apply_override(slot: &mut Color, value: Option<&str>) {
    if let Some(color) = value.and_then(|v| Color::from_str(v).ok()) {
        *slot = color;
    }
}
