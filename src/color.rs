//! Color and effect extraction from mention text.
//!
//! Pure functions over in-memory strings: hex codes, `rgb()` literals,
//! and palette names for color; a fixed keyword vocabulary for LED
//! effects. No I/O, no state. Empty or matchless input maps to `None`,
//! never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A resolved color: canonical (or synthesized) name, RGB components,
/// and the lowercase `#rrggbb` encoding of the same components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorDescriptor {
    pub name: String,
    pub rgb: (u8, u8, u8),
    pub hex: String,
}

impl ColorDescriptor {
    fn new(name: String, rgb: (u8, u8, u8)) -> Self {
        let hex = format!("#{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2);
        Self { name, rgb, hex }
    }
}

/// Named palette with RGB values. Matched case-insensitively as
/// unanchored substrings ("reddish" contains "red" and matches — a
/// documented quirk, not a bug), longest name first so "spring green"
/// resolves to spring rather than green.
pub const PALETTE: &[(&str, (u8, u8, u8))] = &[
    ("red", (255, 0, 0)),
    ("orange", (255, 165, 0)),
    ("yellow", (255, 255, 0)),
    ("chartreuse", (127, 255, 0)),
    ("green", (0, 128, 0)),
    ("spring", (0, 255, 127)),
    ("cyan", (0, 255, 255)),
    ("azure", (0, 127, 255)),
    ("blue", (0, 0, 255)),
    ("violet", (138, 43, 226)),
    ("magenta", (255, 0, 255)),
    ("rose", (255, 20, 147)),
    ("pink", (255, 192, 203)),
    ("purple", (128, 0, 128)),
    ("indigo", (75, 0, 130)),
    ("turquoise", (64, 224, 208)),
    ("lime", (0, 255, 0)),
    ("amber", (255, 191, 0)),
    ("coral", (255, 127, 80)),
    ("salmon", (250, 128, 114)),
    ("white", (255, 255, 255)),
    ("black", (0, 0, 0)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
];

/// Effect keyword understood by the LED controller. Transition and
/// buffer effects are semantically identical for matching; the split
/// only documents what the device does with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    // Transition effects
    Fade,
    WipeDown,
    WipeUp,
    WipeLeft,
    WipeRight,
    ChaseDown,
    ChaseUp,
    ChaseSpiral,
    Dissolve,
    Expand,
    // Buffer effects
    ColourStack,
    ColourRain,
    ColourTrail,
    ColourWaterfall,
    ColourWave,
    ColourSpiral,
}

impl Effect {
    pub const ALL: [Effect; 16] = [
        Effect::Fade,
        Effect::WipeDown,
        Effect::WipeUp,
        Effect::WipeLeft,
        Effect::WipeRight,
        Effect::ChaseDown,
        Effect::ChaseUp,
        Effect::ChaseSpiral,
        Effect::Dissolve,
        Effect::Expand,
        Effect::ColourStack,
        Effect::ColourRain,
        Effect::ColourTrail,
        Effect::ColourWaterfall,
        Effect::ColourWave,
        Effect::ColourSpiral,
    ];

    /// Canonical underscored keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Effect::Fade => "fade",
            Effect::WipeDown => "wipe_down",
            Effect::WipeUp => "wipe_up",
            Effect::WipeLeft => "wipe_left",
            Effect::WipeRight => "wipe_right",
            Effect::ChaseDown => "chase_down",
            Effect::ChaseUp => "chase_up",
            Effect::ChaseSpiral => "chase_spiral",
            Effect::Dissolve => "dissolve",
            Effect::Expand => "expand",
            Effect::ColourStack => "colour_stack",
            Effect::ColourRain => "colour_rain",
            Effect::ColourTrail => "colour_trail",
            Effect::ColourWaterfall => "colour_waterfall",
            Effect::ColourWave => "colour_wave",
            Effect::ColourSpiral => "colour_spiral",
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

static HEX_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"#([0-9A-Fa-f]{6})").unwrap());

static RGB_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)rgb\s*\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)").unwrap());

/// Palette sorted by descending name length, built once. Iteration
/// order makes longest-match-first a property of the table, not of
/// whoever last edited a branch chain.
static PALETTE_BY_LENGTH: Lazy<Vec<(&'static str, (u8, u8, u8))>> = Lazy::new(|| {
    let mut entries = PALETTE.to_vec();
    entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    entries
});

/// Effect vocabulary sorted by descending keyword length. Each entry
/// carries both surface forms: underscored and space-separated.
static EFFECTS_BY_LENGTH: Lazy<Vec<(&'static str, String, Effect)>> = Lazy::new(|| {
    let mut entries: Vec<_> = Effect::ALL
        .iter()
        .map(|e| (e.keyword(), e.keyword().replace('_', " "), *e))
        .collect();
    entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    entries
});

/// Extract a color from free-form text.
///
/// Priority, first match wins:
/// 1. hex code (`#rrggbb`, case-insensitive, anywhere in the text)
/// 2. functional form (`rgb(r, g, b)`)
/// 3. palette name (longest name first)
pub fn extract_color(text: &str) -> Option<ColorDescriptor> {
    if text.is_empty() {
        return None;
    }
    if let Some(color) = match_hex(text) {
        return Some(color);
    }
    if let Some(color) = match_rgb(text) {
        return Some(color);
    }
    match_name(text)
}

fn match_hex(text: &str) -> Option<ColorDescriptor> {
    let caps = HEX_PATTERN.captures(text)?;
    let digits = caps[1].to_lowercase();
    let rgb = (
        hex_byte(&digits[0..2])?,
        hex_byte(&digits[2..4])?,
        hex_byte(&digits[4..6])?,
    );
    Some(ColorDescriptor::new(format!("#{digits}"), rgb))
}

fn hex_byte(pair: &str) -> Option<u8> {
    u8::from_str_radix(pair, 16).ok()
}

fn match_rgb(text: &str) -> Option<ColorDescriptor> {
    let caps = RGB_PATTERN.captures(text)?;
    let (r, g, b) = (&caps[1], &caps[2], &caps[3]);
    // Components are not range-checked: the captured digits go into
    // `name` verbatim and the byte encoding truncates to 8 bits.
    let rgb = (component(r)?, component(g)?, component(b)?);
    Some(ColorDescriptor::new(format!("rgb({r}, {g}, {b})"), rgb))
}

fn component(digits: &str) -> Option<u8> {
    digits.parse::<u128>().ok().map(|v| v as u8)
}

fn match_name(text: &str) -> Option<ColorDescriptor> {
    let lower = text.to_lowercase();
    PALETTE_BY_LENGTH
        .iter()
        .find(|(name, _)| lower.contains(name))
        .map(|(name, rgb)| ColorDescriptor::new((*name).to_string(), *rgb))
}

/// Extract an effect keyword from free-form text. Case-insensitive
/// substring search, longest keyword first; "wipe down" and
/// "wipe_down" both resolve to the underscored canonical form.
pub fn extract_effect(text: &str) -> Option<Effect> {
    if text.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();
    EFFECTS_BY_LENGTH
        .iter()
        .find(|(underscored, spaced, _)| lower.contains(underscored) || lower.contains(spaced.as_str()))
        .map(|(_, _, effect)| *effect)
}

/// Fallback color when no mention names one: white.
pub fn default_color() -> ColorDescriptor {
    ColorDescriptor::new("white".to_string(), (255, 255, 255))
}
