//! Extraction engine tests: hex, rgb(), palette names, effects, and
//! the priority order between them.

use glowd::color::PALETTE;
use glowd::{default_color, extract_color, extract_effect, ColorDescriptor, Effect};

// -----------------------------------------------------------------------------
// Hex pattern
// -----------------------------------------------------------------------------

#[test]
fn hex_uppercase() {
    let color = extract_color("#FF0000").unwrap();
    assert_eq!(color.rgb, (255, 0, 0));
    assert_eq!(color.hex, "#ff0000");
    assert_eq!(color.name, "#ff0000");
}

#[test]
fn hex_lowercase() {
    let color = extract_color("#00ff00").unwrap();
    assert_eq!(color.rgb, (0, 255, 0));
}

#[test]
fn hex_mixed_case() {
    let color = extract_color("#aAbBcC").unwrap();
    assert_eq!(color.rgb, (170, 187, 204));
    assert_eq!(color.hex, "#aabbcc");
}

#[test]
fn hex_embedded_in_text() {
    let color = extract_color("The color is #0000FF today").unwrap();
    assert_eq!(color.rgb, (0, 0, 255));
}

#[test]
fn hex_short_form_not_matched() {
    // Three-digit hex is not part of the contract
    assert_eq!(extract_color("#FFF"), None);
}

#[test]
fn hex_without_hash_not_matched_as_hex() {
    // "FF0000" has no # so the hex rule skips it; no other rule fires
    assert_eq!(extract_color("FF0000 please"), None);
}

// -----------------------------------------------------------------------------
// rgb() pattern
// -----------------------------------------------------------------------------

#[test]
fn rgb_no_spaces() {
    let color = extract_color("rgb(255,0,0)").unwrap();
    assert_eq!(color.rgb, (255, 0, 0));
    assert_eq!(color.name, "rgb(255, 0, 0)");
    assert_eq!(color.hex, "#ff0000");
}

#[test]
fn rgb_with_spaces() {
    let color = extract_color("rgb( 128 , 64 , 32 )").unwrap();
    assert_eq!(color.rgb, (128, 64, 32));
    assert_eq!(color.name, "rgb(128, 64, 32)");
}

#[test]
fn rgb_case_insensitive() {
    let color = extract_color("RGB(100,200,50)").unwrap();
    assert_eq!(color.rgb, (100, 200, 50));
}

#[test]
fn rgb_embedded_in_text() {
    let color = extract_color("Use rgb(0,255,0) please").unwrap();
    assert_eq!(color.rgb, (0, 255, 0));
}

#[test]
fn rgb_missing_commas_not_matched() {
    assert_eq!(extract_color("rgb(255 0 0)"), None);
}

#[test]
fn rgb_bare_triple_not_matched() {
    assert_eq!(extract_color("255,0,0"), None);
}

#[test]
fn rgb_out_of_range_components_pass_through() {
    // No range validation: the captured digits appear verbatim in the
    // name while the byte encoding truncates (300 & 0xff == 44)
    let color = extract_color("rgb(300, 0, 0)").unwrap();
    assert_eq!(color.name, "rgb(300, 0, 0)");
    assert_eq!(color.rgb, (44, 0, 0));
    assert_eq!(color.hex, "#2c0000");
}

// -----------------------------------------------------------------------------
// Palette names
// -----------------------------------------------------------------------------

#[test]
fn name_red() {
    let color = extract_color("Make it red!").unwrap();
    assert_eq!(color.name, "red");
    assert_eq!(color.rgb, (255, 0, 0));
}

#[test]
fn name_case_insensitive() {
    let color = extract_color("I want BLUE").unwrap();
    assert_eq!(color.name, "blue");
    assert_eq!(color.rgb, (0, 0, 255));
}

#[test]
fn name_longest_wins() {
    // Both "spring" and "green" are substrings; the longer name wins
    let color = extract_color("spring green").unwrap();
    assert_eq!(color.name, "spring");
    assert_eq!(color.rgb, (0, 255, 127));
}

#[test]
fn name_substring_quirk() {
    // Unanchored containment: "reddish" matches "red" by design
    let color = extract_color("a reddish tint").unwrap();
    assert_eq!(color.name, "red");
}

#[test]
fn name_grey_and_gray() {
    assert_eq!(extract_color("gray").unwrap().rgb, (128, 128, 128));
    assert_eq!(extract_color("grey").unwrap().rgb, (128, 128, 128));
}

#[test]
fn palette_round_trip() {
    for &(name, rgb) in PALETTE {
        let color = extract_color(name).unwrap();
        assert_eq!(color.rgb, rgb, "palette entry {name}");
        let decoded = (
            u8::from_str_radix(&color.hex[1..3], 16).unwrap(),
            u8::from_str_radix(&color.hex[3..5], 16).unwrap(),
            u8::from_str_radix(&color.hex[5..7], 16).unwrap(),
        );
        assert_eq!(decoded, rgb, "hex of {name} decodes back");
    }
}

// -----------------------------------------------------------------------------
// Priority
// -----------------------------------------------------------------------------

#[test]
fn hex_beats_name() {
    let color = extract_color("red but actually #AABBCC").unwrap();
    assert_eq!(color.rgb, (170, 187, 204));
    assert_eq!(color.hex, "#aabbcc");
    assert_eq!(color.name, "#aabbcc");
}

#[test]
fn rgb_beats_name() {
    let color = extract_color("rgb(1,2,3) is nicer than red").unwrap();
    assert_eq!(color.rgb, (1, 2, 3));
    assert_eq!(color.name, "rgb(1, 2, 3)");
}

#[test]
fn hex_beats_rgb() {
    let color = extract_color("rgb(1,2,3) or #040506").unwrap();
    assert_eq!(color.rgb, (4, 5, 6));
}

// -----------------------------------------------------------------------------
// No match / degenerate input
// -----------------------------------------------------------------------------

#[test]
fn plain_text_yields_none() {
    assert_eq!(extract_color("hello there"), None);
    assert_eq!(extract_color("This is just text"), None);
}

#[test]
fn empty_text_yields_none() {
    assert_eq!(extract_color(""), None);
    assert_eq!(extract_effect(""), None);
}

// -----------------------------------------------------------------------------
// Effects
// -----------------------------------------------------------------------------

#[test]
fn effect_underscored_form() {
    assert_eq!(extract_effect("wipe_down please"), Some(Effect::WipeDown));
}

#[test]
fn effect_spaced_form() {
    assert_eq!(extract_effect("do a wipe down"), Some(Effect::WipeDown));
}

#[test]
fn effect_case_insensitive() {
    assert_eq!(extract_effect("FADE to black"), Some(Effect::Fade));
}

#[test]
fn effect_longest_wins() {
    // "chase_spiral" must not resolve to a shorter overlapping token
    assert_eq!(extract_effect("chase_spiral"), Some(Effect::ChaseSpiral));
    assert_eq!(extract_effect("chase spiral"), Some(Effect::ChaseSpiral));
}

#[test]
fn effect_buffer_group() {
    assert_eq!(
        extract_effect("colour waterfall!"),
        Some(Effect::ColourWaterfall)
    );
    assert_eq!(extract_effect("colour_rain"), Some(Effect::ColourRain));
}

#[test]
fn effect_none_for_plain_text() {
    assert_eq!(extract_effect("just a mention"), None);
}

#[test]
fn every_keyword_resolves_to_itself() {
    for effect in Effect::ALL {
        let keyword = effect.keyword();
        assert_eq!(extract_effect(keyword), Some(effect), "{keyword}");
        assert_eq!(
            extract_effect(&keyword.replace('_', " ")),
            Some(effect),
            "spaced {keyword}"
        );
    }
}

#[test]
fn effect_serializes_to_keyword() {
    let json = serde_json::to_string(&Effect::ChaseSpiral).unwrap();
    assert_eq!(json, "\"chase_spiral\"");
}

// -----------------------------------------------------------------------------
// Default color
// -----------------------------------------------------------------------------

#[test]
fn default_is_white() {
    assert_eq!(
        default_color(),
        ColorDescriptor {
            name: "white".to_string(),
            rgb: (255, 255, 255),
            hex: "#ffffff".to_string(),
        }
    );
}

#[test]
fn descriptor_serializes_rgb_as_array() {
    let json = serde_json::to_value(default_color()).unwrap();
    assert_eq!(json["name"], "white");
    assert_eq!(json["rgb"], serde_json::json!([255, 255, 255]));
    assert_eq!(json["hex"], "#ffffff");
}
