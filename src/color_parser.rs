// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use arrayref::array_ref;

use crate::color::Color;

/// Parses a CSS color string.
///
/// Supports `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()`
/// with integer or percentage channels, `hsl()`/`hsla()`, the named CSS
/// colors and `transparent`.
pub fn parse_color(css: &str) -> Option<Color> {
    let s = css.trim().to_ascii_lowercase();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex.as_bytes());
    }

    if let Some(args) = strip_function(&s, "rgba").or_else(|| strip_function(&s, "rgb")) {
        return parse_rgb_args(args);
    }

    if let Some(args) = strip_function(&s, "hsla").or_else(|| strip_function(&s, "hsl")) {
        return parse_hsl_args(args);
    }

    if s == "transparent" {
        return Some(Color::TRANSPARENT);
    }

    named_color(&s).map(|(r, g, b)| Color::from_rgba8(r, g, b, 255))
}

fn strip_function<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?.trim_start().strip_prefix('(')?.trim_end().strip_suffix(')')
}

fn parse_hex(bytes: &[u8]) -> Option<Color> {
    match bytes.len() {
        3 => {
            let r = hex_digit(bytes[0])?;
            let g = hex_digit(bytes[1])?;
            let b = hex_digit(bytes[2])?;
            Some(Color::from_rgba8(r * 17, g * 17, b * 17, 255))
        }
        4 => {
            let r = hex_digit(bytes[0])?;
            let g = hex_digit(bytes[1])?;
            let b = hex_digit(bytes[2])?;
            let a = hex_digit(bytes[3])?;
            Some(Color::from_rgba8(r * 17, g * 17, b * 17, a * 17))
        }
        6 => {
            let r = hex_pair(array_ref![bytes, 0, 2])?;
            let g = hex_pair(array_ref![bytes, 2, 2])?;
            let b = hex_pair(array_ref![bytes, 4, 2])?;
            Some(Color::from_rgba8(r, g, b, 255))
        }
        8 => {
            let r = hex_pair(array_ref![bytes, 0, 2])?;
            let g = hex_pair(array_ref![bytes, 2, 2])?;
            let b = hex_pair(array_ref![bytes, 4, 2])?;
            let a = hex_pair(array_ref![bytes, 6, 2])?;
            Some(Color::from_rgba8(r, g, b, a))
        }
        _ => None,
    }
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

fn hex_pair(pair: &[u8; 2]) -> Option<u8> {
    Some(hex_digit(pair[0])? * 16 + hex_digit(pair[1])?)
}

fn split_args(args: &str) -> Vec<&str> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect()
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    let a = if parts.len() == 4 {
        parse_alpha(parts[3])?
    } else {
        255
    };

    Some(Color::from_rgba8(r, g, b, a))
}

// An rgb() channel: an integer 0..=255 or a percentage.
fn parse_channel(s: &str) -> Option<u8> {
    if let Some(pct) = s.strip_suffix('%') {
        let v: f32 = pct.parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        Some((v.clamp(0.0, 100.0) / 100.0 * 255.0 + 0.5) as u8)
    } else {
        let v: f32 = s.parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        Some((v.clamp(0.0, 255.0) + 0.5) as u8)
    }
}

// An alpha value: a float 0..=1 or a percentage.
fn parse_alpha(s: &str) -> Option<u8> {
    let v = if let Some(pct) = s.strip_suffix('%') {
        let v: f32 = pct.parse().ok()?;
        v / 100.0
    } else {
        s.parse().ok()?
    };

    if !v.is_finite() {
        return None;
    }

    Some((v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8)
}

fn parse_hsl_args(args: &str) -> Option<Color> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let h: f32 = parts[0].strip_suffix("deg").unwrap_or(parts[0]).parse().ok()?;
    let s: f32 = parts[1].strip_suffix('%')?.parse().ok()?;
    let l: f32 = parts[2].strip_suffix('%')?.parse().ok()?;
    if !h.is_finite() || !s.is_finite() || !l.is_finite() {
        return None;
    }

    let a = if parts.len() == 4 {
        parse_alpha(parts[3])?
    } else {
        255
    };

    let (r, g, b) = hsl_to_rgb(h, s.clamp(0.0, 100.0) / 100.0, l.clamp(0.0, 100.0) / 100.0);
    Some(Color::from_rgba8(r, g, b, a))
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0) / 360.0;

    if s == 0.0 {
        let v = (l * 255.0 + 0.5) as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let to_channel = |mut t: f32| -> u8 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }

        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };

        (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
    };

    (
        to_channel(h + 1.0 / 3.0),
        to_channel(h),
        to_channel(h - 1.0 / 3.0),
    )
}

#[rustfmt::skip]
fn named_color(name: &str) -> Option<(u8, u8, u8)> {
    let c = match name {
        "aliceblue"            => (240, 248, 255),
        "antiquewhite"         => (250, 235, 215),
        "aqua"                 => (0, 255, 255),
        "aquamarine"           => (127, 255, 212),
        "azure"                => (240, 255, 255),
        "beige"                => (245, 245, 220),
        "bisque"               => (255, 228, 196),
        "black"                => (0, 0, 0),
        "blanchedalmond"       => (255, 235, 205),
        "blue"                 => (0, 0, 255),
        "blueviolet"           => (138, 43, 226),
        "brown"                => (165, 42, 42),
        "burlywood"            => (222, 184, 135),
        "cadetblue"            => (95, 158, 160),
        "chartreuse"           => (127, 255, 0),
        "chocolate"            => (210, 105, 30),
        "coral"                => (255, 127, 80),
        "cornflowerblue"       => (100, 149, 237),
        "cornsilk"             => (255, 248, 220),
        "crimson"              => (220, 20, 60),
        "cyan"                 => (0, 255, 255),
        "darkblue"             => (0, 0, 139),
        "darkcyan"             => (0, 139, 139),
        "darkgoldenrod"        => (184, 134, 11),
        "darkgray"             => (169, 169, 169),
        "darkgreen"            => (0, 100, 0),
        "darkgrey"             => (169, 169, 169),
        "darkkhaki"            => (189, 183, 107),
        "darkmagenta"          => (139, 0, 139),
        "darkolivegreen"       => (85, 107, 47),
        "darkorange"           => (255, 140, 0),
        "darkorchid"           => (153, 50, 204),
        "darkred"              => (139, 0, 0),
        "darksalmon"           => (233, 150, 122),
        "darkseagreen"         => (143, 188, 143),
        "darkslateblue"        => (72, 61, 139),
        "darkslategray"        => (47, 79, 79),
        "darkslategrey"        => (47, 79, 79),
        "darkturquoise"        => (0, 206, 209),
        "darkviolet"           => (148, 0, 211),
        "deeppink"             => (255, 20, 147),
        "deepskyblue"          => (0, 191, 255),
        "dimgray"              => (105, 105, 105),
        "dimgrey"              => (105, 105, 105),
        "dodgerblue"           => (30, 144, 255),
        "firebrick"            => (178, 34, 34),
        "floralwhite"          => (255, 250, 240),
        "forestgreen"          => (34, 139, 34),
        "fuchsia"              => (255, 0, 255),
        "gainsboro"            => (220, 220, 220),
        "ghostwhite"           => (248, 248, 255),
        "gold"                 => (255, 215, 0),
        "goldenrod"            => (218, 165, 32),
        "gray"                 => (128, 128, 128),
        "green"                => (0, 128, 0),
        "greenyellow"          => (173, 255, 47),
        "grey"                 => (128, 128, 128),
        "honeydew"             => (240, 255, 240),
        "hotpink"              => (255, 105, 180),
        "indianred"            => (205, 92, 92),
        "indigo"               => (75, 0, 130),
        "ivory"                => (255, 255, 240),
        "khaki"                => (240, 230, 140),
        "lavender"             => (230, 230, 250),
        "lavenderblush"        => (255, 240, 245),
        "lawngreen"            => (124, 252, 0),
        "lemonchiffon"         => (255, 250, 205),
        "lightblue"            => (173, 216, 230),
        "lightcoral"           => (240, 128, 128),
        "lightcyan"            => (224, 255, 255),
        "lightgoldenrodyellow" => (250, 250, 210),
        "lightgray"            => (211, 211, 211),
        "lightgreen"           => (144, 238, 144),
        "lightgrey"            => (211, 211, 211),
        "lightpink"            => (255, 182, 193),
        "lightsalmon"          => (255, 160, 122),
        "lightseagreen"        => (32, 178, 170),
        "lightskyblue"         => (135, 206, 250),
        "lightslategray"       => (119, 136, 153),
        "lightslategrey"       => (119, 136, 153),
        "lightsteelblue"       => (176, 196, 222),
        "lightyellow"          => (255, 255, 224),
        "lime"                 => (0, 255, 0),
        "limegreen"            => (50, 205, 50),
        "linen"                => (250, 240, 230),
        "magenta"              => (255, 0, 255),
        "maroon"               => (128, 0, 0),
        "mediumaquamarine"     => (102, 205, 170),
        "mediumblue"           => (0, 0, 205),
        "mediumorchid"         => (186, 85, 211),
        "mediumpurple"         => (147, 112, 219),
        "mediumseagreen"       => (60, 179, 113),
        "mediumslateblue"      => (123, 104, 238),
        "mediumspringgreen"    => (0, 250, 154),
        "mediumturquoise"      => (72, 209, 204),
        "mediumvioletred"      => (199, 21, 133),
        "midnightblue"         => (25, 25, 112),
        "mintcream"            => (245, 255, 250),
        "mistyrose"            => (255, 228, 225),
        "moccasin"             => (255, 228, 181),
        "navajowhite"          => (255, 222, 173),
        "navy"                 => (0, 0, 128),
        "oldlace"              => (253, 245, 230),
        "olive"                => (128, 128, 0),
        "olivedrab"            => (107, 142, 35),
        "orange"               => (255, 165, 0),
        "orangered"            => (255, 69, 0),
        "orchid"               => (218, 112, 214),
        "palegoldenrod"        => (238, 232, 170),
        "palegreen"            => (152, 251, 152),
        "paleturquoise"        => (175, 238, 238),
        "palevioletred"        => (219, 112, 147),
        "papayawhip"           => (255, 239, 213),
        "peachpuff"            => (255, 218, 185),
        "peru"                 => (205, 133, 63),
        "pink"                 => (255, 192, 203),
        "plum"                 => (221, 160, 221),
        "powderblue"           => (176, 224, 230),
        "purple"               => (128, 0, 128),
        "rebeccapurple"        => (102, 51, 153),
        "red"                  => (255, 0, 0),
        "rosybrown"            => (188, 143, 143),
        "royalblue"            => (65, 105, 225),
        "saddlebrown"          => (139, 69, 19),
        "salmon"               => (250, 128, 114),
        "sandybrown"           => (244, 164, 96),
        "seagreen"             => (46, 139, 87),
        "seashell"             => (255, 245, 238),
        "sienna"               => (160, 82, 45),
        "silver"               => (192, 192, 192),
        "skyblue"              => (135, 206, 235),
        "slateblue"            => (106, 90, 205),
        "slategray"            => (112, 128, 144),
        "slategrey"            => (112, 128, 144),
        "snow"                 => (255, 250, 250),
        "springgreen"          => (0, 255, 127),
        "steelblue"            => (70, 130, 180),
        "tan"                  => (210, 180, 140),
        "teal"                 => (0, 128, 128),
        "thistle"              => (216, 191, 216),
        "tomato"               => (255, 99, 71),
        "turquoise"            => (64, 224, 208),
        "violet"               => (238, 130, 238),
        "wheat"                => (245, 222, 179),
        "white"                => (255, 255, 255),
        "whitesmoke"           => (245, 245, 245),
        "yellow"               => (255, 255, 0),
        "yellowgreen"          => (154, 205, 50),
        _ => return None,
    };

    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex() {
        assert_eq!(parse_color("#f00"), Some(Color::from_rgba8(255, 0, 0, 255)));
        assert_eq!(parse_color("#f008"), Some(Color::from_rgba8(255, 0, 0, 136)));
        assert_eq!(
            parse_color("#102030"),
            Some(Color::from_rgba8(16, 32, 48, 255))
        );
        assert_eq!(
            parse_color("#10203040"),
            Some(Color::from_rgba8(16, 32, 48, 64))
        );
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#zzz"), None);
    }

    #[test]
    fn rgb_functions() {
        assert_eq!(
            parse_color("rgb(255, 165, 0)"),
            Some(Color::from_rgba8(255, 165, 0, 255))
        );
        assert_eq!(
            parse_color("rgba(255, 165, 0, 0.5)"),
            Some(Color::from_rgba8(255, 165, 0, 128))
        );
        assert_eq!(
            parse_color("rgb(100%, 0%, 50%)"),
            Some(Color::from_rgba8(255, 0, 128, 255))
        );
        assert_eq!(parse_color("rgb(1, 2)"), None);
        assert_eq!(parse_color("rgb(a, b, c)"), None);
    }

    #[test]
    fn hsl_functions() {
        assert_eq!(
            parse_color("hsl(0, 100%, 50%)"),
            Some(Color::from_rgba8(255, 0, 0, 255))
        );
        assert_eq!(
            parse_color("hsl(120, 100%, 50%)"),
            Some(Color::from_rgba8(0, 255, 0, 255))
        );
        assert_eq!(
            parse_color("hsla(240, 100%, 50%, 0.5)"),
            Some(Color::from_rgba8(0, 0, 255, 128))
        );
        assert_eq!(
            parse_color("hsl(0, 0%, 50%)"),
            Some(Color::from_rgba8(128, 128, 128, 255))
        );
    }

    #[test]
    fn named() {
        assert_eq!(parse_color("red"), Some(Color::from_rgba8(255, 0, 0, 255)));
        assert_eq!(parse_color("  White "), Some(Color::WHITE));
        assert_eq!(parse_color("transparent"), Some(Color::TRANSPARENT));
        assert_eq!(
            parse_color("rebeccapurple"),
            Some(Color::from_rgba8(102, 51, 153, 255))
        );
        assert_eq!(parse_color("notacolor"), None);
    }
}
