use std::fmt::Write;

use super::{Avatar, Theme};

const HAIR_PATH: &str = "M 20 30 Q 30 10 50 15 Q 70 10 80 30 Q 75 25 50 20 Q 25 25 20 30";
const HAIR_PATH_ALT: &str = "M 22 28 Q 32 8 50 13 Q 68 8 78 28 Q 73 23 50 18 Q 27 23 22 28";
const MOUTH_PATH: &str = "M 42 58 Q 50 65 58 58";
const MOUTH_PATH_ALT: &str = "M 42 60 Q 50 67 58 60";

/// Render an avatar as a standalone SVG document with embedded SMIL animations.
///
/// Gradient and filter ids are scoped by avatar id so several avatars can share one page.
/// Animations and category decorations the renderer does not know are simply left out.
pub fn render_avatar(avatar: &Avatar) -> String {
    let [c1, c2, c3] = avatar.colors;
    let id = avatar.id;
    let anim = avatar.animation;
    let mut svg = String::with_capacity(4096);

    // Writing into a String cannot fail.
    let _ = write!(
        svg,
        r#"<svg width="100%" height="100%" viewBox="0 0 100 100" xmlns="http://www.w3.org/2000/svg" class="avatar-{anim}">"#
    );
    let _ = write!(
        svg,
        concat!(
            "<defs>",
            r#"<linearGradient id="grad-{id}" x1="0%" y1="0%" x2="100%" y2="100%">"#,
            r#"<stop offset="0%" style="stop-color:{c1};stop-opacity:1"/>"#,
            r#"<stop offset="50%" style="stop-color:{c2};stop-opacity:1"/>"#,
            r#"<stop offset="100%" style="stop-color:{c3};stop-opacity:1"/>"#,
            "</linearGradient>",
            r#"<filter id="glow-{id}"><feGaussianBlur stdDeviation="3" result="coloredBlur"/>"#,
            r#"<feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge></filter>"#,
            r#"<filter id="shadow-{id}"><feDropShadow dx="2" dy="2" stdDeviation="3" flood-opacity="0.3"/></filter>"#,
            "</defs>"
        ),
        id = id,
        c1 = c1,
        c2 = c2,
        c3 = c3,
    );

    // Background
    let _ = write!(
        svg,
        r#"<circle cx="50" cy="50" r="45" fill="url(#grad-{id})" filter="url(#shadow-{id})">"#
    );
    match anim {
        "bounce" => svg.push_str(r#"<animateTransform attributeName="transform" type="translate" values="0,0;0,-5;0,0" dur="2s" repeatCount="indefinite"/>"#),
        "glow" => svg.push_str(r#"<animate attributeName="r" values="45;48;45" dur="3s" repeatCount="indefinite"/>"#),
        "pulse" => svg.push_str(r#"<animate attributeName="opacity" values="1;0.7;1" dur="2s" repeatCount="indefinite"/>"#),
        _ => {}
    }
    svg.push_str("</circle>");

    // Face
    svg.push_str(r#"<circle cx="50" cy="50" r="35" fill="rgba(255,255,255,0.9)" opacity="0.8"/>"#);
    for cx in [40, 60] {
        let _ = write!(svg, r#"<circle cx="{cx}" cy="42" r="4" fill="white">"#);
        if anim == "blink" {
            svg.push_str(r#"<animate attributeName="ry" values="4;0.5;4" dur="4s" repeatCount="indefinite"/>"#);
        }
        svg.push_str("</circle>");
    }
    svg.push_str(r#"<circle cx="40" cy="42" r="2" fill="black"/><circle cx="60" cy="42" r="2" fill="black"/>"#);
    svg.push_str(r#"<ellipse cx="50" cy="50" rx="1.5" ry="2" fill="rgba(0,0,0,0.1)"/>"#);

    let _ = write!(
        svg,
        r#"<path d="{MOUTH_PATH}" stroke="{c1}" stroke-width="2" fill="none">"#
    );
    if anim == "smile" {
        let _ = write!(
            svg,
            r#"<animate attributeName="d" values="{MOUTH_PATH};{MOUTH_PATH_ALT};{MOUTH_PATH}" dur="3s" repeatCount="indefinite"/>"#
        );
    }
    svg.push_str("</path>");

    push_category_decoration(&mut svg, avatar);
    push_special_effect(&mut svg, avatar);

    svg.push_str("</svg>");
    svg
}

fn push_category_decoration(svg: &mut String, avatar: &Avatar) {
    let [_, c2, c3] = avatar.colors;
    match avatar.category {
        "Fantasy" => {
            let _ = write!(
                svg,
                r#"<polygon points="50,15 52,25 62,25 54,32 57,42 50,36 43,42 46,32 38,25 48,25" fill="{c3}" opacity="0.8"><animateTransform attributeName="transform" type="rotate" values="0 50 50;360 50 50" dur="10s" repeatCount="indefinite"/></polygon>"#
            );
        }
        "Gaming" => {
            let _ = write!(
                svg,
                r#"<rect x="25" y="20" width="50" height="8" fill="{c2}" rx="4"><animate attributeName="opacity" values="0.7;1;0.7" dur="2s" repeatCount="indefinite"/></rect><circle cx="20" cy="24" r="8" fill="{c2}" opacity="0.8"/><circle cx="80" cy="24" r="8" fill="{c2}" opacity="0.8"/>"#
            );
        }
        "Professional" => {
            let _ = write!(
                svg,
                r#"<polygon points="50,65 45,70 45,85 55,85 55,70" fill="{c2}"/><rect x="40" y="65" width="20" height="5" fill="{c3}"/>"#
            );
        }
        "Anime" => {
            let _ = write!(
                svg,
                r#"<path d="{HAIR_PATH}" fill="{c2}"><animate attributeName="d" values="{HAIR_PATH};{HAIR_PATH_ALT};{HAIR_PATH}" dur="4s" repeatCount="indefinite"/></path>"#
            );
        }
        "Pets" => {
            let wag = if avatar.animation == "wag" {
                r#"<animateTransform attributeName="transform" type="rotate" values="-30 35 25;-20 35 25;-30 35 25" dur="1s" repeatCount="indefinite"/>"#
            } else {
                ""
            };
            let _ = write!(
                svg,
                r#"<ellipse cx="35" cy="25" rx="8" ry="12" fill="{c2}" transform="rotate(-30 35 25)">{wag}</ellipse><ellipse cx="65" cy="25" rx="8" ry="12" fill="{c2}" transform="rotate(30 65 25)"/>"#
            );
        }
        _ => {}
    }
}

fn push_special_effect(svg: &mut String, avatar: &Avatar) {
    let [c1, c2, c3] = avatar.colors;
    match avatar.animation {
        "sparkle" => {
            svg.push_str(r#"<g opacity="0.8">"#);
            for (points, dur) in [
                ("20,20 22,25 27,25 23,28 25,33 20,30 15,33 17,28 13,25 18,25", "2s"),
                ("80,30 82,35 87,35 83,38 85,43 80,40 75,43 77,38 73,35 78,35", "2.5s"),
                ("30,80 32,85 37,85 33,88 35,93 30,90 25,93 27,88 23,85 28,85", "3s"),
            ] {
                let _ = write!(
                    svg,
                    r#"<polygon points="{points}" fill="white"><animate attributeName="opacity" values="0;1;0" dur="{dur}" repeatCount="indefinite"/></polygon>"#
                );
            }
            svg.push_str("</g>");
        }
        "fire" => {
            svg.push_str(r#"<g opacity="0.7">"#);
            for (cx, cy, rx, ry, fill, dur) in [
                (30, 20, 3, 8, "#ff4757", "1s"),
                (50, 15, 4, 10, "#ff6348", "1.2s"),
                (70, 20, 3, 8, "#ff4757", "0.8s"),
            ] {
                let peak = ry + ry / 2;
                let _ = write!(
                    svg,
                    r#"<ellipse cx="{cx}" cy="{cy}" rx="{rx}" ry="{ry}" fill="{fill}"><animate attributeName="ry" values="{ry};{peak};{ry}" dur="{dur}" repeatCount="indefinite"/></ellipse>"#
                );
            }
            svg.push_str("</g>");
        }
        "rgb" => {
            let _ = write!(
                svg,
                r#"<circle cx="50" cy="50" r="48" fill="none" stroke="url(#grad-{id})" stroke-width="4" opacity="0.6"><animate attributeName="stroke" values="{c1};{c2};{c3};{c1}" dur="2s" repeatCount="indefinite"/></circle>"#,
                id = avatar.id
            );
        }
        _ => {}
    }
}

/// CSS custom properties and body classes that apply a theme.
pub fn render_theme_css(theme: &Theme) -> String {
    let mut css = String::with_capacity(512);
    let _ = writeln!(css, ":root {{");
    for (name, value) in [
        ("background", theme.background),
        ("primary", theme.primary),
        ("secondary", theme.secondary),
        ("accent", theme.accent),
        ("text", theme.text),
        ("card-bg", theme.card_bg),
    ] {
        let _ = writeln!(css, "  --theme-{name}: {value};");
    }
    let _ = writeln!(css, "}}");

    let selector = theme_body_classes(theme).replace(' ', ".");
    let _ = writeln!(
        css,
        "body.{selector} {{ background: var(--theme-background); color: var(--theme-text); }}"
    );
    css
}

/// Class list the client puts on `<body>` for a theme.
pub fn theme_body_classes(theme: &Theme) -> String {
    match theme.special {
        Some(special) => format!("theme-{} {}", theme.animation, special),
        None => format!("theme-{}", theme.animation),
    }
}
