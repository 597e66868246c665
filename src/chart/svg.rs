//! Serialize a [`VectorScene`](super::scene::VectorScene) to SVG markup.

use std::fmt::Write;

use super::scene::{
    FontWeight, GradientDef, Paint, PathCommand, SceneNode, Stroke, TextAnchor, VectorScene,
};
use super::style::FONT_FAMILY;

/// Escape text content for embedding in SVG.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn fmt_coord(v: f64) -> String {
    // two decimals keeps the markup compact without visible error at 2x scale
    let rounded = (v * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

fn paint_attr(paint: &Option<Paint>) -> String {
    match paint {
        Some(Paint::Color(c)) => format!(" fill=\"{}\"", c),
        Some(Paint::GradientRef(id)) => format!(" fill=\"url(#{})\"", id),
        None => " fill=\"none\"".to_string(),
    }
}

fn stroke_attr(stroke: &Option<Stroke>) -> String {
    match stroke {
        Some(s) => format!(" stroke=\"{}\" stroke-width=\"{}\"", s.color, s.width),
        None => String::new(),
    }
}

fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for cmd in commands {
        match cmd {
            PathCommand::MoveTo(x, y) => {
                let _ = write!(d, "M{},{} ", fmt_coord(*x), fmt_coord(*y));
            }
            PathCommand::LineTo(x, y) => {
                let _ = write!(d, "L{},{} ", fmt_coord(*x), fmt_coord(*y));
            }
            PathCommand::Close => d.push_str("Z "),
        }
    }
    d.trim_end().to_string()
}

fn write_node(out: &mut String, node: &SceneNode) {
    match node {
        SceneNode::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}{}/>",
                fmt_coord(*x),
                fmt_coord(*y),
                fmt_coord(*width),
                fmt_coord(*height),
                paint_attr(fill),
                stroke_attr(stroke),
            );
        }
        SceneNode::Line { x1, y1, x2, y2, stroke } => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                fmt_coord(*x1),
                fmt_coord(*y1),
                fmt_coord(*x2),
                fmt_coord(*y2),
                stroke.color,
                stroke.width,
            );
        }
        SceneNode::Path { commands, fill, stroke } => {
            let _ = write!(
                out,
                "<path d=\"{}\"{}{}/>",
                path_data(commands),
                paint_attr(fill),
                stroke_attr(stroke),
            );
        }
        SceneNode::Circle { cx, cy, r, fill, stroke } => {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}{}/>",
                fmt_coord(*cx),
                fmt_coord(*cy),
                fmt_coord(*r),
                paint_attr(&Some(fill.clone())),
                stroke_attr(stroke),
            );
        }
        SceneNode::Text {
            x,
            y,
            content,
            anchor,
            size,
            weight,
            color,
        } => {
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let weight = match weight {
                FontWeight::Normal => "",
                FontWeight::Bold => " font-weight=\"bold\"",
            };
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" font-family=\"{}\" font-size=\"{}\"{} fill=\"{}\">{}</text>",
                fmt_coord(*x),
                fmt_coord(*y),
                anchor,
                FONT_FAMILY,
                size,
                weight,
                color,
                escape_text(content),
            );
        }
        SceneNode::Group {
            stroke,
            opacity,
            children,
        } => {
            out.push_str("<g");
            if let Some(s) = stroke {
                let _ = write!(out, " stroke=\"{}\" stroke-width=\"{}\"", s.color, s.width);
            }
            if let Some(o) = opacity {
                let _ = write!(out, " opacity=\"{}\"", o);
            }
            out.push('>');
            for child in children {
                write_node(out, child);
            }
            out.push_str("</g>");
        }
    }
}

fn write_gradient(out: &mut String, def: &GradientDef) {
    let _ = write!(
        out,
        "<linearGradient id=\"{}\" x1=\"0%\" y1=\"0%\" x2=\"0%\" y2=\"100%\">\
         <stop offset=\"0%\" style=\"stop-color:{};stop-opacity:{}\"/>\
         <stop offset=\"100%\" style=\"stop-color:{};stop-opacity:{}\"/>\
         </linearGradient>",
        def.id, def.color, def.top_opacity, def.color, def.bottom_opacity,
    );
}

/// Render the scene as a standalone SVG document.
pub fn to_svg(scene: &VectorScene) -> String {
    let mut out = String::with_capacity(4096);
    let _ = write!(
        out,
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">",
        scene.width, scene.height,
    );
    if !scene.defs.is_empty() {
        out.push_str("<defs>");
        for def in &scene.defs {
            write_gradient(&mut out, def);
        }
        out.push_str("</defs>");
    }
    for node in &scene.nodes {
        write_node(&mut out, node);
    }
    out.push_str("</svg>");
    out
}
