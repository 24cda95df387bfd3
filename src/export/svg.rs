use super::geometry::{self, Rect};
use super::options::ExportOptions;
use crate::graph::{DiagramSnapshot, LABEL_CHAR_WIDTH, Node, NodeKind, Position, Side};
use itertools::Itertools;
use std::fmt::Write as _;

const DATABASE_CAP: f64 = 10.0;
const SUBPROCESS_BAR_INSET: f64 = 10.0;

/// A rendered SVG document with its logical size.
pub(super) struct SvgScene {
    pub markup: String,
    pub width: u32,
    pub height: u32,
}

/// Renders the diagram content layer, framed by its padded bounding box.
///
/// `bounds` must already include the padding and fit in `u32`; every diagram
/// coordinate is shifted so that `bounds` starts at the origin.
pub(super) fn render(
    snapshot: &DiagramSnapshot,
    bounds: Rect,
    options: &ExportOptions,
) -> SvgScene {
    let width = bounds.width.ceil().max(1.0) as u32;
    let height = bounds.height.ceil().max(1.0) as u32;
    let edge_color = escape_xml(&options.edge_color);
    let label_color = escape_xml(&options.label_color);
    let shift = |p: Position| Position::new(p.x - bounds.x, p.y - bounds.y);

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = writeln!(out, "<defs>");
    let _ = writeln!(
        out,
        r#"  <marker id="arrow" markerWidth="10" markerHeight="7" refX="10" refY="3.5" orient="auto"><polygon points="0 0, 10 3.5, 0 7" fill="{}"/></marker>"#,
        edge_color
    );
    let _ = writeln!(out, "</defs>");
    let _ = writeln!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        width,
        height,
        escape_xml(&options.background)
    );

    // Edges sit underneath nodes.
    let _ = writeln!(out, r#"<g class="edges">"#);
    for edge in &snapshot.edges {
        let (Some(source), Some(target)) =
            (snapshot.node(&edge.source), snapshot.node(&edge.target))
        else {
            continue;
        };
        let route: Vec<Position> = geometry::edge_route(edge, source, target)
            .into_iter()
            .map(shift)
            .collect();
        let points = route
            .iter()
            .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
            .join(" ");
        let _ = writeln!(
            out,
            r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="1.5" marker-end="url(#arrow)"/>"#,
            points, edge_color
        );
        if !edge.label.is_empty() {
            if let Some(anchor) = geometry::label_anchor(&route) {
                write_edge_label(&mut out, anchor, &edge.label, options);
            }
        }
    }
    let _ = writeln!(out, "</g>");

    let _ = writeln!(out, r#"<g class="nodes">"#);
    for node in &snapshot.nodes {
        let rect = Rect::of_node(node);
        let local = Rect {
            x: rect.x - bounds.x,
            y: rect.y - bounds.y,
            ..rect
        };
        write_shape(&mut out, node, local);
        write_text(&mut out, local.center(), &node.label, &label_color, options);
    }
    let _ = writeln!(out, "</g>");
    out.push_str("</svg>\n");

    SvgScene {
        markup: out,
        width,
        height,
    }
}

fn write_shape(out: &mut String, node: &Node, r: Rect) {
    let fill = node.kind.fill_color();
    let stroke = node.kind.stroke_color();
    let (x, y, w, h) = (r.x, r.y, r.width, r.height);
    match node.kind {
        NodeKind::Start | NodeKind::End => {
            let _ = writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" stroke="{}"/>"#,
                fmt_num(x), fmt_num(y), fmt_num(w), fmt_num(h), fmt_num(h / 2.0), fill, stroke
            );
        }
        NodeKind::Process | NodeKind::Subprocess => {
            let _ = writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="4" fill="{}" stroke="{}"/>"#,
                fmt_num(x), fmt_num(y), fmt_num(w), fmt_num(h), fill, stroke
            );
            if node.kind == NodeKind::Subprocess {
                for bar_x in [x + SUBPROCESS_BAR_INSET, x + w - SUBPROCESS_BAR_INSET] {
                    let _ = writeln!(
                        out,
                        r##"  <line x1="{bx}" y1="{}" x2="{bx}" y2="{}" stroke="#ffffff" stroke-opacity="0.5"/>"##,
                        fmt_num(y),
                        fmt_num(y + h),
                        bx = fmt_num(bar_x)
                    );
                }
            }
        }
        NodeKind::Decision => {
            let points = [
                r.anchor(Side::Top),
                r.anchor(Side::Right),
                r.anchor(Side::Bottom),
                r.anchor(Side::Left),
            ];
            write_polygon(out, &points, fill, stroke);
        }
        NodeKind::ManualInput => {
            let points = [
                Position::new(x, y + h * 0.2),
                Position::new(x + w, y),
                Position::new(x + w, y + h),
                Position::new(x, y + h),
            ];
            write_polygon(out, &points, fill, stroke);
        }
        NodeKind::InputOutput => {
            let shear = h * 20f64.to_radians().tan();
            let points = [
                Position::new(x + shear, y),
                Position::new(x + w, y),
                Position::new(x + w - shear, y + h),
                Position::new(x, y + h),
            ];
            write_polygon(out, &points, fill, stroke);
        }
        NodeKind::Database => {
            let rx = w / 2.0;
            let cap = DATABASE_CAP;
            let _ = writeln!(
                out,
                r#"  <path d="M {x} {top} A {rx} {cap} 0 0 0 {right} {top} V {bottom} A {rx} {cap} 0 0 1 {x} {bottom} Z" fill="{fill}" stroke="{stroke}"/>"#,
                x = fmt_num(x),
                top = fmt_num(y + cap),
                right = fmt_num(x + w),
                bottom = fmt_num(y + h - cap),
                rx = fmt_num(rx),
                cap = fmt_num(cap),
                fill = fill,
                stroke = stroke
            );
            let _ = writeln!(
                out,
                r#"  <ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}" stroke="{}"/>"#,
                fmt_num(x + rx),
                fmt_num(y + cap),
                fmt_num(rx),
                fmt_num(cap),
                fill,
                stroke
            );
        }
    }
}

fn write_polygon(out: &mut String, points: &[Position], fill: &str, stroke: &str) {
    let points = points
        .iter()
        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
        .join(" ");
    let _ = writeln!(
        out,
        r#"  <polygon points="{}" fill="{}" stroke="{}"/>"#,
        points, fill, stroke
    );
}

fn write_edge_label(out: &mut String, at: Position, label: &str, options: &ExportOptions) {
    let width = label.chars().count() as f64 * LABEL_CHAR_WIDTH + 12.0;
    let height = options.font_size + 8.0;
    let _ = writeln!(
        out,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="3" fill="{}"/>"#,
        fmt_num(at.x - width / 2.0),
        fmt_num(at.y - height / 2.0),
        fmt_num(width),
        fmt_num(height),
        escape_xml(&options.background)
    );
    write_text(out, at, label, &escape_xml(&options.edge_color), options);
}

fn write_text(out: &mut String, at: Position, text: &str, color: &str, options: &ExportOptions) {
    if text.is_empty() {
        return;
    }
    let _ = writeln!(
        out,
        r#"  <text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
        fmt_num(at.x),
        fmt_num(at.y),
        escape_xml(&options.font_family),
        fmt_num(options.font_size),
        color,
        escape_xml(text)
    );
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

pub(super) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
