//! SVG renderer for sheet documents
//! Writes the laser-cutter job as a millimetre-sized SVG
//! Features:
//! - Single y-flip at the root so nested groups keep y-up coordinates
//! - One `<g transform>` per document group
//! - Per-style stroke colours (cut, etch, reference)
//! - Optional omission of reference geometry for cutter submission

use crate::canvas::{GroupItem, SheetDocument, SheetShape, ShapeKind};
use enclosurekit_core::path::svg_arc_commands;
use enclosurekit_core::{
    ArcSegment, ArcSweep, DocumentError, DrawingDocument, EdgeMask, Error, GroupId, Rect,
    Result, Style, TextAlign,
};
use enclosurekit_core::format_coord as c;
use std::fmt::Write;
use std::path::Path;

/// Stroke used for through-cuts; hairline so the cutter treats it as vector cut.
pub const CUT_STROKE: &str = "#ff0000";
pub const ETCH_STROKE: &str = "#0000ff";
pub const IGNORE_STROKE: &str = "#999999";

const HAIRLINE_WIDTH: f64 = 0.01;
const LINE_WIDTH: f64 = 0.1;

/// Output options for [`render_svg`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Drop ignore-style geometry
    pub omit_reference: bool,
    /// Stamped into the metadata comment
    pub build_date: Option<String>,
}

fn render_failed(_: std::fmt::Error) -> Error {
    DocumentError::RenderFailed {
        reason: "formatting error".to_string(),
    }
    .into()
}

fn class(style: Style) -> &'static str {
    match style {
        Style::Cut => "cut",
        Style::Etch => "etch",
        Style::Ignore => "ignore",
    }
}

/// Escape text for use in element content and attributes.
pub fn escape_xml(text: &str) -> String {
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

/// Render the whole sheet.
pub fn render_svg(doc: &SheetDocument, options: &RenderOptions) -> Result<String> {
    let (w, h) = (c(doc.width()), c(doc.height()));
    let mut out = String::new();

    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#)
        .map_err(render_failed)?;
    write!(out, "<!-- EnclosureKit {}", env!("CARGO_PKG_VERSION")).map_err(render_failed)?;
    if let Some(date) = &options.build_date {
        write!(out, ", built {}", escape_xml(date)).map_err(render_failed)?;
    }
    writeln!(out, " -->").map_err(render_failed)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"#
    )
    .map_err(render_failed)?;
    writeln!(out, "<style>").map_err(render_failed)?;
    writeln!(
        out,
        "  .cut {{ fill: none; stroke: {CUT_STROKE}; stroke-width: {HAIRLINE_WIDTH}; }}"
    )
    .map_err(render_failed)?;
    writeln!(
        out,
        "  .etch {{ fill: none; stroke: {ETCH_STROKE}; stroke-width: {LINE_WIDTH}; }}"
    )
    .map_err(render_failed)?;
    writeln!(
        out,
        "  .ignore {{ fill: none; stroke: {IGNORE_STROKE}; stroke-width: {LINE_WIDTH}; }}"
    )
    .map_err(render_failed)?;
    writeln!(
        out,
        "  text {{ stroke: none; font-family: sans-serif; }}\n  text.etch {{ fill: {ETCH_STROKE}; }}\n  text.ignore {{ fill: {IGNORE_STROKE}; }}"
    )
    .map_err(render_failed)?;
    writeln!(out, "</style>").map_err(render_failed)?;

    // y-up sheet space
    writeln!(out, r#"<g transform="translate(0 {h}) scale(1 -1)">"#).map_err(render_failed)?;
    render_group(doc, doc.root(), options, 1, &mut out)?;
    writeln!(out, "</g>").map_err(render_failed)?;
    writeln!(out, "</svg>").map_err(render_failed)?;

    tracing::debug!(
        "Rendered {} groups into {} bytes of SVG",
        doc.group_count(),
        out.len()
    );
    Ok(out)
}

/// Render and write to `path`.
pub fn save_svg(doc: &SheetDocument, options: &RenderOptions, path: &Path) -> Result<()> {
    let svg = render_svg(doc, options)?;
    std::fs::write(path, svg)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn render_group(
    doc: &SheetDocument,
    id: GroupId,
    options: &RenderOptions,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    let group = doc.group(id)?;
    let indent = "  ".repeat(depth);
    let nested = group.parent.is_some();
    if nested {
        let opened = match group.transform.to_svg() {
            Some(t) => writeln!(out, r#"{indent}<g transform="{t}">"#),
            None => writeln!(out, "{indent}<g>"),
        };
        opened.map_err(render_failed)?;
    }

    for item in &group.items {
        match item {
            GroupItem::Group(child) => render_group(doc, *child, options, depth + 1, out)?,
            GroupItem::Shape(shape) => {
                if options.omit_reference && shape.style.is_reference() {
                    continue;
                }
                out.push_str(&indent);
                out.push_str("  ");
                render_shape(shape, out).map_err(render_failed)?;
                out.push('\n');
            }
        }
    }

    if nested {
        writeln!(out, "{indent}</g>").map_err(render_failed)?;
    }
    Ok(())
}

fn render_shape(shape: &SheetShape, out: &mut String) -> std::fmt::Result {
    let cls = class(shape.style);
    match &shape.kind {
        ShapeKind::Path(path) => write!(out, r#"<path class="{cls}" d="{}"/>"#, path.to_svg_data()),
        ShapeKind::Rect { rect, edges } if edges.is_all() => write!(
            out,
            r#"<rect class="{cls}" x="{}" y="{}" width="{}" height="{}"/>"#,
            c(rect.x),
            c(rect.y),
            c(rect.width),
            c(rect.height)
        ),
        ShapeKind::Rect { rect, edges } => {
            write!(out, r#"<path class="{cls}" d="{}"/>"#, open_rect_data(*rect, *edges))
        }
        ShapeKind::RoundRect { rect, radius } => write!(
            out,
            r#"<rect class="{cls}" x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}"/>"#,
            c(rect.x),
            c(rect.y),
            c(rect.width),
            c(rect.height),
            r = c(*radius)
        ),
        ShapeKind::Hole { centre, radius } | ShapeKind::Circle { centre, radius } => write!(
            out,
            r#"<circle class="{cls}" cx="{}" cy="{}" r="{}"/>"#,
            c(centre.x),
            c(centre.y),
            c(*radius)
        ),
        ShapeKind::Arc {
            centre,
            radius,
            start_deg,
            end_deg,
        } => {
            let arc = ArcSegment {
                centre: *centre,
                radius: *radius,
                start_deg: *start_deg,
                end_deg: *end_deg,
                sweep: ArcSweep::Clockwise,
            };
            let start = arc.start_point();
            write!(
                out,
                r#"<path class="{cls}" d="M{} {} {}"/>"#,
                c(start.x),
                c(start.y),
                svg_arc_commands(&arc)
            )
        }
        ShapeKind::Text { at, text, format } => {
            let anchor = match format.align {
                TextAlign::Left => "start",
                TextAlign::Centre => "middle",
                TextAlign::Right => "end",
            };
            // counter-flip so lettering reads upright
            write!(
                out,
                r#"<text class="{cls}" transform="translate({} {}) scale(1 -1)" font-size="{}" text-anchor="{anchor}">{}</text>"#,
                c(at.x),
                c(at.y),
                c(format.size),
                escape_xml(text)
            )
        }
    }
}

/// Path data for the drawn sides of a rectangle.
fn open_rect_data(rect: Rect, edges: EdgeMask) -> String {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.width, rect.y + rect.height);
    let sides = [
        (edges.top, (x0, y1), (x1, y1)),
        (edges.left, (x0, y0), (x0, y1)),
        (edges.right, (x1, y0), (x1, y1)),
        (edges.bottom, (x0, y0), (x1, y0)),
    ];
    sides
        .iter()
        .filter(|(on, _, _)| *on)
        .map(|(_, a, b)| format!("M{} {} L{} {}", c(a.0), c(a.1), c(b.0), c(b.1)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use enclosurekit_core::{Path as OutlinePath, Point, TextFormat, Transform};

    fn sample() -> SheetDocument {
        let mut doc = SheetDocument::new(210.0, 297.0);
        let g = doc
            .create_group(doc.root(), Transform::translate(8.0, 8.0))
            .unwrap();
        let mut path = OutlinePath::starting_at(Point::new(3.0, 0.0));
        path.horz_by(10.0).vert_by(10.0).horz_by(-10.0).close();
        doc.add_path(g, &path, Style::Cut).unwrap();
        doc.add_rect(g, Rect::new(0.0, 0.0, 5.0, 5.0), Style::Ignore, EdgeMask::ALL)
            .unwrap();
        doc.add_annotation(g, Point::new(1.0, 2.0), "A & B", TextFormat::default())
            .unwrap();
        doc
    }

    #[test]
    fn test_document_frame() {
        let svg = render_svg(&sample(), &RenderOptions::default()).unwrap();
        assert!(svg.contains(r#"width="210mm" height="297mm" viewBox="0 0 210 297""#));
        assert!(svg.contains(r#"<g transform="translate(0 297) scale(1 -1)">"#));
        assert!(svg.contains(r#"<g transform="translate(8 8)">"#));
        assert!(svg.contains(r#"<path class="cut" d="M3 0 l10 0 l0 10 l-10 0 Z"/>"#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_text_is_escaped_and_counter_flipped() {
        let svg = render_svg(&sample(), &RenderOptions::default()).unwrap();
        assert!(svg.contains(r#"transform="translate(1 2) scale(1 -1)""#));
        assert!(svg.contains(">A &amp; B</text>"));
    }

    #[test]
    fn test_omit_reference() {
        let options = RenderOptions {
            omit_reference: true,
            build_date: Some("2025-01-01".to_string()),
        };
        let svg = render_svg(&sample(), &options).unwrap();
        assert!(!svg.contains(r#"class="ignore""#));
        assert!(svg.contains(r#"class="cut""#));
        assert!(svg.contains("built 2025-01-01 -->"));
    }

    #[test]
    fn test_open_rect_sides() {
        let data = open_rect_data(Rect::new(0.0, 0.0, 4.0, 2.0), EdgeMask::OPEN_TOP);
        assert_eq!(data, "M0 0 L0 2 M4 0 L4 2 M0 0 L4 0");
    }

    #[test]
    fn test_arc_is_clockwise() {
        let mut doc = SheetDocument::new(50.0, 50.0);
        let root = doc.root();
        doc.add_arc(root, Point::ORIGIN, 2.0, 0.0, 90.0, Style::Etch)
            .unwrap();
        let svg = render_svg(&doc, &RenderOptions::default()).unwrap();
        assert!(svg.contains(r#"<path class="etch" d="M0 2 A2 2 0 0 0 2 0"/>"#));
    }
}
