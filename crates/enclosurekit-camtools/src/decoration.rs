//! Etched panel decorations: a sun on the top, wind strokes on the left and
//! a cloud with rain on the right.
//!
//! Angles use the clock convention (0° at 12 o'clock, increasing clockwise).

use crate::error::{CamToolResult, ParameterError, ParameterResult};
use enclosurekit_core::{
    ArcSweep, DrawingDocument, GroupId, Path, Point, Rect, Style, Transform, Vector, EPSILON,
};
use enclosurekit_settings::Dimensions;

const COSINE_SLACK: f64 = 1e-12;

/// Angle on the larger circle where it meets a smaller circle.
///
/// The small circle (`r1`) rests on a baseline; the large one (`r2`) sits `d`
/// above the baseline with its centre `t` along from the small one. The
/// result is measured from 12 o'clock on the large circle, towards the small
/// circle's side.
pub fn arc_intersection_angle(r1: f64, r2: f64, t: f64, d: f64) -> ParameterResult<f64> {
    let infeasible = |reason| ParameterError::InfeasibleArc {
        r1,
        r2,
        t,
        d,
        reason,
    };
    if !(r1 > 0.0 && r2 > 0.0) {
        return Err(infeasible("radii must be positive"));
    }

    let u = r2 + d - r1;
    let q = t.hypot(u);
    if !(q > 0.0) {
        return Err(infeasible("centres coincide"));
    }

    let theta = t.atan2(u);
    let cos_phi = (r2 * r2 + q * q - r1 * r1) / (2.0 * r2 * q);
    if !cos_phi.is_finite() || cos_phi.abs() > 1.0 + COSINE_SLACK {
        return Err(infeasible("circles do not intersect"));
    }
    let phi = cos_phi.clamp(-1.0, 1.0).acos();

    Ok(180.0 - (theta + phi).to_degrees())
}

/// Point budget used when checking a figure against its panel.
const FIT_SAMPLES: usize = 32;

fn outside(figure: &'static str, extent: Rect, p: Point) -> ParameterError {
    ParameterError::FigureOutsidePanel {
        figure,
        x: p.x,
        y: p.y,
        width: extent.width,
        height: extent.height,
    }
}

/// Every vertex of `path` and evenly spaced points along it must lie on the
/// panel.
fn ensure_inside(figure: &'static str, extent: Rect, path: &Path) -> ParameterResult<()> {
    let length = path.length();
    let samples = (0..=FIT_SAMPLES)
        .filter_map(|i| path.point_at_length(length * i as f64 / FIT_SAMPLES as f64));
    match path
        .vertices()
        .into_iter()
        .chain(samples)
        .find(|p| !extent.contains(*p))
    {
        Some(p) => Err(outside(figure, extent, p)),
        None => Ok(()),
    }
}

fn stroke_length(name: &'static str, value: f64) -> ParameterResult<f64> {
    if value > EPSILON {
        Ok(value)
    } else {
        Err(ParameterError::NonPositiveLength { name, value })
    }
}

fn clockwise_arc(centre: Point, radius: f64, start_deg: f64, end_deg: f64) -> Path {
    let mut path = Path::starting_at(centre.polar(radius, start_deg));
    path.arc(centre, radius, start_deg, end_deg, ArcSweep::Clockwise);
    path
}

/// Check every figure against its panel before anything is drawn.
pub fn check_fit(dims: &Dimensions) -> ParameterResult<()> {
    wind_strokes(dims)?;
    sun_figure(dims)?;
    rain_figure(dims)?;
    Ok(())
}

struct Sun {
    centre: Point,
    radius: f64,
    rays: Vec<Path>,
}

fn sun_figure(dims: &Dimensions) -> ParameterResult<Sun> {
    let radius = 7.0;
    let rays = 24;
    let extent = Rect::new(0.0, 0.0, dims.outer_width, dims.outer_depth);
    let centre = Point::new(dims.outer_width / 2.0, dims.outer_depth / 2.0);
    for angle in [0.0, 90.0, 180.0, 270.0] {
        let p = centre.polar(radius, angle);
        if !extent.contains(p) {
            return Err(outside("sun", extent, p));
        }
    }

    let len = stroke_length("sun ray", dims.inner_width / 2.0 - radius * 1.75)?;
    let step = 360.0 / rays as f64;
    let mut paths = Vec::with_capacity(rays);
    for ray in 0..rays {
        let angle = ray as f64 * step;
        let shorten = if ray % 2 == 1 { 2.0 } else { 0.0 };
        let mut path = Path::starting_at(centre);
        path.move_by(Vector::polar(radius * 1.5 - shorten, angle))
            .line_by(Vector::polar(len, angle));
        ensure_inside("sun", extent, &path)?;
        paths.push(path);
    }
    Ok(Sun {
        centre,
        radius,
        rays: paths,
    })
}

/// Sun with alternating long and short rays, centred on the top panel.
pub fn sun<D: DrawingDocument>(
    doc: &mut D,
    group: GroupId,
    dims: &Dimensions,
) -> CamToolResult<()> {
    let sun = sun_figure(dims)?;
    doc.add_circle(group, sun.centre, sun.radius, Style::Etch)?;
    for ray in &sun.rays {
        doc.add_path(group, ray, Style::Etch)?;
    }
    Ok(())
}

fn wind_strokes(dims: &Dimensions) -> ParameterResult<Vec<Path>> {
    let r = 5.0;
    let mid = dims.outer_height / 2.0;
    let extent = Rect::new(0.0, 0.0, dims.outer_height, dims.outer_depth);
    let strokes = [
        // (inset from the back, x, length, curls towards +x)
        (10.0, mid, dims.outer_depth - 20.0, true),
        (5.0, mid + r, dims.outer_depth - 25.0, true),
        (7.0, mid - r, dims.outer_depth - 35.0, false),
    ];

    let mut paths = Vec::with_capacity(strokes.len());
    for (inset, x, len, curl_right) in strokes {
        let len = stroke_length("wind stroke", len)?;
        let end_y = dims.outer_depth - inset - len;
        let mut path = Path::starting_at(Point::new(x, dims.outer_depth - inset));
        path.vert_by(-len);
        if curl_right {
            path.arc(
                Point::new(x + r, end_y),
                r,
                270.0,
                45.0,
                ArcSweep::CounterClockwise,
            );
        } else {
            path.arc(Point::new(x - r, end_y), r, 90.0, 315.0, ArcSweep::Clockwise);
        }
        ensure_inside("wind", extent, &path)?;
        paths.push(path);
    }
    Ok(paths)
}

/// Three gust strokes, each a straight line curling off at its front end.
pub fn wind<D: DrawingDocument>(
    doc: &mut D,
    group: GroupId,
    dims: &Dimensions,
) -> CamToolResult<()> {
    for path in wind_strokes(dims)? {
        doc.add_path(group, &path, Style::Etch)?;
    }
    Ok(())
}

const RAIN_SCALE: f64 = 4.125;

/// Cloud arcs as (centre, radius, start, end), plus the underside and drops,
/// in the rotated rain frame.
struct Rain {
    arcs: [(Point, f64, f64, f64); 3],
    strokes: Vec<Path>,
}

fn rain_figure(dims: &Dimensions) -> ParameterResult<Rain> {
    let s = RAIN_SCALE;
    // the right panel seen through the rain group's rotation
    let extent = Rect::new(0.0, s, dims.outer_depth, dims.outer_height);
    let cx = dims.outer_depth / 2.0;
    let base = dims.outer_height / 2.0;
    let big = 3.0 * s;
    let lift = 0.0;

    let left_r = 2.0 * s;
    let left_t = 2.5 * s;
    let left = (Point::new(cx - left_t, base + left_r), left_r, 180.0, 50.0);
    let start = -arc_intersection_angle(left_r, big, left_t, lift)?;

    let right_r = 1.5 * s;
    let right_t = 2.75 * s;
    let right = (Point::new(cx + right_t, base + right_r), right_r, 300.0, 180.0);
    let end = arc_intersection_angle(right_r, big, right_t, lift)?;

    let top = (Point::new(cx, base + big + lift), big, start, end);

    let mut strokes = Vec::new();
    let mut underside = Path::starting_at(Point::new(cx - left_t, base));
    underside.horz_by(left_t + right_t);
    strokes.push(underside);

    let lines = 5;
    let pitch = 5.0 * s / lines as f64;
    for i in 0..lines {
        let x = cx - pitch * lines as f64 / 2.0 + i as f64 * pitch + pitch / 2.0;
        let mut drop = Path::starting_at(Point::new(x, base - s / 2.0));
        drop.line_by(Vector::new(-s / 2.0, -2.5 * s));
        strokes.push(drop);
    }

    let arcs = [left, right, top];
    for &(centre, radius, from, to) in &arcs {
        ensure_inside("rain", extent, &clockwise_arc(centre, radius, from, to))?;
    }
    for stroke in &strokes {
        ensure_inside("rain", extent, stroke)?;
    }
    Ok(Rain { arcs, strokes })
}

/// Cloud of three tangent arcs over five slanted rain lines.
///
/// Drawn in a rotated group so the cloud reads upright when the right panel
/// is assembled.
pub fn rain<D: DrawingDocument>(
    doc: &mut D,
    group: GroupId,
    dims: &Dimensions,
) -> CamToolResult<()> {
    let figure = rain_figure(dims)?;
    let rain = doc.create_group(
        group,
        Transform::translate(dims.outer_height + RAIN_SCALE, 0.0).then(Transform::rotate(-90.0)),
    )?;
    for (centre, radius, start, end) in figure.arcs {
        doc.add_arc(rain, centre, radius, start, end, Style::Etch)?;
    }
    for stroke in &figure.strokes {
        doc.add_path(rain, stroke, Style::Etch)?;
    }
    Ok(())
}
