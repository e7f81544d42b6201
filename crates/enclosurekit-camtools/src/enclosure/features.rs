//! Component cut-outs, holes and lettering placed on each panel.
//!
//! Every feature is drawn in the local frame of the group it is given; nested
//! components open their own translated groups.

use super::SensorPlacement;
use crate::error::CamToolResult;
use enclosurekit_core::{
    DrawingDocument, EdgeMask, GroupId, Path, Point, Rect, Style, TextAlign, TextFormat,
    Transform, Vector, PERF_BOARD_PITCH,
};
use enclosurekit_settings::{Dimensions, EnclosureConfig, OutputMode, Revision};

/// Screw-head clearance around display and front-plate holes on cut plates.
const STANDOFF_HEAD_RADIUS: f64 = 3.0;
/// M3 clearance used for the bolts joining the inside plates.
const PLATE_BOLT_RADIUS: f64 = 3.1 / 2.0;
const PLATE_BOLT_INSET: f64 = 5.0;
const PLATE_CORNER_RADIUS: f64 = 2.0;
const HEADER_PIN_RADIUS: f64 = 0.75;

/// Differences between the first build and the revised one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevisionTweaks {
    /// Bolt hole radius on the back panel
    pub back_bolt_radius: f64,
    /// Etch the dedication line under the title
    pub dedication: bool,
    /// Opening hint sits above the USB breakout rather than just inside the back
    pub hint_above_usb: bool,
    /// Clearance notch for the display PCB on the inner base
    pub display_notch: bool,
    /// Notch for the power wires on the inside front plate
    pub power_wire_notch: bool,
    /// Notch under the vent on the inside back plate
    pub vent_notch: bool,
}

impl RevisionTweaks {
    pub fn for_revision(revision: Revision) -> Self {
        match revision {
            Revision::Original => Self {
                back_bolt_radius: PLATE_BOLT_RADIUS,
                dedication: false,
                hint_above_usb: false,
                display_notch: true,
                power_wire_notch: false,
                vent_notch: false,
            },
            Revision::V2 => Self {
                back_bolt_radius: 2.0,
                dedication: true,
                hint_above_usb: true,
                display_notch: false,
                power_wire_notch: true,
                vent_notch: true,
            },
        }
    }
}

/// Emits panel features for one design into a document.
pub struct FeatureWriter<'a, D: DrawingDocument> {
    doc: &'a mut D,
    config: &'a EnclosureConfig,
    dims: Dimensions,
    tweaks: RevisionTweaks,
}

impl<'a, D: DrawingDocument> FeatureWriter<'a, D> {
    pub fn new(doc: &'a mut D, config: &'a EnclosureConfig) -> Self {
        Self {
            doc,
            config,
            dims: config.dimensions(),
            tweaks: RevisionTweaks::for_revision(config.layout.revision),
        }
    }

    pub fn doc(&mut self) -> &mut D {
        &mut *self.doc
    }

    fn group(&mut self, parent: GroupId, dx: f64, dy: f64) -> CamToolResult<GroupId> {
        Ok(self.doc.create_group(parent, Transform::translate(dx, dy))?)
    }

    pub fn label(&mut self, group: GroupId, at: Point, text: &str) -> CamToolResult<()> {
        self.doc
            .add_annotation(group, at, text, TextFormat::default())?;
        Ok(())
    }

    fn etch_text(
        &mut self,
        group: GroupId,
        at: Point,
        text: &str,
        size: f64,
        align: TextAlign,
    ) -> CamToolResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.doc
            .add_annotation(group, at, text, TextFormat::etched(size, align))?;
        Ok(())
    }

    /// A hole plus its checking aids: an X through the centre in print mode
    /// and reference rings for any screw-head clearances.
    pub fn hole(
        &mut self,
        group: GroupId,
        centre: Point,
        radius: f64,
        style: Style,
        clearances: &[f64],
    ) -> CamToolResult<()> {
        self.doc.add_hole(group, centre, radius, style)?;
        if self.config.layout.output_mode == OutputMode::Print {
            let mut marker = Path::starting_at(Point::new(centre.x - radius, centre.y - radius));
            marker
                .line_by(Vector::new(2.0 * radius, 2.0 * radius))
                .move_by(Vector::new(-2.0 * radius, 0.0))
                .line_by(Vector::new(2.0 * radius, -2.0 * radius));
            self.doc.add_path(group, &marker, Style::Ignore)?;
        }
        for &clearance in clearances {
            self.doc.add_circle(group, centre, clearance, Style::Ignore)?;
        }
        Ok(())
    }

    /// Four corner holes on a board of `width` x `height`, inset by `offset`.
    fn corner_holes(
        &mut self,
        group: GroupId,
        (width, height): (f64, f64),
        offset: Vector,
        radius: f64,
        cut: bool,
    ) -> CamToolResult<()> {
        let (style, clearances): (Style, &[f64]) = if cut {
            (Style::Cut, &[STANDOFF_HEAD_RADIUS])
        } else {
            (Style::Ignore, &[])
        };
        for (x, y) in [
            (offset.dx, offset.dy),
            (width - offset.dx, offset.dy),
            (offset.dx, height - offset.dy),
            (width - offset.dx, height - offset.dy),
        ] {
            self.hole(group, Point::new(x, y), radius, style, clearances)?;
        }
        Ok(())
    }

    /// E-paper board outline, its screen and its four standoff holes.
    pub fn eink_board(&mut self, group: GroupId, cut: bool) -> CamToolResult<()> {
        let t = self.dims.thickness;
        let config = self.config;
        let display = &config.display;
        let board_x = (self.dims.inner_width - display.pcb_width) / 2.0;

        let eink = self.group(group, t, t)?;
        self.doc.add_rect(
            eink,
            Rect::new(board_x, display.pcb_offset_y, display.pcb_width, display.pcb_height),
            Style::Ignore,
            EdgeMask::ALL,
        )?;

        let board = self.group(eink, board_x, display.pcb_offset_y)?;
        self.doc.add_rect(
            board,
            Rect::new(
                (display.pcb_width - display.screen_size) / 2.0,
                display.screen_offset_y,
                display.screen_size,
                display.screen_size,
            ),
            Style::Ignore,
            EdgeMask::ALL,
        )?;
        self.corner_holes(
            board,
            (display.pcb_width, display.pcb_height),
            Vector::new(display.hole_offset.x, display.hole_offset.y),
            display.hole_radius,
            cut,
        )
    }

    /// Mounting holes of the front-plate PCB.
    pub fn front_plate_holes(&mut self, group: GroupId, cut: bool) -> CamToolResult<()> {
        let t = self.dims.thickness;
        let config = self.config;
        let plate = &config.front_plate;
        let holes = self.group(group, t, t)?;
        self.corner_holes(
            holes,
            (plate.width, plate.height),
            Vector::new(plate.hole_offset.x, plate.hole_offset.y),
            plate.hole_radius,
            cut,
        )
    }

    /// Bolt holes joining the inside plates, optionally with etched arrows
    /// showing which nuts to undo and the top vent slot.
    pub fn inside_plate_holes(
        &mut self,
        group: GroupId,
        vent: bool,
        back: bool,
    ) -> CamToolResult<()> {
        let head = 3.0;
        let radius = if back {
            self.tweaks.back_bolt_radius
        } else {
            PLATE_BOLT_RADIUS
        };
        let inner_width = self.dims.inner_width;
        let y = (self.dims.inner_height - 2.0 * self.dims.thickness) / 2.0;

        for x in [PLATE_BOLT_INSET, inner_width - PLATE_BOLT_INSET] {
            self.hole(group, Point::new(x, y), radius, Style::Cut, &[head])?;
            if back {
                let arrow_len = 6.0;
                let mut arrow = Path::starting_at(Point::new(x, y - arrow_len - head));
                arrow.arrow_to(Point::new(x, y - head - 0.75), arrow_len / 2.0);
                self.doc.add_path(group, &arrow, Style::Etch)?;
            }
        }

        if vent {
            let slot = Rect::centred(
                Point::new(inner_width / 2.0, self.dims.inner_height - self.config.vent.offset_y),
                self.config.usb.connector_width,
                self.config.vent.height,
            );
            self.doc.add_round_rect(group, slot, 1.0, Style::Cut)?;
        }
        Ok(())
    }

    /// USB breakout footprint with its two mounting holes.
    ///
    /// On the inner base the holes are tapped through and a strip is cut for
    /// the solder joints; on the bottom panel only the screw heads need room.
    pub fn usb_breakout(&mut self, group: GroupId, inner: bool) -> CamToolResult<()> {
        let config = self.config;
        let usb = &config.usb;
        let radius = if inner {
            usb.hole_radius
        } else {
            usb.head_hole_radius
        };
        let (width, depth) = (usb.width, usb.depth);
        let (offset, solder) = (usb.hole_offset, usb.solder_cutout);

        self.doc.add_rect(
            group,
            Rect::new(0.0, 0.0, width, depth),
            Style::Ignore,
            EdgeMask::ALL,
        )?;
        // mounting holes only; no print markers
        for x in [offset.x, width - offset.x] {
            self.doc
                .add_hole(group, Point::new(x, offset.y), radius, Style::Cut)?;
        }
        if inner {
            self.doc.add_rect(
                group,
                Rect::new(0.0, 0.0, width, solder),
                Style::Cut,
                EdgeMask::ALL,
            )?;
        }
        Ok(())
    }

    /// Project PCB outline, its holes and the sensor opening.
    ///
    /// On the inside back plate (`cut`) the opening only clears the header
    /// socket; on the back panel it clears the whole sensor board.
    pub fn project_pcb(&mut self, group: GroupId, cut: bool) -> CamToolResult<SensorPlacement> {
        let config = self.config;
        let pcb = &config.project_pcb;
        let size = pcb.size;
        self.doc.add_round_rect(
            group,
            Rect::new(0.0, 0.0, size, size),
            1.0,
            Style::Ignore,
        )?;

        let hole_style = if cut { Style::Cut } else { Style::Ignore };
        for mount in &pcb.mounting_holes {
            self.hole(
                group,
                Point::new(mount.x, mount.y),
                pcb.mounting_hole_radius,
                hole_style,
                &[pcb.mounting_head_radius],
            )?;
        }

        let header = pcb.sensor_header;
        for pin in 0..pcb.sensor_header_pins {
            let at = Point::new(header.x + pin as f64 * PERF_BOARD_PITCH, header.y);
            self.hole(group, at, HEADER_PIN_RADIUS, Style::Ignore, &[])?;
        }

        let offset = pcb.sensor_offset;
        let height = if cut { 2.0 * offset.y } else { pcb.sensor_height };
        let opening = Rect::new(
            header.x + offset.x,
            header.y + offset.y - height,
            pcb.sensor_width,
            height,
        );
        self.doc.add_rect(group, opening, Style::Cut, EdgeMask::ALL)?;

        let placement = SensorPlacement {
            centre: opening.centre(),
            opening,
        };
        tracing::debug!("Sensor opening centred at {}", placement.centre);
        Ok(placement)
    }

    /// Pierced cap over the sensor, centred on `centre`.
    pub fn sensor_cover(
        &mut self,
        group: GroupId,
        centre: Point,
        style: Style,
    ) -> CamToolResult<()> {
        let config = self.config;
        let pcb = &config.project_pcb;
        let size = pcb.sensor_width.max(pcb.sensor_height) + 4.5;
        self.doc
            .add_round_rect(group, Rect::centred(centre, size, size), 2.0, style)?;

        let slots = 5.0;
        let step = size / slots;
        let x = centre.x - size / 2.0 + step / 2.0;
        let y = centre.y - size / 2.0 + step / 2.0;
        let r = 1.0;
        let head = 3.5 / 2.0;

        self.hole(group, Point::new(x, y + 2.0 * step), r, Style::Cut, &[head])?;
        self.hole(group, Point::new(x + 4.0 * step, y + 2.0 * step), r, Style::Cut, &[head])?;
        for slot in [
            Rect::new(x + 2.0 * step - r, y, 2.0 * r, 4.0 * step),
            Rect::new(x + step - r, y + step, 2.0 * r, 2.0 * step),
            Rect::new(x + 3.0 * step - r, y + step, 2.0 * r, 2.0 * step),
        ] {
            self.doc.add_round_rect(group, slot, r, style)?;
        }
        Ok(())
    }

    pub fn back_panel(&mut self, group: GroupId) -> CamToolResult<SensorPlacement> {
        let d = self.dims;
        let t = d.thickness;
        self.label(group, Point::new(3.5, 4.0), "BACK")?;

        let config = self.config;
        let usb = &config.usb;
        let opening = self.group(group, (d.outer_width - usb.width) / 2.0, 2.0 * t)?;
        let shoulder = (usb.width - usb.connector_width) / 2.0;
        let mut path = Path::starting_at(Point::ORIGIN);
        path.horz_by(usb.width)
            .vert_by(usb.pcb_thickness)
            .horz_by(-shoulder)
            .vert_by(usb.height - usb.pcb_thickness)
            .horz_by(-usb.connector_width)
            .vert_by(-(usb.height - usb.pcb_thickness))
            .horz_by(-shoulder)
            .close();
        self.doc.add_path(opening, &path, Style::Cut)?;

        // inner base and top plates seen edge-on
        for y in [t, d.outer_height - 2.0 * t] {
            self.doc.add_rect(
                group,
                Rect::new(t, y, d.inner_width, t),
                Style::Ignore,
                EdgeMask::ALL,
            )?;
        }

        self.eink_board(group, false)?;
        self.front_plate_holes(group, false)?;
        let plates = self.group(group, t, 2.0 * t)?;
        self.inside_plate_holes(plates, true, true)?;

        let size = self.config.project_pcb.size;
        let pcb = self.group(
            group,
            (d.outer_width - size) / 2.0,
            (d.outer_height - size) / 2.0,
        )?;
        let sensor = self.project_pcb(pcb, false)?;
        self.sensor_cover(pcb, sensor.centre, Style::Ignore)?;

        let labels = &config.labels;
        let size = labels.text_size;
        let centre_x = d.outer_width / 2.0;
        let y = d.outer_height - self.config.vent.offset_y - self.config.vent.height - size;
        self.etch_text(group, Point::new(centre_x, y), &labels.title, size, TextAlign::Centre)?;
        self.etch_text(group, Point::new(1.5 * t, 2.0 * t), &labels.maker, size, TextAlign::Left)?;
        self.etch_text(
            group,
            Point::new(d.outer_width - 1.5 * t, 2.0 * t),
            &labels.year,
            size,
            TextAlign::Right,
        )?;
        if self.tweaks.dedication {
            self.etch_text(
                group,
                Point::new(centre_x, y - 2.0 * size),
                &labels.dedication,
                size,
                TextAlign::Centre,
            )?;
        }

        Ok(sensor)
    }

    pub fn bottom_panel(&mut self, group: GroupId) -> CamToolResult<()> {
        let d = self.dims;
        self.label(group, Point::new(3.5, 2.0), "BOTTOM")?;

        let config = self.config;
        let usb = &config.usb;
        let breakout = self.group(
            group,
            (d.outer_width - usb.width) / 2.0,
            d.outer_depth - usb.depth,
        )?;
        self.usb_breakout(breakout, false)?;

        let hint_y = if self.tweaks.hint_above_usb {
            d.inner_depth - usb.depth
        } else {
            d.inner_depth - d.thickness
        };
        let labels = &config.labels;
        self.etch_text(
            group,
            Point::new(d.outer_width / 2.0, hint_y),
            &labels.open_hint,
            labels.hint_size,
            TextAlign::Centre,
        )
    }

    /// Rectangle of an inner base or top plate with the front PCB edge shown
    /// in front of it.
    fn inner_plate(&mut self, group: GroupId) -> CamToolResult<f64> {
        let d = self.dims;
        let pcb_thickness = self.config.front_plate.thickness;
        let depth = d.inner_depth - pcb_thickness;
        self.doc.add_rect(
            group,
            Rect::new(0.0, 0.0, d.inner_width, depth),
            Style::Cut,
            EdgeMask::ALL,
        )?;
        self.doc.add_rect(
            group,
            Rect::new(0.0, -pcb_thickness, d.inner_width, pcb_thickness),
            Style::Ignore,
            EdgeMask::OPEN_TOP,
        )?;
        Ok(depth)
    }

    pub fn inner_base(&mut self, group: GroupId) -> CamToolResult<()> {
        let d = self.dims;
        self.label(group, Point::new(3.5, 2.0), "INNER BASE")?;
        let depth = self.inner_plate(group)?;

        let config = self.config;
        let usb = &config.usb;
        let breakout = self.group(
            group,
            (d.inner_width - usb.width) / 2.0,
            depth - usb.depth + d.thickness,
        )?;
        self.usb_breakout(breakout, true)?;

        if self.tweaks.display_notch {
            let width = self.config.display.pcb_width + 2.0;
            self.doc.add_rect(
                group,
                Rect::new((d.inner_width - width) / 2.0, 1.0, width, 10.0),
                Style::Cut,
                EdgeMask::OPEN_BOTTOM,
            )?;
        }
        Ok(())
    }

    pub fn inner_top(&mut self, group: GroupId) -> CamToolResult<()> {
        let d = self.dims;
        self.label(group, Point::new(3.5, 2.0), "INNER TOP")?;
        self.inner_plate(group)?;
        self.sensor_cover(
            group,
            Point::new(d.inner_width / 2.0, d.inner_height / 2.0),
            Style::Cut,
        )
    }

    pub fn inside_front(&mut self, group: GroupId) -> CamToolResult<()> {
        let d = self.dims;
        let t = d.thickness;
        let plate_height = d.inner_height - 2.0 * t;
        self.label(group, Point::new(16.0, 8.0), "INSIDE FRONT")?;
        self.doc.add_round_rect(
            group,
            Rect::new(t, 2.0 * t, d.inner_width, plate_height),
            PLATE_CORNER_RADIUS,
            Style::Cut,
        )?;
        self.eink_board(group, true)?;
        self.front_plate_holes(group, true)?;

        // display connector
        let (span_x, span_y) = (21.0, 25.0);
        self.doc.add_rect(
            group,
            Rect::new(
                t + (d.inner_width - span_x) / 2.0,
                d.inner_height - span_y,
                span_x,
                span_y,
            ),
            Style::Cut,
            EdgeMask::OPEN_TOP,
        )?;

        // scorch check for the etch settings
        self.doc.add_annotation(
            group,
            Point::new(t + d.inner_width / 2.0, plate_height - 5.0),
            "TEST",
            TextFormat::etched(5.0, TextAlign::Centre),
        )?;

        let plates = self.group(group, t, 2.0 * t)?;
        self.inside_plate_holes(plates, false, false)?;

        if self.tweaks.power_wire_notch {
            let (span_x, span_y) = (18.0, 8.0);
            self.doc.add_rect(
                group,
                Rect::new((d.inner_width - span_x) / 2.0 + t, 2.0 * t, span_x, span_y),
                Style::Cut,
                EdgeMask::OPEN_BOTTOM,
            )?;
        }
        Ok(())
    }

    pub fn inside_back(&mut self, group: GroupId) -> CamToolResult<SensorPlacement> {
        let d = self.dims;
        let t = d.thickness;
        let plate_height = d.inner_height - 2.0 * t;
        self.label(group, Point::new(16.0, 8.0), "INSIDE BACK")?;

        if self.tweaks.vent_notch {
            let (span_x, span_y) = (10.0, 5.0);
            self.doc.add_rect(
                group,
                Rect::new(
                    t + (d.inner_width - span_x) / 2.0,
                    d.inner_height - span_y,
                    span_x,
                    span_y,
                ),
                Style::Cut,
                EdgeMask::OPEN_TOP,
            )?;
        }

        let holes = self.group(group, t, 2.0 * t)?;
        self.inside_plate_holes(holes, false, false)?;

        let plate = self.group(group, t, 2.0 * t)?;
        self.doc.add_round_rect(
            plate,
            Rect::new(0.0, 0.0, d.inner_width, plate_height),
            PLATE_CORNER_RADIUS,
            Style::Cut,
        )?;

        // USB connector void
        let config = self.config;
        let usb = &config.usb;
        let (span_x, span_y) = (usb.width + 5.0, usb.height + 5.0);
        self.doc.add_rect(
            plate,
            Rect::new((d.inner_width - span_x) / 2.0, 0.0, span_x, span_y),
            Style::Cut,
            EdgeMask::OPEN_BOTTOM,
        )?;

        let size = self.config.project_pcb.size;
        let pcb = self.group(
            plate,
            (d.inner_width - size) / 2.0,
            (plate_height - size) / 2.0,
        )?;
        self.project_pcb(pcb, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_tweaks() {
        let original = RevisionTweaks::for_revision(Revision::Original);
        let v2 = RevisionTweaks::for_revision(Revision::V2);
        assert_eq!(original.back_bolt_radius, 1.55);
        assert_eq!(v2.back_bolt_radius, 2.0);
        assert!(original.display_notch && !v2.display_notch);
        assert!(v2.dedication && v2.power_wire_notch && v2.vent_notch);
    }
}
