//! Enclosure Design
//!
//! Lays out the five finger-jointed shell panels and the four inside plates
//! on one sheet and fills each with its cut-outs, holes, lettering and
//! decoration.
//!
//! The shell is composed and every joint verified before anything is drawn,
//! so a design that does not fit together never reaches the document.

pub mod features;

pub use features::{FeatureWriter, RevisionTweaks};

use crate::decoration;
use crate::error::CamToolResult;
use crate::panel::{PanelComposer, PanelKind, PanelOutline};
use enclosurekit_core::{DrawingDocument, EdgeMask, GroupId, Point, Rect, Style, Transform};
use enclosurekit_settings::{Dimensions, EnclosureConfig, LayoutVariant};
use serde::Serialize;

/// Where the sensor opening landed on the project PCB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorPlacement {
    pub centre: Point,
    pub opening: Rect,
}

/// What was drawn for one panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSummary {
    pub kind: PanelKind,
    /// Panel origin in sheet coordinates
    pub origin: Point,
    /// Bounding rectangle in sheet coordinates
    pub footprint: Rect,
    /// Length of the jointed outline, for shell panels
    pub outline_length: Option<f64>,
    pub closed: bool,
}

/// Outcome of a successful build.
#[derive(Debug, Clone, Serialize)]
pub struct DesignReport {
    pub dimensions: Dimensions,
    pub panels: Vec<PanelSummary>,
    /// Sensor opening on the back panel's project PCB
    pub sensor: Option<SensorPlacement>,
    pub joints_verified: usize,
}

impl DesignReport {
    pub fn panel(&self, kind: PanelKind) -> Option<&PanelSummary> {
        self.panels.iter().find(|p| p.kind == kind)
    }

    /// Panels that stick out of the sheet.
    pub fn off_sheet(&self, sheet: Rect) -> Vec<PanelKind> {
        self.panels
            .iter()
            .filter(|p| {
                let (min, max) = (p.footprint.min(), p.footprint.max());
                min.x < sheet.x || min.y < sheet.y || max.x > sheet.max().x || max.y > sheet.max().y
            })
            .map(|p| p.kind)
            .collect()
    }
}

/// A validated design ready to be drawn.
#[derive(Debug, Clone)]
pub struct EnclosureDesign {
    config: EnclosureConfig,
    composer: PanelComposer,
}

impl EnclosureDesign {
    pub fn new(config: EnclosureConfig) -> CamToolResult<Self> {
        config.validate()?;
        let composer = PanelComposer::new(&config)?;
        Ok(Self { config, composer })
    }

    pub fn config(&self) -> &EnclosureConfig {
        &self.config
    }

    pub fn dimensions(&self) -> &Dimensions {
        self.composer.dimensions()
    }

    pub fn composer(&self) -> &PanelComposer {
        &self.composer
    }

    /// Panel origin relative to the margin.
    ///
    /// Exploded layouts leave one material thickness between neighbours;
    /// nested layouts overlap them by one thickness so shared edges are cut
    /// once.
    pub fn placement(&self, kind: PanelKind) -> Point {
        let d = self.dimensions();
        let (t, g) = (d.thickness, d.exploded_gap);
        let exploded = self.config.layout.variant == LayoutVariant::Exploded;
        let inner_x = d.outer_width + d.outer_height + g + 5.0;

        match kind {
            PanelKind::Left => Point::ORIGIN,
            PanelKind::Top => Point::new(d.outer_height + g, 0.0),
            PanelKind::Right => Point::new(d.outer_height + g + d.outer_width + g, 0.0),
            PanelKind::Back => Point::new(d.outer_height + g, d.outer_depth + g),
            PanelKind::Bottom => Point::new(0.0, d.outer_depth + t),
            PanelKind::InnerBase => Point::new(inner_x, d.outer_depth + g + 5.0),
            PanelKind::InnerTop => Point::new(inner_x, 2.0 * (d.outer_depth + g) + 5.0),
            PanelKind::InsideFront => {
                Point::new(0.0, 2.0 * d.outer_depth + if exploded { t } else { 0.0 })
            }
            PanelKind::InsideBack => Point::new(
                d.outer_width,
                d.outer_depth + d.outer_height + if exploded { 0.0 } else { -2.0 * t },
            ),
        }
    }

    /// Extent of a panel in its own frame.
    pub fn panel_extent(&self, kind: PanelKind) -> Rect {
        let d = self.dimensions();
        let t = d.thickness;
        let plate_depth = d.inner_depth - self.config.front_plate.thickness;
        match kind {
            PanelKind::Left | PanelKind::Right => {
                Rect::new(0.0, 0.0, d.outer_height, d.outer_depth)
            }
            PanelKind::Top | PanelKind::Bottom => Rect::new(0.0, 0.0, d.outer_width, d.outer_depth),
            PanelKind::Back => Rect::new(0.0, 0.0, d.outer_width, d.outer_height),
            PanelKind::InnerBase | PanelKind::InnerTop => {
                Rect::new(0.0, 0.0, d.inner_width, plate_depth)
            }
            PanelKind::InsideFront | PanelKind::InsideBack => {
                Rect::new(t, 2.0 * t, d.inner_width, d.inner_height - 2.0 * t)
            }
        }
    }

    /// Draw the whole enclosure into `doc`.
    pub fn build<D: DrawingDocument>(&self, doc: &mut D) -> CamToolResult<DesignReport> {
        let shell = self.composer.compose_shell()?;
        let layout = &self.config.layout;
        if layout.decorate {
            decoration::check_fit(self.dimensions())?;
        }
        tracing::info!(
            "Building {} enclosure ({} revision): {}",
            layout.variant,
            layout.revision,
            self.dimensions()
        );

        let root = doc.root();
        let design = doc.create_group(root, Transform::translate(layout.margin, layout.margin))?;
        let sheet = Rect::new(0.0, 0.0, layout.sheet.width, layout.sheet.height);

        let mut writer = FeatureWriter::new(doc, &self.config);
        let mut panels = Vec::with_capacity(PanelKind::ALL.len());
        let mut sensor = None;

        for kind in PanelKind::ALL {
            let origin = self.placement(kind);
            let group = writer
                .doc()
                .create_group(design, Transform::translate(origin.x, origin.y))?;

            let outline = shell.get(kind);
            if let Some(outline) = outline {
                self.draw_outline(writer.doc(), group, outline)?;
            }

            match kind {
                PanelKind::Left => {
                    writer.label(group, Point::new(3.5, 2.0), kind.label())?;
                    if layout.decorate {
                        decoration::wind(writer.doc(), group, self.dimensions())?;
                    }
                }
                PanelKind::Top => {
                    writer.label(group, Point::new(3.5, 2.0), kind.label())?;
                    if layout.decorate {
                        decoration::sun(writer.doc(), group, self.dimensions())?;
                    }
                }
                PanelKind::Right => {
                    writer.label(group, Point::new(3.5, 2.0), kind.label())?;
                    if layout.decorate {
                        decoration::rain(writer.doc(), group, self.dimensions())?;
                    }
                }
                PanelKind::Back => sensor = Some(writer.back_panel(group)?),
                PanelKind::Bottom => writer.bottom_panel(group)?,
                PanelKind::InnerBase => writer.inner_base(group)?,
                PanelKind::InnerTop => writer.inner_top(group)?,
                PanelKind::InsideFront => writer.inside_front(group)?,
                PanelKind::InsideBack => {
                    writer.inside_back(group)?;
                }
            }

            let extent = self.panel_extent(kind);
            let footprint = Rect::new(
                extent.x + origin.x + layout.margin,
                extent.y + origin.y + layout.margin,
                extent.width,
                extent.height,
            );
            panels.push(PanelSummary {
                kind,
                origin: Point::new(origin.x + layout.margin, origin.y + layout.margin),
                footprint,
                outline_length: outline.map(|o| o.path.length()),
                closed: outline.map_or(true, |o| o.path.is_closed() || o.shared_cut),
            });
            tracing::debug!("Placed {} panel at {}", kind, origin);
        }

        let report = DesignReport {
            dimensions: *self.dimensions(),
            panels,
            sensor,
            joints_verified: shell.joints_verified,
        };

        for kind in report.off_sheet(sheet) {
            tracing::warn!(
                "{} panel extends past the {} x {} mm sheet",
                kind,
                layout.sheet.width,
                layout.sheet.height
            );
        }
        Ok(report)
    }

    fn draw_outline<D: DrawingDocument>(
        &self,
        doc: &mut D,
        group: GroupId,
        outline: &PanelOutline,
    ) -> CamToolResult<()> {
        doc.add_path(group, &outline.path, Style::Cut)?;
        if self.config.layout.show_reference_rects {
            doc.add_rect(group, outline.reference.outer, Style::Ignore, EdgeMask::ALL)?;
            doc.add_rect(group, outline.reference.inner, Style::Ignore, EdgeMask::ALL)?;
        }
        Ok(())
    }
}
