//! Full enclosure builds against a document that records every call.

use enclosurekit_camtools::{CamToolError, EnclosureDesign, PanelKind, ParameterError};
use enclosurekit_core::{
    DocumentError, DrawingDocument, EdgeMask, GroupId, Path, Point, Rect, Result, Style,
    TextFormat, Transform,
};
use enclosurekit_settings::{DepthLayer, EnclosureConfig, LayoutVariant, OutputMode, Revision};

#[derive(Debug, Clone, PartialEq)]
enum Element {
    Path(Path),
    Rect(Rect, EdgeMask),
    RoundRect(Rect, f64),
    Hole(Point, f64),
    Circle(Point, f64),
    Arc(Point, f64, f64, f64),
    Text(String, TextFormat),
}

#[derive(Debug, Default)]
struct RecordingDocument {
    groups: Vec<(Option<GroupId>, Transform)>,
    elements: Vec<(GroupId, Element, Style)>,
}

impl RecordingDocument {
    fn new() -> Self {
        Self {
            groups: vec![(None, Transform::identity())],
            elements: Vec::new(),
        }
    }

    fn check(&self, group: GroupId) -> Result<()> {
        if group.0 < self.groups.len() {
            Ok(())
        } else {
            Err(DocumentError::UnknownGroup { id: group.0 }.into())
        }
    }

    fn push(&mut self, group: GroupId, element: Element, style: Style) -> Result<()> {
        self.check(group)?;
        self.elements.push((group, element, style));
        Ok(())
    }

    fn texts(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|(_, e, _)| match e {
                Element::Text(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, style: Style, matches: impl Fn(&Element) -> bool) -> usize {
        self.elements
            .iter()
            .filter(|(_, e, s)| *s == style && matches(e))
            .count()
    }
}

impl DrawingDocument for RecordingDocument {
    fn root(&self) -> GroupId {
        GroupId(0)
    }

    fn create_group(&mut self, parent: GroupId, transform: Transform) -> Result<GroupId> {
        self.check(parent)?;
        self.groups.push((Some(parent), transform));
        Ok(GroupId(self.groups.len() - 1))
    }

    fn add_path(&mut self, group: GroupId, path: &Path, style: Style) -> Result<()> {
        path.validate()?;
        self.push(group, Element::Path(path.clone()), style)
    }

    fn add_rect(
        &mut self,
        group: GroupId,
        rect: Rect,
        style: Style,
        edges: EdgeMask,
    ) -> Result<()> {
        self.push(group, Element::Rect(rect, edges), style)
    }

    fn add_round_rect(
        &mut self,
        group: GroupId,
        rect: Rect,
        radius: f64,
        style: Style,
    ) -> Result<()> {
        self.push(group, Element::RoundRect(rect, radius), style)
    }

    fn add_hole(&mut self, group: GroupId, centre: Point, radius: f64, style: Style) -> Result<()> {
        self.push(group, Element::Hole(centre, radius), style)
    }

    fn add_circle(
        &mut self,
        group: GroupId,
        centre: Point,
        radius: f64,
        style: Style,
    ) -> Result<()> {
        self.push(group, Element::Circle(centre, radius), style)
    }

    fn add_arc(
        &mut self,
        group: GroupId,
        centre: Point,
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        style: Style,
    ) -> Result<()> {
        self.push(group, Element::Arc(centre, radius, start_deg, end_deg), style)
    }

    fn add_annotation(
        &mut self,
        group: GroupId,
        _at: Point,
        text: &str,
        format: TextFormat,
    ) -> Result<()> {
        self.push(group, Element::Text(text.to_string(), format), format.style)
    }
}

fn build(config: EnclosureConfig) -> (RecordingDocument, enclosurekit_camtools::DesignReport) {
    let mut doc = RecordingDocument::new();
    let report = EnclosureDesign::new(config).unwrap().build(&mut doc).unwrap();
    (doc, report)
}

#[test]
fn reference_design_builds_every_panel() {
    let (doc, report) = build(EnclosureConfig::default());

    assert_eq!(report.joints_verified, 8);
    assert_eq!(report.panels.len(), 9);
    assert!(report.panels.iter().all(|p| p.closed));
    assert!(report.sensor.is_some());

    let sheet = Rect::new(0.0, 0.0, 210.0, 297.0);
    assert!(report.off_sheet(sheet).is_empty());

    let texts = doc.texts();
    for kind in PanelKind::ALL {
        assert!(texts.contains(&kind.label()), "missing label {kind}");
    }
    for text in ["WeatherStationery", "MEW", "MMXXV", "4K@", "TEST"] {
        assert!(texts.contains(&text), "missing etched text {text}");
    }

    // one jointed outline per shell panel
    let outlines = doc.count(Style::Cut, |e| {
        matches!(e, Element::Path(p) if p.is_closed() && p.ops().len() > 20)
    });
    assert_eq!(outlines, 5);

    // sun, wind and rain
    assert_eq!(doc.count(Style::Etch, |e| matches!(e, Element::Circle(..))), 1);
    assert_eq!(doc.count(Style::Etch, |e| matches!(e, Element::Arc(..))), 3);
}

#[test]
fn panel_origins_include_margin() {
    let (_, report) = build(EnclosureConfig::default());
    let back = report.panel(PanelKind::Back).unwrap();
    assert!(back.origin.approx_eq(Point::new(79.43, 75.5), 1e-9));
    assert!((back.footprint.width - 51.92).abs() < 1e-9);

    let left = report.panel(PanelKind::Left).unwrap();
    // three 64.5 edges with 2 x 3 fingers and one 68.43 edge with 3 fingers
    let expected = 64.5 * 2.0 + 68.43 + 68.43 + 9.0 * 2.0 * 3.0;
    assert!((left.outline_length.unwrap() - expected).abs() < 1e-6);
}

#[test]
fn original_revision_drops_v2_tweaks() {
    let mut config = EnclosureConfig::default();
    config.layout.revision = Revision::Original;
    let (original, _) = build(config);
    let (v2, _) = build(EnclosureConfig::default());

    assert!(!original.texts().contains(&"4K@"));
    let open_bottom = |e: &Element| matches!(e, Element::Rect(_, m) if *m == EdgeMask::OPEN_BOTTOM);
    let open_top = |e: &Element| matches!(e, Element::Rect(_, m) if *m == EdgeMask::OPEN_TOP);
    // display notch on the original; power-wire notch on v2; USB void on both
    assert_eq!(original.count(Style::Cut, open_bottom), 2);
    assert_eq!(v2.count(Style::Cut, open_bottom), 2);
    // connector void on both, vent notch only on v2
    assert_eq!(original.count(Style::Cut, open_top), 1);
    assert_eq!(v2.count(Style::Cut, open_top), 2);
}

#[test]
fn print_mode_marks_every_hole() {
    let (final_doc, _) = build(EnclosureConfig::default());
    let mut config = EnclosureConfig::default();
    config.layout.output_mode = OutputMode::Print;
    let (print_doc, _) = build(config);

    let holes = print_doc
        .elements
        .iter()
        .filter(|(_, e, _)| matches!(e, Element::Hole(..)))
        .count();
    assert!(holes > 0);
    let markers = |doc: &RecordingDocument| doc.count(Style::Ignore, |e| matches!(e, Element::Path(_)));
    assert_eq!(markers(&final_doc), 0);
    // both USB breakouts carry two unmarked mounting holes
    assert_eq!(markers(&print_doc), holes - 4);
}

#[test]
fn usb_breakout_holes_are_unmarked() {
    let mut config = EnclosureConfig::default();
    config.layout.output_mode = OutputMode::Print;
    let usb = config.usb.clone();
    let (doc, _) = build(config);

    let footprint = Rect::new(0.0, 0.0, usb.width, usb.depth);
    let breakouts: Vec<GroupId> = doc
        .elements
        .iter()
        .filter(|(_, e, s)| *s == Style::Ignore && matches!(e, Element::Rect(r, _) if *r == footprint))
        .map(|(g, _, _)| *g)
        .collect();
    assert_eq!(breakouts.len(), 2);

    for group in breakouts {
        let in_group = |want: fn(&Element, Style) -> bool| {
            doc.elements
                .iter()
                .filter(|(g, e, s)| *g == group && want(e, *s))
                .count()
        };
        assert_eq!(in_group(|e, s| s == Style::Cut && matches!(e, Element::Hole(..))), 2);
        assert_eq!(in_group(|e, s| s == Style::Ignore && matches!(e, Element::Path(_))), 0);
    }
}

#[test]
fn nested_layout_shares_the_lid_cut() {
    let mut config = EnclosureConfig::default();
    config.layout.variant = LayoutVariant::Nested;
    let (doc, report) = build(config);

    assert_eq!(report.joints_verified, 8);
    let shared = doc.count(Style::Cut, |e| matches!(e, Element::Path(p) if p.ops().len() == 2));
    assert_eq!(shared, 1);
    let top = report.panel(PanelKind::Top).unwrap();
    assert!((top.outline_length.unwrap() - 45.92).abs() < 1e-9);
}

#[test]
fn undecorated_design_has_no_artwork() {
    let mut config = EnclosureConfig::default();
    config.layout.decorate = false;
    config.layout.show_reference_rects = false;
    let (doc, _) = build(config);
    assert_eq!(doc.count(Style::Etch, |e| matches!(e, Element::Arc(..))), 0);
    assert_eq!(doc.count(Style::Etch, |e| matches!(e, Element::Circle(..))), 0);
}

#[test]
fn failing_edge_leaves_document_untouched() {
    let mut config = EnclosureConfig::default();
    config.joints.fingers_width = 10;
    let mut doc = RecordingDocument::new();
    let err = EnclosureDesign::new(config)
        .unwrap()
        .build(&mut doc)
        .unwrap_err();

    match &err {
        CamToolError::Edge { panel, edge, .. } => {
            assert_eq!(*panel, PanelKind::Top);
            assert_eq!(*edge, "left to right");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("TOP panel, left to right edge: 10 fingers"));
    assert_eq!(doc.groups.len(), 1);
    assert!(doc.elements.is_empty());
}

#[test]
fn shallow_enclosure_rejects_decorations() {
    let mut config = EnclosureConfig::default();
    config.depth_stack = vec![DepthLayer::new("spacer", 12.0)];
    config.joints.fingers_depth = 1;
    let mut doc = RecordingDocument::new();
    let err = EnclosureDesign::new(config.clone())
        .unwrap()
        .build(&mut doc)
        .unwrap_err();

    assert!(
        matches!(
            err,
            CamToolError::Parameter(ParameterError::NonPositiveLength {
                name: "wind stroke",
                ..
            })
        ),
        "{err}"
    );
    assert_eq!(doc.groups.len(), 1);
    assert!(doc.elements.is_empty());

    // the same shell is fine without artwork
    config.layout.decorate = false;
    let (_, report) = build(config);
    assert_eq!(report.joints_verified, 8);
}

#[test]
fn small_sheet_is_reported() {
    let mut config = EnclosureConfig::default();
    config.layout.sheet.width = 150.0;
    let (_, report) = build(config.clone());
    let sheet = Rect::new(0.0, 0.0, config.layout.sheet.width, config.layout.sheet.height);
    let off = report.off_sheet(sheet);
    assert!(off.contains(&PanelKind::Right));
    assert!(!off.contains(&PanelKind::Left));
}
