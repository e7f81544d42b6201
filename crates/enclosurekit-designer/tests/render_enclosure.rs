use enclosurekit_camtools::{EnclosureDesign, PanelKind};
use enclosurekit_core::Style;
use enclosurekit_designer::{render_svg, save_svg, RenderOptions, SheetDocument};
use enclosurekit_settings::{EnclosureConfig, OutputMode};

fn reference_sheet(config: EnclosureConfig) -> SheetDocument {
    let sheet = config.layout.sheet;
    let mut doc = SheetDocument::new(sheet.width, sheet.height);
    EnclosureDesign::new(config).unwrap().build(&mut doc).unwrap();
    doc
}

#[test]
fn test_every_hole_lands_on_the_sheet() {
    let doc = reference_sheet(EnclosureConfig::default());
    let holes = doc.holes().unwrap();
    assert!(!holes.is_empty());
    for hole in &holes {
        assert!(doc.bounds().contains(hole.centre), "{:?}", hole);
    }
    assert!(holes.iter().any(|h| h.style == Style::Cut));
    // header pins are drawn for placement only
    assert!(holes.iter().any(|h| h.style == Style::Ignore));
}

#[test]
fn test_rendered_sheet_has_every_panel() {
    let doc = reference_sheet(EnclosureConfig::default());
    let svg = render_svg(&doc, &RenderOptions::default()).unwrap();

    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains(r#"width="210mm" height="297mm""#));
    assert!(svg.contains(r#"<g transform="translate(8 8)">"#));
    for kind in PanelKind::ALL {
        assert!(svg.contains(&format!(">{}</text>", kind.label())), "{kind}");
    }
    assert!(svg.contains(">WeatherStationery</text>"));
    assert!(svg.contains(r#"class="ignore""#));
}

#[test]
fn test_cutter_job_drops_reference_geometry() {
    let mut config = EnclosureConfig::default();
    config.layout.output_mode = OutputMode::Print;
    let doc = reference_sheet(config);
    assert!(doc.count_style(Style::Ignore) > 0);

    let options = RenderOptions {
        omit_reference: true,
        build_date: None,
    };
    let svg = render_svg(&doc, &options).unwrap();
    assert!(!svg.contains(r#"class="ignore""#));
    assert!(svg.contains(r#"class="cut""#));
    assert!(svg.contains(r#"class="etch""#));
}

#[test]
fn test_save_svg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("enclosure.svg");
    let doc = reference_sheet(EnclosureConfig::default());
    save_svg(&doc, &RenderOptions::default(), &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.trim_end().ends_with("</svg>"));
}
