//! Enclosure design configuration
//!
//! One immutable record holds every parameter of a design run. It is built
//! once (from defaults or a file), validated, and then passed by reference to
//! every panel builder.
//!
//! Configuration is organized into logical sections:
//! - Material (sheet thickness, kerf allowance, finger length)
//! - Joints (finger counts per box axis)
//! - Layout (exploded/nested, revision, output mode, sheet)
//! - Components (front plate PCB, e-paper display, USB breakout, project PCB)
//! - Depth stack (the layers that add up to the inner depth)

use crate::dimensions::Dimensions;
use crate::error::{ConfigError, ConfigResult, SettingsResult};
pub use enclosurekit_core::units::MeasurementSystem;
use enclosurekit_core::units::PERF_BOARD_PITCH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Panel spacing on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    /// Panels separated by a material thickness, every joint cut.
    #[default]
    Exploded,
    /// Neighbouring panels share cut lines; the top becomes a friction-fit lid.
    Nested,
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exploded => write!(f, "exploded"),
            Self::Nested => write!(f, "nested"),
        }
    }
}

/// Design revision. `V2` carries the fit fixes made after the first build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    Original,
    #[default]
    V2,
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::V2 => write!(f, "v2"),
        }
    }
}

/// What the document is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Cutter job.
    #[default]
    Final,
    /// Paper check print: hole centres get X markers.
    Print,
}

/// Relative offset in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Sheet size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetSize {
    pub width: f64,
    pub height: f64,
}

impl SheetSize {
    /// A4 portrait.
    pub const A4: SheetSize = SheetSize {
        width: 210.0,
        height: 297.0,
    };
}

impl Default for SheetSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Sheet material and joint geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSettings {
    /// Sheet thickness (mm)
    pub thickness: f64,
    /// Allowance added to each side of the inner size for beam kerf (mm)
    pub kerf: f64,
    /// Length of one finger along its edge (mm)
    pub finger_length: f64,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            thickness: 3.0,
            kerf: 0.1,
            finger_length: 5.0,
        }
    }
}

/// Finger counts per box axis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JointSettings {
    /// Front to back
    pub fingers_depth: u32,
    /// Top to bottom
    pub fingers_height: u32,
    /// Left to right
    pub fingers_width: u32,
}

impl Default for JointSettings {
    fn default() -> Self {
        Self {
            fingers_depth: 3,
            fingers_height: 3,
            fingers_width: 3,
        }
    }
}

/// Layout and output options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub variant: LayoutVariant,
    pub revision: Revision,
    pub output_mode: OutputMode,
    /// Draw outer/inner reference rectangles on each shell panel
    pub show_reference_rects: bool,
    /// Etch the weather decorations on the side and top panels
    pub decorate: bool,
    /// Offset of the whole design from the sheet corner (mm)
    pub margin: f64,
    pub sheet: SheetSize,
    /// Units used when reporting dimensions
    pub report_units: MeasurementSystem,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            variant: LayoutVariant::Exploded,
            revision: Revision::V2,
            output_mode: OutputMode::Final,
            show_reference_rects: true,
            decorate: true,
            margin: 8.0,
            sheet: SheetSize::A4,
            report_units: MeasurementSystem::Metric,
        }
    }
}

/// The PCB that forms the front of the enclosure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontPlateSettings {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    /// Corner hole centre offset from each PCB edge
    pub hole_offset: Offset,
    pub hole_radius: f64,
}

impl Default for FrontPlateSettings {
    fn default() -> Self {
        Self {
            width: 45.72,
            height: 62.23,
            thickness: 1.2,
            hole_offset: Offset::new(1.5 * PERF_BOARD_PITCH, 3.5 * PERF_BOARD_PITCH),
            hole_radius: 3.5 / 2.0,
        }
    }
}

/// One named slice of the enclosure's inner depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthLayer {
    pub name: String,
    pub thickness: f64,
}

impl DepthLayer {
    pub fn new(name: &str, thickness: f64) -> Self {
        Self {
            name: name.to_string(),
            thickness,
        }
    }
}

/// Front-to-back stack, measured from the front PCB to the back wall.
pub fn default_depth_stack() -> Vec<DepthLayer> {
    vec![
        DepthLayer::new("front PCB to back of display PCB", 4.5),
        DepthLayer::new("standoff to clamp plate", 18.0),
        DepthLayer::new("inside front plate", 3.0),
        DepthLayer::new("standoffs to PCB plate", 24.0),
        DepthLayer::new("nylon washers", 2.0),
        DepthLayer::new("inside back plate", 3.0),
        DepthLayer::new("standoff to back wall", 6.0),
        DepthLayer::new("nylon washer", 1.0),
    ]
}

/// E-paper display module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub pcb_width: f64,
    pub pcb_height: f64,
    pub hole_offset: Offset,
    pub hole_radius: f64,
    pub screen_size: f64,
    /// Screen edge distance from the non-connector end of the PCB
    pub screen_offset_y: f64,
    /// PCB distance from the inside of the enclosure
    pub pcb_offset_y: f64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            pcb_width: 33.0,
            pcb_height: 48.0,
            hole_offset: Offset::new(2.5, 2.5),
            hole_radius: 3.75 / 2.0,
            screen_size: 28.0,
            screen_offset_y: 13.0,
            pcb_offset_y: 2.48 + 1.27,
        }
    }
}

/// USB breakout board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsbSettings {
    pub width: f64,
    pub depth: f64,
    /// Height including the connector
    pub height: f64,
    pub connector_width: f64,
    /// Bare PCB thickness
    pub pcb_thickness: f64,
    pub hole_radius: f64,
    pub head_hole_radius: f64,
    pub hole_offset: Offset,
    /// Strip cut under the breakout so it sits flat over solder joints
    pub solder_cutout: f64,
}

impl Default for UsbSettings {
    fn default() -> Self {
        Self {
            width: 14.25,
            depth: 15.0,
            height: 5.0,
            connector_width: 9.0,
            pcb_thickness: 2.0,
            hole_radius: 1.6,
            head_hole_radius: 3.1,
            hole_offset: Offset::new(3.0, 5.5),
            solder_cutout: 2.5,
        }
    }
}

/// Perf-board project PCB carrying the pressure sensor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectPcbSettings {
    pub size: f64,
    /// Mounting holes from the lower-left corner
    pub mounting_holes: Vec<Offset>,
    pub mounting_hole_radius: f64,
    pub mounting_head_radius: f64,
    /// Sensor header first pin (VCC) from the lower-left corner
    pub sensor_header: Offset,
    pub sensor_header_pins: u32,
    /// Sensor board corner relative to the header first pin
    pub sensor_offset: Offset,
    pub sensor_width: f64,
    pub sensor_height: f64,
}

impl Default for ProjectPcbSettings {
    fn default() -> Self {
        let p = PERF_BOARD_PITCH;
        Self {
            size: 10.0 * p,
            mounting_holes: vec![Offset::new(3.5 * p, 4.5 * p), Offset::new(6.5 * p, 4.5 * p)],
            mounting_hole_radius: 3.1 / 2.0,
            mounting_head_radius: 6.0 / 2.0,
            sensor_header: Offset::new(3.5 * p, 2.5 * p),
            sensor_header_pins: 4,
            sensor_offset: Offset::new(-2.0, 2.0),
            sensor_width: 12.0,
            sensor_height: 15.0,
        }
    }
}

/// Slot vent near the top of the back panel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VentSettings {
    /// Distance of the vent centre below the inner top edge
    pub offset_y: f64,
    pub height: f64,
}

impl Default for VentSettings {
    fn default() -> Self {
        Self {
            offset_y: 8.5,
            height: 2.5,
        }
    }
}

/// Etched lettering on the back and bottom panels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    pub title: String,
    pub maker: String,
    pub year: String,
    /// Extra line under the title, v2 revision only
    pub dedication: String,
    /// Opening hint on the bottom panel
    pub open_hint: String,
    pub text_size: f64,
    pub hint_size: f64,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            title: "WeatherStationery".to_string(),
            maker: "MEW".to_string(),
            year: "MMXXV".to_string(),
            dedication: "4K@".to_string(),
            open_hint: "\u{2191} Open @ \u{2191}'s".to_string(),
            text_size: 5.0,
            hint_size: 4.0,
        }
    }
}

/// Complete design configuration
///
/// Aggregates all sections and provides file I/O operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnclosureConfig {
    pub material: MaterialSettings,
    pub joints: JointSettings,
    pub layout: LayoutSettings,
    pub front_plate: FrontPlateSettings,
    pub depth_stack: Vec<DepthLayer>,
    pub display: DisplaySettings,
    pub usb: UsbSettings,
    pub project_pcb: ProjectPcbSettings,
    pub vent: VentSettings,
    pub labels: LabelSettings,
}

impl Default for EnclosureConfig {
    fn default() -> Self {
        Self {
            material: MaterialSettings::default(),
            joints: JointSettings::default(),
            layout: LayoutSettings::default(),
            front_plate: FrontPlateSettings::default(),
            depth_stack: default_depth_stack(),
            display: DisplaySettings::default(),
            usb: UsbSettings::default(),
            project_pcb: ProjectPcbSettings::default(),
            vent: VentSettings::default(),
            labels: LabelSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

fn format_for(path: &Path) -> ConfigResult<ConfigFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl EnclosureConfig {
    /// Create new config with the reference design defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML). Loading always validates.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded enclosure config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_for(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        tracing::debug!("Saved enclosure config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("material.thickness", self.material.thickness),
            ("material.finger_length", self.material.finger_length),
            ("layout.sheet.width", self.layout.sheet.width),
            ("layout.sheet.height", self.layout.sheet.height),
            ("front_plate.width", self.front_plate.width),
            ("front_plate.height", self.front_plate.height),
            ("front_plate.thickness", self.front_plate.thickness),
            ("front_plate.hole_radius", self.front_plate.hole_radius),
            ("display.pcb_width", self.display.pcb_width),
            ("display.pcb_height", self.display.pcb_height),
            ("display.hole_radius", self.display.hole_radius),
            ("display.screen_size", self.display.screen_size),
            ("usb.width", self.usb.width),
            ("usb.depth", self.usb.depth),
            ("usb.height", self.usb.height),
            ("usb.connector_width", self.usb.connector_width),
            ("usb.pcb_thickness", self.usb.pcb_thickness),
            ("usb.hole_radius", self.usb.hole_radius),
            ("usb.head_hole_radius", self.usb.head_hole_radius),
            ("usb.solder_cutout", self.usb.solder_cutout),
            ("project_pcb.size", self.project_pcb.size),
            ("project_pcb.mounting_hole_radius", self.project_pcb.mounting_hole_radius),
            ("project_pcb.mounting_head_radius", self.project_pcb.mounting_head_radius),
            ("project_pcb.sensor_width", self.project_pcb.sensor_width),
            ("project_pcb.sensor_height", self.project_pcb.sensor_height),
            ("vent.height", self.vent.height),
            ("labels.text_size", self.labels.text_size),
            ("labels.hint_size", self.labels.hint_size),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::out_of_range(key, value));
            }
        }

        if !(self.material.kerf.is_finite() && self.material.kerf >= 0.0) {
            return Err(ConfigError::out_of_range("material.kerf", self.material.kerf));
        }
        if !(self.layout.margin.is_finite() && self.layout.margin >= 0.0) {
            return Err(ConfigError::out_of_range("layout.margin", self.layout.margin));
        }

        if self.depth_stack.is_empty() {
            return Err(ConfigError::Inconsistent("depth stack is empty".to_string()));
        }
        for layer in &self.depth_stack {
            if !(layer.thickness.is_finite() && layer.thickness > 0.0) {
                return Err(ConfigError::out_of_range(
                    &format!("depth_stack.{}", layer.name),
                    layer.thickness,
                ));
            }
        }

        let dims = self.dimensions();
        if dims.inner_height <= 2.0 * dims.thickness {
            return Err(ConfigError::Inconsistent(format!(
                "inner height {} leaves no room for the inner plates ({} thick)",
                dims.inner_height, dims.thickness
            )));
        }
        if self.usb.width >= dims.inner_width {
            return Err(ConfigError::Inconsistent(format!(
                "USB breakout ({} wide) does not fit the inner width {}",
                self.usb.width, dims.inner_width
            )));
        }

        Ok(())
    }

    /// Derived box dimensions.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = EnclosureConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.layout.variant, LayoutVariant::Exploded);
        assert_eq!(config.layout.revision, Revision::V2);
        assert_eq!(config.depth_stack.len(), 8);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EnclosureConfig::new();
        config.material.thickness = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::out_of_range("material.thickness", 0.0))
        );

        let mut config = EnclosureConfig::new();
        config.material.kerf = -0.1;
        assert!(config.validate().is_err());

        let mut config = EnclosureConfig::new();
        config.depth_stack.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Inconsistent(_))
        ));

        let mut config = EnclosureConfig::new();
        config.layout.sheet.width = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_extension() {
        let err = format_for(Path::new("enclosure.yaml")).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedFormat("yaml".to_string()));
        assert!(format_for(Path::new("enclosure")).is_err());
    }

    #[test]
    fn test_enum_names() {
        let json = serde_json::to_string(&Revision::V2).unwrap();
        assert_eq!(json, "\"v2\"");
        let variant: LayoutVariant = serde_json::from_str("\"nested\"").unwrap();
        assert_eq!(variant, LayoutVariant::Nested);
        assert_eq!(OutputMode::Print, serde_json::from_str("\"print\"").unwrap());
    }
}
