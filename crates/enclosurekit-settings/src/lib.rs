//! EnclosureKit Settings Crate
//!
//! Handles the design configuration record, its file persistence and the box
//! dimensions derived from it.

pub mod config;
pub mod dimensions;
pub mod error;

pub use config::{
    default_depth_stack, DepthLayer, DisplaySettings, EnclosureConfig, FrontPlateSettings,
    JointSettings, LabelSettings, LayoutSettings, LayoutVariant, MaterialSettings,
    MeasurementSystem, Offset, OutputMode, ProjectPcbSettings, Revision, SheetSize, UsbSettings,
    VentSettings,
};
pub use dimensions::Dimensions;
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
