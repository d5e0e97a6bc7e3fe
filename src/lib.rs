pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{JsonFileSource, TomlConfig};

pub use crate::core::effective::{resolve_effective, EffectiveInterface};
pub use crate::core::engine::{CheckEngine, CheckOptions, CheckReport};
pub use crate::core::matcher::{satisfies, SignatureMatcher};
pub use crate::core::resolver::{resolve_basic, BasicInterface, SlotRef};
pub use crate::core::structural::{
    check_closed_loop, check_no_duplicate_destination, is_closed_loop, no_duplicate_destination,
};
pub use crate::core::typing::{are_wires_typed_correctly, check_wire_types};
pub use domain::diagnostics::{CheckKind, Shortfall, Verdict, Violation, WireEnd};
pub use domain::model::{Block, Endpoint, Model, Processor, TypeTag, ViewMode, Wire};
pub use domain::ports::{ModelSource, SuiteProvider};
pub use utils::error::{DiagramError, Result};
