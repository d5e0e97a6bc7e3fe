pub mod effective;
pub mod engine;
pub mod matcher;
pub mod report;
pub mod resolver;
pub mod structural;
pub mod typing;

pub use crate::domain::diagnostics::{CheckKind, Shortfall, Verdict, Violation};
pub use crate::domain::model::{Block, Endpoint, Model, Processor, Wire};
pub use crate::domain::ports::{ModelSource, SuiteProvider};
pub use crate::utils::error::Result;
