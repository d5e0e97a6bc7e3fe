// Domain layer: wiring-graph records, check diagnostics and the loader/config seams.

pub mod diagnostics;
pub mod model;
pub mod ports;
