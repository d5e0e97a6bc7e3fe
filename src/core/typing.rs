use crate::domain::diagnostics::{Violation, WireEnd};
use crate::domain::model::{Model, Wire};

/// A wire's tag must match both the terminal it leaves and the port it enters.
/// Unknown processors and out-of-range indices are skipped.
pub fn check_wire_types(model: &Model) -> Result<(), Violation> {
    for wire in model.wires() {
        check_end(model, wire, WireEnd::Source)?;
        check_end(model, wire, WireEnd::Destination)?;
    }
    Ok(())
}

pub fn are_wires_typed_correctly(model: &Model) -> bool {
    check_wire_types(model).is_ok()
}

fn check_end(model: &Model, wire: &Wire, end: WireEnd) -> Result<(), Violation> {
    let endpoint = match end {
        WireEnd::Source => &wire.source,
        WireEnd::Destination => &wire.destination,
    };

    let Some(processor) = model.processor(&endpoint.processor) else {
        tracing::debug!(
            "Wire '{}' {} references unknown processor '{}', skipped",
            wire.id,
            end,
            endpoint.processor
        );
        return Ok(());
    };

    let slot = match end {
        WireEnd::Source => processor.terminal(endpoint.index),
        WireEnd::Destination => processor.port(endpoint.index),
    };

    match slot {
        None => {
            tracing::debug!("Wire '{}' {} {} out of range, skipped", wire.id, end, endpoint);
            Ok(())
        }
        Some(tag) if tag == wire.parent => Ok(()),
        Some(tag) => {
            let violation = Violation::TypeMismatch {
                wire: wire.id.clone(),
                end,
                processor: processor.id.clone(),
                index: endpoint.index,
                expected: tag.to_string(),
                found: wire.parent.clone(),
            };
            tracing::warn!("{}", violation);
            Err(violation)
        }
    }
}
