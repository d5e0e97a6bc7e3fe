use crate::domain::diagnostics::Violation;
use crate::domain::model::{Endpoint, Model};
use std::collections::HashMap;

/// Every declared port must be the destination of exactly one wire. Ports are
/// scanned in processor order, then port order; the first offender is reported.
pub fn check_closed_loop(model: &Model) -> Result<(), Violation> {
    let mut incoming: HashMap<(&str, usize), Vec<&str>> = HashMap::new();
    for wire in model.wires() {
        incoming
            .entry((wire.destination.processor.as_str(), wire.destination.index))
            .or_default()
            .push(wire.id.as_str());
    }

    tracing::debug!("Connected ports: {}", incoming.len());

    for processor in model.processors() {
        for (index, tag) in processor.ports.iter().enumerate() {
            let violation = match incoming.get(&(processor.id.as_str(), index)).map(Vec::as_slice) {
                None | Some([]) => Violation::OpenPort {
                    processor: processor.id.clone(),
                    index,
                    tag: tag.clone(),
                },
                Some([_]) => continue,
                Some([first, second, ..]) => Violation::DuplicateDestination {
                    processor: processor.id.clone(),
                    index,
                    first_wire: first.to_string(),
                    second_wire: second.to_string(),
                },
            };
            tracing::warn!("{}", violation);
            return Err(violation);
        }
    }

    Ok(())
}

pub fn is_closed_loop(model: &Model) -> bool {
    check_closed_loop(model).is_ok()
}

/// Fan-out from one terminal is fine; fan-in to one port is not.
pub fn check_no_duplicate_destination(model: &Model) -> Result<(), Violation> {
    let mut claimed: HashMap<&Endpoint, &str> = HashMap::new();

    for wire in model.wires() {
        if let Some(first) = claimed.insert(&wire.destination, wire.id.as_str()) {
            let violation = Violation::DuplicateDestination {
                processor: wire.destination.processor.clone(),
                index: wire.destination.index,
                first_wire: first.to_string(),
                second_wire: wire.id.clone(),
            };
            tracing::warn!("{}", violation);
            return Err(violation);
        }
    }

    Ok(())
}

pub fn no_duplicate_destination(model: &Model) -> bool {
    check_no_duplicate_destination(model).is_ok()
}
