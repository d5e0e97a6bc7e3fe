//! Effective interface inference.
//!
//! Works out which signals a composite model exposes at its boundary once
//! internal wiring and feedback are discounted. The rules are a fixed heuristic:
//!
//! * a port is an effective input only if its processor drives no wire at all,
//!   nothing targets the port, and no terminal anywhere in the model produces
//!   its tag;
//! * a terminal is an effective output unless its processor sends a wire
//!   carrying the same tag to a *different* processor. Self-loops keep the
//!   terminal effective.
//!
//! Both lists are deduplicated by tag, first occurrence wins, in processor order.

use crate::domain::model::{Model, TypeTag};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EffectiveInterface {
    pub inputs: Vec<TypeTag>,
    pub outputs: Vec<TypeTag>,
}

struct Outgoing<'a> {
    tag: &'a str,
    destination: &'a str,
}

pub fn resolve_effective(model: &Model) -> EffectiveInterface {
    // processor id -> wired port indices
    let mut incoming: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut outgoing: HashMap<&str, Vec<Outgoing<'_>>> = HashMap::new();

    for wire in model.wires() {
        incoming
            .entry(wire.destination.processor.as_str())
            .or_default()
            .push(wire.destination.index);
        outgoing
            .entry(wire.source.processor.as_str())
            .or_default()
            .push(Outgoing {
                tag: wire.parent.as_str(),
                destination: wire.destination.processor.as_str(),
            });
    }

    let produced: HashSet<&str> = model
        .processors()
        .iter()
        .flat_map(|p| p.terminals.iter().map(String::as_str))
        .collect();

    let mut inputs = Vec::new();
    let mut outputs = Vec::new();

    for processor in model.processors() {
        let id = processor.id.as_str();
        let sends = outgoing.get(id).map(Vec::as_slice).unwrap_or_default();
        let receives = incoming.get(id).map(Vec::as_slice).unwrap_or_default();

        // 有輸出連線的處理器視為內部節點
        if sends.is_empty() {
            for (index, tag) in processor.ports.iter().enumerate() {
                let wired = receives.contains(&index);
                if !wired && !produced.contains(tag.as_str()) {
                    inputs.push(tag.clone());
                }
            }
        }

        for tag in &processor.terminals {
            let absorbed = sends
                .iter()
                .any(|s| s.tag == tag.as_str() && s.destination != id);
            if !absorbed {
                outputs.push(tag.clone());
            }
        }
    }

    let interface = EffectiveInterface {
        inputs: dedup_preserving_order(inputs),
        outputs: dedup_preserving_order(outputs),
    };

    tracing::debug!(
        "Effective view: inputs {:?}, outputs {:?}",
        interface.inputs,
        interface.outputs
    );

    interface
}

fn dedup_preserving_order(tags: Vec<TypeTag>) -> Vec<TypeTag> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Processor, Wire};

    #[test]
    fn test_self_loop_keeps_terminal_effective() {
        let model = Model::new(
            vec![Processor::new("f", "F", "Dynamics", &["X", "U"], &["X"])],
            vec![Wire::new("wrefX", "X", "State Feedback", ("f", 0), ("f", 0))],
        )
        .unwrap();

        let effective = resolve_effective(&model);

        assert_eq!(effective.outputs, vec!["X"]);
        // f drives its own feedback wire, so its open U port is internal
        assert!(effective.inputs.is_empty());
    }

    #[test]
    fn test_sink_exposes_unproduced_open_ports() {
        let model = Model::new(
            vec![
                Processor::new("src", "S", "Source", &[], &["X"]),
                Processor::new("sink", "K", "Sink", &["X", "R", "R", "X"], &[]),
            ],
            vec![Wire::new("w", "X", "feed", ("src", 0), ("sink", 0))],
        )
        .unwrap();

        let effective = resolve_effective(&model);

        // index 3 (X) is open but X is produced internally; R is deduplicated
        assert_eq!(effective.inputs, vec!["R"]);
        assert!(effective.outputs.is_empty());
    }

    #[test]
    fn test_wire_to_other_processor_absorbs_matching_tag_only() {
        let model = Model::new(
            vec![
                Processor::new("a", "A", "Splitter", &[], &["X", "Y"]),
                Processor::new("b", "B", "Consumer", &["X"], &[]),
            ],
            vec![Wire::new("w", "X", "x only", ("a", 0), ("b", 0))],
        )
        .unwrap();

        assert_eq!(resolve_effective(&model).outputs, vec!["Y"]);
    }

    #[test]
    fn test_outputs_deduplicated_in_processor_order() {
        let model = Model::new(
            vec![
                Processor::new("p", "P", "First", &[], &["Y", "X"]),
                Processor::new("q", "Q", "Second", &[], &["X", "Z", "Y"]),
            ],
            vec![],
        )
        .unwrap();

        assert_eq!(resolve_effective(&model).outputs, vec!["Y", "X", "Z"]);
    }
}
