use crate::domain::model::{Model, TypeTag};
use serde::Serialize;
use std::collections::HashSet;

/// A port or terminal on a specific processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotRef {
    pub processor: String,
    pub index: usize,
    pub tag: TypeTag,
}

/// Direct-adjacency view: no reasoning about loops or absorption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BasicInterface {
    pub open_ports: Vec<SlotRef>,
    pub available_terminals: Vec<SlotRef>,
}

impl BasicInterface {
    pub fn input_tags(&self) -> Vec<TypeTag> {
        self.open_ports.iter().map(|s| s.tag.clone()).collect()
    }

    pub fn output_tags(&self) -> Vec<TypeTag> {
        self.available_terminals.iter().map(|s| s.tag.clone()).collect()
    }
}

pub fn resolve_basic(model: &Model, only_open_terminals: bool) -> BasicInterface {
    let targeted: HashSet<(&str, usize)> = model
        .wires()
        .iter()
        .map(|w| (w.destination.processor.as_str(), w.destination.index))
        .collect();
    let sourced: HashSet<(&str, usize)> = model
        .wires()
        .iter()
        .map(|w| (w.source.processor.as_str(), w.source.index))
        .collect();

    let mut interface = BasicInterface::default();

    for processor in model.processors() {
        let id = processor.id.as_str();

        for (index, tag) in processor.ports.iter().enumerate() {
            if !targeted.contains(&(id, index)) {
                interface.open_ports.push(SlotRef {
                    processor: processor.id.clone(),
                    index,
                    tag: tag.clone(),
                });
            }
        }

        for (index, tag) in processor.terminals.iter().enumerate() {
            if only_open_terminals && sourced.contains(&(id, index)) {
                continue;
            }
            interface.available_terminals.push(SlotRef {
                processor: processor.id.clone(),
                index,
                tag: tag.clone(),
            });
        }
    }

    tracing::debug!(
        "Basic view: {} open ports, {} available terminals",
        interface.open_ports.len(),
        interface.available_terminals.len()
    );

    interface
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Processor, Wire};

    fn feedback_plant() -> Model {
        Model::new(
            vec![
                Processor::new("f", "F", "Dynamics", &["X", "U"], &["X"]),
                Processor::new("h", "H", "Probe", &["X"], &["Y", "Z"]),
            ],
            vec![
                Wire::new("wrefX", "X", "State Feedback", ("f", 0), ("f", 0)),
                Wire::new("wsense", "X", "Sense", ("f", 0), ("h", 0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_open_ports_in_declaration_order() {
        let basic = resolve_basic(&feedback_plant(), false);

        assert_eq!(
            basic.open_ports,
            vec![SlotRef {
                processor: "f".to_string(),
                index: 1,
                tag: "U".to_string(),
            }]
        );
    }

    #[test]
    fn test_all_terminals_available_by_default() {
        let basic = resolve_basic(&feedback_plant(), false);
        assert_eq!(basic.output_tags(), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_only_open_terminals_drops_sourced() {
        let basic = resolve_basic(&feedback_plant(), true);

        assert_eq!(basic.output_tags(), vec!["Y", "Z"]);
        assert_eq!(basic.available_terminals[0].index, 0);
        assert_eq!(basic.input_tags(), vec!["U"]);
    }
}
