use crate::core::effective::resolve_effective;
use crate::core::resolver::resolve_basic;
use crate::domain::diagnostics::{Shortfall, Violation};
use crate::domain::model::{Block, Model, TypeTag, ViewMode};
use std::collections::HashMap;

/// Checks whether a model provides at least the signals a block requires.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureMatcher {
    mode: ViewMode,
    only_open_terminals: bool,
}

impl SignatureMatcher {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            only_open_terminals: false,
        }
    }

    /// Basic view only: count terminals that no wire uses as a source.
    pub fn only_open_terminals(mut self, only_open_terminals: bool) -> Self {
        self.only_open_terminals = only_open_terminals;
        self
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn evaluate(&self, model: &Model, block: &Block) -> Result<(), Violation> {
        if implements_directly(model, block) {
            tracing::debug!("Model directly implements block '{}'", block.id);
            return Ok(());
        }

        let (inputs, outputs) = self.candidate_tags(model);
        let missing_inputs = multiset_shortfall(&block.domain, &inputs);
        let missing_outputs = multiset_shortfall(&block.codomain, &outputs);

        if missing_inputs.is_empty() && missing_outputs.is_empty() {
            tracing::debug!("Model satisfies block '{}' ({} view)", block.id, self.mode);
            return Ok(());
        }

        let violation = Violation::SignatureMismatch {
            block: block.id.clone(),
            mode: self.mode,
            missing_inputs,
            missing_outputs,
        };
        tracing::warn!("{}", violation);
        Err(violation)
    }

    fn candidate_tags(&self, model: &Model) -> (Vec<TypeTag>, Vec<TypeTag>) {
        match self.mode {
            ViewMode::Basic => {
                let basic = resolve_basic(model, self.only_open_terminals);
                (basic.input_tags(), basic.output_tags())
            }
            ViewMode::Effective => {
                let effective = resolve_effective(model);
                (effective.inputs, effective.outputs)
            }
        }
    }
}

pub fn satisfies(model: &Model, block: &Block, mode: ViewMode) -> bool {
    SignatureMatcher::new(mode).evaluate(model, block).is_ok()
}

/// A lone processor whose type tag is the block's ID realizes it trivially.
fn implements_directly(model: &Model, block: &Block) -> bool {
    matches!(model.processors(), [only] if only.parent == block.id)
}

/// `required - provided` as multisets, in first-occurrence order of `required`.
fn multiset_shortfall(required: &[TypeTag], provided: &[TypeTag]) -> Vec<Shortfall> {
    let mut supply: HashMap<&str, usize> = HashMap::new();
    for tag in provided {
        *supply.entry(tag.as_str()).or_default() += 1;
    }

    let mut demand: Vec<(&str, usize)> = Vec::new();
    for tag in required {
        match demand.iter_mut().find(|(t, _)| *t == tag.as_str()) {
            Some((_, count)) => *count += 1,
            None => demand.push((tag.as_str(), 1)),
        }
    }

    demand
        .into_iter()
        .filter_map(|(tag, required)| {
            let provided = supply.get(tag).copied().unwrap_or(0);
            (required > provided).then(|| Shortfall {
                tag: tag.to_string(),
                required,
                provided,
            })
        })
        .collect()
}
