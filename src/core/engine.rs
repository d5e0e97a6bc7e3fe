use crate::core::effective::{resolve_effective, EffectiveInterface};
use crate::core::matcher::SignatureMatcher;
use crate::core::resolver::{resolve_basic, BasicInterface};
use crate::core::structural::{check_closed_loop, check_no_duplicate_destination};
use crate::core::typing::check_wire_types;
use crate::domain::diagnostics::{CheckKind, Verdict};
use crate::domain::model::{Block, Model, ViewMode};
use crate::domain::ports::ModelSource;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOptions {
    pub closed_loop: bool,
    pub duplicate_destination: bool,
    pub wire_types: bool,
    pub mode: ViewMode,
    pub only_open_terminals: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            closed_loop: true,
            duplicate_destination: true,
            wire_types: true,
            mode: ViewMode::Effective,
            only_open_terminals: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub processors: usize,
    pub wires: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub model: ModelSummary,
    pub verdicts: Vec<Verdict>,
    pub basic: BasicInterface,
    pub effective: EffectiveInterface,
    pub checked_at: DateTime<Utc>,
}

impl CheckReport {
    pub fn all_passed(&self) -> bool {
        self.verdicts.iter().all(|v| v.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(|v| !v.passed)
    }
}

pub struct CheckEngine {
    model: Arc<Model>,
    blocks: Vec<Block>,
    options: CheckOptions,
}

impl CheckEngine {
    pub fn new(model: Arc<Model>, blocks: Vec<Block>, options: CheckOptions) -> Self {
        Self {
            model,
            blocks,
            options,
        }
    }

    /// Loads the model and file blocks from `source`; `extra_blocks` are checked first.
    pub fn from_source<S: ModelSource>(
        source: &S,
        extra_blocks: &[Block],
        options: CheckOptions,
    ) -> Result<Self> {
        let model = source.load_model()?;
        let mut blocks = extra_blocks.to_vec();
        blocks.extend(source.load_blocks()?);
        Ok(Self::new(Arc::new(model), blocks, options))
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Checks in reporting order. Blocks follow their declaration order.
    fn planned_checks(&self) -> Vec<(CheckKind, Option<&Block>)> {
        let mut checks = Vec::new();
        if self.options.closed_loop {
            checks.push((CheckKind::ClosedLoop, None));
        }
        if self.options.duplicate_destination {
            checks.push((CheckKind::DuplicateDestination, None));
        }
        if self.options.wire_types {
            checks.push((CheckKind::WireTypes, None));
        }
        for block in &self.blocks {
            let kind = CheckKind::Signature {
                block: block.id.clone(),
                mode: self.options.mode,
            };
            checks.push((kind, Some(block)));
        }
        checks
    }

    /// Runs every planned check as its own task over the shared model.
    pub async fn run(&self) -> CheckReport {
        let checks = self.planned_checks();
        tracing::info!("Running {} checks concurrently", checks.len());

        let mut tasks = JoinSet::new();
        for (position, (check, block)) in checks.into_iter().enumerate() {
            let model = Arc::clone(&self.model);
            let block = block.cloned();
            let options = self.options;
            tasks.spawn_blocking(move || {
                (position, run_check(&model, check, block.as_ref(), options))
            });
        }

        let mut verdicts = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(entry) => verdicts.push(entry),
                // 檢查本身不會 panic；若發生代表程式錯誤，直接往上拋
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => tracing::error!("Check task cancelled: {}", e),
            }
        }
        verdicts.sort_by_key(|(position, _)| *position);

        self.report(verdicts.into_iter().map(|(_, v)| v).collect())
    }

    /// Same checks, same order, on the calling thread.
    pub fn run_sequential(&self) -> CheckReport {
        let verdicts = self
            .planned_checks()
            .into_iter()
            .map(|(check, block)| run_check(&self.model, check, block, self.options))
            .collect();

        self.report(verdicts)
    }

    fn report(&self, verdicts: Vec<Verdict>) -> CheckReport {
        let report = CheckReport {
            model: ModelSummary {
                processors: self.model.processors().len(),
                wires: self.model.wires().len(),
            },
            verdicts,
            basic: resolve_basic(&self.model, self.options.only_open_terminals),
            effective: resolve_effective(&self.model),
            checked_at: Utc::now(),
        };

        tracing::info!(
            "Checks complete: {} passed, {} failed",
            report.verdicts.iter().filter(|v| v.passed).count(),
            report.failures().count()
        );

        report
    }
}

fn run_check(
    model: &Model,
    check: CheckKind,
    block: Option<&Block>,
    options: CheckOptions,
) -> Verdict {
    let result = match (&check, block) {
        (CheckKind::ClosedLoop, _) => check_closed_loop(model),
        (CheckKind::DuplicateDestination, _) => check_no_duplicate_destination(model),
        (CheckKind::WireTypes, _) => check_wire_types(model),
        (CheckKind::Signature { .. }, Some(block)) => SignatureMatcher::new(options.mode)
            .only_open_terminals(options.only_open_terminals)
            .evaluate(model, block),
        // planned_checks 一定會附上 block
        (CheckKind::Signature { .. }, None) => Ok(()),
    };
    Verdict::from_result(check, result)
}
