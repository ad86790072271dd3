//! The per-element state machine and the batch driver around it.

use std::collections::HashSet;

use modbridge_core_types::SessionId;

use super::choice::{parse_choice, Choice, Decision, InvalidChoice, MIN_CHOICE};
use super::operator::Operator;
use crate::config::Config;
use crate::errors::{BridgeError, ExError};
use crate::model::{Category, ElementKey, MissingElement, ProgressCheckpoint, ReplacementMapping, Snapshot};
use crate::ranking::{rank_candidates, CandidateScore};
use crate::visualizer::Visualizer;
use crate::{log_op_end, log_op_error, log_op_start};

/// Where progress goes. Implemented by the store over JSON files.
pub trait CheckpointSink {
    /// Overwrite the checkpoint with `checkpoint`.
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Persistence` if the checkpoint cannot be written.
    fn save_checkpoint(&mut self, checkpoint: &ProgressCheckpoint) -> Result<(), ExError>;

    /// Write the completed mapping.
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Persistence` if the mapping cannot be written.
    fn save_final(&mut self, mapping: &ReplacementMapping) -> Result<(), ExError>;

    /// Remove the checkpoint once the final mapping is durable. Absent is fine.
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Persistence` if an existing checkpoint cannot be removed.
    fn clear_checkpoint(&mut self) -> Result<(), ExError>;
}

impl<S: CheckpointSink + ?Sized> CheckpointSink for &mut S {
    fn save_checkpoint(&mut self, checkpoint: &ProgressCheckpoint) -> Result<(), ExError> {
        (**self).save_checkpoint(checkpoint)
    }

    fn save_final(&mut self, mapping: &ReplacementMapping) -> Result<(), ExError> {
        (**self).save_final(mapping)
    }

    fn clear_checkpoint(&mut self) -> Result<(), ExError> {
        (**self).clear_checkpoint()
    }
}

/// How a batch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Queue drained. `persisted` is false if the final mapping could not be
    /// written and was exported to the operator instead.
    Completed { resolved: usize, persisted: bool },
    /// Operator chose exit or input ran out
    Exited {
        resolved: usize,
        remaining: usize,
        persisted: bool,
    },
}

impl SessionOutcome {
    /// Elements resolved during this run (resumed ones excluded)
    pub fn resolved(&self) -> usize {
        match self {
            SessionOutcome::Completed { resolved, .. } | SessionOutcome::Exited { resolved, .. } => {
                *resolved
            }
        }
    }

    pub fn persisted(&self) -> bool {
        match self {
            SessionOutcome::Completed { persisted, .. } | SessionOutcome::Exited { persisted, .. } => {
                *persisted
            }
        }
    }
}

enum Step {
    Resolved(ElementKey),
    Exit,
}

/// One correlation batch over a single category.
///
/// Owns the in-memory mapping for the batch; nothing else mutates it.
pub struct CorrelationSession<'a, O, V, S> {
    config: &'a Config,
    category: Category,
    final_snapshot: &'a Snapshot,
    missing: &'a [MissingElement],
    existing: HashSet<ElementKey>,
    mapping: ReplacementMapping,
    operator: O,
    visualizer: V,
    sink: S,
    session_id: SessionId,
}

impl<'a, O, V, S> CorrelationSession<'a, O, V, S>
where
    O: Operator,
    V: Visualizer,
    S: CheckpointSink,
{
    pub fn new(
        config: &'a Config,
        category: Category,
        final_snapshot: &'a Snapshot,
        missing: &'a [MissingElement],
        operator: O,
        visualizer: V,
        sink: S,
    ) -> Self {
        let existing = final_snapshot.pool(category).map(|entry| entry.key()).collect();
        Self {
            config,
            category,
            final_snapshot,
            missing,
            existing,
            mapping: ReplacementMapping::new(),
            operator,
            visualizer,
            sink,
            session_id: SessionId::new(),
        }
    }

    /// Start from a previously saved mapping
    pub fn with_mapping(mut self, mapping: ReplacementMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn mapping(&self) -> &ReplacementMapping {
        &self.mapping
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Missing elements still to decide, in queue order
    pub fn pending(&self) -> Vec<&'a MissingElement> {
        let missing = self.missing;
        missing
            .iter()
            .filter(|m| !self.mapping.contains_key(m.key().as_str()))
            .collect()
    }

    /// Drive the queue until it drains or the operator exits.
    ///
    /// Persistence failures do not abort the batch: they are reported to the
    /// operator and the mapping is printed for manual export.
    ///
    /// # Errors
    ///
    /// Terminal I/O failures. A checkpoint is attempted before returning.
    pub fn run(&mut self) -> Result<SessionOutcome, ExError> {
        log_op_start!(
            "correlate_session",
            session_id = self.session_id.as_str(),
            category = self.category.as_str(),
            missing_count = self.missing.len(),
            resolved_count = self.mapping.len()
        );
        let start = std::time::Instant::now();

        let result = self.drain_queue();
        match &result {
            Ok(outcome) => {
                log_op_end!(
                    "correlate_session",
                    duration_ms = start.elapsed().as_millis() as u64,
                    session_id = self.session_id.as_str(),
                    outcome = ?outcome
                );
            }
            Err(e) => {
                log_op_error!(
                    "correlate_session",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    session_id = self.session_id.as_str()
                );
            }
        }
        result
    }

    fn drain_queue(&mut self) -> Result<SessionOutcome, ExError> {
        let queue = self.pending();
        let total = queue.len();
        let every = self.config.correlate.checkpoint_every.max(1);

        self.operator.say("")?;
        self.operator.say(&format!(
            "Replacing missing {} ({} to go, {} already mapped)",
            self.category,
            total,
            self.mapping.len()
        ))?;
        self.operator
            .say("Type -2 at the selection prompt to save and stop at any time.")?;

        let mut resolved = 0;
        for (position, missing) in queue.into_iter().enumerate() {
            let step = match self.process(position + 1, total, missing) {
                Ok(step) => step,
                Err(e) => {
                    if !self.checkpoint() {
                        self.export_mapping();
                    }
                    return Err(e.with_entity_id(missing.key().to_string()));
                }
            };

            match step {
                Step::Resolved(replacement) => {
                    tracing::info!(
                        op = "record_replacement",
                        session_id = self.session_id.as_str(),
                        missing_key = %missing.key(),
                        replacement_key = %replacement,
                    );
                    self.mapping.insert(missing.key(), replacement);
                    resolved += 1;
                    if resolved % every == 0 && self.checkpoint() {
                        self.notify(&format!("Progress saved after {} replacements.", resolved));
                    }
                }
                Step::Exit => {
                    let persisted = self.checkpoint();
                    if persisted {
                        self.notify("Progress saved. Run again to continue where you stopped.");
                    } else {
                        self.export_mapping();
                    }
                    return Ok(SessionOutcome::Exited {
                        resolved,
                        remaining: self.pending().len(),
                        persisted,
                    });
                }
            }
        }

        let persisted = self.finish();
        Ok(SessionOutcome::Completed {
            resolved,
            persisted,
        })
    }

    fn process(&mut self, position: usize, total: usize, missing: &MissingElement) -> Result<Step, ExError> {
        self.operator.say(&format!(
            "\nProcessing ({}/{}): {} ({})",
            position,
            total,
            missing.key(),
            label(missing.display_name.as_deref())
        ))?;

        loop {
            let candidates = rank_candidates(
                missing,
                self.final_snapshot.pool(self.category),
                self.config.correlate.top_k,
            );
            self.visualize(missing);
            self.present(missing, &candidates)?;

            match self.await_decision(&candidates)? {
                Decision::Resolved(key) => return Ok(Step::Resolved(key)),
                Decision::Retry => self.operator.say("Searching again...")?,
                Decision::Manual => return self.manual_entry(),
                Decision::Exit => return Ok(Step::Exit),
            }
        }
    }

    fn visualize(&self, missing: &MissingElement) {
        if !missing.has_variants() {
            return;
        }
        match self.visualizer.render(missing) {
            Ok(shown) => tracing::debug!(op = "visualize", missing_key = %missing.key(), shown),
            Err(e) => tracing::warn!(
                op = "visualize",
                missing_key = %missing.key(),
                err.code = e.code(),
                err.message = %e,
                "visualizer failed"
            ),
        }
    }

    fn present(&mut self, missing: &MissingElement, candidates: &[CandidateScore]) -> Result<(), ExError> {
        self.operator.say(&format!(
            "\nMissing element: {} ({})",
            missing.key(),
            label(missing.display_name.as_deref())
        ))?;
        if candidates.is_empty() {
            self.operator.say("No existing elements to compare against.")?;
        } else {
            self.operator.say("Similar elements found:")?;
        }
        for (rank, candidate) in candidates.iter().enumerate() {
            self.operator.say(&format!(
                "{}. {} ({}) - similarity: {:.2}",
                rank + 1,
                candidate.full_id,
                label(candidate.display_name.as_deref()),
                candidate.similarity_score
            ))?;
        }
        self.operator.say("0. None of these, search again")?;
        self.operator.say("-1. Type the id manually")?;
        self.operator.say("-2. Save and exit")?;
        Ok(())
    }

    fn await_decision(&mut self, candidates: &[CandidateScore]) -> Result<Decision, ExError> {
        let max = candidates.len();
        loop {
            let Some(line) = self
                .operator
                .ask(&format!("Choose a number between {} and {}: ", MIN_CHOICE, max))?
            else {
                return Ok(self.input_closed());
            };

            match parse_choice(&line, max) {
                Choice::Rank(rank) => {
                    return Ok(Decision::Resolved(candidates[rank - 1].full_id.clone()))
                }
                Choice::Retry => return Ok(Decision::Retry),
                Choice::Manual => return Ok(Decision::Manual),
                Choice::Exit => return Ok(Decision::Exit),
                Choice::Invalid(InvalidChoice::OutOfRange(_)) => self.operator.say(&format!(
                    "Please choose a number between {} and {}.",
                    MIN_CHOICE, max
                ))?,
                Choice::Invalid(InvalidChoice::NotANumber) => {
                    self.operator.say("Invalid input. Please type a whole number.")?
                }
            }
        }
    }

    fn manual_entry(&mut self) -> Result<Step, ExError> {
        loop {
            let Some(line) = self.operator.ask("Type the full id (modid:id): ")? else {
                self.input_closed();
                return Ok(Step::Exit);
            };
            if self.existing.contains(line.as_str()) {
                return Ok(Step::Resolved(ElementKey::from_raw(line)));
            }
            self.operator
                .say("That id does not exist in the final pack. Please type an existing id.")?;
        }
    }

    fn input_closed(&self) -> Decision {
        let err: ExError = BridgeError::OperatorInputClosed.into();
        tracing::warn!(
            op = "await_decision",
            session_id = self.session_id.as_str(),
            err.code = err.code(),
            "operator input closed, treating as exit"
        );
        Decision::Exit
    }

    /// Save a fresh checkpoint; `false` if it could not be written
    fn checkpoint(&mut self) -> bool {
        let checkpoint = ProgressCheckpoint::compute(self.missing, &self.mapping);
        match self.sink.save_checkpoint(&checkpoint) {
            Ok(()) => true,
            Err(e) => {
                self.notify(&format!("Could not save progress: {}", e));
                false
            }
        }
    }

    fn finish(&mut self) -> bool {
        if let Err(e) = self.sink.save_final(&self.mapping) {
            self.notify(&format!("Could not save the final mapping: {}", e));
            self.checkpoint();
            self.export_mapping();
            return false;
        }
        if let Err(e) = self.sink.clear_checkpoint() {
            self.notify(&format!(
                "Final mapping saved, but the progress file could not be removed: {}",
                e
            ));
        }
        self.notify("All missing elements processed. Final mapping saved.");
        true
    }

    /// Print the mapping so the operator can keep it by hand
    fn export_mapping(&mut self) {
        match serde_json::to_string_pretty(&self.mapping) {
            Ok(json) => {
                self.notify("Copy the replacements below to keep them:");
                self.notify(&json);
            }
            Err(e) => tracing::error!(op = "export_mapping", err.message = %e),
        }
    }

    /// Best-effort output for status lines after the decision is already made
    fn notify(&mut self, line: &str) {
        if let Err(e) = self.operator.say(line) {
            tracing::warn!(op = "notify", err.message = %e, "operator output failed");
        }
    }
}

fn label(display_name: Option<&str>) -> &str {
    match display_name {
        Some(name) if !name.is_empty() => name,
        _ => "no name",
    }
}
