#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

use modbridge_core::errors::{ExError, ExErrorKind};
use modbridge_core::{
    Category, Config, CorrelationSession, Element, MissingElement, Visualizer,
};

use common::{ore_final, scripted, RecordingSink};

#[derive(Default)]
struct CountingVisualizer {
    calls: Cell<usize>,
    fail: bool,
}

impl Visualizer for CountingVisualizer {
    fn render(&self, _missing: &MissingElement) -> Result<bool, ExError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(ExError::new(ExErrorKind::ExternalService).with_message("viewer crashed"));
        }
        Ok(true)
    }
}

fn with_variants() -> MissingElement {
    let mut variants = BTreeMap::new();
    variants.insert(
        "facing".to_string(),
        BTreeSet::from(["north".to_string(), "south".to_string()]),
    );
    MissingElement::from_element("foo", &Element::new("foo_log", "Foo Log").with_variants(variants))
}

fn plain() -> MissingElement {
    MissingElement::from_element("foo", &Element::new("foo_ore", "Foo Ore"))
}

fn run(missing: &[MissingElement], visualizer: &CountingVisualizer, answers: &[&str]) -> RecordingSink {
    let config = Config::default();
    let final_ = ore_final();
    let mut operator = scripted(answers);
    let mut sink = RecordingSink::default();
    CorrelationSession::new(
        &config,
        Category::Blocks,
        &final_,
        missing,
        &mut operator,
        visualizer,
        &mut sink,
    )
    .run()
    .unwrap();
    sink
}

#[test]
fn test_visualizer_called_once_per_search_for_variant_elements() {
    let visualizer = CountingVisualizer::default();
    run(&[with_variants()], &visualizer, &["0", "1"]);
    assert_eq!(visualizer.calls.get(), 2);
}

#[test]
fn test_visualizer_skipped_without_variants() {
    let visualizer = CountingVisualizer::default();
    run(&[plain()], &visualizer, &["1"]);
    assert_eq!(visualizer.calls.get(), 0);
}

#[test]
fn test_visualizer_failure_does_not_block_decision() {
    let visualizer = CountingVisualizer {
        fail: true,
        ..CountingVisualizer::default()
    };
    let sink = run(&[with_variants()], &visualizer, &["1"]);
    assert_eq!(visualizer.calls.get(), 1);
    assert_eq!(sink.finals[0].len(), 1);
}
