use modbridge_core::{
    Category, CheckpointSink, ConsoleOperator, Element, ExError, MissingElement, ModEntry,
    ProgressCheckpoint, ReplacementMapping, Snapshot,
};

pub type ScriptedOperator = ConsoleOperator<std::io::Cursor<Vec<u8>>, Vec<u8>>;

/// Operator that answers from a fixed script, one line per prompt
#[allow(dead_code)]
pub fn scripted(lines: &[&str]) -> ScriptedOperator {
    let mut script = lines.join("\n");
    if !lines.is_empty() {
        script.push('\n');
    }
    ConsoleOperator::new(std::io::Cursor::new(script.into_bytes()), Vec::new())
}

/// Everything the operator was shown
#[allow(dead_code)]
pub fn transcript(operator: &ScriptedOperator) -> String {
    String::from_utf8_lossy(operator.output()).into_owned()
}

/// Sink that keeps every save in memory
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingSink {
    pub checkpoints: Vec<ProgressCheckpoint>,
    pub finals: Vec<ReplacementMapping>,
    pub cleared: bool,
    pub fail_saves: bool,
}

impl CheckpointSink for RecordingSink {
    fn save_checkpoint(&mut self, checkpoint: &ProgressCheckpoint) -> Result<(), ExError> {
        if self.fail_saves {
            return Err(persistence_failure("replacement_progress_blocks.json"));
        }
        self.checkpoints.push(checkpoint.clone());
        Ok(())
    }

    fn save_final(&mut self, mapping: &ReplacementMapping) -> Result<(), ExError> {
        if self.fail_saves {
            return Err(persistence_failure("correlations_blocks.json"));
        }
        self.finals.push(mapping.clone());
        Ok(())
    }

    fn clear_checkpoint(&mut self) -> Result<(), ExError> {
        self.cleared = true;
        Ok(())
    }
}

fn persistence_failure(path: &str) -> ExError {
    modbridge_core::BridgeError::Persistence {
        path: path.to_string(),
        reason: "disk full".to_string(),
    }
    .into()
}

/// Origin pack with one `foo` ore block
#[allow(dead_code)]
pub fn ore_origin() -> Snapshot {
    Snapshot::new().with_mod(
        ModEntry::new("foo", "Foo").with_elements(
            Category::Blocks,
            vec![Element::new("foo_ore", "Foo Ore")],
        ),
    )
}

/// Final pack where `foo` is gone and `bar` offers a close replacement
#[allow(dead_code)]
pub fn ore_final() -> Snapshot {
    Snapshot::new()
        .with_mod(ModEntry::new("baz", "Baz").with_elements(
            Category::Blocks,
            vec![Element::new("totally_unrelated", "Zzz")],
        ))
        .with_mod(ModEntry::new("bar", "Bar").with_elements(
            Category::Blocks,
            vec![Element::new("bar_ore", "Bar Ore")],
        ))
        .with_mod(ModEntry::new("minecraft", "Minecraft").with_elements(
            Category::Blocks,
            vec![Element::new("stone", "Stone")],
        ))
}

/// `count` missing blocks named `old_0..` under mod `old`
#[allow(dead_code)]
pub fn missing_batch(count: usize) -> Vec<MissingElement> {
    (0..count)
        .map(|n| {
            MissingElement::from_element(
                "old",
                &Element::new(format!("old_{n}"), format!("Old {n}")),
            )
        })
        .collect()
}
