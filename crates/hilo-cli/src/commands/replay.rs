use std::fs;
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Deserialize;

use hilo_core::{Event, Variant};
use hilo_session::{IngestOutcome, SessionConfig, VariantCoordinator};

use super::paint;

/// One recorded round in a replay file.
#[derive(Debug, Deserialize)]
struct ReplayEntry {
    session: u64,
    dice: [u32; 3],
}

pub fn run(file: &Path, variant: &str, capacity: usize) -> Result<(), String> {
    let variant = Variant::parse(variant).map_err(|e| e.to_string())?;
    let raw = fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let entries: Vec<ReplayEntry> = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid replay file {}: {e}", file.display()))?;

    let coordinator = VariantCoordinator::new(SessionConfig::default().with_capacity(capacity));
    let mut applied = Vec::new();
    let mut duplicates = 0;
    let mut rejected = 0;

    for (index, entry) in entries.iter().enumerate() {
        let event = match Event::new(entry.session, entry.dice) {
            Ok(event) => event,
            Err(e) => {
                eprintln!("  {} entry {index}: {e}", "skip".yellow().bold());
                rejected += 1;
                continue;
            }
        };
        match coordinator.ingest(variant, &event) {
            IngestOutcome::Applied(record) => applied.push(record),
            IngestOutcome::Duplicate { .. } => duplicates += 1,
        }
    }

    if applied.is_empty() {
        println!("  No rounds applied.");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            "Session",
            "Sum",
            "Result",
            "Next",
            "Predicted",
            "Confidence",
        ]);
        for record in &applied {
            table.add_row(vec![
                record.current_session.to_string(),
                record.dice_sum.to_string(),
                record.label.to_string(),
                record.next_session.to_string(),
                record.predicted_label.to_string(),
                format!("{:.2}%", record.confidence),
            ]);
        }
        println!("{table}");
    }

    println!();
    println!(
        "  {} applied, {} duplicates, {} rejected ({variant}, {} kept)",
        applied.len(),
        duplicates,
        rejected,
        coordinator.history_len(variant)
    );

    let snapshot = coordinator.snapshot(variant);
    if let Some(predicted) = snapshot.predicted_label {
        println!();
        println!(
            "  {} session {}: {} {}",
            "Next".bold(),
            snapshot.next_session,
            paint(predicted),
            format!("({:.2}%)", snapshot.confidence).dimmed()
        );
        println!("  {}", snapshot.explanation);
    }

    Ok(())
}
