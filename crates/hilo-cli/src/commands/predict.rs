use colored::Colorize;

use hilo_core::Label;
use hilo_predict::{MarkovPredictor, PatternAnalyzer};

use super::paint;

pub fn run(sequence: &str, window: usize, json: bool) -> Result<(), String> {
    let oldest_first = Label::parse_sequence(sequence).map_err(|e| e.to_string())?;
    let recent_first: Vec<Label> = oldest_first.iter().rev().copied().collect();

    let analyzer = PatternAnalyzer::new().with_window(window);
    let prediction = MarkovPredictor::new()
        .with_analyzer(analyzer)
        .predict(&recent_first);

    if json {
        let out = serde_json::to_string_pretty(&prediction)
            .map_err(|e| format!("cannot serialize prediction: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "  {} {}  {}",
        "Next:".bold(),
        paint(prediction.label),
        format!(
            "(confidence {:.2}%, probability {:.1}%)",
            prediction.confidence,
            prediction.max_probability * 100.0
        )
        .dimmed()
    );
    match prediction.last_state {
        Some(last) => {
            let streak = if prediction.streak_adjusted() {
                format!("{} in a row, streak-corrected", prediction.streak_run)
                    .yellow()
                    .to_string()
            } else {
                format!("{} in a row", prediction.streak_run)
            };
            println!(
                "  {} {} ({streak}), {} rounds",
                "Last:".bold(),
                paint(last),
                oldest_first.len()
            );
        }
        None => println!("  {} {}", "Last:".bold(), "(no history)".dimmed()),
    }
    println!();
    println!("  {}", prediction.explanation);

    Ok(())
}
