pub mod predict;
pub mod replay;
pub mod serve;

use colored::{ColoredString, Colorize};
use hilo_core::Label;

/// Label name colored for terminal output.
fn paint(label: Label) -> ColoredString {
    match label {
        Label::High => label.to_string().red().bold(),
        Label::Low => label.to_string().cyan().bold(),
    }
}
