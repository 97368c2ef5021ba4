//! CLI output formatting utilities.

use crate::rag::ContextChunk;
use crate::session::ConversationTurn;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print an answer.
    pub fn answer(text: &str) {
        println!("\n{} {}\n", style("Vidask:").cyan().bold(), text);
    }

    /// Print a retrieved chunk.
    pub fn source(chunk: &ContextChunk) {
        println!(
            "\n{} chunk #{} @ {} (score: {:.2})",
            style(">>").green(),
            style(chunk.chunk_order).bold(),
            style(&chunk.timestamp).cyan(),
            chunk.score
        );
        println!("   {}", content_preview(&chunk.content, 200));
        println!("   {}", style(&chunk.url).dim());
    }

    /// Print one conversation turn.
    pub fn turn(turn: &ConversationTurn) {
        println!("{} {}", style(format!("[{}]", turn.role)).dim(), turn.content);
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let truncated: String = content.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_preview() {
        assert_eq!(content_preview("short\ntext", 20), "short text");
        assert_eq!(content_preview("abcdef", 3), "abc...");
        // Multi-byte characters are never split.
        assert_eq!(content_preview("héllo wörld", 4), "héll...");
    }
}
