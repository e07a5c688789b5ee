//! Delete-pattern command - Remove every document whose name contains a substring
//!
//! Provides the `kbdocs delete-pattern [substring]` CLI command which:
//! 1. Lists the matching documents (an empty substring matches all)
//! 2. Asks for y/N confirmation on stdin unless `--yes` is given
//! 3. Deletes the matches in batches of `DELETE_BATCH_SIZE`

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use kbdocs_core::config::Purpose;
use kbdocs_core::ports::{AlwaysConfirm, IConfirmation};
use kbdocs_core::usecases::{DeleteByPatternUseCase, PatternDeleteOutcome};
use serde_json::json;

use super::delete::finish;
use super::list::describe;
use super::{document_store, CommandContext};

/// Delete documents matching a name substring
#[derive(Debug, Args)]
pub struct DeletePatternCommand {
    /// Substring to match against document names
    #[arg(default_value = "")]
    pub pattern: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl DeletePatternCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter("delete-pattern");
        let config = ctx.load_config(Purpose::Cleanup)?;

        let confirmation: Arc<dyn IConfirmation> = if self.yes {
            Arc::new(AlwaysConfirm)
        } else {
            Arc::new(StdinConfirmation)
        };
        let usecase = DeleteByPatternUseCase::new(document_store(&config), confirmation);

        let matches = usecase.find_matches(&self.pattern).await?;
        if !matches.is_empty() {
            formatter.success(&format!(
                "Found {} files matching '{}':",
                matches.len(),
                self.pattern
            ));
            for file in &matches {
                formatter.line(&describe(file));
            }
        }

        let outcome = usecase
            .delete_matches(&matches, config.cleanup.delete_batch_size)
            .await;

        match outcome {
            PatternDeleteOutcome::NoMatches => {
                formatter.line(&format!("No files match pattern '{}'", self.pattern));
                formatter.result(true, json!({"matched": 0, "deleted": 0}));
                Ok(())
            }
            PatternDeleteOutcome::Cancelled => {
                formatter.line("Deletion cancelled");
                formatter.result(true, json!({"matched": matches.len(), "cancelled": true}));
                Ok(())
            }
            PatternDeleteOutcome::Completed(report) => {
                formatter.result(
                    report.is_success(),
                    json!({"matched": matches.len(), "report": report}),
                );
                if report.is_success() {
                    formatter.success(&format!("Deleted {} files", report.deleted));
                }
                finish(formatter.as_ref(), &report)
            }
        }
    }
}

/// y/N prompt on the terminal; anything but an explicit yes declines
///
/// The prompt goes to stderr so stdout only ever carries the result.
pub struct StdinConfirmation;

impl IConfirmation for StdinConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        ask(prompt, &mut io::stdin().lock(), &mut io::stderr())
    }
}

/// Writes `prompt` to `output` and reads one answer line from `input`
fn ask(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
    if write!(output, "{prompt} (y/N): ").and_then(|()| output.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => is_yes(&answer),
        Err(_) => false,
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_prompt_written_to_given_sink() {
        let mut input = io::Cursor::new("y\n");
        let mut prompt_sink = Vec::new();
        assert!(ask("Delete 3 files?", &mut input, &mut prompt_sink));
        assert_eq!(String::from_utf8(prompt_sink).unwrap(), "Delete 3 files? (y/N): ");
    }

    #[test]
    fn test_closed_input_declines() {
        let mut input = io::Cursor::new("");
        let mut prompt_sink = Vec::new();
        assert!(!ask("Delete?", &mut input, &mut prompt_sink));
    }
}
