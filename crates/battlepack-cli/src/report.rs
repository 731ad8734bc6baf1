//! Human-readable progress and result output.

use battlepack_core::batch::failures;
use battlepack_core::{Progress, RunReport};

/// Lines destined for stdout and stderr.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Rendered {
    pub out: Vec<String>,
    pub err: Vec<String>,
}

pub fn progress(progress: Progress) {
    if let Progress::Listed { unopened } = progress {
        if unopened > 0 {
            println!("Opening {} battlepacks...", unopened);
        }
    }
}

pub fn render(report: &RunReport) -> Rendered {
    let mut rendered = Rendered::default();

    match report {
        RunReport::NothingToOpen => {
            rendered.out.push("All of your battlepacks are already open.".to_string());
        }
        RunReport::Opened { summary, outcomes } => {
            if summary.succeeded > 0 {
                rendered
                    .out
                    .push(format!("{} battlepacks opened successfully.", summary.succeeded));
            }
            if summary.failed > 0 {
                rendered
                    .err
                    .push(format!("{} battlepacks failed to open.", summary.failed));
                for (pack, failure) in failures(outcomes) {
                    rendered.err.push(format!("  {}: {}", pack, failure));
                }
            }
        }
    }

    rendered
}

pub fn print(report: &RunReport) {
    let rendered = render(report);
    for line in &rendered.out {
        println!("{}", line);
    }
    for line in &rendered.err {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use battlepack_core::{summarize, Battlepack, OpenFailure, OpenOutcome};

    use super::*;

    fn opened(outcomes: Vec<OpenOutcome>) -> RunReport {
        RunReport::Opened {
            summary: summarize(&outcomes),
            outcomes,
        }
    }

    #[test]
    fn test_nothing_to_open() {
        let rendered = render(&RunReport::NothingToOpen);
        assert_eq!(rendered.out, vec!["All of your battlepacks are already open."]);
        assert!(rendered.err.is_empty());
    }

    #[test]
    fn test_mixed_results() {
        let report = opened(vec![
            OpenOutcome::opened(Battlepack::new("1")),
            OpenOutcome::failed(Battlepack::new("2"), OpenFailure::Status(500)),
            OpenOutcome::opened(Battlepack::new("3")),
        ]);

        let rendered = render(&report);
        assert_eq!(rendered.out, vec!["2 battlepacks opened successfully."]);
        assert_eq!(
            rendered.err,
            vec![
                "1 battlepacks failed to open.".to_string(),
                "  battlepack 2: server returned status 500".to_string(),
            ]
        );
    }

    #[test]
    fn test_all_failed_is_reported_as_failure() {
        let report = opened(vec![OpenOutcome::failed(
            Battlepack::new("7"),
            OpenFailure::Transport("timed out".to_string()),
        )]);

        let rendered = render(&report);
        assert!(rendered.out.is_empty());
        assert_eq!(rendered.err[0], "1 battlepacks failed to open.");
        assert_ne!(render(&RunReport::NothingToOpen), rendered);
    }
}
