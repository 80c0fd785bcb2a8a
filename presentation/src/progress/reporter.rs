//! Progress reporting for agent runs
//!
//! Both reporters write to stderr so that `--output json` stays parseable.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use toolcall_application::AgentProgressNotifier;
use toolcall_domain::core::string::truncate;
use toolcall_domain::{ExecutionPhase, ToolCall, ToolCallPlan, ToolResult};

/// Reports progress with a spinner that follows the run's phases
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    verbose: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            verbose: false,
        }
    }

    /// Also print one line per plan step and tool result
    pub fn verbose() -> Self {
        Self {
            spinner: Mutex::new(None),
            verbose: true,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub(crate) fn phase_name(phase: &ExecutionPhase) -> String {
        match phase {
            ExecutionPhase::Received => "Received".to_string(),
            ExecutionPhase::Planning => "Selecting tools".to_string(),
            ExecutionPhase::Executing(i) => format!("Executing step {}", i + 1),
            ExecutionPhase::Synthesizing => "Composing answer".to_string(),
            ExecutionPhase::Completed => "Complete".to_string(),
        }
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }

    /// Print a line without tearing the spinner
    fn println(&self, line: String) {
        let mut printed = false;
        self.with_spinner(|pb| {
            pb.suspend(|| eprintln!("{}", line));
            printed = true;
        });
        if !printed {
            eprintln!("{}", line);
        }
    }

    fn finish(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentProgressNotifier for ProgressReporter {
    fn on_phase_change(&self, phase: &ExecutionPhase) {
        if phase.is_terminal() {
            self.finish();
            return;
        }

        let name = Self::phase_name(phase);
        if let Ok(mut guard) = self.spinner.lock() {
            let pb = guard.get_or_insert_with(|| {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::spinner_style());
                pb.enable_steady_tick(Duration::from_millis(100));
                pb
            });
            pb.set_prefix(name);
            pb.set_message("...");
        }
    }

    fn on_plan_selected(&self, plan: &ToolCallPlan) {
        let names = plan.tool_names().join(", ");
        self.with_spinner(|pb| pb.set_message(format!("plan from {}: {}", plan.source, names)));

        if self.verbose {
            for (i, call) in plan.iter().enumerate() {
                self.println(format!(
                    "  {} {}. {} {}",
                    "→".blue(),
                    i + 1,
                    call.tool_name.cyan(),
                    truncate(&call.arguments_json(), 60).dimmed()
                ));
            }
        }
    }

    fn on_tool_attempt(&self, call: &ToolCall, attempt: u32, max_attempts: u32) {
        self.with_spinner(|pb| {
            pb.set_message(format!(
                "{} (attempt {}/{})",
                call.tool_name, attempt, max_attempts
            ))
        });
    }

    fn on_tool_result(&self, result: &ToolResult) {
        if !self.verbose {
            return;
        }
        if result.success {
            self.println(format!(
                "  {} {} {}",
                "✓".green(),
                result.tool_name.green(),
                format!("{} ms", result.duration_ms()).dimmed()
            ));
        } else {
            self.println(format!(
                "  {} {} {}",
                "✗".red(),
                result.tool_name.red(),
                truncate(result.error_message(), 60).dimmed()
            ));
        }
    }

    fn on_answer(&self, _answer: &str, _success: bool) {
        self.finish();
    }
}

/// Simple text-based progress (no spinners)
pub struct SimpleProgress;

impl AgentProgressNotifier for SimpleProgress {
    fn on_phase_change(&self, phase: &ExecutionPhase) {
        eprintln!("{} {}", "->".cyan(), ProgressReporter::phase_name(phase).bold());
    }

    fn on_plan_selected(&self, plan: &ToolCallPlan) {
        eprintln!("   plan: {}", plan.describe());
    }

    fn on_tool_attempt(&self, call: &ToolCall, attempt: u32, max_attempts: u32) {
        if attempt > 1 {
            eprintln!("   retry {} ({}/{})", call.tool_name, attempt, max_attempts);
        }
    }

    fn on_tool_result(&self, result: &ToolResult) {
        if result.success {
            eprintln!("   {} {}", "v".green(), result.tool_name);
        } else {
            eprintln!(
                "   {} {} ({})",
                "x".red(),
                result.tool_name,
                result.error_message()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use toolcall_domain::{PlanSource, ToolError};

    #[test]
    fn test_phase_names() {
        assert_eq!(ProgressReporter::phase_name(&ExecutionPhase::Executing(0)), "Executing step 1");
        assert_eq!(ProgressReporter::phase_name(&ExecutionPhase::Planning), "Selecting tools");
    }

    #[test]
    fn test_reporter_survives_a_full_run() {
        let reporter = ProgressReporter::verbose();
        let plan = ToolCallPlan::from_steps(
            PlanSource::Heuristic,
            vec![ToolCall::new("calculator_tool").with_arg("expression", "2 + 2")],
        );

        reporter.on_phase_change(&ExecutionPhase::Received);
        reporter.on_phase_change(&ExecutionPhase::Planning);
        reporter.on_plan_selected(&plan);
        reporter.on_phase_change(&ExecutionPhase::Executing(0));
        reporter.on_tool_attempt(&plan.steps[0], 1, 3);
        reporter.on_tool_result(&ToolResult::failure(
            "calculator_tool",
            ToolError::invalid_argument("Division by zero"),
            Utc::now(),
        ));
        reporter.on_phase_change(&ExecutionPhase::Synthesizing);
        reporter.on_answer("done", true);

        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_completed_phase_clears_spinner() {
        let reporter = ProgressReporter::new();
        reporter.on_phase_change(&ExecutionPhase::Planning);
        assert!(reporter.spinner.lock().unwrap().is_some());
        reporter.on_phase_change(&ExecutionPhase::Completed);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
