use anyhow::{bail, Context};
use onboarding_tour::layout::{self, DotState};
use onboarding_tour::{
    AppResult, EventKind, TourCommand, TourConfig, TourController, TourEngine, TourView,
};

const LOG_TARGET_STARTUP: &str = "onboarding_tour::startup";

/// Initialize tracing with file rotation
///
/// Logs are written to:
/// - macOS: ~/Library/Application Support/OnboardingTour/logs/
/// - Windows: %APPDATA%/OnboardingTour/logs/
/// - Linux: ~/.config/OnboardingTour/logs/
///
/// Log output:
/// - Debug builds: Console + File
/// - Release builds: File only
fn initialize_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = dirs::config_dir()
        .map(|dir| dir.join("OnboardingTour").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "tour-demo.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!(target: LOG_TARGET_STARTUP, "Log directory: {}", log_dir.display());
    guard
}

/// Split arguments into an optional config path and the command script
fn parse_args(args: &[String]) -> AppResult<(Option<&str>, Vec<TourCommand>)> {
    let (config_path, script) = match args.first() {
        Some(first) if first.ends_with(".json") => (Some(first.as_str()), &args[1..]),
        _ => (None, args),
    };

    let mut commands = Vec::with_capacity(script.len());
    for word in script {
        match TourCommand::parse(word) {
            Some(command) => commands.push(command),
            None => bail!(
                "unknown command '{}' (expected start:<flow>, next, skip, check:<item>, reset)",
                word
            ),
        }
    }

    Ok((config_path, commands))
}

fn render(view: &TourView, total_steps: usize) -> String {
    let Some(step) = &view.current_step else {
        let (done, total) = view.checklist_progress();
        return format!("idle · checklist {}/{}", done, total);
    };

    let dots: String = layout::progress_dots(view.step_index, total_steps)
        .into_iter()
        .map(|dot| match dot {
            DotState::Done => '●',
            DotState::Current => '◉',
            DotState::Upcoming => '○',
        })
        .collect();
    let action = if layout::is_final_step(view.step_index, total_steps) {
        format!("{} ✓", step.action_label())
    } else {
        format!("{} →", step.action_label())
    };

    format!(
        "{} [{}] {} @ {} ({}) · {}",
        dots,
        view.step_index + 1,
        step.title,
        step.target,
        step.placement(),
        action
    )
}

fn main() -> AppResult<()> {
    let _guard = initialize_tracing();
    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Starting tour-demo v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, mut commands) = parse_args(&args)?;

    let config = match config_path {
        Some(path) => TourConfig::load(path).with_context(|| format!("loading {}", path))?,
        None => TourConfig::dashboard_demo(),
    };

    if commands.is_empty() {
        let first = config
            .flows
            .first()
            .context("configuration has no flows")?;
        commands.push(TourCommand::StartFlow {
            flow_id: first.id.clone(),
        });
        commands.extend(std::iter::repeat(TourCommand::NextStep).take(first.step_count()));
    }

    let engine = TourEngine::shared(config);
    {
        let mut engine = engine.lock();
        for kind in EventKind::ALL {
            engine.on(kind, |event, state| {
                tracing::info!(
                    kind = %event.kind(),
                    completed = state.completed_count(),
                    "{}",
                    event.description()
                );
            });
        }
    }

    let controller = TourController::attach(engine);
    for command in commands {
        let description = command.description();
        let outcome = match command {
            TourCommand::StartFlow { flow_id } => controller.start_flow(&flow_id),
            TourCommand::NextStep => controller.next_step(),
            TourCommand::SkipFlow => controller.skip_flow(),
            TourCommand::CompleteChecklistItem { item_id } => {
                controller.complete_checklist_item(&item_id)
            }
            TourCommand::Reset => controller.reset(),
        };

        if let Some(reason) = outcome.reason() {
            println!("{:<32} ignored: {}", description, reason);
        } else {
            println!(
                "{:<32} {}",
                description,
                render(&controller.view(), controller.total_steps())
            );
        }
    }

    controller.detach();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_args_with_config() {
        let args = args(&["tour.json", "start:setup", "next"]);
        let (path, commands) = parse_args(&args).unwrap();
        assert_eq!(path, Some("tour.json"));
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn test_parse_args_rejects_unknown_words() {
        let args = args(&["start:setup", "jump"]);
        assert!(parse_args(&args).is_err());
    }

    #[test]
    fn test_render_idle() {
        assert_eq!(render(&TourView::default(), 0), "idle · checklist 0/0");
    }
}
