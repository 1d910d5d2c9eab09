//! Demo binary: wires the declarative terminal UI engine's crates together
//! behind a small CLI, the way the editor's own entrypoint wired its model,
//! input, and render crates — config load, tracing setup, terminal guard,
//! then the actual work, all behind a panic hook that restores the terminal
//! on the way out.

use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Once;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use stage_builtins::{Badge, Divider, Panel, Text};
use stage_command::{Capabilities, Color, SemanticColor};
use stage_paint::{DefaultTheme, PaintContext, PaintEngine};
use stage_render::{AnsiBackend, Backend, EventBackend};
use stage_session::LiveSession;
use stage_terminal::{CrosstermBackend, Runtime, TerminalBackend};
use stage_view::{group, RenderContext, SessionOptions, View};

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "stage", version, about = "Declarative terminal UI engine demo")]
struct Args {
    /// Optional configuration file path (overrides discovery of `stage.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Suppress visual output; drive only the structured event backend.
    #[arg(long = "headless")]
    headless: bool,
    /// Render a single static frame and exit instead of running the
    /// progress/spinner demo loop.
    #[arg(long = "once")]
    once: bool,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn configure_logging(&mut self) {
        let log_path = Path::new("stage.log");
        if log_path.exists() {
            let _ = std::fs::remove_file(log_path);
        }
        let file_appender = tracing_appender::rolling::never(".", "stage.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => self.log_guard = Some(guard),
            Err(_err) => {
                // Global subscriber already installed (e.g. under `cargo test`); drop the
                // guard so its background writer shuts down instead of leaking.
            }
        }
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// The view tree the demo renders: a titled panel holding a label, a
/// divider, and a success badge.
fn demo_view() -> Panel<stage_view::Group> {
    Panel::new(group(vec![
        Box::new(Text::new("stage engine demo").foreground(Color::Semantic(SemanticColor::Accent))),
        Box::new(Divider),
        Box::new(Badge::new("ready").foreground(Color::Semantic(SemanticColor::Success))),
    ]))
    .title("stage")
}

fn run_once(capabilities: Capabilities, options: SessionOptions, headless: bool) -> Result<()> {
    let theme = Arc::new(DefaultTheme);
    let mut ctx = RenderContext::new(capabilities.width, capabilities.height, capabilities, theme.clone(), options);
    let node = demo_view().make_node(&mut ctx);

    let engine = PaintEngine::new(theme);
    let paint_ctx = PaintContext::new(capabilities.width, capabilities.height, capabilities.unicode);
    let commands = engine.paint(&node, &paint_ctx);

    if headless {
        let mut backend = EventBackend::new(stdout());
        backend.apply(&commands)?;
        backend.flush()?;
    } else {
        let mut backend = AnsiBackend::new(stdout(), capabilities);
        backend.apply(&commands)?;
        backend.flush()?;
    }
    Ok(())
}

/// Runs a progress bar to completion and a spinner for a short interval,
/// exercising `LiveSession`'s concurrent live-region machinery end to end.
async fn run_demo_loop(capabilities: Capabilities, options: SessionOptions) -> Result<()> {
    let theme = Arc::new(DefaultTheme);
    let session = Arc::new(LiveSession::new(capabilities.width, capabilities.height, capabilities, theme, options));

    session.update("header", Some((0, 0)), Text::new("stage engine demo")).await?;

    let progress = session.progress("work", Some((1, 0)), 20, "loading").await?;
    let mut spinner = session
        .spinner(
            "spin",
            Some((2, 0)),
            vec!["⠋".into(), "⠙".into(), "⠹".into(), "⠸".into()],
            Duration::from_millis(80),
            "working",
        )
        .await?;

    for step in 1..=20 {
        tokio::time::sleep(Duration::from_millis(30)).await;
        progress.update(step).await?;
    }
    progress.finish("complete");

    spinner
        .finish(Some(Box::new(Badge::new("done").foreground(Color::Semantic(SemanticColor::Success)))))
        .await?;

    session.update("footer", Some((3, 0)), Text::new("demo complete")).await?;
    Runtime::flush_all().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    startup.configure_logging();
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = stage_config::load_from(args.config.clone())?;
    let mut capabilities: Capabilities = config.capabilities.into();
    if !args.headless {
        let detected = stage_terminal::detect();
        capabilities.width = detected.width;
        capabilities.height = detected.height;
        capabilities.is_tty = detected.is_tty;
    }
    let mut options: SessionOptions = config.session.into();
    options.headless = options.headless || args.headless;

    if args.once || options.headless {
        if let Err(err) = run_once(capabilities, options, options.headless) {
            error!(target: "runtime", ?err, "run_once failed");
            return Err(err);
        }
        return Ok(());
    }

    startup.backend.set_title("stage")?;
    let _guard = startup.backend.enter_guard()?;

    Runtime::init(capabilities).await;
    Runtime::register_backend(Box::new(AnsiBackend::new(stdout(), capabilities))).await?;

    let result = run_demo_loop(capabilities, options).await;

    Runtime::stop_all_animations();
    Runtime::flush_all().await.ok();

    if let Err(err) = &result {
        error!(target: "runtime", ?err, "demo loop failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage_command::{NodeKind, NoopTheme};

    #[test]
    fn demo_view_elaborates_without_a_group_node_surviving() {
        let mut ctx = RenderContext::for_test(40, 10);
        let node = demo_view().make_node(&mut ctx);
        fn assert_no_group(n: &stage_node::Node) {
            assert_ne!(n.kind, NodeKind::Group);
            for c in &n.children {
                assert_no_group(c);
            }
        }
        assert_no_group(&node);
    }

    #[test]
    fn demo_view_paints_a_non_empty_command_stream() {
        let mut ctx = RenderContext::for_test(40, 10);
        let node = demo_view().make_node(&mut ctx);
        let engine = PaintEngine::new(Arc::new(NoopTheme));
        let paint_ctx = PaintContext::new(40, 10, true);
        let commands = engine.paint(&node, &paint_ctx);
        assert!(!commands.is_empty());
    }
}
