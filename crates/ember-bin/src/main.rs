//! Ember entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{handle_key, open_file};
use core_config::Config;
use core_events::{ESCAPE_FALLBACKS, ESCAPE_SEQUENCES, KEYPRESS_TOTAL};
use core_input::{ByteSource, KeyDecoder, StdinSource};
use core_model::{EditorModel, Layout};
use core_render::RenderEngine;
use core_state::EditorState;
use core_terminal::{CrosstermBackend, TerminalBackend, window_size};
use core_text::Document;
use std::io::{Write, stdout};
use std::path::PathBuf;
use std::sync::Once;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";
const LOG_FILE: &str = "ember.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "ember", version, about = "Ember text editor")]
struct Args {
    /// File to open. Without one the editor starts on an empty, unnamed document.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `ember.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = core_config::log_dir();
    if std::fs::create_dir_all(&log_dir).is_err() {
        return None;
    }
    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn load_document(args: &Args, config: &Config) -> Result<Document> {
    match &args.path {
        Some(path) => open_file(path, config.tab_stop()),
        None => Ok(Document::new(config.tab_stop())),
    }
}

/// Main loop: draw, wait for a key (or the idle timeout), apply it.
///
/// `query_size` is asked for the terminal size before every frame so a
/// resized window is picked up on the next redraw.
fn run_session<S, W, F>(
    model: &mut EditorModel,
    decoder: &KeyDecoder,
    src: &mut S,
    out: &mut W,
    mut query_size: F,
) -> Result<()>
where
    S: ByteSource + ?Sized,
    W: Write,
    F: FnMut() -> Option<(u16, u16)>,
{
    let mut engine = RenderEngine::new();
    let mut last_size = None;
    loop {
        if let Some(size) = query_size()
            && last_size != Some(size)
        {
            last_size = Some(size);
            model.view_mut().resize(Layout::new(size.0, size.1));
            info!(target: "runtime", cols = size.0, rows = size.1, "resize");
        }
        engine.render(model, Instant::now(), out)?;
        match decoder.poll_key(src).context("read key")? {
            Some(key) => {
                if handle_key(key, model).quit {
                    break;
                }
            }
            None => {
                model.state_mut().tick_ephemeral(Instant::now());
            }
        }
    }
    info!(
        target: "runtime",
        frames = engine.frames(),
        last_render_ns = engine.last_render_ns(),
        keys = KEYPRESS_TOTAL.load(Ordering::Relaxed),
        escapes = ESCAPE_SEQUENCES.load(Ordering::Relaxed),
        escape_fallbacks = ESCAPE_FALLBACKS.load(Ordering::Relaxed),
        "session_end"
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", path = ?args.path, config = ?args.config, "startup");

    let config = core_config::load_from(args.config.clone())?;
    let document = load_document(&args, &config)?;
    let state = EditorState::new(document)
        .with_quit_times(config.quit_times())
        .with_message_ttl(config.message_ttl());
    let decoder = KeyDecoder::new(config.escape_timeout(), config.idle_timeout());
    let mut input = StdinSource::spawn().context("spawn stdin reader")?;

    let mut backend = CrosstermBackend::new();
    if let Err(e) = backend.set_title("ember") {
        info!(target: "terminal", error = %e, "set_title_failed");
    }
    let _terminal = backend.enter_guard()?;

    let mut out = stdout();
    let (cols, rows) = window_size(&mut input, &mut out).context("get window size")?;
    let mut model = EditorModel::new(state, Layout::new(cols, rows));
    model.state_mut().set_status(HELP_MESSAGE);

    run_session(&mut model, &decoder, &mut input, &mut out, || {
        crossterm::terminal::size().ok()
    })
}
