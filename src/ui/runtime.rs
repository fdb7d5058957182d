use std::io::{self, Stdout};
use std::sync::mpsc::{RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Runtime;

use crate::catalog::Route;
use crate::config::ConfigStore;
use crate::shutdown::{ShutdownCoordinator, ShutdownHandle, ShutdownPhase};
use crate::theme::ThemeController;
use crate::ui::app::{App, FetchSpawner};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Grace period for in-flight fetch tasks when the runtime shuts down.
const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(200);

pub fn run(config: ConfigStore, theme: ThemeController, initial_route: Route) -> io::Result<()> {
    let tick_rate = config.get().ui.tick_rate();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("bites-worker")
        .enable_all()
        .build()?;

    let coordinator = ShutdownCoordinator::new();
    let events = EventHandler::new(tick_rate, coordinator.handle());
    spawn_signal_listener(&runtime, events.sender(), coordinator.handle());

    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new(config, theme);
    app.set_fetch_spawner(FetchSpawner::new(runtime.handle().clone(), events.sender()));
    let size = terminal.size()?;
    app.on_resize(size.width, size.height);
    app.open(initial_route);
    tracing::info!(route = initial_route.title(), "ui started");

    let result = event_loop(&mut terminal, &mut app, &events, tick_rate);

    coordinator.signal();
    coordinator.advance(ShutdownPhase::StoppingInput);
    coordinator.advance(ShutdownPhase::CancellingFetches);
    app.close_page();
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);

    coordinator.advance(ShutdownPhase::RestoringTerminal);
    drop(guard);
    coordinator.advance(ShutdownPhase::Complete);
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    events: &EventHandler,
    tick_rate: Duration,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;
        if app.should_quit() {
            return Ok(());
        }

        // Wake for whichever comes first: the next tick or a debounce deadline
        let now = Instant::now();
        let timeout = app
            .next_deadline()
            .map_or(tick_rate, |deadline| {
                deadline.saturating_duration_since(now).min(tick_rate)
            });

        match events.next(timeout) {
            Ok(AppEvent::Key(key)) => handle_key(app, key),
            Ok(AppEvent::Resize(cols, rows)) => app.on_resize(cols, rows),
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::Fetch(completion)) => {
                let outcome = app.on_fetch(completion, Instant::now());
                tracing::trace!(?outcome, "fetch completed");
            }
            Ok(AppEvent::Shutdown) => {
                tracing::info!("shutdown signal received");
                app.request_quit();
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }

        app.poll_timers(Instant::now());
    }
}

fn spawn_signal_listener(runtime: &Runtime, events: Sender<AppEvent>, shutdown: ShutdownHandle) {
    runtime.spawn(async move {
        tokio::select! {
            _ = wait_for_signal() => {
                let _ = events.send(AppEvent::Shutdown);
            }
            _ = shutdown.wait() => {}
        }
    });
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "could not install SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
