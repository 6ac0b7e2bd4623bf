use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tracing::{info, warn};

/// Quit key, `Esc`, or `Ctrl+C`. Raw mode delivers `Ctrl+C` as a key press
/// rather than SIGINT.
pub fn is_quit_key(key: &KeyEvent, quit: KeyCode) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Esc => true,
        code => code == quit,
    }
}

/// Resolves once the user quits from the keyboard or the process receives
/// SIGINT/SIGTERM.
pub async fn quit_requested(quit: KeyCode) {
    tokio::select! {
        _ = quit_key_pressed(quit) => info!("quit key pressed"),
        _ = termination_signal() => info!("termination signal received"),
    }
}

async fn quit_key_pressed(quit: KeyCode) {
    let mut reader = EventStream::new();
    while let Some(event) = reader.next().await {
        match event {
            Ok(Event::Key(key)) if is_quit_key(&key, quit) => return,
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "terminal event stream failed");
                break;
            }
        }
    }
    // No more key events; only a signal can stop us now.
    std::future::pending::<()>().await
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await
    }
}

#[cfg(unix)]
async fn termination_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(err) => {
            warn!(error = %err, "cannot listen for SIGTERM");
            ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn termination_signal() {
    ctrl_c().await;
}
