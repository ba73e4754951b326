//! Rest Timer - A rest-between-sets countdown widget
//!
//! This is the host process: it mounts one widget and serves its controls
//! to a local page over HTTP.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use rest_timer::{
    api::create_router,
    config::{Config, NotifierKind},
    services::{AudioCue, CommandAudio, DesktopHost, LogOnlyHost, NotificationHost, SilentAudio},
    state::AppState,
    tasks::{mount, WidgetHost},
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("rest_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting rest-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, total={}s, notifier={:?}",
          config.host, config.port, config.total, config.notifier);

    let (notifications, audio): (Arc<dyn NotificationHost>, Arc<dyn AudioCue>) = match config.notifier {
        NotifierKind::Desktop => (Arc::new(DesktopHost::new()), Arc::new(CommandAudio::default())),
        NotifierKind::Log => (Arc::new(LogOnlyHost::new(config.permission)), Arc::new(SilentAudio)),
    };

    let host = WidgetHost::new(notifications, audio)
        .with_close_callback(|| info!("Rest timer closed by the user"));
    let (widget, driver) = mount(config.timer_settings(), host);

    // Create application state
    let state = Arc::new(AppState::new(widget.clone(), config.port, config.host.clone()));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer            - Current widget state");
    info!("  POST /timer/toggle     - Start or pause");
    info!("  POST /timer/reset      - Reset to full duration");
    info!("  POST /timer/increment  - Add {}s", config.step);
    info!("  POST /timer/decrement  - Remove {}s", config.step);
    info!("  POST /timer/pointer    - Pointer report (drag/tap)");
    info!("  GET  /health           - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = widget.unmount().await {
        warn!("Widget was already unmounted: {}", e);
    }
    if let Err(e) = driver.await {
        warn!("Widget driver ended abnormally: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
