use sea_orm::Database;
use tracing::info;

use provault_api::config::ApiConfig;
use provault_api::infra::notifier::Notifier;
use provault_api::router::build_router;
use provault_api::state::AppState;
use provault_api::usecase::reminder_sweep::{ReminderSweep, SystemClock};

#[tokio::main]
async fn main() {
    provault_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let notifier = Notifier::new();
    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        notifier: notifier.clone(),
    };

    // Background verification sweep, independent of request traffic.
    let sweep = ReminderSweep {
        profiles: state.profile_repo(),
        reminders: state.reminder_repo(),
        notifier,
        clock: SystemClock,
    };
    let period = std::time::Duration::from_secs(config.sweep_interval_secs);
    tokio::spawn(sweep.run_loop(period));
    info!(interval_secs = config.sweep_interval_secs, "reminder sweep scheduled");

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
