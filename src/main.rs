use anyhow::Result;
use charla::config::AppConfig;
use charla::gateway::GatewayPipeline;
use charla::ui::ChatApp;
use eframe::egui;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charla=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    config.validate()?;
    info!("Starting Charla against {}", config.base_url());

    // Gateway worker runs for the lifetime of the app
    let pipeline = GatewayPipeline::new(config.base_url(), config.channel_capacity);
    let commands = pipeline.command_sender();
    let events = pipeline.event_receiver();
    pipeline.start_worker()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("Charla"),
        ..Default::default()
    };

    eframe::run_native(
        "Charla",
        options,
        Box::new(move |cc| Ok(Box::new(ChatApp::new(cc, &config, commands, events)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
