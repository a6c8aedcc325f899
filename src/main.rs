use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use vehicle_guardian::{
    api::create_app, config::environment::EnvironmentConfig,
    repositories::fleet_repository::FleetRepository, AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚗 Vehicle Guardian - Mantenimiento predictivo de flota");
    info!("======================================================");

    // Cargar datos iniciales de la flota
    let snapshot = match FleetRepository::load(config.fleet_data_path.as_deref()).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("❌ Error cargando datos de flota: {}", e);
            return Err(anyhow::anyhow!("Error de datos de flota: {}", e));
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    info!(
        "📞 Retardo de llamada simulada: {} ms",
        config.call_simulation_delay.as_millis()
    );

    let app_state = AppState::new(config, snapshot);
    let app = create_app(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   GET  /api/vehicles/:id/alert - Alerta clasificada");
    info!("   PUT  /api/vehicles/:id/readings - Actualizar lecturas");
    info!("   POST /api/vehicles/:id/engagement - Iniciar llamada de voz");
    info!("   GET  /api/engagement/session - Sesión de llamada actual");
    info!("   GET  /api/notifications?limit=n - Notificaciones recientes");
    info!("   GET  /api/fleet/summary - Resumen de flota");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
