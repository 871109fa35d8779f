use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use workshop_system::config::environment::EnvironmentConfig;
use workshop_system::database;
use workshop_system::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🔧 Workshop Service Management System");
    info!("=====================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    info!("✅ Base de datos conectada");

    database::run_migrations(&pool).await?;
    info!("✅ Migraciones aplicadas");

    // Datos de demostración solo en desarrollo
    if config.is_development() {
        database::seed_demo_data(&pool).await?;
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let app_state = AppState::new(pool, config);
    let app = workshop_system::build_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("👥 Endpoints - Users (admin):");
    info!("   GET  /api/users - Listar usuarios");
    info!("   GET  /api/users/role/:role - Usuarios por rol");
    info!("   GET  /api/users/:id - Obtener usuario");
    info!("   PUT  /api/users/:id - Actualizar usuario");
    info!("   DELETE /api/users/:id - Eliminar usuario");
    info!("   POST /api/users/:id/roles/:role - Otorgar rol");
    info!("   DELETE /api/users/:id/roles/:role - Revocar rol");
    info!("🚗 Endpoints - Cars:");
    info!("   GET  /api/cars - Listar vehículos");
    info!("   GET  /api/cars/:id - Obtener vehículo");
    info!("   GET  /api/cars/customer/:customer_id - Vehículos por cliente");
    info!("   POST /api/cars - Registrar vehículo (admin)");
    info!("   PUT  /api/cars/:id - Actualizar vehículo (admin)");
    info!("   DELETE /api/cars/:id - Eliminar vehículo (admin)");
    info!("🔧 Endpoints - Service Records:");
    info!("   GET  /api/service-records - Listar según rol");
    info!("   GET  /api/service-records/:id - Obtener registro");
    info!("   POST /api/service-records - Crear registro (admin)");
    info!("   PUT  /api/service-records/:id - Actualizar registro");
    info!("   DELETE /api/service-records/:id - Eliminar registro (admin)");
    info!("   POST /api/service-records/:id/assign/:mechanic_id - Asignar mecánico (admin)");
    info!("   POST /api/service-records/:id/complete - Completar servicio");
    info!("   GET  /api/service-records/:id/cost - Coste total del servicio");
    info!("   GET  /api/service-records/mechanic/:id - Por mecánico (admin)");
    info!("   GET  /api/service-records/customer/:id - Por cliente (admin)");
    info!("   GET  /api/service-records/requester/:id - Por solicitante (admin)");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
