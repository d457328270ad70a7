// ==========================================
// Sistema de Zeladoria Urbana - Biblioteca central
// ==========================================
// Núcleo: motor de previsão de roçagem (ciclo fixo + taxa diária por
// lote) e sua superfície de colaboração (configuração, dados, API).
// ==========================================

// ==========================================
// Declaração de módulos
// ==========================================

// Camada de domínio - entidades e tipos
pub mod domain;

// Camada de dados - acesso a dados
pub mod repository;

// Camada de motor - regras de previsão
pub mod engine;

// Camada de configuração
pub mod config;

// Infraestrutura de banco (conexão / PRAGMA / schema)
pub mod db;

// Sistema de logs
pub mod logging;

// Camada de API - interfaces de negócio
pub mod api;

// ==========================================
// Reexportação dos tipos centrais
// ==========================================

// Tipos de domínio
pub use domain::types::{AreaStatus, EventType, Lote, ServiceKind};

// Entidades de domínio
pub use domain::{HistoryEntry, MowingProductionRate, Previsao, ProductionConfig, ServiceArea};

// Motor
pub use engine::{
    CapacityUsage, CompletionUpdate, DataQualityWarning, RecalcOptions, RecalcOutcome,
    ScheduleError, ScheduleOutcome, ScheduleStats, SchedulingConfig, SchedulingEngine,
    SchedulingResult, DEFAULT_CYCLE_DAYS,
};

// API
pub use api::{ApiError, ApiResult, ScheduleApi};

// ==========================================
// Constantes do sistema
// ==========================================

// Versão do sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nome do sistema
pub const APP_NAME: &str = "Sistema de Zeladoria Urbana";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
