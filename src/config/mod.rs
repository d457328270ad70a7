// ==========================================
// Sistema de Zeladoria Urbana - Camada de configuração
// ==========================================

pub mod config_manager;

pub use config_manager::{ConfigManager, DEFAULT_PRODUCTION_RATE_M2_DAY};
