// ==========================================
// Sistema de Zeladoria Urbana - Erros do motor
// ==========================================
// Ferramenta: thiserror
// Condições não-fatais (ids desconhecidos, metragem suspeita) não
// são erros: viajam como valores dentro dos resultados do motor.
// ==========================================

use crate::domain::types::Lote;
use thiserror::Error;

/// Erros do motor de previsão
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// Taxa de produção não-positiva: aborta todo o cálculo do lote,
    /// nunca resultados parciais
    #[error("configuração inválida: lote {lote} com taxa de produção {rate} m²/dia (exigido > 0)")]
    InvalidConfiguration { lote: Lote, rate: f64 },
}

/// Alias de Result do motor
pub type ScheduleResult<T> = Result<T, ScheduleError>;
