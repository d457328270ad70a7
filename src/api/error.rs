// ==========================================
// Sistema de Zeladoria Urbana - Erros da camada de API
// ==========================================
// Responsabilidade: converter erros de dados e de motor em mensagens
// acionáveis. Configuração inválida bloqueia a operação; avisos de
// qualidade e ids pulados viajam nos resumos, nunca bloqueiam.
// ==========================================

use crate::engine::error::ScheduleError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Erros da camada de API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("entrada inválida: {0}")]
    InvalidInput(String),

    #[error("recurso não encontrado: {0}")]
    NotFound(String),

    /// Erro bloqueante de configuração, a ser exibido ao administrador
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Alias de Result da camada de API
pub type ApiResult<T> = Result<T, ApiError>;
