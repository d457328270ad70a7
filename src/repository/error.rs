// ==========================================
// Sistema de Zeladoria Urbana - Erros da camada de dados
// ==========================================
// Ferramenta: thiserror
// ==========================================

use thiserror::Error;

/// Erros da camada de dados
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("registro não encontrado: {entity} id={id}")]
    NotFound { entity: String, id: String },

    #[error("falha ao obter lock da conexão: {0}")]
    LockError(String),

    #[error("falha em consulta ao banco: {0}")]
    DatabaseQueryError(String),

    #[error("violação de restrição única: {0}")]
    UniqueConstraintViolation(String),

    #[error("violação de chave estrangeira: {0}")]
    ForeignKeyViolation(String),

    #[error("valor de campo inválido (campo={field}): {message}")]
    FieldValueError { field: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::FieldValueError {
            field: "history".to_string(),
            message: err.to_string(),
        }
    }
}

/// Alias de Result da camada de dados
pub type RepositoryResult<T> = Result<T, RepositoryError>;
