// ==========================================
// Sistema de Zeladoria Urbana - Gerenciador de configuração
// ==========================================
// Responsabilidade: leitura e escrita da configuração administrativa
// Armazenamento: tabela config_kv (key-value + scope)
// O motor nunca lê daqui: recebe um snapshot ProductionConfig por chamada.
// ==========================================

use crate::domain::config::ProductionConfig;
use crate::domain::types::Lote;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

/// Taxa diária padrão para bancos recém-criados (m²/dia)
pub const DEFAULT_PRODUCTION_RATE_M2_DAY: f64 = 85_000.0;

const RATE_KEY_LOTE1: &str = "mowing_production_rate/lote1";
const RATE_KEY_LOTE2: &str = "mowing_production_rate/lote2";

// ==========================================
// ConfigManager - gerenciador de configuração
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Lê um valor do escopo global (None se a chave não existe)
    fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    fn get_rate(&self, key: &str) -> RepositoryResult<f64> {
        match self.get_config_value(key)? {
            Some(raw) => raw.parse::<f64>().map_err(|e| RepositoryError::FieldValueError {
                field: key.to_string(),
                message: format!("taxa não numérica ({}): {}", raw, e),
            }),
            None => Ok(DEFAULT_PRODUCTION_RATE_M2_DAY),
        }
    }

    // ==========================================
    // API pública
    // ==========================================

    /// Snapshot da configuração de produção para passar ao motor
    pub fn get_production_config(&self) -> RepositoryResult<ProductionConfig> {
        let lote1 = self.get_rate(RATE_KEY_LOTE1)?;
        let lote2 = self.get_rate(RATE_KEY_LOTE2)?;
        Ok(ProductionConfig::new(lote1, lote2))
    }

    /// Atualiza a taxa diária de um lote (m²/dia, exigido > 0).
    ///
    /// A validação aqui protege a escrita administrativa; o motor
    /// revalida a cada cálculo, pois a configuração pode ter sido
    /// gravada por outra via.
    pub fn set_production_rate(&self, lote: Lote, rate: f64) -> RepositoryResult<()> {
        if rate <= 0.0 {
            return Err(RepositoryError::FieldValueError {
                field: format!("mowing_production_rate/lote{}", lote),
                message: format!("taxa deve ser > 0, recebido {}", rate),
            });
        }
        let key = match lote {
            Lote::Lote1 => RATE_KEY_LOTE1,
            Lote::Lote2 => RATE_KEY_LOTE2,
        };
        self.set_config_value(key, &rate.to_string())
    }
}
