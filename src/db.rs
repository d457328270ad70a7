// ==========================================
// Sistema de Zeladoria Urbana - Inicialização SQLite
// ==========================================
// Objetivo:
// - Unificar o comportamento de PRAGMA de todas as conexões
// - Unificar busy_timeout para reduzir erros de busy em escrita
// - Bootstrap do schema em bancos novos
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

/// busy_timeout padrão (milissegundos)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configura os PRAGMAs unificados da conexão
///
/// foreign_keys e busy_timeout precisam ser aplicados por conexão.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Abre uma conexão SQLite com a configuração unificada
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Caminho padrão do banco quando nenhum é informado:
/// <dados locais do usuário>/zeladoria/zeladoria.db
pub fn default_db_path() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("zeladoria").join("zeladoria.db")
}

/// Cria as tabelas do sistema caso ainda não existam
///
/// Datas de calendário são persistidas como TEXT `YYYY-MM-DD` (sem
/// hora, sem fuso); timestamps de auditoria como RFC 3339.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS service_areas (
            id               INTEGER PRIMARY KEY,
            endereco         TEXT NOT NULL,
            bairro           TEXT NOT NULL,
            metragem_m2      REAL NOT NULL DEFAULT 0,
            lote             INTEGER,
            servico          TEXT NOT NULL,
            status           TEXT NOT NULL DEFAULT 'Pendente',
            ultima_rocagem   TEXT,
            proxima_previsao TEXT,
            manual_schedule  INTEGER NOT NULL DEFAULT 0,
            days_to_complete INTEGER,
            lat              REAL,
            lng              REAL,
            ativo            INTEGER NOT NULL DEFAULT 1,
            registrado_por   TEXT,
            history          TEXT NOT NULL DEFAULT '[]',
            created_at       TEXT NOT NULL,
            updated_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_service_areas_servico_lote
            ON service_areas (servico, lote);

        CREATE TABLE IF NOT EXISTS mowing_events (
            id             TEXT PRIMARY KEY,
            area_id        INTEGER NOT NULL REFERENCES service_areas(id),
            date           TEXT NOT NULL,
            type           TEXT NOT NULL,
            status         TEXT NOT NULL,
            observation    TEXT,
            registrado_por TEXT,
            data_registro  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_mowing_events_area
            ON mowing_events (area_id, date);

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key      TEXT NOT NULL,
            value    TEXT NOT NULL,
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )
}
