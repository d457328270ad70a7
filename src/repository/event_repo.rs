// ==========================================
// Sistema de Zeladoria Urbana - Repositório de eventos
// ==========================================
// Trilha somente-acréscimo de registros de roçagem (conclusões e
// previsões anotadas). O motor nunca escreve aqui; a camada de API
// grava após aplicar os resultados.
// ==========================================

use crate::domain::types::EventType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

// ==========================================
// MowingEvent - evento de roçagem
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MowingEvent {
    pub id: String,
    pub area_id: i64,
    pub date: NaiveDate,
    pub event_type: EventType,
    pub status: String,
    pub observation: Option<String>,
    pub registrado_por: Option<String>,
    pub data_registro: DateTime<Utc>,
}

// ==========================================
// MowingEventRepository
// ==========================================
pub struct MowingEventRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MowingEventRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Insere um evento novo e devolve o registro persistido
    pub fn insert(
        &self,
        area_id: i64,
        date: NaiveDate,
        event_type: EventType,
        observation: Option<String>,
        registrado_por: Option<String>,
    ) -> RepositoryResult<MowingEvent> {
        let event = MowingEvent {
            id: Uuid::new_v4().to_string(),
            area_id,
            date,
            event_type,
            status: event_type.history_status().to_string(),
            observation,
            registrado_por,
            data_registro: Utc::now(),
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO mowing_events (
                id, area_id, date, type, status, observation, registrado_por, data_registro
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                event.id,
                event.area_id,
                event.date,
                event.event_type.to_db_str(),
                event.status,
                event.observation,
                event.registrado_por,
                event.data_registro,
            ],
        )?;
        Ok(event)
    }

    /// Eventos de uma área, mais recentes primeiro
    pub fn list_by_area(&self, area_id: i64) -> RepositoryResult<Vec<MowingEvent>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, area_id, date, type, status, observation, registrado_por, data_registro
             FROM mowing_events WHERE area_id = ?1
             ORDER BY date DESC, data_registro DESC",
        )?;
        let rows = stmt.query_map(params![area_id], map_event_row)?;

        let mut events = Vec::new();
        for row in rows {
            events.push(row??);
        }
        Ok(events)
    }
}

fn map_event_row(row: &Row<'_>) -> rusqlite::Result<RepositoryResult<MowingEvent>> {
    let type_raw: String = row.get(3)?;
    let id: String = row.get(0)?;
    let area_id: i64 = row.get(1)?;
    let date: NaiveDate = row.get(2)?;
    let status: String = row.get(4)?;
    let observation: Option<String> = row.get(5)?;
    let registrado_por: Option<String> = row.get(6)?;
    let data_registro: DateTime<Utc> = row.get(7)?;

    let event = match EventType::from_db_str(&type_raw) {
        Some(event_type) => Ok(MowingEvent {
            id,
            area_id,
            date,
            event_type,
            status,
            observation,
            registrado_por,
            data_registro,
        }),
        None => Err(RepositoryError::FieldValueError {
            field: "type".to_string(),
            message: format!("valor desconhecido: {}", type_raw),
        }),
    };
    Ok(event)
}
