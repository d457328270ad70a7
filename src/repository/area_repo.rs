// ==========================================
// Sistema de Zeladoria Urbana - Repositório de áreas
// ==========================================
// Responsabilidade: acesso a dados de service_areas, sem regra de
// negócio. O motor nunca toca este módulo; a camada de API aplica
// aqui o que o motor devolve.
// ==========================================

use crate::domain::area::{HistoryEntry, Previsao, ServiceArea};
use crate::domain::types::{AreaStatus, Lote, ServiceKind};
use crate::engine::recalc::CompletionUpdate;
use crate::engine::scheduling::SchedulingResult;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// AreaRepository - repositório de áreas de serviço
// ==========================================
pub struct AreaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AreaRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Leitura
    // ==========================================

    pub fn get_by_id(&self, id: i64) -> RepositoryResult<Option<ServiceArea>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM service_areas WHERE id = ?1",
            SELECT_COLUMNS
        ))?;
        let mut rows = stmt.query_map(params![id], map_area_row)?;

        match rows.next() {
            Some(row) => Ok(Some(row??)),
            None => Ok(None),
        }
    }

    /// Todas as áreas ativas de um serviço
    pub fn get_all_by_service(&self, servico: ServiceKind) -> RepositoryResult<Vec<ServiceArea>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM service_areas WHERE servico = ?1 AND ativo = 1 ORDER BY id",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![servico.to_db_str()], map_area_row)?;
        collect_areas(rows)
    }

    /// Áreas ativas de um serviço pertencentes a um lote
    pub fn get_by_lote(
        &self,
        servico: ServiceKind,
        lote: Lote,
    ) -> RepositoryResult<Vec<ServiceArea>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM service_areas
             WHERE servico = ?1 AND lote = ?2 AND ativo = 1 ORDER BY id",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![servico.to_db_str(), lote.as_i64()], map_area_row)?;
        collect_areas(rows)
    }

    // ==========================================
    // Escrita
    // ==========================================

    pub fn insert(&self, area: &ServiceArea) -> RepositoryResult<()> {
        let conn = self.conn()?;
        let history_json = serde_json::to_string(&area.history)?;
        conn.execute(
            "INSERT INTO service_areas (
                id, endereco, bairro, metragem_m2, lote, servico, status,
                ultima_rocagem, proxima_previsao, manual_schedule, days_to_complete,
                lat, lng, ativo, registrado_por, history, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                area.id,
                area.endereco,
                area.bairro,
                area.metragem_m2,
                area.lote.map(|l| l.as_i64()),
                area.servico.to_db_str(),
                area.status.to_db_str(),
                area.ultima_rocagem,
                area.previsao.data(),
                area.previsao.is_manual(),
                area.days_to_complete,
                area.lat,
                area.lng,
                area.ativo,
                area.registrado_por,
                history_json,
                area.created_at,
                area.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Aplica previsões devolvidas pelo motor.
    ///
    /// Só toca proxima_previsao/days_to_complete: status, histórico e
    /// fixação manual são atribuições de outras operações.
    pub fn apply_scheduling(&self, results: &[SchedulingResult]) -> RepositoryResult<usize> {
        let conn = self.conn()?;
        let now = Utc::now();
        let mut updated = 0;
        for result in results {
            updated += conn.execute(
                "UPDATE service_areas
                 SET proxima_previsao = ?2, days_to_complete = ?3, updated_at = ?4
                 WHERE id = ?1",
                params![
                    result.area_id,
                    result.proxima_previsao,
                    result.days_to_complete,
                    now,
                ],
            )?;
        }
        Ok(updated)
    }

    /// Aplica os efeitos de conclusão devolvidos pelo recálculo
    pub fn apply_completions(&self, completions: &[CompletionUpdate]) -> RepositoryResult<usize> {
        let conn = self.conn()?;
        let now = Utc::now();
        let mut updated = 0;
        for c in completions {
            if c.clear_manual {
                updated += conn.execute(
                    "UPDATE service_areas
                     SET ultima_rocagem = ?2, status = ?3, manual_schedule = 0, updated_at = ?4
                     WHERE id = ?1",
                    params![c.area_id, c.ultima_rocagem, c.status.to_db_str(), now],
                )?;
            } else {
                updated += conn.execute(
                    "UPDATE service_areas
                     SET ultima_rocagem = ?2, status = ?3, updated_at = ?4
                     WHERE id = ?1",
                    params![c.area_id, c.ultima_rocagem, c.status.to_db_str(), now],
                )?;
            }
        }
        Ok(updated)
    }

    /// Fixa manualmente a previsão de uma área
    pub fn set_manual_forecast(&self, id: i64, data: NaiveDate) -> RepositoryResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE service_areas
             SET proxima_previsao = ?2, manual_schedule = 1, updated_at = ?3
             WHERE id = ?1",
            params![id, data, Utc::now()],
        )?;
        ensure_found(changed, id)
    }

    /// Remove a fixação manual; a previsão volta ao controle do motor
    pub fn clear_manual_forecast(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE service_areas
             SET manual_schedule = 0, updated_at = ?2
             WHERE id = ?1",
            params![id, Utc::now()],
        )?;
        ensure_found(changed, id)
    }

    /// Acrescenta uma entrada ao histórico da área (somente-acréscimo)
    pub fn append_history(&self, id: i64, entry: &HistoryEntry) -> RepositoryResult<()> {
        let conn = self.conn()?;
        let current: String = conn
            .query_row(
                "SELECT history FROM service_areas WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => not_found(id),
                other => other.into(),
            })?;

        let mut history: Vec<HistoryEntry> = serde_json::from_str(&current)?;
        history.push(entry.clone());
        let history_json = serde_json::to_string(&history)?;

        conn.execute(
            "UPDATE service_areas SET history = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, history_json, Utc::now()],
        )?;
        Ok(())
    }

    pub fn update_position(&self, id: i64, lat: f64, lng: f64) -> RepositoryResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE service_areas SET lat = ?2, lng = ?3, updated_at = ?4 WHERE id = ?1",
            params![id, lat, lng, Utc::now()],
        )?;
        ensure_found(changed, id)
    }
}

// ==========================================
// Mapeamento de linha
// ==========================================

const SELECT_COLUMNS: &str = "id, endereco, bairro, metragem_m2, lote, servico, status,
    ultima_rocagem, proxima_previsao, manual_schedule, days_to_complete,
    lat, lng, ativo, registrado_por, history, created_at, updated_at";

fn map_area_row(row: &Row<'_>) -> rusqlite::Result<RepositoryResult<ServiceArea>> {
    let id: i64 = row.get(0)?;
    let lote_raw: Option<i64> = row.get(4)?;
    let servico_raw: String = row.get(5)?;
    let status_raw: String = row.get(6)?;
    let ultima_rocagem: Option<NaiveDate> = row.get(7)?;
    let proxima_previsao: Option<NaiveDate> = row.get(8)?;
    let manual_schedule: bool = row.get(9)?;
    let history_raw: String = row.get(15)?;
    let created_at: DateTime<Utc> = row.get(16)?;
    let updated_at: DateTime<Utc> = row.get(17)?;

    let endereco: String = row.get(1)?;
    let bairro: String = row.get(2)?;
    let metragem_m2: f64 = row.get(3)?;
    let days_to_complete: Option<i32> = row.get(10)?;
    let lat: Option<f64> = row.get(11)?;
    let lng: Option<f64> = row.get(12)?;
    let ativo: bool = row.get(13)?;
    let registrado_por: Option<String> = row.get(14)?;

    Ok(build_area(AreaRowParts {
        id,
        endereco,
        bairro,
        metragem_m2,
        lote_raw,
        servico_raw,
        status_raw,
        ultima_rocagem,
        proxima_previsao,
        manual_schedule,
        days_to_complete,
        lat,
        lng,
        ativo,
        registrado_por,
        history_raw,
        created_at,
        updated_at,
    }))
}

struct AreaRowParts {
    id: i64,
    endereco: String,
    bairro: String,
    metragem_m2: f64,
    lote_raw: Option<i64>,
    servico_raw: String,
    status_raw: String,
    ultima_rocagem: Option<NaiveDate>,
    proxima_previsao: Option<NaiveDate>,
    manual_schedule: bool,
    days_to_complete: Option<i32>,
    lat: Option<f64>,
    lng: Option<f64>,
    ativo: bool,
    registrado_por: Option<String>,
    history_raw: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn build_area(parts: AreaRowParts) -> RepositoryResult<ServiceArea> {
    let servico =
        ServiceKind::from_db_str(&parts.servico_raw).ok_or_else(|| RepositoryError::FieldValueError {
            field: "servico".to_string(),
            message: format!("valor desconhecido: {}", parts.servico_raw),
        })?;

    let status =
        AreaStatus::from_db_str(&parts.status_raw).ok_or_else(|| RepositoryError::FieldValueError {
            field: "status".to_string(),
            message: format!("valor desconhecido: {}", parts.status_raw),
        })?;

    let lote = match parts.lote_raw {
        Some(v) => Some(
            Lote::from_i64(v).ok_or_else(|| RepositoryError::FieldValueError {
                field: "lote".to_string(),
                message: format!("valor desconhecido: {}", v),
            })?,
        ),
        None => None,
    };

    // Fixação manual exige data; uma linha manual sem previsão é dado corrompido
    let previsao = if parts.manual_schedule {
        match parts.proxima_previsao {
            Some(data) => Previsao::Manual { data },
            None => {
                return Err(RepositoryError::FieldValueError {
                    field: "proxima_previsao".to_string(),
                    message: format!("área {} manual sem data de previsão", parts.id),
                })
            }
        }
    } else {
        Previsao::Automatica {
            data: parts.proxima_previsao,
        }
    };

    let history: Vec<HistoryEntry> = serde_json::from_str(&parts.history_raw)?;

    Ok(ServiceArea {
        id: parts.id,
        endereco: parts.endereco,
        bairro: parts.bairro,
        metragem_m2: parts.metragem_m2,
        lote,
        servico,
        status,
        ultima_rocagem: parts.ultima_rocagem,
        previsao,
        days_to_complete: parts.days_to_complete,
        lat: parts.lat,
        lng: parts.lng,
        ativo: parts.ativo,
        registrado_por: parts.registrado_por,
        history,
        created_at: parts.created_at,
        updated_at: parts.updated_at,
    })
}

fn collect_areas<I>(rows: I) -> RepositoryResult<Vec<ServiceArea>>
where
    I: Iterator<Item = rusqlite::Result<RepositoryResult<ServiceArea>>>,
{
    let mut areas = Vec::new();
    for row in rows {
        areas.push(row??);
    }
    Ok(areas)
}

fn ensure_found(changed: usize, id: i64) -> RepositoryResult<()> {
    if changed == 0 {
        Err(not_found(id))
    } else {
        Ok(())
    }
}

fn not_found(id: i64) -> RepositoryError {
    RepositoryError::NotFound {
        entity: "ServiceArea".to_string(),
        id: id.to_string(),
    }
}
