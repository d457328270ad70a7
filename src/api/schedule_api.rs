// ==========================================
// Sistema de Zeladoria Urbana - API de agendamento
// ==========================================
// Responsabilidade: orquestrar repositório + motor. Carrega o snapshot
// de áreas e configuração, invoca o motor (puro) e persiste o que ele
// devolve: previsões, conclusões, histórico e eventos.
// ==========================================
// Concorrência: as escritas passam todas pela mesma conexão protegida
// por Mutex: registros simultâneos do mesmo lote ficam serializados
// por construção.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::area::{HistoryEntry, Previsao};
use crate::domain::types::{EventType, Lote, ServiceKind};
use crate::engine::recalc::RecalcOptions;
use crate::engine::scheduling::{DataQualityWarning, SchedulingEngine};
use crate::engine::stats::ScheduleStats;
use crate::repository::{AreaRepository, MowingEventRepository};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

// ==========================================
// Resumos de operação
// ==========================================

/// Resultado de um registro diário de roçagem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationSummary {
    pub requested: usize,
    pub updated: usize,
    /// Ids pedidos mas ausentes do snapshot; reportados, nunca engolidos
    pub skipped_ids: Vec<i64>,
    pub warnings: Vec<DataQualityWarning>,
}

/// Resultado do recálculo administrativo completo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalculateSummary {
    pub calculated: usize,
    pub warnings: Vec<DataQualityWarning>,
}

// ==========================================
// ScheduleApi - API de agendamento
// ==========================================
pub struct ScheduleApi {
    area_repo: Arc<AreaRepository>,
    event_repo: Arc<MowingEventRepository>,
    config_manager: Arc<ConfigManager>,
    engine: SchedulingEngine,
}

impl ScheduleApi {
    pub fn new(
        area_repo: Arc<AreaRepository>,
        event_repo: Arc<MowingEventRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            area_repo,
            event_repo,
            config_manager,
            engine: SchedulingEngine::new(),
        }
    }

    pub fn with_engine(
        area_repo: Arc<AreaRepository>,
        event_repo: Arc<MowingEventRepository>,
        config_manager: Arc<ConfigManager>,
        engine: SchedulingEngine,
    ) -> Self {
        Self {
            area_repo,
            event_repo,
            config_manager,
            engine,
        }
    }

    // ==========================================
    // Registro diário de roçagem
    // ==========================================

    /// Registra roçagens do dia para um conjunto de áreas.
    ///
    /// `Completed`: grava conclusão + histórico + evento, e dispara o
    /// recálculo incremental dos lotes afetados. `Forecast`: apenas
    /// anota histórico e evento, sem recálculo.
    ///
    /// A data do registro é a data de referência do motor; o relógio
    /// de parede nunca entra no cálculo.
    pub fn register_daily_mowing(
        &self,
        area_ids: &[i64],
        date: NaiveDate,
        event_type: EventType,
        registrado_por: Option<&str>,
    ) -> ApiResult<RegistrationSummary> {
        if area_ids.is_empty() {
            return Err(ApiError::InvalidInput(
                "nenhuma área informada para registro".to_string(),
            ));
        }

        // Histórico + evento por área existente; ids desconhecidos só
        // serão confirmados como pulados pelo recálculo
        let mut found_ids = Vec::with_capacity(area_ids.len());
        for &area_id in area_ids {
            match self.area_repo.get_by_id(area_id)? {
                Some(_) => {
                    let entry = HistoryEntry::for_event(date, event_type);
                    self.area_repo.append_history(area_id, &entry)?;
                    self.event_repo.insert(
                        area_id,
                        date,
                        event_type,
                        entry.observation.clone(),
                        registrado_por.map(|s| s.to_string()),
                    )?;
                    found_ids.push(area_id);
                }
                None => {
                    warn!(area_id, "registro pedido para área inexistente");
                }
            }
        }

        if event_type == EventType::Forecast {
            let skipped_ids: Vec<i64> = area_ids
                .iter()
                .copied()
                .filter(|id| !found_ids.contains(id))
                .collect();
            return Ok(RegistrationSummary {
                requested: area_ids.len(),
                updated: found_ids.len(),
                skipped_ids,
                warnings: Vec::new(),
            });
        }

        // Conclusão: snapshot completo + recálculo incremental
        let all_areas = self.area_repo.get_all_by_service(ServiceKind::Rocagem)?;
        let config = self.config_manager.get_production_config()?;

        // Registrar roçagem derruba a fixação manual da área concluída:
        // o ciclo que motivou a fixação terminou
        let options = RecalcOptions {
            reset_manual_on_completion: true,
        };

        let outcome = self.engine.recalculate_after_completion(
            &all_areas,
            area_ids,
            &config,
            date,
            options,
        )?;

        for w in &outcome.warnings {
            warn!(area_id = w.area_id, metragem = w.metragem_m2, "{}", w.motivo);
        }

        self.area_repo.apply_completions(&outcome.completions)?;
        let updated = self.area_repo.apply_scheduling(&outcome.results)?;

        info!(
            completed = outcome.completions.len(),
            rescheduled = outcome.results.len(),
            skipped = outcome.skipped_ids.len(),
            "registro diário aplicado"
        );

        Ok(RegistrationSummary {
            requested: area_ids.len(),
            updated,
            skipped_ids: outcome.skipped_ids,
            warnings: outcome.warnings,
        })
    }

    // ==========================================
    // Recálculo administrativo completo
    // ==========================================

    /// Recalcula as previsões de todos os lotes a partir do zero
    pub fn recalculate_all(&self, today: NaiveDate) -> ApiResult<RecalculateSummary> {
        let config = self.config_manager.get_production_config()?;
        let mut calculated = 0;
        let mut warnings = Vec::new();

        for lote in Lote::all() {
            let areas = self.area_repo.get_by_lote(ServiceKind::Rocagem, lote)?;
            debug!(%lote, areas = areas.len(), "recalculando lote");

            let outcome =
                self.engine
                    .compute_schedule(&areas, lote, config.rate_for(lote), today)?;
            calculated += self.area_repo.apply_scheduling(&outcome.results)?;
            warnings.extend(outcome.warnings);
        }

        info!(calculated, "recálculo completo aplicado");
        Ok(RecalculateSummary {
            calculated,
            warnings,
        })
    }

    // ==========================================
    // Fixação manual
    // ==========================================

    /// Fixa manualmente a previsão de uma área; o motor passa a tratar
    /// a data como entrada imutável
    pub fn set_manual_forecast(&self, area_id: i64, data: NaiveDate) -> ApiResult<()> {
        if self.area_repo.get_by_id(area_id)?.is_none() {
            return Err(ApiError::NotFound(format!("área {}", area_id)));
        }
        self.area_repo.set_manual_forecast(area_id, data)?;
        info!(area_id, %data, "previsão fixada manualmente");
        Ok(())
    }

    /// Remove a fixação manual e devolve a área ao cálculo automático,
    /// recomputando a previsão de imediato com a configuração vigente
    pub fn clear_manual_forecast(&self, area_id: i64, today: NaiveDate) -> ApiResult<()> {
        let area = self
            .area_repo
            .get_by_id(area_id)?
            .ok_or_else(|| ApiError::NotFound(format!("área {}", area_id)))?;

        self.area_repo.clear_manual_forecast(area_id)?;

        if let Some(lote) = area.lote {
            let config = self.config_manager.get_production_config()?;
            let mut automatic = area;
            automatic.previsao = Previsao::pendente();
            let outcome = self.engine.compute_schedule(
                std::slice::from_ref(&automatic),
                lote,
                config.rate_for(lote),
                today,
            )?;
            self.area_repo.apply_scheduling(&outcome.results)?;
        }

        info!(area_id, "fixação manual removida");
        Ok(())
    }

    // ==========================================
    // Estatísticas
    // ==========================================

    /// Resumo de agendamento de um lote
    pub fn schedule_stats(&self, lote: Lote, today: NaiveDate) -> ApiResult<ScheduleStats> {
        let config = self.config_manager.get_production_config()?;
        let rate = config.rate_for(lote);
        let areas = self.area_repo.get_by_lote(ServiceKind::Rocagem, lote)?;

        if areas.is_empty() {
            return Ok(ScheduleStats::empty(rate));
        }

        let outcome = self.engine.compute_schedule(&areas, lote, rate, today)?;
        Ok(ScheduleStats::from_outcome(&outcome, rate))
    }
}
