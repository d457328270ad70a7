// ==========================================
// Sistema de Zeladoria Urbana - Recálculo incremental
// ==========================================
// Responsabilidade: reagir a conclusões de roçagem recalculando as
// previsões SOMENTE dos lotes afetados. Lotes não tocados ficam fora
// do resultado: escritas mínimas, sem ruído de histórico.
// ==========================================
// Semântica de falha: id desconhecido é pulado e reportado, nunca
// derruba o registro inteiro. Taxa inválida em lote afetado derruba a
// chamada antes de qualquer resultado: meia atualização é pior que
// uma previsão velha.
// ==========================================

use crate::domain::area::ServiceArea;
use crate::domain::config::ProductionConfig;
use crate::domain::types::{AreaStatus, Lote};
use crate::engine::error::{ScheduleError, ScheduleResult};
use crate::engine::scheduling::{
    DataQualityWarning, SchedulingEngine, SchedulingResult,
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

// ==========================================
// RecalcOptions - opções do recálculo
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalcOptions {
    /// Limpar a fixação manual das áreas concluídas. O padrão conserva
    /// a fixação; o chamador pede a limpeza explicitamente.
    pub reset_manual_on_completion: bool,
}

// ==========================================
// CompletionUpdate - efeito de conclusão a persistir
// ==========================================
// O motor não grava: devolve o que o chamador deve aplicar em cada
// área recém-concluída.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionUpdate {
    pub area_id: i64,
    pub ultima_rocagem: NaiveDate,
    pub status: AreaStatus,
    pub clear_manual: bool,
}

// ==========================================
// RecalcOutcome - resultado do recálculo incremental
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalcOutcome {
    /// Previsões novas, apenas de áreas dos lotes afetados
    pub results: Vec<SchedulingResult>,
    /// Efeitos de conclusão para o chamador persistir
    pub completions: Vec<CompletionUpdate>,
    /// Ids referenciados mas ausentes do snapshot (ou sem lote)
    pub skipped_ids: Vec<i64>,
    pub warnings: Vec<DataQualityWarning>,
}

impl SchedulingEngine {
    /// Recalcula previsões após a conclusão de uma ou mais áreas.
    ///
    /// 1. Identifica os lotes distintos entre os ids concluídos; ids
    ///    fora do snapshot (ou sem lote) entram em `skipped_ids`.
    /// 2. Valida a taxa de cada lote afetado antes de emitir qualquer
    ///    resultado.
    /// 3. Para cada área concluída emite um `CompletionUpdate` e uma
    ///    previsão de próximo ciclo (`today + cycle_days`).
    /// 4. Reexecuta `compute_schedule` sobre as áreas ainda na fila
    ///    (Pendente/Em Execução) de cada lote afetado.
    ///
    /// Não muta as entradas; previsões manuais permanecem intocadas.
    #[instrument(skip(self, all_areas, config), fields(completed = completed_area_ids.len()))]
    pub fn recalculate_after_completion(
        &self,
        all_areas: &[ServiceArea],
        completed_area_ids: &[i64],
        config: &ProductionConfig,
        today: NaiveDate,
        options: RecalcOptions,
    ) -> ScheduleResult<RecalcOutcome> {
        let mut skipped_ids = Vec::new();
        let mut completed: Vec<(&ServiceArea, Lote)> = Vec::new();
        let mut affected_lotes: BTreeSet<Lote> = BTreeSet::new();

        for &area_id in completed_area_ids {
            match all_areas.iter().find(|a| a.id == area_id) {
                Some(area) => match area.lote {
                    Some(lote) => {
                        affected_lotes.insert(lote);
                        completed.push((area, lote));
                    }
                    None => {
                        warn!(area_id, "área concluída sem lote; ignorada no recálculo");
                        skipped_ids.push(area_id);
                    }
                },
                None => {
                    warn!(area_id, "id concluído ausente do snapshot; ignorado");
                    skipped_ids.push(area_id);
                }
            }
        }

        // Validação antecipada: nenhum resultado parcial se algum lote
        // afetado estiver mal configurado
        for &lote in &affected_lotes {
            let rate = config.rate_for(lote);
            if rate <= 0.0 {
                return Err(ScheduleError::InvalidConfiguration { lote, rate });
            }
        }

        let completed_ids: BTreeSet<i64> = completed.iter().map(|(a, _)| a.id).collect();
        let mut results = Vec::new();
        let mut warnings = Vec::new();
        let mut completions = Vec::with_capacity(completed.len());

        // Conclusões: status/última roçagem para persistir + previsão
        // de próximo ciclo (folga máxima, o backlog da área zerou hoje)
        for &(area, lote) in &completed {
            let rate = config.rate_for(lote);
            completions.push(CompletionUpdate {
                area_id: area.id,
                ultima_rocagem: today,
                status: AreaStatus::Concluido,
                clear_manual: options.reset_manual_on_completion && area.previsao.is_manual(),
            });
            results.push(SchedulingResult {
                area_id: area.id,
                proxima_previsao: today + Duration::days(self.cycle_days()),
                days_to_complete: self.days_to_complete(area.metragem_m2, rate),
            });
        }

        // Fila remanescente de cada lote afetado
        for &lote in &affected_lotes {
            let rate = config.rate_for(lote);
            let queued: Vec<ServiceArea> = all_areas
                .iter()
                .filter(|a| {
                    a.lote == Some(lote)
                        && a.status.is_queued()
                        && !completed_ids.contains(&a.id)
                })
                .cloned()
                .collect();

            debug!(%lote, queued = queued.len(), "recalculando fila do lote");

            let outcome = self.compute_schedule(&queued, lote, rate, today)?;
            results.extend(outcome.results);
            warnings.extend(outcome.warnings);
        }

        Ok(RecalcOutcome {
            results,
            completions,
            skipped_ids,
            warnings,
        })
    }
}
