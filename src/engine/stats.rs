// ==========================================
// Sistema de Zeladoria Urbana - Estatísticas de agendamento
// ==========================================
// Resumo por lote para os painéis: total de áreas, dias estimados,
// data de término do backlog e ritmo diário configurado.
// ==========================================

use crate::engine::scheduling::ScheduleOutcome;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduleStats - resumo de um lote
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    pub total_areas: usize,
    pub total_days_estimated: i64,
    /// Previsão mais tardia do lote; None com backlog vazio
    pub completion_date: Option<NaiveDate>,
    pub areas_per_day: f64,
}

impl ScheduleStats {
    /// Deriva o resumo de um resultado de cálculo já produzido
    pub fn from_outcome(outcome: &ScheduleOutcome, production_rate: f64) -> Self {
        let completion_date = outcome
            .results
            .iter()
            .map(|r| r.proxima_previsao)
            .max();

        Self {
            total_areas: outcome.results.len(),
            total_days_estimated: outcome.capacity.total_days,
            completion_date,
            areas_per_day: production_rate,
        }
    }

    pub fn empty(production_rate: f64) -> Self {
        Self {
            total_areas: 0,
            total_days_estimated: 0,
            completion_date: None,
            areas_per_day: production_rate,
        }
    }
}
