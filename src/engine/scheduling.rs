// ==========================================
// Sistema de Zeladoria Urbana - Motor de previsão de roçagem
// ==========================================
// Responsabilidade: converter o backlog de um lote (áreas + metragem)
// em datas previstas, sob taxa diária fixa e ciclo de cobertura fixo.
// Entrada: áreas já filtradas pelo chamador + taxa + data de referência
// Saída: uma previsão por área + avisos de qualidade + uso de capacidade
// ==========================================
// Função pura: sem I/O, sem relógio de parede, sem estado entre chamadas.
// Concorrência é problema do chamador (serializar escritas por lote).
// ==========================================

use crate::domain::area::{Previsao, ServiceArea};
use crate::domain::types::Lote;
use crate::engine::error::{ScheduleError, ScheduleResult};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Ciclo-alvo de cobertura: toda área do lote deve receber ao menos
/// um serviço dentro desta janela
pub const DEFAULT_CYCLE_DAYS: i64 = 45;

// ==========================================
// SchedulingConfig - parâmetros do motor
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    pub cycle_days: i64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            cycle_days: DEFAULT_CYCLE_DAYS,
        }
    }
}

// ==========================================
// SchedulingResult - previsão calculada
// ==========================================
// Retornado ao chamador para persistência; o motor não grava nada.
// NaiveDate serializa como YYYY-MM-DD, o formato persistido no sistema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingResult {
    pub area_id: i64,
    pub proxima_previsao: NaiveDate,
    pub days_to_complete: i32,
}

// ==========================================
// DataQualityWarning - aviso não-fatal
// ==========================================
// Metragem zero/negativa: a área ainda é agendada (tamanho dirige o
// agendamento, não a geometria), mas o chamador deve sinalizá-la para
// revisão de cadastro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityWarning {
    pub area_id: i64,
    pub metragem_m2: f64,
    pub motivo: String,
}

// ==========================================
// CapacityUsage - contabilidade de capacidade do lote
// ==========================================
// Soma de dias estimados de todo o backlog, incluindo áreas com
// previsão manual: elas continuam consumindo dias reais de equipe
// mesmo com data fixada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityUsage {
    pub total_days: i64,
    pub cycle_days: i64,
    pub exceeds_cycle: bool,
}

// ==========================================
// ScheduleOutcome - resultado completo do cálculo
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub results: Vec<SchedulingResult>,
    pub warnings: Vec<DataQualityWarning>,
    pub capacity: CapacityUsage,
}

// ==========================================
// SchedulingEngine - motor de previsão
// ==========================================
pub struct SchedulingEngine {
    config: SchedulingConfig,
}

impl SchedulingEngine {
    pub fn new() -> Self {
        Self {
            config: SchedulingConfig::default(),
        }
    }

    pub fn with_config(config: SchedulingConfig) -> Self {
        Self { config }
    }

    pub fn cycle_days(&self) -> i64 {
        self.config.cycle_days
    }

    /// Dias de equipe estimados para uma metragem sob a taxa dada.
    ///
    /// Regra de arredondamento: teto da divisão em f64; áreas pequenas
    /// também consomem um dia inteiro. Metragem não-positiva conta 0 dias.
    /// Pré-condição: rate > 0 (validada em compute_schedule).
    pub fn days_to_complete(&self, metragem_m2: f64, rate: f64) -> i32 {
        if metragem_m2 <= 0.0 {
            return 0;
        }
        (metragem_m2 / rate).ceil() as i32
    }

    /// Calcula a previsão de todas as áreas de um lote.
    ///
    /// O chamador pré-filtra as áreas do lote (o motor não filtra por
    /// lote, para permanecer reutilizável entre serviços).
    ///
    /// Regra central: quanto mais dias uma área exige, menos folga ela
    /// tem dentro do ciclo, e a previsão é puxada para mais cedo.
    /// `offset = max(cycle_days - days, 0)`; `previsao = today + offset`.
    ///
    /// Áreas com previsão manual são ecoadas sem recálculo, mas seus
    /// dias estimados entram na contabilidade de capacidade do lote.
    #[instrument(skip(self, areas), fields(count = areas.len()))]
    pub fn compute_schedule(
        &self,
        areas: &[ServiceArea],
        lote: Lote,
        rate: f64,
        today: NaiveDate,
    ) -> ScheduleResult<ScheduleOutcome> {
        if rate <= 0.0 {
            return Err(ScheduleError::InvalidConfiguration { lote, rate });
        }

        let mut results = Vec::with_capacity(areas.len());
        let mut warnings = Vec::new();
        let mut total_days: i64 = 0;

        for area in areas {
            if area.metragem_m2 <= 0.0 {
                warnings.push(DataQualityWarning {
                    area_id: area.id,
                    metragem_m2: area.metragem_m2,
                    motivo: "metragem não-positiva; agendada com folga máxima".to_string(),
                });
            }

            match &area.previsao {
                // Fixação manual: eco do estado existente, nunca recálculo
                Previsao::Manual { data } => {
                    let days = area
                        .days_to_complete
                        .unwrap_or_else(|| self.days_to_complete(area.metragem_m2, rate));
                    total_days += i64::from(days.max(0));
                    results.push(SchedulingResult {
                        area_id: area.id,
                        proxima_previsao: *data,
                        days_to_complete: days,
                    });
                }
                Previsao::Automatica { .. } => {
                    let days = self.days_to_complete(area.metragem_m2, rate);
                    total_days += i64::from(days);
                    let offset = (self.config.cycle_days - i64::from(days)).max(0);
                    results.push(SchedulingResult {
                        area_id: area.id,
                        proxima_previsao: today + Duration::days(offset),
                        days_to_complete: days,
                    });
                }
            }
        }

        Ok(ScheduleOutcome {
            results,
            warnings,
            capacity: CapacityUsage {
                total_days,
                cycle_days: self.config.cycle_days,
                exceeds_cycle: total_days > self.config.cycle_days,
            },
        })
    }
}

impl Default for SchedulingEngine {
    fn default() -> Self {
        Self::new()
    }
}
