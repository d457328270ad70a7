// ==========================================
// Sistema de Zeladoria Urbana - Camada de motor
// ==========================================
// Responsabilidade: regras de previsão, sem SQL, sem I/O.
// Todo cálculo é determinístico: `today` é sempre injetado pelo
// chamador, nunca lido do relógio de parede.
// ==========================================

pub mod error;
pub mod recalc;
pub mod scheduling;
pub mod stats;

pub use error::{ScheduleError, ScheduleResult};
pub use recalc::{CompletionUpdate, RecalcOptions, RecalcOutcome};
pub use scheduling::{
    CapacityUsage, DataQualityWarning, ScheduleOutcome, SchedulingConfig, SchedulingEngine,
    SchedulingResult, DEFAULT_CYCLE_DAYS,
};
pub use stats::ScheduleStats;
