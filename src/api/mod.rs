// ==========================================
// Sistema de Zeladoria Urbana - Camada de API
// ==========================================
// Interfaces de negócio em processo; o transporte HTTP vive fora
// deste crate e consome estas operações.
// ==========================================

pub mod error;
pub mod schedule_api;

pub use error::{ApiError, ApiResult};
pub use schedule_api::{RecalculateSummary, RegistrationSummary, ScheduleApi};
