// ==========================================
// Sistema de Zeladoria Urbana - Áreas de serviço
// ==========================================
// ServiceArea é a unidade de trabalho da zeladoria: um terreno com
// metragem conhecida, pertencente (ou não) a um lote de roçagem.
// O motor de previsão só escreve previsão/dias estimados; histórico
// e eventos são gravados pela camada de orquestração.
// ==========================================

use crate::domain::types::{AreaStatus, EventType, Lote, ServiceKind};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Previsao - estado de agendamento
// ==========================================
// União etiquetada: uma área ou está sob cálculo automático (data
// opcional, preenchida pelo motor) ou está fixada manualmente por um
// administrador. O motor jamais altera uma previsão manual; ela só
// sai desse estado por ação administrativa explícita.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "modo", rename_all = "lowercase")]
pub enum Previsao {
    Automatica { data: Option<NaiveDate> },
    Manual { data: NaiveDate },
}

impl Previsao {
    /// Previsão automática ainda não calculada
    pub fn pendente() -> Self {
        Previsao::Automatica { data: None }
    }

    /// Data prevista, se houver
    pub fn data(&self) -> Option<NaiveDate> {
        match self {
            Previsao::Automatica { data } => *data,
            Previsao::Manual { data } => Some(*data),
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, Previsao::Manual { .. })
    }
}

impl Default for Previsao {
    fn default() -> Self {
        Previsao::pendente()
    }
}

// ==========================================
// HistoryEntry - entrada de histórico
// ==========================================
// Log ordenado e somente-acréscimo por área, persistido como JSON.
// Escrito pela camada de API após o retorno do motor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub status: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

impl HistoryEntry {
    /// Entrada padrão para um registro diário de roçagem
    pub fn for_event(date: NaiveDate, event_type: EventType) -> Self {
        let observation = match event_type {
            EventType::Completed => "Roçagem concluída",
            EventType::Forecast => "Previsão de roçagem",
        };
        Self {
            date,
            status: event_type.history_status().to_string(),
            event_type,
            observation: Some(observation.to_string()),
        }
    }
}

// ==========================================
// ServiceArea - área de serviço
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceArea {
    // ===== Identificação =====
    pub id: i64, // identificador estável, nunca reutilizado
    pub endereco: String,
    pub bairro: String,

    // ===== Dimensões e particionamento =====
    pub metragem_m2: f64,       // tamanho em m²; dirige o consumo de dias de equipe
    pub lote: Option<Lote>,     // linha de capacidade; None para serviços sem lote
    pub servico: ServiceKind,

    // ===== Estado operacional =====
    pub status: AreaStatus,
    pub ultima_rocagem: Option<NaiveDate>, // último serviço concluído
    pub previsao: Previsao,                // saída do motor ou fixação manual
    pub days_to_complete: Option<i32>,     // dias de equipe estimados (saída do motor)

    // ===== Geografia (nunca dirige o agendamento) =====
    pub lat: Option<f64>,
    pub lng: Option<f64>,

    // ===== Auditoria =====
    pub ativo: bool,
    pub registrado_por: Option<String>,
    pub history: Vec<HistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
