// ==========================================
// Sistema de Zeladoria Urbana - Tipos do domínio
// ==========================================
// Serialização: rótulos idênticos aos persistidos no banco
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Status da área (Area Status)
// ==========================================
// Ciclo de vida: Pendente → Em Execução → Concluído → (novo ciclo) Pendente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaStatus {
    #[serde(rename = "Pendente")]
    Pendente, // aguardando serviço
    #[serde(rename = "Em Execução")]
    EmExecucao, // equipe em campo
    #[serde(rename = "Concluído")]
    Concluido, // ciclo mais recente finalizado
}

impl fmt::Display for AreaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaStatus::Pendente => write!(f, "Pendente"),
            AreaStatus::EmExecucao => write!(f, "Em Execução"),
            AreaStatus::Concluido => write!(f, "Concluído"),
        }
    }
}

impl AreaStatus {
    /// Interpreta o rótulo persistido no banco
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Pendente" => Some(AreaStatus::Pendente),
            "Em Execução" => Some(AreaStatus::EmExecucao),
            "Concluído" => Some(AreaStatus::Concluido),
            _ => None,
        }
    }

    /// Rótulo persistido no banco
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AreaStatus::Pendente => "Pendente",
            AreaStatus::EmExecucao => "Em Execução",
            AreaStatus::Concluido => "Concluído",
        }
    }

    /// Área ainda na fila do ciclo corrente (entra no recálculo automático)
    pub fn is_queued(&self) -> bool {
        matches!(self, AreaStatus::Pendente | AreaStatus::EmExecucao)
    }
}

// ==========================================
// Tipo de serviço (Service Kind)
// ==========================================
// Apenas roçagem possui agendamento por lote; jardins e coleta
// são acompanhados sem previsão automática.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Rocagem,
    Jardins,
    Coleta,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::Rocagem => write!(f, "rocagem"),
            ServiceKind::Jardins => write!(f, "jardins"),
            ServiceKind::Coleta => write!(f, "coleta"),
        }
    }
}

impl ServiceKind {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "rocagem" => Some(ServiceKind::Rocagem),
            "jardins" => Some(ServiceKind::Jardins),
            "coleta" => Some(ServiceKind::Coleta),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            ServiceKind::Rocagem => "rocagem",
            ServiceKind::Jardins => "jardins",
            ServiceKind::Coleta => "coleta",
        }
    }
}

// ==========================================
// Lote (linha de produção)
// ==========================================
// Cada lote é uma linha de capacidade independente com taxa diária
// própria (m²/dia). Uma área pertence a exatamente um lote durante
// toda a vida, ou a nenhum (serviços sem agendamento por lote).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Lote {
    Lote1,
    Lote2,
}

impl Lote {
    pub fn as_i64(&self) -> i64 {
        match self {
            Lote::Lote1 => 1,
            Lote::Lote2 => 2,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            1 => Some(Lote::Lote1),
            2 => Some(Lote::Lote2),
            _ => None,
        }
    }

    /// Todos os lotes, na ordem numérica
    pub fn all() -> [Lote; 2] {
        [Lote::Lote1, Lote::Lote2]
    }
}

impl fmt::Display for Lote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

impl From<Lote> for i64 {
    fn from(l: Lote) -> i64 {
        l.as_i64()
    }
}

impl TryFrom<i64> for Lote {
    type Error = String;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        Lote::from_i64(v).ok_or_else(|| format!("lote inválido: {}", v))
    }
}

// ==========================================
// Tipo de evento (Event Type)
// ==========================================
// Registro diário de roçagem: conclusão efetiva ou previsão anotada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Completed,
    Forecast,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Completed => write!(f, "completed"),
            EventType::Forecast => write!(f, "forecast"),
        }
    }
}

impl EventType {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(EventType::Completed),
            "forecast" => Some(EventType::Forecast),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventType::Completed => "completed",
            EventType::Forecast => "forecast",
        }
    }

    /// Rótulo de status usado nas entradas de histórico
    pub fn history_status(&self) -> &'static str {
        match self {
            EventType::Completed => "Concluído",
            EventType::Forecast => "Previsto",
        }
    }
}
