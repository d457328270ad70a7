// ==========================================
// Sistema de Zeladoria Urbana - Configuração de produção
// ==========================================
// Propriedade externa (administração); o motor recebe um snapshot
// somente-leitura a cada chamada, nunca lê estado global.
// ==========================================

use crate::domain::types::Lote;
use serde::{Deserialize, Serialize};

// ==========================================
// MowingProductionRate - taxa diária por lote
// ==========================================
// m²/dia que cada linha de equipe consegue roçar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MowingProductionRate {
    pub lote1: f64,
    pub lote2: f64,
}

// ==========================================
// ProductionConfig - snapshot de configuração
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductionConfig {
    pub mowing_production_rate: MowingProductionRate,
}

impl ProductionConfig {
    pub fn new(lote1: f64, lote2: f64) -> Self {
        Self {
            mowing_production_rate: MowingProductionRate { lote1, lote2 },
        }
    }

    /// Taxa diária (m²/dia) da linha informada
    pub fn rate_for(&self, lote: Lote) -> f64 {
        match lote {
            Lote::Lote1 => self.mowing_production_rate.lote1,
            Lote::Lote2 => self.mowing_production_rate.lote2,
        }
    }
}
