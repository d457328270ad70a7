// ==========================================
// Construtores de dados de teste
// ==========================================

use chrono::{NaiveDate, Utc};
use zeladoria_rocagem::domain::{
    AreaStatus, Lote, Previsao, ProductionConfig, ServiceArea, ServiceKind,
};

/// Cria uma área de roçagem pendente, sob cálculo automático
pub fn create_test_area(id: i64, metragem_m2: f64, lote: Option<Lote>) -> ServiceArea {
    ServiceArea {
        id,
        endereco: format!("Rua Teste, {}", id),
        bairro: "Centro".to_string(),
        metragem_m2,
        lote,
        servico: ServiceKind::Rocagem,
        status: AreaStatus::Pendente,
        ultima_rocagem: None,
        previsao: Previsao::pendente(),
        days_to_complete: None,
        lat: Some(-23.55),
        lng: Some(-46.63),
        ativo: true,
        registrado_por: None,
        history: Vec::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Variante com previsão fixada manualmente
pub fn with_manual_forecast(mut area: ServiceArea, data: NaiveDate) -> ServiceArea {
    area.previsao = Previsao::Manual { data };
    area
}

/// Variante com status arbitrário
pub fn with_status(mut area: ServiceArea, status: AreaStatus) -> ServiceArea {
    area.status = status;
    area
}

/// Configuração de produção com as duas taxas
pub fn create_test_config(lote1: f64, lote2: f64) -> ProductionConfig {
    ProductionConfig::new(lote1, lote2)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
