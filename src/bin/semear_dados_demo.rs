// Utilitário de desenvolvimento: cria um banco de demonstração com
// áreas de roçagem nos dois lotes e taxas de produção padrão.
//
// Uso:
//   cargo run --bin semear-dados-demo -- [db_path] [qtd_areas]

use anyhow::{Context, Result};
use chrono::{Duration, Local, Utc};
use std::sync::{Arc, Mutex};
use zeladoria_rocagem::config::{ConfigManager, DEFAULT_PRODUCTION_RATE_M2_DAY};
use zeladoria_rocagem::db::{default_db_path, init_schema, open_sqlite_connection};
use zeladoria_rocagem::domain::{AreaStatus, Lote, Previsao, ServiceArea, ServiceKind};
use zeladoria_rocagem::repository::AreaRepository;

const DEFAULT_AREA_COUNT: i64 = 40;

fn main() -> Result<()> {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| default_db_path().to_string_lossy().into_owned());

    let area_count = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(DEFAULT_AREA_COUNT)
        .max(2);

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        std::fs::create_dir_all(parent).context("criando diretório do banco")?;
    }

    let conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("abrindo banco em {}", db_path))?;
    init_schema(&conn).context("inicializando schema")?;
    let conn = Arc::new(Mutex::new(conn));

    let config = ConfigManager::new(conn.clone());
    config.set_production_rate(Lote::Lote1, DEFAULT_PRODUCTION_RATE_M2_DAY)?;
    config.set_production_rate(Lote::Lote2, DEFAULT_PRODUCTION_RATE_M2_DAY / 2.0)?;

    let repo = AreaRepository::new(conn);
    let today = Local::now().date_naive();
    let now = Utc::now();

    let bairros = ["Centro", "Jardim América", "Vila Nova", "São José"];

    for i in 1..=area_count {
        let lote = if i % 2 == 0 { Lote::Lote2 } else { Lote::Lote1 };
        let area = ServiceArea {
            id: i,
            endereco: format!("Rua das Palmeiras, {}", i * 10),
            bairro: bairros[(i as usize) % bairros.len()].to_string(),
            metragem_m2: 2_500.0 * (1 + i % 8) as f64,
            lote: Some(lote),
            servico: ServiceKind::Rocagem,
            status: AreaStatus::Pendente,
            ultima_rocagem: Some(today - Duration::days(20 + i % 30)),
            previsao: Previsao::pendente(),
            days_to_complete: None,
            lat: Some(-23.55 + (i as f64) * 0.001),
            lng: Some(-46.63 - (i as f64) * 0.001),
            ativo: true,
            registrado_por: Some("semear-dados-demo".to_string()),
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        repo.insert(&area)?;
    }

    println!("banco de demonstração criado em {} com {} áreas", db_path, area_count);
    Ok(())
}
