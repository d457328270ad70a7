// Utilitário operacional: recálculo completo das previsões de roçagem
// de todos os lotes, com data de referência explícita.
//
// Uso:
//   cargo run --bin recalcular-previsoes -- [db_path] [YYYY-MM-DD]
//
// Sem data, usa a data local corrente. Não sobe interface alguma.

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use std::sync::{Arc, Mutex};
use zeladoria_rocagem::api::ScheduleApi;
use zeladoria_rocagem::config::ConfigManager;
use zeladoria_rocagem::db::{default_db_path, init_schema, open_sqlite_connection};
use zeladoria_rocagem::logging;
use zeladoria_rocagem::repository::{AreaRepository, MowingEventRepository};

fn main() -> Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let db_path = args
        .next()
        .unwrap_or_else(|| default_db_path().to_string_lossy().into_owned());

    let today = match args.next() {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|e| anyhow!("data inválida '{}': {}", raw, e))?,
        None => Local::now().date_naive(),
    };

    let conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("abrindo banco em {}", db_path))?;
    init_schema(&conn).context("inicializando schema")?;
    let conn = Arc::new(Mutex::new(conn));

    let api = ScheduleApi::new(
        Arc::new(AreaRepository::new(conn.clone())),
        Arc::new(MowingEventRepository::new(conn.clone())),
        Arc::new(ConfigManager::new(conn)),
    );

    let summary = api
        .recalculate_all(today)
        .context("recalculando previsões")?;

    println!(
        "previsões recalculadas: {} área(s), {} aviso(s) de qualidade",
        summary.calculated,
        summary.warnings.len()
    );
    for w in &summary.warnings {
        println!("  aviso: área {} ({} m²): {}", w.area_id, w.metragem_m2, w.motivo);
    }

    Ok(())
}
