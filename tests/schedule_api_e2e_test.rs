// ==========================================
// Testes ponta-a-ponta da API de agendamento
// ==========================================
// Fluxo completo sobre banco temporário: registro diário → recálculo
// incremental → persistência de previsões, histórico e eventos
// ==========================================

mod helpers;

use helpers::test_data_builder::*;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use zeladoria_rocagem::api::{ApiError, ScheduleApi};
use zeladoria_rocagem::config::ConfigManager;
use zeladoria_rocagem::db::{init_schema, open_sqlite_connection};
use zeladoria_rocagem::domain::{AreaStatus, EventType, Lote, Previsao};
use zeladoria_rocagem::repository::{AreaRepository, MowingEventRepository};

// ==========================================
// Ambiente de teste
// ==========================================

struct ApiTestEnv {
    _dir: TempDir,
    api: ScheduleApi,
    areas: Arc<AreaRepository>,
    events: Arc<MowingEventRepository>,
    config: Arc<ConfigManager>,
}

fn setup() -> ApiTestEnv {
    let dir = TempDir::new().expect("diretório temporário");
    let db_path = dir.path().join("zeladoria_e2e.db");
    let conn = open_sqlite_connection(db_path.to_str().unwrap()).expect("conexão");
    init_schema(&conn).expect("schema");
    let conn = Arc::new(Mutex::new(conn));

    let areas = Arc::new(AreaRepository::new(conn.clone()));
    let events = Arc::new(MowingEventRepository::new(conn.clone()));
    let config = Arc::new(ConfigManager::new(conn));
    let api = ScheduleApi::new(areas.clone(), events.clone(), config.clone());

    ApiTestEnv {
        _dir: dir,
        api,
        areas,
        events,
        config,
    }
}

/// Duas áreas no lote 1, uma no lote 2, taxas iguais de 85.000 m²/dia
fn seed_standard(env: &ApiTestEnv) {
    env.areas
        .insert(&create_test_area(1, 85_000.0, Some(Lote::Lote1)))
        .unwrap();
    env.areas
        .insert(&create_test_area(2, 10_625.0, Some(Lote::Lote1)))
        .unwrap();
    env.areas
        .insert(&create_test_area(3, 30_000.0, Some(Lote::Lote2)))
        .unwrap();
    env.config
        .set_production_rate(Lote::Lote1, 85_000.0)
        .unwrap();
    env.config
        .set_production_rate(Lote::Lote2, 85_000.0)
        .unwrap();
}

// ==========================================
// Registro diário
// ==========================================

#[test]
fn conclusao_atualiza_area_fila_historico_e_eventos() {
    let env = setup();
    seed_standard(&env);
    let today = date(2024, 6, 10);

    let summary = env
        .api
        .register_daily_mowing(&[1], today, EventType::Completed, Some("fiscal"))
        .unwrap();

    assert_eq!(summary.requested, 1);
    assert!(summary.skipped_ids.is_empty());

    // Área concluída: status, última roçagem e previsão de próximo ciclo
    let concluded = env.areas.get_by_id(1).unwrap().unwrap();
    assert_eq!(concluded.status, AreaStatus::Concluido);
    assert_eq!(concluded.ultima_rocagem, Some(today));
    assert_eq!(concluded.previsao.data(), Some(date(2024, 7, 25)));
    assert_eq!(concluded.history.len(), 1);
    assert_eq!(concluded.history[0].status, "Concluído");

    // Companheira de lote recalculada junto
    let sibling = env.areas.get_by_id(2).unwrap().unwrap();
    assert_eq!(sibling.previsao.data(), Some(date(2024, 7, 24)));
    assert_eq!(sibling.days_to_complete, Some(1));

    // Lote 2 intocado
    let other_lot = env.areas.get_by_id(3).unwrap().unwrap();
    assert_eq!(other_lot.previsao, Previsao::pendente());

    // Evento registrado
    let events = env.events.list_by_area(1).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::Completed);
    assert_eq!(events[0].registrado_por.as_deref(), Some("fiscal"));
}

#[test]
fn registro_de_previsao_nao_dispara_recalculo() {
    let env = setup();
    seed_standard(&env);

    let summary = env
        .api
        .register_daily_mowing(&[2], date(2024, 6, 10), EventType::Forecast, None)
        .unwrap();
    assert_eq!(summary.updated, 1);

    let area = env.areas.get_by_id(2).unwrap().unwrap();
    assert_eq!(area.status, AreaStatus::Pendente);
    assert_eq!(area.previsao, Previsao::pendente());
    assert_eq!(area.history.len(), 1);
    assert_eq!(area.history[0].event_type, EventType::Forecast);
}

#[test]
fn conclusao_derruba_fixacao_manual_da_propria_area() {
    let env = setup();
    seed_standard(&env);
    env.api.set_manual_forecast(1, date(2024, 12, 25)).unwrap();

    env.api
        .register_daily_mowing(&[1], date(2024, 6, 10), EventType::Completed, None)
        .unwrap();

    let area = env.areas.get_by_id(1).unwrap().unwrap();
    assert!(!area.previsao.is_manual());
    assert_eq!(area.previsao.data(), Some(date(2024, 7, 25)));
}

#[test]
fn ids_desconhecidos_sao_reportados_sem_derrubar_o_lote() {
    let env = setup();
    seed_standard(&env);

    let summary = env
        .api
        .register_daily_mowing(&[1, 777], date(2024, 6, 10), EventType::Completed, None)
        .unwrap();

    assert_eq!(summary.skipped_ids, vec![777]);
    let concluded = env.areas.get_by_id(1).unwrap().unwrap();
    assert_eq!(concluded.status, AreaStatus::Concluido);
}

#[test]
fn registro_sem_areas_e_entrada_invalida() {
    let env = setup();
    let err = env
        .api
        .register_daily_mowing(&[], date(2024, 6, 10), EventType::Completed, None)
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

// ==========================================
// Recálculo administrativo
// ==========================================

#[test]
fn recalculo_completo_cobre_os_dois_lotes() {
    let env = setup();
    seed_standard(&env);
    let today = date(2024, 1, 1);

    let summary = env.api.recalculate_all(today).unwrap();
    assert_eq!(summary.calculated, 3);

    let a1 = env.areas.get_by_id(1).unwrap().unwrap();
    assert_eq!(a1.previsao.data(), Some(date(2024, 2, 14)));
    let a3 = env.areas.get_by_id(3).unwrap().unwrap();
    assert_eq!(a3.previsao.data(), Some(date(2024, 2, 14)));
}

#[test]
fn fixacao_manual_sobrevive_ao_recalculo_completo() {
    let env = setup();
    seed_standard(&env);
    env.api.set_manual_forecast(2, date(2024, 12, 25)).unwrap();

    env.api.recalculate_all(date(2024, 1, 1)).unwrap();

    let pinned = env.areas.get_by_id(2).unwrap().unwrap();
    assert_eq!(
        pinned.previsao,
        Previsao::Manual {
            data: date(2024, 12, 25)
        }
    );
}

#[test]
fn limpar_fixacao_recalcula_de_imediato() {
    let env = setup();
    seed_standard(&env);
    env.api.set_manual_forecast(2, date(2024, 12, 25)).unwrap();

    env.api.clear_manual_forecast(2, date(2024, 1, 1)).unwrap();

    let area = env.areas.get_by_id(2).unwrap().unwrap();
    assert!(!area.previsao.is_manual());
    assert_eq!(area.previsao.data(), Some(date(2024, 2, 14))); // hoje + 44
}

#[test]
fn fixar_previsao_de_area_inexistente_e_not_found() {
    let env = setup();
    let err = env.api.set_manual_forecast(404, date(2024, 1, 1)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

// ==========================================
// Estatísticas
// ==========================================

#[test]
fn estatisticas_do_lote_refletem_o_backlog() {
    let env = setup();
    seed_standard(&env);

    let stats = env.api.schedule_stats(Lote::Lote1, date(2024, 1, 1)).unwrap();
    assert_eq!(stats.total_areas, 2);
    assert_eq!(stats.total_days_estimated, 2);
    assert_eq!(stats.completion_date, Some(date(2024, 2, 14)));
    assert_eq!(stats.areas_per_day, 85_000.0);
}

#[test]
fn estatisticas_de_lote_vazio_sao_zeradas() {
    let env = setup();
    env.config
        .set_production_rate(Lote::Lote1, 85_000.0)
        .unwrap();

    let stats = env.api.schedule_stats(Lote::Lote1, date(2024, 1, 1)).unwrap();
    assert_eq!(stats.total_areas, 0);
    assert_eq!(stats.completion_date, None);
}
