// ==========================================
// Testes do recálculo incremental
// ==========================================
// Escopo:
// 1. Isolamento entre lotes
// 2. Efeitos de conclusão (status, última roçagem, próximo ciclo)
// 3. Ids desconhecidos pulados e reportados
// 4. Fixação manual preservada (e limpeza opcional)
// 5. Configuração inválida derruba a chamada inteira
// ==========================================

mod helpers;

use helpers::test_data_builder::*;
use zeladoria_rocagem::domain::{AreaStatus, Lote};
use zeladoria_rocagem::engine::{RecalcOptions, ScheduleError, SchedulingEngine};

#[test]
fn conclusao_em_lote1_nao_emite_resultados_de_lote2() {
    let engine = SchedulingEngine::new();
    let areas = vec![
        create_test_area(1, 10_000.0, Some(Lote::Lote1)),
        create_test_area(2, 20_000.0, Some(Lote::Lote1)),
        create_test_area(3, 30_000.0, Some(Lote::Lote2)),
        create_test_area(4, 40_000.0, Some(Lote::Lote2)),
    ];
    let config = create_test_config(85_000.0, 85_000.0);

    let outcome = engine
        .recalculate_after_completion(
            &areas,
            &[1],
            &config,
            date(2024, 6, 10),
            RecalcOptions::default(),
        )
        .unwrap();

    assert!(outcome
        .results
        .iter()
        .all(|r| r.area_id == 1 || r.area_id == 2));
    assert!(outcome.skipped_ids.is_empty());
}

#[test]
fn area_concluida_recebe_status_e_previsao_de_proximo_ciclo() {
    let engine = SchedulingEngine::new();
    let areas = vec![
        create_test_area(1, 85_000.0, Some(Lote::Lote1)),
        create_test_area(2, 10_625.0, Some(Lote::Lote1)),
    ];
    let config = create_test_config(85_000.0, 85_000.0);
    let today = date(2024, 6, 10);

    let outcome = engine
        .recalculate_after_completion(&areas, &[1], &config, today, RecalcOptions::default())
        .unwrap();

    assert_eq!(outcome.completions.len(), 1);
    let completion = &outcome.completions[0];
    assert_eq!(completion.area_id, 1);
    assert_eq!(completion.ultima_rocagem, today);
    assert_eq!(completion.status, AreaStatus::Concluido);
    assert!(!completion.clear_manual);

    // Próximo ciclo: hoje + 45
    let own = outcome.results.iter().find(|r| r.area_id == 1).unwrap();
    assert_eq!(own.proxima_previsao, date(2024, 7, 25));
    assert_eq!(own.days_to_complete, 1);

    // A fila remanescente do lote é recalculada por inteiro
    let other = outcome.results.iter().find(|r| r.area_id == 2).unwrap();
    assert_eq!(other.proxima_previsao, date(2024, 7, 24)); // hoje + 44
}

#[test]
fn recalculo_do_lote_pode_mover_a_previsao_das_demais_areas() {
    let engine = SchedulingEngine::new();
    let areas = vec![
        create_test_area(1, 85_000.0, Some(Lote::Lote1)),
        create_test_area(2, 10_625.0, Some(Lote::Lote1)),
    ];
    let config = create_test_config(85_000.0, 85_000.0);

    let before = engine
        .compute_schedule(&areas, Lote::Lote1, 85_000.0, date(2024, 1, 1))
        .unwrap();
    let after = engine
        .recalculate_after_completion(
            &areas,
            &[1],
            &config,
            date(2024, 1, 10),
            RecalcOptions::default(),
        )
        .unwrap();

    // Mesmo sem mudança de tamanho/taxa, a data de referência mudou:
    // a previsão da área 2 acompanha, pois o lote inteiro é recalculado
    let b_before = before.results.iter().find(|r| r.area_id == 2).unwrap();
    let b_after = after.results.iter().find(|r| r.area_id == 2).unwrap();
    assert_ne!(b_before.proxima_previsao, b_after.proxima_previsao);
    assert_eq!(b_after.proxima_previsao, date(2024, 2, 23)); // 2024-01-10 + 44
}

#[test]
fn id_desconhecido_e_pulado_e_reportado_sem_derrubar_o_registro() {
    let engine = SchedulingEngine::new();
    let areas = vec![create_test_area(1, 10_000.0, Some(Lote::Lote1))];
    let config = create_test_config(85_000.0, 85_000.0);

    let outcome = engine
        .recalculate_after_completion(
            &areas,
            &[1, 999],
            &config,
            date(2024, 6, 10),
            RecalcOptions::default(),
        )
        .unwrap();

    assert_eq!(outcome.skipped_ids, vec![999]);
    assert_eq!(outcome.completions.len(), 1);
}

#[test]
fn area_sem_lote_e_reportada_como_pulada() {
    let engine = SchedulingEngine::new();
    let areas = vec![create_test_area(1, 10_000.0, None)];
    let config = create_test_config(85_000.0, 85_000.0);

    let outcome = engine
        .recalculate_after_completion(
            &areas,
            &[1],
            &config,
            date(2024, 6, 10),
            RecalcOptions::default(),
        )
        .unwrap();

    assert_eq!(outcome.skipped_ids, vec![1]);
    assert!(outcome.results.is_empty());
    assert!(outcome.completions.is_empty());
}

#[test]
fn fixacao_manual_da_fila_permanece_intocada() {
    let engine = SchedulingEngine::new();
    let pinned = date(2024, 12, 25);
    let areas = vec![
        create_test_area(1, 10_000.0, Some(Lote::Lote1)),
        with_manual_forecast(create_test_area(2, 10_000.0, Some(Lote::Lote1)), pinned),
    ];
    let config = create_test_config(85_000.0, 85_000.0);

    let outcome = engine
        .recalculate_after_completion(
            &areas,
            &[1],
            &config,
            date(2024, 6, 10),
            RecalcOptions::default(),
        )
        .unwrap();

    let manual = outcome.results.iter().find(|r| r.area_id == 2).unwrap();
    assert_eq!(manual.proxima_previsao, pinned);
}

#[test]
fn limpeza_de_fixacao_so_ocorre_quando_pedida_e_so_na_area_concluida() {
    let engine = SchedulingEngine::new();
    let pinned = date(2024, 12, 25);
    let areas = vec![
        with_manual_forecast(create_test_area(1, 10_000.0, Some(Lote::Lote1)), pinned),
        with_manual_forecast(create_test_area(2, 10_000.0, Some(Lote::Lote1)), pinned),
    ];
    let config = create_test_config(85_000.0, 85_000.0);
    let options = RecalcOptions {
        reset_manual_on_completion: true,
    };

    let outcome = engine
        .recalculate_after_completion(&areas, &[1], &config, date(2024, 6, 10), options)
        .unwrap();

    assert!(outcome.completions[0].clear_manual);
    // A área 2 não concluiu: segue fixada
    let still_pinned = outcome.results.iter().find(|r| r.area_id == 2).unwrap();
    assert_eq!(still_pinned.proxima_previsao, pinned);
}

#[test]
fn areas_fora_da_fila_nao_sao_recalculadas() {
    let engine = SchedulingEngine::new();
    let areas = vec![
        create_test_area(1, 10_000.0, Some(Lote::Lote1)),
        with_status(
            create_test_area(2, 10_000.0, Some(Lote::Lote1)),
            AreaStatus::Concluido,
        ),
    ];
    let config = create_test_config(85_000.0, 85_000.0);

    let outcome = engine
        .recalculate_after_completion(
            &areas,
            &[1],
            &config,
            date(2024, 6, 10),
            RecalcOptions::default(),
        )
        .unwrap();

    // Área 2 concluiu em ciclo anterior; a previsão dela não muda aqui
    assert!(outcome.results.iter().all(|r| r.area_id == 1));
}

#[test]
fn taxa_invalida_em_lote_afetado_derruba_a_chamada_inteira() {
    let engine = SchedulingEngine::new();
    let areas = vec![
        create_test_area(1, 10_000.0, Some(Lote::Lote1)),
        create_test_area(2, 10_000.0, Some(Lote::Lote2)),
    ];
    let config = create_test_config(85_000.0, 0.0);

    let err = engine
        .recalculate_after_completion(
            &areas,
            &[1, 2],
            &config,
            date(2024, 6, 10),
            RecalcOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        ScheduleError::InvalidConfiguration {
            lote: Lote::Lote2,
            ..
        }
    ));
}

#[test]
fn taxa_invalida_de_lote_nao_afetado_nao_bloqueia() {
    let engine = SchedulingEngine::new();
    let areas = vec![
        create_test_area(1, 10_000.0, Some(Lote::Lote1)),
        create_test_area(2, 10_000.0, Some(Lote::Lote2)),
    ];
    // Lote 2 mal configurado, mas a conclusão só toca o lote 1
    let config = create_test_config(85_000.0, 0.0);

    let outcome = engine
        .recalculate_after_completion(
            &areas,
            &[1],
            &config,
            date(2024, 6, 10),
            RecalcOptions::default(),
        )
        .unwrap();

    assert_eq!(outcome.completions.len(), 1);
}
