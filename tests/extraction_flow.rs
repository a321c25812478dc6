//! End-to-end tests of the fallback search through the public API.

mod common;

use std::sync::Arc;

use visionocr::cli::helpers::write_result_file;
use visionocr::config::Settings;
use visionocr::ocr::{
    ExtractionOutcome, FallbackOrchestrator, ImagePayload, ModelRegistry, OcrError,
    ResultValidator, Stage, Strategy,
};

use common::{pair, RecordingObserver, ScriptedBackend, GOOD_TEXT, NOISE};

const ALL_MODELS: &[&str] = &[
    "granite3.2-vision:latest",
    "qwen2.5vl:3b",
    "llava-llama3:latest",
    "llama3.2-vision:11b",
    "qwen2.5vl:7b",
];

async fn orchestrator(backend: Arc<ScriptedBackend>) -> FallbackOrchestrator {
    let settings = Settings::default();
    let registry = ModelRegistry::discover(&*backend, &settings.models)
        .await
        .expect("registry");
    FallbackOrchestrator::new(
        backend,
        registry,
        settings.models,
        ResultValidator::new(settings.validator),
    )
}

fn image() -> ImagePayload {
    ImagePayload::from_base64("iVBORw0KGgo=")
}

#[tokio::test]
async fn paragraph_primary_success_touches_only_primary_model() {
    let backend = ScriptedBackend::new(ALL_MODELS, |_, strategy| match strategy {
        None => Ok("PARAGRAPH".to_string()),
        Some(_) => Ok(GOOD_TEXT.to_string()),
    });
    let orch = orchestrator(backend.clone()).await;

    let outcome = orch.extract(&image()).await;

    assert_eq!(outcome.text(), Some(GOOD_TEXT));
    assert_eq!(
        outcome.provenance().unwrap().to_string(),
        "qwen2.5vl:7b (general)"
    );
    // Probe goes to the fast model, extraction only to the primary
    assert_eq!(backend.seen()[0].model, "granite3.2-vision:latest");
    assert_eq!(
        backend.extractions(),
        vec![pair("qwen2.5vl:7b", Strategy::General)]
    );
}

#[tokio::test]
async fn table_failure_falls_back_to_detailed_on_last_model() {
    let backend = ScriptedBackend::new(ALL_MODELS, |model, strategy| match strategy {
        None => Ok("This is a TABLE".to_string()),
        Some(Strategy::Detailed) if model == "granite3.2-vision:latest" => {
            Ok(GOOD_TEXT.to_string())
        }
        Some(_) => Ok(NOISE.to_string()),
    });
    let orch = orchestrator(backend.clone()).await;

    let outcome = orch.extract(&image()).await;

    let provenance = outcome.provenance().expect("success");
    assert_eq!(provenance.to_string(), "granite3.2-vision:latest_detailed");
    assert_eq!(provenance.stage, Stage::Backup);

    let expected: Vec<_> = [
        // primary
        ("qwen2.5vl:7b", Strategy::Table),
        // secondary sweep in registry order, primary skipped
        ("llama3.2-vision:11b", Strategy::Table),
        ("llava-llama3:latest", Strategy::Table),
        ("qwen2.5vl:3b", Strategy::Table),
        ("granite3.2-vision:latest", Strategy::Table),
        // backup sweep over every model
        ("qwen2.5vl:7b", Strategy::Detailed),
        ("llama3.2-vision:11b", Strategy::Detailed),
        ("llava-llama3:latest", Strategy::Detailed),
        ("qwen2.5vl:3b", Strategy::Detailed),
        ("granite3.2-vision:latest", Strategy::Detailed),
    ]
    .iter()
    .map(|(m, s)| pair(m, *s))
    .collect();
    assert_eq!(backend.extractions(), expected);
}

#[tokio::test]
async fn empty_intersection_is_fatal_before_any_inference() {
    let backend = ScriptedBackend::new(&["mistral:7b", "llama3:8b"], |_, _| {
        Ok(GOOD_TEXT.to_string())
    });

    let err = ModelRegistry::discover(&*backend, &Settings::default().models)
        .await
        .unwrap_err();

    assert!(matches!(err, OcrError::NoModelsAvailable(_)));
    assert!(backend.seen().is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_fatal() {
    let backend = ScriptedBackend::offline();
    let err = ModelRegistry::discover(&*backend, &Settings::default().models)
        .await
        .unwrap_err();
    assert!(matches!(err, OcrError::NoModelsAvailable(_)));
}

#[tokio::test]
async fn every_failure_mode_is_absorbed_and_search_exhausts() {
    let backend = ScriptedBackend::new(
        &["qwen2.5vl:7b", "llava-llama3:latest", "qwen2.5vl:3b"],
        |model, strategy| match (model, strategy) {
            (_, None) => Ok("I cannot tell".to_string()),
            ("qwen2.5vl:7b", _) => Err(OcrError::Timeout {
                model: model.to_string(),
                secs: 1200,
            }),
            ("llava-llama3:latest", _) => Err(OcrError::Api {
                status: 500,
                body: "model crashed".to_string(),
            }),
            _ => Err(OcrError::EmptyResponse(model.to_string())),
        },
    );
    let observer = Arc::new(RecordingObserver::default());
    let orch = orchestrator(backend.clone())
        .await
        .with_observer(observer.clone());

    let outcome = orch.extract(&image()).await;

    // Unmatched answer → DETAILED, backup → TABLE
    assert_eq!(*observer.classified.lock().unwrap(), Some(Strategy::Detailed));
    assert_eq!(outcome, ExtractionOutcome::Exhausted { attempts: 6 });

    let attempts = observer.attempts.lock().unwrap();
    assert_eq!(attempts.len(), 6);
    assert!(attempts.iter().all(|a| !a.valid && a.error.is_some()));
    assert_eq!(attempts[0].stage, Stage::Primary);
    assert_eq!(attempts[5].stage, Stage::Backup);
    assert_eq!(attempts[5].strategy, Strategy::Table);
}

#[tokio::test]
async fn degenerate_output_is_rejected_by_validator() {
    let backend = ScriptedBackend::new(&["qwen2.5vl:7b", "qwen2.5vl:3b"], |model, strategy| {
        match (model, strategy) {
            (_, None) => Ok("FORM".to_string()),
            ("qwen2.5vl:7b", _) => Ok("ㅋㅋㅋㅋㅋㅋㅋㅋㅋㅋㅋㅋ".to_string()),
            (_, Some(Strategy::Detailed)) => Ok("0 1 2 3 4 5 6 7 8 9".to_string()),
            (_, Some(_)) => Ok(GOOD_TEXT.to_string()),
        }
    });
    let orch = orchestrator(backend.clone()).await;

    let outcome = orch.extract(&image()).await;

    assert_eq!(
        outcome.provenance().unwrap().to_string(),
        "qwen2.5vl:3b_table"
    );
    assert_eq!(
        backend.extractions(),
        vec![
            pair("qwen2.5vl:7b", Strategy::Detailed),
            pair("qwen2.5vl:3b", Strategy::Detailed),
            pair("qwen2.5vl:7b", Strategy::Table),
            pair("qwen2.5vl:3b", Strategy::Table),
        ]
    );
}

#[tokio::test]
async fn forced_strategy_skips_classification() {
    let backend = ScriptedBackend::new(&["llava-llama3:latest"], |_, _| Ok(GOOD_TEXT.to_string()));
    let orch = orchestrator(backend.clone()).await;

    let outcome = orch.extract_with(&image(), Strategy::Table).await;

    assert!(outcome.is_success());
    assert_eq!(
        backend.seen().iter().filter(|s| s.strategy.is_none()).count(),
        0
    );
    assert_eq!(
        outcome.provenance().unwrap().to_string(),
        "llava-llama3:latest (table)"
    );
}

#[tokio::test]
async fn successful_outcome_round_trips_to_result_file() {
    let backend = ScriptedBackend::new(&["qwen2.5vl:3b"], |_, strategy| match strategy {
        None => Ok("SIMPLE".to_string()),
        Some(_) => Ok(GOOD_TEXT.to_string()),
    });
    let orch = orchestrator(backend).await;
    let outcome = orch.extract(&image()).await;

    let ExtractionOutcome::Success { text, provenance } = outcome else {
        panic!("expected success");
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.txt");
    write_result_file(&path, &provenance, &text, chrono::Local::now()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("Strategy: qwen2.5vl:3b (detailed)"));
    assert!(content.contains(&"=".repeat(50)));
    assert!(content.ends_with(GOOD_TEXT));
}
