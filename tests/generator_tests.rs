mod common;

use asteroid_mining::error::GenerationError;
use asteroid_mining::generator::hybrid::THEMES;
use asteroid_mining::generator::{
    seeded_source, AsteroidFactory, AsteroidGenerator, FullAiGenerator, HybridGenerator,
    ProceduralGenerator, MAX_DISTANCE_LIGHT_YEARS,
};
use asteroid_mining::{Asteroid, ResourceType, RiskProfile};
use common::{Reply, ScriptedTextGenerator};
use std::sync::Arc;

fn factory(seed: u64) -> Arc<AsteroidFactory> {
    Arc::new(AsteroidFactory::new(seeded_source(seed, 0)))
}

fn hybrid(client: Arc<ScriptedTextGenerator>) -> HybridGenerator {
    HybridGenerator::new(client, factory(4), seeded_source(4, 1))
}

fn assert_invariants(asteroid: &Asteroid) {
    assert!(!asteroid.name().is_empty());
    assert!(asteroid.id().is_none());
    assert!(asteroid.distance_in_light_years() >= 0.0);
    assert!(asteroid.resources().values().all(|quantity| *quantity > 0));
}

#[tokio::test]
async fn every_strategy_respects_the_model_invariants() {
    let procedural = ProceduralGenerator::new(factory(1));
    for _ in 0..100 {
        assert_invariants(&procedural.generate().await.unwrap());
    }

    let replies = (0..100).map(|i| Reply::Text(format!("Nyx-{}", i))).collect();
    let hybrid = hybrid(Arc::new(ScriptedTextGenerator::new(replies)));
    for _ in 0..100 {
        assert_invariants(&hybrid.generate().await.unwrap());
    }

    let full_ai = FullAiGenerator::new(Arc::new(ScriptedTextGenerator::replying(
        r#"{"name":"Kallisto-Vey","riskProfile":"LETHAL","distanceInLightYears":0,"resources":{"GOLD":0,"PLATINUM":12}}"#,
    )));
    let asteroid = full_ai.generate().await.unwrap();
    assert_invariants(&asteroid);
    assert_eq!(asteroid.resources().len(), 1);
}

#[tokio::test]
async fn hybrid_keeps_a_valid_name_and_asks_with_a_theme() {
    let client = Arc::new(ScriptedTextGenerator::replying("  Aris-Centurion \n"));
    let asteroid = hybrid(Arc::clone(&client)).generate().await.unwrap();

    assert_eq!(asteroid.name(), "Aris-Centurion");
    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    let prompt = requests[0].user_message();
    assert!(THEMES.iter().any(|theme| prompt.contains(&format!("has a {} vibe", theme))), "{}", prompt);
    assert!(!requests[0].json_output);
}

#[tokio::test]
async fn hybrid_replaces_forbidden_names_with_fallback() {
    let client = Arc::new(ScriptedTextGenerator::replying("Ceres_99!"));
    let asteroid = hybrid(Arc::clone(&client)).generate().await.unwrap();

    let parts: Vec<&str> = asteroid.name().split(' ').collect();
    assert_eq!(parts.len(), 3, "{}", asteroid.name());
    assert!(THEMES.contains(&parts[0]));
    assert_eq!(parts[1], "asteroid");
    assert_eq!(parts[2].len(), 6);
    assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));

    let prompt = client.requests()[0].user_message();
    assert!(prompt.contains(&format!("has a {} vibe", parts[0])));
}

#[tokio::test]
async fn hybrid_replaces_overlong_names() {
    let client = Arc::new(ScriptedTextGenerator::replying("The Great Wandering Stone Of The North"));
    let asteroid = hybrid(client).generate().await.unwrap();
    assert!(asteroid.name().contains(" asteroid "));
}

#[tokio::test]
async fn hybrid_surfaces_service_failures() {
    let result = hybrid(Arc::new(ScriptedTextGenerator::always_down())).generate().await;
    match result {
        Err(e @ GenerationError::ServiceUnavailable(_)) => assert!(e.is_transient()),
        other => panic!("expected service failure, got {:?}", other),
    }
}

#[tokio::test]
async fn full_ai_builds_the_described_asteroid() {
    let client = Arc::new(ScriptedTextGenerator::replying(
        "```json\n{\"name\":\"Orrery-9\",\"riskProfile\":\"CAUTION\",\"distanceInLightYears\":63.25,\"resources\":{\"IRON\":4200,\"KRYPTONITE\":3}}\n```",
    ));
    let asteroid = FullAiGenerator::new(client.clone()).generate().await.unwrap();

    assert_eq!(asteroid.name(), "Orrery-9");
    assert_eq!(asteroid.risk_profile(), RiskProfile::Caution);
    assert_eq!(asteroid.distance_in_light_years(), 63.25);
    assert_eq!(asteroid.quantity_of(ResourceType::Iron), 4200);
    assert_eq!(asteroid.quantity_of(ResourceType::Kryptonite), 3);
    assert!(asteroid.distance_in_light_years() <= MAX_DISTANCE_LIGHT_YEARS);
    assert!(client.requests()[0].json_output);
}

#[tokio::test]
async fn full_ai_missing_field_is_malformed_not_defaulted() {
    let client = Arc::new(ScriptedTextGenerator::replying(
        r#"{"name":"Half-Done","distanceInLightYears":4.0,"resources":{"IRON":10}}"#,
    ));
    match FullAiGenerator::new(client).generate().await {
        Err(e @ GenerationError::MalformedOutput { .. }) => assert!(!e.is_transient()),
        other => panic!("expected malformed output, got {:?}", other),
    }
}

#[tokio::test]
async fn full_ai_service_failure_is_transient() {
    match FullAiGenerator::new(Arc::new(ScriptedTextGenerator::always_down())).generate().await {
        Err(e) => assert!(e.is_transient()),
        Ok(asteroid) => panic!("no asteroid expected, got {:?}", asteroid),
    }
}
