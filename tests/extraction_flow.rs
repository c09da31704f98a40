//! Integration tests for structured extraction with fallback.

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use llm_building_blocks::adapters::ai::MockAIProvider;
use llm_building_blocks::adapters::{OpenAIConfig, OpenAIProvider};
use llm_building_blocks::application::{ExtractUserInfoCommand, ExtractUserInfoHandler};
use llm_building_blocks::domain::extraction::{PresenceOutcome, UserRecord};
use llm_building_blocks::ports::ProviderError;

async fn extract_from(output: serde_json::Value) -> Result<String, ProviderError> {
    let provider = Arc::new(MockAIProvider::new().with_json_response(output));
    let handler = ExtractUserInfoHandler::new(provider, "gpt-4o");
    handler
        .handle(ExtractUserInfoCommand::new(
            "I am 38 and my email is john@example.com",
        ))
        .await
        .map(|result| result.summary())
}

#[tokio::test]
async fn presence_policy_through_the_handler() {
    let cases = [
        (
            json!({"name": "John", "email": "john@example.com", "age": null}),
            "User John has email john@example.com",
        ),
        (
            json!({"name": null, "email": "john@example.com", "age": 38}),
            "User with email john@example.com is 38 years old",
        ),
        (
            json!({"name": "John", "email": null, "age": 38}),
            "User John is 38 years old",
        ),
        (
            json!({"name": "John", "email": "john@example.com", "age": 38}),
            "User John (john@example.com) is 38 years old",
        ),
        (
            json!({"name": null, "email": null, "age": null}),
            "Insufficient user information provided.",
        ),
    ];

    for (output, expected) in cases {
        assert_eq!(extract_from(output.clone()).await.unwrap(), expected, "output: {}", output);
    }
}

#[tokio::test]
async fn transport_failure_surfaces_from_extract() {
    let provider = Arc::new(
        OpenAIProvider::new(OpenAIConfig::new("test-key").with_base_url("http://127.0.0.1:1/v1"))
            .unwrap(),
    );
    let handler = ExtractUserInfoHandler::new(provider, "gpt-4o");

    let result = handler
        .handle(ExtractUserInfoCommand::new("I am 38"))
        .await;

    assert!(matches!(result, Err(ProviderError::Network(_))));
}

fn arb_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[A-Za-z@. ]{1,24}",
    ])
}

proptest! {
    #[test]
    fn extraction_never_fails_for_decodable_records(
        name in arb_text(),
        email in arb_text(),
        age in prop::option::of(0u32..150),
    ) {
        let record = UserRecord::new(name, email, age);
        let output = serde_json::to_value(&record).unwrap();

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let summary = runtime.block_on(extract_from(output));

        prop_assert!(summary.is_ok());
        let summary = summary.unwrap();
        prop_assert!(!summary.is_empty());
        prop_assert_eq!(summary, PresenceOutcome::from_record(&record).to_string());
    }
}
