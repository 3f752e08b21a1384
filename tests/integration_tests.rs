use std::sync::Arc;

use gugi::providers::{CompatibleClient, CompletionProvider};
use gugi::{
  ChatMessage, ChatOrchestrator, ChatRequest, CoachConfig, ErrorPolicy,
  FallbackPolicy, Language, ProviderConfig, ResponseStatus
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Provider config pointing at the mock server
fn provider_config(server: &MockServer) -> ProviderConfig
{   ProviderConfig
    {   api_base: Some(format!("{}/v1", server.uri()))
      , api_key: Some("test-key".to_string())
      , timeout_secs: Some(5)
      , ..ProviderConfig::new("mock")
    }
}

fn orchestrator_for(
  server: &MockServer
, error_policy: ErrorPolicy
) -> ChatOrchestrator
{   let client: Arc<dyn CompletionProvider> = Arc::new(
      CompatibleClient::new(&provider_config(server)).unwrap()
    );
    ChatOrchestrator::new(
      CoachConfig
      {   error_policy
        , ..CoachConfig::default()
      },
      Some(client)
    )
}

fn water_question() -> ChatRequest
{   ChatRequest::chat(
      Language::En,
      vec![ChatMessage::user("How much water should I drink?")]
    )
}

#[tokio::test]
async fn test_offline_keyword_end_to_end()
{   let orchestrator = ChatOrchestrator::offline(CoachConfig
    {   fallback_policy: FallbackPolicy::Keyword
      , ..CoachConfig::default()
    });

    let resp = orchestrator.chat(water_question()).await.unwrap();
    assert_eq!(resp.status, ResponseStatus::Success);
    assert_eq!(
      resp.text,
      "Trink genug Wasser! Mindestens 2-3 Liter am Tag sind optimal. 💧"
    );
}

#[tokio::test]
async fn test_offline_chat_never_fails()
{   let orchestrator = ChatOrchestrator::offline(CoachConfig::default());
    let requests = vec![
      ChatRequest::default(),
      ChatRequest::greeting(Language::Pl),
      ChatRequest::chat(Language::De, vec![]),
      ChatRequest::chat(Language::En, vec![ChatMessage::user("")]),
      ChatRequest::chat(Language::De, vec![ChatMessage::assistant("hallo")]),
    ];
    for request in requests
    {   let resp = orchestrator.chat(request).await.unwrap();
        assert!(!resp.text.trim().is_empty());
    }
}

#[tokio::test]
async fn test_provider_receives_assembled_context()
{   let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/v1/chat/completions"))
      .and(header("Authorization", "Bearer test-key"))
      .and(body_partial_json(json!({
        "model": "gpt-4o-mini",
        "max_tokens": 280,
        "stream": false
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-1",
        "choices": [{
          "index": 0,
          "message": { "role": "assistant", "content": "About 2 litres a day." },
          "finish_reason": "stop"
        }]
      })))
      .expect(1)
      .mount(&server)
      .await;

    let summary = json!({ "water_ml": 900 }).as_object().cloned().unwrap();
    let request = water_question().with_summary(summary);
    let resp = orchestrator_for(&server, ErrorPolicy::Resilient)
      .chat(request)
      .await
      .unwrap();

    assert_eq!(resp.text, "About 2 litres a day.");
    assert_eq!(resp.status, ResponseStatus::Success);
    assert_eq!(resp.model_used, "gpt-4o-mini");

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = received[0].body_json().unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "system");
    assert_eq!(
      messages[1]["content"],
      "Current health data: {\"water_ml\":900}"
    );
    assert_eq!(messages[2]["content"], "How much water should I drink?");
}

#[tokio::test]
async fn test_flat_content_provider_shape()
{   let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/v1/chat/completions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "content": "Hallo!"
      })))
      .mount(&server)
      .await;

    let resp = orchestrator_for(&server, ErrorPolicy::Strict)
      .chat(ChatRequest::greeting(Language::De))
      .await
      .unwrap();
    assert_eq!(resp.text, "Hallo!");
}

#[tokio::test]
async fn test_provider_error_is_absorbed_when_resilient()
{   let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/v1/chat/completions"))
      .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
      .expect(1)
      .mount(&server)
      .await;

    let resp = orchestrator_for(&server, ErrorPolicy::Resilient)
      .chat(water_question())
      .await
      .unwrap();
    assert_eq!(resp.status, ResponseStatus::Error);
    assert_eq!(resp.model_used, "fallback");
    assert_eq!(resp.text, gugi::orchestrator::PROVIDER_APOLOGY_TEXT);
}

#[tokio::test]
async fn test_provider_error_surfaces_when_strict()
{   let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/v1/chat/completions"))
      .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
      .mount(&server)
      .await;

    let err = orchestrator_for(&server, ErrorPolicy::Strict)
      .chat(water_question())
      .await
      .unwrap_err();
    match err
    {   gugi::Error::ApiError(msg) => assert!(msg.contains("slow down"))
      , other => panic!("unexpected error: {:?}", other)
    }
}

#[tokio::test]
async fn test_unparsable_body_is_a_parse_error()
{   let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/v1/chat/completions"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
      .mount(&server)
      .await;

    let client = CompatibleClient::new(&provider_config(&server)).unwrap();
    let err = client
      .complete("gpt-4o-mini", &[ChatMessage::user("hi")], 0.4, 280)
      .await
      .unwrap_err();
    assert!(matches!(err, gugi::Error::ParseError(_)));
}

#[tokio::test]
async fn test_slow_provider_times_out()
{   let server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/v1/chat/completions"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(json!({ "content": "late" }))
          .set_delay(std::time::Duration::from_secs(3))
      )
      .mount(&server)
      .await;

    let config = ProviderConfig
    {   timeout_secs: Some(1)
      , ..provider_config(&server)
    };
    let client = CompatibleClient::new(&config).unwrap();
    let err = client
      .complete("gpt-4o-mini", &[ChatMessage::user("hi")], 0.4, 280)
      .await
      .unwrap_err();
    assert_eq!(err, gugi::Error::Timeout);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent()
{   let orchestrator = Arc::new(ChatOrchestrator::offline(CoachConfig::default()));
    let questions = [
      ("Meine Tabletten?", "Tabletten"),
      ("Wie viel Wasser?", "Wasser"),
      ("Mein Gewicht?", "Gewicht"),
      ("Sport heute?", "Bewegung"),
    ];

    let handles: Vec<_> = questions.iter()
      .map(|(q, _)| {
        let orchestrator = Arc::clone(&orchestrator);
        let request = ChatRequest::chat(
          Language::De,
          vec![ChatMessage::user(*q)]
        );
        tokio::spawn(async move { orchestrator.chat(request).await })
      })
      .collect();

    for (handle, (_, expected)) in handles.into_iter().zip(questions.iter())
    {   let resp = handle.await.unwrap().unwrap();
        assert!(resp.text.contains(expected), "{} !~ {}", resp.text, expected);
    }
}
