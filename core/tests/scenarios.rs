use serde_json::{Value, json};
use skillagent_core::{AgentLoop, Config, OpenAIProvider, SkillRegistry, discover_skills};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GREETER: &str = "---\nname: greeter\ndescription: \"Says hello\"\n---\nAlways answer with a greeting.\n";

fn write_greeter(root: &Path) {
    let dir = root.join("greeter");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("SKILL.md"), GREETER).unwrap();
}

fn agent(server: &MockServer, root: &Path) -> AgentLoop {
    let config = Config {
        api_url: format!("{}/v1/chat/completions", server.uri()),
        api_token: "sk-test".into(),
        skills_dir: root.to_path_buf(),
        ..Config::default()
    };
    let skills = Arc::new(SkillRegistry::discover(&config.skills_dir).unwrap());
    AgentLoop::new(Arc::new(OpenAIProvider::from_config(&config)), skills, &config)
}

fn completion(message: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "choices": [{ "message": message }] }))
}

#[test]
fn greeter_is_discovered_and_listed() {
    let tmp = TempDir::new().unwrap();
    write_greeter(tmp.path());

    let skills = discover_skills(tmp.path()).unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0].name, "greeter");

    let prompt = skillagent_core::agent::build_system_prompt(&skills);
    assert!(prompt.contains("<name>greeter</name>"));
}

#[tokio::test]
async fn load_skill_call_feeds_result_into_second_request() {
    let tmp = TempDir::new().unwrap();
    write_greeter(tmp.path());
    let server = MockServer::start().await;

    // Second request: the transcript now carries the tool result.
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("\"tool_call_id\":\"call_1\""))
        .respond_with(completion(json!({ "role": "assistant", "content": "Hello from greeter!" })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion(json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": { "name": "load_skill", "arguments": "{\"name\":\"greeter\"}" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = agent(&server, tmp.path()).run("please greet me").await;
    assert_eq!(answer, "Hello from greeter!");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let body: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[2]["role"], "assistant");
    assert_eq!(messages[2]["tool_calls"][0]["id"], "call_1");
    assert_eq!(messages[3]["role"], "tool");
    let result: Value = serde_json::from_str(messages[3]["content"].as_str().unwrap()).unwrap();
    assert_eq!(result, json!({ "name": "greeter", "skill_md": GREETER }));
}

#[tokio::test]
async fn final_text_returns_without_further_requests() {
    let tmp = TempDir::new().unwrap();
    write_greeter(tmp.path());
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(completion(json!({ "role": "assistant", "content": "Hello!" })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(agent(&server, tmp.path()).run("hi").await, "Hello!");
}

#[tokio::test]
async fn server_error_is_reported_without_retry() {
    let tmp = TempDir::new().unwrap();
    write_greeter(tmp.path());
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let answer = agent(&server, tmp.path()).run("hi").await;
    assert!(answer.contains("500"), "unexpected answer: {answer}");
    assert!(answer.starts_with("API Error"));
}

#[tokio::test]
async fn unreachable_endpoint_is_reported() {
    let tmp = TempDir::new().unwrap();
    write_greeter(tmp.path());

    let config = Config {
        api_url: "http://127.0.0.1:1/v1/chat/completions".into(),
        skills_dir: tmp.path().to_path_buf(),
        ..Config::default()
    };
    let skills = Arc::new(SkillRegistry::discover(&config.skills_dir).unwrap());
    let agent = AgentLoop::new(Arc::new(OpenAIProvider::from_config(&config)), skills, &config);

    let answer = agent.run("hi").await;
    assert!(answer.starts_with("Request failed"), "unexpected answer: {answer}");
}
