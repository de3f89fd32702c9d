//! Integration tests for creating Next Gen projects

use eyre::Result;
use harness_app_migrator::client::HarnessClient;
use harness_app_migrator::etl::Loader;
use harness_app_migrator::harness::{Application, ProjectsLoader};
use harness_app_migrator::transform::IdentifierAssigner;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn loader(server: &MockServer) -> Result<ProjectsLoader> {
    let client = HarnessClient::try_new(Url::parse(&server.uri())?, "ng-token")?;
    Ok(ProjectsLoader::new(client, "acc", "default"))
}

#[tokio::test]
async fn test_creates_one_project_per_application() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ng/api/projects"))
        .and(query_param("accountIdentifier", "acc"))
        .and(query_param("orgIdentifier", "default"))
        .and(header("x-api-key", "ng-token"))
        .and(body_partial_json(json!({
            "project": {"orgIdentifier": "default", "identifier": "WebShop", "name": "Web Shop"}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "SUCCESS", "data": {}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ng/api/projects"))
        .and(body_partial_json(json!({"project": {"identifier": "Api"}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "SUCCESS", "data": {}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let targets = IdentifierAssigner.assign_all(vec![
        Application::new("1", "Web Shop").with_description("storefront"),
        Application::new("2", "Api"),
    ]);

    let created = loader(&server)?.load(&targets).await?;
    assert_eq!(created, 2);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(body["project"]["description"], "storefront");
    assert_eq!(body["project"]["modules"].as_array().unwrap().len(), 14);
    let color = body["project"]["color"].as_str().unwrap();
    assert!(color.starts_with('#') && color.len() == 7);

    Ok(())
}

#[tokio::test]
async fn test_existing_project_is_not_fatal() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"project": {"identifier": "Existing"}})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "ERROR",
            "code": "DUPLICATE_FIELD",
            "message": "A project with identifier [Existing] and orgIdentifier [default] is already present"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"project": {"identifier": "Fresh"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "SUCCESS"})))
        .expect(1)
        .mount(&server)
        .await;

    let targets = IdentifierAssigner.assign_all(vec![
        Application::new("1", "Existing"),
        Application::new("2", "Fresh"),
    ]);

    let created = loader(&server)?.load(&targets).await?;
    assert_eq!(created, 1);

    Ok(())
}

#[tokio::test]
async fn test_non_json_response_is_an_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let targets = IdentifierAssigner.assign_all(vec![Application::new("1", "Web")]);
    let result = loader(&server)?.load(&targets).await;

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("Failed to create project Web"));

    Ok(())
}
