mod common;

use common::{TestResult, TestingEnv, BEARER};
use cnheat_api::prelude::*;
use httpmock::prelude::*;
use serde_json::json;

fn mock_snapshot(env: &TestingEnv) -> [httpmock::Mock<'_>; 3] {
    [
        env.get_json_from_file("/sites", Vec::new(), "resources/sites.json"),
        env.get_json_from_file("/predictions", Vec::new(), "resources/predictions.json"),
        env.get_json_from_file("/users", Vec::new(), "resources/users.json"),
    ]
}

#[tokio::test]
async fn connect_populates_snapshot() -> TestResult {
    let env = TestingEnv::new();
    let auth = env.mock_auth();
    let lists = mock_snapshot(&env);

    let client = Client::connect(env.config()).await?;

    auth.assert_hits(1);
    for mock in &lists {
        mock.assert_hits(1);
    }

    assert!(client.is_authenticated());
    assert_eq!(client.sites(), client.get_sites().await?.as_slice());
    assert_eq!(client.predictions().len(), 1);
    assert_eq!(client.users().len(), 2);
    assert_eq!(client.sites()[0].name.as_deref(), Some("denver"));

    Ok(())
}

#[tokio::test]
async fn connect_fails_on_bad_credentials() -> TestResult {
    let env = TestingEnv::new();
    env.fail(POST, "/oauth/token", 401);
    let sites = env.get_json_from_file("/sites", Vec::new(), "resources/sites.json");

    let err = Client::connect(env.config()).await.unwrap_err();

    assert_eq!(err.context(), Some("Authentication failed"));
    sites.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn connect_fails_when_one_list_fails() -> TestResult {
    let env = TestingEnv::new();
    env.mock_auth();
    env.get_json_from_file("/sites", Vec::new(), "resources/sites.json");
    env.fail(GET, "/predictions", 500);
    let users = env.get_json_from_file("/users", Vec::new(), "resources/users.json");

    let err = Client::connect(env.config()).await.unwrap_err();

    assert_eq!(err.context(), Some("Failed to fetch predictions"));
    users.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn snapshot_is_stale_until_refresh() -> TestResult {
    let env = TestingEnv::new();
    env.mock_auth();
    let [mut sites, _predictions, _users] = mock_snapshot(&env);
    env.mock(|when, then| {
        when.method(POST).path("/sites").header("Authorization", BEARER);
        then.status(201).json_body(json!({"id": "new-site"}));
    });

    let mut client = Client::connect(env.config()).await?;
    client
        .new_site()
        .name("aspen")
        .location(39.19, -106.82)
        .credits("c-102")
        .send()
        .await?;

    assert_eq!(client.sites().len(), 2);

    sites.delete();
    env.mock(|when, then| {
        when.method(GET).path("/sites");
        then.status(200).json_body(json!({"objects": [
            {"id": "5f1b2c3d4e", "name": "denver"},
            {"id": 42, "name": "Blue Ridge"},
            {"id": "new-site", "name": "aspen"},
        ]}));
    });

    client.refresh().await?;
    assert_eq!(client.sites().len(), 3);
    assert_eq!(client.sites()[2].id, "new-site");

    Ok(())
}

#[tokio::test]
async fn endpoints_require_authentication() -> TestResult {
    let env = TestingEnv::new();
    let sites = env.get_json_from_file("/sites", Vec::new(), "resources/sites.json");
    let client = env.client();

    let err = client.get_sites().await.unwrap_err();

    sites.assert_hits(0);
    assert_eq!(
        err,
        Error::from(RuntimeError::Unauthenticated).with_context("Failed to fetch sites")
    );

    Ok(())
}

#[tokio::test]
async fn connect_keeps_sites_without_names() -> TestResult {
    let env = TestingEnv::new();
    env.mock_auth();
    env.mock(|when, then| {
        when.method(GET).path("/sites").header("Authorization", BEARER);
        then.status(200).json_body(json!({"objects": [
            {"id": "s1", "name": "denver"},
            {"id": "s2", "lat": 1.0},
        ]}));
    });
    env.get_json_from_file("/predictions", Vec::new(), "resources/predictions.json");
    env.get_json_from_file("/users", Vec::new(), "resources/users.json");

    let client = Client::connect(env.config()).await?;

    assert_eq!(client.sites().len(), 2);
    assert_eq!(client.sites()[1].id, "s2");
    assert_eq!(client.sites()[1].name, None);

    Ok(())
}
