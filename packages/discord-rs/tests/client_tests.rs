use discord::{DiscordError, DiscordOptions, DiscordService};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> DiscordService {
    DiscordService::new(DiscordOptions::new("secret-token").with_api_base(server.uri())).unwrap()
}

#[tokio::test]
async fn test_add_member_role_sends_put_with_audit_reason() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/guilds/100/members/42/roles/7"))
        .and(header("Authorization", "Bot secret-token"))
        .and(header(
            "X-Audit-Log-Reason",
            "Auto-add%20Member%20when%20clan%20role%20selected",
        ))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    service(&server)
        .add_member_role("100", "42", "7", "Auto-add Member when clan role selected")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_remove_member_role_sends_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/guilds/100/members/42/roles/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    service(&server)
        .remove_member_role("100", "42", "7", "cleanup")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_forbidden_maps_to_permission_denied() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({"message": "Missing Permissions", "code": 50013})),
        )
        .mount(&server)
        .await;

    let err = service(&server)
        .add_member_role("100", "42", "7", "reason")
        .await
        .unwrap_err();

    assert!(err.is_permission_denied());
    assert!(format!("{}", err).contains("Missing Permissions"));
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = service(&server)
        .remove_member_role("100", "42", "7", "reason")
        .await
        .unwrap_err();

    assert!(!err.is_permission_denied());
    assert!(matches!(err, DiscordError::Http { status: 502, .. }));
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/guilds/100/roles"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(serde_json::json!({"message": "rate limited", "retry_after": 2.5})),
        )
        .mount(&server)
        .await;

    let err = service(&server).guild_roles("100").await.unwrap_err();

    match err {
        DiscordError::RateLimited { retry_after } => assert_eq!(retry_after, 2.5),
        other => panic!("Expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_guild_roles_and_member_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/guilds/100/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "100", "name": "@everyone", "position": 0, "permissions": "0"},
            {"id": "7", "name": "Knight", "position": 2, "permissions": "0"},
            {"id": "8", "name": "Linker", "position": 5, "permissions": "268435456"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/guilds/100/members/55"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": {"id": "55", "username": "linker-bot"},
            "nick": null,
            "roles": ["8"]
        })))
        .mount(&server)
        .await;

    let service = service(&server);
    let roles = service.guild_roles("100").await.unwrap();
    let member = service.guild_member("100", "55").await.unwrap();

    assert_eq!(roles.len(), 3);
    assert_eq!(discord::permissions::highest_role_position(&roles, &member), 5);
}

#[tokio::test]
async fn test_missing_guild_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/guilds/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = service(&server).guild("404").await.unwrap_err();
    assert!(matches!(err, DiscordError::NotFound(_)));
}
