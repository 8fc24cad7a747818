use std::time::{SystemTime, UNIX_EPOCH};

use devconnect_client::{ClientError, DevConnectClient, ProfileInput, Session};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

fn base_url() -> String {
    std::env::var("DEVCONNECT_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
}

#[tokio::test]
#[ignore = "requires running devconnect-server"]
async fn http_smoke_flow() {
    let mut client = DevConnectClient::new(base_url()).expect("client must build");

    let suffix = unique_suffix();
    let name = format!("smoke user {suffix}");
    let email = format!("smoke_{suffix}@example.com");
    let password = "password123";

    let token = client
        .register(&name, &email, password)
        .await
        .expect("register must succeed");
    assert!(!token.is_empty());
    assert_eq!(client.token(), Some(token.as_str()));

    let user = client.load_user().await.expect("load_user must succeed");
    assert_eq!(user.email, email);

    let duplicate = client.register(&name, &email, password).await;
    assert!(matches!(duplicate, Err(ClientError::InvalidRequest(_))));

    let profile = client
        .upsert_profile(&ProfileInput {
            status: "Developer".to_string(),
            skills: "rust, sql ,  axum".to_string(),
            twitter: Some("https://twitter.com/smoke".to_string()),
            ..ProfileInput::default()
        })
        .await
        .expect("upsert_profile must succeed");
    assert_eq!(profile.user.id, user.id);
    assert_eq!(profile.skills, vec!["rust", "sql", "axum"]);

    let created = client
        .create_post("smoke post")
        .await
        .expect("create_post must succeed");
    assert_eq!(created.user_id, user.id);

    let likes = client
        .like_post(created.id)
        .await
        .expect("like_post must succeed");
    assert_eq!(likes.len(), 1);

    let comments = client
        .add_comment(created.id, "smoke comment")
        .await
        .expect("add_comment must succeed");
    assert_eq!(comments.len(), 1);

    let remaining = client
        .delete_comment(created.id, comments[0].id)
        .await
        .expect("delete_comment must succeed");
    assert!(remaining.is_empty());

    client
        .delete_post(created.id)
        .await
        .expect("delete_post must succeed");
    let after_delete = client.get_post(created.id).await;
    assert!(matches!(after_delete, Err(ClientError::NotFound(_))));

    client
        .delete_account()
        .await
        .expect("delete_account must succeed");
    assert!(client.token().is_none());

    let login = client.login(&email, password).await;
    assert!(matches!(login, Err(ClientError::Unauthorized(_))));
}

#[tokio::test]
#[ignore = "requires running devconnect-server"]
async fn session_smoke_flow() {
    let client = DevConnectClient::new(base_url()).expect("client must build");
    let mut session = Session::new(client);

    let suffix = unique_suffix();
    let email = format!("session_{suffix}@example.com");

    session
        .register("session user", &email, "password123")
        .await
        .expect("register must succeed");
    assert!(session.store().auth.is_authenticated);
    assert!(session.store().auth.user.is_some());

    session
        .add_post("from session")
        .await
        .expect("add_post must succeed");
    let post_id = session.store().post.posts[0].id;
    assert_eq!(session.store().alerts.len(), 1);

    session
        .add_like(post_id)
        .await
        .expect("add_like must succeed");
    assert_eq!(session.store().post.posts[0].likes.len(), 1);

    let second = session.add_like(post_id).await;
    assert!(second.is_err());
    assert!(session.store().post.error.is_some());

    session
        .delete_account()
        .await
        .expect("delete_account must succeed");
    assert!(!session.store().auth.is_authenticated);
}
