use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    model::identity::Identity,
    router::router,
    service::{
        discord::fake::{FakeGuildClient, FakeVoiceTransport},
        policy::AdminAllowList,
        voice::VoiceRegistry,
    },
    startup::session_layer,
    state::{AppState, OAuth2Client},
};
use test_utils::builder::TestBuilder;


const ADMIN_ID: u64 = 1302678535831289891;
const MEMBER_ID: u64 = 42;

/// Full router over an in-memory database, with fakes in place of Discord.
struct TestApp {
    router: Router,
    store: SqliteStore,
    guild: Arc<FakeGuildClient>,
    transport: Arc<FakeVoiceTransport>,
    db: DatabaseConnection,
}

impl TestApp {
    async fn new(guild: FakeGuildClient) -> Self {
        let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
        let db = test.db.clone().unwrap();

        let store = SqliteStore::new(db.get_sqlite_connection_pool().clone());
        store.migrate().await.unwrap();

        let guild = Arc::new(guild);
        let transport = Arc::new(FakeVoiceTransport::new());

        let state = AppState {
            db: db.clone(),
            http_client: reqwest::Client::new(),
            oauth_client: oauth_client(),
            guild: guild.clone(),
            voice: VoiceRegistry::new(transport.clone()),
            admins: Arc::new(AdminAllowList::default()),
            action_timeout: Duration::from_secs(5),
            dashboard_url: "/dashboard".to_string(),
        };

        let router = router(state).layer(session_layer(store.clone()));

        Self {
            router,
            store,
            guild,
            transport,
            db,
        }
    }

    /// Stores a logged-in session for `identity` and returns its cookie header.
    async fn login(&self, identity: &Identity) -> String {
        let session = Session::new(
            None,
            Arc::new(self.store.clone()),
            Some(Expiry::OnInactivity(time::Duration::days(7))),
        );
        session
            .insert("auth:identity", identity)
            .await
            .unwrap();
        session.save().await.unwrap();

        format!("id={}", session.id().unwrap())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::get(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        self.send(request.body(Body::empty()).unwrap()).await
    }

    async fn post_json(&self, uri: &str, cookie: Option<&str>, body: &str) -> (StatusCode, Value) {
        let mut request = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        self.send(request.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

fn oauth_client() -> OAuth2Client {
    BasicClient::new(ClientId::new("client".to_string()))
        .set_client_secret(ClientSecret::new("secret".to_string()))
        .set_auth_uri(AuthUrl::new("https://discord.com/oauth2/authorize".to_string()).unwrap())
        .set_token_uri(TokenUrl::new("https://discord.com/api/oauth2/token".to_string()).unwrap())
        .set_redirect_uri(
            RedirectUrl::new("http://localhost:8080/api/auth/discord/callback".to_string())
                .unwrap(),
        )
}

fn identity(discord_id: u64) -> Identity {
    Identity {
        discord_id,
        username: format!("user{}", discord_id),
        avatar: Some("avatarhash".to_string()),
        email: Some(format!("user{}@example.com", discord_id)),
    }
}
