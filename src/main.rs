use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod dto;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;

use config::Config;
use middleware::rate_limit::RateLimitState;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub rate_limiter: RateLimitState,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let rate_limiter =
            RateLimitState::new(config.rate_limit_max_requests, config.rate_limit_window_secs);
        Self {
            config: Arc::new(config),
            rate_limiter,
        }
    }

    /// Per-request RNG: reproducible when RNG_SEED is set.
    pub fn rng(&self) -> StdRng {
        match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heartmend_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;
    let addr = config.listen_addr();
    let state = AppState::new(config);

    if state.config.rng_seed.is_some() {
        tracing::info!("RNG_SEED set, message and recommendation picks are reproducible");
    }

    middleware::rate_limit::spawn_cleanup_worker(state.rate_limiter.clone());

    let cors = cors_layer(&state.config)?;
    let app = build_router(state).layer(cors);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    // Client IP feeds the rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Recovery
        .route("/api/recovery", post(handlers::recovery::get_recovery))
        .route("/api/recovery/timeline", post(handlers::recovery::get_timeline))
        // Messages
        .route(
            "/api/messages/percentage",
            get(handlers::messages::message_for_percentage),
        )
        .route("/api/messages", post(handlers::messages::message_for_logs))
        // Music
        .route(
            "/api/recommendations",
            post(handlers::recommendations::get_recommendations),
        )
        .route(
            "/api/recommendations/classify",
            post(handlers::recommendations::classify),
        )
        .route(
            "/api/catalog/:category",
            get(handlers::recommendations::get_catalog),
        )
        .route("/api/music/insight", post(handlers::recommendations::music_insight))
        // Dashboard
        .route("/api/stats", post(handlers::stats::get_dashboard_stats))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit_api,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = vec![config
        .frontend_url
        .parse::<axum::http::HeaderValue>()
        .context("FRONTEND_URL is not a valid header value")?];
    // In dev, also allow LAN access (e.g. testing from another device)
    for o in &config.cors_extra_origins {
        if let Ok(hv) = o.parse::<axum::http::HeaderValue>() {
            origins.push(hv);
        }
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use tower::ServiceExt;

    fn test_app(config: Config) -> Router {
        build_router(AppState::new(config))
            .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))))
    }

    fn seeded() -> Config {
        Config {
            rng_seed: Some(42),
            ..Config::default()
        }
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn sample_logs() -> Value {
        // deliberately out of date order
        json!([
            {"id": "b", "date": "2026-03-14", "mood": 7, "sleep_hours": 8.0,
             "social_interactions": 3, "activities": ["Reading"]},
            {"id": "c", "date": "2026-03-13", "mood": 4, "sleep_hours": 5.0,
             "social_interactions": 1},
            {"id": "a", "date": "2026-03-15", "mood": 9, "sleep_hours": 7.5,
             "social_interactions": 6, "activities": ["Exercise", "Reading", "Meditation"],
             "music_genres": ["Pop"]}
        ])
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(test_app(Config::default()), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "heartmend-api");
    }

    #[tokio::test]
    async fn test_recovery_endpoint_orders_logs() {
        let req = post_json(
            "/api/recovery",
            json!({"logs": sample_logs(), "now": "2026-03-15T00:00:00Z"}),
        );
        let (status, body) = send(test_app(Config::default()), req).await;
        assert_eq!(status, StatusCode::OK);
        let pct = body["percentage"].as_f64().unwrap();
        assert!((pct - 68.611).abs() < 0.01, "got {}", pct);
        assert_eq!(body["rounded"], 69);
        assert_eq!(body["breakdown"]["consistency_score"], 1.0);
        assert!(body["milestone"].as_str().unwrap().contains("Growing stronger"));
    }

    #[tokio::test]
    async fn test_recovery_empty_logs() {
        let (status, body) = send(test_app(Config::default()), post_json("/api/recovery", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["percentage"], 0.0);
        assert_eq!(body["rounded"], 0);
    }

    #[tokio::test]
    async fn test_timeline_endpoint() {
        let req = post_json(
            "/api/recovery/timeline",
            json!({"logs": sample_logs(), "now": "2026-03-15T00:00:00Z"}),
        );
        let (status, body) = send(test_app(Config::default()), req).await;
        assert_eq!(status, StatusCode::OK);
        let points = body.as_array().unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0]["date"], "2026-03-13");
        assert_eq!(points[2]["date"], "2026-03-15");
    }

    #[tokio::test]
    async fn test_message_for_percentage_endpoint() {
        let (status, body) = send(
            test_app(Config::default()),
            get("/api/messages/percentage?value=85"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "champion");
        assert_eq!(body["kind"], "motivational");
    }

    #[tokio::test]
    async fn test_message_for_percentage_out_of_range() {
        let (status, body) = send(
            test_app(Config::default()),
            get("/api/messages/percentage?value=140"),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);
    }

    #[tokio::test]
    async fn test_message_for_logs_endpoint() {
        let logs = json!([{"date": "2026-03-15", "mood": 6, "sleep_hours": 7.0,
                           "social_interactions": 1, "music_genres": ["Healing Music"]}]);
        let (status, body) = send(test_app(seeded()), post_json("/api/messages", json!({"logs": logs}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "music-therapy");
    }

    #[tokio::test]
    async fn test_recommendations_with_category() {
        let req = post_json(
            "/api/recommendations",
            json!({"logs": sample_logs(), "category": "happy"}),
        );
        let (status, body) = send(test_app(seeded()), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "happy");
        let items = body["items"].as_array().unwrap();
        assert!(!items.is_empty() && items.len() <= 9);
        assert!(items.iter().all(|i| i["mood_category"] == "happy"));
    }

    #[tokio::test]
    async fn test_recommendations_classify_when_category_missing() {
        let logs = json!([{"date": "2026-03-15", "mood": 2, "sleep_hours": 7.0, "social_interactions": 0}]);
        let (status, body) = send(
            test_app(seeded()),
            post_json("/api/recommendations", json!({"logs": logs})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "sad");
        assert!(body["items"].as_array().unwrap().iter().all(|i| i["mood_category"] == "sad"));
    }

    #[tokio::test]
    async fn test_recommendations_reproducible_with_seed() {
        let body = json!({"logs": sample_logs(), "category": "healing"});
        let (_, a) = send(test_app(seeded()), post_json("/api/recommendations", body.clone())).await;
        let (_, b) = send(test_app(seeded()), post_json("/api/recommendations", body)).await;
        assert_eq!(a["items"], b["items"]);
    }

    #[tokio::test]
    async fn test_unknown_category_in_body_rejected() {
        let (status, _) = send(
            test_app(Config::default()),
            post_json("/api/recommendations", json!({"category": "angry"})),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_classify_endpoint_empty() {
        let (status, body) = send(
            test_app(Config::default()),
            post_json("/api/recommendations/classify", json!({"logs": []})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "healing");
    }

    #[tokio::test]
    async fn test_catalog_endpoint() {
        let (status, body) = send(test_app(Config::default()), get("/api/catalog/sad")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 5);

        let (status, body) = send(test_app(Config::default()), get("/api/catalog/angry")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]["message"].as_str().unwrap().contains("angry"));
    }

    #[tokio::test]
    async fn test_music_insight_endpoint() {
        let (status, body) = send(
            test_app(Config::default()),
            post_json("/api/music/insight", json!({"logs": sample_logs()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["genres_logged"], 1);
        assert!(body["insight"].as_str().unwrap().contains("variety"));
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let (status, body) = send(
            test_app(Config::default()),
            post_json("/api/stats", json!({"logs": sample_logs()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["log_count"], 3);
        assert_eq!(body["total_social_interactions"], 10);
        assert!(body["sleep_mood_trend"].is_object());
    }

    #[tokio::test]
    async fn test_rate_limit_applies_to_api_routes() {
        let app = test_app(Config {
            rate_limit_max_requests: 2,
            ..Config::default()
        });
        for _ in 0..2 {
            let (status, _) = send(app.clone(), get("/api/messages/percentage?value=50")).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, body) = send(app.clone(), get("/api/messages/percentage?value=50")).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"]["code"], 429);

        // health is outside the limited routes
        let (status, _) = send(app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_cors_layer_rejects_bad_frontend_url() {
        let config = Config {
            frontend_url: "bad\nvalue".into(),
            ..Config::default()
        };
        assert!(cors_layer(&config).is_err());
    }
}
