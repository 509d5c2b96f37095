#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use serde::{Deserialize, Serialize};
    use smoothie::Engine;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;
    use tracing::{info, warn};

    type SharedEngine = Arc<Engine>;

    #[derive(Debug, Deserialize)]
    struct ValidateRequest {
        rule: String,
        #[serde(default)]
        premises: Vec<String>,
        conclusion: String,
    }

    #[derive(Debug, Deserialize)]
    struct ApplyRequest {
        rule: String,
        #[serde(default)]
        selected: Vec<String>,
    }

    #[derive(Debug, Serialize)]
    struct ApplyResponse {
        rule: String,
        formula: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct IdentifyRequest {
        #[serde(default)]
        premises: Vec<String>,
        conclusion: String,
    }

    #[derive(Debug, Serialize)]
    struct IdentifyResponse {
        rule: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct HintRequest {
        rule: String,
        #[serde(default)]
        premises: Vec<String>,
        expected: Option<String>,
    }

    #[derive(Debug, Serialize)]
    struct HintResponse {
        hint: String,
    }

    #[derive(Debug, Deserialize)]
    struct RulesQuery {
        difficulty: Option<u8>,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    type ApiError = (StatusCode, Json<ErrorResponse>);

    fn bad_request(message: impl Into<String>) -> ApiError {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.into(),
            }),
        )
    }

    pub fn router(engine: Engine) -> Router {
        let shared_engine: SharedEngine = Arc::new(engine);

        Router::new()
            .route("/health", get(health_check))
            .route("/rules", get(list_rules))
            .route("/rules/:id", get(get_rule))
            .route("/validate", post(validate))
            .route("/apply", post(apply))
            .route("/identify", post(identify))
            .route("/hint", post(hint))
            .layer(CorsLayer::permissive())
            .with_state(shared_engine)
    }

    pub async fn start_server(engine: Engine, host: &str, port: u16) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "smoothie=info,tower_http=info".into()),
            )
            .init();

        let app = router(engine);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("Smoothie server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "smoothie",
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    async fn list_rules(
        State(engine): State<SharedEngine>,
        Query(query): Query<RulesQuery>,
    ) -> impl IntoResponse {
        let rules = match query.difficulty {
            Some(tier) => engine.registry().up_to_difficulty(tier),
            None => engine.registry().iter().collect(),
        };
        Json(serde_json::json!(rules))
    }

    async fn get_rule(
        State(engine): State<SharedEngine>,
        Path(id): Path<String>,
    ) -> Result<impl IntoResponse, ApiError> {
        match engine.registry().get(&id) {
            Some(definition) => Ok(Json(definition.clone())),
            None => Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Rule '{}' not found", id),
                }),
            )),
        }
    }

    async fn validate(
        State(engine): State<SharedEngine>,
        Json(payload): Json<ValidateRequest>,
    ) -> Result<impl IntoResponse, ApiError> {
        if payload.rule.trim().is_empty() {
            return Err(bad_request("Rule cannot be empty"));
        }

        let premises: Vec<&str> = payload.premises.iter().map(String::as_str).collect();
        let verdict = engine.validate_inference(&premises, &payload.conclusion, &payload.rule);

        if verdict.valid {
            info!("Validated {} for {}", payload.conclusion, payload.rule);
        } else {
            warn!(
                "Rejected {} for {}: {:?}",
                payload.conclusion, payload.rule, verdict.error
            );
        }

        Ok(Json(verdict))
    }

    async fn apply(
        State(engine): State<SharedEngine>,
        Json(payload): Json<ApplyRequest>,
    ) -> Result<impl IntoResponse, ApiError> {
        if payload.rule.trim().is_empty() {
            return Err(bad_request("Rule cannot be empty"));
        }

        let selected: Vec<&str> = payload.selected.iter().map(String::as_str).collect();
        let formula = engine.apply_rule(&payload.rule, &selected);

        Ok(Json(ApplyResponse {
            rule: payload.rule,
            formula,
        }))
    }

    async fn identify(
        State(engine): State<SharedEngine>,
        Json(payload): Json<IdentifyRequest>,
    ) -> impl IntoResponse {
        let premises: Vec<&str> = payload.premises.iter().map(String::as_str).collect();
        let rule = engine.identify_rule(&premises, &payload.conclusion);
        Json(IdentifyResponse { rule })
    }

    async fn hint(
        State(engine): State<SharedEngine>,
        Json(payload): Json<HintRequest>,
    ) -> impl IntoResponse {
        let premises: Vec<&str> = payload.premises.iter().map(String::as_str).collect();
        let hint = engine.generate_hint(&payload.rule, &premises, payload.expected.as_deref());
        Json(HintResponse { hint })
    }

}

#[cfg(not(feature = "server"))]
pub mod http {
    pub async fn start_server(
        _engine: smoothie::Engine,
        _host: &str,
        _port: u16,
    ) -> anyhow::Result<()> {
        anyhow::bail!("Server feature not enabled. Recompile with --features server")
    }
}
