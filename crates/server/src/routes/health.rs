/// GET /health — gateway liveness check.
pub async fn health() -> &'static str {
    "ok"
}
