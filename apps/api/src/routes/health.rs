/// GET /health
/// Always `200 OK`; checks neither the provider nor the database.
pub async fn health_handler() -> &'static str {
    "OK"
}
