use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok",
            database: "connected",
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            status: "error",
            database: "disconnected",
        }
    }
}
