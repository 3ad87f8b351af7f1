#[get("/health_check")]
pub fn health_check() {}
