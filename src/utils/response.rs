use serde_json::json;
use actix_web::HttpResponse;
use serde::{ Serialize, Deserialize };

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Response {
    pub message: String,
}

impl Response {
    pub fn bad_request(message: &str) -> HttpResponse {
        HttpResponse::BadRequest()
            .content_type("application/json")
            .json(json!({ "error": message }))
    }

    pub fn unauthorized(message: &str) -> HttpResponse {
        HttpResponse::Unauthorized()
            .content_type("application/json")
            .json(json!({ "error": message }))
    }

    pub fn not_found(message: &str) -> HttpResponse {
        HttpResponse::NotFound()
            .content_type("application/json")
            .json(json!({ "error": message }))
    }

    pub fn conflict(message: &str) -> HttpResponse {
        HttpResponse::Conflict()
            .content_type("application/json")
            .json(json!({ "error": message }))
    }

    pub fn internal_server_error(message: &str) -> HttpResponse {
        HttpResponse::InternalServerError()
            .content_type("application/json")
            .json(json!({ "error": message }))
    }
}
