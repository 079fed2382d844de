use serde_json::json;
use crate::store::{ ConfigStore, StoreError };
use crate::utils::response::Response;
use crate::utils::secret::AdminSecret;
use serde::{ Serialize, Deserialize };
use actix_web::{ web, Error, HttpResponse };

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReqBody {
    password: String,
    config: serde_json::Value,
}

pub async fn task(
    req_body: web::Json<ReqBody>,
    store: web::Data<dyn ConfigStore>,
    secret: web::Data<AdminSecret>,
) -> Result<HttpResponse, Error> {
    if !secret.verify(&req_body.password) {
        return Ok(Response::unauthorized("Unauthorized"));
    }

    // Wholesale replace, no merge and no schema validation.
    let result = store.replace(&req_body.config).await;

    if let Err(error) = result {
        if let StoreError::StaleToken = error {
            return Ok(Response::conflict(&error.to_string()));
        }

        log::error!("{:?}", error);
        return Ok(Response::internal_server_error(&error.to_string()));
    }

    Ok(
        HttpResponse::Ok()
        .content_type("application/json")
        .json(json!({ "success": true, "message": "Config Updated" }))
    )
}
