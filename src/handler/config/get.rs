use crate::store;
use crate::store::ConfigStore;
use crate::utils::response::Response;
use actix_web::{ web, Error, HttpResponse };

pub async fn task(store: web::Data<dyn ConfigStore>) -> Result<HttpResponse, Error> {
    // First read of an empty store persists the built-in default document.
    let result = store::load_or_seed(store.get_ref()).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error(&error.to_string()));
    }

    let config = result.unwrap();

    Ok(
        HttpResponse::Ok()
        .content_type("application/json")
        .json(config)
    )
}
