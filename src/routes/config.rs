use crate::Handler;
use actix_web::{ web, HttpResponse };
use actix_web::http::Method;

pub fn router(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/config")
        .route(
            "",
            web::get().to(Handler::Config::Get::task)
        )
        .route(
            "",
            web::post().to(Handler::Config::Update::task)
        )
        .route(
            "",
            web::route()
                .method(Method::OPTIONS)
                .to(|| async { HttpResponse::Ok().finish() })
        )
    );
}
