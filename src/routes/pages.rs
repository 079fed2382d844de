use crate::markup;
use actix_web::web;

pub fn router(cfg: &mut web::ServiceConfig) {
    cfg
    .route("/", web::get().to(markup::home))
    .route("/admin", web::get().to(markup::sign_in))
    .route("/admin/dashboard", web::get().to(markup::admin_dashboard));
}
