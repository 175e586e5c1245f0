use actix_web::{web, HttpResponse};
use bookli_api_structs::get_status::APIResponse;

async fn status() -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Ok!\r\n".into(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
