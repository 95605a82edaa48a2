//! Static operator pages. `{{API}}` in the templates becomes the API prefix.

use crate::config::Config;
use actix_web::{HttpResponse, Responder, get, http::header::ContentType, web};

const INDEX: &str = include_str!("../static/index.html");
const UPLOAD: &str = include_str!("../static/upload.html");
const RESULTS: &str = include_str!("../static/results.html");
const STYLE: &str = include_str!("../static/style.css");

fn render(template: &str, config: &Config) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(template.replace("{{API}}", &config.api_prefix))
}

#[get("/")]
async fn index(config: web::Data<Config>) -> impl Responder {
    render(INDEX, &config)
}

#[get("/upload")]
async fn upload(config: web::Data<Config>) -> impl Responder {
    render(UPLOAD, &config)
}

#[get("/results")]
async fn results(config: web::Data<Config>) -> impl Responder {
    render(RESULTS, &config)
}

#[get("/static/style.css")]
async fn style() -> impl Responder {
    HttpResponse::Ok().content_type("text/css; charset=utf-8").body(STYLE)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(upload)
        .service(results)
        .service(style);
}
