use crate::{
    api::{calculate, results, upload},
    config::Config,
    pages,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

type Limiter = Governor<PeerIpKeyExtractor, NoOpMiddleware>;

/// Rate limiters for the API scopes. Built once before the server starts and
/// cloned into every worker, so the per-minute quotas are process-wide.
#[derive(Clone)]
pub struct Limiters {
    upload: Arc<Limiter>,
    api: Arc<Limiter>,
}

impl Limiters {
    pub fn new(config: &Config) -> Self {
        Self {
            upload: Arc::new(build_limiter(config.rate_upload_per_min)),
            api: Arc::new(build_limiter(config.rate_api_per_min)),
        }
    }
}

fn build_limiter(requests_per_min: u32) -> Limiter {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        // per_ms and burst_size are both non-zero
        .unwrap();
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiters: &Limiters) {
    pages::configure(cfg);

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/upload")
                    .wrap(limiters.upload.clone())
                    // /upload/cities
                    .service(
                        web::resource("/cities").route(web::post().to(upload::upload_cities)),
                    )
                    // /upload/salaries
                    .service(
                        web::resource("/salaries").route(web::post().to(upload::upload_salaries)),
                    ),
            )
            .service(
                web::scope("")
                    .wrap(limiters.api.clone())
                    .service(web::resource("/calculate").route(web::post().to(calculate::calculate)))
                    .service(web::resource("/results").route(web::get().to(results::list_results)))
                    // /results/export
                    .service(web::resource("/results/export").route(web::get().to(results::export))),
            ),
    );
}
