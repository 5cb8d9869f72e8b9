use crate::{
    api::{attendance, dashboard, employee, payroll},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let burst = requests_per_min.max(1);
    let per_ms = 60_000 / u64::from(burst);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(burst)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("limiter period and burst are non-zero");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_protected_per_min))
            .service(
                web::resource("/dashboard").route(web::get().to(dashboard::dashboard)),
            )
            .service(
                web::resource("/employee").route(web::get().to(employee::list_employees)),
            )
            .service(
                web::resource("/attendance").route(web::get().to(attendance::list_attendance)),
            )
            .service(
                web::scope("/payroll")
                    // /payroll
                    .service(
                        web::resource("")
                            .route(web::get().to(payroll::list_payroll))
                            .route(web::post().to(payroll::create_payroll)),
                    )
                    .service(
                        web::resource("/summary").route(web::get().to(payroll::payroll_summary)),
                    )
                    .service(
                        web::resource("/process").route(web::post().to(payroll::process_payroll)),
                    )
                    // /payroll/{year}/{month}/{employee_id}
                    .service(
                        web::resource("/{year}/{month}/{employee_id}")
                            .route(web::get().to(payroll::get_payroll))
                            .route(web::put().to(payroll::update_payroll)),
                    )
                    .service(
                        web::resource("/{year}/{month}/{employee_id}/status")
                            .route(web::put().to(payroll::update_status)),
                    )
                    .service(
                        web::resource("/{year}/{month}/{employee_id}/payslip")
                            .route(web::get().to(payroll::get_payslip)),
                    ),
            ),
    );
}
