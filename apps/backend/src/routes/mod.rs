use actix_web::web;

pub mod auth;
pub mod guard;
pub mod health;
pub mod products;
pub mod users;
pub mod views;

/// Register every route. Guard chains are attached per route, so the same
/// configuration serves `main.rs` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // /api/profile, /api/logout, /api/users/**, /api/products/**
    cfg.service(
        web::scope("/api")
            .configure(auth::configure_routes)
            .service(web::scope("/users").configure(users::configure_routes))
            .service(web::scope("/products").configure(products::configure_routes)),
    );
}
