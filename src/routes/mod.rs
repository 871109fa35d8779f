pub mod auth_routes;
pub mod car_routes;
pub mod service_record_routes;
pub mod user_routes;
