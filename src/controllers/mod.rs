pub mod auth_controller;
pub mod car_controller;
pub mod service_record_controller;
pub mod user_controller;

pub use auth_controller::AuthController;
pub use car_controller::CarController;
pub use service_record_controller::ServiceRecordController;
pub use user_controller::UserController;
