pub mod cancel_reservation;
pub mod create_reservation;
pub mod get_due_reminders;
mod get_reservation;
mod get_reservations;
mod subscribers;

use actix_web::web;
use cancel_reservation::cancel_reservation_controller;
use create_reservation::create_reservation_controller;
use get_reservation::get_reservation_controller;
use get_reservations::get_reservations_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reservations",
        web::post().to(create_reservation_controller),
    );
    cfg.route("/reservations", web::get().to(get_reservations_controller));
    cfg.route(
        "/reservations/{reservation_id}",
        web::get().to(get_reservation_controller),
    );
    cfg.route(
        "/reservations/{reservation_id}/cancel",
        web::post().to(cancel_reservation_controller),
    );
}
