mod check_availability;
mod create_resource;
mod get_booking_slots;
mod get_resource;
mod list_resources;

use actix_web::web;
use check_availability::check_availability_controller;
use create_resource::create_resource_controller;
use get_booking_slots::get_booking_slots_controller;
use get_resource::get_resource_controller;
use list_resources::list_resources_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/resources", web::post().to(create_resource_controller));
    cfg.route("/resources", web::get().to(list_resources_controller));
    cfg.route(
        "/resources/{resource_id}",
        web::get().to(get_resource_controller),
    );
    cfg.route(
        "/resources/{resource_id}/availability",
        web::get().to(check_availability_controller),
    );
    cfg.route(
        "/resources/{resource_id}/booking-slots",
        web::get().to(get_booking_slots_controller),
    );
}
