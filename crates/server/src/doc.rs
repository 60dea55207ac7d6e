use crate::routes::{auth, building, health, lecturer, reservation, room, schedule};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::login,
        auth::register,
        building::list_buildings,
        building::get_building,
        building::create_building,
        building::update_building,
        building::delete_building,
        room::list_rooms,
        room::get_room,
        room::create_room,
        room::update_room,
        room::delete_room,
        lecturer::list_lecturers,
        lecturer::get_lecturer,
        lecturer::update_lecturer,
        lecturer::delete_lecturer,
        schedule::list_schedules,
        schedule::get_schedule,
        schedule::create_schedule,
        schedule::update_schedule,
        schedule::delete_schedule,
        reservation::list_reservations,
        reservation::get_reservation,
        reservation::create_reservation,
        reservation::update_reservation,
        reservation::delete_reservation,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Login and registration"),
        (name = "Buildings", description = "Buildings and their rooms"),
        (name = "Rooms", description = "Bookable rooms"),
        (name = "Lecturers", description = "Lecturer accounts"),
        (name = "Schedules", description = "Teaching schedules"),
        (name = "Reservations", description = "Room reservations"),
    ),
    info(
        title = "Room Booking API",
        version = "1.0.0",
        description = "Buildings, rooms, lecturers, schedules and room reservations",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
