//! Tests for resource lookup and alert handlers.

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test as actix_test};
use chrono::Utc;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::place::PersistedPlace;
use crate::domain::ports::MockResourceDispatchCommand;
use crate::inbound::http::validation::{json_error_handler, query_error_handler};

fn resource(name: &str, distance_km: f64) -> NearbyResource {
    NearbyResource {
        place: PersistedPlace {
            id: Uuid::new_v4(),
            external_id: format!("n{}", name.len()),
            category: "hospital".to_owned(),
            name: name.to_owned(),
            coordinates: Coordinates::new(-74.0, 40.71),
            capacity: 120,
            specialties: vec!["trauma".to_owned()],
            updated_at: Utc::now(),
        },
        distance_km,
    }
}

fn ack(resource_id: Uuid, name: &str) -> AlertAcknowledgement {
    AlertAcknowledgement {
        resource_id,
        resource_name: name.to_owned(),
        message: "Alert sent successfully".to_owned(),
    }
}

async fn send(
    command: MockResourceDispatchCommand,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let state = HttpState::default().with_resources(Arc::new(command));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .service(
                web::scope("/api/v1")
                    .service(nearby_resources)
                    .service(alert_resource)
                    .service(dispatch_nearest),
            ),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    (status, serde_json::from_slice(&bytes).expect("JSON body"))
}

#[actix_web::test]
async fn nearby_resources_include_capacity_and_distance() {
    let mut command = MockResourceDispatchCommand::new();
    command
        .expect_nearby_resources()
        .withf(|center, max_distance| {
            *center == Coordinates::new(-74.0, 40.7) && max_distance.get() == 10_000.0
        })
        .times(1)
        .returning(|_, _| Ok(vec![resource("Near", 1.1), resource("Further", 4.2)]));

    let (status, body) = send(
        command,
        actix_test::TestRequest::get()
            .uri("/api/v1/resources/nearby?latitude=40.7&longitude=-74.0&maxDistanceMeters=10000"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Near");
    assert_eq!(body[0]["capacity"], 120);
    assert_eq!(body[0]["specialties"], json!(["trauma"]));
    assert_eq!(body[0]["distanceKm"], 1.1);
    assert_eq!(body[1]["name"], "Further");
}

#[actix_web::test]
async fn alert_acknowledges_the_named_resource() {
    let target = Uuid::new_v4();
    let mut command = MockResourceDispatchCommand::new();
    command
        .expect_alert()
        .withf(move |id, location| *id == target && *location == Coordinates::new(-74.0, 40.7))
        .times(1)
        .returning(|id, _| Ok(ack(id, "City Hospital")));

    let (status, body) = send(
        command,
        actix_test::TestRequest::post()
            .uri("/api/v1/resources/alert")
            .set_json(json!({"resourceId": target, "location": {"lat": 40.7, "lon": -74.0}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Alert sent successfully");
    assert_eq!(body["resourceName"], "City Hospital");
    assert_eq!(body["resourceId"], json!(target));
}

#[actix_web::test]
async fn alert_to_unknown_resource_is_not_found() {
    let mut command = MockResourceDispatchCommand::new();
    command
        .expect_alert()
        .times(1)
        .returning(|id, _| Err(Error::not_found(format!("resource {id} not found"))));

    let (status, body) = send(
        command,
        actix_test::TestRequest::post()
            .uri("/api/v1/resources/alert")
            .set_json(json!({"resourceId": Uuid::nil(), "location": {"lat": 1.0, "lon": 1.0}})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case::missing_id(json!({"location": {"lat": 1.0, "lon": 1.0}}), "resourceId", "missing_field")]
#[case::missing_location(json!({"resourceId": Uuid::nil()}), "location", "missing_field")]
#[case::bad_lon(
    json!({"resourceId": Uuid::nil(), "location": {"lat": 1.0, "lon": 200.0}}),
    "location.lon",
    "out_of_range"
)]
#[actix_web::test]
async fn alert_validation_failures(#[case] body: Value, #[case] field: &str, #[case] code: &str) {
    let mut command = MockResourceDispatchCommand::new();
    command.expect_alert().never();

    let (status, payload) = send(
        command,
        actix_test::TestRequest::post()
            .uri("/api/v1/resources/alert")
            .set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["details"]["field"], field);
    assert_eq!(payload["details"]["code"], code);
}

#[actix_web::test]
async fn dispatch_returns_the_selected_resource() {
    let selected = Uuid::new_v4();
    let mut command = MockResourceDispatchCommand::new();
    command
        .expect_dispatch_nearest()
        .withf(|_, max_distance| max_distance.get() == 5_000.0)
        .times(1)
        .returning(move |_, _| Ok(ack(selected, "Shelter")));

    let (status, body) = send(
        command,
        actix_test::TestRequest::post()
            .uri("/api/v1/resources/dispatch")
            .set_json(json!({"location": {"lat": 40.7, "lon": -74.0}, "maxDistanceMeters": 5000})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resourceName"], "Shelter");
}

#[actix_web::test]
async fn dispatch_with_nothing_in_range_is_not_found() {
    let mut command = MockResourceDispatchCommand::new();
    command
        .expect_dispatch_nearest()
        .times(1)
        .returning(|_, _| Err(Error::not_found("no resource found within the requested distance")));

    let (status, _) = send(
        command,
        actix_test::TestRequest::post()
            .uri("/api/v1/resources/dispatch")
            .set_json(json!({"location": {"lat": 40.7, "lon": -74.0}, "maxDistanceMeters": 50})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
