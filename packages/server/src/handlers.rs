//! HTTP handler functions for the nightfall API.

use actix_web::{HttpResponse, web};
use nightfall_geography::{GeographyError, links};
use nightfall_safety::SafetyError;
use nightfall_server_models::{
    ApiAssessment, ApiCity, ApiError, ApiHealth, ApiIncident, AssessQueryParams, CityQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        incident_count: state.service.store().len(),
    })
}

/// `GET /api/cities`
///
/// Lists the selectable cities in registry order.
pub async fn cities(state: web::Data<AppState>) -> HttpResponse {
    let cities: Vec<ApiCity> = state
        .service
        .city_summaries()
        .into_iter()
        .map(|summary| ApiCity {
            name: summary.city.name.clone(),
            latitude: summary.city.latitude,
            longitude: summary.city.longitude,
            incident_count: summary.incident_count,
            view_url: links::view_url(summary.city.coordinate()),
            embed_url: links::embed_url(&summary.city.name),
        })
        .collect();

    HttpResponse::Ok().json(cities)
}

/// `GET /api/incidents?city=..`
///
/// Returns the city's incidents in dataset order with marker styles.
pub async fn incidents(
    state: web::Data<AppState>,
    params: web::Query<CityQueryParams>,
) -> HttpResponse {
    match state.service.incidents_for(&params.city) {
        Ok(incidents) => {
            let api: Vec<ApiIncident> = incidents.into_iter().map(ApiIncident::from).collect();
            HttpResponse::Ok().json(api)
        }
        Err(e) => error_response(&e),
    }
}

/// `GET /api/heatmap?city=..`
///
/// Returns `[latitude, longitude, weight]` samples for the city.
pub async fn heatmap(
    state: web::Data<AppState>,
    params: web::Query<CityQueryParams>,
) -> HttpResponse {
    match state.service.heatmap(&params.city) {
        Ok(points) => HttpResponse::Ok().json(points),
        Err(e) => error_response(&e),
    }
}

/// `GET /api/assess?city=..&lat=..&lon=..`
///
/// Scores the user position. A missing `lat` or `lon` falls back to the
/// matching component of the city reference point.
pub async fn assess(
    state: web::Data<AppState>,
    params: web::Query<AssessQueryParams>,
) -> HttpResponse {
    let service = &state.service;

    let position = match service.resolve_position(&params.city, params.lat, params.lon) {
        Ok(position) => position,
        Err(e) => return error_response(&e),
    };

    match service.evaluate(&params.city, position) {
        Ok(eval) => HttpResponse::Ok().json(ApiAssessment {
            city: eval.city.name.clone(),
            latitude: eval.assessment.position.latitude,
            longitude: eval.assessment.position.longitude,
            score: eval.assessment.score,
            tier: eval.assessment.tier,
            label: eval.assessment.tier.to_string(),
            advisory: eval.assessment.tier.advisory().to_string(),
            level: eval.assessment.tier.level().to_string(),
            nearby_count: eval.assessment.nearby_count,
            radius_km: service.scorer().radius_km(),
            incident_count: eval.incidents.len(),
            view_url: eval.view_url,
            safety_directions_url: eval.safety_directions_url,
        }),
        Err(e) => error_response(&e),
    }
}

fn error_response(e: &SafetyError) -> HttpResponse {
    let body = ApiError {
        error: e.to_string(),
    };
    match e {
        SafetyError::Geography(GeographyError::UnknownCity { .. }) => {
            HttpResponse::NotFound().json(body)
        }
        SafetyError::InvalidPosition { .. } => HttpResponse::BadRequest().json(body),
        _ => {
            log::error!("Request failed: {e}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use nightfall_geography::CityRegistry;
    use nightfall_incident_models::{RiskTier, Severity};
    use nightfall_risk::RiskScorer;
    use nightfall_safety::SafetyService;
    use nightfall_store::IncidentStore;

    use super::*;
    use crate::configure;

    const DATA: &str = r#"[
        {"city": "Ajmer", "type": "robbery", "severity": "High", "latitude": 26.4499, "longitude": 74.6399},
        {"city": "Ajmer", "type": "harassment", "severity": "Medium", "latitude": 26.4505, "longitude": 74.6405},
        {"city": "Ajmer", "type": "theft", "severity": "Low", "latitude": 26.4495, "longitude": 74.6395},
        {"city": "Delhi", "type": "theft", "severity": "Low", "latitude": 28.6139, "longitude": 77.2090}
    ]"#;

    fn state() -> web::Data<AppState> {
        let service = SafetyService::new(
            IncidentStore::from_json_str(DATA).unwrap(),
            CityRegistry::builtin(),
            RiskScorer::default(),
        );
        web::Data::new(AppState {
            service: Arc::new(service),
        })
    }

    #[actix_web::test]
    async fn health_reports_incident_count() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: ApiHealth = test::call_and_read_body_json(&app, req).await;
        assert!(body.healthy);
        assert_eq!(body.incident_count, 4);
    }

    #[actix_web::test]
    async fn cities_in_registry_order() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/cities").to_request();
        let body: Vec<ApiCity> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> = body.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ajmer", "Jaipur", "Delhi", "Mumbai", "Bangalore"]);
        assert_eq!(body[0].incident_count, 3);
        assert_eq!(
            body[2].embed_url,
            "https://www.google.com/maps?q=Delhi&output=embed"
        );
    }

    #[actix_web::test]
    async fn incidents_filtered_by_city() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/incidents?city=Ajmer")
            .to_request();
        let body: Vec<ApiIncident> = test::call_and_read_body_json(&app, req).await;
        let types: Vec<&str> = body.iter().map(|i| i.incident_type.as_str()).collect();
        assert_eq!(types, vec!["robbery", "harassment", "theft"]);
        assert_eq!(body[1].severity, Severity::Medium);
        assert_eq!(body[1].marker_radius, 7);
    }

    #[actix_web::test]
    async fn unknown_city_is_not_found() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        for uri in [
            "/api/incidents?city=Atlantis",
            "/api/heatmap?city=Atlantis",
            "/api/assess?city=Atlantis",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[actix_web::test]
    async fn assess_at_city_center() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/assess?city=Ajmer")
            .to_request();
        let body: ApiAssessment = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.score, 6);
        assert_eq!(body.tier, RiskTier::High);
        assert_eq!(body.label, "HIGH RISK");
        assert_eq!(body.advisory, "Avoid this area");
        assert_eq!(body.nearby_count, 3);
        assert_eq!(body.incident_count, 3);
    }

    #[actix_web::test]
    async fn assess_far_away_is_safe() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/assess?city=Ajmer&lat=26.5&lon=74.7")
            .to_request();
        let body: ApiAssessment = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.score, 0);
        assert_eq!(body.label, "Relatively safe");
        assert_eq!(
            body.safety_directions_url,
            "https://www.google.com/maps/dir/26.5,74.7/26.4499,74.6399"
        );
    }

    #[actix_web::test]
    async fn assess_partial_position_uses_city_component() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/assess?city=Ajmer&lat=26.6")
            .to_request();
        let body: ApiAssessment = test::call_and_read_body_json(&app, req).await;
        assert!((body.latitude - 26.6).abs() < f64::EPSILON);
        assert!((body.longitude - 74.6399).abs() < f64::EPSILON);
    }

    #[actix_web::test]
    async fn assess_non_finite_position_is_bad_request() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        for uri in [
            "/api/assess?city=Ajmer&lat=NaN",
            "/api/assess?city=Ajmer&lon=inf",
            "/api/assess?city=Ajmer&lat=26.45&lon=-inf",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
            let body: ApiError = test::read_body_json(resp).await;
            assert!(body.error.starts_with("Invalid position"), "{}", body.error);
        }
    }

    #[actix_web::test]
    async fn unrecognized_severity_is_returned_as_loaded() {
        let service = SafetyService::new(
            IncidentStore::from_json_str(
                r#"[{"city": "Delhi", "type": "theft", "severity": "Critical", "latitude": 28.6139, "longitude": 77.2090}]"#,
            )
            .unwrap(),
            CityRegistry::builtin(),
            RiskScorer::default(),
        );
        let state = web::Data::new(AppState {
            service: Arc::new(service),
        });
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/incidents?city=Delhi")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body[0]["severity"], "Critical");
        assert_eq!(body[0]["markerRadius"], 5);
    }

    #[actix_web::test]
    async fn heatmap_weights_by_severity() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/heatmap?city=Ajmer")
            .to_request();
        let body: Vec<[f64; 3]> = test::call_and_read_body_json(&app, req).await;
        let weights: Vec<f64> = body.iter().map(|p| p[2]).collect();
        assert_eq!(weights, vec![1.0, 0.6, 0.3]);
    }

    #[actix_web::test]
    async fn missing_city_param_is_bad_request() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/assess").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
