use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        employees::{
            create_employee, delete_employee, get_employee, list_employee_vacations,
            list_employees, update_employee,
        },
        health::livez,
        vacations::{
            create_vacation, delete_vacation, get_vacation, list_pending_vacations,
            list_vacations, request_vacation, set_vacation_approval,
        },
    },
    state::AppState,
};

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee)
                .patch(update_employee)
                .delete(delete_employee),
        )
        .route("/employees/{id}/vacations", get(list_employee_vacations))
        .route("/vacations", get(list_vacations).post(create_vacation))
        .route("/vacations/pending", get(list_pending_vacations))
        .route("/vacations/requests", post(request_vacation))
        .route(
            "/vacations/{id}",
            get(get_vacation).delete(delete_vacation),
        )
        .route("/vacations/{id}/approval", put(set_vacation_approval))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
