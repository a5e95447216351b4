use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::{Error, ErrorKind},
    fetch::{Fetch, YearMonth},
    parse::{BoardPost, DayMeal, DietItem, Dinner, Lunch, ScheduleEntry},
    resolve::{seoul, MealRequest, Skhu},
    Result,
};

impl Error {
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Network | ErrorKind::Encoding => StatusCode::BAD_GATEWAY,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Invalid => StatusCode::BAD_REQUEST,
            ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        log::warn!("{status}: {self}");
        let error = self.to_string();
        (status, Json(ErrorMessage { error })).into_response()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorMessage {
    error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MealIds {
    data: Vec<BoardPost>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MealData {
    data: Vec<DayMeal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Schedules {
    schedules: Vec<ScheduleEntry>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MealParams {
    /// Board post id; without it the post covering today is used.
    id: Option<String>,
    /// Weekday, 1 (Monday) to 5 (Friday).
    day: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "SKHUINFO", version = "0.1"),
    servers((url = "/api/v1")),
    paths(meal_ids, meal_data, current_schedules, monthly_schedules),
    components(schemas(
        ErrorMessage,
        MealIds,
        MealData,
        Schedules,
        BoardPost,
        DayMeal,
        Lunch,
        Dinner,
        DietItem,
        ScheduleEntry
    ))
)]
struct ApiDoc;

#[utoipa::path(
    get,
    path = "/meal/ids",
    responses(
        (status = 200, description = "Posts on the meal board", body = MealIds),
        (status = 502, description = "Board unreachable or undecodable", body = ErrorMessage)
    )
)]
pub async fn meal_ids<F: Fetch>(State(skhu): State<Arc<Skhu<F>>>) -> Result<Json<MealIds>> {
    let data = skhu.meal_ids().await?;
    Ok(Json(MealIds { data }))
}

#[utoipa::path(
    get,
    path = "/meal/get",
    params(MealParams),
    responses(
        (status = 200, description = "A week, or one day, of meals", body = MealData),
        (status = 400, description = "id or day is not an integer", body = ErrorMessage),
        (status = 404, description = "No post covers the day, or day is out of range", body = ErrorMessage),
        (status = 502, description = "Board unreachable or undecodable", body = ErrorMessage)
    )
)]
pub async fn meal_data<F: Fetch>(
    State(skhu): State<Arc<Skhu<F>>>,
    Query(params): Query<MealParams>,
) -> Result<Json<MealData>> {
    let request = MealRequest::from_params(params.id.as_deref(), params.day.as_deref())?;
    let now = Utc::now().with_timezone(&seoul());
    let data = skhu.meals(request, now).await?;
    Ok(Json(MealData { data }))
}

#[utoipa::path(
    get,
    path = "/schedules",
    responses(
        (status = 200, description = "This month's academic schedule", body = Schedules),
        (status = 502, description = "Calendar unreachable or undecodable", body = ErrorMessage)
    )
)]
pub async fn current_schedules<F: Fetch>(
    State(skhu): State<Arc<Skhu<F>>>,
) -> Result<Json<Schedules>> {
    let schedules = skhu.schedules(None).await?;
    Ok(Json(Schedules { schedules }))
}

#[utoipa::path(
    get,
    path = "/schedules/{year}/{month}",
    params(
        ("year" = String, Path, description = "Four digit year"),
        ("month" = String, Path, description = "Month, 1 to 12")
    ),
    responses(
        (status = 200, description = "The academic schedule for that month", body = Schedules),
        (status = 400, description = "year or month is not valid", body = ErrorMessage),
        (status = 502, description = "Calendar unreachable or undecodable", body = ErrorMessage)
    )
)]
pub async fn monthly_schedules<F: Fetch>(
    State(skhu): State<Arc<Skhu<F>>>,
    Path((year, month)): Path<(String, String)>,
) -> Result<Json<Schedules>> {
    let month = parse_year_month(&year, &month)?;
    let schedules = skhu.schedules(Some(month)).await?;
    Ok(Json(Schedules { schedules }))
}

fn parse_year_month(year: &str, month: &str) -> Result<YearMonth> {
    let year = year
        .parse::<i32>()
        .map_err(|_| Error::invalid(format!("year {year:?} is not an integer")))?;
    let month = month
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| Error::invalid(format!("month {month:?} is not between 1 and 12")))?;
    Ok(YearMonth { year, month })
}

pub fn router<F: Fetch + 'static>(skhu: Arc<Skhu<F>>) -> Router {
    let compression_layer: CompressionLayer = CompressionLayer::new()
        .br(true)
        .deflate(true)
        .gzip(true)
        .zstd(true);
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    let v1 = Router::new()
        .route("/meal/ids", get(meal_ids::<F>))
        .route("/meal/get", get(meal_data::<F>))
        .route("/schedules", get(current_schedules::<F>))
        .route("/schedules/:year/:month", get(monthly_schedules::<F>))
        .with_state(skhu);

    Router::new()
        .nest("/api/v1", v1)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer)
        .layer(compression_layer)
}
