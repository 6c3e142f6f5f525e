use actix_web::web::Json;
use actix_web::HttpResponse;
use serde::Serialize;

use crate::errors::ApiError;
use crate::models::MessageResponse;

pub fn respond_json<T>(data: T) -> Result<Json<T>, ApiError>
where
    T: Serialize,
{
    Ok(Json(data))
}

pub fn respond_created<T>(data: T) -> Result<HttpResponse, ApiError>
where
    T: Serialize,
{
    Ok(HttpResponse::Created().json(data))
}

pub fn respond_message(message: String) -> Result<Json<MessageResponse>, ApiError> {
    Ok(Json(MessageResponse { message }))
}
