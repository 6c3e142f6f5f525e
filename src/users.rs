use actix_web::web::{Data, Json, Path};
use actix_web::HttpResponse;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version};
use log::{debug, error};
use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::errors::ApiError;
use crate::errors::ApiError::{InternalServerError, UsernameAlreadyExist};
use crate::helpers::{respond_created, respond_json, respond_message};
use crate::models::{
    MessageResponse, RegisterRequest, UpdateUserRequest, User, UserChanges, UserResponse,
};
use crate::server::AppState;

pub async fn get_users(state: Data<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.db.find_users().await?;
    respond_json(users.into_iter().map(UserResponse::from).collect())
}

pub async fn get_user(
    state: Data<AppState>,
    path: Path<String>,
) -> Result<Json<Option<UserResponse>>, ApiError> {
    let username = path.into_inner();
    // A missing username is not an error here, the body is simply null.
    let user = state.db.find_user_by_username(&username).await?;
    respond_json(user.map(UserResponse::from))
}

pub async fn register(
    state: Data<AppState>,
    body: Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // Existence pre-check, not a storage constraint. Two registrations
    // racing on the same username can still both get through it.
    if state
        .db
        .find_user_by_username(&body.username)
        .await?
        .is_some()
    {
        debug!("register - username taken: {}", &body.username);
        return Err(UsernameAlreadyExist(body.username.clone()));
    }

    let hashed_password = hash_password(&body.password).await.map_err(|_| {
        error!("Password hashing failed");
        InternalServerError
    })?;

    let body = body.into_inner();
    let user = User {
        id: None,
        first_name: body.first_name,
        last_name: body.last_name,
        username: body.username,
        password: hashed_password,
        email: body.email,
        birth: body.birth,
        favorite_movies: Vec::new(),
    };

    let created = state.db.insert_user(user).await?;
    respond_created(UserResponse::from(created))
}

pub async fn update_user(
    state: Data<AppState>,
    path: Path<String>,
    body: Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let username = path.into_inner();
    body.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let body = body.into_inner();
    let password = match body.password {
        Some(password) => Some(hash_password(&password).await.map_err(|_| {
            error!("Password hashing failed");
            InternalServerError
        })?),
        None => None,
    };

    let changes = UserChanges {
        username: body.username,
        password,
        email: body.email,
        birth: body.birthday,
    };

    match state.db.update_user(&username, changes).await? {
        Some(user) => respond_json(UserResponse::from(user)),
        None => {
            debug!("update_user - user not found: {}", &username);
            Err(ApiError::BadRequest(format!("{} was not found", username)))
        }
    }
}

pub async fn add_favorite_movie(
    state: Data<AppState>,
    path: Path<(String, String)>,
) -> Result<Json<UserResponse>, ApiError> {
    let (username, movie_id) = path.into_inner();
    let movie_id = parse_movie_id(&movie_id)?;

    match state.db.push_favorite_movie(&username, movie_id).await? {
        Some(user) => respond_json(UserResponse::from(user)),
        None => {
            debug!("add_favorite_movie - user not found: {}", &username);
            Err(ApiError::BadRequest(format!("{} was not found", username)))
        }
    }
}

pub async fn remove_favorite_movie(
    state: Data<AppState>,
    path: Path<(String, String)>,
) -> Result<Json<UserResponse>, ApiError> {
    let (username, movie_id) = path.into_inner();
    let movie_id = parse_movie_id(&movie_id)?;

    // Scoped to the addressed user only.
    match state.db.pull_favorite_movie(&username, movie_id).await? {
        Some(user) => respond_json(UserResponse::from(user)),
        None => {
            debug!("remove_favorite_movie - user not found: {}", &username);
            Err(ApiError::BadRequest(format!("{} was not found", username)))
        }
    }
}

pub async fn delete_user(
    state: Data<AppState>,
    path: Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let username = path.into_inner();
    match state.db.delete_user(&username).await? {
        Some(_) => respond_message(format!("{} was deleted.", username)),
        None => {
            debug!("delete_user - user not found: {}", &username);
            Err(ApiError::BadRequest(format!("{} was not found", username)))
        }
    }
}

async fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let params = Params::new(1024, 2, 1, Some(32)).unwrap();
    let argon2 = Argon2::new(Algorithm::Argon2i, Version::V0x13, params);
    let hashed_password = argon2.hash_password(password.as_bytes(), &salt)?.to_string();
    Ok(hashed_password)
}

fn parse_movie_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| {
        debug!("parse_movie_id - malformed id: {}", raw);
        ApiError::BadRequest(format!("{} is not a valid movie id", raw))
    })
}
