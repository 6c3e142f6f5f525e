use std::sync::Arc;

use actix_web::web::{Data, Json, Path};
use log::debug;

use crate::database::Database;
use crate::errors::ApiError;
use crate::errors::ApiError::NotFound;
use crate::helpers::respond_json;
use crate::models::{Director, Genre, Movie};
use crate::server::AppState;

pub async fn get_movies(state: Data<AppState>) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.db.find_movies().await?;
    respond_json(movies)
}

pub async fn get_movie(
    state: Data<AppState>,
    path: Path<String>,
) -> Result<Json<Option<Movie>>, ApiError> {
    let title = path.into_inner();
    // A missing title is not an error here, the body is simply null.
    let movie = state.db.find_movie_by_title(&title).await?;
    respond_json(movie)
}

pub async fn get_genre(state: Data<AppState>, path: Path<String>) -> Result<Json<Genre>, ApiError> {
    let title = path.into_inner();
    let movie = find_movie_by_title(&state.db, &title).await?;
    respond_json(movie.genre)
}

pub async fn get_director(
    state: Data<AppState>,
    path: Path<String>,
) -> Result<Json<Director>, ApiError> {
    let name = path.into_inner();
    match state.db.find_movie_by_director(&name).await? {
        Some(movie) => respond_json(movie.director),
        None => {
            debug!("get_director - no movie with director. name: {}", &name);
            Err(NotFound)
        }
    }
}

async fn find_movie_by_title(db: &Arc<dyn Database>, title: &str) -> Result<Movie, ApiError> {
    match db.find_movie_by_title(title).await? {
        Some(movie) => Ok(movie),
        None => {
            debug!("find_movie_by_title - no such movie. title: {}", title);
            Err(NotFound)
        }
    }
}
