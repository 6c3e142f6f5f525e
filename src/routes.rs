use actix_web::web;
use actix_web::HttpResponse;
use crate::movies::{get_director, get_genre, get_movie, get_movies};
use crate::users::{
    add_favorite_movie, delete_user, get_user, get_users, register, remove_favorite_movie,
    update_user,
};

async fn welcome() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("<h1>Welcome to the Movie Database</h1>")
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(welcome))
        .service(
            web::scope("/movies")
                .route("", web::get().to(get_movies))
                // Literal segments must register ahead of the title match.
                .route("/genres/{title}", web::get().to(get_genre))
                .route("/directors/{name}", web::get().to(get_director))
                .route("/{title}", web::get().to(get_movie)),
        )
        .service(
            web::scope("/users")
                .route("", web::get().to(get_users))
                .route("", web::post().to(register))
                .route("/{username}", web::get().to(get_user))
                .route("/{username}", web::put().to(update_user))
                .route("/{username}", web::delete().to(delete_user))
                .route(
                    "/{username}/Movies/{movie_id}",
                    web::post().to(add_favorite_movie),
                )
                .route(
                    "/{username}/Movies/{movie_id}",
                    web::delete().to(remove_favorite_movie),
                ),
        );
}
