use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Client, Collection};

use crate::config::CONFIG;
use crate::models::{Movie, User, UserChanges};

pub type StoreResult<T> = Result<T, mongodb::error::Error>;

/// Store operations the handlers depend on, one method per route-level
/// query. Handlers only ever see this trait, never the driver.
#[async_trait]
pub trait Database: Send + Sync {
    async fn find_movies(&self) -> StoreResult<Vec<Movie>>;
    async fn find_movie_by_title(&self, title: &str) -> StoreResult<Option<Movie>>;
    async fn find_movie_by_director(&self, name: &str) -> StoreResult<Option<Movie>>;
    async fn find_users(&self) -> StoreResult<Vec<User>>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn insert_user(&self, user: User) -> StoreResult<User>;
    async fn update_user(&self, username: &str, changes: UserChanges) -> StoreResult<Option<User>>;
    async fn push_favorite_movie(&self, username: &str, movie_id: ObjectId)
        -> StoreResult<Option<User>>;
    async fn pull_favorite_movie(&self, username: &str, movie_id: ObjectId)
        -> StoreResult<Option<User>>;
    async fn delete_user(&self, username: &str) -> StoreResult<Option<User>>;
}

pub struct MongoDatabase {
    movies: Collection<Movie>,
    users: Collection<User>,
}

pub async fn create_pool() -> StoreResult<Arc<dyn Database>> {
    let options = ClientOptions::parse(&CONFIG.database_url).await?;
    let client = Client::with_options(options)?;
    let database = client.database(&CONFIG.database_name);
    Ok(Arc::new(MongoDatabase {
        movies: database.collection("movies"),
        users: database.collection("users"),
    }))
}

fn return_updated() -> FindOneAndUpdateOptions {
    FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build()
}

#[async_trait]
impl Database for MongoDatabase {
    async fn find_movies(&self) -> StoreResult<Vec<Movie>> {
        self.movies.find(None, None).await?.try_collect().await
    }

    async fn find_movie_by_title(&self, title: &str) -> StoreResult<Option<Movie>> {
        self.movies.find_one(doc! { "Title": title }, None).await
    }

    async fn find_movie_by_director(&self, name: &str) -> StoreResult<Option<Movie>> {
        self.movies
            .find_one(doc! { "Director.Name": name }, None)
            .await
    }

    async fn find_users(&self) -> StoreResult<Vec<User>> {
        self.users.find(None, None).await?.try_collect().await
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.users.find_one(doc! { "Username": username }, None).await
    }

    async fn insert_user(&self, mut user: User) -> StoreResult<User> {
        let result = self.users.insert_one(&user, None).await?;
        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    async fn update_user(&self, username: &str, changes: UserChanges) -> StoreResult<Option<User>> {
        let mut set = doc! {};
        if let Some(new_username) = changes.username {
            set.insert("Username", new_username);
        }
        if let Some(password) = changes.password {
            set.insert("Password", password);
        }
        if let Some(email) = changes.email {
            set.insert("Email", email);
        }
        if let Some(birth) = changes.birth {
            set.insert("Birth", birth.to_string());
        }
        // An empty $set is a driver error.
        if set.is_empty() {
            return self.users.find_one(doc! { "Username": username }, None).await;
        }
        self.users
            .find_one_and_update(
                doc! { "Username": username },
                doc! { "$set": set },
                return_updated(),
            )
            .await
    }

    async fn push_favorite_movie(
        &self,
        username: &str,
        movie_id: ObjectId,
    ) -> StoreResult<Option<User>> {
        self.users
            .find_one_and_update(
                doc! { "Username": username },
                doc! { "$push": { "FavoriteMovies": movie_id } },
                return_updated(),
            )
            .await
    }

    async fn pull_favorite_movie(
        &self,
        username: &str,
        movie_id: ObjectId,
    ) -> StoreResult<Option<User>> {
        self.users
            .find_one_and_update(
                doc! { "Username": username },
                doc! { "$pull": { "FavoriteMovies": movie_id } },
                return_updated(),
            )
            .await
    }

    async fn delete_user(&self, username: &str) -> StoreResult<Option<User>> {
        self.users
            .find_one_and_delete(doc! { "Username": username }, None)
            .await
    }
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    /// In-memory stand-in injected through the same `Arc<dyn Database>`
    /// seam the real store uses.
    #[derive(Default)]
    pub struct MockDatabase {
        movies: Vec<Movie>,
        users: Mutex<Vec<User>>,
    }

    impl MockDatabase {
        pub fn with_movies(movies: Vec<Movie>) -> Self {
            MockDatabase {
                movies,
                users: Mutex::new(Vec::new()),
            }
        }

        pub fn with_users(users: Vec<User>) -> Self {
            MockDatabase {
                movies: Vec::new(),
                users: Mutex::new(users),
            }
        }
    }

    #[async_trait]
    impl Database for MockDatabase {
        async fn find_movies(&self) -> StoreResult<Vec<Movie>> {
            Ok(self.movies.clone())
        }

        async fn find_movie_by_title(&self, title: &str) -> StoreResult<Option<Movie>> {
            Ok(self.movies.iter().find(|m| m.title == title).cloned())
        }

        async fn find_movie_by_director(&self, name: &str) -> StoreResult<Option<Movie>> {
            Ok(self.movies.iter().find(|m| m.director.name == name).cloned())
        }

        async fn find_users(&self) -> StoreResult<Vec<User>> {
            Ok(self.users.lock().unwrap().clone())
        }

        async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn insert_user(&self, mut user: User) -> StoreResult<User> {
            user.id = Some(ObjectId::new());
            self.users.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn update_user(
            &self,
            username: &str,
            changes: UserChanges,
        ) -> StoreResult<Option<User>> {
            let mut users = self.users.lock().unwrap();
            match users.iter_mut().find(|u| u.username == username) {
                Some(user) => {
                    if let Some(new_username) = changes.username {
                        user.username = new_username;
                    }
                    if let Some(password) = changes.password {
                        user.password = password;
                    }
                    if let Some(email) = changes.email {
                        user.email = email;
                    }
                    if let Some(birth) = changes.birth {
                        user.birth = Some(birth);
                    }
                    Ok(Some(user.clone()))
                }
                None => Ok(None),
            }
        }

        async fn push_favorite_movie(
            &self,
            username: &str,
            movie_id: ObjectId,
        ) -> StoreResult<Option<User>> {
            let mut users = self.users.lock().unwrap();
            match users.iter_mut().find(|u| u.username == username) {
                Some(user) => {
                    user.favorite_movies.push(movie_id);
                    Ok(Some(user.clone()))
                }
                None => Ok(None),
            }
        }

        async fn pull_favorite_movie(
            &self,
            username: &str,
            movie_id: ObjectId,
        ) -> StoreResult<Option<User>> {
            let mut users = self.users.lock().unwrap();
            match users.iter_mut().find(|u| u.username == username) {
                Some(user) => {
                    user.favorite_movies.retain(|id| *id != movie_id);
                    Ok(Some(user.clone()))
                }
                None => Ok(None),
            }
        }

        async fn delete_user(&self, username: &str) -> StoreResult<Option<User>> {
            let mut users = self.users.lock().unwrap();
            match users.iter().position(|u| u.username == username) {
                Some(index) => Ok(Some(users.remove(index))),
                None => Ok(None),
            }
        }
    }
}
