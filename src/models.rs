use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Movie {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub genre: Genre,
    pub director: Director,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Genre {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Director {
    pub name: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: String,
    // Argon2 hash, never the raw password.
    pub password: String,
    pub email: String,
    pub birth: Option<NaiveDate>,
    #[serde(default)]
    pub favorite_movies: Vec<ObjectId>,
}

/// User as returned to clients. The password hash stays in the database.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserResponse {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<NaiveDate>,
    pub favorite_movies: Vec<ObjectId>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            birth: user.birth,
            favorite_movies: user.favorite_movies,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,

    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub password: String,

    pub birth: Option<NaiveDate>,
}

/// Profile update body. `Birthday` is the wire name for the stored `Birth`
/// field; fields left out of the body are left untouched.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub username: Option<String>,

    pub password: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    pub birthday: Option<NaiveDate>,
}

/// Field changes applied to a stored user. `password` is already hashed by
/// the time it gets here.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub birth: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegisterRequest {
        RegisterRequest {
            first_name: Some("Bob".to_string()),
            last_name: Some("Smith".to_string()),
            username: "bob".to_string(),
            email: "b@e.com".to_string(),
            password: "secret".to_string(),
            birth: None,
        }
    }

    #[test]
    fn it_accepts_a_valid_registration() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn it_rejects_a_short_username() {
        let mut request = registration();
        request.username = "bo".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn it_rejects_an_invalid_email() {
        let mut request = registration();
        request.email = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn it_places_no_length_constraint_on_the_password() {
        let mut request = registration();
        request.password = "x".to_string();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn it_validates_only_the_fields_present_in_an_update() {
        let request = UpdateUserRequest {
            username: None,
            password: None,
            email: None,
            birthday: None,
        };
        assert!(request.validate().is_ok());

        let request = UpdateUserRequest {
            username: None,
            password: None,
            email: Some("not-an-email".to_string()),
            birthday: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn it_never_serializes_the_password_hash() {
        let user = User {
            id: None,
            first_name: None,
            last_name: None,
            username: "bob".to_string(),
            password: "$argon2i$...".to_string(),
            email: "b@e.com".to_string(),
            birth: None,
            favorite_movies: vec![],
        };
        let body = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(body.get("Password").is_none());
        assert_eq!(body["Username"], "bob");
    }
}
