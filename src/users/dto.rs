use serde::Deserialize;

/// Form body for `POST /create`.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: i32,
}

/// Form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query string for `GET /login`.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}
