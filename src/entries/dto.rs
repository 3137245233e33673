use serde::Deserialize;
use time::Date;
use uuid::Uuid;

/// Form body for `POST /entries`.
#[derive(Debug, Deserialize)]
pub struct NewEntryForm {
    pub user_id: Uuid,
    pub date: Date,
    pub content: String,
}

/// JSON body for `PATCH /entries/{id}`. Content is the only mutable field.
#[derive(Debug, Deserialize)]
pub struct UpdateEntryBody {
    pub content: String,
}
