use axum::Json;
use utoipa::OpenApi;

use crate::{
    book::Book,
    route::books::{self, MessageResponse},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        books::get_book::get_books,
        books::create_book::create_book,
        books::update_book::put_book,
        books::update_book::patch_book,
        books::delete_book::delete_book,
    ),
    components(schemas(Book, MessageResponse)),
    tags((name = "books", description = "Book records kept in a single JSON file"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
