use axum::{middleware, routing::get, Router};

use crate::{middleware::method_not_allowed::method_not_allowed, state::ApiState};

pub fn app(state: ApiState) -> Router<ApiState> {
    Router::<ApiState>::new()
        .route(
            "/",
            get(super::get_book::get_books)
                .post(super::create_book::create_book)
                .put(super::update_book::put_book)
                .patch(super::update_book::patch_book)
                .delete(super::delete_book::delete_book),
        )
        .route_layer(middleware::from_fn_with_state(state, method_not_allowed))
}
