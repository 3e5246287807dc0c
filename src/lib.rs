mod api_doc;
pub mod book;
pub mod cli_args;
pub mod error;
mod extractor;
pub mod library;
mod middleware;
mod route;
pub mod server;
mod state;
pub mod store;
