pub mod http;
pub mod web;
pub mod youtube;

pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use web::fetch_webpage;
pub use youtube::fetch_youtube;
