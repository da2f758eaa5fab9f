pub mod api;
pub mod server;
pub mod validation;

pub use server::{routes, WebServer};
pub use validation::CandleQuery;
