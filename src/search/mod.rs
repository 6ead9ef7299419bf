pub mod controller;
pub mod model;
pub mod render;

pub use controller::{FETCH_ERROR_MESSAGE, Resolution, SearchController, SearchState, SearchTicket};
pub use model::ResultRecord;
pub use render::{Artwork, ResultCard, render_results};
