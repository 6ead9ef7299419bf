use crate::{http::ApiError, search::model::ResultRecord};

#[derive(Debug, Clone)]
pub enum Event {
    SearchResolved {
        seq: u64,
        outcome: Result<Vec<ResultRecord>, ApiError>,
    },
}
