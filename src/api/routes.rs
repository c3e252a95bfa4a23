//! Route Endpoints

use reqwest::Method;
use route_board_core::{async_trait, Route, RouteId, Status, StatusUpdateApi, UpdateError};
use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::config::RouteFilter;

#[derive(Serialize)]
struct UpdateStatusArgs {
    status: Status,
}

impl ApiClient {
    /// `GET routes/` with the configured filters
    pub async fn list_routes(&self, filter: &RouteFilter) -> Result<Vec<Route>, ApiError> {
        let builder = self.request(Method::GET, "routes/").query(&filter.query_pairs());
        Self::send(builder).await
    }

    /// `PATCH routes/{id}/update_status/`, returning the updated route
    pub async fn update_route_status(&self, id: RouteId, status: Status) -> Result<Route, ApiError> {
        let builder = self
            .request(Method::PATCH, &format!("routes/{}/update_status/", id))
            .json(&UpdateStatusArgs { status });
        Self::send(builder).await
    }
}

#[async_trait(?Send)]
impl StatusUpdateApi for ApiClient {
    async fn update_status(&self, route_id: RouteId, status: Status) -> Result<(), UpdateError> {
        self.update_route_status(route_id, status)
            .await
            .map(|_| ())
            .map_err(|err| UpdateError::new(err.to_string()))
    }
}
