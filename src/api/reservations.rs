//! Reservation calls

use reqwest::Method;

use crate::{
    error::AppResult,
    models::{Reservation, ReservationId, ReservationList, ReturnConfirmation},
};

use super::ApiClient;

impl ApiClient {
    /// Get the session user's checked-out books
    pub async fn fetch_reservations(&self, token: &str) -> AppResult<Vec<Reservation>> {
        let builder = self.request(Method::GET, "/reservations", Some(token));
        let list: ReservationList = self
            .send(builder)
            .await
            .inspect_err(|e| tracing::error!("Error fetching reservations: {}", e))?;

        Ok(list.into_vec())
    }

    /// Return a checked-out book
    pub async fn delete_reservation(
        &self,
        id: ReservationId,
        token: &str,
    ) -> AppResult<ReturnConfirmation> {
        let builder = self.request(Method::DELETE, &format!("/reservations/{}", id), Some(token));
        let confirmation = self
            .send_or_default(builder)
            .await
            .inspect_err(|e| tracing::error!("Error returning reservation {}: {}", id, e))?;

        tracing::info!("Reservation {} returned", id);
        Ok(confirmation)
    }
}
