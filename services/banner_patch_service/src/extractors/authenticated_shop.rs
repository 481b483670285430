use axum::extract::FromRequestParts;
use axum_extra::extract::CookieJar;
use http::request::Parts;
use theme_asset_client::ShopAccess;

use crate::{error::Error, state::ServiceState};

/// Shop credentials of the session named by the session cookie.
pub struct AuthenticatedShop(pub ShopAccess);

impl FromRequestParts<ServiceState> for AuthenticatedShop {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(session_id) = jar
            .get(&state.args.session_cookie)
            .map(|c| c.value().to_string())
        else {
            return Err(Error::authentication());
        };

        let session = state.provider.session_store().load(&session_id).await?;

        session
            .and_then(|s| s.shop_access())
            .map(AuthenticatedShop)
            .ok_or_else(Error::authentication)
    }
}
