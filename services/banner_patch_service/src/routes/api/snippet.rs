use axum::{Json, extract::State};
use axum_extra::routing::TypedPath;
use garde::Validate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::Error,
    extractors::{AuthenticatedShop, FormFields},
    response::body::{ErrorBody, SuccessBody},
    services::BannerContent,
    state::ServiceState,
};

#[derive(TypedPath, Deserialize, Debug)]
#[typed_path("/snippet")]
pub struct PostSnippetPath;

/// Raw form fields, all optional so missing ones surface as validation errors.
#[derive(Deserialize, Debug, Default, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnippetForm {
    #[garde(required)]
    pub headline_text: Option<String>,

    #[garde(required)]
    pub image_url: Option<String>,

    #[garde(required)]
    pub button_url: Option<String>,

    /// Defaults to "Learn more".
    #[garde(skip)]
    pub button_text: Option<String>,
}

impl TryFrom<&FormFields> for SnippetForm {
    type Error = Error;

    fn try_from(fields: &FormFields) -> Result<Self, Self::Error> {
        Ok(Self {
            headline_text: fields.text("headlineText")?,
            image_url: fields.text("imageUrl")?,
            button_url: fields.text("buttonUrl")?,
            button_text: fields.text("buttonText")?,
        })
    }
}

impl TryFrom<SnippetForm> for BannerContent {
    type Error = Error;

    fn try_from(form: SnippetForm) -> Result<Self, Self::Error> {
        form.validate()
            .map_err(|report| Error::validation(report.to_string()))?;

        let SnippetForm {
            headline_text: Some(headline_text),
            image_url: Some(image_url),
            button_url: Some(button_url),
            button_text,
        } = form
        else {
            return Err(Error::validation("missing required field"));
        };

        Ok(BannerContent::new(
            headline_text,
            image_url,
            button_url,
            button_text,
        ))
    }
}

#[utoipa::path(
    post,
    path = "/snippet",
    description = "Write the banner snippet to the live theme and reference it from the target section",
    params(
        ("Cookie" = String, Header, description = "Session cookie"),
    ),
    request_body(
        content(
            (SnippetForm = "application/x-www-form-urlencoded"),
            (SnippetForm = "multipart/form-data"),
        ),
    ),
    responses(
        (status = OK, description = "Success", body = SuccessBody),
        (status = BAD_REQUEST, description = "Invalid form data", body = ErrorBody),
        (status = UNAUTHORIZED, description = "Not authenticated", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Theme or section could not be resolved, or a remote call failed", body = ErrorBody),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn post_snippet(
    _: PostSnippetPath,
    State(state): State<ServiceState>,
    AuthenticatedShop(shop): AuthenticatedShop,
    fields: FormFields,
) -> Result<Json<SuccessBody>, Error> {
    let banner = BannerContent::try_from(SnippetForm::try_from(&fields)?)?;

    let outcome = state.provider.asset_patcher().patch(&shop, &banner).await?;

    tracing::info!(
        shop = %shop.shop,
        theme_id = outcome.theme_id,
        section = %outcome.section,
        "banner snippet applied"
    );

    Ok(Json(SuccessBody::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, extractors::FormValue};

    fn form(
        headline: Option<&str>,
        image: Option<&str>,
        button: Option<&str>,
    ) -> SnippetForm {
        SnippetForm {
            headline_text: headline.map(str::to_string),
            image_url: image.map(str::to_string),
            button_url: button.map(str::to_string),
            button_text: None,
        }
    }

    #[test]
    fn test_complete_form() {
        let banner = BannerContent::try_from(form(
            Some("Sale"),
            Some("https://x/img.png"),
            Some("https://x/shop"),
        ))
        .expect("should be valid");

        assert_eq!(
            banner,
            BannerContent::new("Sale", "https://x/img.png", "https://x/shop", None)
        );
    }

    #[test]
    fn test_empty_strings_are_accepted() {
        assert!(BannerContent::try_from(form(Some(""), Some(""), Some(""))).is_ok());
    }

    #[test]
    fn test_each_required_field() {
        let cases = [
            form(None, Some("i"), Some("b")),
            form(Some("h"), None, Some("b")),
            form(Some("h"), Some("i"), None),
        ];

        for case in cases {
            let err = BannerContent::try_from(case).expect_err("should fail");
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }

    #[test]
    fn test_form_from_fields() {
        let fields = FormFields::new([
            ("headlineText".to_string(), FormValue::Text("h".into())),
            ("imageUrl".to_string(), FormValue::Text("i".into())),
            ("buttonUrl".to_string(), FormValue::Text("b".into())),
            ("buttonText".to_string(), FormValue::Text("Go".into())),
        ]);

        let form = SnippetForm::try_from(&fields).expect("should convert");

        assert_eq!(form.headline_text.as_deref(), Some("h"));
        assert_eq!(form.button_text.as_deref(), Some("Go"));
    }

    #[test]
    fn test_file_field_is_invalid() {
        let fields = FormFields::new([
            ("headlineText".to_string(), FormValue::File),
            ("imageUrl".to_string(), FormValue::Text("i".into())),
            ("buttonUrl".to_string(), FormValue::Text("b".into())),
        ]);

        let err = SnippetForm::try_from(&fields).expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
