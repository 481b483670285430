use axum::{
    Form,
    extract::{FromRequest, Multipart, Request},
};
use http::header::CONTENT_TYPE;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    /// A multipart part carrying a file name.
    File,
}

/// Submitted form entries in body order, from either
/// `application/x-www-form-urlencoded` or `multipart/form-data` bodies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields(Vec<(String, FormValue)>);

impl FormFields {
    pub fn new(entries: impl IntoIterator<Item = (String, FormValue)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// First value submitted under `name`. Later repeats are ignored.
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Text value of `name`; a file part is a validation error.
    pub fn text(&self, name: &str) -> Result<Option<String>, Error> {
        match self.get(name) {
            None => Ok(None),
            Some(FormValue::Text(value)) => Ok(Some(value.clone())),
            Some(FormValue::File) => Err(Error::validation(format!(
                "field '{name}' must be text, got a file"
            ))),
        }
    }
}

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(
        req: Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| Error::validation(e.body_text()))?;

            return read_multipart(multipart).await;
        }

        let Form(pairs): Form<Vec<(String, String)>> =
            Form::from_request(req, state)
                .await
                .map_err(|e| Error::validation(e.body_text()))?;

        Ok(Self::new(
            pairs.into_iter().map(|(k, v)| (k, FormValue::Text(v))),
        ))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<FormFields, Error> {
    let mut entries = vec![];

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let value = if field.file_name().is_some() {
            FormValue::File
        } else {
            FormValue::Text(
                field
                    .text()
                    .await
                    .map_err(|e| Error::validation(e.body_text()))?,
            )
        };

        entries.push((name, value));
    }

    Ok(FormFields::new(entries))
}
