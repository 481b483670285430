use tera::{Context, Tera};

use crate::services::BannerContent;

const SNIPPET_TEMPLATE_NAME: &str = "customizer-banner";

// Values are interpolated verbatim, escaping is up to the caller.
const SNIPPET_TEMPLATE: &str = r#"<div class="customizer-banner">
  <h1>{{ headline_text }}</h1>
  <img src="{{ image_url }}" alt="Banner image" />
  <a href="{{ button_url }}" class="btn">{{ button_text }}</a>
</div>"#;

pub fn render_snippet(banner: &BannerContent) -> Result<String, tera::Error> {
    let mut tera = Tera::default();

    tera.autoescape_on(vec![]);
    tera.add_raw_template(SNIPPET_TEMPLATE_NAME, SNIPPET_TEMPLATE)?;

    let context = Context::from_serialize(banner)?;

    tera.render(SNIPPET_TEMPLATE_NAME, &context)
}
