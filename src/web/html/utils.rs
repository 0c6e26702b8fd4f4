use html_minifier::HTMLMinifier;
use tera::Context;
use thiserror::Error;

use crate::State;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("rendering error")]
    Tera(#[from] tera::Error),
}

/// Renders `template`, minified when the minifier accepts the output.
pub(super) fn render(
    state: &State,
    template: &'static str,
    context: &Context,
) -> Result<String, TemplateError> {
    let rendered = state.tera.render(template, context)?;
    Ok(minify(rendered))
}

fn minify(rendered: String) -> String {
    let mut html_minifier = HTMLMinifier::new();
    if let Err(err) = html_minifier.digest(&rendered) {
        tracing::error!(%err, "Failed to minify HTML");
        return rendered;
    };

    match std::str::from_utf8(html_minifier.get_html()) {
        Ok(minified) => minified.to_string(),
        Err(err) => {
            tracing::error!(%err, "Failed to parse minified HTML as UTF-8");
            rendered
        },
    }
}
