use std::sync::Arc;

use server_api::View;
use tera::{Context, Tera};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template error: {0}")]
    Tera(#[from] tera::Error),
}

/// Page renderer. Template names end in `.html`, so Tera escapes every
/// interpolated value.
#[derive(Clone)]
pub struct Templates {
    tera: Arc<Tera>,
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("search.html", SEARCH_PAGE),
            ("result.html", RESULT_PAGE),
        ])?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn render(&self, view: &View) -> Result<String, TemplateError> {
        let context = Context::from_value(view.context())?;
        Ok(self.tera.render(view.template_name(), &context)?)
    }
}

const SEARCH_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Search Page</title>
</head>
<body>
    <h1>Search</h1>
    <form method="POST">
        <input type="text" name="search_term" placeholder="Enter search term" value="{{ input_value }}" required>
        <button type="submit">Submit</button>
    </form>
    {% if error %}
        <p style="color:red;">{{ error }}</p>
    {% endif %}
</body>
</html>
"#;

const RESULT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Search Result</title>
</head>
<body>
    <h1>Search Result</h1>
    {% if search_term %}
        <p>You searched for: <strong>{{ search_term }}</strong></p>
    {% else %}
        <p>No search term provided.</p>
    {% endif %}
    <form action="/" method="get">
        <button type="submit">Return to Home</button>
    </form>
</body>
</html>
"#;

#[cfg(test)]
#[path = "tests/templates_tests.rs"]
mod tests;
