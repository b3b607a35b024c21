//! HTML rendering of the home page.
use tera::{Context, Tera};

use crate::posts::LoaderData;

/// Name the page template is registered under. The `.html` suffix turns on
/// auto-escaping.
const INDEX_TEMPLATE_NAME: &str = "index.html";
/// Page template, compiled into the binary.
const INDEX_TEMPLATE: &str = include_str!("../../../../templates/index.html");

/// Build the template registry.
///
/// # Errors
/// Errors if the page template does not parse.
pub fn templates() -> anyhow::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
    Ok(tera)
}

/// Render the home page, with an optional error from a failed mutation.
///
/// # Errors
/// Errors if rendering fails.
pub fn render_index(
    tera: &Tera,
    data: &LoaderData,
    error: Option<&str>,
) -> anyhow::Result<String> {
    let mut ctx = Context::new();
    ctx.insert("posts", &data.posts);
    ctx.insert("message", &data.message);
    ctx.insert("error", &error);
    Ok(tera.render(INDEX_TEMPLATE_NAME, &ctx)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::models::post::Post;

    fn loader_data() -> LoaderData {
        LoaderData {
            posts: vec![Post {
                id: 7,
                title: "<b>Hello</b>".to_owned(),
                content: "World".to_owned(),
            }],
            message: "Hi there".to_owned(),
        }
    }

    #[test]
    fn test_render_index_expect_posts_escaped() {
        let tera = templates().unwrap();
        let actual = render_index(&tera, &loader_data(), None).unwrap();
        assert!(actual.contains("&lt;b&gt;Hello&lt;&#x2F;b&gt;"));
        assert!(actual.contains("#7"));
        assert!(actual.contains(r#"name="id" value="7""#));
        assert!(actual.contains("Hi there"));
        assert!(!actual.contains(r#"role="alert""#));
    }

    #[test]
    fn test_render_index_when_error_expect_alert() {
        let tera = templates().unwrap();
        let actual = render_index(&tera, &loader_data(), Some("Invalid form data")).unwrap();
        assert!(actual.contains(r#"<p class="error" role="alert">Invalid form data</p>"#));
    }
}
