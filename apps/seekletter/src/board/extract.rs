use scraper::{Html, Selector};

/// Content region holding the advert body on a job detail page.
pub const JOB_AD_DETAILS_SELECTOR: &str = r#"div[data-automation="jobAdDetails"]"#;

/// Pulls the job description text out of a detail page.
pub trait DescriptionExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Option<String>;
}

/// Reads the `jobAdDetails` region: every text node, newline-separated, trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobAdDetailsExtractor;

impl DescriptionExtractor for JobAdDetailsExtractor {
    fn extract(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let selector = Selector::parse(JOB_AD_DETAILS_SELECTOR).ok()?;
        let region = document.select(&selector).next()?;

        let text = region.text().collect::<Vec<_>>().join("\n");
        Some(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_region_text_with_newlines() {
        let html = r#"
            <html><body>
              <h1>Rust Developer</h1>
              <div data-automation="jobAdDetails"><p>About the role</p><ul><li>Ship code</li><li>Review code</li></ul></div>
              <footer>Apply now</footer>
            </body></html>
        "#;
        let text = JobAdDetailsExtractor.extract(html).unwrap();
        assert_eq!(text, "About the role\nShip code\nReview code");
    }

    #[test]
    fn test_missing_region_returns_none() {
        let html = "<html><body><div data-automation=\"somethingElse\">x</div></body></html>";
        assert!(JobAdDetailsExtractor.extract(html).is_none());
    }

    #[test]
    fn test_first_region_wins() {
        let html = r#"<div data-automation="jobAdDetails">one</div><div data-automation="jobAdDetails">two</div>"#;
        assert_eq!(JobAdDetailsExtractor.extract(html).as_deref(), Some("one"));
    }

    #[test]
    fn test_outer_whitespace_trimmed() {
        let html = "<div data-automation=\"jobAdDetails\">\n   <p>  Hello  </p>\n</div>";
        assert_eq!(JobAdDetailsExtractor.extract(html).as_deref(), Some("Hello"));
    }
}
