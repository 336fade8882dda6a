//! Page loading for summarization.

use crate::Result;
use llm::Client;
use scraper::{Html, Selector};
use url::Url;

/// Fetch a page and return the text of its `<p>` elements.
pub async fn load_page(client: &Client, url: &str) -> Result<String> {
    let url = Url::parse(url)?;
    tracing::debug!("loading {url}");
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(paragraphs(&html))
}

/// Join the text of every `<p>` element, one paragraph per line.
pub fn paragraphs(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };
    document
        .select(&selector)
        .map(|p| p.text().collect::<String>().trim().to_owned())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::paragraphs;

    #[test]
    fn keeps_only_paragraph_text() {
        let html = r#"<html><head><title>Agents</title></head><body>
            <h1>LLM Powered Autonomous Agents</h1>
            <p>Building agents with an LLM as its <b>core controller</b> is a cool concept.</p>
            <div>navigation</div>
            <p>  </p>
            <p>Planning, memory and tool use.</p>
        </body></html>"#;
        assert_eq!(
            paragraphs(html),
            "Building agents with an LLM as its core controller is a cool concept.\nPlanning, memory and tool use."
        );
    }
}
