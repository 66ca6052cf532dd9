//! Turns a themes catalog page into [`ThemeRecord`]s.
//!
//! The catalog markup is not under our control, so the rule is expressed as a
//! handful of CSS selectors ([`CatalogSelectors`]) that can be overridden from
//! the `[parser]` table of the config file. Every field is optional: a card
//! without a demo link still yields a record, with `demo_url` left empty.

use crate::domain::model::ThemeRecord;
use crate::utils::error::{Result, ThemeError};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSelectors {
    pub card: String,
    pub name: String,
    pub description: String,
    pub repository: String,
    pub demo: String,
    pub feature: String,
}

impl Default for CatalogSelectors {
    fn default() -> Self {
        Self {
            card: "article, [data-theme-card]".to_string(),
            name: "h2, h3, [data-theme-name]".to_string(),
            description: "p, [data-theme-description]".to_string(),
            repository: r#"a[href*="github.com"], a[data-repository]"#.to_string(),
            demo: r#"a[data-demo], a[rel~="demo"]"#.to_string(),
            feature: "li, [data-feature]".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogParser {
    card: Selector,
    name: Selector,
    description: Selector,
    repository: Selector,
    demo: Selector,
    feature: Selector,
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ThemeError::SelectorError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// 合併空白並去頭尾
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

impl CatalogParser {
    pub fn new(selectors: &CatalogSelectors) -> Result<Self> {
        Ok(Self {
            card: compile(&selectors.card)?,
            name: compile(&selectors.name)?,
            description: compile(&selectors.description)?,
            repository: compile(&selectors.repository)?,
            demo: compile(&selectors.demo)?,
            feature: compile(&selectors.feature)?,
        })
    }

    /// Parses a catalog page. `page_url` is used to resolve relative links.
    pub fn parse(&self, html: &str, page_url: &Url) -> Vec<ThemeRecord> {
        let document = Html::parse_document(html);

        let themes: Vec<ThemeRecord> = document
            .select(&self.card)
            .map(|card| self.parse_card(card, page_url))
            .collect();

        tracing::debug!("Parsed {} theme cards from {}", themes.len(), page_url);
        themes
    }

    fn parse_card(&self, card: ElementRef<'_>, page_url: &Url) -> ThemeRecord {
        ThemeRecord {
            name: self.first_text(card, &self.name),
            description: self.first_text(card, &self.description),
            repository_url: self.first_link(card, &self.repository, page_url),
            demo_url: self.first_link(card, &self.demo, page_url),
            features: card
                .select(&self.feature)
                .map(element_text)
                .filter(|text| !text.is_empty())
                .collect(),
        }
    }

    fn first_text(&self, card: ElementRef<'_>, selector: &Selector) -> String {
        card.select(selector)
            .next()
            .map(element_text)
            .unwrap_or_default()
    }

    fn first_link(&self, card: ElementRef<'_>, selector: &Selector, page_url: &Url) -> String {
        let href = match card
            .select(selector)
            .next()
            .and_then(|link| link.value().attr("href"))
        {
            Some(href) => href.trim(),
            None => return String::new(),
        };

        match page_url.join(href) {
            Ok(resolved) => resolved.to_string(),
            Err(e) => {
                tracing::debug!("Keeping unresolvable link '{}': {}", href, e);
                href.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://astro.build/themes/1/?technology%5B%5D=react&price%5B%5D=free").unwrap()
    }

    fn parser() -> CatalogParser {
        CatalogParser::new(&CatalogSelectors::default()).unwrap()
    }

    #[test]
    fn test_parse_full_card() {
        let html = r#"
            <html><body><main>
              <article>
                <h3>  AstroPaper </h3>
                <p>A minimal,
                   accessible blog theme.</p>
                <ul><li>Dark mode</li><li> RSS </li><li>   </li></ul>
                <a href="https://github.com/satnaing/astro-paper">Source</a>
                <a data-demo href="/themes/details/astro-paper/">Demo</a>
              </article>
            </main></body></html>
        "#;

        let themes = parser().parse(html, &page_url());

        assert_eq!(themes.len(), 1);
        assert_eq!(
            themes[0],
            ThemeRecord {
                name: "AstroPaper".to_string(),
                description: "A minimal, accessible blog theme.".to_string(),
                repository_url: "https://github.com/satnaing/astro-paper".to_string(),
                demo_url: "https://astro.build/themes/details/astro-paper/".to_string(),
                features: vec!["Dark mode".to_string(), "RSS".to_string()],
            }
        );
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let html = r#"<article><h2>Bare</h2></article><div data-theme-card></div>"#;

        let themes = parser().parse(html, &page_url());

        assert_eq!(themes.len(), 2);
        assert_eq!(themes[0].name, "Bare");
        assert_eq!(themes[0].description, "");
        assert_eq!(themes[0].repository_url, "");
        assert!(themes[0].features.is_empty());
        assert_eq!(themes[1], ThemeRecord::default());
    }

    #[test]
    fn test_no_cards_is_empty_not_error() {
        let html = "<html><body><p>No themes match your filters.</p></body></html>";
        assert!(parser().parse(html, &page_url()).is_empty());
        assert!(parser().parse("", &page_url()).is_empty());
    }

    #[test]
    fn test_custom_selectors() {
        let selectors = CatalogSelectors {
            card: "div.theme".to_string(),
            name: ".title".to_string(),
            ..CatalogSelectors::default()
        };
        let parser = CatalogParser::new(&selectors).unwrap();
        let html = r#"<div class="theme"><span class="title">Starlight</span></div><article><h2>Ignored</h2></article>"#;

        let themes = parser.parse(html, &page_url());

        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].name, "Starlight");
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let selectors = CatalogSelectors {
            demo: "a[[".to_string(),
            ..CatalogSelectors::default()
        };

        match CatalogParser::new(&selectors) {
            Err(ThemeError::SelectorError { selector, .. }) => assert_eq!(selector, "a[["),
            other => panic!("expected selector error, got {:?}", other.map(|_| ())),
        }
    }
}
