//! DC-011: Live sources — Numbeo cost-of-living pages and Marmiton recipes.
//!
//! Page fetching uses a blocking `reqwest` client; extraction uses `scraper`
//! CSS selectors. Parsing is split from fetching so it can be tested on
//! static HTML.

use super::{first_success, strategy, EconomicDataSource, RecipeDataSource, SourceError};
use crate::core::types::{Observation, RecipeRef};
use reqwest::blocking::Client;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{info, warn};

const NUMBEO_BASE: &str = "https://www.numbeo.com/cost-of-living/in";
const MARMITON_ROOT: &str = "https://www.marmiton.org";
const MARMITON_SEARCH: &str = "https://www.marmiton.org/recettes/recherche.aspx";
const USER_AGENT: &str = concat!("dishcost/", env!("CARGO_PKG_VERSION"));

/// Recipe titles this short are navigation links, not recipes.
const MIN_TITLE_CHARS: usize = 6;

fn build_client(timeout: Duration) -> Result<Client, String> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| format!("cannot build HTTP client: {}", e))
}

fn fetch_html(client: &Client, url: &str) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| SourceError::Network(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    response
        .text()
        .map_err(|e| SourceError::Network(e.to_string()))
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Parse(format!("selector '{}': {}", css, e)))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Numbeo
// ============================================================================

/// Python-style title casing: a letter is uppercased when it follows a
/// non-letter, lowercased otherwise.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Numbeo page URL for a city, e.g. "new york" → `.../in/New-York?displayCurrency=EUR`.
pub fn numbeo_url(city: &str) -> String {
    let slug = title_case(&city.trim().replace(' ', "-"));
    format!("{}/{}?displayCurrency=EUR", NUMBEO_BASE, slug)
}

/// Extract `(row text, price text)` pairs from a Numbeo cost-of-living page.
/// Rows without a `.priceValue` cell are ignored.
pub fn parse_numbeo_rows(html: &str) -> Result<Vec<Observation>, SourceError> {
    let document = Html::parse_document(html);
    let row_sel = selector("tr")?;
    let price_sel = selector(".priceValue")?;

    let observations = document
        .select(&row_sel)
        .filter_map(|row| {
            let price = row.select(&price_sel).next()?;
            Some(Observation::new(element_text(row), element_text(price)))
        })
        .collect();
    Ok(observations)
}

/// Cost-of-living observations scraped from numbeo.com.
pub struct NumbeoSource {
    client: Client,
}

impl NumbeoSource {
    pub fn new(timeout: Duration) -> Result<Self, String> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }
}

impl EconomicDataSource for NumbeoSource {
    fn fetch_observations(&self, city: &str) -> Vec<Observation> {
        let url = numbeo_url(city);
        info!(city, %url, "fetching cost-of-living index");
        match fetch_html(&self.client, &url).and_then(|html| parse_numbeo_rows(&html)) {
            Ok(observations) => observations,
            Err(e) => {
                warn!(city, error = %e, "price index unavailable; using default prices");
                Vec::new()
            }
        }
    }
}

// ============================================================================
// Marmiton
// ============================================================================

fn absolute_url(href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", MARMITON_ROOT, href)
    } else {
        format!("{}/{}", MARMITON_ROOT, href)
    }
}

/// Marmiton search URL for a dish.
pub fn marmiton_search_url(dish: &str) -> Result<String, SourceError> {
    Url::parse_with_params(MARMITON_SEARCH, &[("aqt", dish.trim()), ("st", "1")])
        .map(|u| u.to_string())
        .map_err(|e| SourceError::Parse(e.to_string()))
}

/// Extract recipe links from a search results page, in page order.
///
/// The title is the link text, or the text of a nested `h4` when the link
/// text is empty. Links with short titles are dropped.
pub fn parse_search_results(html: &str) -> Result<Vec<RecipeRef>, SourceError> {
    let document = Html::parse_document(html);
    let link_sel = selector("a[href*='/recettes/recette_']")?;
    let h4_sel = selector("h4")?;

    let recipes = document
        .select(&link_sel)
        .filter_map(|link| {
            let href = link.value().attr("href")?.trim();
            if href.is_empty() {
                return None;
            }
            let mut name = element_text(link);
            if name.is_empty() {
                name = link.select(&h4_sel).next().map(element_text)?;
            }
            if name.chars().count() < MIN_TITLE_CHARS {
                return None;
            }
            Some(RecipeRef::new(name, absolute_url(href)))
        })
        .collect();
    Ok(recipes)
}

fn texts_for(html: &str, css: &str) -> Result<Vec<String>, SourceError> {
    let document = Html::parse_document(html);
    let sel = selector(css)?;
    Ok(document
        .select(&sel)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect())
}

/// Extract ingredient names from a recipe page. The current card layout is
/// tried first, then the older `ingredient-name` spans.
pub fn parse_ingredients(html: &str) -> Vec<String> {
    first_success(
        "ingredients",
        vec![
            strategy("card-ingredient-title", || texts_for(html, ".card-ingredient-title")),
            strategy("ingredient-name", || {
                texts_for(html, "span[class*='ingredient-name']")
            }),
        ],
    )
}

/// Recipe search and ingredient extraction on marmiton.org.
pub struct MarmitonSource {
    client: Client,
}

impl MarmitonSource {
    pub fn new(timeout: Duration) -> Result<Self, String> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }
}

impl RecipeDataSource for MarmitonSource {
    fn search_candidates(&self, dish: &str) -> Vec<RecipeRef> {
        info!(dish, "searching recipes");
        let result = marmiton_search_url(dish)
            .and_then(|url| fetch_html(&self.client, &url))
            .and_then(|html| parse_search_results(&html));
        match result {
            Ok(recipes) => recipes,
            Err(e) => {
                warn!(dish, error = %e, "recipe search failed");
                Vec::new()
            }
        }
    }

    fn fetch_ingredients(&self, url: &str) -> Vec<String> {
        match fetch_html(&self.client, url) {
            Ok(html) => parse_ingredients(&html),
            Err(e) => {
                warn!(%url, error = %e, "recipe page unavailable");
                Vec::new()
            }
        }
    }
}
