// src/site/presets.rs
// Built-in site configurations.

use crate::classify::{Role, Route};
use crate::site::{SiteConfig, Selectors};

/// (name, description) of every preset, in listing order.
pub const PRESETS: &[(&str, &str)] = &[
    ("mn-statutes", "Minnesota Statutes (revisor.mn.gov): parts, chapters and sections"),
    ("ny-laws", "New York consolidated laws (nysenate.gov): single section page"),
];

pub fn preset(name: &str) -> Option<SiteConfig> {
    match name {
        "mn-statutes" => Some(mn_statutes()),
        "ny-laws" => Some(ny_laws()),
        _ => None,
    }
}

fn mn_statutes() -> SiteConfig {
    SiteConfig {
        name: "mn-statutes".into(),
        start_urls: vec!["https://www.revisor.mn.gov/statutes".into()],
        // The statutes index is neither part, chapter nor section
        start_role: None,
        selectors: Selectors {
            container: ".section".into(),
            title: ".shn".into(),
            body: "p".into(),
        },
        routes: vec![
            Route::new("https://www.revisor.mn.gov/statutes/part/*", Role::CollectionB),
            Route::new("https://www.revisor.mn.gov/statutes/cite/*.*", Role::Leaf),
            Route::new("https://www.revisor.mn.gov/statutes/cite/!(*.*)", Role::CollectionA),
        ],
    }
}

fn ny_laws() -> SiteConfig {
    SiteConfig {
        name: "ny-laws".into(),
        start_urls: vec!["https://www.nysenate.gov/legislation/laws/PEN/175.10".into()],
        start_role: Some(Role::Leaf),
        selectors: Selectors {
            container: ".nys-openleg-result-container".into(),
            title: ".nys-openleg-result-title-short".into(),
            body: ".nys-openleg-result-text".into(),
        },
        routes: Vec::new(),
    }
}
