//! HTML views.
//!
//! Templates are compiled into the binary and rendered with minijinja.
//! Every template ends in `.html`, so output is HTML-escaped automatically.

use minijinja::{context, Environment};

use crate::models::{Item, ItemStatus};
use crate::Result;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("report.html", include_str!("../templates/report.html")),
];

/// Template environment for the board's pages.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Listing page. `items` are shown in the order given.
    pub fn render_index(&self, items: &[Item]) -> Result<String> {
        let template = self.env.get_template("index.html")?;
        Ok(template.render(context! { items => items })?)
    }

    /// Submission form for a lost or found report.
    pub fn render_report(&self, status: ItemStatus) -> Result<String> {
        let template = self.env.get_template("report.html")?;
        Ok(template.render(context! {
            status => status.as_str(),
            action => status.path(),
        })?)
    }
}
