//! HTML pages for the reporting service.
//!
//! Every page is a tinytemplate body wrapped in a shared layout. Cell text
//! goes through the default HTML escaper; only the stylesheet, rendered
//! bodies and the image URI are inserted unescaped.

mod html;
pub mod pairplot;

use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::analysis::{self, SPECIES, SEPAL_WIDTH};
use crate::error::Result;
use crate::input::DataTable;

pub use html::CSS_STYLES;
use html::HtmlTable;
pub use pairplot::{LegendEntry, Pairplot};

/// Derived column left out of the dataset page.
const PETAL_AREA: &str = "petal_area";

const TEMPLATES: [(&str, &str); 5] = [
    ("layout", include_str!("templates/layout.html.tt")),
    ("index", include_str!("templates/index.html.tt")),
    ("table", include_str!("templates/table.html.tt")),
    ("table_page", include_str!("templates/table_page.html.tt")),
    ("pairplot", include_str!("templates/pairplot.html.tt")),
];

/// Links on the index page, in display order.
const LINKS: [(&str, &str); 6] = [
    ("/dataset", "All Data"),
    ("/summary", "Full Summary Statistics"),
    ("/species_summary", "Summary Statistics by Species"),
    ("/feature_pairplot", "Pairplot Visualization"),
    ("/min_sepal_widths", "Top Smallest Sepal Width"),
    ("/largest_petal_area", "Largest Petal Surface per Species"),
];

#[derive(Serialize)]
struct Layout<'a> {
    title: &'a str,
    css: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct Link {
    href: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct IndexPage {
    links: Vec<Link>,
}

#[derive(Serialize)]
struct TablePage {
    heading: String,
    description: String,
    table: HtmlTable,
}

#[derive(Serialize)]
struct PairplotPage<'a> {
    image: String,
    legend: &'a [LegendEntry],
}

/// Renders the report pages.
///
/// Holds no template state, so one renderer can be shared across threads.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    title: String,
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self {
            title: "Iris Dataset API".to_string(),
        }
    }

    /// Set the `<title>` of every page.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn index(&self) -> Result<String> {
        let links = LINKS
            .iter()
            .map(|&(href, label)| Link { href, label })
            .collect();
        self.page("index", &IndexPage { links })
    }

    /// Every row, numbered from 1, species first.
    pub fn dataset(&self, table: &DataTable) -> Result<String> {
        let table = species_first(table, &[PETAL_AREA])?;
        self.table_page(
            "All Data",
            "Here is the full Iris dataset:",
            HtmlTable::from_table(&table, 1, None),
        )
    }

    pub fn summary(&self, table: &DataTable) -> Result<String> {
        let summaries = analysis::describe(table)?;
        self.table_page(
            "Full Summary Statistics",
            "This table shows summary statistics (mean, std, min, max, percentiles) for numeric columns in the Iris dataset:",
            HtmlTable::from_summaries(&summaries),
        )
    }

    pub fn species_summary(&self, table: &DataTable) -> Result<String> {
        let summaries = analysis::describe_by(table, SPECIES)?;
        self.table_page(
            "Summary Statistics by Species",
            "This table shows summary statistics grouped by species:",
            HtmlTable::from_group_summaries(&summaries),
        )
    }

    pub fn pairplot(&self, plot: &Pairplot) -> Result<String> {
        self.page(
            "pairplot",
            &PairplotPage {
                image: plot.data_uri(),
                legend: plot.legend(),
            },
        )
    }

    /// The `n` flowers with the narrowest sepals, `sepal_width` in bold.
    pub fn smallest_sepal_widths(&self, table: &DataTable, n: usize) -> Result<String> {
        let smallest = analysis::nsmallest(table, SEPAL_WIDTH, n)?;
        let smallest = species_first(&smallest, &[])?;
        self.table_page(
            &format!("Top {} Smallest Sepal Width", n),
            &format!("This table shows the {} flowers with the smallest sepal width:", n),
            HtmlTable::from_table(&smallest, 0, Some(SEPAL_WIDTH)),
        )
    }

    pub fn largest_petal_area(&self, table: &DataTable) -> Result<String> {
        let leaders = analysis::largest_petal_area(table)?;
        self.table_page(
            "Largest Petal Surface per Species",
            "This table shows the instance with the largest petal surface area for each species:",
            HtmlTable::from_leaders(&leaders),
        )
    }

    fn table_page(&self, heading: &str, description: &str, table: HtmlTable) -> Result<String> {
        self.page(
            "table_page",
            &TablePage {
                heading: heading.to_string(),
                description: description.to_string(),
                table,
            },
        )
    }

    /// Render `name` with `context` and wrap it in the layout.
    fn page(&self, name: &str, context: &impl Serialize) -> Result<String> {
        let templates = templates()?;
        let body = templates.render(name, context)?;
        let page = templates.render(
            "layout",
            &Layout {
                title: &self.title,
                css: CSS_STYLES,
                body: &body,
            },
        )?;
        Ok(page)
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn templates() -> Result<TinyTemplate<'static>> {
    let mut tt = TinyTemplate::new();
    for (name, text) in TEMPLATES {
        tt.add_template(name, text)?;
    }
    Ok(tt)
}

/// Reorder columns so `species` leads, dropping `exclude`.
fn species_first(table: &DataTable, exclude: &[&str]) -> Result<DataTable> {
    let headers = table.headers();
    let mut order: Vec<&str> = headers
        .iter()
        .copied()
        .filter(|h| *h == SPECIES)
        .collect();
    order.extend(
        headers
            .iter()
            .copied()
            .filter(|h| *h != SPECIES && !exclude.contains(h)),
    );
    table.select_columns(&order)
}
