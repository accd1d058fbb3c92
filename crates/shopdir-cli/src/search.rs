//! `search` subcommand arguments.

use std::path::PathBuf;

use clap::Args;
use shopdir_core::BusinessType;
use shopdir_ingest::ShopFilter;

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// CSV path or http(s) URL; defaults to `SHOPDIR_CSV_SOURCE`
    #[arg(long)]
    pub source: Option<String>,
    /// Free-text match on name, city, state, or zip
    #[arg(long, short)]
    pub query: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub zip: Option<String>,
    /// Radius in miles around `--zip`; defaults to `SHOPDIR_DEFAULT_RADIUS_MILES`
    #[arg(long)]
    pub radius: Option<f64>,
    /// Business types as codes or names, comma-separated (e.g. `V,T`)
    #[arg(long = "type", value_delimiter = ',')]
    pub business_types: Vec<BusinessType>,
    #[arg(long)]
    pub cbd: Option<bool>,
    #[arg(long)]
    pub kratom: Option<bool>,
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(long)]
    pub output: Option<PathBuf>,
    #[arg(long)]
    pub pretty: bool,
}

impl SearchArgs {
    pub(crate) fn to_filter(&self, default_radius_miles: f64) -> ShopFilter {
        ShopFilter {
            search_term: self.query.clone(),
            state: self.state.clone(),
            zip_code: self.zip.clone(),
            radius_miles: Some(self.radius.unwrap_or(default_radius_miles)),
            business_types: self.business_types.clone(),
            has_cbd: self.cbd,
            has_kratom: self.kratom,
        }
    }
}
