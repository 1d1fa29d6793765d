use clap::{App, Arg};
use hngames::{
    config,
    opts::Opts,
    scrape::{Scraper, Window},
    store::Store,
};

fn build_app() -> App<'static, 'static> {
    Opts::build_app(
        "scrape",
        "Scrapes Show HN game submissions into the staging dataset",
    )
    .arg(
        Arg::with_name("id")
            .long("id")
            .value_name("ID")
            .takes_value(true)
            .conflicts_with_all(&["from", "to"])
            .help("Scrape a single submission by its id"),
    )
    .arg(
        Arg::with_name("from")
            .long("from")
            .value_name("DAY")
            .takes_value(true)
            .required_unless("id")
            .help("Start of the scrape window (YYYY-MM-DD, inclusive)"),
    )
    .arg(
        Arg::with_name("to")
            .long("to")
            .value_name("DAY")
            .takes_value(true)
            .required_unless("id")
            .help("End of the scrape window (YYYY-MM-DD, exclusive)"),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::get(build_app());
    let config = config::Builder::new().apply_opts(&opts).build();
    hngames::log::setup_logging(&config)?;
    config.debug_values();

    let scraper = Scraper::new(Store::new(config.data_dir()))?;
    match (&opts.id, opts.from.as_deref(), opts.to.as_deref()) {
        (Some(id), ..) => scraper.scrape_single(id).await?,
        (None, Some(from), Some(to)) => {
            scraper.scrape_window(Window::parse(from, to)?).await?
        }
        _ => anyhow::bail!("either --id or both --from and --to are required"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_window_or_an_id_is_required() {
        let matches =
            |args: Vec<&str>| build_app().get_matches_from_safe(args);

        assert!(matches(vec!["scrape", "--from", "2023-01-01", "--to", "2023-02-01"]).is_ok());
        assert!(matches(vec!["scrape", "--id", "18316124"]).is_ok());
        assert!(matches(vec!["scrape"]).is_err());
        assert!(matches(vec!["scrape", "--from", "2023-01-01"]).is_err());
        assert!(matches(vec!["scrape", "--id", "1", "--from", "2023-01-01"]).is_err());
    }
}
