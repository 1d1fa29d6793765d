use hngames::{config, links, opts::Opts, store::Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::get(Opts::build_app(
        "check-links",
        "Re-validates archived play URLs and delists entries whose URL died",
    ));
    let config = config::Builder::new().apply_opts(&opts).build();
    hngames::log::setup_logging(&config)?;
    config.debug_values();

    let store = Store::new(config.data_dir());
    links::run(&store).await?;

    Ok(())
}
