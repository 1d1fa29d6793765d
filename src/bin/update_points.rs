use hngames::{config, opts::Opts, points, store::Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::get(Opts::build_app(
        "update-points",
        "Refreshes the Hacker News points of recently released entries",
    ));
    let config = config::Builder::new().apply_opts(&opts).build();
    hngames::log::setup_logging(&config)?;
    config.debug_values();

    let store = Store::new(config.data_dir());
    points::run(&store).await?;

    Ok(())
}
