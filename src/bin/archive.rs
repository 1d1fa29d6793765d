use hngames::{config, opts::Opts, promote, store::Store};

fn main() -> anyhow::Result<()> {
    let opts = Opts::get(
        Opts::build_app(
            "archive",
            "Promotes validated staging entries into the active archive",
        )
        .arg(Opts::images_dir_arg()),
    );
    let config = config::Builder::new().apply_opts(&opts).build();
    hngames::log::setup_logging(&config)?;
    config.debug_values();

    let store = Store::new(config.data_dir());
    promote::run(&store, config.images_dir())?;

    Ok(())
}
