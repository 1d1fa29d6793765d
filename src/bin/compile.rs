use hngames::{compile, config, opts::Opts, store::Store};

fn main() -> anyhow::Result<()> {
    let opts = Opts::get(
        Opts::build_app(
            "compile",
            "Compiles the curated datasets into statically importable modules",
        )
        .arg(Opts::out_dir_arg()),
    );
    let config = config::Builder::new().apply_opts(&opts).build();
    hngames::log::setup_logging(&config)?;
    config.debug_values();

    let store = Store::new(config.data_dir());
    compile::run(&store, config.out_dir())?;

    Ok(())
}
