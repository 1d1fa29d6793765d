use hngames::{
    config,
    opts::Opts,
    store::{Dataset, Store},
};
use log::*;

fn main() -> anyhow::Result<()> {
    let opts = Opts::get(Opts::build_app(
        "count",
        "Prints entry counts for every dataset",
    ));
    let config = config::Builder::new().apply_opts(&opts).build();
    hngames::log::setup_logging(&config)?;
    config.debug_values();

    let store = Store::new(config.data_dir());
    let mut total = 0;
    for dataset in &[Dataset::Archive, Dataset::Rip, Dataset::New] {
        let count = store.count(*dataset)?;
        info!("{}: {} entries", dataset.file_name(), count);
        total += count;
    }
    info!("Total: {} entries", total);

    Ok(())
}
