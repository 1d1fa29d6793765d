use hngames::{
    config,
    opts::Opts,
    store::{Dataset, Store},
};
use log::*;

fn main() -> anyhow::Result<()> {
    let opts = Opts::get(Opts::build_app(
        "sort",
        "Rewrites both archives sorted by release date, newest first",
    ));
    let config = config::Builder::new().apply_opts(&opts).build();
    hngames::log::setup_logging(&config)?;
    config.debug_values();

    let store = Store::new(config.data_dir());
    for dataset in &[Dataset::Archive, Dataset::Rip] {
        let mut entries = store.load(*dataset)?;
        entries.sort_by(|left, right| right.release_date.cmp(&left.release_date));
        store.save(*dataset, &entries)?;
        info!("Sorted {} ({} entries)", dataset.file_name(), entries.len());
    }

    Ok(())
}
