use hngames::{
    audit, config,
    opts::Opts,
    store::{Dataset, Store},
};
use log::*;

fn main() -> anyhow::Result<()> {
    let opts = Opts::get(
        Opts::build_app(
            "check-images",
            "Cross-references active entries against the cover images on disk",
        )
        .arg(Opts::images_dir_arg()),
    );
    let config = config::Builder::new().apply_opts(&opts).build();
    hngames::log::setup_logging(&config)?;
    config.debug_values();

    let store = Store::new(config.data_dir());
    let archive = store.load(Dataset::Archive)?;
    let coverage = audit::image_coverage(&archive, config.images_dir())?;

    for id in &coverage.missing_images {
        warn!("Missing cover image: {}.jpg", id);
    }
    for id in &coverage.orphan_images {
        warn!("Orphan cover image: {}.jpg", id);
    }

    if coverage.missing_images.is_empty() && coverage.orphan_images.is_empty() {
        info!(
            "All {} active entries have cover images, no orphans",
            archive.len()
        );
    } else {
        warn!(
            "{} missing and {} orphan images",
            coverage.missing_images.len(),
            coverage.orphan_images.len()
        );
    }

    Ok(())
}
