use hngames::{
    audit, config,
    opts::Opts,
    store::{Dataset, Store},
};
use log::*;

fn main() -> anyhow::Result<()> {
    let opts = Opts::get(Opts::build_app(
        "check-ids",
        "Checks that active entries' image and discussion URLs encode their own ids",
    ));
    let config = config::Builder::new().apply_opts(&opts).build();
    hngames::log::setup_logging(&config)?;
    config.debug_values();

    let store = Store::new(config.data_dir());
    let archive = store.load(Dataset::Archive)?;
    let issues = audit::id_consistency(&archive);

    if issues.is_empty() {
        info!("All {} active entries are consistent", archive.len());
        return Ok(());
    }

    for issue in &issues {
        warn!("{} ({}): {}", issue.name, issue.id, issue.detail);
    }
    warn!(
        "{} issues across {} active entries",
        issues.len(),
        archive.len()
    );

    Ok(())
}
