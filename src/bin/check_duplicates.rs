use hngames::{config, duplicates, opts::Opts, store::Store};
use log::*;

fn main() -> anyhow::Result<()> {
    let opts = Opts::get(Opts::build_app(
        "check-duplicates",
        "Reports entries sharing a name+author pair or a play URL, across all datasets",
    ));
    let config = config::Builder::new().apply_opts(&opts).build();
    hngames::log::setup_logging(&config)?;
    config.debug_values();

    let store = Store::new(config.data_dir());
    let report = duplicates::check(&store)?;

    for (dataset, count) in &report.counts {
        info!("{}: {} entries", dataset.file_name(), count);
    }
    info!("Checked {} entries for duplicates", report.total());

    if report.duplicates.is_empty() {
        info!("No duplicates found");
        return Ok(());
    }

    warn!("Found {} duplicate entries:", report.duplicates.len());
    for (position, duplicate) in report.duplicates.iter().enumerate() {
        warn!(
            "{}. [{}] {} ({}), {} duplicate",
            position + 1,
            duplicate.dataset.file_name(),
            duplicate.name,
            duplicate.id,
            duplicate.kind
        );
        for conflict in &duplicate.conflicts_with {
            warn!(
                "   conflicts with [{}] {} ({})",
                conflict.dataset.file_name(),
                conflict.name,
                conflict.id
            );
        }
    }

    Ok(())
}
