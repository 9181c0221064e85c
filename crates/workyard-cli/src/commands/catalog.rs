use super::{load_catalog, resolve_config};
use crate::cli::{CatalogArgs, PlanArgs};
use crate::error::Result;
use crate::ui;
use workyard::core::catalog::PieceCatalog;

pub fn run(plan: &PlanArgs, args: CatalogArgs) -> Result<()> {
    let config = resolve_config(plan)?;
    let catalog = load_catalog(config.catalog_path.as_deref())?;
    let location = config.location.as_deref().filter(|_| !args.all);
    print!("{}", listing(&catalog, location));
    Ok(())
}

/// Lists the pieces usable at `location`, or the whole catalog.
fn listing(catalog: &PieceCatalog, location: Option<&str>) -> String {
    match location {
        Some(location) => {
            let text = ui::render_catalog(catalog.for_location(location));
            if catalog.for_location(location).next().is_none() {
                format!("{}(no pieces are listed for '{}')\n", text, location)
            } else {
                text
            }
        }
        None => ui::render_catalog(catalog.iter()),
    }
}
