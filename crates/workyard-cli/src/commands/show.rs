use super::open_plan;
use crate::cli::PlanArgs;
use crate::error::Result;
use crate::ui;

pub fn run(plan: &PlanArgs) -> Result<()> {
    let ctx = open_plan(plan)?;
    if let Some(location) = &ctx.config.location {
        println!("Location: {}", location);
    }
    println!("Plan: {}", ctx.store.path().display());
    print!("{}", ui::render_session(&ctx.session));
    Ok(())
}
