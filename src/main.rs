use anyhow::Context;

fn main() -> anyhow::Result<()> {
    owner_migrate::run().context("owner migration aborted")?;
    Ok(())
}
