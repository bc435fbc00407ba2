//! `certinv list` - Print the inventory without delivering it.

use anyhow::Result;

use super::Context;

pub async fn execute(ctx: Context) -> Result<()> {
    let inventory = ctx.collect().await?;
    println!("{}", serde_json::to_string_pretty(&inventory)?);
    Ok(())
}
