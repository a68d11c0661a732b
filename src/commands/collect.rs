use super::{Common, CommonArgs, Host};
use crate::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct CollectArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Collect the reference day's metrics and report them.
pub async fn collect_stats<H: Host>(host: &mut H, args: &CollectArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;
    let _ = common.collect().await?;
    Ok(())
}
