// Commands — pin

use std::path::PathBuf;

use crate::atoms::error::ForgeResult;
use crate::engine::ipfs;

use super::{print_json, print_kv, GlobalArgs};

#[derive(clap::Args, Debug)]
pub struct PinArgs {
    /// File to pin
    pub file: PathBuf,
}

pub async fn run(args: &PinArgs, globals: &GlobalArgs) -> ForgeResult<()> {
    let config = globals.to_config()?;
    let jwt = config.pinata_jwt()?;
    let receipt = ipfs::pin_file(jwt, &config.gateway, &args.file).await?;

    if globals.json {
        return print_json(&receipt);
    }
    print_kv("File", &receipt.file_name);
    print_kv("Size", format!("{} bytes", receipt.size_bytes));
    print_kv("CID", &receipt.cid);
    print_kv("URL", &receipt.gateway_url);
    Ok(())
}
