// Commands — estimate

use log::debug;

use crate::atoms::error::ForgeResult;
use crate::engine::{self, helpers, price};

use super::{print_json, print_kv, GlobalArgs};

pub async fn run(globals: &GlobalArgs) -> ForgeResult<()> {
    let config = globals.to_config()?;
    let cost = engine::estimate_cost(&config.rpc_url).await?;

    // Best effort; the estimate stands on its own without a USD quote.
    let sol_price = match price::get_sol_price_usd().await {
        Ok(p) => Some(p),
        Err(e) => {
            debug!("[estimate] No SOL price: {}", e);
            None
        }
    };

    if globals.json {
        return print_json(&serde_json::json!({
            "estimate": cost,
            "sol_price_usd": sol_price,
        }));
    }

    println!("Launch cost estimate");
    print_kv("Mint rent", helpers::sol_display(cost.mint_rent_lamports));
    print_kv(
        "Token account rent",
        helpers::sol_display(cost.token_account_rent_lamports),
    );
    print_kv("Transaction fees", helpers::sol_display(cost.fee_lamports));
    match sol_price {
        Some(p) => print_kv(
            "Total",
            format!(
                "{} (~{})",
                helpers::sol_display(cost.required_lamports),
                helpers::usd_display(cost.required_lamports, p)
            ),
        ),
        None => print_kv("Total", helpers::sol_display(cost.required_lamports)),
    }
    Ok(())
}
