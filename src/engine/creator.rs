// Engine — Token Creation Flow
// estimate_cost, create_token, creation_instructions
//
// The whole launch is one linear pass: validate, check funds, pin logo
// and metadata, then a single transaction that creates the mint
// account, initializes the mint, creates the payer's ATA, mints the
// full supply, and revokes the mint authority if asked. The freeze
// authority is never set when it is to be revoked; initializing it
// just to revoke it one instruction later would cost an instruction
// and can fail.

use chrono::Utc;
use log::info;

use crate::atoms::constants::{
    CREATE_TX_SIGNATURES, FEE_PER_SIGNATURE_LAMPORTS, MINT_ACCOUNT_SIZE, TOKEN_ACCOUNT_SIZE,
    TOKEN_PROGRAM_ID,
};
use crate::atoms::error::{ForgeError, ForgeResult};
use crate::atoms::types::{Config, CostEstimate, CreateReceipt, TokenForm, TxStatus};

use super::helpers::{decode_pubkey, encode_pubkey, raw_supply, sol_display};
use super::instructions::{
    create_account_data, create_associated_token_account_data, initialize_mint2_data,
    mint_to_data, set_authority_data, AuthorityType,
};
use super::transaction::{
    build_legacy_transaction, derive_associated_token_account, sign_transaction,
};
use super::wallet::Keypair;
use super::{form, ipfs, metadata, rpc};

/// What a launch costs: rent for the two new accounts plus the
/// signature fees for one two-signer transaction.
pub async fn estimate_cost(rpc_url: &str) -> ForgeResult<CostEstimate> {
    let mint_rent = rpc::get_minimum_balance_for_rent_exemption(rpc_url, MINT_ACCOUNT_SIZE).await?;
    let token_account_rent =
        rpc::get_minimum_balance_for_rent_exemption(rpc_url, TOKEN_ACCOUNT_SIZE).await?;
    let fee_lamports = FEE_PER_SIGNATURE_LAMPORTS * CREATE_TX_SIGNATURES;
    Ok(CostEstimate {
        mint_rent_lamports: mint_rent,
        token_account_rent_lamports: token_account_rent,
        fee_lamports,
        required_lamports: mint_rent + token_account_rent + fee_lamports,
    })
}

/// Create the token described by `form`, paid and owned by `payer`.
pub async fn create_token(
    config: &Config,
    payer: &Keypair,
    form: &TokenForm,
) -> ForgeResult<CreateReceipt> {
    form::validate_form(form)?;
    form::validate_logo_file(&form.logo)?;
    let supply_raw = raw_supply(form.total_supply, form.decimals)?;
    let jwt = config.pinata_jwt()?;

    let cost = estimate_cost(&config.rpc_url).await?;
    let balance = rpc::get_balance(&config.rpc_url, &payer.address()).await?;
    if balance < cost.required_lamports {
        return Err(ForgeError::Wallet(format!(
            "Insufficient balance: {} available, {} required",
            sol_display(balance),
            sol_display(cost.required_lamports)
        )));
    }

    info!("[creator] Pinning logo {}", form.logo.display());
    let logo = ipfs::pin_file(jwt, &config.gateway, &form.logo).await?;

    let doc = metadata::build_metadata(form, &logo.gateway_url);
    let metadata_cid = ipfs::pin_json(jwt, "metadata.json", &serde_json::to_value(&doc)?).await?;
    let metadata_url = ipfs::gateway_url(&config.gateway, &metadata_cid);

    let mint_keypair = Keypair::generate();
    let payer_key = payer.public_key_bytes();
    let mint_key = mint_keypair.public_key_bytes();
    let token_program = decode_pubkey(TOKEN_PROGRAM_ID)?;
    let ata = derive_associated_token_account(&payer_key, &mint_key, &token_program)?;
    info!(
        "[creator] Mint {} ata {}",
        mint_keypair.address(),
        encode_pubkey(&ata)
    );

    let (accounts, instructions) = creation_instructions(
        &payer_key,
        &mint_key,
        &ata,
        form,
        supply_raw,
        cost.mint_rent_lamports,
    )?;
    let blockhash = rpc::get_latest_blockhash(&config.rpc_url).await?;
    let tx = build_legacy_transaction(&blockhash, &accounts, &instructions)?;
    let signed = sign_transaction(&tx, &[payer.signing_key(), mint_keypair.signing_key()])?;

    let signature = rpc::send_transaction(&config.rpc_url, &signed).await?;
    let status = rpc::confirm_transaction(&config.rpc_url, &signature).await?;
    if let TxStatus::Failed(reason) = &status {
        return Err(ForgeError::Other(format!(
            "Transaction {} failed on-chain: {}",
            signature, reason
        )));
    }

    info!(
        "[creator] {} ({}) created: mint={} status={}",
        form.name,
        form.symbol,
        mint_keypair.address(),
        status
    );

    Ok(CreateReceipt {
        mint: mint_keypair.address(),
        associated_token_account: encode_pubkey(&ata),
        signature,
        status,
        logo_cid: logo.cid,
        metadata_cid,
        metadata_url,
        decimals: form.decimals,
        total_supply: form.total_supply,
        supply_raw,
        cost,
        created_at: Utc::now(),
    })
}

/// The account table and instruction list for a creation transaction.
///
/// Accounts (runtime ordering: writable signers, then writable
/// non-signers, then read-only non-signers):
///   0 payer (signer, writable)    3 system program
///   1 mint (signer, writable)     4 token program
///   2 ata (writable)              5 ata program
pub(crate) fn creation_instructions(
    payer: &[u8; 32],
    mint: &[u8; 32],
    ata: &[u8; 32],
    form: &TokenForm,
    supply_raw: u64,
    mint_rent: u64,
) -> ForgeResult<(Vec<([u8; 32], bool, bool)>, Vec<(u8, Vec<u8>, Vec<u8>)>)> {
    let system_program = [0u8; 32];
    let token_program = decode_pubkey(crate::atoms::constants::TOKEN_PROGRAM_ID)?;
    let ata_program = decode_pubkey(crate::atoms::constants::ATA_PROGRAM_ID)?;

    let accounts = vec![
        (*payer, true, true),
        (*mint, true, true),
        (*ata, false, true),
        (system_program, false, false),
        (token_program, false, false),
        (ata_program, false, false),
    ];

    let freeze_authority = if form.revoke_freeze { None } else { Some(payer) };

    let mut instructions = vec![
        // Fund and allocate the mint account under the token program.
        (
            3u8,
            vec![0u8, 1],
            create_account_data(mint_rent, MINT_ACCOUNT_SIZE, &token_program),
        ),
        (
            4u8,
            vec![1u8],
            initialize_mint2_data(form.decimals, payer, freeze_authority),
        ),
        // ATA create: funder, ata, owner, mint, system, token program.
        (
            5u8,
            vec![0u8, 2, 0, 1, 3, 4],
            create_associated_token_account_data(),
        ),
        (4u8, vec![1u8, 2, 0], mint_to_data(supply_raw)),
    ];

    if form.revoke_mint {
        instructions.push((
            4u8,
            vec![1u8, 0],
            set_authority_data(AuthorityType::MintTokens, None),
        ));
    }

    Ok((accounts, instructions))
}
