// Engine — Legacy Transaction Wire Format
// build_legacy_transaction, sign_transaction, encode/decode_compact_u16, derive_associated_token_account

use ed25519_dalek::{Signer, SigningKey};
use log::info;

use crate::atoms::error::{ForgeError, ForgeResult};

// ── Compact-u16 ───────────────────────────────────────────────────────

/// Encode a value in Solana's compact-u16 form (1-3 bytes, 7 bits per
/// byte, high bit = continuation).
pub fn encode_compact_u16(value: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(3);
    let mut rem = value;
    loop {
        let byte = (rem & 0x7f) as u8;
        rem >>= 7;
        if rem == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
    out
}

/// Decode a compact-u16. Returns (value, bytes_consumed).
pub fn decode_compact_u16(data: &[u8]) -> ForgeResult<(u16, usize)> {
    let mut value = 0u16;
    for (i, &byte) in data.iter().take(3).enumerate() {
        if i == 2 {
            // Third byte carries bits 14-15 only.
            if byte > 0x03 {
                return Err(ForgeError::Other(format!(
                    "compact-u16 out of range: third byte 0x{:02x}",
                    byte
                )));
            }
            value |= (byte as u16) << 14;
            return Ok((value, 3));
        }
        value |= ((byte & 0x7f) as u16) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(ForgeError::Other("Truncated compact-u16".into()))
}

// ── Transaction Building ──────────────────────────────────────────────

/// Build an unsigned Solana legacy transaction.
///
/// Wire layout:
///   [num_signatures (compact-u16)] [signature_slots (N×64, zeroed)] [message]
///
/// Message layout:
///   [header (3 bytes)] [account_keys (compact-u16 + N×32)]
///   [recent_blockhash (32)] [instructions (compact-u16 + entries)]
///
/// `accounts`: (pubkey, is_signer, is_writable) tuples. The runtime
/// requires them ordered writable signers, read-only signers, writable
/// non-signers, read-only non-signers; we reject anything else here
/// rather than let the cluster bounce the transaction.
/// `instructions`: (program_id_index, account_indices, data) tuples,
/// all indices into `accounts`.
pub fn build_legacy_transaction(
    recent_blockhash: &[u8; 32],
    accounts: &[([u8; 32], bool, bool)],
    instructions: &[(u8, Vec<u8>, Vec<u8>)],
) -> ForgeResult<Vec<u8>> {
    if accounts.is_empty() {
        return Err(ForgeError::Other("Transaction has no accounts".into()));
    }
    if accounts.len() > 256 {
        return Err(ForgeError::Other(format!(
            "Too many accounts for a legacy transaction: {}",
            accounts.len()
        )));
    }

    // Fee payer is always the first account and must sign and pay.
    let (_, first_signer, first_writable) = accounts[0];
    if !first_signer || !first_writable {
        return Err(ForgeError::Other(
            "First account must be a writable signer (fee payer)".into(),
        ));
    }

    // Ordering: writable signers < read-only signers < writable
    // non-signers < read-only non-signers.
    let class = |signer: bool, writable: bool| match (signer, writable) {
        (true, true) => 0u8,
        (true, false) => 1,
        (false, true) => 2,
        (false, false) => 3,
    };
    for pair in accounts.windows(2) {
        let (_, s0, w0) = pair[0];
        let (_, s1, w1) = pair[1];
        if class(s0, w0) > class(s1, w1) {
            return Err(ForgeError::Other(
                "Accounts out of order: signers must precede non-signers, writable before read-only".into(),
            ));
        }
    }
    for (i, (key, _, _)) in accounts.iter().enumerate() {
        if accounts[..i].iter().any(|(other, _, _)| other == key) {
            return Err(ForgeError::Other(format!(
                "Duplicate account key at index {}",
                i
            )));
        }
    }

    for (program_idx, indices, _) in instructions {
        if *program_idx as usize >= accounts.len() {
            return Err(ForgeError::Other(format!(
                "Instruction program index {} out of range",
                program_idx
            )));
        }
        if let Some(bad) = indices.iter().find(|i| **i as usize >= accounts.len()) {
            return Err(ForgeError::Other(format!(
                "Instruction account index {} out of range",
                bad
            )));
        }
    }

    let num_signers = accounts.iter().filter(|(_, s, _)| *s).count() as u8;
    let num_readonly_signed = accounts.iter().filter(|(_, s, w)| *s && !*w).count() as u8;
    let num_readonly_unsigned = accounts.iter().filter(|(_, s, w)| !*s && !*w).count() as u8;

    let mut message = Vec::new();
    message.push(num_signers);
    message.push(num_readonly_signed);
    message.push(num_readonly_unsigned);

    message.extend_from_slice(&encode_compact_u16(accounts.len() as u16));
    for (pubkey, _, _) in accounts {
        message.extend_from_slice(pubkey);
    }

    message.extend_from_slice(recent_blockhash);

    message.extend_from_slice(&encode_compact_u16(instructions.len() as u16));
    for (program_idx, indices, data) in instructions {
        message.push(*program_idx);
        message.extend_from_slice(&encode_compact_u16(indices.len() as u16));
        message.extend_from_slice(indices);
        message.extend_from_slice(&encode_compact_u16(data.len() as u16));
        message.extend_from_slice(data);
    }

    let mut tx = Vec::new();
    tx.extend_from_slice(&encode_compact_u16(num_signers as u16));
    for _ in 0..num_signers {
        tx.extend_from_slice(&[0u8; 64]);
    }
    tx.extend_from_slice(&message);
    Ok(tx)
}

// ── Transaction Signing ───────────────────────────────────────────────

/// Sign a legacy transaction with one or more keypairs.
///
/// Each key signs the message bytes and its signature lands in the slot
/// whose account key matches the key's public key, so callers can pass
/// signers in any order (payer and mint keypair both sign a creation
/// transaction). A key that is not among the required signers is an
/// error. Versioned transactions (first byte >= 0x80) are rejected;
/// nothing in this crate builds them.
pub fn sign_transaction(tx_bytes: &[u8], keys: &[&SigningKey]) -> ForgeResult<Vec<u8>> {
    if tx_bytes.is_empty() {
        return Err(ForgeError::Other("Empty transaction".into()));
    }
    if tx_bytes[0] >= 0x80 {
        return Err(ForgeError::Other(format!(
            "Versioned transaction (v{}) not supported; expected legacy",
            tx_bytes[0] & 0x7f
        )));
    }

    let (num_sigs, prefix_len) = decode_compact_u16(tx_bytes)?;
    if num_sigs == 0 {
        return Err(ForgeError::Other("Transaction requires 0 signatures".into()));
    }
    let slots_end = prefix_len + num_sigs as usize * 64;
    if slots_end > tx_bytes.len() {
        return Err(ForgeError::Other(format!(
            "Transaction too short: need {} bytes for {} signature slots, have {}",
            slots_end,
            num_sigs,
            tx_bytes.len()
        )));
    }

    let message = &tx_bytes[slots_end..];
    let signer_keys = message_signer_keys(message, num_sigs as usize)?;

    let mut signed = tx_bytes.to_vec();
    for key in keys {
        let pubkey = key.verifying_key().to_bytes();
        let slot = signer_keys
            .iter()
            .position(|k| *k == pubkey)
            .ok_or_else(|| {
                ForgeError::Other(format!(
                    "Signer {} is not a required signer of this transaction",
                    bs58::encode(pubkey).into_string()
                ))
            })?;
        let signature = key.sign(message);
        let start = prefix_len + slot * 64;
        signed[start..start + 64].copy_from_slice(&signature.to_bytes());
    }

    info!(
        "[tx] Signed with {}/{} keys (msg_len={})",
        keys.len(),
        num_sigs,
        message.len()
    );
    Ok(signed)
}

/// Pull the first `num_sigs` account keys out of a legacy message and
/// cross-check the header's signer count against the slot count.
fn message_signer_keys(message: &[u8], num_sigs: usize) -> ForgeResult<Vec<[u8; 32]>> {
    if message.len() < 3 {
        return Err(ForgeError::Other("Message too short for header".into()));
    }
    if message[0] as usize != num_sigs {
        return Err(ForgeError::Other(format!(
            "Signature slot count {} disagrees with message header {}",
            num_sigs, message[0]
        )));
    }
    let (account_count, consumed) = decode_compact_u16(&message[3..])?;
    let keys_start = 3 + consumed;
    let keys_end = keys_start + account_count as usize * 32;
    if keys_end > message.len() {
        return Err(ForgeError::Other("Message truncated in account keys".into()));
    }
    if num_sigs > account_count as usize {
        return Err(ForgeError::Other(format!(
            "Message lists {} accounts but requires {} signers",
            account_count, num_sigs
        )));
    }
    let mut out = Vec::with_capacity(num_sigs);
    for i in 0..num_sigs {
        let start = keys_start + i * 32;
        let mut key = [0u8; 32];
        key.copy_from_slice(&message[start..start + 32]);
        out.push(key);
    }
    Ok(out)
}

// ── Associated Token Account ──────────────────────────────────────────

/// Derive the associated token account address for (wallet, mint).
///
/// ATA = PDA of [wallet, token_program, mint] under the ATA program:
/// sha256 of the seeds, a bump byte, the ATA program id, and the
/// "ProgramDerivedAddress" marker, taking the first bump from 255 down
/// whose hash falls off the ed25519 curve.
pub fn derive_associated_token_account(
    wallet: &[u8; 32],
    mint: &[u8; 32],
    token_program: &[u8; 32],
) -> ForgeResult<[u8; 32]> {
    use sha2::Digest;
    let ata_program = super::helpers::decode_pubkey(crate::atoms::constants::ATA_PROGRAM_ID)?;

    for bump in (0u8..=255).rev() {
        let mut hasher = sha2::Sha256::new();
        hasher.update(wallet);
        hasher.update(token_program);
        hasher.update(mint);
        hasher.update([bump]);
        hasher.update(ata_program);
        hasher.update(b"ProgramDerivedAddress");
        let hash = hasher.finalize();

        let mut candidate = [0u8; 32];
        candidate.copy_from_slice(&hash[..32]);
        // A PDA must not be a valid curve point.
        if ed25519_dalek::VerifyingKey::from_bytes(&candidate).is_err() {
            return Ok(candidate);
        }
    }
    Err(ForgeError::Other(
        "No off-curve associated token address found".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::VerifyingKey;

    fn key(seed: u8) -> SigningKey {
        SigningKey::from_bytes(&[seed; 32])
    }

    #[test]
    fn compact_u16_known_encodings() {
        assert_eq!(encode_compact_u16(0), vec![0x00]);
        assert_eq!(encode_compact_u16(1), vec![0x01]);
        assert_eq!(encode_compact_u16(0x7f), vec![0x7f]);
        assert_eq!(encode_compact_u16(0x80), vec![0x80, 0x01]);
        assert_eq!(encode_compact_u16(0x3fff), vec![0xff, 0x7f]);
        assert_eq!(encode_compact_u16(0x4000), vec![0x80, 0x80, 0x01]);
        assert_eq!(encode_compact_u16(0xffff), vec![0xff, 0xff, 0x03]);
    }

    #[test]
    fn compact_u16_roundtrip() {
        for v in [0u16, 1, 0x7f, 0x80, 0x100, 0x3fff, 0x4000, 0x7fff, 0xffff] {
            let bytes = encode_compact_u16(v);
            let (decoded, consumed) = decode_compact_u16(&bytes).unwrap();
            assert_eq!(decoded, v);
            assert_eq!(consumed, bytes.len());
        }
    }

    #[test]
    fn compact_u16_decode_errors() {
        assert!(decode_compact_u16(&[]).is_err());
        assert!(decode_compact_u16(&[0x80]).is_err());
        assert!(decode_compact_u16(&[0x80, 0x80]).is_err());
        // Third byte above 0x03 would push past 16 bits.
        assert!(decode_compact_u16(&[0x80, 0x80, 0x04]).is_err());
    }

    #[test]
    fn build_lays_out_header_and_slots() {
        let payer = key(1).verifying_key().to_bytes();
        let mint = key(2).verifying_key().to_bytes();
        let program = [9u8; 32];
        let blockhash = [7u8; 32];

        let accounts = [
            (payer, true, true),
            (mint, true, true),
            (program, false, false),
        ];
        let instructions = [(2u8, vec![0u8, 1], vec![0xaa, 0xbb])];
        let tx = build_legacy_transaction(&blockhash, &accounts, &instructions).unwrap();

        // 2 signers: 1-byte count then two zeroed 64-byte slots.
        assert_eq!(tx[0], 2);
        assert!(tx[1..129].iter().all(|b| *b == 0));

        let msg = &tx[129..];
        // Header: 2 signers, 0 read-only signed, 1 read-only unsigned.
        assert_eq!(&msg[..3], &[2, 0, 1]);
        // 3 account keys.
        assert_eq!(msg[3], 3);
        assert_eq!(&msg[4..36], &payer);
        assert_eq!(&msg[36..68], &mint);
        assert_eq!(&msg[68..100], &program);
        // Blockhash follows the keys.
        assert_eq!(&msg[100..132], &blockhash);
        // One instruction: program idx 2, accounts [0, 1], data [aa, bb].
        assert_eq!(&msg[132..], &[1, 2, 2, 0, 1, 2, 0xaa, 0xbb]);
    }

    #[test]
    fn build_rejects_non_signer_payer() {
        let accounts = [([1u8; 32], false, true)];
        assert!(build_legacy_transaction(&[0u8; 32], &accounts, &[]).is_err());
    }

    #[test]
    fn build_rejects_misordered_accounts() {
        // Read-only non-signer before a writable non-signer.
        let accounts = [
            ([1u8; 32], true, true),
            ([2u8; 32], false, false),
            ([3u8; 32], false, true),
        ];
        assert!(build_legacy_transaction(&[0u8; 32], &accounts, &[]).is_err());
    }

    #[test]
    fn build_rejects_duplicate_accounts() {
        let accounts = [([1u8; 32], true, true), ([1u8; 32], false, true)];
        assert!(build_legacy_transaction(&[0u8; 32], &accounts, &[]).is_err());
    }

    #[test]
    fn build_rejects_out_of_range_indices() {
        let accounts = [([1u8; 32], true, true)];
        let bad_program = [(5u8, vec![0u8], vec![])];
        assert!(build_legacy_transaction(&[0u8; 32], &accounts, &bad_program).is_err());
        let bad_account = [(0u8, vec![3u8], vec![])];
        assert!(build_legacy_transaction(&[0u8; 32], &accounts, &bad_account).is_err());
    }

    #[test]
    fn sign_fills_matching_slots_in_any_order() {
        let payer = key(1);
        let mint = key(2);
        let accounts = [
            (payer.verifying_key().to_bytes(), true, true),
            (mint.verifying_key().to_bytes(), true, true),
            ([9u8; 32], false, false),
        ];
        let instructions = [(2u8, vec![0u8, 1], vec![1, 2, 3])];
        let tx = build_legacy_transaction(&[7u8; 32], &accounts, &instructions).unwrap();

        // Pass the mint keypair first; slots must still line up by pubkey.
        let signed = sign_transaction(&tx, &[&mint, &payer]).unwrap();
        let message = &signed[1 + 2 * 64..];

        let payer_sig = ed25519_dalek::Signature::from_bytes(
            signed[1..65].try_into().unwrap(),
        );
        let mint_sig = ed25519_dalek::Signature::from_bytes(
            signed[65..129].try_into().unwrap(),
        );
        assert!(payer.verifying_key().verify_strict(message, &payer_sig).is_ok());
        assert!(mint.verifying_key().verify_strict(message, &mint_sig).is_ok());
    }

    #[test]
    fn sign_rejects_unknown_signer() {
        let payer = key(1);
        let stranger = key(3);
        let accounts = [(payer.verifying_key().to_bytes(), true, true)];
        let tx = build_legacy_transaction(&[0u8; 32], &accounts, &[]).unwrap();
        assert!(sign_transaction(&tx, &[&stranger]).is_err());
    }

    #[test]
    fn sign_rejects_versioned_prefix() {
        let err = sign_transaction(&[0x80, 0x01], &[&key(1)]).unwrap_err();
        assert!(err.to_string().contains("Versioned"));
    }

    #[test]
    fn sign_rejects_empty_and_truncated() {
        assert!(sign_transaction(&[], &[&key(1)]).is_err());
        // Claims one signature but has no slot bytes.
        assert!(sign_transaction(&[0x01, 0x00], &[&key(1)]).is_err());
    }

    #[test]
    fn ata_is_deterministic_and_off_curve() {
        let wallet = key(1).verifying_key().to_bytes();
        let other_wallet = key(2).verifying_key().to_bytes();
        let mint = key(3).verifying_key().to_bytes();
        let token_program =
            crate::engine::helpers::decode_pubkey(crate::atoms::constants::TOKEN_PROGRAM_ID)
                .unwrap();

        let a = derive_associated_token_account(&wallet, &mint, &token_program).unwrap();
        let b = derive_associated_token_account(&wallet, &mint, &token_program).unwrap();
        assert_eq!(a, b);

        let c = derive_associated_token_account(&other_wallet, &mint, &token_program).unwrap();
        assert_ne!(a, c);

        assert!(VerifyingKey::from_bytes(&a).is_err());
    }
}
