// Engine — SPL Instruction Data Encoding
// create_account_data, initialize_mint2_data, create_associated_token_account_data,
// mint_to_data, set_authority_data

// Pure byte encoders for the instruction data of the five instructions
// a token creation transaction carries. Account index tables are
// assembled by the caller, which knows the message's account layout.

/// Authority classes a SetAuthority instruction can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorityType {
    MintTokens = 0,
    FreezeAccount = 1,
}

/// System program CreateAccount.
///
/// Layout: u32 LE tag (0), lamports u64 LE, space u64 LE, owner pubkey.
/// Accounts: [funder (signer, writable), new account (signer, writable)].
pub fn create_account_data(lamports: u64, space: u64, owner: &[u8; 32]) -> Vec<u8> {
    let mut data = Vec::with_capacity(52);
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner);
    data
}

/// SPL Token InitializeMint2 (tag 20).
///
/// Layout: u8 tag, decimals u8, mint authority pubkey, freeze authority
/// as a 1-byte-tagged optional pubkey. The "2" variant reads rent from
/// the Rent sysvar directly, so the only account is the mint itself.
pub fn initialize_mint2_data(
    decimals: u8,
    mint_authority: &[u8; 32],
    freeze_authority: Option<&[u8; 32]>,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(67);
    data.push(20);
    data.push(decimals);
    data.extend_from_slice(mint_authority);
    extend_pubkey_option(&mut data, freeze_authority);
    data
}

/// Associated token account Create.
///
/// The ATA program's Create variant takes no instruction data; the
/// derivation seeds come from the account list: [payer (signer,
/// writable), ata (writable), owner, mint, system program, token
/// program].
pub fn create_associated_token_account_data() -> Vec<u8> {
    Vec::new()
}

/// SPL Token MintTo (tag 7).
///
/// Layout: u8 tag, raw amount u64 LE.
/// Accounts: [mint (writable), destination (writable), mint authority (signer)].
pub fn mint_to_data(amount_raw: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(9);
    data.push(7);
    data.extend_from_slice(&amount_raw.to_le_bytes());
    data
}

/// SPL Token SetAuthority (tag 6).
///
/// Layout: u8 tag, authority type u8, new authority as a 1-byte-tagged
/// optional pubkey. Passing `None` revokes the authority permanently.
/// Accounts: [mint (writable), current authority (signer)].
pub fn set_authority_data(authority_type: AuthorityType, new_authority: Option<&[u8; 32]>) -> Vec<u8> {
    let mut data = Vec::with_capacity(35);
    data.push(6);
    data.push(authority_type as u8);
    extend_pubkey_option(&mut data, new_authority);
    data
}

// Instruction-data COption<Pubkey>: 0 for None, 1 followed by the key.
// (Account *state* uses a 4-byte tag instead; see the mint parser.)
fn extend_pubkey_option(buf: &mut Vec<u8>, key: Option<&[u8; 32]>) {
    match key {
        Some(k) => {
            buf.push(1);
            buf.extend_from_slice(k);
        }
        None => buf.push(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: [u8; 32] = [0xab; 32];
    const AUTH: [u8; 32] = [0xcd; 32];

    #[test]
    fn create_account_layout() {
        let data = create_account_data(1_461_600, 82, &OWNER);
        assert_eq!(data.len(), 52);
        assert_eq!(&data[..4], &[0, 0, 0, 0]);
        assert_eq!(&data[4..12], &1_461_600u64.to_le_bytes());
        assert_eq!(&data[12..20], &82u64.to_le_bytes());
        assert_eq!(&data[20..], &OWNER);
    }

    #[test]
    fn initialize_mint2_without_freeze_authority() {
        let data = initialize_mint2_data(9, &AUTH, None);
        assert_eq!(data.len(), 35);
        assert_eq!(data[0], 20);
        assert_eq!(data[1], 9);
        assert_eq!(&data[2..34], &AUTH);
        assert_eq!(data[34], 0);
    }

    #[test]
    fn initialize_mint2_with_freeze_authority() {
        let data = initialize_mint2_data(6, &AUTH, Some(&OWNER));
        assert_eq!(data.len(), 67);
        assert_eq!(data[34], 1);
        assert_eq!(&data[35..], &OWNER);
    }

    #[test]
    fn ata_create_carries_no_data() {
        assert!(create_associated_token_account_data().is_empty());
    }

    #[test]
    fn mint_to_layout() {
        let data = mint_to_data(1_000_000_000_000_000_000);
        assert_eq!(data.len(), 9);
        assert_eq!(data[0], 7);
        assert_eq!(&data[1..], &1_000_000_000_000_000_000u64.to_le_bytes());
    }

    #[test]
    fn set_authority_revocations() {
        let revoke_mint = set_authority_data(AuthorityType::MintTokens, None);
        assert_eq!(revoke_mint, vec![6, 0, 0]);

        let revoke_freeze = set_authority_data(AuthorityType::FreezeAccount, None);
        assert_eq!(revoke_freeze, vec![6, 1, 0]);
    }

    #[test]
    fn set_authority_transfer() {
        let data = set_authority_data(AuthorityType::MintTokens, Some(&AUTH));
        assert_eq!(data.len(), 35);
        assert_eq!(data[1], 0);
        assert_eq!(data[2], 1);
        assert_eq!(&data[3..], &AUTH);
    }
}
