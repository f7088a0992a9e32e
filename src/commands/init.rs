// Commands — init

use std::path::PathBuf;

use crate::atoms::error::{ForgeError, ForgeResult};

use super::{print_json, print_kv};

const SAMPLE_MANIFEST: &str = r#"# Token manifest. Edit the fields below and run:
#   mintforge create token.toml

[token]
name = "My Token"
symbol = "MYT"
description = "A token launched with mintforge."
# Path relative to this file.
logo = "logo.png"
# decimals = 9
# total_supply = 1000000000

[links]
# website = "https://example.com"
# twitter = "https://x.com/example"
# telegram = "https://t.me/example"
# discord = "https://discord.gg/example"

[authorities]
# Both default to true: fixed supply, no freeze authority.
# revoke_mint = true
# revoke_freeze = true
"#;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to scaffold into
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing manifest
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs, json: bool) -> ForgeResult<()> {
    let path = args.dir.join("token.toml");
    if path.exists() && !args.force {
        return Err(ForgeError::Config(format!(
            "{} already exists (pass --force to replace it)",
            path.display()
        )));
    }
    std::fs::create_dir_all(&args.dir)?;
    std::fs::write(&path, SAMPLE_MANIFEST)?;

    if json {
        return print_json(&serde_json::json!({ "manifest": path }));
    }

    print_kv("Manifest", path.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} and drop a logo.png next to it", path.display());
    println!("  2. mintforge wallet new   (then fund the address)");
    println!("  3. mintforge create {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::form;
    use std::path::Path;

    #[test]
    fn sample_manifest_parses_and_validates() {
        let manifest = form::parse_manifest(SAMPLE_MANIFEST).unwrap();
        let token_form = form::manifest_to_form(&manifest, Path::new("."));
        assert!(form::validate_form(&token_form).is_ok());
        assert_eq!(token_form.symbol, "MYT");
        assert_eq!(token_form.decimals, 9);
        assert_eq!(token_form.total_supply, 1_000_000_000);
        assert!(token_form.revoke_mint);
        assert!(token_form.revoke_freeze);
    }

    #[test]
    fn init_writes_and_refuses_overwrite() {
        let dir = std::env::temp_dir().join(format!("mintforge-init-{}", std::process::id()));
        let args = InitArgs { dir: dir.clone(), force: false };

        run(&args, false).unwrap();
        assert!(dir.join("token.toml").exists());

        let err = run(&args, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        let forced = InitArgs { dir: dir.clone(), force: true };
        assert!(run(&forced, false).is_ok());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
