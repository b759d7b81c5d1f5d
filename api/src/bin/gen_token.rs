// Print a signed JWT for local testing
// Usage: cargo run --bin gen_token -- <username> [--admin]

use anyhow::{bail, Result};
use common::auth::JwtService;
use common::config::Settings;

fn main() -> Result<()> {
    let mut username = None;
    let mut is_admin = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--admin" => is_admin = true,
            flag if flag.starts_with("--") => bail!("Unknown flag: {}", flag),
            name => username = Some(name.to_string()),
        }
    }

    let Some(username) = username else {
        bail!("Usage: gen_token <username> [--admin]");
    };

    let config = Settings::load()?;
    let jwt = JwtService::new(&config.auth.jwt_secret, config.auth.jwt_expiration_hours);
    let token = jwt.encode_token(&username, is_admin)?;

    println!("Username: {}", username);
    println!("Admin: {}", is_admin);
    println!("Token: {}", token);
    Ok(())
}
