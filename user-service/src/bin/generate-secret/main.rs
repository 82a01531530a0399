//! Prints a random signing secret and a config snippet using it.

use auth::config::DEFAULT_TOKEN_EXPIRY_HOURS;
use auth::config::RECOMMENDED_SECRET_BYTES;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

fn generate_secret() -> Result<String, rand::Error> {
    let mut bytes = [0u8; RECOMMENDED_SECRET_BYTES];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(STANDARD.encode(bytes))
}

fn main() -> Result<(), anyhow::Error> {
    let secret = generate_secret()?;

    println!("Generated JWT secret ({RECOMMENDED_SECRET_BYTES} bytes, base64):");
    println!();
    println!("{secret}");
    println!();
    println!("Add it to config/{{RUN_MODE}}.toml:");
    println!();
    println!("[jwt]");
    println!("secret = \"{secret}\"");
    println!("expiration_hours = {DEFAULT_TOKEN_EXPIRY_HOURS}");
    println!();
    println!("or export it as JWT__SECRET.");

    Ok(())
}
