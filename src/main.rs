use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

mod auth;
use cifra::{Key, KdfParams, decrypt, encrypt, generate_key, hash_password, verify_password};

#[derive(Debug, Parser)]
#[command(name = "cifra")]
#[command(
    version,
    about = "AES-256-GCM encryption and scrypt password hashing with hex output."
)]
struct Cli {
    /// Log failure details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args)]
struct KeyArgs {
    /// Encryption key as 64 hex characters
    #[arg(long, env = "CIFRA_KEY", hide_env_values = true)]
    key: String,
}

impl KeyArgs {
    fn to_key(&self) -> Result<Key> {
        Key::from_hex(&self.key).context("invalid encryption key")
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generates a new random key
    Keygen {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encrypts the plaintext argument, or stdin when omitted
    Encrypt {
        #[command(flatten)]
        key: KeyArgs,
        plaintext: Option<String>,
    },

    /// Decrypts the hex ciphertext argument, or stdin when omitted
    Decrypt {
        #[command(flatten)]
        key: KeyArgs,
        ciphertext: Option<String>,
    },

    /// Hashes a password read from CIFRA_PASSWORD, stdin or a prompt
    Hash {
        /// Salt mixed into the hash
        #[arg(long, env = "CIFRA_SALT")]
        salt: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Checks a password against a stored hash
    #[command(arg_required_else_help = true)]
    Verify {
        /// Salt the hash was created with
        #[arg(long, env = "CIFRA_SALT")]
        salt: String,

        /// Stored hash as 64 hex characters
        hash: String,
    },
}

#[derive(Serialize)]
struct KeyOutput<'a> {
    key: &'a str,
}

#[derive(Serialize)]
struct HashOutput<'a> {
    hash: &'a str,
    salt: &'a str,
    n: u64,
    r: u32,
    p: u32,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cifra=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_stdin() -> Result<Zeroizing<Vec<u8>>> {
    let mut buf = Zeroizing::new(Vec::new());
    io::stdin()
        .read_to_end(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

fn main() -> Result<()> {
    // a missing .env is fine
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Keygen { json } => {
            let key = generate_key().context("failed to generate key")?;
            let hex = key.to_hex();
            if json {
                println!("{}", serde_json::to_string(&KeyOutput { key: &hex })?);
            } else {
                println!("{}", *hex);
            }
        }
        Commands::Encrypt { key, plaintext } => {
            let key = key.to_key()?;
            let plaintext = match plaintext {
                Some(p) => Zeroizing::new(p.into_bytes()),
                None => read_stdin()?,
            };
            match encrypt(key.as_ref(), &plaintext) {
                Some(ciphertext) => println!("{ciphertext}"),
                None => bail!("encryption failed"),
            }
        }
        Commands::Decrypt { key, ciphertext } => {
            let key = key.to_key()?;
            let ciphertext = match ciphertext {
                Some(c) => c,
                None => String::from_utf8_lossy(&read_stdin()?).into_owned(),
            };
            match decrypt(key.as_ref(), ciphertext.trim()) {
                Some(plaintext) => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(&plaintext)?;
                    stdout.flush()?;
                }
                None => bail!("decryption failed"),
            }
        }
        Commands::Hash { salt, json } => {
            let password = auth::read_password(true)?;
            let hash = hash_password(&password, &salt)?;
            if json {
                let params = KdfParams::INTERACTIVE;
                let out = HashOutput {
                    hash: &hash,
                    salt: &salt,
                    n: params.n(),
                    r: params.r(),
                    p: params.p(),
                };
                println!("{}", serde_json::to_string(&out)?);
            } else {
                println!("{hash}");
            }
        }
        Commands::Verify { salt, hash } => {
            let password = auth::read_password(false)?;
            if !verify_password(&password, &salt, hash.trim())? {
                bail!("password does not match");
            }
            println!("match");
        }
    }

    Ok(())
}
