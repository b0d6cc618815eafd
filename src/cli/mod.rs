pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Encrypt and decrypt text with age keys, SSH keys or passphrases.
#[derive(Parser, Debug)]
#[command(name = "sealpost", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a config file (default: <config dir>/sealpost/config.toml)
    #[arg(long, global = true, env = "SEALPOST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new age key pair
    Keygen {
        /// Write the identity file here instead of printing JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a random word passphrase
    Passphrase {
        /// Number of words (default from config, 10)
        #[arg(long)]
        words: Option<usize>,
    },

    /// Encrypt text to recipients or a passphrase (armored output)
    Encrypt {
        /// Recipient: age1... or ssh-... public key. Repeatable
        #[arg(short = 'r', long = "recipient")]
        recipients: Vec<String>,

        /// File with one recipient per line. Repeatable
        #[arg(short = 'R', long = "recipients-file")]
        recipients_files: Vec<PathBuf>,

        /// Passphrase used when no recipients are given (generated if absent)
        #[arg(long, env = "SEALPOST_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,

        /// Write ciphertext here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input file, or '-' for stdin (default)
        input: Option<String>,
    },

    /// Decrypt armored text with identities or a passphrase
    Decrypt {
        /// Identity: AGE-SECRET-KEY-1... or ssh-... key. Repeatable
        #[arg(short = 'i', long = "identity")]
        identities: Vec<String>,

        /// Identity file (age keys file or OpenSSH private key). Repeatable
        #[arg(short = 'I', long = "identity-file")]
        identity_files: Vec<PathBuf>,

        /// Passphrase used when no identities are given
        #[arg(long, env = "SEALPOST_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,

        /// Write plaintext here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input file, or '-' for stdin (default)
        input: Option<String>,
    },

    /// Run one request through the endpoint dispatcher
    Handle {
        /// Resource path: /keygen, /encrypt or /decrypt
        path: String,

        /// JSON body file, or '-' for stdin (default: empty body)
        body: Option<String>,
    },
}
