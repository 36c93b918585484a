//! Runs the entropy-loss detection harness over every primitive variant:
//! four HKDF hash functions, three XDRBG XOFs and three PRG security
//! parameters, each in its sound idealization plus the stateless unsound
//! forms. Exits non-zero as soon as any check raises a collision.
//!
//! The trial count defaults to 2^21 draws per check and can be lowered for
//! smoke runs via the `DETECTION_TRIALS` environment variable.

use anyhow::{Context, Result};
use forward_keychains::detection::{
    DEFAULT_TRIAL_COUNT, detect_entropy_loss_in_hkdf, detect_entropy_loss_in_prg,
    detect_entropy_loss_in_xdrbg,
};
use forward_keychains::extractor::RngExtractor;
use forward_keychains::{HashFunc, Xof};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn trial_count() -> Result<usize> {
    match std::env::var("DETECTION_TRIALS") {
        Ok(value) => value
            .parse::<usize>()
            .with_context(|| format!("DETECTION_TRIALS must be a number, got \"{value}\"")),
        Err(_) => Ok(DEFAULT_TRIAL_COUNT),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let trials = trial_count()?;
    let mut extractor = RngExtractor::from_os_entropy();

    for hash_func in [
        HashFunc::Sha256,
        HashFunc::Sha3_256,
        HashFunc::Sha512,
        HashFunc::Sha3_512,
    ] {
        detect_entropy_loss_in_hkdf(hash_func, trials, &mut extractor)
            .with_context(|| format!("entropy loss detected in HKDF over {hash_func:?}"))?;
    }

    for xof in [Xof::Shake128, Xof::Shake256, Xof::Ascon] {
        detect_entropy_loss_in_xdrbg(xof, trials, &mut extractor)
            .with_context(|| format!("entropy loss detected in XDRBG over {xof:?}"))?;
    }

    for security_param_lambda in [16, 24, 32] {
        detect_entropy_loss_in_prg(security_param_lambda, trials, &mut extractor).with_context(
            || format!("entropy loss detected in PRG with lambda {security_param_lambda}"),
        )?;
    }

    info!(trials, "all idealization checks passed without collisions");
    Ok(())
}
