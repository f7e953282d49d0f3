//! Population generation and distance-tier classification.
//!
//! [`partition_population`] is the one-time classification pass: it draws
//! each sample, classifies it by distance from the origin, and appends it
//! straight into the matching tier store, so the full sample array is never
//! held in memory.

mod sampler;
mod tier;

use rand::Rng;
pub use sampler::{sample_in_sphere, Sample, VolumeSampler};
pub use tier::{Tier, TierThresholds};
use web_time::Instant;

use crate::error::Result;
use crate::options::{SceneConfig, TierOptions};
use crate::store::TierStores;

/// Generate `config.count` samples inside `config.radius` and route each
/// into its tier store.
///
/// Positions and colors are drawn from `rng`. Every store is sized to the
/// full population. Fails only if the thresholds are invalid.
pub fn partition_population<R: Rng + ?Sized>(
    config: &SceneConfig,
    tiers: &TierOptions,
    rng: &mut R,
) -> Result<TierStores> {
    let thresholds = config.thresholds()?;
    let started = Instant::now();
    let mut sampler = VolumeSampler::with_rng(rng, config.radius);
    let mut stores = TierStores::with_capacity(config.count, tiers);

    for _ in 0..config.count {
        let sample = sampler.next_sample();
        let tier = thresholds.classify(sample.distance());
        let _ = stores.append(tier, sample.position, sample.color)?;
    }

    let counts = stores.counts();
    log::info!(
        "partitioned {} samples (r = {}) in {:.1} ms: near {}, mid {}, far {}",
        config.count,
        config.radius,
        started.elapsed().as_secs_f64() * 1000.0,
        counts.near,
        counts.mid,
        counts.far,
    );
    Ok(stores)
}
