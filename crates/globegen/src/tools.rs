use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seeded generator for the power grid. Without a fixed seed every call differs.
pub fn grid_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(splitmix64(seed)),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
