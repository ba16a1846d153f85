use chrono::{DateTime, TimeZone, Utc};
use rand::{rngs::StdRng, SeedableRng};

pub(crate) fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 14, 17, 0, 0).unwrap()
}

pub(crate) fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
