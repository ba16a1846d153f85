//! Initial ordering of participants before a bracket is built.

use arena_interface::competition::{participant::Participant, state::SeedingMethod};
use rand::{seq::SliceRandom, thread_rng, Rng};

/// Orders participants for bracket construction, best seed first.
pub fn seed(participants: &[Participant], method: SeedingMethod) -> Vec<Participant> {
    seed_with_rng(participants, method, &mut thread_rng())
}

pub fn seed_with_rng<R: Rng + ?Sized>(
    participants: &[Participant],
    method: SeedingMethod,
    rng: &mut R,
) -> Vec<Participant> {
    let mut seeded = participants.to_vec();

    match method {
        SeedingMethod::Random => seeded.shuffle(rng),
        // Stable sorts keep registration order between equal keys
        SeedingMethod::Rating => seeded.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SeedingMethod::Manual => seeded.sort_by_key(|p| (p.seed.is_none(), p.seed)),
    }

    seeded
}
