//! Values the source dataset does not have: review ids and upvote counts.

use rand::Rng;
use uuid::Builder;

/// Upvotes are drawn from `UPVOTES_MIN..UPVOTES_END` (end exclusive).
pub const UPVOTES_MIN: i64 = 1;
pub const UPVOTES_END: i64 = 21;

/// Random (version 4) UUID in hyphenated lowercase form.
pub fn generate_review_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; 16] = rng.gen();
    Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

pub fn random_upvotes<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    rng.gen_range(UPVOTES_MIN..UPVOTES_END)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn review_ids_are_v4_uuids() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_review_id(&mut rng);
        let parsed = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id.len(), 36);
    }

    #[test]
    fn review_ids_do_not_repeat() {
        let mut rng = StdRng::seed_from_u64(42);
        let ids: HashSet<String> = (0..10_000).map(|_| generate_review_id(&mut rng)).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn upvotes_cover_one_to_twenty() {
        let mut rng = StdRng::seed_from_u64(3);
        let seen: HashSet<i64> = (0..5_000).map(|_| random_upvotes(&mut rng)).collect();
        assert!(seen.iter().all(|v| (1..=20).contains(v)));
        assert_eq!(seen.len(), 20);
    }
}
