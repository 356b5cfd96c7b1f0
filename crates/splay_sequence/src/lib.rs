mod arena;
mod error;
mod naive;
mod splay;
mod traits;
mod util;

pub use error::SequenceError;
pub use naive::NaiveSequence;
pub use splay::{DEFAULT_CAPACITY, SplaySequence};
pub use traits::RangeSumSequence;

#[cfg(test)]
mod tests {
    use super::{NaiveSequence, RangeSumSequence, SplaySequence};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn run_script<S: RangeSumSequence>(seq: &mut S, seed: u64) -> Vec<i64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let initial: Vec<i64> = (0..rng.random_range(0..32))
            .map(|_| rng.random_range(-50..=50))
            .collect();
        seq.build(&initial).unwrap();

        let mut sums = Vec::new();
        for _ in 0..300 {
            let len = seq.len();
            match rng.random_range(0..4) {
                0 => {
                    let pos = rng.random_range(0..=len);
                    seq.insert(pos, rng.random_range(-50..=50)).unwrap();
                }
                1 if len > 0 => {
                    sums.push(seq.delete(rng.random_range(0..len)).unwrap());
                }
                2 => {
                    let l = rng.random_range(0..=len);
                    let r = rng.random_range(l..=len);
                    seq.update_range(l..r, rng.random_range(-5..=5)).unwrap();
                }
                _ => {
                    let l = rng.random_range(0..=len);
                    let r = rng.random_range(l..=len);
                    sums.push(seq.query_range(l..r).unwrap());
                }
            }
        }
        sums.push(seq.query_range(..).unwrap());
        sums
    }

    #[test]
    fn implementations_agree_through_trait() {
        for seed in 0..20 {
            let mut splay = SplaySequence::with_capacity(400);
            let mut naive = NaiveSequence::new();
            assert_eq!(
                run_script(&mut splay, seed),
                run_script(&mut naive, seed),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn rebuild_resets_capacity() {
        let mut seq = SplaySequence::with_capacity(10);
        for round in 0..5 {
            seq.build(&[round; 4]).unwrap();
            for i in 0..4 {
                seq.insert(i, 1).unwrap();
            }
            assert_eq!(seq.remaining_capacity(), 0);
            assert_eq!(RangeSumSequence::query_range(&mut seq, ..), Ok(4 * round + 4));
        }
    }
}
